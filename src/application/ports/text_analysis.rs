//! Text Analysis Port - 文本理解服务抽象
//!
//! 角色识别与对白分析的外部服务接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::character::Character;
use crate::domain::dialogue::DialogueSpan;

/// 文本分析错误
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Analysis provider unavailable: {0}")]
    Unavailable(String),

    #[error("Analysis request timeout")]
    Timeout,

    #[error("Invalid analysis response: {0}")]
    InvalidResponse(String),
}

/// 角色识别请求
#[derive(Debug, Clone, Serialize)]
pub struct CharacterAnalysisRequest {
    pub text: String,
    pub max_characters: usize,
    pub language: String,
    pub include_description: bool,
}

/// 角色识别响应
#[derive(Debug, Clone, Deserialize)]
pub struct CharacterAnalysisResponse {
    #[serde(default)]
    pub characters: Vec<Character>,
}

/// 对白分析请求
#[derive(Debug, Clone, Serialize)]
pub struct DialogueAnalysisRequest {
    pub text: String,
    pub characters: Vec<Character>,
    pub language: String,
    pub include_emotion: bool,
}

/// 对白分析响应
#[derive(Debug, Clone, Deserialize)]
pub struct DialogueAnalysisResponse {
    #[serde(default)]
    pub dialogues: Vec<DialogueSpan>,
}

/// Text Analysis Port
///
/// 两种实现：外部服务适配器、本地确定性降级实现
#[async_trait]
pub trait TextAnalysisPort: Send + Sync {
    /// 识别文本中的角色
    async fn analyze_characters(
        &self,
        request: CharacterAnalysisRequest,
    ) -> Result<CharacterAnalysisResponse, AnalysisError>;

    /// 识别对白并归属到角色
    async fn analyze_dialogue(
        &self,
        request: DialogueAnalysisRequest,
    ) -> Result<DialogueAnalysisResponse, AnalysisError>;

    /// 是否为降级（本地启发式）实现
    fn is_degraded(&self) -> bool {
        false
    }

    /// 检查服务是否可用
    async fn health_check(&self) -> bool {
        true
    }
}
