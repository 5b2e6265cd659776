//! Speech Synthesis Port - TTS 合成引擎抽象
//!
//! 定义 TTS 合成的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::voice::{AudioFormat, SynthesisParameters, VoiceId};

/// TTS 错误
#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// TTS 合成请求（参数已校验）
#[derive(Debug, Clone)]
pub struct SpeechRequest {
    pub text: String,
    pub voice_id: VoiceId,
    pub parameters: SynthesisParameters,
}

/// TTS 合成响应
#[derive(Debug, Clone)]
pub struct SpeechResponse {
    /// 原始音频数据
    pub audio_data: Vec<u8>,
    /// 实际采样率
    pub sample_rate: u32,
    /// 实际格式
    pub format: AudioFormat,
    /// 服务端报告的时长（毫秒），仅用于日志
    pub duration_ms: Option<u64>,
}

/// Speech Synthesis Port
#[async_trait]
pub trait SpeechSynthesisPort: Send + Sync {
    /// 执行 TTS 合成
    async fn synthesize(&self, request: SpeechRequest) -> Result<SpeechResponse, SpeechError>;

    /// 是否为降级（本地占位）实现
    fn is_degraded(&self) -> bool {
        false
    }

    /// 检查 TTS 服务是否可用
    async fn health_check(&self) -> bool {
        true // 默认实现
    }
}
