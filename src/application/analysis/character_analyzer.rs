//! Character Analyzer - 角色识别

use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use crate::application::error::PipelineError;
use crate::application::ports::{AnalysisError, CharacterAnalysisRequest, TextAnalysisPort};
use crate::domain::character::Character;

/// 单次分析允许的最大文本长度（字符）
pub const MAX_ANALYSIS_CHARS: usize = 1_000_000;

/// 请求外部服务时的角色数量上限
pub const MAX_ROSTER_SIZE: usize = 50;

/// 分析选项
#[derive(Debug, Clone)]
pub struct AnalyzerOptions {
    /// 语言提示
    pub language: String,
    /// 角色数量上限（不超过 MAX_ROSTER_SIZE）
    pub max_characters: usize,
    /// 单次外部调用超时
    pub timeout: Duration,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            max_characters: MAX_ROSTER_SIZE,
            timeout: Duration::from_secs(60),
        }
    }
}

/// 角色名单
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharacterRoster {
    pub characters: Vec<Character>,
    /// 是否由本地启发式生成
    pub degraded: bool,
}

/// 校验待分析文本：非空且不超过 MAX_ANALYSIS_CHARS
pub(crate) fn validate_analysis_text(text: &str) -> Result<(), PipelineError> {
    if text.is_empty() {
        return Err(PipelineError::invalid_input("text cannot be empty"));
    }
    let length = text.chars().count();
    if length > MAX_ANALYSIS_CHARS {
        return Err(PipelineError::invalid_input(format!(
            "text is too long ({} chars), maximum is {} characters",
            length, MAX_ANALYSIS_CHARS
        )));
    }
    Ok(())
}

/// 角色识别器
///
/// 不修改任何音色目录，只返回数据
pub struct CharacterAnalyzer {
    provider: Arc<dyn TextAnalysisPort>,
    options: AnalyzerOptions,
}

impl CharacterAnalyzer {
    pub fn new(provider: Arc<dyn TextAnalysisPort>, options: AnalyzerOptions) -> Self {
        Self { provider, options }
    }

    pub fn is_degraded(&self) -> bool {
        self.provider.is_degraded()
    }

    pub async fn identify(&self, text: &str) -> Result<CharacterRoster, PipelineError> {
        validate_analysis_text(text)?;

        let request = CharacterAnalysisRequest {
            text: text.to_string(),
            max_characters: self.options.max_characters.min(MAX_ROSTER_SIZE),
            language: self.options.language.clone(),
            include_description: true,
        };

        let response = tokio::time::timeout(
            self.options.timeout,
            self.provider.analyze_characters(request),
        )
        .await
        .map_err(|_| AnalysisError::Timeout)
        .and_then(|result| result)
        .map_err(|e| {
            tracing::error!(error = %e, "Character analysis failed");
            PipelineError::from(e)
        })?;

        let characters = self.enforce_roster(response.characters)?;
        let degraded = self.is_degraded();

        if degraded {
            tracing::warn!(
                count = characters.len(),
                "No analysis provider configured, roster generated in degraded mode"
            );
        } else {
            tracing::info!(count = characters.len(), "Identified characters in text");
        }

        Ok(CharacterRoster {
            characters,
            degraded,
        })
    }

    /// 约束外部返回的名单：名称非空且唯一、数量上限、至多一个旁白
    ///
    /// 降级名单由本地规则决定人数（2..=10），只受 MAX_ROSTER_SIZE 约束
    fn enforce_roster(&self, characters: Vec<Character>) -> Result<Vec<Character>, PipelineError> {
        let limit = if self.is_degraded() {
            MAX_ROSTER_SIZE
        } else {
            self.options.max_characters.min(MAX_ROSTER_SIZE)
        };
        let mut seen = HashSet::new();
        let mut narrator_seen = false;
        let mut roster = Vec::with_capacity(characters.len().min(limit));

        for mut character in characters {
            if character.name.trim().is_empty() {
                return Err(PipelineError::ProviderResponse(
                    "character with empty name in provider response".to_string(),
                ));
            }
            if !seen.insert(character.name.clone()) {
                return Err(PipelineError::ProviderResponse(format!(
                    "duplicate character name in provider response: {}",
                    character.name
                )));
            }
            if roster.len() == limit {
                tracing::warn!(limit, name = %character.name, "Roster limit reached, dropping character");
                continue;
            }

            if character.is_narrator {
                if narrator_seen {
                    tracing::warn!(name = %character.name, "Additional narrator demoted");
                    character.is_narrator = false;
                }
                narrator_seen = true;
            }
            character.confidence = character.confidence.clamp(0.0, 1.0);
            roster.push(character);
        }

        Ok(roster)
    }
}
