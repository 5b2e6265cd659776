//! 应用层错误定义
//!
//! 调用方可见的统一错误类型，各组件在边界处把下层错误映射到这里

use thiserror::Error;

use crate::application::ports::{AnalysisError, AudioStorageError, SpeechError};
use crate::domain::voice::VoiceError;

/// 流水线错误
#[derive(Debug, Error)]
pub enum PipelineError {
    /// 调用方输入格式错误或越界
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// 合成参数非法（InvalidInput 的子类）
    #[error("Invalid parameter `{key}`: {message}")]
    InvalidParameter { key: String, message: String },

    /// 引用的实体不存在
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// 外部依赖暂时不可用，可由调用方退避重试
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// 外部依赖返回了无法使用的数据
    #[error("Provider response error: {0}")]
    ProviderResponse(String),

    /// 对白归属失败
    #[error("Attribution error: {0}")]
    Attribution(String),

    /// 音频合成失败
    #[error("Synthesis error: {0}")]
    Synthesis(String),

    /// 调用方取消
    #[error("Operation cancelled")]
    Cancelled,
}

impl PipelineError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn not_found(resource_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type,
            id: id.into(),
        }
    }

    pub fn attribution(message: impl Into<String>) -> Self {
        Self::Attribution(message.into())
    }

    pub fn synthesis(message: impl Into<String>) -> Self {
        Self::Synthesis(message.into())
    }

    /// 只有暂时性外部故障值得重试
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ProviderUnavailable(_))
    }

    /// InvalidParameter 也算输入错误
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_) | Self::InvalidParameter { .. })
    }
}

impl From<VoiceError> for PipelineError {
    fn from(err: VoiceError) -> Self {
        match err {
            VoiceError::NotFound(id) => Self::not_found("Voice", id.to_string()),
            VoiceError::InvalidParameter { key, reason } => Self::InvalidParameter {
                key,
                message: reason,
            },
            VoiceError::InvalidCustomization(message) => Self::InvalidInput(message),
        }
    }
}

impl From<AnalysisError> for PipelineError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::Unavailable(_) | AnalysisError::Timeout => {
                Self::ProviderUnavailable(err.to_string())
            }
            AnalysisError::InvalidResponse(_) => Self::ProviderResponse(err.to_string()),
        }
    }
}

impl From<SpeechError> for PipelineError {
    fn from(err: SpeechError) -> Self {
        Self::Synthesis(err.to_string())
    }
}

impl From<AudioStorageError> for PipelineError {
    fn from(err: AudioStorageError) -> Self {
        Self::Synthesis(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::voice::VoiceId;

    #[test]
    fn test_retryable_only_for_unavailable() {
        assert!(PipelineError::from(AnalysisError::Timeout).is_retryable());
        assert!(PipelineError::from(AnalysisError::Unavailable("down".into())).is_retryable());
        assert!(!PipelineError::from(AnalysisError::InvalidResponse("junk".into())).is_retryable());
        assert!(!PipelineError::synthesis("boom").is_retryable());
    }

    #[test]
    fn test_invalid_parameter_is_invalid_input() {
        let err = PipelineError::from(VoiceError::invalid_parameter("speed", "too fast"));
        assert!(err.is_invalid_input());
        assert_eq!(err.to_string(), "Invalid parameter `speed`: too fast");
    }

    #[test]
    fn test_voice_not_found_names_entity() {
        let err = PipelineError::from(VoiceError::NotFound(VoiceId::new("ghost").unwrap()));
        assert_eq!(err.to_string(), "Voice not found: ghost");
    }
}
