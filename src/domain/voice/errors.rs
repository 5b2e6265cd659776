//! Voice Context - Errors

use thiserror::Error;

use super::VoiceId;

#[derive(Debug, Error)]
pub enum VoiceError {
    #[error("Voice not found: {0}")]
    NotFound(VoiceId),

    #[error("Invalid parameter `{key}`: {reason}")]
    InvalidParameter { key: String, reason: String },

    #[error("Invalid customization: {0}")]
    InvalidCustomization(String),
}

impl VoiceError {
    pub fn invalid_parameter(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            key: key.into(),
            reason: reason.into(),
        }
    }
}
