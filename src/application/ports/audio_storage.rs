//! Audio Storage Port - 出站端口
//!
//! 定义合成音频文件存储的抽象接口

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::voice::{AudioFormat, VoiceId};

/// 音频存储错误
#[derive(Debug, Error)]
pub enum AudioStorageError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// 音频文件定位信息
#[derive(Debug, Clone)]
pub struct AudioLocation {
    pub voice_id: VoiceId,
    pub artifact_id: String,
    /// 原文内容 hash（文件名前缀）
    pub content_hash: String,
    pub format: AudioFormat,
}

impl AudioLocation {
    pub fn new(voice_id: VoiceId, artifact_id: String, text: &str, format: AudioFormat) -> Self {
        Self {
            voice_id,
            artifact_id,
            content_hash: content_hash(text),
            format,
        }
    }

    /// 文件名：`{hash 前 8 位}_{artifact_id}.{ext}`
    pub fn file_name(&self) -> String {
        let prefix: String = self.content_hash.chars().take(8).collect();
        format!("{}_{}.{}", prefix, self.artifact_id, self.format.extension())
    }
}

/// 原文内容 hash
pub fn content_hash(text: &str) -> String {
    format!("{:x}", md5::compute(text.as_bytes()))
}

/// Audio Storage Port - 出站端口
#[async_trait]
pub trait AudioStoragePort: Send + Sync {
    /// 获取音频文件路径
    fn audio_path(&self, location: &AudioLocation) -> PathBuf;

    /// 保存音频数据
    async fn save_audio(
        &self,
        location: &AudioLocation,
        data: &[u8],
    ) -> Result<PathBuf, AudioStorageError>;

    /// 读取音频数据
    async fn read_audio(&self, location: &AudioLocation) -> Result<Vec<u8>, AudioStorageError>;

    /// 检查音频是否存在
    async fn audio_exists(&self, location: &AudioLocation) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_layout() {
        let location = AudioLocation::new(
            VoiceId::new("voice_1").unwrap(),
            "abc".to_string(),
            "Hello world",
            AudioFormat::Mp3,
        );
        // md5("Hello world") = 3e25960a79dbc69b674cd4ec67a72c62
        assert_eq!(location.file_name(), "3e25960a_abc.mp3");
    }
}
