//! File Storage - 文件系统音频存储实现
//!
//! 实现 AudioStoragePort trait
//!
//! 目录布局: `{base_dir}/{voice_id}/{hash8}_{artifact_id}.{ext}`

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::application::ports::{AudioLocation, AudioStorageError, AudioStoragePort};

/// 文件系统音频存储
pub struct FileAudioStorage {
    /// 存储根目录
    base_dir: PathBuf,
}

impl FileAudioStorage {
    /// 创建新的文件存储，目录在首次写入时创建
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    /// 获取存储根目录
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn voice_dir(&self, location: &AudioLocation) -> PathBuf {
        self.base_dir.join(location.voice_id.as_str())
    }
}

#[async_trait]
impl AudioStoragePort for FileAudioStorage {
    fn audio_path(&self, location: &AudioLocation) -> PathBuf {
        self.voice_dir(location).join(location.file_name())
    }

    async fn save_audio(
        &self,
        location: &AudioLocation,
        data: &[u8],
    ) -> Result<PathBuf, AudioStorageError> {
        fs::create_dir_all(self.voice_dir(location))
            .await
            .map_err(|e| AudioStorageError::IoError(e.to_string()))?;

        let audio_path = self.audio_path(location);

        fs::write(&audio_path, data)
            .await
            .map_err(|e| AudioStorageError::IoError(e.to_string()))?;

        tracing::debug!(
            voice_id = %location.voice_id,
            artifact_id = %location.artifact_id,
            size = data.len(),
            "Saved audio"
        );

        Ok(audio_path)
    }

    async fn read_audio(&self, location: &AudioLocation) -> Result<Vec<u8>, AudioStorageError> {
        let audio_path = self.audio_path(location);

        if !audio_path.exists() {
            return Err(AudioStorageError::FileNotFound(
                audio_path.to_string_lossy().to_string(),
            ));
        }

        fs::read(&audio_path)
            .await
            .map_err(|e| AudioStorageError::IoError(e.to_string()))
    }

    async fn audio_exists(&self, location: &AudioLocation) -> bool {
        fs::try_exists(self.audio_path(location))
            .await
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::voice::{AudioFormat, VoiceId};
    use tempfile::tempdir;

    fn location(artifact_id: &str) -> AudioLocation {
        AudioLocation::new(
            VoiceId::new("voice_2").unwrap(),
            artifact_id.to_string(),
            "Hello world",
            AudioFormat::Mp3,
        )
    }

    #[tokio::test]
    async fn test_save_and_read_audio() {
        let temp_dir = tempdir().unwrap();
        let storage = FileAudioStorage::new(temp_dir.path().join("audio"));
        let location = location("a1");
        let data = b"fake mp3 data";

        assert!(!storage.audio_exists(&location).await);

        let path = storage.save_audio(&location, data).await.unwrap();
        assert!(path.exists());
        assert_eq!(
            path,
            temp_dir.path().join("audio").join("voice_2").join("3e25960a_a1.mp3")
        );

        let read_data = storage.read_audio(&location).await.unwrap();
        assert_eq!(read_data, data);
        assert!(storage.audio_exists(&location).await);
    }

    #[tokio::test]
    async fn test_read_missing_audio() {
        let temp_dir = tempdir().unwrap();
        let storage = FileAudioStorage::new(temp_dir.path());

        let result = storage.read_audio(&location("missing")).await;
        assert!(matches!(result, Err(AudioStorageError::FileNotFound(_))));
    }

    #[tokio::test]
    async fn test_distinct_artifacts_do_not_collide() {
        let temp_dir = tempdir().unwrap();
        let storage = FileAudioStorage::new(temp_dir.path());

        let first = storage.save_audio(&location("a1"), b"one").await.unwrap();
        let second = storage.save_audio(&location("a2"), b"two").await.unwrap();

        assert_ne!(first, second);
        assert_eq!(storage.read_audio(&location("a1")).await.unwrap(), b"one");
    }
}
