//! Local Speech Synthesizer - 无外部 TTS 服务时的占位实现
//!
//! 不实际合成，始终返回固定的占位音频（或空数据）

use async_trait::async_trait;
use std::path::Path;

use crate::application::ports::{SpeechError, SpeechRequest, SpeechResponse, SpeechSynthesisPort};
use crate::domain::voice::AudioFormat;

/// 本地占位合成器
pub struct LocalSpeechSynthesizer {
    /// 缓存的占位音频数据
    audio_data: Vec<u8>,
    sample_rate: u32,
}

impl LocalSpeechSynthesizer {
    /// 以占位音频文件创建
    pub fn from_file(path: impl AsRef<Path>, sample_rate: u32) -> Result<Self, std::io::Error> {
        let path = path.as_ref();
        let audio_data = std::fs::read(path)?;
        tracing::info!(
            path = %path.display(),
            size = audio_data.len(),
            "LocalSpeechSynthesizer initialized with placeholder audio"
        );
        Ok(Self {
            audio_data,
            sample_rate,
        })
    }

    /// 返回空音频数据
    pub fn empty(sample_rate: u32) -> Self {
        Self {
            audio_data: Vec::new(),
            sample_rate,
        }
    }
}

#[async_trait]
impl SpeechSynthesisPort for LocalSpeechSynthesizer {
    async fn synthesize(&self, request: SpeechRequest) -> Result<SpeechResponse, SpeechError> {
        tracing::debug!(
            text_len = request.text.len(),
            voice_id = %request.voice_id,
            "LocalSpeechSynthesizer: returning placeholder audio"
        );

        Ok(SpeechResponse {
            audio_data: self.audio_data.clone(),
            sample_rate: self.sample_rate,
            format: AudioFormat::Mp3,
            duration_ms: None,
        })
    }

    fn is_degraded(&self) -> bool {
        true
    }
}
