//! Synthesis Engine - 合成音频 / 定制音色
//!
//! 合成流程逐级把关，前一步失败后一步绝不执行:
//! 1. 文本非空且不超过 MAX_SYNTHESIS_CHARS
//! 2. voice_id 能在音色目录中找到
//! 3. 参数通过 ParameterValidator
//! 4. 调用外部 TTS，失败即 Synthesis 错误（不在内部重试）

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::application::commands::{CustomizeVoice, SynthesizeSpeech};
use crate::application::error::PipelineError;
use crate::application::ports::{
    AudioLocation, AudioStoragePort, SpeechRequest, SpeechSynthesisPort, VoiceCatalogPort,
};
use crate::domain::voice::{estimate_duration, AudioArtifact, ParameterValidator, VoiceId};

/// 单次合成允许的最大文本长度（字符）
pub const MAX_SYNTHESIS_CHARS: usize = 10_000;

/// 合成引擎
pub struct SynthesisEngine {
    catalog: Arc<dyn VoiceCatalogPort>,
    speech: Arc<dyn SpeechSynthesisPort>,
    storage: Arc<dyn AudioStoragePort>,
    timeout: Duration,
}

impl SynthesisEngine {
    pub fn new(
        catalog: Arc<dyn VoiceCatalogPort>,
        speech: Arc<dyn SpeechSynthesisPort>,
        storage: Arc<dyn AudioStoragePort>,
    ) -> Self {
        Self {
            catalog,
            speech,
            storage,
            timeout: Duration::from_secs(120),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn catalog(&self) -> &Arc<dyn VoiceCatalogPort> {
        &self.catalog
    }

    pub fn is_degraded(&self) -> bool {
        self.speech.is_degraded()
    }

    pub async fn synthesize(&self, command: SynthesizeSpeech) -> Result<AudioArtifact, PipelineError> {
        let text_length = command.text.chars().count();
        if command.text.is_empty() {
            return Err(PipelineError::invalid_input("text must be a non-empty string"));
        }
        if text_length > MAX_SYNTHESIS_CHARS {
            return Err(PipelineError::invalid_input(format!(
                "text is too long ({} chars), maximum is {} characters",
                text_length, MAX_SYNTHESIS_CHARS
            )));
        }

        let voice_id = VoiceId::new(command.voice_id).map_err(PipelineError::invalid_input)?;
        let voice = self.catalog.resolve(&voice_id)?;

        let parameters = ParameterValidator::normalize(&command.parameters)?;

        tracing::info!(
            voice_id = %voice_id,
            text_len = text_length,
            pitch = parameters.pitch,
            speed = parameters.speed,
            emotion = %parameters.emotion,
            "Generating audio"
        );

        let request = SpeechRequest {
            text: command.text.clone(),
            voice_id: voice.voice_id().clone(),
            parameters: parameters.clone(),
        };

        let response = match tokio::time::timeout(self.timeout, self.speech.synthesize(request)).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                tracing::error!(voice_id = %voice_id, error = %e, "Speech synthesis failed");
                return Err(e.into());
            }
            Err(_) => {
                tracing::error!(voice_id = %voice_id, timeout = ?self.timeout, "Speech synthesis timed out");
                return Err(PipelineError::synthesis(format!(
                    "speech provider did not respond within {:?}",
                    self.timeout
                )));
            }
        };

        let artifact_id = Uuid::new_v4().to_string();
        let location = AudioLocation::new(
            voice_id.clone(),
            artifact_id.clone(),
            &command.text,
            response.format,
        );
        let file_path = self.storage.save_audio(&location, &response.audio_data).await?;

        let duration_seconds = estimate_duration(&command.text, parameters.speed);

        tracing::info!(
            artifact_id = %artifact_id,
            path = %file_path.display(),
            duration_seconds,
            reported_duration_ms = ?response.duration_ms,
            "Generated audio file"
        );

        Ok(AudioArtifact {
            artifact_id,
            file_path,
            duration_seconds,
            format: response.format,
            sample_rate: response.sample_rate,
            text_length,
            voice_id,
            parameters,
            created_at: Utc::now(),
        })
    }

    /// 基于已有音色派生自定义音色
    pub fn customize_voice(&self, command: CustomizeVoice) -> Result<VoiceId, PipelineError> {
        if command.customizations.is_empty() {
            return Err(PipelineError::invalid_input(
                "customizations must be a non-empty mapping",
            ));
        }
        let base_voice_id = VoiceId::new(command.voice_id).map_err(PipelineError::invalid_input)?;

        let voice_id = self.catalog.derive(&base_voice_id, command.customizations)?;
        Ok(voice_id)
    }
}
