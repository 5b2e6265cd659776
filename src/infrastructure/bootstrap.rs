//! Bootstrap - 按配置装配各端口实现
//!
//! 配置了 URL 的服务使用 HTTP 适配器，否则退回本地降级实现

use std::sync::Arc;
use thiserror::Error;

use crate::application::analysis::{
    AnalyzerOptions, AttributorOptions, CharacterAnalyzer, DialogueAttributor, VoiceRecommender,
};
use crate::application::commands::handlers::SynthesisEngine;
use crate::application::pipeline::PipelineOrchestrator;
use crate::application::ports::{
    AnalysisError, SpeechError, SpeechSynthesisPort, TextAnalysisPort, VoiceCatalogPort,
};
use crate::application::queries::handlers::{
    GetVoiceHandler, ListVoicesHandler, SuggestVoicesHandler,
};
use crate::config::{AnalysisConfig, AppConfig, SynthesisConfig};
use crate::infrastructure::adapters::{
    FileAudioStorage, HttpAnalysisClient, HttpAnalysisClientConfig, HttpSpeechClient,
    HttpSpeechClientConfig, LocalAnalysisProvider, LocalSpeechSynthesizer,
};
use crate::infrastructure::memory::InMemoryVoiceCatalog;

/// 装配错误
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("Failed to create analysis client: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("Failed to create speech client: {0}")]
    Speech(#[from] SpeechError),

    #[error("Failed to read placeholder audio: {0}")]
    Placeholder(#[from] std::io::Error),
}

/// 装配好的服务集合
pub struct Services {
    pub analysis: Arc<dyn TextAnalysisPort>,
    pub speech: Arc<dyn SpeechSynthesisPort>,
    pub catalog: Arc<dyn VoiceCatalogPort>,
    pub engine: Arc<SynthesisEngine>,
    pub orchestrator: PipelineOrchestrator,
    pub list_voices: ListVoicesHandler,
    pub get_voice: GetVoiceHandler,
    pub suggest_voices: SuggestVoicesHandler,
}

impl Services {
    pub fn from_config(config: &AppConfig) -> Result<Self, BootstrapError> {
        let analysis = analysis_provider(&config.analysis)?;
        let speech = speech_provider(&config.synthesis)?;

        let catalog: Arc<dyn VoiceCatalogPort> = Arc::new(InMemoryVoiceCatalog::new());
        let storage = Arc::new(FileAudioStorage::new(&config.synthesis.output_dir));

        let engine = Arc::new(
            SynthesisEngine::new(catalog.clone(), speech.clone(), storage)
                .with_timeout(config.synthesis.timeout()),
        );

        let analyzer = CharacterAnalyzer::new(
            analysis.clone(),
            AnalyzerOptions {
                language: config.analysis.language.clone(),
                max_characters: config.analysis.max_characters,
                timeout: config.analysis.timeout(),
            },
        );
        let attributor = DialogueAttributor::new(
            analysis.clone(),
            AttributorOptions {
                language: config.analysis.language.clone(),
                timeout: config.analysis.timeout(),
            },
        );
        let orchestrator =
            PipelineOrchestrator::new(analyzer, attributor, VoiceRecommender::new(), engine.clone());

        tracing::info!(
            voices = catalog.len(),
            analysis_degraded = config.analysis.url.is_none(),
            synthesis_degraded = config.synthesis.url.is_none(),
            "Services initialized"
        );

        Ok(Self {
            list_voices: ListVoicesHandler::new(catalog.clone()),
            get_voice: GetVoiceHandler::new(catalog.clone()),
            suggest_voices: SuggestVoicesHandler::new(VoiceRecommender::new()),
            analysis,
            speech,
            catalog,
            engine,
            orchestrator,
        })
    }

    /// 检查外部服务可达性并记录日志，返回 (analysis, speech)
    pub async fn check_providers(&self) -> (bool, bool) {
        let (analysis_ok, speech_ok) =
            tokio::join!(self.analysis.health_check(), self.speech.health_check());

        if analysis_ok {
            tracing::info!(degraded = self.analysis.is_degraded(), "Analysis provider reachable");
        } else {
            tracing::warn!("Analysis provider health check failed");
        }
        if speech_ok {
            tracing::info!(degraded = self.speech.is_degraded(), "Speech provider reachable");
        } else {
            tracing::warn!("Speech provider health check failed");
        }

        (analysis_ok, speech_ok)
    }
}

fn analysis_provider(config: &AnalysisConfig) -> Result<Arc<dyn TextAnalysisPort>, BootstrapError> {
    match &config.url {
        Some(url) => {
            let mut client_config = HttpAnalysisClientConfig::new(url.clone())
                .with_timeout(config.timeout_secs);
            if let Some(api_key) = &config.api_key {
                client_config = client_config.with_api_key(api_key.clone());
            }
            Ok(Arc::new(HttpAnalysisClient::new(client_config)?))
        }
        None => {
            tracing::warn!("No analysis service configured, using local heuristics");
            Ok(Arc::new(LocalAnalysisProvider::new()))
        }
    }
}

fn speech_provider(config: &SynthesisConfig) -> Result<Arc<dyn SpeechSynthesisPort>, BootstrapError> {
    match (&config.url, &config.placeholder_audio) {
        (Some(url), _) => {
            let client_config = HttpSpeechClientConfig::new(url.clone())
                .with_timeout(config.timeout_secs)
                .with_sample_rate(config.sample_rate);
            Ok(Arc::new(HttpSpeechClient::new(client_config)?))
        }
        (None, Some(placeholder)) => {
            tracing::warn!("No TTS service configured, using placeholder audio");
            Ok(Arc::new(LocalSpeechSynthesizer::from_file(
                placeholder,
                config.sample_rate,
            )?))
        }
        (None, None) => {
            tracing::warn!("No TTS service configured, synthesized files will be empty");
            Ok(Arc::new(LocalSpeechSynthesizer::empty(config.sample_rate)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::commands::SynthesizeSpeech;
    use crate::application::queries::ListVoices;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_default_config_selects_local_providers() {
        let dir = tempdir().unwrap();
        let mut config = AppConfig::default();
        config.synthesis.output_dir = dir.path().to_path_buf();

        let services = Services::from_config(&config).unwrap();
        assert!(services.engine.is_degraded());
        assert_eq!(services.list_voices.handle(ListVoices).len(), 4);

        let artifact = services
            .engine
            .synthesize(SynthesizeSpeech::new("Hello world", "voice_1"))
            .await
            .unwrap();
        assert!(artifact.file_path.starts_with(dir.path()));
    }

    #[tokio::test]
    async fn test_local_providers_report_healthy() {
        let services = Services::from_config(&AppConfig::default()).unwrap();
        assert!(services.analysis.is_degraded());
        assert_eq!(services.check_providers().await, (true, true));
    }

    #[tokio::test]
    async fn test_unreachable_providers_report_unhealthy() {
        let mut config = AppConfig::default();
        config.analysis.url = Some("http://127.0.0.1:9".to_string());
        config.synthesis.url = Some("http://127.0.0.1:9".to_string());

        let services = Services::from_config(&config).unwrap();
        assert!(!services.analysis.is_degraded());
        assert_eq!(services.check_providers().await, (false, false));
    }

    #[test]
    fn test_configured_urls_select_http_providers() {
        let mut config = AppConfig::default();
        config.analysis.url = Some("http://analysis.local".to_string());
        config.synthesis.url = Some("http://tts.local".to_string());

        let services = Services::from_config(&config).unwrap();
        assert!(!services.engine.is_degraded());
    }

    #[test]
    fn test_missing_placeholder_file() {
        let mut config = AppConfig::default();
        config.synthesis.placeholder_audio = Some("/nonexistent/placeholder.mp3".into());

        let result = Services::from_config(&config);
        assert!(matches!(result, Err(BootstrapError::Placeholder(_))));
    }
}
