//! HTTP Speech Client - 调用外部 TTS HTTP 服务
//!
//! 实现 SpeechSynthesisPort trait，通过 HTTP 调用外部 TTS 服务
//!
//! 外部 TTS API:
//! POST {base_url}/api/tts/synthesize
//! Request: {"text": "...", "voice_id": "voice_1", "pitch": 0.0, "speed": 1.0,
//!           "emotion": "neutral", "emphasis": []}  (JSON)
//! Response: 音频二进制，元数据在 headers (X-TTS-Sample-Rate, X-TTS-Format, X-TTS-Duration-Ms)

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use crate::application::ports::{SpeechError, SpeechRequest, SpeechResponse, SpeechSynthesisPort};
use crate::domain::voice::AudioFormat;
use crate::domain::Emotion;

/// TTS 合成请求体 (JSON)
#[derive(Debug, Serialize)]
struct SynthesizeHttpRequest<'a> {
    text: &'a str,
    voice_id: &'a str,
    pitch: f64,
    speed: f64,
    emotion: Emotion,
    emphasis: &'a [String],
}

/// HTTP Speech 客户端配置
#[derive(Debug, Clone)]
pub struct HttpSpeechClientConfig {
    /// TTS 服务基础 URL
    pub base_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
    /// 服务未报告采样率时使用的默认值
    pub sample_rate: u32,
}

impl Default for HttpSpeechClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 120,
            sample_rate: 24000,
        }
    }
}

impl HttpSpeechClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }
}

/// HTTP Speech 客户端
pub struct HttpSpeechClient {
    client: Client,
    config: HttpSpeechClientConfig,
}

impl HttpSpeechClient {
    pub fn new(config: HttpSpeechClientConfig) -> Result<Self, SpeechError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SpeechError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn synthesize_url(&self) -> String {
        format!("{}/api/tts/synthesize", self.config.base_url.trim_end_matches('/'))
    }

    fn health_url(&self) -> String {
        format!("{}/health", self.config.base_url.trim_end_matches('/'))
    }
}

fn header_value<T: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}

fn response_format(headers: &HeaderMap) -> Result<AudioFormat, SpeechError> {
    match headers.get("X-TTS-Format").and_then(|v| v.to_str().ok()) {
        None => Ok(AudioFormat::default()),
        Some(raw) => AudioFormat::from_extension(raw.trim())
            .ok_or_else(|| SpeechError::InvalidResponse(format!("unsupported audio format: {}", raw))),
    }
}

#[async_trait]
impl SpeechSynthesisPort for HttpSpeechClient {
    async fn synthesize(&self, request: SpeechRequest) -> Result<SpeechResponse, SpeechError> {
        let body = SynthesizeHttpRequest {
            text: &request.text,
            voice_id: request.voice_id.as_str(),
            pitch: request.parameters.pitch,
            speed: request.parameters.speed,
            emotion: request.parameters.emotion,
            emphasis: &request.parameters.emphasis,
        };

        tracing::debug!(
            url = %self.synthesize_url(),
            text_len = request.text.len(),
            voice_id = %request.voice_id,
            "Sending TTS synthesize request"
        );

        let response = self
            .client
            .post(self.synthesize_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SpeechError::Timeout
                } else if e.is_connect() {
                    SpeechError::NetworkError(format!("Cannot connect to TTS service: {}", e))
                } else {
                    SpeechError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SpeechError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let headers = response.headers();
        let format = response_format(headers)?;
        let sample_rate = header_value(headers, "X-TTS-Sample-Rate").unwrap_or(self.config.sample_rate);
        let duration_ms = header_value(headers, "X-TTS-Duration-Ms");

        let audio_data = response
            .bytes()
            .await
            .map_err(|e| SpeechError::InvalidResponse(format!("Failed to read audio: {}", e)))?
            .to_vec();

        tracing::info!(
            voice_id = %request.voice_id,
            format = format.extension(),
            sample_rate,
            duration_ms = ?duration_ms,
            audio_size = audio_data.len(),
            "TTS synthesis completed"
        );

        Ok(SpeechResponse {
            audio_data,
            sample_rate,
            format,
            duration_ms,
        })
    }

    async fn health_check(&self) -> bool {
        match self
            .client
            .get(self.health_url())
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}
