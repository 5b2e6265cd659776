//! HTTP Analysis Client - 调用外部文本理解服务
//!
//! 外部分析 API:
//! POST {base_url}/api/analysis/characters   Request: CharacterAnalysisRequest (JSON)
//! POST {base_url}/api/analysis/dialogue     Request: DialogueAnalysisRequest (JSON)
//! 配置了 api_key 时以 Bearer token 发送

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use crate::application::ports::{
    AnalysisError, CharacterAnalysisRequest, CharacterAnalysisResponse, DialogueAnalysisRequest,
    DialogueAnalysisResponse, TextAnalysisPort,
};

/// HTTP 分析客户端配置
#[derive(Debug, Clone)]
pub struct HttpAnalysisClientConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl HttpAnalysisClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            timeout_secs: 60,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// HTTP 分析客户端
pub struct HttpAnalysisClient {
    client: Client,
    config: HttpAnalysisClientConfig,
}

impl HttpAnalysisClient {
    pub fn new(config: HttpAnalysisClientConfig) -> Result<Self, AnalysisError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AnalysisError::Unavailable(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, AnalysisError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = self.endpoint(path);
        tracing::debug!(url = %url, "Sending analysis request");

        let mut request = self.client.post(&url).json(body);
        if let Some(api_key) = &self.config.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                AnalysisError::Timeout
            } else if e.is_connect() {
                AnalysisError::Unavailable(format!("Cannot connect to analysis service: {}", e))
            } else {
                AnalysisError::Unavailable(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(status_error(status, error_text));
        }

        response
            .json::<R>()
            .await
            .map_err(|e| AnalysisError::InvalidResponse(format!("Failed to decode response: {}", e)))
    }
}

/// 5xx 与 429 视为服务暂不可用，其余非成功状态视为响应无效
fn status_error(status: StatusCode, body: String) -> AnalysisError {
    let message = format!("HTTP {}: {}", status, body);
    if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
        AnalysisError::Unavailable(message)
    } else {
        AnalysisError::InvalidResponse(message)
    }
}

#[async_trait]
impl TextAnalysisPort for HttpAnalysisClient {
    async fn analyze_characters(
        &self,
        request: CharacterAnalysisRequest,
    ) -> Result<CharacterAnalysisResponse, AnalysisError> {
        let response: CharacterAnalysisResponse =
            self.post("/api/analysis/characters", &request).await?;
        tracing::info!(
            characters = response.characters.len(),
            "Character analysis completed"
        );
        Ok(response)
    }

    async fn analyze_dialogue(
        &self,
        request: DialogueAnalysisRequest,
    ) -> Result<DialogueAnalysisResponse, AnalysisError> {
        let response: DialogueAnalysisResponse =
            self.post("/api/analysis/dialogue", &request).await?;
        tracing::info!(spans = response.dialogues.len(), "Dialogue analysis completed");
        Ok(response)
    }

    async fn health_check(&self) -> bool {
        match self
            .client
            .get(self.endpoint("/health"))
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = HttpAnalysisClientConfig::new("http://analysis.local/")
            .with_api_key("secret")
            .with_timeout(30);
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.timeout_secs, 30);

        let client = HttpAnalysisClient::new(config).unwrap();
        assert_eq!(
            client.endpoint("/api/analysis/characters"),
            "http://analysis.local/api/analysis/characters"
        );
    }

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            status_error(StatusCode::SERVICE_UNAVAILABLE, String::new()),
            AnalysisError::Unavailable(_)
        ));
        assert!(matches!(
            status_error(StatusCode::TOO_MANY_REQUESTS, String::new()),
            AnalysisError::Unavailable(_)
        ));
        assert!(matches!(
            status_error(StatusCode::BAD_REQUEST, "bad".into()),
            AnalysisError::InvalidResponse(_)
        ));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_unavailable() {
        let client =
            HttpAnalysisClient::new(HttpAnalysisClientConfig::new("http://127.0.0.1:9").with_timeout(2))
                .unwrap();
        let result = client
            .analyze_characters(CharacterAnalysisRequest {
                text: "Hello".into(),
                max_characters: 50,
                language: "en".into(),
                include_description: true,
            })
            .await;
        assert!(matches!(
            result,
            Err(AnalysisError::Unavailable(_)) | Err(AnalysisError::Timeout)
        ));
    }
}
