//! Primary (AI-backed) structured extractor.

use async_trait::async_trait;
use serde_json::Value;

use vital_core::config::ExtractorConfig;
use vital_core::errors::IngestError;
use vital_core::models::DocumentDomain;

/// Opaque structured-extraction collaborator. Returns a loosely-typed JSON
/// object; the snapshot types decide which fields to accept.
#[async_trait]
pub trait StructuredExtractor: Send + Sync {
    fn name(&self) -> &str;

    async fn extract(&self, domain: DocumentDomain, text: &str) -> Result<Value, IngestError>;
}

/// HTTP implementation posting document text to an extraction service.
pub struct HttpExtractor {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpExtractor {
    /// Build from config. The API key comes from the configured environment
    /// variable; a missing key surfaces as an extractor error at call time,
    /// which the orchestrator degrades to fallback.
    pub fn from_config(config: &ExtractorConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config.endpoint.clone(),
            api_key: std::env::var(&config.api_key_env).ok(),
        }
    }
}

#[async_trait]
impl StructuredExtractor for HttpExtractor {
    fn name(&self) -> &str {
        "http"
    }

    async fn extract(&self, domain: DocumentDomain, text: &str) -> Result<Value, IngestError> {
        if self.endpoint.is_empty() {
            return Err(IngestError::Extractor {
                reason: "no endpoint configured".to_string(),
            });
        }
        let api_key = self.api_key.as_deref().ok_or_else(|| IngestError::Extractor {
            reason: "api key not set".to_string(),
        })?;

        let body = serde_json::json!({
            "domain": domain.to_string(),
            "text": text,
        });
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| IngestError::Extractor {
                reason: e.to_string(),
            })?;

        let response = response.error_for_status().map_err(|e| IngestError::Extractor {
            reason: e.to_string(),
        })?;

        let value: Value = response.json().await.map_err(|e| IngestError::MalformedResponse {
            reason: e.to_string(),
        })?;
        if !value.is_object() {
            return Err(IngestError::MalformedResponse {
                reason: "expected a JSON object".to_string(),
            });
        }
        Ok(value)
    }
}
