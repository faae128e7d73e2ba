//! HTTP client for the Gemini `generateContent` API

use reqwest::Client;

use super::types::{GenerateContentRequest, GenerateContentResponse};
use crate::config::Config;
use crate::error::ApiError;

/// Client for the hosted Gemini model
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl GeminiClient {
    pub fn new(base_url: &str, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.api_base, config.api_key.clone())
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, model)
    }

    /// Send one generation request and decode the reply
    pub async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ApiError> {
        let api_key = self.api_key.as_deref().ok_or(ApiError::MissingApiKey)?;
        let url = self.endpoint(&request.model);
        tracing::debug!(%url, "Sending generateContent request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        decode_response(&body)
    }
}

/// Parse a response body. Valid JSON that does not fit the expected shape
/// decodes as an empty response instead of failing the search.
pub fn decode_response(body: &str) -> Result<GenerateContentResponse, ApiError> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    match serde_json::from_value(value) {
        Ok(response) => Ok(response),
        Err(e) => {
            tracing::warn!("Unexpected response shape, treating as empty: {}", e);
            Ok(GenerateContentResponse::default())
        }
    }
}
