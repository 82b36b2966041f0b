//! Gemini API integration.
//!
//! Implements the DraftModel trait against the generateContent endpoint with
//! a declared JSON response schema.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{AiError, DraftModel};

const DEFAULT_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini structured-output provider.
pub struct GeminiProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiProvider {
    /// Create a new Gemini provider.
    ///
    /// Reads the API key from the GEMINI_API_KEY environment variable.
    pub fn new() -> Result<Self, AiError> {
        let api_key = std::env::var("GEMINI_API_KEY").map_err(|_| AiError::MissingApiKey)?;
        if api_key.trim().is_empty() {
            return Err(AiError::MissingApiKey);
        }
        Ok(Self {
            client: Client::new(),
            api_key,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Create with a specific model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Create with a custom base URL (for proxies or compatible APIs).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    async fn request(&self, prompt: &str, schema: &Value) -> Result<Value, AiError> {
        let request = GenerateContentRequest {
            contents: vec![Content { parts: vec![Part { text: prompt.to_string() }] }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: schema.clone(),
            },
        };

        let response = self
            .client
            .post(format!("{}/models/{}:generateContent", self.base_url, self.model))
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AiError::Service(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::Service(format!("API error ({status}): {body}")));
        }

        let response: GenerateContentResponse =
            response.json().await.map_err(|e| AiError::Parse(e.to_string()))?;

        let text = response
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.as_str())
            .ok_or_else(|| AiError::Parse("empty candidate list".to_string()))?;

        // The model returns the schema-conformant JSON as candidate text
        serde_json::from_str(text).map_err(|e| AiError::Parse(e.to_string()))
    }
}

#[async_trait]
impl DraftModel for GeminiProvider {
    async fn generate_json(&self, prompt: &str, schema: &Value) -> Result<Value, AiError> {
        self.request(prompt, schema).await
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

// Request/Response types

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: Value,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial(gemini_env)]
    fn test_gemini_provider_requires_api_key() {
        let original = std::env::var("GEMINI_API_KEY").ok();
        std::env::remove_var("GEMINI_API_KEY");

        let result = GeminiProvider::new();

        if let Some(val) = original {
            std::env::set_var("GEMINI_API_KEY", val);
        }

        assert!(matches!(result, Err(AiError::MissingApiKey)));
    }

    #[test]
    #[serial(gemini_env)]
    fn test_gemini_provider_with_model() {
        let original = std::env::var("GEMINI_API_KEY").ok();
        std::env::set_var("GEMINI_API_KEY", "test-key");

        let provider = GeminiProvider::new().unwrap().with_model("gemini-2.5-pro");
        assert_eq!(provider.model, "gemini-2.5-pro");
        assert_eq!(provider.name(), "gemini");

        match original {
            Some(val) => std::env::set_var("GEMINI_API_KEY", val),
            None => std::env::remove_var("GEMINI_API_KEY"),
        }
    }

    #[test]
    fn test_candidate_response_decodes() {
        let raw = r#"{"candidates":[{"content":{"parts":[{"text":"[\"a\"]"}]}}]}"#;
        let decoded: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(decoded.candidates[0].content.parts[0].text, "[\"a\"]");
    }
}
