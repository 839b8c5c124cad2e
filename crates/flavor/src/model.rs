//! Language model client for the advanced extraction tier.
//!
//! The model reads the tasting notes and answers with free-text flavor
//! descriptors plus a sentiment and a one-line summary, as JSON.

use async_trait::async_trait;
use cuppa_core::LanguageModelConfig;
use reqwest::{Client, ClientBuilder};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

/// Errors from the language model tier.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// Transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("model API error (status {status}): {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body
        body: String,
    },

    /// Response did not have the expected shape
    #[error("malformed model response: {0}")]
    Malformed(String),

    /// Model cannot serve requests
    #[error("model unavailable: {0}")]
    Unavailable(String),
}

/// Structured reading of a tasting note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TastingAnalysis {
    /// Flavor descriptors found in the notes
    pub descriptors: Vec<String>,

    /// Overall sentiment: positive, neutral or negative
    #[serde(default)]
    pub sentiment: String,

    /// One-sentence tasting profile summary
    #[serde(default)]
    pub summary: String,
}

/// A language model able to read tasting notes.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Check if the model can serve requests.
    async fn is_available(&self) -> bool;

    /// Analyze tasting notes.
    async fn analyze_tasting(&self, text: &str) -> Result<TastingAnalysis, ModelError>;
}

const SYSTEM_PROMPT: &str = "You are a coffee tasting expert. Analyze tasting notes and extract flavor \
descriptors. Use standard SCA flavor wheel terminology: fruity, floral, sweet, nutty-cocoa, spices, \
roasted, green-vegetative, sour-fermented, other. Answer only with JSON of the form \
{\"descriptors\": [string], \"sentiment\": \"positive\" | \"neutral\" | \"negative\", \"summary\": string}.";

/// Ollama client for tasting analysis.
#[derive(Clone)]
pub struct OllamaTastingClient {
    /// HTTP client
    client: Client,

    /// Ollama server URL
    url: String,

    /// Model name
    model: String,
}

impl OllamaTastingClient {
    /// Create a new client.
    pub fn new(url: String, model: String, timeout: std::time::Duration) -> Self {
        Self {
            client: ClientBuilder::new()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            url,
            model,
        }
    }

    /// Create a client from configuration.
    pub fn from_config(config: &LanguageModelConfig) -> Self {
        Self::new(config.ollama_url.clone(), config.model.clone(), config.timeout())
    }

    /// Check Ollama health.
    pub async fn health_check(&self) -> Result<bool, ModelError> {
        let response = self
            .client
            .get(format!("{}/api/version", self.url))
            .send()
            .await?;

        Ok(response.status().is_success())
    }
}

#[async_trait]
impl LanguageModel for OllamaTastingClient {
    async fn is_available(&self) -> bool {
        self.health_check().await.unwrap_or(false)
    }

    async fn analyze_tasting(&self, text: &str) -> Result<TastingAnalysis, ModelError> {
        let payload = json!({
            "model": self.model,
            "system": SYSTEM_PROMPT,
            "prompt": build_prompt(text),
            "format": "json",
            "stream": false,
        });

        debug!("Requesting tasting analysis ({} chars)", text.len());

        let response = self
            .client
            .post(format!("{}/api/generate", self.url))
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::Status { status, body });
        }

        let body = response.text().await?;
        parse_generate_response(&body)
    }
}

fn build_prompt(text: &str) -> String {
    format!("Analyze these coffee tasting notes: {}", text)
}

/// Parse an Ollama `/api/generate` body whose `response` field holds the
/// analysis JSON.
fn parse_generate_response(body: &str) -> Result<TastingAnalysis, ModelError> {
    #[derive(Deserialize)]
    struct Response {
        response: String,
    }

    let outer: Response =
        serde_json::from_str(body).map_err(|e| ModelError::Malformed(e.to_string()))?;
    serde_json::from_str(&outer.response).map_err(|e| ModelError::Malformed(e.to_string()))
}
