//! Gemini tag-generation backend implementation.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use curio_core::defaults::{GEMINI_API_URL, GEN_MODEL, GEN_TIMEOUT_SECS};
use curio_core::{Error, Result, TagGenerator};

use crate::prompt::{tag_prompt, TAG_SYSTEM_PROMPT};

/// Default Gemini endpoint.
pub const DEFAULT_GEMINI_URL: &str = GEMINI_API_URL;

/// Default generation model.
pub const DEFAULT_GEN_MODEL: &str = GEN_MODEL;

/// Gemini `generateContent` backend.
pub struct GeminiBackend {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    timeout_secs: u64,
}

impl GeminiBackend {
    /// Create a backend with explicit configuration.
    pub fn with_config(base_url: String, api_key: String, model: String) -> Self {
        let timeout_secs = std::env::var("CURIO_GEN_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(GEN_TIMEOUT_SECS);

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url,
            api_key,
            model,
            timeout_secs,
        }
    }

    /// Create from environment variables.
    ///
    /// `GEMINI_API_KEY` is required; `GEMINI_BASE` and `GEMINI_MODEL` have
    /// defaults.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| Error::Config("GEMINI_API_KEY is not set".to_string()))?;
        let base_url =
            std::env::var("GEMINI_BASE").unwrap_or_else(|_| DEFAULT_GEMINI_URL.to_string());
        let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_GEN_MODEL.to_string());

        Ok(Self::with_config(base_url, api_key, model))
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[derive(Serialize)]
struct GenerateRequest {
    #[serde(rename = "systemInstruction")]
    system_instruction: Content,
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[async_trait]
impl TagGenerator for GeminiBackend {
    async fn generate_tags(&self, summary: &str, url: &str) -> Result<String> {
        let start = Instant::now();

        let request = GenerateRequest {
            system_instruction: Content {
                parts: vec![Part {
                    text: TAG_SYSTEM_PROMPT.to_string(),
                }],
            },
            contents: vec![Content {
                parts: vec![Part {
                    text: tag_prompt(summary, url),
                }],
            }],
            generation_config: GenerationConfig { temperature: 0.0 },
        };

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .timeout(Duration::from_secs(self.timeout_secs))
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Inference(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Inference(format!(
                "Gemini returned {}: {}",
                status, body
            )));
        }

        let result: GenerateResponse = response
            .json()
            .await
            .map_err(|e| Error::Inference(format!("Failed to parse response: {}", e)))?;

        let content = result
            .candidates
            .and_then(|mut c| if c.is_empty() { None } else { Some(c.remove(0)) })
            .and_then(|c| c.content)
            .and_then(|mut c| {
                if c.parts.is_empty() {
                    None
                } else {
                    Some(c.parts.remove(0).text)
                }
            })
            .ok_or_else(|| Error::Inference("Empty response from model".to_string()))?;

        let elapsed = start.elapsed().as_millis() as u64;
        debug!(
            subsystem = "inference",
            component = "gemini",
            op = "generate_tags",
            model = %self.model,
            response_len = content.len(),
            duration_ms = elapsed,
            "Tag generation complete"
        );
        if elapsed > 30_000 {
            warn!(
                subsystem = "inference",
                duration_ms = elapsed,
                slow = true,
                "Slow tag generation"
            );
        }

        Ok(content)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
