use anyhow::{anyhow, Result};
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace, warn};

use crate::ai::config::{GeminiConfig, MAX_OUTPUT_TOKENS, TEMPERATURE};

pub const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Raw image bytes plus the mime type reported by the uploader. Bytes are
/// forwarded to the model unmodified.
#[derive(Clone)]
pub struct ImagePayload {
    pub mime_type: String,
    pub data: Vec<u8>,
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    max_output_tokens: u32,
}

#[derive(Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

// Variant order matters: response parts carry "text" and must try first.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Content,
}

/// Client for Gemini's `generateContent` endpoint. Generation settings are
/// fixed at construction and apply to every call.
pub struct GeminiClient {
    config: GeminiConfig,
    client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        let base = self.config.api_url.as_deref().unwrap_or(GEMINI_API_URL);
        format!("{}/models/{}:generateContent", base, self.config.model)
    }

    #[instrument(level = "trace", skip(self, prompt))]
    pub async fn generate_text(&self, prompt: &str) -> Result<String> {
        self.generate(vec![Part::Text {
            text: prompt.to_string(),
        }])
        .await
    }

    #[instrument(level = "trace", skip(self, prompt, image))]
    pub async fn generate_multimodal(&self, prompt: &str, image: &ImagePayload) -> Result<String> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(&image.data);
        let parts = vec![
            Part::Text {
                text: prompt.to_string(),
            },
            Part::InlineData {
                inline_data: InlineData {
                    mime_type: image.mime_type.clone(),
                    data: encoded,
                },
            },
        ];
        self.generate(parts).await
    }

    async fn generate(&self, parts: Vec<Part>) -> Result<String> {
        let url = self.endpoint();
        let body = GenerateContentRequest {
            contents: vec![Content { parts }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        };

        debug!(url, model = %self.config.model, "sending generateContent request");

        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let err_text = resp.text().await.unwrap_or_default();
            warn!(%status, "Gemini API error");
            return Err(anyhow!("Gemini API error {status}: {err_text}"));
        }

        let raw = resp.text().await?;
        let snippet: String = raw.chars().take(200).collect();
        debug!(snippet = %snippet, "generateContent response body");
        trace!(raw = %raw, "generateContent response");
        extract_generated_text(&raw)
    }
}

fn extract_generated_text(raw: &str) -> Result<String> {
    let response: GenerateContentResponse = serde_json::from_str(raw)?;
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("missing candidate"))?;

    let text: String = candidate
        .content
        .parts
        .into_iter()
        .filter_map(|part| match part {
            Part::Text { text } => Some(text),
            Part::InlineData { .. } => None,
        })
        .collect();

    if text.is_empty() {
        return Err(anyhow!("candidate contained no text"));
    }
    Ok(text.trim().to_string())
}
