use std::env;
use std::time::Duration;

use base64::Engine;
use log::{debug, warn};
use reqwest::Client;

use crate::error::{Result, StudyAssistantError};
use crate::llm::client::GenerativeClient;
use crate::llm::types::*;
use crate::schema::{ImagePayload, SamplingParams};

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    /// HTTP timeout for a single call. `None` waits as long as the server does.
    pub timeout: Option<Duration>,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: GEMINI_BASE_URL.to_string(),
            timeout: None,
        }
    }

    /// Reads `GEMINI_API_KEY` (required), `GEMINI_MODEL` and `GEMINI_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`Self::from_env`] with variables resolved through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = lookup("GEMINI_API_KEY")
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                StudyAssistantError::Configuration(
                    "API key not found. Set GEMINI_API_KEY in the environment or a .env file."
                        .to_string(),
                )
            })?;

        let mut config = Self::new(api_key);

        if let Some(model) = lookup("GEMINI_MODEL") {
            if !model.trim().is_empty() {
                config.model = model.trim().to_string();
            }
        }

        if let Some(secs) = lookup("GEMINI_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                StudyAssistantError::Configuration(format!(
                    "GEMINI_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                    secs
                ))
            })?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            StudyAssistantError::Configuration(format!("Could not build HTTP client: {}", e))
        })?;

        Ok(Self { client, config })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(GeminiConfig::from_env()?)
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    pub(crate) fn build_payload(
        prompt: &str,
        image: Option<&ImagePayload>,
        params: &SamplingParams,
    ) -> GenerateContentRequest {
        let mut parts = vec![Part::Text {
            text: prompt.to_string(),
        }];

        if let Some(image) = image {
            parts.push(Part::InlineData {
                inline_data: InlineData {
                    mime_type: image.mime_type.clone(),
                    data: base64::engine::general_purpose::STANDARD.encode(&image.data),
                },
            });
        }

        GenerateContentRequest {
            contents: vec![Content::user(parts)],
            generation_config: GenerationConfig {
                temperature: params.temperature,
                top_p: params.top_p,
                top_k: params.top_k,
            },
        }
    }

    pub(crate) fn extract_text(body: GenerateContentResponse) -> Result<String> {
        if let Some(reason) = body.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(StudyAssistantError::GenerationFailed(format!(
                "Prompt blocked by Gemini: {}",
                reason
            )));
        }

        let candidate = body
            .candidates
            .ok_or_else(|| {
                StudyAssistantError::GenerationFailed("No candidates returned".to_string())
            })?
            .into_iter()
            .next()
            .ok_or_else(|| {
                StudyAssistantError::GenerationFailed("Empty candidates list".to_string())
            })?;

        let finish_reason = candidate.finish_reason.unwrap_or_default();
        let text: String = candidate
            .content
            .map(|content| content.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|part| match part {
                Part::Text { text } => Some(text),
                Part::InlineData { .. } => None,
            })
            .collect();

        if text.is_empty() {
            return Err(StudyAssistantError::GenerationFailed(format!(
                "Model returned no text (finish reason: {})",
                if finish_reason.is_empty() {
                    "unknown"
                } else {
                    finish_reason.as_str()
                }
            )));
        }

        Ok(text)
    }
}

impl GenerativeClient for GeminiClient {
    async fn generate(
        &self,
        prompt: &str,
        image: Option<&ImagePayload>,
        params: &SamplingParams,
    ) -> Result<String> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        );
        let payload = Self::build_payload(prompt, image, params);

        debug!(
            "Sending generateContent to {} ({} prompt chars, image: {})",
            self.config.model,
            prompt.len(),
            image.is_some()
        );

        let res = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(&payload)
            .send()
            .await?;
        let status = res.status();

        if !status.is_success() {
            let err_text = res.text().await?;
            warn!("Gemini API returned status {}", status);
            return Err(StudyAssistantError::GenerationFailed(format!(
                "Gemini API Error (status {}): {}",
                status, err_text
            )));
        }

        let body: GenerateContentResponse = res.json().await?;
        Self::extract_text(body)
    }
}
