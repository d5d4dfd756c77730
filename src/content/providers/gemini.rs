//! Gemini provider using the `generateContent` endpoint with structured output.
//!
//! One POST per session: the prompt goes in `contents`, the response schema in
//! `generationConfig`. The model answers with the session JSON as plain text
//! inside `candidates[0].content.parts`.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::content::prompt::{GENERATION_PROMPT, response_schema};
use crate::content::{ContentProvider, GenerationError};
use crate::core::config::DEFAULT_GEMINI_BASE_URL;
use crate::core::model::Session;

// ============================================================================
// generateContent API Types
// ============================================================================

#[derive(Serialize, Debug)]
struct Part {
    text: String,
}

#[derive(Serialize, Debug)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: serde_json::Value,
    temperature: f32,
}

/// The request body for `models/{model}:generateContent`
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Deserialize, Debug, Default)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize, Debug)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize, Debug)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

// ============================================================================
// Translation Layer
// ============================================================================

fn build_request(temperature: f32) -> GenerateRequest {
    GenerateRequest {
        contents: vec![Content {
            parts: vec![Part {
                text: GENERATION_PROMPT.to_string(),
            }],
        }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json",
            response_schema: response_schema(),
            temperature,
        },
    }
}

/// Concatenates the text parts of the first candidate.
fn response_text(response: GenerateResponse) -> Option<String> {
    let text: String = response
        .candidates
        .into_iter()
        .next()?
        .content?
        .parts
        .into_iter()
        .filter_map(|p| p.text)
        .collect();
    if text.trim().is_empty() { None } else { Some(text) }
}

/// Parses and validates generated session JSON.
pub fn parse_session(text: &str) -> Result<Session, GenerationError> {
    let session: Session =
        serde_json::from_str(text.trim()).map_err(|e| GenerationError::Parse(e.to_string()))?;
    session.validate().map_err(GenerationError::Schema)?;
    Ok(session)
}

// ============================================================================
// Provider Implementation
// ============================================================================

pub struct GeminiProvider {
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    client: reqwest::Client,
}

impl GeminiProvider {
    pub fn new(api_key: String, base_url: Option<String>, model: String) -> Self {
        Self {
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
            model,
            temperature: 1.0,
            client: reqwest::Client::new(),
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Replaces the HTTP client with one that gives up after `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        match reqwest::Client::builder().timeout(timeout).build() {
            Ok(client) => self.client = client,
            Err(e) => warn!("Could not build HTTP client with timeout: {}", e),
        }
        self
    }
}

#[async_trait]
impl ContentProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate_session(&self) -> Result<Session, GenerationError> {
        if self.api_key.trim().is_empty() {
            return Err(GenerationError::MissingCredentials);
        }

        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        );
        info!(
            "Gemini generateContent request: model={}, temperature={}",
            self.model, self.temperature
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&build_request(self.temperature))
            .send()
            .await
            .map_err(|e| GenerationError::Network(e.to_string()))?;

        debug!("Gemini response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Gemini API error: {} - {}", status, err_body);
            return Err(GenerationError::Api {
                status,
                message: err_body,
            });
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Parse(e.to_string()))?;

        let text = response_text(body).ok_or(GenerationError::EmptyResponse)?;
        debug!("Generated session text: {} bytes", text.len());

        let session = parse_session(&text)?;
        info!(
            "Generated session: {} levels, template {}",
            session.levels.len(),
            session.coloring.template_id
        );
        Ok(session)
    }
}
