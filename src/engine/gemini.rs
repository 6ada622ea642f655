//! Gemini `generateContent` engine
//!
//! Uses a long-lived reqwest::Client for connection pooling.
//! Returns the answer as a content part (`{"text": ...}`).

use super::prompt::ADVISOR_INSTRUCTIONS;
use super::AdvisoryEngineClient;
use crate::config::EngineConfig;
use crate::error::AdvisorError;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{error, info};

/// Reusable Gemini client (connection-pooled)
pub struct GeminiEngine {
    client: Client,
    api_key: String,
    url: String,
    generation_config: GenerationConfig,
    web_search: bool,
}

impl GeminiEngine {
    pub fn new(config: &EngineConfig) -> crate::Result<Self> {
        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(8)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            url: format!("{}/{}:generateContent", config.base_url, config.model),
            generation_config: GenerationConfig {
                temperature: config.temperature,
                top_p: 0.9,
                top_k: 40,
                max_output_tokens: config.max_output_tokens,
            },
            web_search: config.web_search,
        })
    }

    fn build_request(&self, query: &str) -> GeminiRequest {
        GeminiRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: query.to_string(),
                }],
            }],
            generation_config: self.generation_config.clone(),
            system_instruction: SystemInstruction {
                parts: vec![Part {
                    text: ADVISOR_INSTRUCTIONS.to_string(),
                }],
            },
            tools: self
                .web_search
                .then(|| vec![json!({ "google_search": {} })]),
        }
    }
}

#[async_trait]
impl AdvisoryEngineClient for GeminiEngine {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn run(&self, query: &str) -> crate::Result<Value> {
        if self.api_key.is_empty() {
            return Err(AdvisorError::DownstreamEngine(
                "GEMINI_API_KEY not configured".to_string(),
            ));
        }

        let request = self.build_request(query);

        info!("Calling Gemini API");

        let response = self
            .client
            .post(&self.url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Gemini API request failed: {}", e);
                AdvisorError::DownstreamEngine(format!("Gemini API error: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("Gemini API error response ({}): {}", status, error_text);
            return Err(AdvisorError::DownstreamEngine(format!(
                "Gemini API error ({}): {}",
                status, error_text
            )));
        }

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            error!("Failed to parse Gemini response: {}", e);
            AdvisorError::DownstreamEngine(format!("Gemini parse error: {}", e))
        })?;

        let answer = join_candidate_text(&gemini_response).ok_or_else(|| {
            AdvisorError::DownstreamEngine("No response from Gemini API".to_string())
        })?;

        info!(
            finish_reason = ?gemini_response
                .candidates
                .first()
                .and_then(|c| c.finish_reason.as_deref()),
            "Gemini response received"
        );

        Ok(json!({ "text": answer }))
    }
}

/// Grounded replies may split the answer over several parts
fn join_candidate_text(response: &GeminiResponse) -> Option<String> {
    let parts = &response.candidates.first()?.content.as_ref()?.parts;
    if parts.is_empty() {
        return None;
    }

    Some(
        parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect::<Vec<_>>()
            .join(""),
    )
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
    system_instruction: SystemInstruction,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<Value>>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    top_k: u32,
    max_output_tokens: u32,
}

#[derive(Debug, Serialize)]
struct SystemInstruction {
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}
