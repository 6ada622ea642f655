//! Groq engine (OpenAI-compatible chat completions)
//!
//! Any server speaking the `/chat/completions` protocol works by pointing
//! `GROQ_BASE_URL` at it. Returns the first choice's message object.

use super::prompt::ADVISOR_INSTRUCTIONS;
use super::AdvisoryEngineClient;
use crate::config::EngineConfig;
use crate::error::AdvisorError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{error, info};

pub struct GroqEngine {
    client: Client,
    api_key: String,
    url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl GroqEngine {
    pub fn new(config: &EngineConfig) -> crate::Result<Self> {
        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(8)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            url: format!("{}/chat/completions", config.base_url),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_output_tokens,
        })
    }

    fn build_request<'a>(&'a self, query: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: ADVISOR_INSTRUCTIONS,
                },
                ChatMessage {
                    role: "user",
                    content: query,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

#[async_trait]
impl AdvisoryEngineClient for GroqEngine {
    fn name(&self) -> &'static str {
        "groq"
    }

    async fn run(&self, query: &str) -> crate::Result<Value> {
        info!(model = %self.model, "Calling chat completions API");

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&self.build_request(query))
            .send()
            .await
            .map_err(|e| {
                error!("Chat completions request failed: {}", e);
                AdvisorError::DownstreamEngine(format!("Groq API error: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Chat completions error response ({}): {}", status, error_text);
            return Err(AdvisorError::DownstreamEngine(format!(
                "Groq API error ({}): {}",
                status, error_text
            )));
        }

        let body: Value = response.json().await.map_err(|e| {
            error!("Failed to parse chat completions response: {}", e);
            AdvisorError::DownstreamEngine(format!("Groq parse error: {}", e))
        })?;

        first_choice_message(body)
    }
}

fn first_choice_message(mut body: Value) -> crate::Result<Value> {
    match body.pointer_mut("/choices/0/message") {
        Some(message) => Ok(message.take()),
        None => Err(AdvisorError::DownstreamEngine(
            "No choices in Groq API response".to_string(),
        )),
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}
