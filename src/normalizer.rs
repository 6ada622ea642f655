//! Response normalizer
//!
//! Engines reply in different shapes. Each known shape is one variant of
//! [`ResponseShape`]; anything else falls back to its JSON string form.

use crate::error::ResponseExtractionError;
use crate::models::AdvisoryResponse;
use serde_json::Value;
use tracing::{debug, warn};

/// Known reply shapes, checked in declaration order
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResponseShape<'a> {
    /// Object with a string `content` field (chat-completion message)
    Content(&'a str),
    /// Object with a string `text` field (content part)
    Text(&'a str),
    /// Bare string
    Plain(&'a str),
    /// Anything else that is not null
    Opaque(&'a Value),
    /// Nothing to extract
    Empty,
}

impl<'a> ResponseShape<'a> {
    pub fn detect(raw: &'a Value) -> Self {
        if let Some(content) = raw.get("content").and_then(Value::as_str) {
            return ResponseShape::Content(content);
        }
        if let Some(text) = raw.get("text").and_then(Value::as_str) {
            return ResponseShape::Text(text);
        }
        match raw {
            Value::String(s) => ResponseShape::Plain(s),
            Value::Null => ResponseShape::Empty,
            other => ResponseShape::Opaque(other),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ResponseShape::Content(_) => "content",
            ResponseShape::Text(_) => "text",
            ResponseShape::Plain(_) => "plain",
            ResponseShape::Opaque(_) => "opaque",
            ResponseShape::Empty => "empty",
        }
    }

    fn extract(self) -> std::result::Result<String, ResponseExtractionError> {
        match self {
            ResponseShape::Content(s) | ResponseShape::Text(s) | ResponseShape::Plain(s) => {
                Ok(s.to_string())
            }
            ResponseShape::Opaque(value) => Ok(value.to_string()),
            ResponseShape::Empty => Err(ResponseExtractionError(
                "engine returned an empty response".to_string(),
            )),
        }
    }
}

pub struct ResponseNormalizer;

impl ResponseNormalizer {
    /// Extract the answer text. Never fails; extraction problems are
    /// reported through `success` / `error_message`.
    pub fn normalize(raw: &Value) -> AdvisoryResponse {
        let shape = ResponseShape::detect(raw);
        debug!(shape = shape.name(), "Normalizing engine response");

        match shape.extract() {
            Ok(answer) => AdvisoryResponse::answered(answer),
            Err(e) => {
                warn!("Response extraction failed: {}", e);
                AdvisoryResponse::failed(e.to_string())
            }
        }
    }
}
