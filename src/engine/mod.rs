//! Advisory engine trait and implementations
//!
//! An engine takes the enriched query text and returns whatever reply value
//! its backend produces. Shape differences are handled by the normalizer,
//! not here.

use crate::config::{EngineConfig, EngineProvider};
#[cfg(test)]
use crate::error::AdvisorError;
use crate::Result;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
#[cfg(test)]
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

pub mod gemini;
pub mod groq;
pub mod prompt;

pub use gemini::GeminiEngine;
pub use groq::GroqEngine;

/// Trait for the downstream research/answer engine
#[async_trait]
pub trait AdvisoryEngineClient: Send + Sync {
    fn name(&self) -> &'static str;

    /// Single call per request. No retries.
    async fn run(&self, query: &str) -> Result<Value>;
}

/// Prefix marking answers produced without a real engine
pub const ECHO_FALLBACK_LABEL: &str = "[fallback: no advisory engine configured]";

/// Stateless stand-in used when no engine credentials are configured.
/// Replies with the enriched query, labelled as a fallback.
pub struct EchoEngine;

#[async_trait]
impl AdvisoryEngineClient for EchoEngine {
    fn name(&self) -> &'static str {
        "echo"
    }

    async fn run(&self, query: &str) -> Result<Value> {
        debug!(query_len = query.len(), "Echoing enriched query");

        Ok(json!({
            "role": "assistant",
            "content": format!(
                "{} The enriched query was:\n\n{}",
                ECHO_FALLBACK_LABEL, query
            ),
        }))
    }
}

#[cfg(test)]
enum MockReply {
    Echo,
    Fixed(Value),
    Fail(String),
}

/// Test double. Records every query it receives.
#[cfg(test)]
pub struct MockEngine {
    reply: MockReply,
    queries: RwLock<Vec<String>>,
}

#[cfg(test)]
impl MockEngine {
    /// Replies with the query it was given, wrapped as chat content
    pub fn echo() -> Self {
        Self::with_reply(MockReply::Echo)
    }

    pub fn replying(value: Value) -> Self {
        Self::with_reply(MockReply::Fixed(value))
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_reply(MockReply::Fail(message.into()))
    }

    fn with_reply(reply: MockReply) -> Self {
        Self {
            reply,
            queries: RwLock::new(Vec::new()),
        }
    }

    pub async fn queries(&self) -> Vec<String> {
        self.queries.read().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.queries.read().await.len()
    }
}

#[cfg(test)]
#[async_trait]
impl AdvisoryEngineClient for MockEngine {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn run(&self, query: &str) -> Result<Value> {
        self.queries.write().await.push(query.to_string());

        match &self.reply {
            MockReply::Echo => EchoEngine.run(query).await,
            MockReply::Fixed(value) => Ok(value.clone()),
            MockReply::Fail(message) => Err(AdvisorError::DownstreamEngine(message.clone())),
        }
    }
}

/// Build the engine selected by configuration
pub fn build_engine(config: &EngineConfig) -> Result<Arc<dyn AdvisoryEngineClient>> {
    let engine: Arc<dyn AdvisoryEngineClient> = match config.provider {
        EngineProvider::Groq => Arc::new(GroqEngine::new(config)?),
        EngineProvider::Gemini => Arc::new(GeminiEngine::new(config)?),
        EngineProvider::Mock => {
            warn!(
                "No GROQ_API_KEY or GEMINI_API_KEY set; answers will echo the enriched query \
                 and are labelled as a fallback"
            );
            Arc::new(EchoEngine)
        }
    };

    info!(
        engine = engine.name(),
        model = %config.model,
        "Advisory engine initialized"
    );

    Ok(engine)
}
