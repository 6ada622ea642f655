//! Advisor pipeline
//!
//! QUESTION + PROFILE → CLASSIFY → ALLOCATE → COMPOSE → ENGINE → NORMALIZE
//!
//! Built once at startup and shared across requests. Holds no mutable
//! state, so concurrent requests need no coordination.

use crate::allocation::AllocationCalculator;
use crate::classifier::RequestClassifier;
use crate::composer::QueryComposer;
use crate::engine::AdvisoryEngineClient;
use crate::error::ValidationError;
use crate::models::{AdvisoryResponse, EnrichedQuery, InvestorProfile};
use crate::normalizer::ResponseNormalizer;
use crate::Result;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Result of one answered question
#[derive(Debug, Clone)]
pub struct Advice {
    pub query: EnrichedQuery,
    pub response: AdvisoryResponse,
    pub engine: &'static str,
    pub elapsed_ms: u64,
}

pub struct Advisor {
    engine: Arc<dyn AdvisoryEngineClient>,
    classifier: RequestClassifier,
}

impl Advisor {
    pub fn new(engine: Arc<dyn AdvisoryEngineClient>, classifier: RequestClassifier) -> Self {
        Self { engine, classifier }
    }

    pub fn engine_name(&self) -> &'static str {
        self.engine.name()
    }

    /// Deterministic part of the pipeline. No engine call.
    pub fn prepare(&self, question: &str, profile: &InvestorProfile) -> Result<EnrichedQuery> {
        if question.trim().is_empty() {
            return Err(ValidationError::EmptyQuestion.into());
        }

        let intent = self.classifier.classify(question);
        let plan = AllocationCalculator::compute(profile);

        debug!(
            bare_symbol = intent.is_bare_symbol(),
            has_plan = plan.is_some(),
            "Question classified"
        );

        Ok(QueryComposer::compose(intent, plan))
    }

    /// Prepare the query, call the engine once, and normalize its reply
    pub async fn ask(&self, question: &str, profile: &InvestorProfile) -> Result<Advice> {
        let query = self.prepare(question, profile)?;
        let start = Instant::now();

        let raw = self.engine.run(&query.text).await?;
        let response = ResponseNormalizer::normalize(&raw);
        let elapsed_ms = start.elapsed().as_millis() as u64;

        info!(
            engine = self.engine.name(),
            elapsed_ms,
            extracted = response.success,
            "Advisory engine replied"
        );

        Ok(Advice {
            query,
            response,
            engine: self.engine.name(),
            elapsed_ms,
        })
    }
}
