//! Financial Advisor API
//!
//! Turns a free-text financial question plus an optional investor profile
//! into an enriched query for a downstream advisory engine, and normalizes
//! the engine's reply into a uniform answer.
//!
//! - Classifies input as a bare symbol or a full question
//! - Computes allocation figures with fixed planning rules (no LLM arithmetic)
//! - Composes the enriched query
//! - Normalizes heterogeneous engine replies
//!
//! PIPELINE:
//! QUESTION + PROFILE → CLASSIFY → ALLOCATE → COMPOSE → ENGINE → NORMALIZE

pub mod advisor;
pub mod allocation;
pub mod api;
pub mod classifier;
pub mod composer;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod normalizer;
pub mod profile;

pub use error::Result;

// Re-export common types
pub use models::*;
pub use advisor::{Advice, Advisor};
pub use classifier::{ClassifierRules, RequestClassifier};
pub use engine::AdvisoryEngineClient;
