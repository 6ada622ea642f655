//! Request Classifier
//!
//! Decides whether the raw input is:
//! - a bare symbol: a ticker or company name on its own (e.g. "TCS", "RELIANCE.NS")
//! - a full question: anything phrased as a request (e.g. "What is TCS price")
//!
//! This is a cheap heuristic (token count + keyword scan), not NLP.

use crate::models::ClassifiedIntent;

/// Default keyword list: any substring hit marks the input as a question
pub const QUESTION_KEYWORDS: &[&str] = &[
    // Interrogatives
    "what", "how", "why", "when", "where",
    // Requests
    "should", "tell", "analyze", "give", "explain", "recommend", "advice",
    // Auxiliaries
    "is", "are", "does", "do", "can", "will",
];

pub const DEFAULT_MAX_SYMBOL_WORDS: usize = 3;

/// Rule set used by [`RequestClassifier`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierRules {
    /// Inputs with more tokens than this are always full questions
    pub max_symbol_words: usize,
    /// Lower-case keywords; matched as substrings of the lower-cased input
    pub question_keywords: Vec<String>,
}

impl Default for ClassifierRules {
    fn default() -> Self {
        Self {
            max_symbol_words: DEFAULT_MAX_SYMBOL_WORDS,
            question_keywords: QUESTION_KEYWORDS.iter().map(|kw| kw.to_string()).collect(),
        }
    }
}

/// Request classifier
#[derive(Debug, Clone, Default)]
pub struct RequestClassifier {
    rules: ClassifierRules,
}

impl RequestClassifier {
    pub fn new(rules: ClassifierRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &ClassifierRules {
        &self.rules
    }

    /// Classify raw input as a bare symbol or a full question
    pub fn classify(&self, question: &str) -> ClassifiedIntent {
        let word_count = question.split_whitespace().count();
        let lowered = question.to_lowercase();
        let trimmed = question.trim();

        let has_question_marker = self
            .rules
            .question_keywords
            .iter()
            .any(|kw| lowered.contains(kw.as_str()));

        if word_count <= self.rules.max_symbol_words
            && !has_question_marker
            && !trimmed.starts_with('?')
        {
            ClassifiedIntent::BareSymbol {
                text: trimmed.to_string(),
            }
        } else {
            ClassifiedIntent::FullQuestion {
                text: question.to_string(),
            }
        }
    }
}
