//! Core data models for the financial advisor
//!
//! Every value here is request-scoped and immutable once built.

use serde::{Deserialize, Serialize};
use std::fmt;

//
// ================= Enums =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum RiskAppetite {
    Low,
    Moderate,
    HighModerate,
    High,
}

impl RiskAppetite {
    pub const ALL: [RiskAppetite; 4] = [
        RiskAppetite::Low,
        RiskAppetite::Moderate,
        RiskAppetite::HighModerate,
        RiskAppetite::High,
    ];

    /// Case-insensitive match against the four known tiers.
    /// Anything else is `None`; no nearest-tier guessing.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|tier| tier.as_str() == normalized)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskAppetite::Low => "low",
            RiskAppetite::Moderate => "moderate",
            RiskAppetite::HighModerate => "high-moderate",
            RiskAppetite::High => "high",
        }
    }
}

//
// ================= Investor Profile =================
//

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct InvestorProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_salary: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_appetite: Option<RiskAppetite>,
}

impl InvestorProfile {
    pub fn is_empty(&self) -> bool {
        self.age.is_none() && self.monthly_salary.is_none() && self.risk_appetite.is_none()
    }
}

//
// ================= Classification =================
//

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifiedIntent {
    BareSymbol { text: String },
    FullQuestion { text: String },
}

impl ClassifiedIntent {
    pub fn text(&self) -> &str {
        match self {
            ClassifiedIntent::BareSymbol { text } | ClassifiedIntent::FullQuestion { text } => {
                text
            }
        }
    }

    pub fn is_bare_symbol(&self) -> bool {
        matches!(self, ClassifiedIntent::BareSymbol { .. })
    }
}

//
// ================= Allocation =================
//

/// Deterministic allocation figures derived from an [`InvestorProfile`].
///
/// A figure is `None` when one of the profile fields it depends on was not
/// supplied. Monetary figures are monthly amounts except `recommended_lump_sum`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AllocationPlan {
    pub profile: InvestorProfile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_capacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equity_allocation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debt_allocation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub single_stock_limit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended_monthly_sip: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended_lump_sum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizon_years: Option<u32>,
}

//
// ================= Composition =================
//

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnrichedQuery {
    pub text: String,
    pub intent: ClassifiedIntent,
    pub plan: Option<AllocationPlan>,
}

//
// ================= Normalized Response =================
//

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdvisoryResponse {
    pub success: bool,
    pub answer_text: Option<String>,
    pub error_message: Option<String>,
}

impl AdvisoryResponse {
    pub fn answered(text: impl Into<String>) -> Self {
        Self {
            success: true,
            answer_text: Some(text.into()),
            error_message: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            answer_text: None,
            error_message: Some(message.into()),
        }
    }
}

impl fmt::Display for RiskAppetite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskAppetite::Low => "LOW",
            RiskAppetite::Moderate => "MODERATE",
            RiskAppetite::HighModerate => "HIGH-MODERATE",
            RiskAppetite::High => "HIGH",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_appetite_parse_is_case_insensitive() {
        assert_eq!(RiskAppetite::parse("Moderate"), Some(RiskAppetite::Moderate));
        assert_eq!(RiskAppetite::parse(" HIGH-moderate "), Some(RiskAppetite::HighModerate));
        assert_eq!(RiskAppetite::parse("low"), Some(RiskAppetite::Low));
    }

    #[test]
    fn test_risk_appetite_rejects_unknown_tiers() {
        for raw in ["medium", "very high", "high moderate", "", "aggressive"] {
            assert_eq!(RiskAppetite::parse(raw), None, "{raw:?} should not parse");
        }
    }

    #[test]
    fn test_intent_serializes_with_kind_tag() {
        let intent = ClassifiedIntent::BareSymbol { text: "TCS".into() };
        let json = serde_json::to_value(&intent).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "bare_symbol", "text": "TCS"}));
    }

    #[test]
    fn test_plan_omits_missing_figures() {
        let plan = AllocationPlan {
            profile: InvestorProfile {
                age: Some(40),
                ..Default::default()
            },
            monthly_capacity: None,
            equity_allocation: None,
            debt_allocation: None,
            single_stock_limit: None,
            recommended_monthly_sip: None,
            recommended_lump_sum: None,
            horizon_years: Some(10),
        };

        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"profile": {"age": 40}, "horizon_years": 10})
        );
    }
}
