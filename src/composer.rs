//! Query composer
//!
//! Builds the text handed to the advisory engine from a classified intent
//! and an optional allocation plan. Pure string assembly.

use crate::allocation::{
    capacity_pct, tier_rule, FRAMEWORK_NAME, LUMP_SUM_MONTHS, SIP_PCT_OF_STOCK_LIMIT,
};
use crate::models::{AllocationPlan, ClassifiedIntent, EnrichedQuery};

/// Sections requested for a bare-symbol analysis, in order
pub const ANALYSIS_SECTIONS: [&str; 8] = [
    "Financial performance and ratios",
    "Business segments and market position",
    "Trends and opportunities",
    "Management and strategy",
    "Big picture factors",
    "Future projections",
    "Investment recommendation",
    "Personalized investment plan (if investor profile provided)",
];

const PROFILE_REQUESTS: [&str; 6] = [
    "Total monthly investment capacity",
    "Risk-based asset allocation (equity vs debt)",
    "Specific allocation for this stock (diversification limit)",
    "SIP recommendation for this stock",
    "Whether this stock suits the investor's profile",
    "The calculations and the framework used",
];

pub struct QueryComposer;

impl QueryComposer {
    pub fn compose(intent: ClassifiedIntent, plan: Option<AllocationPlan>) -> EnrichedQuery {
        let mut text = match &intent {
            ClassifiedIntent::BareSymbol { text } => full_analysis_request(text),
            ClassifiedIntent::FullQuestion { text } => text.clone(),
        };

        if let Some(plan) = &plan {
            text.push_str(&profile_block(plan));
        }

        EnrichedQuery { text, intent, plan }
    }
}

fn full_analysis_request(symbol: &str) -> String {
    let mut out = format!("Do a complete financial analysis of {} stock.\n\n", symbol);
    out.push_str("Provide a full analysis following the required format including:\n");
    for (i, section) in ANALYSIS_SECTIONS.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, section));
    }
    out.push_str(
        "\nDetermine if this stock is suitable for the investor and provide detailed financial data analysis.",
    );
    out
}

fn profile_block(plan: &AllocationPlan) -> String {
    let profile = &plan.profile;
    let mut out = String::from(
        "\n\nIMPORTANT: Investor profile provided - include a personalized investment allocation:\n",
    );

    if let Some(age) = profile.age {
        out.push_str(&format!("- Age: {} years\n", age));
    }
    if let Some(salary) = profile.monthly_salary {
        out.push_str(&format!("- Monthly Salary: {}\n", format_inr(salary)));
    }
    if let Some(risk) = profile.risk_appetite {
        out.push_str(&format!("- Risk Appetite: {}\n", risk));
    }

    out.push_str("\nBased on this profile, report:\n");
    for (i, request) in PROFILE_REQUESTS.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, request));
    }

    let figures = figure_lines(plan);
    if figures.is_empty() {
        out.push_str(&format!(
            "\nUse the {} to explain how the allocation would be worked out.",
            FRAMEWORK_NAME
        ));
    } else {
        out.push_str(&format!(
            "\nPre-computed figures ({}). Report these exactly as given and do not recalculate them:\n",
            FRAMEWORK_NAME
        ));
        out.push_str(&figures.join("\n"));
    }

    out
}

fn figure_lines(plan: &AllocationPlan) -> Vec<String> {
    let rule = plan.profile.risk_appetite.map(tier_rule);
    let mut lines = Vec::new();

    if let (Some(capacity), Some(age)) = (plan.monthly_capacity, plan.profile.age) {
        lines.push(format!(
            "- Monthly investment capacity: {} ({}% of salary for age {})",
            format_inr(capacity),
            capacity_pct(age),
            age
        ));
    }
    if let (Some(equity), Some(rule)) = (plan.equity_allocation, rule) {
        lines.push(format!(
            "- Equity allocation: {} ({}% of capacity)",
            format_inr(equity),
            rule.equity_pct
        ));
    }
    if let (Some(debt), Some(rule)) = (plan.debt_allocation, rule) {
        lines.push(format!(
            "- Debt allocation: {} ({}% of capacity)",
            format_inr(debt),
            rule.debt_pct
        ));
    }
    if let (Some(limit), Some(rule)) = (plan.single_stock_limit, rule) {
        lines.push(format!(
            "- Single-stock limit: {} per month ({}% of equity allocation)",
            format_inr(limit),
            rule.single_stock_pct
        ));
    }
    if let Some(sip) = plan.recommended_monthly_sip {
        lines.push(format!(
            "- Recommended monthly SIP: {} ({}% of single-stock limit)",
            format_inr(sip),
            SIP_PCT_OF_STOCK_LIMIT
        ));
    }
    if let Some(lump_sum) = plan.recommended_lump_sum {
        lines.push(format!(
            "- Lump sum option: {} ({} months of SIP)",
            format_inr(lump_sum),
            LUMP_SUM_MONTHS
        ));
    }
    if let Some(years) = plan.horizon_years {
        lines.push(format!("- Investment horizon: at least {} years", years));
    }

    lines
}

/// Whole-rupee amount with thousands separators
pub fn format_inr(amount: f64) -> String {
    let whole = format!("{:.0}", amount.abs());
    let sign = if amount < 0.0 && whole != "0" { "-" } else { "" };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}₹{}", sign, grouped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocation::AllocationCalculator;
    use crate::models::{InvestorProfile, RiskAppetite};

    fn worked_example_plan() -> AllocationPlan {
        AllocationCalculator::compute(&InvestorProfile {
            age: Some(30),
            monthly_salary: Some(300_000.0),
            risk_appetite: Some(RiskAppetite::Moderate),
        })
        .unwrap()
    }

    #[test]
    fn test_full_question_passes_through() {
        let intent = ClassifiedIntent::FullQuestion {
            text: "What is the P/E of TCS?".into(),
        };
        let query = QueryComposer::compose(intent.clone(), None);

        assert_eq!(query.text, "What is the P/E of TCS?");
        assert_eq!(query.intent, intent);
        assert!(query.plan.is_none());
    }

    #[test]
    fn test_bare_symbol_expands_to_template() {
        let query = QueryComposer::compose(
            ClassifiedIntent::BareSymbol {
                text: "Reliance".into(),
            },
            None,
        );

        assert!(query
            .text
            .starts_with("Do a complete financial analysis of Reliance stock."));
        for (i, section) in ANALYSIS_SECTIONS.iter().enumerate() {
            assert!(
                query.text.contains(&format!("{}. {}", i + 1, section)),
                "missing section {}",
                section
            );
        }
        assert!(!query.text.contains("Investor profile provided"));
    }

    #[test]
    fn test_profile_block_lists_figures() {
        let query = QueryComposer::compose(
            ClassifiedIntent::BareSymbol {
                text: "Reliance".into(),
            },
            Some(worked_example_plan()),
        );

        let text = &query.text;
        assert!(text.contains("- Age: 30 years"));
        assert!(text.contains("- Monthly Salary: ₹300,000"));
        assert!(text.contains("- Risk Appetite: MODERATE"));
        assert!(text.contains(FRAMEWORK_NAME));
        assert!(text.contains("Monthly investment capacity: ₹75,000 (25% of salary for age 30)"));
        assert!(text.contains("Equity allocation: ₹37,500 (50% of capacity)"));
        assert!(text.contains("Debt allocation: ₹37,500 (50% of capacity)"));
        assert!(text.contains("Single-stock limit: ₹3,750 per month"));
        assert!(text.contains("Recommended monthly SIP: ₹375"));
        assert!(text.contains("Lump sum option: ₹4,500"));
        assert!(text.contains("Investment horizon: at least 15 years"));
    }

    #[test]
    fn test_profile_block_lists_only_supplied_fields() {
        let plan = AllocationCalculator::compute(&InvestorProfile {
            risk_appetite: Some(RiskAppetite::High),
            ..Default::default()
        })
        .unwrap();

        let query = QueryComposer::compose(
            ClassifiedIntent::FullQuestion {
                text: "Should I buy TCS?".into(),
            },
            Some(plan),
        );

        assert!(query.text.starts_with("Should I buy TCS?\n\nIMPORTANT"));
        assert!(query.text.contains("- Risk Appetite: HIGH"));
        assert!(!query.text.contains("- Age:"));
        assert!(!query.text.contains("- Monthly Salary:"));
        assert!(!query.text.contains("Pre-computed figures"));
        assert!(query.text.contains(FRAMEWORK_NAME));
    }

    #[test]
    fn test_format_inr() {
        assert_eq!(format_inr(0.0), "₹0");
        assert_eq!(format_inr(375.0), "₹375");
        assert_eq!(format_inr(4_500.0), "₹4,500");
        assert_eq!(format_inr(300_000.0), "₹300,000");
        assert_eq!(format_inr(1_234_567.891), "₹1,234,568");
        assert_eq!(format_inr(12.4), "₹12");
        assert_eq!(format_inr(12.6), "₹13");
        assert_eq!(format_inr(-0.2), "₹0");
        assert_eq!(format_inr(-4_500.0), "-₹4,500");
    }

    #[test]
    fn test_format_inr_large_amounts_are_not_truncated() {
        assert_eq!(format_inr(1e21), "₹1,000,000,000,000,000,000,000");
    }

    #[test]
    fn test_profile_block_with_huge_salary() {
        let plan = AllocationCalculator::compute(&InvestorProfile {
            age: Some(30),
            monthly_salary: Some(1e21),
            risk_appetite: Some(RiskAppetite::Moderate),
        })
        .unwrap();
        let query = QueryComposer::compose(
            ClassifiedIntent::BareSymbol {
                text: "TCS".into(),
            },
            Some(plan),
        );

        assert!(query
            .text
            .contains("- Monthly Salary: ₹1,000,000,000,000,000,000,000\n"));
        assert!(query.text.contains("- Monthly investment capacity: ₹2"));
        assert!(!query.text.contains("184,467,440,737"));
    }
}
