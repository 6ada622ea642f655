//! Allocation calculator
//!
//! Deterministic personal-finance rules that turn an [`InvestorProfile`] into
//! an [`AllocationPlan`]. The tables below are fixed; where the planning
//! guidelines give a range, the lower bound is used.
//!
//! Dependency chain for each figure:
//!
//! ```text
//! age + salary        -> monthly capacity
//! capacity + risk     -> equity / debt
//! equity + risk       -> single-stock limit -> SIP -> lump sum
//! age                 -> horizon
//! ```

use crate::models::{AllocationPlan, InvestorProfile, RiskAppetite};

/// Name used when describing these rules downstream
pub const FRAMEWORK_NAME: &str = "Personalized Investment Allocation Framework";

/// SIP as a percentage of the single-stock limit
pub const SIP_PCT_OF_STOCK_LIMIT: u32 = 10;

/// Lump sum is this many months of SIP
pub const LUMP_SUM_MONTHS: u32 = 12;

/// Per-tier percentages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierRule {
    pub debt_pct: u32,
    pub equity_pct: u32,
    /// Max share of the equity allocation placed in one stock
    pub single_stock_pct: u32,
}

pub const fn tier_rule(risk: RiskAppetite) -> TierRule {
    match risk {
        RiskAppetite::Low => TierRule {
            debt_pct: 70,
            equity_pct: 30,
            single_stock_pct: 5,
        },
        RiskAppetite::Moderate => TierRule {
            debt_pct: 50,
            equity_pct: 50,
            single_stock_pct: 10,
        },
        RiskAppetite::HighModerate => TierRule {
            debt_pct: 30,
            equity_pct: 70,
            single_stock_pct: 15,
        },
        RiskAppetite::High => TierRule {
            debt_pct: 10,
            equity_pct: 90,
            single_stock_pct: 20,
        },
    }
}

/// Share of monthly salary available for investing
pub const fn capacity_pct(age: u32) -> u32 {
    match age {
        0..=30 => 25,
        31..=50 => 20,
        _ => 15,
    }
}

/// Recommended holding horizon in years
pub const fn horizon_years(age: u32) -> u32 {
    match age {
        0..=34 => 15,
        35..=49 => 10,
        _ => 5,
    }
}

fn percent_of(amount: f64, pct: u32) -> f64 {
    amount * f64::from(pct) / 100.0
}

pub struct AllocationCalculator;

impl AllocationCalculator {
    /// Compute the plan for a profile. `None` when no profile field is set.
    pub fn compute(profile: &InvestorProfile) -> Option<AllocationPlan> {
        if profile.is_empty() {
            return None;
        }

        let rule = profile.risk_appetite.map(tier_rule);

        let monthly_capacity = match (profile.age, profile.monthly_salary) {
            (Some(age), Some(salary)) => Some(percent_of(salary, capacity_pct(age))),
            _ => None,
        };

        let (equity_allocation, debt_allocation) = match (monthly_capacity, rule) {
            (Some(capacity), Some(rule)) => (
                Some(percent_of(capacity, rule.equity_pct)),
                Some(percent_of(capacity, rule.debt_pct)),
            ),
            _ => (None, None),
        };

        let single_stock_limit = equity_allocation
            .zip(rule)
            .map(|(equity, rule)| percent_of(equity, rule.single_stock_pct));

        let recommended_monthly_sip =
            single_stock_limit.map(|limit| percent_of(limit, SIP_PCT_OF_STOCK_LIMIT));

        let recommended_lump_sum =
            recommended_monthly_sip.map(|sip| sip * f64::from(LUMP_SUM_MONTHS));

        Some(AllocationPlan {
            profile: *profile,
            monthly_capacity,
            equity_allocation,
            debt_allocation,
            single_stock_limit,
            recommended_monthly_sip,
            recommended_lump_sum,
            horizon_years: profile.age.map(horizon_years),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(age: Option<u32>, salary: Option<f64>, risk: Option<RiskAppetite>) -> InvestorProfile {
        InvestorProfile {
            age,
            monthly_salary: salary,
            risk_appetite: risk,
        }
    }

    #[test]
    fn test_worked_example() {
        let plan = AllocationCalculator::compute(&profile(
            Some(30),
            Some(300_000.0),
            Some(RiskAppetite::Moderate),
        ))
        .unwrap();

        assert_eq!(plan.monthly_capacity, Some(75_000.0));
        assert_eq!(plan.equity_allocation, Some(37_500.0));
        assert_eq!(plan.debt_allocation, Some(37_500.0));
        assert_eq!(plan.single_stock_limit, Some(3_750.0));
        assert_eq!(plan.recommended_monthly_sip, Some(375.0));
        assert_eq!(plan.recommended_lump_sum, Some(4_500.0));
        assert_eq!(plan.horizon_years, Some(15));
    }

    #[test]
    fn test_empty_profile_has_no_plan() {
        assert!(AllocationCalculator::compute(&InvestorProfile::default()).is_none());
    }

    #[test]
    fn test_compute_is_idempotent() {
        let p = profile(Some(47), Some(123_456.78), Some(RiskAppetite::HighModerate));
        let first = AllocationCalculator::compute(&p).unwrap();
        let second = AllocationCalculator::compute(&p).unwrap();

        assert_eq!(first, second);
        let bits = |v: Option<f64>| v.map(f64::to_bits);
        assert_eq!(bits(first.recommended_lump_sum), bits(second.recommended_lump_sum));
        assert_eq!(bits(first.monthly_capacity), bits(second.monthly_capacity));
    }

    #[test]
    fn test_risk_tiers() {
        let cases = [
            (RiskAppetite::Low, 30_000.0, 70_000.0, 1_500.0),
            (RiskAppetite::Moderate, 50_000.0, 50_000.0, 5_000.0),
            (RiskAppetite::HighModerate, 70_000.0, 30_000.0, 10_500.0),
            (RiskAppetite::High, 90_000.0, 10_000.0, 18_000.0),
        ];

        for (risk, equity, debt, stock) in cases {
            // age 40 → 20% of 500000 = 100000 capacity
            let plan =
                AllocationCalculator::compute(&profile(Some(40), Some(500_000.0), Some(risk)))
                    .unwrap();
            assert_eq!(plan.monthly_capacity, Some(100_000.0));
            assert_eq!(plan.equity_allocation, Some(equity), "{risk:?}");
            assert_eq!(plan.debt_allocation, Some(debt), "{risk:?}");
            assert_eq!(plan.single_stock_limit, Some(stock), "{risk:?}");
        }
    }

    #[test]
    fn test_tier_splits_sum_to_whole() {
        for risk in RiskAppetite::ALL {
            let rule = tier_rule(risk);
            assert_eq!(rule.debt_pct + rule.equity_pct, 100);
        }
    }

    #[test]
    fn test_age_brackets() {
        assert_eq!(capacity_pct(18), 25);
        assert_eq!(capacity_pct(30), 25);
        assert_eq!(capacity_pct(31), 20);
        assert_eq!(capacity_pct(50), 20);
        assert_eq!(capacity_pct(51), 15);
        assert_eq!(capacity_pct(80), 15);

        assert_eq!(horizon_years(34), 15);
        assert_eq!(horizon_years(35), 10);
        assert_eq!(horizon_years(49), 10);
        assert_eq!(horizon_years(50), 5);
    }

    #[test]
    fn test_missing_risk_omits_dependent_figures() {
        let plan =
            AllocationCalculator::compute(&profile(Some(55), Some(200_000.0), None)).unwrap();

        assert_eq!(plan.monthly_capacity, Some(30_000.0));
        assert_eq!(plan.horizon_years, Some(5));
        assert_eq!(plan.equity_allocation, None);
        assert_eq!(plan.debt_allocation, None);
        assert_eq!(plan.single_stock_limit, None);
        assert_eq!(plan.recommended_monthly_sip, None);
        assert_eq!(plan.recommended_lump_sum, None);
    }

    #[test]
    fn test_missing_salary_keeps_only_horizon() {
        let plan =
            AllocationCalculator::compute(&profile(Some(36), None, Some(RiskAppetite::High)))
                .unwrap();

        assert_eq!(plan.horizon_years, Some(10));
        assert_eq!(plan.monthly_capacity, None);
        assert_eq!(plan.equity_allocation, None);
        assert_eq!(plan.recommended_lump_sum, None);
    }

    #[test]
    fn test_risk_only_profile_has_empty_plan() {
        let plan =
            AllocationCalculator::compute(&profile(None, None, Some(RiskAppetite::Low))).unwrap();

        assert_eq!(plan.profile.risk_appetite, Some(RiskAppetite::Low));
        assert_eq!(plan.monthly_capacity, None);
        assert_eq!(plan.horizon_years, None);
    }

    #[test]
    fn test_zero_salary_is_not_omitted() {
        let plan = AllocationCalculator::compute(&profile(
            Some(25),
            Some(0.0),
            Some(RiskAppetite::Moderate),
        ))
        .unwrap();

        assert_eq!(plan.monthly_capacity, Some(0.0));
        assert_eq!(plan.recommended_monthly_sip, Some(0.0));
    }
}
