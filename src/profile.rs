//! Investor profile validation
//!
//! Turns already-typed transport values into a canonical [`InvestorProfile`].

use crate::error::ValidationError;
use crate::models::{InvestorProfile, RiskAppetite};
use tracing::debug;

pub struct ProfileValidator;

impl ProfileValidator {
    /// Validate raw profile fields.
    ///
    /// Negative numbers reject the whole request. An unrecognized risk
    /// literal is dropped, not an error.
    pub fn validate(
        age: Option<i64>,
        monthly_salary: Option<f64>,
        risk_appetite: Option<&str>,
    ) -> Result<InvestorProfile, ValidationError> {
        let age = match age {
            None => None,
            Some(a) if a < 0 => return Err(ValidationError::NegativeAge(a)),
            Some(a) => Some(u32::try_from(a).map_err(|_| ValidationError::AgeOutOfRange(a))?),
        };

        let monthly_salary = match monthly_salary {
            None => None,
            Some(s) if !s.is_finite() => return Err(ValidationError::NonFiniteSalary),
            Some(s) if s < 0.0 => return Err(ValidationError::NegativeSalary(s)),
            Some(s) => Some(s),
        };

        let risk_appetite = risk_appetite
            .filter(|raw| !raw.trim().is_empty())
            .and_then(|raw| {
                let parsed = RiskAppetite::parse(raw);
                if parsed.is_none() {
                    debug!(risk_appetite = raw, "Ignoring unrecognized risk appetite");
                }
                parsed
            });

        Ok(InvestorProfile {
            age,
            monthly_salary,
            risk_appetite,
        })
    }
}
