//! Error taxonomy for the appraisal engine
//!
//! Two failure classes exist: a parameter set that cannot be accepted at the
//! boundary, and a discount rate at which discounting itself is undefined.
//! An IRR with no root or a payback that never breaks even is NOT an error;
//! those outcomes are `None` fields in `FinancialMetrics`.

use thiserror::Error;

/// Errors raised by cash-flow construction and metric calculation
#[derive(Debug, Error, PartialEq)]
pub enum EvaluationError {
    /// Malformed or out-of-domain input: missing field, non-numeric value,
    /// non-positive lifetime or investment. Raised before any computation.
    #[error("invalid parameter `{field}`: {reason}")]
    InvalidParameter { field: &'static str, reason: String },

    /// Discount rate at or below -100%, where the discount factor
    /// 1/(1+r)^t has a singularity. Raised before NPV/IRR/PP/DPP.
    #[error("invalid discount rate {rate_pct}%: discounting is undefined at or below -100%")]
    InvalidDiscountRate { rate_pct: f64 },
}

impl EvaluationError {
    /// Shorthand used by the validation paths
    pub(crate) fn invalid_parameter(field: &'static str, reason: impl Into<String>) -> Self {
        EvaluationError::InvalidParameter {
            field,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_message_names_field() {
        let err = EvaluationError::invalid_parameter("investment", "must be greater than zero");
        assert_eq!(
            err.to_string(),
            "invalid parameter `investment`: must be greater than zero"
        );
    }

    #[test]
    fn test_invalid_discount_rate_message() {
        let err = EvaluationError::InvalidDiscountRate { rate_pct: -100.0 };
        assert!(err.to_string().contains("-100"));
    }
}
