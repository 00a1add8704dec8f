//! One-call project evaluation
//!
//! Ties the cash-flow builder and the metrics together so callers get a
//! complete appraisal from a single parameter set.

use serde::{Deserialize, Serialize};

use super::cashflow::{build_cashflow, CashflowTable};
use super::metrics::{compute_metrics, FinancialMetrics};
use crate::error::EvaluationError;
use crate::project::ProjectParameters;

/// Complete appraisal of one project: inputs, projection and metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectEvaluation {
    /// Parameters the evaluation was run with
    pub parameters: ProjectParameters,

    /// Year-by-year cash-flow projection
    pub cashflows: CashflowTable,

    /// Metrics computed at the project's own WACC
    pub metrics: FinancialMetrics,
}

/// Build the cash-flow table and compute every metric at the project's WACC
pub fn evaluate_project(params: &ProjectParameters) -> Result<ProjectEvaluation, EvaluationError> {
    log::debug!(
        "Evaluating project: investment {} over {} years at WACC {}%",
        params.investment,
        params.lifetime_years,
        params.wacc_pct
    );

    let cashflows = build_cashflow(params)?;
    let metrics = compute_metrics(&cashflows, params.wacc_pct)?;

    Ok(ProjectEvaluation {
        parameters: params.clone(),
        cashflows,
        metrics,
    })
}

impl ProjectEvaluation {
    /// Summary totals across the projection
    pub fn summary(&self) -> EvaluationSummary {
        let rows = self.cashflows.rows();
        EvaluationSummary {
            lifetime_years: self.cashflows.lifetime_years(),
            total_revenue: rows.iter().map(|r| r.revenue).sum(),
            total_cost: rows.iter().map(|r| r.cost).sum(),
            total_after_tax_profit: rows.iter().map(|r| r.after_tax_profit).sum(),
            net_position: self.cashflows.total_net_cash_flow(),
        }
    }
}

/// Lifetime totals for an evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationSummary {
    pub lifetime_years: u32,
    pub total_revenue: f64,
    pub total_cost: f64,
    pub total_after_tax_profit: f64,

    /// Cumulative undiscounted cash position at the end of the lifetime
    pub net_position: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_evaluate_project_end_to_end() {
        let params = ProjectParameters::new(30.0, 10, 3.5, 2.0, 13.0, 20.0).unwrap();
        let evaluation = evaluate_project(&params).unwrap();

        assert_eq!(evaluation.parameters, params);
        assert_eq!(evaluation.cashflows.len(), 11);
        assert!(evaluation.metrics.npv < 0.0);
    }

    #[test]
    fn test_summary_totals() {
        let params = ProjectParameters::new(30.0, 10, 3.5, 2.0, 13.0, 20.0).unwrap();
        let summary = evaluate_project(&params).unwrap().summary();

        assert_eq!(summary.lifetime_years, 10);
        assert_relative_eq!(summary.total_revenue, 35.0, max_relative = 1e-12);
        assert_relative_eq!(summary.total_cost, 20.0, max_relative = 1e-12);
        assert_relative_eq!(summary.total_after_tax_profit, 12.0, max_relative = 1e-12);
        assert_relative_eq!(summary.net_position, -18.0, max_relative = 1e-12);
    }

    #[test]
    fn test_parameter_errors_propagate() {
        let params = ProjectParameters {
            investment: -5.0,
            lifetime_years: 10,
            annual_revenue: 3.5,
            annual_cost: 2.0,
            wacc_pct: 13.0,
            tax_rate_pct: 20.0,
        };
        let err = evaluate_project(&params).unwrap_err();
        assert!(matches!(
            err,
            EvaluationError::InvalidParameter { field: "investment", .. }
        ));
    }

    #[test]
    fn test_discount_rate_errors_propagate() {
        let params = ProjectParameters {
            investment: 30.0,
            lifetime_years: 10,
            annual_revenue: 3.5,
            annual_cost: 2.0,
            wacc_pct: -100.0,
            tax_rate_pct: 20.0,
        };
        let err = evaluate_project(&params).unwrap_err();
        assert_eq!(
            err,
            EvaluationError::InvalidDiscountRate { rate_pct: -100.0 }
        );
    }

    #[test]
    fn test_serializes_to_json() {
        let params = ProjectParameters::new(10.0, 5, 5.0, 2.0, 10.0, 20.0).unwrap();
        let evaluation = evaluate_project(&params).unwrap();

        let json = serde_json::to_string(&evaluation).unwrap();
        let back: ProjectEvaluation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, evaluation);
    }
}
