//! Scenario runner for rate sensitivity and batch evaluation
//!
//! Builds the cash-flow table once, then reprices it under many discount
//! rates without reconstructing the projection.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::EvaluationError;
use crate::evaluation::{
    build_cashflow, compute_metrics, evaluate_project, CashflowTable, FinancialMetrics,
    ProjectEvaluation,
};
use crate::project::{ProjectParameters, ProjectRecord};

/// Metrics repriced at one discount rate of a sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatePoint {
    pub wacc_pct: f64,
    pub metrics: FinancialMetrics,
}

/// Pre-built runner for repricing one project under many discount rates
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(params)?;
///
/// // Reprice the same projection under different rates
/// for point in runner.rate_sensitivity(&[8.0, 10.0, 12.0])? {
///     println!("{}% -> NPV {:.3}", point.wacc_pct, point.metrics.npv);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    parameters: ProjectParameters,
    cashflows: CashflowTable,
}

impl ScenarioRunner {
    /// Create a runner, building the cash-flow table once up front
    pub fn new(parameters: ProjectParameters) -> Result<Self, EvaluationError> {
        let cashflows = build_cashflow(&parameters)?;
        Ok(Self {
            parameters,
            cashflows,
        })
    }

    /// Metrics at a single discount rate
    pub fn metrics_at(&self, wacc_pct: f64) -> Result<FinancialMetrics, EvaluationError> {
        compute_metrics(&self.cashflows, wacc_pct)
    }

    /// Metrics at the project's own WACC
    pub fn base_metrics(&self) -> Result<FinancialMetrics, EvaluationError> {
        self.metrics_at(self.parameters.wacc_pct)
    }

    /// Reprice the fixed cash-flow table at each rate in turn
    ///
    /// Any rate that hits the discount singularity fails the whole sweep;
    /// a sensitivity table with holes in it is worse than no table.
    pub fn rate_sensitivity(&self, wacc_pcts: &[f64]) -> Result<Vec<RatePoint>, EvaluationError> {
        wacc_pcts
            .iter()
            .map(|&wacc_pct| {
                let metrics = self.metrics_at(wacc_pct)?;
                Ok(RatePoint { wacc_pct, metrics })
            })
            .collect()
    }

    /// Get reference to the underlying parameters
    pub fn parameters(&self) -> &ProjectParameters {
        &self.parameters
    }

    /// Get reference to the pre-built cash-flow table
    pub fn cashflows(&self) -> &CashflowTable {
        &self.cashflows
    }
}

/// Outcome of one project inside a batch run
#[derive(Debug)]
pub struct BatchOutcome {
    pub name: String,
    pub result: Result<ProjectEvaluation, EvaluationError>,
}

/// Evaluate a block of projects in parallel, one outcome per input record
///
/// Output order matches input order. A record that fails to evaluate is
/// reported in place; it never aborts the rest of the block.
pub fn evaluate_batch(records: &[ProjectRecord]) -> Vec<BatchOutcome> {
    records
        .par_iter()
        .map(|record| BatchOutcome {
            name: record.name.clone(),
            result: evaluate_project(&record.parameters),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marginal_project() -> ProjectParameters {
        ProjectParameters::new(10.0, 5, 5.0, 2.0, 10.0, 20.0).unwrap()
    }

    #[test]
    fn test_rate_sensitivity_sweep() {
        let runner = ScenarioRunner::new(marginal_project()).unwrap();
        let points = runner.rate_sensitivity(&[0.0, 5.0, 10.0, 20.0]).unwrap();

        assert_eq!(points.len(), 4);
        for (point, expected) in points.iter().zip([0.0, 5.0, 10.0, 20.0]) {
            assert_eq!(point.wacc_pct, expected);
        }

        // NPV falls as the discount rate rises
        for pair in points.windows(2) {
            assert!(pair[1].metrics.npv < pair[0].metrics.npv);
        }

        // The undiscounted flows in this fixture sum above zero
        assert!(points[0].metrics.npv > 0.0);
        assert!(points[3].metrics.npv < 0.0);
    }

    #[test]
    fn test_sweep_fails_on_singular_rate() {
        let runner = ScenarioRunner::new(marginal_project()).unwrap();
        let err = runner.rate_sensitivity(&[5.0, -100.0, 15.0]).unwrap_err();
        assert_eq!(
            err,
            EvaluationError::InvalidDiscountRate { rate_pct: -100.0 }
        );
    }

    #[test]
    fn test_base_metrics_match_full_evaluation() {
        let params = marginal_project();
        let runner = ScenarioRunner::new(params.clone()).unwrap();
        let evaluation = evaluate_project(&params).unwrap();

        assert_eq!(runner.base_metrics().unwrap(), evaluation.metrics);
    }

    #[test]
    fn test_batch_preserves_order_and_isolates_failures() {
        let good = ProjectRecord {
            name: "plant-upgrade".to_string(),
            parameters: marginal_project(),
        };
        let bad = ProjectRecord {
            name: "degenerate-rate".to_string(),
            parameters: ProjectParameters {
                investment: 10.0,
                lifetime_years: 5,
                annual_revenue: 5.0,
                annual_cost: 2.0,
                wacc_pct: -150.0,
                tax_rate_pct: 20.0,
            },
        };

        let outcomes = evaluate_batch(&[good, bad]);
        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].name, "plant-upgrade");
        assert!(outcomes[0].result.is_ok());
        assert_eq!(outcomes[1].name, "degenerate-rate");
        assert_eq!(
            outcomes[1].result,
            Err(EvaluationError::InvalidDiscountRate { rate_pct: -150.0 })
        );
    }
}
