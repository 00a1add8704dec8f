//! Cash-flow table construction
//!
//! Year 0 is synthetic: it carries the investment outflow and nothing else.
//! Years 1..=L carry the flat after-tax operating cash flow. In this model
//! cash flow and after-tax accounting profit coincide; there is no
//! depreciation schedule or working-capital adjustment.

use serde::{Deserialize, Serialize};

use crate::error::EvaluationError;
use crate::project::ProjectParameters;

/// A single row of the projection, one per year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashflowRow {
    /// Year index; 0 is the investment year
    pub year: u32,

    /// Revenue booked in this year
    pub revenue: f64,

    /// Operating cost in this year
    pub cost: f64,

    /// (revenue - cost) * (1 - tax/100)
    pub after_tax_profit: f64,

    /// Net cash flow: -investment at year 0, after-tax profit afterwards
    pub net_cash_flow: f64,
}

/// Ordered cash-flow projection over the whole project lifetime
///
/// Immutable once built: rows are exposed read-only and always hold
/// `lifetime_years + 1` entries sorted by ascending year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashflowTable {
    rows: Vec<CashflowRow>,
}

impl CashflowTable {
    /// All rows, year 0 first
    pub fn rows(&self) -> &[CashflowRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of operating years (rows minus the synthetic year 0)
    pub fn lifetime_years(&self) -> u32 {
        self.rows.len().saturating_sub(1) as u32
    }

    /// Net cash flows ordered by year; the slice index equals the year
    pub fn net_cash_flows(&self) -> Vec<f64> {
        self.rows.iter().map(|row| row.net_cash_flow).collect()
    }

    /// Undiscounted sum of all cash flows, investment included
    pub fn total_net_cash_flow(&self) -> f64 {
        self.rows.iter().map(|row| row.net_cash_flow).sum()
    }
}

/// Build the year-by-year cash-flow table for a project
///
/// Pure function of its input. Fails with `InvalidParameter` before
/// emitting anything if the parameter set is out of domain; a zero-year
/// lifetime is an error, never a degenerate one-row table.
pub fn build_cashflow(params: &ProjectParameters) -> Result<CashflowTable, EvaluationError> {
    params.validate()?;

    let annual_cash_flow = params.after_tax_cash_flow();
    let mut rows = Vec::with_capacity(params.lifetime_years as usize + 1);

    rows.push(CashflowRow {
        year: 0,
        revenue: 0.0,
        cost: 0.0,
        after_tax_profit: 0.0,
        net_cash_flow: -params.investment,
    });

    for year in 1..=params.lifetime_years {
        rows.push(CashflowRow {
            year,
            revenue: params.annual_revenue,
            cost: params.annual_cost,
            after_tax_profit: annual_cash_flow,
            net_cash_flow: annual_cash_flow,
        });
    }

    Ok(CashflowTable { rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_params() -> ProjectParameters {
        ProjectParameters::new(30.0, 10, 3.5, 2.0, 13.0, 20.0).unwrap()
    }

    #[test]
    fn test_row_count_and_ordering() {
        let table = build_cashflow(&sample_params()).unwrap();

        assert_eq!(table.len(), 11);
        assert_eq!(table.lifetime_years(), 10);
        for (i, row) in table.rows().iter().enumerate() {
            assert_eq!(row.year, i as u32);
        }
    }

    #[test]
    fn test_year_zero_row() {
        let table = build_cashflow(&sample_params()).unwrap();
        let first = &table.rows()[0];

        assert_eq!(first.revenue, 0.0);
        assert_eq!(first.cost, 0.0);
        assert_eq!(first.after_tax_profit, 0.0);
        assert_eq!(first.net_cash_flow, -30.0);
    }

    #[test]
    fn test_operating_rows_are_flat() {
        let params = sample_params();
        let expected = (3.5 - 2.0) * (1.0 - 20.0 / 100.0);
        let table = build_cashflow(&params).unwrap();

        for row in &table.rows()[1..] {
            assert_eq!(row.revenue, 3.5);
            assert_eq!(row.cost, 2.0);
            assert_eq!(row.after_tax_profit, expected);
            assert_eq!(row.net_cash_flow, expected);
        }
    }

    #[test]
    fn test_total_cash_flow_invariant() {
        let params = sample_params();
        let table = build_cashflow(&params).unwrap();

        // Sum over the table must equal L * (rev - cost) * (1 - tax/100) - investment
        let expected = 10.0 * (3.5 - 2.0) * 0.8 - 30.0;
        assert_relative_eq!(table.total_net_cash_flow(), expected, max_relative = 1e-12);
    }

    #[test]
    fn test_builder_is_idempotent() {
        let params = sample_params();
        let first = build_cashflow(&params).unwrap();
        let second = build_cashflow(&params).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_lifetime_is_an_error() {
        // Struct fields are public, so the builder must re-check the domain.
        let params = ProjectParameters {
            investment: 30.0,
            lifetime_years: 0,
            annual_revenue: 3.5,
            annual_cost: 2.0,
            wacc_pct: 13.0,
            tax_rate_pct: 20.0,
        };
        let err = build_cashflow(&params).unwrap_err();
        assert!(matches!(
            err,
            EvaluationError::InvalidParameter { field: "lifetime_years", .. }
        ));
    }

    #[test]
    fn test_loss_making_project_builds() {
        // revenue < cost is a valid (if unprofitable) projection
        let params = ProjectParameters::new(30.0, 10, 2.0, 3.5, 13.0, 20.0).unwrap();
        let table = build_cashflow(&params).unwrap();

        for row in &table.rows()[1..] {
            assert!(row.net_cash_flow < 0.0);
        }
    }

    #[test]
    fn test_single_year_lifetime() {
        let params = ProjectParameters::new(10.0, 1, 5.0, 2.0, 10.0, 20.0).unwrap();
        let table = build_cashflow(&params).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[1].year, 1);
    }
}
