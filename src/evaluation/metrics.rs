//! Appraisal metrics derived from a cash-flow table
//!
//! NPV, IRR, payback period and discounted payback period. Discounting
//! starts at year 0 with a factor of 1, for the NPV and the discounted
//! payback alike.

use serde::{Deserialize, Serialize};

use super::cashflow::CashflowTable;
use super::irr::{calculate_irr, npv_at_rate};
use crate::error::EvaluationError;

/// Appraisal metrics for a single project
///
/// `None` means the answer does not exist: no IRR root, or break-even
/// never reached inside the lifetime. Callers must treat that as distinct
/// from any numeric value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialMetrics {
    /// Net present value at the evaluation discount rate
    pub npv: f64,

    /// Internal rate of return in percent, when a root exists
    pub irr_pct: Option<f64>,

    /// First year the cumulative net cash flow turns non-negative
    pub payback_year: Option<u32>,

    /// First year the cumulative discounted cash flow turns non-negative
    pub discounted_payback_year: Option<u32>,
}

/// Compute NPV, IRR and the payback metrics for a built cash-flow table
///
/// `wacc_pct` is a percentage (13.0 for 13%). The only failure left at
/// this stage is the discount-rate singularity: rates at or below -100%,
/// or non-finite rates, have no defined discount factor.
pub fn compute_metrics(
    table: &CashflowTable,
    wacc_pct: f64,
) -> Result<FinancialMetrics, EvaluationError> {
    if !wacc_pct.is_finite() || wacc_pct <= -100.0 {
        return Err(EvaluationError::InvalidDiscountRate { rate_pct: wacc_pct });
    }

    let rate = wacc_pct / 100.0;
    let flows = table.net_cash_flows();

    let npv = npv_at_rate(&flows, rate);
    let irr_pct = calculate_irr(&flows).map(|r| r * 100.0);

    let payback_year = first_break_even_year(
        table.rows().iter().map(|row| (row.year, row.net_cash_flow)),
    );
    let discounted_payback_year = first_break_even_year(
        table
            .rows()
            .iter()
            .map(|row| (row.year, row.net_cash_flow / (1.0 + rate).powi(row.year as i32))),
    );

    Ok(FinancialMetrics {
        npv,
        irr_pct,
        payback_year,
        discounted_payback_year,
    })
}

/// First year whose running cumulative flow reaches zero or above
///
/// Scans in year order and never extrapolates past the final year; a
/// sequence that stays under water yields `None`.
fn first_break_even_year<I>(flows: I) -> Option<u32>
where
    I: Iterator<Item = (u32, f64)>,
{
    let mut cumulative = 0.0;
    for (year, cash_flow) in flows {
        cumulative += cash_flow;
        if cumulative >= 0.0 {
            return Some(year);
        }
    }
    None
}
