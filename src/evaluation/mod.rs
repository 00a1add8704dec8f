//! Evaluation engine: cash-flow projection and appraisal metrics

mod cashflow;
mod engine;
mod irr;
mod metrics;

pub use cashflow::{build_cashflow, CashflowRow, CashflowTable};
pub use engine::{evaluate_project, EvaluationSummary, ProjectEvaluation};
pub use irr::calculate_irr;
pub use metrics::{compute_metrics, FinancialMetrics};
