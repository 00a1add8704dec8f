//! Investment Appraisal - Cash-flow projection and appraisal engine for capital projects
//!
//! This library provides:
//! - Year-by-year cash-flow projection from a flat operating model
//! - Appraisal metrics: NPV, IRR, payback and discounted payback
//! - Discount-rate sensitivity sweeps over a fixed projection
//! - Batch evaluation of project blocks loaded from CSV or JSON

pub mod error;
pub mod evaluation;
pub mod project;
pub mod scenario;

// Re-export commonly used types
pub use error::EvaluationError;
pub use evaluation::{
    build_cashflow, compute_metrics, evaluate_project, CashflowRow, CashflowTable,
    FinancialMetrics, ProjectEvaluation,
};
pub use project::{ProjectParameters, ProjectRecord};
pub use scenario::ScenarioRunner;
