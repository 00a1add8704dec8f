//! Project parameter structures supplied by the upstream extractor

use serde::{Deserialize, Serialize};

use crate::error::EvaluationError;

/// Validated parameter set for one investment project
///
/// Revenue and cost are flat across all years of the lifetime. That is the
/// projection model, not a placeholder: no growth or inflation adjustment
/// is ever applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectParameters {
    /// Initial investment outlay at year 0 (currency units)
    pub investment: f64,

    /// Project lifetime in whole years
    pub lifetime_years: u32,

    /// Annual revenue, constant over the lifetime (currency units)
    pub annual_revenue: f64,

    /// Annual operating cost, constant over the lifetime (currency units)
    pub annual_cost: f64,

    /// Discount rate (WACC) in percent
    pub wacc_pct: f64,

    /// Tax rate in percent
    pub tax_rate_pct: f64,
}

impl ProjectParameters {
    /// Create a validated parameter set
    pub fn new(
        investment: f64,
        lifetime_years: u32,
        annual_revenue: f64,
        annual_cost: f64,
        wacc_pct: f64,
        tax_rate_pct: f64,
    ) -> Result<Self, EvaluationError> {
        let params = Self {
            investment,
            lifetime_years,
            annual_revenue,
            annual_cost,
            wacc_pct,
            tax_rate_pct,
        };
        params.validate()?;
        Ok(params)
    }

    /// Parse and validate extractor output in JSON form
    pub fn from_json_str(text: &str) -> Result<Self, EvaluationError> {
        RawProjectInput::from_json_str(text)?.into_parameters()
    }

    /// Check every field against its domain
    ///
    /// Revenue and cost may be negative (a project can model a subsidy or a
    /// rebate year); WACC and tax rate are not range-restricted here. The
    /// WACC singularity at -100% is the metrics calculator's concern.
    pub fn validate(&self) -> Result<(), EvaluationError> {
        if !self.investment.is_finite() {
            return Err(EvaluationError::invalid_parameter(
                "investment",
                "must be a finite number",
            ));
        }
        if self.investment <= 0.0 {
            return Err(EvaluationError::invalid_parameter(
                "investment",
                format!("must be greater than zero, got {}", self.investment),
            ));
        }
        if self.lifetime_years < 1 {
            return Err(EvaluationError::invalid_parameter(
                "lifetime_years",
                "must be at least one year",
            ));
        }
        for (field, value) in [
            ("annual_revenue", self.annual_revenue),
            ("annual_cost", self.annual_cost),
            ("wacc_pct", self.wacc_pct),
            ("tax_rate_pct", self.tax_rate_pct),
        ] {
            if !value.is_finite() {
                return Err(EvaluationError::invalid_parameter(
                    field,
                    "must be a finite number",
                ));
            }
        }
        Ok(())
    }

    /// Flat after-tax cash flow for each operating year:
    /// (revenue - cost) * (1 - tax/100)
    pub fn after_tax_cash_flow(&self) -> f64 {
        (self.annual_revenue - self.annual_cost) * (1.0 - self.tax_rate_pct / 100.0)
    }
}

/// Raw, unvalidated parameter set as emitted by the information-extraction
/// collaborator
///
/// Every field is optional because the extractor output is untrusted: keys
/// can be absent or null. `into_parameters` is the only way out of this
/// type, so partially validated data never reaches the engine.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawProjectInput {
    #[serde(default)]
    pub investment: Option<f64>,

    /// Lifetime as extracted; may arrive as a float and is truncated to a
    /// whole year count. A value that truncates to zero is rejected.
    #[serde(default)]
    pub lifetime_years: Option<f64>,

    #[serde(default)]
    pub annual_revenue: Option<f64>,

    #[serde(default)]
    pub annual_cost: Option<f64>,

    #[serde(default, alias = "wacc")]
    pub wacc_pct: Option<f64>,

    #[serde(default, alias = "tax_rate")]
    pub tax_rate_pct: Option<f64>,
}

impl RawProjectInput {
    /// Parse extractor output; malformed JSON or a non-numeric field
    /// becomes `InvalidParameter` rather than a serde panic upstream
    pub fn from_json_str(text: &str) -> Result<Self, EvaluationError> {
        serde_json::from_str(text)
            .map_err(|e| EvaluationError::invalid_parameter("input", e.to_string()))
    }

    /// Convert into a fully validated `ProjectParameters`
    pub fn into_parameters(self) -> Result<ProjectParameters, EvaluationError> {
        let investment = require(self.investment, "investment")?;
        let lifetime_raw = require(self.lifetime_years, "lifetime_years")?;
        let annual_revenue = require(self.annual_revenue, "annual_revenue")?;
        let annual_cost = require(self.annual_cost, "annual_cost")?;
        let wacc_pct = require(self.wacc_pct, "wacc_pct")?;
        let tax_rate_pct = require(self.tax_rate_pct, "tax_rate_pct")?;

        if !lifetime_raw.is_finite() {
            return Err(EvaluationError::invalid_parameter(
                "lifetime_years",
                "must be a finite number",
            ));
        }
        if lifetime_raw < 1.0 {
            return Err(EvaluationError::invalid_parameter(
                "lifetime_years",
                format!("{} does not truncate to a positive year count", lifetime_raw),
            ));
        }
        let lifetime_years = lifetime_raw.trunc() as u32;

        ProjectParameters::new(
            investment,
            lifetime_years,
            annual_revenue,
            annual_cost,
            wacc_pct,
            tax_rate_pct,
        )
    }
}

fn require(value: Option<f64>, field: &'static str) -> Result<f64, EvaluationError> {
    value.ok_or_else(|| EvaluationError::invalid_parameter(field, "missing required field"))
}
