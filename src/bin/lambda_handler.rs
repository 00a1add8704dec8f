//! AWS Lambda handler for single-project appraisal
//!
//! Accepts project parameters as a plain JSON payload and returns the
//! appraisal metrics together with the full cash-flow table. Malformed or
//! out-of-domain input comes back as an `error` field in the response
//! rather than a failed invocation, so API callers always get JSON.

use std::time::Instant;

use investment_appraisal::evaluation::{evaluate_project, CashflowRow, EvaluationSummary};
use investment_appraisal::project::{ProjectParameters, RawProjectInput};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde::Serialize;

/// Output of one appraisal invocation
#[derive(Debug, Serialize)]
pub struct AppraisalResponse {
    pub npv: Option<f64>,
    pub irr_pct: Option<f64>,
    pub payback_year: Option<u32>,
    pub discounted_payback_year: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<ProjectParameters>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<EvaluationSummary>,
    pub cashflows: Vec<CashflowRow>,
    pub execution_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AppraisalResponse {
    fn failure(message: String, start: Instant) -> Self {
        AppraisalResponse {
            npv: None,
            irr_pct: None,
            payback_year: None,
            discounted_payback_year: None,
            parameters: None,
            summary: None,
            cashflows: Vec::new(),
            execution_time_ms: start.elapsed().as_millis() as u64,
            error: Some(message),
        }
    }
}

/// Lambda handler function
async fn handler(event: LambdaEvent<serde_json::Value>) -> Result<AppraisalResponse, Error> {
    let start = Instant::now();
    let (payload, _context) = event.into_parts();

    // Parse the loose payload first, then bring it into the typed domain
    let raw: RawProjectInput = match serde_json::from_value(payload) {
        Ok(raw) => raw,
        Err(e) => {
            return Ok(AppraisalResponse::failure(
                format!("Invalid JSON payload: {}", e),
                start,
            ));
        }
    };

    let params = match raw.into_parameters() {
        Ok(params) => params,
        Err(e) => return Ok(AppraisalResponse::failure(e.to_string(), start)),
    };

    let evaluation = match evaluate_project(&params) {
        Ok(evaluation) => evaluation,
        Err(e) => return Ok(AppraisalResponse::failure(e.to_string(), start)),
    };

    let summary = evaluation.summary();
    let metrics = &evaluation.metrics;

    Ok(AppraisalResponse {
        npv: Some(metrics.npv),
        irr_pct: metrics.irr_pct,
        payback_year: metrics.payback_year,
        discounted_payback_year: metrics.discounted_payback_year,
        parameters: Some(evaluation.parameters.clone()),
        summary: Some(summary),
        cashflows: evaluation.cashflows.rows().to_vec(),
        execution_time_ms: start.elapsed().as_millis() as u64,
        error: None,
    })
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
