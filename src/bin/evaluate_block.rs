//! Evaluate a block of projects loaded from CSV
//!
//! Runs every project in the block in parallel and reports per-project
//! metrics plus block-level aggregates, including the IRR of the combined
//! year-aligned cash flows.
//! Supports JSON output for API integration via --json flag.
//! Accepts config via environment variables:
//!   PROJECTS_CSV  - path to the block CSV (default data/projects.csv)
//!   WACC_OVERRIDE - evaluate every project at this WACC percent instead
//!                   of the per-project rate

use anyhow::{anyhow, Result};
use investment_appraisal::evaluation::calculate_irr;
use investment_appraisal::project::loader::{load_projects, DEFAULT_PROJECTS_PATH};
use investment_appraisal::scenario::evaluate_batch;
use serde::Serialize;
use std::env;
use std::time::Instant;

#[derive(Serialize)]
struct BlockResponse {
    project_count: usize,
    evaluated_count: usize,
    failed_count: usize,
    wacc_override_pct: Option<f64>,
    block_irr_pct: Option<f64>,
    summary: BlockSummary,
    projects: Vec<ProjectOutput>,
    aggregated_cash_flows: Vec<f64>,
    execution_time_ms: u64,
}

#[derive(Serialize)]
struct BlockSummary {
    total_investment: f64,
    total_npv: f64,
    total_net_position: f64,
    positive_npv_count: usize,
    payback_reached_count: usize,
}

#[derive(Serialize)]
struct ProjectOutput {
    name: String,
    npv: Option<f64>,
    irr_pct: Option<f64>,
    payback_year: Option<u32>,
    discounted_payback_year: Option<u32>,
    net_position: Option<f64>,
    error: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();

    let json_output = env::args().any(|arg| arg == "--json");
    let start = Instant::now();

    // Read config from environment or use defaults
    let csv_path = env::var("PROJECTS_CSV").unwrap_or_else(|_| DEFAULT_PROJECTS_PATH.to_string());
    let wacc_override_pct: Option<f64> = env::var("WACC_OVERRIDE")
        .ok()
        .and_then(|s| s.parse().ok());

    if !json_output {
        println!("Loading projects from {}...", csv_path);
    }

    let mut records =
        load_projects(&csv_path).map_err(|e| anyhow!("failed to load {}: {}", csv_path, e))?;

    if let Some(wacc_pct) = wacc_override_pct {
        for record in &mut records {
            record.parameters.wacc_pct = wacc_pct;
        }
    }

    if !json_output {
        println!("Loaded {} projects in {:?}", records.len(), start.elapsed());
        println!("Evaluating block...");
    }

    let eval_start = Instant::now();
    let outcomes = evaluate_batch(&records);

    if !json_output {
        println!("Evaluation complete in {:?}\n", eval_start.elapsed());
    }

    // Aggregate the block: per-project outputs plus year-aligned flow totals
    let mut aggregated_cash_flows: Vec<f64> = Vec::new();
    let mut total_investment = 0.0;
    let mut total_npv = 0.0;
    let mut total_net_position = 0.0;
    let mut positive_npv_count = 0;
    let mut payback_reached_count = 0;
    let mut evaluated_count = 0;

    let mut projects = Vec::with_capacity(outcomes.len());
    for outcome in &outcomes {
        match &outcome.result {
            Ok(evaluation) => {
                evaluated_count += 1;

                let flows = evaluation.cashflows.net_cash_flows();
                if aggregated_cash_flows.len() < flows.len() {
                    aggregated_cash_flows.resize(flows.len(), 0.0);
                }
                for (year, &cf) in flows.iter().enumerate() {
                    aggregated_cash_flows[year] += cf;
                }

                let net_position = evaluation.cashflows.total_net_cash_flow();
                total_investment += evaluation.parameters.investment;
                total_npv += evaluation.metrics.npv;
                total_net_position += net_position;
                if evaluation.metrics.npv > 0.0 {
                    positive_npv_count += 1;
                }
                if evaluation.metrics.payback_year.is_some() {
                    payback_reached_count += 1;
                }

                projects.push(ProjectOutput {
                    name: outcome.name.clone(),
                    npv: Some(evaluation.metrics.npv),
                    irr_pct: evaluation.metrics.irr_pct,
                    payback_year: evaluation.metrics.payback_year,
                    discounted_payback_year: evaluation.metrics.discounted_payback_year,
                    net_position: Some(net_position),
                    error: None,
                });
            }
            Err(err) => {
                projects.push(ProjectOutput {
                    name: outcome.name.clone(),
                    npv: None,
                    irr_pct: None,
                    payback_year: None,
                    discounted_payback_year: None,
                    net_position: None,
                    error: Some(err.to_string()),
                });
            }
        }
    }

    // IRR of the whole block's combined cash-flow stream
    let block_irr_pct = calculate_irr(&aggregated_cash_flows).map(|r| r * 100.0);
    let failed_count = outcomes.len() - evaluated_count;
    let execution_time_ms = start.elapsed().as_millis() as u64;

    if json_output {
        // Output JSON for API consumption
        let response = BlockResponse {
            project_count: outcomes.len(),
            evaluated_count,
            failed_count,
            wacc_override_pct,
            block_irr_pct,
            summary: BlockSummary {
                total_investment,
                total_npv,
                total_net_position,
                positive_npv_count,
                payback_reached_count,
            },
            projects,
            aggregated_cash_flows,
            execution_time_ms,
        };
        println!("{}", serde_json::to_string(&response)?);
    } else {
        // Human-readable output
        println!(
            "{:<24} {:>12} {:>9} {:>8} {:>9} {:>14}",
            "Project", "NPV", "IRR %", "Payback", "Disc. PB", "Net Position"
        );
        println!("{}", "-".repeat(80));

        for project in &projects {
            match &project.error {
                Some(message) => println!("{:<24} ERROR: {}", project.name, message),
                None => println!(
                    "{:<24} {:>12.4} {:>9} {:>8} {:>9} {:>14.2}",
                    project.name,
                    project.npv.unwrap_or(0.0),
                    format_pct(project.irr_pct),
                    format_year(project.payback_year),
                    format_year(project.discounted_payback_year),
                    project.net_position.unwrap_or(0.0),
                ),
            }
        }

        println!("\nBlock summary:");
        println!(
            "  Projects: {} ({} evaluated, {} failed)",
            outcomes.len(),
            evaluated_count,
            failed_count
        );
        if let Some(wacc_pct) = wacc_override_pct {
            println!("  WACC override: {:.2}%", wacc_pct);
        }
        println!("  Total Investment: {:.2}", total_investment);
        println!("  Total NPV: {:.4}", total_npv);
        println!("  Total Net Position: {:.2}", total_net_position);
        println!(
            "  Positive NPV: {}/{}",
            positive_npv_count, evaluated_count
        );
        println!(
            "  Payback Reached: {}/{}",
            payback_reached_count, evaluated_count
        );
        match block_irr_pct {
            Some(irr) => println!("  Block IRR: {:.2}%", irr),
            None => println!("  Block IRR: undefined"),
        }
        println!("\nCompleted in {} ms", execution_time_ms);
    }

    Ok(())
}

fn format_year(year: Option<u32>) -> String {
    match year {
        Some(y) => y.to_string(),
        None => "-".to_string(),
    }
}

fn format_pct(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "-".to_string(),
    }
}
