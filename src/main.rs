//! Investment Appraisal CLI
//!
//! Command-line interface for projecting and appraising a single capital
//! project. Parameters come from flags or a JSON file; the cash-flow table
//! is printed and exported to CSV.

use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use investment_appraisal::{evaluate_project, ProjectParameters, ScenarioRunner};

#[derive(Parser)]
#[command(name = "investment-appraisal")]
#[command(about = "Cash-flow projection and appraisal for a capital project")]
#[command(version)]
struct Cli {
    /// Initial investment outlay
    #[arg(long, default_value_t = 30.0)]
    investment: f64,

    /// Project lifetime in years
    #[arg(long, default_value_t = 10)]
    lifetime: u32,

    /// Annual revenue
    #[arg(long, default_value_t = 3.5)]
    revenue: f64,

    /// Annual operating cost
    #[arg(long, default_value_t = 2.0)]
    cost: f64,

    /// Weighted average cost of capital, in percent
    #[arg(long, default_value_t = 13.0)]
    wacc: f64,

    /// Tax rate, in percent
    #[arg(long, default_value_t = 20.0)]
    tax_rate: f64,

    /// Read parameters from a JSON file instead of individual flags
    #[arg(long)]
    input: Option<PathBuf>,

    /// Where to write the cash-flow table CSV
    #[arg(long, default_value = "cashflow_output.csv")]
    output: PathBuf,

    /// Extra discount rates in percent for a sensitivity table
    #[arg(long, value_delimiter = ',')]
    sweep: Vec<f64>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    println!("Investment Appraisal v0.1.0");
    println!("===========================\n");

    let params = match &cli.input {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            ProjectParameters::from_json_str(&text)?
        }
        None => ProjectParameters::new(
            cli.investment,
            cli.lifetime,
            cli.revenue,
            cli.cost,
            cli.wacc,
            cli.tax_rate,
        )?,
    };

    println!("Project parameters:");
    println!("  Investment: {:.2}", params.investment);
    println!("  Lifetime: {} years", params.lifetime_years);
    println!("  Annual Revenue: {:.2}", params.annual_revenue);
    println!("  Annual Cost: {:.2}", params.annual_cost);
    println!("  WACC: {:.2}%", params.wacc_pct);
    println!("  Tax Rate: {:.2}%", params.tax_rate_pct);
    println!();

    let evaluation = evaluate_project(&params)?;

    // Print the projection table
    println!("Cash-flow projection ({} rows):", evaluation.cashflows.len());
    println!(
        "{:>4} {:>12} {:>12} {:>16} {:>14}",
        "Year", "Revenue", "Cost", "AfterTaxProfit", "NetCashFlow"
    );
    println!("{}", "-".repeat(62));

    for row in evaluation.cashflows.rows() {
        println!(
            "{:>4} {:>12.2} {:>12.2} {:>16.2} {:>14.2}",
            row.year, row.revenue, row.cost, row.after_tax_profit, row.net_cash_flow
        );
    }

    // Write the full table to CSV
    let mut file = File::create(&cli.output)
        .with_context(|| format!("failed to create {}", cli.output.display()))?;
    writeln!(file, "Year,Revenue,Cost,AfterTaxProfit,NetCashFlow")?;
    for row in evaluation.cashflows.rows() {
        writeln!(
            file,
            "{},{:.6},{:.6},{:.6},{:.6}",
            row.year, row.revenue, row.cost, row.after_tax_profit, row.net_cash_flow
        )?;
    }
    println!("\nCash-flow table written to: {}", cli.output.display());

    let metrics = &evaluation.metrics;
    println!("\nAppraisal at {:.2}% WACC:", params.wacc_pct);
    println!("  NPV: {:.4}", metrics.npv);
    match metrics.irr_pct {
        Some(irr) => println!("  IRR: {:.2}%", irr),
        None => println!("  IRR: undefined (no sign change in cash flows)"),
    }
    match metrics.payback_year {
        Some(year) => println!("  Payback Period: year {}", year),
        None => println!("  Payback Period: not reached within lifetime"),
    }
    match metrics.discounted_payback_year {
        Some(year) => println!("  Discounted Payback: year {}", year),
        None => println!("  Discounted Payback: not reached within lifetime"),
    }

    let summary = evaluation.summary();
    println!("\nSummary:");
    println!("  Total Revenue: {:.2}", summary.total_revenue);
    println!("  Total Cost: {:.2}", summary.total_cost);
    println!("  Total After-Tax Profit: {:.2}", summary.total_after_tax_profit);
    println!("  Net Position: {:.2}", summary.net_position);

    // Optional discount-rate sensitivity table
    if !cli.sweep.is_empty() {
        let runner = ScenarioRunner::new(params)?;
        let points = runner.rate_sensitivity(&cli.sweep)?;

        println!("\nRate sensitivity:");
        println!(
            "{:>10} {:>14} {:>10} {:>12}",
            "WACC %", "NPV", "Payback", "Disc. PB"
        );
        println!("{}", "-".repeat(50));
        for point in &points {
            println!(
                "{:>10.2} {:>14.4} {:>10} {:>12}",
                point.wacc_pct,
                point.metrics.npv,
                format_year(point.metrics.payback_year),
                format_year(point.metrics.discounted_payback_year),
            );
        }
    }

    Ok(())
}

fn format_year(year: Option<u32>) -> String {
    match year {
        Some(y) => y.to_string(),
        None => "-".to_string(),
    }
}
