use clap::Args;
use serde_json::{json, Value};

use hausfinanz_core::household::projection::{project, Projection};
use hausfinanz_core::scenarios::stress::{compare_stress_results, run_stress_tests};

use crate::commands::household::{SnapshotSource, DEFAULT_HORIZON_MONTHS};

/// Arguments for the stress-test run
#[derive(Args)]
pub struct StressArgs {
    #[command(flatten)]
    pub source: SnapshotSource,

    /// Number of months each scenario is projected
    #[arg(long, default_value_t = DEFAULT_HORIZON_MONTHS)]
    pub months: u32,
}

/// Project the baseline and every stress scenario, then compare.
///
/// A scenario that fails is reported with zeroed KPIs and its error; it
/// never aborts the other scenarios. A failing baseline is a hard error.
pub fn run_stress(args: StressArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let snapshot = args.source.load()?;
    let baseline = project(&snapshot, args.months)?;

    let run = run_stress_tests(&snapshot, args.months);
    let mut warnings = baseline.warnings.clone();
    for (scenario, outcome) in &run {
        match outcome {
            Ok(output) => warnings.extend(
                output
                    .warnings
                    .iter()
                    .map(|w| format!("{scenario}: {w}")),
            ),
            Err(e) => {
                tracing::warn!(%scenario, error = %e, "Using fallback projection for scenario");
                warnings.push(format!("{scenario}: {e}"));
            }
        }
    }

    let comparisons = compare_stress_results(&baseline.result, &run);
    let scenarios: Vec<Value> = comparisons
        .iter()
        .map(|c| {
            json!({
                "scenario": c.scenario,
                "description": c.description,
                "average_monthly_cashflow": c.kpis.average_monthly_cashflow,
                "liquidity_buffer": c.kpis.liquidity_buffer,
                "coverage_until_year": c.kpis.coverage_until_year.to_string(),
                "final_net_worth": c.kpis.final_net_worth,
                "net_worth_deviation": c.net_worth_deviation,
                "net_worth_deviation_pct": c.net_worth_deviation_pct,
                "error": c.error,
            })
        })
        .collect();

    let fallback_count = run.values().filter(|outcome| outcome.is_err()).count();
    let result = json!({
        "baseline": kpi_row(&baseline.result),
        "scenarios": scenarios,
        "failed_scenarios": fallback_count,
    });

    Ok(json!({
        "result": result,
        "methodology": format!(
            "Baseline plus single-factor stress scenarios over {} months",
            args.months
        ),
        "assumptions": baseline.assumptions,
        "warnings": warnings,
        "metadata": baseline.metadata,
    }))
}

fn kpi_row(projection: &Projection) -> Value {
    json!({
        "average_monthly_cashflow": projection.kpis.average_monthly_cashflow,
        "liquidity_buffer": projection.kpis.liquidity_buffer,
        "coverage_until_year": projection.kpis.coverage_until_year.to_string(),
        "final_net_worth": projection.kpis.final_net_worth,
        "final_real_net_worth": projection.summary.final_real_net_worth,
    })
}
