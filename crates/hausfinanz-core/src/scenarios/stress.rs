use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::household::projection::{project, Projection, ProjectionKpis};
use crate::household::snapshot::InputSnapshot;
use crate::types::{ComputationOutput, Money, Percent};
use crate::PlannerResult;

const VACANCY_SHOCK: Percent = dec!(20);
const INFLATION_SHOCK: Percent = dec!(3);
const RETURN_SHOCK: Percent = dec!(2);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A single-factor perturbation of the baseline snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StressScenario {
    /// Every property's vacancy rate +20 points, capped at 100
    HighVacancy,
    /// Inflation +3 points
    HighInflation,
    /// Savings return -2 points, floored at 0
    LowReturns,
}

impl StressScenario {
    pub const ALL: [StressScenario; 3] = [
        StressScenario::HighVacancy,
        StressScenario::HighInflation,
        StressScenario::LowReturns,
    ];

    pub fn key(self) -> &'static str {
        match self {
            StressScenario::HighVacancy => "highVacancy",
            StressScenario::HighInflation => "highInflation",
            StressScenario::LowReturns => "lowReturns",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            StressScenario::HighVacancy => "Vacancy +20 points on every property",
            StressScenario::HighInflation => "Inflation +3 points",
            StressScenario::LowReturns => "Savings return -2 points",
        }
    }
}

impl fmt::Display for StressScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Outcome per scenario. A failed scenario does not affect the others.
pub type StressTestRun = BTreeMap<StressScenario, PlannerResult<ComputationOutput<Projection>>>;

/// Scenario KPIs set against the baseline projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressComparison {
    pub scenario: StressScenario,
    pub description: String,
    pub kpis: ProjectionKpis,
    /// Scenario final net worth minus baseline final net worth
    pub net_worth_deviation: Money,
    /// Deviation relative to the baseline, in percent. `None` when the
    /// baseline is zero or the ratio is not representable.
    pub net_worth_deviation_pct: Option<Percent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Clone the snapshot and apply exactly one scenario's perturbation.
///
/// Returns the derived snapshot and any notes about clamped values.
pub fn derive_snapshot(
    snapshot: &InputSnapshot,
    scenario: StressScenario,
) -> (InputSnapshot, Vec<String>) {
    let mut derived = snapshot.clone();
    let mut notes = Vec::new();

    match scenario {
        StressScenario::HighVacancy => {
            for property in &mut derived.properties {
                let shocked = property.vacancy_rate + VACANCY_SHOCK;
                if shocked > Decimal::ONE_HUNDRED {
                    tracing::warn!(property = property.id, %shocked, "Vacancy shock capped at 100");
                    notes.push(format!(
                        "Property {}: shocked vacancy {shocked} capped at 100",
                        property.id
                    ));
                }
                property.vacancy_rate = shocked.min(Decimal::ONE_HUNDRED);
            }
        }
        StressScenario::HighInflation => {
            derived.assumptions.inflation_rate += INFLATION_SHOCK;
        }
        StressScenario::LowReturns => {
            derived.assumptions.savings_return =
                (derived.assumptions.savings_return - RETURN_SHOCK).max(Decimal::ZERO);
        }
    }

    (derived, notes)
}

/// Run every stress scenario at the baseline horizon.
///
/// Each scenario is projected independently; an invalid derived snapshot
/// shows up as an `Err` for that scenario only.
pub fn run_stress_tests(snapshot: &InputSnapshot, horizon_months: u32) -> StressTestRun {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        StressScenario::ALL
            .par_iter()
            .map(|&scenario| (scenario, run_scenario(snapshot, scenario, horizon_months)))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        StressScenario::ALL
            .iter()
            .map(|&scenario| (scenario, run_scenario(snapshot, scenario, horizon_months)))
            .collect()
    }
}

/// Compare each scenario's KPIs against the baseline.
///
/// Failed scenarios are reported with fallback (zeroed) KPIs and their error.
pub fn compare_stress_results(baseline: &Projection, run: &StressTestRun) -> Vec<StressComparison> {
    let base_net_worth = baseline.kpis.final_net_worth;

    run.iter()
        .map(|(&scenario, outcome)| match outcome {
            Ok(output) => {
                let kpis = output.result.kpis.clone();
                let deviation = kpis.final_net_worth - base_net_worth;
                let deviation_pct = deviation
                    .checked_div(base_net_worth.abs())
                    .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED));
                StressComparison {
                    scenario,
                    description: scenario.description().to_string(),
                    kpis,
                    net_worth_deviation: deviation,
                    net_worth_deviation_pct: deviation_pct,
                    error: None,
                }
            }
            Err(e) => StressComparison {
                scenario,
                description: scenario.description().to_string(),
                kpis: Projection::fallback().kpis,
                net_worth_deviation: Decimal::ZERO,
                net_worth_deviation_pct: None,
                error: Some(e.to_string()),
            },
        })
        .collect()
}

fn run_scenario(
    snapshot: &InputSnapshot,
    scenario: StressScenario,
    horizon_months: u32,
) -> PlannerResult<ComputationOutput<Projection>> {
    let (derived, notes) = derive_snapshot(snapshot, scenario);
    tracing::debug!(%scenario, horizon_months, "Running stress scenario");

    let mut output = project(&derived, horizon_months).inspect_err(|e| {
        tracing::warn!(%scenario, error = %e, "Stress scenario failed");
    })?;
    output.methodology = format!("{} [stress: {}]", output.methodology, scenario.description());
    output.warnings.extend(notes);
    Ok(output)
}
