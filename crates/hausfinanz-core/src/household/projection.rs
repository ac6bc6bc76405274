use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::PlannerError;
use crate::household::monthly::{monthly_cashflow, MonthlyCashflow};
use crate::household::snapshot::InputSnapshot;
use crate::types::{growth_factor, ratio_or_zero, with_metadata, ComputationOutput, Money};
use crate::PlannerResult;

/// Longest supported horizon (50 years).
pub const MAX_HORIZON_MONTHS: u32 = 600;

/// Largest cash balance or net worth (nominal or real) a projection may reach.
/// Keeps sums and deviations over the series inside Decimal range.
pub const MAX_BALANCE: Money = dec!(10000000000000000000000000);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One simulated month with running balances applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyResult {
    #[serde(flatten)]
    pub cashflow: MonthlyCashflow,
    pub monthly_interest: Money,
    /// Cash after this month's cashflow, interest and any sale proceeds
    pub cash_balance: Money,
    pub property_value: Money,
    pub net_worth: Money,
    /// Net worth deflated by the cumulative inflation factor
    pub real_net_worth: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub total_months: u32,
    pub total_income: Money,
    pub total_expenses: Money,
    pub total_net_cashflow: Money,
    pub final_cash: Money,
    pub final_net_worth: Money,
    pub final_real_net_worth: Money,
    pub average_monthly_cashflow: Money,
}

/// First projection year in which cash runs out, if any.
///
/// Serialized as its display form: `"2"`, `"10+"` or `"N/A"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum CoverageUntil {
    /// 1-based year of the first month with negative cash
    Year(u32),
    /// Cash stays non-negative for the whole horizon of this many years
    Beyond(u32),
    /// No projection available
    Unavailable,
}

impl fmt::Display for CoverageUntil {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoverageUntil::Year(year) => write!(f, "{year}"),
            CoverageUntil::Beyond(years) => write!(f, "{years}+"),
            CoverageUntil::Unavailable => write!(f, "N/A"),
        }
    }
}

impl From<CoverageUntil> for String {
    fn from(coverage: CoverageUntil) -> Self {
        coverage.to_string()
    }
}

impl TryFrom<String> for CoverageUntil {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value == "N/A" {
            return Ok(CoverageUntil::Unavailable);
        }
        let parse = |digits: &str| {
            digits
                .parse::<u32>()
                .map_err(|_| format!("invalid coverage value '{value}'"))
        };
        match value.strip_suffix('+') {
            Some(years) => parse(years).map(CoverageUntil::Beyond),
            None => parse(&value).map(CoverageUntil::Year),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionKpis {
    pub average_monthly_cashflow: Money,
    /// Months of average expenses covered by the final cash balance
    pub liquidity_buffer: Decimal,
    pub coverage_until_year: CoverageUntil,
    pub final_net_worth: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub monthly_results: Vec<MonthlyResult>,
    pub summary: ProjectionSummary,
    pub kpis: ProjectionKpis,
}

impl Projection {
    /// Zeroed stand-in for a projection that could not be computed, so that
    /// callers can keep rendering.
    pub fn fallback() -> Self {
        Self {
            monthly_results: Vec::new(),
            summary: ProjectionSummary {
                total_months: 0,
                total_income: Decimal::ZERO,
                total_expenses: Decimal::ZERO,
                total_net_cashflow: Decimal::ZERO,
                final_cash: Decimal::ZERO,
                final_net_worth: Decimal::ZERO,
                final_real_net_worth: Decimal::ZERO,
                average_monthly_cashflow: Decimal::ZERO,
            },
            kpis: ProjectionKpis {
                average_monthly_cashflow: Decimal::ZERO,
                liquidity_buffer: Decimal::ZERO,
                coverage_until_year: CoverageUntil::Unavailable,
                final_net_worth: Decimal::ZERO,
            },
        }
    }

    pub fn last(&self) -> Option<&MonthlyResult> {
        self.monthly_results.last()
    }
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Project cash balance and net worth month by month over `horizon_months`.
///
/// Per month: the cashflow breakdown is computed, interest accrues on the
/// balance carried in from the previous month, then property values are
/// grown (or replaced by the sale price in the sale year, with the proceeds
/// credited in the first month of that year) before the record is emitted.
pub fn project(
    snapshot: &InputSnapshot,
    horizon_months: u32,
) -> PlannerResult<ComputationOutput<Projection>> {
    let mut warnings: Vec<String> = Vec::new();

    validate_horizon(horizon_months)?;
    snapshot.validate(&mut warnings)?;
    for warning in &warnings {
        tracing::warn!(%warning, "Suspicious snapshot input");
    }

    tracing::debug!(
        horizon_months,
        properties = snapshot.properties.len(),
        "Starting household projection"
    );

    let projection = run_projection(snapshot, horizon_months)?;

    tracing::debug!(
        final_cash = %projection.summary.final_cash,
        final_net_worth = %projection.summary.final_net_worth,
        coverage = %projection.kpis.coverage_until_year,
        "Household projection finished"
    );

    if let CoverageUntil::Year(year) = projection.kpis.coverage_until_year {
        warnings.push(format!("Cash balance turns negative in year {year}"));
    }

    Ok(with_metadata(
        "Monthly household cashflow projection (German income tax 2024/2025, Soli, GKV, linear AfA)",
        &serde_json::json!({
            "horizon_months": horizon_months,
            "initial_cash": snapshot.initial_cash.to_string(),
            "property_count": snapshot.properties.len(),
            "assumptions": &snapshot.assumptions,
        }),
        warnings,
        projection,
    ))
}

fn validate_horizon(horizon_months: u32) -> PlannerResult<()> {
    if horizon_months == 0 {
        return Err(PlannerError::InvalidInput {
            field: "horizon_months".into(),
            reason: "Horizon must be at least one month".into(),
        });
    }
    if horizon_months > MAX_HORIZON_MONTHS {
        return Err(PlannerError::InvalidInput {
            field: "horizon_months".into(),
            reason: format!("Horizon must not exceed {MAX_HORIZON_MONTHS} months"),
        });
    }
    Ok(())
}

/// The month loop itself; expects a validated snapshot and horizon.
fn run_projection(snapshot: &InputSnapshot, horizon_months: u32) -> PlannerResult<Projection> {
    let monthly_savings_rate = snapshot.assumptions.savings_return / dec!(100) / dec!(12);
    let mut cash_balance = snapshot.initial_cash;
    let mut monthly_results = Vec::with_capacity(horizon_months as usize);

    for month_index in 0..horizon_months {
        let cashflow = monthly_cashflow(snapshot, month_index);

        let monthly_interest = cash_balance * monthly_savings_rate;
        cash_balance += cashflow.net_cashflow + monthly_interest;

        let year_index = month_index / 12;
        let value_growth = growth_factor(snapshot.assumptions.property_value_growth, year_index);
        let mut property_value = Decimal::ZERO;
        for property in &snapshot.properties {
            match &property.planned_sale {
                Some(sale) if sale.year == year_index + 1 => {
                    property_value += sale.price;
                    if month_index % 12 == 0 {
                        cash_balance += sale.price;
                    }
                }
                _ => property_value += property.current_value * value_growth,
            }
        }

        let net_worth = cash_balance + property_value;
        let real_net_worth = net_worth
            .checked_div(cashflow.inflation_factor)
            .filter(|real| real.abs() <= MAX_BALANCE)
            .ok_or_else(|| out_of_range("assumptions.inflation_rate", month_index))?;
        if cash_balance.abs() > MAX_BALANCE || net_worth.abs() > MAX_BALANCE {
            return Err(out_of_range("snapshot", month_index));
        }

        monthly_results.push(MonthlyResult {
            cashflow,
            monthly_interest,
            cash_balance,
            property_value,
            net_worth,
            real_net_worth,
        });
    }

    let summary = summarize(&monthly_results);
    let kpis = compute_kpis(&monthly_results);

    Ok(Projection {
        monthly_results,
        summary,
        kpis,
    })
}

fn out_of_range(field: &str, month_index: u32) -> PlannerError {
    PlannerError::InvalidInput {
        field: field.into(),
        reason: format!(
            "Projected balances exceed {MAX_BALANCE} in month {month_index}; inputs are out of range"
        ),
    }
}

fn summarize(results: &[MonthlyResult]) -> ProjectionSummary {
    let total_months = results.len() as u32;
    let total_income: Money = results.iter().map(|r| r.cashflow.income.total).sum();
    let total_expenses: Money = results.iter().map(|r| r.cashflow.expenses.total).sum();
    let total_net_cashflow = total_income - total_expenses;
    let last = results.last();

    ProjectionSummary {
        total_months,
        total_income,
        total_expenses,
        total_net_cashflow,
        final_cash: last.map_or(Decimal::ZERO, |r| r.cash_balance),
        final_net_worth: last.map_or(Decimal::ZERO, |r| r.net_worth),
        final_real_net_worth: last.map_or(Decimal::ZERO, |r| r.real_net_worth),
        average_monthly_cashflow: ratio_or_zero(total_net_cashflow, Decimal::from(total_months)),
    }
}

fn compute_kpis(results: &[MonthlyResult]) -> ProjectionKpis {
    let months = Decimal::from(results.len() as u64);
    let net_cashflow_sum: Money = results.iter().map(|r| r.cashflow.net_cashflow).sum();
    let expenses_sum: Money = results.iter().map(|r| r.cashflow.expenses.total).sum();

    let average_monthly_cashflow = ratio_or_zero(net_cashflow_sum, months);
    let average_monthly_expenses = ratio_or_zero(expenses_sum, months);
    let final_cash = results.last().map_or(Decimal::ZERO, |r| r.cash_balance);

    let liquidity_buffer = if average_monthly_expenses > Decimal::ZERO {
        final_cash / average_monthly_expenses
    } else {
        Decimal::ZERO
    };

    let coverage_until_year = results
        .iter()
        .find(|r| r.cash_balance < Decimal::ZERO)
        .map(|r| CoverageUntil::Year(r.cashflow.year))
        .unwrap_or_else(|| CoverageUntil::Beyond((results.len() as u32).div_ceil(12)));

    ProjectionKpis {
        average_monthly_cashflow,
        liquidity_buffer,
        coverage_until_year,
        final_net_worth: results.last().map_or(Decimal::ZERO, |r| r.net_worth),
    }
}
