use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::household::projection::{MonthlyResult, Projection};
use crate::types::Money;

/// One projection year rolled up from its months.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearSummary {
    /// 1-based projection year
    pub year: u32,
    /// Months in this block; below 12 only for a trailing partial year
    pub months: u32,
    /// Cash balance after the block's first month
    pub start_balance: Money,
    /// Cash balance after the block's last month
    pub end_balance: Money,
    pub total_income: Money,
    pub total_expenses: Money,
    pub net_cashflow: Money,
    pub total_interest: Money,
    pub net_worth: Money,
    pub property_value: Money,
    pub real_net_worth: Money,
}

/// Roll the monthly series up into 12-month blocks.
///
/// Flows are summed over the months actually in each block; balances are
/// read from the block's first and last month. A horizon that is not a
/// multiple of 12 ends with a shorter block.
pub fn yearly_summary(projection: &Projection) -> Vec<YearSummary> {
    projection
        .monthly_results
        .chunks(12)
        .zip(1u32..)
        .filter_map(|(block, year)| summarize_block(year, block))
        .collect()
}

fn summarize_block(year: u32, block: &[MonthlyResult]) -> Option<YearSummary> {
    let first = block.first()?;
    let last = block.last()?;

    let total_income: Money = block.iter().map(|m| m.cashflow.income.total).sum();
    let total_expenses: Money = block.iter().map(|m| m.cashflow.expenses.total).sum();
    let total_interest: Money = block.iter().map(|m| m.monthly_interest).sum();

    Some(YearSummary {
        year,
        months: block.len() as u32,
        start_balance: first.cash_balance,
        end_balance: last.cash_balance,
        total_income,
        total_expenses,
        net_cashflow: total_income - total_expenses,
        total_interest,
        net_worth: last.net_worth,
        property_value: last.property_value,
        real_net_worth: last.real_net_worth,
    })
}
