use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::household::snapshot::{InputSnapshot, OneTimeEvent};
use crate::real_estate::cashflow::property_cashflow;
use crate::real_estate::depreciation::depreciation_in_year;
use crate::tax::health_insurance::health_insurance_contribution_default;
use crate::tax::income_tax::{income_tax, solidarity_surcharge};
use crate::types::{growth_factor, Money};

const MONTHS_PER_YEAR: Decimal = dec!(12);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeBreakdown {
    pub pension: Money,
    pub other_income: Money,
    pub property_income: Money,
    pub one_time: Money,
    pub total: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseBreakdown {
    pub housing: Money,
    pub health_insurance: Money,
    pub other_insurance: Money,
    pub groceries: Money,
    pub leisure: Money,
    pub property_maintenance: Money,
    pub one_time: Money,
    /// Monthly share of annual income tax plus Soli
    pub tax: Money,
    pub total: Money,
}

/// Annual tax figures the monthly charge is derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    pub taxable_income: Money,
    pub income_tax: Money,
    pub soli_tax: Money,
    pub monthly_total: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashflowDetails {
    /// Sum of monthly AfA across properties (not grown)
    pub total_property_afa: Money,
    /// Recurring gross income the GKV contribution is assessed on
    pub effective_gross_income: Money,
}

/// Income, expense and tax breakdown of one projection month, before running
/// balances are applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyCashflow {
    pub month_index: u32,
    /// 1-based projection year
    pub year: u32,
    pub income: IncomeBreakdown,
    pub expenses: ExpenseBreakdown,
    pub tax: TaxBreakdown,
    pub net_cashflow: Money,
    pub inflation_factor: Decimal,
    pub details: CashflowDetails,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Compute the full income/expense/tax breakdown for one month.
///
/// Growth factors step once per 12-month block. One-time events are taken
/// verbatim, AfA is never grown, and the tax is the annualised recurring
/// income less maintenance, AfA and flat deductions, spread over 12 months.
pub fn monthly_cashflow(snapshot: &InputSnapshot, month_index: u32) -> MonthlyCashflow {
    let year_index = month_index / 12;
    let assumptions = &snapshot.assumptions;

    let inflation_factor = growth_factor(assumptions.inflation_rate, year_index);
    let income_growth = growth_factor(assumptions.income_growth_rate, year_index);
    let expense_growth = growth_factor(assumptions.expense_growth_rate, year_index);

    // === Income ===
    let pension = snapshot.income.pension * income_growth;
    let other_income = snapshot.income.other_income * income_growth;

    let mut property_income = Decimal::ZERO;
    let mut property_maintenance = Decimal::ZERO;
    let mut property_afa = Decimal::ZERO;
    for property in &snapshot.properties {
        let cf = property_cashflow(property);
        property_income += cf.effective_rent * income_growth;
        property_maintenance += cf.maintenance * expense_growth;
        property_afa += depreciation_in_year(
            property,
            year_index,
            assumptions.limit_afa_to_remaining_years,
        ) / MONTHS_PER_YEAR;
    }

    let one_time_income = events_in_month(&snapshot.income.one_time, month_index);
    let recurring_income = pension + other_income + property_income;
    let total_income = recurring_income + one_time_income;

    // === Expenses ===
    let housing = snapshot.expenses.housing * expense_growth;
    let other_insurance = snapshot.expenses.other_insurance * expense_growth;
    let groceries = snapshot.expenses.groceries * expense_growth;
    let leisure = snapshot.expenses.leisure * expense_growth;
    let health_insurance = health_insurance_contribution_default(recurring_income);
    let one_time_expenses = events_in_month(&snapshot.expenses.one_time, month_index);

    let expenses_before_tax = housing
        + health_insurance
        + other_insurance
        + groceries
        + leisure
        + property_maintenance
        + one_time_expenses;

    // === Tax ===
    let annual_gross = recurring_income * MONTHS_PER_YEAR;
    let annual_deductible = property_maintenance * MONTHS_PER_YEAR
        + property_afa * MONTHS_PER_YEAR
        + assumptions.annual_deductions;
    let taxable_income = (annual_gross - annual_deductible).max(Decimal::ZERO);

    let annual_income_tax = income_tax(taxable_income);
    let annual_soli = solidarity_surcharge(annual_income_tax);
    let monthly_tax = (annual_income_tax + annual_soli) / MONTHS_PER_YEAR;
    let total_expenses = expenses_before_tax + monthly_tax;

    MonthlyCashflow {
        month_index,
        year: year_index + 1,
        income: IncomeBreakdown {
            pension,
            other_income,
            property_income,
            one_time: one_time_income,
            total: total_income,
        },
        expenses: ExpenseBreakdown {
            housing,
            health_insurance,
            other_insurance,
            groceries,
            leisure,
            property_maintenance,
            one_time: one_time_expenses,
            tax: monthly_tax,
            total: total_expenses,
        },
        tax: TaxBreakdown {
            taxable_income,
            income_tax: annual_income_tax,
            soli_tax: annual_soli,
            monthly_total: monthly_tax,
        },
        net_cashflow: total_income - total_expenses,
        inflation_factor,
        details: CashflowDetails {
            total_property_afa: property_afa,
            effective_gross_income: recurring_income,
        },
    }
}

fn events_in_month(events: &[OneTimeEvent], month_index: u32) -> Money {
    events
        .iter()
        .filter(|event| event.month_index == month_index)
        .map(|event| event.amount)
        .sum()
}
