use std::collections::HashSet;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::PlannerError;
use crate::real_estate::property::Property;
use crate::types::{Money, Percent};
use crate::PlannerResult;

/// Upper bound for growth, inflation and savings rates, keeping 50-year
/// compounding inside Decimal range.
pub const MAX_ANNUAL_RATE: Percent = dec!(50);
/// Lower bound for growth and inflation rates. A 50-year deflator of
/// `0.5^49` still divides into any bounded balance.
pub const MIN_ANNUAL_RATE: Percent = dec!(-50);
/// Ceiling for every entered money amount (one trillion EUR).
pub const MAX_AMOUNT: Money = dec!(1000000000000);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// An income or expense that fires exactly once, in the month whose index
/// equals `month_index`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneTimeEvent {
    #[serde(alias = "month")]
    pub month_index: u32,
    pub amount: Money,
    #[serde(default)]
    pub label: String,
}

/// Recurring monthly income plus one-off inflows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Income {
    #[serde(default)]
    pub pension: Money,
    #[serde(default)]
    pub other_income: Money,
    #[serde(default)]
    pub one_time: Vec<OneTimeEvent>,
}

/// Recurring monthly expenses plus one-off outflows. Health insurance and
/// tax are derived, not entered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Expenses {
    #[serde(default)]
    pub housing: Money,
    #[serde(default)]
    pub other_insurance: Money,
    #[serde(default)]
    pub groceries: Money,
    #[serde(default)]
    pub leisure: Money,
    #[serde(default)]
    pub one_time: Vec<OneTimeEvent>,
}

/// Macro assumptions, all rates in percent per year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Assumptions {
    pub inflation_rate: Percent,
    pub savings_return: Percent,
    pub income_growth_rate: Percent,
    pub expense_growth_rate: Percent,
    pub property_value_growth: Percent,
    /// Flat deductions from taxable income per year (Werbungskosten etc.)
    pub annual_deductions: Money,
    /// Stop AfA once a property's `afa_remaining_years` have elapsed.
    pub limit_afa_to_remaining_years: bool,
}

impl Default for Assumptions {
    fn default() -> Self {
        Self {
            inflation_rate: dec!(2.5),
            savings_return: dec!(3.0),
            income_growth_rate: dec!(1.5),
            expense_growth_rate: dec!(2.0),
            property_value_growth: dec!(2.0),
            annual_deductions: dec!(1000),
            limit_afa_to_remaining_years: false,
        }
    }
}

/// Everything the engine needs for one projection. Never mutated by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSnapshot {
    #[serde(default)]
    pub initial_cash: Money,
    #[serde(default)]
    pub income: Income,
    #[serde(default)]
    pub expenses: Expenses,
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub assumptions: Assumptions,
}

impl InputSnapshot {
    /// Reference household: a pensioner with some side income and one
    /// rented-out flat.
    pub fn sample() -> Self {
        let flat = Property {
            id: 1,
            name: "Wohnung Musterstraße".into(),
            monthly_rent: dec!(1200),
            vacancy_rate: dec!(5),
            annual_maintenance: dec!(2400),
            current_value: dec!(250000),
            afa_active: true,
            afa_rate: dec!(2),
            afa_remaining_years: Some(15),
            purchase_price: dec!(200000),
            land_value: dec!(50000),
            planned_sale: None,
        };

        Self {
            initial_cash: dec!(50000),
            income: Income {
                pension: dec!(1800),
                other_income: dec!(500),
                one_time: Vec::new(),
            },
            expenses: Expenses {
                housing: dec!(800),
                other_insurance: dec!(200),
                groceries: dec!(400),
                leisure: dec!(300),
                one_time: Vec::new(),
            },
            properties: vec![flat],
            assumptions: Assumptions::default(),
        }
    }

    /// Parse a snapshot from a JSON document.
    pub fn from_json(json: &str) -> PlannerResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate the snapshot once, before any month is computed.
    ///
    /// Hard violations are returned as errors; soft oddities that the engine
    /// can absorb are appended to `warnings`.
    pub fn validate(&self, warnings: &mut Vec<String>) -> PlannerResult<()> {
        require_non_negative("income.pension", self.income.pension)?;
        require_non_negative("income.other_income", self.income.other_income)?;
        require_non_negative("expenses.housing", self.expenses.housing)?;
        require_non_negative("expenses.other_insurance", self.expenses.other_insurance)?;
        require_non_negative("expenses.groceries", self.expenses.groceries)?;
        require_non_negative("expenses.leisure", self.expenses.leisure)?;

        require_amount("initial_cash", self.initial_cash.abs())?;

        for (idx, event) in self.income.one_time.iter().enumerate() {
            require_non_negative(&format!("income.one_time[{idx}].amount"), event.amount)?;
        }
        for (idx, event) in self.expenses.one_time.iter().enumerate() {
            require_non_negative(&format!("expenses.one_time[{idx}].amount"), event.amount)?;
        }

        self.assumptions.validate()?;

        let mut seen = HashSet::with_capacity(self.properties.len());
        for property in &self.properties {
            if !seen.insert(property.id) {
                return Err(PlannerError::DataError(format!(
                    "duplicate property id {}",
                    property.id
                )));
            }
            validate_property(property, warnings)?;
        }

        if self.initial_cash < Decimal::ZERO {
            warnings.push(format!(
                "Initial cash is negative ({}); interest is charged at the savings rate",
                self.initial_cash
            ));
        }

        Ok(())
    }
}

impl Assumptions {
    pub fn validate(&self) -> PlannerResult<()> {
        require_growth_rate("assumptions.inflation_rate", self.inflation_rate)?;
        require_growth_rate("assumptions.income_growth_rate", self.income_growth_rate)?;
        require_growth_rate("assumptions.expense_growth_rate", self.expense_growth_rate)?;
        require_growth_rate("assumptions.property_value_growth", self.property_value_growth)?;
        if self.savings_return < Decimal::ZERO || self.savings_return > MAX_ANNUAL_RATE {
            return Err(PlannerError::InvalidInput {
                field: "assumptions.savings_return".into(),
                reason: format!(
                    "must be between 0 and {MAX_ANNUAL_RATE} percent (got {})",
                    self.savings_return
                ),
            });
        }
        require_non_negative("assumptions.annual_deductions", self.annual_deductions)?;
        Ok(())
    }
}

/// Field-level checks for a single property record.
pub fn validate_property(property: &Property, warnings: &mut Vec<String>) -> PlannerResult<()> {
    let field = |name: &str| format!("properties[{}].{name}", property.id);

    require_non_negative(&field("monthly_rent"), property.monthly_rent)?;
    require_percent_range(&field("vacancy_rate"), property.vacancy_rate)?;
    require_non_negative(&field("annual_maintenance"), property.annual_maintenance)?;
    require_non_negative(&field("current_value"), property.current_value)?;
    require_percent_range(&field("afa_rate"), property.afa_rate)?;
    require_non_negative(&field("purchase_price"), property.purchase_price)?;
    require_non_negative(&field("land_value"), property.land_value)?;

    if let Some(sale) = &property.planned_sale {
        if sale.year == 0 {
            return Err(PlannerError::InvalidInput {
                field: field("planned_sale.year"),
                reason: "Sale year is 1-based and must be at least 1".into(),
            });
        }
        require_non_negative(&field("planned_sale.price"), sale.price)?;
    }

    if property.land_value > property.purchase_price {
        warnings.push(format!(
            "Property {} ('{}'): land value {} exceeds purchase price {}; depreciation base set to 0",
            property.id, property.name, property.land_value, property.purchase_price
        ));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Non-negative money amount no larger than [`MAX_AMOUNT`].
fn require_non_negative(field: &str, value: Decimal) -> PlannerResult<()> {
    if value < Decimal::ZERO {
        return Err(PlannerError::InvalidInput {
            field: field.into(),
            reason: format!("must be >= 0 (got {value})"),
        });
    }
    require_amount(field, value)
}

fn require_amount(field: &str, value: Decimal) -> PlannerResult<()> {
    if value > MAX_AMOUNT {
        return Err(PlannerError::InvalidInput {
            field: field.into(),
            reason: format!("must not exceed {MAX_AMOUNT} (got {value})"),
        });
    }
    Ok(())
}

fn require_percent_range(field: &str, value: Percent) -> PlannerResult<()> {
    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        return Err(PlannerError::InvalidInput {
            field: field.into(),
            reason: format!("must be between 0 and 100 percent (got {value})"),
        });
    }
    Ok(())
}

fn require_growth_rate(field: &str, value: Percent) -> PlannerResult<()> {
    if value < MIN_ANNUAL_RATE || value > MAX_ANNUAL_RATE {
        return Err(PlannerError::InvalidInput {
            field: field.into(),
            reason: format!(
                "must be between {MIN_ANNUAL_RATE} and {MAX_ANNUAL_RATE} percent (got {value})"
            ),
        });
    }
    Ok(())
}
