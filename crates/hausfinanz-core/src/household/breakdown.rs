use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::household::monthly::ExpenseBreakdown;
use crate::types::{ratio_or_zero, Money, Percent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Housing,
    HealthInsurance,
    OtherInsurance,
    Groceries,
    Leisure,
    PropertyMaintenance,
    Tax,
}

impl ExpenseCategory {
    pub fn label(self) -> &'static str {
        match self {
            ExpenseCategory::Housing => "Wohnen",
            ExpenseCategory::HealthInsurance => "GKV",
            ExpenseCategory::OtherInsurance => "Versicherungen",
            ExpenseCategory::Groceries => "Lebensmittel",
            ExpenseCategory::Leisure => "Freizeit",
            ExpenseCategory::PropertyMaintenance => "Immobilien",
            ExpenseCategory::Tax => "Steuern",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseShare {
    pub category: ExpenseCategory,
    pub amount: Money,
    /// Share of the recurring expense total in percent
    pub share: Percent,
}

/// Split a month's recurring expenses into the seven display categories.
///
/// One-time expenses are left out so the split describes the steady state.
pub fn expense_breakdown(expenses: &ExpenseBreakdown) -> Vec<ExpenseShare> {
    let items = [
        (ExpenseCategory::Housing, expenses.housing),
        (ExpenseCategory::HealthInsurance, expenses.health_insurance),
        (ExpenseCategory::OtherInsurance, expenses.other_insurance),
        (ExpenseCategory::Groceries, expenses.groceries),
        (ExpenseCategory::Leisure, expenses.leisure),
        (ExpenseCategory::PropertyMaintenance, expenses.property_maintenance),
        (ExpenseCategory::Tax, expenses.tax),
    ];
    let total: Money = items.iter().map(|(_, amount)| *amount).sum();

    items
        .into_iter()
        .map(|(category, amount)| ExpenseShare {
            category,
            amount,
            share: ratio_or_zero(amount, total) * Decimal::ONE_HUNDRED,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn expenses(tax: Money) -> ExpenseBreakdown {
        ExpenseBreakdown {
            housing: dec!(800),
            health_insurance: dec!(300),
            other_insurance: dec!(200),
            groceries: dec!(400),
            leisure: dec!(300),
            property_maintenance: Decimal::ZERO,
            one_time: dec!(9999),
            tax,
            total: Decimal::ZERO,
        }
    }

    #[test]
    fn test_shares_of_recurring_expenses() {
        let shares = expense_breakdown(&expenses(Decimal::ZERO));
        assert_eq!(shares.len(), 7);
        assert_eq!(shares[0].category, ExpenseCategory::Housing);
        // 800 / 2000
        assert_eq!(shares[0].share, dec!(40));
        assert_eq!(shares[6].share, Decimal::ZERO);
    }

    #[test]
    fn test_empty_month_has_zero_shares() {
        let empty = ExpenseBreakdown {
            housing: Decimal::ZERO,
            health_insurance: Decimal::ZERO,
            other_insurance: Decimal::ZERO,
            groceries: Decimal::ZERO,
            leisure: Decimal::ZERO,
            property_maintenance: Decimal::ZERO,
            one_time: Decimal::ZERO,
            tax: Decimal::ZERO,
            total: Decimal::ZERO,
        };
        assert!(expense_breakdown(&empty)
            .iter()
            .all(|s| s.share == Decimal::ZERO));
    }

    #[test]
    fn test_labels() {
        assert_eq!(ExpenseCategory::HealthInsurance.label(), "GKV");
        assert_eq!(ExpenseCategory::Tax.label(), "Steuern");
    }
}
