use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::{round_cents, Money, Percent};

/// Minimum monthly assessment base for voluntary GKV members (2024).
pub const MIN_ASSESSMENT_BASE: Money = dec!(1131.67);
/// Monthly contribution ceiling (Beitragsbemessungsgrenze 2024).
pub const MAX_ASSESSMENT_BASE: Money = dec!(5175.00);
/// General contribution rate in percent.
pub const GENERAL_RATE: Percent = dec!(14.6);
/// Average additional contribution rate in percent.
pub const DEFAULT_ADDITIONAL_RATE: Percent = dec!(1.3);

/// Monthly statutory health insurance contribution.
///
/// The monthly gross income is clamped into the assessment band before the
/// general and additional rates are applied; the result is rounded to cents.
pub fn health_insurance_contribution(
    monthly_gross_income: Money,
    additional_rate: Percent,
) -> Money {
    let assessment_base = monthly_gross_income.clamp(MIN_ASSESSMENT_BASE, MAX_ASSESSMENT_BASE);
    let total_rate = GENERAL_RATE + additional_rate;
    round_cents(assessment_base * total_rate / Decimal::ONE_HUNDRED)
}

/// Contribution at the average additional rate.
pub fn health_insurance_contribution_default(monthly_gross_income: Money) -> Money {
    health_insurance_contribution(monthly_gross_income, DEFAULT_ADDITIONAL_RATE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_contribution_inside_band() {
        // 2300 * 15.9 % = 365.70
        assert_eq!(health_insurance_contribution_default(dec!(2300)), dec!(365.70));
    }

    #[test]
    fn test_contribution_floor_and_ceiling() {
        // 1131.67 * 0.159 = 179.93553
        assert_eq!(health_insurance_contribution_default(Decimal::ZERO), dec!(179.94));
        assert_eq!(health_insurance_contribution_default(dec!(-100)), dec!(179.94));
        // 5175 * 0.159 = 822.825
        assert_eq!(health_insurance_contribution_default(dec!(5175)), dec!(822.83));
        assert_eq!(health_insurance_contribution_default(dec!(12000)), dec!(822.83));
    }

    #[test]
    fn test_custom_additional_rate() {
        // 2000 * (14.6 + 2.5) % = 342.00
        assert_eq!(health_insurance_contribution(dec!(2000), dec!(2.5)), dec!(342));
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_constant_below_minimum(cents in 0i64..=113_167) {
            let income = Decimal::new(cents, 2);
            prop_assert_eq!(
                health_insurance_contribution_default(income),
                health_insurance_contribution_default(MIN_ASSESSMENT_BASE)
            );
        }

        #[test]
        fn prop_constant_above_ceiling(extra in 0i64..1_000_000) {
            let income = MAX_ASSESSMENT_BASE + Decimal::from(extra);
            prop_assert_eq!(
                health_insurance_contribution_default(income),
                health_insurance_contribution_default(MAX_ASSESSMENT_BASE)
            );
        }

        #[test]
        fn prop_increasing_inside_band(low in 1132i64..5100, step in 10i64..70) {
            // Steps of at least 10 EUR move the contribution by more than a cent.
            let lower = health_insurance_contribution_default(Decimal::from(low));
            let higher = health_insurance_contribution_default(Decimal::from(low + step));
            prop_assert!(higher > lower);
        }
    }
}
