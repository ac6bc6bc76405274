use rust_decimal::RoundingStrategy;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values (EUR). Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed in percent (2.5 = 2.5 %), as entered on the household forms.
pub type Percent = Decimal;

/// Standard computation output envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

/// Round to whole euros, half away from zero (tariff rounding).
pub fn round_currency(amount: Money) -> Money {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Round to cents, half away from zero.
pub fn round_cents(amount: Money) -> Money {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Compute (1 + pct/100)^n via iterative multiplication (avoids Decimal::powd drift).
pub fn growth_factor(rate: Percent, years: u32) -> Decimal {
    let factor = Decimal::ONE + rate / Decimal::ONE_HUNDRED;
    let mut result = Decimal::ONE;
    for _ in 0..years {
        result *= factor;
    }
    result
}

/// Divide, resolving a zero denominator to zero instead of failing.
pub fn ratio_or_zero(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        Decimal::ZERO
    } else {
        numerator / denominator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_currency_half_away_from_zero() {
        assert_eq!(round_currency(dec!(1025.5)), dec!(1026));
        assert_eq!(round_currency(dec!(1024.5)), dec!(1025));
        assert_eq!(round_currency(dec!(1025.38)), dec!(1025));
    }

    #[test]
    fn test_round_cents() {
        assert_eq!(round_cents(dec!(365.7)), dec!(365.70));
        assert_eq!(round_cents(dec!(179.93553)), dec!(179.94));
        assert_eq!(round_cents(dec!(0.005)), dec!(0.01));
    }

    #[test]
    fn test_growth_factor_steps_per_year() {
        assert_eq!(growth_factor(dec!(2), 0), Decimal::ONE);
        assert_eq!(growth_factor(dec!(2), 1), dec!(1.02));
        assert_eq!(growth_factor(dec!(2), 2), dec!(1.0404));
        assert_eq!(growth_factor(dec!(-50), 2), dec!(0.25));
    }

    #[test]
    fn test_ratio_or_zero_guards_zero_denominator() {
        assert_eq!(ratio_or_zero(dec!(10), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(ratio_or_zero(dec!(10), dec!(4)), dec!(2.5));
    }
}
