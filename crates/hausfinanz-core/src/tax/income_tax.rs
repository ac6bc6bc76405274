use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::{round_currency, Money};

// ---------------------------------------------------------------------------
// Tariff constants (§32a EStG, 2024/2025)
// ---------------------------------------------------------------------------

/// Basic tax-free allowance (Grundfreibetrag).
pub const BASIC_ALLOWANCE: Money = dec!(11604);
/// Upper edge of the first progression zone.
pub const ZONE_1_LIMIT: Money = dec!(17005);
/// Upper edge of the second progression zone.
pub const ZONE_2_LIMIT: Money = dec!(66760);
/// Upper edge of the 42 % proportional zone; above it the 45 % rate applies.
pub const ZONE_3_LIMIT: Money = dec!(277825);

/// Income tax amount up to which no solidarity surcharge is levied (Freigrenze).
pub const SOLI_EXEMPTION_LIMIT: Money = dec!(16956);
pub const SOLI_RATE: Decimal = dec!(0.055);
const SOLI_RELIEF_FACTOR: Decimal = dec!(0.2);

const TARIFF_STEP: Decimal = dec!(10000);

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Annual German income tax for a taxable income (zvE).
///
/// Piecewise tariff with four zones above the basic allowance. Each zone is
/// rounded to whole euros; the intermediate `y`/`z` factors are not rounded.
/// Negative taxable income is treated as zero.
pub fn income_tax(taxable_income: Money) -> Money {
    let zve = taxable_income.max(Decimal::ZERO);

    if zve <= BASIC_ALLOWANCE {
        return Decimal::ZERO;
    }

    if zve <= ZONE_1_LIMIT {
        let y = (zve - BASIC_ALLOWANCE) / TARIFF_STEP;
        return round_currency((dec!(922.98) * y + dec!(1400)) * y);
    }

    if zve <= ZONE_2_LIMIT {
        let z = (zve - ZONE_1_LIMIT) / TARIFF_STEP;
        return round_currency((dec!(181.19) * z + dec!(2397)) * z + dec!(1025.38));
    }

    if zve <= ZONE_3_LIMIT {
        return round_currency(dec!(0.42) * zve - dec!(10602.13));
    }

    round_currency(dec!(0.45) * zve - dec!(18936.88))
}

/// Annual solidarity surcharge on an annual income tax amount.
///
/// Zero up to the exemption limit, then 5.5 % of the tax less a fixed relief
/// of 20 % of the surcharge the exemption limit itself would carry. Not rounded.
pub fn solidarity_surcharge(income_tax: Money) -> Money {
    if income_tax <= SOLI_EXEMPTION_LIMIT {
        return Decimal::ZERO;
    }

    let relief = SOLI_EXEMPTION_LIMIT * SOLI_RATE * SOLI_RELIEF_FACTOR;
    (income_tax * SOLI_RATE - relief).max(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ZONE_EDGES: [Decimal; 4] = [BASIC_ALLOWANCE, ZONE_1_LIMIT, ZONE_2_LIMIT, ZONE_3_LIMIT];

    #[test]
    fn test_negative_and_zero_income_pay_no_tax() {
        assert_eq!(income_tax(dec!(-5000)), Decimal::ZERO);
        assert_eq!(income_tax(Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_basic_allowance_edge() {
        assert_eq!(income_tax(dec!(11604)), Decimal::ZERO);
        // One euro above the allowance the raw tariff is 0.14, which rounds to zero.
        assert_eq!(income_tax(dec!(11605)), Decimal::ZERO);
        assert_eq!(income_tax(dec!(11700)), dec!(14));
    }

    #[test]
    fn test_zone_known_answers() {
        // y = 0.4396 => (922.98 * 0.4396 + 1400) * 0.4396 = 793.8 => 794
        assert_eq!(income_tax(dec!(16000)), dec!(794));
        // z = 1.2995 => (181.19 * 1.2995 + 2397) * 1.2995 + 1025.38 = 4446.26 => 4446
        assert_eq!(income_tax(dec!(30000)), dec!(4446));
        // 0.42 * 100000 - 10602.13 = 31397.87
        assert_eq!(income_tax(dec!(100000)), dec!(31398));
        // 0.45 * 300000 - 18936.88 = 116063.12
        assert_eq!(income_tax(dec!(300000)), dec!(116063));
    }

    #[test]
    fn test_tariff_is_continuous_at_zone_edges() {
        for edge in ZONE_EDGES {
            let below = income_tax(edge);
            let above = income_tax(edge + Decimal::ONE);
            assert!(
                (above - below).abs() <= Decimal::ONE,
                "Jump of {} at zone edge {}",
                above - below,
                edge
            );
        }
    }

    #[test]
    fn test_adjacent_formulas_agree_at_edges() {
        // Zone 1 evaluated at its upper edge matches zone 2's constant term.
        let y = (ZONE_1_LIMIT - BASIC_ALLOWANCE) / TARIFF_STEP;
        let zone_1 = round_currency((dec!(922.98) * y + dec!(1400)) * y);
        assert_eq!(zone_1, round_currency(dec!(1025.38)));

        // Zone 3 and zone 4 meet exactly at 277825.
        let zone_3 = dec!(0.42) * ZONE_3_LIMIT - dec!(10602.13);
        let zone_4 = dec!(0.45) * ZONE_3_LIMIT - dec!(18936.88);
        assert_eq!(zone_3, zone_4);
    }

    #[test]
    fn test_soli_zero_up_to_exemption_limit() {
        assert_eq!(solidarity_surcharge(Decimal::ZERO), Decimal::ZERO);
        assert_eq!(solidarity_surcharge(dec!(16956)), Decimal::ZERO);
    }

    #[test]
    fn test_soli_above_exemption_limit() {
        // 20000 * 0.055 - 16956 * 0.055 * 0.2 = 1100 - 186.516
        assert_eq!(solidarity_surcharge(dec!(20000)), dec!(913.484));
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_income_tax_is_non_decreasing(base in 0i64..400_000, step in 1i64..5_000) {
            let lower = income_tax(Decimal::from(base));
            let higher = income_tax(Decimal::from(base + step));
            prop_assert!(higher >= lower);
        }

        #[test]
        fn prop_soli_is_non_decreasing(base in 0i64..200_000, step in 1i64..5_000) {
            let lower = solidarity_surcharge(Decimal::from(base));
            let higher = solidarity_surcharge(Decimal::from(base + step));
            prop_assert!(higher >= lower);
        }

        #[test]
        fn prop_soli_zero_below_limit(tax in 0i64..=16_956) {
            prop_assert_eq!(solidarity_surcharge(Decimal::from(tax)), Decimal::ZERO);
        }
    }
}
