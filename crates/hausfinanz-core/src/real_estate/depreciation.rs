use rust_decimal::Decimal;

use crate::real_estate::property::Property;
use crate::types::{round_currency, Money};

/// Annual linear building depreciation (AfA) for a property.
///
/// Zero when AfA is switched off or the remaining years are exhausted. The
/// base is purchase price minus land value, floored at zero, so a land value
/// above the purchase price never yields negative depreciation.
pub fn annual_depreciation(property: &Property) -> Money {
    if !property.afa_active {
        return Decimal::ZERO;
    }
    if property.afa_remaining_years.is_some_and(|years| years <= 0) {
        return Decimal::ZERO;
    }

    let amount = round_currency(property.building_value() * property.afa_rate / Decimal::ONE_HUNDRED);
    amount.max(Decimal::ZERO)
}

/// Depreciation for a given 0-based projection year, optionally stopping once
/// the property's remaining AfA years have run out.
pub fn depreciation_in_year(property: &Property, year_index: u32, enforce_countdown: bool) -> Money {
    if enforce_countdown {
        if let Some(remaining) = property.afa_remaining_years {
            if i64::from(year_index) >= i64::from(remaining) {
                return Decimal::ZERO;
            }
        }
    }
    annual_depreciation(property)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn flat() -> Property {
        let mut property = Property::new(1, "Wohnung Musterstraße");
        property.afa_active = true;
        property.afa_rate = dec!(2);
        property.afa_remaining_years = Some(15);
        property.purchase_price = dec!(200000);
        property.land_value = dec!(50000);
        property
    }

    #[test]
    fn test_depreciation_on_building_share() {
        // (200000 - 50000) * 2 % = 3000
        assert_eq!(annual_depreciation(&flat()), dec!(3000));
    }

    #[test]
    fn test_inactive_afa_is_zero_regardless_of_fields() {
        let mut property = flat();
        property.afa_active = false;
        assert_eq!(annual_depreciation(&property), Decimal::ZERO);
    }

    #[test]
    fn test_exhausted_remaining_years_is_zero() {
        let mut property = flat();
        property.afa_remaining_years = Some(0);
        assert_eq!(annual_depreciation(&property), Decimal::ZERO);
        property.afa_remaining_years = Some(-2);
        assert_eq!(annual_depreciation(&property), Decimal::ZERO);
    }

    #[test]
    fn test_untracked_remaining_years_does_not_gate() {
        let mut property = flat();
        property.afa_remaining_years = None;
        assert_eq!(annual_depreciation(&property), dec!(3000));
    }

    #[test]
    fn test_land_above_purchase_price_is_zero_not_negative() {
        let mut property = flat();
        property.land_value = dec!(250000);
        assert_eq!(annual_depreciation(&property), Decimal::ZERO);
    }

    #[test]
    fn test_rounds_to_whole_euros() {
        let mut property = flat();
        property.afa_rate = dec!(2.5);
        property.purchase_price = dec!(123457);
        property.land_value = Decimal::ZERO;
        // 123457 * 2.5 % = 3086.425
        assert_eq!(annual_depreciation(&property), dec!(3086));
    }

    #[test]
    fn test_countdown_only_when_enforced() {
        let property = flat();
        assert_eq!(depreciation_in_year(&property, 14, true), dec!(3000));
        assert_eq!(depreciation_in_year(&property, 15, true), Decimal::ZERO);
        assert_eq!(depreciation_in_year(&property, 15, false), dec!(3000));
    }
}
