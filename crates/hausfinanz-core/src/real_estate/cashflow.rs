use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::real_estate::depreciation::annual_depreciation;
use crate::real_estate::property::Property;
use crate::types::{ratio_or_zero, Money, Percent};

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Monthly cashflow view of a single property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyCashflow {
    pub gross_rent: Money,
    /// Rent after vacancy loss
    pub effective_rent: Money,
    pub maintenance: Money,
    /// Monthly share of AfA. Tax-relevant only, not part of `net_cashflow`.
    pub afa: Money,
    pub net_cashflow: Money,
}

/// Gross and net rental yield in percent per year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyYield {
    pub gross_yield: Percent,
    pub net_yield: Percent,
}

/// Monthly rent, maintenance and depreciation of a property.
pub fn property_cashflow(property: &Property) -> PropertyCashflow {
    let vacancy_share = property.vacancy_rate / Decimal::ONE_HUNDRED;
    let effective_rent = property.monthly_rent * (Decimal::ONE - vacancy_share);
    let maintenance = property.annual_maintenance / MONTHS_PER_YEAR;
    let afa = annual_depreciation(property) / MONTHS_PER_YEAR;

    PropertyCashflow {
        gross_rent: property.monthly_rent,
        effective_rent,
        maintenance,
        afa,
        net_cashflow: effective_rent - maintenance,
    }
}

/// Rental yields relative to the property's current value; zero when the
/// value is zero.
pub fn property_yield(property: &Property) -> PropertyYield {
    let cashflow = property_cashflow(property);
    let annual_gross = property.monthly_rent * MONTHS_PER_YEAR;
    let annual_net = cashflow.net_cashflow * MONTHS_PER_YEAR;

    PropertyYield {
        gross_yield: ratio_or_zero(annual_gross, property.current_value) * Decimal::ONE_HUNDRED,
        net_yield: ratio_or_zero(annual_net, property.current_value) * Decimal::ONE_HUNDRED,
    }
}
