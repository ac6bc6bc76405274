use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Percent};

/// A planned disposal of a property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedSale {
    /// 1-based projection year in which the sale takes effect.
    pub year: u32,
    /// Sale price, credited to cash in full (no capital-gains tax).
    pub price: Money,
}

/// A rented-out property held by the household.
///
/// Only `id` is required; every numeric field left out of the input record
/// counts as zero and AfA is off unless `afa_active` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    /// Contractual monthly cold rent
    #[serde(default)]
    pub monthly_rent: Money,
    /// Share of rent lost to vacancy, 0..=100
    #[serde(default)]
    pub vacancy_rate: Percent,
    #[serde(default)]
    pub annual_maintenance: Money,
    /// Market value at the start of the projection
    #[serde(default)]
    pub current_value: Money,
    #[serde(default)]
    pub afa_active: bool,
    /// Linear depreciation rate per year
    #[serde(default)]
    pub afa_rate: Percent,
    /// Years of depreciation left. `None` means not tracked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub afa_remaining_years: Option<i32>,
    #[serde(default)]
    pub purchase_price: Money,
    /// Land share of the purchase price; not depreciable
    #[serde(default)]
    pub land_value: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planned_sale: Option<PlannedSale>,
}

impl Property {
    /// A property with the given id and every other field zeroed.
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            monthly_rent: Decimal::ZERO,
            vacancy_rate: Decimal::ZERO,
            annual_maintenance: Decimal::ZERO,
            current_value: Decimal::ZERO,
            afa_active: false,
            afa_rate: Decimal::ZERO,
            afa_remaining_years: None,
            purchase_price: Decimal::ZERO,
            land_value: Decimal::ZERO,
            planned_sale: None,
        }
    }

    /// Depreciable building share of the purchase price, never negative.
    pub fn building_value(&self) -> Money {
        (self.purchase_price - self.land_value).max(Decimal::ZERO)
    }
}
