use clap::Args;
use serde_json::{json, Value};

use hausfinanz_core::household::snapshot::validate_property;
use hausfinanz_core::real_estate::cashflow::{property_cashflow, property_yield};
use hausfinanz_core::real_estate::depreciation::annual_depreciation;
use hausfinanz_core::real_estate::property::Property;
use hausfinanz_core::types::with_metadata;

use crate::input;

/// Arguments for the single-property analysis
#[derive(Args)]
pub struct PropertyArgs {
    /// Path to a JSON or YAML property record (stdin is read when omitted)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_property(args: PropertyArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let property: Property = input::load(args.input.as_deref())?
        .ok_or("--input <file> or stdin required for property analysis")?;

    let mut warnings = Vec::new();
    validate_property(&property, &mut warnings)?;

    let cashflow = property_cashflow(&property);
    let yields = property_yield(&property);
    let output = with_metadata(
        "Monthly property cashflow after vacancy, yields on current value, linear AfA",
        &json!({ "id": property.id, "name": property.name }),
        warnings,
        json!({
            "gross_rent": cashflow.gross_rent,
            "effective_rent": cashflow.effective_rent,
            "maintenance": cashflow.maintenance,
            "net_cashflow": cashflow.net_cashflow,
            "monthly_afa": cashflow.afa,
            "annual_afa": annual_depreciation(&property),
            "building_value": property.building_value(),
            "gross_yield_pct": yields.gross_yield,
            "net_yield_pct": yields.net_yield,
        }),
    );
    Ok(serde_json::to_value(output)?)
}
