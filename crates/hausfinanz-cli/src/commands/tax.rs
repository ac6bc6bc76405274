use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use hausfinanz_core::tax::health_insurance::{
    health_insurance_contribution, DEFAULT_ADDITIONAL_RATE, GENERAL_RATE, MAX_ASSESSMENT_BASE,
    MIN_ASSESSMENT_BASE,
};
use hausfinanz_core::tax::income_tax::{income_tax, solidarity_surcharge};
use hausfinanz_core::types::{ratio_or_zero, round_cents, with_metadata};

/// Arguments for the income tax calculation
#[derive(Args)]
pub struct TaxArgs {
    /// Annual taxable income (zvE) in EUR
    #[arg(long, allow_hyphen_values = true)]
    pub taxable_income: Decimal,
}

pub fn run_tax(args: TaxArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut warnings = Vec::new();
    if args.taxable_income < Decimal::ZERO {
        warnings.push(format!(
            "Taxable income {} is negative; treated as 0",
            args.taxable_income
        ));
    }

    let tax = income_tax(args.taxable_income);
    let soli = solidarity_surcharge(tax);
    let total = tax + soli;
    let average_rate = ratio_or_zero(total, args.taxable_income.max(Decimal::ZERO)) * Decimal::ONE_HUNDRED;

    let output = with_metadata(
        "German income tax tariff (§32a EStG 2024/2025) with solidarity surcharge",
        &json!({ "taxable_income": args.taxable_income.to_string() }),
        warnings,
        json!({
            "income_tax": tax,
            "solidarity_surcharge": round_cents(soli),
            "total_tax": round_cents(total),
            "monthly_tax": round_cents(total / Decimal::from(12)),
            "average_rate_pct": round_cents(average_rate),
        }),
    );
    Ok(serde_json::to_value(output)?)
}

/// Arguments for the statutory health insurance contribution
#[derive(Args)]
pub struct HealthInsuranceArgs {
    /// Monthly gross income in EUR
    #[arg(long, allow_hyphen_values = true)]
    pub monthly_income: Decimal,

    /// Additional contribution rate of the insurer in percent
    #[arg(long, default_value_t = DEFAULT_ADDITIONAL_RATE)]
    pub additional_rate: Decimal,
}

pub fn run_health_insurance(args: HealthInsuranceArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let assessment_base = args
        .monthly_income
        .clamp(MIN_ASSESSMENT_BASE, MAX_ASSESSMENT_BASE);
    let mut warnings = Vec::new();
    if assessment_base != args.monthly_income {
        warnings.push(format!(
            "Income {} outside the assessment band; contribution assessed on {}",
            args.monthly_income, assessment_base
        ));
    }

    let contribution = health_insurance_contribution(args.monthly_income, args.additional_rate);
    let output = with_metadata(
        "GKV contribution: general plus additional rate on the clamped assessment base",
        &json!({
            "general_rate": GENERAL_RATE.to_string(),
            "additional_rate": args.additional_rate.to_string(),
        }),
        warnings,
        json!({
            "contribution": contribution,
            "assessment_base": assessment_base,
            "total_rate_pct": GENERAL_RATE + args.additional_rate,
        }),
    );
    Ok(serde_json::to_value(output)?)
}
