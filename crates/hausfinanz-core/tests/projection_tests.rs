use hausfinanz_core::household::projection::{project, CoverageUntil};
use hausfinanz_core::household::snapshot::{
    Assumptions, Expenses, Income, InputSnapshot, OneTimeEvent, MAX_AMOUNT,
};
use hausfinanz_core::real_estate::property::{PlannedSale, Property};
use hausfinanz_core::PlannerError;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Running balances mix in monthly tax shares with 28-digit scale, so sums
/// taken in a different order can differ in the last place.
fn assert_close(actual: Decimal, expected: Decimal) {
    assert!(
        (actual - expected).abs() < dec!(0.000001),
        "expected {expected}, got {actual}"
    );
}

fn pensioner_without_property() -> InputSnapshot {
    InputSnapshot {
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
        properties: Vec::new(),
        assumptions: Assumptions {
            inflation_rate: dec!(2.5),
            savings_return: dec!(3.0),
            income_growth_rate: dec!(1.5),
            expense_growth_rate: dec!(2.0),
            property_value_growth: dec!(2.0),
            annual_deductions: dec!(1000),
            limit_afa_to_remaining_years: false,
        },
    }
}

// ===========================================================================
// End-to-end
// ===========================================================================

#[test]
fn test_first_year_of_pensioner_household() {
    let output = project(&pensioner_without_property(), 12).unwrap();
    let projection = output.result;
    assert_eq!(projection.monthly_results.len(), 12);

    let first = &projection.monthly_results[0];
    assert_eq!(first.cashflow.income.total, dec!(2300));
    assert_eq!(first.cashflow.expenses.housing, dec!(800));
    assert_eq!(first.cashflow.expenses.health_insurance, dec!(365.70));

    let expected_cash = dec!(50000) + first.cashflow.net_cashflow + dec!(50000) * dec!(0.0025);
    assert_eq!(first.cash_balance, expected_cash);
    assert_eq!(first.net_worth, first.cash_balance);
    assert_eq!(first.real_net_worth, first.net_worth);
}

#[test]
fn test_summary_totals_match_series() {
    let projection = project(&InputSnapshot::sample(), 24).unwrap().result;
    let total_net: Decimal = projection
        .monthly_results
        .iter()
        .map(|m| m.cashflow.net_cashflow)
        .sum();

    assert_eq!(projection.summary.total_months, 24);
    assert_close(projection.summary.total_net_cashflow, total_net);
    assert_eq!(
        projection.summary.final_net_worth,
        projection.last().unwrap().net_worth
    );
    assert_eq!(projection.kpis.final_net_worth, projection.summary.final_net_worth);
    assert_eq!(projection.kpis.coverage_until_year, CoverageUntil::Beyond(2));
}

#[test]
fn test_envelope_carries_methodology_and_assumptions() {
    let output = project(&InputSnapshot::sample(), 12).unwrap();
    assert!(output.methodology.contains("German income tax"));
    assert_eq!(output.assumptions["horizon_months"], 12);
    assert!(output.warnings.is_empty());
}

// ===========================================================================
// Determinism and horizon prefix
// ===========================================================================

#[test]
fn test_projection_is_idempotent() {
    let snapshot = InputSnapshot::sample();
    let first = project(&snapshot, 120).unwrap();
    let second = project(&snapshot, 120).unwrap();
    assert_eq!(first, second);
    assert_eq!(snapshot, InputSnapshot::sample());
}

#[test]
fn test_longer_horizon_extends_without_changing_prefix() {
    let mut snapshot = InputSnapshot::sample();
    snapshot.properties[0].planned_sale = Some(PlannedSale {
        year: 3,
        price: dec!(270000),
    });
    snapshot.expenses.one_time.push(OneTimeEvent {
        month_index: 20,
        amount: dec!(12000),
        label: "Dach".into(),
    });

    let short = project(&snapshot, 30).unwrap().result;
    let long = project(&snapshot, 72).unwrap().result;
    assert_eq!(&short.monthly_results[..], &long.monthly_results[..30]);
}

// ===========================================================================
// One-time events
// ===========================================================================

#[test]
fn test_one_time_income_fires_once_unscaled() {
    let mut snapshot = pensioner_without_property();
    snapshot.income.one_time.push(OneTimeEvent {
        month_index: 6,
        amount: dec!(5000),
        label: "Erbschaft".into(),
    });
    let with_event = project(&snapshot, 24).unwrap().result;
    let without_event = project(&pensioner_without_property(), 24).unwrap().result;

    for (a, b) in with_event
        .monthly_results
        .iter()
        .zip(&without_event.monthly_results)
    {
        let expected = if a.cashflow.month_index == 6 { dec!(5000) } else { Decimal::ZERO };
        assert_eq!(a.cashflow.income.one_time, expected);
        assert_eq!(a.cashflow.income.total - b.cashflow.income.total, expected);
    }
}

#[test]
fn test_one_time_event_beyond_horizon_is_ignored() {
    let mut snapshot = pensioner_without_property();
    snapshot.income.one_time.push(OneTimeEvent {
        month_index: 500,
        amount: dec!(5000),
        label: String::new(),
    });
    let projection = project(&snapshot, 12).unwrap().result;
    let baseline = project(&pensioner_without_property(), 12).unwrap().result;
    assert_eq!(projection, baseline);
}

// ===========================================================================
// Properties
// ===========================================================================

#[test]
fn test_sale_credits_price_once() {
    let mut snapshot = InputSnapshot::sample();
    snapshot.assumptions.savings_return = Decimal::ZERO;
    snapshot.properties[0].planned_sale = Some(PlannedSale {
        year: 2,
        price: dec!(300000),
    });
    let projection = project(&snapshot, 36).unwrap().result;
    let months = &projection.monthly_results;

    let jump = months[12].cash_balance - months[11].cash_balance;
    assert_close(jump, months[12].cashflow.net_cashflow + dec!(300000));
    for m in &months[13..24] {
        assert_eq!(m.property_value, dec!(300000));
        let prev = &months[(m.cashflow.month_index - 1) as usize];
        assert_close(m.cash_balance - prev.cash_balance, m.cashflow.net_cashflow);
    }
}

#[test]
fn test_property_only_depreciation_is_not_cash() {
    let mut flat = Property::new(3, "Garage");
    flat.afa_active = true;
    flat.afa_rate = dec!(2);
    flat.purchase_price = dec!(60000);

    let mut with_afa = pensioner_without_property();
    with_afa.properties.push(flat.clone());
    flat.afa_active = false;
    let mut without_afa = pensioner_without_property();
    without_afa.properties.push(flat);

    let a = &project(&with_afa, 1).unwrap().result.monthly_results[0];
    let b = &project(&without_afa, 1).unwrap().result.monthly_results[0];
    assert_eq!(a.cashflow.income, b.cashflow.income);
    assert!(a.cashflow.tax.taxable_income < b.cashflow.tax.taxable_income);
    assert!(a.cash_balance > b.cash_balance);
}

// ===========================================================================
// Rejections
// ===========================================================================

#[test]
fn test_negative_rates_rejected() {
    let mut snapshot = InputSnapshot::sample();
    snapshot.assumptions.savings_return = dec!(-1);
    let err = project(&snapshot, 12).unwrap_err();
    assert!(matches!(err, PlannerError::InvalidInput { ref field, .. } if field == "assumptions.savings_return"));
}

/// Every accepted rate extreme either projects or is rejected; none panics.
#[test]
fn test_rate_extremes_at_longest_horizon() {
    type Setter = fn(&mut Assumptions, Decimal);
    let fields: [(&str, Setter, Decimal, Decimal); 5] = [
        ("inflation_rate", |a, v| a.inflation_rate = v, dec!(-50), dec!(50)),
        ("income_growth_rate", |a, v| a.income_growth_rate = v, dec!(-50), dec!(50)),
        ("expense_growth_rate", |a, v| a.expense_growth_rate = v, dec!(-50), dec!(50)),
        ("property_value_growth", |a, v| a.property_value_growth = v, dec!(-50), dec!(50)),
        ("savings_return", |a, v| a.savings_return = v, dec!(0), dec!(50)),
    ];

    for (name, set, low, high) in fields {
        for rate in [low, high] {
            let mut snapshot = InputSnapshot::sample();
            set(&mut snapshot.assumptions, rate);
            match project(&snapshot, 600) {
                Ok(output) => assert_eq!(output.result.monthly_results.len(), 600, "{name}={rate}"),
                Err(e) => assert!(matches!(e, PlannerError::InvalidInput { .. }), "{name}={rate}: {e}"),
            }
        }
    }
}

#[test]
fn test_deep_deflation_is_rejected_not_panicking() {
    let mut snapshot = InputSnapshot::sample();
    snapshot.initial_cash = MAX_AMOUNT;
    snapshot.assumptions.savings_return = dec!(50);
    snapshot.assumptions.inflation_rate = dec!(-50);
    assert!(matches!(
        project(&snapshot, 600),
        Err(PlannerError::InvalidInput { .. })
    ));

    snapshot.assumptions.inflation_rate = dec!(-99.9);
    assert!(matches!(
        project(&snapshot, 600),
        Err(PlannerError::InvalidInput { ref field, .. }) if field == "assumptions.inflation_rate"
    ));
}

#[test]
fn test_oversized_amounts_rejected_before_projection() {
    let mut snapshot = InputSnapshot::sample();
    snapshot.properties[0].current_value = Decimal::MAX;
    assert!(matches!(project(&snapshot, 12), Err(PlannerError::InvalidInput { .. })));

    let mut snapshot = InputSnapshot::sample();
    snapshot.income.one_time = vec![
        OneTimeEvent {
            month_index: 0,
            amount: Decimal::MAX,
            label: "Lotto".into(),
        };
        2
    ];
    assert!(matches!(project(&snapshot, 12), Err(PlannerError::InvalidInput { .. })));

    // Two events at the ceiling in the same month still project.
    snapshot.income.one_time.iter_mut().for_each(|e| e.amount = MAX_AMOUNT);
    let output = project(&snapshot, 1).unwrap();
    let first = &output.result.monthly_results[0];
    assert_eq!(first.cashflow.income.one_time, MAX_AMOUNT + MAX_AMOUNT);
}

#[test]
fn test_duplicate_property_ids_rejected() {
    let mut snapshot = InputSnapshot::sample();
    snapshot.properties.push(Property::new(1, "Zweitwohnung"));
    assert!(matches!(
        project(&snapshot, 12),
        Err(PlannerError::DataError(_))
    ));
}

#[test]
fn test_snapshot_from_json_with_partial_property() {
    let json = r#"{
        "initial_cash": "20000",
        "income": { "pension": "1500" },
        "expenses": { "housing": "600", "one_time": [{ "month": 2, "amount": "800" }] },
        "properties": [{ "id": 9, "monthly_rent": "500" }]
    }"#;
    let snapshot: InputSnapshot = serde_json::from_str(json).unwrap();
    assert_eq!(snapshot.assumptions, Assumptions::default());

    let projection = project(&snapshot, 3).unwrap().result;
    assert_eq!(projection.monthly_results[0].cashflow.income.property_income, dec!(500));
    assert_eq!(projection.monthly_results[2].cashflow.expenses.one_time, dec!(800));
}
