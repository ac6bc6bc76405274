use chrono::{Datelike, Local, NaiveDate};
use clap::Args;
use serde_json::{json, Value};

use hausfinanz_core::household::breakdown::expense_breakdown;
use hausfinanz_core::household::monthly::monthly_cashflow;
use hausfinanz_core::household::projection::{project, MAX_HORIZON_MONTHS};
use hausfinanz_core::household::snapshot::InputSnapshot;
use hausfinanz_core::household::yearly::yearly_summary;
use hausfinanz_core::types::with_metadata;
use hausfinanz_core::PlannerError;

use crate::input::{self, Document};

/// Default projection horizon (10 years).
pub const DEFAULT_HORIZON_MONTHS: u32 = 120;

/// Where the household snapshot comes from
#[derive(Args)]
pub struct SnapshotSource {
    /// Path to a JSON or YAML snapshot file (stdin is read when omitted)
    #[arg(long)]
    pub input: Option<String>,

    /// Use the built-in reference household instead of reading input
    #[arg(long, conflicts_with = "input")]
    pub sample: bool,
}

impl SnapshotSource {
    pub fn load(&self) -> Result<InputSnapshot, Box<dyn std::error::Error>> {
        if self.sample {
            return Ok(InputSnapshot::sample());
        }
        let document = input::read(self.input.as_deref())?
            .ok_or("--input <file> or stdin required (or pass --sample)")?;
        snapshot_from_document(&document)
    }
}

/// JSON goes through the core parser so that its error categories survive.
fn snapshot_from_document(document: &Document) -> Result<InputSnapshot, Box<dyn std::error::Error>> {
    match document {
        Document::Json(text) => Ok(InputSnapshot::from_json(text)?),
        Document::Yaml(_) => document.parse(),
    }
}

/// Arguments for the month-by-month projection
#[derive(Args)]
pub struct ProjectArgs {
    #[command(flatten)]
    pub source: SnapshotSource,

    /// Number of months to project
    #[arg(long, default_value_t = DEFAULT_HORIZON_MONTHS)]
    pub months: u32,

    /// Calendar year of the first projected month (defaults to the current year)
    #[arg(long)]
    pub start_year: Option<i32>,

    /// Age of the household head in the first month, for age labels
    #[arg(long)]
    pub current_age: Option<u32>,

    /// Emit only summary and KPIs, without the monthly series
    #[arg(long)]
    pub summary_only: bool,

    /// Replace the monthly series with one row per projection year
    #[arg(long, conflicts_with = "summary_only")]
    pub yearly: bool,
}

pub fn run_project(args: ProjectArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let snapshot = args.source.load()?;
    let output = project(&snapshot, args.months)?;
    let years = args.yearly.then(|| yearly_summary(&output.result));
    let start_year = args.start_year.unwrap_or_else(|| Local::now().year());

    let mut value = serde_json::to_value(output)?;
    if let Some(result) = value.get_mut("result").and_then(Value::as_object_mut) {
        if args.summary_only {
            result.remove("monthly_results");
        } else if let Some(years) = years {
            result.remove("monthly_results");
            let mut rows = match serde_json::to_value(years)? {
                Value::Array(rows) => rows,
                _ => Vec::new(),
            };
            annotate_years(&mut rows, start_year, args.current_age);
            result.insert("yearly".into(), Value::Array(rows));
        } else if let Some(Value::Array(rows)) = result.get_mut("monthly_results") {
            annotate_calendar(rows, start_year, args.current_age);
        }
    }
    Ok(value)
}

/// Add `period`, `calendar_year` and optionally `age` display labels to each
/// monthly row.
fn annotate_calendar(rows: &mut [Value], start_year: i32, current_age: Option<u32>) {
    for row in rows {
        let Some(map) = row.as_object_mut() else {
            continue;
        };
        let Some(month_index) = map.get("month_index").and_then(Value::as_u64) else {
            continue;
        };
        let years_elapsed = (month_index / 12) as i32;
        let calendar_year = start_year + years_elapsed;
        let month = (month_index % 12) as u32 + 1;

        if let Some(date) = NaiveDate::from_ymd_opt(calendar_year, month, 1) {
            map.insert("period".into(), json!(date.format("%Y-%m").to_string()));
        }
        map.insert("calendar_year".into(), json!(calendar_year));
        if let Some(age) = current_age {
            map.insert("age".into(), json!(age.saturating_add(years_elapsed as u32)));
        }
    }
}

/// Add `calendar_year` and optionally `age` labels to each yearly row.
fn annotate_years(rows: &mut [Value], start_year: i32, current_age: Option<u32>) {
    for row in rows {
        let Some(map) = row.as_object_mut() else {
            continue;
        };
        let Some(year) = map.get("year").and_then(Value::as_u64) else {
            continue;
        };
        let years_elapsed = year.saturating_sub(1) as u32;
        map.insert(
            "calendar_year".into(),
            json!(start_year.saturating_add(years_elapsed as i32)),
        );
        if let Some(age) = current_age {
            map.insert("age".into(), json!(age.saturating_add(years_elapsed)));
        }
    }
}

/// Arguments for the expense split of a single month
#[derive(Args)]
pub struct BreakdownArgs {
    #[command(flatten)]
    pub source: SnapshotSource,

    /// 0-based month index to split
    #[arg(long, default_value_t = 0)]
    pub month: u32,
}

pub fn run_breakdown(args: BreakdownArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let snapshot = args.source.load()?;
    if args.month >= MAX_HORIZON_MONTHS {
        return Err(PlannerError::InvalidInput {
            field: "month".into(),
            reason: format!("Month index must be below {MAX_HORIZON_MONTHS}"),
        }
        .into());
    }

    let mut warnings = Vec::new();
    snapshot.validate(&mut warnings)?;

    let cashflow = monthly_cashflow(&snapshot, args.month);
    let shares = expense_breakdown(&cashflow.expenses);
    let recurring_total = cashflow.expenses.total - cashflow.expenses.one_time;

    let result = json!({
        "month_index": cashflow.month_index,
        "year": cashflow.year,
        "recurring_total": recurring_total,
        "categories": shares
            .iter()
            .map(|s| json!({
                "category": s.category,
                "label": s.category.label(),
                "amount": s.amount,
                "share": s.share,
            }))
            .collect::<Vec<_>>(),
    });

    let output = with_metadata(
        "Recurring monthly expenses by category (one-time items excluded)",
        &json!({ "month_index": args.month }),
        warnings,
        result,
    );
    Ok(serde_json::to_value(output)?)
}

/// Arguments for printing the reference household
#[derive(Args)]
pub struct SampleArgs {}

pub fn run_sample(_args: SampleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    Ok(serde_json::to_value(InputSnapshot::sample())?)
}
