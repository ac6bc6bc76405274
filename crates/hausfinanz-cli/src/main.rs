mod commands;
mod input;
mod logging;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::household::{BreakdownArgs, ProjectArgs, SampleArgs};
use commands::property::PropertyArgs;
use commands::stress::StressArgs;
use commands::tax::{HealthInsuranceArgs, TaxArgs};

/// Household cashflow and net-worth projections
#[derive(Parser)]
#[command(
    name = "hausfinanz",
    version,
    about = "Household cashflow and net-worth projections under German tax rules",
    long_about = "Projects a household's monthly cash balance and net worth from income, \
                  expenses, rented-out property and macro assumptions. Applies German \
                  income tax, solidarity surcharge, statutory health insurance and linear \
                  depreciation, and runs stress scenarios against the baseline."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Project cash balance and net worth month by month
    Project(ProjectArgs),
    /// Run the stress scenarios and compare them against the baseline
    Stress(StressArgs),
    /// Split one month's recurring expenses into display categories
    Breakdown(BreakdownArgs),
    /// Annual income tax and solidarity surcharge for a taxable income
    Tax(TaxArgs),
    /// Monthly statutory health insurance contribution
    HealthInsurance(HealthInsuranceArgs),
    /// Cashflow, yield and depreciation of a single property
    Property(PropertyArgs),
    /// Print the reference household snapshot
    Sample(SampleArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Project(args) => commands::household::run_project(args),
        Commands::Stress(args) => commands::stress::run_stress(args),
        Commands::Breakdown(args) => commands::household::run_breakdown(args),
        Commands::Tax(args) => commands::tax::run_tax(args),
        Commands::HealthInsurance(args) => commands::tax::run_health_insurance(args),
        Commands::Property(args) => commands::property::run_property(args),
        Commands::Sample(args) => commands::household::run_sample(args),
        Commands::Version => {
            println!("hausfinanz {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "Command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
