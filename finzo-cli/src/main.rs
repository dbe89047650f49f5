use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use finzo_core::{AgeBand, FinancialYear, Regime, parse_inr};
use rust_decimal::Decimal;
use tracing::debug;

use finzo_cli::app::{self, CalcInput, RuleSource};
use finzo_cli::logging;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Indian income tax calculator.
///
/// Computes tax under the old or new regime using the slab tables of the
/// selected financial year, and prints a slab-wise breakup.
#[derive(Debug, Parser)]
#[command(name = "finzo", version)]
struct Cli {
    /// Financial year, e.g. `2025-26`. Defaults to the latest built-in year.
    #[arg(long, global = true)]
    year: Option<FinancialYear>,

    /// Custom rule set (TOML). Requires `--slabs`.
    #[arg(long, global = true, requires = "slabs")]
    rules: Option<PathBuf>,

    /// Custom slab tables (CSV). Requires `--rules`.
    #[arg(long, global = true, requires = "rules")]
    slabs: Option<PathBuf>,

    /// Log filter: a level (`warn`, `debug`, …) or an EnvFilter directive.
    /// Overrides `RUST_LOG`.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also append log output to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compute tax for one taxpayer.
    Calc(CalcArgs),

    /// Compute tax for every row of a scenario CSV.
    Batch {
        /// Scenario CSV file.
        #[arg(long)]
        file: PathBuf,
    },

    /// Print the slab tables of the selected financial year.
    Slabs {
        /// Only show this regime (`old` or `new`).
        #[arg(long)]
        regime: Option<String>,

        /// Only show this age band (`below60`, `60to80`, `above80`).
        #[arg(long)]
        age_band: Option<String>,
    },
}

/// Amounts accept Indian or international grouping, e.g. `20,00,000`.
#[derive(Debug, Args)]
struct CalcArgs {
    /// `old` or `new`; anything else falls back to `new`.
    #[arg(long, default_value = "new")]
    regime: String,

    /// `below60`, `60to80` or `above80`; anything else falls back to `below60`.
    #[arg(long, default_value = "below60")]
    age_band: String,

    /// Apply the standard deduction for salaried taxpayers.
    #[arg(long)]
    salaried: bool,

    /// Compute both regimes and recommend the cheaper one.
    #[arg(long)]
    compare: bool,

    #[arg(long, value_parser = parse_inr, default_value = "0")]
    salary: Decimal,

    #[arg(long, value_parser = parse_inr, default_value = "0")]
    other_sources: Decimal,

    #[arg(long, value_parser = parse_inr, default_value = "0")]
    rental: Decimal,

    /// Interest on a self-occupied home loan.
    #[arg(long, value_parser = parse_inr, default_value = "0")]
    home_loan_self: Decimal,

    /// Interest on a let-out home loan.
    #[arg(long, value_parser = parse_inr, default_value = "0")]
    home_loan_let_out: Decimal,

    #[arg(long = "80c", value_parser = parse_inr, default_value = "0")]
    section_80c: Decimal,

    #[arg(long = "80d", value_parser = parse_inr, default_value = "0")]
    section_80d: Decimal,

    #[arg(long, value_parser = parse_inr, default_value = "0")]
    nps: Decimal,

    #[arg(long = "80e", value_parser = parse_inr, default_value = "0")]
    section_80e: Decimal,

    #[arg(long = "80g", value_parser = parse_inr, default_value = "0")]
    section_80g: Decimal,

    /// Basic salary, for the HRA exemption.
    #[arg(long, value_parser = parse_inr, default_value = "0")]
    basic: Decimal,

    /// Dearness allowance, for the HRA exemption.
    #[arg(long, value_parser = parse_inr, default_value = "0")]
    da: Decimal,

    #[arg(long, value_parser = parse_inr, default_value = "0")]
    hra_received: Decimal,

    #[arg(long, value_parser = parse_inr, default_value = "0")]
    rent_paid: Decimal,

    /// Rented accommodation is in a metro city.
    #[arg(long)]
    metro: bool,
}

impl From<CalcArgs> for CalcInput {
    fn from(args: CalcArgs) -> Self {
        CalcInput {
            regime: Regime::parse_or_default(&args.regime),
            age_band: AgeBand::parse_or_default(&args.age_band),
            is_salaried: args.salaried,
            salary: args.salary,
            other_sources: args.other_sources,
            rental_income: args.rental,
            home_loan_self_occupied: args.home_loan_self,
            home_loan_let_out: args.home_loan_let_out,
            section_80c: args.section_80c,
            section_80d: args.section_80d,
            nps_contribution: args.nps,
            section_80e: args.section_80e,
            section_80g: args.section_80g,
            basic_salary: args.basic,
            dearness_allowance: args.da,
            hra_received: args.hra_received,
            rent_paid: args.rent_paid,
            is_metro_city: args.metro,
        }
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init_logging(cli.log_level.as_deref(), cli.log_file.as_deref())?;

    let rules = app::load_rules(&RuleSource {
        year: cli.year,
        rules: cli.rules,
        slabs: cli.slabs,
    })?;
    debug!(financial_year = %rules.financial_year, "rule set ready");

    let output = match cli.command {
        Command::Calc(args) => {
            let compare = args.compare;
            let scenario = CalcInput::from(args).into_scenario();
            app::run_calc(&rules, &scenario, compare)
        }
        Command::Batch { file } => app::run_batch(&rules, &file)?,
        Command::Slabs { regime, age_band } => app::run_slabs(
            &rules,
            regime.as_deref().map(Regime::parse_or_default),
            age_band.as_deref().map(AgeBand::parse_or_default),
        ),
    };

    print!("{output}");
    Ok(())
}
