//! CSV loader for batch tax scenarios.
//!
//! ## CSV Format
//!
//! One calculation per row. Column order does **not** matter (headers are
//! matched by name) and every column except `salary` may be omitted.
//!
//! | Column                    | Type    | Notes                                         |
//! |---------------------------|---------|-----------------------------------------------|
//! | `label`                   | string  | Shown in batch reports                        |
//! | `regime`                  | string  | `old` or `new`; anything else → `new`         |
//! | `age_band`                | string  | `below60`, `60to80`, `above80`; else `below60`|
//! | `is_salaried`             | flag    | `true`/`false`, `yes`/`no`, `1`/`0`           |
//! | `salary`                  | amount  |                                               |
//! | `other_sources`           | amount  |                                               |
//! | `rental_income`           | amount  |                                               |
//! | `home_loan_self_occupied` | amount  |                                               |
//! | `home_loan_let_out`       | amount  |                                               |
//! | `section_80c`             | amount  | Old regime only                               |
//! | `section_80d`             | amount  | Old regime only                               |
//! | `nps_contribution`        | amount  | Old regime only                               |
//! | `section_80e`             | amount  | Old regime only                               |
//! | `section_80g`             | amount  | Old regime only                               |
//! | `basic_salary`            | amount  | HRA inputs, old regime only                   |
//! | `dearness_allowance`      | amount  |                                               |
//! | `hra_received`            | amount  |                                               |
//! | `rent_paid`               | amount  |                                               |
//! | `is_metro_city`           | flag    |                                               |
//!
//! Amounts accept Indian or international grouping (`20,00,000` or
//! `2,000,000`, quoted) and an empty cell means 0.
//!
//! ### Minimal example
//!
//! ```csv
//! label,regime,is_salaried,salary
//! Priya,new,yes,2000000
//! ```
use std::path::{Path, PathBuf};

use finzo_core::{
    AgeBand, DeductionInputs, HomeLoanInterest, HraDetails, IncomeComponents, Regime, TaxScenario,
    parse_inr,
};
use rust_decimal::Decimal;
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Serde-compatible row that mirrors the CSV layout exactly
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    regime: Option<String>,
    #[serde(default)]
    age_band: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    is_salaried: bool,
    #[serde(deserialize_with = "deserialize_amount")]
    salary: Decimal,
    #[serde(default, deserialize_with = "deserialize_amount")]
    other_sources: Decimal,
    #[serde(default, deserialize_with = "deserialize_amount")]
    rental_income: Decimal,
    #[serde(default, deserialize_with = "deserialize_amount")]
    home_loan_self_occupied: Decimal,
    #[serde(default, deserialize_with = "deserialize_amount")]
    home_loan_let_out: Decimal,
    #[serde(default, deserialize_with = "deserialize_amount")]
    section_80c: Decimal,
    #[serde(default, deserialize_with = "deserialize_amount")]
    section_80d: Decimal,
    #[serde(default, deserialize_with = "deserialize_amount")]
    nps_contribution: Decimal,
    #[serde(default, deserialize_with = "deserialize_amount")]
    section_80e: Decimal,
    #[serde(default, deserialize_with = "deserialize_amount")]
    section_80g: Decimal,
    #[serde(default, deserialize_with = "deserialize_amount")]
    basic_salary: Decimal,
    #[serde(default, deserialize_with = "deserialize_amount")]
    dearness_allowance: Decimal,
    #[serde(default, deserialize_with = "deserialize_amount")]
    hra_received: Decimal,
    #[serde(default, deserialize_with = "deserialize_amount")]
    rent_paid: Decimal,
    #[serde(default, deserialize_with = "deserialize_flag")]
    is_metro_city: bool,
}

fn deserialize_amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) => parse_inr(&s).map_err(serde::de::Error::custom),
        None => Ok(Decimal::ZERO),
    }
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    let Some(s) = s else {
        return Ok(false);
    };
    match s.trim().to_ascii_lowercase().as_str() {
        "" | "false" | "no" | "n" | "0" => Ok(false),
        "true" | "yes" | "y" | "1" => Ok(true),
        other => Err(serde::de::Error::custom(format!(
            "invalid flag '{other}': expected true/false, yes/no or 1/0"
        ))),
    }
}

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// Errors that can occur while loading scenario data.
#[derive(Debug, thiserror::Error)]
pub enum ScenarioLoadError {
    /// The underlying CSV deserialisation failed (bad structure, missing
    /// `salary` column, unparseable amount, etc.).
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Core loader
// ---------------------------------------------------------------------------

/// Blank selectors mean the default; anything else unrecognised falls back
/// with a warning.
fn convert_row(row: CsvRow) -> TaxScenario {
    let regime = match row.regime.as_deref().map(str::trim) {
        None | Some("") => Regime::default(),
        Some(value) => Regime::parse_or_default(value),
    };
    let age_band = match row.age_band.as_deref().map(str::trim) {
        None | Some("") => AgeBand::default(),
        Some(value) => AgeBand::parse_or_default(value),
    };

    let income = IncomeComponents {
        salary: row.salary,
        other_sources: row.other_sources,
        rental_income: row.rental_income,
        home_loan_interest: HomeLoanInterest {
            self_occupied: row.home_loan_self_occupied,
            let_out: row.home_loan_let_out,
        },
    };

    let deductions = DeductionInputs {
        section_80c: row.section_80c,
        section_80d: row.section_80d,
        nps_contribution: row.nps_contribution,
        section_80e: row.section_80e,
        section_80g: row.section_80g,
        hra: HraDetails {
            basic_salary: row.basic_salary,
            dearness_allowance: row.dearness_allowance,
            hra_received: row.hra_received,
            rent_paid: row.rent_paid,
            is_metro_city: row.is_metro_city,
        },
    };

    TaxScenario {
        label: row.label.filter(|label| !label.trim().is_empty()),
        income,
        deductions: (deductions != DeductionInputs::default()).then_some(deductions),
        regime,
        age_band,
        is_salaried: row.is_salaried,
    }
}

/// Parse CSV text (the full file contents as a &str) and return one
/// [`TaxScenario`] per row, in file order.
///
/// # Errors
///
/// * [`ScenarioLoadError::Parse`] if the CSV is structurally invalid or a
///   cell cannot be deserialised.
pub fn load_from_str(input: &str) -> Result<Vec<TaxScenario>, ScenarioLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All) // tolerate whitespace around values
        .flexible(false) // strict column count
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .map(|result| Ok(convert_row(result?)))
        .collect()
}

/// Convenience wrapper: read a file from disk and delegate to [`load_from_str`].
pub fn load_from_file(path: &Path) -> Result<Vec<TaxScenario>, ScenarioLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ScenarioLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_str(&contents)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
