use std::collections::BTreeMap;
use std::io::Read;

use finzo_core::{
    AgeBand, FinancialYear, Regime, RegimeSlabs, SlabSchedule, SlabTable, SlabTableError, TaxSlab,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading slab tables.
#[derive(Debug, Error)]
pub enum SlabLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("unrecognised regime '{value}' on row {row}")]
    InvalidRegime { value: String, row: usize },

    #[error("unrecognised age band '{value}' on row {row}")]
    InvalidAgeBand { value: String, row: usize },

    #[error("FY {year} has no slabs for {schedule}")]
    MissingSchedule { year: FinancialYear, schedule: String },

    #[error("FY {year} {schedule} slab table is invalid: {source}")]
    InvalidTable {
        year: FinancialYear,
        schedule: String,
        #[source]
        source: SlabTableError,
    },
}

impl From<csv::Error> for SlabLoaderError {
    fn from(err: csv::Error) -> Self {
        SlabLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from the slab table CSV file.
///
/// - `financial_year`: e.g. `2025-26`
/// - `regime`: `old` or `new`
/// - `age_band`: `below60`, `60to80` or `above80`; ignored (and may be left
///   empty) for the new regime
/// - `lower_bound`: where the slab starts
/// - `upper_bound`: where the slab ends (empty for the final, unbounded slab)
/// - `rate_percent`: marginal rate as a percentage (e.g. `5` for 5%)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SlabRecord {
    pub financial_year: FinancialYear,
    pub regime: String,
    #[serde(default)]
    pub age_band: String,
    pub lower_bound: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub upper_bound: Option<Decimal>,
    pub rate_percent: Decimal,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

fn schedule_name(schedule: SlabSchedule) -> String {
    match schedule {
        SlabSchedule::New => "the new regime".to_string(),
        SlabSchedule::Old(band) => format!("the old regime ({})", band.as_str()),
    }
}

/// Loader for slab tables from CSV files.
///
/// Unlike calculator input, slab data is configuration: an unrecognised
/// regime or age band is rejected instead of falling back to a default.
pub struct SlabLoader;

impl SlabLoader {
    /// Parse slab records from a CSV reader.
    ///
    /// The reader can be any type that implements `Read`, such as a file or
    /// a string slice.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<SlabRecord>, SlabLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: SlabRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Group records into one validated set of slab tables per financial year.
    ///
    /// Rows may appear in any order within a table; they are sorted by
    /// `lower_bound` before validation.
    ///
    /// # Errors
    ///
    /// * [`SlabLoaderError::InvalidRegime`] / [`SlabLoaderError::InvalidAgeBand`]
    ///   for unrecognised selectors (rows are 1-based, header excluded).
    /// * [`SlabLoaderError::MissingSchedule`] when a year lacks one of the
    ///   four tables.
    /// * [`SlabLoaderError::InvalidTable`] when a table is not contiguous.
    pub fn into_tables(
        records: &[SlabRecord]
    ) -> Result<BTreeMap<FinancialYear, RegimeSlabs>, SlabLoaderError> {
        let mut groups: BTreeMap<(FinancialYear, SlabSchedule), Vec<TaxSlab>> = BTreeMap::new();

        for (idx, record) in records.iter().enumerate() {
            let schedule = Self::schedule_for(record, idx + 1)?;
            groups
                .entry((record.financial_year, schedule))
                .or_default()
                .push(TaxSlab::new(
                    record.lower_bound,
                    record.upper_bound,
                    record.rate_percent,
                ));
        }

        let years: Vec<FinancialYear> = {
            let mut years: Vec<_> = groups.keys().map(|(year, _)| *year).collect();
            years.dedup();
            years
        };

        let mut tables = BTreeMap::new();
        for year in years {
            let mut take = |schedule: SlabSchedule| -> Result<SlabTable, SlabLoaderError> {
                let mut slabs = groups.remove(&(year, schedule)).ok_or_else(|| {
                    SlabLoaderError::MissingSchedule {
                        year,
                        schedule: schedule_name(schedule),
                    }
                })?;
                slabs.sort_by(|a, b| a.lower_bound.cmp(&b.lower_bound));
                SlabTable::new(slabs).map_err(|source| SlabLoaderError::InvalidTable {
                    year,
                    schedule: schedule_name(schedule),
                    source,
                })
            };

            let slabs = RegimeSlabs {
                new_regime: take(SlabSchedule::New)?,
                old_below_60: take(SlabSchedule::Old(AgeBand::Below60))?,
                old_60_to_80: take(SlabSchedule::Old(AgeBand::From60To80))?,
                old_above_80: take(SlabSchedule::Old(AgeBand::Above80))?,
            };
            tables.insert(year, slabs);
        }

        Ok(tables)
    }

    fn schedule_for(
        record: &SlabRecord,
        row: usize,
    ) -> Result<SlabSchedule, SlabLoaderError> {
        let regime =
            Regime::parse(&record.regime).ok_or_else(|| SlabLoaderError::InvalidRegime {
                value: record.regime.clone(),
                row,
            })?;

        match regime {
            Regime::New => Ok(SlabSchedule::New),
            Regime::Old => {
                let band = AgeBand::parse(&record.age_band).ok_or_else(|| {
                    SlabLoaderError::InvalidAgeBand {
                        value: record.age_band.clone(),
                        row,
                    }
                })?;
                Ok(SlabSchedule::Old(band))
            }
        }
    }
}
