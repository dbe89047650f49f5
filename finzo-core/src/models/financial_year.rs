use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a string is not a valid financial year.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid financial year '{0}': expected YYYY-YY (e.g. 2025-26) or YYYY")]
pub struct ParseFinancialYearError(pub String);

/// Indian financial year, running 1 April to 31 March.
///
/// The inner value is the calendar year in which the financial year starts,
/// so `FinancialYear(2025)` is FY 2025-26.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FinancialYear(pub i32);

impl FinancialYear {
    pub fn start_year(&self) -> i32 {
        self.0
    }

    pub fn end_year(&self) -> i32 {
        self.0 + 1
    }
}

impl fmt::Display for FinancialYear {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}-{:02}", self.0, self.end_year().rem_euclid(100))
    }
}

impl FromStr for FinancialYear {
    type Err = ParseFinancialYearError;

    /// Accepts `2025-26`, `2025-2026` or a bare start year `2025`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseFinancialYearError(s.to_string());
        let trimmed = s.trim();

        let (start, end) = match trimmed.split_once('-') {
            Some((start, end)) => (start, Some(end)),
            None => (trimmed, None),
        };

        if start.len() != 4 {
            return Err(invalid());
        }
        let start: i32 = start.parse().map_err(|_| invalid())?;

        if let Some(end) = end {
            let end_value: i32 = end.parse().map_err(|_| invalid())?;
            let matches = match end.len() {
                2 => end_value == (start + 1).rem_euclid(100),
                4 => end_value == start + 1,
                _ => false,
            };
            if !matches {
                return Err(invalid());
            }
        }

        Ok(Self(start))
    }
}

impl TryFrom<String> for FinancialYear {
    type Error = ParseFinancialYearError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FinancialYear> for String {
    fn from(year: FinancialYear) -> Self {
        year.to_string()
    }
}
