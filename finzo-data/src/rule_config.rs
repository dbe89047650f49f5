//! Rule sets loaded from configuration files.
//!
//! A rule set is split across two files: a TOML file with the scalar policy
//! values and a slab CSV (see [`crate::slab_loader`]).
//!
//! ```toml
//! financial_year = "2025-26"
//! standard_deduction = 75000
//! cess_percent = 4
//!
//! [rebate]
//! new_regime = 1200000
//! old_regime = 500000
//!
//! # Optional; statutory defaults apply when omitted.
//! [deduction_limits]
//! section_80c = 150000
//! section_80d = 75000
//! nps_contribution = 50000
//! self_occupied_home_loan_interest = 200000
//!
//! [hra]
//! metro_percent = 50
//! non_metro_percent = 40
//! rent_excess_percent = 10
//! ```

use std::io::Read;
use std::path::{Path, PathBuf};

use finzo_core::{DeductionLimits, FinancialYear, HraRules, RebateThresholds, TaxRuleSet};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::slab_loader::{SlabLoader, SlabLoaderError};

/// Errors that can occur while loading a rule set.
#[derive(Debug, Error)]
pub enum RuleSetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("{field} must be between 0 and 100, got {value}")]
    InvalidPercent { field: &'static str, value: Decimal },

    #[error("{field} must not be negative, got {value}")]
    NegativeAmount { field: &'static str, value: Decimal },

    #[error("slab file has no tables for FY {0}")]
    MissingSlabs(FinancialYear),

    #[error(transparent)]
    Slabs(#[from] SlabLoaderError),
}

/// Scalar policy values for one financial year.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RuleSetConfig {
    pub financial_year: FinancialYear,
    pub standard_deduction: Decimal,
    /// Health & education cess as a percentage of income tax.
    pub cess_percent: Decimal,
    pub rebate: RebateThresholds,
    #[serde(default)]
    pub deduction_limits: DeductionLimits,
    #[serde(default)]
    pub hra: HraRules,
}

impl RuleSetConfig {
    /// Parse a config from TOML text.
    pub fn from_toml(input: &str) -> Result<Self, RuleSetError> {
        Ok(toml::from_str(input)?)
    }

    /// Validates that every amount is non-negative and every percentage lies
    /// in `0..=100`.
    ///
    /// # Errors
    ///
    /// Returns the first offending field as [`RuleSetError::NegativeAmount`]
    /// or [`RuleSetError::InvalidPercent`].
    pub fn validate(&self) -> Result<(), RuleSetError> {
        let amounts = [
            ("standard_deduction", self.standard_deduction),
            ("rebate.new_regime", self.rebate.new_regime),
            ("rebate.old_regime", self.rebate.old_regime),
            ("deduction_limits.section_80c", self.deduction_limits.section_80c),
            ("deduction_limits.section_80d", self.deduction_limits.section_80d),
            (
                "deduction_limits.nps_contribution",
                self.deduction_limits.nps_contribution,
            ),
            (
                "deduction_limits.self_occupied_home_loan_interest",
                self.deduction_limits.self_occupied_home_loan_interest,
            ),
        ];
        for (field, value) in amounts {
            if value < Decimal::ZERO {
                return Err(RuleSetError::NegativeAmount { field, value });
            }
        }

        let percents = [
            ("cess_percent", self.cess_percent),
            ("hra.metro_percent", self.hra.metro_percent),
            ("hra.non_metro_percent", self.hra.non_metro_percent),
            ("hra.rent_excess_percent", self.hra.rent_excess_percent),
        ];
        for (field, value) in percents {
            if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
                return Err(RuleSetError::InvalidPercent { field, value });
            }
        }

        if self.hra.non_metro_percent > self.hra.metro_percent {
            warn!(
                metro = %self.hra.metro_percent,
                non_metro = %self.hra.non_metro_percent,
                "non-metro HRA percentage exceeds metro percentage"
            );
        }

        Ok(())
    }
}

/// Combine a TOML config and a slab CSV into a [`TaxRuleSet`].
///
/// The slab CSV may contain several years; only the config's year is used.
pub fn load_rule_set<R: Read>(
    config_toml: &str,
    slabs_csv: R,
) -> Result<TaxRuleSet, RuleSetError> {
    let config = RuleSetConfig::from_toml(config_toml)?;
    config.validate()?;

    let records = SlabLoader::parse(slabs_csv)?;
    let mut tables = SlabLoader::into_tables(&records)?;
    let slabs = tables
        .remove(&config.financial_year)
        .ok_or(RuleSetError::MissingSlabs(config.financial_year))?;

    debug!(
        financial_year = %config.financial_year,
        slab_rows = records.len(),
        "loaded rule set"
    );

    Ok(TaxRuleSet {
        financial_year: config.financial_year,
        standard_deduction: config.standard_deduction,
        cess_rate: config.cess_percent / Decimal::ONE_HUNDRED,
        rebate: config.rebate,
        deduction_limits: config.deduction_limits,
        hra: config.hra,
        slabs,
    })
}

/// Convenience wrapper: read both files from disk and delegate to
/// [`load_rule_set`].
pub fn load_rule_set_files(
    config_path: &Path,
    slabs_path: &Path,
) -> Result<TaxRuleSet, RuleSetError> {
    let config = std::fs::read_to_string(config_path).map_err(|source| RuleSetError::Io {
        path: config_path.to_path_buf(),
        source,
    })?;
    let slabs = std::fs::File::open(slabs_path).map_err(|source| RuleSetError::Io {
        path: slabs_path.to_path_buf(),
        source,
    })?;

    load_rule_set(&config, slabs)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const CONFIG_TOML: &str = r#"
financial_year = "2025-26"
standard_deduction = 75000
cess_percent = 4

[rebate]
new_regime = 1200000
old_regime = 500000
"#;

    const SLABS_CSV: &str = "\
financial_year,regime,age_band,lower_bound,upper_bound,rate_percent
2025-26,new,,0,400000,0
2025-26,new,,400000,,5
2025-26,old,below60,0,250000,0
2025-26,old,below60,250000,,5
2025-26,old,60to80,0,300000,0
2025-26,old,60to80,300000,,5
2025-26,old,above80,0,500000,0
2025-26,old,above80,500000,,20
";

    // =========================================================================
    // RuleSetConfig tests
    // =========================================================================

    #[test]
    fn config_defaults_optional_tables() {
        let config = RuleSetConfig::from_toml(CONFIG_TOML).unwrap();

        assert_eq!(config.financial_year, FinancialYear(2025));
        assert_eq!(config.deduction_limits, DeductionLimits::default());
        assert_eq!(config.hra, HraRules::default());
    }

    #[test]
    fn config_overrides_limits() {
        let toml = format!("{CONFIG_TOML}\n[deduction_limits]\nsection_80c = 200000\nsection_80d = 50000\nnps_contribution = 50000\nself_occupied_home_loan_interest = 200000\n");

        let config = RuleSetConfig::from_toml(&toml).unwrap();

        assert_eq!(config.deduction_limits.section_80c, dec!(200000));
    }

    #[test]
    fn config_rejects_missing_field() {
        let result = RuleSetConfig::from_toml("financial_year = \"2025-26\"");

        assert!(matches!(result, Err(RuleSetError::TomlParse(_))));
    }

    #[test]
    fn validate_rejects_negative_amount() {
        let mut config = RuleSetConfig::from_toml(CONFIG_TOML).unwrap();
        config.standard_deduction = dec!(-1);

        let err = config.validate().unwrap_err();

        assert_eq!(
            err.to_string(),
            "standard_deduction must not be negative, got -1"
        );
    }

    #[test]
    fn validate_rejects_out_of_range_percent() {
        let mut config = RuleSetConfig::from_toml(CONFIG_TOML).unwrap();
        config.cess_percent = dec!(104);

        let err = config.validate().unwrap_err();

        assert!(matches!(
            err,
            RuleSetError::InvalidPercent {
                field: "cess_percent",
                ..
            }
        ));
    }

    // =========================================================================
    // load_rule_set tests
    // =========================================================================

    #[test]
    fn load_rule_set_combines_config_and_slabs() {
        let rules = load_rule_set(CONFIG_TOML, SLABS_CSV.as_bytes()).unwrap();

        assert_eq!(rules.financial_year, FinancialYear(2025));
        assert_eq!(rules.cess_rate, dec!(0.04));
        assert_eq!(rules.slabs.new_regime.len(), 2);
        assert_eq!(rules.slabs.old_above_80.top_rate(), dec!(20));
    }

    #[test]
    fn load_rule_set_requires_slabs_for_config_year() {
        let config = CONFIG_TOML.replace("2025-26", "2026-27");

        let err = load_rule_set(&config, SLABS_CSV.as_bytes()).unwrap_err();

        assert!(matches!(err, RuleSetError::MissingSlabs(FinancialYear(2026))));
    }

    #[test]
    fn load_rule_set_files_reports_missing_file() {
        let err = load_rule_set_files(
            Path::new("does-not-exist.toml"),
            Path::new("does-not-exist.csv"),
        )
        .unwrap_err();

        assert!(matches!(err, RuleSetError::Io { .. }));
    }
}
