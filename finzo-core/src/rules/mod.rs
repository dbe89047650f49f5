//! Dated tax rule sets and a registry keyed by financial year.

mod builtin;

use std::collections::HashMap;

use thiserror::Error;

use crate::models::{FinancialYear, TaxRuleSet};

pub use builtin::{all as builtin_rule_sets, fy_2023_24, fy_2025_26};

/// Errors returned by [`RuleSetRegistry`] lookups.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("no rule set for financial year {year}; available: {available}")]
    UnknownFinancialYear { year: FinancialYear, available: String },

    #[error("rule set registry is empty")]
    Empty,
}

/// Registry of [`TaxRuleSet`]s, keyed by financial year.
///
/// Typical lifetime:
/// 1. Create with `RuleSetRegistry::with_builtin()` (or `new()` for an empty one).
/// 2. Call `register` for any rule set loaded from configuration.
/// 3. Call `get` or `latest` whenever a computation needs its rules.
///
/// # Example
///
/// ```
/// use finzo_core::FinancialYear;
/// use finzo_core::rules::RuleSetRegistry;
///
/// let registry = RuleSetRegistry::with_builtin();
/// let rules = registry.get(FinancialYear(2025)).unwrap();
///
/// assert_eq!(rules.financial_year.to_string(), "2025-26");
/// assert!(registry.get(FinancialYear(1999)).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RuleSetRegistry {
    rule_sets: HashMap<FinancialYear, TaxRuleSet>,
}

impl RuleSetRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            rule_sets: HashMap::new(),
        }
    }

    /// Create a registry holding every built-in rule set.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        for rules in builtin_rule_sets() {
            registry.register(rules);
        }
        registry
    }

    /// Register a rule set.
    ///
    /// If a rule set for the same financial year is already present it is
    /// silently replaced.
    pub fn register(&mut self, rules: TaxRuleSet) {
        self.rule_sets.insert(rules.financial_year, rules);
    }

    /// Every registered financial year, oldest first.
    pub fn available_years(&self) -> Vec<FinancialYear> {
        let mut years: Vec<_> = self.rule_sets.keys().copied().collect();
        years.sort_unstable();
        years
    }

    /// Rule set for `year`.
    ///
    /// # Errors
    /// * [`RegistryError::UnknownFinancialYear`] when nothing is registered
    ///   for `year`.
    pub fn get(
        &self,
        year: FinancialYear,
    ) -> Result<&TaxRuleSet, RegistryError> {
        self.rule_sets
            .get(&year)
            .ok_or_else(|| RegistryError::UnknownFinancialYear {
                year,
                available: self
                    .available_years()
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }

    /// Rule set for the most recent registered financial year.
    pub fn latest(&self) -> Result<&TaxRuleSet, RegistryError> {
        self.rule_sets
            .keys()
            .max()
            .and_then(|year| self.rule_sets.get(year))
            .ok_or(RegistryError::Empty)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{SlabSchedule, SlabTable};

    // =========================================================================
    // built-in rule set tests
    // =========================================================================

    #[test]
    fn builtin_tables_pass_validation() {
        for rules in builtin_rule_sets() {
            for schedule in SlabSchedule::all() {
                let table = rules.slabs.get(schedule);
                let revalidated = SlabTable::new(table.slabs().to_vec());
                assert_eq!(
                    revalidated.as_ref(),
                    Ok(table),
                    "{} {:?} table is invalid",
                    rules.financial_year,
                    schedule
                );
            }
        }
    }

    #[test]
    fn builtin_tables_end_at_thirty_percent() {
        for rules in builtin_rule_sets() {
            for schedule in SlabSchedule::all() {
                assert_eq!(rules.slabs.get(schedule).top_rate(), dec!(30));
            }
        }
    }

    #[test]
    fn fy_2025_26_policy_values() {
        let rules = fy_2025_26();

        assert_eq!(rules.financial_year, FinancialYear(2025));
        assert_eq!(rules.standard_deduction, dec!(75000));
        assert_eq!(rules.cess_rate, dec!(0.04));
        assert_eq!(rules.rebate.new_regime, dec!(1200000));
        assert_eq!(rules.rebate.old_regime, dec!(500000));
        assert_eq!(rules.slabs.new_regime.len(), 7);
    }

    #[test]
    fn fy_2023_24_shares_old_regime_tables() {
        let current = fy_2025_26();
        let earlier = fy_2023_24();

        assert_eq!(earlier.slabs.old_below_60, current.slabs.old_below_60);
        assert_eq!(earlier.slabs.old_above_80, current.slabs.old_above_80);
        assert_ne!(earlier.slabs.new_regime, current.slabs.new_regime);
    }

    // =========================================================================
    // RuleSetRegistry tests
    // =========================================================================

    #[test]
    fn empty_registry_has_no_years() {
        let registry = RuleSetRegistry::new();

        assert!(registry.available_years().is_empty());
        assert_eq!(registry.latest(), Err(RegistryError::Empty));
    }

    #[test]
    fn builtin_registry_lists_years_in_order() {
        let registry = RuleSetRegistry::with_builtin();

        assert_eq!(
            registry.available_years(),
            vec![FinancialYear(2023), FinancialYear(2025)]
        );
        assert_eq!(
            registry.latest().map(|r| r.financial_year),
            Ok(FinancialYear(2025))
        );
    }

    #[test]
    fn unknown_year_error_lists_available_years() {
        let registry = RuleSetRegistry::with_builtin();

        let err = registry.get(FinancialYear(2024)).unwrap_err();

        assert_eq!(
            err.to_string(),
            "no rule set for financial year 2024-25; available: 2023-24, 2025-26"
        );
    }

    #[test]
    fn register_replaces_same_year() {
        let mut registry = RuleSetRegistry::with_builtin();
        let mut custom = fy_2025_26();
        custom.standard_deduction = dec!(100000);

        registry.register(custom);

        assert_eq!(registry.available_years().len(), 2);
        assert_eq!(
            registry.get(FinancialYear(2025)).map(|r| r.standard_deduction),
            Ok(dec!(100000))
        );
    }
}
