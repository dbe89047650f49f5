use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::{AgeBand, FinancialYear, Regime, SlabTable};

/// Identifies one of the four slab tables in a rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SlabSchedule {
    New,
    Old(AgeBand),
}

impl SlabSchedule {
    /// The new regime has a single age-invariant table.
    pub fn for_taxpayer(
        regime: Regime,
        age_band: AgeBand,
    ) -> Self {
        match regime {
            Regime::New => Self::New,
            Regime::Old => Self::Old(age_band),
        }
    }

    pub fn all() -> [SlabSchedule; 4] {
        [
            Self::New,
            Self::Old(AgeBand::Below60),
            Self::Old(AgeBand::From60To80),
            Self::Old(AgeBand::Above80),
        ]
    }

    pub fn regime(&self) -> Regime {
        match self {
            Self::New => Regime::New,
            Self::Old(_) => Regime::Old,
        }
    }
}

/// Slab tables for both regimes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeSlabs {
    pub new_regime: SlabTable,
    pub old_below_60: SlabTable,
    pub old_60_to_80: SlabTable,
    pub old_above_80: SlabTable,
}

impl RegimeSlabs {
    pub fn get(
        &self,
        schedule: SlabSchedule,
    ) -> &SlabTable {
        match schedule {
            SlabSchedule::New => &self.new_regime,
            SlabSchedule::Old(AgeBand::Below60) => &self.old_below_60,
            SlabSchedule::Old(AgeBand::From60To80) => &self.old_60_to_80,
            SlabSchedule::Old(AgeBand::Above80) => &self.old_above_80,
        }
    }
}

/// Caps on old-regime deductions. 80E and 80G are uncapped and have no entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionLimits {
    pub section_80c: Decimal,
    pub section_80d: Decimal,
    pub nps_contribution: Decimal,
    /// Section 24(b) cap on interest for a self-occupied property.
    pub self_occupied_home_loan_interest: Decimal,
}

impl Default for DeductionLimits {
    fn default() -> Self {
        Self {
            section_80c: dec!(150000),
            section_80d: dec!(75000),
            nps_contribution: dec!(50000),
            self_occupied_home_loan_interest: dec!(200000),
        }
    }
}

/// Percentages used by the HRA exemption formula.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HraRules {
    /// Share of salary exempt in a metro city.
    pub metro_percent: Decimal,
    /// Share of salary exempt elsewhere.
    pub non_metro_percent: Decimal,
    /// Rent counts only above this share of salary.
    pub rent_excess_percent: Decimal,
}

impl Default for HraRules {
    fn default() -> Self {
        Self {
            metro_percent: dec!(50),
            non_metro_percent: dec!(40),
            rent_excess_percent: dec!(10),
        }
    }
}

/// Taxable-income ceilings at or below which the rebate wipes out the tax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebateThresholds {
    pub new_regime: Decimal,
    pub old_regime: Decimal,
}

impl RebateThresholds {
    pub fn for_regime(
        &self,
        regime: Regime,
    ) -> Decimal {
        match regime {
            Regime::New => self.new_regime,
            Regime::Old => self.old_regime,
        }
    }
}

/// Complete, dated tax policy for one financial year.
///
/// Everything that changes between budgets lives here so the engine never
/// hard-codes a policy value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRuleSet {
    pub financial_year: FinancialYear,
    /// Flat standard deduction for salaried taxpayers.
    pub standard_deduction: Decimal,
    /// Health & education cess as a fraction of income tax (0.04 = 4%).
    pub cess_rate: Decimal,
    pub rebate: RebateThresholds,
    pub deduction_limits: DeductionLimits,
    pub hra: HraRules,
    pub slabs: RegimeSlabs,
}
