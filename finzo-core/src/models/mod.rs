mod deductions;
mod financial_year;
mod income;
mod regime;
mod rule_set;
mod tax_result;
mod tax_slab;

pub use deductions::{DeductionInputs, HraDetails};
pub use financial_year::{FinancialYear, ParseFinancialYearError};
pub use income::{HomeLoanInterest, IncomeComponents};
pub use regime::{AgeBand, Regime};
pub use rule_set::{
    DeductionLimits, HraRules, RebateThresholds, RegimeSlabs, SlabSchedule, TaxRuleSet,
};
pub use tax_result::{DeductionSummary, SlabBreakdown, TaxResult};
pub use tax_slab::{SlabTable, SlabTableError, TaxSlab};

/// One complete calculator submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TaxScenario {
    /// Free-form name used in batch reports.
    pub label: Option<String>,
    pub income: IncomeComponents,
    pub deductions: Option<DeductionInputs>,
    pub regime: Regime,
    pub age_band: AgeBand,
    pub is_salaried: bool,
}
