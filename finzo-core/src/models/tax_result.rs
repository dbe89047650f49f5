use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AgeBand, Regime};

/// Tax attributable to one slab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlabBreakdown {
    /// Human-readable band, e.g. `₹4,00,001 to ₹8,00,000`.
    pub label: String,
    pub rate_percent: Decimal,
    /// Portion of taxable income falling inside this slab.
    pub amount_in_slab: Decimal,
    /// Unrounded tax on `amount_in_slab`.
    pub tax_in_slab: Decimal,
}

/// Amounts actually applied for each old-regime deduction, after caps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionSummary {
    pub section_80c: Decimal,
    pub section_80d: Decimal,
    pub nps_contribution: Decimal,
    pub section_80e: Decimal,
    pub section_80g: Decimal,
    pub hra_exemption: Decimal,
    pub home_loan_interest: Decimal,
    pub total: Decimal,
}

/// Outcome of a single income-tax computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxResult {
    pub regime: Regime,
    pub age_band: AgeBand,

    pub gross_income: Decimal,
    /// Zero unless the taxpayer is salaried.
    pub standard_deduction: Decimal,
    /// Old-regime deductions; zero under the new regime.
    pub total_deductions: Decimal,
    /// Present only for the old regime.
    pub deduction_summary: Option<DeductionSummary>,
    pub taxable_income: Decimal,

    /// Sum of `slab_breakdown[*].tax_in_slab`.
    pub tax_before_rebate: Decimal,
    /// Tax wiped out by the rebate; either zero or `tax_before_rebate`.
    pub rebate: Decimal,
    /// Income tax before cess, after rebate.
    pub income_tax: Decimal,
    pub cess: Decimal,
    pub total_tax_liability: Decimal,
    /// Total liability as a percentage of taxable income, two decimals.
    pub effective_rate_percent: Decimal,

    pub slab_breakdown: Vec<SlabBreakdown>,
}

impl TaxResult {
    pub fn rebate_applied(&self) -> bool {
        !self.rebate.is_zero()
    }
}
