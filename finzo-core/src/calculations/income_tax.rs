//! Income tax computation for Indian resident individuals.
//!
//! # Computation Steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Gross income (salary + other sources + rental income) |
//! | 2    | Standard deduction (salaried taxpayers only) |
//! | 3    | Old-regime deductions (80C, 80D, NPS, 80E, 80G, HRA, home loan interest) |
//! | 4    | Taxable income (Step 1 - Step 2 - Step 3, minimum 0) |
//! | 5    | Slab tax (progressive walk over the resolved slab table) |
//! | 6    | Rebate (tax is zero at or below the regime's threshold) |
//! | 7    | Health & education cess (4% of Step 6, rounded to the rupee) |
//! | 8    | Total tax liability (Step 6 + Step 7) |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use finzo_core::{AgeBand, IncomeComponents, IncomeTaxCalculator, Regime, rules};
//!
//! let rules = rules::fy_2025_26();
//! let calculator = IncomeTaxCalculator::new(&rules);
//!
//! let result = calculator.compute(
//!     &IncomeComponents::from_salary(dec!(2000000)),
//!     None,
//!     Regime::New,
//!     AgeBand::Below60,
//!     true,
//! );
//!
//! assert_eq!(result.taxable_income, dec!(1925000));
//! assert_eq!(result.income_tax, dec!(185000));
//! assert_eq!(result.cess, dec!(7400));
//! assert_eq!(result.total_tax_liability, dec!(192400));
//! ```

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::{clamp_amount, non_negative, round_half_up, round_to_rupee};
use crate::calculations::deductions::old_regime_deductions;
use crate::calculations::slabs::{resolve_slabs, tax_by_slabs};
use crate::models::{
    AgeBand, DeductionInputs, DeductionSummary, IncomeComponents, Regime, TaxResult, TaxRuleSet,
    TaxScenario,
};

/// Computes income tax under a single rule set.
///
/// The calculator borrows its rule set and holds no other state, so one
/// instance can serve any number of computations.
#[derive(Debug, Clone, Copy)]
pub struct IncomeTaxCalculator<'a> {
    rules: &'a TaxRuleSet,
}

impl<'a> IncomeTaxCalculator<'a> {
    pub fn new(rules: &'a TaxRuleSet) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &'a TaxRuleSet {
        self.rules
    }

    /// Runs every computation step and returns the full result.
    ///
    /// Never fails: negative amounts are treated as zero, amounts above
    /// [`MAX_AMOUNT`](crate::calculations::common::MAX_AMOUNT) are lowered to
    /// it and taxable income is clamped at zero. `deductions` is ignored under the new regime.
    pub fn compute(
        &self,
        income: &IncomeComponents,
        deductions: Option<&DeductionInputs>,
        regime: Regime,
        age_band: AgeBand,
        is_salaried: bool,
    ) -> TaxResult {
        let income = income.normalized();

        let gross_income = income.gross_income();
        let standard_deduction = self.standard_deduction(is_salaried);

        let deduction_summary = self.deduction_summary(&income, deductions, regime);
        let total_deductions = deduction_summary
            .as_ref()
            .map_or(Decimal::ZERO, |summary| summary.total);

        let taxable_income =
            self.taxable_income(gross_income, standard_deduction, total_deductions);

        let slab_table = resolve_slabs(self.rules, regime, age_band);
        let slab_tax = tax_by_slabs(slab_table, taxable_income);
        let tax_before_rebate = slab_tax.total;

        let rebate = self.rebate(regime, taxable_income, tax_before_rebate);
        let income_tax = tax_before_rebate - rebate;

        let cess = self.cess(income_tax);
        let total_tax_liability = income_tax + cess;
        let effective_rate_percent = self.effective_rate(total_tax_liability, taxable_income);

        debug!(
            financial_year = %self.rules.financial_year,
            regime = regime.as_str(),
            age_band = age_band.as_str(),
            %taxable_income,
            %income_tax,
            %cess,
            "computed income tax"
        );

        TaxResult {
            regime,
            age_band,
            gross_income,
            standard_deduction,
            total_deductions,
            deduction_summary,
            taxable_income,
            tax_before_rebate,
            rebate,
            income_tax,
            cess,
            total_tax_liability,
            effective_rate_percent,
            slab_breakdown: slab_tax.breakdown,
        }
    }

    /// Convenience wrapper over [`IncomeTaxCalculator::compute`].
    pub fn compute_scenario(
        &self,
        scenario: &TaxScenario,
    ) -> TaxResult {
        self.compute(
            &scenario.income,
            scenario.deductions.as_ref(),
            scenario.regime,
            scenario.age_band,
            scenario.is_salaried,
        )
    }

    /// Flat standard deduction for salaried taxpayers.
    fn standard_deduction(
        &self,
        is_salaried: bool,
    ) -> Decimal {
        if is_salaried {
            clamp_amount(self.rules.standard_deduction)
        } else {
            Decimal::ZERO
        }
    }

    /// Old-regime deductions; `None` under the new regime.
    fn deduction_summary(
        &self,
        income: &IncomeComponents,
        deductions: Option<&DeductionInputs>,
        regime: Regime,
    ) -> Option<DeductionSummary> {
        match regime {
            Regime::New => None,
            Regime::Old => Some(old_regime_deductions(
                &self.rules.deduction_limits,
                &self.rules.hra,
                deductions,
                &income.home_loan_interest,
            )),
        }
    }

    fn taxable_income(
        &self,
        gross_income: Decimal,
        standard_deduction: Decimal,
        total_deductions: Decimal,
    ) -> Decimal {
        non_negative(gross_income - standard_deduction - total_deductions)
    }

    /// The rebate cancels the whole tax, not just the excess, when taxable
    /// income is at or below the regime's threshold.
    fn rebate(
        &self,
        regime: Regime,
        taxable_income: Decimal,
        tax_before_rebate: Decimal,
    ) -> Decimal {
        if taxable_income <= self.rules.rebate.for_regime(regime) {
            tax_before_rebate
        } else {
            Decimal::ZERO
        }
    }

    fn cess(
        &self,
        income_tax: Decimal,
    ) -> Decimal {
        round_to_rupee(income_tax * self.rules.cess_rate)
    }

    fn effective_rate(
        &self,
        total_tax_liability: Decimal,
        taxable_income: Decimal,
    ) -> Decimal {
        if taxable_income.is_zero() {
            return Decimal::ZERO;
        }
        round_half_up(total_tax_liability * Decimal::ONE_HUNDRED / taxable_income)
    }
}

/// Computes income tax for one submission under `rules`.
///
/// Equivalent to `IncomeTaxCalculator::new(rules).compute(...)`.
pub fn compute_tax(
    rules: &TaxRuleSet,
    income: &IncomeComponents,
    deductions: Option<&DeductionInputs>,
    regime: Regime,
    age_band: AgeBand,
    is_salaried: bool,
) -> TaxResult {
    IncomeTaxCalculator::new(rules).compute(income, deductions, regime, age_band, is_salaried)
}
