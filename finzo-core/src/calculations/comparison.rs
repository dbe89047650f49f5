//! Old vs new regime comparison.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::income_tax::IncomeTaxCalculator;
use crate::models::{AgeBand, DeductionInputs, IncomeComponents, Regime, TaxResult, TaxRuleSet};

/// Results for the same inputs under both regimes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeComparison {
    pub old: TaxResult,
    pub new: TaxResult,
    /// Regime with the lower total liability. The new regime wins ties.
    pub recommended: Regime,
    /// Absolute difference between the two total liabilities.
    pub savings: Decimal,
}

impl RegimeComparison {
    pub fn recommended_result(&self) -> &TaxResult {
        match self.recommended {
            Regime::Old => &self.old,
            Regime::New => &self.new,
        }
    }
}

/// Runs the engine under both regimes and recommends the cheaper one.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use finzo_core::{AgeBand, IncomeComponents, Regime, compare_regimes, rules};
///
/// let rules = rules::fy_2025_26();
/// let comparison = compare_regimes(
///     &rules,
///     &IncomeComponents::from_salary(dec!(2000000)),
///     None,
///     AgeBand::Below60,
///     true,
/// );
///
/// assert_eq!(comparison.recommended, Regime::New);
/// ```
pub fn compare_regimes(
    rules: &TaxRuleSet,
    income: &IncomeComponents,
    deductions: Option<&DeductionInputs>,
    age_band: AgeBand,
    is_salaried: bool,
) -> RegimeComparison {
    let calculator = IncomeTaxCalculator::new(rules);

    let old = calculator.compute(income, deductions, Regime::Old, age_band, is_salaried);
    let new = calculator.compute(income, deductions, Regime::New, age_band, is_salaried);

    let recommended = if old.total_tax_liability < new.total_tax_liability {
        Regime::Old
    } else {
        Regime::New
    };
    let savings = (old.total_tax_liability - new.total_tax_liability).abs();

    debug!(
        recommended = recommended.as_str(),
        %savings,
        "compared tax regimes"
    );

    RegimeComparison {
        old,
        new,
        recommended,
        savings,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{HomeLoanInterest, HraDetails};
    use crate::rules;

    #[test]
    fn new_regime_wins_without_deductions() {
        let rules = rules::fy_2025_26();

        let comparison = compare_regimes(
            &rules,
            &IncomeComponents::from_salary(dec!(2000000)),
            None,
            AgeBand::Below60,
            true,
        );

        assert_eq!(comparison.new.total_tax_liability, dec!(192400));
        // Old: 1925000 taxable -> 12500 + 100000 + 277500 = 390000, cess 15600
        assert_eq!(comparison.old.total_tax_liability, dec!(405600));
        assert_eq!(comparison.recommended, Regime::New);
        assert_eq!(comparison.savings, dec!(213200));
    }

    #[test]
    fn old_regime_wins_with_heavy_deductions() {
        let rules = rules::fy_2025_26();
        let income = IncomeComponents {
            salary: dec!(1500000),
            home_loan_interest: HomeLoanInterest {
                self_occupied: dec!(200000),
                let_out: dec!(0),
            },
            ..IncomeComponents::default()
        };
        let deductions = DeductionInputs {
            section_80c: dec!(150000),
            section_80d: dec!(75000),
            nps_contribution: dec!(50000),
            section_80e: dec!(200000),
            section_80g: dec!(0),
            hra: HraDetails {
                basic_salary: dec!(600000),
                dearness_allowance: dec!(0),
                hra_received: dec!(300000),
                rent_paid: dec!(360000),
                is_metro_city: true,
            },
        };

        let comparison = compare_regimes(
            &rules,
            &income,
            Some(&deductions),
            AgeBand::Below60,
            true,
        );

        // Old taxable: 1500000 - 75000 - (150000 + 75000 + 50000 + 200000 + 300000 + 200000)
        assert_eq!(comparison.old.taxable_income, dec!(450000));
        assert_eq!(comparison.old.total_tax_liability, dec!(0));
        assert_eq!(comparison.recommended, Regime::Old);
        assert_eq!(comparison.savings, comparison.new.total_tax_liability);
        assert_eq!(comparison.recommended_result(), &comparison.old);
    }

    #[test]
    fn tie_recommends_new_regime() {
        let rules = rules::fy_2025_26();

        let comparison = compare_regimes(
            &rules,
            &IncomeComponents::from_salary(dec!(300000)),
            None,
            AgeBand::Below60,
            true,
        );

        assert_eq!(comparison.old.total_tax_liability, dec!(0));
        assert_eq!(comparison.new.total_tax_liability, dec!(0));
        assert_eq!(comparison.recommended, Regime::New);
        assert_eq!(comparison.savings, dec!(0));
    }
}
