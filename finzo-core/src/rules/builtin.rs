//! Rule sets shipped with the crate.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{
    DeductionLimits, FinancialYear, HraRules, RebateThresholds, RegimeSlabs, SlabTable, TaxRuleSet,
};

type Row = (Decimal, Option<Decimal>, Decimal);

const OLD_BELOW_60: &[Row] = &[
    (dec!(0), Some(dec!(250000)), dec!(0)),
    (dec!(250000), Some(dec!(500000)), dec!(5)),
    (dec!(500000), Some(dec!(1000000)), dec!(20)),
    (dec!(1000000), None, dec!(30)),
];

const OLD_60_TO_80: &[Row] = &[
    (dec!(0), Some(dec!(300000)), dec!(0)),
    (dec!(300000), Some(dec!(500000)), dec!(5)),
    (dec!(500000), Some(dec!(1000000)), dec!(20)),
    (dec!(1000000), None, dec!(30)),
];

const OLD_ABOVE_80: &[Row] = &[
    (dec!(0), Some(dec!(500000)), dec!(0)),
    (dec!(500000), Some(dec!(1000000)), dec!(20)),
    (dec!(1000000), None, dec!(30)),
];

const NEW_FY_2025_26: &[Row] = &[
    (dec!(0), Some(dec!(400000)), dec!(0)),
    (dec!(400000), Some(dec!(800000)), dec!(5)),
    (dec!(800000), Some(dec!(1200000)), dec!(10)),
    (dec!(1200000), Some(dec!(1600000)), dec!(15)),
    (dec!(1600000), Some(dec!(2000000)), dec!(20)),
    (dec!(2000000), Some(dec!(2400000)), dec!(25)),
    (dec!(2400000), None, dec!(30)),
];

const NEW_FY_2023_24: &[Row] = &[
    (dec!(0), Some(dec!(300000)), dec!(0)),
    (dec!(300000), Some(dec!(600000)), dec!(5)),
    (dec!(600000), Some(dec!(900000)), dec!(10)),
    (dec!(900000), Some(dec!(1200000)), dec!(15)),
    (dec!(1200000), Some(dec!(1500000)), dec!(20)),
    (dec!(1500000), None, dec!(30)),
];

fn regime_slabs(new_regime: &[Row]) -> RegimeSlabs {
    RegimeSlabs {
        new_regime: SlabTable::from_rows(new_regime),
        old_below_60: SlabTable::from_rows(OLD_BELOW_60),
        old_60_to_80: SlabTable::from_rows(OLD_60_TO_80),
        old_above_80: SlabTable::from_rows(OLD_ABOVE_80),
    }
}

/// FY 2025-26 (AY 2026-27).
///
/// New regime rebate up to 12 lakh taxable income, standard deduction 75,000.
pub fn fy_2025_26() -> TaxRuleSet {
    TaxRuleSet {
        financial_year: FinancialYear(2025),
        standard_deduction: dec!(75000),
        cess_rate: dec!(0.04),
        rebate: RebateThresholds {
            new_regime: dec!(1200000),
            old_regime: dec!(500000),
        },
        deduction_limits: DeductionLimits::default(),
        hra: HraRules::default(),
        slabs: regime_slabs(NEW_FY_2025_26),
    }
}

/// FY 2023-24 (AY 2024-25).
///
/// New regime rebate up to 7 lakh taxable income, standard deduction 50,000.
pub fn fy_2023_24() -> TaxRuleSet {
    TaxRuleSet {
        financial_year: FinancialYear(2023),
        standard_deduction: dec!(50000),
        cess_rate: dec!(0.04),
        rebate: RebateThresholds {
            new_regime: dec!(700000),
            old_regime: dec!(500000),
        },
        deduction_limits: DeductionLimits::default(),
        hra: HraRules::default(),
        slabs: regime_slabs(NEW_FY_2023_24),
    }
}

/// Every rule set shipped with the crate, oldest first.
pub fn all() -> Vec<TaxRuleSet> {
    vec![fy_2023_24(), fy_2025_26()]
}
