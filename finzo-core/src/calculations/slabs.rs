//! Regime resolution and the progressive slab walk.

use rust_decimal::Decimal;

use crate::calculations::common::{clamp_amount, percent_of};
use crate::format::format_rupees;
use crate::models::{AgeBand, Regime, SlabBreakdown, SlabSchedule, SlabTable, TaxRuleSet, TaxSlab};

/// Returns the slab table for a regime and age band.
///
/// The new regime ignores the age band. Unrecognised selector strings are
/// mapped to `Regime::New` / `AgeBand::Below60` when parsed, so every
/// combination reaching this function has a table.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use finzo_core::{AgeBand, Regime, resolve_slabs, rules};
///
/// let rules = rules::fy_2025_26();
/// let slabs = resolve_slabs(&rules, Regime::Old, AgeBand::From60To80);
///
/// assert_eq!(slabs.slabs()[0].upper_bound, Some(dec!(300000)));
/// ```
pub fn resolve_slabs(
    rules: &TaxRuleSet,
    regime: Regime,
    age_band: AgeBand,
) -> &SlabTable {
    rules.slabs.get(SlabSchedule::for_taxpayer(regime, age_band))
}

/// Tax computed by walking a slab table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlabTax {
    pub total: Decimal,
    pub breakdown: Vec<SlabBreakdown>,
}

/// Walks `table` in ascending order and taxes each band at its rate.
///
/// Only slabs that `taxable_income` reaches appear in the breakdown.
/// Nothing is rounded, so the breakdown sums exactly to `total`.
pub fn tax_by_slabs(
    table: &SlabTable,
    taxable_income: Decimal,
) -> SlabTax {
    let taxable_income = clamp_amount(taxable_income);
    let mut total = Decimal::ZERO;
    let mut breakdown = Vec::new();

    for slab in table {
        if taxable_income <= slab.lower_bound {
            break;
        }

        let top = match slab.upper_bound {
            Some(upper) => upper.min(taxable_income),
            None => taxable_income,
        };
        let amount_in_slab = top - slab.lower_bound;
        let tax_in_slab = percent_of(amount_in_slab, slab.rate_percent);

        total += tax_in_slab;
        breakdown.push(SlabBreakdown {
            label: slab_label(slab),
            rate_percent: slab.rate_percent,
            amount_in_slab,
            tax_in_slab,
        });
    }

    SlabTax { total, breakdown }
}

/// Formats a slab the way the calculator displays it:
/// `₹0 to ₹4,00,000`, `₹4,00,001 to ₹8,00,000`, `Above ₹24,00,000`.
pub fn slab_label(slab: &TaxSlab) -> String {
    match slab.upper_bound {
        None => format!("Above {}", format_rupees(slab.lower_bound)),
        Some(upper) if slab.lower_bound.is_zero() => {
            format!("{} to {}", format_rupees(Decimal::ZERO), format_rupees(upper))
        }
        Some(upper) => format!(
            "{} to {}",
            format_rupees(slab.lower_bound.saturating_add(Decimal::ONE)),
            format_rupees(upper)
        ),
    }
}
