//! Plain-text reports for calculation results.
//!
//! Each report borrows what it renders and implements [`fmt::Display`].

use std::fmt;

use finzo_core::calculations::comparison::RegimeComparison;
use finzo_core::calculations::slabs::slab_label;
use finzo_core::{
    FinancialYear, SlabTable, TaxResult, TaxScenario, format_percent, format_rupees,
};

const LABEL_WIDTH: usize = 28;

fn line(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    value: &str,
) -> fmt::Result {
    writeln!(f, "  {label:<width$}{value:>16}", width = LABEL_WIDTH)
}

/// One result with its slab-wise breakup.
#[derive(Debug, Clone, Copy)]
pub struct ResultReport<'a> {
    pub year: FinancialYear,
    pub result: &'a TaxResult,
}

impl fmt::Display for ResultReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let result = self.result;
        writeln!(
            f,
            "FY {} | {} | {}",
            self.year,
            result.regime.label(),
            result.age_band.label()
        )?;

        line(f, "Gross income", &format_rupees(result.gross_income))?;
        line(
            f,
            "Standard deduction",
            &format_rupees(result.standard_deduction),
        )?;
        if let Some(summary) = &result.deduction_summary {
            let items = [
                ("  Section 80C", summary.section_80c),
                ("  Section 80D", summary.section_80d),
                ("  NPS", summary.nps_contribution),
                ("  Section 80E", summary.section_80e),
                ("  Section 80G", summary.section_80g),
                ("  HRA exemption", summary.hra_exemption),
                ("  Home loan interest", summary.home_loan_interest),
            ];
            for (label, amount) in items {
                if !amount.is_zero() {
                    line(f, label, &format_rupees(amount))?;
                }
            }
        }
        line(f, "Total deductions", &format_rupees(result.total_deductions))?;
        line(f, "Taxable income", &format_rupees(result.taxable_income))?;

        if !result.slab_breakdown.is_empty() {
            writeln!(f, "\n  Slab-wise tax")?;
            for slab in &result.slab_breakdown {
                writeln!(
                    f,
                    "    {:<34}{:>4}%{:>16}",
                    slab.label,
                    slab.rate_percent,
                    format_rupees(slab.tax_in_slab)
                )?;
            }
            writeln!(f)?;
        }

        if result.rebate_applied() {
            line(
                f,
                "Rebate u/s 87A",
                &format!("-{}", format_rupees(result.rebate)),
            )?;
        }
        line(f, "Income tax", &format_rupees(result.income_tax))?;
        line(f, "Health & education cess", &format_rupees(result.cess))?;
        line(
            f,
            "Total tax liability",
            &format_rupees(result.total_tax_liability),
        )?;
        line(
            f,
            "Effective rate",
            &format_percent(result.effective_rate_percent),
        )
    }
}

/// Both regimes side by side with a recommendation.
#[derive(Debug, Clone, Copy)]
pub struct ComparisonReport<'a> {
    pub year: FinancialYear,
    pub comparison: &'a RegimeComparison,
}

impl fmt::Display for ComparisonReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let comparison = self.comparison;
        write!(
            f,
            "{}",
            ResultReport {
                year: self.year,
                result: &comparison.old,
            }
        )?;
        writeln!(f)?;
        write!(
            f,
            "{}",
            ResultReport {
                year: self.year,
                result: &comparison.new,
            }
        )?;
        writeln!(
            f,
            "\nRecommended: {} (saves {})",
            comparison.recommended.label(),
            format_rupees(comparison.savings)
        )
    }
}

/// One summary row per scenario.
#[derive(Debug, Clone, Copy)]
pub struct BatchReport<'a> {
    pub year: FinancialYear,
    pub rows: &'a [(TaxScenario, TaxResult)],
}

impl fmt::Display for BatchReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "FY {} | {} scenario(s)", self.year, self.rows.len())?;
        writeln!(
            f,
            "{:<4}{:<28}{:<6}{:<9}{:>16}{:>14}{:>10}",
            "#", "Label", "Regime", "Age", "Taxable", "Total tax", "Rate"
        )?;
        for (idx, (scenario, result)) in self.rows.iter().enumerate() {
            writeln!(
                f,
                "{:<4}{:<28}{:<6}{:<9}{:>16}{:>14}{:>10}",
                idx + 1,
                scenario.label.as_deref().unwrap_or("-"),
                result.regime.as_str(),
                result.age_band.as_str(),
                format_rupees(result.taxable_income),
                format_rupees(result.total_tax_liability),
                format_percent(result.effective_rate_percent)
            )?;
        }
        Ok(())
    }
}

/// A titled slab table.
#[derive(Debug, Clone, Copy)]
pub struct SlabReport<'a> {
    pub title: &'a str,
    pub table: &'a SlabTable,
}

impl fmt::Display for SlabReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        for slab in self.table {
            writeln!(f, "  {:<34}{:>4}%", slab_label(slab), slab.rate_percent)?;
        }
        Ok(())
    }
}
