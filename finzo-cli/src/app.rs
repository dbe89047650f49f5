use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use finzo_core::{
    AgeBand, DeductionInputs, FinancialYear, HomeLoanInterest, HraDetails, IncomeComponents,
    IncomeTaxCalculator, Regime, RuleSetRegistry, SlabSchedule, TaxRuleSet, TaxScenario,
    compare_regimes,
};
use finzo_data::{load_rule_set_files, scenario_loader};
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::report::{BatchReport, ComparisonReport, ResultReport, SlabReport};

/// Where the active rule set comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSource {
    /// Built-in financial year; the latest one when `None`.
    pub year: Option<FinancialYear>,
    /// Custom rule set TOML. Must be paired with `slabs`.
    pub rules: Option<PathBuf>,
    /// Custom slab CSV. Must be paired with `rules`.
    pub slabs: Option<PathBuf>,
}

/// Resolve the rule set for this run.
///
/// A custom pair of files replaces the built-in rule set for its year.
///
/// # Errors
///
/// * Only one of `rules` / `slabs` given.
/// * Either file fails to load.
/// * `year` is neither built in nor the year of the custom files.
pub fn load_rules(source: &RuleSource) -> Result<TaxRuleSet> {
    let mut registry = RuleSetRegistry::with_builtin();

    match (&source.rules, &source.slabs) {
        (Some(rules_path), Some(slabs_path)) => {
            let custom = load_rule_set_files(rules_path, slabs_path).with_context(|| {
                format!(
                    "loading rule set from {} and {}",
                    rules_path.display(),
                    slabs_path.display()
                )
            })?;
            info!(financial_year = %custom.financial_year, "using custom rule set");
            let year = custom.financial_year;
            registry.register(custom);
            if source.year.is_none() {
                return Ok(registry.get(year)?.clone());
            }
        }
        (None, None) => {}
        _ => bail!("--rules and --slabs must be given together"),
    }

    let rules = match source.year {
        Some(year) => registry.get(year)?,
        None => registry.latest()?,
    };
    debug!(financial_year = %rules.financial_year, "resolved rule set");
    Ok(rules.clone())
}

/// Inputs to a single `calc` run, already parsed into amounts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalcInput {
    pub regime: Regime,
    pub age_band: AgeBand,
    pub is_salaried: bool,
    pub salary: Decimal,
    pub other_sources: Decimal,
    pub rental_income: Decimal,
    pub home_loan_self_occupied: Decimal,
    pub home_loan_let_out: Decimal,
    pub section_80c: Decimal,
    pub section_80d: Decimal,
    pub nps_contribution: Decimal,
    pub section_80e: Decimal,
    pub section_80g: Decimal,
    pub basic_salary: Decimal,
    pub dearness_allowance: Decimal,
    pub hra_received: Decimal,
    pub rent_paid: Decimal,
    pub is_metro_city: bool,
}

impl CalcInput {
    pub fn into_scenario(self) -> TaxScenario {
        let deductions = DeductionInputs {
            section_80c: self.section_80c,
            section_80d: self.section_80d,
            nps_contribution: self.nps_contribution,
            section_80e: self.section_80e,
            section_80g: self.section_80g,
            hra: HraDetails {
                basic_salary: self.basic_salary,
                dearness_allowance: self.dearness_allowance,
                hra_received: self.hra_received,
                rent_paid: self.rent_paid,
                is_metro_city: self.is_metro_city,
            },
        };

        TaxScenario {
            label: None,
            income: IncomeComponents {
                salary: self.salary,
                other_sources: self.other_sources,
                rental_income: self.rental_income,
                home_loan_interest: HomeLoanInterest {
                    self_occupied: self.home_loan_self_occupied,
                    let_out: self.home_loan_let_out,
                },
            },
            deductions: (deductions != DeductionInputs::default()).then_some(deductions),
            regime: self.regime,
            age_band: self.age_band,
            is_salaried: self.is_salaried,
        }
    }
}

/// Compute one scenario, or both regimes when `compare` is set, and render
/// the report.
pub fn run_calc(
    rules: &TaxRuleSet,
    scenario: &TaxScenario,
    compare: bool,
) -> String {
    if compare {
        let comparison = compare_regimes(
            rules,
            &scenario.income,
            scenario.deductions.as_ref(),
            scenario.age_band,
            scenario.is_salaried,
        );
        ComparisonReport {
            year: rules.financial_year,
            comparison: &comparison,
        }
        .to_string()
    } else {
        let result = IncomeTaxCalculator::new(rules).compute_scenario(scenario);
        ResultReport {
            year: rules.financial_year,
            result: &result,
        }
        .to_string()
    }
}

/// Compute every scenario in a CSV file and render a summary table.
pub fn run_batch(
    rules: &TaxRuleSet,
    path: &Path,
) -> Result<String> {
    let scenarios = scenario_loader::load_from_file(path)
        .with_context(|| format!("loading scenarios from {}", path.display()))?;
    info!(count = scenarios.len(), "loaded scenarios");

    let calculator = IncomeTaxCalculator::new(rules);
    let rows: Vec<_> = scenarios
        .into_iter()
        .map(|scenario| {
            let result = calculator.compute_scenario(&scenario);
            (scenario, result)
        })
        .collect();

    Ok(BatchReport {
        year: rules.financial_year,
        rows: &rows,
    }
    .to_string())
}

/// Render the slab tables for the active rule set, optionally narrowed to
/// one regime and age band.
pub fn run_slabs(
    rules: &TaxRuleSet,
    regime: Option<Regime>,
    age_band: Option<AgeBand>,
) -> String {
    let schedules: Vec<SlabSchedule> = SlabSchedule::all()
        .into_iter()
        .filter(|schedule| regime.is_none_or(|r| schedule.regime() == r))
        .filter(|schedule| match (schedule, age_band) {
            (SlabSchedule::Old(band), Some(wanted)) => *band == wanted,
            _ => true,
        })
        .collect();

    let mut out = format!(
        "FY {} | standard deduction {} | cess {}\n\n",
        rules.financial_year,
        finzo_core::format_rupees(rules.standard_deduction),
        finzo_core::format_percent(rules.cess_rate * Decimal::ONE_HUNDRED),
    );
    let tables: Vec<String> = schedules
        .into_iter()
        .map(|schedule| {
            let title = match schedule {
                SlabSchedule::New => Regime::New.label().to_string(),
                SlabSchedule::Old(band) => format!("{} ({})", Regime::Old.label(), band.label()),
            };
            SlabReport {
                title: &title,
                table: rules.slabs.get(schedule),
            }
            .to_string()
        })
        .collect();
    out.push_str(&tables.join("\n"));
    out
}
