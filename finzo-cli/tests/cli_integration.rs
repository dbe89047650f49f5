//! Integration tests that drive the command handlers with on-disk fixtures.

use std::path::PathBuf;

use finzo_cli::app::{self, CalcInput, RuleSource};
use finzo_core::{FinancialYear, Regime};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn custom_source(year: Option<FinancialYear>) -> RuleSource {
    RuleSource {
        year,
        rules: Some(fixture("rules_2026_27.toml")),
        slabs: Some(fixture("slabs_2026_27.csv")),
    }
}

#[test]
fn custom_rule_set_is_used_when_no_year_given() {
    let rules = app::load_rules(&custom_source(None)).expect("fixture rule set should load");

    assert_eq!(rules.financial_year, FinancialYear(2026));
    assert_eq!(rules.standard_deduction, dec!(100000));
}

#[test]
fn builtin_years_stay_available_next_to_custom_rule_set() {
    let rules = app::load_rules(&custom_source(Some(FinancialYear(2025)))).unwrap();

    assert_eq!(rules.standard_deduction, dec!(75000));
}

#[test]
fn custom_rule_set_changes_the_result() {
    let rules = app::load_rules(&custom_source(None)).unwrap();
    let scenario = CalcInput {
        regime: Regime::New,
        is_salaried: true,
        salary: dec!(1300000),
        ..CalcInput::default()
    }
    .into_scenario();

    let report = app::run_calc(&rules, &scenario, false);

    // 1,300,000 - 1,00,000 standard deduction lands exactly on the rebate threshold.
    assert!(report.contains("FY 2026-27"));
    assert!(report.contains("Taxable income"));
    assert!(report.contains("₹12,00,000"));
    assert!(report.contains("Rebate u/s 87A"));
}

#[test]
fn missing_custom_file_is_reported() {
    let source = RuleSource {
        year: None,
        rules: Some(fixture("no_such_rules.toml")),
        slabs: Some(fixture("slabs_2026_27.csv")),
    };

    let err = app::load_rules(&source).unwrap_err();

    assert!(format!("{err:#}").contains("no_such_rules.toml"));
}

#[test]
fn batch_report_lists_every_scenario() {
    let rules = app::load_rules(&RuleSource::default()).unwrap();

    let report = app::run_batch(&rules, &fixture("sample_scenarios.csv")).unwrap();

    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("FY 2025-26 | 3 scenario(s)"));
    assert!(lines[2].contains("Salaried under rebate"));
    assert!(lines[3].contains("₹1,92,400"));
    assert!(lines[4].contains("₹33,800"));
}

#[test]
fn batch_with_missing_file_fails() {
    let rules = app::load_rules(&RuleSource::default()).unwrap();

    let result = app::run_batch(&rules, &fixture("no_such_scenarios.csv"));

    assert!(result.is_err());
}
