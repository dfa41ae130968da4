//! Integration tests for financier-core
//!
//! These tests exercise the full load → validate → aggregate → render workflow.

use std::io::Write;

use financier_core::{
    aggregate, analyze_health, import::parse_csv, import::parse_json, load_and_validate, project,
    render_dashboard, render_report, validate_rows, Config, DashboardInput, RecordType,
    ReportInput, ValidationErrorKind,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Household budget in the shape of the bundled example data
fn household_csv() -> &'static str {
    r#"category,item,amount,type,frequency
Income,Salary,7500,income,monthly
Income,Side Gig,2400,income,yearly
Housing,Mortgage,2500,expense,monthly
Food,Groceries,150,expense,weekly
Savings,Emergency Fund,300,expense,monthly
Savings,Retirement Contribution,500,savings,monthly
Debt,Car Payment,350,debt,monthly
Savings,Emergency Fund Balance,15000,savings,one-time
Savings,Retirement Account,42000,savings,one-time
Debt,Car Loan Balance,9000,debt,one-time
"#
}

// =============================================================================
// Load and Aggregate
// =============================================================================

#[test]
fn test_full_csv_workflow() {
    let rows = parse_csv(household_csv().as_bytes()).expect("Failed to parse CSV");
    assert_eq!(rows.len(), 10);

    let validated = validate_rows(&rows);
    assert!(validated.is_clean());

    let summary = aggregate(&validated.records);
    // 7500 + 2400 / 12
    assert_eq!(summary.income, dec!(7700));
    // 2500 + 150 * 52 / 12 + 300
    assert_eq!(summary.expense, dec!(3450));
    assert_eq!(summary.savings, dec!(500));
    assert_eq!(summary.debt, dec!(350));
    assert_eq!(summary.net_monthly, dec!(3900));
    assert_eq!(summary.net_worth_proxy, dec!(48000));

    let keys: Vec<_> = summary.categories.iter().map(|c| c.category.as_str()).collect();
    assert_eq!(keys, vec!["Income", "Housing", "Food", "Savings", "Debt"]);
}

#[test]
fn test_worked_scenario_from_json() {
    let json = r#"[
        {"item": "Salary", "amount": 7500, "type": "income", "frequency": "monthly"},
        {"item": "Mortgage", "amount": 2500, "type": "expense", "frequency": "monthly"},
        {"item": "Emergency Fund Balance", "amount": 15000, "type": "savings", "frequency": "one-time"}
    ]"#;

    let validated = validate_rows(&parse_json(json.as_bytes()).unwrap());
    let summary = aggregate(&validated.records);

    assert_eq!(summary.income, dec!(7500));
    assert_eq!(summary.expense, dec!(2500));
    assert_eq!(summary.savings, Decimal::ZERO);
    assert_eq!(summary.debt, Decimal::ZERO);
    assert_eq!(summary.net_monthly, dec!(5000));
    assert_eq!(summary.savings_rate, Decimal::ZERO);
    assert_eq!(summary.net_worth_proxy, dec!(15000));
}

#[test]
fn test_invalid_rows_are_excluded() {
    let csv = r#"item,amount,type,frequency
Salary,4000,income,monthly
Refund,-100,expense,monthly
Coffee,5,expense,daily
Rent,1500,expense,monthly
"#;

    let validated = validate_rows(&parse_csv(csv.as_bytes()).unwrap());
    assert_eq!(validated.records.len(), 2);
    assert_eq!(validated.rejected.len(), 2);

    assert_eq!(validated.rejected[0].row, 2);
    assert!(matches!(
        validated.rejected[0].kind,
        ValidationErrorKind::InvalidAmount { .. }
    ));
    assert_eq!(validated.rejected[1].row, 3);
    assert_eq!(validated.rejected[1].field(), "frequency");

    let summary = aggregate(&validated.records);
    assert_eq!(summary.total(RecordType::Income), dec!(4000));
    assert_eq!(summary.total(RecordType::Expense), dec!(1500));
}

#[test]
fn test_all_invalid_yields_zeroed_summary() {
    let csv = "item,amount,type,frequency\nA,-1,income,monthly\nB,2,bogus,monthly\n";
    let validated = validate_rows(&parse_csv(csv.as_bytes()).unwrap());
    assert!(validated.records.is_empty());

    let summary = aggregate(&validated.records);
    assert!(summary.is_empty());
    assert_eq!(summary.savings_rate, Decimal::ZERO);
}

#[test]
fn test_load_json_file_from_disk() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(
        file,
        r#"{{"data": [{{"Item": "Salary", "Amount": "3,000", "Type": "Income", "Frequency": "Monthly"}}]}}"#
    )
    .unwrap();
    file.flush().unwrap();

    let validated = load_and_validate(file.path()).unwrap();
    assert_eq!(validated.records.len(), 1);
    assert_eq!(validated.records[0].amount, dec!(3000));
}

#[test]
fn test_unreadable_source_is_distinguishable() {
    let mut file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
    file.write_all(b"this is not a workbook").unwrap();
    file.flush().unwrap();

    let err = load_and_validate(file.path()).unwrap_err();
    assert!(err.is_source_error());

    let dir = tempfile::tempdir().unwrap();
    let txt = dir.path().join("budget.txt");
    std::fs::write(&txt, "item,amount\n").unwrap();
    let err = load_and_validate(&txt).unwrap_err();
    assert!(err.is_source_error());
}

// =============================================================================
// Rendering
// =============================================================================

#[test]
fn test_report_and_dashboard_render() {
    let validated = validate_rows(&parse_csv(household_csv().as_bytes()).unwrap());
    let config = Config::default();
    let summary = aggregate(&validated.records);
    let health = analyze_health(&summary, &validated.records, &config.health);
    let projection = project(&summary, &validated.records, &config.projection);

    // 15000 / 3450 months of coverage
    assert!(health.emergency_fund_months > dec!(4));
    assert_eq!(projection.points.len(), 13);
    assert_eq!(projection.emergency_contribution, dec!(300));
    assert_eq!(projection.retirement_contribution, dec!(500));

    let report = render_report(&ReportInput {
        source: "household.csv",
        summary: &summary,
        health: &health,
        projection: &projection,
        rejected: &validated.rejected,
    });
    assert!(report.contains("Monthly Income: $7,700.00"));
    assert!(report.contains("Net Worth: $48,000.00"));

    let html = render_dashboard(&DashboardInput {
        title: "Financial Dashboard",
        generated_at: "2024-01-15",
        records: &validated.records,
        summary: &summary,
        health: &health,
        projection: &projection,
    })
    .unwrap();
    assert!(html.contains("Car Loan Balance"));
    assert!(html.contains(&format!("{}/100", health.health_score)));
}

#[test]
fn test_bundled_example_data_agrees() {
    let data_dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data");
    let from_csv = load_and_validate(&data_dir.join("example.csv")).unwrap();
    let from_json = load_and_validate(&data_dir.join("example.json")).unwrap();

    assert!(from_csv.is_clean());
    assert!(from_json.is_clean());

    let csv_summary = aggregate(&from_csv.records);
    let json_summary = aggregate(&from_json.records);
    assert_eq!(csv_summary, json_summary);

    assert_eq!(csv_summary.record_count, 18);
    assert_eq!(csv_summary.income, dec!(5400));
    assert_eq!(csv_summary.savings_balance, dec!(51500));
    assert_eq!(csv_summary.debt_balance, dec!(20800));
    assert_eq!(csv_summary.net_worth_proxy, dec!(30700));
}

#[test]
fn test_spreadsheet_matches_csv_equivalent() {
    let fixtures = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    let from_xlsx = load_and_validate(&fixtures.join("household.xlsx")).unwrap();
    let from_csv = load_and_validate(&fixtures.join("household.csv")).unwrap();

    assert!(from_csv.is_clean());
    assert_eq!(from_xlsx.records, from_csv.records);
    assert_eq!(aggregate(&from_xlsx.records), aggregate(&from_csv.records));

    // The sheet has a blank line before its last two rows; "daily" is on the last
    assert_eq!(from_xlsx.rejected.len(), 1);
    assert_eq!(from_xlsx.rejected[0].row, 8);
    assert_eq!(
        from_xlsx.rejected[0].kind,
        ValidationErrorKind::InvalidEnum {
            field: "frequency".into(),
            value: "daily".into(),
        }
    );

    let summary = aggregate(&from_xlsx.records);
    assert_eq!(summary.income, dec!(5200));
    assert_eq!(summary.debt, dec!(310));
    assert_eq!(summary.net_worth_proxy, dec!(1100));
}
