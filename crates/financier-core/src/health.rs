//! Financial health analysis
//!
//! Scores four aspects of a summary, 25 points each:
//! - Emergency fund coverage (months of expenses held in the emergency fund)
//! - Savings rate
//! - Debt-to-income ratio (debt balance over monthly income)
//! - Net worth sign

use rust_decimal::Decimal;
use serde::Serialize;

use crate::aggregate::Summary;
use crate::config::HealthConfig;
use crate::models::{Frequency, Record, RecordType};

const FULL_POINTS: u32 = 25;
const PARTIAL_POINTS: u32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Ok,
    Warning,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Warning => "WARNING",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub status: Status,
    pub message: String,
}

impl Recommendation {
    fn ok(message: &str) -> Self {
        Self {
            status: Status::Ok,
            message: message.to_string(),
        }
    }

    fn warning(message: &str) -> Self {
        Self {
            status: Status::Warning,
            message: message.to_string(),
        }
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status.as_str(), self.message)
    }
}

/// Result of the health analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    /// 0 to 100
    pub health_score: u32,
    pub emergency_fund: Decimal,
    pub emergency_fund_months: Decimal,
    pub debt_to_income: Decimal,
    pub savings_rate: Decimal,
    pub net_worth: Decimal,
    pub recommendations: Vec<Recommendation>,
}

/// Sum of one-time savings records whose item matches `item` (case-insensitive)
pub fn balance_of(records: &[Record], item: &str) -> Decimal {
    records
        .iter()
        .filter(|r| {
            r.record_type == RecordType::Savings
                && r.frequency == Frequency::OneTime
                && r.item.eq_ignore_ascii_case(item)
        })
        .map(|r| r.amount)
        .sum()
}

/// Analyze a summary against the configured thresholds
pub fn analyze_health(summary: &Summary, records: &[Record], config: &HealthConfig) -> HealthReport {
    let emergency_fund = balance_of(records, &config.emergency_fund_item);
    let emergency_fund_months = if summary.expense.is_zero() {
        Decimal::ZERO
    } else {
        emergency_fund / summary.expense
    };

    let debt_to_income = if summary.income.is_zero() {
        Decimal::ZERO
    } else {
        summary.debt_balance / summary.income
    };

    let mut score = 0;
    let mut recommendations = Vec::with_capacity(4);

    if emergency_fund_months >= config.months_excellent {
        score += FULL_POINTS;
        recommendations.push(Recommendation::ok("Excellent emergency fund coverage"));
    } else if emergency_fund_months >= config.months_adequate {
        score += PARTIAL_POINTS;
        recommendations.push(Recommendation::warning(
            "Emergency fund is adequate but could be improved",
        ));
    } else {
        recommendations.push(Recommendation::warning(
            "Emergency fund is below recommended 3-6 months of expenses",
        ));
    }

    if summary.savings_rate >= config.savings_rate_excellent {
        score += FULL_POINTS;
        recommendations.push(Recommendation::ok("Excellent savings rate (20%+)"));
    } else if summary.savings_rate >= config.savings_rate_good {
        score += PARTIAL_POINTS;
        recommendations.push(Recommendation::warning("Good savings rate, aim for 20%+"));
    } else {
        recommendations.push(Recommendation::warning(
            "Low savings rate - consider reducing expenses",
        ));
    }

    if debt_to_income < config.debt_to_income_low {
        score += FULL_POINTS;
        recommendations.push(Recommendation::ok("Manageable debt level"));
    } else if debt_to_income < config.debt_to_income_moderate {
        score += PARTIAL_POINTS;
        recommendations.push(Recommendation::warning(
            "Moderate debt level - focus on paying down high-interest debt",
        ));
    } else {
        recommendations.push(Recommendation::warning(
            "High debt-to-income ratio - prioritize debt reduction",
        ));
    }

    if summary.net_worth_proxy > Decimal::ZERO {
        score += FULL_POINTS;
        recommendations.push(Recommendation::ok("Positive net worth"));
    } else {
        recommendations.push(Recommendation::warning(
            "Negative net worth - focus on building savings and reducing debt",
        ));
    }

    HealthReport {
        health_score: score,
        emergency_fund,
        emergency_fund_months,
        debt_to_income,
        savings_rate: summary.savings_rate,
        net_worth: summary.net_worth_proxy,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use rust_decimal_macros::dec;

    fn rec(item: &str, amount: Decimal, t: RecordType, f: Frequency) -> Record {
        Record::new(item, amount, t, f)
    }

    #[test]
    fn test_perfect_score() {
        let records = vec![
            rec("Salary", dec!(6000), RecordType::Income, Frequency::Monthly),
            rec("Rent", dec!(2000), RecordType::Expense, Frequency::Monthly),
            rec("401k", dec!(1500), RecordType::Savings, Frequency::Monthly),
            rec("Emergency Fund Balance", dec!(12000), RecordType::Savings, Frequency::OneTime),
        ];
        let summary = aggregate(&records);
        let report = analyze_health(&summary, &records, &HealthConfig::default());

        assert_eq!(report.emergency_fund, dec!(12000));
        assert_eq!(report.emergency_fund_months, dec!(6));
        assert_eq!(report.health_score, 100);
        assert!(report.recommendations.iter().all(|r| r.status == Status::Ok));
    }

    #[test]
    fn test_empty_summary_scores_debt_only() {
        let summary = aggregate(&[]);
        let report = analyze_health(&summary, &[], &HealthConfig::default());

        // Zero debt-to-income is the only passing check
        assert_eq!(report.health_score, 25);
        assert_eq!(report.emergency_fund_months, Decimal::ZERO);
        assert_eq!(report.recommendations.len(), 4);
    }

    #[test]
    fn test_partial_bands() {
        let records = vec![
            rec("Salary", dec!(5000), RecordType::Income, Frequency::Monthly),
            rec("Rent", dec!(2000), RecordType::Expense, Frequency::Monthly),
            rec("Savings", dec!(600), RecordType::Savings, Frequency::Monthly),
            rec("emergency fund balance", dec!(8000), RecordType::Savings, Frequency::OneTime),
            rec("Student Loan", dec!(15000), RecordType::Debt, Frequency::OneTime),
        ];
        let summary = aggregate(&records);
        let report = analyze_health(&summary, &records, &HealthConfig::default());

        // 4 months, 12% savings, 3x debt-to-income, net worth negative
        assert_eq!(report.emergency_fund_months, dec!(4));
        assert_eq!(report.debt_to_income, dec!(3));
        assert_eq!(report.health_score, 45);
        assert_eq!(report.recommendations[3].status, Status::Warning);
    }

    #[test]
    fn test_recommendation_display() {
        let rec = Recommendation::ok("Positive net worth");
        assert_eq!(rec.to_string(), "OK: Positive net worth");
    }
}
