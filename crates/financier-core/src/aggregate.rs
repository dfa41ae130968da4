//! Aggregation engine
//!
//! Folds validated records into a `Summary`:
//! 1. Every recurring amount is normalized to a monthly equivalent
//!    (weekly × 52 / 12, yearly / 12).
//! 2. Monthly equivalents are summed per record type and per category.
//! 3. One-time savings and debt amounts are kept apart as balances; they
//!    never enter the monthly flow totals.
//! 4. Derived metrics are computed once from the totals.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::models::{Frequency, Record, RecordType};

/// Monthly-equivalent value of a recurring amount, zero for one-time amounts
pub fn monthly_equivalent(amount: Decimal, frequency: Frequency) -> Decimal {
    match frequency {
        Frequency::Monthly => amount,
        Frequency::Weekly => amount * Decimal::from(52) / Decimal::from(12),
        Frequency::Yearly => amount / Decimal::from(12),
        Frequency::OneTime => Decimal::ZERO,
    }
}

/// Monthly total for one category, in first-appearance order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub monthly: Decimal,
}

/// Immutable result of aggregating one record collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Monthly income flow
    pub income: Decimal,
    /// Monthly expense flow
    pub expense: Decimal,
    /// Monthly savings contributions
    pub savings: Decimal,
    /// Monthly debt payments
    pub debt: Decimal,
    /// Sum of one-time savings amounts (balances)
    pub savings_balance: Decimal,
    /// Sum of one-time debt amounts (balances)
    pub debt_balance: Decimal,
    /// Monthly flows of every type, grouped by category
    pub categories: Vec<CategoryTotal>,
    /// Monthly expense flows only, grouped by category
    pub expense_categories: Vec<CategoryTotal>,
    pub net_monthly: Decimal,
    /// Fraction of income saved each month (0.25 = 25%)
    pub savings_rate: Decimal,
    pub net_worth_proxy: Decimal,
    pub record_count: usize,
}

impl Summary {
    /// Monthly flow total for a record type
    pub fn total(&self, record_type: RecordType) -> Decimal {
        match record_type {
            RecordType::Income => self.income,
            RecordType::Expense => self.expense,
            RecordType::Savings => self.savings,
            RecordType::Debt => self.debt,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }
}

impl Default for Summary {
    fn default() -> Self {
        aggregate(&[])
    }
}

fn add_to_category(categories: &mut Vec<CategoryTotal>, key: &str, amount: Decimal) {
    match categories.iter_mut().find(|c| c.category == key) {
        Some(total) => total.monthly += amount,
        None => categories.push(CategoryTotal {
            category: key.to_string(),
            monthly: amount,
        }),
    }
}

/// Aggregate records into a summary; an empty slice yields all zeros
pub fn aggregate(records: &[Record]) -> Summary {
    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;
    let mut savings = Decimal::ZERO;
    let mut debt = Decimal::ZERO;
    let mut savings_balance = Decimal::ZERO;
    let mut debt_balance = Decimal::ZERO;
    let mut categories = Vec::new();
    let mut expense_categories = Vec::new();

    for record in records {
        if !record.frequency.is_recurring() {
            match record.record_type {
                RecordType::Savings => savings_balance += record.amount,
                RecordType::Debt => debt_balance += record.amount,
                RecordType::Income | RecordType::Expense => {
                    debug!(
                        "One-time {} '{}' is not part of any total",
                        record.record_type, record.item
                    );
                }
            }
            continue;
        }

        let monthly = monthly_equivalent(record.amount, record.frequency);
        match record.record_type {
            RecordType::Income => income += monthly,
            RecordType::Expense => {
                expense += monthly;
                add_to_category(&mut expense_categories, record.category_key(), monthly);
            }
            RecordType::Savings => savings += monthly,
            RecordType::Debt => debt += monthly,
        }
        add_to_category(&mut categories, record.category_key(), monthly);
    }

    let savings_rate = if income.is_zero() {
        Decimal::ZERO
    } else {
        savings / income
    };

    let summary = Summary {
        income,
        expense,
        savings,
        debt,
        savings_balance,
        debt_balance,
        categories,
        expense_categories,
        net_monthly: income - expense - debt,
        savings_rate,
        net_worth_proxy: savings_balance - debt_balance,
        record_count: records.len(),
    };

    debug!(
        "Aggregated {} records: income={} expense={} net={}",
        summary.record_count,
        summary.income.round_dp(2),
        summary.expense.round_dp(2),
        summary.net_monthly.round_dp(2)
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn rec(item: &str, amount: Decimal, t: RecordType, f: Frequency) -> Record {
        Record::new(item, amount, t, f)
    }

    #[test]
    fn test_monthly_equivalent() {
        assert_eq!(monthly_equivalent(dec!(100), Frequency::Monthly), dec!(100));
        assert_eq!(monthly_equivalent(dec!(1200), Frequency::Yearly), dec!(100));
        assert_eq!(monthly_equivalent(dec!(120), Frequency::Weekly), dec!(520));
        assert_eq!(monthly_equivalent(dec!(5000), Frequency::OneTime), dec!(0));
    }

    #[test]
    fn test_empty_input_is_zeroed() {
        let summary = aggregate(&[]);
        assert!(summary.is_empty());
        assert_eq!(summary.income, Decimal::ZERO);
        assert_eq!(summary.savings_rate, Decimal::ZERO);
        assert_eq!(summary.net_worth_proxy, Decimal::ZERO);
        assert!(summary.categories.is_empty());
        assert_eq!(summary, Summary::default());
    }

    #[test]
    fn test_single_record_lands_in_its_type() {
        for &t in RecordType::all() {
            let summary = aggregate(&[rec("X", dec!(2400), t, Frequency::Yearly)]);
            for &other in RecordType::all() {
                let expected = if other == t { dec!(200) } else { Decimal::ZERO };
                assert_eq!(summary.total(other), expected, "{} in {}", t, other);
            }
        }
    }

    #[test]
    fn test_linear_in_amount() {
        let single = aggregate(&[rec("Pay", dec!(600), RecordType::Income, Frequency::Weekly)]);
        let double = aggregate(&[rec("Pay", dec!(1200), RecordType::Income, Frequency::Weekly)]);
        assert_eq!(double.income, single.income * dec!(2));
    }

    #[test]
    fn test_one_time_only_feeds_balances() {
        let records = vec![
            rec("Emergency Fund Balance", dec!(15000), RecordType::Savings, Frequency::OneTime),
            rec("Car Loan", dec!(4000), RecordType::Debt, Frequency::OneTime),
            rec("Bonus", dec!(3000), RecordType::Income, Frequency::OneTime),
        ];
        let summary = aggregate(&records);
        for &t in RecordType::all() {
            assert_eq!(summary.total(t), Decimal::ZERO);
        }
        assert_eq!(summary.savings_balance, dec!(15000));
        assert_eq!(summary.debt_balance, dec!(4000));
        assert_eq!(summary.net_worth_proxy, dec!(11000));
        assert!(summary.categories.is_empty());
        assert_eq!(summary.record_count, 3);
    }

    #[test]
    fn test_savings_rate_zero_without_income() {
        let summary = aggregate(&[rec("401k", dec!(500), RecordType::Savings, Frequency::Monthly)]);
        assert_eq!(summary.savings, dec!(500));
        assert_eq!(summary.savings_rate, Decimal::ZERO);
    }

    #[test]
    fn test_savings_rate() {
        let summary = aggregate(&[
            rec("Salary", dec!(4000), RecordType::Income, Frequency::Monthly),
            rec("401k", dec!(1000), RecordType::Savings, Frequency::Monthly),
        ]);
        assert_eq!(summary.savings_rate, dec!(0.25));
    }

    #[test]
    fn test_category_order_is_first_appearance() {
        let records = vec![
            rec("Coffee", dec!(5), RecordType::Expense, Frequency::Monthly).with_category("Food"),
            rec("Rent", dec!(2000), RecordType::Expense, Frequency::Monthly).with_category("Housing"),
            rec("Groceries", dec!(400), RecordType::Expense, Frequency::Monthly).with_category("Food"),
            rec("Salary", dec!(6000), RecordType::Income, Frequency::Monthly),
        ];
        let summary = aggregate(&records);
        let keys: Vec<_> = summary.categories.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(keys, vec!["Food", "Housing", "Salary"]);
        assert_eq!(summary.categories[0].monthly, dec!(405));

        let expense_keys: Vec<_> = summary
            .expense_categories
            .iter()
            .map(|c| c.category.as_str())
            .collect();
        assert_eq!(expense_keys, vec!["Food", "Housing"]);
    }

    #[test]
    fn test_salary_mortgage_emergency_fund_scenario() {
        let records = vec![
            rec("Salary", dec!(7500), RecordType::Income, Frequency::Monthly),
            rec("Mortgage", dec!(2500), RecordType::Expense, Frequency::Monthly),
            rec("Emergency Fund Balance", dec!(15000), RecordType::Savings, Frequency::OneTime),
        ];
        let summary = aggregate(&records);
        assert_eq!(summary.income, dec!(7500));
        assert_eq!(summary.expense, dec!(2500));
        assert_eq!(summary.savings, dec!(0));
        assert_eq!(summary.debt, dec!(0));
        assert_eq!(summary.net_monthly, dec!(5000));
        assert_eq!(summary.savings_rate, dec!(0));
        assert_eq!(summary.net_worth_proxy, dec!(15000));
    }

    #[test]
    fn test_debt_reduces_net_monthly() {
        let summary = aggregate(&[
            rec("Salary", dec!(5000), RecordType::Income, Frequency::Monthly),
            rec("Car Payment", dec!(350), RecordType::Debt, Frequency::Monthly),
            rec("Netflix", dec!(180), RecordType::Expense, Frequency::Yearly),
        ]);
        assert_eq!(summary.net_monthly, dec!(4635));
    }

    #[test]
    fn test_no_cent_drift_over_many_rows() {
        let records: Vec<_> = (0..1000)
            .map(|i| rec(&format!("Item {}", i), dec!(0.10), RecordType::Expense, Frequency::Monthly))
            .collect();
        assert_eq!(aggregate(&records).expense, dec!(100.00));
    }
}
