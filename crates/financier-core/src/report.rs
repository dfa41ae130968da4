//! Plain-text financial report

use std::fmt::Write;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::aggregate::{CategoryTotal, Summary};
use crate::error::ValidationError;
use crate::health::HealthReport;
use crate::projection::Projection;

const RULE: &str = "============================================================";

/// Everything the report needs, borrowed from one run
pub struct ReportInput<'a> {
    pub source: &'a str,
    pub summary: &'a Summary,
    pub health: &'a HealthReport,
    pub projection: &'a Projection,
    pub rejected: &'a [ValidationError],
}

/// Round half away from zero to `dp` places for display
pub fn round_display(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Format with exactly `dp` decimals, rounding rather than truncating
pub fn format_fixed(value: Decimal, dp: u32) -> String {
    format!("{:.*}", dp as usize, round_display(value, dp))
}

/// Format an amount as `$1,234.56` (or `-$1,234.56`)
pub fn format_currency(amount: Decimal) -> String {
    let rounded = round_display(amount, 2);
    let negative = rounded < Decimal::ZERO;
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}${}.{}", if negative { "-" } else { "" }, grouped, cents)
}

/// Format a ratio as a percentage with one decimal (0.253 -> "25.3%")
pub fn format_percent(ratio: Decimal) -> String {
    format!("{}%", format_fixed(ratio * Decimal::ONE_HUNDRED, 1))
}

fn write_categories(out: &mut String, title: &str, categories: &[CategoryTotal]) {
    if categories.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n{}:", title);
    for cat in categories {
        let _ = writeln!(out, "   {:30} {:>14}", cat.category, format_currency(cat.monthly));
    }
}

/// Render the summary block printed to the console and saved to the report file
pub fn render_report(input: &ReportInput<'_>) -> String {
    let summary = input.summary;
    let health = input.health;
    let mut out = String::new();

    let _ = writeln!(out, "\n{}", RULE);
    let _ = writeln!(out, "FINANCIAL SUMMARY");
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "Source: {} ({} records)", input.source, summary.record_count);

    if summary.is_empty() {
        let _ = writeln!(out, "\nNo valid records found.");
    }

    let _ = writeln!(out, "\nMonthly Income: {}", format_currency(summary.income));
    let _ = writeln!(out, "Monthly Expenses: {}", format_currency(summary.expense));
    let _ = writeln!(out, "Monthly Debt Payments: {}", format_currency(summary.debt));
    let _ = writeln!(out, "Monthly Savings: {}", format_currency(summary.savings));
    let _ = writeln!(out, "Net Monthly: {}", format_currency(summary.net_monthly));
    let _ = writeln!(out, "Savings Rate: {}", format_percent(summary.savings_rate));

    let _ = writeln!(out, "\nNet Worth: {}", format_currency(summary.net_worth_proxy));
    let _ = writeln!(out, "Total Savings: {}", format_currency(summary.savings_balance));
    let _ = writeln!(out, "Total Debt: {}", format_currency(summary.debt_balance));

    let _ = writeln!(out, "\nFinancial Health Score: {}/100", health.health_score);
    let _ = writeln!(
        out,
        "Emergency Fund Coverage: {} months",
        format_fixed(health.emergency_fund_months, 1)
    );
    let _ = writeln!(
        out,
        "Debt-to-Income Ratio: {}",
        format_fixed(health.debt_to_income, 2)
    );

    let _ = writeln!(out, "\nRecommendations:");
    for rec in &health.recommendations {
        let _ = writeln!(out, "   {}", rec);
    }

    if let Some(end) = input.projection.last() {
        let _ = writeln!(out, "\n{}-Month Projections:", input.projection.months);
        let _ = writeln!(out, "   Projected Net Worth: {}", format_currency(end.net_worth));
        let _ = writeln!(
            out,
            "   Projected Emergency Fund: {}",
            format_currency(end.emergency_fund)
        );
        let _ = writeln!(out, "   Projected Retirement: {}", format_currency(end.retirement));
    }

    write_categories(&mut out, "Monthly Flows by Category", &summary.categories);

    if !input.rejected.is_empty() {
        let _ = writeln!(out, "\nSkipped {} invalid rows:", input.rejected.len());
        for err in input.rejected {
            let _ = writeln!(out, "   {}", err);
        }
    }

    out
}
