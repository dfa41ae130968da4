//! Chart datasets and the standalone HTML dashboard
//!
//! Charts are drawn client-side by plotly.js; this module only prepares the
//! data and the page around it.

use std::fmt::Write;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::aggregate::Summary;
use crate::error::Result;
use crate::health::{HealthReport, Status};
use crate::models::{Record, RecordType};
use crate::projection::Projection;
use crate::report::{format_currency, format_percent, round_display};

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChart {
    pub months: Vec<u32>,
    pub series: Vec<Series>,
}

/// The three datasets behind the dashboard charts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub income_vs_expenses: BarChart,
    pub expense_breakdown: BarChart,
    pub projection: LineChart,
}

fn to_chart_value(amount: Decimal) -> f64 {
    round_display(amount, 2).to_f64().unwrap_or_default()
}

/// Build chart datasets from a summary and its projection
pub fn chart_data(summary: &Summary, projection: &Projection) -> ChartData {
    const FLOWS: [RecordType; 3] = [RecordType::Income, RecordType::Expense, RecordType::Debt];
    let mut labels: Vec<String> = FLOWS.iter().map(|t| t.label().to_string()).collect();
    let mut values: Vec<f64> = FLOWS.iter().map(|&t| to_chart_value(summary.total(t))).collect();
    labels.push("Net".to_string());
    values.push(to_chart_value(summary.net_monthly));
    let income_vs_expenses = BarChart { labels, values };

    let expense_breakdown = BarChart {
        labels: summary
            .expense_categories
            .iter()
            .map(|c| c.category.clone())
            .collect(),
        values: summary
            .expense_categories
            .iter()
            .map(|c| to_chart_value(c.monthly))
            .collect(),
    };

    let points = &projection.points;
    let projection = LineChart {
        months: points.iter().map(|p| p.month).collect(),
        series: vec![
            Series {
                name: "Net Worth".to_string(),
                values: points.iter().map(|p| to_chart_value(p.net_worth)).collect(),
            },
            Series {
                name: "Emergency Fund".to_string(),
                values: points.iter().map(|p| to_chart_value(p.emergency_fund)).collect(),
            },
            Series {
                name: "Retirement".to_string(),
                values: points.iter().map(|p| to_chart_value(p.retirement)).collect(),
            },
        ],
    };

    ChartData {
        income_vs_expenses,
        expense_breakdown,
        projection,
    }
}

/// Everything the dashboard needs, borrowed from one run
pub struct DashboardInput<'a> {
    pub title: &'a str,
    pub generated_at: &'a str,
    pub records: &'a [Record],
    pub summary: &'a Summary,
    pub health: &'a HealthReport,
    pub projection: &'a Projection,
}

/// Escape text for use in HTML content and attribute values
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn health_gradient(score: u32) -> &'static str {
    if score >= 75 {
        "linear-gradient(135deg, #11998e 0%, #38ef7d 100%)"
    } else if score < 50 {
        "linear-gradient(135deg, #f093fb 0%, #f5576c 100%)"
    } else {
        "linear-gradient(135deg, #f6d365 0%, #fda085 100%)"
    }
}

const STYLE: &str = r#"
body { font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; margin: 0; padding: 20px; background-color: #f5f5f5; }
.container { max-width: 1400px; margin: 0 auto; background: white; padding: 30px; border-radius: 10px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
h1 { color: #2c3e50; text-align: center; margin-bottom: 8px; }
.generated { text-align: center; color: #7f8c8d; margin-bottom: 30px; }
.summary { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 20px; margin-bottom: 30px; }
.summary-card { background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; padding: 20px; border-radius: 8px; text-align: center; }
.summary-card h3 { margin: 0 0 10px 0; font-size: 14px; opacity: 0.9; }
.summary-card .value { font-size: 28px; font-weight: bold; margin: 0; }
.charts { display: grid; grid-template-columns: 1fr 1fr; gap: 20px; }
.chart-wide { grid-column: span 2; }
.recommendations { background: #ecf0f1; padding: 20px; border-radius: 8px; margin-top: 20px; }
.recommendations ul { list-style: none; padding: 0; }
.recommendations li { padding: 8px 0; border-bottom: 1px solid #bdc3c7; }
.recommendations li:last-child { border-bottom: none; }
.ok { color: #27ae60; font-weight: bold; }
.warning { color: #e67e22; font-weight: bold; }
table { width: 100%; border-collapse: collapse; margin-top: 20px; }
th, td { padding: 8px; border-bottom: 1px solid #ddd; text-align: left; }
td.amount { text-align: right; }
"#;

const SCRIPT: &str = r#"
const data = JSON.parse(document.getElementById('chart-data').textContent);
const layout = (title, extra) => Object.assign({ title: title, template: 'plotly_white' }, extra || {});
Plotly.newPlot('chart-flow', [{
  type: 'bar', x: data.income_vs_expenses.labels, y: data.income_vs_expenses.values,
  marker: { color: ['#2ecc71', '#e74c3c', '#f39c12', '#3498db'] }
}], layout('Monthly Income vs Expenses', { yaxis: { title: 'Amount ($)' } }));
Plotly.newPlot('chart-expenses', [{
  type: 'pie', hole: 0.3, labels: data.expense_breakdown.labels, values: data.expense_breakdown.values
}], layout('Monthly Expenses Breakdown'));
Plotly.newPlot('chart-projection', data.projection.series.map(s => ({
  type: 'scatter', mode: 'lines+markers', name: s.name, x: data.projection.months, y: s.values
})), layout('Financial Projection', { xaxis: { title: 'Months' }, yaxis: { title: 'Amount ($)' } }));
"#;

fn card(out: &mut String, title: &str, value: &str, extra_style: Option<&str>) {
    let style = extra_style
        .map(|s| format!(" style=\"background: {}\"", s))
        .unwrap_or_default();
    let _ = writeln!(
        out,
        "<div class=\"summary-card\"{}><h3>{}</h3><p class=\"value\">{}</p></div>",
        style,
        escape_html(title),
        escape_html(value)
    );
}

/// Render the dashboard page
pub fn render_dashboard(input: &DashboardInput<'_>) -> Result<String> {
    let summary = input.summary;
    let health = input.health;
    let charts = chart_data(summary, input.projection);
    // Keep the embedded JSON from closing the script element early
    let charts_json = serde_json::to_string(&charts)?.replace("</", "<\\/");

    let mut out = String::new();
    let _ = writeln!(out, "<!DOCTYPE html>");
    let _ = writeln!(out, "<html>\n<head>\n<meta charset=\"utf-8\">");
    let _ = writeln!(out, "<title>{}</title>", escape_html(input.title));
    let _ = writeln!(out, "<script src=\"{}\"></script>", PLOTLY_CDN);
    let _ = writeln!(out, "<style>{}</style>\n</head>\n<body>", STYLE);
    let _ = writeln!(out, "<div class=\"container\">");
    let _ = writeln!(out, "<h1>{}</h1>", escape_html(input.title));
    let _ = writeln!(
        out,
        "<p class=\"generated\">Generated {}</p>",
        escape_html(input.generated_at)
    );

    let _ = writeln!(out, "<div class=\"summary\">");
    card(&mut out, "Monthly Income", &format_currency(summary.income), None);
    card(&mut out, "Monthly Expenses", &format_currency(summary.expense), None);
    card(&mut out, "Net Monthly", &format_currency(summary.net_monthly), None);
    card(&mut out, "Savings Rate", &format_percent(summary.savings_rate), None);
    card(&mut out, "Net Worth", &format_currency(summary.net_worth_proxy), None);
    card(
        &mut out,
        "Health Score",
        &format!("{}/100", health.health_score),
        Some(health_gradient(health.health_score)),
    );
    let _ = writeln!(out, "</div>");

    let _ = writeln!(out, "<div class=\"charts\">");
    let _ = writeln!(out, "<div id=\"chart-flow\"></div>");
    let _ = writeln!(out, "<div id=\"chart-expenses\"></div>");
    let _ = writeln!(out, "<div id=\"chart-projection\" class=\"chart-wide\"></div>");
    let _ = writeln!(out, "</div>");

    let _ = writeln!(out, "<div class=\"recommendations\">\n<h3>Recommendations</h3>\n<ul>");
    for rec in &health.recommendations {
        let class = match rec.status {
            Status::Ok => "ok",
            Status::Warning => "warning",
        };
        let _ = writeln!(
            out,
            "<li><span class=\"{}\">{}</span> {}</li>",
            class,
            rec.status.as_str(),
            escape_html(&rec.message)
        );
    }
    let _ = writeln!(out, "</ul>\n</div>");

    let _ = writeln!(out, "<table>");
    let _ = writeln!(
        out,
        "<tr><th>Category</th><th>Item</th><th>Type</th><th>Frequency</th><th>Amount</th></tr>"
    );
    for record in input.records {
        let _ = writeln!(
            out,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td class=\"amount\">{}</td></tr>",
            escape_html(record.category.as_deref().unwrap_or("")),
            escape_html(&record.item),
            record.record_type,
            record.frequency,
            format_currency(record.amount)
        );
    }
    let _ = writeln!(out, "</table>");

    let _ = writeln!(out, "</div>");
    let _ = writeln!(
        out,
        "<script type=\"application/json\" id=\"chart-data\">{}</script>",
        charts_json
    );
    let _ = writeln!(out, "<script>{}</script>", SCRIPT);
    let _ = writeln!(out, "</body>\n</html>");

    Ok(out)
}
