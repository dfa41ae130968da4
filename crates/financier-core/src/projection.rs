//! Month-by-month projection of net worth, emergency fund and retirement savings

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;

use crate::aggregate::{monthly_equivalent, Summary};
use crate::config::{ProjectionConfig, MAX_PROJECTION_MONTHS};
use crate::health::balance_of;
use crate::models::Record;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectionPoint {
    pub month: u32,
    pub net_worth: Decimal,
    pub emergency_fund: Decimal,
    pub retirement: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Projection {
    pub months: u32,
    pub monthly_savings: Decimal,
    pub emergency_contribution: Decimal,
    pub retirement_contribution: Decimal,
    /// One point per month, `0..=months`
    pub points: Vec<ProjectionPoint>,
}

impl Projection {
    /// Point at the end of the horizon
    pub fn last(&self) -> Option<&ProjectionPoint> {
        self.points.last()
    }
}

/// Monthly flow for items named `item` (case-insensitive), any record type
fn contribution_of(records: &[Record], item: &str) -> Decimal {
    records
        .iter()
        .filter(|r| r.frequency.is_recurring() && r.item.eq_ignore_ascii_case(item))
        .map(|r| monthly_equivalent(r.amount, r.frequency))
        .sum()
}

/// Pin an overflowed result to the end of the Decimal range it was heading for
fn saturate(value: Option<Decimal>, negative: bool) -> Decimal {
    value.unwrap_or(if negative { Decimal::MIN } else { Decimal::MAX })
}

/// `base + step * m` without overflowing
fn linear(base: Decimal, step: Decimal, m: Decimal) -> Decimal {
    saturate(
        step.checked_mul(m).and_then(|delta| base.checked_add(delta)),
        step.is_sign_negative(),
    )
}

/// Project `config.months` months forward from the current summary
///
/// Net worth grows linearly by `net_monthly`, the emergency fund by its
/// monthly contribution, and the retirement balance compounds monthly at
/// `annual_return / 12` before each contribution is added. The horizon is
/// capped at `MAX_PROJECTION_MONTHS`, and values that leave the Decimal range
/// saturate instead of overflowing.
pub fn project(summary: &Summary, records: &[Record], config: &ProjectionConfig) -> Projection {
    let months = if config.months > MAX_PROJECTION_MONTHS {
        warn!(
            "Projection horizon of {} months capped at {}",
            config.months, MAX_PROJECTION_MONTHS
        );
        MAX_PROJECTION_MONTHS
    } else {
        config.months
    };

    let emergency_start = balance_of(records, &config.emergency_fund_item);
    let emergency_contribution = contribution_of(records, &config.emergency_fund_contribution_item);
    let retirement_contribution = contribution_of(records, &config.retirement_contribution_item);
    let growth = Decimal::ONE + config.annual_return / Decimal::from(12);

    let mut retirement = balance_of(records, &config.retirement_item);
    let mut saturated = false;
    let mut points = Vec::with_capacity(months as usize + 1);

    for month in 0..=months {
        if month > 0 {
            let next = retirement
                .checked_mul(growth)
                .and_then(|r| r.checked_add(retirement_contribution));
            if next.is_none() && !saturated {
                warn!("Retirement projection left the representable range at month {}", month);
                saturated = true;
            }
            retirement = saturate(next, growth.is_sign_negative());
        }
        let m = Decimal::from(month);
        points.push(ProjectionPoint {
            month,
            net_worth: linear(summary.net_worth_proxy, summary.net_monthly, m),
            emergency_fund: linear(emergency_start, emergency_contribution, m),
            retirement,
        });
    }

    Projection {
        months,
        monthly_savings: summary.net_monthly,
        emergency_contribution,
        retirement_contribution,
        points,
    }
}
