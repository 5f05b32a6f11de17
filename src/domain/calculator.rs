//! Tiered point calculation and monthly aggregation.
//!
//! Everything here is pure: callers pass in the transactions and the instant
//! that counts as "now".

use super::reward::RewardSummary;
use super::transaction::Transaction;
use crate::error::{RewardError, Result};
use chrono::{Datelike, Month, Months, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;

/// Amounts at or below this earn nothing.
pub const LOWER_THRESHOLD: Decimal = dec!(50.0);
/// Every dollar above this earns double.
pub const UPPER_THRESHOLD: Decimal = dec!(100.0);
/// Points per dollar between the two thresholds.
pub const ONE_POINT: Decimal = dec!(1);
/// Points per dollar above the upper threshold.
pub const TWO_POINTS: Decimal = dec!(2);
/// Number of calendar months, counted back from the current one, that are eligible.
pub const WINDOW_MONTHS: u32 = 3;

/// Returns the reward points earned by a single purchase of `amount`.
///
/// Each tier's contribution is truncated on its own before the tiers are added.
/// `None` when the points do not fit in a `u64`.
pub fn points_for(amount: Decimal) -> Option<u64> {
    if amount.is_sign_negative() {
        return Some(0);
    }

    if amount > UPPER_THRESHOLD {
        let upper = truncate((amount - UPPER_THRESHOLD).checked_mul(TWO_POINTS)?)?;
        let middle = truncate((UPPER_THRESHOLD - LOWER_THRESHOLD) * ONE_POINT)?;
        upper.checked_add(middle)
    } else if amount > LOWER_THRESHOLD {
        truncate((amount - LOWER_THRESHOLD) * ONE_POINT)
    } else {
        Some(0)
    }
}

fn truncate(points: Decimal) -> Option<u64> {
    points.trunc().to_u64()
}

/// The range of transaction dates that count towards rewards.
///
/// Starts on the first day of the month `WINDOW_MONTHS` before `now`, at
/// `now`'s time of day, and ends at `now`. Both bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EligibilityWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl EligibilityWindow {
    pub fn ending_at(now: NaiveDateTime) -> Self {
        let start = now
            .date()
            .with_day(1)
            .and_then(|first| first.checked_sub_months(Months::new(WINDOW_MONTHS)))
            .map(|first| first.and_time(now.time()))
            .unwrap_or(NaiveDateTime::MIN);

        Self { start, end: now }
    }

    pub fn contains(&self, date: NaiveDateTime) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Builds the reward summary for `customer_id` out of its transactions.
///
/// An empty transaction list means the customer is unknown. Transactions
/// outside the eligibility window, and those earning no points, are skipped.
/// Points that no longer fit in a `u64` fail with `PointsOverflow`.
pub fn summarize(
    customer_id: &str,
    transactions: &[Transaction],
    now: NaiveDateTime,
) -> Result<RewardSummary> {
    if transactions.is_empty() {
        return Err(RewardError::CustomerNotFound(customer_id.to_string()));
    }

    let window = EligibilityWindow::ending_at(now);
    let mut summary = RewardSummary::new(customer_id);

    for tx in transactions {
        if !window.contains(tx.date) {
            continue;
        }
        let points = points_for(tx.amount)
            .ok_or_else(|| RewardError::PointsOverflow(customer_id.to_string()))?;
        if points > 0
            && let Some(month) = month_of(tx.date)
        {
            summary.credit(month, points)?;
        }
    }

    Ok(summary)
}

fn month_of(date: NaiveDateTime) -> Option<Month> {
    u8::try_from(date.month())
        .ok()
        .and_then(|month| Month::try_from(month).ok())
}
