use super::transaction::CustomerId;
use crate::error::{RewardError, Result};
use chrono::Month;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Reward points earned by one customer, broken down by calendar month.
///
/// Months that earned nothing are absent from `monthly_points`, and
/// `total_points` is always the sum of the monthly buckets.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RewardSummary {
    pub customer_id: CustomerId,
    pub monthly_points: HashMap<Month, u64>,
    pub total_points: u64,
}

impl RewardSummary {
    pub fn new(customer_id: impl Into<CustomerId>) -> Self {
        Self {
            customer_id: customer_id.into(),
            monthly_points: HashMap::new(),
            total_points: 0,
        }
    }

    /// Credits `points` to `month`. Zero credits leave the summary untouched.
    ///
    /// Fails with `PointsOverflow`, leaving the summary unchanged, when either
    /// the month bucket or the total would no longer fit.
    pub fn credit(&mut self, month: Month, points: u64) -> Result<()> {
        if points == 0 {
            return Ok(());
        }
        let current = self.points_in(month).unwrap_or(0);
        let (Some(bucket), Some(total)) = (
            current.checked_add(points),
            self.total_points.checked_add(points),
        ) else {
            return Err(RewardError::PointsOverflow(self.customer_id.clone()));
        };
        self.monthly_points.insert(month, bucket);
        self.total_points = total;
        Ok(())
    }

    pub fn points_in(&self, month: Month) -> Option<u64> {
        self.monthly_points.get(&month).copied()
    }
}
