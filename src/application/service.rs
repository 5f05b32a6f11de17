use crate::domain::calculator;
use crate::domain::ports::{ClockBox, TransactionStoreBox};
use crate::domain::reward::RewardSummary;
use crate::domain::transaction::CustomerId;
use crate::error::Result;
use std::collections::HashSet;
use tracing::{debug, info};

/// Read-side entry point for reward queries.
///
/// `RewardService` fetches a customer's transactions from the store and hands
/// them to the calculator together with the current instant from its clock.
/// It never writes to the store.
pub struct RewardService {
    store: TransactionStoreBox,
    clock: ClockBox,
}

impl RewardService {
    /// Creates a new `RewardService`.
    ///
    /// # Arguments
    ///
    /// * `store` - The transaction feed to read from.
    /// * `clock` - Decides what "now" is for the eligibility window.
    pub fn new(store: TransactionStoreBox, clock: ClockBox) -> Self {
        Self { store, clock }
    }

    /// Returns the reward summary for `customer_id`.
    ///
    /// Fails with `CustomerNotFound` when the store has no transactions for it.
    pub async fn rewards_for_customer(&self, customer_id: &str) -> Result<RewardSummary> {
        let transactions = self.store.find_by_customer_id(customer_id).await?;
        let summary = calculator::summarize(customer_id, &transactions, self.clock.now())?;
        debug!(
            customer_id,
            transactions = transactions.len(),
            total_points = summary.total_points,
            "Computed reward summary"
        );
        Ok(summary)
    }

    /// Returns one summary per distinct customer, in the order customers were
    /// first seen by the store.
    ///
    /// Stops at the first customer that fails; no partial results are returned.
    pub async fn rewards_for_all_customers(&self) -> Result<Vec<RewardSummary>> {
        let customer_ids = distinct_in_order(self.store.find_all_customer_ids().await?);
        info!(customers = customer_ids.len(), "Computing rewards for all customers");

        let mut summaries = Vec::with_capacity(customer_ids.len());
        for customer_id in &customer_ids {
            summaries.push(self.rewards_for_customer(customer_id).await?);
        }
        Ok(summaries)
    }
}

fn distinct_in_order(ids: Vec<CustomerId>) -> Vec<CustomerId> {
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::TransactionStore;
    use crate::domain::transaction::Transaction;
    use crate::error::RewardError;
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::in_memory::InMemoryTransactionStore;
    use async_trait::async_trait;
    use chrono::{Month, NaiveDate, NaiveDateTime};
    use rust_decimal_macros::dec;

    fn at(year: i32, month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn service_with(store: InMemoryTransactionStore, now: NaiveDateTime) -> RewardService {
        RewardService::new(Box::new(store), Box::new(FixedClock(now)))
    }

    #[test]
    fn test_distinct_in_order() {
        let ids = vec!["b", "a", "b", "c", "a"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(distinct_in_order(ids), vec!["b", "a", "c"]);
    }

    #[tokio::test]
    async fn test_rewards_for_customer() {
        let store = InMemoryTransactionStore::new();
        store
            .save_all(vec![
                Transaction::new("1", "cust123", dec!(120.0), at(2024, 1, 10)),
                Transaction::new("2", "cust123", dec!(80.0), at(2024, 2, 15)),
                Transaction::new("3", "cust123", dec!(45.0), at(2024, 3, 20)),
                Transaction::new("4", "other", dec!(500.0), at(2024, 3, 20)),
            ])
            .await
            .unwrap();
        let service = service_with(store, at(2024, 3, 25));

        let summary = service.rewards_for_customer("cust123").await.unwrap();

        assert_eq!(summary.points_in(Month::January), Some(90));
        assert_eq!(summary.points_in(Month::February), Some(30));
        assert_eq!(summary.total_points, 120);
    }

    #[tokio::test]
    async fn test_rewards_for_unknown_customer() {
        let service = service_with(InMemoryTransactionStore::new(), at(2024, 3, 25));

        let err = service.rewards_for_customer("nobody").await.unwrap_err();
        assert!(matches!(err, RewardError::CustomerNotFound(ref id) if id == "nobody"));
    }

    #[tokio::test]
    async fn test_rewards_for_all_customers_in_first_seen_order() {
        let store = InMemoryTransactionStore::new();
        store
            .save_all(vec![
                Transaction::new("1", "customer1", dec!(120.0), at(2024, 5, 1)),
                Transaction::new("2", "customer2", dec!(200.0), at(2024, 4, 1)),
                Transaction::new("3", "customer1", dec!(80.0), at(2024, 4, 1)),
            ])
            .await
            .unwrap();
        let service = service_with(store, at(2024, 6, 1));

        let all = service.rewards_for_all_customers().await.unwrap();

        assert_eq!(all.len(), 2);
        assert_eq!(all[0].customer_id, "customer1");
        assert_eq!(all[1].customer_id, "customer2");
        assert_eq!(all[0], service.rewards_for_customer("customer1").await.unwrap());
        assert_eq!(all[1], service.rewards_for_customer("customer2").await.unwrap());
    }

    #[tokio::test]
    async fn test_rewards_for_all_customers_empty_store() {
        let service = service_with(InMemoryTransactionStore::new(), at(2024, 6, 1));
        assert!(service.rewards_for_all_customers().await.unwrap().is_empty());
    }

    /// Lists a customer id that has no transactions behind it.
    struct VanishingCustomerStore;

    #[async_trait]
    impl TransactionStore for VanishingCustomerStore {
        async fn find_by_customer_id(&self, customer_id: &str) -> Result<Vec<Transaction>> {
            if customer_id == "ghost" {
                return Ok(Vec::new());
            }
            Ok(vec![Transaction::new("1", customer_id, dec!(75.0), at(2024, 5, 1))])
        }

        async fn find_all_customer_ids(&self) -> Result<Vec<CustomerId>> {
            Ok(vec!["real".to_string(), "ghost".to_string()])
        }

        async fn save_all(&self, _transactions: Vec<Transaction>) -> Result<()> {
            Ok(())
        }

        async fn clear(&self) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_rewards_for_all_customers_fails_fast() {
        let service = RewardService::new(
            Box::new(VanishingCustomerStore),
            Box::new(FixedClock(at(2024, 6, 1))),
        );

        let err = service.rewards_for_all_customers().await.unwrap_err();
        assert!(matches!(err, RewardError::CustomerNotFound(ref id) if id == "ghost"));
    }
}
