use super::transaction::{CustomerId, Transaction};
use crate::error::Result;
use async_trait::async_trait;
use chrono::NaiveDateTime;

/// Read access to the transaction feed, plus the bulk write used at load time.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// All transactions for `customer_id`; empty when the customer is unknown.
    async fn find_by_customer_id(&self, customer_id: &str) -> Result<Vec<Transaction>>;
    /// The customer id of every stored transaction, in store order, duplicates included.
    async fn find_all_customer_ids(&self) -> Result<Vec<CustomerId>>;
    /// Upserts by transaction id.
    async fn save_all(&self, transactions: Vec<Transaction>) -> Result<()>;
    async fn clear(&self) -> Result<()>;
}

pub type TransactionStoreBox = Box<dyn TransactionStore>;

/// Source of the instant that counts as "now" for the eligibility window.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

pub type ClockBox = Box<dyn Clock>;
