use crate::domain::ports::TransactionStore;
use crate::domain::transaction::Transaction;
use crate::error::Result;
use tracing::{info, warn};

/// Replaces the store's contents with a freshly read transaction feed.
pub struct DataLoader<'a> {
    store: &'a dyn TransactionStore,
}

impl<'a> DataLoader<'a> {
    pub fn new(store: &'a dyn TransactionStore) -> Self {
        Self { store }
    }

    /// Clears the store and saves every readable transaction from `rows`.
    ///
    /// Rows that failed to read are logged and skipped. Returns the number of
    /// transactions saved.
    pub async fn load<I>(&self, rows: I) -> Result<usize>
    where
        I: IntoIterator<Item = Result<Transaction>>,
    {
        self.store.clear().await?;

        let mut transactions = Vec::new();
        for row in rows {
            match row {
                Ok(tx) => transactions.push(tx),
                Err(e) => warn!("Error reading transaction: {}", e),
            }
        }

        let count = transactions.len();
        self.store.save_all(transactions).await?;
        info!("Loaded {} transactions", count);
        Ok(count)
    }
}
