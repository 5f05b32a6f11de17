use crate::domain::ports::TransactionStore;
use crate::domain::transaction::{CustomerId, Transaction};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct Transactions {
    ordered: Vec<Transaction>,
    positions: HashMap<String, usize>,
}

/// A thread-safe in-memory store for transactions.
///
/// Keeps transactions in first-insert order so customer ids come back in the
/// order they were first seen. Saving an existing transaction id replaces it in place.
#[derive(Default, Clone)]
pub struct InMemoryTransactionStore {
    transactions: Arc<RwLock<Transactions>>,
}

impl InMemoryTransactionStore {
    /// Creates a new, empty in-memory transaction store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TransactionStore for InMemoryTransactionStore {
    async fn find_by_customer_id(&self, customer_id: &str) -> Result<Vec<Transaction>> {
        let transactions = self.transactions.read().await;
        Ok(transactions
            .ordered
            .iter()
            .filter(|tx| tx.customer_id == customer_id)
            .cloned()
            .collect())
    }

    async fn find_all_customer_ids(&self) -> Result<Vec<CustomerId>> {
        let transactions = self.transactions.read().await;
        Ok(transactions
            .ordered
            .iter()
            .map(|tx| tx.customer_id.clone())
            .collect())
    }

    async fn save_all(&self, batch: Vec<Transaction>) -> Result<()> {
        let mut guard = self.transactions.write().await;
        let transactions = &mut *guard;
        for tx in batch {
            match transactions.positions.get(&tx.id).copied() {
                Some(position) => transactions.ordered[position] = tx,
                None => {
                    let position = transactions.ordered.len();
                    transactions.positions.insert(tx.id.clone(), position);
                    transactions.ordered.push(tx);
                }
            }
        }
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let mut transactions = self.transactions.write().await;
        transactions.ordered.clear();
        transactions.positions.clear();
        Ok(())
    }
}
