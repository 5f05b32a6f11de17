use crate::domain::ports::TransactionStore;
use crate::domain::transaction::{CustomerId, Transaction};
use crate::error::{RewardError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, IteratorMode, Options, WriteBatch};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Column Family holding transactions keyed by insertion sequence number.
pub const CF_TRANSACTIONS: &str = "transactions";
/// Column Family mapping a transaction id to its sequence number.
pub const CF_TRANSACTION_IDS: &str = "transaction_ids";

/// Projection of a stored transaction that only reads the customer id.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CustomerRef {
    customer_id: CustomerId,
}

/// A persistent transaction store backed by RocksDB.
///
/// Transactions are stored as JSON under big-endian sequence numbers, so a
/// forward scan returns them in first-insert order. A second Column Family
/// indexes transaction ids to make `save_all` an upsert.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the required column families exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_transactions = ColumnFamilyDescriptor::new(CF_TRANSACTIONS, Options::default());
        let cf_ids = ColumnFamilyDescriptor::new(CF_TRANSACTION_IDS, Options::default());

        let db = DB::open_cf_descriptors(&opts, path, vec![cf_transactions, cf_ids])?;

        Ok(Self { db: Arc::new(db) })
    }

    fn cf(&self, name: &str) -> Result<&ColumnFamily> {
        self.db.cf_handle(name).ok_or_else(|| {
            RewardError::InternalError(Box::new(std::io::Error::other(format!(
                "{} column family not found",
                name
            ))))
        })
    }

    fn scan<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        let cf = self.cf(CF_TRANSACTIONS)?;
        let mut items = Vec::new();
        for item in self.db.iterator_cf(cf, IteratorMode::Start) {
            let (_key, value) = item?;
            items.push(decode(&value)?);
        }
        Ok(items)
    }

    fn next_sequence(&self) -> Result<u64> {
        let cf = self.cf(CF_TRANSACTIONS)?;
        match self.db.iterator_cf(cf, IteratorMode::End).next() {
            Some(item) => {
                let (key, _value) = item?;
                Ok(decode_sequence(&key)? + 1)
            }
            None => Ok(0),
        }
    }
}

impl From<rocksdb::Error> for RewardError {
    fn from(e: rocksdb::Error) -> Self {
        RewardError::InternalError(Box::new(e))
    }
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|e| {
        RewardError::InternalError(Box::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("Deserialization error: {}", e),
        )))
    })
}

fn decode_sequence(bytes: &[u8]) -> Result<u64> {
    let raw: [u8; 8] = bytes.try_into().map_err(|_| {
        RewardError::InternalError(Box::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "Malformed sequence key",
        )))
    })?;
    Ok(u64::from_be_bytes(raw))
}

#[async_trait]
impl TransactionStore for RocksDBStore {
    async fn find_by_customer_id(&self, customer_id: &str) -> Result<Vec<Transaction>> {
        let transactions: Vec<Transaction> = self.scan()?;
        Ok(transactions
            .into_iter()
            .filter(|tx| tx.customer_id == customer_id)
            .collect())
    }

    async fn find_all_customer_ids(&self) -> Result<Vec<CustomerId>> {
        let refs: Vec<CustomerRef> = self.scan()?;
        Ok(refs.into_iter().map(|r| r.customer_id).collect())
    }

    async fn save_all(&self, transactions: Vec<Transaction>) -> Result<()> {
        let cf_transactions = self.cf(CF_TRANSACTIONS)?;
        let cf_ids = self.cf(CF_TRANSACTION_IDS)?;

        let mut next = self.next_sequence()?;
        let mut assigned: HashMap<String, u64> = HashMap::new();
        let mut batch = WriteBatch::default();

        for tx in transactions {
            let sequence = match assigned.get(&tx.id) {
                Some(&sequence) => sequence,
                None => match self.db.get_cf(cf_ids, tx.id.as_bytes())? {
                    Some(bytes) => decode_sequence(&bytes)?,
                    None => {
                        let sequence = next;
                        next += 1;
                        sequence
                    }
                },
            };
            assigned.insert(tx.id.clone(), sequence);

            let value = serde_json::to_vec(&tx).map_err(|e| {
                RewardError::InternalError(Box::new(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!("Serialization error: {}", e),
                )))
            })?;
            let key = sequence.to_be_bytes();
            batch.put_cf(cf_transactions, key, value);
            batch.put_cf(cf_ids, tx.id.as_bytes(), key);
        }

        self.db.write(batch)?;
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let mut batch = WriteBatch::default();
        for name in [CF_TRANSACTIONS, CF_TRANSACTION_IDS] {
            let cf = self.cf(name)?;
            for item in self.db.iterator_cf(cf, IteratorMode::Start) {
                let (key, _value) = item?;
                batch.delete_cf(cf, key);
            }
        }
        self.db.write(batch)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    fn tx(id: &str, customer_id: &str) -> Transaction {
        let date = NaiveDate::from_ymd_opt(2024, 1, 10)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        Transaction::new(id, customer_id, dec!(120.0), date)
    }

    #[tokio::test]
    async fn test_rocksdb_open_cf() {
        let dir = tempdir().unwrap();
        let store = RocksDBStore::open(dir.path()).expect("Failed to open RocksDB");

        assert!(store.db.cf_handle(CF_TRANSACTIONS).is_some());
        assert!(store.db.cf_handle(CF_TRANSACTION_IDS).is_some());
    }

    #[test]
    fn test_rocksdb_open_error_maps_to_internal_error() {
        let file = tempfile::NamedTempFile::new().unwrap();

        let result = RocksDBStore::open(file.path());
        assert!(matches!(result, Err(RewardError::InternalError(_))));
    }

    #[tokio::test]
    async fn test_rocksdb_transaction_store() {
        let dir = tempdir().unwrap();
        let store = RocksDBStore::open(dir.path()).unwrap();

        store
            .save_all(vec![tx("1", "c2"), tx("2", "c1"), tx("3", "c2")])
            .await
            .unwrap();

        let found = store.find_by_customer_id("c2").await.unwrap();
        assert_eq!(found, vec![tx("1", "c2"), tx("3", "c2")]);
        assert_eq!(
            store.find_all_customer_ids().await.unwrap(),
            vec!["c2", "c1", "c2"]
        );
        assert!(store.find_by_customer_id("c9").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rocksdb_upsert_and_clear() {
        let dir = tempdir().unwrap();
        let store = RocksDBStore::open(dir.path()).unwrap();

        store.save_all(vec![tx("1", "c1"), tx("2", "c2")]).await.unwrap();
        store.save_all(vec![tx("1", "c3")]).await.unwrap();
        assert_eq!(
            store.find_all_customer_ids().await.unwrap(),
            vec!["c3", "c2"]
        );

        store.clear().await.unwrap();
        assert!(store.find_all_customer_ids().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rocksdb_reopen_keeps_data() {
        let dir = tempdir().unwrap();
        {
            let store = RocksDBStore::open(dir.path()).unwrap();
            store.save_all(vec![tx("1", "c1")]).await.unwrap();
        }

        let store = RocksDBStore::open(dir.path()).unwrap();
        store.save_all(vec![tx("2", "c2")]).await.unwrap();
        assert_eq!(
            store.find_all_customer_ids().await.unwrap(),
            vec!["c1", "c2"]
        );
    }
}
