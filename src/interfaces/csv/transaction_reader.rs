use crate::domain::transaction::Transaction;
use crate::error::{RewardError, Result};
use std::io::Read;

/// Reads transactions from a CSV source.
///
/// Expects the header `id,customer_id,amount,date` with ISO-8601 dates
/// (`2024-01-10T10:00:00`). Whitespace around fields is trimmed.
pub struct TransactionReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> TransactionReader<R> {
    /// Creates a new `TransactionReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes transactions.
    ///
    /// A malformed row yields an error item without ending the iteration.
    pub fn transactions(self) -> impl Iterator<Item = Result<Transaction>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(RewardError::from))
    }
}
