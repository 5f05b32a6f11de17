use crate::domain::transaction::Transaction;
use crate::error::Result;
use std::io::{BufReader, Read};

/// Reads a JSON array of transactions in one go.
///
/// Unlike the CSV reader, a single malformed entry rejects the whole document.
pub fn read_transactions<R: Read>(source: R) -> Result<Vec<Transaction>> {
    Ok(serde_json::from_reader(BufReader::new(source))?)
}
