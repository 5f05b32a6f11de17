pub mod summary_writer;
pub mod transaction_reader;
