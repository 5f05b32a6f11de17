//! Adapters implementing the domain ports: transaction stores and clocks.

pub mod clock;
pub mod in_memory;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;
