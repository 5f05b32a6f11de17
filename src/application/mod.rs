//! Application layer orchestrating the domain against the store ports.
//!
//! `RewardService` answers reward queries; `DataLoader` fills the store from a
//! transaction feed at startup.

pub mod loader;
pub mod service;
