//! Domain layer: transactions, reward summaries, the point calculation and
//! the ports the application layer talks to.

pub mod calculator;
pub mod ports;
pub mod reward;
pub mod transaction;
