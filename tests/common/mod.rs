#![allow(dead_code)]

use chrono::{Duration, NaiveDate, NaiveDateTime};
use loyalty_rewards::domain::transaction::Transaction;
use rand::Rng;
use rust_decimal::Decimal;

pub const AS_OF: &str = "2024-03-25T12:00:00";

pub fn as_of() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 25)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

/// Random purchases for `customers` customers spread over the six months
/// before `as_of()`, amounts between -20.00 and 300.00.
pub fn random_transactions(count: usize, customers: usize) -> Vec<Transaction> {
    let mut rng = rand::thread_rng();
    (1..=count)
        .map(|i| {
            let customer = format!("c{}", rng.gen_range(1..=customers));
            let cents: i64 = rng.gen_range(-2_000..=30_000);
            let minutes_back: i64 = rng.gen_range(0..60 * 24 * 180);
            Transaction::new(
                i.to_string(),
                customer,
                Decimal::new(cents, 2),
                as_of() - Duration::minutes(minutes_back),
            )
        })
        .collect()
}
