use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Opaque customer identifier as it appears in the transaction feed.
pub type CustomerId = String;

/// A single purchase attributed to a customer.
///
/// Amounts are signed: refunds and corrections show up as negative values and
/// simply earn no points. Dates carry no timezone.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    #[serde(alias = "customer_id")]
    pub customer_id: CustomerId,
    pub amount: Decimal,
    pub date: NaiveDateTime,
}

impl Transaction {
    pub fn new(
        id: impl Into<String>,
        customer_id: impl Into<CustomerId>,
        amount: Decimal,
        date: NaiveDateTime,
    ) -> Self {
        Self {
            id: id.into(),
            customer_id: customer_id.into(),
            amount,
            date,
        }
    }
}
