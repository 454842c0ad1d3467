use std::convert::TryFrom;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

use crate::error::GenError;
use crate::menu::{MenuItem, Price};

pub const MIN_BASKET_SIZE: usize = 1;
pub const MAX_BASKET_SIZE: usize = 5;
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The column names of a transaction log, in order
pub const HEADERS: [&str; 5] = [
    "timestamp",
    "store_id",
    "items_sold",
    "price",
    "transaction_id",
];

/// One simulated sale at a single store
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    #[serde(serialize_with = "serialize_timestamp")]
    pub timestamp: NaiveDateTime,
    pub store_id: u32,
    /// The basket, in the order the items were rung up. Duplicates are allowed.
    #[serde(serialize_with = "serialize_items")]
    pub items_sold: Vec<MenuItem>,
    pub price: Price,
    pub transaction_id: Uuid,
}

/// A row of a transaction log as it appears on disk, before validation
#[allow(clippy::module_name_repetitions)]
#[derive(Debug, Deserialize)]
pub struct TransactionRecord {
    pub timestamp: String,
    pub store_id: u32,
    pub items_sold: String,
    pub price: String,
    pub transaction_id: Uuid,
}

fn serialize_timestamp<S>(timestamp: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&timestamp.format(TIMESTAMP_FORMAT))
}

fn serialize_items<S>(items: &[MenuItem], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let names: Vec<&str> = items.iter().map(|item| item.name()).collect();
    serializer.serialize_str(&names.join(" "))
}

impl Transaction {
    /// Builds a transaction, pricing the basket from the menu.
    ///
    /// # Errors
    /// Errors when `items_sold` holds fewer than [`MIN_BASKET_SIZE`] or more than
    /// [`MAX_BASKET_SIZE`] items
    pub fn new(
        timestamp: NaiveDateTime,
        store_id: u32,
        items_sold: Vec<MenuItem>,
        transaction_id: Uuid,
    ) -> Result<Self, GenError> {
        if !(MIN_BASKET_SIZE..=MAX_BASKET_SIZE).contains(&items_sold.len()) {
            return Err(GenError::InvalidBasket(items_sold.len()));
        }
        let price = Price::total(&items_sold)?;
        Ok(Transaction {
            timestamp,
            store_id,
            items_sold,
            price,
            transaction_id,
        })
    }
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = GenError;
    fn try_from(record: TransactionRecord) -> Result<Self, Self::Error> {
        let timestamp = NaiveDateTime::parse_from_str(record.timestamp.trim(), TIMESTAMP_FORMAT)
            .map_err(|_| GenError::InvalidTimestamp(record.timestamp.clone()))?;
        let items_sold = record
            .items_sold
            .split_whitespace()
            .map(str::parse)
            .collect::<Result<Vec<MenuItem>, _>>()?;
        let recorded_price: Price = record.price.parse()?;

        let transaction =
            Transaction::new(timestamp, record.store_id, items_sold, record.transaction_id)?;
        if transaction.price == recorded_price {
            Ok(transaction)
        } else {
            Err(GenError::PriceMismatch)
        }
    }
}
