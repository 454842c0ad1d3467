use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenError {
    #[error("CSV Error")]
    CsvError(#[from] csv::Error),
    #[error("I/O Error")]
    IoError(#[from] io::Error),
    #[error("Unknown menu item: {0}")]
    UnknownItem(String),
    #[error("A basket must hold between 1 and 5 items, got {0}")]
    InvalidBasket(usize),
    #[error("Prices must be positive amounts")]
    InvalidPrice,
    #[error("Recorded price does not match the basket total")]
    PriceMismatch,
    #[error("Malformed timestamp: {0}")]
    InvalidTimestamp(String),
    #[error("Date arithmetic left the representable range")]
    DateOutOfRange,
}
