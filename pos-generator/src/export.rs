use std::convert::TryFrom;
use std::io;
use std::path::Path;

use csv::{ReaderBuilder, Trim, Writer, WriterBuilder};
use log::debug;

use crate::error::GenError;
use crate::transaction::{Transaction, TransactionRecord, HEADERS};

/// Writes `transactions` as CSV, header first. The header is written even when there are no rows.
///
/// # Errors
/// Errors when serializing or writing to `writer` fails
pub fn write_transactions<W: io::Write>(
    writer: W,
    transactions: &[Transaction],
) -> Result<(), GenError> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(writer);
    write_all(&mut writer, transactions)
}

/// Creates (or truncates) the file at `path` and writes `transactions` to it as CSV.
///
/// # Errors
/// Errors when the file cannot be created or written
pub fn write_transactions_to_path<P: AsRef<Path>>(
    path: P,
    transactions: &[Transaction],
) -> Result<(), GenError> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_path(path.as_ref())?;
    write_all(&mut writer, transactions)?;
    debug!(
        "Wrote {} transactions to {}",
        transactions.len(),
        path.as_ref().display()
    );
    Ok(())
}

fn write_all<W: io::Write>(
    writer: &mut Writer<W>,
    transactions: &[Transaction],
) -> Result<(), GenError> {
    writer.write_record(&HEADERS)?;
    for transaction in transactions {
        writer.serialize(transaction)?;
    }
    writer.flush()?;
    Ok(())
}

/// Reads a transaction log back, validating every row against the menu.
///
/// # Errors
/// Errors on the first row that is malformed or does not describe a valid transaction
pub fn read_transactions<R: io::Read>(reader: R) -> Result<Vec<Transaction>, GenError> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    reader
        .deserialize::<TransactionRecord>()
        .map(|record| Transaction::try_from(record?))
        .collect()
}

/// # Errors
/// See [`read_transactions`]. Also errors when the file cannot be opened.
pub fn read_transactions_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Transaction>, GenError> {
    let file = std::fs::File::open(path)?;
    read_transactions(io::BufReader::new(file))
}
