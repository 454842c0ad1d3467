use std::convert::TryFrom;
use std::ops::Range;

use chrono::{Datelike, Days, Local, NaiveDate};
use log::{debug, info};
use rand::Rng;
use uuid::Builder;

use crate::error::GenError;
use crate::menu::MenuItem;
use crate::transaction::{Transaction, MAX_BASKET_SIZE, MIN_BASKET_SIZE};

/// Number of transactions a single store rings up on a single day
pub const TRANSACTIONS_PER_STORE_DAY: Range<u32> = 50..200;
/// Hours of the day a store is open for business
pub const OPERATING_HOURS: Range<u32> = 6..23;
pub const BASKET_SIZES: Range<usize> = MIN_BASKET_SIZE..MAX_BASKET_SIZE + 1;

// Keeps `Vec::with_capacity` from aborting on absurd requests
const MAX_CAPACITY_HINT: u64 = 1 << 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub number_of_days: u32,
    pub number_of_stores: u32,
    /// The first simulated day. Day `n` is `start_date + n days`.
    pub start_date: NaiveDate,
}

impl GeneratorConfig {
    #[must_use]
    pub fn new(number_of_days: u32, number_of_stores: u32, start_date: NaiveDate) -> Self {
        GeneratorConfig {
            number_of_days,
            number_of_stores,
            start_date,
        }
    }

    /// The mean size of a generated log for this config
    #[must_use]
    pub fn expected_transactions(&self) -> u64 {
        let mean = u64::from(TRANSACTIONS_PER_STORE_DAY.start + TRANSACTIONS_PER_STORE_DAY.end) / 2;
        u64::from(self.number_of_days) * u64::from(self.number_of_stores) * mean
    }

    fn capacity_hint(&self) -> usize {
        usize::try_from(self.expected_transactions().min(MAX_CAPACITY_HINT)).unwrap_or(0)
    }
}

/// # Errors
/// Errors when January 1st of `year` cannot be represented
pub fn start_of_year(year: i32) -> Result<NaiveDate, GenError> {
    NaiveDate::from_ymd_opt(year, 1, 1).ok_or(GenError::DateOutOfRange)
}

/// January 1st of the current year, according to the local clock
///
/// # Errors
/// See [`start_of_year`]
pub fn start_of_current_year() -> Result<NaiveDate, GenError> {
    start_of_year(Local::now().year())
}

/// Generates a full transaction log for every store on every day in `config`, sorted by
/// timestamp. All randomness is drawn from `rng`, so a seeded generator gives identical logs.
///
/// # Errors
/// Errors when a simulated day falls outside the range of representable dates
pub fn generate<R: Rng + ?Sized>(
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<Vec<Transaction>, GenError> {
    let mut transactions = Vec::with_capacity(config.capacity_hint());

    for day in 0..config.number_of_days {
        let current_date = config
            .start_date
            .checked_add_days(Days::new(u64::from(day)))
            .ok_or(GenError::DateOutOfRange)?;
        let generated_before = transactions.len();

        for store_id in 1..=config.number_of_stores {
            let num_transactions = rng.gen_range(TRANSACTIONS_PER_STORE_DAY);
            for _ in 0..num_transactions {
                transactions.push(random_transaction(current_date, store_id, rng)?);
            }
        }
        debug!(
            "Generated {} transactions for {}",
            transactions.len() - generated_before,
            current_date
        );
    }

    transactions.sort_by_key(|tx| tx.timestamp);
    info!(
        "Generated {} transactions over {} days for {} stores starting {}",
        transactions.len(),
        config.number_of_days,
        config.number_of_stores,
        config.start_date
    );
    Ok(transactions)
}

fn random_transaction<R: Rng + ?Sized>(
    date: NaiveDate,
    store_id: u32,
    rng: &mut R,
) -> Result<Transaction, GenError> {
    let hours = rng.gen_range(OPERATING_HOURS);
    let minutes = rng.gen_range(0..60);
    let seconds = rng.gen_range(0..60);
    let timestamp = date
        .and_hms_opt(hours, minutes, seconds)
        .ok_or(GenError::DateOutOfRange)?;

    let items_count = rng.gen_range(BASKET_SIZES);
    let items_sold: Vec<MenuItem> = (0..items_count).map(|_| rng.gen()).collect();

    // v4 ids drawn from `rng` so seeded runs reproduce them too
    let transaction_id = Builder::from_random_bytes(rng.gen()).into_uuid();

    Transaction::new(timestamp, store_id, items_sold, transaction_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};

    use chrono::Timelike;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use uuid::Version;

    use crate::menu::Price;

    fn jan_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn test_single_store_single_day() {
        let config = GeneratorConfig::new(1, 1, jan_first());
        let mut rng = StdRng::seed_from_u64(1);
        let txs = generate(&config, &mut rng).unwrap();

        assert!(TRANSACTIONS_PER_STORE_DAY.contains(&u32::try_from(txs.len()).unwrap()));
        for tx in &txs {
            assert_eq!(tx.store_id, 1);
            assert_eq!(tx.timestamp.date(), jan_first());
            assert!(OPERATING_HOURS.contains(&tx.timestamp.hour()));
        }
    }

    #[test]
    fn test_generated_fields_are_in_range() {
        let config = GeneratorConfig::new(3, 4, jan_first());
        let mut rng = StdRng::seed_from_u64(2);
        let txs = generate(&config, &mut rng).unwrap();
        let end = jan_first().checked_add_days(Days::new(3)).unwrap();

        for tx in &txs {
            assert!((1..=4).contains(&tx.store_id));
            assert!(tx.timestamp.date() >= jan_first() && tx.timestamp.date() < end);
            assert!(OPERATING_HOURS.contains(&tx.timestamp.hour()));
            assert!(BASKET_SIZES.contains(&tx.items_sold.len()));
            assert_eq!(tx.price, Price::total(&tx.items_sold).unwrap());
            assert_eq!(tx.transaction_id.get_version(), Some(Version::Random));
        }
    }

    #[test]
    fn test_each_store_day_gets_a_bounded_batch() {
        let config = GeneratorConfig::new(2, 5, jan_first());
        let mut rng = StdRng::seed_from_u64(3);
        let txs = generate(&config, &mut rng).unwrap();

        let mut counts: HashMap<(NaiveDate, u32), u32> = HashMap::new();
        for tx in &txs {
            *counts.entry((tx.timestamp.date(), tx.store_id)).or_default() += 1;
        }
        assert_eq!(counts.len(), 10);
        assert!(counts
            .values()
            .all(|count| TRANSACTIONS_PER_STORE_DAY.contains(count)));
        assert_eq!(counts.values().sum::<u32>() as usize, txs.len());
    }

    #[test]
    fn test_output_is_sorted_with_unique_ids() {
        let config = GeneratorConfig::new(2, 3, jan_first());
        let mut rng = StdRng::seed_from_u64(4);
        let txs = generate(&config, &mut rng).unwrap();

        assert!(txs.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
        let ids: HashSet<_> = txs.iter().map(|tx| tx.transaction_id).collect();
        assert_eq!(ids.len(), txs.len());
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let config = GeneratorConfig::new(2, 2, jan_first());
        let first = generate(&config, &mut StdRng::seed_from_u64(42)).unwrap();
        let second = generate(&config, &mut StdRng::seed_from_u64(42)).unwrap();
        let other = generate(&config, &mut StdRng::seed_from_u64(43)).unwrap();

        assert_eq!(first, second);
        assert_ne!(first, other);
    }

    #[test]
    fn test_zero_days_or_stores_is_empty() {
        let mut rng = StdRng::seed_from_u64(5);
        assert!(generate(&GeneratorConfig::new(0, 10, jan_first()), &mut rng)
            .unwrap()
            .is_empty());
        assert!(generate(&GeneratorConfig::new(10, 0, jan_first()), &mut rng)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_dates_past_the_calendar_end_error() {
        let config = GeneratorConfig::new(2, 1, NaiveDate::MAX);
        let mut rng = StdRng::seed_from_u64(6);
        assert!(matches!(
            generate(&config, &mut rng),
            Err(GenError::DateOutOfRange)
        ));
    }

    #[test]
    fn test_start_of_year() {
        assert_eq!(start_of_year(2024).unwrap(), jan_first());
        let current = start_of_current_year().unwrap();
        assert_eq!((current.month(), current.day()), (1, 1));
        assert_eq!(current.year(), Local::now().year());
    }

    #[test]
    fn test_expected_transactions() {
        let config = GeneratorConfig::new(30, 50, jan_first());
        assert_eq!(config.expected_transactions(), 30 * 50 * 125);
    }
}
