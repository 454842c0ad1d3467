use std::error::Error;

use chrono::NaiveDate;
use clap::Parser;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use pos_generator::export::write_transactions_to_path;
use pos_generator::generator::{generate, start_of_current_year, GeneratorConfig};

#[derive(Parser, Debug)]
#[clap(
    author,
    version,
    about = "Generate fake data for restaurant operations simulation",
    long_about = None
)]
struct Cli {
    /// Number of days to generate data for
    #[clap(long = "number_of_days", default_value_t = 30)]
    pub(crate) number_of_days: u32,
    /// Number of stores
    #[clap(long = "number_of_stores", default_value_t = 50)]
    pub(crate) number_of_stores: u32,
    /// Output file name (CSV format)
    #[clap(long, default_value = "restaurant_transactions.csv")]
    pub(crate) output: String,
    /// Seed for the random generator, for reproducible output
    #[clap(long)]
    pub(crate) seed: Option<u64>,
    /// First simulated day (YYYY-MM-DD). Defaults to January 1st of the current year
    #[clap(long = "start_date")]
    pub(crate) start_date: Option<NaiveDate>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let cli = Cli::parse();

    let start_date = match cli.start_date {
        Some(date) => date,
        None => start_of_current_year()?,
    };
    let config = GeneratorConfig::new(cli.number_of_days, cli.number_of_stores, start_date);
    let mut rng = match cli.seed {
        Some(seed) => {
            info!("Seeding generator with {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let transactions = generate(&config, &mut rng)?;
    write_transactions_to_path(&cli.output, &transactions)?;

    println!(
        "Generated {} transactions and saved to {}",
        transactions.len(),
        cli.output
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["pos-generator-cli"]).unwrap();
        assert_eq!(cli.number_of_days, 30);
        assert_eq!(cli.number_of_stores, 50);
        assert_eq!(cli.output, "restaurant_transactions.csv");
        assert_eq!(cli.seed, None);
        assert_eq!(cli.start_date, None);
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::try_parse_from([
            "pos-generator-cli",
            "--number_of_days",
            "7",
            "--number_of_stores",
            "3",
            "--output",
            "week.csv",
            "--seed",
            "99",
            "--start_date",
            "2023-02-01",
        ])
        .unwrap();
        assert_eq!(cli.number_of_days, 7);
        assert_eq!(cli.number_of_stores, 3);
        assert_eq!(cli.output, "week.csv");
        assert_eq!(cli.seed, Some(99));
        assert_eq!(cli.start_date, NaiveDate::from_ymd_opt(2023, 2, 1));
    }

    #[test]
    fn test_malformed_arguments() {
        assert!(Cli::try_parse_from(["pos-generator-cli", "--number_of_days", "-3"]).is_err());
        assert!(Cli::try_parse_from(["pos-generator-cli", "--number_of_stores", "many"]).is_err());
        assert!(Cli::try_parse_from(["pos-generator-cli", "--start_date", "01/02/2023"]).is_err());
    }
}
