use std::error::Error;
use std::io;
use std::time::Instant;

use log::warn;
use rand::rngs::StdRng;
use rand::SeedableRng;

use pos_generator::export::write_transactions;
use pos_generator::generator::{generate, start_of_year, GeneratorConfig};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let config = GeneratorConfig::new(365, 100, start_of_year(2024)?);
    let mut rng = StdRng::seed_from_u64(0);

    let start = Instant::now();
    let transactions = generate(&config, &mut rng)?;
    let elapsed = start.elapsed();
    warn!(
        "Generating {} transactions took: {:.2?}",
        transactions.len(),
        elapsed
    );

    let start_writing = Instant::now();
    write_transactions(io::sink(), &transactions)?;
    let elapsed_writing = start_writing.elapsed();
    warn!("Writing took: {:.2?}", elapsed_writing);

    Ok(())
}
