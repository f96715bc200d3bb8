//! Run Newman-Ziff site percolation on a square torus and print `"<step> <largest>"`
//! for every occupied site.
//!
//! The program takes no argument. The configuration is read from the JSON file named by
//! the environment variable `NEWMAN_ZIFF_CONFIG`, defaults are used when it is not set.

use std::error::Error;
use std::io::{self, BufWriter};
use std::process::ExitCode;
use std::time::Instant;

use newman_ziff::{
    config::{SimulationConfig, CONFIG_ENV_VAR},
    percolation::NewmanZiff,
    permutation::OccupationOrder,
    report::LineReporter,
};

fn usage(program: &str) -> String {
    format!(
        "usage: {}\n\nRuns site percolation on a square torus and prints \"<step> <largest>\" \
         for each occupied site.\nThe configuration is read from the JSON file named by {} \
         (fields: linear_dimension, seed, find_strategy).",
        program, CONFIG_ENV_VAR
    )
}

fn run() -> Result<(), Box<dyn Error>> {
    let config = SimulationConfig::from_env()?;
    let lattice = config.lattice()?;
    let table = lattice.neighbor_table();
    let mut rng = config.rng()?;
    eprintln!("{}", lattice);
    eprintln!(
        "seed: {}{}",
        rng.seed(),
        if rng.is_reproducible() {
            ""
        } else {
            " (taken from the clock)"
        }
    );
    eprintln!("find strategy: {}", config.find_strategy());

    let t = Instant::now();
    let order = OccupationOrder::new(lattice.number_of_points(), &mut rng);
    let mut engine = NewmanZiff::new(&table, order, config.find_strategy())?;

    let stdout = io::stdout();
    let mut reporter = LineReporter::new(BufWriter::new(stdout.lock()));
    let largest = engine.run(&mut reporter)?;
    reporter.flush()?;

    eprintln!(
        "{} steps, largest cluster {}, done in {:?}",
        engine.steps_done(),
        largest,
        t.elapsed()
    );
    Ok(())
}

fn main() -> ExitCode {
    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "newman-ziff".to_owned());
    if args.next().is_some() {
        eprintln!("{}", usage(&program));
        return ExitCode::from(2);
    }
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
