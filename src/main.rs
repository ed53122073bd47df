//! Power Eigen - dominant eigenpairs from the command line
//!
//! Reads a whitespace/comma separated matrix (one row per line) and prints
//! the extracted eigenpairs. Without a file, the built-in 4x4 demo matrix is used.
//!
//! # Usage
//!
//! ```bash
//! power-eigen matrix.txt --iterations 1000 --count 2 --seed 42 -v
//! ```

use std::path::PathBuf;

use clap::Parser;
use rand::Rng;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use power_eigen::{
    error::Result,
    input,
    seeded_rng,
    solver::DEFAULT_ITERATIONS,
    DeflationMode, EigenvalueEstimate, PowerIteration,
};

/// Power-iteration eigen-solver
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the matrix file (demo matrix when omitted)
    #[arg(value_name = "MATRIX_FILE")]
    matrix_file: Option<PathBuf>,

    /// Power steps per eigenpair
    #[arg(short = 'n', long, default_value_t = DEFAULT_ITERATIONS)]
    iterations: usize,

    /// Number of eigenpairs to extract (defaults to the matrix dimension)
    #[arg(short = 'k', long)]
    count: Option<usize>,

    /// Seed for the random starting vectors
    #[arg(long)]
    seed: Option<u64>,

    /// Eigenvalue estimation rule
    #[arg(long, value_enum, default_value_t = EigenvalueEstimate::CarriedOffset)]
    estimate: EigenvalueEstimate,

    /// Deflation applied between eigenpairs
    #[arg(long, value_enum, default_value_t = DeflationMode::Diagonal)]
    deflation: DeflationMode,

    /// Stop early once successive vectors agree within this tolerance
    #[arg(long)]
    tolerance: Option<f64>,

    /// Skip input validation and singular-vector checks
    #[arg(long)]
    no_validate: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    /// Solver configured from the command-line flags.
    fn solver(&self) -> PowerIteration {
        PowerIteration::new()
            .with_iterations(self.iterations)
            .with_estimate(self.estimate)
            .with_deflation(self.deflation)
            .with_tolerance(self.tolerance)
            .with_validation(!self.no_validate)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = match args.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    // Load the matrix
    let mut matrix = match &args.matrix_file {
        Some(path) => input::parse_file(path)?,
        None => input::demo_matrix(),
    };

    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen());
    let count = args.count.unwrap_or(matrix.len());
    info!(seed, dimension = matrix.len(), count, "starting power iteration");

    let result = args.solver().solve(&mut matrix, count, &mut seeded_rng(seed))?;

    for pair in result.iter() {
        let vector: Vec<String> = pair.eigenvector.iter().map(|x| format!("{:.6}", x)).collect();
        println!(
            "λ_{} = {:.9}  v_{} = [{}]",
            pair.index,
            pair.eigenvalue,
            pair.index,
            vector.join(", ")
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_flags() {
        let args = Args::try_parse_from(["power-eigen"]).unwrap();
        assert!(args.matrix_file.is_none());
        assert_eq!(args.count, None);
        assert_eq!(args.seed, None);

        let solver = args.solver();
        assert_eq!(solver.iterations, DEFAULT_ITERATIONS);
        assert_eq!(solver.estimate, EigenvalueEstimate::CarriedOffset);
        assert_eq!(solver.deflation, DeflationMode::Diagonal);
        assert_eq!(solver.tolerance, None);
        assert!(solver.validate);
    }

    #[test]
    fn test_all_flags() {
        let args = Args::try_parse_from([
            "power-eigen",
            "matrix.txt",
            "-n",
            "250",
            "-k",
            "2",
            "--seed",
            "9",
            "--estimate",
            "rayleigh",
            "--deflation",
            "rank-one",
            "--tolerance",
            "1e-8",
            "--no-validate",
            "-vv",
        ])
        .unwrap();

        assert_eq!(args.matrix_file, Some(PathBuf::from("matrix.txt")));
        assert_eq!(args.count, Some(2));
        assert_eq!(args.seed, Some(9));
        assert_eq!(args.verbose, 2);

        let solver = args.solver();
        assert_eq!(solver.iterations, 250);
        assert_eq!(solver.estimate, EigenvalueEstimate::Rayleigh);
        assert_eq!(solver.deflation, DeflationMode::RankOne);
        assert_eq!(solver.tolerance, Some(1e-8));
        assert!(!solver.validate);
    }

    #[test]
    fn test_estimate_names() {
        let args = Args::try_parse_from(["power-eigen", "--estimate", "carried"]).unwrap();
        assert_eq!(args.estimate, EigenvalueEstimate::CarriedOffset);

        assert!(Args::try_parse_from(["power-eigen", "--estimate", "carried-offset"]).is_err());
        assert!(Args::try_parse_from(["power-eigen", "--deflation", "full"]).is_err());
    }
}
