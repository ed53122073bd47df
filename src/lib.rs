//! # Power Eigen
//!
//! Approximate dominant eigenpairs of a square real matrix.
//!
//! This library provides:
//! - Power iteration with a fixed (or optionally tolerance-bounded) step budget
//! - Sequential deflation to expose further eigenpairs
//! - Dense vector primitives (matrix-vector product, norm, normalization)
//! - Plain-text matrix input and a small PCA helper
//!
//! ## Architecture
//!
//! - [`linalg`] - Vector primitives shared by everything else
//! - [`solver`] - Eigenpair extraction and deflation
//! - [`input`] - Matrix text format
//! - [`pca`] - Standardization and covariance ahead of the solver
//!
//! ## Usage
//!
//! ```rust
//! use power_eigen::{power_iteration, seeded_rng};
//!
//! let mut a = vec![vec![2.0, 0.0], vec![0.0, 1.0]];
//! let result = power_iteration(&mut a, 100, 1, &mut seeded_rng(42));
//! assert!((result.eigenvalues()[0] - 2.0).abs() < 1e-9);
//! ```
//!
//! ### Native CLI
//!
//! ```bash
//! power-eigen matrix.txt --iterations 1000 --count 2 --seed 42
//! ```
//!
//! ## Method
//!
//! For each eigenpair a random vector `b` is repeatedly replaced by
//! `A·b / ‖A·b‖`. The eigenvalue is read off as `bᵀ·(A·b)` (plus the first
//! eigenvalue for later pairs in the default mode), and `A` is deflated before
//! the next pair. The caller's matrix is modified in place.

pub mod error;
pub mod input;
pub mod linalg;
pub mod pca;
pub mod solver;

// Re-export main types for convenience
pub use error::{EigenError, Result};
pub use solver::{
    power_iteration, Decomposition, DeflationMode, Eigenpair, EigenvalueEstimate, PowerIteration,
};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Deterministic random source for reproducible runs.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}
