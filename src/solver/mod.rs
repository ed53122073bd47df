//! Power-iteration eigen-solver.
//!
//! This module extracts eigenpairs one at a time from a square matrix.
//!
//! ## Power Iteration
//!
//! For each requested eigenpair:
//!
//! ```text
//! b₀ ~ U[0, 1)ⁿ
//! bₖ₊₁ = A·bₖ / ‖A·bₖ‖          (fixed number of steps)
//! λ    = offset + bᵀ·(A·b)
//! A    ← deflate(A, λ, b)
//! ```
//!
//! where `offset` is zero for the first eigenpair and, in the default
//! [`EigenvalueEstimate::CarriedOffset`] mode, the first eigenvalue for every
//! later one. The matrix is deflated in place, so the caller's matrix does
//! not survive a call.

mod deflation;
mod power;

pub use deflation::{deflate_diagonal, deflate_rank_one, DeflationMode};
pub use power::{power_iteration, Decomposition, Eigenpair, EigenvalueEstimate, PowerIteration};

/// Iterations per eigenpair when none is configured.
pub const DEFAULT_ITERATIONS: usize = 1000;
