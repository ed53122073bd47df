//! Error types for the power-iteration eigen-solver.
//!
//! This module provides a unified error type [`EigenError`] covering input
//! parsing, boundary validation, and numerical breakdown during iteration.
//! The unchecked [`crate::power_iteration`] entry point never produces one.

use thiserror::Error;

/// Result type alias using [`EigenError`].
pub type Result<T> = std::result::Result<T, EigenError>;

/// Unified error type for all solver operations.
#[derive(Error, Debug)]
pub enum EigenError {
    // ============ Validation Errors ============
    /// Matrix is empty, ragged, or not square
    #[error("Invalid matrix dimension ({rows}x{columns}): {message}")]
    InvalidDimension {
        rows: usize,
        columns: usize,
        message: String,
    },

    /// Iteration budget must be positive
    #[error("Invalid iteration count {iterations}: at least one iteration is required")]
    InvalidIterationCount { iterations: usize },

    /// Eigenpair count must be in 1..=N
    #[error("Cannot extract {requested} eigenpairs from a matrix of dimension {dimension}")]
    InvalidEigenvalueCount { requested: usize, dimension: usize },

    // ============ Numerical Errors ============
    /// Candidate vector collapsed to zero (or overflowed) and cannot be normalized
    #[error("Singular vector while extracting eigenpair {eigenpair} at iteration {iteration}")]
    SingularVector { eigenpair: usize, iteration: usize },

    // ============ Input Errors ============
    /// Malformed matrix text
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// Error reading matrix file
    #[error("Failed to read matrix file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl EigenError {
    /// Create an invalid dimension error
    pub fn invalid_dimension(rows: usize, columns: usize, message: impl Into<String>) -> Self {
        Self::InvalidDimension {
            rows,
            columns,
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            message: message.into(),
        }
    }

    /// Create a singular vector error
    pub fn singular_vector(eigenpair: usize, iteration: usize) -> Self {
        Self::SingularVector {
            eigenpair,
            iteration,
        }
    }
}
