//! Dense vector primitives used by the solver.
//!
//! Matrices are row-major `Vec<Vec<f64>>` borrowed as slices of rows. None of
//! these functions validate shapes; the configured solver does that once at
//! its boundary.

use crate::error::{EigenError, Result};

/// Matrix-vector product `A·v`.
///
/// Returns a vector with one entry per row of `matrix`. Each row is summed
/// over the first `vector.len()` columns.
pub fn dot_product(matrix: &[Vec<f64>], vector: &[f64]) -> Vec<f64> {
    matrix
        .iter()
        .map(|row| row.iter().zip(vector).map(|(a, b)| a * b).sum())
        .collect()
}

/// Euclidean (L2) norm. Zero for an all-zero vector.
pub fn norm(vector: &[f64]) -> f64 {
    vector.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// Divide every element by the vector's norm.
///
/// The caller must ensure the norm is nonzero; a zero vector yields NaN.
/// Use [`try_normalize`] when that cannot be guaranteed.
pub fn normalize(vector: &[f64]) -> Vec<f64> {
    let n = norm(vector);
    vector.iter().map(|x| x / n).collect()
}

/// Checked [`normalize`]: fails on a zero or non-finite norm.
///
/// `eigenpair` and `iteration` locate the failure in the returned error.
pub fn try_normalize(vector: &[f64], eigenpair: usize, iteration: usize) -> Result<Vec<f64>> {
    let n = norm(vector);
    if n == 0.0 || !n.is_finite() {
        return Err(EigenError::singular_vector(eigenpair, iteration));
    }
    Ok(vector.iter().map(|x| x / n).collect())
}

/// Inner product `Σ b[i]·(A·b)[i]` used for eigenvalue estimation.
pub fn rayleigh_sum(vector: &[f64], product: &[f64]) -> f64 {
    vector.iter().zip(product).map(|(b, ab)| b * ab).sum()
}

/// Largest absolute elementwise difference between two vectors.
///
/// NaN if any difference is NaN.
pub fn max_abs_diff(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).abs())
        .fold(0.0f64, |max, d| if d.is_nan() || d > max { d } else { max })
}

/// True if every row has exactly as many entries as there are rows.
pub fn is_square(matrix: &[Vec<f64>]) -> bool {
    let n = matrix.len();
    matrix.iter().all(|row| row.len() == n)
}
