//! Principal components of row-oriented data.
//!
//! Tokenized documents can be turned into such data with [`build_vocab`] and
//! [`co_occurrence_matrix`]. Each row of the input is one variable observed
//! across the columns. Rows are
//! standardized, their covariance is formed, and the covariance matrix is
//! handed to a [`PowerIteration`] solver. Covariance is symmetric, so
//! [`DeflationMode::RankOne`](crate::DeflationMode::RankOne) with
//! [`EigenvalueEstimate::Rayleigh`](crate::EigenvalueEstimate::Rayleigh) gives
//! the textbook components.

use std::collections::HashMap;

use rand::Rng;
use tracing::debug;

use crate::error::{EigenError, Result};
use crate::solver::{Decomposition, PowerIteration};

/// Words seen at least `min_count` times across `documents`.
///
/// Words are listed in the order they reach the threshold.
pub fn build_vocab(documents: &[Vec<&str>], min_count: usize) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut vocab = Vec::new();

    for word in documents.iter().flatten() {
        let count = counts.entry(*word).or_insert(0);
        *count += 1;
        if *count == min_count.max(1) {
            vocab.push(word.to_string());
        }
    }
    vocab
}

/// Window-weighted co-occurrence counts between vocabulary words.
///
/// Out-of-vocabulary tokens are dropped first. Within each document, every
/// ordered pair of kept tokens at distance `d <= window` adds
/// `1 - d / window` to `M[word_a][word_b]`, so each token also contributes 1
/// to its own diagonal entry. The result is symmetric.
pub fn co_occurrence_matrix(documents: &[Vec<&str>], vocab: &[String], window: usize) -> Vec<Vec<f64>> {
    let index: HashMap<&str, usize> = vocab.iter().enumerate().map(|(i, w)| (w.as_str(), i)).collect();
    let mut matrix = vec![vec![0.0; vocab.len()]; vocab.len()];

    for document in documents {
        let kept: Vec<usize> = document.iter().filter_map(|w| index.get(w).copied()).collect();

        for (i, &a) in kept.iter().enumerate() {
            let end = (i + window + 1).min(kept.len());
            for (j, &b) in kept.iter().enumerate().take(end).skip(i.saturating_sub(window)) {
                let dist = i.abs_diff(j);
                let weight = if window == 0 {
                    1.0
                } else {
                    1.0 - dist as f64 / window as f64
                };
                matrix[a][b] += weight;
            }
        }
    }

    debug!(vocab = vocab.len(), documents = documents.len(), window, "built co-occurrence matrix");
    matrix
}

/// Standardize every row in place to zero mean and unit (population) variance.
///
/// Constant rows have no spread and are set to zero.
pub fn standardize_rows(data: &mut [Vec<f64>]) {
    for row in data.iter_mut() {
        if row.is_empty() {
            continue;
        }
        let n = row.len() as f64;
        let mean = row.iter().sum::<f64>() / n;
        let variance = row.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
        let stdev = variance.sqrt();

        for x in row.iter_mut() {
            *x = if stdev > 0.0 { (*x - mean) / stdev } else { 0.0 };
        }
    }
}

/// Covariance between rows: `C[i][k] = Σ_l X[i][l]·X[k][l] / columns`.
///
/// Assumes rows are already centered.
pub fn covariance_matrix(data: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
    let columns = data.first().map_or(0, Vec::len);
    if columns == 0 {
        return Err(EigenError::invalid_dimension(data.len(), 0, "data has no observations"));
    }
    if let Some(bad) = data.iter().position(|row| row.len() != columns) {
        return Err(EigenError::invalid_dimension(
            data.len(),
            columns,
            format!("row {} has {} observations", bad, data[bad].len()),
        ));
    }

    let n = data.len();
    let mut cov = vec![vec![0.0; n]; n];
    for i in 0..n {
        for k in i..n {
            let sum: f64 = data[i].iter().zip(&data[k]).map(|(a, b)| a * b).sum();
            let value = sum / columns as f64;
            cov[i][k] = value;
            cov[k][i] = value;
        }
    }
    Ok(cov)
}

/// Top `components` principal components of `data`.
///
/// `data` is standardized in place before the covariance is formed.
pub fn principal_components<R: Rng>(
    data: &mut [Vec<f64>],
    components: usize,
    solver: &PowerIteration,
    rng: &mut R,
) -> Result<Decomposition> {
    standardize_rows(data);
    let mut cov = covariance_matrix(data)?;
    debug!(variables = cov.len(), components, "computing principal components");
    solver.solve(&mut cov, components, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{DeflationMode, EigenvalueEstimate};
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_build_vocab_threshold() {
        let docs = vec![vec!["a", "b", "a"], vec!["c", "b", "a", "c"]];
        assert_eq!(build_vocab(&docs, 2), vec!["a", "b", "c"]);
        assert_eq!(build_vocab(&docs, 3), vec!["a"]);
        assert!(build_vocab(&docs, 4).is_empty());
    }

    #[test]
    fn test_co_occurrence_window() {
        let vocab: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        // "x" is dropped before distances are measured.
        let docs = vec![vec!["a", "x", "b", "c", "a"]];
        let m = co_occurrence_matrix(&docs, &vocab, 2);

        // Distance 1 weighs 0.5, distance 2 weighs 0, the two a's are 3 apart.
        assert_eq!(
            m,
            vec![
                vec![2.0, 0.5, 0.5],
                vec![0.5, 1.0, 0.5],
                vec![0.5, 0.5, 1.0],
            ]
        );
    }

    #[test]
    fn test_co_occurrence_window_of_three() {
        let vocab: Vec<String> = ["a", "b"].iter().map(|s| s.to_string()).collect();
        let docs = vec![vec!["a", "a", "b"], vec!["b", "b"]];
        let m = co_occurrence_matrix(&docs, &vocab, 3);

        let third = 1.0 / 3.0;
        // a-a: two diagonal hits plus one pair at distance 1 counted both ways
        assert_relative_eq!(m[0][0], 2.0 + 2.0 * (1.0 - third), epsilon = 1e-12);
        // a-b: distances 2 and 1 in the first document
        assert_relative_eq!(m[0][1], (1.0 - 2.0 * third) + (1.0 - third), epsilon = 1e-12);
        assert_eq!(m[0][1], m[1][0]);
        // b-b: one diagonal hit in the first document, two plus a pair in the second
        assert_relative_eq!(m[1][1], 3.0 + 2.0 * (1.0 - third), epsilon = 1e-12);
    }

    #[test]
    fn test_co_occurrence_zero_window_is_diagonal() {
        let vocab: Vec<String> = ["a", "b"].iter().map(|s| s.to_string()).collect();
        let m = co_occurrence_matrix(&[vec!["a", "b", "a"]], &vocab, 0);
        assert_eq!(m, vec![vec![2.0, 0.0], vec![0.0, 1.0]]);
    }

    #[test]
    fn test_standardize_rows() {
        let mut data = vec![vec![1.0, 2.0, 3.0], vec![5.0, 5.0, 5.0]];
        standardize_rows(&mut data);

        let mean: f64 = data[0].iter().sum::<f64>() / 3.0;
        let var: f64 = data[0].iter().map(|x| x * x).sum::<f64>() / 3.0;
        assert_abs_diff_eq!(mean, 0.0, epsilon = 1e-12);
        assert_relative_eq!(var, 1.0, epsilon = 1e-12);
        assert_eq!(data[1], vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_covariance_symmetric() {
        let data = vec![vec![1.0, -1.0], vec![2.0, 0.0], vec![0.0, 3.0]];
        let cov = covariance_matrix(&data).unwrap();
        assert_eq!(cov.len(), 3);
        for i in 0..3 {
            for k in 0..3 {
                assert_eq!(cov[i][k], cov[k][i]);
            }
        }
        assert_eq!(cov[0][1], 1.0);
        assert_eq!(cov[2][2], 4.5);
    }

    #[test]
    fn test_covariance_rejects_ragged() {
        let data = vec![vec![1.0, 2.0], vec![3.0]];
        assert!(covariance_matrix(&data).is_err());
        assert!(covariance_matrix(&[]).is_err());
    }

    #[test]
    fn test_perfectly_correlated_rows() {
        // After standardization both rows are identical, so the covariance is
        // [[1, 1], [1, 1]] with eigenvalues 2 and 0.
        let mut data = vec![vec![1.0, 2.0, 3.0, 4.0], vec![2.0, 4.0, 6.0, 8.0]];
        let solver = PowerIteration::new()
            .with_iterations(100)
            .with_estimate(EigenvalueEstimate::Rayleigh)
            .with_deflation(DeflationMode::RankOne);
        let result = principal_components(&mut data, 1, &solver, &mut ChaCha8Rng::seed_from_u64(3)).unwrap();

        assert_relative_eq!(result.eigenvalues()[0], 2.0, epsilon = 1e-9);
        let v = &result.eigenvectors()[0];
        assert_relative_eq!(v[0].abs(), std::f64::consts::FRAC_1_SQRT_2, epsilon = 1e-9);
        assert_relative_eq!(v[0], v[1], epsilon = 1e-9);
    }
}
