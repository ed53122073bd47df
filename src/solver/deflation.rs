//! Matrix deflation after an eigenpair is found.

/// How a found eigenpair is removed from the matrix before the next one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum DeflationMode {
    /// Shift the diagonal: `A[i][i] -= λ`. Cheap and only approximate.
    #[default]
    Diagonal,
    /// Hotelling deflation: `A -= λ · v vᵀ`.
    ///
    /// Exact for symmetric matrices with a unit eigenvector.
    RankOne,
}

impl DeflationMode {
    /// Deflate `matrix` by the eigenpair `(eigenvalue, eigenvector)`.
    pub fn apply(self, matrix: &mut [Vec<f64>], eigenvalue: f64, eigenvector: &[f64]) {
        match self {
            DeflationMode::Diagonal => deflate_diagonal(matrix, eigenvalue),
            DeflationMode::RankOne => deflate_rank_one(matrix, eigenvalue, eigenvector),
        }
    }
}

/// Subtract `eigenvalue` from every diagonal entry. Off-diagonal entries are untouched.
pub fn deflate_diagonal(matrix: &mut [Vec<f64>], eigenvalue: f64) {
    for (i, row) in matrix.iter_mut().enumerate() {
        if let Some(diag) = row.get_mut(i) {
            *diag -= eigenvalue;
        }
    }
}

/// Subtract the outer product `eigenvalue · v vᵀ` from the matrix.
pub fn deflate_rank_one(matrix: &mut [Vec<f64>], eigenvalue: f64, eigenvector: &[f64]) {
    for (row, &vi) in matrix.iter_mut().zip(eigenvector) {
        let scale = eigenvalue * vi;
        for (a, &vj) in row.iter_mut().zip(eigenvector) {
            *a -= scale * vj;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagonal_only_touches_diagonal() {
        let mut m = vec![
            vec![4.0, 1.0, 2.0],
            vec![1.0, 3.0, 0.5],
            vec![2.0, 0.5, 1.0],
        ];
        let before = m.clone();
        deflate_diagonal(&mut m, 1.25);

        for i in 0..3 {
            for j in 0..3 {
                if i == j {
                    assert_eq!(m[i][j], before[i][j] - 1.25);
                } else {
                    assert_eq!(m[i][j], before[i][j]);
                }
            }
        }
    }

    #[test]
    fn test_rank_one_removes_eigenpair() {
        // diag(3, 1): removing (3, e0) leaves diag(0, 1)
        let mut m = vec![vec![3.0, 0.0], vec![0.0, 1.0]];
        deflate_rank_one(&mut m, 3.0, &[1.0, 0.0]);
        assert_eq!(m, vec![vec![0.0, 0.0], vec![0.0, 1.0]]);
    }

    #[test]
    fn test_rank_one_outer_product() {
        let mut m = vec![vec![0.0, 0.0], vec![0.0, 0.0]];
        deflate_rank_one(&mut m, 2.0, &[1.0, 3.0]);
        assert_eq!(m, vec![vec![-2.0, -6.0], vec![-6.0, -18.0]]);
    }

    #[test]
    fn test_mode_dispatch() {
        let mut diag = vec![vec![2.0, 1.0], vec![1.0, 2.0]];
        let mut rank = diag.clone();
        let v = [1.0, 0.0];

        DeflationMode::Diagonal.apply(&mut diag, 1.0, &v);
        DeflationMode::RankOne.apply(&mut rank, 1.0, &v);

        assert_eq!(diag, vec![vec![1.0, 1.0], vec![1.0, 1.0]]);
        assert_eq!(rank, vec![vec![1.0, 1.0], vec![1.0, 2.0]]);
        assert_eq!(DeflationMode::default(), DeflationMode::Diagonal);
    }
}
