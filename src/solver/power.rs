//! Power iteration with sequential deflation.

use rand::Rng;
use tracing::{debug, trace, warn};

use super::deflation::{deflate_diagonal, DeflationMode};
use super::DEFAULT_ITERATIONS;
use crate::error::{EigenError, Result};
use crate::linalg::{dot_product, is_square, max_abs_diff, norm, normalize, rayleigh_sum, try_normalize};

/// How each eigenvalue is estimated from its converged vector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum EigenvalueEstimate {
    /// `λₖ = λ₀ + bᵀ·(A·b)` for every eigenpair after the first.
    ///
    /// With [`DeflationMode::Diagonal`] the matrix seen by eigenpair `k` is
    /// `A − (λ₀ + … + λₖ₋₁)·I`, and only `λ₀` is added back.
    #[default]
    #[cfg_attr(feature = "cli", value(name = "carried"))]
    CarriedOffset,
    /// Plain Rayleigh quotient `bᵀ·(A·b)` of the deflated matrix.
    Rayleigh,
}

/// A single eigenpair borrowed from a [`Decomposition`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Eigenpair<'a> {
    /// Discovery order, starting at 0
    pub index: usize,
    pub eigenvalue: f64,
    /// Approximately unit-norm
    pub eigenvector: &'a [f64],
    /// Power steps actually run for this eigenpair
    pub iterations: usize,
}

impl Eigenpair<'_> {
    /// Largest component of `A·v − λ·v`.
    pub fn residual(&self, matrix: &[Vec<f64>]) -> f64 {
        let av = dot_product(matrix, self.eigenvector);
        let lv: Vec<f64> = self.eigenvector.iter().map(|x| self.eigenvalue * x).collect();
        max_abs_diff(&av, &lv)
    }
}

/// Eigenpairs in discovery order, held as two index-aligned sequences.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Decomposition {
    eigenvalues: Vec<f64>,
    eigenvectors: Vec<Vec<f64>>,
    iterations: Vec<usize>,
}

impl Decomposition {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            eigenvalues: Vec::with_capacity(capacity),
            eigenvectors: Vec::with_capacity(capacity),
            iterations: Vec::with_capacity(capacity),
        }
    }

    fn push(&mut self, eigenvalue: f64, eigenvector: Vec<f64>, iterations: usize) {
        self.eigenvalues.push(eigenvalue);
        self.eigenvectors.push(eigenvector);
        self.iterations.push(iterations);
    }

    pub fn eigenvalues(&self) -> &[f64] {
        &self.eigenvalues
    }

    pub fn eigenvectors(&self) -> &[Vec<f64>] {
        &self.eigenvectors
    }

    pub fn len(&self) -> usize {
        self.eigenvalues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.eigenvalues.is_empty()
    }

    /// Get the eigenpair discovered at position `index`.
    pub fn get(&self, index: usize) -> Option<Eigenpair<'_>> {
        Some(Eigenpair {
            index,
            eigenvalue: *self.eigenvalues.get(index)?,
            eigenvector: self.eigenvectors.get(index)?,
            iterations: *self.iterations.get(index)?,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = Eigenpair<'_>> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }

    /// Split into `(eigenvalues, eigenvectors)`.
    pub fn into_parts(self) -> (Vec<f64>, Vec<Vec<f64>>) {
        (self.eigenvalues, self.eigenvectors)
    }
}

/// Draw a fresh candidate vector with entries in `[0, 1)`.
fn seed_vector<R: Rng>(dimension: usize, rng: &mut R) -> Vec<f64> {
    (0..dimension).map(|_| rng.gen::<f64>()).collect()
}

/// Power iteration with diagonal deflation and a carried eigenvalue offset.
///
/// Extracts `num_eigenvalues` eigenpairs, running exactly `num_iterations`
/// power steps for each. `matrix` is deflated in place and is not restored.
///
/// Nothing is validated: a non-square matrix, a zero iteration count, or a
/// vector that collapses to zero surface as NaN, infinities or an index
/// panic. Use [`PowerIteration::solve`] for checked extraction.
pub fn power_iteration<R: Rng>(
    matrix: &mut [Vec<f64>],
    num_iterations: usize,
    num_eigenvalues: usize,
    rng: &mut R,
) -> Decomposition {
    let dimension = matrix.first().map_or(0, Vec::len);
    let mut result = Decomposition::with_capacity(num_eigenvalues);
    let mut offset = None;

    for _ in 0..num_eigenvalues {
        let mut b = seed_vector(dimension, rng);
        for _ in 0..num_iterations {
            b = normalize(&dot_product(matrix, &b));
        }

        let av = dot_product(matrix, &b);
        let eigenvalue = offset.unwrap_or(0.0) + rayleigh_sum(&b, &av);

        deflate_diagonal(matrix, eigenvalue);
        if offset.is_none() {
            offset = Some(eigenvalue);
        }
        result.push(eigenvalue, b, num_iterations);
    }

    result
}

/// Configurable power-iteration solver.
#[derive(Debug, Clone)]
pub struct PowerIteration {
    /// Power steps per eigenpair (upper bound when `tolerance` is set).
    pub iterations: usize,
    /// Eigenvalue estimation rule.
    pub estimate: EigenvalueEstimate,
    /// Deflation applied after each eigenpair.
    pub deflation: DeflationMode,
    /// Check shapes and counts up front, and fail on a collapsed vector.
    pub validate: bool,
    /// Stop an eigenpair early once no vector component moves more than this.
    pub tolerance: Option<f64>,
}

impl Default for PowerIteration {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            estimate: EigenvalueEstimate::default(),
            deflation: DeflationMode::default(),
            validate: true,
            tolerance: None,
        }
    }
}

impl PowerIteration {
    /// Create a solver with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of power steps per eigenpair.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the eigenvalue estimation rule.
    pub fn with_estimate(mut self, estimate: EigenvalueEstimate) -> Self {
        self.estimate = estimate;
        self
    }

    /// Set the deflation mode.
    ///
    /// [`DeflationMode::RankOne`] removes the eigenpair outright, so adding
    /// the first eigenvalue back on top is wrong: pair it with
    /// [`EigenvalueEstimate::Rayleigh`]. `solve` warns on the mismatch.
    pub fn with_deflation(mut self, deflation: DeflationMode) -> Self {
        self.deflation = deflation;
        self
    }

    /// Enable or disable input validation.
    ///
    /// With validation off, `solve` reproduces [`power_iteration`] exactly
    /// for the same settings, including NaN propagation.
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    /// Enable early exit once successive vectors agree within `tolerance`.
    ///
    /// - `None` (default): always run the full iteration budget
    /// - `Some(1e-12)`: converge to near machine precision
    /// - `Some(1e-6)`: usually far fewer steps on well-separated spectra
    pub fn with_tolerance(mut self, tolerance: Option<f64>) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Check the matrix and counts before anything is mutated.
    pub fn check(&self, matrix: &[Vec<f64>], num_eigenvalues: usize) -> Result<()> {
        let rows = matrix.len();
        let columns = matrix.first().map_or(0, Vec::len);

        if rows == 0 {
            return Err(EigenError::invalid_dimension(0, 0, "matrix is empty"));
        }
        if !is_square(matrix) {
            return Err(EigenError::invalid_dimension(rows, columns, "matrix must be square"));
        }
        if self.iterations == 0 {
            return Err(EigenError::InvalidIterationCount {
                iterations: self.iterations,
            });
        }
        if num_eigenvalues == 0 || num_eigenvalues > rows {
            return Err(EigenError::InvalidEigenvalueCount {
                requested: num_eigenvalues,
                dimension: rows,
            });
        }
        Ok(())
    }

    /// Extract `num_eigenvalues` eigenpairs, deflating `matrix` in place.
    pub fn solve<R: Rng>(
        &self,
        matrix: &mut [Vec<f64>],
        num_eigenvalues: usize,
        rng: &mut R,
    ) -> Result<Decomposition> {
        if self.validate {
            if let Err(e) = self.check(matrix, num_eigenvalues) {
                warn!(error = %e, "rejecting eigen-decomposition input");
                return Err(e);
            }
        }
        if self.has_mismatched_modes() {
            warn!(
                estimate = ?self.estimate,
                deflation = ?self.deflation,
                "carried offset only applies to diagonal deflation; later eigenvalues will be shifted"
            );
        }

        let dimension = matrix.first().map_or(0, Vec::len);
        let mut result = Decomposition::with_capacity(num_eigenvalues);
        let mut offset = None;

        for k in 0..num_eigenvalues {
            let (b, used) = self.converge(matrix, seed_vector(dimension, rng), k)?;

            let av = dot_product(matrix, &b);
            let quotient = rayleigh_sum(&b, &av);
            let eigenvalue = match self.estimate {
                EigenvalueEstimate::CarriedOffset => offset.unwrap_or(0.0) + quotient,
                EigenvalueEstimate::Rayleigh => quotient,
            };

            debug!(
                eigenpair = k,
                eigenvalue,
                iterations = used,
                norm = norm(&b),
                "extracted eigenpair"
            );

            self.deflation.apply(matrix, eigenvalue, &b);
            if offset.is_none() {
                offset = Some(eigenvalue);
            }
            result.push(eigenvalue, b, used);
        }

        Ok(result)
    }

    /// Like [`solve`](Self::solve), but takes the matrix by value and hands back the deflated matrix.
    pub fn solve_owned<R: Rng>(
        &self,
        mut matrix: Vec<Vec<f64>>,
        num_eigenvalues: usize,
        rng: &mut R,
    ) -> Result<(Decomposition, Vec<Vec<f64>>)> {
        let result = self.solve(&mut matrix, num_eigenvalues, rng)?;
        Ok((result, matrix))
    }

    /// True when a carried offset is combined with rank-one deflation.
    fn has_mismatched_modes(&self) -> bool {
        self.estimate == EigenvalueEstimate::CarriedOffset && self.deflation == DeflationMode::RankOne
    }

    /// Run the power steps for eigenpair `k`, returning the vector and steps used.
    fn converge(&self, matrix: &[Vec<f64>], mut b: Vec<f64>, k: usize) -> Result<(Vec<f64>, usize)> {
        for step in 0..self.iterations {
            let av = dot_product(matrix, &b);
            let next = if self.validate {
                try_normalize(&av, k, step)?
            } else {
                normalize(&av)
            };

            if let Some(tolerance) = self.tolerance {
                if max_abs_diff(&next, &b) < tolerance {
                    trace!(eigenpair = k, step, "vector converged within tolerance");
                    return Ok((next, step + 1));
                }
            }
            b = next;
        }
        Ok((b, self.iterations))
    }
}
