//! Plain-text matrix input.
//!
//! One row per line, entries separated by whitespace and/or commas:
//!
//! ```text
//! # 2x2 symmetric
//! 2, 1
//! 1  3   ; trailing comment
//! ```
//!
//! Blank lines are skipped. `#` and `;` start a comment running to end of line.

use crate::error::{EigenError, Result};

/// The 4x4 matrix used by the command-line demo when no file is given.
pub const DEMO_MATRIX: [[f64; 4]; 4] = [
    [28.0, 120.0, 54.0, 27.0],
    [40.0, 23.0, 29.0, 23.0],
    [52.0, 23.0, 10.0, 4.0],
    [8.0, 3.0, 6.0, 15.0],
];

/// [`DEMO_MATRIX`] as owned rows.
pub fn demo_matrix() -> Vec<Vec<f64>> {
    DEMO_MATRIX.iter().map(|row| row.to_vec()).collect()
}

/// Parse a matrix from text.
///
/// Every row must have as many entries as the first one. Squareness is left
/// to the solver, which reports it against the full shape.
pub fn parse_matrix(input: &str) -> Result<Vec<Vec<f64>>> {
    let mut rows: Vec<Vec<f64>> = Vec::new();

    for (index, raw) in input.lines().enumerate() {
        let line = index + 1;
        let content = raw.split(['#', ';']).next().unwrap_or("");

        let row = content
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|token| !token.is_empty())
            .map(|token| {
                token
                    .parse::<f64>()
                    .map_err(|_| EigenError::parse(line, format!("invalid number '{}'", token)))
            })
            .collect::<Result<Vec<f64>>>()?;

        if row.is_empty() {
            continue;
        }

        if let Some(first) = rows.first() {
            if row.len() != first.len() {
                return Err(EigenError::invalid_dimension(
                    rows.len() + 1,
                    row.len(),
                    format!(
                        "row at line {} has {} entries, expected {}",
                        line,
                        row.len(),
                        first.len()
                    ),
                ));
            }
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(EigenError::invalid_dimension(0, 0, "no matrix rows found"));
    }

    Ok(rows)
}

/// Parse a matrix file.
#[cfg(feature = "cli")]
pub fn parse_file(path: &std::path::Path) -> Result<Vec<Vec<f64>>> {
    let content = std::fs::read_to_string(path).map_err(|e| EigenError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_matrix(&content)
}
