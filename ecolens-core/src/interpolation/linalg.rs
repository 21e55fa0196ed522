//! Dense linear solve for the kriging system

use crate::constants::spatial::PIVOT_EPSILON;
use crate::errors::{EngineError, EngineResult};

/// Solve `A·x = b` given the augmented rows `[A | b]` (n × (n+1)).
///
/// Gauss-Jordan elimination with partial pivoting. A column whose largest
/// remaining magnitude is below 1e-12 makes the system singular.
pub fn solve_gauss_jordan(mut m: Vec<Vec<f64>>) -> EngineResult<Vec<f64>> {
    let n = m.len();
    if let Some(row) = m.iter().find(|row| row.len() != n + 1) {
        return Err(EngineError::InvalidValue {
            field: "augmented_columns",
            value: row.len() as f64,
        });
    }

    for col in 0..n {
        let (pivot_row, pivot_abs) = (col..n)
            .map(|r| (r, m[r][col].abs()))
            .fold((col, -1.0), |best, cur| if cur.1 > best.1 { cur } else { best });

        if !(pivot_abs >= PIVOT_EPSILON) {
            return Err(EngineError::SingularSystem { pivot: col });
        }
        m.swap(col, pivot_row);

        let pivot = m[col][col];
        for v in m[col].iter_mut() {
            *v /= pivot;
        }

        let pivot_values = m[col].clone();
        for (r, row) in m.iter_mut().enumerate() {
            if r == col {
                continue;
            }
            let factor = row[col];
            if factor == 0.0 {
                continue;
            }
            for (v, p) in row.iter_mut().zip(&pivot_values) {
                *v -= factor * p;
            }
        }
    }

    Ok(m.into_iter().map(|row| row[n]).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solves_small_system() {
        // 2x + y = 5, x − y = 1  →  x = 2, y = 1
        let x = solve_gauss_jordan(vec![vec![2.0, 1.0, 5.0], vec![1.0, -1.0, 1.0]]).unwrap();
        assert!((x[0] - 2.0).abs() < 1e-12);
        assert!((x[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn pivots_past_zero_diagonal() {
        // Lagrange-style zero on the leading diagonal
        let x = solve_gauss_jordan(vec![vec![0.0, 1.0, 3.0], vec![1.0, 0.0, 4.0]]).unwrap();
        assert_eq!(x, vec![4.0, 3.0]);
    }

    #[test]
    fn singular_reports_column() {
        let err = solve_gauss_jordan(vec![vec![1.0, 2.0, 3.0], vec![2.0, 4.0, 6.0]]).unwrap_err();
        assert_eq!(err, EngineError::SingularSystem { pivot: 1 });
    }

    #[test]
    fn nan_pivot_is_singular() {
        assert!(solve_gauss_jordan(vec![vec![f64::NAN, 1.0]]).is_err());
    }

    #[test]
    fn rejects_ragged_rows() {
        assert!(matches!(
            solve_gauss_jordan(vec![vec![1.0, 2.0], vec![1.0]]),
            Err(EngineError::InvalidValue { .. })
        ));
    }

    #[test]
    fn empty_system_is_trivial() {
        assert_eq!(solve_gauss_jordan(Vec::new()), Ok(Vec::new()));
    }
}
