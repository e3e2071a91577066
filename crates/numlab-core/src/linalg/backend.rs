//! Factorizations delegated to `nalgebra`.
//!
//! Inputs and outputs stay `ndarray` types.
use nalgebra::{DMatrix, DVector, SymmetricEigen};
use ndarray::{Array1, Array2, ArrayBase, Data, Ix1, Ix2};

use crate::error::{NumlabError, Result};

/// Relative tolerance used when checking that an input is symmetric.
const SYMMETRY_TOLERANCE: f64 = 1e-10;

/// Eigendecomposition of a symmetric matrix.
#[derive(Debug, Clone)]
pub struct Eigen {
    /// Eigenvalues in ascending order.
    pub values: Array1<f64>,
    /// Unit eigenvectors stored as columns, matching `values`.
    pub vectors: Array2<f64>,
}

fn to_dmatrix<S>(a: &ArrayBase<S, Ix2>) -> DMatrix<f64>
where
    S: Data<Elem = f64>,
{
    DMatrix::from_fn(a.nrows(), a.ncols(), |i, j| a[[i, j]])
}

fn from_dmatrix(m: &DMatrix<f64>) -> Array2<f64> {
    Array2::from_shape_fn((m.nrows(), m.ncols()), |(i, j)| m[(i, j)])
}

fn require_square<S>(a: &ArrayBase<S, Ix2>) -> Result<usize>
where
    S: Data<Elem = f64>,
{
    let (rows, cols) = a.dim();
    if rows != cols || rows == 0 {
        return Err(NumlabError::ShapeMismatch {
            expected: (rows.max(1), rows.max(1)),
            found: (rows, cols),
        });
    }
    Ok(rows)
}

/// Inverse of a square matrix.
pub fn inverse<S>(a: &ArrayBase<S, Ix2>) -> Result<Array2<f64>>
where
    S: Data<Elem = f64>,
{
    require_square(a)?;
    to_dmatrix(a)
        .try_inverse()
        .map(|inv| from_dmatrix(&inv))
        .ok_or(NumlabError::Singular)
}

/// Solve `a * x = b` for square `a` via Householder QR.
pub fn solve<S1, S2>(a: &ArrayBase<S1, Ix2>, b: &ArrayBase<S2, Ix1>) -> Result<Array1<f64>>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
{
    let n = require_square(a)?;
    if b.len() != n {
        return Err(NumlabError::ShapeMismatch {
            expected: (n, 1),
            found: (b.len(), 1),
        });
    }

    let rhs = DVector::from_iterator(n, b.iter().copied());
    let solution = to_dmatrix(a).qr().solve(&rhs).ok_or(NumlabError::Singular)?;
    if solution.iter().any(|v| !v.is_finite()) {
        return Err(NumlabError::Singular);
    }
    Ok(Array1::from_iter(solution.iter().copied()))
}

/// Eigenvalues and eigenvectors of a symmetric matrix, sorted by eigenvalue.
pub fn symmetric_eigen<S>(a: &ArrayBase<S, Ix2>) -> Result<Eigen>
where
    S: Data<Elem = f64>,
{
    let n = require_square(a)?;
    let scale = a.iter().fold(0.0f64, |acc, v| acc.max(v.abs())).max(1.0);
    let asymmetry = (0..n)
        .flat_map(|i| (0..i).map(move |j| (i, j)))
        .map(|(i, j)| (a[[i, j]] - a[[j, i]]).abs())
        .fold(0.0f64, f64::max);
    if asymmetry > SYMMETRY_TOLERANCE * scale {
        return Err(NumlabError::NotSymmetric { asymmetry });
    }

    let decomposition = SymmetricEigen::new(to_dmatrix(a));
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&x, &y| {
        decomposition.eigenvalues[x]
            .partial_cmp(&decomposition.eigenvalues[y])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let values = order
        .iter()
        .map(|&i| decomposition.eigenvalues[i])
        .collect::<Array1<f64>>();
    let vectors = Array2::from_shape_fn((n, n), |(row, col)| {
        decomposition.eigenvectors[(row, order[col])]
    });
    Ok(Eigen { values, vectors })
}

/// Thin QR factorization `a = q * r` of an `n x k` matrix with `n >= k`.
///
/// `q` is `n x k` with orthonormal columns and `r` is `k x k` upper triangular.
pub fn thin_qr<S>(a: &ArrayBase<S, Ix2>) -> Result<(Array2<f64>, Array2<f64>)>
where
    S: Data<Elem = f64>,
{
    let (rows, cols) = a.dim();
    if rows < cols || cols == 0 {
        return Err(NumlabError::ShapeMismatch {
            expected: (rows, rows.min(cols).max(1)),
            found: (rows, cols),
        });
    }
    let qr = to_dmatrix(a).qr();
    Ok((from_dmatrix(&qr.q()), from_dmatrix(&qr.r())))
}
