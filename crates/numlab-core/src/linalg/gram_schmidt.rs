//! Orthonormal bases and orthogonal projection.
//!
//! [`orthonormalize`] turns a matrix with linearly independent columns into
//! a matrix `U` with orthonormal columns spanning the same column space.
//! `U * U^T * y` is then the orthogonal projection of `y` onto that space.
use std::str::FromStr;

use ndarray::{s, Array1, Array2, ArrayBase, Data, Ix1, Ix2};
use serde::{Deserialize, Serialize};

use crate::error::{NumlabError, Result};
use crate::linalg::backend::{inverse, thin_qr};
use crate::linalg::ops::norm;

/// A column is degenerate when its residual norm after removing the span of
/// the preceding columns falls below this fraction of its original norm.
pub const DEGENERACY_TOLERANCE: f64 = 1e-10;

/// Orthogonalization algorithm.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum GramSchmidt {
    /// Subtract projections one basis vector at a time from the running residual.
    #[default]
    Modified,
    /// Subtract all projections computed against the original column.
    Classical,
    /// Residual `x_i - X_p (X_p^T X_p)^{-1} X_p^T x_i` over the column prefix `X_p`.
    ProjectionMatrix,
}

impl FromStr for GramSchmidt {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "modified" | "mgs" => Ok(GramSchmidt::Modified),
            "classical" | "cgs" => Ok(GramSchmidt::Classical),
            "projection_matrix" => Ok(GramSchmidt::ProjectionMatrix),
            _ => Err(format!("Unknown Gram-Schmidt method: {}", s)),
        }
    }
}

/// Orthonormal basis for the column space of `x` using modified Gram-Schmidt.
///
/// # Errors
///
/// * `DegenerateSubspace { column }` when column `column` is (numerically)
///   a linear combination of the columns before it.
/// * `ShapeMismatch` when `x` is empty or has more columns than rows.
pub fn orthonormalize<S>(x: &ArrayBase<S, Ix2>) -> Result<Array2<f64>>
where
    S: Data<Elem = f64>,
{
    orthonormalize_with(x, GramSchmidt::Modified)
}

/// An `n x k` input needs `1 <= k <= n`.
fn check_basis_shape<S>(x: &ArrayBase<S, Ix2>) -> Result<()>
where
    S: Data<Elem = f64>,
{
    let (n, k) = x.dim();
    if n == 0 || k == 0 || k > n {
        return Err(NumlabError::ShapeMismatch {
            expected: (n.max(1), k.clamp(1, n.max(1))),
            found: (n, k),
        });
    }
    Ok(())
}

/// Orthonormal basis for the column space of `x` using the chosen algorithm.
pub fn orthonormalize_with<S>(
    x: &ArrayBase<S, Ix2>,
    method: GramSchmidt,
) -> Result<Array2<f64>>
where
    S: Data<Elem = f64>,
{
    check_basis_shape(x)?;
    let (n, k) = x.dim();

    let mut u = Array2::<f64>::zeros((n, k));
    for i in 0..k {
        let column = x.column(i);
        let residual = match method {
            GramSchmidt::Modified => {
                let mut v = column.to_owned();
                for j in 0..i {
                    let q = u.column(j);
                    let coeff = q.dot(&v);
                    v.scaled_add(-coeff, &q);
                }
                v
            }
            GramSchmidt::Classical => {
                let mut v = column.to_owned();
                for j in 0..i {
                    let q = u.column(j);
                    let coeff = q.dot(&column);
                    v.scaled_add(-coeff, &q);
                }
                v
            }
            GramSchmidt::ProjectionMatrix if i == 0 => column.to_owned(),
            GramSchmidt::ProjectionMatrix => {
                let prefix = x.slice(s![.., ..i]);
                let gram_inv = inverse(&prefix.t().dot(&prefix))
                    .map_err(|_| NumlabError::DegenerateSubspace { column: i })?;
                let coeffs = gram_inv.dot(&prefix.t().dot(&column));
                &column - &prefix.dot(&coeffs)
            }
        };

        let original_norm = norm(&column);
        let residual_norm = norm(&residual);
        // Written as a negated comparison so NaN norms count as degenerate.
        if !(residual_norm > DEGENERACY_TOLERANCE * original_norm) {
            log::debug!(
                "Column {} residual norm {:e} vs original {:e}",
                i,
                residual_norm,
                original_norm
            );
            return Err(NumlabError::DegenerateSubspace { column: i });
        }
        u.column_mut(i).assign(&(residual / residual_norm));
    }

    Ok(u)
}

/// Check that `u^T u` is the identity within `tol` element-wise.
pub fn is_orthonormal<S>(u: &ArrayBase<S, Ix2>, tol: f64) -> bool
where
    S: Data<Elem = f64>,
{
    let gram = u.t().dot(u);
    gram.indexed_iter().all(|((i, j), &v)| {
        let expected = if i == j { 1.0 } else { 0.0 };
        (v - expected).abs() <= tol
    })
}

/// Project `y` onto the column space of an orthonormal `u`: `u * u^T * y`.
pub fn project<S1, S2>(u: &ArrayBase<S1, Ix2>, y: &ArrayBase<S2, Ix1>) -> Result<Array1<f64>>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
{
    if y.len() != u.nrows() {
        return Err(NumlabError::ShapeMismatch {
            expected: (u.nrows(), 1),
            found: (y.len(), 1),
        });
    }
    Ok(u.dot(&u.t().dot(y)))
}

/// Closed-form projection matrix `x (x^T x)^{-1} x^T`.
pub fn projection_matrix<S>(x: &ArrayBase<S, Ix2>) -> Result<Array2<f64>>
where
    S: Data<Elem = f64>,
{
    let gram_inv = inverse(&x.t().dot(x))?;
    Ok(x.dot(&gram_inv).dot(&x.t()))
}

/// Projection of `y` onto the column space of `x` through the `Q` factor of a thin QR.
///
/// A diagonal entry of `R` that is negligible next to its column norm means
/// the column adds no new direction, reported as `DegenerateSubspace`.
pub fn qr_projection<S1, S2>(
    x: &ArrayBase<S1, Ix2>,
    y: &ArrayBase<S2, Ix1>,
) -> Result<Array1<f64>>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
{
    check_basis_shape(x)?;
    let (q, r) = thin_qr(x)?;
    for (i, column) in x.columns().into_iter().enumerate() {
        let pivot = r[[i, i]].abs();
        if !(pivot > DEGENERACY_TOLERANCE * norm(&column)) {
            return Err(NumlabError::DegenerateSubspace { column: i });
        }
    }
    project(&q, y)
}
