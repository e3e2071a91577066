use ndarray::{Array2, ArrayBase, Data, Ix1, Ix2};

use crate::error::{NumlabError, Result};

/// Inner product of two equal-length vectors.
pub fn inner<S1, S2>(a: &ArrayBase<S1, Ix1>, b: &ArrayBase<S2, Ix1>) -> Result<f64>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
{
    if a.len() != b.len() {
        return Err(NumlabError::ShapeMismatch {
            expected: (a.len(), 1),
            found: (b.len(), 1),
        });
    }
    Ok(a.dot(b))
}

/// Euclidean norm.
pub fn norm<S>(a: &ArrayBase<S, Ix1>) -> f64
where
    S: Data<Elem = f64>,
{
    a.dot(a).sqrt()
}

/// Matrix product `a * b`.
pub fn matmul<S1, S2>(a: &ArrayBase<S1, Ix2>, b: &ArrayBase<S2, Ix2>) -> Result<Array2<f64>>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
{
    if a.ncols() != b.nrows() {
        return Err(NumlabError::ShapeMismatch {
            expected: (a.ncols(), b.ncols()),
            found: b.dim(),
        });
    }
    Ok(a.dot(b))
}

/// Owned, standard-layout transpose.
pub fn transpose<S>(a: &ArrayBase<S, Ix2>) -> Array2<f64>
where
    S: Data<Elem = f64>,
{
    a.t().to_owned()
}
