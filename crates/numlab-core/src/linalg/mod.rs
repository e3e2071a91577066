//! Dense linear algebra on `ndarray` buffers.
//!
//! `ops` holds the elementary products and norms, `backend` bridges to
//! `nalgebra` for factorizations, and `gram_schmidt` builds orthonormal
//! bases and subspace projections on top of both.
pub mod backend;
pub mod gram_schmidt;
pub mod ops;

pub use backend::{inverse, solve, symmetric_eigen, thin_qr, Eigen};
pub use gram_schmidt::{
    is_orthonormal, orthonormalize, orthonormalize_with, project, projection_matrix,
    qr_projection, GramSchmidt,
};
pub use ops::{inner, matmul, norm, transpose};
