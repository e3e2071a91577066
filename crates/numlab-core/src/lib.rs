//! numlab-core: small numeric routines for teaching notebooks.
//!
//! The crate provides a two-state Markov chain simulator with injectable
//! randomness, a handful of execution strategies for the same simulation,
//! and dense linear algebra helpers built around a Gram-Schmidt
//! orthonormal basis builder used for subspace projection.
//!
//! Every routine is a pure function over freshly allocated `ndarray`
//! buffers; nothing is cached between calls.
pub mod config;
pub mod error;
pub mod kernels;
pub mod linalg;
pub mod markov;

pub use error::{NumlabError, Result};
