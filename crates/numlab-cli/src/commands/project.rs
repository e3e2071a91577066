//! `numlab project`: orthonormal basis and projection of a vector.
use anyhow::{bail, Result};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use numlab_core::linalg::{
    is_orthonormal, orthonormalize_with, project, projection_matrix, GramSchmidt,
};

const ORTHONORMAL_TOLERANCE: f64 = 1e-9;

/// Input matrix (as rows) and the vector to project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub x: Vec<Vec<f64>>,
    pub y: Vec<f64>,
    #[serde(default)]
    pub method: GramSchmidt,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionReport {
    /// Orthonormal basis, as rows.
    pub basis: Vec<Vec<f64>>,
    /// `U U^T y`.
    pub projection: Vec<f64>,
    /// `X (X^T X)^{-1} X^T y`.
    pub closed_form: Vec<f64>,
    pub max_deviation: f64,
}

fn rows_to_matrix(rows: &[Vec<f64>]) -> Result<Array2<f64>> {
    let ncols = rows.first().map(Vec::len).unwrap_or(0);
    if rows.iter().any(|row| row.len() != ncols) {
        bail!("all rows of x must have the same length");
    }
    let data: Vec<f64> = rows.iter().flatten().copied().collect();
    Ok(Array2::from_shape_vec((rows.len(), ncols), data)?)
}

pub fn run_project(config: &ProjectConfig) -> Result<ProjectionReport> {
    let x = rows_to_matrix(&config.x)?;
    let y = Array1::from_vec(config.y.clone());

    let u = orthonormalize_with(&x, config.method)?;
    if !is_orthonormal(&u, ORTHONORMAL_TOLERANCE) {
        log::warn!("[numlab::project] basis failed the orthonormality check");
    }
    let projection = project(&u, &y)?;
    let closed_form = projection_matrix(&x)?.dot(&y);
    let max_deviation = projection
        .iter()
        .zip(closed_form.iter())
        .map(|(a, b)| (a - b).abs())
        .fold(0.0, f64::max);
    log::info!(
        "[numlab::project] {:?} basis vs closed form: max deviation {:e}",
        config.method,
        max_deviation
    );

    Ok(ProjectionReport {
        basis: u.rows().into_iter().map(|row| row.to_vec()).collect(),
        projection: projection.to_vec(),
        closed_form: closed_form.to_vec(),
        max_deviation,
    })
}
