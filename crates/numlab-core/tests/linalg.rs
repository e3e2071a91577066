//! Integration tests for Gram-Schmidt orthonormalization and the dense backend.

use ndarray::{array, Array1, Array2};
use numlab_core::linalg::{
    inner, is_orthonormal, matmul, norm, orthonormalize, project, projection_matrix,
    qr_projection, solve, symmetric_eigen, transpose,
};
use numlab_core::NumlabError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_matrix(rows: usize, cols: usize, seed: u64) -> Array2<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    Array2::from_shape_fn((rows, cols), |_| rng.gen_range(-1.0..1.0))
}

fn max_abs_diff(a: &Array1<f64>, b: &Array1<f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}

// ---------------------------------------------------------------------------
// Orthonormal basis
// ---------------------------------------------------------------------------

#[test]
fn basis_is_orthonormal_for_random_inputs() {
    for seed in 0..10 {
        let x = random_matrix(12, 5, seed);
        let u = orthonormalize(&x).unwrap();
        assert_eq!(u.dim(), (12, 5));
        assert!(is_orthonormal(&u, 1e-9));
    }
}

#[test]
fn basis_projection_matches_closed_form() {
    for seed in 0..10 {
        let x = random_matrix(8, 3, seed);
        let y = random_matrix(8, 1, seed + 100).column(0).to_owned();
        let u = orthonormalize(&x).unwrap();
        let via_basis = project(&u, &y).unwrap();
        let via_formula = projection_matrix(&x).unwrap().dot(&y);
        assert!(max_abs_diff(&via_basis, &via_formula) < 1e-9);
        let via_qr = qr_projection(&x, &y).unwrap();
        assert!(max_abs_diff(&via_basis, &via_qr) < 1e-9);
    }
}

#[test]
fn worked_projection_example() {
    let x = array![[1.0, 0.0], [0.0, -6.0], [2.0, 2.0]];
    let y = array![1.0, 3.0, -3.0];
    let u = orthonormalize(&x).unwrap();
    let p = project(&u, &y).unwrap();
    let expected = array![-0.5652, 3.2609, -2.2174];
    assert!(max_abs_diff(&p, &expected) < 1e-4);
}

#[test]
fn dependent_columns_report_offending_index() {
    let mut x = random_matrix(6, 4, 3);
    let copy = x.column(1).to_owned();
    x.column_mut(3).assign(&copy);
    assert_eq!(
        orthonormalize(&x).unwrap_err(),
        NumlabError::DegenerateSubspace { column: 3 }
    );
}

#[test]
fn qr_projection_reports_duplicated_column() {
    let mut x = random_matrix(6, 3, 31);
    let copy = x.column(0).to_owned();
    x.column_mut(2).assign(&copy);
    let y = random_matrix(6, 1, 32).column(0).to_owned();
    assert_eq!(
        qr_projection(&x, &y).unwrap_err(),
        NumlabError::DegenerateSubspace { column: 2 }
    );
}

#[test]
fn qr_projection_rejects_scaled_copy() {
    let x = array![[1.0, 2.0], [2.0, 4.0], [3.0, 6.0]];
    let y = array![1.0, 0.0, 0.0];
    assert!(orthonormalize(&x).is_err());
    assert_eq!(
        qr_projection(&x, &y).unwrap_err(),
        NumlabError::DegenerateSubspace { column: 1 }
    );
}

#[test]
fn empty_matrices_are_shape_mismatches() {
    let y = array![1.0, 2.0, 3.0];
    for x in [Array2::<f64>::zeros((0, 2)), Array2::<f64>::zeros((3, 0))] {
        assert!(matches!(
            orthonormalize(&x),
            Err(NumlabError::ShapeMismatch { .. })
        ));
        assert!(matches!(
            qr_projection(&x, &y),
            Err(NumlabError::ShapeMismatch { .. })
        ));
    }
}

#[test]
fn residual_of_projection_is_orthogonal_to_subspace() {
    let x = random_matrix(10, 4, 21);
    let y = random_matrix(10, 1, 22).column(0).to_owned();
    let u = orthonormalize(&x).unwrap();
    let residual = &y - &project(&u, &y).unwrap();
    for col in x.columns() {
        assert!(inner(&col, &residual).unwrap().abs() < 1e-9);
    }
}

// ---------------------------------------------------------------------------
// Elementary operations and backend
// ---------------------------------------------------------------------------

#[test]
fn solve_satisfies_system() {
    let a = array![[4.0, 1.0, 0.0], [1.0, 3.0, 1.0], [0.0, 1.0, 2.0]];
    let b = array![1.0, 2.0, 3.0];
    let x = solve(&a, &b).unwrap();
    assert!(max_abs_diff(&a.dot(&x), &b) < 1e-10);
}

#[test]
fn solve_rejects_mismatched_rhs() {
    let a = array![[1.0, 0.0], [0.0, 1.0]];
    assert!(matches!(
        solve(&a, &array![1.0, 2.0, 3.0]),
        Err(NumlabError::ShapeMismatch { .. })
    ));
}

#[test]
fn eigendecomposition_reconstructs_matrix() {
    let x = random_matrix(5, 5, 9);
    let a = matmul(&transpose(&x), &x).unwrap();
    let eig = symmetric_eigen(&a).unwrap();
    assert!(eig
        .values
        .iter()
        .zip(eig.values.iter().skip(1))
        .all(|(a, b)| a <= b));

    let lambda = Array2::from_diag(&eig.values);
    let rebuilt = eig.vectors.dot(&lambda).dot(&eig.vectors.t());
    for (r, o) in rebuilt.iter().zip(a.iter()) {
        assert!((r - o).abs() < 1e-9);
    }
    assert!(is_orthonormal(&eig.vectors, 1e-9));
}

#[test]
fn norm_of_unit_basis_columns() {
    let u = orthonormalize(&random_matrix(7, 3, 4)).unwrap();
    for col in u.columns() {
        assert!((norm(&col) - 1.0).abs() < 1e-12);
    }
}
