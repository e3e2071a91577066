//! Integration tests for the two-state chain simulator and its helpers.

use ndarray::Array1;
use numlab_core::markov::{
    estimate_params, generate, generate_from_draws, occupancy, TransitionParams,
};
use numlab_core::NumlabError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn draw_stream(len: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen::<f64>()).collect()
}

// ---------------------------------------------------------------------------
// Shape and value invariants
// ---------------------------------------------------------------------------

#[test]
fn sequences_start_in_state_one_and_are_binary() {
    let mut rng = StdRng::seed_from_u64(11);
    for n in [1usize, 2, 3, 17, 1000] {
        let states = generate(n, 0.6, 0.3, &mut rng).unwrap();
        assert_eq!(states.len(), n);
        assert_eq!(states[0], 1);
        assert!(states.iter().all(|&s| s == 0 || s == 1));
    }
}

#[test]
fn invalid_probabilities_are_reported() {
    let mut rng = StdRng::seed_from_u64(0);
    assert_eq!(
        generate(10, 1.5, 0.5, &mut rng).unwrap_err(),
        NumlabError::InvalidParameter {
            name: "h_h",
            value: 1.5
        }
    );
    assert_eq!(
        generate(10, 0.5, -0.25, &mut rng).unwrap_err(),
        NumlabError::InvalidParameter {
            name: "l_l",
            value: -0.25
        }
    );
}

// ---------------------------------------------------------------------------
// Absorbing states
// ---------------------------------------------------------------------------

#[test]
fn state_one_is_absorbing_when_h_h_is_one() {
    for seed in 0..20 {
        let params = TransitionParams::new(1.0, 0.5).unwrap();
        let states = generate_from_draws(&draw_stream(300, seed), &params).unwrap();
        let first_one = states.iter().position(|&s| s == 1).unwrap();
        assert!(states.iter().skip(first_one).all(|&s| s == 1));
    }
}

#[test]
fn state_zero_is_absorbing_when_l_l_is_one() {
    for seed in 0..20 {
        let params = TransitionParams::new(0.5, 1.0).unwrap();
        let states = generate_from_draws(&draw_stream(300, seed), &params).unwrap();
        if let Some(first_zero) = states.iter().position(|&s| s == 0) {
            assert!(states.iter().skip(first_zero).all(|&s| s == 0));
        }
    }
}

#[test]
fn extreme_draws_respect_absorption() {
    let draws = [0.0, 0.999_999_999, 0.5, 0.999_999_999];
    let high = TransitionParams::new(1.0, 0.0).unwrap();
    assert_eq!(
        generate_from_draws(&draws, &high).unwrap().to_vec(),
        vec![1, 1, 1, 1, 1]
    );
    let low = TransitionParams::new(0.0, 1.0).unwrap();
    assert_eq!(
        generate_from_draws(&draws, &low).unwrap().to_vec(),
        vec![1, 0, 0, 0, 0]
    );
}

// ---------------------------------------------------------------------------
// Reproducibility
// ---------------------------------------------------------------------------

#[test]
fn same_seed_gives_same_sequence() {
    let a = generate(5_000, 0.9, 0.8, &mut StdRng::seed_from_u64(42)).unwrap();
    let b = generate(5_000, 0.9, 0.8, &mut StdRng::seed_from_u64(42)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn rng_and_explicit_draws_agree() {
    let params = TransitionParams::new(0.9, 0.8).unwrap();
    let from_rng = generate(1_000, 0.9, 0.8, &mut StdRng::seed_from_u64(5)).unwrap();
    let from_draws = generate_from_draws(&draw_stream(999, 5), &params).unwrap();
    assert_eq!(from_rng, from_draws);
}

// ---------------------------------------------------------------------------
// Long-run behaviour
// ---------------------------------------------------------------------------

#[test]
fn occupancy_approaches_stationary_distribution() {
    let params = TransitionParams::new(0.9, 0.8).unwrap();
    let states = generate(200_000, 0.9, 0.8, &mut StdRng::seed_from_u64(2024)).unwrap();
    let [_, pi_1] = params.stationary_distribution().unwrap();
    assert!((occupancy(&states) - pi_1).abs() < 0.02);
}

#[test]
fn estimation_recovers_parameters() {
    let states = generate(200_000, 0.7, 0.4, &mut StdRng::seed_from_u64(8)).unwrap();
    let estimated = estimate_params(&states).unwrap();
    assert!((estimated.h_h() - 0.7).abs() < 0.02);
    assert!((estimated.l_l() - 0.4).abs() < 0.02);
}

#[test]
fn estimation_rejects_non_binary_states() {
    let states = Array1::from_vec(vec![1u8, 0, 2, 1]);
    assert!(matches!(
        estimate_params(&states),
        Err(NumlabError::InvalidParameter { name: "state", .. })
    ));
}

#[test]
fn occupancy_of_empty_sequence_is_zero() {
    assert_eq!(occupancy(&Array1::<u8>::zeros(0)), 0.0);
}
