//! One simulation, several ways of running it.
//!
//! Every strategy consumes the per-chain random stream in the same order,
//! so for a given seed they produce identical batches and differ only in
//! how the work is scheduled.
use ndarray::Array1;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::config::{KernelStrategy, SimulationConfig};
use crate::error::{NumlabError, Result};
use crate::markov::{generate_with, TransitionParams};

/// Simulate `chains` independent sequences of length `n`.
///
/// Chain `c` is driven by `StdRng::seed_from_u64(seed + c)`.
pub fn simulate_batch(
    strategy: KernelStrategy,
    n: usize,
    params: &TransitionParams,
    chains: usize,
    seed: u64,
) -> Result<Vec<Array1<u8>>> {
    if n == 0 {
        return Err(NumlabError::InvalidParameter {
            name: "n",
            value: 0.0,
        });
    }
    log::debug!(
        "Simulating {} chains of length {} with the {} kernel",
        chains,
        n,
        strategy.name()
    );

    match strategy {
        KernelStrategy::Naive => Ok((0..chains)
            .map(|c| simulate_naive(n, params, &mut chain_rng(seed, c)))
            .collect()),
        KernelStrategy::Vectorized => (0..chains)
            .map(|c| generate_with(n, params, &mut chain_rng(seed, c)))
            .collect(),
        KernelStrategy::Parallel => (0..chains)
            .into_par_iter()
            .map(|c| generate_with(n, params, &mut chain_rng(seed, c)))
            .collect(),
    }
}

/// Run a batch described by a [`SimulationConfig`].
pub fn simulate_config(config: &SimulationConfig, chains: usize) -> Result<Vec<Array1<u8>>> {
    let params = config.params()?;
    simulate_batch(config.strategy, config.n, &params, chains, config.seed)
}

fn chain_rng(seed: u64, chain: usize) -> StdRng {
    StdRng::seed_from_u64(seed.wrapping_add(chain as u64))
}

/// Plain step loop, one draw per transition.
fn simulate_naive<R: Rng + ?Sized>(n: usize, params: &TransitionParams, rng: &mut R) -> Array1<u8> {
    let mut states = Array1::<u8>::zeros(n);
    states[0] = 1;
    for i in 1..n {
        let r: f64 = rng.gen();
        states[i] = params.next_state(states[i - 1], r);
    }
    states
}
