//! `numlab markov`: simulate one chain and summarize it.
use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use numlab_core::config::SimulationConfig;
use numlab_core::markov::{estimate_params, generate_with, occupancy};

/// Summary of a single simulated chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkovSummary {
    pub n: usize,
    pub h_h: f64,
    pub l_l: f64,
    pub seed: u64,
    /// Fraction of steps spent in state 1.
    pub occupancy: f64,
    /// `[pi_0, pi_1]`, absent when both states are absorbing.
    pub stationary: Option<[f64; 2]>,
    /// Transition probabilities re-estimated from the path, when identifiable.
    pub estimated: Option<(f64, f64)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub states: Option<Vec<u8>>,
}

/// Simulate the chain described by `config`.
pub fn run_markov(config: &SimulationConfig, include_states: bool) -> Result<MarkovSummary> {
    let params = config.params()?;
    let mut rng = StdRng::seed_from_u64(config.seed);
    let states = generate_with(config.n, &params, &mut rng)?;

    let occupancy = occupancy(&states);
    let stationary = params.stationary_distribution();
    match stationary {
        Some([_, pi_1]) => log::info!(
            "[numlab::markov] occupancy of state 1: {:.4} (stationary {:.4})",
            occupancy,
            pi_1
        ),
        None => log::info!(
            "[numlab::markov] occupancy of state 1: {:.4} (no unique stationary law)",
            occupancy
        ),
    }

    let estimated = match estimate_params(&states) {
        Ok(est) => Some((est.h_h(), est.l_l())),
        Err(e) => {
            log::warn!("[numlab::markov] skipping parameter estimate: {}", e);
            None
        }
    };

    Ok(MarkovSummary {
        n: config.n,
        h_h: params.h_h(),
        l_l: params.l_l(),
        seed: config.seed,
        occupancy,
        stationary,
        estimated,
        states: include_states.then(|| states.to_vec()),
    })
}
