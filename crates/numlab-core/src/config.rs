use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::Result;
use crate::markov::TransitionParams;

/// Parameters for a chain simulation run.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    /// Length of each simulated sequence.
    pub n: usize,
    pub h_h: f64,
    pub l_l: f64,
    /// Seed of the random stream. Chain `c` of a batch uses `seed + c`.
    pub seed: u64,
    pub strategy: KernelStrategy,
}

impl SimulationConfig {
    pub fn new(n: usize, h_h: f64, l_l: f64, seed: u64) -> Self {
        Self {
            n,
            h_h,
            l_l,
            seed,
            ..Self::default()
        }
    }

    /// Validate the probability pair.
    pub fn params(&self) -> Result<TransitionParams> {
        TransitionParams::new(self.h_h, self.l_l)
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            n: 1_000_000,
            h_h: 0.9,
            l_l: 0.8,
            seed: 1234,
            strategy: KernelStrategy::default(),
        }
    }
}

/// How a batch of chains is executed.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum KernelStrategy {
    /// Step-by-step loop drawing one random number per transition.
    Naive,
    /// Pre-draw the whole random stream, then run the transition pass.
    #[default]
    Vectorized,
    /// Vectorized chains spread over the rayon thread pool.
    Parallel,
}

impl KernelStrategy {
    pub const ALL: [KernelStrategy; 3] = [
        KernelStrategy::Naive,
        KernelStrategy::Vectorized,
        KernelStrategy::Parallel,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            KernelStrategy::Naive => "naive",
            KernelStrategy::Vectorized => "vectorized",
            KernelStrategy::Parallel => "parallel",
        }
    }
}

impl FromStr for KernelStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "naive" | "loop" => Ok(KernelStrategy::Naive),
            "vectorized" | "vectorised" => Ok(KernelStrategy::Vectorized),
            "parallel" => Ok(KernelStrategy::Parallel),
            _ => Err(format!(
                "Unknown kernel strategy: {}. Expected one of naive, vectorized, parallel",
                s
            )),
        }
    }
}
