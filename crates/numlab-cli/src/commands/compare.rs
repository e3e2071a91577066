//! `numlab compare`: time every kernel strategy on the same batch.
use std::time::Instant;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use numlab_core::config::{KernelStrategy, SimulationConfig};
use numlab_core::kernels::simulate_batch;

/// Batch settings for a strategy comparison.
///
/// Every kernel strategy is always run, so unlike [`SimulationConfig`] there
/// is no `strategy` key; unknown keys are rejected when parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompareConfig {
    pub n: usize,
    pub h_h: f64,
    pub l_l: f64,
    pub seed: u64,
    pub chains: usize,
    pub repeats: usize,
}

impl CompareConfig {
    /// Chain settings shared by every strategy in the comparison.
    pub fn simulation(&self) -> SimulationConfig {
        SimulationConfig::new(self.n, self.h_h, self.l_l, self.seed)
    }

    /// Take the chain settings from `simulation`, keeping `chains` and `repeats`.
    pub fn set_simulation(&mut self, simulation: &SimulationConfig) {
        self.n = simulation.n;
        self.h_h = simulation.h_h;
        self.l_l = simulation.l_l;
        self.seed = simulation.seed;
    }
}

impl Default for CompareConfig {
    fn default() -> Self {
        let simulation = SimulationConfig::default();
        Self {
            n: 100_000,
            h_h: simulation.h_h,
            l_l: simulation.l_l,
            seed: simulation.seed,
            chains: 8,
            repeats: 3,
        }
    }
}

/// Wall-clock timings for one strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KernelTiming {
    pub strategy: KernelStrategy,
    pub best_ms: f64,
    pub mean_ms: f64,
}

/// Run every strategy `repeats` times and check that they produce the same batch.
pub fn run_compare(config: &CompareConfig) -> Result<Vec<KernelTiming>> {
    if config.repeats == 0 {
        bail!("repeats must be at least 1");
    }
    let sim = config.simulation();
    let params = sim.params()?;

    let mut reference = None;
    let mut timings = Vec::with_capacity(KernelStrategy::ALL.len());
    for strategy in KernelStrategy::ALL {
        let mut elapsed = Vec::with_capacity(config.repeats);
        let mut batch = Vec::new();
        for _ in 0..config.repeats {
            let start = Instant::now();
            batch = simulate_batch(strategy, sim.n, &params, config.chains, sim.seed)?;
            elapsed.push(start.elapsed().as_secs_f64() * 1e3);
        }

        if reference.is_none() {
            reference = Some(batch);
        } else if reference.as_ref() != Some(&batch) {
            bail!("{} kernel produced a different batch", strategy.name());
        }

        let best_ms = elapsed.iter().copied().fold(f64::INFINITY, f64::min);
        let mean_ms = elapsed.iter().sum::<f64>() / elapsed.len() as f64;
        log::info!(
            "[numlab::compare] {:>10}: best {:.3} ms, mean {:.3} ms",
            strategy.name(),
            best_ms,
            mean_ms
        );
        timings.push(KernelTiming {
            strategy,
            best_ms,
            mean_ms,
        });
    }
    Ok(timings)
}
