use ndarray::{array, Array1, Array2};
use rand::Rng;
use serde::Serialize;

use crate::error::{NumlabError, Result};

/// Validated transition probabilities of a two-state chain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TransitionParams {
    h_h: f64,
    l_l: f64,
}

impl TransitionParams {
    /// Build a parameter pair, rejecting anything outside `[0, 1]` (NaN included).
    ///
    /// Out-of-range values are never clamped.
    pub fn new(h_h: f64, l_l: f64) -> Result<Self> {
        check_probability("h_h", h_h)?;
        check_probability("l_l", l_l)?;
        Ok(Self { h_h, l_l })
    }

    /// Probability of staying in state 1.
    pub fn h_h(&self) -> f64 {
        self.h_h
    }

    /// Probability of staying in state 0.
    pub fn l_l(&self) -> f64 {
        self.l_l
    }

    /// Next state given the current one and a uniform draw `r` in `[0, 1)`.
    #[inline]
    pub fn next_state(&self, current: u8, r: f64) -> u8 {
        if current == 1 {
            if r < self.h_h {
                1
            } else {
                0
            }
        } else if r < self.l_l {
            0
        } else {
            1
        }
    }

    /// Row-stochastic transition matrix, rows and columns ordered `[0, 1]`.
    pub fn transition_matrix(&self) -> Array2<f64> {
        array![[self.l_l, 1.0 - self.l_l], [1.0 - self.h_h, self.h_h]]
    }

    /// Stationary distribution `[pi_0, pi_1]`.
    ///
    /// Returns `None` when both states are absorbing, since every
    /// distribution is then stationary.
    pub fn stationary_distribution(&self) -> Option<[f64; 2]> {
        let leave_high = 1.0 - self.h_h;
        let leave_low = 1.0 - self.l_l;
        let total = leave_high + leave_low;
        if total <= 0.0 {
            return None;
        }
        let pi_1 = leave_low / total;
        Some([1.0 - pi_1, pi_1])
    }
}

fn check_probability(name: &'static str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(NumlabError::InvalidParameter { name, value })
    }
}

/// Simulate `n` steps of the chain with transition probabilities `h_h` and `l_l`.
///
/// The `n - 1` uniform draws are taken from `rng` in one pass before any
/// state is computed, so the draws never depend on the generated states.
///
/// # Arguments
///
/// * `n` - Length of the returned sequence, at least 1.
/// * `h_h` - Probability of staying in state 1.
/// * `l_l` - Probability of staying in state 0.
/// * `rng` - Source of uniform draws; pass a seeded `StdRng` for reproducible output.
///
/// # Returns
///
/// A sequence of `n` states whose first element is 1.
pub fn generate<R: Rng + ?Sized>(
    n: usize,
    h_h: f64,
    l_l: f64,
    rng: &mut R,
) -> Result<Array1<u8>> {
    let params = TransitionParams::new(h_h, l_l)?;
    generate_with(n, &params, rng)
}

/// Same as [`generate`] for an already validated parameter pair.
pub fn generate_with<R: Rng + ?Sized>(
    n: usize,
    params: &TransitionParams,
    rng: &mut R,
) -> Result<Array1<u8>> {
    if n == 0 {
        return Err(NumlabError::InvalidParameter {
            name: "n",
            value: 0.0,
        });
    }
    let draws: Vec<f64> = (0..n - 1).map(|_| rng.gen::<f64>()).collect();
    generate_from_draws(&draws, params)
}

/// Deterministic simulation driven by an explicit stream of draws.
///
/// Draw `i` decides the transition from position `i` to `i + 1`, so the
/// result has `draws.len() + 1` elements. Draws must lie in `[0, 1)`.
pub fn generate_from_draws(draws: &[f64], params: &TransitionParams) -> Result<Array1<u8>> {
    if let Some(&bad) = draws.iter().find(|r| !(0.0..1.0).contains(*r)) {
        return Err(NumlabError::InvalidParameter {
            name: "draw",
            value: bad,
        });
    }

    let mut states = Array1::<u8>::zeros(draws.len() + 1);
    states[0] = 1;
    for (i, &r) in draws.iter().enumerate() {
        states[i + 1] = params.next_state(states[i], r);
    }
    Ok(states)
}

/// Fraction of time spent in state 1.
pub fn occupancy(states: &Array1<u8>) -> f64 {
    if states.is_empty() {
        return 0.0;
    }
    states.iter().filter(|&&s| s == 1).count() as f64 / states.len() as f64
}

/// Maximum-likelihood estimate of the transition probabilities from an observed path.
///
/// Fails with `InsufficientTransitions` when the path never leaves one of
/// the states, since that state's staying probability is then unidentified.
pub fn estimate_params(states: &Array1<u8>) -> Result<TransitionParams> {
    if let Some(&bad) = states.iter().find(|&&s| s > 1) {
        return Err(NumlabError::InvalidParameter {
            name: "state",
            value: bad as f64,
        });
    }

    // counts[from][to]
    let mut counts = [[0usize; 2]; 2];
    for (&from, &to) in states.iter().zip(states.iter().skip(1)) {
        counts[from as usize][to as usize] += 1;
    }

    let stay = |state: u8| -> Result<f64> {
        let row = counts[state as usize];
        let total = row[0] + row[1];
        if total == 0 {
            return Err(NumlabError::InsufficientTransitions { state });
        }
        Ok(row[state as usize] as f64 / total as f64)
    };

    let l_l = stay(0)?;
    let h_h = stay(1)?;
    log::debug!(
        "Estimated h_h = {:.4}, l_l = {:.4} from {} transitions",
        h_h,
        l_l,
        states.len().saturating_sub(1)
    );
    TransitionParams::new(h_h, l_l)
}
