//! Two-state Markov chain simulation.
//!
//! States are encoded as `u8` values `0` and `1`. A chain always starts in
//! state `1`; `h_h` is the probability of staying in state `1` and `l_l`
//! the probability of staying in state `0`.
pub mod chain;

pub use chain::{
    estimate_params, generate, generate_from_draws, generate_with, occupancy, TransitionParams,
};
