//! The probabilistic round engine: crash-target generation, the stochastic
//! multiplier path, and the round lifecycle state machine.

pub mod crash_point;
pub mod path;
pub mod rng;
pub mod round;

pub use round::{PathSample, RoundEngine, RoundPhase, RoundResolution, TickOutcome};
