//! Moonshot - Crash-Game Prize Engine
//!
//! The probabilistic core of a round-based prize stall: a multiplier climbs
//! along a randomized path toward a hidden crash target, the participant
//! cashes out for the tier the multiplier landed in, and the crash-point
//! distribution is quietly biased to stretch a fixed prize inventory across
//! a whole event. Rendering and input belong to the host; this crate only
//! decides outcomes.

pub mod build_info;
pub mod config;
pub mod constants;
pub mod engine;
pub mod inventory;
pub mod prizes;
pub mod session;
pub mod simulator;
pub mod stats;
pub mod utils;

pub use config::{ConfigError, GameConfig};
pub use engine::{PathSample, RoundEngine, RoundPhase, RoundResolution, TickOutcome};
pub use inventory::InventoryLedger;
pub use prizes::{PrizeAward, PrizeKind};
pub use session::GameSession;
pub use stats::{RecentWins, Statistics};
