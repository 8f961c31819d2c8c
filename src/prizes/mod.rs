//! Prize tiers and multiplier-to-prize resolution.

pub mod resolution;
pub mod types;

pub use resolution::{consolation_prize, next_tier_up, resolve_prize, tier_for_multiplier};
pub use types::{PrizeAward, PrizeKind};
