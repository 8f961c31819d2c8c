//! Hidden crash-target generation with inventory-aware rigging.
//!
//! The base distribution is long-tailed and low-biased: three weighted bands
//! over [1, 2), [2, 4) and [4, 10). Rigging then steers the target away from
//! tiers running low on stock, as a closed feedback loop: the scarcer a tier,
//! the harder its range is to reach, but never outright impossible.

use crate::config::GameConfig;
use crate::constants::{
    BAND_HIGH_SPAN, BAND_HIGH_START, BAND_LOW_SPAN, BAND_LOW_START, BAND_MID_SPAN, BAND_MID_START,
    CRITICAL_RIG_DRAW_SPAN, CRITICAL_STOCK_RATIO, LOW_RIG_DRAW_SPAN, LOW_STOCK_RATIO,
    MIN_CRASH_TARGET,
};
use crate::inventory::InventoryLedger;
use crate::prizes::tier_for_multiplier;
use rand::Rng;
use std::time::Duration;

/// Draws the hidden multiplier at which the next round will force-crash.
///
/// Always at least [`MIN_CRASH_TARGET`]: a round must stay technically
/// winnable above the 1.0 starting value.
pub fn generate_crash_point(
    config: &GameConfig,
    ledger: &InventoryLedger,
    rng: &mut impl Rng,
) -> f64 {
    let band: f64 = rng.gen();
    let base = if band < config.game.crash_weight_low {
        BAND_LOW_START + rng.gen::<f64>() * BAND_LOW_SPAN
    } else if band < config.game.crash_weight_low + config.game.crash_weight_med {
        BAND_MID_START + rng.gen::<f64>() * BAND_MID_SPAN
    } else {
        BAND_HIGH_START + rng.gen::<f64>() * BAND_HIGH_SPAN
    };

    let rigged = if config.rigging.enabled {
        apply_inventory_rigging(base, config, ledger, rng)
    } else {
        base
    };

    rigged.max(MIN_CRASH_TARGET)
}

/// Biases a base crash point downward when the tier it would award is low on
/// stock. The bottom tier is never protected.
///
/// Below 10% stock the divisor scales with the tier's protection factor;
/// below 30% a gentler, tier-agnostic divisor applies. The moderate band
/// deliberately ignores the protection factor.
pub fn apply_inventory_rigging(
    crash_point: f64,
    config: &GameConfig,
    ledger: &InventoryLedger,
    rng: &mut impl Rng,
) -> f64 {
    let tier = tier_for_multiplier(config, crash_point);
    if tier.kind == config.bottom_tier().kind {
        return crash_point;
    }

    let remaining = ledger.remaining(tier.kind);
    let ratio = remaining as f64 / tier.initial_stock as f64;

    if ratio < CRITICAL_STOCK_RATIO {
        let adjustment = rng.gen::<f64>() * CRITICAL_RIG_DRAW_SPAN;
        (crash_point / (tier.protection_factor * adjustment + 1.0)).max(MIN_CRASH_TARGET)
    } else if ratio < LOW_STOCK_RATIO {
        let adjustment = rng.gen::<f64>() * LOW_RIG_DRAW_SPAN;
        crash_point / (1.0 + adjustment)
    } else {
        crash_point
    }
}

/// Round length, uniform in the configured window and independent of the
/// crash target. The path simulator handles getting there in time.
pub fn roll_round_duration(config: &GameConfig, rng: &mut impl Rng) -> Duration {
    let span = config.game.max_round_ms - config.game.min_round_ms;
    let ms = config.game.min_round_ms + (rng.gen::<f64>() * span as f64) as u64;
    Duration::from_millis(ms)
}
