//! Per-tick stochastic multiplier path.
//!
//! A discretized geometric process with a directional trend, occasional
//! fat-tail jumps and one-shot volatility clustering. The step is purely
//! multiplicative, so a single tick can never push the value non-positive,
//! and the result is clamped between a visual floor and a ceiling tied to
//! the hidden crash target. The path never looks at prize tiers.

use crate::config::GameConfig;
use crate::constants::{
    CLUSTER_BASE_BOOST, CLUSTER_MAX_BOOST, CLUSTER_RETURN_WEIGHT, CLUSTER_TRIGGER_RETURN,
    CRASH_PULL_FACTOR, DOWNSIDE_JUMP_CHANCE, DOWNSIDE_JUMP_SCALE, LATE_ROUND_DRAG,
    LATE_ROUND_PROXIMITY, MAX_TICK_SECONDS, MULTIPLIER_FLOOR, OVERSHOOT_RATIO, TREND_FLIP_CHANCE,
    TREND_MIN_HOLD_SECONDS, TREND_STRENGTH, UPSIDE_JUMP_CHANCE, UPSIDE_JUMP_SCALE,
};
use crate::engine::rng::standard_normal;
use crate::engine::round::Round;
use rand::Rng;
use std::time::Instant;

/// Advances the observable multiplier by one tick and returns the new value.
///
/// `dt` comes from wall-clock elapsed time, clamped so a stalled host cannot
/// produce a huge single-step jump. The caller is responsible for checking
/// the crash deadline first; this function only produces path values.
pub fn advance_multiplier(
    round: &mut Round,
    now: Instant,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> f64 {
    let dt = now
        .saturating_duration_since(round.last_update)
        .as_secs_f64()
        .min(MAX_TICK_SECONDS);
    round.last_update = now;

    // Fraction of the round elapsed: 0 at start, 1 at the hidden deadline
    let round_seconds = round
        .crash_deadline
        .duration_since(round.started_at)
        .as_secs_f64();
    let seconds_left = round
        .crash_deadline
        .saturating_duration_since(now)
        .as_secs_f64();
    let proximity = 1.0 - seconds_left / round_seconds;

    let base_volatility = config.game.volatility_per_second;
    // one-shot elevated volatility from a prior large move
    let sigma = round.volatility_override.take().unwrap_or(base_volatility);

    // Trend holds for a while, then flips with small probability per check
    let stable_for = now
        .saturating_duration_since(round.trend_changed_at)
        .as_secs_f64();
    if stable_for > TREND_MIN_HOLD_SECONDS && rng.gen::<f64>() < TREND_FLIP_CHANCE {
        round.trend = -round.trend;
        round.trend_changed_at = now;
    }

    // Down-moves accelerate near the deadline so the path can fall before
    // the crash; everything slows once the round is nearly over
    let mut drift = round.trend * TREND_STRENGTH;
    if round.trend < 0.0 {
        drift -= proximity * CRASH_PULL_FACTOR;
    }
    if proximity > LATE_ROUND_PROXIMITY {
        drift -= LATE_ROUND_DRAG;
    }

    let z = standard_normal(rng);
    let mut log_return = drift * dt + sigma * dt.sqrt() * z;

    // Fat tails, asymmetric: upside jumps slightly more frequent and larger
    if rng.gen::<f64>() < UPSIDE_JUMP_CHANCE {
        log_return += standard_normal(rng) * UPSIDE_JUMP_SCALE;
    }
    if rng.gen::<f64>() < DOWNSIDE_JUMP_CHANCE {
        log_return -= standard_normal(rng) * DOWNSIDE_JUMP_SCALE;
    }

    let mut next = round.multiplier * (1.0 + log_return);

    // A big move arms one elevated-volatility tick, bounded
    if log_return.abs() > CLUSTER_TRIGGER_RETURN {
        let boost = CLUSTER_BASE_BOOST + (log_return.abs() * CLUSTER_RETURN_WEIGHT).min(CLUSTER_MAX_BOOST);
        round.volatility_override = Some(base_volatility * boost);
    }

    next = next.clamp(MULTIPLIER_FLOOR, round.crash_target * OVERSHOOT_RATIO);
    round.multiplier = next;
    next
}
