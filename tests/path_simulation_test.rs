//! Integration test: multiplier path simulation
//!
//! Uses a scripted RNG to pin down the deterministic parts of the path
//! (drift-only compounding, dt clamping, volatility clustering) and a
//! seeded RNG for the statistical ones (clamp boundedness).

use moonshot::config::GameConfig;
use moonshot::constants::{MULTIPLIER_FLOOR, OVERSHOOT_RATIO};
use moonshot::engine::path::advance_multiplier;
use moonshot::engine::round::Round;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// RNG that replays a fixed cycle of uniform draws.
///
/// rand's `Standard` f64 sampler keeps the high 53 bits of `next_u64`, so
/// encoding each desired draw as `(v * 2^53) << 11` makes `gen::<f64>()`
/// return the scripted value.
struct SequenceRng {
    values: Vec<f64>,
    idx: usize,
}

impl SequenceRng {
    fn cycle(values: &[f64]) -> Self {
        Self {
            values: values.to_vec(),
            idx: 0,
        }
    }
}

impl RngCore for SequenceRng {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let v = self.values[self.idx % self.values.len()];
        self.idx += 1;
        ((v * (1u64 << 53) as f64) as u64) << 11
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Draw cycle for one tick with Z = 0 and no fat-tail jumps:
/// u1 = 0.5, u2 = 0.25 (cos(pi/2) = 0), then two jump rolls above their
/// thresholds.
const ZERO_NOISE: [f64; 4] = [0.5, 0.25, 0.99, 0.99];

fn test_round(start: Instant, crash_target: f64, duration_secs: u64, trend: f64) -> Round {
    Round::new(
        Uuid::new_v4(),
        start,
        crash_target,
        Duration::from_secs(duration_secs),
        trend,
    )
}

#[test]
fn test_drift_only_compounding() {
    // 10 ticks of dt = 0.05s with Z = 0 must equal pure drift compounding
    let config = GameConfig::default();
    let mut rng = SequenceRng::cycle(&ZERO_NOISE);
    let start = Instant::now();
    let mut round = test_round(start, 10.0, 20, 1.0);

    for i in 1..=10u64 {
        let now = start + Duration::from_millis(i * 50);
        advance_multiplier(&mut round, now, &config, &mut rng);
    }

    let drift = 0.14; // up-trend strength, far from the deadline
    let expected = (1.0 + drift * 0.05f64).powi(10);
    assert!(
        (round.multiplier - expected).abs() < 1e-9,
        "got {}, expected {}",
        round.multiplier,
        expected
    );
}

#[test]
fn test_stalled_host_dt_is_clamped() {
    // a 1s gap between ticks must step at most 0.1s of simulated time
    let config = GameConfig::default();
    let mut rng = SequenceRng::cycle(&ZERO_NOISE);
    let start = Instant::now();
    let mut round = test_round(start, 10.0, 20, 1.0);

    advance_multiplier(&mut round, start + Duration::from_secs(1), &config, &mut rng);

    let expected = 1.0 + 0.14 * 0.1;
    assert!((round.multiplier - expected).abs() < 1e-12);
}

#[test]
fn test_down_trend_decays_strictly_toward_floor() {
    // down-trend with Z = 0: every tick shrinks the value multiplicatively,
    // and the floor is never crossed
    let config = GameConfig::default();
    let mut rng = SequenceRng::cycle(&ZERO_NOISE);
    let start = Instant::now();
    let mut round = test_round(start, 2.0, 60, -1.0);

    let mut previous = round.multiplier;
    for i in 1..=40u64 {
        let now = start + Duration::from_millis(i * 50);
        let value = advance_multiplier(&mut round, now, &config, &mut rng);
        assert!(value < previous, "tick {}: {} did not decay", i, value);
        assert!(value >= MULTIPLIER_FLOOR);
        previous = value;
    }
    // ~2s of pure -0.14/s drift lands around 0.75
    assert!(previous < 0.76);
}

#[test]
fn test_volatility_override_consumed_once() {
    let config = GameConfig::default();
    let mut rng = SequenceRng::cycle(&ZERO_NOISE);
    let start = Instant::now();
    let mut round = test_round(start, 10.0, 20, 1.0);
    round.volatility_override = Some(5.0);

    advance_multiplier(
        &mut round,
        start + Duration::from_millis(50),
        &config,
        &mut rng,
    );

    // with Z = 0 the elevated sigma contributes nothing and the small
    // drift-only return does not re-arm clustering
    assert_eq!(round.volatility_override, None);
}

#[test]
fn test_large_move_arms_bounded_override() {
    // u1 = 0.001 gives |Z| ~ 3.7; the resulting return is far past the
    // clustering trigger, so the boost clamps at its bound
    let config = GameConfig::default();
    let mut rng = SequenceRng::cycle(&[0.001, 0.5, 0.99, 0.99]);
    let start = Instant::now();
    let mut round = test_round(start, 10.0, 20, 1.0);

    advance_multiplier(
        &mut round,
        start + Duration::from_millis(50),
        &config,
        &mut rng,
    );

    let expected = config.game.volatility_per_second * 2.0; // 1.2 + capped 0.8
    let armed = round.volatility_override.expect("override armed");
    assert!((armed - expected).abs() < 1e-12);
}

#[test]
fn test_trend_flip_after_hold_period() {
    let config = GameConfig::default();
    let start = Instant::now();
    let mut round = test_round(start, 10.0, 60, 1.0);

    // flip roll below the 12% chance, then zero noise
    let mut rng = SequenceRng::cycle(&[0.05, 0.5, 0.25, 0.99, 0.99]);
    advance_multiplier(&mut round, start + Duration::from_secs(3), &config, &mut rng);

    assert_eq!(round.trend, -1.0);
    assert_eq!(round.trend_changed_at, start + Duration::from_secs(3));
}

#[test]
fn test_no_trend_flip_before_hold_period() {
    let config = GameConfig::default();
    let start = Instant::now();
    let mut round = test_round(start, 10.0, 60, 1.0);

    // within the hold period no flip roll is consumed at all
    let mut rng = SequenceRng::cycle(&ZERO_NOISE);
    advance_multiplier(&mut round, start + Duration::from_secs(1), &config, &mut rng);

    assert_eq!(round.trend, 1.0);
    assert_eq!(round.trend_changed_at, start);
}

#[test]
fn test_path_stays_within_clamp_bounds() {
    let config = GameConfig::default();
    let start = Instant::now();

    for seed in 0..20 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let crash_target = 1.5 + (seed as f64) * 0.4;
        let mut round = test_round(start, crash_target, 20, 1.0);

        for i in 1..=300u64 {
            let now = start + Duration::from_millis(i * 60);
            let value = advance_multiplier(&mut round, now, &config, &mut rng);
            assert!(
                (MULTIPLIER_FLOOR..=crash_target * OVERSHOOT_RATIO).contains(&value),
                "seed {} tick {}: {} out of bounds",
                seed,
                i,
                value
            );
        }
    }
}
