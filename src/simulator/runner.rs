//! Monte Carlo event simulation.
//!
//! Drives the real engine with a synthetic clock and simple participant
//! behavior: each round the participant picks a personal target multiplier
//! and cashes out the first tick at or above it, or rides into the crash.
//! This is how the rigging feedback loop gets tuned without a UI.

use super::config::SimConfig;
use super::report::SimReport;
use crate::config::GameConfig;
use crate::constants::TICK_INTERVAL_MS;
use crate::engine::round::{RoundPhase, TickOutcome};
use crate::prizes::PrizeKind;
use crate::session::GameSession;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Stats collected from a single simulated event.
#[derive(Debug, Clone, Serialize)]
pub struct RunStats {
    pub rounds: u32,
    pub cash_outs: u32,
    pub crashes: u32,
    pub awards: BTreeMap<PrizeKind, u64>,
    pub remaining: BTreeMap<PrizeKind, u32>,
    /// Round number (1-based) at which a tier first hit zero stock
    pub first_exhausted_round: BTreeMap<PrizeKind, u32>,
    pub avg_cash_out_multiplier: f64,
}

/// Run the full batch of simulated events.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let mut runs = Vec::with_capacity(config.num_runs as usize);
    for run_idx in 0..config.num_runs {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed + run_idx as u64),
            None => ChaCha8Rng::from_entropy(),
        };
        runs.push(simulate_single_run(config, &mut rng));

        if config.verbosity >= 1 && (run_idx + 1) % 25 == 0 {
            println!("  ... {}/{} events simulated", run_idx + 1, config.num_runs);
        }
    }
    SimReport::from_runs(config, runs)
}

fn simulate_single_run(config: &SimConfig, rng: &mut ChaCha8Rng) -> RunStats {
    let mut session =
        GameSession::with_config(GameConfig::default()).expect("default config is valid");

    let origin = Instant::now();
    let mut clock_ms: u64 = 0;

    let mut cash_outs = 0u32;
    let mut crashes = 0u32;
    let mut cash_out_multiplier_sum = 0.0;
    let mut first_exhausted_round: BTreeMap<PrizeKind, u32> = BTreeMap::new();

    for round_idx in 0..config.rounds_per_run {
        let now = origin + Duration::from_millis(clock_ms);
        session.start_round(now, rng);

        let target =
            config.target_min + rng.gen::<f64>() * (config.target_max - config.target_min);

        loop {
            clock_ms += TICK_INTERVAL_MS;
            let now = origin + Duration::from_millis(clock_ms);
            match session.tick(now, rng) {
                TickOutcome::Sample(sample) => {
                    if sample.multiplier >= target {
                        let resolution = session.cash_out(now).expect("round is running");
                        cash_outs += 1;
                        cash_out_multiplier_sum += resolution.final_multiplier;
                        break;
                    }
                }
                TickOutcome::Crashed(_) => {
                    crashes += 1;
                    break;
                }
                TickOutcome::Ignored => break,
            }
        }
        if session.phase() == RoundPhase::Crashed {
            session.reset_round();
        }

        for kind in PrizeKind::all() {
            if session.ledger.remaining(kind) == 0 {
                first_exhausted_round.entry(kind).or_insert(round_idx + 1);
            }
        }

        // brief idle gap between rounds
        clock_ms += 500;
    }

    let remaining = PrizeKind::all()
        .into_iter()
        .map(|kind| (kind, session.ledger.remaining(kind)))
        .collect();

    RunStats {
        rounds: config.rounds_per_run,
        cash_outs,
        crashes,
        awards: session.stats.awarded.clone(),
        remaining,
        first_exhausted_round,
        avg_cash_out_multiplier: if cash_outs > 0 {
            cash_out_multiplier_sum / cash_outs as f64
        } else {
            0.0
        },
    }
}
