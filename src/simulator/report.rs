//! Simulation report aggregation and formatting.

use super::config::SimConfig;
use super::runner::RunStats;
use crate::prizes::PrizeKind;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Aggregated results from a batch of simulated events.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub rounds_per_run: u32,

    pub avg_cash_outs: f64,
    pub avg_crashes: f64,
    pub crash_rate: f64,
    pub avg_cash_out_multiplier: f64,

    /// Average awards handed out per event, by tier
    pub avg_awards: BTreeMap<PrizeKind, f64>,
    /// Average stock left at event close, by tier
    pub avg_remaining: BTreeMap<PrizeKind, f64>,
    /// Fraction of events in which the tier sold out completely
    pub exhaustion_rate: BTreeMap<PrizeKind, f64>,
    /// Average round at which the tier sold out, over events where it did
    pub avg_exhaustion_round: BTreeMap<PrizeKind, Option<f64>>,

    pub run_stats: Vec<RunStats>,
}

impl SimReport {
    pub fn from_runs(config: &SimConfig, runs: Vec<RunStats>) -> Self {
        let n = runs.len().max(1) as f64;

        let avg_cash_outs = runs.iter().map(|r| r.cash_outs as f64).sum::<f64>() / n;
        let avg_crashes = runs.iter().map(|r| r.crashes as f64).sum::<f64>() / n;
        let total_rounds: f64 = runs.iter().map(|r| r.rounds as f64).sum();
        let crash_rate = if total_rounds > 0.0 {
            runs.iter().map(|r| r.crashes as f64).sum::<f64>() / total_rounds
        } else {
            0.0
        };
        let avg_cash_out_multiplier =
            runs.iter().map(|r| r.avg_cash_out_multiplier).sum::<f64>() / n;

        let mut avg_awards = BTreeMap::new();
        let mut avg_remaining = BTreeMap::new();
        let mut exhaustion_rate = BTreeMap::new();
        let mut avg_exhaustion_round = BTreeMap::new();

        for kind in PrizeKind::all() {
            let awards = runs
                .iter()
                .map(|r| r.awards.get(&kind).copied().unwrap_or(0) as f64)
                .sum::<f64>()
                / n;
            let remaining = runs
                .iter()
                .map(|r| r.remaining.get(&kind).copied().unwrap_or(0) as f64)
                .sum::<f64>()
                / n;
            let exhausted: Vec<f64> = runs
                .iter()
                .filter_map(|r| r.first_exhausted_round.get(&kind).map(|&x| x as f64))
                .collect();

            avg_awards.insert(kind, awards);
            avg_remaining.insert(kind, remaining);
            exhaustion_rate.insert(kind, exhausted.len() as f64 / n);
            avg_exhaustion_round.insert(
                kind,
                if exhausted.is_empty() {
                    None
                } else {
                    Some(exhausted.iter().sum::<f64>() / exhausted.len() as f64)
                },
            );
        }

        Self {
            num_runs: config.num_runs,
            rounds_per_run: config.rounds_per_run,
            avg_cash_outs,
            avg_crashes,
            crash_rate,
            avg_cash_out_multiplier,
            avg_awards,
            avg_remaining,
            exhaustion_rate,
            avg_exhaustion_round,
            run_stats: runs,
        }
    }

    /// Human-readable summary for the CLI.
    pub fn to_text(&self) -> String {
        let mut out = String::new();

        writeln!(out, "═══ EVENT SUMMARY ═══").unwrap();
        writeln!(
            out,
            "  {} events x {} rounds",
            self.num_runs, self.rounds_per_run
        )
        .unwrap();
        writeln!(
            out,
            "  cash-outs/event: {:.1}   crashes/event: {:.1}   crash rate: {:.1}%",
            self.avg_cash_outs,
            self.avg_crashes,
            self.crash_rate * 100.0
        )
        .unwrap();
        writeln!(
            out,
            "  avg cash-out multiplier: {:.2}x",
            self.avg_cash_out_multiplier
        )
        .unwrap();
        writeln!(out).unwrap();

        writeln!(out, "═══ TIER DEPLETION ═══").unwrap();
        writeln!(
            out,
            "  {:<10} {:>10} {:>10} {:>10} {:>14}",
            "tier", "awarded", "left", "sold out", "sellout round"
        )
        .unwrap();
        for kind in PrizeKind::all() {
            let sellout = match self.avg_exhaustion_round.get(&kind).copied().flatten() {
                Some(round) => format!("{:.0}", round),
                None => "-".to_string(),
            };
            writeln!(
                out,
                "  {:<10} {:>10.1} {:>10.1} {:>9.0}% {:>14}",
                kind.name(),
                self.avg_awards.get(&kind).copied().unwrap_or(0.0),
                self.avg_remaining.get(&kind).copied().unwrap_or(0.0),
                self.exhaustion_rate.get(&kind).copied().unwrap_or(0.0) * 100.0,
                sellout
            )
            .unwrap();
        }

        out
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
