//! Round lifecycle state machine.
//!
//! One `RoundEngine` per game session. The host drives it with `start`,
//! `tick(now)` and `cash_out`; out-of-phase calls are silent no-ops so
//! duplicate button presses or late animation frames never corrupt a round.

use crate::config::GameConfig;
use crate::engine::crash_point::{generate_crash_point, roll_round_duration};
use crate::engine::path::advance_multiplier;
use crate::inventory::InventoryLedger;
use crate::prizes::{consolation_prize, resolve_prize, PrizeAward};
use rand::Rng;
use std::time::{Duration, Instant};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    Idle,
    Running,
    Crashed,
}

/// Live state of one round. Created at `start`, mutated every tick while
/// running, kept as a frozen snapshot through `Crashed`.
#[derive(Debug, Clone)]
pub struct Round {
    pub id: Uuid,
    pub multiplier: f64,
    /// Hidden multiplier the path is steered toward; never revealed to the
    /// participant before crash or cash-out.
    pub crash_target: f64,
    pub started_at: Instant,
    pub crash_deadline: Instant,
    pub last_update: Instant,
    /// +1.0 or -1.0, never zero
    pub trend: f64,
    pub trend_changed_at: Instant,
    pub volatility_override: Option<f64>,
}

impl Round {
    pub fn new(id: Uuid, now: Instant, crash_target: f64, duration: Duration, trend: f64) -> Self {
        Self {
            id,
            multiplier: 1.0,
            crash_target,
            started_at: now,
            crash_deadline: now + duration,
            last_update: now,
            trend,
            trend_changed_at: now,
            volatility_override: None,
        }
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.started_at)
    }
}

/// One point of the observable path, for the rendering collaborator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSample {
    pub elapsed: Duration,
    pub multiplier: f64,
}

/// Terminal event of a resolved round.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundResolution {
    pub round_id: Uuid,
    pub prize: PrizeAward,
    pub final_multiplier: f64,
    pub was_crash: bool,
    pub elapsed: Duration,
}

/// What one `tick` call produced.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// Tick arrived outside `Running`; nothing happened.
    Ignored,
    Sample(PathSample),
    Crashed(RoundResolution),
}

#[derive(Debug)]
pub struct RoundEngine {
    phase: RoundPhase,
    round: Option<Round>,
}

impl Default for RoundEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundEngine {
    pub fn new() -> Self {
        Self {
            phase: RoundPhase::Idle,
            round: None,
        }
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// Current observable multiplier; 1.0 between rounds.
    pub fn multiplier(&self) -> f64 {
        self.round.as_ref().map_or(1.0, |r| r.multiplier)
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    /// Begins a new round. Valid only from `Idle`; anything else is a no-op
    /// returning false. The crash target is fixed here, before the first
    /// tick, and reads the ledger fresh so admin edits take effect.
    pub fn start(
        &mut self,
        now: Instant,
        config: &GameConfig,
        ledger: &InventoryLedger,
        rng: &mut impl Rng,
    ) -> bool {
        if self.phase != RoundPhase::Idle {
            return false;
        }

        let crash_target = generate_crash_point(config, ledger, rng);
        let duration = roll_round_duration(config, rng);
        let trend = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };

        self.round = Some(Round::new(Uuid::new_v4(), now, crash_target, duration, trend));
        self.phase = RoundPhase::Running;
        true
    }

    /// Advances the round by one host-driven tick. Valid only while
    /// `Running`. Reaching the deadline performs the crash sequence instead
    /// of producing a path value: the multiplier freezes, the phase becomes
    /// `Crashed`, and the consolation prize is awarded unconditionally.
    pub fn tick(
        &mut self,
        now: Instant,
        config: &GameConfig,
        ledger: &mut InventoryLedger,
        rng: &mut impl Rng,
    ) -> TickOutcome {
        if self.phase != RoundPhase::Running {
            return TickOutcome::Ignored;
        }
        let round = self.round.as_mut().expect("running round present");

        if now >= round.crash_deadline {
            // crash sequence: freeze the multiplier, award the consolation
            // prize unconditionally, keep the round as a frozen snapshot
            let prize = consolation_prize(config);
            ledger.award(prize.kind);
            self.phase = RoundPhase::Crashed;
            return TickOutcome::Crashed(RoundResolution {
                round_id: round.id,
                prize,
                final_multiplier: round.multiplier,
                was_crash: true,
                elapsed: round.elapsed(now),
            });
        }

        let elapsed = round.elapsed(now);
        let multiplier = advance_multiplier(round, now, config, rng);
        TickOutcome::Sample(PathSample { elapsed, multiplier })
    }

    /// Freezes the current multiplier and resolves the prize for it. Valid
    /// only while `Running`; otherwise a no-op returning `None`, so a double
    /// press awards exactly once.
    pub fn cash_out(
        &mut self,
        now: Instant,
        config: &GameConfig,
        ledger: &mut InventoryLedger,
    ) -> Option<RoundResolution> {
        if self.phase != RoundPhase::Running {
            return None;
        }
        let round = self.round.take().expect("running round present");
        self.phase = RoundPhase::Idle;

        let prize = resolve_prize(config, ledger, round.multiplier);
        ledger.award(prize.kind);

        Some(RoundResolution {
            round_id: round.id,
            prize,
            final_multiplier: round.multiplier,
            was_crash: false,
            elapsed: round.elapsed(now),
        })
    }

    /// Abandons the current round with no award and no side effects. Valid
    /// from any state; used when the participant navigates away mid-round.
    pub fn reset(&mut self) {
        self.phase = RoundPhase::Idle;
        self.round = None;
    }
}
