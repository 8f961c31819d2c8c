//! One stall session: the round engine plus the state it feeds.
//!
//! Owns the config, ledger, statistics, recent wins and the current round's
//! path history. Every resolution mutates in memory first, then persists;
//! a persistence failure never blocks play, the session just continues on
//! its in-memory state.

use crate::config::{ConfigError, GameConfig};
use crate::engine::round::{PathSample, RoundEngine, RoundPhase, RoundResolution, TickOutcome};
use crate::inventory::InventoryLedger;
use crate::prizes::PrizeKind;
use crate::stats::{RecentWins, Statistics};
use crate::utils::persistence;
use rand::Rng;
use std::time::Instant;

pub const INVENTORY_FILE: &str = "inventory.json";
pub const STATS_FILE: &str = "stats.json";
pub const RECENT_WINS_FILE: &str = "recent_wins.json";

pub struct GameSession {
    pub config: GameConfig,
    pub ledger: InventoryLedger,
    pub stats: Statistics,
    pub recent_wins: RecentWins,
    engine: RoundEngine,
    path: Vec<PathSample>,
    /// False for in-memory sessions (tests, simulator): nothing is written.
    persistent: bool,
}

impl GameSession {
    /// Loads a persistent session from ~/.moonshot/, using defaults for any
    /// missing file. Config validation is fatal here; no round may start on
    /// a bad tier table.
    pub fn load() -> Result<Self, ConfigError> {
        let config = GameConfig::load()?;

        let mut ledger: InventoryLedger = persistence::load_json_or_default(INVENTORY_FILE);
        if ledger.is_empty() {
            ledger = InventoryLedger::from_config(&config);
        } else {
            // prize tiers added since the save was written get default stock
            ledger.merge_defaults(&config);
        }

        let stats = persistence::load_json_or_default(STATS_FILE);
        let recent_wins = persistence::load_json_or_default(RECENT_WINS_FILE);

        let session = Self {
            config,
            ledger,
            stats,
            recent_wins,
            engine: RoundEngine::new(),
            path: Vec::new(),
            persistent: true,
        };
        session.persist();
        Ok(session)
    }

    /// In-memory session with a fresh ledger; never touches disk. Used by
    /// the simulator and tests.
    pub fn with_config(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let ledger = InventoryLedger::from_config(&config);
        Ok(Self {
            config,
            ledger,
            stats: Statistics::default(),
            recent_wins: RecentWins::default(),
            engine: RoundEngine::new(),
            path: Vec::new(),
            persistent: false,
        })
    }

    pub fn phase(&self) -> RoundPhase {
        self.engine.phase()
    }

    pub fn multiplier(&self) -> f64 {
        self.engine.multiplier()
    }

    /// The path samples of the current round, for the rendering collaborator.
    pub fn path(&self) -> &[PathSample] {
        &self.path
    }

    pub fn start_round(&mut self, now: Instant, rng: &mut impl Rng) -> bool {
        let started = self.engine.start(now, &self.config, &self.ledger, rng);
        if started {
            self.path.clear();
        }
        started
    }

    /// One host-driven tick. Samples are appended to the round's path; a
    /// crash resolves the round on the spot.
    pub fn tick(&mut self, now: Instant, rng: &mut impl Rng) -> TickOutcome {
        let outcome = self.engine.tick(now, &self.config, &mut self.ledger, rng);
        match &outcome {
            TickOutcome::Sample(sample) => self.path.push(*sample),
            TickOutcome::Crashed(resolution) => {
                let resolution = resolution.clone();
                self.record(&resolution);
            }
            TickOutcome::Ignored => {}
        }
        outcome
    }

    pub fn cash_out(&mut self, now: Instant) -> Option<RoundResolution> {
        let resolution = self.engine.cash_out(now, &self.config, &mut self.ledger)?;
        self.record(&resolution);
        Some(resolution)
    }

    /// Abandons the current round: no award, no statistics, no persistence.
    pub fn reset_round(&mut self) {
        self.engine.reset();
        self.path.clear();
    }

    /// Admin: overwrite one tier's remaining stock.
    pub fn set_inventory(&mut self, kind: PrizeKind, count: u32) {
        self.ledger.set(kind, count);
        self.persist();
    }

    /// Admin: clear all statistics.
    pub fn reset_stats(&mut self) {
        self.stats.reset();
        self.persist();
    }

    fn record(&mut self, resolution: &RoundResolution) {
        self.stats.record(resolution.prize.kind);
        self.recent_wins
            .record(resolution, chrono::Utc::now().timestamp());
        self.persist();
    }

    /// Mutate-then-persist; write errors are swallowed so a read-only disk
    /// never blocks a round.
    fn persist(&self) {
        if !self.persistent {
            return;
        }
        let _ = persistence::save_json(INVENTORY_FILE, &self.ledger);
        let _ = persistence::save_json(STATS_FILE, &self.stats);
        let _ = persistence::save_json(RECENT_WINS_FILE, &self.recent_wins);
    }
}
