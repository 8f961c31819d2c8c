//! Aggregate round statistics and the "last 5 won" list.
//!
//! Both are write-only from the engine's perspective; the reporting and
//! stall-display surfaces read them.

use crate::constants::RECENT_WINS_MAX;
use crate::engine::round::RoundResolution;
use crate::prizes::PrizeKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub total: u64,
    pub awarded: BTreeMap<PrizeKind, u64>,
}

impl Statistics {
    pub fn record(&mut self, kind: PrizeKind) {
        self.total += 1;
        *self.awarded.entry(kind).or_insert(0) += 1;
    }

    pub fn count(&self, kind: PrizeKind) -> u64 {
        self.awarded.get(&kind).copied().unwrap_or(0)
    }

    pub fn reset(&mut self) {
        *self = Statistics::default();
    }
}

/// One entry in the stall's recent-wins display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentWin {
    pub round_id: Uuid,
    pub kind: PrizeKind,
    pub name: String,
    pub image: String,
    pub final_multiplier: f64,
    pub was_crash: bool,
    pub won_at: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecentWins(Vec<RecentWin>);

impl RecentWins {
    /// Prepends a win and trims to the display cap.
    pub fn record(&mut self, resolution: &RoundResolution, won_at: i64) {
        self.0.insert(
            0,
            RecentWin {
                round_id: resolution.round_id,
                kind: resolution.prize.kind,
                name: resolution.prize.name.clone(),
                image: resolution.prize.image.clone(),
                final_multiplier: resolution.final_multiplier,
                was_crash: resolution.was_crash,
                won_at,
            },
        );
        self.0.truncate(RECENT_WINS_MAX);
    }

    pub fn entries(&self) -> &[RecentWin] {
        &self.0
    }
}
