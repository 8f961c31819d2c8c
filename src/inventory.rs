//! The depleting prize inventory for one event.
//!
//! Counts only ever go down during play; the admin surface may overwrite
//! them between rounds. Serialized as a flat `{"sticker": 999, ...}` map.

use crate::config::GameConfig;
use crate::prizes::PrizeKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InventoryLedger {
    counts: BTreeMap<PrizeKind, u32>,
}

impl InventoryLedger {
    /// Fresh ledger seeded with every tier's initial stock.
    pub fn from_config(config: &GameConfig) -> Self {
        let counts = config
            .tiers
            .iter()
            .map(|tier| (tier.kind, tier.initial_stock))
            .collect();
        Self { counts }
    }

    /// Remaining stock for a tier; unknown tiers count as sold out.
    pub fn remaining(&self, kind: PrizeKind) -> u32 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    /// Decrements a tier's stock, flooring at zero. Returns false when the
    /// tier was already empty (the award still stands; only the count stops).
    pub fn award(&mut self, kind: PrizeKind) -> bool {
        let count = self.counts.entry(kind).or_insert(0);
        if *count > 0 {
            *count -= 1;
            true
        } else {
            false
        }
    }

    /// Admin overwrite of one tier's count.
    pub fn set(&mut self, kind: PrizeKind, count: u32) {
        self.counts.insert(kind, count);
    }

    /// Adds default stock for any tier missing from a loaded ledger, so a
    /// save file from before a tier existed keeps working.
    pub fn merge_defaults(&mut self, config: &GameConfig) {
        for tier in &config.tiers {
            self.counts.entry(tier.kind).or_insert(tier.initial_stock);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
