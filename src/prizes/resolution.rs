//! Multiplier-to-prize resolution with stockout upgrades.
//!
//! The range lookup and the upgrade walk are the only two rules here: a
//! multiplier maps to exactly one tier, and a sold-out tier upgrades to the
//! next entry in the configured order until the terminal tier, which is
//! always awarded even at zero stock.

use crate::config::{GameConfig, TierConfig};
use crate::inventory::InventoryLedger;
use crate::prizes::{PrizeAward, PrizeKind};

/// Maps a multiplier to its tier via the half-open range table.
///
/// Falls back to the bottom tier if no range matches; the validated table
/// covers [0, +inf) so that only happens for negative or NaN input.
pub fn tier_for_multiplier(config: &GameConfig, multiplier: f64) -> &TierConfig {
    config
        .tiers
        .iter()
        .find(|tier| tier.contains(multiplier))
        .unwrap_or_else(|| config.bottom_tier())
}

/// Next tier in the upgrade walk; the terminal tier upgrades to itself.
pub fn next_tier_up(config: &GameConfig, kind: PrizeKind) -> PrizeKind {
    let order = &config.rigging.upgrade_order;
    match order.iter().position(|&k| k == kind) {
        Some(pos) => order[(pos + 1).min(order.len() - 1)],
        None => kind,
    }
}

/// Resolves a cashed-out multiplier to the prize actually handed over.
///
/// A sold-out tier never blocks an award: the participant gets the next tier
/// in the upgrade order instead, accelerating depletion of that tier. This
/// is the accepted trade-off, not a bug.
pub fn resolve_prize(
    config: &GameConfig,
    ledger: &InventoryLedger,
    multiplier: f64,
) -> PrizeAward {
    let mut kind = tier_for_multiplier(config, multiplier).kind;
    let terminal = config.terminal_kind();

    while kind != terminal && ledger.remaining(kind) == 0 {
        kind = next_tier_up(config, kind);
    }

    award_for(config, kind)
}

/// The consolation prize handed out when a round crashes. Always the bottom
/// tier, with no inventory check; the decrement floors at zero instead.
pub fn consolation_prize(config: &GameConfig) -> PrizeAward {
    let tier = config.bottom_tier();
    award_descriptor(tier)
}

fn award_for(config: &GameConfig, kind: PrizeKind) -> PrizeAward {
    match config.tier(kind) {
        Some(tier) => award_descriptor(tier),
        // missing tier entry: fall back to the bottom tier rather than
        // leaving the round unresolved
        None => award_descriptor(config.bottom_tier()),
    }
}

fn award_descriptor(tier: &TierConfig) -> PrizeAward {
    PrizeAward {
        kind: tier.kind,
        name: tier.name.clone(),
        color: tier.color.clone(),
        image: tier.image.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::InventoryLedger;

    #[test]
    fn test_tier_lookup_thresholds() {
        let config = GameConfig::default();
        assert_eq!(tier_for_multiplier(&config, 0.0).kind, PrizeKind::Sticker);
        assert_eq!(tier_for_multiplier(&config, 1.49).kind, PrizeKind::Sticker);
        assert_eq!(tier_for_multiplier(&config, 1.5).kind, PrizeKind::Lanyard);
        assert_eq!(tier_for_multiplier(&config, 2.3).kind, PrizeKind::Bottle);
        assert_eq!(tier_for_multiplier(&config, 3.3).kind, PrizeKind::Fan);
        assert_eq!(tier_for_multiplier(&config, 3.75).kind, PrizeKind::Deck);
        assert_eq!(tier_for_multiplier(&config, 4.2).kind, PrizeKind::Shirt);
        assert_eq!(tier_for_multiplier(&config, 250.0).kind, PrizeKind::Shirt);
    }

    #[test]
    fn test_negative_multiplier_falls_back_to_bottom() {
        let config = GameConfig::default();
        assert_eq!(tier_for_multiplier(&config, -1.0).kind, PrizeKind::Sticker);
    }

    #[test]
    fn test_full_stock_resolves_literal_tier() {
        let config = GameConfig::default();
        let ledger = InventoryLedger::from_config(&config);
        let award = resolve_prize(&config, &ledger, 2.5);
        assert_eq!(award.kind, PrizeKind::Bottle);
        assert_eq!(award.name, "Bottle");
    }

    #[test]
    fn test_stockout_upgrades_along_order() {
        let config = GameConfig::default();
        let mut ledger = InventoryLedger::from_config(&config);
        ledger.set(PrizeKind::Fan, 0);
        // fan -> deck in the default order
        assert_eq!(resolve_prize(&config, &ledger, 3.5).kind, PrizeKind::Deck);

        ledger.set(PrizeKind::Deck, 0);
        ledger.set(PrizeKind::Shirt, 0);
        // fan -> deck -> shirt -> bottle (terminal)
        assert_eq!(resolve_prize(&config, &ledger, 3.5).kind, PrizeKind::Bottle);
    }

    #[test]
    fn test_terminal_tier_awarded_even_at_zero_stock() {
        let config = GameConfig::default();
        let mut ledger = InventoryLedger::from_config(&config);
        ledger.set(PrizeKind::Bottle, 0);
        assert_eq!(resolve_prize(&config, &ledger, 2.5).kind, PrizeKind::Bottle);
    }

    #[test]
    fn test_sold_out_sticker_upgrades_to_lanyard() {
        let config = GameConfig::default();
        let mut ledger = InventoryLedger::from_config(&config);
        ledger.set(PrizeKind::Sticker, 0);
        assert_eq!(resolve_prize(&config, &ledger, 1.0).kind, PrizeKind::Lanyard);
    }

    #[test]
    fn test_consolation_is_bottom_tier_regardless_of_stock() {
        let config = GameConfig::default();
        let prize = consolation_prize(&config);
        assert_eq!(prize.kind, PrizeKind::Sticker);
    }

    #[test]
    fn test_next_tier_up_clamps_at_terminal() {
        let config = GameConfig::default();
        assert_eq!(
            next_tier_up(&config, PrizeKind::Sticker),
            PrizeKind::Lanyard
        );
        assert_eq!(next_tier_up(&config, PrizeKind::Shirt), PrizeKind::Bottle);
        assert_eq!(next_tier_up(&config, PrizeKind::Bottle), PrizeKind::Bottle);
    }
}
