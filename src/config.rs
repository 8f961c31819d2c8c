//! Session configuration: tier table, stock, rigging, and round timing.
//!
//! Loaded once per session and treated as immutable afterwards. `validate`
//! runs at load time so a malformed table can never reach a running round.

use crate::prizes::PrizeKind;
use crate::utils::persistence;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_FILE: &str = "config.json";

/// One prize tier: its half-open multiplier range `[min, max)` plus display
/// and rigging data. `max: None` marks the unbounded top range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierConfig {
    pub kind: PrizeKind,
    pub name: String,
    pub color: String,
    pub image: String,
    pub min: f64,
    pub max: Option<f64>,
    pub initial_stock: u32,
    pub protection_factor: f64,
}

impl TierConfig {
    /// True if `multiplier` falls inside this tier's half-open range.
    pub fn contains(&self, multiplier: f64) -> bool {
        multiplier >= self.min && self.max.map_or(true, |max| multiplier < max)
    }
}

/// Round timing and crash-point distribution knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    pub min_round_ms: u64,
    pub max_round_ms: u64,
    /// GBM sigma per second; higher = wilder swings
    pub volatility_per_second: f64,
    pub crash_weight_low: f64,
    pub crash_weight_med: f64,
    pub crash_weight_high: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiggingConfig {
    pub enabled: bool,
    /// Stockout upgrade walk, lowest to terminal. The terminal tier is
    /// always awardable even at zero stock.
    pub upgrade_order: Vec<PrizeKind>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub game: TimingConfig,
    /// Tiers in ascending range order; validated contiguous over [0, +inf)
    pub tiers: Vec<TierConfig>,
    pub rigging: RiggingConfig,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("tier table is empty")]
    EmptyTierTable,
    #[error("first tier must start at 0.0, found {0}")]
    FirstTierNotZero(f64),
    #[error("tier {tier} starts at {found} but previous tier ends at {expected}")]
    TierGap {
        tier: String,
        expected: f64,
        found: f64,
    },
    #[error("tier {tier} has max {max} <= min {min}")]
    EmptyTierRange { tier: String, min: f64, max: f64 },
    #[error("only the last tier may be unbounded, but {0} has no max")]
    UnboundedNotLast(String),
    #[error("last tier {0} must be unbounded")]
    LastTierBounded(String),
    #[error("tier {0} appears more than once in the table")]
    DuplicateTier(String),
    #[error("tier {0} has zero initial stock")]
    ZeroInitialStock(String),
    #[error("crash weights must be positive and sum to 1.0, found {0}")]
    BadCrashWeights(f64),
    #[error("round duration bounds invalid: min {min} ms, max {max} ms")]
    BadDurationBounds { min: u64, max: u64 },
    #[error("volatility must be positive, found {0}")]
    NonPositiveVolatility(f64),
    #[error("upgrade order must list every tier exactly once")]
    BadUpgradeOrder,
}

impl Default for GameConfig {
    fn default() -> Self {
        let tier = |kind: PrizeKind, min: f64, max: Option<f64>, stock: u32, protection: f64| {
            TierConfig {
                kind,
                name: kind.name().to_string(),
                color: default_color(kind).to_string(),
                image: format!("prizes/{}.jpg", serde_kind_key(kind)),
                min,
                max,
                initial_stock: stock,
                protection_factor: protection,
            }
        };
        Self {
            game: TimingConfig {
                min_round_ms: 3000,
                max_round_ms: 20000,
                volatility_per_second: 0.45,
                crash_weight_low: 0.50,
                crash_weight_med: 0.35,
                crash_weight_high: 0.15,
            },
            tiers: vec![
                // sticker stock is effectively unlimited; it absorbs crashes
                tier(PrizeKind::Sticker, 0.0, Some(1.5), 999, 1.0),
                tier(PrizeKind::Lanyard, 1.5, Some(2.3), 90, 2.0),
                tier(PrizeKind::Bottle, 2.3, Some(3.3), 50, 3.5),
                tier(PrizeKind::Fan, 3.3, Some(3.75), 75, 3.5),
                tier(PrizeKind::Deck, 3.75, Some(4.2), 24, 4.2),
                tier(PrizeKind::Shirt, 4.2, None, 11, 5.0),
            ],
            rigging: RiggingConfig {
                enabled: true,
                // Bottle is the terminal fallback even though shirt owns the
                // top multiplier range; the stall hands out bottles last.
                upgrade_order: vec![
                    PrizeKind::Sticker,
                    PrizeKind::Lanyard,
                    PrizeKind::Fan,
                    PrizeKind::Deck,
                    PrizeKind::Shirt,
                    PrizeKind::Bottle,
                ],
            },
        }
    }
}

fn default_color(kind: PrizeKind) -> &'static str {
    match kind {
        PrizeKind::Sticker => "#888",
        PrizeKind::Lanyard => "#4CAF50",
        PrizeKind::Bottle => "#FFD700",
        PrizeKind::Fan => "#2196F3",
        PrizeKind::Deck => "#9C27B0",
        PrizeKind::Shirt => "#E91E63",
    }
}

fn serde_kind_key(kind: PrizeKind) -> &'static str {
    match kind {
        PrizeKind::Sticker => "sticker",
        PrizeKind::Lanyard => "lanyard",
        PrizeKind::Bottle => "bottle",
        PrizeKind::Fan => "fan",
        PrizeKind::Deck => "deck",
        PrizeKind::Shirt => "shirt",
    }
}

impl GameConfig {
    /// Load from `~/.moonshot/config.json`, falling back to defaults when the
    /// file is missing or unreadable, then validate.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Option<GameConfig> = persistence::load_json_or_default(CONFIG_FILE);
        let config = config.unwrap_or_default();
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> std::io::Result<()> {
        persistence::save_json(CONFIG_FILE, self)
    }

    pub fn tier(&self, kind: PrizeKind) -> Option<&TierConfig> {
        self.tiers.iter().find(|t| t.kind == kind)
    }

    /// Lowest-range tier; the consolation prize at crash.
    pub fn bottom_tier(&self) -> &TierConfig {
        &self.tiers[0]
    }

    /// Terminal tier of the stockout upgrade walk.
    pub fn terminal_kind(&self) -> PrizeKind {
        *self
            .rigging
            .upgrade_order
            .last()
            .expect("validated upgrade order is non-empty")
    }

    /// Rejects any table that does not partition `[0, +inf)` contiguously,
    /// plus degenerate timing or rigging setups. Fatal at startup; no round
    /// may start on a config that fails here.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tiers.is_empty() {
            return Err(ConfigError::EmptyTierTable);
        }

        let first = &self.tiers[0];
        if first.min != 0.0 {
            return Err(ConfigError::FirstTierNotZero(first.min));
        }

        let mut expected_min = 0.0;
        let mut seen: Vec<PrizeKind> = Vec::new();
        for (i, tier) in self.tiers.iter().enumerate() {
            if seen.contains(&tier.kind) {
                return Err(ConfigError::DuplicateTier(tier.name.clone()));
            }
            seen.push(tier.kind);

            if tier.min != expected_min {
                return Err(ConfigError::TierGap {
                    tier: tier.name.clone(),
                    expected: expected_min,
                    found: tier.min,
                });
            }
            match tier.max {
                Some(max) => {
                    if max <= tier.min {
                        return Err(ConfigError::EmptyTierRange {
                            tier: tier.name.clone(),
                            min: tier.min,
                            max,
                        });
                    }
                    if i == self.tiers.len() - 1 {
                        return Err(ConfigError::LastTierBounded(tier.name.clone()));
                    }
                    expected_min = max;
                }
                None => {
                    if i != self.tiers.len() - 1 {
                        return Err(ConfigError::UnboundedNotLast(tier.name.clone()));
                    }
                }
            }
            if tier.initial_stock == 0 {
                return Err(ConfigError::ZeroInitialStock(tier.name.clone()));
            }
        }

        let g = &self.game;
        if g.min_round_ms == 0 || g.max_round_ms < g.min_round_ms {
            return Err(ConfigError::BadDurationBounds {
                min: g.min_round_ms,
                max: g.max_round_ms,
            });
        }
        if g.volatility_per_second <= 0.0 {
            return Err(ConfigError::NonPositiveVolatility(g.volatility_per_second));
        }
        let weight_sum = g.crash_weight_low + g.crash_weight_med + g.crash_weight_high;
        if g.crash_weight_low <= 0.0
            || g.crash_weight_med <= 0.0
            || g.crash_weight_high <= 0.0
            || (weight_sum - 1.0).abs() > 1e-9
        {
            return Err(ConfigError::BadCrashWeights(weight_sum));
        }

        let order = &self.rigging.upgrade_order;
        if order.len() != self.tiers.len() {
            return Err(ConfigError::BadUpgradeOrder);
        }
        for tier in &self.tiers {
            if !order.contains(&tier.kind) {
                return Err(ConfigError::BadUpgradeOrder);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        GameConfig::default().validate().expect("defaults are valid");
    }

    #[test]
    fn test_default_tier_thresholds() {
        let config = GameConfig::default();
        assert_eq!(config.tiers.len(), 6);
        assert_eq!(config.bottom_tier().kind, PrizeKind::Sticker);
        assert_eq!(config.terminal_kind(), PrizeKind::Bottle);
        let shirt = config.tier(PrizeKind::Shirt).unwrap();
        assert_eq!(shirt.min, 4.2);
        assert_eq!(shirt.max, None);
    }

    #[test]
    fn test_gap_in_tier_table_rejected() {
        let mut config = GameConfig::default();
        config.tiers[1].min = 1.6; // sticker ends at 1.5
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::TierGap { .. }));
    }

    #[test]
    fn test_overlap_in_tier_table_rejected() {
        let mut config = GameConfig::default();
        config.tiers[2].min = 2.2; // lanyard ends at 2.3
        assert!(matches!(
            config.validate().unwrap_err(),
            ConfigError::TierGap { .. }
        ));
    }

    #[test]
    fn test_bounded_top_tier_rejected() {
        let mut config = GameConfig::default();
        config.tiers[5].max = Some(10.0);
        assert!(matches!(
            config.validate().unwrap_err(),
            ConfigError::LastTierBounded(_)
        ));
    }

    #[test]
    fn test_unbounded_middle_tier_rejected() {
        let mut config = GameConfig::default();
        config.tiers[2].max = None;
        assert!(matches!(
            config.validate().unwrap_err(),
            ConfigError::UnboundedNotLast(_)
        ));
    }

    #[test]
    fn test_first_tier_must_start_at_zero() {
        let mut config = GameConfig::default();
        config.tiers[0].min = 0.5;
        assert!(matches!(
            config.validate().unwrap_err(),
            ConfigError::FirstTierNotZero(_)
        ));
    }

    #[test]
    fn test_bad_crash_weights_rejected() {
        let mut config = GameConfig::default();
        config.game.crash_weight_high = 0.3; // sum now 1.15
        assert!(matches!(
            config.validate().unwrap_err(),
            ConfigError::BadCrashWeights(_)
        ));
    }

    #[test]
    fn test_inverted_duration_bounds_rejected() {
        let mut config = GameConfig::default();
        config.game.min_round_ms = 30000;
        assert!(matches!(
            config.validate().unwrap_err(),
            ConfigError::BadDurationBounds { .. }
        ));
    }

    #[test]
    fn test_upgrade_order_must_cover_all_tiers() {
        let mut config = GameConfig::default();
        config.rigging.upgrade_order.pop();
        assert_eq!(
            config.validate().unwrap_err(),
            ConfigError::BadUpgradeOrder
        );
    }

    #[test]
    fn test_zero_stock_rejected() {
        let mut config = GameConfig::default();
        config.tiers[4].initial_stock = 0;
        assert!(matches!(
            config.validate().unwrap_err(),
            ConfigError::ZeroInitialStock(_)
        ));
    }

    #[test]
    fn test_config_json_roundtrip() {
        let config = GameConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
        back.validate().unwrap();
    }

    #[test]
    fn test_tier_contains_half_open() {
        let config = GameConfig::default();
        let lanyard = config.tier(PrizeKind::Lanyard).unwrap();
        assert!(lanyard.contains(1.5));
        assert!(lanyard.contains(2.2999));
        assert!(!lanyard.contains(2.3));
        let shirt = config.tier(PrizeKind::Shirt).unwrap();
        assert!(shirt.contains(4.2));
        assert!(shirt.contains(1_000_000.0));
    }
}
