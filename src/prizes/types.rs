use serde::{Deserialize, Serialize};

/// The six prize tiers, in ascending multiplier-range order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrizeKind {
    Sticker,
    Lanyard,
    Bottle,
    Fan,
    Deck,
    Shirt,
}

impl PrizeKind {
    /// Returns the display name for this prize kind.
    pub fn name(&self) -> &'static str {
        match self {
            PrizeKind::Sticker => "Sticker",
            PrizeKind::Lanyard => "Lanyard",
            PrizeKind::Bottle => "Bottle",
            PrizeKind::Fan => "Fan",
            PrizeKind::Deck => "Card Deck",
            PrizeKind::Shirt => "Shirt",
        }
    }

    pub fn all() -> [PrizeKind; 6] {
        [
            PrizeKind::Sticker,
            PrizeKind::Lanyard,
            PrizeKind::Bottle,
            PrizeKind::Fan,
            PrizeKind::Deck,
            PrizeKind::Shirt,
        ]
    }
}

/// Descriptor handed to the host when a prize is awarded.
///
/// Carries everything the results surface needs (name, accent color, image
/// resource key) so the host never has to reach back into the tier table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrizeAward {
    pub kind: PrizeKind,
    pub name: String,
    pub color: String,
    pub image: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_order_matches_range_order() {
        // Ord follows declaration order, which is ascending multiplier range
        assert!(PrizeKind::Sticker < PrizeKind::Lanyard);
        assert!(PrizeKind::Lanyard < PrizeKind::Bottle);
        assert!(PrizeKind::Bottle < PrizeKind::Fan);
        assert!(PrizeKind::Fan < PrizeKind::Deck);
        assert!(PrizeKind::Deck < PrizeKind::Shirt);
    }

    #[test]
    fn test_serde_lowercase_keys() {
        let json = serde_json::to_string(&PrizeKind::Deck).unwrap();
        assert_eq!(json, "\"deck\"");
        let back: PrizeKind = serde_json::from_str("\"shirt\"").unwrap();
        assert_eq!(back, PrizeKind::Shirt);
    }

    #[test]
    fn test_all_covers_every_kind() {
        let all = PrizeKind::all();
        assert_eq!(all.len(), 6);
        for kind in all {
            assert!(!kind.name().is_empty());
        }
    }
}
