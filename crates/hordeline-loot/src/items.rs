//! Equipment drops: slot, rarity and visual variant rolls.

use rand::Rng;
use serde::{Deserialize, Serialize};

use hordeline_core::constants::ITEM_DROP_CHANCE;
use hordeline_core::enums::{ItemSlot, Rarity};

/// A dropped piece of equipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub slot: ItemSlot,
    pub rarity: Rarity,
    /// Visual variant within the slot.
    pub variant: u8,
}

const SLOTS: [ItemSlot; 4] = [ItemSlot::Helmet, ItemSlot::Armor, ItemSlot::Gloves, ItemSlot::Boots];

/// Rarity weights out of 100.
const RARITY_WEIGHTS: [(Rarity, u32); 4] = [
    (Rarity::Common, 80),
    (Rarity::Rare, 15),
    (Rarity::Epic, 4),
    (Rarity::Legendary, 1),
];

const VARIANTS: u8 = 4;

/// Roll a random item.
pub fn roll_item(rng: &mut impl Rng) -> Item {
    let slot = SLOTS[rng.gen_range(0..SLOTS.len())];
    let total: u32 = RARITY_WEIGHTS.iter().map(|(_, w)| w).sum();
    let mut roll = rng.gen_range(0..total);
    let mut rarity = Rarity::Common;
    for (candidate, weight) in RARITY_WEIGHTS {
        if roll < weight {
            rarity = candidate;
            break;
        }
        roll -= weight;
    }
    Item {
        slot,
        rarity,
        variant: rng.gen_range(0..VARIANTS),
    }
}

/// Roll the per-kill item drop.
pub fn roll_drop(rng: &mut impl Rng) -> Option<Item> {
    if rng.gen_bool(ITEM_DROP_CHANCE) {
        Some(roll_item(rng))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_rarity_distribution_favors_common() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut common = 0;
        let mut legendary = 0;
        for _ in 0..10_000 {
            match roll_item(&mut rng).rarity {
                Rarity::Common => common += 1,
                Rarity::Legendary => legendary += 1,
                _ => {}
            }
        }
        assert!(common > 7_500 && common < 8_500, "common = {common}");
        assert!(legendary < 300, "legendary = {legendary}");
    }

    #[test]
    fn test_variant_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for _ in 0..500 {
            assert!(roll_item(&mut rng).variant < VARIANTS);
        }
    }

    #[test]
    fn test_drop_rate_near_ten_percent() {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let drops = (0..10_000).filter(|_| roll_drop(&mut rng).is_some()).count();
        assert!(drops > 800 && drops < 1_200, "drops = {drops}");
    }

    #[test]
    fn test_item_serializes() {
        let item = Item {
            slot: ItemSlot::Boots,
            rarity: Rarity::Epic,
            variant: 2,
        };
        let json = serde_json::to_string(&item).unwrap();
        assert_eq!(json, r#"{"slot":"boots","rarity":"epic","variant":2}"#);
    }
}
