//! Gold rolls and the sink that receives kill rewards.

use rand::Rng;

use crate::items::Item;

/// External collaborator that receives kill rewards.
pub trait EconomySink {
    fn add_gold(&mut self, amount: u32);
    fn add_item(&mut self, item: Item);
}

/// In-memory sink that records every reward.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    pub gold: u64,
    pub items: Vec<Item>,
    /// Number of `add_gold` calls.
    pub credits: u32,
}

impl EconomySink for Ledger {
    fn add_gold(&mut self, amount: u32) {
        self.gold += amount as u64;
        self.credits += 1;
    }

    fn add_item(&mut self, item: Item) {
        self.items.push(item);
    }
}

/// Roll a gold drop uniformly in `min..=max`. A reversed range is swapped.
pub fn roll_gold(range: (u32, u32), rng: &mut impl Rng) -> u32 {
    let (lo, hi) = if range.0 <= range.1 {
        range
    } else {
        (range.1, range.0)
    };
    rng.gen_range(lo..=hi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_gold_roll_is_inclusive() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut seen_min = false;
        let mut seen_max = false;
        for _ in 0..2000 {
            let gold = roll_gold((3, 8), &mut rng);
            assert!((3..=8).contains(&gold));
            seen_min |= gold == 3;
            seen_max |= gold == 8;
        }
        assert!(seen_min && seen_max);
    }

    #[test]
    fn test_gold_roll_degenerate_and_reversed() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(roll_gold((5, 5), &mut rng), 5);
        let gold = roll_gold((10, 2), &mut rng);
        assert!((2..=10).contains(&gold));
    }

    #[test]
    fn test_ledger_accumulates() {
        let mut ledger = Ledger::default();
        ledger.add_gold(10);
        ledger.add_gold(15);
        assert_eq!(ledger.gold, 25);
        assert_eq!(ledger.credits, 2);
    }
}
