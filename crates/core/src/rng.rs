//! RNG module - 7-bag piece sequencing
//!
//! The bag holds one of each piece kind in a shuffled order. Pieces are drawn
//! one at a time; once the bag is empty it is refilled with a fresh
//! permutation. Within a bag no kind repeats. A repeat across a bag boundary
//! (last of one bag equals first of the next) is allowed.
//!
//! Shuffling uses a small seeded LCG so a seed fully determines the sequence.

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Seed 0 is treated as 1.
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Random value in `[0, max)`, using the high bits (the low bits of an LCG cycle quickly).
    pub fn next_below(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Fisher-Yates shuffle
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_below((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct PieceBag {
    bag: [PieceKind; 7],
    /// Index of the next piece to hand out; 7 means the bag is drained.
    cursor: usize,
    rng: SimpleRng,
}

impl PieceBag {
    /// Create an empty bag; the first draw fills it.
    pub fn new(seed: u32) -> Self {
        Self {
            bag: PieceKind::ALL,
            cursor: PieceKind::ALL.len(),
            rng: SimpleRng::new(seed),
        }
    }

    fn refill(&mut self) {
        self.bag = PieceKind::ALL;
        self.rng.shuffle(&mut self.bag);
        self.cursor = 0;
    }

    /// Draw the next piece kind, refilling the bag when it runs dry.
    pub fn next(&mut self) -> PieceKind {
        if self.cursor >= self.bag.len() {
            self.refill();
        }
        let kind = self.bag[self.cursor];
        self.cursor += 1;
        kind
    }

    /// Kinds still waiting in the current bag.
    pub fn remaining(&self) -> &[PieceKind] {
        &self.bag[self.cursor..]
    }
}

impl Default for PieceBag {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);
        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_next_below_stays_in_range() {
        let mut rng = SimpleRng::new(7);
        for max in 1..=7 {
            for _ in 0..200 {
                assert!(rng.next_below(max) < max);
            }
        }
    }

    #[test]
    fn test_new_bag_is_empty_until_first_draw() {
        let mut bag = PieceBag::new(1);
        assert!(bag.remaining().is_empty());

        bag.next();
        assert_eq!(bag.remaining().len(), 6);
    }

    #[test]
    fn test_each_bag_holds_all_seven() {
        let mut bag = PieceBag::new(99);

        for _ in 0..20 {
            let mut drawn: Vec<PieceKind> = (0..7).map(|_| bag.next()).collect();
            drawn.sort_by_key(|k| k.id());
            assert_eq!(drawn, PieceKind::ALL.to_vec());
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = PieceBag::new(42);
        let mut b = PieceBag::new(42);
        for _ in 0..30 {
            assert_eq!(a.next(), b.next());
        }
    }

    #[test]
    fn test_shuffle_is_not_constant() {
        // Over many bags at least two orders must differ.
        let mut bag = PieceBag::new(3);
        let first: Vec<_> = (0..7).map(|_| bag.next()).collect();
        let differs = (0..10).any(|_| {
            let next: Vec<_> = (0..7).map(|_| bag.next()).collect();
            next != first
        });
        assert!(differs);
    }
}
