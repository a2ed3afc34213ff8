//! RNG module - uniform random piece generation
//!
//! Every piece is drawn independently and uniformly over the 7 kinds. There is
//! no bag: repeats and droughts are possible, as in the classic game.
//!
//! The generator is a small seeded LCG so a game is reproducible from its seed.

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    pub fn new(seed: u32) -> Self {
        // Seed 0 behaves like seed 1.
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    pub fn next_u32(&mut self) -> u32 {
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Value in `[0, max)`. Uses the high half of the state; the low bits of
    /// a power-of-two LCG have short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        (self.next_u32() >> 16) % max
    }
}

/// One-piece lookahead queue: the preview piece is always known.
#[derive(Debug, Clone)]
pub struct PieceQueue {
    next: PieceKind,
    rng: SimpleRng,
}

impl PieceQueue {
    pub fn new(seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let next = Self::roll(&mut rng);
        Self { next, rng }
    }

    fn roll(rng: &mut SimpleRng) -> PieceKind {
        PieceKind::ALL[rng.next_range(PieceKind::ALL.len() as u32) as usize]
    }

    /// The piece the next [`draw`](Self::draw) returns.
    pub fn peek(&self) -> PieceKind {
        self.next
    }

    /// Take the queued piece and roll a new one.
    pub fn draw(&mut self) -> PieceKind {
        let piece = self.next;
        self.next = Self::roll(&mut self.rng);
        piece
    }
}

impl Default for PieceQueue {
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
    fn test_next_range_stays_in_range() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..1000 {
            assert!(rng.next_range(7) < 7);
        }
        assert_eq!(rng.next_range(0), 0);
    }

    #[test]
    fn test_piece_queue_peek_matches_draw() {
        let mut queue = PieceQueue::new(1);
        for _ in 0..50 {
            let peeked = queue.peek();
            assert_eq!(queue.draw(), peeked);
        }
    }

    #[test]
    fn test_piece_queue_is_reproducible() {
        let mut a = PieceQueue::new(99);
        let mut b = PieceQueue::new(99);
        for _ in 0..100 {
            assert_eq!(a.draw(), b.draw());
        }
    }

    #[test]
    fn test_piece_queue_covers_every_kind() {
        let mut queue = PieceQueue::new(2024);
        let mut seen = [false; 7];
        for _ in 0..500 {
            seen[queue.draw().index()] = true;
        }
        assert!(seen.iter().all(|&s| s), "{:?}", seen);
    }
}
