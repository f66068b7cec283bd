//! RNG module - next-piece selection
//!
//! The default randomizer draws every piece independently and uniformly from
//! the seven kinds. There is no bag: repeats and droughts are possible.
//!
//! Generators are injected into the engine, so a seed (or a fixed sequence)
//! reproduces a game exactly.

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
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits; the low bits of a power-of-two LCG cycle quickly.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }
}

/// Source of upcoming piece kinds
pub trait PieceGenerator {
    fn next_kind(&mut self) -> PieceKind;
}

impl<G: PieceGenerator + ?Sized> PieceGenerator for Box<G> {
    fn next_kind(&mut self) -> PieceKind {
        (**self).next_kind()
    }
}

/// Independent uniform draws, seeded
#[derive(Debug, Clone)]
pub struct UniformRandomizer {
    rng: SimpleRng,
    seed: u32,
}

impl UniformRandomizer {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            seed,
        }
    }

    /// Seed this randomizer was created with
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl Default for UniformRandomizer {
    fn default() -> Self {
        Self::new(1)
    }
}

impl PieceGenerator for UniformRandomizer {
    fn next_kind(&mut self) -> PieceKind {
        PieceKind::ALL[self.rng.next_range(PieceKind::ALL.len() as u32) as usize]
    }
}

/// Cycles through a fixed list of kinds
///
/// Handy for replays and for pinning down a scenario in tests.
#[derive(Debug, Clone)]
pub struct SequenceGenerator {
    kinds: Vec<PieceKind>,
    index: usize,
}

impl SequenceGenerator {
    /// Panics if `kinds` is empty.
    pub fn new(kinds: impl Into<Vec<PieceKind>>) -> Self {
        let kinds = kinds.into();
        assert!(!kinds.is_empty(), "sequence generator needs at least one kind");
        Self { kinds, index: 0 }
    }

    /// Always yields the same kind
    pub fn repeat(kind: PieceKind) -> Self {
        Self::new(vec![kind])
    }
}

impl PieceGenerator for SequenceGenerator {
    fn next_kind(&mut self) -> PieceKind {
        let kind = self.kinds[self.index];
        self.index = (self.index + 1) % self.kinds.len();
        kind
    }
}
