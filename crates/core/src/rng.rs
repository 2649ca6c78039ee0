//! RNG module - bounded random draws for piece selection
//!
//! Spawning only needs an integer in `[0, PieceType::COUNT)`. The source is a
//! trait so a session can be driven by any generator; [`SimpleRng`] is a
//! seeded LCG that makes games reproducible.

use crate::types::PieceType;

/// A source of bounded random indices
pub trait PieceRng {
    /// Uniform-ish index in `[0, bound)`. `bound` is never zero.
    fn next_index(&mut self, bound: usize) -> usize;

    /// Draw the next piece type in catalog order
    fn next_piece(&mut self) -> PieceType {
        let index = self.next_index(PieceType::COUNT);
        PieceType::from_index(index).unwrap_or(PieceType::Line)
    }
}

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
    pub fn next_range(&mut self, max: u32) -> u32 {
        // The low bits of an LCG cycle quickly; use the high half.
        (self.next_u32() >> 16) % max
    }

    /// Current internal state (for restarting with the same sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl PieceRng for SimpleRng {
    fn next_index(&mut self, bound: usize) -> usize {
        self.next_range(bound.max(1) as u32) as usize
    }
}

/// Replays a fixed list of piece types, cycling when exhausted.
///
/// Useful for scripted sessions and tests.
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    sequence: Vec<PieceType>,
    cursor: usize,
}

impl ScriptedRng {
    pub fn new(sequence: impl Into<Vec<PieceType>>) -> Self {
        Self {
            sequence: sequence.into(),
            cursor: 0,
        }
    }
}

impl PieceRng for ScriptedRng {
    fn next_index(&mut self, bound: usize) -> usize {
        let Some(kind) = self.sequence.get(self.cursor % self.sequence.len().max(1)) else {
            return 0;
        };
        self.cursor += 1;
        kind.index() % bound.max(1)
    }
}
