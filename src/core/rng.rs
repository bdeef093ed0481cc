//! RNG module - deterministic randomness for tile spawning
//!
//! A simple LCG (Linear Congruential Generator) is all the engine needs:
//! shuffling spawn candidates and drawing tile values, fully reproducible
//! from a seed.

/// Simple LCG RNG using constants from Numerical Recipes
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
        // LCG formula: (a * state + c) mod 2^32, a=1664525, c=1013904223
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    /// Draw a spawn value: 4 with the given percent chance, otherwise 2
    pub fn spawn_value(&mut self, four_chance_pct: u8) -> u32 {
        if self.next_range(100) < four_chance_pct as u32 {
            4
        } else {
            2
        }
    }

    /// Current internal state, usable as a seed for a continuation stream
    pub fn state(&self) -> u32 {
        self.state
    }
}
