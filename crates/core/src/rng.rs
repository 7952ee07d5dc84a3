//! RNG module - random tile colors
//!
//! Every freshly spawned tile draws its color uniformly from
//! {red, blue, green}. The engine only depends on the [`ColorSource`] trait,
//! so hosts can swap the seeded generator for a scripted sequence (replays,
//! tests).
//!
//! Also provides a simple LCG for deterministic sessions.

use m4tch_types::TileColor;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone, PartialEq, Eq)]
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
    /// Uses the high bits; the low bits of a power-of-two LCG cycle with a
    /// short period.
    pub fn next_range(&mut self, max: u32) -> u32 {
        (self.next_u32() >> 16) % max.max(1)
    }

    /// Current internal state (for restarting with the same sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Supplier of colors for newly spawned tiles.
pub trait ColorSource {
    fn next_color(&mut self) -> TileColor;
}

/// Seeded uniform color generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorRng {
    rng: SimpleRng,
    seed: u32,
}

impl ColorRng {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            seed,
        }
    }

    /// Seed this generator was created with
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl ColorSource for ColorRng {
    fn next_color(&mut self) -> TileColor {
        let i = self.rng.next_range(TileColor::ALL.len() as u32) as usize;
        TileColor::ALL[i]
    }
}

impl Default for ColorRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Replays a fixed color sequence, cycling when exhausted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedColors {
    colors: Vec<TileColor>,
    next: usize,
}

impl ScriptedColors {
    /// An empty script yields red forever.
    pub fn new(colors: impl Into<Vec<TileColor>>) -> Self {
        Self {
            colors: colors.into(),
            next: 0,
        }
    }

    /// Repeat one color forever
    pub fn constant(color: TileColor) -> Self {
        Self::new(vec![color])
    }
}

impl ColorSource for ScriptedColors {
    fn next_color(&mut self) -> TileColor {
        if self.colors.is_empty() {
            return TileColor::Red;
        }
        let color = self.colors[self.next % self.colors.len()];
        self.next = self.next.wrapping_add(1);
        color
    }
}

impl<T: ColorSource + ?Sized> ColorSource for Box<T> {
    fn next_color(&mut self) -> TileColor {
        (**self).next_color()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
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
    fn test_zero_seed_is_not_degenerate() {
        let mut rng = SimpleRng::new(0);
        assert_ne!(rng.next_u32(), 0);
    }

    #[test]
    fn test_color_rng_covers_all_colors() {
        let mut colors = ColorRng::new(7);
        let mut seen = [0u32; 3];
        for _ in 0..300 {
            let c = colors.next_color();
            let i = TileColor::ALL.iter().position(|&x| x == c).unwrap();
            seen[i] += 1;
        }

        // Roughly uniform: every color shows up a fair share of 300 draws.
        for (i, n) in seen.iter().enumerate() {
            assert!(*n > 50, "color {:?} drawn only {} times", TileColor::ALL[i], n);
        }
    }

    #[test]
    fn test_color_rng_same_seed_same_sequence() {
        let mut a = ColorRng::new(99);
        let mut b = ColorRng::new(99);
        for _ in 0..32 {
            assert_eq!(a.next_color(), b.next_color());
        }
        assert_eq!(a.seed(), 99);
    }

    #[test]
    fn test_scripted_colors_cycle() {
        let mut s = ScriptedColors::new(vec![TileColor::Blue, TileColor::Green]);
        assert_eq!(s.next_color(), TileColor::Blue);
        assert_eq!(s.next_color(), TileColor::Green);
        assert_eq!(s.next_color(), TileColor::Blue);

        let mut empty = ScriptedColors::new(Vec::new());
        assert_eq!(empty.next_color(), TileColor::Red);
    }
}
