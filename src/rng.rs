//! Uniform random draws for particle construction and emission.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Source of independent uniform draws in `[0, 1)`.
pub trait UnitSource {
    fn unit(&mut self) -> f64;

    /// Uniform draw in `[lo, lo + span)`.
    fn span(&mut self, lo: f64, span: f64) -> f64 {
        lo + self.unit() * span
    }

    /// Uniform draw centred on zero: `(u - 0.5) * width`.
    fn centered(&mut self, width: f64) -> f64 {
        (self.unit() - 0.5) * width
    }
}

/// Production RNG. Seeded from `getrandom` (crypto.getRandomValues in the browser).
pub struct InkRng(SmallRng);

impl InkRng {
    pub fn from_entropy() -> Self {
        Self(SmallRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }
}

impl Default for InkRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl UnitSource for InkRng {
    fn unit(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }
}

/// Replays a fixed list of draws, then repeats `fallback` forever.
/// Used to pin probabilistic branches in tests and demos.
#[derive(Clone, Debug)]
pub struct ScriptedDraws {
    draws: std::collections::VecDeque<f64>,
    fallback: f64,
}

impl ScriptedDraws {
    pub fn new(draws: impl IntoIterator<Item = f64>, fallback: f64) -> Self {
        Self { draws: draws.into_iter().collect(), fallback }
    }

    pub fn remaining(&self) -> usize {
        self.draws.len()
    }
}

impl UnitSource for ScriptedDraws {
    fn unit(&mut self) -> f64 {
        self.draws.pop_front().unwrap_or(self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ink_rng_stays_in_unit_range() {
        let mut rng = InkRng::seeded(7);
        for _ in 0..1_000 {
            let u = rng.unit();
            assert!((0.0..1.0).contains(&u), "draw {u} out of range");
        }
    }

    #[test]
    fn test_scripted_then_fallback() {
        let mut s = ScriptedDraws::new([0.1, 0.9], 0.5);
        assert_eq!(s.unit(), 0.1);
        assert_eq!(s.unit(), 0.9);
        assert_eq!(s.unit(), 0.5);
        assert_eq!(s.remaining(), 0);
    }

    #[test]
    fn test_centered_and_span() {
        let mut s = ScriptedDraws::new([0.0, 1.0, 0.5], 0.5);
        assert_eq!(s.centered(70.0), -35.0);
        assert_eq!(s.span(20.0, 70.0), 90.0);
        assert_eq!(s.centered(0.6), 0.0);
    }
}
