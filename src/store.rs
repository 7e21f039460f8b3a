//! Ordered collection of live particles. Insertion order is z-order.

use crate::ink::Particle;
use crate::surface::InkSurface;

#[derive(Debug, Default)]
pub struct ParticleStore {
    particles: Vec<Particle>,
}

impl ParticleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, particle: impl Into<Particle>) {
        self.particles.push(particle.into());
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Advance every particle one tick and evict the ones that died.
    ///
    /// Walks last-to-first so an in-place removal never shifts an index that
    /// is still to be visited. `Vec::remove` keeps the survivors in insertion
    /// order. Returns the number of evicted particles.
    pub fn advance(&mut self) -> usize {
        let mut evicted = 0;
        for i in (0..self.particles.len()).rev() {
            self.particles[i].update();
            if self.particles[i].is_dead() {
                self.particles.remove(i);
                evicted += 1;
            }
        }
        evicted
    }

    /// Paint every live particle, earliest first, so newer ink lands on top.
    pub fn draw_all<S: InkSurface + ?Sized>(&self, surface: &mut S) {
        for p in &self.particles {
            p.draw(surface);
        }
    }
}

impl Extend<Particle> for ParticleStore {
    fn extend<T: IntoIterator<Item = Particle>>(&mut self, iter: T) {
        self.particles.extend(iter);
    }
}

impl<'a> IntoIterator for &'a ParticleStore {
    type Item = &'a Particle;
    type IntoIter = std::slice::Iter<'a, Particle>;

    fn into_iter(self) -> Self::IntoIter {
        self.particles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ink::{Glyph, Splat};
    use crate::rng::ScriptedDraws;
    use crate::surface::{DrawOp, Point, RecordingSurface};

    fn glyph(ch: char, x: f64) -> Particle {
        let mut draws = ScriptedDraws::new([], 0.5);
        Glyph::new(Point::new(x, 0.0), ch, "serif", &mut draws).into()
    }

    #[test]
    fn test_removal_keeps_order() {
        let mut store = ParticleStore::new();
        store.push(glyph('A', 1.0));
        let mut b = glyph('B', 2.0);
        b.set_life(0.001);
        store.push(b);
        store.push(glyph('C', 3.0));

        assert_eq!(store.advance(), 1);
        assert_eq!(store.len(), 2);

        let mut surface = RecordingSurface::new(10, 10);
        store.draw_all(&mut surface);
        let drawn: Vec<String> = surface
            .paints()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(drawn, ["A", "C"], "A is painted first, beneath C");
    }

    #[test]
    fn test_advance_evicts_everything_eventually() {
        let mut store = ParticleStore::new();
        let mut draws = ScriptedDraws::new([], 0.3);
        for i in 0..10 {
            store.push(Splat::new(Point::new(i as f64, 0.0), &mut draws));
        }
        let mut ticks = 0;
        while !store.is_empty() {
            store.advance();
            assert!(store.iter().all(|p| p.life() > 0.0));
            ticks += 1;
        }
        assert!((40..=41).contains(&ticks));
    }
}
