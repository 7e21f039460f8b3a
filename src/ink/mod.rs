//! Ink particles.
//!
//! Every particle carries a normalized `life` that starts at 1.0 and decays by
//! a fixed amount per tick (frame-coupled, no delta time). The four shapes
//! are a closed set, so they are modelled as one enum and dispatched with a
//! single `match` per operation. Shape-specific rules live in the child files.

use crate::surface::{InkSurface, Point, Rgba};

mod flower;
mod glyph;
mod leaf;
mod splat;

pub use flower::Flower;
pub use glyph::Glyph;
pub use leaf::Leaf;
pub use splat::Splat;

/// Pale blue-white used for the glow pass.
const GLOW_TINT: Rgba = Rgba::new(240, 240, 255, 0.0);

/// Blur radius of the glow pass: grows as the particle ages.
pub fn glow_blur(life: f64) -> f64 {
    (1.0 - life) * 30.0 + 4.0
}

/// Glow colour: alpha fades with life.
pub fn glow_color(life: f64) -> Rgba {
    GLOW_TINT.with_alpha(life * 0.3)
}

/// "Bleeding" light-ink halo shared by glyphs, flowers and leaves.
pub(crate) fn apply_glow<S: InkSurface + ?Sized>(surface: &mut S, life: f64) {
    surface.set_glow(glow_color(life), glow_blur(life));
}

/// Which shape a particle is; handy for tests and logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleKind {
    Glyph,
    Flower,
    Leaf,
    Splat,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Particle {
    Glyph(Glyph),
    Flower(Flower),
    Leaf(Leaf),
    Splat(Splat),
}

impl Particle {
    pub fn kind(&self) -> ParticleKind {
        match self {
            Particle::Glyph(_) => ParticleKind::Glyph,
            Particle::Flower(_) => ParticleKind::Flower,
            Particle::Leaf(_) => ParticleKind::Leaf,
            Particle::Splat(_) => ParticleKind::Splat,
        }
    }

    pub fn life(&self) -> f64 {
        match self {
            Particle::Glyph(p) => p.life,
            Particle::Flower(p) => p.life,
            Particle::Leaf(p) => p.life,
            Particle::Splat(p) => p.life,
        }
    }

    pub fn position(&self) -> Point {
        match self {
            Particle::Glyph(p) => p.position,
            Particle::Flower(p) => p.position,
            Particle::Leaf(p) => p.position,
            Particle::Splat(p) => p.position,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.life() <= 0.0
    }

    /// Advance one fixed tick.
    pub fn update(&mut self) {
        match self {
            Particle::Glyph(p) => p.update(),
            Particle::Flower(p) => p.update(),
            Particle::Leaf(p) => p.update(),
            Particle::Splat(p) => p.update(),
        }
    }

    /// Paint with the current field values. Dead particles paint nothing.
    pub fn draw<S: InkSurface + ?Sized>(&self, surface: &mut S) {
        if self.is_dead() {
            return;
        }
        match self {
            Particle::Glyph(p) => p.draw(surface),
            Particle::Flower(p) => p.draw(surface),
            Particle::Leaf(p) => p.draw(surface),
            Particle::Splat(p) => p.draw(surface),
        }
    }

    /// Test hook: force the remaining life.
    #[cfg(test)]
    pub(crate) fn set_life(&mut self, life: f64) {
        match self {
            Particle::Glyph(p) => p.life = life,
            Particle::Flower(p) => p.life = life,
            Particle::Leaf(p) => p.life = life,
            Particle::Splat(p) => p.life = life,
        }
    }
}

impl From<Glyph> for Particle {
    fn from(p: Glyph) -> Self {
        Particle::Glyph(p)
    }
}

impl From<Flower> for Particle {
    fn from(p: Flower) -> Self {
        Particle::Flower(p)
    }
}

impl From<Leaf> for Particle {
    fn from(p: Leaf) -> Self {
        Particle::Leaf(p)
    }
}

impl From<Splat> for Particle {
    fn from(p: Splat) -> Self {
        Particle::Splat(p)
    }
}
