//! `ZenCanvas`: the single owner of all animation state.
//!
//! Pointer handling and the frame tick are both `&mut self` entry points on
//! this one controller, so the store is never mutated from two places at
//! once. Nothing here touches the browser; `crate::web` wraps it with a
//! real canvas, listeners and a `requestAnimationFrame` loop.

use crate::config::InkConfig;
use crate::emission::{self, SourceSequence, TrailState};
use crate::ink::Particle;
use crate::rng::UnitSource;
use crate::store::ParticleStore;
use crate::surface::{InkSurface, Point};

pub struct ZenCanvas<S: InkSurface, R: UnitSource = crate::rng::InkRng> {
    surface: S,
    rng: R,
    config: InkConfig,
    store: ParticleStore,
    trail: TrailState,
    sequence: SourceSequence,
    text: String,
}

impl<S: InkSurface, R: UnitSource> ZenCanvas<S, R> {
    pub fn new(surface: S, rng: R, config: InkConfig, text: &str) -> Self {
        let trail = TrailState::new(config.trail_origin());
        Self {
            surface,
            rng,
            config,
            store: ParticleStore::new(),
            trail,
            sequence: SourceSequence::from_text(text),
            text: text.to_owned(),
        }
    }

    /// Replace the trail text. The character cursor carries on from where it was.
    pub fn set_text(&mut self, text: &str) {
        self.sequence = SourceSequence::from_text(text);
        self.text = text.to_owned();
        log::debug!("trail text replaced: {} brushable chars", self.sequence.len());
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sequence(&self) -> &SourceSequence {
        &self.sequence
    }

    pub fn trail(&self) -> TrailState {
        self.trail
    }

    pub fn config(&self) -> &InkConfig {
        &self.config
    }

    pub fn particles(&self) -> &ParticleStore {
        &self.store
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Pointer moved to `(x, y)`. Returns how many particles were appended.
    pub fn pointer_moved(&mut self, x: f64, y: f64) -> usize {
        let spawned = emission::emit(Point::new(x, y), &mut self.trail, &self.sequence, &mut self.rng, &self.config);
        let n = spawned.len();
        self.store.extend(spawned);
        n
    }

    /// Append an already-built particle on top of everything else.
    pub fn spawn(&mut self, particle: impl Into<Particle>) {
        self.store.push(particle);
    }

    /// Match the surface to the viewport.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.surface.size() != (width, height) {
            log::debug!("surface resized to {width}x{height}");
        }
        self.surface.resize(width, height);
    }

    /// One frame: clear, advance and evict, then paint the survivors.
    pub fn tick(&mut self) {
        self.surface.clear();
        self.store.advance();
        self.store.draw_all(&mut self.surface);
    }
}
