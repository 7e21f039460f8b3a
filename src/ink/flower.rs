// Flower: a five-to-seven petal bloom that opens while it fades.
use std::f64::consts::TAU;

use super::apply_glow;
use crate::rng::UnitSource;
use crate::surface::{InkSurface, Point, Rgba};

const PETAL: Rgba = Rgba::new(220, 230, 255, 1.0);
const CENTER: Rgba = Rgba::new(255, 255, 255, 1.0);
const FADE_PER_TICK: f64 = 0.015; // ~67 ticks
const BLOOM_PER_TICK: f64 = 0.15;

#[derive(Clone, Debug, PartialEq)]
pub struct Flower {
    pub position: Point,
    pub life: f64,
    pub rotation: f64,
    pub size: f64,
    pub petals: u32,
}

impl Flower {
    pub fn new<R: UnitSource + ?Sized>(position: Point, rng: &mut R) -> Self {
        let rotation = rng.unit() * TAU;
        let size = rng.span(18.0, 30.0);
        let petals = 5 + (rng.unit() * 3.0).floor() as u32;
        Self { position, life: 1.0, rotation, size, petals }
    }

    pub(super) fn update(&mut self) {
        self.life -= FADE_PER_TICK;
        self.size += BLOOM_PER_TICK;
    }

    pub(super) fn draw<S: InkSurface + ?Sized>(&self, surface: &mut S) {
        surface.save();
        surface.translate(self.position.x, self.position.y);
        surface.rotate(self.rotation);
        apply_glow(surface, self.life);

        let step = TAU / self.petals as f64;
        let petal = PETAL.with_alpha(self.life * 0.25);
        for _ in 0..self.petals {
            surface.rotate(step);
            surface.fill_ellipse(Point::new(self.size * 0.8, 0.0), self.size * 0.7, self.size * 0.45, petal);
        }

        surface.fill_disc(Point::default(), self.size * 0.2, CENTER.with_alpha(self.life * 0.7));
        surface.restore();
    }
}
