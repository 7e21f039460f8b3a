// Splat: a diffuse ink blot that spreads as it fades. No glow pass.
use crate::rng::UnitSource;
use crate::surface::{InkSurface, Point, Rgba};

const INK: Rgba = Rgba::new(255, 255, 255, 1.0);
const FADE_PER_TICK: f64 = 0.025; // ~40 ticks
const SPREAD_PER_TICK: f64 = 0.4;

#[derive(Clone, Debug, PartialEq)]
pub struct Splat {
    pub position: Point,
    pub life: f64,
    pub radius: f64,
}

impl Splat {
    pub fn new<R: UnitSource + ?Sized>(position: Point, rng: &mut R) -> Self {
        Self { position, life: 1.0, radius: rng.span(1.0, 5.0) }
    }

    pub(super) fn update(&mut self) {
        self.life -= FADE_PER_TICK;
        self.radius += SPREAD_PER_TICK;
    }

    pub(super) fn draw<S: InkSurface + ?Sized>(&self, surface: &mut S) {
        surface.save();
        surface.fill_disc(self.position, self.radius, INK.with_alpha(self.life * 0.2));
        surface.restore();
    }
}
