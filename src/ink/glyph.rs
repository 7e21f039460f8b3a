// Glyph: one character from the trail text, brushed in white ink.
use super::apply_glow;
use crate::rng::UnitSource;
use crate::surface::{InkSurface, Point, Rgba};

const INK: Rgba = Rgba::new(240, 242, 255, 1.0);
const FADE_PER_TICK: f64 = 0.012; // fully faded after ~83 ticks
const SPREAD_PER_TICK: f64 = 0.005;

#[derive(Clone, Debug, PartialEq)]
pub struct Glyph {
    pub position: Point,
    pub ch: char,
    pub life: f64,
    /// Font size in px.
    pub size: f64,
    pub scale: f64,
    pub rotation: f64,
    pub velocity: Point,
    /// Peak opacity: 0.7 (thin ink) or 0.95 (dense ink).
    pub ink_density: f64,
    font: String,
}

impl Glyph {
    pub fn new<R: UnitSource + ?Sized>(position: Point, ch: char, font_stack: &str, rng: &mut R) -> Self {
        let size = rng.span(20.0, 70.0);
        let scale = rng.span(0.8, 0.5);
        let rotation = rng.centered(0.6);
        // Slight upward bias so strokes drift like rising vapour.
        let velocity = Point::new(rng.centered(0.6), rng.centered(0.4) - 0.2);
        let ink_density = if rng.unit() > 0.5 { 0.95 } else { 0.7 };
        Self {
            position,
            ch,
            life: 1.0,
            size,
            scale,
            rotation,
            velocity,
            ink_density,
            font: format!("{size}px {font_stack}"),
        }
    }

    pub fn font(&self) -> &str {
        &self.font
    }

    pub(super) fn update(&mut self) {
        self.scale += SPREAD_PER_TICK;
        self.position = self.position.offset(self.velocity.x, self.velocity.y);
        self.life -= FADE_PER_TICK;
    }

    pub(super) fn draw<S: InkSurface + ?Sized>(&self, surface: &mut S) {
        let mut buf = [0u8; 4];
        surface.save();
        surface.translate(self.position.x, self.position.y);
        surface.rotate(self.rotation);
        surface.scale(self.scale, self.scale);
        apply_glow(surface, self.life);
        surface.fill_text(self.ch.encode_utf8(&mut buf), &self.font, INK.with_alpha(self.life * self.ink_density));
        surface.restore();
    }
}
