// Leaf: a single curved blade drifting along its own heading.
use std::f64::consts::TAU;

use super::apply_glow;
use crate::rng::UnitSource;
use crate::surface::{InkSurface, Point, QuadCurve, Rgba};

const TINT: Rgba = Rgba::new(200, 255, 220, 1.0);
const FADE_PER_TICK: f64 = 0.018; // ~56 ticks
const DRIFT_SPEED: f64 = 0.8;

#[derive(Clone, Debug, PartialEq)]
pub struct Leaf {
    pub position: Point,
    pub life: f64,
    pub rotation: f64,
    pub length: f64,
}

impl Leaf {
    pub fn new<R: UnitSource + ?Sized>(position: Point, rng: &mut R) -> Self {
        let rotation = rng.unit() * TAU;
        let length = rng.span(40.0, 50.0);
        Self { position, life: 1.0, rotation, length }
    }

    /// Blade outline: base at the origin, tip at `(length, 0)`.
    pub fn outline(&self) -> [QuadCurve; 2] {
        let l = self.length;
        [
            QuadCurve { ctrl: Point::new(l * 0.4, -l * 0.15), to: Point::new(l, 0.0) },
            QuadCurve { ctrl: Point::new(l * 0.4, l * 0.15), to: Point::new(0.0, 0.0) },
        ]
    }

    pub(super) fn update(&mut self) {
        self.life -= FADE_PER_TICK;
        // Heading is measured from +y, matching the sin/cos split below.
        self.position = self
            .position
            .offset(self.rotation.sin() * DRIFT_SPEED, self.rotation.cos() * DRIFT_SPEED);
    }

    pub(super) fn draw<S: InkSurface + ?Sized>(&self, surface: &mut S) {
        surface.save();
        surface.translate(self.position.x, self.position.y);
        surface.rotate(self.rotation);
        apply_glow(surface, self.life);
        surface.fill_curves(Point::default(), &self.outline(), TINT.with_alpha(self.life * 0.35));
        surface.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedDraws;
    use crate::surface::{DrawOp, RecordingSurface};

    #[test]
    fn test_drifts_along_heading() {
        // rotation 0 => straight down the y axis
        let mut draws = ScriptedDraws::new([0.0, 0.0], 0.0);
        let mut leaf = Leaf::new(Point::new(0.0, 0.0), &mut draws);
        assert_eq!(leaf.length, 40.0);
        leaf.update();
        assert!(leaf.position.x.abs() < 1e-12);
        assert!((leaf.position.y - 0.8).abs() < 1e-12);

        // quarter turn => along +x
        let mut draws = ScriptedDraws::new([0.25, 1.0], 0.0);
        let mut leaf = Leaf::new(Point::new(0.0, 0.0), &mut draws);
        leaf.update();
        assert!((leaf.position.x - 0.8).abs() < 1e-12);
        assert!(leaf.position.y.abs() < 1e-12);
    }

    #[test]
    fn test_outline_closes_at_base() {
        let mut draws = ScriptedDraws::new([0.1, 0.5], 0.0);
        let leaf = Leaf::new(Point::new(3.0, 4.0), &mut draws);
        let mut s = RecordingSurface::new(50, 50);
        leaf.draw(&mut s);
        let curves = s
            .ops()
            .iter()
            .find_map(|op| match op {
                DrawOp::Curves { start, curves, color } => Some((*start, curves.clone(), *color)),
                _ => None,
            })
            .expect("leaf paints a curve shape");
        assert_eq!(curves.0, Point::default());
        assert_eq!(curves.1.len(), 2);
        assert_eq!(curves.1[0].to, Point::new(65.0, 0.0));
        assert_eq!(curves.1[1].to, Point::default());
        assert!((curves.2.a - 0.35).abs() < 1e-12);
    }
}
