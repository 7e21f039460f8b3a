//! Drawing surface abstraction.
//!
//! Particles paint through [`InkSurface`] instead of touching the browser
//! canvas directly, so the whole simulation can run headless. The browser
//! implementation lives in `crate::web`; [`RecordingSurface`] records every
//! command for inspection in tests.

use std::fmt;

/// 2D point in surface pixel space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Straight-alpha colour; rendered as a CSS `rgba(...)` string.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Same hue with a different alpha.
    pub const fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    pub fn to_css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// One quadratic Bézier segment: control point then end point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadCurve {
    pub ctrl: Point,
    pub to: Point,
}

/// Raster target the render loop paints into each tick.
///
/// Transform calls (`translate`, `rotate`, `scale`) compose onto the current
/// state; `save`/`restore` bracket them the way a 2D canvas context does.
pub trait InkSurface {
    /// Backing pixel size `(width, height)`.
    fn size(&self) -> (u32, u32);
    /// Set the backing pixel size. Existing contents are lost.
    fn resize(&mut self, width: u32, height: u32);
    /// Clear the full backing area.
    fn clear(&mut self);

    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, x: f64, y: f64);
    fn rotate(&mut self, angle: f64);
    fn scale(&mut self, sx: f64, sy: f64);

    /// Soft glow (shadow) applied to subsequent fills until `restore`.
    fn set_glow(&mut self, color: Rgba, blur: f64);

    /// Paint `text` centred on the current origin.
    fn fill_text(&mut self, text: &str, font: &str, color: Rgba);
    fn fill_ellipse(&mut self, center: Point, rx: f64, ry: f64, color: Rgba);
    fn fill_disc(&mut self, center: Point, radius: f64, color: Rgba);
    /// Fill the closed shape that starts at `start` and follows `curves`.
    fn fill_curves(&mut self, start: Point, curves: &[QuadCurve], color: Rgba);
}

/// A single command captured by [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Resize { width: u32, height: u32 },
    Clear { width: u32, height: u32 },
    Save,
    Restore,
    Translate(f64, f64),
    Rotate(f64),
    Scale(f64, f64),
    Glow { color: Rgba, blur: f64 },
    Text { text: String, font: String, color: Rgba },
    Ellipse { center: Point, rx: f64, ry: f64, color: Rgba },
    Disc { center: Point, radius: f64, color: Rgba },
    Curves { start: Point, curves: Vec<QuadCurve>, color: Rgba },
}

impl DrawOp {
    /// True for commands that put pixels on the surface.
    pub fn is_paint(&self) -> bool {
        matches!(
            self,
            DrawOp::Text { .. } | DrawOp::Ellipse { .. } | DrawOp::Disc { .. } | DrawOp::Curves { .. }
        )
    }
}

/// Headless surface that records every command it receives.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, ops: Vec::new() }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Drain recorded commands, leaving the surface size untouched.
    pub fn take_ops(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }

    /// Recorded paint commands only (text, ellipses, discs, curves).
    pub fn paints(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops.iter().filter(|op| op.is_paint())
    }
}

impl InkSurface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.ops.push(DrawOp::Resize { width, height });
    }

    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear { width: self.width, height: self.height });
    }

    fn save(&mut self) {
        self.ops.push(DrawOp::Save);
    }

    fn restore(&mut self) {
        self.ops.push(DrawOp::Restore);
    }

    fn translate(&mut self, x: f64, y: f64) {
        self.ops.push(DrawOp::Translate(x, y));
    }

    fn rotate(&mut self, angle: f64) {
        self.ops.push(DrawOp::Rotate(angle));
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.ops.push(DrawOp::Scale(sx, sy));
    }

    fn set_glow(&mut self, color: Rgba, blur: f64) {
        self.ops.push(DrawOp::Glow { color, blur });
    }

    fn fill_text(&mut self, text: &str, font: &str, color: Rgba) {
        self.ops.push(DrawOp::Text { text: text.to_owned(), font: font.to_owned(), color });
    }

    fn fill_ellipse(&mut self, center: Point, rx: f64, ry: f64, color: Rgba) {
        self.ops.push(DrawOp::Ellipse { center, rx, ry, color });
    }

    fn fill_disc(&mut self, center: Point, radius: f64, color: Rgba) {
        self.ops.push(DrawOp::Disc { center, radius, color });
    }

    fn fill_curves(&mut self, start: Point, curves: &[QuadCurve], color: Rgba) {
        self.ops.push(DrawOp::Curves { start, curves: curves.to_vec(), color });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_css() {
        let c = Rgba::new(240, 242, 255, 0.5);
        assert_eq!(c.to_css(), "rgba(240, 242, 255, 0.5)");
        assert_eq!(c.with_alpha(0.25).a, 0.25);
    }

    #[test]
    fn test_point_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance(b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_recording_clear_tracks_resize() {
        let mut s = RecordingSurface::new(10, 10);
        s.resize(800, 600);
        s.clear();
        assert_eq!(s.size(), (800, 600));
        assert_eq!(s.ops().last(), Some(&DrawOp::Clear { width: 800, height: 600 }));
        assert_eq!(s.paints().count(), 0);
    }
}
