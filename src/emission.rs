//! Emission policy: turns pointer movement into new particles.

use crate::config::InkConfig;
use crate::ink::{Flower, Glyph, Leaf, Particle, Splat};
use crate::rng::UnitSource;
use crate::surface::Point;

/// Characters the trail brushes, read cyclically.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SourceSequence {
    chars: Vec<char>,
}

impl SourceSequence {
    /// Every non-whitespace character of `text`, in order.
    pub fn from_text(text: &str) -> Self {
        Self { chars: text.chars().filter(|c| !c.is_whitespace()).collect() }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Character at `cursor`, wrapping. `None` when the sequence is empty.
    pub fn at(&self, cursor: usize) -> Option<char> {
        if self.chars.is_empty() {
            return None;
        }
        Some(self.chars[cursor % self.chars.len()])
    }
}

/// Last pointer position that emitted, plus the running character cursor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailState {
    pub last: Point,
    pub cursor: usize,
}

impl TrailState {
    pub fn new(origin: Point) -> Self {
        Self { last: origin, cursor: 0 }
    }
}

/// Outcome of the flower/leaf branch draw. At most one of the two per emission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Accent {
    Flower,
    Leaf,
    None,
}

impl Accent {
    pub fn pick(r: f64, cfg: &InkConfig) -> Self {
        if r > cfg.flower_threshold {
            Accent::Flower
        } else if r > cfg.leaf_threshold {
            Accent::Leaf
        } else {
            Accent::None
        }
    }
}

/// Decide what a pointer move at `at` emits.
///
/// Returns an empty vec, and leaves `trail` untouched, when the pointer has
/// not travelled strictly more than `cfg.travel_threshold` since the last
/// emission. Otherwise returns the new particles in paint order (glyph,
/// accent, splats) and moves `trail.last` to `at`.
///
/// Both branch draws are taken before any particle is built, so a scripted
/// source pins the branches with its first two values.
pub fn emit<R: UnitSource + ?Sized>(
    at: Point,
    trail: &mut TrailState,
    sequence: &SourceSequence,
    rng: &mut R,
    cfg: &InkConfig,
) -> Vec<Particle> {
    if at.distance(trail.last) <= cfg.travel_threshold {
        return Vec::new();
    }

    let accent = Accent::pick(rng.unit(), cfg);
    let splat = rng.unit() > cfg.splat_chance;

    let mut out = Vec::with_capacity(2 + cfg.splat_count);
    if let Some(ch) = sequence.at(trail.cursor) {
        out.push(Glyph::new(at, ch, &cfg.glyph_font, rng).into());
        trail.cursor = trail.cursor.wrapping_add(1);
    }

    match accent {
        Accent::Flower => out.push(Flower::new(at, rng).into()),
        Accent::Leaf => out.push(Leaf::new(at, rng).into()),
        Accent::None => {}
    }

    if splat {
        let spread = cfg.splat_jitter * 2.0;
        for _ in 0..cfg.splat_count {
            let jittered = at.offset(rng.centered(spread), rng.centered(spread));
            out.push(Splat::new(jittered, rng).into());
        }
    }

    log::trace!("emit at ({:.0}, {:.0}): {} particles, accent {:?}", at.x, at.y, out.len(), accent);
    trail.last = at;
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ink::ParticleKind;
    use crate::rng::ScriptedDraws;

    fn kinds(ps: &[Particle]) -> Vec<ParticleKind> {
        ps.iter().map(Particle::kind).collect()
    }

    #[test]
    fn test_sequence_strips_whitespace() {
        let seq = SourceSequence::from_text(" 一 花\n世\t界 ");
        assert_eq!(seq.len(), 4);
        assert_eq!(seq.at(0), Some('一'));
        assert_eq!(seq.at(5), Some('花'));
        assert_eq!(SourceSequence::from_text(" \n ").at(3), None);
    }

    #[test]
    fn test_accent_boundaries() {
        let cfg = InkConfig::default();
        assert_eq!(Accent::pick(0.90, &cfg), Accent::Leaf);
        assert_eq!(Accent::pick(0.9001, &cfg), Accent::Flower);
        assert_eq!(Accent::pick(0.8001, &cfg), Accent::Leaf);
        assert_eq!(Accent::pick(0.80, &cfg), Accent::None);
        assert_eq!(Accent::pick(0.0, &cfg), Accent::None);
    }

    #[test]
    fn test_short_move_is_ignored() {
        let cfg = InkConfig::default();
        let seq = SourceSequence::from_text("山水");
        let mut trail = TrailState { last: Point::new(100.0, 100.0), cursor: 3 };
        let mut rng = ScriptedDraws::new([], 0.99);
        // exactly on the threshold does not qualify
        let out = emit(Point::new(135.0, 100.0), &mut trail, &seq, &mut rng, &cfg);
        assert!(out.is_empty());
        assert_eq!(trail, TrailState { last: Point::new(100.0, 100.0), cursor: 3 });
    }

    #[test]
    fn test_full_emission() {
        let cfg = InkConfig::default();
        let seq = SourceSequence::from_text("山水");
        let mut trail = TrailState::new(cfg.trail_origin());
        let mut rng = ScriptedDraws::new([0.95, 0.75], 0.5);
        let at = Point::new(10.0, 20.0);
        let out = emit(at, &mut trail, &seq, &mut rng, &cfg);
        assert_eq!(
            kinds(&out),
            [ParticleKind::Glyph, ParticleKind::Flower, ParticleKind::Splat, ParticleKind::Splat]
        );
        assert_eq!(trail.last, at);
        assert_eq!(trail.cursor, 1);
        match &out[0] {
            Particle::Glyph(g) => assert_eq!(g.ch, '山'),
            other => panic!("expected glyph, got {other:?}"),
        }
    }

    #[test]
    fn test_splats_stay_within_jitter() {
        let cfg = InkConfig::default();
        let seq = SourceSequence::from_text("水");
        let mut rng = crate::rng::InkRng::seeded(42);
        for i in 0..200 {
            let mut trail = TrailState::new(cfg.trail_origin());
            let at = Point::new(400.0, 300.0 + i as f64);
            for p in emit(at, &mut trail, &seq, &mut rng, &cfg) {
                if p.kind() == ParticleKind::Splat {
                    let pos = p.position();
                    assert!((pos.x - at.x).abs() <= 35.0);
                    assert!((pos.y - at.y).abs() <= 35.0);
                }
            }
        }
    }

    #[test]
    fn test_empty_sequence_skips_glyph_only() {
        let cfg = InkConfig::default();
        let seq = SourceSequence::from_text("");
        let mut trail = TrailState::new(cfg.trail_origin());
        let mut rng = ScriptedDraws::new([0.85, 0.9], 0.5);
        let out = emit(Point::new(1.0, 1.0), &mut trail, &seq, &mut rng, &cfg);
        assert_eq!(kinds(&out), [ParticleKind::Leaf, ParticleKind::Splat, ParticleKind::Splat]);
        assert_eq!(trail.cursor, 0);
        assert_eq!(trail.last, Point::new(1.0, 1.0));
    }
}
