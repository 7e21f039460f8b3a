//! Tunables for the ink trail.
//!
//! Defaults reproduce the stock Mo Zen look. A host page may override any
//! subset by passing JSON to `InkCanvas::mount_with_config`; unknown keys are
//! rejected so typos surface immediately.

use serde::Deserialize;

use crate::surface::Point;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InkConfig {
    /// Minimum pointer travel (surface px) before another emission.
    pub travel_threshold: f64,
    /// Branch draw above this spawns a flower.
    pub flower_threshold: f64,
    /// Branch draw above this (and not above `flower_threshold`) spawns a leaf.
    pub leaf_threshold: f64,
    /// Splat draw above this spawns `splat_count` splats.
    pub splat_chance: f64,
    pub splat_count: usize,
    /// Half-width of the square splats scatter into around the pointer.
    pub splat_jitter: f64,
    /// CSS font stack used for glyphs; the px size is prepended per glyph.
    pub glyph_font: String,
    /// Starting "last pointer" position, far off-surface so the first move emits.
    pub trail_origin: (f64, f64),
}

impl Default for InkConfig {
    fn default() -> Self {
        Self {
            travel_threshold: 35.0,
            flower_threshold: 0.90,
            leaf_threshold: 0.80,
            splat_chance: 0.5,
            splat_count: 2,
            splat_jitter: 35.0,
            glyph_font: "'Ma Shan Zheng', 'ZCOOL XiaoWei', serif".to_owned(),
            trail_origin: (-1000.0, -1000.0),
        }
    }
}

impl InkConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn trail_origin(&self) -> Point {
        Point::new(self.trail_origin.0, self.trail_origin.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_is_default() {
        assert_eq!(InkConfig::from_json("{}").unwrap(), InkConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let cfg = InkConfig::from_json(r#"{ "travel_threshold": 12.5, "splat_count": 4 }"#).unwrap();
        assert_eq!(cfg.travel_threshold, 12.5);
        assert_eq!(cfg.splat_count, 4);
        assert_eq!(cfg.flower_threshold, 0.90);
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(InkConfig::from_json(r#"{ "travel": 1 }"#).is_err());
    }
}
