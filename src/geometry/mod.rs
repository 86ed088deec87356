//! Procedural target shapes for the particle cloud.

pub mod glyph;
pub mod shapes;

pub use glyph::*;
pub use shapes::*;

use crate::scene_limits::{shape_index, SHAPE_NAMES};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Target shapes the cloud can morph into
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Heart,
    Flower,
    Saturn,
    /// Glyph shape, text from [`GlyphTexts::buddha`]
    Buddha,
    /// Starts as a small ball; the morph core makes it burst and pulse
    Fireworks,
    /// Glyph shape, text from [`GlyphTexts::love_text`]
    LoveText,
    Sphere,
    /// Arbitrary host-supplied text
    Text(String),
}

impl ShapeKind {
    /// Number of built-in shapes
    pub const COUNT: usize = 7;

    /// Built-in shapes, in the order of `SHAPE_NAMES`
    pub const PRESETS: [ShapeKind; Self::COUNT] = [
        ShapeKind::Heart,
        ShapeKind::Flower,
        ShapeKind::Saturn,
        ShapeKind::Buddha,
        ShapeKind::Fireworks,
        ShapeKind::LoveText,
        ShapeKind::Sphere,
    ];

    /// Config name; custom text shapes are reported as `"text"`
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Text(_) => "text",
            preset => {
                let index = Self::PRESETS
                    .iter()
                    .position(|p| p == preset)
                    .unwrap_or(Self::COUNT - 1);
                SHAPE_NAMES[index]
            }
        }
    }

    /// Parse a built-in shape name.
    ///
    /// Case and separators are ignored, so `"LoveText"`, `"love_text"` and
    /// `"love-text"` are the same shape.
    pub fn from_name(name: &str) -> Option<Self> {
        shape_index(name).map(|i| Self::PRESETS[i].clone())
    }

    /// Whether the morph core applies the per-point burst pulse
    pub fn is_explosive(&self) -> bool {
        matches!(self, ShapeKind::Fireworks)
    }
}

/// Text used by the built-in glyph shapes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlyphTexts {
    pub buddha: String,
    pub love_text: String,
}

impl Default for GlyphTexts {
    fn default() -> Self {
        Self {
            buddha: "ZEN".to_string(),
            love_text: "LOVE".to_string(),
        }
    }
}

/// Generates target point clouds.
///
/// Stateless apart from the glyph surface, which is created on first use
/// and cleared before every draw.
pub struct ShapeGenerator {
    typeface: Box<dyn Typeface>,
    surface: Option<GlyphSurface>,
    texts: GlyphTexts,
}

impl Default for ShapeGenerator {
    fn default() -> Self {
        Self::new(GlyphTexts::default())
    }
}

impl ShapeGenerator {
    pub fn new(texts: GlyphTexts) -> Self {
        Self {
            typeface: Box::new(BitmapTypeface::default()),
            surface: None,
            texts,
        }
    }

    /// Replace the face used for glyph shapes
    pub fn with_typeface(mut self, typeface: Box<dyn Typeface>) -> Self {
        self.typeface = typeface;
        self
    }

    pub fn texts(&self) -> &GlyphTexts {
        &self.texts
    }

    /// Whether the glyph surface has been allocated yet
    pub fn has_surface(&self) -> bool {
        self.surface.is_some()
    }

    /// Build a `3 * count` buffer for `shape`
    pub fn generate<R: Rng>(&mut self, shape: &ShapeKind, count: usize, rng: &mut R) -> Vec<f32> {
        match shape {
            ShapeKind::Heart => heart(rng, count),
            ShapeKind::Flower => flower(rng, count),
            ShapeKind::Saturn => saturn(rng, count),
            ShapeKind::Fireworks => fireworks(rng, count),
            ShapeKind::Sphere => sphere(rng, count),
            ShapeKind::Buddha => {
                let text = self.texts.buddha.clone();
                self.glyphs(&text, count, rng)
            }
            ShapeKind::LoveText => {
                let text = self.texts.love_text.clone();
                self.glyphs(&text, count, rng)
            }
            ShapeKind::Text(text) => self.glyphs(text, count, rng),
        }
    }

    fn glyphs<R: Rng>(&mut self, text: &str, count: usize, rng: &mut R) -> Vec<f32> {
        let surface = self.surface.get_or_insert_with(GlyphSurface::default);
        points_from_text(surface, self.typeface.as_ref(), text, count, rng)
    }
}
