//! Scene configuration loaded from JSON
//!
//! Every field is optional; anything left out falls back to the defaults in
//! `scene_limits`. The bundled presets are checked by `build.rs` against the
//! same limits.

use std::fmt;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::geometry::{GlyphTexts, ShapeGenerator, ShapeKind};
use crate::morph::MorphCore;
use crate::render::Rgb;
use crate::scene_limits::{
    is_valid_particle_count, is_valid_point_size, is_valid_smoothing, DEFAULT_COLOR,
    DEFAULT_PARTICLE_COUNT, DEFAULT_POINT_SIZE, DEFAULT_SMOOTHING, MAX_PARTICLES, SHAPE_NAMES,
};

/// Presets compiled into the binary, by name
pub const BUNDLED_PRESETS: [(&str, &str); 4] = [
    ("default", include_str!("../presets/default.json")),
    ("saturn", include_str!("../presets/saturn.json")),
    ("confession", include_str!("../presets/confession.json")),
    ("fireworks", include_str!("../presets/fireworks.json")),
];

/// Why a config was rejected
#[derive(Debug)]
pub enum ConfigError {
    Json(serde_json::Error),
    ParticleCount(usize),
    UnknownShape(String),
    Color(String),
    PointSize(f32),
    Smoothing(f32),
    UnknownPreset(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(e) => write!(f, "invalid scene config: {e}"),
            Self::ParticleCount(n) => {
                write!(f, "particle_count {n} outside 1..={MAX_PARTICLES}")
            }
            Self::UnknownShape(name) => write!(
                f,
                "unknown shape '{name}' (expected one of {})",
                SHAPE_NAMES.join(", ")
            ),
            Self::Color(value) => write!(f, "color '{value}' is not #rrggbb"),
            Self::PointSize(size) => write!(f, "point_size {size} must be positive"),
            Self::Smoothing(alpha) => write!(f, "smoothing {alpha} outside (0, 1]"),
            Self::UnknownPreset(name) => write!(f, "no bundled preset named '{name}'"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Preset label, informational only
    pub name: Option<String>,
    pub particle_count: usize,
    pub shape: String,
    pub color: String,
    pub point_size: f32,
    /// Fraction of the remaining distance covered per tick
    pub smoothing: f32,
    /// Fixed RNG seed; OS entropy when absent
    pub seed: Option<u64>,
    pub glyph_texts: GlyphTexts,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            name: None,
            particle_count: DEFAULT_PARTICLE_COUNT,
            shape: SHAPE_NAMES[0].to_string(),
            color: DEFAULT_COLOR.to_string(),
            point_size: DEFAULT_POINT_SIZE,
            smoothing: DEFAULT_SMOOTHING,
            seed: None,
            glyph_texts: GlyphTexts::default(),
        }
    }
}

impl SceneConfig {
    /// Parse and validate
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Look up one of the [`BUNDLED_PRESETS`]
    pub fn preset(name: &str) -> Result<Self, ConfigError> {
        let (_, json) = BUNDLED_PRESETS
            .iter()
            .find(|(preset, _)| *preset == name)
            .ok_or_else(|| ConfigError::UnknownPreset(name.to_string()))?;
        Self::from_json(json)
    }

    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_valid_particle_count(self.particle_count) {
            return Err(ConfigError::ParticleCount(self.particle_count));
        }
        self.shape_kind()?;
        self.rgb()?;
        if !is_valid_point_size(self.point_size) {
            return Err(ConfigError::PointSize(self.point_size));
        }
        if !is_valid_smoothing(self.smoothing) {
            return Err(ConfigError::Smoothing(self.smoothing));
        }
        Ok(())
    }

    pub fn shape_kind(&self) -> Result<ShapeKind, ConfigError> {
        ShapeKind::from_name(&self.shape).ok_or_else(|| ConfigError::UnknownShape(self.shape.clone()))
    }

    pub fn rgb(&self) -> Result<Rgb, ConfigError> {
        Rgb::from_hex(&self.color).ok_or_else(|| ConfigError::Color(self.color.clone()))
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }

    /// Validate and build the morph core this config describes
    pub fn build_core(&self) -> Result<MorphCore, ConfigError> {
        self.validate()?;
        let generator = ShapeGenerator::new(self.glyph_texts.clone());
        let core = MorphCore::new(self.shape_kind()?, self.particle_count, generator, self.rng())
            .with_smoothing(self.smoothing)
            .with_color(self.rgb()?)
            .with_point_size(self.point_size);
        Ok(core)
    }
}
