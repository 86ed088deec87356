//! Shared scene limits used by both build.rs and runtime code.
//!
//! This module is included by both the build script and the config module
//! so preset validation at compile time matches what the runtime accepts.

// Some items are only used by build.rs for validation
#![allow(dead_code)]

/// Particle count used when a config does not specify one
pub const DEFAULT_PARTICLE_COUNT: usize = 8000;

/// Upper bound on particle count; keeps a shape swap under a few frames
pub const MAX_PARTICLES: usize = 200_000;

/// Default per-tick smoothing factor
pub const DEFAULT_SMOOTHING: f32 = 0.08;

/// Default point sprite size in world units
pub const DEFAULT_POINT_SIZE: f32 = 0.15;

/// Default particle color
pub const DEFAULT_COLOR: &str = "#ff0066";

/// Shape names accepted in configs and presets, in `ShapeKind::PRESETS` order.
pub const SHAPE_NAMES: [&str; 7] = [
    "heart",
    "flower",
    "saturn",
    "buddha",
    "fireworks",
    "love-text",
    "sphere",
];

/// Check a `#rrggbb` / `rrggbb` color string
pub fn is_hex_color(value: &str) -> bool {
    let digits = value.strip_prefix('#').unwrap_or(value);
    digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit())
}

/// Fold a shape name to lowercase alphanumerics, so `"LoveText"`,
/// `"love_text"` and `"love-text"` compare equal
pub fn normalize_shape_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Position of a shape in `SHAPE_NAMES`, matched after normalization
pub fn shape_index(name: &str) -> Option<usize> {
    let wanted = normalize_shape_name(name);
    SHAPE_NAMES
        .iter()
        .position(|n| normalize_shape_name(n) == wanted)
}

pub fn is_valid_particle_count(count: usize) -> bool {
    count > 0 && count <= MAX_PARTICLES
}

pub fn is_valid_point_size(size: f32) -> bool {
    size > 0.0 && size.is_finite()
}

/// Smoothing must lie in (0, 1]
pub fn is_valid_smoothing(alpha: f32) -> bool {
    alpha > 0.0 && alpha <= 1.0
}
