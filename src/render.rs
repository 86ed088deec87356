//! Render-facing state handed to the host engine each frame.
//!
//! The engine itself lives on the JS side; this module only packs what it
//! needs into plain values and a GPU-ready uniform block.

use glam::{EulerRot, Mat4};
use serde::Serialize;
use static_assertions::const_assert_eq;

use crate::scene_limits::{is_hex_color, DEFAULT_COLOR};

/// Particle color in 0..1 floats
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `rrggbb`
    pub fn from_hex(value: &str) -> Option<Self> {
        if !is_hex_color(value) {
            return None;
        }
        let digits = value.strip_prefix('#').unwrap_or(value);
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .ok()
                .map(|v| v as f32 / 255.0)
        };
        Some(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// `#rrggbb`, rounding each channel to the nearest byte
    pub fn to_hex(self) -> String {
        let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", byte(self.r), byte(self.g), byte(self.b))
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::from_hex(DEFAULT_COLOR).unwrap_or(Self::new(1.0, 0.0, 0.4))
    }
}

/// Accumulated cloud rotation in radians
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Rotation {
    pub x: f32,
    pub y: f32,
}

impl Rotation {
    /// Advance by one tick: y turns at `speed`, x at half of it
    pub fn advance(&mut self, speed: f32) {
        self.y += speed;
        self.x += speed * 0.5;
    }

    pub fn model_matrix(self) -> Mat4 {
        Mat4::from_euler(EulerRot::XYZ, self.x, self.y, 0.0)
    }
}

/// Uniform block for the point-sprite pipeline
///
/// Layout matches a WGSL struct of `mat4x4<f32>, vec4<f32>, vec4<f32>`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleUniforms {
    pub model: [[f32; 4]; 4],
    /// rgb, alpha always 1
    pub color: [f32; 4],
    /// x = point size, yzw unused
    pub point: [f32; 4],
}

const_assert_eq!(std::mem::size_of::<ParticleUniforms>(), 96);

impl ParticleUniforms {
    pub fn new(rotation: Rotation, color: Rgb, point_size: f32) -> Self {
        Self {
            model: rotation.model_matrix().to_cols_array_2d(),
            color: [color.r, color.g, color.b, 1.0],
            point: [point_size, 0.0, 0.0, 0.0],
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}
