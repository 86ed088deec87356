//! Gesture Particles - Wasm Core
//!
//! Hand-gesture classification and a morphing 3D point cloud, driven
//! frame by frame from the browser through wasm-bindgen.

pub mod config;
pub mod geometry;
pub mod gesture;
pub mod landmarks;
pub mod morph;
pub mod render;
mod scene_limits;
pub mod slot;
pub mod state;

use wasm_bindgen::prelude::*;

pub use config::{ConfigError, SceneConfig};
pub use geometry::{ShapeGenerator, ShapeKind, Typeface};
pub use gesture::{classify, GestureFlag, GestureState};
pub use glam::Vec3;
pub use landmarks::{FrameHands, HandLandmarks};
pub use morph::{InteractionParams, MorphCore};
pub use render::{ParticleUniforms, Rgb, Rotation};
pub use state::AppState;

#[cfg(target_arch = "wasm32")]
pub use state::App;

/// Panic hook and console logger, run once when the module loads
#[cfg_attr(target_arch = "wasm32", wasm_bindgen(start))]
pub fn start() {
    cfg_if::cfg_if! {
        if #[cfg(target_arch = "wasm32")] {
            console_error_panic_hook::set_once();
            console_log::init_with_level(log::Level::Info).ok();
        }
    }
    log::info!("gesture particles core loaded");
}

/// Log to browser console
#[wasm_bindgen]
pub fn log(msg: &str) {
    log::info!("{}", msg);
}

/// Names of the built-in shapes, in menu order
#[wasm_bindgen]
pub fn shape_names() -> Vec<String> {
    scene_limits::SHAPE_NAMES
        .iter()
        .map(|name| name.to_string())
        .collect()
}
