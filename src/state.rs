//! Application state with context passing
//!
//! `AppState` owns everything that changes from frame to frame: the landmark
//! slot, the morph core and the last gesture snapshot. Core logic takes
//! explicit references; the wasm `App` handle is a thin owner that the host
//! keeps alive and calls into.
//!
//! Other modules add their own `#[wasm_bindgen] impl App` blocks.

use crate::config::{ConfigError, SceneConfig};
use crate::gesture::{classify_latest, GestureState};
use crate::landmarks::FrameHands;
use crate::morph::MorphCore;
use crate::slot::LandmarkSlot;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub struct AppState {
    /// Latest detection from the landmark source
    pub slot: LandmarkSlot,
    /// Particle buffers and render state
    pub morph: MorphCore,
    /// Snapshot from the most recent frame
    pub gesture: GestureState,
}

impl AppState {
    pub fn new(morph: MorphCore) -> Self {
        Self {
            slot: LandmarkSlot::new(),
            morph,
            gesture: GestureState::neutral(),
        }
    }

    pub fn from_config(config: &SceneConfig) -> Result<Self, ConfigError> {
        let morph = config.build_core()?;
        log::info!(
            "scene '{}' ready: {} x {} particles",
            config.name.as_deref().unwrap_or("custom"),
            morph.shape().name(),
            morph.particle_count()
        );
        Ok(Self::new(morph))
    }

    /// Store a detection from the landmark source; see [`FrameHands::from_flat`]
    pub fn publish_landmarks(&mut self, data: &[f32], num_hands: usize) {
        self.slot.publish(FrameHands::from_flat(data, num_hands));
    }

    /// Run one frame: classify the latest detection and advance the cloud.
    ///
    /// `time` is in seconds and only needs to be monotonic.
    pub fn frame(&mut self, time: f32) -> &GestureState {
        let gesture = classify_latest(self.slot.poll());

        match (self.gesture.hands_detected, gesture.hands_detected) {
            (0, n) if n > 0 => log::info!("tracking {} hand(s)", n),
            (n, 0) if n > 0 => log::info!("hands lost"),
            _ => {}
        }
        for flag in gesture.newly_active(&self.gesture) {
            log::debug!("gesture {}", flag.name());
        }

        self.morph.tick(&gesture, time);
        self.gesture = gesture;
        &self.gesture
    }
}

/// Host-owned handle around [`AppState`]
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub struct App {
    pub(crate) state: AppState,
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl App {
    /// Build from a JSON scene config; an empty string uses the defaults
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<App, JsValue> {
        let config = if config_json.trim().is_empty() {
            SceneConfig::default()
        } else {
            SceneConfig::from_json(config_json).map_err(|e| {
                log::warn!("rejected scene config: {}", e);
                JsValue::from_str(&e.to_string())
            })?
        };
        let state = AppState::from_config(&config).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(App { state })
    }

    /// Build from one of the bundled presets
    pub fn from_preset(name: &str) -> Result<App, JsValue> {
        let config = SceneConfig::preset(name).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let state = AppState::from_config(&config).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(App { state })
    }

    /// Advance one frame at `time` seconds
    pub fn frame(&mut self, time: f32) {
        self.state.frame(time);
    }

    /// Advance one frame using the page clock
    pub fn frame_now(&mut self) {
        let millis = web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0);
        self.state.frame((millis / 1000.0) as f32);
    }
}
