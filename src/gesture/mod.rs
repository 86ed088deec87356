pub mod classify;
pub mod fingers;
pub mod state;

pub use classify::*;
pub use fingers::*;
pub use state::*;

// App methods for reading gestures
#[cfg(target_arch = "wasm32")]
use crate::state::App;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl App {
    /// Gesture snapshot from the last frame as a plain JS object
    pub fn gesture_state(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.state.gesture)
            .map_err(|e| JsValue::from_str(&format!("Failed to serialize gesture: {}", e)))
    }

    /// Look up one flag by name, e.g. `"thumbs-up"`
    pub fn is_gesture_active(&self, name: &str) -> bool {
        GestureFlag::from_name(name).is_some_and(|flag| self.state.gesture.is_active(flag))
    }

    /// Names of every flag that is currently true
    pub fn active_gestures(&self) -> Vec<String> {
        self.state
            .gesture
            .active_flags()
            .map(|flag| flag.name().to_string())
            .collect()
    }
}
