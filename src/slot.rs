//! Latest-detection cell between the landmark detector and the frame loop.
//!
//! The detector runs at its own (lower, irregular) rate. Each frame reads
//! whatever was published last; detections overwritten before a frame reads
//! them are dropped, never queued.

use crate::landmarks::FrameHands;

/// Single-slot, most-recent-wins landmark cell
#[derive(Debug, Default)]
pub struct LandmarkSlot {
    latest: Option<FrameHands>,
    /// Whether `latest` has been read by a frame since it was published
    read: bool,
    /// Detections overwritten before any frame saw them
    dropped: u64,
}

impl LandmarkSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored detection
    pub fn publish(&mut self, frame: FrameHands) {
        if self.latest.is_some() && !self.read {
            self.dropped += 1;
        }
        self.latest = Some(frame);
        self.read = false;
    }

    /// Latest detection, or `None` before the first one arrives.
    ///
    /// Polling does not consume: the same detection stays current truth
    /// until a newer one replaces it.
    pub fn poll(&mut self) -> Option<&FrameHands> {
        if self.latest.is_some() {
            self.read = true;
        }
        self.latest.as_ref()
    }

    /// Read without marking the detection as seen
    pub fn peek(&self) -> Option<&FrameHands> {
        self.latest.as_ref()
    }

    /// True once the detector has published at least once
    pub fn has_detection(&self) -> bool {
        self.latest.is_some()
    }

    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Forget everything (detector released)
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

// App methods for the landmark source
#[cfg(target_arch = "wasm32")]
use crate::state::App;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl App {
    /// Publish a detection: `num_hands` blocks of 21 `x, y, z` triples
    pub fn publish_landmarks(&mut self, data: &[f32], num_hands: usize) {
        self.state.publish_landmarks(data, num_hands);
    }

    /// Detections overwritten before a frame read them
    pub fn dropped_detections(&self) -> f64 {
        self.state.slot.dropped() as f64
    }
}
