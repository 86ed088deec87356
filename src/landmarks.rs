//! Hand landmark storage
//!
//! The landmark detector reports up to two hands per frame, each as 21
//! normalized points in image space (x right, y down, z relative depth).
//! Indices follow the detector's fixed anatomical layout.

use glam::Vec3;

// ============================================================================
// HAND LANDMARK INDICES
// ============================================================================

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// Points per hand
pub const LANDMARK_COUNT: usize = 21;

/// Floats per landmark in the flat host array (x, y, z)
pub const LANDMARK_STRIDE: usize = 3;

/// Hands beyond this are dropped on ingestion
pub const MAX_HANDS: usize = 2;

/// A single landmark in normalized image coordinates
pub type LandmarkPoint = Vec3;

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// One well-formed hand: exactly 21 finite landmarks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandLandmarks {
    points: [LandmarkPoint; LANDMARK_COUNT],
}

impl HandLandmarks {
    /// Build from a point slice.
    ///
    /// Returns `None` for short input or any non-finite coordinate. Extra
    /// points past the 21st are ignored.
    pub fn from_points(points: &[LandmarkPoint]) -> Option<Self> {
        if points.len() < LANDMARK_COUNT {
            return None;
        }
        let mut out = [Vec3::ZERO; LANDMARK_COUNT];
        for (slot, p) in out.iter_mut().zip(points) {
            if !p.is_finite() {
                return None;
            }
            *slot = *p;
        }
        Some(Self { points: out })
    }

    /// Build from `x, y, z` triples
    pub fn from_flat(data: &[f32]) -> Option<Self> {
        if data.len() < LANDMARK_COUNT * LANDMARK_STRIDE {
            return None;
        }
        let points: Vec<LandmarkPoint> = data
            .chunks_exact(LANDMARK_STRIDE)
            .take(LANDMARK_COUNT)
            .map(|c| Vec3::new(c[0], c[1], c[2]))
            .collect();
        Self::from_points(&points)
    }

    #[inline]
    pub fn get(&self, index: usize) -> LandmarkPoint {
        self.points[index]
    }

    #[inline]
    pub fn wrist(&self) -> LandmarkPoint {
        self.points[WRIST]
    }

    /// Image-plane distance between two landmarks.
    ///
    /// Depth from the detector is relative and noisy, so it is ignored here.
    #[inline]
    pub fn planar_distance(&self, a: usize, b: usize) -> f32 {
        planar_distance(self.points[a], self.points[b])
    }

    pub fn points(&self) -> &[LandmarkPoint; LANDMARK_COUNT] {
        &self.points
    }
}

/// Image-plane (x, y) distance between two landmark points
#[inline]
pub fn planar_distance(a: LandmarkPoint, b: LandmarkPoint) -> f32 {
    a.truncate().distance(b.truncate())
}

/// A hand as reported by the detector; malformed reports still count as
/// detected but carry no usable geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DetectedHand {
    Valid(HandLandmarks),
    Malformed,
}

impl DetectedHand {
    pub fn landmarks(&self) -> Option<&HandLandmarks> {
        match self {
            DetectedHand::Valid(hand) => Some(hand),
            DetectedHand::Malformed => None,
        }
    }
}

/// All hands detected in one frame (at most [`MAX_HANDS`])
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameHands {
    hands: Vec<DetectedHand>,
}

impl FrameHands {
    /// Frame with no hands in view
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from per-hand point lists
    pub fn from_hands<I, H>(hands: I) -> Self
    where
        I: IntoIterator<Item = H>,
        H: AsRef<[LandmarkPoint]>,
    {
        let hands = hands
            .into_iter()
            .take(MAX_HANDS)
            .map(|h| match HandLandmarks::from_points(h.as_ref()) {
                Some(hand) => DetectedHand::Valid(hand),
                None => DetectedHand::Malformed,
            })
            .collect();
        Self { hands }
    }

    /// Parse the host's flat layout: `num_hands` consecutive blocks of
    /// 21 `x, y, z` triples.
    ///
    /// A hand whose block is cut short by the end of `data` is kept as
    /// [`DetectedHand::Malformed`].
    pub fn from_flat(data: &[f32], num_hands: usize) -> Self {
        let block = LANDMARK_COUNT * LANDMARK_STRIDE;
        let hands = (0..num_hands.min(MAX_HANDS))
            .map(|h| {
                let start = h * block;
                let parsed = data
                    .get(start..start + block)
                    .and_then(HandLandmarks::from_flat);
                match parsed {
                    Some(hand) => DetectedHand::Valid(hand),
                    None => DetectedHand::Malformed,
                }
            })
            .collect();
        Self { hands }
    }

    /// Number of detected hands, malformed ones included
    pub fn count(&self) -> usize {
        self.hands.len()
    }

    pub fn hands(&self) -> &[DetectedHand] {
        &self.hands
    }

    /// Well-formed hands only
    pub fn valid_hands(&self) -> impl Iterator<Item = &HandLandmarks> {
        self.hands.iter().filter_map(DetectedHand::landmarks)
    }
}
