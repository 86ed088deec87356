use crate::landmarks::{
    planar_distance, HandLandmarks, INDEX_PIP, INDEX_TIP, MIDDLE_PIP, MIDDLE_TIP, PINKY_PIP,
    PINKY_TIP, RING_PIP, RING_TIP, THUMB_MCP, THUMB_TIP,
};

/// The five digits of a hand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Finger {
    Thumb = 0,
    Index = 1,
    Middle = 2,
    Ring = 3,
    Pinky = 4,
}

impl Finger {
    pub const COUNT: usize = 5;

    pub const ALL: [Finger; Self::COUNT] = [
        Finger::Thumb,
        Finger::Index,
        Finger::Middle,
        Finger::Ring,
        Finger::Pinky,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Landmark index of the fingertip
    pub const fn tip(self) -> usize {
        match self {
            Finger::Thumb => THUMB_TIP,
            Finger::Index => INDEX_TIP,
            Finger::Middle => MIDDLE_TIP,
            Finger::Ring => RING_TIP,
            Finger::Pinky => PINKY_TIP,
        }
    }

    /// Landmark index of the reference joint for the extension test.
    /// The thumb has no pip, so its MCP is used instead.
    pub const fn reference_joint(self) -> usize {
        match self {
            Finger::Thumb => THUMB_MCP,
            Finger::Index => INDEX_PIP,
            Finger::Middle => MIDDLE_PIP,
            Finger::Ring => RING_PIP,
            Finger::Pinky => PINKY_PIP,
        }
    }
}

/// Whether a finger is extended: its tip is farther from the wrist than its
/// reference joint.
pub fn is_extended(hand: &HandLandmarks, finger: Finger) -> bool {
    let wrist = hand.wrist();
    let tip = planar_distance(hand.get(finger.tip()), wrist);
    let joint = planar_distance(hand.get(finger.reference_joint()), wrist);
    tip > joint
}

/// Extension state of all five fingers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FingerStates([bool; Finger::COUNT]);

impl FingerStates {
    pub fn of(hand: &HandLandmarks) -> Self {
        Self(Finger::ALL.map(|finger| is_extended(hand, finger)))
    }

    /// Build directly from (thumb, index, middle, ring, pinky)
    pub const fn from_array(extended: [bool; Finger::COUNT]) -> Self {
        Self(extended)
    }

    #[inline]
    pub fn up(&self, finger: Finger) -> bool {
        self.0[finger.index()]
    }

    #[inline]
    pub fn down(&self, finger: Finger) -> bool {
        !self.up(finger)
    }

    /// True if exactly the given fingers are extended and all others are not
    pub fn only(&self, fingers: &[Finger]) -> bool {
        Finger::ALL
            .iter()
            .all(|f| self.up(*f) == fingers.contains(f))
    }
}
