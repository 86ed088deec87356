//! Geometric gesture classifier.
//!
//! Pure function of one frame's landmarks: no smoothing, no memory of
//! previous frames, no priority among gestures. Thresholds are in normalized
//! image units and were tuned for a webcam at arm's length.

use super::fingers::{Finger, FingerStates};
use super::state::{GestureFlag, GestureState};
use crate::landmarks::{
    planar_distance, FrameHands, HandLandmarks, INDEX_TIP, MIDDLE_TIP, THUMB_IP, THUMB_TIP, WRIST,
};

// --- Thresholds ---

/// Raw thumb-index distance mapped to pinch 0
pub const PINCH_MIN: f32 = 0.02;
/// Raw thumb-index distance mapped to pinch 1
pub const PINCH_MAX: f32 = 0.17;
/// Wrists closer than this with two hands in view count as a clap
pub const CLAP_DISTANCE: f32 = 0.2;
/// Wrist above this line (upper part of the frame) counts as raised
pub const RAISE_LINE_Y: f32 = 0.35;
/// Mirrored video: a wrist right of centre belongs to the user's left hand
pub const MIRROR_SPLIT_X: f32 = 0.5;
/// Minimum index-middle tip spacing for a victory sign
pub const VICTORY_MIN_SPREAD: f32 = 0.04;
/// Maximum thumb-index tip distance for an OK sign
pub const OK_MAX_TOUCH: f32 = 0.05;
/// Maximum index tip to wrist distance for a fist
pub const FIST_MAX_REACH: f32 = 0.15;

/// Map a raw thumb-index tip distance to the [0, 1] pinch control
pub fn pinch_from_distance(distance: f32) -> f32 {
    ((distance - PINCH_MIN) / (PINCH_MAX - PINCH_MIN)).clamp(0.0, 1.0)
}

/// Classify the latest detection, or return the neutral state if the
/// detector has not produced anything yet.
pub fn classify_latest(frame: Option<&FrameHands>) -> GestureState {
    match frame {
        Some(frame) => classify(frame),
        None => GestureState::neutral(),
    }
}

/// Classify one frame of hands
pub fn classify(frame: &FrameHands) -> GestureState {
    let hands = frame.hands();

    let mut state = GestureState {
        is_tracking: true,
        hands_detected: hands.len() as u32,
        ..GestureState::neutral()
    };

    match hands {
        [only] => {
            if let Some(hand) = only.landmarks() {
                state.pinch_distance =
                    pinch_from_distance(hand.planar_distance(THUMB_TIP, INDEX_TIP));
            }
        }
        [first, second] => {
            if let (Some(a), Some(b)) = (first.landmarks(), second.landmarks()) {
                let wrist_distance = planar_distance(a.get(WRIST), b.get(WRIST));
                state.hand_distance = wrist_distance.clamp(0.0, 1.0);
                state.is_clapping = wrist_distance < CLAP_DISTANCE;
            }
        }
        _ => {}
    }

    for hand in frame.valid_hands() {
        for flag in single_hand_flags(hand) {
            state = state.with_flag(flag, true);
        }
    }

    state
}

/// Every single-hand gesture the given hand satisfies
pub fn single_hand_flags(hand: &HandLandmarks) -> Vec<GestureFlag> {
    use Finger::*;

    let fingers = FingerStates::of(hand);
    let up = |f: Finger| fingers.up(f);
    let down = |f: Finger| fingers.down(f);

    let mut flags = Vec::new();
    let mut set = |flag: GestureFlag, hit: bool| {
        if hit {
            flags.push(flag);
        }
    };

    let wrist = hand.wrist();
    if wrist.y < RAISE_LINE_Y {
        if wrist.x > MIRROR_SPLIT_X {
            set(GestureFlag::RaiseLeft, true);
        } else {
            set(GestureFlag::RaiseRight, true);
        }
    }

    let four_down = down(Index) && down(Middle) && down(Ring) && down(Pinky);

    set(
        GestureFlag::Victory,
        up(Index)
            && up(Middle)
            && down(Ring)
            && down(Pinky)
            && hand.planar_distance(INDEX_TIP, MIDDLE_TIP) > VICTORY_MIN_SPREAD,
    );

    // Screen y grows downward
    set(
        GestureFlag::ThumbsUp,
        fingers.only(&[Thumb]) && hand.get(THUMB_TIP).y < hand.get(THUMB_IP).y,
    );

    set(
        GestureFlag::OkSign,
        hand.planar_distance(THUMB_TIP, INDEX_TIP) < OK_MAX_TOUCH
            && up(Middle)
            && up(Ring)
            && up(Pinky),
    );

    set(
        GestureFlag::Fist,
        four_down && hand.planar_distance(INDEX_TIP, WRIST) < FIST_MAX_REACH,
    );

    set(
        GestureFlag::Spiderman,
        up(Index) && down(Middle) && down(Ring) && up(Pinky),
    );

    set(GestureFlag::Point, fingers.only(&[Index]));
    set(GestureFlag::Pistol, fingers.only(&[Thumb, Index]));
    set(GestureFlag::CallMe, fingers.only(&[Thumb, Pinky]));
    set(
        GestureFlag::Palm,
        fingers.only(&[Thumb, Index, Middle, Ring, Pinky]),
    );

    // Thumb usually holds the pinky down here, so it is left unconstrained
    set(
        GestureFlag::Three,
        up(Index) && up(Middle) && up(Ring) && down(Pinky),
    );

    set(
        GestureFlag::Four,
        fingers.only(&[Index, Middle, Ring, Pinky]),
    );
    set(GestureFlag::Pinky, fingers.only(&[Pinky]));

    flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::{
        LandmarkPoint, INDEX_MCP, INDEX_PIP, LANDMARK_COUNT, MIDDLE_MCP, MIDDLE_PIP, PINKY_MCP,
        PINKY_PIP, PINKY_TIP, RING_MCP, RING_PIP, RING_TIP, THUMB_MCP,
    };

    /// Builds a synthetic upright hand with the wrist at `wrist` and each
    /// digit either extended (straight up) or curled (tip back near palm).
    pub(crate) fn pose(wrist: LandmarkPoint, extended: [bool; 5]) -> Vec<LandmarkPoint> {
        let mut p = vec![wrist; LANDMARK_COUNT];
        let at = |dx: f32, dy: f32| LandmarkPoint::new(wrist.x + dx, wrist.y + dy, 0.0);

        // Thumb: MCP out to the side, tip further out (extended) or folded in
        p[THUMB_MCP] = at(-0.06, -0.04);
        p[THUMB_IP] = at(-0.09, -0.07);
        p[THUMB_TIP] = if extended[0] {
            at(-0.10, -0.12)
        } else {
            at(-0.03, -0.05)
        };

        let digits = [
            (INDEX_MCP, INDEX_PIP, INDEX_TIP, -0.03),
            (MIDDLE_MCP, MIDDLE_PIP, MIDDLE_TIP, 0.0),
            (RING_MCP, RING_PIP, RING_TIP, 0.03),
            (PINKY_MCP, PINKY_PIP, PINKY_TIP, 0.06),
        ];
        for (i, (mcp, pip, tip, dx)) in digits.into_iter().enumerate() {
            p[mcp] = at(dx, -0.10);
            p[mcp + 1] = at(dx, -0.16);
            p[mcp + 2] = at(dx, -0.20);
            p[tip] = if extended[i + 1] {
                at(dx, -0.24)
            } else {
                // Curled: tip folds back below the pip but stays clear of the wrist
                at(dx, -0.155)
            };
            debug_assert_eq!(pip, mcp + 1);
        }
        p
    }

    fn frame_of(hands: Vec<Vec<LandmarkPoint>>) -> FrameHands {
        FrameHands::from_hands(hands)
    }

    const LOW: LandmarkPoint = LandmarkPoint::new(0.4, 0.8, 0.0);

    #[test]
    fn test_pinch_mapping_endpoints_and_linearity() {
        assert_eq!(pinch_from_distance(0.02), 0.0);
        assert_eq!(pinch_from_distance(0.0), 0.0);
        assert_eq!(pinch_from_distance(0.17), 1.0);
        assert_eq!(pinch_from_distance(0.5), 1.0);

        let mid = pinch_from_distance(0.095);
        assert!((mid - 0.5).abs() < 1e-5, "midpoint should map to 0.5, got {}", mid);

        let mut last = -1.0;
        for step in 0..=100 {
            let v = pinch_from_distance(step as f32 * 0.002);
            assert!(v >= last, "pinch mapping must be monotonic");
            last = v;
        }
    }

    #[test]
    fn test_empty_frame_is_tracking_but_neutral() {
        let state = classify(&FrameHands::empty());
        assert!(state.is_tracking);
        assert_eq!(state.hands_detected, 0);
        assert_eq!(state.pinch_distance, 1.0);
        assert_eq!(state.hand_distance, 0.0);
        assert_eq!(state.active_flags().count(), 0);
    }

    #[test]
    fn test_no_detection_is_not_tracking() {
        let state = classify_latest(None);
        assert!(!state.is_tracking);
        assert_eq!(state, GestureState::neutral());
    }

    #[test]
    fn test_classification_is_deterministic() {
        let frame = frame_of(vec![pose(LOW, [false, true, true, false, false])]);
        assert_eq!(classify(&frame), classify(&frame));
    }

    #[test]
    fn test_thumbs_up_is_exclusive() {
        let frame = frame_of(vec![pose(LOW, [true, false, false, false, false])]);
        let state = classify(&frame);

        assert!(state.is_thumbs_up);
        let active: Vec<_> = state.active_flags().collect();
        assert_eq!(active, vec![GestureFlag::ThumbsUp], "got {:?}", active);
    }

    #[test]
    fn test_thumb_pointing_down_is_not_thumbs_up() {
        let mut hand = pose(LOW, [true, false, false, false, false]);
        // Flip the thumb so its tip hangs below the IP joint
        hand[THUMB_IP] = LandmarkPoint::new(LOW.x - 0.09, LOW.y + 0.07, 0.0);
        hand[THUMB_TIP] = LandmarkPoint::new(LOW.x - 0.10, LOW.y + 0.12, 0.0);
        let state = classify(&frame_of(vec![hand]));

        assert!(!state.is_thumbs_up);
    }

    #[test]
    fn test_victory_depends_on_tip_spacing() {
        let mut wide = pose(LOW, [false, true, true, false, false]);
        wide[INDEX_TIP] = LandmarkPoint::new(LOW.x - 0.03, LOW.y - 0.24, 0.0);
        wide[MIDDLE_TIP] = LandmarkPoint::new(LOW.x + 0.03, LOW.y - 0.24, 0.0);
        assert!(classify(&frame_of(vec![wide])).is_victory);

        let mut narrow = pose(LOW, [false, true, true, false, false]);
        narrow[INDEX_TIP] = LandmarkPoint::new(LOW.x - 0.01, LOW.y - 0.24, 0.0);
        narrow[MIDDLE_TIP] = LandmarkPoint::new(LOW.x + 0.01, LOW.y - 0.24, 0.0);
        assert!(!classify(&frame_of(vec![narrow])).is_victory);
    }

    #[test]
    fn test_fist_requires_tips_near_wrist() {
        let mut fist = pose(LOW, [false, false, false, false, false]);
        fist[INDEX_TIP] = LandmarkPoint::new(LOW.x - 0.03, LOW.y - 0.10, 0.0);
        let state = classify(&frame_of(vec![fist]));
        assert!(state.is_fist);

        // Default curled pose keeps the index tip ~0.155 from the wrist
        let loose = pose(LOW, [false, false, false, false, false]);
        assert!(!classify(&frame_of(vec![loose])).is_fist);
    }

    #[test]
    fn test_four_and_palm_differ_only_by_thumb() {
        let four = classify(&frame_of(vec![pose(LOW, [false, true, true, true, true])]));
        assert!(four.is_four);
        assert!(!four.is_palm);

        let palm = classify(&frame_of(vec![pose(LOW, [true, true, true, true, true])]));
        assert!(palm.is_palm);
        assert!(!palm.is_four);
    }

    #[test]
    fn test_three_ignores_thumb() {
        for thumb in [false, true] {
            let state = classify(&frame_of(vec![pose(LOW, [thumb, true, true, true, false])]));
            assert!(state.is_three, "three should hold with thumb={}", thumb);
        }
    }

    #[test]
    fn test_digit_patterns() {
        let cases = [
            ([false, true, false, false, false], GestureFlag::Point),
            ([true, true, false, false, false], GestureFlag::Pistol),
            ([true, false, false, false, true], GestureFlag::CallMe),
            ([false, true, false, false, true], GestureFlag::Spiderman),
            ([false, false, false, false, true], GestureFlag::Pinky),
        ];
        for (extended, flag) in cases {
            let state = classify(&frame_of(vec![pose(LOW, extended)]));
            assert!(state.is_active(flag), "{:?} should be active", flag);
        }
    }

    #[test]
    fn test_ok_sign() {
        let mut hand = pose(LOW, [true, false, true, true, true]);
        hand[THUMB_TIP] = LandmarkPoint::new(LOW.x - 0.05, LOW.y - 0.15, 0.0);
        hand[INDEX_TIP] = LandmarkPoint::new(LOW.x - 0.04, LOW.y - 0.16, 0.0);
        assert!(classify(&frame_of(vec![hand])).is_ok_sign);
    }

    #[test]
    fn test_raised_hand_uses_mirrored_side() {
        let right_of_centre = LandmarkPoint::new(0.7, 0.3, 0.0);
        let state = classify(&frame_of(vec![pose(right_of_centre, [false; 5])]));
        assert!(state.is_left_hand_raised);
        assert!(!state.is_right_hand_raised);

        let left_of_centre = LandmarkPoint::new(0.3, 0.3, 0.0);
        let state = classify(&frame_of(vec![pose(left_of_centre, [false; 5])]));
        assert!(state.is_right_hand_raised);
        assert!(!state.is_left_hand_raised);
    }

    #[test]
    fn test_flags_are_ored_across_hands() {
        let a = pose(LandmarkPoint::new(0.2, 0.8, 0.0), [true, true, true, true, true]);
        let b = pose(LandmarkPoint::new(0.8, 0.8, 0.0), [false, true, false, false, false]);
        let state = classify(&frame_of(vec![a, b]));

        assert!(state.is_palm);
        assert!(state.is_pointing);
        assert!(!state.is_clapping);
        assert!((state.hand_distance - 0.6).abs() < 1e-5);
    }

    #[test]
    fn test_two_hands_close_together_clap() {
        let a = pose(LandmarkPoint::new(0.475, 0.8, 0.0), [false; 5]);
        let b = pose(LandmarkPoint::new(0.525, 0.8, 0.0), [false; 5]);
        let state = classify(&frame_of(vec![a, b]));

        assert!(state.is_clapping);
        assert_eq!(state.hands_detected, 2);
        assert_eq!(state.pinch_distance, 1.0);
        assert!((state.hand_distance - 0.05).abs() < 1e-5);
    }

    #[test]
    fn test_malformed_hand_contributes_nothing() {
        let short = vec![LandmarkPoint::splat(0.5); 5];
        let state = classify(&frame_of(vec![short]));

        assert!(state.is_tracking);
        assert_eq!(state.hands_detected, 1);
        assert_eq!(state.pinch_distance, 1.0);
        assert_eq!(state.active_flags().count(), 0);
    }

    #[test]
    fn test_malformed_partner_disables_clap() {
        let good = pose(LandmarkPoint::new(0.5, 0.8, 0.0), [true, true, true, true, true]);
        let bad = vec![LandmarkPoint::splat(0.5); 3];
        let state = classify(&frame_of(vec![good, bad]));

        assert!(!state.is_clapping);
        assert_eq!(state.hand_distance, 0.0);
        assert!(state.is_palm, "the valid hand still reports its own gestures");
    }

    #[test]
    fn test_pinch_reads_thumb_and_index_tips_in_image_plane() {
        let mut hand = vec![LandmarkPoint::new(0.3, 0.5, 0.0); LANDMARK_COUNT];
        // Opposite depths: only x/y may count
        hand[THUMB_TIP] = LandmarkPoint::new(0.40, 0.5, 0.9);
        hand[INDEX_TIP] = LandmarkPoint::new(0.495, 0.5, -0.9);
        // A far middle tip must not leak into the pinch
        hand[MIDDLE_TIP] = LandmarkPoint::new(0.9, 0.9, 0.0);

        let state = classify(&frame_of(vec![hand]));
        assert!((state.pinch_distance - 0.5).abs() < 1e-4, "pinch {}", state.pinch_distance);
    }

    #[test]
    fn test_two_hand_spread_is_clamped_to_one() {
        let a = vec![LandmarkPoint::new(0.0, 0.0, 0.0); LANDMARK_COUNT];
        let b = vec![LandmarkPoint::new(1.0, 1.0, 0.0); LANDMARK_COUNT];
        let state = classify(&frame_of(vec![a, b]));

        assert_eq!(state.hand_distance, 1.0);
        assert!(!state.is_clapping);
        assert_eq!(state.pinch_distance, 1.0);
    }

    #[test]
    fn test_spread_ignores_depth() {
        let a = vec![LandmarkPoint::new(0.3, 0.5, -0.8); LANDMARK_COUNT];
        let b = vec![LandmarkPoint::new(0.6, 0.5, 0.8); LANDMARK_COUNT];
        let state = classify(&frame_of(vec![a, b]));

        assert!((state.hand_distance - 0.3).abs() < 1e-5);
    }
}
