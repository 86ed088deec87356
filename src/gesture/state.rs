use serde::Serialize;

/// Identifier for each boolean gesture signal.
/// Ordered to match the fields of [`GestureState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
#[repr(u8)]
pub enum GestureFlag {
    RaiseLeft = 0,
    RaiseRight = 1,
    Clap = 2,
    Victory = 3,
    ThumbsUp = 4,
    OkSign = 5,
    Fist = 6,
    Spiderman = 7,
    Point = 8,
    CallMe = 9,
    Palm = 10,
    Three = 11,
    Four = 12,
    Pinky = 13,
    Pistol = 14,
}

impl GestureFlag {
    /// Total number of gesture flags
    pub const COUNT: usize = 15;

    /// All flags in declaration order
    pub const ALL: [GestureFlag; Self::COUNT] = [
        GestureFlag::RaiseLeft,
        GestureFlag::RaiseRight,
        GestureFlag::Clap,
        GestureFlag::Victory,
        GestureFlag::ThumbsUp,
        GestureFlag::OkSign,
        GestureFlag::Fist,
        GestureFlag::Spiderman,
        GestureFlag::Point,
        GestureFlag::CallMe,
        GestureFlag::Palm,
        GestureFlag::Three,
        GestureFlag::Four,
        GestureFlag::Pinky,
        GestureFlag::Pistol,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Stable name used across the JS boundary
    pub const fn name(self) -> &'static str {
        match self {
            GestureFlag::RaiseLeft => "raise-left",
            GestureFlag::RaiseRight => "raise-right",
            GestureFlag::Clap => "clap",
            GestureFlag::Victory => "victory",
            GestureFlag::ThumbsUp => "thumbs-up",
            GestureFlag::OkSign => "ok-sign",
            GestureFlag::Fist => "fist",
            GestureFlag::Spiderman => "spiderman",
            GestureFlag::Point => "point",
            GestureFlag::CallMe => "call-me",
            GestureFlag::Palm => "palm",
            GestureFlag::Three => "three",
            GestureFlag::Four => "four",
            GestureFlag::Pinky => "pinky",
            GestureFlag::Pistol => "pistol",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|flag| flag.name() == name)
    }
}

/// Gesture snapshot for one frame.
///
/// Immutable value type, rebuilt from scratch every frame. Flags are
/// independent: several may be true at once and no priority is implied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GestureState {
    /// False until the detector has reported at least once
    pub is_tracking: bool,
    /// Thumb-index closeness in [0, 1]; 1 unless exactly one hand is visible
    pub pinch_distance: f32,
    /// Wrist-to-wrist spread in [0, 1]; 0 unless exactly two hands are visible
    pub hand_distance: f32,
    pub hands_detected: u32,

    pub is_left_hand_raised: bool,
    pub is_right_hand_raised: bool,
    pub is_clapping: bool,
    pub is_victory: bool,
    pub is_thumbs_up: bool,
    pub is_ok_sign: bool,
    pub is_fist: bool,
    pub is_spiderman: bool,
    pub is_pointing: bool,
    pub is_call_me: bool,
    pub is_palm: bool,
    pub is_three: bool,
    pub is_four: bool,
    pub is_pinky: bool,
    pub is_pistol: bool,
}

impl Default for GestureState {
    fn default() -> Self {
        Self::neutral()
    }
}

impl GestureState {
    /// State used before the first detection
    pub const fn neutral() -> Self {
        Self {
            is_tracking: false,
            pinch_distance: 1.0,
            hand_distance: 0.0,
            hands_detected: 0,
            is_left_hand_raised: false,
            is_right_hand_raised: false,
            is_clapping: false,
            is_victory: false,
            is_thumbs_up: false,
            is_ok_sign: false,
            is_fist: false,
            is_spiderman: false,
            is_pointing: false,
            is_call_me: false,
            is_palm: false,
            is_three: false,
            is_four: false,
            is_pinky: false,
            is_pistol: false,
        }
    }

    /// Look up a single flag
    pub fn is_active(&self, flag: GestureFlag) -> bool {
        match flag {
            GestureFlag::RaiseLeft => self.is_left_hand_raised,
            GestureFlag::RaiseRight => self.is_right_hand_raised,
            GestureFlag::Clap => self.is_clapping,
            GestureFlag::Victory => self.is_victory,
            GestureFlag::ThumbsUp => self.is_thumbs_up,
            GestureFlag::OkSign => self.is_ok_sign,
            GestureFlag::Fist => self.is_fist,
            GestureFlag::Spiderman => self.is_spiderman,
            GestureFlag::Point => self.is_pointing,
            GestureFlag::CallMe => self.is_call_me,
            GestureFlag::Palm => self.is_palm,
            GestureFlag::Three => self.is_three,
            GestureFlag::Four => self.is_four,
            GestureFlag::Pinky => self.is_pinky,
            GestureFlag::Pistol => self.is_pistol,
        }
    }

    /// Return a new state with one flag set
    pub fn with_flag(self, flag: GestureFlag, value: bool) -> Self {
        let mut state = self;
        let field = match flag {
            GestureFlag::RaiseLeft => &mut state.is_left_hand_raised,
            GestureFlag::RaiseRight => &mut state.is_right_hand_raised,
            GestureFlag::Clap => &mut state.is_clapping,
            GestureFlag::Victory => &mut state.is_victory,
            GestureFlag::ThumbsUp => &mut state.is_thumbs_up,
            GestureFlag::OkSign => &mut state.is_ok_sign,
            GestureFlag::Fist => &mut state.is_fist,
            GestureFlag::Spiderman => &mut state.is_spiderman,
            GestureFlag::Point => &mut state.is_pointing,
            GestureFlag::CallMe => &mut state.is_call_me,
            GestureFlag::Palm => &mut state.is_palm,
            GestureFlag::Three => &mut state.is_three,
            GestureFlag::Four => &mut state.is_four,
            GestureFlag::Pinky => &mut state.is_pinky,
            GestureFlag::Pistol => &mut state.is_pistol,
        };
        *field = value;
        state
    }

    /// All flags that are true this frame
    pub fn active_flags(&self) -> impl Iterator<Item = GestureFlag> + '_ {
        GestureFlag::ALL
            .into_iter()
            .filter(move |flag| self.is_active(*flag))
    }

    /// Flags true now but false in `previous` (rising edges)
    pub fn newly_active<'a>(
        &'a self,
        previous: &'a GestureState,
    ) -> impl Iterator<Item = GestureFlag> + 'a {
        self.active_flags()
            .filter(move |flag| !previous.is_active(*flag))
    }
}
