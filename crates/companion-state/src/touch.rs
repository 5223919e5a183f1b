//! Emotional meaning of physical touches.
//!
//! The client detects a body part and a gesture on the avatar. Each
//! supported `(part, gesture)` pair maps to one [`EmotionalMeaning`],
//! which is the key the bonding table scores. Pairs outside the table
//! are a plain [`EmotionalMeaning::PhysicalTouch`].

use companion_types::Intensity;

/// Classification of a touch, used as the bonding-table key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmotionalMeaning {
    /// Finger on the lips (Mouth + Tap).
    IntimateFingerKiss,
    /// Stroking the neck (Neck + Slide).
    SensualShyTouch,
    /// Caressing a cheek (Cheeks + Slide).
    AffectionateNuzzle,
    /// Stroking an ear (Ears + Slide).
    MischievousEarStroke,
    /// Tapping an ear (Ears + Tap).
    TicklishPlay,
    /// Tapping the nose (Nose + Tap).
    CuteBoop,
    /// Pulling the hair (Hair + Pull).
    PlayfulHairTugging,
    /// Patting the hair (Hair + Tap).
    GentlePat,
    /// Tapping a shoulder (Shoulders + Tap).
    AttentionSeeking,
    /// Pinching a cheek (Cheeks + Pinch).
    PlayfulTeaseOuch,
    /// Holding the nose (Nose + Long Press).
    PlayfulAnnoyance,
    /// Any other touch.
    PhysicalTouch,
}

impl EmotionalMeaning {
    /// Every meaning, in bonding-table order.
    pub const ALL: [Self; 12] = [
        Self::IntimateFingerKiss,
        Self::SensualShyTouch,
        Self::AffectionateNuzzle,
        Self::MischievousEarStroke,
        Self::TicklishPlay,
        Self::CuteBoop,
        Self::PlayfulHairTugging,
        Self::GentlePat,
        Self::AttentionSeeking,
        Self::PlayfulTeaseOuch,
        Self::PlayfulAnnoyance,
        Self::PhysicalTouch,
    ];

    /// The wire key (`"cute_boop"`, ...).
    pub const fn key(self) -> &'static str {
        match self {
            Self::IntimateFingerKiss => "intimate_finger_kiss",
            Self::SensualShyTouch => "sensual_shy_touch",
            Self::AffectionateNuzzle => "affectionate_nuzzle",
            Self::MischievousEarStroke => "mischievous_ear_stroke",
            Self::TicklishPlay => "ticklish_play",
            Self::CuteBoop => "cute_boop",
            Self::PlayfulHairTugging => "playful_hair_tugging",
            Self::GentlePat => "gentle_pat",
            Self::AttentionSeeking => "attention_seeking",
            Self::PlayfulTeaseOuch => "playful_tease_ouch",
            Self::PlayfulAnnoyance => "playful_annoyance",
            Self::PhysicalTouch => "physical_touch",
        }
    }

    /// Look up a meaning by its wire key. Exact match only.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|meaning| meaning.key() == key)
    }
}

/// Classify a touch from the reported body part and gesture.
///
/// Matching ignores case, spaces, dashes and underscores, so `"Long Press"`,
/// `"long_press"` and `"longpress"` are the same gesture.
pub fn classify(part: Option<&str>, gesture: Option<&str>) -> EmotionalMeaning {
    let (Some(part), Some(gesture)) = (part, gesture) else {
        return EmotionalMeaning::PhysicalTouch;
    };

    match (normalize(part).as_str(), normalize(gesture).as_str()) {
        ("cheeks" | "cheek", "slide") => EmotionalMeaning::AffectionateNuzzle,
        ("cheeks" | "cheek", "pinch") => EmotionalMeaning::PlayfulTeaseOuch,
        ("shoulders" | "shoulder", "tap") => EmotionalMeaning::AttentionSeeking,
        ("mouth", "tap") => EmotionalMeaning::IntimateFingerKiss,
        ("ears" | "ear", "slide") => EmotionalMeaning::MischievousEarStroke,
        ("ears" | "ear", "tap") => EmotionalMeaning::TicklishPlay,
        ("nose", "tap") => EmotionalMeaning::CuteBoop,
        ("nose", "longpress") => EmotionalMeaning::PlayfulAnnoyance,
        ("neck", "slide") => EmotionalMeaning::SensualShyTouch,
        ("hair", "pull") => EmotionalMeaning::PlayfulHairTugging,
        ("hair", "tap") => EmotionalMeaning::GentlePat,
        _ => EmotionalMeaning::PhysicalTouch,
    }
}

/// Human label for an intensity level, for log lines.
pub fn intensity_label(intensity: Option<&Intensity>) -> &'static str {
    match intensity.and_then(Intensity::level) {
        Some(Intensity::INTENSE) => "intense",
        Some(Intensity::MODERATE) => "moderate",
        Some(Intensity::GENTLE) => "gentle",
        _ => "unspecified",
    }
}

fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}
