//! Gym machine usage guides and text recognition.

/// A gym machine with step-by-step usage notes.
///
/// Not every machine carries every field; absent notes are skipped when the
/// guide is rendered.
#[derive(Clone, Copy, Debug)]
pub struct Equipment {
    /// Stable key used by the recognition map.
    pub key: &'static str,
    /// English display name.
    pub name: &'static str,
    /// Arabic display name.
    pub name_ar: &'static str,
    /// Seat setup note.
    pub seat_adjustment: Option<&'static str>,
    /// Handle setup note.
    pub handle_height: Option<&'static str>,
    /// Foot position note.
    pub foot_placement: Option<&'static str>,
    /// Grip note.
    pub grip: Option<&'static str>,
    /// Movement range note.
    pub range_of_motion: Option<&'static str>,
    /// Breathing pattern note.
    pub breathing: Option<&'static str>,
    /// Safety note.
    pub safety: Option<&'static str>,
    /// Common mistakes note.
    pub common_mistakes: Option<&'static str>,
    /// Starting weight suggestion.
    pub beginner_weight: Option<&'static str>,
}

impl Equipment {
    /// Display name in the reply language.
    #[must_use]
    pub const fn localized_name(&self, english: bool) -> &'static str {
        if english { self.name } else { self.name_ar }
    }
}

/// All recognized machines.
pub const GYM_EQUIPMENT: &[Equipment] = &[
    Equipment {
        key: "leg_press",
        name: "Leg Press Machine",
        name_ar: "جهاز ضغط الأرجل",
        seat_adjustment: Some("Adjust seat so knees align with pivot point"),
        handle_height: None,
        foot_placement: Some("Place feet shoulder-width apart on platform"),
        grip: None,
        range_of_motion: Some("Lower until knees form 90-degree angle"),
        breathing: Some("Exhale on push, inhale on return"),
        safety: Some("Never lock knees at top"),
        common_mistakes: Some("Going too deep, locking knees"),
        beginner_weight: Some("Start with body weight or light resistance"),
    },
    Equipment {
        key: "chest_press",
        name: "Chest Press Machine",
        name_ar: "جهاز ضغط الصدر",
        seat_adjustment: Some("Adjust so handles align with chest"),
        handle_height: Some("Handles at mid-chest level"),
        foot_placement: None,
        grip: None,
        range_of_motion: Some("Push forward until arms almost straight"),
        breathing: Some("Exhale on push, inhale on return"),
        safety: Some("Keep back flat against pad"),
        common_mistakes: Some("Arching back, going too fast"),
        beginner_weight: Some("Start with 50% of body weight"),
    },
    Equipment {
        key: "cable_machine",
        name: "Cable Machine",
        name_ar: "جهاز الكيبل",
        seat_adjustment: None,
        handle_height: Some("Adjust pulley to target muscle height"),
        foot_placement: Some("Staggered stance for stability"),
        grip: None,
        range_of_motion: Some("Full range, controlled movement"),
        breathing: Some("Exhale on pull, inhale on return"),
        safety: Some("Check cable condition before use"),
        common_mistakes: Some("Using momentum, improper form"),
        beginner_weight: Some("Start with 10-15 lbs"),
    },
    Equipment {
        key: "lat_pulldown",
        name: "Lat Pulldown Machine",
        name_ar: "جهاز سحب العضلات",
        seat_adjustment: Some("Knees should fit under pads"),
        handle_height: Some("Reach up to grab bar"),
        foot_placement: None,
        grip: None,
        range_of_motion: Some("Pull to chest level"),
        breathing: Some("Exhale on pull, inhale on return"),
        safety: Some("Keep core engaged"),
        common_mistakes: Some("Pulling behind neck, using momentum"),
        beginner_weight: Some("Start with 30-40% of body weight"),
    },
    Equipment {
        key: "treadmill",
        name: "Treadmill",
        name_ar: "جهاز المشي",
        seat_adjustment: None,
        handle_height: None,
        foot_placement: Some("Land on mid-foot"),
        grip: None,
        range_of_motion: None,
        breathing: Some("Steady breathing pattern"),
        safety: Some("Start slow, use safety clip"),
        common_mistakes: Some("Holding handrails, overstriding"),
        beginner_weight: Some("Start with 3-4 km/h walking"),
    },
    Equipment {
        key: "rowing_machine",
        name: "Rowing Machine",
        name_ar: "جهاز التجديف",
        seat_adjustment: Some("Feet should reach footrests comfortably"),
        handle_height: None,
        foot_placement: Some("Straps over mid-foot"),
        grip: None,
        range_of_motion: Some("Full extension and contraction"),
        breathing: Some("Exhale on pull, inhale on return"),
        safety: Some("Keep back straight"),
        common_mistakes: Some("Bending back, pulling too hard"),
        beginner_weight: Some("Start with low resistance"),
    },
    Equipment {
        key: "smith_machine",
        name: "Smith Machine",
        name_ar: "جهاز سميث",
        seat_adjustment: None,
        handle_height: None,
        foot_placement: Some("Feet shoulder-width apart"),
        grip: None,
        range_of_motion: Some("Full range, controlled"),
        breathing: Some("Exhale on push/lift, inhale on return"),
        safety: Some("Always use safety catches"),
        common_mistakes: Some("Not using safety, improper form"),
        beginner_weight: Some("Start with empty bar or light weight"),
    },
    Equipment {
        key: "shoulder_press",
        name: "Shoulder Press Machine",
        name_ar: "جهاز ضغط الكتف",
        seat_adjustment: Some("Back fully supported"),
        handle_height: Some("Handles at shoulder level"),
        foot_placement: None,
        grip: None,
        range_of_motion: Some("Press up until arms almost straight"),
        breathing: Some("Exhale on press, inhale on return"),
        safety: Some("Keep core engaged"),
        common_mistakes: Some("Arching back, going too heavy"),
        beginner_weight: Some("Start with 20-30% of body weight"),
    },
    Equipment {
        key: "hip_abductor",
        name: "Hip Abductor/Adductor Machine",
        name_ar: "جهاز عضلات الفخذ",
        seat_adjustment: Some("Back fully supported"),
        handle_height: None,
        foot_placement: None,
        grip: None,
        range_of_motion: Some("Controlled outward/inward movement"),
        breathing: Some("Exhale on push, inhale on return"),
        safety: Some("Keep core engaged"),
        common_mistakes: Some("Using momentum, going too fast"),
        beginner_weight: Some("Start with light resistance"),
    },
    Equipment {
        key: "stair_climber",
        name: "Stair Climber",
        name_ar: "جهاز صعود الدرج",
        seat_adjustment: None,
        handle_height: None,
        foot_placement: Some("Full foot on step"),
        grip: None,
        range_of_motion: None,
        breathing: Some("Steady breathing"),
        safety: Some("Hold handrails lightly"),
        common_mistakes: Some("Leaning on rails, skipping steps"),
        beginner_weight: Some("Start with slow pace"),
    },
    Equipment {
        key: "barbell",
        name: "Barbell",
        name_ar: "البار",
        seat_adjustment: None,
        handle_height: None,
        foot_placement: None,
        grip: Some("Overhand or mixed grip depending on exercise"),
        range_of_motion: None,
        breathing: Some("Exhale on lift, inhale on return"),
        safety: Some("Always use collars, proper form"),
        common_mistakes: Some("Too heavy, improper form"),
        beginner_weight: Some("Start with empty bar (20kg)"),
    },
    Equipment {
        key: "dumbbell",
        name: "Dumbbells",
        name_ar: "الأثقال",
        seat_adjustment: None,
        handle_height: None,
        foot_placement: None,
        grip: Some("Firm but not too tight"),
        range_of_motion: None,
        breathing: Some("Exhale on lift, inhale on return"),
        safety: Some("Check weight before lifting"),
        common_mistakes: Some("Swinging, using momentum"),
        beginner_weight: Some("Start with 2-5 kg per hand"),
    },
];

/// Keyword-to-machine map, checked in order against the lowercased message.
const RECOGNITION_MAP: &[(&str, &str)] = &[
    ("leg press", "leg_press"),
    ("ضغط الأرجل", "leg_press"),
    ("chest press", "chest_press"),
    ("ضغط الصدر", "chest_press"),
    ("cable", "cable_machine"),
    ("كيبل", "cable_machine"),
    ("lat pulldown", "lat_pulldown"),
    ("سحب", "lat_pulldown"),
    ("treadmill", "treadmill"),
    ("مشي", "treadmill"),
    ("rowing", "rowing_machine"),
    ("تجديف", "rowing_machine"),
    ("smith", "smith_machine"),
    ("shoulder press", "shoulder_press"),
    ("ضغط الكتف", "shoulder_press"),
    ("hip abductor", "hip_abductor"),
    ("stair climber", "stair_climber"),
    ("صعود الدرج", "stair_climber"),
    ("barbell", "barbell"),
    ("البار", "barbell"),
    ("dumbbell", "dumbbell"),
    ("أثقال", "dumbbell"),
];

/// Recognize which machine a lowercased message is about.
#[must_use]
pub fn recognize_equipment(lowered: &str) -> Option<&'static Equipment> {
    let key = RECOGNITION_MAP
        .iter()
        .find(|(keyword, _)| lowered.contains(keyword))
        .map(|(_, key)| *key)?;
    GYM_EQUIPMENT.iter().find(|eq| eq.key == key)
}
