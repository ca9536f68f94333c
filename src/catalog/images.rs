//! Exercise form images, standard and adaptive.

/// A form-demonstration image.
#[derive(Clone, Copy, Debug)]
pub struct ExerciseImage {
    /// Display name.
    pub name: &'static str,
    /// Image URL.
    pub url: &'static str,
    /// Short description.
    pub description: &'static str,
}

/// Keyword-to-image table for standard exercises. Arabic aliases map to the
/// same image as their English exercise.
pub const EXERCISE_IMAGES: &[(&str, ExerciseImage)] = &[
    (
        "squat",
        ExerciseImage {
            name: "Squat Form",
            url: "https://example.com/images/squat-form.jpg",
            description: "Proper squat form demonstration",
        },
    ),
    (
        "lunge",
        ExerciseImage {
            name: "Lunge Form",
            url: "https://example.com/images/lunge-form.jpg",
            description: "Proper lunge form demonstration",
        },
    ),
    (
        "plank",
        ExerciseImage {
            name: "Plank Form",
            url: "https://example.com/images/plank-form.jpg",
            description: "Proper plank form demonstration",
        },
    ),
    (
        "bridge",
        ExerciseImage {
            name: "Bridge Form",
            url: "https://example.com/images/bridge-form.jpg",
            description: "Proper bridge form demonstration",
        },
    ),
    (
        "pushup",
        ExerciseImage {
            name: "Push-up Form",
            url: "https://example.com/images/pushup-form.jpg",
            description: "Proper push-up form demonstration",
        },
    ),
    (
        "deadlift",
        ExerciseImage {
            name: "Deadlift Form",
            url: "https://example.com/images/deadlift-form.jpg",
            description: "Proper deadlift form demonstration",
        },
    ),
];

/// Arabic exercise aliases resolving to the English keys above.
pub const EXERCISE_ALIASES_AR: &[(&str, &str)] = &[
    ("قرفصاء", "squat"),
    ("لانج", "lunge"),
    ("بلانك", "plank"),
    ("جسر", "bridge"),
    ("ضغط", "pushup"),
    ("رفع", "deadlift"),
];

/// Adaptive form images keyed by need.
pub const SEATED_ARM_RAISE: ExerciseImage = ExerciseImage {
    name: "Seated Arm Raise",
    url: "https://example.com/images/seated-arm-raise.jpg",
    description: "Proper form for seated arm raises",
};

/// Seated core image for wheelchair routines.
pub const SEATED_CORE: ExerciseImage = ExerciseImage {
    name: "Seated Core Activation",
    url: "https://example.com/images/seated-core.jpg",
    description: "Seated core strengthening exercise",
};

/// Wall squat image for joint-friendly routines.
pub const WALL_SQUAT: ExerciseImage = ExerciseImage {
    name: "Wall-Assisted Squat",
    url: "https://example.com/images/wall-squat.jpg",
    description: "Safe squat form using wall support",
};

/// Chair balance image for balance routines.
pub const CHAIR_BALANCE: ExerciseImage = ExerciseImage {
    name: "Chair-Assisted Balance",
    url: "https://example.com/images/chair-balance.jpg",
    description: "Balance exercise with chair support",
};

/// Gentle stretch image for general mobility needs.
pub const GENTLE_STRETCH: ExerciseImage = ExerciseImage {
    name: "Gentle Stretching",
    url: "https://example.com/images/gentle-stretch.jpg",
    description: "Safe stretching for mobility issues",
};

/// Look up the standard image for a lowercased message, resolving Arabic
/// aliases first.
#[must_use]
pub fn find_exercise_image(lowered: &str) -> Option<(&'static str, &'static ExerciseImage)> {
    for (alias, key) in EXERCISE_ALIASES_AR {
        if lowered.contains(alias) {
            return EXERCISE_IMAGES
                .iter()
                .find(|(k, _)| k == key)
                .map(|(k, img)| (*k, img));
        }
    }
    EXERCISE_IMAGES
        .iter()
        .find(|(key, _)| lowered.contains(key))
        .map(|(key, img)| (*key, img))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_english_keyword() {
        let (key, img) = find_exercise_image("show me a squat").unwrap();
        assert_eq!(key, "squat");
        assert_eq!(img.name, "Squat Form");
    }

    #[test]
    fn arabic_alias_resolves_to_same_image() {
        let (key, _) = find_exercise_image("كيف أسوي قرفصاء").unwrap();
        assert_eq!(key, "squat");
    }

    #[test]
    fn unknown_exercise_has_no_image() {
        assert!(find_exercise_image("show me a burpee").is_none());
    }
}
