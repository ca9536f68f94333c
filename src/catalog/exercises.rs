//! Safe and forbidden exercise lists per coaching mode.

/// Trimester 1 pregnancy-safe exercises.
pub const PREGNANCY_EXERCISES_TRIMESTER_1: &[&str] = &[
    "Light walking",
    "Gentle strength training",
    "Breathing exercises",
    "Pelvic floor basics",
    "Gentle stretching",
];

/// Trimester 2 pregnancy-safe exercises.
pub const PREGNANCY_EXERCISES_TRIMESTER_2: &[&str] = &[
    "Standing exercises",
    "Seated strength training",
    "Hip-openers",
    "Back support workouts",
    "Modified yoga",
];

/// Trimester 3 pregnancy-safe exercises, including labor preparation.
pub const PREGNANCY_EXERCISES_TRIMESTER_3: &[&str] = &[
    "Deep breathing",
    "Pelvic floor release",
    "Hip mobility",
    "Labor-prep stretches",
    "Very soft cardio",
    "Cat-cow",
    "Hip circles",
    "Side-lying release",
    "Deep squats (supported)",
    "Pelvic tilts",
];

/// Postpartum phase 1 (weeks 1-6).
pub const POSTPARTUM_EXERCISES_PHASE_1: &[&str] = &[
    "Breathing exercises",
    "Pelvic floor activation",
    "Diaphragmatic breathing",
    "Gentle walking",
    "Light stretching",
    "Lower-back mobility",
    "Gentle hip openers",
];

/// Postpartum phase 2 (weeks 6-12).
pub const POSTPARTUM_EXERCISES_PHASE_2: &[&str] = &[
    "Gentle low-impact workouts",
    "Wall push-ups",
    "Glute bridges (light only)",
    "Modified squats",
    "Seated strength",
    "No core-heavy routines",
];

/// Postpartum phase 3 (months 3-6).
pub const POSTPARTUM_EXERCISES_PHASE_3: &[&str] = &[
    "Light strength training",
    "Resistance bands",
    "Slow pace routines",
    "Gradual reintroduction to core",
    "Avoiding direct ab pressure",
];

/// Postpartum phase 4 (6+ months).
pub const POSTPARTUM_EXERCISES_PHASE_4: &[&str] = &[
    "Gradual strength training",
    "Moderate intensity (if no pain)",
    "Core exercises (if no diastasis)",
    "Full range of motion",
];

/// Exercises that are never allowed while diastasis recti is present.
pub const DIASTASIS_FORBIDDEN_EXERCISES: &[&str] = &[
    "Crunches",
    "Sit-ups",
    "Leg raises",
    "Planks",
    "Twisting",
    "Bicycle crunches",
    "Flutter kicks",
    "Heavy squats",
    "Deep core pressure",
    "Breath-holding",
    "Full planks",
    "Russian twists",
    "V-ups",
    "Toe touches",
];

/// Diastasis stage 1, early healing.
pub const DIASTASIS_EXERCISES_STAGE_1: &[&str] = &[
    "Belly breathing (diaphragmatic breathing)",
    "Pelvic floor activation",
    "TVA activation (Transverse Abdominis)",
    "Light mobility",
    "Walking",
    "No core load at all",
];

/// Diastasis stage 2, gentle core support.
pub const DIASTASIS_EXERCISES_STAGE_2: &[&str] = &[
    "Heel slides",
    "Toe taps",
    "Side-lying core",
    "Gentle bridges",
    "Seated controlled movements",
];

/// Diastasis stage 3, functional strength.
pub const DIASTASIS_EXERCISES_STAGE_3: &[&str] = &[
    "Standing core activation",
    "Resistance band light training",
    "Supported squats",
    "Modified bird-dog",
];

/// Diastasis stage 4, final strengthening.
pub const DIASTASIS_EXERCISES_STAGE_4: &[&str] = &[
    "Modified planks (knees)",
    "Light obliques",
    "Standing controlled core",
    "NEVER full planks or crunches unless doctor clearance",
];

/// Seated routines for wheelchair users or users who cannot stand.
pub const WHEELCHAIR_EXERCISES: &[&str] = &[
    "Seated cardio (arm circles, punches)",
    "Seated arm raises",
    "Seated resistance band workouts",
    "Upper body strength (seated)",
    "Seated core activation",
    "Seated stretching",
    "Shoulder mobility exercises",
    "Seated leg lifts (if possible)",
];

/// Low-impact routines for joint pain.
pub const JOINT_FRIENDLY_EXERCISES: &[&str] = &[
    "Low-impact cardio (walking, cycling)",
    "Modified squats with support",
    "Glute bridges",
    "Slow marches",
    "Wall-assisted exercises",
    "Seated leg extensions",
    "Gentle stretching",
    "Water exercises (if available)",
];

/// Supported routines for balance issues.
pub const BALANCE_FRIENDLY_EXERCISES: &[&str] = &[
    "Chair-assisted exercises",
    "Wall holds",
    "Slow tempo routines",
    "Seated balance exercises",
    "Standing with support",
    "Gentle yoga poses (with support)",
    "Tai chi movements",
];

/// Safe exercises for blind users (nothing requiring balance or jumping).
pub const ACCESSIBILITY_SAFE_EXERCISES: &[&str] = &[
    "Seated exercises only",
    "Stationary movements",
    "Step-by-step slow instructions",
    "Seated arm raises",
    "Seated leg lifts",
    "Seated core activation",
    "Seated stretching",
    "Resistance band exercises (seated)",
    "No balance workouts",
    "No jumping",
    "No lunges",
    "No single-leg training",
];

/// Preferred routines for deaf or hard-of-hearing users.
pub const DEAF_SAFE_EXERCISES: &[&str] = &[
    "Slow tempo exercises",
    "Repetitive motion",
    "Time-based sets with visual instructions",
    "Clear step-based routines",
    "No fast-paced routines",
    "No sudden transitions",
    "No audio countdowns",
    "No rhythm-dependent exercises",
];

/// Routines to avoid for deaf or hard-of-hearing users.
pub const DEAF_UNSAFE_EXERCISES: &[&str] = &[
    "Fast-paced routines depending on beats",
    "Sudden transitions",
    "Audio countdowns",
    "Rhythm-dependent exercises",
    "Music-synchronized workouts",
];
