//! Adaptive training for users with physical challenges.

use std::fmt::Write as _;

use rand::rngs::StdRng;
use regex::Regex;

use crate::catalog::exercises::{
    BALANCE_FRIENDLY_EXERCISES, JOINT_FRIENDLY_EXERCISES, WHEELCHAIR_EXERCISES,
};
use crate::catalog::images::{self, ExerciseImage};
use crate::catalog::messages::{
    render_message, DISABILITY_SUPPORT_MESSAGES, DISABILITY_SUPPORT_MESSAGES_EN,
};
use crate::catalog::videos::AdaptiveCategory;
use crate::engine::metrics::BodyMetrics;
use crate::engine::profile::UserProfile;
use crate::engine::selector::pick_unseen;
use crate::engine::state::DisabilityInfo;
use crate::modes::or_na;

const MOBILITY_KEYWORDS: &[&str] = &[
    "mobility",
    "movement",
    "تحرك",
    "حركة",
    "مشكلة في الحركة",
    "can't move",
    "ما أقدر أتحرك",
    "صعوبة في الحركة",
];

const STANDING_KEYWORDS: &[&str] = &[
    "can't stand",
    "difficulty standing",
    "ما أقدر أقف",
    "صعوبة في الوقوف",
    "standing problem",
    "مشكلة في الوقوف",
    "unable to stand",
];

const WHEELCHAIR_KEYWORDS: &[&str] = &[
    "wheelchair",
    "كرسي متحرك",
    "على كرسي",
    "in wheelchair",
    "wheelchair user",
    "مستخدم كرسي",
    "on wheelchair",
];

const JOINT_KEYWORDS: &[&str] = &[
    "joint pain",
    "knee pain",
    "hip pain",
    "ألم في المفاصل",
    "مفاصل",
    "ركبة",
    "ورك",
    "joint problem",
    "مشكلة في المفاصل",
];

const SPINE_KEYWORDS: &[&str] = &[
    "back pain",
    "spine",
    "spinal",
    "ألم في الظهر",
    "ظهر",
    "back problem",
    "مشكلة في الظهر",
    "spine issue",
];

const BALANCE_KEYWORDS: &[&str] = &[
    "balance",
    "dizziness",
    "unsteady",
    "توازن",
    "دوخة",
    "balance problem",
    "مشكلة في التوازن",
    "falling",
];

const STRUGGLE_KEYWORDS: &[&str] = &[
    "can't do",
    "too hard",
    "difficult",
    "pain",
    "hurt",
    "ما أقدر",
    "صعب",
    "ألم",
    "يوجع",
    "مؤلم",
    "struggling",
    "too difficult",
    "very hard",
    "impossible",
];

const CHRONIC_STOP_WORDS: &[&str] = &["a", "an", "the", "some", "this", "that"];

fn any_keyword(lowered: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| lowered.contains(kw))
}

/// Compiled chronic-condition capture patterns.
pub struct DisabilityExtractor {
    chronic_patterns: Vec<Regex>,
}

impl DisabilityExtractor {
    /// Compile the pattern set.
    ///
    /// # Errors
    /// Returns an error if a pattern fails to compile.
    pub fn new() -> Result<Self, regex::Error> {
        let sources = [
            r"have ([a-z\s]+)",
            r"عندي ([؀-ۿ\s]+)",
            r"diagnosed with ([a-z\s]+)",
        ];
        let chronic_patterns = sources
            .iter()
            .map(|src| Regex::new(src))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { chronic_patterns })
    }

    /// Detect physical challenge flags and chronic conditions in a
    /// lowercased message.
    #[must_use]
    pub fn extract(&self, lowered: &str) -> DisabilityInfo {
        let mut info = DisabilityInfo::default();

        info.mobility_challenges = any_keyword(lowered, MOBILITY_KEYWORDS);
        info.difficulty_standing = any_keyword(lowered, STANDING_KEYWORDS);
        info.wheelchair_use = any_keyword(lowered, WHEELCHAIR_KEYWORDS);
        info.joint_pain = any_keyword(lowered, JOINT_KEYWORDS);
        info.spine_issues = any_keyword(lowered, SPINE_KEYWORDS);
        info.balance_issues = any_keyword(lowered, BALANCE_KEYWORDS);

        for pattern in &self.chronic_patterns {
            let Some(caps) = pattern.captures(lowered) else {
                continue;
            };
            if let Some(m) = caps.get(1) {
                let condition = m.as_str().trim();
                if !condition.is_empty() && !CHRONIC_STOP_WORDS.contains(&condition) {
                    info.chronic_conditions.push(condition.to_string());
                }
            }
        }

        info
    }
}

/// Merge a turn's detected challenges into the stored info. Flags never
/// clear; chronic conditions accumulate without exact duplicates.
pub fn merge_disability_info(stored: &mut DisabilityInfo, detected: &DisabilityInfo) {
    stored.mobility_challenges |= detected.mobility_challenges;
    stored.difficulty_standing |= detected.difficulty_standing;
    stored.wheelchair_use |= detected.wheelchair_use;
    stored.joint_pain |= detected.joint_pain;
    stored.spine_issues |= detected.spine_issues;
    stored.balance_issues |= detected.balance_issues;
    for condition in &detected.chronic_conditions {
        if !stored.chronic_conditions.contains(condition) {
            stored.chronic_conditions.push(condition.clone());
        }
    }
}

/// Whether to ask the user once about physical limitations.
///
/// Fires only when nothing is known yet, the question has not been asked
/// before, and the message signals struggle or pain.
#[must_use]
pub fn should_ask_about_disability(info: &DisabilityInfo, lowered: &str) -> bool {
    if info.disability_asked || info.has_special_needs() {
        return false;
    }
    any_keyword(lowered, STRUGGLE_KEYWORDS)
}

/// Pick a non-repeating reassurance message, filled with the user's name.
pub fn pick_support_message(
    used: &mut Vec<String>,
    name: &str,
    english: bool,
    rng: &mut StdRng,
) -> Option<String> {
    let pool = if english {
        DISABILITY_SUPPORT_MESSAGES_EN
    } else {
        DISABILITY_SUPPORT_MESSAGES
    };
    let template = pick_unseen(pool, used, |m| *m, |_| true, rng)?;
    Some(render_message(template, name))
}

/// Safe exercise list for the recorded challenges, duplicates removed.
#[must_use]
pub fn disability_friendly_exercises(info: &DisabilityInfo) -> Vec<&'static str> {
    let mut exercises: Vec<&'static str> = Vec::new();

    if info.wheelchair_use || info.difficulty_standing {
        exercises.extend_from_slice(WHEELCHAIR_EXERCISES);
    }
    if info.joint_pain {
        exercises.extend_from_slice(JOINT_FRIENDLY_EXERCISES);
    }
    if info.balance_issues {
        exercises.extend_from_slice(BALANCE_FRIENDLY_EXERCISES);
    }
    if info.mobility_challenges && exercises.is_empty() {
        exercises.extend_from_slice(JOINT_FRIENDLY_EXERCISES);
    }

    let mut deduped = Vec::with_capacity(exercises.len());
    for exercise in exercises {
        if !deduped.contains(&exercise) {
            deduped.push(exercise);
        }
    }
    deduped
}

/// Movement patterns to keep out of any generated plan.
#[must_use]
pub fn dangerous_exercises_to_avoid(info: &DisabilityInfo) -> Vec<&'static str> {
    let mut avoid: Vec<&'static str> = Vec::new();

    if info.mobility_challenges || info.joint_pain {
        avoid.extend_from_slice(&["jumping", "jump", "high impact", "plyometric", "burpees"]);
    }
    if info.joint_pain {
        avoid.extend_from_slice(&["deep squat", "full squat", "deep lunge"]);
    }
    if info.balance_issues {
        avoid.extend_from_slice(&["fast tempo", "quick movements", "rapid"]);
    }
    if info.spine_issues {
        avoid.extend_from_slice(&["twisting", "rotation", "spinal twist", "twist"]);
    }
    if info.balance_issues {
        avoid.extend_from_slice(&["single leg", "one leg", "unilateral"]);
    }

    avoid
}

/// Video category matching the recorded challenges.
#[must_use]
pub fn adaptive_video_category(info: &DisabilityInfo) -> AdaptiveCategory {
    if info.wheelchair_use || info.difficulty_standing {
        AdaptiveCategory::Wheelchair
    } else if info.joint_pain {
        AdaptiveCategory::Joint
    } else if info.balance_issues {
        AdaptiveCategory::Balance
    } else {
        AdaptiveCategory::General
    }
}

/// Exercise image matching the recorded challenges.
#[must_use]
pub fn adaptive_exercise_image(info: &DisabilityInfo) -> &'static ExerciseImage {
    if info.wheelchair_use || info.difficulty_standing {
        &images::SEATED_ARM_RAISE
    } else if info.joint_pain {
        &images::WALL_SQUAT
    } else if info.balance_issues {
        &images::CHAIR_BALANCE
    } else {
        &images::GENTLE_STRETCH
    }
}

/// Build the disability-adaptive plan context.
#[must_use]
pub fn build_adaptive_context(
    info: &DisabilityInfo,
    profile: &UserProfile,
    metrics: &BodyMetrics,
) -> String {
    let exercises = disability_friendly_exercises(info);
    let avoid = dangerous_exercises_to_avoid(info);

    let mut ctx = String::from("ADAPTIVE TRAINING SYSTEM - DISABILITY-FRIENDLY PLAN NEEDED:\n\n");
    ctx.push_str("User has special physical needs. Generate a workout plan that:\n");

    if !exercises.is_empty() {
        let _ = writeln!(ctx, "- ONLY use these safe exercises: {}", exercises.join(", "));
    }
    if !avoid.is_empty() {
        let _ = writeln!(
            ctx,
            "- NEVER include these dangerous exercises: {}",
            avoid.join(", ")
        );
    }

    ctx.push_str("- Focus on consistency, effort, and safe performance\n");
    ctx.push_str("- No pressure or comparison to typical users\n");
    ctx.push_str("- Progress based on safe performance, not intensity\n");

    if info.mobility_challenges || !info.chronic_conditions.is_empty() {
        ctx.push_str("\nNUTRITION ADAPTATION:\n");
        ctx.push_str("- Adjust calories based on reduced activity level\n");
        ctx.push_str("- Maintain adequate protein for muscle maintenance\n");
        ctx.push_str("- Consider meal timing for energy management\n");
        ctx.push_str("- Ensure proper hydration\n");
    }

    ctx.push_str("\nUser Profile:\n");
    let _ = writeln!(ctx, "- Age: {}", or_na(profile.age));
    let _ = writeln!(ctx, "- Goal: {}", or_na(profile.goal.as_deref()));
    let _ = writeln!(ctx, "- TDEE: {} kcal", or_na(metrics.tdee));

    ctx.push_str(
        "\nTone: Warm, respectful, empowering, no pity. Use Saudi casual dialect for Arabic \
         or clean English for English.",
    );

    ctx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ids::UserId;
    use rand::SeedableRng;

    fn extractor() -> DisabilityExtractor {
        DisabilityExtractor::new().unwrap()
    }

    #[test]
    fn detects_challenge_flags() {
        let info = extractor().extract("i'm a wheelchair user with knee pain");
        assert!(info.wheelchair_use);
        assert!(info.joint_pain);
        assert!(!info.balance_issues);

        let info = extractor().extract("عندي دوخة ومشكلة في التوازن");
        assert!(info.balance_issues);
    }

    #[test]
    fn chronic_conditions_are_captured_and_filtered() {
        let info = extractor().extract("i have arthritis and it hurts");
        assert!(info
            .chronic_conditions
            .iter()
            .any(|c| c.contains("arthritis")));

        let info = extractor().extract("i have a");
        assert!(info.chronic_conditions.is_empty());
    }

    #[test]
    fn ask_once_only_on_struggle_without_known_flags() {
        let mut info = DisabilityInfo::default();
        assert!(should_ask_about_disability(&info, "this is too hard for me"));
        assert!(!should_ask_about_disability(&info, "great workout today"));

        info.disability_asked = true;
        assert!(!should_ask_about_disability(&info, "this is too hard for me"));

        let mut info = DisabilityInfo::default();
        info.joint_pain = true;
        assert!(!should_ask_about_disability(&info, "this is too hard"));
    }

    #[test]
    fn exercise_lists_follow_flags() {
        let mut info = DisabilityInfo::default();
        info.wheelchair_use = true;
        info.joint_pain = true;
        let exercises = disability_friendly_exercises(&info);
        assert!(exercises.contains(&WHEELCHAIR_EXERCISES[0]));
        assert!(exercises.contains(&JOINT_FRIENDLY_EXERCISES[0]));

        let avoid = dangerous_exercises_to_avoid(&info);
        assert!(avoid.contains(&"jumping"));
        assert!(avoid.contains(&"deep squat"));

        let mut mobility_only = DisabilityInfo::default();
        mobility_only.mobility_challenges = true;
        assert_eq!(
            disability_friendly_exercises(&mobility_only),
            JOINT_FRIENDLY_EXERCISES.to_vec()
        );
    }

    #[test]
    fn adaptive_picks_follow_priority() {
        let mut info = DisabilityInfo::default();
        info.balance_issues = true;
        info.wheelchair_use = true;
        assert_eq!(adaptive_video_category(&info), AdaptiveCategory::Wheelchair);
        assert_eq!(adaptive_exercise_image(&info).name, images::SEATED_ARM_RAISE.name);

        let none = DisabilityInfo::default();
        assert_eq!(adaptive_video_category(&none), AdaptiveCategory::General);
        assert_eq!(adaptive_exercise_image(&none).name, images::GENTLE_STRETCH.name);
    }

    #[test]
    fn support_messages_do_not_repeat_until_exhausted() {
        let mut used = Vec::new();
        let mut rng = rand::rngs::StdRng::seed_from_u64(11);
        let mut seen = Vec::new();
        for _ in 0..DISABILITY_SUPPORT_MESSAGES_EN.len() {
            let msg = pick_support_message(&mut used, "Sara", true, &mut rng).unwrap();
            assert!(!seen.contains(&msg));
            seen.push(msg);
        }
    }

    #[test]
    fn adaptive_context_lists_rules() {
        let mut info = DisabilityInfo::default();
        info.joint_pain = true;
        info.chronic_conditions.push("arthritis".to_string());

        let profile = UserProfile::new(UserId::new());
        let ctx = build_adaptive_context(&info, &profile, &BodyMetrics::default());
        assert!(ctx.contains("ONLY use these safe exercises"));
        assert!(ctx.contains("NEVER include these dangerous exercises"));
        assert!(ctx.contains("NUTRITION ADAPTATION"));
    }
}
