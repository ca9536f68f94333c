//! Pregnancy coaching mode.

use std::fmt::Write as _;

use regex::Regex;

use crate::catalog::exercises::{
    PREGNANCY_EXERCISES_TRIMESTER_1, PREGNANCY_EXERCISES_TRIMESTER_2,
    PREGNANCY_EXERCISES_TRIMESTER_3,
};
use crate::engine::metrics::BodyMetrics;
use crate::engine::profile::UserProfile;
use crate::engine::state::PregnancyMode;
use crate::modes::or_na;

const PREGNANCY_KEYWORDS: &[&str] = &[
    "أنا حامل",
    "i'm pregnant",
    "i am pregnant",
    "في بداية الحمل",
    "beginning of pregnancy",
    "أبغى تمارين للحامل",
    "pregnancy exercises",
    "pregnant",
    "حامل",
    "prenatal",
    "pregnancy",
];

/// True when the user mentions being pregnant.
#[must_use]
pub fn detect_pregnancy(lowered: &str) -> bool {
    PREGNANCY_KEYWORDS.iter().any(|kw| lowered.contains(kw))
}

/// Per-message pregnancy details.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PregnancyInfo {
    /// Trimester 1 to 3, derived from a mentioned month.
    pub trimester: Option<u8>,
    /// The user reported fatigue.
    pub fatigue: bool,
    /// The user reported pain.
    pub pain: bool,
}

/// Compiled trimester extraction patterns.
pub struct PregnancyExtractor {
    month_patterns: Vec<Regex>,
}

impl PregnancyExtractor {
    /// Compile the pattern set.
    ///
    /// # Errors
    /// Returns an error if a pattern fails to compile.
    pub fn new() -> Result<Self, regex::Error> {
        let sources = [
            r"الشهر (\d+)",
            r"month (\d+)",
            r"trimester (\d+)",
            r"الثلث (\d+)",
        ];
        let month_patterns = sources
            .iter()
            .map(|src| Regex::new(src))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { month_patterns })
    }

    /// Extract trimester and wellbeing notes from a lowercased message.
    ///
    /// Every numeric capture is read as a pregnancy month and bucketed into
    /// trimesters; months outside 1-9 are ignored.
    #[must_use]
    pub fn extract(&self, lowered: &str) -> PregnancyInfo {
        let mut info = PregnancyInfo::default();

        for pattern in &self.month_patterns {
            let Some(caps) = pattern.captures(lowered) else {
                continue;
            };
            let Some(month) = caps.get(1).and_then(|m| m.as_str().parse::<u8>().ok()) else {
                continue;
            };
            info.trimester = match month {
                1..=3 => Some(1),
                4..=6 => Some(2),
                7..=9 => Some(3),
                _ => None,
            };
            break;
        }

        if lowered.contains("تعب") || lowered.contains("tired") || lowered.contains("fatigue")
        {
            info.fatigue = true;
        }
        if lowered.contains("ألم") || lowered.contains("pain") {
            info.pain = true;
        }

        info
    }
}

/// Fold a turn's extraction into the stored mode.
///
/// The mode enables only once a trimester is known. Wellbeing notes
/// accumulate on every turn while the mode is active.
pub fn apply_pregnancy_info(mode: &mut PregnancyMode, detected: bool, info: &PregnancyInfo) {
    if detected && !mode.enabled && info.trimester.is_some() {
        mode.enabled = true;
    }
    if !mode.enabled {
        return;
    }

    if let Some(trimester) = info.trimester {
        mode.trimester = Some(trimester);
    }
    if info.fatigue {
        mode.pregnancy_notes.push("fatigue".to_string());
    }
    if info.pain {
        mode.pain_notes.push("general pain".to_string());
    }
}

/// Build the pregnancy coaching context. `None` until a trimester is known.
#[must_use]
pub fn build_pregnancy_context(
    mode: &PregnancyMode,
    profile: &UserProfile,
    metrics: &BodyMetrics,
) -> Option<String> {
    let trimester = mode.trimester?;

    let mut ctx = String::from("PREGNANCY FITNESS MODE - SAFE PREGNANCY COACHING:\n\n");
    let _ = writeln!(ctx, "User is in {trimester} trimester of pregnancy.\n");

    ctx.push_str("CRITICAL SAFETY RULES - NEVER include:\n");
    ctx.push_str("- NO jumping\n");
    ctx.push_str("- NO high intensity\n");
    if trimester >= 2 {
        ctx.push_str("- NO lying flat (after 1st trimester)\n");
    }
    ctx.push_str("- NO heavy weights\n");
    ctx.push_str("- NO twisting motions\n");
    ctx.push_str("- NO overheating\n");
    ctx.push_str("- NO holding breath\n");

    let exercises = match trimester {
        1 => PREGNANCY_EXERCISES_TRIMESTER_1,
        2 => PREGNANCY_EXERCISES_TRIMESTER_2,
        _ => PREGNANCY_EXERCISES_TRIMESTER_3,
    };
    let _ = writeln!(
        ctx,
        "\nPREGNANCY-SAFE EXERCISES FOR TRIMESTER {trimester}:"
    );
    let _ = writeln!(ctx, "- {}", exercises.join(", "));

    if trimester == 3 {
        ctx.push_str("\nLABOR PREPARATION EXERCISES:\n");
        ctx.push_str("- Cat-cow\n");
        ctx.push_str("- Hip circles\n");
        ctx.push_str("- Side-lying release\n");
        ctx.push_str("- Deep squats (supported)\n");
        ctx.push_str("- Pelvic tilts\n");
    }

    ctx.push_str("\nPREGNANCY NUTRITION ADJUSTMENTS:\n");
    ctx.push_str("- More protein\n");
    ctx.push_str("- More hydration\n");
    ctx.push_str("- ZERO calorie deficit\n");
    ctx.push_str("- Avoid unsafe foods\n");
    ctx.push_str("- Suggest light meals for nausea\n");

    ctx.push_str("\nUser Profile:\n");
    let _ = writeln!(ctx, "- Age: {}", or_na(profile.age));
    let _ = writeln!(
        ctx,
        "- TDEE: {} kcal (adjust for pregnancy)",
        or_na(metrics.tdee)
    );

    ctx.push_str(
        "\nTone: Very gentle, respectful, clear. Saudi casual dialect for Arabic, clean \
         English for English. Short replies unless user asks for a full plan.",
    );

    Some(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ids::UserId;

    fn extractor() -> PregnancyExtractor {
        PregnancyExtractor::new().unwrap()
    }

    #[test]
    fn detects_arabic_and_english_mentions() {
        assert!(detect_pregnancy("أنا حامل وأبغى تمارين"));
        assert!(detect_pregnancy("i'm pregnant, what can i do"));
        assert!(!detect_pregnancy("normal workout please"));
    }

    #[test]
    fn month_mentions_bucket_into_trimesters() {
        assert_eq!(extractor().extract("أنا في الشهر 2").trimester, Some(1));
        assert_eq!(extractor().extract("month 5 of pregnancy").trimester, Some(2));
        assert_eq!(extractor().extract("i'm in month 8").trimester, Some(3));
        assert_eq!(extractor().extract("month 11").trimester, None);
    }

    #[test]
    fn mode_enables_only_with_trimester() {
        let mut mode = PregnancyMode::default();
        apply_pregnancy_info(&mut mode, true, &PregnancyInfo::default());
        assert!(!mode.enabled);

        let info = extractor().extract("i'm pregnant, month 5, so tired");
        apply_pregnancy_info(&mut mode, true, &info);
        assert!(mode.enabled);
        assert_eq!(mode.trimester, Some(2));
        assert_eq!(mode.pregnancy_notes, vec!["fatigue"]);
    }

    #[test]
    fn context_adds_trimester_specific_rules() {
        let mut mode = PregnancyMode::default();
        mode.enabled = true;
        mode.trimester = Some(3);
        let profile = UserProfile::new(UserId::new());
        let ctx = build_pregnancy_context(&mode, &profile, &BodyMetrics::default()).unwrap();

        assert!(ctx.contains("NO lying flat"));
        assert!(ctx.contains("LABOR PREPARATION EXERCISES"));
        assert!(ctx.contains("Age: N/A"));

        mode.trimester = Some(1);
        let ctx = build_pregnancy_context(&mode, &profile, &BodyMetrics::default()).unwrap();
        assert!(!ctx.contains("NO lying flat"));
        assert!(ctx.contains("Light walking"));
    }

    #[test]
    fn context_requires_trimester() {
        let mode = PregnancyMode::default();
        let profile = UserProfile::new(UserId::new());
        assert!(build_pregnancy_context(&mode, &profile, &BodyMetrics::default()).is_none());
    }
}
