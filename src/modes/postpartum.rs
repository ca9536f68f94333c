//! Postpartum coaching mode.

use std::fmt::Write as _;

use regex::Regex;

use crate::catalog::exercises::{
    POSTPARTUM_EXERCISES_PHASE_1, POSTPARTUM_EXERCISES_PHASE_2, POSTPARTUM_EXERCISES_PHASE_3,
    POSTPARTUM_EXERCISES_PHASE_4,
};
use crate::engine::metrics::BodyMetrics;
use crate::engine::profile::UserProfile;
use crate::engine::state::{DeliveryType, PostpartumMode};
use crate::modes::or_na;

const POSTPARTUM_KEYWORDS: &[&str] = &[
    "ولدت",
    "i gave birth",
    "gave birth",
    "أنا بعد الولادة",
    "after birth",
    "postpartum",
    "c-section",
    "قيصرية",
    "cesarean",
    "ولادة طبيعية",
    "natural birth",
    "natural delivery",
    "post delivery",
    "بعد الولادة",
];

/// True when the user mentions having given birth.
#[must_use]
pub fn detect_postpartum(lowered: &str) -> bool {
    POSTPARTUM_KEYWORDS.iter().any(|kw| lowered.contains(kw))
}

/// Per-message postpartum details.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PostpartumInfo {
    /// How the user delivered.
    pub delivery_type: Option<DeliveryType>,
    /// Weeks since delivery (months are converted to weeks).
    pub weeks_postpartum: Option<u32>,
    /// Days since delivery.
    pub days_postpartum: Option<u32>,
    /// Whether the user is breastfeeding.
    pub breastfeeding: Option<bool>,
}

impl PostpartumInfo {
    /// True when the message carried any time-since-birth figure.
    #[must_use]
    pub const fn has_timing(&self) -> bool {
        self.weeks_postpartum.is_some() || self.days_postpartum.is_some()
    }
}

enum TimeUnit {
    Weeks,
    Days,
    Months,
}

/// Compiled time-since-birth patterns.
pub struct PostpartumExtractor {
    time_patterns: Vec<(Regex, TimeUnit)>,
}

impl PostpartumExtractor {
    /// Compile the pattern set.
    ///
    /// # Errors
    /// Returns an error if a pattern fails to compile.
    pub fn new() -> Result<Self, regex::Error> {
        let sources = [
            (r"(\d+)\s*(?:week|أسبوع)", TimeUnit::Weeks),
            (r"(\d+)\s*(?:day|يوم)", TimeUnit::Days),
            (r"(\d+)\s*(?:month|شهر)", TimeUnit::Months),
            (r"الشهر\s*(\d+)", TimeUnit::Months),
            (r"الأسبوع\s*(\d+)", TimeUnit::Weeks),
        ];
        let mut time_patterns = Vec::with_capacity(sources.len());
        for (src, unit) in sources {
            time_patterns.push((Regex::new(src)?, unit));
        }
        Ok(Self { time_patterns })
    }

    /// Extract delivery details from a lowercased message.
    #[must_use]
    pub fn extract(&self, lowered: &str) -> PostpartumInfo {
        let mut info = PostpartumInfo::default();

        if lowered.contains("c-section")
            || lowered.contains("قيصرية")
            || lowered.contains("cesarean")
        {
            info.delivery_type = Some(DeliveryType::CSection);
        } else if lowered.contains("natural")
            || lowered.contains("طبيعية")
            || lowered.contains("ولادة طبيعية")
        {
            info.delivery_type = Some(DeliveryType::Natural);
        }

        for (pattern, unit) in &self.time_patterns {
            let Some(caps) = pattern.captures(lowered) else {
                continue;
            };
            let Some(num) = caps.get(1).and_then(|m| m.as_str().parse::<u32>().ok()) else {
                continue;
            };
            match unit {
                TimeUnit::Weeks => info.weeks_postpartum = Some(num),
                TimeUnit::Days => info.days_postpartum = Some(num),
                // Months are approximated to weeks.
                TimeUnit::Months => info.weeks_postpartum = Some(num * 4),
            }
            break;
        }

        if lowered.contains("ترضع")
            || lowered.contains("breastfeeding")
            || lowered.contains("breastfeed")
            || lowered.contains("nursing")
        {
            let negated = lowered.contains("ما")
                || lowered.contains("لا")
                || lowered.contains("not")
                || lowered.contains("no");
            info.breastfeeding = Some(!negated);
        }

        info
    }
}

/// Recovery phase 1 to 4 from time since birth and delivery type.
///
/// C-section recovery shifts every boundary later; phase 1 proper starts
/// only after the six-week medical clearance.
#[must_use]
pub fn calculate_postpartum_phase(
    weeks_postpartum: Option<u32>,
    days_postpartum: Option<u32>,
    delivery_type: Option<DeliveryType>,
) -> Option<u8> {
    let weeks = weeks_postpartum
        .map(f64::from)
        .or_else(|| days_postpartum.map(|d| f64::from(d) / 7.0))?;

    let phase = if delivery_type == Some(DeliveryType::CSection) {
        if weeks < 6.0 {
            1
        } else if weeks < 12.0 {
            2
        } else if weeks < 24.0 {
            3
        } else {
            4
        }
    } else if weeks < 6.0 {
        1
    } else if weeks < 12.0 {
        2
    } else if weeks < 24.0 {
        3
    } else {
        4
    };
    Some(phase)
}

/// Fold a turn's extraction into the stored mode.
///
/// Enabling requires both a delivery type and a time figure. Once active,
/// any freshly mentioned field overwrites the stored one and the phase is
/// recomputed whenever timing was restated.
pub fn apply_postpartum_info(mode: &mut PostpartumMode, detected: bool, info: &PostpartumInfo) {
    if detected && !mode.enabled && info.delivery_type.is_some() && info.has_timing() {
        mode.enabled = true;
        mode.delivery_type = info.delivery_type;
        mode.weeks_postpartum = info.weeks_postpartum;
        mode.days_postpartum = info.days_postpartum;
        mode.breastfeeding = info.breastfeeding;
        mode.phase =
            calculate_postpartum_phase(mode.weeks_postpartum, mode.days_postpartum, mode.delivery_type);
        return;
    }
    if !mode.enabled {
        return;
    }

    if info.delivery_type.is_some() {
        mode.delivery_type = info.delivery_type;
    }
    if info.weeks_postpartum.is_some() {
        mode.weeks_postpartum = info.weeks_postpartum;
    }
    if info.days_postpartum.is_some() {
        mode.days_postpartum = info.days_postpartum;
    }
    if info.breastfeeding.is_some() {
        mode.breastfeeding = info.breastfeeding;
    }
    if info.has_timing() {
        if let Some(phase) = calculate_postpartum_phase(
            mode.weeks_postpartum,
            mode.days_postpartum,
            mode.delivery_type,
        ) {
            mode.phase = Some(phase);
        }
    }
}

fn weeks_label(mode: &PostpartumMode) -> String {
    if let Some(weeks) = mode.weeks_postpartum {
        weeks.to_string()
    } else if let Some(days) = mode.days_postpartum {
        (f64::from(days) / 7.0).to_string()
    } else {
        "unknown".to_string()
    }
}

const fn delivery_label(delivery: Option<DeliveryType>) -> &'static str {
    match delivery {
        Some(DeliveryType::Natural) => "natural",
        Some(DeliveryType::CSection) => "c_section",
        None => "unknown",
    }
}

/// Build the postpartum coaching context. `None` until a phase is known.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn build_postpartum_context(
    mode: &PostpartumMode,
    profile: &UserProfile,
    metrics: &BodyMetrics,
) -> Option<String> {
    let phase = mode.phase?;

    let mut ctx = String::from("POSTPARTUM FITNESS MODE - SAFE POSTPARTUM COACHING:\n\n");
    let _ = writeln!(ctx, "User is {} weeks postpartum.", weeks_label(mode));
    let _ = writeln!(ctx, "Delivery type: {}", delivery_label(mode.delivery_type));
    let _ = writeln!(ctx, "Current phase: {phase}\n");

    ctx.push_str("CRITICAL SAFETY RULES - NEVER include:\n");
    ctx.push_str("- NO jumping\n");
    ctx.push_str("- NO abdominal pressure\n");
    ctx.push_str("- NO planks\n");
    ctx.push_str("- NO high intensity\n");
    ctx.push_str("- NO heavy weights\n");
    ctx.push_str("- NO strong stretching\n");
    ctx.push_str("- NO twisting (Twisting)\n");
    ctx.push_str("- NO deep bridges (dangerous for C-section)\n");

    if mode.delivery_type == Some(DeliveryType::CSection) {
        ctx.push_str("\nSPECIAL RULES FOR C-SECTION (CRITICAL):\n");
        ctx.push_str("- Strictly avoid any movement that:\n");
        ctx.push_str("  * يضغط على الجرح (presses on wound)\n");
        ctx.push_str("  * يسبب شد قوي في البطن (causes strong abdominal tension)\n");
        ctx.push_str("  * يضغط على منطقة الحوض (presses on pelvic area)\n");
        ctx.push_str("  * يسبب ألم في الجوانب (causes side pain)\n");
        ctx.push_str("- Phase 1 for C-section: Start ONLY after 6 weeks with doctor approval\n");
        ctx.push_str(
            "- Start with: Breathing only, Pelvic floor activation, Walking, Gentle mobility, \
             Seated exercises ONLY\n",
        );
        ctx.push_str("- Absolutely NO until 3+ months (and only if user confirms no pain):\n");
        ctx.push_str("  * Core exercises\n");
        ctx.push_str("  * Planks\n");
        ctx.push_str("  * Crunches\n");
        ctx.push_str("  * Full squats\n");
        ctx.push_str("  * Heavy weights\n");
        ctx.push_str("  * Any exercise that puts pressure on abdomen\n");
        ctx.push_str(
            "- Even after 3 months, ONLY proceed if user explicitly confirms no pain, no \
             bleeding, no discomfort\n",
        );
    }

    let _ = writeln!(ctx, "\nPOSTPARTUM-SAFE EXERCISES FOR PHASE {phase}:");
    let exercises = match phase {
        1 => {
            ctx.push_str("Phase 1 - Week 1-6 AFTER birth:\n");
            ctx.push_str("- Natural birth: Start after 2 weeks\n");
            ctx.push_str("- C-section: Start after 6 weeks with doctor approval ONLY\n");
            ctx.push_str(
                "- Focus ONLY on: Breathing exercises, Pelvic floor activation, Diaphragmatic \
                 breathing, Gentle walking, Light stretching, Lower-back mobility, Gentle hip \
                 openers\n",
            );
            POSTPARTUM_EXERCISES_PHASE_1
        }
        2 => {
            ctx.push_str("Phase 2 - Week 6-12:\n");
            ctx.push_str(
                "- Gentle low-impact workouts, Wall push-ups, Glute bridges (light only), \
                 Modified squats, Seated strength, NO core-heavy routines\n",
            );
            POSTPARTUM_EXERCISES_PHASE_2
        }
        3 => {
            ctx.push_str("Phase 3 - 3-6 months:\n");
            ctx.push_str(
                "- Light strength training, Resistance bands, Slow pace routines, Gradual \
                 reintroduction to core, Avoiding direct ab pressure\n",
            );
            POSTPARTUM_EXERCISES_PHASE_3
        }
        _ => {
            ctx.push_str("Phase 4 - 6+ months:\n");
            ctx.push_str(
                "- ONLY if user has: no pain, no bleeding, no pelvic pressure, no diastasis \
                 recti issues\n",
            );
            ctx.push_str(
                "- Can slowly introduce stronger routines - but ONLY with user confirmation of \
                 no symptoms\n",
            );
            POSTPARTUM_EXERCISES_PHASE_4
        }
    };
    let _ = writeln!(ctx, "- Safe exercises: {}", exercises.join(", "));

    ctx.push_str("\nPOSTPARTUM NUTRITION ADJUSTMENTS:\n");
    if mode.breastfeeding == Some(true) {
        ctx.push_str("- Increase calories by 300-450\n");
        ctx.push_str("- Increase hydration significantly\n");
        ctx.push_str("- Increase protein intake\n");
        ctx.push_str("- NO calorie deficit (maintenance or slight surplus)\n");
        ctx.push_str("- Give fast-prep meals (convenient for new mothers)\n");
        ctx.push_str(
            "- Avoid foods that affect milk production (caffeine, alcohol, certain herbs)\n",
        );
    } else {
        ctx.push_str("- Small calorie deficit allowed (if desired)\n");
        ctx.push_str("- Focus on recovery foods (protein, iron, vitamins)\n");
        ctx.push_str("- Ensure adequate nutrition for healing\n");
    }
    ctx.push_str("- Always check hunger level + energy before adjusting calories\n");
    ctx.push_str("- Monitor energy levels and adjust accordingly\n");

    ctx.push_str("\nWORKOUT PLAN FORMAT (REQUIRED):\n");
    ctx.push_str("ALWAYS present postpartum workouts in table structure:\n");
    ctx.push_str("Format: 'Postpartum Plan – Week X'\n");
    ctx.push_str("Table columns: Day | Duration | Focus | Exercises | Notes\n");
    ctx.push_str("Example:\n");
    ctx.push_str("Day | Duration | Focus | Exercises | Notes\n");
    ctx.push_str("Sat | 15 min | Breathing + walking | Belly breathing, pelvic floor | Very gentle\n");
    ctx.push_str("Sun | 10 min | Mobility | Hip openers, cat-cow | No pressure\n");
    ctx.push_str("Use this table format for ALL postpartum workout plans.\n");

    ctx.push_str("\nUser Profile:\n");
    let _ = writeln!(ctx, "- Age: {}", or_na(profile.age));
    let _ = writeln!(
        ctx,
        "- TDEE: {} kcal (adjust for postpartum and breastfeeding)",
        or_na(metrics.tdee)
    );

    ctx.push_str(
        "\nTone: Supportive, gentle, non-repetitive. Saudi casual dialect for Arabic, clean \
         English for English. Short messages unless user requests details.",
    );

    Some(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ids::UserId;

    fn extractor() -> PostpartumExtractor {
        PostpartumExtractor::new().unwrap()
    }

    #[test]
    fn extracts_delivery_type_and_timing() {
        let info = extractor().extract("i gave birth by c-section 8 weeks ago");
        assert_eq!(info.delivery_type, Some(DeliveryType::CSection));
        assert_eq!(info.weeks_postpartum, Some(8));

        let info = extractor().extract("ولدت ولادة طبيعية قبل 10 أيام");
        assert_eq!(info.delivery_type, Some(DeliveryType::Natural));
        assert_eq!(info.days_postpartum, Some(10));
    }

    #[test]
    fn months_approximate_to_weeks() {
        let info = extractor().extract("gave birth 3 months ago");
        assert_eq!(info.weeks_postpartum, Some(12));
    }

    #[test]
    fn breastfeeding_negation() {
        assert_eq!(
            extractor().extract("i am breastfeeding").breastfeeding,
            Some(true)
        );
        assert_eq!(
            extractor().extract("not breastfeeding anymore").breastfeeding,
            Some(false)
        );
        assert_eq!(extractor().extract("gave birth").breastfeeding, None);
    }

    #[test]
    fn phase_boundaries_differ_by_delivery() {
        let natural = Some(DeliveryType::Natural);
        let csection = Some(DeliveryType::CSection);
        assert_eq!(calculate_postpartum_phase(Some(1), None, natural), Some(1));
        assert_eq!(calculate_postpartum_phase(Some(8), None, natural), Some(2));
        assert_eq!(calculate_postpartum_phase(Some(8), None, csection), Some(2));
        assert_eq!(calculate_postpartum_phase(Some(5), None, csection), Some(1));
        assert_eq!(calculate_postpartum_phase(Some(30), None, natural), Some(4));
        assert_eq!(calculate_postpartum_phase(None, Some(21), natural), Some(1));
        assert_eq!(calculate_postpartum_phase(None, None, natural), None);
    }

    #[test]
    fn enabling_requires_delivery_and_timing() {
        let mut mode = PostpartumMode::default();
        let partial = extractor().extract("i had a c-section");
        apply_postpartum_info(&mut mode, true, &partial);
        assert!(!mode.enabled);

        let full = extractor().extract("c-section 8 weeks ago");
        apply_postpartum_info(&mut mode, true, &full);
        assert!(mode.enabled);
        assert_eq!(mode.phase, Some(2));
    }

    #[test]
    fn merge_updates_present_fields_and_recomputes_phase() {
        let mut mode = PostpartumMode::default();
        apply_postpartum_info(&mut mode, true, &extractor().extract("natural birth 3 weeks ago"));
        assert_eq!(mode.phase, Some(1));

        apply_postpartum_info(&mut mode, false, &extractor().extract("now 14 weeks postpartum"));
        assert_eq!(mode.weeks_postpartum, Some(14));
        assert_eq!(mode.phase, Some(3));
        assert_eq!(mode.delivery_type, Some(DeliveryType::Natural));
    }

    #[test]
    fn csection_context_adds_special_rules() {
        let mut mode = PostpartumMode::default();
        mode.enabled = true;
        mode.delivery_type = Some(DeliveryType::CSection);
        mode.weeks_postpartum = Some(8);
        mode.phase = Some(2);
        mode.breastfeeding = Some(true);

        let profile = UserProfile::new(UserId::new());
        let ctx = build_postpartum_context(&mode, &profile, &BodyMetrics::default()).unwrap();
        assert!(ctx.contains("SPECIAL RULES FOR C-SECTION"));
        assert!(ctx.contains("Increase calories by 300-450"));
        assert!(ctx.contains("Delivery type: c_section"));
        assert!(ctx.contains("Current phase: 2"));
    }
}
