//! Diastasis recti recovery mode.

use std::fmt::Write as _;

use regex::Regex;

use crate::catalog::exercises::{
    DIASTASIS_EXERCISES_STAGE_1, DIASTASIS_EXERCISES_STAGE_2, DIASTASIS_EXERCISES_STAGE_3,
    DIASTASIS_EXERCISES_STAGE_4, DIASTASIS_FORBIDDEN_EXERCISES,
};
use crate::engine::metrics::BodyMetrics;
use crate::engine::profile::UserProfile;
use crate::engine::state::DiastasisMode;
use crate::modes::or_na;

const DIASTASIS_KEYWORDS: &[&str] = &[
    "عندي انفصال عضلات البطن",
    "diastasis",
    "انفصال",
    "بطني نافخ بعد الولادة",
    "i have ab separation",
    "abdominal separation",
    "انفصال البطن",
    "انفصال عضلات",
];

/// True when the user mentions abdominal separation.
#[must_use]
pub fn detect_diastasis(lowered: &str) -> bool {
    DIASTASIS_KEYWORDS.iter().any(|kw| lowered.contains(kw))
}

/// Separation severity derived from the finger-width measurement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    /// Up to two fingers.
    Mild,
    /// Three or four fingers.
    Moderate,
    /// Five fingers or more.
    Severe,
}

impl Severity {
    /// Severity bucket for a finger count.
    #[must_use]
    pub const fn from_fingers(fingers: u32) -> Self {
        if fingers <= 2 {
            Self::Mild
        } else if fingers <= 4 {
            Self::Moderate
        } else {
            Self::Severe
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Mild => "mild",
            Self::Moderate => "moderate",
            Self::Severe => "severe",
        }
    }
}

/// Per-message diastasis details. Symptom flags describe the current turn
/// only and are not persisted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DiastasisInfo {
    /// Separation width in finger widths (cm mentions are read the same way).
    pub separation_fingers: Option<u32>,
    /// Weeks since delivery (months are converted to weeks).
    pub weeks_postpartum: Option<u32>,
    /// Days since delivery.
    pub days_postpartum: Option<u32>,
    /// Pain localized to the lower abdomen.
    pub lower_abdominal_pain: bool,
    /// Pressure in the pelvic area.
    pub pelvic_pressure: bool,
    /// Coning or bulging during exercise.
    pub coning_bulging: bool,
}

impl DiastasisInfo {
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

/// Compiled separation and timing patterns.
pub struct DiastasisExtractor {
    finger_patterns: Vec<Regex>,
    time_patterns: Vec<(Regex, TimeUnit)>,
}

impl DiastasisExtractor {
    /// Compile the pattern set.
    ///
    /// # Errors
    /// Returns an error if a pattern fails to compile.
    pub fn new() -> Result<Self, regex::Error> {
        let finger_sources = [r"(\d+)\s*(?:finger|إصبع|أصابع)", r"(\d+)\s*(?:cm|سم)"];
        let finger_patterns = finger_sources
            .iter()
            .map(|src| Regex::new(src))
            .collect::<Result<Vec<_>, _>>()?;

        let time_sources = [
            (r"(\d+)\s*(?:week|أسبوع)", TimeUnit::Weeks),
            (r"(\d+)\s*(?:day|يوم)", TimeUnit::Days),
            (r"(\d+)\s*(?:month|شهر)", TimeUnit::Months),
        ];
        let mut time_patterns = Vec::with_capacity(time_sources.len());
        for (src, unit) in time_sources {
            time_patterns.push((Regex::new(src)?, unit));
        }
        Ok(Self {
            finger_patterns,
            time_patterns,
        })
    }

    /// Extract separation, timing, and per-turn symptoms from a lowercased
    /// message.
    #[must_use]
    pub fn extract(&self, lowered: &str) -> DiastasisInfo {
        let mut info = DiastasisInfo::default();

        for pattern in &self.finger_patterns {
            let Some(caps) = pattern.captures(lowered) else {
                continue;
            };
            if let Some(num) = caps.get(1).and_then(|m| m.as_str().parse::<u32>().ok()) {
                info.separation_fingers = Some(num);
                break;
            }
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
                TimeUnit::Months => info.weeks_postpartum = Some(num * 4),
            }
            break;
        }

        if (lowered.contains("ألم") || lowered.contains("pain"))
            && (lowered.contains("بطن")
                || lowered.contains("abdominal")
                || lowered.contains("lower"))
        {
            info.lower_abdominal_pain = true;
        }
        if (lowered.contains("ضغط") || lowered.contains("pressure"))
            && (lowered.contains("حوض") || lowered.contains("pelvic"))
        {
            info.pelvic_pressure = true;
        }
        if lowered.contains("انتفاخ")
            || lowered.contains("bulging")
            || lowered.contains("بروز")
            || lowered.contains("coning")
        {
            info.coning_bulging = true;
        }

        info
    }
}

/// Healing stage 1 to 4 from time since delivery and severity.
///
/// Severe separation pins the user to stage 1 regardless of elapsed time.
#[must_use]
pub fn calculate_diastasis_stage(
    weeks_postpartum: Option<u32>,
    days_postpartum: Option<u32>,
    severity: Option<Severity>,
) -> Option<u8> {
    let weeks = weeks_postpartum
        .map(f64::from)
        .or_else(|| days_postpartum.map(|d| f64::from(d) / 7.0))?;

    let stage = if severity == Some(Severity::Severe) || weeks < 6.0 {
        1
    } else if weeks < 12.0 {
        2
    } else if weeks < 24.0 {
        3
    } else {
        4
    };
    Some(stage)
}

fn stored_severity(mode: &DiastasisMode) -> Option<Severity> {
    mode.separation_fingers.map(Severity::from_fingers)
}

/// Fold a turn's extraction into the stored mode.
///
/// Enabling requires both a separation measurement and a time figure. Once
/// active, freshly mentioned fields overwrite the stored ones and the stage
/// is recomputed whenever timing was restated.
pub fn apply_diastasis_info(mode: &mut DiastasisMode, detected: bool, info: &DiastasisInfo) {
    if detected && !mode.enabled && info.separation_fingers.is_some() && info.has_timing() {
        mode.enabled = true;
        mode.separation_fingers = info.separation_fingers;
        mode.weeks_postpartum = info.weeks_postpartum;
        mode.days_postpartum = info.days_postpartum;
        mode.stage = calculate_diastasis_stage(
            mode.weeks_postpartum,
            mode.days_postpartum,
            stored_severity(mode),
        );
        return;
    }
    if !mode.enabled {
        return;
    }

    if info.separation_fingers.is_some() {
        mode.separation_fingers = info.separation_fingers;
    }
    if info.weeks_postpartum.is_some() {
        mode.weeks_postpartum = info.weeks_postpartum;
    }
    if info.days_postpartum.is_some() {
        mode.days_postpartum = info.days_postpartum;
    }
    if info.has_timing() || info.separation_fingers.is_some() {
        if let Some(stage) = calculate_diastasis_stage(
            mode.weeks_postpartum,
            mode.days_postpartum,
            stored_severity(mode),
        ) {
            mode.stage = Some(stage);
        }
    }
}

fn weeks_label(mode: &DiastasisMode) -> String {
    if let Some(weeks) = mode.weeks_postpartum {
        weeks.to_string()
    } else if let Some(days) = mode.days_postpartum {
        (f64::from(days) / 7.0).to_string()
    } else {
        "unknown".to_string()
    }
}

/// Build the diastasis coaching context. `None` until a stage is known.
///
/// Symptom lines come from the current turn's extraction, not the stored
/// mode.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn build_diastasis_context(
    mode: &DiastasisMode,
    info: &DiastasisInfo,
    profile: &UserProfile,
    metrics: &BodyMetrics,
) -> Option<String> {
    let stage = mode.stage?;

    let mut ctx =
        String::from("DIASTASIS RECTI RECOVERY MODE - SAFE ABDOMINAL SEPARATION COACHING:\n\n");
    ctx.push_str("User has diastasis recti (abdominal separation).\n");
    if let Some(fingers) = mode.separation_fingers {
        let _ = writeln!(
            ctx,
            "Separation: {fingers} fingers ({} severity).",
            Severity::from_fingers(fingers).as_str()
        );
    }
    let _ = writeln!(ctx, "Time since delivery: {} weeks.", weeks_label(mode));
    let _ = writeln!(ctx, "Current stage: {stage}");
    if info.lower_abdominal_pain {
        ctx.push_str("User reports lower abdominal pain.\n");
    }
    if info.pelvic_pressure {
        ctx.push_str("User reports pelvic pressure.\n");
    }
    if info.coning_bulging {
        ctx.push_str("User reports coning/bulging during exercises.\n");
    }
    ctx.push('\n');

    ctx.push_str("CRITICAL SAFETY RULES - NEVER include these exercises (MANDATORY):\n");
    for exercise in DIASTASIS_FORBIDDEN_EXERCISES {
        let _ = writeln!(ctx, "- NO {exercise}");
    }
    ctx.push_str("This rule is mandatory at all times.\n\n");

    let _ = writeln!(ctx, "DIASTASIS-SAFE EXERCISES FOR STAGE {stage}:");
    let exercises = match stage {
        1 => {
            ctx.push_str("Stage 1 – Early Healing (Weeks 1–6 postpartum or severe separation):\n");
            ctx.push_str(
                "Focus on: Belly breathing, Pelvic floor, TVA engagement, Light mobility, \
                 Walking. No core load at all.\n",
            );
            DIASTASIS_EXERCISES_STAGE_1
        }
        2 => {
            ctx.push_str("Stage 2 – Gentle Core Support (6–12 weeks postpartum):\n");
            ctx.push_str(
                "Focus on: Heel slides, Toe taps, Side-lying core, Gentle bridges, Seated \
                 controlled movements.\n",
            );
            DIASTASIS_EXERCISES_STAGE_2
        }
        3 => {
            ctx.push_str("Stage 3 – Functional Strength (3–6 months):\n");
            ctx.push_str(
                "Focus on: Standing core activation, Resistance band light training, Supported \
                 squats, Modified bird-dog.\n",
            );
            DIASTASIS_EXERCISES_STAGE_3
        }
        _ => {
            ctx.push_str("Stage 4 – Final Strengthening (6+ months):\n");
            ctx.push_str(
                "ONLY if user has: No coning, No bulging, No pelvic pressure, Less than \
                 1-finger gap.\n",
            );
            ctx.push_str(
                "Can introduce: Modified planks (knees), Light obliques, Standing controlled \
                 core.\n",
            );
            ctx.push_str(
                "NEVER introduce full planks or crunches unless user confirms doctor clearance.\n",
            );
            DIASTASIS_EXERCISES_STAGE_4
        }
    };
    let _ = writeln!(ctx, "Safe exercises: {}\n", exercises.join(", "));

    ctx.push_str("IMPORTANT CHECK:\n");
    ctx.push_str(
        "AI must always ask: 'هل تحسين بانتفاخ أو بروز في البطن خلال التمرين؟' (Do you feel \
         bulging or coning in your abdomen during the exercise?)\n",
    );
    ctx.push_str("If YES → stop and switch to easier exercise immediately.\n\n");

    ctx.push_str("WORKOUT PLAN FORMAT (REQUIRED):\n");
    ctx.push_str("ALWAYS present diastasis recti workouts in table structure:\n");
    ctx.push_str("Format: 'Diastasis Recti Plan – Week X'\n");
    ctx.push_str("Table columns: Day | Duration | Focus | Exercises | Notes\n");
    ctx.push_str("Example:\n");
    ctx.push_str("Day | Duration | Focus | Exercises | Notes\n");
    ctx.push_str("Sat | 10 min | Breathing | Belly breathing, TVA | No pressure\n");
    ctx.push_str("Sun | 12 min | Core healing | Heel slides, toe taps | Stop if bulging\n");
    ctx.push_str("Use this table format for ALL diastasis recti workout plans.\n\n");

    ctx.push_str("PROGRESS MONITORING:\n");
    ctx.push_str(
        "Track: Separation size, Pain levels, Coning/bulging, Belly pressure, Improvements in \
         stability.\n",
    );
    ctx.push_str(
        "If user reports new pain → respond: 'هذا عرض يحتاج توقفين فورًا. الأفضل تراجعين \
         طبيبة.'\n\n",
    );

    ctx.push_str("User Profile:\n");
    let _ = writeln!(ctx, "- Age: {}", or_na(profile.age));
    let _ = writeln!(
        ctx,
        "- TDEE: {} kcal (adjust for postpartum recovery)\n",
        or_na(metrics.tdee)
    );

    ctx.push_str(
        "Tone: Supportive, gentle, non-repetitive, zero negative tone. Saudi casual dialect \
         for Arabic, clean simple English for English.\n",
    );
    ctx.push_str(
        "Example: 'ولا يهمك يا <name>… كثير يصير لهم انفصال بعد الولادة. بنمشي خطوة خطوة لحد \
         ما يرجع بطنك ويتحسن.'\n",
    );

    Some(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ids::UserId;

    fn extractor() -> DiastasisExtractor {
        DiastasisExtractor::new().unwrap()
    }

    #[test]
    fn detects_arabic_and_english_mentions() {
        assert!(detect_diastasis("عندي انفصال عضلات البطن"));
        assert!(detect_diastasis("i have ab separation, 3 fingers"));
        assert!(!detect_diastasis("my core feels weak"));
    }

    #[test]
    fn extracts_fingers_and_timing() {
        let info = extractor().extract("diastasis, 3 fingers, 8 weeks after birth");
        assert_eq!(info.separation_fingers, Some(3));
        assert_eq!(info.weeks_postpartum, Some(8));

        let info = extractor().extract("انفصال 2 إصبع بعد الولادة 3 أسابيع");
        assert_eq!(info.separation_fingers, Some(2));
        assert_eq!(info.weeks_postpartum, Some(3));
    }

    #[test]
    fn severity_buckets() {
        assert_eq!(Severity::from_fingers(2), Severity::Mild);
        assert_eq!(Severity::from_fingers(4), Severity::Moderate);
        assert_eq!(Severity::from_fingers(5), Severity::Severe);
    }

    #[test]
    fn severe_separation_pins_stage_one() {
        assert_eq!(
            calculate_diastasis_stage(Some(20), None, Some(Severity::Severe)),
            Some(1)
        );
        assert_eq!(
            calculate_diastasis_stage(Some(20), None, Some(Severity::Mild)),
            Some(3)
        );
        assert_eq!(
            calculate_diastasis_stage(None, Some(21), Some(Severity::Mild)),
            Some(1)
        );
        assert_eq!(calculate_diastasis_stage(None, None, None), None);
    }

    #[test]
    fn enabling_requires_measurement_and_timing() {
        let mut mode = DiastasisMode::default();
        apply_diastasis_info(&mut mode, true, &extractor().extract("i have diastasis"));
        assert!(!mode.enabled);

        apply_diastasis_info(
            &mut mode,
            true,
            &extractor().extract("diastasis 3 fingers, 8 weeks postpartum"),
        );
        assert!(mode.enabled);
        assert_eq!(mode.stage, Some(2));
    }

    #[test]
    fn symptom_flags_surface_in_context() {
        let mut mode = DiastasisMode::default();
        mode.enabled = true;
        mode.separation_fingers = Some(3);
        mode.weeks_postpartum = Some(8);
        mode.stage = Some(2);

        let info = extractor().extract("i feel bulging and pelvic pressure during exercise");
        assert!(info.coning_bulging);
        assert!(info.pelvic_pressure);

        let profile = UserProfile::new(UserId::new());
        let ctx =
            build_diastasis_context(&mode, &info, &profile, &BodyMetrics::default()).unwrap();
        assert!(ctx.contains("Separation: 3 fingers (moderate severity)."));
        assert!(ctx.contains("User reports coning/bulging during exercises."));
        assert!(ctx.contains("User reports pelvic pressure."));
        assert!(!ctx.contains("lower abdominal pain"));
        assert!(ctx.contains("Stage 2 – Gentle Core Support"));
    }
}
