//! Per-user behavioral state accumulated across turns.
//!
//! Every field is an explicit struct or enum so the state serializes to a
//! stable JSON shape for the snapshot/restore contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::detect::emotion::Emotion;

/// Visual impairment level for accessibility mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisualImpairment {
    /// No visual impairment recorded.
    #[default]
    None,
    /// User is blind.
    Blind,
    /// User has low vision.
    LowVision,
}

impl VisualImpairment {
    /// Stable wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Blind => "blind",
            Self::LowVision => "low_vision",
        }
    }
}

/// Hearing impairment level for deaf mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HearingImpairment {
    /// No hearing impairment recorded.
    #[default]
    None,
    /// User is deaf.
    Deaf,
    /// User is hard of hearing.
    HardOfHearing,
}

impl HearingImpairment {
    /// Stable wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Deaf => "deaf",
            Self::HardOfHearing => "hard_of_hearing",
        }
    }
}

/// Delivery type for postpartum tracking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryType {
    /// Vaginal delivery.
    Natural,
    /// Cesarean delivery.
    CSection,
}

/// Adherence classification derived from chat signals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdherenceLevel {
    /// Not enough signal yet.
    #[default]
    Unknown,
    /// Sticking to the plan.
    Good,
    /// Recently skipping.
    Low,
}

/// Reported nutrition-plan adherence for the current period.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NutritionAdherence {
    /// Followed the plan fully.
    Full,
    /// Followed part of the plan.
    Partial,
    /// Did not follow the plan.
    Skipped,
}

/// Workout-inactivity bracket, keyed by days since the last logged workout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InactivityBracket {
    /// 2 to 3 days.
    Days2To3,
    /// 4 to 6 days.
    Days4To6,
    /// 7 to 13 days.
    Days7To13,
    /// 14 days or more.
    Days14Plus,
}

impl InactivityBracket {
    /// Bracket for a day count; `None` below the two-day threshold.
    #[must_use]
    pub fn from_days(days: f64) -> Option<Self> {
        if days < 2.0 {
            None
        } else if days < 4.0 {
            Some(Self::Days2To3)
        } else if days < 7.0 {
            Some(Self::Days4To6)
        } else if days < 14.0 {
            Some(Self::Days7To13)
        } else {
            Some(Self::Days14Plus)
        }
    }

    /// Stable key used for per-bracket used-message lists.
    #[must_use]
    pub const fn as_key(self) -> &'static str {
        match self {
            Self::Days2To3 => "2_3",
            Self::Days4To6 => "4_6",
            Self::Days7To13 => "7_13",
            Self::Days14Plus => "14_plus",
        }
    }
}

/// What caused a progress adjustment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentKind {
    /// Workout completion boost.
    Workout,
    /// Nutrition adherence boost.
    Nutrition,
    /// Inactivity penalty.
    Inactivity,
}

/// One entry in the progress adjustment audit trail.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProgressAdjustment {
    /// Adjustment cause.
    pub kind: AdjustmentKind,
    /// Signed percentage delta requested.
    pub delta: f64,
    /// Adjusted progress before applying.
    pub before: f64,
    /// Adjusted progress after clamping to [0, 100].
    pub after: f64,
    /// When the adjustment was applied.
    pub at: DateTime<Utc>,
}

/// Extracted user preferences, merged across turns with exact-duplicate
/// suppression.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Foods the user dislikes.
    pub food_dislikes: Vec<String>,
    /// Reported food allergies.
    pub allergies: Vec<String>,
    /// Foods the user likes.
    pub favorite_foods: Vec<String>,
    /// Preferred breakfast items.
    pub breakfast_preferences: Vec<String>,
    /// Preferred lunch items.
    pub lunch_preferences: Vec<String>,
    /// Exercises the user refuses or cannot do.
    pub workout_dislikes: Vec<String>,
    /// Reported injuries.
    pub injuries: Vec<String>,
    /// How the user likes to be motivated.
    pub motivation_style: Vec<String>,
}

impl Preferences {
    /// True when nothing has been extracted yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.food_dislikes.is_empty()
            && self.allergies.is_empty()
            && self.favorite_foods.is_empty()
            && self.breakfast_preferences.is_empty()
            && self.lunch_preferences.is_empty()
            && self.workout_dislikes.is_empty()
            && self.injuries.is_empty()
            && self.motivation_style.is_empty()
    }

    /// Merge newly extracted preferences, skipping exact duplicates.
    pub fn merge(&mut self, new: &Self) {
        merge_unique(&mut self.food_dislikes, &new.food_dislikes);
        merge_unique(&mut self.allergies, &new.allergies);
        merge_unique(&mut self.favorite_foods, &new.favorite_foods);
        merge_unique(&mut self.breakfast_preferences, &new.breakfast_preferences);
        merge_unique(&mut self.lunch_preferences, &new.lunch_preferences);
        merge_unique(&mut self.workout_dislikes, &new.workout_dislikes);
        merge_unique(&mut self.injuries, &new.injuries);
        merge_unique(&mut self.motivation_style, &new.motivation_style);
    }
}

fn merge_unique(stored: &mut Vec<String>, new: &[String]) {
    for value in new {
        if !stored.contains(value) {
            stored.push(value.clone());
        }
    }
}

/// Physical challenge flags extracted from chat.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisabilityInfo {
    /// General mobility limitations.
    pub mobility_challenges: bool,
    /// Difficulty standing for long.
    pub difficulty_standing: bool,
    /// Wheelchair user.
    pub wheelchair_use: bool,
    /// Joint pain.
    pub joint_pain: bool,
    /// Back or spine issues.
    pub spine_issues: bool,
    /// Balance issues.
    pub balance_issues: bool,
    /// Named chronic conditions.
    pub chronic_conditions: Vec<String>,
    /// One-shot guard for the "anything I should adapt for?" question.
    pub disability_asked: bool,
}

impl DisabilityInfo {
    /// True when any physical challenge flag is set.
    #[must_use]
    pub const fn has_special_needs(&self) -> bool {
        self.mobility_challenges
            || self.difficulty_standing
            || self.wheelchair_use
            || self.joint_pain
            || self.spine_issues
            || self.balance_issues
    }
}

/// Accessibility (visual impairment) mode.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessibilityMode {
    /// Mode active.
    pub enabled: bool,
    /// Impairment level.
    pub visual_impairment: VisualImpairment,
    /// Strip decorative characters from replies for screen readers.
    pub voice_friendly: bool,
}

/// Deaf / hard-of-hearing mode.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeafMode {
    /// Mode active.
    pub enabled: bool,
    /// Impairment level.
    pub hearing_impairment: HearingImpairment,
    /// Include visual direction cues in instructions.
    pub visual_cues: bool,
}

impl Default for DeafMode {
    fn default() -> Self {
        Self {
            enabled: false,
            hearing_impairment: HearingImpairment::None,
            visual_cues: true,
        }
    }
}

/// Pregnancy tracking.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PregnancyMode {
    /// Mode active; requires a known trimester.
    pub enabled: bool,
    /// Trimester 1 to 3.
    pub trimester: Option<u8>,
    /// Wellbeing notes ("fatigue", ...).
    pub pregnancy_notes: Vec<String>,
    /// Pain notes.
    pub pain_notes: Vec<String>,
    /// Trainers already recommended.
    pub used_videos: Vec<String>,
}

/// Postpartum tracking.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostpartumMode {
    /// Mode active; requires delivery type and a time-since-birth figure.
    pub enabled: bool,
    /// How the user delivered.
    pub delivery_type: Option<DeliveryType>,
    /// Weeks since delivery.
    pub weeks_postpartum: Option<u32>,
    /// Days since delivery, used when weeks were not stated.
    pub days_postpartum: Option<u32>,
    /// Whether the user is breastfeeding.
    pub breastfeeding: Option<bool>,
    /// Recovery phase 1 to 4.
    pub phase: Option<u8>,
    /// Trainers already recommended.
    pub used_videos: Vec<String>,
}

/// Diastasis recti tracking.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiastasisMode {
    /// Mode active; requires a separation measurement and a time figure.
    pub enabled: bool,
    /// Abdominal separation in finger widths.
    pub separation_fingers: Option<u32>,
    /// Weeks since delivery.
    pub weeks_postpartum: Option<u32>,
    /// Days since delivery, used when weeks were not stated.
    pub days_postpartum: Option<u32>,
    /// Healing stage 1 to 4.
    pub stage: Option<u8>,
    /// Trainers already recommended.
    pub used_videos: Vec<String>,
}

/// Full behavioral state for one user.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserBehaviorState {
    /// Last successful chat turn.
    pub last_interaction: Option<DateTime<Utc>>,
    /// Last workout the user logged or reported.
    pub last_workout_logged: Option<DateTime<Utc>>,
    /// Extracted preferences.
    pub preferences: Preferences,
    /// Progress after behavioral adjustments.
    pub adjusted_progress: Option<f64>,
    /// Progress at the time adjustments started; set once.
    pub base_progress: Option<f64>,
    /// Audit trail of applied adjustments.
    pub progress_adjustments: Vec<ProgressAdjustment>,
    /// Completed workouts in the current week.
    pub workout_count_this_week: u32,
    /// Start of the current weekly counting window.
    pub last_workout_count_reset: Option<DateTime<Utc>>,
    /// Latest reported nutrition adherence.
    pub nutrition_adherence: Option<NutritionAdherence>,
    /// Skip mentions accumulated across turns.
    pub skipped_days: u32,
    /// Recent non-neutral emotions, oldest first.
    pub mood_trend: Vec<String>,
    /// Workout adherence classification.
    pub workout_adherence: AdherenceLevel,
    /// Timestamped stress/fatigue observations.
    pub stress_patterns: Vec<String>,
    /// Preferred training time ("mornings" / "evenings").
    pub preferred_times: Option<String>,
    /// Physical challenge flags.
    pub disability_info: DisabilityInfo,
    /// Visual accessibility mode.
    pub accessibility_mode: AccessibilityMode,
    /// Hearing accessibility mode.
    pub deaf_mode: DeafMode,
    /// Pregnancy tracking.
    pub pregnancy_mode: PregnancyMode,
    /// Postpartum tracking.
    pub postpartum_mode: PostpartumMode,
    /// Diastasis tracking.
    pub diastasis_mode: DiastasisMode,
    /// Video titles already recommended from the general pool.
    pub used_videos: Vec<String>,
    /// Equipment-video trainers already recommended.
    pub used_equipment_videos: Vec<String>,
    /// Exercise-image keys already shown.
    pub used_images: Vec<String>,
    /// Inactivity-message templates already sent, keyed by bracket and language.
    pub used_workout_messages: BTreeMap<String, Vec<String>>,
    /// Disability support messages already sent.
    pub used_disability_messages: Vec<String>,
    /// Bracket of the last inactivity prompt.
    pub last_workout_prompt_category: Option<InactivityBracket>,
    /// When the last inactivity prompt was sent.
    pub last_workout_prompt_sent_at: Option<DateTime<Utc>>,
}

impl UserBehaviorState {
    /// Fold per-turn chat signals into the running behavioral profile.
    pub fn update_from_message(&mut self, lowered: &str, emotion: Emotion, now: DateTime<Utc>) {
        if emotion != Emotion::Neutral {
            self.mood_trend.push(emotion.as_str().to_string());
        }

        if lowered.contains("skip") || lowered.contains("miss") {
            self.skipped_days += 1;
            self.workout_adherence = AdherenceLevel::Low;
        } else {
            self.workout_adherence = AdherenceLevel::Good;
        }

        if lowered.contains("night") || lowered.contains("late") {
            self.preferred_times = Some("evenings".to_string());
        }
        if lowered.contains("morning") {
            self.preferred_times = Some("mornings".to_string());
        }

        if matches!(
            emotion,
            Emotion::Stressed | Emotion::Tired | Emotion::Unmotivated
        ) {
            self.stress_patterns
                .push(format!("{} at {}", emotion.as_str(), now.to_rfc3339()));
        }
    }

    /// Seed the adjusted/base progress pair once a baseline is known.
    pub fn ensure_base_progress(&mut self, base_progress: Option<f64>) {
        if self.adjusted_progress.is_none() {
            if let Some(base) = base_progress {
                self.adjusted_progress = Some(base);
                self.base_progress = Some(base);
            }
        }
    }

    /// Apply a clamped progress adjustment and record it in the audit trail.
    ///
    /// Returns the new adjusted progress, or `None` when no baseline exists.
    pub fn apply_adjustment(
        &mut self,
        kind: AdjustmentKind,
        delta: f64,
        base_progress: Option<f64>,
        now: DateTime<Utc>,
    ) -> Option<f64> {
        base_progress?;
        self.ensure_base_progress(base_progress);

        let before = self.adjusted_progress.or(base_progress)?;
        let after = (before + delta).clamp(0.0, 100.0);

        self.progress_adjustments.push(ProgressAdjustment {
            kind,
            delta,
            before,
            after,
            at: now,
        });
        self.adjusted_progress = Some(after);
        Some(after)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).single().unwrap()
    }

    #[test]
    fn adjustment_clamps_and_records() {
        let mut state = UserBehaviorState::default();
        let after = state.apply_adjustment(AdjustmentKind::Workout, 5.0, Some(98.0), now());
        assert_eq!(after, Some(100.0));
        assert_eq!(state.base_progress, Some(98.0));
        assert_eq!(state.progress_adjustments.len(), 1);
        assert_eq!(state.progress_adjustments[0].before, 98.0);
        assert_eq!(state.progress_adjustments[0].after, 100.0);
    }

    #[test]
    fn adjustment_without_baseline_is_noop() {
        let mut state = UserBehaviorState::default();
        assert_eq!(
            state.apply_adjustment(AdjustmentKind::Inactivity, -2.0, None, now()),
            None
        );
        assert!(state.progress_adjustments.is_empty());
    }

    #[test]
    fn base_progress_is_set_once() {
        let mut state = UserBehaviorState::default();
        state.apply_adjustment(AdjustmentKind::Workout, 3.0, Some(50.0), now());
        state.apply_adjustment(AdjustmentKind::Workout, 3.0, Some(80.0), now());
        assert_eq!(state.base_progress, Some(50.0));
        assert_eq!(state.adjusted_progress, Some(56.0));
    }

    #[test]
    fn skip_mentions_lower_adherence() {
        let mut state = UserBehaviorState::default();
        state.update_from_message("i skipped my workout", Emotion::Neutral, now());
        assert_eq!(state.skipped_days, 1);
        assert_eq!(state.workout_adherence, AdherenceLevel::Low);

        state.update_from_message("done with training", Emotion::Neutral, now());
        assert_eq!(state.workout_adherence, AdherenceLevel::Good);
    }

    #[test]
    fn stress_emotions_are_logged_with_timestamp() {
        let mut state = UserBehaviorState::default();
        state.update_from_message("so tired today", Emotion::Tired, now());
        assert_eq!(state.mood_trend, vec!["tired"]);
        assert_eq!(state.stress_patterns.len(), 1);
        assert!(state.stress_patterns[0].starts_with("tired at 2026-03-01"));
    }

    #[test]
    fn preferred_times_follow_latest_mention() {
        let mut state = UserBehaviorState::default();
        state.update_from_message("i train late at night", Emotion::Neutral, now());
        assert_eq!(state.preferred_times.as_deref(), Some("evenings"));
        state.update_from_message("morning suits me better", Emotion::Neutral, now());
        assert_eq!(state.preferred_times.as_deref(), Some("mornings"));
    }

    #[test]
    fn state_round_trips_through_json() {
        let mut state = UserBehaviorState::default();
        state.pregnancy_mode.enabled = true;
        state.pregnancy_mode.trimester = Some(2);
        state.postpartum_mode.delivery_type = Some(DeliveryType::CSection);
        state
            .used_workout_messages
            .insert("2_3_arabic".to_string(), vec!["msg".to_string()]);

        let json = serde_json::to_string(&state).unwrap();
        let restored: UserBehaviorState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, restored);
    }
}
