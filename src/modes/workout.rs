//! Workout progress boosts, adaptive plans, and equipment guidance.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};

use crate::catalog::equipment::Equipment;
use crate::detect::signals;
use crate::engine::metrics::BodyMetrics;
use crate::engine::profile::UserProfile;
use crate::engine::state::UserBehaviorState;
use crate::modes::or_na;

const SECONDS_PER_DAY: f64 = 24.0 * 3600.0;

/// Days since a timestamp, fractional.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn days_since(then: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    (now - then).num_seconds() as f64 / SECONDS_PER_DAY
}

/// Record a completed workout and return the progress boost it earns.
///
/// The weekly counter resets when the counting window is older than seven
/// days, then the completion is counted. Three or more workouts in the
/// window earn 5%, two earn 4%, one earns 3%.
pub fn record_workout_completion(state: &mut UserBehaviorState, now: DateTime<Utc>) -> f64 {
    let window_expired = state
        .last_workout_count_reset
        .map_or(true, |reset| days_since(reset, now) >= 7.0);
    if window_expired {
        state.workout_count_this_week = 0;
        state.last_workout_count_reset = Some(now);
    }

    state.workout_count_this_week += 1;
    state.last_workout_logged = Some(now);

    match state.workout_count_this_week {
        0 => 0.0,
        1 => 3.0,
        2 => 4.0,
        _ => 5.0,
    }
}

/// Whether to offer an adaptive plan this turn.
///
/// Fires on an explicit plan request, on tiredness or busyness signals, or
/// when the user returns after two or more inactive days within an hour of
/// an inactivity check-in.
#[must_use]
pub fn should_offer_adaptive_plan(
    lowered: &str,
    state: &UserBehaviorState,
    last_workout_ts: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    prompt_cooldown_seconds: i64,
) -> bool {
    if signals::asks_for_plan(lowered) || signals::reports_tired_or_busy(lowered) {
        return true;
    }

    if let Some(last_workout) = last_workout_ts {
        if days_since(last_workout, now) >= 2.0 {
            if let Some(prompt_at) = state.last_workout_prompt_sent_at {
                if (now - prompt_at).num_seconds() < prompt_cooldown_seconds {
                    return true;
                }
            }
        }
    }

    false
}

fn preference_note(state: &UserBehaviorState) -> String {
    let prefs = &state.preferences;
    let mut lines = Vec::new();
    if !prefs.food_dislikes.is_empty() {
        lines.push(format!("Food dislikes: {}", prefs.food_dislikes.join(", ")));
    }
    if !prefs.allergies.is_empty() {
        lines.push(format!("Allergies: {}", prefs.allergies.join(", ")));
    }
    if !prefs.workout_dislikes.is_empty() {
        lines.push(format!(
            "Avoid exercises: {}",
            prefs.workout_dislikes.join(", ")
        ));
    }
    if !prefs.injuries.is_empty() {
        lines.push(format!(
            "Injuries/limitations: {}",
            prefs.injuries.join(", ")
        ));
    }
    if lines.is_empty() {
        "No specific restrictions".to_string()
    } else {
        lines.join("\n")
    }
}

/// Build the adaptive plan context for the current inactivity tier.
///
/// `None` without a logged workout, and in the one-to-two-day gap where
/// neither the consistency praise nor the lightest tier applies.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn adaptive_plan_context(
    profile: &UserProfile,
    metrics: &BodyMetrics,
    state: &UserBehaviorState,
    last_workout_ts: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    progress: Option<f64>,
) -> Option<String> {
    let last_workout = last_workout_ts?;
    let days = days_since(last_workout, now);
    #[allow(clippy::cast_possible_truncation)]
    let whole_days = days as i64;

    let plan_context = if days < 1.0 {
        "User is consistent with workouts (last workout within 24 hours). Only suggest \
         intensity increase (5-10%) if user explicitly requests progress or asks for harder \
         workouts. Otherwise, maintain current plan and provide encouragement."
            .to_string()
    } else if (2.0..4.0).contains(&days) {
        format!(
            "User has been inactive for {whole_days} days (light inactivity). Offer a \
             slightly lighter workout: reduce duration by 10-15%, suggest lighter warm-ups. \
             Keep it encouraging and simple. Example: 'واضح إن عندك انشغال هاليومين… نسوي \
             اليوم تمرين أخف 20 دقيقة بدل 30؟'"
        )
    } else if (4.0..7.0).contains(&days) {
        format!(
            "User has been inactive for {whole_days} days (medium inactivity). Create a \
             'Restart Plan - Level 1': 15-20 minute sessions, more walking/low impact, no \
             high-intensity. Example: 'بما إن صار لك {{days}} أيام، نسوي خطة خفيفة 15 دقيقة \
             بس… المهم نرجع نتعود.'"
        )
    } else if (7.0..14.0).contains(&days) {
        format!(
            "User has been inactive for {whole_days} days (large inactivity). Rebuild with \
             new easing plan: replace intense workouts with low intensity, reduce weekly \
             workouts by 1 day, add recovery/stretching. Example: 'أسبوع تقريبًا بدون \
             تمرين… صممت لك خطة جديدة خفيفة ترجعك بدون ضغط.'"
        )
    } else if days >= 14.0 {
        format!(
            "User has been inactive for {whole_days} days (very long inactivity). Create a \
             'Fresh Start Plan': very easy beginner pace, no jumping/no heavy workouts, \
             recalculate calories and expected progress. Example: '{{name}}… بما إن صار لك \
             أسبوعين، سويت لك خطة بداية جديدة مناسبة جداً لك.'"
        )
    } else {
        return None;
    };

    let progress_note = progress.map_or_else(
        || "Progress: Not calculated".to_string(),
        |p| format!("Current progress: {p}%"),
    );

    let mut ctx = String::from("ADAPTIVE PLAN NEEDED:\n");
    ctx.push_str(&plan_context);
    ctx.push_str("\n\n");

    ctx.push_str("User Profile:\n");
    let _ = writeln!(ctx, "- Age: {}", or_na(profile.age));
    let _ = writeln!(ctx, "- Height: {} cm", or_na(profile.height_cm));
    let _ = writeln!(ctx, "- Weight: {} kg", or_na(profile.weight_kg));
    let _ = writeln!(ctx, "- Goal: {}", or_na(profile.goal.as_deref()));
    let _ = writeln!(ctx, "- {progress_note}\n");

    ctx.push_str("IMPORTANT - User Preferences to Respect:\n");
    ctx.push_str(&preference_note(state));
    ctx.push_str("\n\n");

    ctx.push_str("Metrics:\n");
    let _ = writeln!(
        ctx,
        "- BMI: {} ({})",
        or_na(metrics.bmi),
        or_na(metrics.bmi_category)
    );
    let _ = writeln!(ctx, "- BMR: {} kcal", or_na(metrics.bmr));
    let _ = writeln!(ctx, "- TDEE: {} kcal", or_na(metrics.tdee));
    let _ = writeln!(
        ctx,
        "- Safe weekly progress: {} kg\n",
        or_na(metrics.safe_weekly_rate)
    );

    ctx.push_str(
        "Generate a short, simple adaptive plan that respects all preferences and \
         limitations. Keep the response natural and conversational. If user writes in \
         Arabic, respond in Saudi dialect. If user writes in English, respond in clean \
         English.",
    );

    Some(ctx)
}

/// Build the usage-instruction context for a recognized machine.
#[must_use]
pub fn equipment_instructions_context(equipment: &Equipment, english: bool) -> String {
    let mut ctx = format!(
        "GYM EQUIPMENT RECOGNITION - {}:\n\n",
        equipment.name.to_uppercase()
    );
    let _ = writeln!(
        ctx,
        "User is asking about: {}\n",
        equipment.localized_name(english)
    );
    ctx.push_str("Provide step-by-step usage instructions:\n");

    let lines: [(&str, Option<&str>); 9] = [
        ("Seat adjustment", equipment.seat_adjustment),
        ("Handle height", equipment.handle_height),
        ("Foot placement", equipment.foot_placement),
        ("Grip", equipment.grip),
        ("Range of motion", equipment.range_of_motion),
        ("Breathing pattern", equipment.breathing),
        ("Safety notes", equipment.safety),
        ("Common mistakes", equipment.common_mistakes),
        ("Recommended weight for beginners", equipment.beginner_weight),
    ];
    for (label, note) in lines {
        if let Some(note) = note {
            let _ = writeln!(ctx, "- {label}: {note}");
        }
    }

    ctx.push_str("\nInstructions must be short, visual, and easy to follow.");
    ctx.push_str("\nIf equipment is busy, suggest alternatives.");
    ctx
}
