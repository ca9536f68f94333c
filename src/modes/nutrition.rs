//! Nutrition adherence boosts and adaptive meal-plan contexts.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::Rng;

use crate::detect::emotion::Emotion;
use crate::detect::signals;
use crate::engine::metrics::BodyMetrics;
use crate::engine::profile::UserProfile;
use crate::engine::state::{NutritionAdherence, UserBehaviorState};
use crate::modes::or_na;
use crate::modes::workout::days_since;

/// Progress boost for reported nutrition adherence. Full adherence earns a
/// uniform 1-3%, partial 0.5-1%, skipping nothing.
pub fn nutrition_progress_boost(adherence: NutritionAdherence, rng: &mut StdRng) -> f64 {
    match adherence {
        NutritionAdherence::Full => rng.gen_range(1.0..3.0),
        NutritionAdherence::Partial => rng.gen_range(0.5..1.0),
        NutritionAdherence::Skipped => 0.0,
    }
}

/// Whether to offer an adaptive nutrition plan this turn.
///
/// Fires on any food or meal mention, on a missing-ingredient phrase, or
/// when the user returns after a day or more of inactivity within an hour
/// of an inactivity check-in.
#[must_use]
pub fn should_offer_adaptive_nutrition(
    lowered: &str,
    mentions_missing_ingredient: bool,
    state: &UserBehaviorState,
    last_workout_ts: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    prompt_cooldown_seconds: i64,
) -> bool {
    if signals::asks_about_nutrition(lowered) || mentions_missing_ingredient {
        return true;
    }

    if let Some(last_workout) = last_workout_ts {
        if days_since(last_workout, now) >= 1.0 {
            if let Some(prompt_at) = state.last_workout_prompt_sent_at {
                if (now - prompt_at).num_seconds() < prompt_cooldown_seconds {
                    return true;
                }
            }
        }
    }

    false
}

const BALANCED_PLAN_TEXT: &str = "User requested nutrition plan. Provide balanced meal plan \
     based on their goal, activity level, and preferences. Keep it simple and achievable.";

const PERFORMANCE_PLAN_TEXT: &str = "User is highly active and consistent. Increase protein + \
     healthy fats. Mild calorie deficit only if user asks. Offer performance-boost meals.";

fn is_highly_active(activity_lowered: &str) -> bool {
    activity_lowered.contains("active") || activity_lowered.contains("athlete")
}

#[allow(clippy::cast_possible_truncation)]
fn inactivity_tier_text(days: f64) -> Option<String> {
    let whole_days = days as i64;
    if (1.0..3.0).contains(&days) {
        Some(format!(
            "User inactive for {whole_days} days (light inactivity). Slight nutrition \
             adjustment: reduce calories by 5-10%, increase hydration reminders, lighter \
             breakfast options. Example: 'بما إن يومين ما سويتي تمرين، قللت لك السعرات شوي \
             عشان توازنين اليوم.'"
        ))
    } else if (3.0..7.0).contains(&days) {
        Some(format!(
            "User inactive for {whole_days} days (medium inactivity). Softer diet: simple \
             meals, no strict calorie deficit, add snacks, no heavy recipes. Example: 'بما إن \
             صار لك {{days}} أيام توقف، سويت لك خطة خفيفة ما تضغط عليك: وجبات بسيطة وسهلة \
             بدون طبخ طويل.'"
        ))
    } else if (7.0..14.0).contains(&days) {
        Some(format!(
            "User inactive for {whole_days} days (large inactivity). Reset-friendly \
             nutrition: high protein but easy to prepare, no calorie tracking, focus on \
             satiety + balanced meals. Example: 'تقريبًا أسبوع بدون نشاط، سويت لك خطة جديدة \
             تركّز على البروتين والشبع بدون ما أحسب عليك سعرات.'"
        ))
    } else if days >= 14.0 {
        Some(format!(
            "User inactive for {whole_days} days (very long inactivity). Full reset: \
             beginner-level meal plan, very simple foods, no restrictions, high flexibility. \
             Example: 'سويت لك خطة بداية جديدة تناسب رجوعك… بدون حرمان، أشياء سهلة وسريعة.'"
        ))
    } else {
        None
    }
}

/// Build the adaptive nutrition context.
///
/// `None` when neither an inactivity tier, an explicit request, nor a
/// missing-ingredient substitution applies.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn adaptive_nutrition_context(
    profile: &UserProfile,
    metrics: &BodyMetrics,
    state: &UserBehaviorState,
    last_workout_ts: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    lowered: &str,
    emotion: Emotion,
    missing_ingredients: &[String],
    progress: Option<f64>,
) -> Option<String> {
    let explicit_request = signals::explicit_nutrition_request(lowered);
    let activity = profile.activity_lowered();

    let nutrition_context: Option<String> = if let Some(last_workout) = last_workout_ts {
        let days = days_since(last_workout, now);
        if days < 1.0 {
            if is_highly_active(&activity) {
                Some(PERFORMANCE_PLAN_TEXT.to_string())
            } else if explicit_request {
                Some(BALANCED_PLAN_TEXT.to_string())
            } else {
                None
            }
        } else {
            inactivity_tier_text(days)
        }
    } else if explicit_request {
        Some(BALANCED_PLAN_TEXT.to_string())
    } else {
        None
    };

    let substitution_context = if missing_ingredients.is_empty() {
        None
    } else {
        Some(format!(
            "\n\nUSER MISSING INGREDIENTS: {}\n\
             Provide smart substitutions immediately. Common substitutions:\n\
             - Eggs: يمكن استخدام التوفو أو البقوليات\n\
             - Protein: دجاج/سمك/لحم/بقوليات/توفو\n\
             - Carbs: رز/خبز/شوفان/بطاطا/بطاطا حلوة\n\
             - Milk: حليب نباتي/لبن/ماء\n\
             - Dates: تمر/عسل/فواكه\n\
             - Bread: خبز أسمر/خبز عربي/رز\n\
             Always provide alternatives in the same language as user message.",
            missing_ingredients.join(", ")
        ))
    };

    if nutrition_context.is_none() && substitution_context.is_none() {
        return None;
    }

    let prefs = &state.preferences;
    let mut avoid_lines = Vec::new();
    if !prefs.food_dislikes.is_empty() {
        avoid_lines.push(format!(
            "NEVER include these foods: {}",
            prefs.food_dislikes.join(", ")
        ));
    }
    if !prefs.allergies.is_empty() {
        avoid_lines.push(format!(
            "NEVER include these allergens: {}",
            prefs.allergies.join(", ")
        ));
    }
    let preference_note = if avoid_lines.is_empty() {
        "No food restrictions".to_string()
    } else {
        avoid_lines.join("\n")
    };

    let mut preferred_lines = Vec::new();
    if !prefs.favorite_foods.is_empty() {
        preferred_lines.push(format!(
            "Favorite foods: {}",
            prefs.favorite_foods.join(", ")
        ));
    }
    if !prefs.breakfast_preferences.is_empty() {
        preferred_lines.push(format!(
            "Breakfast preferences: {}",
            prefs.breakfast_preferences.join(", ")
        ));
    }
    if !prefs.lunch_preferences.is_empty() {
        preferred_lines.push(format!(
            "Lunch preferences: {}",
            prefs.lunch_preferences.join(", ")
        ));
    }
    let preferred_note = if preferred_lines.is_empty() {
        "No specific food preferences".to_string()
    } else {
        preferred_lines.join("\n")
    };

    let progress_note = progress.map_or_else(
        || "Progress: Not calculated".to_string(),
        |p| format!("Current progress: {p}%"),
    );

    let activity_note = if is_highly_active(&activity) {
        Some(
            "User is highly active. Increase protein + healthy fats. Mild calorie deficit \
             only if user asks. Offer performance-boost meals.",
        )
    } else if emotion == Emotion::Tired
        || lowered.contains("hungry")
        || lowered.contains("جوعان")
    {
        Some(
            "User reports hunger or low energy. Increase carbs, add quick snacks (fruits, \
             yogurt, nuts). Avoid low-carb days, increase breakfast calories.",
        )
    } else {
        None
    };

    let mut ctx = String::from("ADAPTIVE NUTRITION PLAN NEEDED:\n");
    if let Some(text) = nutrition_context {
        ctx.push_str(&text);
        ctx.push_str("\n\n");
    }
    if let Some(text) = substitution_context {
        ctx.push_str(&text);
        ctx.push_str("\n\n");
    }

    ctx.push_str("User Profile:\n");
    let _ = writeln!(ctx, "- Age: {}", or_na(profile.age));
    let _ = writeln!(ctx, "- Height: {} cm", or_na(profile.height_cm));
    let _ = writeln!(ctx, "- Weight: {} kg", or_na(profile.weight_kg));
    let _ = writeln!(ctx, "- Goal: {}", or_na(profile.goal.as_deref()));
    let _ = writeln!(
        ctx,
        "- Activity Level: {}",
        or_na(profile.activity_level.as_deref())
    );
    let _ = writeln!(ctx, "- {progress_note}\n");

    ctx.push_str("CRITICAL - Foods to NEVER Include:\n");
    ctx.push_str(&preference_note);
    ctx.push_str("\n\n");

    ctx.push_str("Preferred Foods (use when possible):\n");
    ctx.push_str(&preferred_note);
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

    if let Some(note) = activity_note {
        let _ = writeln!(ctx, "Activity-based adjustment: {note}\n");
    }

    ctx.push_str(
        "Generate a short, simple adaptive nutrition plan that respects all preferences and \
         limitations. Provide ingredient substitutions if user is missing items. Keep the \
         response natural and conversational. If user writes in Arabic, respond in Saudi \
         dialect. If user writes in English, respond in clean English. Include Saudi & \
         Gulf-friendly food options when appropriate.",
    );

    Some(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ids::UserId;
    use chrono::{Duration, TimeZone};
    use rand::SeedableRng;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).single().unwrap()
    }

    #[test]
    fn boost_ranges_by_adherence() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let full = nutrition_progress_boost(NutritionAdherence::Full, &mut rng);
            assert!((1.0..3.0).contains(&full));
            let partial = nutrition_progress_boost(NutritionAdherence::Partial, &mut rng);
            assert!((0.5..1.0).contains(&partial));
        }
        assert_eq!(
            nutrition_progress_boost(NutritionAdherence::Skipped, &mut rng),
            0.0
        );
    }

    #[test]
    fn offer_triggers_on_food_talk_or_missing_ingredients() {
        let state = UserBehaviorState::default();
        assert!(should_offer_adaptive_nutrition(
            "i need a meal plan",
            false,
            &state,
            None,
            now(),
            3600
        ));
        assert!(should_offer_adaptive_nutrition(
            "random text",
            true,
            &state,
            None,
            now(),
            3600
        ));
        assert!(!should_offer_adaptive_nutrition(
            "hello there",
            false,
            &state,
            None,
            now(),
            3600
        ));
    }

    #[test]
    fn explicit_request_without_workout_history_gets_balanced_plan() {
        let profile = UserProfile::new(UserId::new());
        let state = UserBehaviorState::default();
        let ctx = adaptive_nutrition_context(
            &profile,
            &BodyMetrics::default(),
            &state,
            None,
            now(),
            "i want a meal plan",
            Emotion::Neutral,
            &[],
            None,
        )
        .unwrap();
        assert!(ctx.contains("User requested nutrition plan."));
        assert!(ctx.contains("No food restrictions"));
    }

    #[test]
    fn consistent_inactive_user_without_request_gets_nothing() {
        let profile = UserProfile::new(UserId::new());
        let state = UserBehaviorState::default();
        let ctx = adaptive_nutrition_context(
            &profile,
            &BodyMetrics::default(),
            &state,
            Some(now() - Duration::hours(5)),
            now(),
            "hello",
            Emotion::Neutral,
            &[],
            None,
        );
        assert!(ctx.is_none());
    }

    #[test]
    fn athlete_gets_performance_plan_when_consistent() {
        let mut profile = UserProfile::new(UserId::new());
        profile.activity_level = Some("Athlete".to_string());
        let state = UserBehaviorState::default();
        let ctx = adaptive_nutrition_context(
            &profile,
            &BodyMetrics::default(),
            &state,
            Some(now() - Duration::hours(5)),
            now(),
            "hello",
            Emotion::Neutral,
            &[],
            None,
        )
        .unwrap();
        assert!(ctx.contains("highly active and consistent"));
        assert!(ctx.contains("Activity-based adjustment: User is highly active."));
    }

    #[test]
    fn inactivity_tiers_scale_with_days() {
        let profile = UserProfile::new(UserId::new());
        let state = UserBehaviorState::default();
        let at = |days: i64| {
            adaptive_nutrition_context(
                &profile,
                &BodyMetrics::default(),
                &state,
                Some(now() - Duration::days(days)),
                now(),
                "hello",
                Emotion::Neutral,
                &[],
                None,
            )
            .unwrap()
        };
        assert!(at(2).contains("light inactivity"));
        assert!(at(5).contains("medium inactivity"));
        assert!(at(10).contains("large inactivity"));
        assert!(at(20).contains("very long inactivity"));
    }

    #[test]
    fn missing_ingredients_add_substitution_block() {
        let profile = UserProfile::new(UserId::new());
        let state = UserBehaviorState::default();
        let ctx = adaptive_nutrition_context(
            &profile,
            &BodyMetrics::default(),
            &state,
            None,
            now(),
            "don't have eggs",
            Emotion::Neutral,
            &["eggs".to_string()],
            None,
        )
        .unwrap();
        assert!(ctx.contains("USER MISSING INGREDIENTS: eggs"));
        assert!(ctx.contains("Always provide alternatives in the same language"));
    }

    #[test]
    fn preference_blocks_list_stored_items() {
        let profile = UserProfile::new(UserId::new());
        let mut state = UserBehaviorState::default();
        state.preferences.food_dislikes.push("broccoli".to_string());
        state.preferences.favorite_foods.push("dates".to_string());

        let ctx = adaptive_nutrition_context(
            &profile,
            &BodyMetrics::default(),
            &state,
            None,
            now(),
            "meal plan please",
            Emotion::Neutral,
            &[],
            Some(60.0),
        )
        .unwrap();
        assert!(ctx.contains("NEVER include these foods: broccoli"));
        assert!(ctx.contains("Favorite foods: dates"));
        assert!(ctx.contains("Current progress: 60%"));
    }
}
