//! Inactivity penalties, check-in messages, and reminder notifications.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;

use crate::catalog::messages::{
    render_message, WORKOUT_MESSAGES_14_PLUS_DAYS, WORKOUT_MESSAGES_14_PLUS_DAYS_EN,
    WORKOUT_MESSAGES_2_3_DAYS, WORKOUT_MESSAGES_2_3_DAYS_EN, WORKOUT_MESSAGES_4_6_DAYS,
    WORKOUT_MESSAGES_4_6_DAYS_EN, WORKOUT_MESSAGES_7_13_DAYS, WORKOUT_MESSAGES_7_13_DAYS_EN,
};
use crate::engine::selector::pick_unseen;
use crate::engine::state::{AdherenceLevel, InactivityBracket, UserBehaviorState};
use crate::modes::workout::days_since;

/// Progress penalty for days without a logged workout.
#[must_use]
pub fn inactivity_penalty(days_inactive: f64) -> f64 {
    if days_inactive < 2.0 {
        0.0
    } else if days_inactive < 4.0 {
        -1.0
    } else if days_inactive < 7.0 {
        -2.0
    } else if days_inactive < 14.0 {
        -3.0
    } else {
        -4.0
    }
}

/// System reminders derived from interaction and adherence signals.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn generate_notifications(
    state: &UserBehaviorState,
    now: DateTime<Utc>,
    checkin_after_hours: i64,
) -> Vec<&'static str> {
    let mut notifications = Vec::new();

    if let Some(last) = state.last_interaction {
        let hours_since = (now - last).num_seconds() as f64 / 3600.0;
        if hours_since >= checkin_after_hours as f64 {
            notifications
                .push("User inactive for 24h+: send gentle check-in message about lighter routine.");
        }
    }

    if state.skipped_days >= 1 && state.workout_adherence == AdherenceLevel::Low {
        notifications.push("User skipped workouts recently; suggest simplified plan.");
    }
    if state.workout_adherence == AdherenceLevel::Good && state.skipped_days == 0 {
        notifications.push("User consistent; send praise and encourage progression.");
    }

    notifications
}

const fn bracket_pool(bracket: InactivityBracket, english: bool) -> &'static [&'static str] {
    match (bracket, english) {
        (InactivityBracket::Days2To3, false) => WORKOUT_MESSAGES_2_3_DAYS,
        (InactivityBracket::Days2To3, true) => WORKOUT_MESSAGES_2_3_DAYS_EN,
        (InactivityBracket::Days4To6, false) => WORKOUT_MESSAGES_4_6_DAYS,
        (InactivityBracket::Days4To6, true) => WORKOUT_MESSAGES_4_6_DAYS_EN,
        (InactivityBracket::Days7To13, false) => WORKOUT_MESSAGES_7_13_DAYS,
        (InactivityBracket::Days7To13, true) => WORKOUT_MESSAGES_7_13_DAYS_EN,
        (InactivityBracket::Days14Plus, false) => WORKOUT_MESSAGES_14_PLUS_DAYS,
        (InactivityBracket::Days14Plus, true) => WORKOUT_MESSAGES_14_PLUS_DAYS_EN,
    }
}

/// One check-in per inactivity bracket: a message fires when the user enters
/// a bracket they have not been prompted for yet, chosen without repeats
/// from the bracket's language pool.
pub fn check_workout_inactivity_message(
    state: &mut UserBehaviorState,
    name: &str,
    english: bool,
    now: DateTime<Utc>,
    last_workout_ts: Option<DateTime<Utc>>,
    rng: &mut StdRng,
) -> Option<String> {
    let last_workout = last_workout_ts?;
    let days = days_since(last_workout, now);
    let bracket = InactivityBracket::from_days(days)?;

    if state.last_workout_prompt_category == Some(bracket)
        && state.last_workout_prompt_sent_at.is_some()
    {
        return None;
    }

    let lang_key = if english { "english" } else { "arabic" };
    let key = format!("{}_{lang_key}", bracket.as_key());
    let used = state.used_workout_messages.entry(key).or_default();

    let pool = bracket_pool(bracket, english);
    let template = pick_unseen(pool, used, |m| *m, |_| true, rng)?;
    let message = render_message(template, name);

    state.last_workout_prompt_category = Some(bracket);
    state.last_workout_prompt_sent_at = Some(now);
    Some(message)
}

/// Background line noting days without a logged workout, for the detected
/// factors section.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn workout_gap_line(last_workout_ts: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Option<String> {
    let days = days_since(last_workout_ts?, now);
    if days > 2.0 {
        Some(format!(
            "User hasn't logged a workout in {} days",
            days as i64
        ))
    } else {
        None
    }
}

/// Background line noting hours without chatting. Absent before the first
/// recorded interaction.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn chat_gap_line(
    last_interaction: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    checkin_after_hours: i64,
) -> Option<String> {
    let last = last_interaction?;
    let hours = (now - last).num_seconds() as f64 / 3600.0;
    if hours > checkin_after_hours as f64 {
        Some(format!("User hasn't chatted in {} hours", hours as i64))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rand::SeedableRng;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).single().unwrap()
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(5)
    }

    #[test]
    fn penalty_brackets() {
        assert_eq!(inactivity_penalty(1.0), 0.0);
        assert_eq!(inactivity_penalty(2.0), -1.0);
        assert_eq!(inactivity_penalty(5.0), -2.0);
        assert_eq!(inactivity_penalty(10.0), -3.0);
        assert_eq!(inactivity_penalty(20.0), -4.0);
    }

    #[test]
    fn notifications_reflect_state() {
        let mut state = UserBehaviorState::default();
        state.last_interaction = Some(now() - Duration::hours(30));
        state.workout_adherence = AdherenceLevel::Good;
        let notes = generate_notifications(&state, now(), 24);
        assert_eq!(notes.len(), 2);
        assert!(notes[0].contains("inactive for 24h+"));
        assert!(notes[1].contains("consistent"));

        state.skipped_days = 2;
        state.workout_adherence = AdherenceLevel::Low;
        state.last_interaction = Some(now() - Duration::hours(1));
        let notes = generate_notifications(&state, now(), 24);
        assert_eq!(notes, vec!["User skipped workouts recently; suggest simplified plan."]);
    }

    #[test]
    fn checkin_fires_once_per_bracket() {
        let mut state = UserBehaviorState::default();
        let mut rng = rng();
        let last_workout = Some(now() - Duration::days(3));

        let first =
            check_workout_inactivity_message(&mut state, "Sara", true, now(), last_workout, &mut rng);
        assert!(first.is_some());
        assert!(first.as_deref().unwrap().contains("Sara"));
        assert_eq!(
            state.last_workout_prompt_category,
            Some(InactivityBracket::Days2To3)
        );

        let second =
            check_workout_inactivity_message(&mut state, "Sara", true, now(), last_workout, &mut rng);
        assert!(second.is_none());

        // Entering a deeper bracket fires again.
        let later = now() + Duration::days(3);
        let third =
            check_workout_inactivity_message(&mut state, "Sara", true, later, last_workout, &mut rng);
        assert!(third.is_some());
        assert_eq!(
            state.last_workout_prompt_category,
            Some(InactivityBracket::Days4To6)
        );
    }

    #[test]
    fn checkin_skips_recent_or_unknown_workouts() {
        let mut state = UserBehaviorState::default();
        let mut rng = rng();
        assert!(
            check_workout_inactivity_message(&mut state, "Sara", true, now(), None, &mut rng)
                .is_none()
        );
        assert!(check_workout_inactivity_message(
            &mut state,
            "Sara",
            true,
            now(),
            Some(now() - Duration::days(1)),
            &mut rng
        )
        .is_none());
    }

    #[test]
    fn gap_lines() {
        assert_eq!(
            workout_gap_line(Some(now() - Duration::days(5)), now()),
            Some("User hasn't logged a workout in 5 days".to_string())
        );
        assert_eq!(workout_gap_line(Some(now() - Duration::days(1)), now()), None);
        assert_eq!(workout_gap_line(None, now()), None);

        assert_eq!(
            chat_gap_line(Some(now() - Duration::hours(30)), now(), 24),
            Some("User hasn't chatted in 30 hours".to_string())
        );
        assert_eq!(chat_gap_line(None, now(), 24), None);
    }
}
