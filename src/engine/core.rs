//! Turn orchestration: detection, state update, context assembly, and the
//! completion call.

use std::fmt::Write as _;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::catalog::alerts::{
    DIASTASIS_SAFETY_ALERTS, POSTPARTUM_SAFETY_ALERTS, PREGNANCY_SAFETY_ALERTS, check_alerts,
};
use crate::catalog::equipment::recognize_equipment;
use crate::catalog::persona::render_persona;
use crate::catalog::videos::{
    ADAPTIVE_VIDEOS, DIASTASIS_VIDEOS, GYM_EQUIPMENT_VIDEOS, POSTPARTUM_VIDEOS, PREGNANCY_VIDEOS,
};
use crate::detect::emotion::{Emotion, detect_emotion};
use crate::detect::language::detect_language;
use crate::detect::preferences::PreferenceExtractor;
use crate::detect::signals::{self, IngredientScanner};
use crate::engine::config::CoachConfig;
use crate::engine::errors::{CoachError, CoachResult};
use crate::engine::ids::{TurnId, UserId};
use crate::engine::metrics::{compute_metrics, estimate_progress};
use crate::engine::profile::UserProfile;
use crate::engine::state::{
    AdjustmentKind, HearingImpairment, UserBehaviorState, VisualImpairment,
};
use crate::engine::store::BehaviorStateStore;
use crate::gateway::{CompletionGateway, VoiceFilter};
use crate::modes::accessibility::{self, AccessibilitySignal};
use crate::modes::deaf::{self, DeafSignal};
use crate::modes::{
    diastasis, disability, inactivity, media, nutrition, postpartum, pregnancy, workout,
};
use crate::storage::{ProfileStore, WorkoutLog};

/// Structured flags a client may send alongside the message. They stand in
/// for keyword detection when the message itself is silent; keyword matches
/// take precedence.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientFlags {
    /// Activate accessibility (visual) mode.
    pub accessibility_mode: bool,
    /// Impairment level, "blind" or "low_vision".
    pub visual_impairment: Option<String>,
    /// Activate deaf mode.
    pub deaf_mode: bool,
    /// Impairment level, "deaf" or "hard_of_hearing".
    pub hearing_impairment: Option<String>,
    /// Treat the message as pregnancy-related.
    pub pregnancy_mode: bool,
    /// Treat the message as postpartum-related.
    pub postpartum_mode: bool,
    /// Treat the message as diastasis-related.
    pub diastasis_mode: bool,
    /// The message accompanies a gym equipment photo.
    pub equipment_image: bool,
}

/// Mode flags reported back to the client after a turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TurnFlags {
    /// Accessibility mode active.
    pub accessibility_mode: bool,
    /// Visual impairment level.
    pub visual_impairment: VisualImpairment,
    /// Deaf mode active.
    pub deaf_mode: bool,
    /// Hearing impairment level.
    pub hearing_impairment: HearingImpairment,
    /// Postpartum mode active.
    pub postpartum_mode: bool,
    /// Postpartum recovery phase.
    pub postpartum_phase: Option<u8>,
    /// Diastasis mode active.
    pub diastasis_mode: bool,
    /// Diastasis healing stage.
    pub diastasis_stage: Option<u8>,
}

impl TurnFlags {
    /// Snapshot the reportable mode flags from committed state.
    #[must_use]
    pub fn from_state(state: &UserBehaviorState) -> Self {
        Self {
            accessibility_mode: state.accessibility_mode.enabled,
            visual_impairment: state.accessibility_mode.visual_impairment,
            deaf_mode: state.deaf_mode.enabled,
            hearing_impairment: state.deaf_mode.hearing_impairment,
            postpartum_mode: state.postpartum_mode.enabled,
            postpartum_phase: state.postpartum_mode.phase,
            diastasis_mode: state.diastasis_mode.enabled,
            diastasis_stage: state.diastasis_mode.stage,
        }
    }
}

/// Reply for one chat turn.
#[derive(Clone, Debug, Serialize)]
pub struct TurnReply {
    /// Identifier of the committed turn.
    pub turn_id: TurnId,
    /// Coach reply text.
    pub message: String,
    /// Mode flags after the turn.
    pub flags: TurnFlags,
}

/// Everything a turn produces before the completion call.
#[derive(Clone, Debug)]
pub struct PreparedTurn {
    /// Identifier assigned to this turn.
    pub turn_id: TurnId,
    /// Assembled context string sent as the user role content.
    pub context: String,
    /// The message reported a completed workout.
    pub workout_completed: bool,
}

/// The coaching engine: owns detection, per-user state, and the completion
/// gateway.
pub struct CoachEngine {
    config: CoachConfig,
    profiles: Arc<dyn ProfileStore>,
    workouts: Arc<dyn WorkoutLog>,
    states: BehaviorStateStore,
    gateway: CompletionGateway,
    voice: VoiceFilter,
    rng: Mutex<StdRng>,
    pregnancy: pregnancy::PregnancyExtractor,
    postpartum: postpartum::PostpartumExtractor,
    diastasis: diastasis::DiastasisExtractor,
    disability: disability::DisabilityExtractor,
    preferences: PreferenceExtractor,
    ingredients: IngredientScanner,
}

impl CoachEngine {
    /// Build an engine from validated configuration and its persistence
    /// collaborators.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid or a detector
    /// pattern fails to compile.
    pub fn new(
        config: CoachConfig,
        profiles: Arc<dyn ProfileStore>,
        workouts: Arc<dyn WorkoutLog>,
    ) -> CoachResult<Self> {
        config.validate()?;
        let gateway = CompletionGateway::new(config.completion.clone())?;
        let rng = config
            .rng_seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);

        Ok(Self {
            config,
            profiles,
            workouts,
            states: BehaviorStateStore::new(),
            gateway,
            voice: VoiceFilter::new()?,
            rng: Mutex::new(rng),
            pregnancy: pregnancy::PregnancyExtractor::new()?,
            postpartum: postpartum::PostpartumExtractor::new()?,
            diastasis: diastasis::DiastasisExtractor::new()?,
            disability: disability::DisabilityExtractor::new()?,
            preferences: PreferenceExtractor::new()?,
            ingredients: IngredientScanner::new()?,
        })
    }

    /// Behavioral state store, exposed for snapshot/restore.
    #[must_use]
    pub fn behavior_states(&self) -> &BehaviorStateStore {
        &self.states
    }

    /// Run one chat turn end to end.
    ///
    /// State is committed only after the completion succeeds; a failed turn
    /// leaves the user's behavioral state untouched.
    ///
    /// # Errors
    /// Returns [`CoachError::MissingMessage`] for a blank message,
    /// [`CoachError::MissingProfile`] when no profile is stored, and
    /// upstream/transport errors from the gateway.
    pub async fn send_message(
        &self,
        user_id: UserId,
        message: &str,
        flags: &ClientFlags,
    ) -> CoachResult<TurnReply> {
        let trimmed = message.trim();
        if trimmed.is_empty() {
            return Err(CoachError::MissingMessage);
        }

        let profile = self
            .profiles
            .get_profile(user_id)
            .await?
            .ok_or(CoachError::MissingProfile(user_id))?;

        let handle = self.states.handle(user_id);
        let mut state = handle.lock().await;
        let mut working = state.clone();

        let now = Utc::now();
        if let Some(logged) = self.workouts.last_workout(user_id).await? {
            working.last_workout_logged = Some(logged);
        }
        let last_workout_ts = working.last_workout_logged;

        let prepared = {
            let mut rng = self.rng.lock().await;
            self.prepare_turn(
                &profile,
                &mut working,
                trimmed,
                flags,
                last_workout_ts,
                now,
                &mut rng,
            )
        };
        debug!(
            user_id = %user_id,
            turn_id = %prepared.turn_id,
            context_len = prepared.context.len(),
            "turn context prepared"
        );

        let persona = render_persona(profile.display_name());
        let mut reply = self.gateway.complete(&persona, &prepared.context).await?;

        if working.accessibility_mode.enabled && working.accessibility_mode.voice_friendly {
            reply = self.voice.apply(&reply);
        }

        working.last_interaction = Some(now);
        if prepared.workout_completed {
            self.workouts.record_workout(user_id, now).await?;
        }
        let turn_flags = TurnFlags::from_state(&working);
        *state = working;
        info!(user_id = %user_id, turn_id = %prepared.turn_id, "turn committed");

        Ok(TurnReply {
            turn_id: prepared.turn_id,
            message: reply,
            flags: turn_flags,
        })
    }

    /// Fold a message into behavioral state and assemble the prompt context.
    ///
    /// Mutates `state` in place; callers that need commit-on-success run
    /// this on a working copy.
    #[allow(clippy::too_many_arguments, clippy::too_many_lines)]
    pub fn prepare_turn(
        &self,
        profile: &UserProfile,
        state: &mut UserBehaviorState,
        message: &str,
        flags: &ClientFlags,
        last_workout_ts: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
        rng: &mut StdRng,
    ) -> PreparedTurn {
        let turn_id = TurnId::new();
        let lowered = message.to_lowercase();
        let language = detect_language(message);
        let english = language.prefers_english();
        let emotion = detect_emotion(&lowered);
        let name = profile.display_name();

        let metrics = compute_metrics(profile);
        let base_progress = estimate_progress(
            profile.weight_kg,
            profile.target_weight_kg,
            &profile.goal_lowered(),
        );
        state.ensure_base_progress(base_progress);
        let progress = state.adjusted_progress.or(base_progress);

        state.update_from_message(&lowered, emotion, now);

        // Profile section reflects preferences from previous turns; this
        // turn's extractions merge below.
        let mut profile_text = String::new();
        let _ = writeln!(profile_text, "User name: {name}");
        let _ = writeln!(profile_text, "Age: {}", or_unknown(profile.age));
        let _ = writeln!(
            profile_text,
            "Gender: {}",
            or_unknown(profile.gender.as_deref())
        );
        let _ = writeln!(
            profile_text,
            "Current weight: {} kg",
            or_unknown(profile.weight_kg)
        );
        let _ = writeln!(
            profile_text,
            "Target weight: {} kg",
            or_unknown(profile.target_weight_kg)
        );
        let _ = writeln!(profile_text, "Goal: {}", or_unknown(profile.goal.as_deref()));
        let _ = write!(
            profile_text,
            "Activity level: {}",
            or_unknown(profile.activity_level.as_deref())
        );
        if let Some(progress) = progress {
            let _ = write!(profile_text, "\nProgress: {progress:.1}%");
        }
        if let Some(notes) = profile.health_notes.as_deref().filter(|n| !n.is_empty()) {
            let _ = write!(profile_text, "\nHealth notes: {notes}");
        }
        if let Some(bmi) = metrics.bmi {
            let _ = write!(
                profile_text,
                "\nBMI: {bmi} ({})",
                metrics.bmi_category.unwrap_or_default()
            );
        }
        if let Some(tdee) = metrics.tdee {
            let _ = write!(profile_text, "\nTDEE: {tdee} kcal/day");
        }
        if !state.preferences.food_dislikes.is_empty() {
            let _ = write!(
                profile_text,
                "\nFood dislikes: {}",
                state.preferences.food_dislikes.join(", ")
            );
        }
        if !state.preferences.allergies.is_empty() {
            let _ = write!(
                profile_text,
                "\nAllergies: {}",
                state.preferences.allergies.join(", ")
            );
        }
        if !state.preferences.workout_dislikes.is_empty() {
            let _ = write!(
                profile_text,
                "\nWorkout dislikes: {}",
                state.preferences.workout_dislikes.join(", ")
            );
        }

        let mut detected_lines: Vec<String> = Vec::new();
        if emotion != Emotion::Neutral {
            detected_lines.push(format!("User seems {}", emotion.as_str()));
        }
        detected_lines.push(format!("User language: {}", language.as_str()));

        // Progress adjustments. A line is only reported when the clamped
        // result actually moved in the adjustment's direction.
        let workout_completed = signals::detect_workout_completion(&lowered);
        if workout_completed {
            let boost = workout::record_workout_completion(state, now);
            if boost > 0.0 {
                if let Some(before) = state.adjusted_progress.or(base_progress) {
                    if let Some(after) =
                        state.apply_adjustment(AdjustmentKind::Workout, boost, base_progress, now)
                    {
                        if after > before {
                            detected_lines.push(format!(
                                "Progress increased by {boost:.1}% due to workout completion."
                            ));
                        }
                    }
                }
            }
        }

        if let Some(adherence) = signals::detect_nutrition_adherence(&lowered) {
            state.nutrition_adherence = Some(adherence);
            let boost = nutrition::nutrition_progress_boost(adherence, rng);
            if boost > 0.0 {
                if let Some(before) = state.adjusted_progress.or(base_progress) {
                    if let Some(after) =
                        state.apply_adjustment(AdjustmentKind::Nutrition, boost, base_progress, now)
                    {
                        if after > before {
                            detected_lines.push(format!(
                                "Progress increased by {boost:.1}% due to nutrition adherence."
                            ));
                        }
                    }
                }
            }
        }

        if let Some(last) = last_workout_ts {
            let days_inactive = workout::days_since(last, now);
            if days_inactive >= 2.0 {
                let penalty = inactivity::inactivity_penalty(days_inactive);
                if penalty < 0.0 {
                    if let Some(before) = state.adjusted_progress.or(base_progress) {
                        if let Some(after) = state.apply_adjustment(
                            AdjustmentKind::Inactivity,
                            penalty,
                            base_progress,
                            now,
                        ) {
                            if after < before {
                                detected_lines.push(format!(
                                    "Progress decreased by {:.1}% due to inactivity.",
                                    penalty.abs()
                                ));
                            }
                        }
                    }
                }
            }
        }
        let detected_text = detected_lines.join("\n");

        let found_preferences = self.preferences.extract(&lowered);
        state.preferences.merge(&found_preferences);

        let mut inactivity_lines: Vec<String> = Vec::new();
        if let Some(line) = inactivity::workout_gap_line(last_workout_ts, now) {
            inactivity_lines.push(line);
        }
        if let Some(line) = inactivity::chat_gap_line(
            state.last_interaction,
            now,
            self.config.behavior.checkin_after_hours,
        ) {
            inactivity_lines.push(line);
        }
        if let Some(checkin) = inactivity::check_workout_inactivity_message(
            state,
            name,
            english,
            now,
            last_workout_ts,
            rng,
        ) {
            inactivity_lines.push(checkin);
        }
        let inactivity_text = inactivity_lines.join("\n");

        let detected_disability = self.disability.extract(&lowered);
        disability::merge_disability_info(&mut state.disability_info, &detected_disability);

        let mut disability_text = String::new();
        if state.disability_info.has_special_needs() {
            disability_text =
                disability::build_adaptive_context(&state.disability_info, profile, &metrics);
        }
        if disability::should_ask_about_disability(&state.disability_info, &lowered) {
            if let Some(support) = disability::pick_support_message(
                &mut state.used_disability_messages,
                name,
                english,
                rng,
            ) {
                join_block(&mut disability_text, &support);
                state.disability_info.disability_asked = true;
            }
        }

        let accessibility_signal = accessibility::detect_accessibility(&lowered)
            .or_else(|| accessibility_flag_signal(flags));
        if let Some(signal) = accessibility_signal {
            accessibility::apply_accessibility_signal(
                &mut state.accessibility_mode,
                signal,
                &lowered,
            );
        }
        if state.accessibility_mode.enabled {
            join_block(
                &mut disability_text,
                &accessibility::build_accessibility_context(&state.accessibility_mode),
            );
        }

        let deaf_signal = deaf::detect_deaf(&lowered).or_else(|| deaf_flag_signal(flags));
        if let Some(signal) = deaf_signal {
            deaf::apply_deaf_signal(&mut state.deaf_mode, signal, &lowered);
        }
        if state.deaf_mode.enabled {
            join_block(
                &mut disability_text,
                &deaf::build_deaf_context(&state.deaf_mode),
            );
        }

        // Maternal section. Safety alerts always come first and survive
        // regardless of which modes are active.
        let mut pregnancy_text = String::new();
        if let Some(alert) = check_alerts(PREGNANCY_SAFETY_ALERTS, &lowered, english) {
            pregnancy_text = format!("CRITICAL SAFETY ALERT: {alert}");
        }
        let pregnancy_detected = pregnancy::detect_pregnancy(&lowered) || flags.pregnancy_mode;
        let pregnancy_info = self.pregnancy.extract(&lowered);
        pregnancy::apply_pregnancy_info(&mut state.pregnancy_mode, pregnancy_detected, &pregnancy_info);
        if state.pregnancy_mode.enabled {
            if let Some(ctx) =
                pregnancy::build_pregnancy_context(&state.pregnancy_mode, profile, &metrics)
            {
                join_block(&mut pregnancy_text, &ctx);
            }
        }

        if let Some(alert) = check_alerts(POSTPARTUM_SAFETY_ALERTS, &lowered, english) {
            join_block(&mut pregnancy_text, &format!("CRITICAL SAFETY ALERT: {alert}"));
        }
        let postpartum_detected = postpartum::detect_postpartum(&lowered) || flags.postpartum_mode;
        let postpartum_info = self.postpartum.extract(&lowered);
        postpartum::apply_postpartum_info(&mut state.postpartum_mode, postpartum_detected, &postpartum_info);
        if state.postpartum_mode.enabled {
            if let Some(ctx) =
                postpartum::build_postpartum_context(&state.postpartum_mode, profile, &metrics)
            {
                join_block(&mut pregnancy_text, &ctx);
            }
        }

        if let Some(alert) = check_alerts(DIASTASIS_SAFETY_ALERTS, &lowered, english) {
            join_block(&mut pregnancy_text, &format!("CRITICAL SAFETY ALERT: {alert}"));
        }
        let diastasis_detected = diastasis::detect_diastasis(&lowered) || flags.diastasis_mode;
        let diastasis_info = self.diastasis.extract(&lowered);
        diastasis::apply_diastasis_info(&mut state.diastasis_mode, diastasis_detected, &diastasis_info);
        if state.diastasis_mode.enabled {
            if let Some(ctx) = diastasis::build_diastasis_context(
                &state.diastasis_mode,
                &diastasis_info,
                profile,
                &metrics,
            ) {
                join_block(&mut pregnancy_text, &ctx);
            }
        }

        // Equipment instructions replace any workout text; an adaptive plan
        // appends to whatever is there.
        let equipment_requested =
            signals::mentions_gym_equipment(&lowered) || flags.equipment_image;
        let mut workout_text = String::new();
        if equipment_requested {
            if let Some(equipment) = recognize_equipment(&lowered) {
                workout_text = workout::equipment_instructions_context(equipment, english);
            }
        }
        if workout::should_offer_adaptive_plan(
            &lowered,
            state,
            last_workout_ts,
            now,
            self.config.behavior.prompt_cooldown_seconds,
        ) {
            if let Some(ctx) = workout::adaptive_plan_context(
                profile,
                &metrics,
                state,
                last_workout_ts,
                now,
                base_progress,
            ) {
                join_block(&mut workout_text, &ctx);
            }
        }

        let mentions_missing = self.ingredients.mentions_missing(&lowered);
        let mut nutrition_text = String::new();
        if nutrition::should_offer_adaptive_nutrition(
            &lowered,
            mentions_missing,
            state,
            last_workout_ts,
            now,
            self.config.behavior.prompt_cooldown_seconds,
        ) {
            let missing_ingredients = self.ingredients.extract(&lowered);
            if let Some(ctx) = nutrition::adaptive_nutrition_context(
                profile,
                &metrics,
                state,
                last_workout_ts,
                now,
                &lowered,
                emotion,
                &missing_ingredients,
                base_progress,
            ) {
                nutrition_text = ctx;
            }
        }

        let mut video_text = String::new();
        if media::should_suggest_video(&lowered, emotion) {
            let video = if state.pregnancy_mode.enabled {
                media::recommend_mode_video(
                    PREGNANCY_VIDEOS,
                    &mut state.pregnancy_mode.used_videos,
                    rng,
                )
            } else if state.postpartum_mode.enabled {
                media::recommend_mode_video(
                    POSTPARTUM_VIDEOS,
                    &mut state.postpartum_mode.used_videos,
                    rng,
                )
            } else if state.diastasis_mode.enabled {
                media::recommend_mode_video(
                    DIASTASIS_VIDEOS,
                    &mut state.diastasis_mode.used_videos,
                    rng,
                )
            } else if state.disability_info.has_special_needs() {
                let category = disability::adaptive_video_category(&state.disability_info);
                media::recommend_adaptive_video(
                    ADAPTIVE_VIDEOS,
                    category,
                    &mut state.used_videos,
                    rng,
                )
            } else if equipment_requested {
                media::recommend_mode_video(
                    GYM_EQUIPMENT_VIDEOS,
                    &mut state.used_equipment_videos,
                    rng,
                )
            } else {
                media::recommend_general_video(state, rng)
            };
            if let Some(video) = video {
                video_text = format!(
                    "Video recommendation: {}",
                    media::format_video_info(video)
                );
            }
        }

        let mut image_text = String::new();
        if signals::asks_for_exercise_image(&lowered) {
            if state.accessibility_mode.visual_impairment == VisualImpairment::Blind {
                image_text = format!(
                    "User is BLIND. Provide audio description: {}",
                    accessibility::audio_exercise_description("exercise", english)
                );
            } else if state.disability_info.has_special_needs() {
                let image = disability::adaptive_exercise_image(&state.disability_info);
                image_text = format!(
                    "Exercise image: {} - {} - {}",
                    image.name, image.url, image.description
                );
            } else if let Some((_, image)) = media::resolve_exercise_image(&lowered, state) {
                image_text = format!(
                    "Exercise image: {} - {} - {}",
                    image.name, image.url, image.description
                );
            }
        }

        let notifications = inactivity::generate_notifications(
            state,
            now,
            self.config.behavior.checkin_after_hours,
        );
        let notifications_text = if notifications.is_empty() {
            String::new()
        } else {
            format!("System reminders: {}", notifications.join(", "))
        };

        let mut parts: Vec<String> = Vec::new();
        push_section(&mut parts, "User profile", &profile_text);
        push_section(&mut parts, "Detected factors", &detected_text);
        push_section(&mut parts, "Workout context", &workout_text);
        push_section(&mut parts, "Nutrition context", &nutrition_text);
        push_section(&mut parts, "Pregnancy context", &pregnancy_text);
        push_section(&mut parts, "Disability context", &disability_text);
        push_section(&mut parts, "Inactivity context", &inactivity_text);
        push_section(&mut parts, "Video context", &video_text);
        push_section(&mut parts, "Image context", &image_text);
        push_section(&mut parts, "Notifications", &notifications_text);
        parts.push(format!("User message: {message}"));

        PreparedTurn {
            turn_id,
            context: parts.join("\n\n"),
            workout_completed,
        }
    }
}

fn or_unknown<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "Unknown".to_string(), |v| v.to_string())
}

fn join_block(target: &mut String, text: &str) {
    if target.is_empty() {
        target.push_str(text);
    } else {
        target.push('\n');
        target.push_str(text);
    }
}

fn push_section(parts: &mut Vec<String>, label: &str, text: &str) {
    let trimmed = text.trim();
    if !trimmed.is_empty() {
        parts.push(format!("{label}:\n{trimmed}"));
    }
}

fn accessibility_flag_signal(flags: &ClientFlags) -> Option<AccessibilitySignal> {
    if flags.accessibility_mode {
        return Some(AccessibilitySignal::Enable);
    }
    match flags.visual_impairment.as_deref() {
        Some("blind") => Some(AccessibilitySignal::Blind),
        Some("low_vision") => Some(AccessibilitySignal::LowVision),
        _ => None,
    }
}

fn deaf_flag_signal(flags: &ClientFlags) -> Option<DeafSignal> {
    if flags.deaf_mode {
        return Some(DeafSignal::Enable);
    }
    match flags.hearing_impairment.as_deref() {
        Some("deaf") => Some(DeafSignal::Deaf),
        Some("hard_of_hearing") => Some(DeafSignal::HardOfHearing),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryProfileStore, MemoryWorkoutLog};
    use chrono::{Duration, TimeZone};

    fn engine() -> CoachEngine {
        let mut config = CoachConfig::default();
        config.completion.api_key = Some("sk-test".to_string());
        config.rng_seed = Some(7);
        CoachEngine::new(
            config,
            Arc::new(MemoryProfileStore::new()),
            Arc::new(MemoryWorkoutLog::new()),
        )
        .unwrap()
    }

    fn engine_with_profiles(profiles: Arc<MemoryProfileStore>) -> CoachEngine {
        let mut config = CoachConfig::default();
        config.completion.api_key = Some("sk-test".to_string());
        config.rng_seed = Some(7);
        CoachEngine::new(config, profiles, Arc::new(MemoryWorkoutLog::new())).unwrap()
    }

    fn profile() -> UserProfile {
        let mut profile = UserProfile::new(UserId::new());
        profile.name = Some("Sara".to_string());
        profile.age = Some(30);
        profile.gender = Some("female".to_string());
        profile.height_cm = Some(165.0);
        profile.weight_kg = Some(70.0);
        profile.target_weight_kg = Some(60.0);
        profile.goal = Some("weight loss".to_string());
        profile.activity_level = Some("moderate".to_string());
        profile
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).single().unwrap()
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn context_starts_with_profile_and_ends_with_message() {
        let engine = engine();
        let profile = profile();
        let mut state = UserBehaviorState::default();
        let prepared = engine.prepare_turn(
            &profile,
            &mut state,
            "hello coach",
            &ClientFlags::default(),
            None,
            now(),
            &mut rng(),
        );

        assert!(prepared.context.starts_with("User profile:\nUser name: Sara\n"));
        assert!(prepared.context.contains("User language: english"));
        assert!(prepared.context.ends_with("User message: hello coach"));
        assert!(!prepared.workout_completed);
    }

    #[test]
    fn missing_profile_fields_read_unknown() {
        let engine = engine();
        let profile = UserProfile::new(UserId::new());
        let mut state = UserBehaviorState::default();
        let prepared = engine.prepare_turn(
            &profile,
            &mut state,
            "hi",
            &ClientFlags::default(),
            None,
            now(),
            &mut rng(),
        );

        assert!(prepared.context.contains("Age: Unknown"));
        assert!(prepared.context.contains("Current weight: Unknown kg"));
        assert!(!prepared.context.contains("BMI:"));
    }

    #[test]
    fn workout_completion_boosts_progress_and_flags_turn() {
        let engine = engine();
        let profile = profile();
        let mut state = UserBehaviorState::default();
        let prepared = engine.prepare_turn(
            &profile,
            &mut state,
            "i finished my workout today",
            &ClientFlags::default(),
            None,
            now(),
            &mut rng(),
        );

        assert!(prepared.workout_completed);
        assert_eq!(state.workout_count_this_week, 1);
        assert_eq!(state.last_workout_logged, Some(now()));
        assert!(prepared
            .context
            .contains("Progress increased by 3.0% due to workout completion."));
    }

    #[test]
    fn pregnancy_alert_leads_the_maternal_section() {
        let engine = engine();
        let profile = profile();
        let mut state = UserBehaviorState::default();
        let prepared = engine.prepare_turn(
            &profile,
            &mut state,
            "i am pregnant in month 5 and i have bleeding",
            &ClientFlags::default(),
            None,
            now(),
            &mut rng(),
        );

        assert!(state.pregnancy_mode.enabled);
        assert_eq!(state.pregnancy_mode.trimester, Some(2));
        let section = prepared
            .context
            .split("\n\n")
            .find(|p| p.starts_with("Pregnancy context:"))
            .unwrap();
        assert!(section.starts_with("Pregnancy context:\nCRITICAL SAFETY ALERT: "));
        assert!(section.contains("PREGNANCY FITNESS MODE"));
    }

    #[test]
    fn blind_users_get_audio_description_instead_of_image() {
        let engine = engine();
        let profile = profile();
        let mut state = UserBehaviorState::default();
        state.accessibility_mode.enabled = true;
        state.accessibility_mode.visual_impairment = VisualImpairment::Blind;
        state.accessibility_mode.voice_friendly = true;

        let prepared = engine.prepare_turn(
            &profile,
            &mut state,
            "show me a picture of the squat exercise",
            &ClientFlags::default(),
            None,
            now(),
            &mut rng(),
        );

        assert!(prepared
            .context
            .contains("User is BLIND. Provide audio description:"));
        assert!(!prepared.context.contains("Exercise image:"));
    }

    #[test]
    fn client_flags_enable_modes_without_keywords() {
        let engine = engine();
        let profile = profile();
        let mut state = UserBehaviorState::default();
        let flags = ClientFlags {
            deaf_mode: true,
            ..ClientFlags::default()
        };
        engine.prepare_turn(
            &profile,
            &mut state,
            "what should i train today",
            &flags,
            None,
            now(),
            &mut rng(),
        );

        assert!(state.deaf_mode.enabled);
        assert_eq!(
            state.deaf_mode.hearing_impairment,
            HearingImpairment::HardOfHearing
        );
    }

    #[test]
    fn inactivity_gap_and_checkin_share_the_section() {
        let engine = engine();
        let profile = profile();
        let mut state = UserBehaviorState::default();
        let last_workout = Some(now() - Duration::days(5));
        let prepared = engine.prepare_turn(
            &profile,
            &mut state,
            "hello",
            &ClientFlags::default(),
            last_workout,
            now(),
            &mut rng(),
        );

        let section = prepared
            .context
            .split("\n\n")
            .find(|p| p.starts_with("Inactivity context:"))
            .unwrap();
        assert!(section.contains("User hasn't logged a workout in 5 days"));
        assert!(section.contains("Sara"));
        assert!(state.last_workout_prompt_sent_at.is_some());
    }

    #[tokio::test]
    async fn blank_message_is_rejected() {
        let engine = engine();
        let result = engine
            .send_message(UserId::new(), "   ", &ClientFlags::default())
            .await;
        assert!(matches!(result, Err(CoachError::MissingMessage)));
    }

    #[tokio::test]
    async fn unknown_user_is_a_precondition_error() {
        let profiles = Arc::new(MemoryProfileStore::new());
        let engine = engine_with_profiles(profiles);
        let result = engine
            .send_message(UserId::new(), "hello", &ClientFlags::default())
            .await;
        assert!(matches!(result, Err(CoachError::MissingProfile(_))));
    }

    #[test]
    fn each_prepared_turn_carries_a_fresh_id() {
        let engine = engine();
        let profile = profile();
        let mut state = UserBehaviorState::default();
        let first = engine.prepare_turn(
            &profile,
            &mut state,
            "hello",
            &ClientFlags::default(),
            None,
            now(),
            &mut rng(),
        );
        let second = engine.prepare_turn(
            &profile,
            &mut state,
            "hi again",
            &ClientFlags::default(),
            None,
            now(),
            &mut rng(),
        );
        assert_ne!(first.turn_id, second.turn_id);
    }

    #[test]
    fn turn_flags_snapshot_modes() {
        let mut state = UserBehaviorState::default();
        state.postpartum_mode.enabled = true;
        state.postpartum_mode.phase = Some(2);
        state.accessibility_mode.enabled = true;
        state.accessibility_mode.visual_impairment = VisualImpairment::LowVision;

        let flags = TurnFlags::from_state(&state);
        assert!(flags.postpartum_mode);
        assert_eq!(flags.postpartum_phase, Some(2));
        assert!(flags.accessibility_mode);
        assert_eq!(flags.visual_impairment, VisualImpairment::LowVision);
        assert!(!flags.deaf_mode);
    }
}
