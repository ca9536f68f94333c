//! Video and image recommendation helpers.

use rand::rngs::StdRng;

use crate::catalog::images::{find_exercise_image, ExerciseImage};
use crate::catalog::videos::{AdaptiveCategory, AdaptiveVideo, Video, EXERCISE_VIDEOS};
use crate::detect::emotion::Emotion;
use crate::detect::signals;
use crate::engine::selector::pick_unseen;
use crate::engine::state::UserBehaviorState;

/// Whether to recommend a video this turn: an explicit request, or a stuck
/// user in a low mood.
#[must_use]
pub fn should_suggest_video(lowered: &str, emotion: Emotion) -> bool {
    if signals::asks_for_video(lowered) {
        return true;
    }
    signals::seems_stuck(lowered)
        && matches!(
            emotion,
            Emotion::Unmotivated | Emotion::Tired | Emotion::Stressed
        )
}

/// Wrap a URL in the clickable HTML form replies are required to use.
#[must_use]
pub fn format_clickable_video_url(url: &str) -> String {
    format!("<a href='{url}' target='_blank'>{url}</a>")
}

/// Render a video as the multi-line block embedded in the prompt.
#[must_use]
pub fn format_video_info(video: &Video) -> String {
    format!(
        "Title: {}\nDuration: {}\nDifficulty: {}\nLink: {}\nDescription: {}",
        video.title,
        video.duration,
        video.difficulty,
        format_clickable_video_url(video.link),
        video.description.unwrap_or("N/A")
    )
}

/// Pick from the general pool, skipping titles containing a disliked
/// exercise and titles already served.
pub fn recommend_general_video<'a>(
    state: &mut UserBehaviorState,
    rng: &mut StdRng,
) -> Option<&'a Video> {
    let dislikes: Vec<String> = state
        .preferences
        .workout_dislikes
        .iter()
        .map(|d| d.to_lowercase())
        .collect();
    pick_unseen(
        EXERCISE_VIDEOS,
        &mut state.used_videos,
        |v| v.title,
        |v| {
            let title = v.title.to_lowercase();
            !dislikes.iter().any(|d| title.contains(d))
        },
        rng,
    )
}

/// Pick from a mode pool (pregnancy, postpartum, diastasis, equipment),
/// deduplicated by trainer.
pub fn recommend_mode_video<'a>(
    pool: &'a [Video],
    used: &mut Vec<String>,
    rng: &mut StdRng,
) -> Option<&'a Video> {
    pick_unseen(pool, used, |v| v.identity(), |_| true, rng)
}

/// Pick an adaptive video matching a challenge category, falling back to
/// the general adaptive entries, deduplicated by title.
pub fn recommend_adaptive_video<'a>(
    pool: &'a [AdaptiveVideo],
    category: AdaptiveCategory,
    used: &mut Vec<String>,
    rng: &mut StdRng,
) -> Option<&'a Video> {
    let picked = pick_unseen(
        pool,
        used,
        |av| av.video.title,
        |av| av.category == category || av.category == AdaptiveCategory::General,
        rng,
    )?;
    Some(&picked.video)
}

/// Resolve a form image for the requested exercise and record the key as
/// shown. Repeat requests return the same image.
pub fn resolve_exercise_image(
    lowered: &str,
    state: &mut UserBehaviorState,
) -> Option<(&'static str, &'static ExerciseImage)> {
    let (key, image) = find_exercise_image(lowered)?;
    if !state.used_images.iter().any(|u| u == key) {
        state.used_images.push(key.to_string());
    }
    Some((key, image))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::videos::{ADAPTIVE_VIDEOS, PREGNANCY_VIDEOS};
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(9)
    }

    #[test]
    fn video_gate_needs_request_or_stuck_low_mood() {
        assert!(should_suggest_video("give me video", Emotion::Neutral));
        assert!(should_suggest_video("i'm stuck", Emotion::Unmotivated));
        assert!(!should_suggest_video("i'm stuck", Emotion::Excited));
        assert!(!should_suggest_video("hello", Emotion::Tired));
    }

    #[test]
    fn video_info_block_shape() {
        let video = &EXERCISE_VIDEOS[0];
        let info = format_video_info(video);
        assert!(info.starts_with(&format!("Title: {}\n", video.title)));
        assert!(info.contains(&format!(
            "Link: <a href='{}' target='_blank'>{}</a>",
            video.link, video.link
        )));
    }

    #[test]
    fn general_pool_respects_dislikes_and_no_repeats() {
        let mut state = UserBehaviorState::default();
        let disliked = EXERCISE_VIDEOS[0].title;
        state
            .preferences
            .workout_dislikes
            .push(disliked.to_lowercase());
        let mut rng = rng();

        for _ in 0..EXERCISE_VIDEOS.len() - 1 {
            let video = recommend_general_video(&mut state, &mut rng).unwrap();
            assert_ne!(video.title, disliked);
        }
        assert_eq!(state.used_videos.len(), EXERCISE_VIDEOS.len() - 1);
    }

    #[test]
    fn mode_pool_dedupes_by_trainer() {
        let mut used = Vec::new();
        let mut rng = rng();
        let mut trainers = Vec::new();
        for _ in 0..PREGNANCY_VIDEOS.len() {
            let video = recommend_mode_video(PREGNANCY_VIDEOS, &mut used, &mut rng).unwrap();
            let trainer = video.trainer.unwrap();
            assert!(!trainers.contains(&trainer));
            trainers.push(trainer);
        }
    }

    #[test]
    fn adaptive_pool_filters_by_category() {
        let mut used = Vec::new();
        let mut rng = rng();
        let video = recommend_adaptive_video(
            ADAPTIVE_VIDEOS,
            AdaptiveCategory::Wheelchair,
            &mut used,
            &mut rng,
        )
        .unwrap();
        let matching = ADAPTIVE_VIDEOS.iter().any(|av| {
            av.video.title == video.title
                && (av.category == AdaptiveCategory::Wheelchair
                    || av.category == AdaptiveCategory::General)
        });
        assert!(matching);
    }

    #[test]
    fn image_key_recorded_once() {
        let mut state = UserBehaviorState::default();
        let (key, _) = resolve_exercise_image("show me a squat", &mut state).unwrap();
        assert_eq!(key, "squat");
        resolve_exercise_image("show me a squat", &mut state);
        assert_eq!(state.used_images, vec!["squat"]);
    }
}
