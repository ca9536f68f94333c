//! HTTP route handlers for the coaching API.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::engine::{ClientFlags, CoachError, TurnId, TurnReply, UserId, UserProfile};

use super::state::AppState;

/// Create the API router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/chat", post(chat_turn))
        .route("/api/profile", put(upsert_profile))
        .route("/api/profile/{user_id}", get(get_profile))
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "fitlife-coach",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Chat turn request.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Target user.
    pub user_id: UserId,
    /// The user's message.
    pub message: String,
    /// Optional mode flags sent alongside the message.
    #[serde(flatten)]
    pub flags: ClientFlags,
}

/// Chat turn response. Mode fields appear only while their mode is active.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// Identifier of the committed turn.
    pub turn_id: TurnId,
    /// Coach reply text.
    pub message: String,
    /// Accessibility mode active.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accessibility_mode: Option<bool>,
    /// Visual impairment level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visual_impairment: Option<&'static str>,
    /// Deaf mode active.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deaf_mode: Option<bool>,
    /// Hearing impairment level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hearing_impairment: Option<&'static str>,
    /// Postpartum mode active.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postpartum_mode: Option<bool>,
    /// Postpartum recovery phase.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postpartum_phase: Option<u8>,
    /// Diastasis mode active.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diastasis_mode: Option<bool>,
    /// Diastasis healing stage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diastasis_stage: Option<u8>,
}

impl From<TurnReply> for ChatResponse {
    fn from(reply: TurnReply) -> Self {
        let flags = reply.flags;
        let mut response = Self {
            turn_id: reply.turn_id,
            message: reply.message,
            accessibility_mode: None,
            visual_impairment: None,
            deaf_mode: None,
            hearing_impairment: None,
            postpartum_mode: None,
            postpartum_phase: None,
            diastasis_mode: None,
            diastasis_stage: None,
        };
        if flags.accessibility_mode {
            response.accessibility_mode = Some(true);
            response.visual_impairment = Some(flags.visual_impairment.as_str());
        }
        if flags.deaf_mode {
            response.deaf_mode = Some(true);
            response.hearing_impairment = Some(flags.hearing_impairment.as_str());
        }
        if flags.postpartum_mode {
            response.postpartum_mode = Some(true);
            response.postpartum_phase = flags.postpartum_phase;
        }
        if flags.diastasis_mode {
            response.diastasis_mode = Some(true);
            response.diastasis_stage = flags.diastasis_stage;
        }
        response
    }
}

/// Handle one chat turn.
async fn chat_turn(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, String)> {
    let reply = state
        .engine
        .send_message(request.user_id, &request.message, &request.flags)
        .await
        .map_err(error_response)?;
    Ok(Json(ChatResponse::from(reply)))
}

/// Profile upsert request: everything but the id is optional.
#[derive(Debug, Deserialize)]
pub struct ProfileRequest {
    /// Target user.
    pub user_id: UserId,
    /// Preferred display name.
    pub name: Option<String>,
    /// Account username.
    pub username: Option<String>,
    /// Age in years.
    pub age: Option<u32>,
    /// Height in centimeters.
    pub height_cm: Option<f64>,
    /// Current weight in kilograms.
    pub weight_kg: Option<f64>,
    /// Target weight in kilograms.
    pub target_weight_kg: Option<f64>,
    /// Free-text goal.
    pub goal: Option<String>,
    /// Free-text activity level.
    pub activity_level: Option<String>,
    /// Free-text gender.
    pub gender: Option<String>,
    /// Free-text health notes.
    pub health_notes: Option<String>,
}

/// Create or replace a profile.
async fn upsert_profile(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ProfileRequest>,
) -> Result<Json<UserProfile>, (StatusCode, String)> {
    let existing = state
        .profiles
        .get_profile(request.user_id)
        .await
        .map_err(error_response)?;

    let mut profile = existing.unwrap_or_else(|| UserProfile::new(request.user_id));
    profile.name = request.name;
    profile.username = request.username;
    profile.age = request.age;
    profile.height_cm = request.height_cm;
    profile.weight_kg = request.weight_kg;
    profile.target_weight_kg = request.target_weight_kg;
    profile.goal = request.goal;
    profile.activity_level = request.activity_level;
    profile.gender = request.gender;
    profile.health_notes = request.health_notes;
    profile.updated_at = Utc::now();

    state
        .profiles
        .save_profile(&profile)
        .await
        .map_err(error_response)?;
    Ok(Json(profile))
}

/// Fetch a stored profile.
async fn get_profile(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<UserId>,
) -> Result<Json<UserProfile>, (StatusCode, String)> {
    let profile = state
        .profiles
        .get_profile(user_id)
        .await
        .map_err(error_response)?
        .ok_or((
            StatusCode::NOT_FOUND,
            format!("no profile found for user {user_id}"),
        ))?;
    Ok(Json(profile))
}

/// Map engine errors onto HTTP status codes. Precondition failures are the
/// caller's fault; upstream completion failures surface as a bad gateway.
fn error_response(error: CoachError) -> (StatusCode, String) {
    let status = match &error {
        CoachError::MissingMessage | CoachError::MissingProfile(_) => StatusCode::BAD_REQUEST,
        CoachError::Upstream { .. } | CoachError::Http(_) | CoachError::EmptyCompletion => {
            StatusCode::BAD_GATEWAY
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        warn!(%error, "request failed");
    }
    (status, error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{HearingImpairment, TurnFlags, VisualImpairment};

    fn reply_with(flags: TurnFlags) -> TurnReply {
        TurnReply {
            turn_id: TurnId::from_uuid(uuid::Uuid::nil()),
            message: "ok".to_string(),
            flags,
        }
    }

    #[test]
    fn inactive_modes_are_omitted_from_the_response() {
        let response = ChatResponse::from(reply_with(TurnFlags::default()));
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "turn_id": "00000000-0000-0000-0000-000000000000",
                "message": "ok"
            })
        );
    }

    #[test]
    fn active_modes_carry_their_sub_state() {
        let flags = TurnFlags {
            accessibility_mode: true,
            visual_impairment: VisualImpairment::Blind,
            deaf_mode: true,
            hearing_impairment: HearingImpairment::Deaf,
            postpartum_mode: true,
            postpartum_phase: Some(2),
            diastasis_mode: true,
            diastasis_stage: Some(3),
        };
        let json = serde_json::to_value(ChatResponse::from(reply_with(flags))).unwrap();
        assert_eq!(json["accessibility_mode"], serde_json::json!(true));
        assert_eq!(json["visual_impairment"], serde_json::json!("blind"));
        assert_eq!(json["hearing_impairment"], serde_json::json!("deaf"));
        assert_eq!(json["postpartum_phase"], serde_json::json!(2));
        assert_eq!(json["diastasis_stage"], serde_json::json!(3));
    }

    #[test]
    fn error_statuses() {
        let (status, _) = error_response(CoachError::MissingMessage);
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = error_response(CoachError::Upstream {
            status: 401,
            body: "Invalid API key".to_string(),
        });
        assert_eq!(status, StatusCode::BAD_GATEWAY);

        let (status, body) = error_response(CoachError::EmptyCompletion);
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body.contains("empty reply"));
    }
}
