use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::extractors::SessionUser,
    error::ApiError,
    profile::{
        dto::{ProfileResponse, UpdateProfileRequest},
        repo,
    },
    state::AppState,
};

pub fn profile_routes() -> Router<AppState> {
    Router::new().route("/profile/:id", get(get_profile).put(update_profile))
}

/// Profiles are publicly readable; any read-only UX gating belongs to the client.
#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let profile = repo::fetch(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Profile not found".into()))?;

    Ok(Json(ProfileResponse { profile }))
}

#[instrument(skip(state, payload))]
pub async fn update_profile(
    State(state): State<AppState>,
    SessionUser(user_id): SessionUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, ApiError> {
    if user_id != id {
        warn!(user_id, profile_id = id, "profile update identity mismatch");
        return Err(ApiError::Forbidden);
    }

    let profile = repo::update(
        &state.db,
        id,
        payload.display_name.as_deref(),
        payload.bio.as_deref(),
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Profile not found".into()))?;

    info!(user_id, "profile updated");
    Ok(Json(ProfileResponse { profile }))
}
