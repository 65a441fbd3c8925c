use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::extractors::SessionUser,
    error::ApiError,
    shapes::{
        dto::{
            CreateShapeRequest, DeleteShapeRequest, DeleteShapeResponse, ShapeResponse,
            ShapesResponse, UpdateShapeRequest,
        },
        repo,
    },
    state::AppState,
};

pub fn shape_routes() -> Router<AppState> {
    Router::new().route(
        "/shapes/:id",
        get(list_shapes)
            .post(create_shape)
            .put(update_shape)
            .delete(delete_shape),
    )
}

/// Reads are public; mutations below require the session to match the owner
/// in the path.
#[instrument(skip(state))]
pub async fn list_shapes(
    State(state): State<AppState>,
    Path(owner_id): Path<i32>,
) -> Result<Json<ShapesResponse>, ApiError> {
    let shapes = repo::list_by_owner(&state.db, owner_id).await?;
    Ok(Json(ShapesResponse { shapes }))
}

#[instrument(skip(state, payload))]
pub async fn create_shape(
    State(state): State<AppState>,
    SessionUser(user_id): SessionUser,
    Path(owner_id): Path<i32>,
    payload: Option<Json<CreateShapeRequest>>,
) -> Result<Json<ShapeResponse>, ApiError> {
    if user_id != owner_id {
        warn!(user_id, owner_id, "shape create identity mismatch");
        return Err(ApiError::Forbidden);
    }

    // Missing body means a default shape at the origin.
    let payload = payload.map(|Json(p)| p).unwrap_or_default();

    let shape = repo::create(
        &state.db,
        owner_id,
        payload.x,
        payload.y,
        &payload.color,
        payload.size,
    )
    .await?;

    info!(shape_id = shape.id, owner_id, "shape created");
    Ok(Json(ShapeResponse { shape }))
}

#[instrument(skip(state, payload))]
pub async fn update_shape(
    State(state): State<AppState>,
    SessionUser(user_id): SessionUser,
    Path(owner_id): Path<i32>,
    Json(payload): Json<UpdateShapeRequest>,
) -> Result<Json<ShapeResponse>, ApiError> {
    if user_id != owner_id {
        warn!(user_id, owner_id, "shape update identity mismatch");
        return Err(ApiError::Forbidden);
    }

    // Zero rows matched (wrong id or wrong owner) is not-found, never a
    // silent success.
    let shape = repo::update(
        &state.db,
        owner_id,
        payload.shape_id,
        payload.x,
        payload.y,
        &payload.color,
        payload.size,
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Shape not found".into()))?;

    Ok(Json(ShapeResponse { shape }))
}

/// Deletion is idempotent: success whether or not a row matched.
#[instrument(skip(state, payload))]
pub async fn delete_shape(
    State(state): State<AppState>,
    SessionUser(user_id): SessionUser,
    Path(owner_id): Path<i32>,
    Json(payload): Json<DeleteShapeRequest>,
) -> Result<Json<DeleteShapeResponse>, ApiError> {
    if user_id != owner_id {
        warn!(user_id, owner_id, "shape delete identity mismatch");
        return Err(ApiError::Forbidden);
    }

    repo::delete(&state.db, owner_id, payload.shape_id).await?;
    Ok(Json(DeleteShapeResponse { success: true }))
}
