//! Sibling reorder handler.

use axum::Json;
use axum::extract::State;

use crate::dto::request::ReorderRequest;
use crate::dto::response::{ApiResponse, ReorderResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/items/reorder — apply a batch of position updates.
pub async fn reorder_items(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<ReorderRequest>,
) -> Result<Json<ApiResponse<ReorderResponse>>, ApiError> {
    let moved = state.reorder_service.reorder_items(&auth, &req.items).await?;
    Ok(Json(ApiResponse::ok(ReorderResponse { moved })))
}
