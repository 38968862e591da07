use axum::{extract::State, Extension, Json};
use serde::Serialize;

use crate::middleware::RequestId;

use super::{map_store_error, ApiError, ApiResponse, AppState};

#[derive(Debug, Serialize)]
pub(super) struct OpeningFlag {
    shown: bool,
}

pub(super) async fn get_opening(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<OpeningFlag>>, ApiError> {
    let shown = state
        .session
        .opening_shown()
        .map_err(|e| map_store_error(req_id.0.clone(), &e))?;
    Ok(Json(ApiResponse::new(req_id.0, OpeningFlag { shown })))
}

pub(super) async fn mark_opening(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<OpeningFlag>>, ApiError> {
    state
        .session
        .mark_opening_shown()
        .map_err(|e| map_store_error(req_id.0.clone(), &e))?;
    Ok(Json(ApiResponse::new(req_id.0, OpeningFlag { shown: true })))
}
