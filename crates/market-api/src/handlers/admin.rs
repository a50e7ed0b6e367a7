//! Administrative handlers

use axum::{
    extract::{Path, State},
    Json,
};
use market_core::PrincipalId;
use market_service::{PrincipalDirectory, PrincipalResponse};

use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

/// Look up a principal by id
///
/// GET /api/admin/principals/:id
pub async fn get_principal(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<PrincipalResponse>> {
    let id = PrincipalId::parse(&raw_id).map_err(|e| ApiError::invalid_path(e.to_string()))?;
    let directory = PrincipalDirectory::new(state.service_context());
    Ok(Json(directory.get(id).await?))
}
