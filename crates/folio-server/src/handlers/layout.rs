//! Layout API endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use folio_site::LayoutData;

use crate::error::ServerError;
use crate::state::AppState;

/// Handle GET /api/layout/ (root route).
pub(crate) async fn get_root_layout(
    State(state): State<Arc<AppState>>,
) -> Result<Json<LayoutData>, ServerError> {
    Ok(Json(state.site.load_layout("").await?))
}

/// Handle GET /api/layout/{slug}.
pub(crate) async fn get_layout(
    Path(slug): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<LayoutData>, ServerError> {
    Ok(Json(state.site.load_layout(&slug).await?))
}
