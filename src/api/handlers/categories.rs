//! Category listing.

use axum::{Json, extract::State};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::CATALOG_TAG;
use crate::api::dto::{CategoryResponse, ErrorResponse};
use crate::error::AppResult;
use crate::state::AppState;

pub fn category_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(list_categories))
}

/// GET /api/categories - List all categories sorted by name
///
/// In production a store failure yields an empty list rather than an error,
/// so pages rendering the category menu keep working.
#[utoipa::path(
    get,
    path = "/",
    tag = CATALOG_TAG,
    responses(
        (status = 200, description = "Categories ordered by name", body = Vec<CategoryResponse>),
        (status = 500, description = "Store failure (non-production only)", body = ErrorResponse)
    )
)]
async fn list_categories(State(state): State<AppState>) -> AppResult<Json<Vec<CategoryResponse>>> {
    match state.services.catalog.list_categories().await {
        Ok(categories) => Ok(Json(
            categories.into_iter().map(CategoryResponse::from).collect(),
        )),
        Err(err) => {
            super::log_failure(&err);
            if state.environment.is_production() {
                return Ok(Json(Vec::new()));
            }
            Err(err)
        }
    }
}
