//! Published course lookup.

use axum::{
    Json,
    extract::{Path, State},
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::CATALOG_TAG;
use crate::api::dto::{CourseResponse, ErrorResponse};
use crate::error::AppResult;
use crate::state::AppState;

pub fn course_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(get_course))
}

/// GET /api/courses/{id} - A published course
///
/// Drafts and archived courses answer 404, exactly like unknown ids.
#[utoipa::path(
    get,
    path = "/{id}",
    tag = CATALOG_TAG,
    params(
        ("id" = String, Path, description = "Course identifier")
    ),
    responses(
        (status = 200, description = "The course with its category and enrollment count", body = CourseResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<CourseResponse>> {
    let record = state
        .services
        .catalog
        .get_published_course(&id)
        .await
        .inspect_err(super::log_failure)?;

    Ok(Json(CourseResponse::from(record)))
}
