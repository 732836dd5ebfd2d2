//! Certificates of the authenticated caller.

use axum::{Extension, Json, extract::State, middleware};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::CERTIFICATE_TAG;
use crate::api::dto::{CertificateResponse, ErrorResponse};
use crate::api::middleware::{AuthUser, auth_middleware};
use crate::error::AppResult;
use crate::state::AppState;

/// Every route here sits behind [`auth_middleware`].
pub fn certificate_routes(state: AppState) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_certificates))
        .layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// GET /api/certificates - Certificates issued to the caller, newest first
#[utoipa::path(
    get,
    path = "/",
    tag = CERTIFICATE_TAG,
    responses(
        (status = 200, description = "Caller's certificates", body = Vec<CertificateResponse>),
        (status = 401, description = "No session or no user on the session", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    security(
        ("bearerAuth" = [])
    )
)]
async fn list_certificates(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Vec<CertificateResponse>>> {
    let records = state
        .services
        .certificates
        .list_for_user(&auth_user.user_id)
        .await
        .inspect_err(super::log_failure)?;

    Ok(Json(
        records.into_iter().map(CertificateResponse::from).collect(),
    ))
}
