//! Session authentication middleware.
//!
//! Resolves the caller's session before the handler runs and stores the
//! user identifier in request extensions.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::error::AppError;
use crate::state::AppState;

/// Authenticated caller, extracted in handlers with `Extension<AuthUser>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: String,
}

/// Rejects the request with 401 unless the session carries a user ID.
///
/// The handler, and therefore the store, is never reached for an
/// anonymous caller. A failing session provider is a 500.
///
/// # Example
/// ```ignore
/// OpenApiRouter::new()
///     .routes(routes!(list_certificates))
///     .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
/// ```
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let session = state.sessions.session(request.headers()).await?;

    let user_id = session
        .and_then(|s| s.user_id)
        .ok_or_else(AppError::unauthorized)?;

    request.extensions_mut().insert(AuthUser { user_id });
    Ok(next.run(request).await)
}
