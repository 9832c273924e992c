//! Authorization gate applied to every `/api/v1` route.

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use acadmin_identity::extract_bearer;

use crate::error::HttpError;
use crate::state::AppState;

/// Resolve the bearer token and admit IT administrators only.
///
/// On success the [`CallerProfile`](acadmin_core::CallerProfile) is stored in
/// the request extensions for handlers that need it.
pub async fn require_it_admin(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, HttpError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(extract_bearer)
        .map(str::to_owned);

    let caller = state.access.authorize(token.as_deref()).await.map_err(|e| {
        tracing::debug!(path = %req.uri().path(), error = %e, "request rejected by gate");
        HttpError::from(e)
    })?;

    req.extensions_mut().insert(caller);
    Ok(next.run(req).await)
}
