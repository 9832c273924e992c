//! The authenticated caller.

use axum::{Extension, Json};

use acadmin_core::CallerProfile;

/// Profile the gate resolved for this request.
pub async fn me(Extension(caller): Extension<CallerProfile>) -> Json<CallerProfile> {
    Json(caller)
}
