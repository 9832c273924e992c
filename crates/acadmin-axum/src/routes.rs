//! Route definitions and router construction.

use axum::Router;
use axum::http::HeaderValue;
use axum::middleware;
use axum::routing::get;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::auth::require_it_admin;
use crate::bootstrap::{AxumContext, CorsConfig};
use crate::handlers::{
    campuses, classes, evaluations, me, roles, salaries, schedules, spaces, users,
};
use crate::state::AppState;

/// Versioned prefix every resource route is nested under.
pub const API_PREFIX: &str = "/api/v1";

/// Build CORS layer from configuration.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    match config {
        CorsConfig::AllowAll => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        CorsConfig::AllowOrigins(origins) => {
            let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            CorsLayer::new()
                .allow_origin(allowed)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    }
}

/// Register the standard CRUD + search routes of one resource.
macro_rules! resource {
    ($router:expr, $path:literal, $handlers:ident) => {
        $router
            .route(
                $path,
                get($handlers::list).post($handlers::create),
            )
            .route(concat!($path, "/search"), get($handlers::search))
            .route(
                concat!($path, "/{id}"),
                get($handlers::get)
                    .put($handlers::update)
                    .delete($handlers::remove),
            )
    };
}

/// All API routes without the version prefix.
///
/// Returns a router typed as `Router<AppState>` WITHOUT `.with_state()`
/// applied; the caller nests it under [`API_PREFIX`].
pub(crate) fn api_routes() -> Router<AppState> {
    let router = Router::new();
    let router = resource!(router, "/roles", roles);
    let router = resource!(router, "/salaries", salaries);
    let router = resource!(router, "/users", users);
    let router = resource!(router, "/campuses", campuses);
    let router = resource!(router, "/spaces", spaces);
    let router = resource!(router, "/schedules", schedules);
    let router = resource!(router, "/classes", classes);
    let router = resource!(router, "/evaluations", evaluations);

    router
        .route("/users/{id}/classes", get(users::classes))
        .route("/campuses/{id}/spaces", get(campuses::spaces))
        .route("/classes/{id}/evaluations", get(classes::evaluations))
        .route("/me", get(me::me))
}

/// Create the main Axum router.
///
/// `/health` is public; everything under `/api/v1` goes through the
/// authorization gate. Axum 0.8 uses brace syntax for path parameters.
pub fn create_router(ctx: AxumContext, cors_config: &CorsConfig) -> Router {
    let state: AppState = Arc::new(ctx);
    let cors = build_cors_layer(cors_config);
    let gate = middleware::from_fn_with_state(state.clone(), require_it_admin);

    let api = api_routes()
        .route_layer(gate)
        .with_state(state)
        .layer(cors);

    Router::new()
        .route("/health", get(health_check))
        .nest(API_PREFIX, api)
        .layer(TraceLayer::new_for_http())
}

/// Health check endpoint.
pub(crate) async fn health_check() -> &'static str {
    "OK"
}
