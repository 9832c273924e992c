//! Role handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use acadmin_core::domain::{NewRole, Role, RoleUpdate};

use crate::dto::{ApiJson, ApiPath, ApiQuery, DeletedResponse, PageQuery, SearchQuery};
use crate::error::HttpError;
use crate::state::AppState;

/// List active roles.
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<Json<Vec<Role>>, HttpError> {
    Ok(Json(state.core.roles().list(query.page()?).await?))
}

pub async fn search(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> Result<Json<Vec<Role>>, HttpError> {
    Ok(Json(
        state.core.roles().search(&query.q, query.page()?).await?,
    ))
}

pub async fn get(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Role>, HttpError> {
    Ok(Json(state.core.roles().get(id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NewRole>,
) -> Result<(StatusCode, Json<Role>), HttpError> {
    let created = state.core.roles().create(body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Partial update; absent fields keep their current value.
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<RoleUpdate>,
) -> Result<Json<Role>, HttpError> {
    Ok(Json(state.core.roles().update(id, body).await?))
}

/// Soft delete.
pub async fn remove(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<DeletedResponse>, HttpError> {
    state.core.roles().delete(id).await?;
    Ok(Json(DeletedResponse::new(id)))
}
