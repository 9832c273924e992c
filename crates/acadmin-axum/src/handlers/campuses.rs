//! Campus handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use acadmin_core::domain::{Campus, CampusUpdate, NewCampus, Space};

use crate::dto::{ApiJson, ApiPath, ApiQuery, DeletedResponse, PageQuery, SearchQuery};
use crate::error::HttpError;
use crate::state::AppState;

/// List active campuses.
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<Json<Vec<Campus>>, HttpError> {
    Ok(Json(state.core.campuses().list(query.page()?).await?))
}

pub async fn search(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> Result<Json<Vec<Campus>>, HttpError> {
    Ok(Json(
        state.core.campuses().search(&query.q, query.page()?).await?,
    ))
}

pub async fn get(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Campus>, HttpError> {
    Ok(Json(state.core.campuses().get(id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NewCampus>,
) -> Result<(StatusCode, Json<Campus>), HttpError> {
    let created = state.core.campuses().create(body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Partial update; absent fields keep their current value.
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<CampusUpdate>,
) -> Result<Json<Campus>, HttpError> {
    Ok(Json(state.core.campuses().update(id, body).await?))
}

/// Soft delete.
pub async fn remove(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<DeletedResponse>, HttpError> {
    state.core.campuses().delete(id).await?;
    Ok(Json(DeletedResponse::new(id)))
}

/// Spaces that belong to a campus.
pub async fn spaces(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<Json<Vec<Space>>, HttpError> {
    Ok(Json(state.core.campuses().spaces(id, query.page()?).await?))
}
