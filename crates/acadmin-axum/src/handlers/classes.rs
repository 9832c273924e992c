//! Class handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use acadmin_core::domain::{Class, ClassUpdate, Evaluation, NewClass};

use crate::dto::{ApiJson, ApiPath, ApiQuery, DeletedResponse, PageQuery, SearchQuery};
use crate::error::HttpError;
use crate::state::AppState;

/// List active classes.
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<Json<Vec<Class>>, HttpError> {
    Ok(Json(state.core.classes().list(query.page()?).await?))
}

pub async fn search(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> Result<Json<Vec<Class>>, HttpError> {
    Ok(Json(
        state.core.classes().search(&query.q, query.page()?).await?,
    ))
}

pub async fn get(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Class>, HttpError> {
    Ok(Json(state.core.classes().get(id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NewClass>,
) -> Result<(StatusCode, Json<Class>), HttpError> {
    let created = state.core.classes().create(body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Partial update; absent fields keep their current value.
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<ClassUpdate>,
) -> Result<Json<Class>, HttpError> {
    Ok(Json(state.core.classes().update(id, body).await?))
}

/// Soft delete.
pub async fn remove(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<DeletedResponse>, HttpError> {
    state.core.classes().delete(id).await?;
    Ok(Json(DeletedResponse::new(id)))
}

/// Evaluations of a class, ordered by date.
pub async fn evaluations(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<Json<Vec<Evaluation>>, HttpError> {
    Ok(Json(state.core.classes().evaluations(id, query.page()?).await?))
}
