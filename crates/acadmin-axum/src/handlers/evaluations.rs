//! Evaluation handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use acadmin_core::domain::{Evaluation, EvaluationUpdate, NewEvaluation};

use crate::dto::{ApiJson, ApiPath, ApiQuery, DeletedResponse, PageQuery, SearchQuery};
use crate::error::HttpError;
use crate::state::AppState;

/// List active evaluations.
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<Json<Vec<Evaluation>>, HttpError> {
    Ok(Json(state.core.evaluations().list(query.page()?).await?))
}

pub async fn search(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> Result<Json<Vec<Evaluation>>, HttpError> {
    Ok(Json(
        state.core.evaluations().search(&query.q, query.page()?).await?,
    ))
}

pub async fn get(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Evaluation>, HttpError> {
    Ok(Json(state.core.evaluations().get(id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NewEvaluation>,
) -> Result<(StatusCode, Json<Evaluation>), HttpError> {
    let created = state.core.evaluations().create(body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Partial update; absent fields keep their current value.
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<EvaluationUpdate>,
) -> Result<Json<Evaluation>, HttpError> {
    Ok(Json(state.core.evaluations().update(id, body).await?))
}

pub async fn remove(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<DeletedResponse>, HttpError> {
    state.core.evaluations().delete(id).await?;
    Ok(Json(DeletedResponse::new(id)))
}
