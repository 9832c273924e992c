//! Salary handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use acadmin_core::domain::{NewSalary, Salary, SalaryUpdate};

use crate::dto::{ApiJson, ApiPath, ApiQuery, DeletedResponse, PageQuery, SearchQuery};
use crate::error::HttpError;
use crate::state::AppState;

/// List active salary bands.
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<Json<Vec<Salary>>, HttpError> {
    Ok(Json(state.core.salaries().list(query.page()?).await?))
}

pub async fn search(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> Result<Json<Vec<Salary>>, HttpError> {
    Ok(Json(
        state.core.salaries().search(&query.q, query.page()?).await?,
    ))
}

pub async fn get(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Salary>, HttpError> {
    Ok(Json(state.core.salaries().get(id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NewSalary>,
) -> Result<(StatusCode, Json<Salary>), HttpError> {
    let created = state.core.salaries().create(body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Partial update; absent fields keep their current value.
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<SalaryUpdate>,
) -> Result<Json<Salary>, HttpError> {
    Ok(Json(state.core.salaries().update(id, body).await?))
}

/// Soft delete.
pub async fn remove(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<DeletedResponse>, HttpError> {
    state.core.salaries().delete(id).await?;
    Ok(Json(DeletedResponse::new(id)))
}
