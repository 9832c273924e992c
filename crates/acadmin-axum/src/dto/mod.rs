//! Request and response shapes that are specific to the HTTP surface.
//!
//! Entity bodies are the `acadmin-core` domain types themselves; this module
//! only holds query strings, envelopes and extractors.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use serde::{Deserialize, Serialize};

use acadmin_core::domain::Page;

use crate::error::HttpError;

/// `?skip=&limit=` on list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}

impl PageQuery {
    pub fn page(&self) -> Result<Page, HttpError> {
        Ok(Page::from_query(self.skip, self.limit)?)
    }
}

/// `?q=&skip=&limit=` on search endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}

impl SearchQuery {
    pub fn page(&self) -> Result<Page, HttpError> {
        Ok(Page::from_query(self.skip, self.limit)?)
    }
}

/// Body returned by every `DELETE`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedResponse {
    pub id: i64,
    pub deleted: bool,
}

impl DeletedResponse {
    pub const fn new(id: i64) -> Self {
        Self { id, deleted: true }
    }
}

/// `Json<T>` whose rejections use the API error body (always 400).
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Json::<T>::from_request(req, state)
            .await
            .map(|Json(value)| Self(value))
            .map_err(|rejection| HttpError::BadRequest(rejection.body_text()))
    }
}

/// `Path<T>` whose rejections use the API error body.
pub struct ApiPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    Path<T>: FromRequestParts<S, Rejection = PathRejection>,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Path::<T>::from_request_parts(parts, state)
            .await
            .map(|Path(value)| Self(value))
            .map_err(|rejection| HttpError::BadRequest(rejection.body_text()))
    }
}

/// `Query<T>` whose rejections use the API error body.
pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    Query<T>: FromRequestParts<S, Rejection = QueryRejection>,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Query::<T>::from_request_parts(parts, state)
            .await
            .map(|Query(value)| Self(value))
            .map_err(|rejection| HttpError::BadRequest(rejection.body_text()))
    }
}
