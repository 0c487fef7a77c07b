//! Request extractors whose rejections use the JSON error envelope.

use std::future::Future;

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// JSON request body; malformed or incomplete bodies become `BadRequest`.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    fn from_request(
        req: Request,
        state: &S,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        let extracted = Json::<T>::from_request(req, state);
        async move {
            extracted
                .await
                .map(|Json(value)| Self(value))
                .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
        }
    }
}

/// Integer `{id}` path segment; anything else becomes `InvalidParam`.
#[derive(Debug, Clone, Copy)]
pub struct IdPath(pub i64);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        let extracted = Path::<i64>::from_request_parts(parts, state);
        async move {
            extracted
                .await
                .map(|Path(id)| Self(id))
                .map_err(|rejection| AppError::InvalidParam(rejection.body_text()))
        }
    }
}
