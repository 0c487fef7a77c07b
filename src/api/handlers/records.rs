//! Resource CRUD handlers.
//!
//! One generic handler per verb, instantiated for each clinic table by the
//! router.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::extractors::{IdPath, JsonBody};
use crate::api::state::AppState;
use crate::domain::{ApiResponse, CreatedResponse, Record, Resource};
use crate::error::Result;
use crate::storage::traits::{DynStorage, Repository};

/// List all rows.
pub async fn list<R: Resource>(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Record<R>>>>>
where
    DynStorage: Repository<R>,
{
    let rows = state.records.list::<R>().await?;
    Ok(Json(ApiResponse::success(rows)))
}

/// Fetch one row.
pub async fn get<R: Resource>(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<ApiResponse<Record<R>>>>
where
    DynStorage: Repository<R>,
{
    let row = state.records.get::<R>(id).await?;
    Ok(Json(ApiResponse::success(row)))
}

/// Insert a row; responds 201 with the new identifier.
pub async fn create<R: Resource>(
    State(state): State<AppState>,
    JsonBody(fields): JsonBody<R>,
) -> Result<(StatusCode, Json<ApiResponse<CreatedResponse>>)>
where
    DynStorage: Repository<R>,
{
    let id = state.records.create(fields).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(CreatedResponse { id })),
    ))
}

/// Replace a row.
pub async fn update<R: Resource>(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    JsonBody(fields): JsonBody<R>,
) -> Result<Json<ApiResponse<()>>>
where
    DynStorage: Repository<R>,
{
    state.records.update(id, fields).await?;
    Ok(Json(ApiResponse::ok()))
}

/// Delete a row.
pub async fn delete<R: Resource>(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<ApiResponse<()>>>
where
    DynStorage: Repository<R>,
{
    state.records.delete::<R>(id).await?;
    Ok(Json(ApiResponse::ok()))
}
