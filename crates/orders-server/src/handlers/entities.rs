//! Entity handlers, generic over [`Resource`].
//!
//! Writes take the raw body so that validation, not the JSON extractor,
//! decides what a bad body looks like.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::Json;

use crate::error::ApiError;
use crate::resource::Resource;
use crate::service::WriteOutcome;
use crate::state::AppState;
use crate::validate;

/// `GET /{collection}`
pub async fn list<R: Resource>(State(state): State<AppState>) -> Result<Json<Vec<R>>, ApiError> {
    let rows = state.entities.list::<R>().await?;
    Ok(Json(rows))
}

/// `POST /{collection}`
pub async fn create<R: Resource>(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<WriteOutcome, ApiError> {
    let record = validate::record::<R>(&body)?;
    state.entities.create(record).await
}

/// `PATCH /{collection}/{key}`
pub async fn update<R: Resource>(
    State(state): State<AppState>,
    Path(key): Path<String>,
    body: Bytes,
) -> Result<WriteOutcome, ApiError> {
    let key = validate::path_key::<R>(&key)?;
    let record = validate::record::<R>(&body)?;
    state.entities.update(key, record).await
}

/// `PUT /{collection}/{key}`
pub async fn upsert<R: Resource>(
    State(state): State<AppState>,
    Path(key): Path<String>,
    body: Bytes,
) -> Result<WriteOutcome, ApiError> {
    let key = validate::path_key::<R>(&key)?;
    let record = validate::record::<R>(&body)?;
    state.entities.upsert(key, record).await
}

/// `DELETE /{collection}/{key}`
pub async fn delete<R: Resource>(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<WriteOutcome, ApiError> {
    let key = validate::path_key::<R>(&key)?;
    state.entities.delete(key).await
}
