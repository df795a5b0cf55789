//! Employee CRUD handlers.
//!
//! Each handler is a thin mapping from the HTTP surface onto one
//! `EmployeeStore` operation; the store owns the lock and the file.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use common::types::Health;
use models::{Employee, EmployeeCreate, EmployeeUpdate};
use service::employees::EmployeeStore;

use crate::errors::{ApiError, ApiJson};

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub async fn list(
    State(store): State<Arc<EmployeeStore>>,
) -> Result<Json<Vec<Employee>>, ApiError> {
    Ok(Json(store.list().await?))
}

pub async fn get_by_id(
    State(store): State<Arc<EmployeeStore>>,
    Path(id): Path<u64>,
) -> Result<Json<Employee>, ApiError> {
    Ok(Json(store.get(id).await?))
}

pub async fn create(
    State(store): State<Arc<EmployeeStore>>,
    ApiJson(payload): ApiJson<EmployeeCreate>,
) -> Result<Json<Employee>, ApiError> {
    Ok(Json(store.create(payload).await?))
}

pub async fn update(
    State(store): State<Arc<EmployeeStore>>,
    Path(id): Path<u64>,
    ApiJson(payload): ApiJson<EmployeeUpdate>,
) -> Result<Json<Employee>, ApiError> {
    Ok(Json(store.update(id, payload).await?))
}

pub async fn delete(
    State(store): State<Arc<EmployeeStore>>,
    Path(id): Path<u64>,
) -> Result<Json<Employee>, ApiError> {
    Ok(Json(store.delete(id).await?))
}
