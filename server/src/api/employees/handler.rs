//! Employee API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{EmployeeWithRole, SignupRequest};

use crate::core::ServerState;
use crate::db::repository::employee::{self, EmployeeListParams};

const DEFAULT_LIMIT: i64 = 10;
const MAX_LIMIT: i64 = 100;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub sort: Option<String>,
    pub department: Option<String>,
    pub search: Option<String>,
}

#[derive(Serialize)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

#[derive(Serialize)]
pub struct ListResponse {
    status: &'static str,
    results: usize,
    pagination: Pagination,
    data: Vec<EmployeeWithRole>,
}

#[derive(Serialize)]
pub struct EmployeeResponse {
    status: &'static str,
    data: EmployeeData,
}

#[derive(Serialize)]
pub struct EmployeeData {
    employee: EmployeeWithRole,
}

/// GET /api/v1/employees
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ListResponse>> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);

    let params = EmployeeListParams {
        page,
        limit,
        sort: query.sort,
        department: query.department,
        search: query.search,
    };
    let (rows, total) = employee::list(&state.pool, &params)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    let total_pages = if total == 0 { 0 } else { (total + limit - 1) / limit };
    Ok(Json(ListResponse {
        status: "success",
        results: rows.len(),
        pagination: Pagination {
            page,
            limit,
            total,
            total_pages,
        },
        data: rows,
    }))
}

/// GET /api/v1/employees/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<EmployeeResponse>> {
    let found = employee::find_with_role_by_id(&state.pool, id)
        .await
        .map_err(|e| AppError::database(e.to_string()))?
        .ok_or_else(|| AppError::new(ErrorCode::EmployeeNotFound))?;

    Ok(Json(EmployeeResponse {
        status: "success",
        data: EmployeeData { employee: found },
    }))
}

/// POST /api/v1/employees
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<EmployeeResponse>)> {
    let employee_id = crate::api::auth::handler::create_employee(&state, &payload).await?;
    let created = employee::find_with_role_by_id(&state.pool, employee_id)
        .await
        .map_err(|e| AppError::database(e.to_string()))?
        .ok_or_else(|| AppError::new(ErrorCode::EmployeeNotFound))?;

    Ok((
        StatusCode::CREATED,
        Json(EmployeeResponse {
            status: "success",
            data: EmployeeData { employee: created },
        }),
    ))
}

/// DELETE /api/v1/employees/{id}
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i64>) -> AppResult<StatusCode> {
    let removed = employee::delete(&state.pool, id)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;
    if !removed {
        return Err(AppError::new(ErrorCode::EmployeeNotFound));
    }
    Ok(StatusCode::NO_CONTENT)
}
