//! Attendance API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Attendance, AttendanceWithEmployee, MarkAttendanceRequest};

use crate::core::ServerState;
use crate::db::repository::{RepoError, attendance, employee};
use crate::utils::validate_payload;

const DEFAULT_LIMIT: i64 = 10;
const MAX_LIMIT: i64 = 100;

#[derive(Serialize)]
pub struct AttendanceResponse {
    status: &'static str,
    data: AttendanceData,
}

#[derive(Serialize)]
pub struct AttendanceData {
    attendance: Attendance,
}

/// POST /api/v1/attendance
pub async fn mark(
    State(state): State<ServerState>,
    Json(payload): Json<MarkAttendanceRequest>,
) -> AppResult<(StatusCode, Json<AttendanceResponse>)> {
    validate_payload(&payload)?;

    employee::find_by_id(&state.pool, payload.employee_id)
        .await
        .map_err(|e| AppError::database(e.to_string()))?
        .ok_or_else(|| AppError::new(ErrorCode::EmployeeNotFound))?;

    let already = attendance::exists_for_date(&state.pool, payload.employee_id, payload.date)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;
    if already {
        return Err(AppError::new(ErrorCode::AttendanceAlreadyMarked));
    }

    let record = attendance::create(&state.pool, payload.employee_id, payload.date, &payload.status)
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(_) => AppError::new(ErrorCode::AttendanceAlreadyMarked),
            other => AppError::database(other.to_string()),
        })?;

    Ok((
        StatusCode::CREATED,
        Json(AttendanceResponse {
            status: "success",
            data: AttendanceData { attendance: record },
        }),
    ))
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Serialize)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

#[derive(Serialize)]
pub struct HistoryResponse {
    status: &'static str,
    results: usize,
    pagination: Pagination,
    data: Vec<Attendance>,
}

/// GET /api/v1/attendance/{employee_id}
pub async fn history(
    State(state): State<ServerState>,
    Path(employee_id): Path<i64>,
    Query(query): Query<HistoryQuery>,
) -> AppResult<Json<HistoryResponse>> {
    employee::find_by_id(&state.pool, employee_id)
        .await
        .map_err(|e| AppError::database(e.to_string()))?
        .ok_or_else(|| AppError::new(ErrorCode::EmployeeNotFound))?;

    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);

    let (rows, total) = attendance::list_for_employee(&state.pool, employee_id, page, limit)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    let total_pages = if total == 0 { 0 } else { (total + limit - 1) / limit };
    Ok(Json(HistoryResponse {
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

#[derive(Debug, Deserialize)]
pub struct RosterQuery {
    pub date: Option<NaiveDate>,
}

#[derive(Serialize)]
pub struct RosterResponse {
    status: &'static str,
    results: usize,
    data: Vec<AttendanceWithEmployee>,
}

/// GET /api/v1/attendance?date=YYYY-MM-DD
pub async fn roster_for_date(
    State(state): State<ServerState>,
    Query(query): Query<RosterQuery>,
) -> AppResult<Json<RosterResponse>> {
    let date = query.date.ok_or_else(|| {
        AppError::invalid_request("date query parameter is required (YYYY-MM-DD)")
    })?;

    let rows = attendance::list_for_date(&state.pool, date)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    Ok(Json(RosterResponse {
        status: "success",
        results: rows.len(),
        data: rows,
    }))
}
