//! Auth API Handlers

use axum::{Extension, Json, extract::State, http::StatusCode};
use serde::Serialize;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    EmployeeInsert, EmployeeWithRole, LoginRequest, Permission, SignupRequest,
};

use crate::auth::{CurrentUser, hash_password, verify_password};
use crate::core::ServerState;
use crate::db::repository::{RepoError, employee, role};
use crate::security_log;
use crate::utils::validate_payload;

/// Token-bearing success envelope for signup and login
#[derive(Serialize)]
pub struct AuthResponse {
    status: &'static str,
    token: String,
    data: AuthData,
}

#[derive(Serialize)]
pub struct AuthData {
    employee: EmployeeWithRole,
}

/// Flatten permission grants into `resource:action` strings for the
/// token claims
fn permission_strings(permissions: &[Permission]) -> Vec<String> {
    permissions
        .iter()
        .flat_map(|p| {
            p.actions
                .iter()
                .map(move |a| format!("{}:{}", p.resource, a))
        })
        .collect()
}

async fn issue_token(state: &ServerState, employee_id: i64) -> AppResult<(String, EmployeeWithRole)> {
    let auth = employee::find_auth_by_id(&state.pool, employee_id)
        .await
        .map_err(|e| AppError::database(e.to_string()))?
        .ok_or_else(|| AppError::new(ErrorCode::EmployeeNotFound))?;

    let token = state
        .jwt_service
        .generate_token(
            auth.id,
            &auth.email,
            &auth.role_name,
            &permission_strings(&auth.permissions),
        )
        .map_err(|e| AppError::internal(format!("Token generation failed: {e}")))?;

    let with_role = employee::find_with_role_by_id(&state.pool, employee_id)
        .await
        .map_err(|e| AppError::database(e.to_string()))?
        .ok_or_else(|| AppError::new(ErrorCode::EmployeeNotFound))?;

    Ok((token, with_role))
}

/// Create the employee row for a validated signup payload
///
/// Shared with the employees API create handler. Pre-checks produce the
/// friendly duplicate message; the UNIQUE constraints are the backstop.
pub(crate) async fn create_employee(
    state: &ServerState,
    payload: &SignupRequest,
) -> AppResult<i64> {
    validate_payload(payload)?;

    let default_role = role::find_by_name(&state.pool, "Employee")
        .await
        .map_err(|e| AppError::database(e.to_string()))?
        .ok_or_else(|| AppError::internal("Default role not found"))?;

    let email = payload.email.to_lowercase();
    let exists = employee::exists_by_no_or_email(&state.pool, &payload.employee_no, &email)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;
    if exists {
        return Err(AppError::new(ErrorCode::EmployeeExists));
    }

    let password_hash = hash_password(&payload.password)?;
    let created = employee::create(
        &state.pool,
        EmployeeInsert {
            employee_no: payload.employee_no.clone(),
            name: payload.name.clone(),
            email,
            department: payload.department.clone(),
            password_hash,
            role_id: default_role.id,
        },
    )
    .await
    .map_err(|e| match e {
        RepoError::Duplicate(_) => AppError::new(ErrorCode::EmployeeExists),
        other => AppError::database(other.to_string()),
    })?;

    Ok(created.id)
}

/// POST /api/v1/auth/signup
pub async fn signup(
    State(state): State<ServerState>,
    Json(payload): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let employee_id = create_employee(&state, &payload).await?;
    let (token, with_role) = issue_token(&state, employee_id).await?;

    security_log!(
        "INFO",
        "signup",
        employee_id = employee_id,
        email = with_role.email.clone()
    );

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            status: "success",
            token,
            data: AuthData {
                employee: with_role,
            },
        }),
    ))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    validate_payload(&payload)?;

    let email = payload.email.to_lowercase();
    let creds = employee::find_credentials_by_email(&state.pool, &email)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    // Unknown email and wrong password produce the same response
    let Some(creds) = creds else {
        security_log!("WARN", "login_failed", email = email);
        return Err(AppError::invalid_credentials());
    };
    if !verify_password(&payload.password, &creds.password_hash) {
        security_log!("WARN", "login_failed", email = email);
        return Err(AppError::invalid_credentials());
    }

    let (token, with_role) = issue_token(&state, creds.id).await?;
    security_log!("INFO", "login", employee_id = creds.id, email = email);

    Ok(Json(AuthResponse {
        status: "success",
        token,
        data: AuthData {
            employee: with_role,
        },
    }))
}

/// The authenticated identity as the client sees it
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeEmployee {
    id: i64,
    #[serde(rename = "employeeId")]
    employee_no: String,
    name: String,
    email: String,
    department: String,
    role: String,
    permissions: Vec<Permission>,
}

#[derive(Serialize)]
pub struct MeResponse {
    status: &'static str,
    data: MeData,
}

#[derive(Serialize)]
pub struct MeData {
    employee: MeEmployee,
}

/// GET /api/v1/auth/me
pub async fn me(Extension(user): Extension<CurrentUser>) -> Json<MeResponse> {
    Json(MeResponse {
        status: "success",
        data: MeData {
            employee: MeEmployee {
                id: user.id,
                employee_no: user.employee_no,
                name: user.name,
                email: user.email,
                department: user.department,
                role: user.role,
                permissions: user.permissions,
            },
        },
    })
}
