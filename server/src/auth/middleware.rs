//! Authentication middleware
//!
//! The `require_auth` guard runs on every `/api/` request and performs,
//! in order: token extraction, signature/issuer/expiry verification,
//! subject parsing, employee resolution (role and permissions populated)
//! and password rotation check. On success a [`CurrentUser`] is attached
//! to the request extensions.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use shared::error::AppError;
use shared::models::Permission;

use crate::auth::{JwtError, JwtService};
use crate::core::ServerState;
use crate::db::repository::employee;
use crate::security_log;

/// Routes reachable without a token
const PUBLIC_ROUTES: [&str; 3] = ["/api/v1/auth/login", "/api/v1/auth/signup", "/api/health"];

/// Authenticated user context, resolved from the database on every
/// guarded request (not from token claims alone)
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub employee_no: String,
    pub name: String,
    pub email: String,
    pub department: String,
    /// Role name
    pub role: String,
    /// Permission grants from the role
    pub permissions: Vec<Permission>,
}

impl CurrentUser {
    /// Check a `resource:action` permission against the role's grants,
    /// with `*` wildcards on either side
    pub fn has_permission(&self, permission: &str) -> bool {
        let Some((resource, action)) = permission.split_once(':') else {
            return false;
        };
        self.permissions.iter().any(|p| p.allows(resource, action))
    }
}

/// Authentication middleware, applied at router level
///
/// Skips CORS preflight, non-API paths and the public routes; everything
/// else must present a valid `Authorization: Bearer <token>` header.
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }
    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }
    if PUBLIC_ROUTES.contains(&path) {
        return Ok(next.run(req).await);
    }

    let token = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(JwtService::extract_from_header);

    let Some(token) = token else {
        security_log!("WARN", "auth_missing", uri = format!("{:?}", req.uri()));
        return Err(AppError::unauthorized(
            "Authentication token is missing. Please log in to access.",
        ));
    };

    let claims = state.jwt_service.validate_token(token).map_err(|e| {
        security_log!(
            "WARN",
            "auth_failed",
            error = format!("{}", e),
            uri = format!("{:?}", req.uri())
        );
        match e {
            JwtError::ExpiredToken => {
                AppError::token_expired("Token has expired. Please log in again.")
            }
            _ => AppError::invalid_token("Invalid or expired token. Please log in again."),
        }
    })?;

    let employee_id: i64 = claims
        .sub
        .parse()
        .map_err(|_| AppError::invalid_token("Invalid token structure. Please log in again."))?;

    let auth = employee::find_auth_by_id(&state.pool, employee_id)
        .await
        .map_err(|e| AppError::database(e.to_string()))?
        .ok_or_else(|| {
            security_log!("WARN", "auth_stale_subject", employee_id = employee_id);
            AppError::unauthorized("The employee associated with this token no longer exists.")
        })?;

    if auth.changed_password_after(claims.iat) {
        security_log!("WARN", "auth_password_rotated", employee_id = employee_id);
        return Err(AppError::unauthorized(
            "Employee recently changed password! Please log in again",
        ));
    }

    let user = CurrentUser {
        id: auth.id,
        employee_no: auth.employee_no,
        name: auth.name,
        email: auth.email,
        department: auth.department,
        role: auth.role_name,
        permissions: auth.permissions,
    };
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Permission check middleware
///
/// Requires a `resource:action` permission, evaluated against the
/// authenticated user's role grants. Denial returns 403.
///
/// ```ignore
/// Router::new()
///     .route("/", post(handler::create))
///     .layer(middleware::from_fn(require_permission("employees:write")));
/// ```
pub fn require_permission(
    permission: &'static str,
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AppError>> + Send>>
+ Clone {
    move |req: Request, next: Next| {
        Box::pin(async move {
            let user = req.extensions().get::<CurrentUser>().ok_or_else(|| {
                AppError::unauthorized("Authentication token is missing. Please log in to access.")
            })?;

            if !user.has_permission(permission) {
                security_log!(
                    "WARN",
                    "permission_denied",
                    employee_id = user.id,
                    email = user.email.clone(),
                    required_permission = permission
                );
                return Err(AppError::forbidden(
                    "You do not have permission to perform this action",
                ));
            }

            Ok(next.run(req).await)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with(permissions: Vec<Permission>) -> CurrentUser {
        CurrentUser {
            id: 1,
            employee_no: "EMP001".into(),
            name: "Jane Doe".into(),
            email: "jane@example.com".into(),
            department: "IT".into(),
            role: "Employee".into(),
            permissions,
        }
    }

    #[test]
    fn admin_wildcard_grants_everything() {
        let admin = user_with(vec![Permission {
            resource: "*".into(),
            actions: vec!["*".into()],
        }]);
        assert!(admin.has_permission("employees:write"));
        assert!(admin.has_permission("employees:delete"));
        assert!(admin.has_permission("attendance:write"));
    }

    #[test]
    fn employee_grant_is_scoped() {
        let employee = user_with(vec![Permission {
            resource: "attendance".into(),
            actions: vec!["read".into()],
        }]);
        assert!(employee.has_permission("attendance:read"));
        assert!(!employee.has_permission("attendance:write"));
        assert!(!employee.has_permission("employees:write"));
    }

    #[test]
    fn malformed_permission_string_denied() {
        let admin = user_with(vec![Permission {
            resource: "*".into(),
            actions: vec!["*".into()],
        }]);
        assert!(!admin.has_permission("employees"));
    }
}
