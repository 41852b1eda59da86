//! Employee Model

use super::role::Permission;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// The five departments an employee can belong to
pub const DEPARTMENTS: [&str; 5] = ["IT", "HR", "Finance", "Marketing", "Sales"];

/// Employee row. The password hash is excluded; credential lookups use
/// [`EmployeeCredentials`] instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Employee {
    pub id: i64,
    /// Unique business identifier (distinct from the row id); serialized
    /// as `employeeId` on the wire
    #[serde(rename = "employeeId")]
    pub employee_no: String,
    pub name: String,
    /// Stored lowercase, globally unique
    pub email: String,
    pub department: String,
    pub role_id: i64,
    pub email_verified: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Employee with its role name resolved (explicit populate variant)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct EmployeeWithRole {
    pub id: i64,
    #[serde(rename = "employeeId")]
    pub employee_no: String,
    pub name: String,
    pub email: String,
    pub department: String,
    pub role_id: i64,
    pub role_name: String,
    pub email_verified: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Credential row fetched only for login verification
#[derive(Debug, Clone)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct EmployeeCredentials {
    pub id: i64,
    pub employee_no: String,
    pub name: String,
    pub email: String,
    pub department: String,
    pub password_hash: String,
}

/// Everything the auth guard needs in one row: identity, password
/// rotation timestamp, and the resolved role with its permissions
#[derive(Debug, Clone)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct EmployeeAuth {
    pub id: i64,
    pub employee_no: String,
    pub name: String,
    pub email: String,
    pub department: String,
    /// Millis; set only when the password is modified after creation
    pub password_changed_at: Option<i64>,
    pub role_name: String,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub permissions: Vec<Permission>,
}

impl EmployeeAuth {
    /// Whether the password was changed after a token issued at
    /// `iat_secs` (JWT `iat`, seconds)
    pub fn changed_password_after(&self, iat_secs: i64) -> bool {
        match self.password_changed_at {
            Some(changed_millis) => changed_millis / 1000 > iat_secs,
            None => false,
        }
    }
}

/// Insert payload built by the handler after hashing the password
#[derive(Debug, Clone)]
pub struct EmployeeInsert {
    pub employee_no: String,
    pub name: String,
    pub email: String,
    pub department: String,
    pub password_hash: String,
    pub role_id: i64,
}

/// Signup / create-employee request body
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[serde(rename = "employeeId")]
    #[validate(length(
        min = 1,
        max = 50,
        message = "Employee ID must be between 1 and 50 characters"
    ))]
    pub employee_no: String,

    #[validate(
        length(min = 2, max = 100, message = "Name must be between 2 and 100 characters"),
        custom(function = validate_name_charset)
    )]
    pub name: String,

    #[validate(
        email(message = "Please provide a valid email address"),
        length(max = 100, message = "Email cannot exceed 100 characters")
    )]
    pub email: String,

    #[validate(custom(function = validate_department))]
    pub department: String,

    #[validate(
        length(min = 8, max = 128, message = "Password must be between 8 and 128 characters"),
        custom(function = validate_password_complexity)
    )]
    pub password: String,

    #[validate(must_match(other = password, message = "Passwords must match"))]
    pub password_confirm: String,
}

/// Login request body
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Please provide a valid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password cannot be empty"))]
    pub password: String,
}

fn validation_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

/// Letters and spaces only
fn validate_name_charset(name: &str) -> Result<(), ValidationError> {
    if name.chars().all(|c| c.is_ascii_alphabetic() || c == ' ') {
        Ok(())
    } else {
        Err(validation_error(
            "name_charset",
            "Name can only contain letters and spaces",
        ))
    }
}

fn validate_department(department: &str) -> Result<(), ValidationError> {
    if DEPARTMENTS.contains(&department) {
        Ok(())
    } else {
        Err(validation_error("department", "Invalid department"))
    }
}

/// At least one uppercase letter, one lowercase letter, one digit and
/// one of `@$!%*?&`
fn validate_password_complexity(password: &str) -> Result<(), ValidationError> {
    const SPECIALS: &str = "@$!%*?&";
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password.chars().any(|c| SPECIALS.contains(c));

    if has_upper && has_lower && has_digit && has_special {
        Ok(())
    } else {
        Err(validation_error(
            "password_complexity",
            "Password must contain at least one uppercase letter, one lowercase letter, one number, and one special character",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(password: &str) -> SignupRequest {
        SignupRequest {
            employee_no: "EMP001".into(),
            name: "Jane Doe".into(),
            email: "jane@example.com".into(),
            department: "IT".into(),
            password: password.into(),
            password_confirm: password.into(),
        }
    }

    #[test]
    fn valid_signup_passes() {
        assert!(signup("Str0ng!pass").validate().is_ok());
    }

    #[test]
    fn weak_password_rejected() {
        assert!(signup("alllowercase1!").validate().is_err());
        assert!(signup("NOLOWERCASE1!").validate().is_err());
        assert!(signup("NoDigits!!").validate().is_err());
        assert!(signup("NoSpecial11").validate().is_err());
        assert!(signup("Sh0rt!a").validate().is_err());
    }

    #[test]
    fn mismatched_confirmation_rejected() {
        let mut req = signup("Str0ng!pass");
        req.password_confirm = "Different1!".into();
        assert!(req.validate().is_err());
    }

    #[test]
    fn name_with_digits_rejected() {
        let mut req = signup("Str0ng!pass");
        req.name = "Jane 2".into();
        assert!(req.validate().is_err());
    }

    #[test]
    fn unknown_department_rejected() {
        let mut req = signup("Str0ng!pass");
        req.department = "Legal".into();
        assert!(req.validate().is_err());
    }

    #[test]
    fn password_rotation_check_uses_seconds() {
        let auth = EmployeeAuth {
            id: 1,
            employee_no: "EMP001".into(),
            name: "Jane Doe".into(),
            email: "jane@example.com".into(),
            department: "IT".into(),
            password_changed_at: Some(2_000_000),
            role_name: "Employee".into(),
            permissions: vec![],
        };
        // Token issued before the change is stale
        assert!(auth.changed_password_after(1_000));
        // Token issued after the change is still good
        assert!(!auth.changed_password_after(3_000));
    }
}
