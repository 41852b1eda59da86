//! Employee Repository

use super::{RepoError, RepoResult};
use shared::models::{Employee, EmployeeAuth, EmployeeCredentials, EmployeeInsert, EmployeeWithRole};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

const COLUMNS: &str =
    "id, employee_no, name, email, department, role_id, email_verified, created_at, updated_at";

const JOINED_COLUMNS: &str = "e.id, e.employee_no, e.name, e.email, e.department, e.role_id, \
     r.name AS role_name, e.email_verified, e.created_at, e.updated_at";

/// Columns the list endpoint may sort by
const SORTABLE: [&str; 5] = ["name", "email", "department", "employee_no", "created_at"];

/// List query parameters, already defaulted and capped by the handler
#[derive(Debug, Clone)]
pub struct EmployeeListParams {
    pub page: i64,
    pub limit: i64,
    /// Whitelisted column name, `-` prefix for descending
    pub sort: Option<String>,
    pub department: Option<String>,
    /// Case-insensitive substring across name, email and department
    pub search: Option<String>,
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Employee>> {
    let employee =
        sqlx::query_as::<_, Employee>(&format!("SELECT {COLUMNS} FROM employee WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(employee)
}

/// Fetch an employee with the role name populated
pub async fn find_with_role_by_id(
    pool: &SqlitePool,
    id: i64,
) -> RepoResult<Option<EmployeeWithRole>> {
    let employee = sqlx::query_as::<_, EmployeeWithRole>(&format!(
        "SELECT {JOINED_COLUMNS} FROM employee e JOIN role r ON r.id = e.role_id WHERE e.id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(employee)
}

/// Credential lookup for login, the only read that touches the hash
pub async fn find_credentials_by_email(
    pool: &SqlitePool,
    email: &str,
) -> RepoResult<Option<EmployeeCredentials>> {
    let creds = sqlx::query_as::<_, EmployeeCredentials>(
        "SELECT id, employee_no, name, email, department, password_hash FROM employee WHERE email = ?",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(creds)
}

/// Everything the auth guard needs, role and permissions populated
pub async fn find_auth_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<EmployeeAuth>> {
    let auth = sqlx::query_as::<_, EmployeeAuth>(
        "SELECT e.id, e.employee_no, e.name, e.email, e.department, e.password_changed_at, \
         r.name AS role_name, r.permissions \
         FROM employee e JOIN role r ON r.id = e.role_id WHERE e.id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(auth)
}

/// Whether an employee with this business id or email already exists
pub async fn exists_by_no_or_email(
    pool: &SqlitePool,
    employee_no: &str,
    email: &str,
) -> RepoResult<bool> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM employee WHERE employee_no = ? OR email = ?",
    )
    .bind(employee_no)
    .bind(email)
    .fetch_one(pool)
    .await?;
    Ok(count > 0)
}

pub async fn create(pool: &SqlitePool, data: EmployeeInsert) -> RepoResult<Employee> {
    let id = snowflake_id();
    let now = now_millis();

    sqlx::query(
        "INSERT INTO employee (id, employee_no, name, email, department, password_hash, role_id, email_verified, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, 0, ?, ?)",
    )
    .bind(id)
    .bind(&data.employee_no)
    .bind(&data.name)
    .bind(&data.email)
    .bind(&data.department)
    .bind(&data.password_hash)
    .bind(data.role_id)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create employee".into()))
}

/// Paginated list with the role name populated
///
/// Returns the page and the total row count across all pages.
pub async fn list(
    pool: &SqlitePool,
    params: &EmployeeListParams,
) -> RepoResult<(Vec<EmployeeWithRole>, i64)> {
    let mut filters = Vec::new();
    if params.department.is_some() {
        filters.push("e.department = ?");
    }
    if params.search.is_some() {
        filters.push("(e.name LIKE ? OR e.email LIKE ? OR e.department LIKE ?)");
    }
    let where_clause = if filters.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", filters.join(" AND "))
    };

    let order_by = order_by_clause(params.sort.as_deref());
    let offset = (params.page - 1) * params.limit;
    let pattern = params.search.as_ref().map(|s| format!("%{s}%"));

    let sql = format!(
        "SELECT {JOINED_COLUMNS} FROM employee e JOIN role r ON r.id = e.role_id{where_clause} {order_by} LIMIT ? OFFSET ?"
    );
    let mut query = sqlx::query_as::<_, EmployeeWithRole>(&sql);
    if let Some(dept) = &params.department {
        query = query.bind(dept);
    }
    if let Some(p) = &pattern {
        query = query.bind(p).bind(p).bind(p);
    }
    let rows = query.bind(params.limit).bind(offset).fetch_all(pool).await?;

    let count_sql = format!("SELECT COUNT(*) FROM employee e{where_clause}");
    let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
    if let Some(dept) = &params.department {
        count_query = count_query.bind(dept);
    }
    if let Some(p) = &pattern {
        count_query = count_query.bind(p).bind(p).bind(p);
    }
    let total = count_query.fetch_one(pool).await?;

    Ok((rows, total))
}

/// Hard delete; returns whether a row was removed
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM employee WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

fn order_by_clause(sort: Option<&str>) -> String {
    let (column, desc) = match sort {
        Some(s) => match s.strip_prefix('-') {
            Some(col) => (col, true),
            None => (s, false),
        },
        None => ("created_at", true),
    };
    let column = if SORTABLE.contains(&column) {
        column
    } else {
        "created_at"
    };
    let direction = if desc { "DESC" } else { "ASC" };
    format!("ORDER BY e.{column} {direction}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::role;
    use crate::db::repository::test_support::test_pool;
    use shared::models::RoleCreate;

    async fn seed_role(pool: &SqlitePool) -> i64 {
        role::create(
            pool,
            RoleCreate {
                name: "Employee".into(),
                permissions: vec![],
            },
        )
        .await
        .expect("role create failed")
        .id
    }

    fn insert_data(n: u32, role_id: i64) -> EmployeeInsert {
        EmployeeInsert {
            employee_no: format!("EMP{n:03}"),
            name: format!("Employee {n}"),
            email: format!("employee{n}@example.com"),
            department: "IT".into(),
            password_hash: "$argon2id$fake".into(),
            role_id,
        }
    }

    #[tokio::test]
    async fn create_and_fetch_with_role() {
        let pool = test_pool().await;
        let role_id = seed_role(&pool).await;

        let created = create(&pool, insert_data(1, role_id)).await.expect("create failed");
        let fetched = find_with_role_by_id(&pool, created.id)
            .await
            .expect("fetch failed")
            .expect("employee missing");

        assert_eq!(fetched.employee_no, "EMP001");
        assert_eq!(fetched.role_name, "Employee");
    }

    #[tokio::test]
    async fn duplicate_employee_no_rejected() {
        let pool = test_pool().await;
        let role_id = seed_role(&pool).await;

        create(&pool, insert_data(1, role_id)).await.expect("create failed");
        let mut dup = insert_data(2, role_id);
        dup.employee_no = "EMP001".into();

        assert!(matches!(create(&pool, dup).await, Err(RepoError::Duplicate(_))));
    }

    #[tokio::test]
    async fn pagination_counts_pages() {
        let pool = test_pool().await;
        let role_id = seed_role(&pool).await;
        for n in 1..=25 {
            create(&pool, insert_data(n, role_id)).await.expect("create failed");
        }

        let params = EmployeeListParams {
            page: 3,
            limit: 10,
            sort: Some("employee_no".into()),
            department: None,
            search: None,
        };
        let (rows, total) = list(&pool, &params).await.expect("list failed");
        assert_eq!(total, 25);
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].employee_no, "EMP021");
    }

    #[tokio::test]
    async fn search_matches_substring() {
        let pool = test_pool().await;
        let role_id = seed_role(&pool).await;
        create(&pool, insert_data(1, role_id)).await.expect("create failed");
        let mut other = insert_data(2, role_id);
        other.name = "Unrelated Person".into();
        other.department = "HR".into();
        create(&pool, other).await.expect("create failed");

        let params = EmployeeListParams {
            page: 1,
            limit: 10,
            sort: None,
            department: None,
            search: Some("unrelated".into()),
        };
        let (rows, total) = list(&pool, &params).await.expect("list failed");
        assert_eq!(total, 1);
        assert_eq!(rows[0].name, "Unrelated Person");
    }

    #[tokio::test]
    async fn delete_missing_returns_false() {
        let pool = test_pool().await;
        assert!(!delete(&pool, 12345).await.expect("delete failed"));
    }
}
