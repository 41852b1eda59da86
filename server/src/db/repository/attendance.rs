//! Attendance Repository

use super::{RepoError, RepoResult};
use chrono::NaiveDate;
use shared::models::{Attendance, AttendanceWithEmployee};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, employee_id, date, status, created_at, updated_at";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Attendance>> {
    let record =
        sqlx::query_as::<_, Attendance>(&format!("SELECT {COLUMNS} FROM attendance WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(record)
}

/// Whether a record already exists for this employee and date
pub async fn exists_for_date(
    pool: &SqlitePool,
    employee_id: i64,
    date: NaiveDate,
) -> RepoResult<bool> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM attendance WHERE employee_id = ? AND date = ?",
    )
    .bind(employee_id)
    .bind(date)
    .fetch_one(pool)
    .await?;
    Ok(count > 0)
}

/// Insert one record; the UNIQUE(employee_id, date) constraint is the
/// authoritative duplicate guard
pub async fn create(
    pool: &SqlitePool,
    employee_id: i64,
    date: NaiveDate,
    status: &str,
) -> RepoResult<Attendance> {
    let id = snowflake_id();
    let now = now_millis();

    sqlx::query(
        "INSERT INTO attendance (id, employee_id, date, status, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(employee_id)
    .bind(date)
    .bind(status)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create attendance record".into()))
}

/// Paginated history for one employee, newest first
pub async fn list_for_employee(
    pool: &SqlitePool,
    employee_id: i64,
    page: i64,
    limit: i64,
) -> RepoResult<(Vec<Attendance>, i64)> {
    let offset = (page - 1) * limit;
    let rows = sqlx::query_as::<_, Attendance>(&format!(
        "SELECT {COLUMNS} FROM attendance WHERE employee_id = ? ORDER BY date DESC LIMIT ? OFFSET ?"
    ))
    .bind(employee_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    let total =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM attendance WHERE employee_id = ?")
            .bind(employee_id)
            .fetch_one(pool)
            .await?;

    Ok((rows, total))
}

/// The day's roster across all employees, employee populated
pub async fn list_for_date(
    pool: &SqlitePool,
    date: NaiveDate,
) -> RepoResult<Vec<AttendanceWithEmployee>> {
    let rows = sqlx::query_as::<_, AttendanceWithEmployee>(
        "SELECT a.id, a.employee_id, e.employee_no, e.name AS employee_name, e.department, \
         a.date, a.status, a.created_at, a.updated_at \
         FROM attendance a JOIN employee e ON e.id = a.employee_id \
         WHERE a.date = ? ORDER BY e.employee_no ASC",
    )
    .bind(date)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::test_pool;
    use crate::db::repository::{employee, role};
    use shared::models::{EmployeeInsert, RoleCreate};

    async fn seed_employee(pool: &SqlitePool, n: u32) -> i64 {
        let role_id = match role::find_by_name(pool, "Employee").await.expect("lookup failed") {
            Some(r) => r.id,
            None => {
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
        };
        employee::create(
            pool,
            EmployeeInsert {
                employee_no: format!("EMP{n:03}"),
                name: format!("Employee {n}"),
                email: format!("employee{n}@example.com"),
                department: "IT".into(),
                password_hash: "$argon2id$fake".into(),
                role_id,
            },
        )
        .await
        .expect("employee create failed")
        .id
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().expect("bad test date")
    }

    #[tokio::test]
    async fn mark_once_then_conflict() {
        let pool = test_pool().await;
        let employee_id = seed_employee(&pool, 1).await;
        let day = date("2026-08-27");

        let record = create(&pool, employee_id, day, "Present")
            .await
            .expect("create failed");
        assert_eq!(record.status, "Present");
        assert!(exists_for_date(&pool, employee_id, day).await.expect("exists failed"));

        // Second mark for the same day hits the unique constraint
        let second = create(&pool, employee_id, day, "Absent").await;
        assert!(matches!(second, Err(RepoError::Duplicate(_))));

        let (rows, total) = list_for_employee(&pool, employee_id, 1, 10)
            .await
            .expect("list failed");
        assert_eq!(total, 1);
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn history_is_newest_first() {
        let pool = test_pool().await;
        let employee_id = seed_employee(&pool, 1).await;
        for day in ["2026-08-25", "2026-08-27", "2026-08-26"] {
            create(&pool, employee_id, date(day), "Present")
                .await
                .expect("create failed");
        }

        let (rows, total) = list_for_employee(&pool, employee_id, 1, 10)
            .await
            .expect("list failed");
        assert_eq!(total, 3);
        let dates: Vec<String> = rows.iter().map(|r| r.date.to_string()).collect();
        assert_eq!(dates, vec!["2026-08-27", "2026-08-26", "2026-08-25"]);
    }

    #[tokio::test]
    async fn roster_for_date_populates_employee() {
        let pool = test_pool().await;
        let first = seed_employee(&pool, 1).await;
        let second = seed_employee(&pool, 2).await;
        let day = date("2026-08-27");

        create(&pool, first, day, "Present").await.expect("create failed");
        create(&pool, second, day, "Absent").await.expect("create failed");
        create(&pool, first, date("2026-08-26"), "Present")
            .await
            .expect("create failed");

        let roster = list_for_date(&pool, day).await.expect("roster failed");
        assert_eq!(roster.len(), 2);
        assert_eq!(roster[0].employee_no, "EMP001");
        assert_eq!(roster[0].employee_name, "Employee 1");
        assert_eq!(roster[1].status, "Absent");
    }
}
