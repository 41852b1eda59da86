//! Role Repository

use super::RepoResult;
use shared::models::{Role, RoleCreate};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, name, permissions, is_deleted, created_at, updated_at";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Role>> {
    let role = sqlx::query_as::<_, Role>(&format!(
        "SELECT {COLUMNS} FROM role WHERE id = ? AND is_deleted = 0"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(role)
}

/// Case-insensitive exact name lookup (the name column is COLLATE NOCASE)
pub async fn find_by_name(pool: &SqlitePool, name: &str) -> RepoResult<Option<Role>> {
    let role = sqlx::query_as::<_, Role>(&format!(
        "SELECT {COLUMNS} FROM role WHERE name = ? AND is_deleted = 0"
    ))
    .bind(name)
    .fetch_optional(pool)
    .await?;
    Ok(role)
}

pub async fn create(pool: &SqlitePool, data: RoleCreate) -> RepoResult<Role> {
    let id = snowflake_id();
    let now = now_millis();
    let permissions = serde_json::to_string(&data.permissions)
        .map_err(|e| super::RepoError::Database(e.to_string()))?;

    sqlx::query(
        "INSERT INTO role (id, name, permissions, is_deleted, created_at, updated_at) VALUES (?, ?, ?, 0, ?, ?)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(&permissions)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| super::RepoError::Database("Failed to create role".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::test_pool;
    use shared::models::Permission;

    #[tokio::test]
    async fn create_and_find_case_insensitive() {
        let pool = test_pool().await;
        let role = create(
            &pool,
            RoleCreate {
                name: "Admin".into(),
                permissions: vec![Permission {
                    resource: "*".into(),
                    actions: vec!["*".into()],
                }],
            },
        )
        .await
        .expect("create failed");

        assert_eq!(role.name, "Admin");
        assert_eq!(role.permissions.len(), 1);

        let found = find_by_name(&pool, "admin").await.expect("lookup failed");
        assert_eq!(found.map(|r| r.id), Some(role.id));
    }

    #[tokio::test]
    async fn duplicate_name_rejected() {
        let pool = test_pool().await;
        let data = RoleCreate {
            name: "Employee".into(),
            permissions: vec![],
        };
        create(&pool, data.clone()).await.expect("create failed");

        let dup = create(
            &pool,
            RoleCreate {
                name: "EMPLOYEE".into(),
                permissions: vec![],
            },
        )
        .await;
        assert!(matches!(dup, Err(crate::db::repository::RepoError::Duplicate(_))));
    }
}
