//! Role seeding
//!
//! Ensures the built-in roles exist after migrations. Idempotent; name
//! matching is case-insensitive.

use crate::db::repository::{RepoResult, role};
use shared::models::{Permission, RoleCreate};
use sqlx::SqlitePool;

/// Built-in roles and their permission grants
fn default_roles() -> Vec<RoleCreate> {
    vec![
        RoleCreate {
            name: "Admin".into(),
            permissions: vec![Permission {
                resource: "*".into(),
                actions: vec!["*".into()],
            }],
        },
        RoleCreate {
            name: "Employee".into(),
            permissions: vec![Permission {
                resource: "attendance".into(),
                actions: vec!["read".into()],
            }],
        },
    ]
}

/// Create any missing built-in role
pub async fn seed_roles(pool: &SqlitePool) -> RepoResult<()> {
    for data in default_roles() {
        if role::find_by_name(pool, &data.name).await?.is_some() {
            continue;
        }
        let name = data.name.clone();
        role::create(pool, data).await?;
        tracing::info!(role = %name, "Seeded role");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::test_pool;

    #[tokio::test]
    async fn seeding_is_idempotent() {
        let pool = test_pool().await;
        seed_roles(&pool).await.expect("first seed failed");
        seed_roles(&pool).await.expect("second seed failed");

        let admin = role::find_by_name(&pool, "admin")
            .await
            .expect("lookup failed")
            .expect("Admin missing");
        assert_eq!(admin.permissions[0].resource, "*");

        let employee = role::find_by_name(&pool, "employee")
            .await
            .expect("lookup failed")
            .expect("Employee missing");
        assert_eq!(employee.permissions[0].resource, "attendance");
        assert_eq!(employee.permissions[0].actions, vec!["read".to_string()]);
    }
}
