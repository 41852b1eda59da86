//! Role Model

use serde::{Deserialize, Serialize};

/// A single permission grant: a resource and the actions allowed on it.
///
/// `*` acts as a wildcard on either side: `{resource: "*", actions: ["*"]}`
/// grants everything, `{resource: "attendance", actions: ["read"]}` grants
/// exactly one operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub resource: String,
    pub actions: Vec<String>,
}

impl Permission {
    /// Whether this grant covers `resource:action`
    pub fn allows(&self, resource: &str, action: &str) -> bool {
        (self.resource == "*" || self.resource == resource)
            && self.actions.iter().any(|a| a == "*" || a == action)
    }
}

/// Role entity (RBAC)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Role {
    pub id: i64,
    /// Lookups by name are case-insensitive exact matches
    pub name: String,
    /// JSON array of permission grants
    #[cfg_attr(feature = "db", sqlx(json))]
    pub permissions: Vec<Permission>,
    /// Soft-delete flag
    pub is_deleted: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create role payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleCreate {
    pub name: String,
    pub permissions: Vec<Permission>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_exact_match() {
        let p = Permission {
            resource: "attendance".into(),
            actions: vec!["read".into()],
        };
        assert!(p.allows("attendance", "read"));
        assert!(!p.allows("attendance", "write"));
        assert!(!p.allows("employees", "read"));
    }

    #[test]
    fn permission_wildcards() {
        let all = Permission {
            resource: "*".into(),
            actions: vec!["*".into()],
        };
        assert!(all.allows("employees", "delete"));
        assert!(all.allows("attendance", "write"));

        let any_action = Permission {
            resource: "employees".into(),
            actions: vec!["*".into()],
        };
        assert!(any_action.allows("employees", "write"));
        assert!(!any_action.allows("attendance", "read"));
    }
}
