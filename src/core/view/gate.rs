//! Role gate for admin analytics
//!
//! Admin-only views (time series, top diagnoses, mean risk, metrics) are
//! gated on the user's resolved role. The gate fails closed: a missing
//! profile or a failed lookup is treated as non-admin, never the other
//! way around. It is evaluated before the admin-scale window is queried
//! so non-admins never trigger the large query.

use crate::adapters::store::ProfileStore;
use crate::domain::{Role, UserId};
use std::sync::Arc;

/// Resolves whether a user may see admin analytics
pub struct RoleGate {
    profiles: Arc<dyn ProfileStore>,
}

impl RoleGate {
    /// Create a gate over the given profile store
    pub fn new(profiles: Arc<dyn ProfileStore>) -> Self {
        Self { profiles }
    }

    /// True iff the user's profile exists and resolves to the admin role
    ///
    /// Lookup failures are logged and resolve to `false`.
    pub async fn is_admin(&self, user_id: &UserId) -> bool {
        match self.profiles.find_profile(user_id).await {
            Ok(Some(profile)) => profile.role == Role::Admin,
            Ok(None) => {
                tracing::debug!(user_id = %user_id, "No profile found; treating as non-admin");
                false
            }
            Err(e) => {
                tracing::warn!(
                    user_id = %user_id,
                    error = %e,
                    "Role lookup failed; treating as non-admin"
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::store::MemoryStore;
    use crate::domain::{ClinsightError, Result, UserProfile};
    use async_trait::async_trait;

    struct FailingProfiles;

    #[async_trait]
    impl ProfileStore for FailingProfiles {
        async fn find_profile(&self, _user_id: &UserId) -> Result<Option<UserProfile>> {
            Err(ClinsightError::Other("lookup exploded".to_string()))
        }
    }

    #[tokio::test]
    async fn test_admin_profile_resolves_true() {
        let store = Arc::new(MemoryStore::new());
        let id = UserId::new("uid-admin").unwrap();
        store.insert_profile(UserProfile {
            id: id.clone(),
            email: "admin@clinic.example".to_string(),
            display_name: "Admin".to_string(),
            role: Role::Admin,
        });

        let gate = RoleGate::new(store);
        assert!(gate.is_admin(&id).await);
    }

    #[tokio::test]
    async fn test_doctor_profile_resolves_false() {
        let store = Arc::new(MemoryStore::new());
        let id = UserId::new("uid-doc").unwrap();
        store.insert_profile(UserProfile {
            id: id.clone(),
            email: "doc@clinic.example".to_string(),
            display_name: "Doc".to_string(),
            role: Role::Doctor,
        });

        let gate = RoleGate::new(store);
        assert!(!gate.is_admin(&id).await);
    }

    #[tokio::test]
    async fn test_missing_profile_fails_closed() {
        let gate = RoleGate::new(Arc::new(MemoryStore::new()));
        assert!(!gate.is_admin(&UserId::new("uid-ghost").unwrap()).await);
    }

    #[tokio::test]
    async fn test_lookup_failure_fails_closed() {
        let gate = RoleGate::new(Arc::new(FailingProfiles));
        assert!(!gate.is_admin(&UserId::new("uid-any").unwrap()).await);
    }
}
