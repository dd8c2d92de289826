//! Reference authorization policy held in memory.

use std::collections::HashSet;

use async_trait::async_trait;

use crate::domain::ports::{AuthorizationPolicy, AuthorizationPolicyError, FIXTURE_ADMIN_ID};
use crate::domain::{Capability, PermissionTarget, Subject, UserId};

/// Administrators may do anything; other users need an explicit grant.
/// Anonymous callers are never granted anything.
#[derive(Debug, Clone)]
pub struct InMemoryAuthorizationPolicy {
    admins: HashSet<UserId>,
    grants: HashSet<(UserId, PermissionTarget, Capability)>,
}

impl Default for InMemoryAuthorizationPolicy {
    fn default() -> Self {
        Self::empty().with_admin(UserId::from_uuid(FIXTURE_ADMIN_ID))
    }
}

impl InMemoryAuthorizationPolicy {
    /// Policy with no administrators and no grants.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            admins: HashSet::new(),
            grants: HashSet::new(),
        }
    }

    #[must_use]
    pub fn with_admin(mut self, user: UserId) -> Self {
        self.admins.insert(user);
        self
    }

    /// Allow `user` to exercise `capability` on `target`.
    #[must_use]
    pub fn grant(mut self, user: UserId, target: PermissionTarget, capability: Capability) -> Self {
        self.grants.insert((user, target, capability));
        self
    }
}

#[async_trait]
impl AuthorizationPolicy for InMemoryAuthorizationPolicy {
    async fn has_permission(
        &self,
        subject: &Subject,
        target: &PermissionTarget,
        capability: Capability,
    ) -> Result<bool, AuthorizationPolicyError> {
        let Some(user) = subject.user_id() else {
            return Ok(false);
        };
        Ok(self.admins.contains(user) || self.grants.contains(&(*user, *target, capability)))
    }
}
