//! Driven port answering permission questions.
//!
//! Policy evaluation itself lives outside this service; the port only asks
//! whether `(subject, target, capability)` is allowed.

use async_trait::async_trait;

use crate::domain::{Capability, PermissionTarget, Subject};

use super::define_port_error;

define_port_error! {
    /// Errors raised while evaluating a permission.
    pub enum AuthorizationPolicyError {
        /// The policy store could not be consulted.
        Unavailable { message: String } =>
            "authorization policy unavailable: {message}",
    }
}

/// Port for permission evaluation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthorizationPolicy: Send + Sync {
    /// Whether `subject` may exercise `capability` on `target`.
    async fn has_permission(
        &self,
        subject: &Subject,
        target: &PermissionTarget,
        capability: Capability,
    ) -> Result<bool, AuthorizationPolicyError>;
}

/// Policy that admits every authenticated subject and nobody else.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAuthorizationPolicy;

#[async_trait]
impl AuthorizationPolicy for FixtureAuthorizationPolicy {
    async fn has_permission(
        &self,
        subject: &Subject,
        _target: &PermissionTarget,
        _capability: Capability,
    ) -> Result<bool, AuthorizationPolicyError> {
        Ok(subject.is_authenticated())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CapabilityDomain, UserId};
    use rstest::rstest;
    use uuid::Uuid;

    #[rstest]
    #[tokio::test]
    async fn fixture_policy_requires_authentication() {
        let target = PermissionTarget::new(CapabilityDomain::Community, Uuid::nil());
        let user = Subject::User(UserId::from_uuid(Uuid::nil()));

        let policy = FixtureAuthorizationPolicy;
        assert!(policy
            .has_permission(&user, &target, Capability::Write)
            .await
            .expect("policy answers"));
        assert!(!policy
            .has_permission(&Subject::Anonymous, &target, Capability::Write)
            .await
            .expect("policy answers"));
    }
}
