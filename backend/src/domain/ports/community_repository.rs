//! Read-side port resolving community identifiers.

use async_trait::async_trait;

use crate::domain::{Community, CommunityId, Context};

use super::define_port_error;

define_port_error! {
    /// Errors raised when reading communities.
    pub enum CommunityRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "community read connection failed: {message}",
        /// Query failed during execution or row conversion.
        Query { message: String } =>
            "community read query failed: {message}",
    }
}

/// Port for looking communities up by identifier.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommunityRepository: Send + Sync {
    /// Resolve `id` within `ctx`. An unknown id yields `Ok(None)`.
    async fn find(
        &self,
        ctx: &Context,
        id: &CommunityId,
    ) -> Result<Option<Community>, CommunityRepositoryError>;
}
