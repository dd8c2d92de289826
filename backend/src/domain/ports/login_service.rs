//! Driving port for login/authentication use-cases.
//!
//! Inbound adapters call it to authenticate credentials without knowing the
//! backing account store. HTTP handler tests substitute a mock or the
//! fixture implementation below.

use async_trait::async_trait;

use uuid::Uuid;

use crate::domain::{Error, LoginCredentials, UserId};

/// Account id of the fixture administrator.
pub const FIXTURE_ADMIN_ID: Uuid = Uuid::from_u128(0x123e4567_e89b_12d3_a456_426614174000);
/// Account id of the fixture reader, who holds no write grants.
pub const FIXTURE_READER_ID: Uuid = Uuid::from_u128(0x3fa85f64_5717_4562_b3fc_2c963f66afa6);

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user id.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;
}

/// In-memory authenticator with two fixed accounts.
///
/// `admin` / `password` and `reader` / `password` authenticate; anything else
/// is rejected.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let id = match (credentials.username(), credentials.password()) {
            ("admin", "password") => FIXTURE_ADMIN_ID,
            ("reader", "password") => FIXTURE_READER_ID,
            _ => return Err(Error::unauthorized("invalid credentials")),
        };
        Ok(UserId::from_uuid(id))
    }
}
