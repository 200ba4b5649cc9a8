pub mod auth;
pub mod error;
pub mod profile;

use entrait::entrait_export as entrait;

///
/// Mockable system abstraction
///
#[entrait(mock_api=SystemMock)]
pub trait System {
    fn get_current_time(&self) -> time::OffsetDateTime;
}

///
/// Mockable config accessor
///
#[entrait(mock_api=GetConfigMock)]
pub trait GetConfig {
    /// Shared secret that bearer tokens are signed with.
    fn get_jwt_secret(&self) -> &hmac::Hmac<sha2::Sha256>;
}
