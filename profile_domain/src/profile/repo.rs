use entrait::entrait_export as entrait;

use crate::error::PfResult;

/// Storage-assigned identifier of a profile.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ProfileId(pub uuid::Uuid);

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Profile {
    pub profile_id: ProfileId,
    pub username: String,
    pub display_name: Option<String>,
    pub bio: Option<String>,
}

/// Only the fields that are `Some` get written.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ProfileUpdate<'a> {
    pub username: Option<&'a str>,
    pub display_name: Option<&'a str>,
    pub bio: Option<&'a str>,
}

#[entrait(ProfileRepoImpl, delegate_by = DelegateProfileRepo, mock_api=ProfileRepoMock)]
pub trait ProfileRepo {
    async fn insert_profile(
        &self,
        username: &str,
        display_name: Option<&str>,
        bio: Option<&str>,
    ) -> PfResult<Profile>;

    async fn select_profiles(&self) -> PfResult<Vec<Profile>>;

    async fn find_profile_by_username(&self, username: &str) -> PfResult<Option<Profile>>;

    /// Returns `None` when no profile has that username.
    async fn update_profile(
        &self,
        username: &str,
        update: ProfileUpdate<'_>,
    ) -> PfResult<Option<Profile>>;

    async fn delete_profile(&self, username: &str) -> PfResult<()>;
}
