pub mod repo;

use crate::auth::Claims;
use crate::error::*;
use repo::ProfileRepo;

use entrait::entrait_export as entrait;

#[derive(serde::Deserialize, serde::Serialize, Clone, Debug, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: uuid::Uuid,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

impl From<repo::Profile> for Profile {
    fn from(p: repo::Profile) -> Self {
        Self {
            id: p.profile_id.0,
            username: p.username,
            display_name: p.display_name,
            bio: p.bio,
        }
    }
}

/// Partial profile accepted on creation. `username` may come from the token instead.
#[derive(serde::Deserialize, serde::Serialize, Clone, Debug, Default, Eq, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfileCreate {
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub bio: Option<String>,
}

impl ProfileCreate {
    /// An authenticated `username` claim takes precedence over the payload.
    pub fn claimed_by(self, claims: &Claims) -> Self {
        match claims.username() {
            Some(username) => Self {
                username: Some(username.to_string()),
                ..self
            },
            None => self,
        }
    }
}

#[derive(serde::Deserialize, serde::Serialize, Clone, Debug, Default, Eq, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub bio: Option<String>,
}

#[entrait(pub ProfileApi, mock_api=ProfileApiMock)]
pub mod api {
    use super::*;

    pub async fn create(deps: &impl ProfileRepo, profile: ProfileCreate) -> PfResult<Profile> {
        let username = profile
            .username
            .as_deref()
            .filter(|username| !username.is_empty())
            .ok_or(PfError::UsernameRequired)?;

        let created = deps
            .insert_profile(
                username,
                profile.display_name.as_deref(),
                profile.bio.as_deref(),
            )
            .await?;

        tracing::debug!(username = %created.username, "created profile");

        Ok(created.into())
    }

    pub async fn find_all(deps: &impl ProfileRepo) -> PfResult<Vec<Profile>> {
        deps.select_profiles()
            .await
            .map(|profiles| profiles.into_iter().map(Into::into).collect())
    }

    pub async fn find_one(deps: &impl ProfileRepo, username: &str) -> PfResult<Profile> {
        deps.find_profile_by_username(username)
            .await?
            .map(Into::into)
            .ok_or(PfError::ProfileNotFound)
    }

    pub async fn update(
        deps: &impl ProfileRepo,
        username: &str,
        update: ProfileUpdate,
    ) -> PfResult<Profile> {
        deps.update_profile(
            username,
            repo::ProfileUpdate {
                username: update.username.as_deref(),
                display_name: update.display_name.as_deref(),
                bio: update.bio.as_deref(),
            },
        )
        .await?
        .map(Into::into)
        .ok_or(PfError::ProfileNotFound)
    }

    pub async fn remove(deps: &impl ProfileRepo, username: &str) -> PfResult<()> {
        deps.delete_profile(username).await
    }
}
