use crate::DbResultExt;
use crate::GetDb;

use profile_domain::error::{PfError, PfResult};
use profile_domain::profile::repo::*;

use entrait::*;

pub struct PgProfileRepo;

#[derive(sqlx::FromRow)]
struct ProfileRow {
    profile_id: uuid::Uuid,
    username: String,
    display_name: Option<String>,
    bio: Option<String>,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Self {
            profile_id: ProfileId(row.profile_id),
            username: row.username,
            display_name: row.display_name,
            bio: row.bio,
        }
    }
}

const USERNAME_KEY: &str = "profile_username_key";

#[entrait]
impl profile_domain::profile::repo::ProfileRepoImpl for PgProfileRepo {
    pub async fn insert_profile(
        deps: &impl GetDb,
        username: &str,
        display_name: Option<&str>,
        bio: Option<&str>,
    ) -> PfResult<Profile> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            INSERT INTO app.profile (username, display_name, bio)
            VALUES ($1, $2, $3)
            RETURNING profile_id, username, display_name, bio
            "#,
        )
        .bind(username)
        .bind(display_name)
        .bind(bio)
        .fetch_one(&deps.get_db().pg_pool)
        .await
        .on_constraint(USERNAME_KEY, |_| PfError::UsernameTaken)?;

        Ok(row.into())
    }

    pub async fn select_profiles(deps: &impl GetDb) -> PfResult<Vec<Profile>> {
        let rows = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT profile_id, username, display_name, bio
            FROM app.profile
            ORDER BY created_at, profile_id
            "#,
        )
        .fetch_all(&deps.get_db().pg_pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn find_profile_by_username(
        deps: &impl GetDb,
        username: &str,
    ) -> PfResult<Option<Profile>> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT profile_id, username, display_name, bio
            FROM app.profile
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&deps.get_db().pg_pool)
        .await?;

        Ok(row.map(Into::into))
    }

    pub async fn update_profile(
        deps: &impl GetDb,
        username: &str,
        update: ProfileUpdate<'_>,
    ) -> PfResult<Option<Profile>> {
        let row = sqlx::query_as::<_, ProfileRow>(
            // language=PostgreSQL
            r#"
            UPDATE app.profile SET
                username = COALESCE($1, username),
                display_name = COALESCE($2, display_name),
                bio = COALESCE($3, bio)
            WHERE username = $4
            RETURNING profile_id, username, display_name, bio
            "#,
        )
        .bind(update.username)
        .bind(update.display_name)
        .bind(update.bio)
        .bind(username)
        .fetch_optional(&deps.get_db().pg_pool)
        .await
        .on_constraint(USERNAME_KEY, |_| PfError::UsernameTaken)?;

        Ok(row.map(Into::into))
    }

    pub async fn delete_profile(deps: &impl GetDb, username: &str) -> PfResult<()> {
        let result = sqlx::query(r#"DELETE FROM app.profile WHERE username = $1"#)
            .bind(username)
            .execute(&deps.get_db().pg_pool)
            .await?;

        // Deleting a missing profile is not an error.
        tracing::debug!(username, deleted = result.rows_affected(), "deleted profile");

        Ok(())
    }
}
