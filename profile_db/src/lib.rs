use profile_domain::error::{PfError, PfResult};

use anyhow::Context;
use entrait::Impl;
use sqlx::error::DatabaseError;
use sqlx::PgPool;

pub mod profile;

#[derive(Clone)]
pub struct Db {
    pub pg_pool: PgPool,
}

impl Db {
    pub async fn init(url: &str) -> anyhow::Result<Self> {
        let pg_pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(50)
            .connect(url)
            .await
            .context("could not connect to database_url")?;

        sqlx::migrate!("../migrations")
            .run(&pg_pool)
            .await
            .context("could not run database migrations")?;

        tracing::info!("database ready");

        Ok(Db { pg_pool })
    }
}

/// Access to the database handle from any dependency container.
pub trait GetDb {
    fn get_db(&self) -> &Db;
}

impl GetDb for Db {
    fn get_db(&self) -> &Db {
        self
    }
}

impl<T: GetDb> GetDb for Impl<T> {
    fn get_db(&self) -> &Db {
        (**self).get_db()
    }
}

/// Maps a violation of a named constraint to a domain error.
trait DbResultExt<T> {
    fn on_constraint(
        self,
        constraint: &str,
        to_error: impl FnOnce(&dyn DatabaseError) -> PfError,
    ) -> PfResult<T>;
}

impl<T> DbResultExt<T> for Result<T, sqlx::Error> {
    fn on_constraint(
        self,
        constraint: &str,
        to_error: impl FnOnce(&dyn DatabaseError) -> PfError,
    ) -> PfResult<T> {
        match self {
            Err(sqlx::Error::Database(db_error)) if db_error.constraint() == Some(constraint) => {
                Err(to_error(db_error.as_ref()))
            }
            other => Ok(other?),
        }
    }
}

#[cfg(test)]
impl profile_domain::profile::repo::DelegateProfileRepo<Self> for Db {
    type Target = profile::PgProfileRepo;
}

#[cfg(test)]
async fn create_test_db() -> Impl<Db> {
    use sha2::Digest;
    use sqlx::Connection;

    let mut hasher = sha2::Sha256::new();
    hasher.update(std::thread::current().name().unwrap().as_bytes());
    let thread_hash = hex::encode(hasher.finalize());
    let db_name = &thread_hash[0..24];

    let mut url = database_server_url();
    let mut connection = sqlx::PgConnection::connect(url.as_str()).await.unwrap();

    sqlx::query(&format!(r#"DROP DATABASE IF EXISTS "{}""#, db_name))
        .execute(&mut connection)
        .await
        .expect("failed to drop");

    sqlx::query(&format!(r#"CREATE DATABASE "{}""#, db_name))
        .execute(&mut connection)
        .await
        .expect("failed creating test database");

    url.set_path(db_name);

    Impl::new(
        Db::init(url.as_str())
            .await
            .expect("Failed to initialize test database"),
    )
}

/// `DATABASE_URL` with the database name stripped, pointing at the server itself.
#[cfg(test)]
fn database_server_url() -> url::Url {
    dotenv::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let mut url = url::Url::parse(&database_url).expect("malformed DATABASE_URL");
    url.set_path("");
    url
}
