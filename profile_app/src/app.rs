use crate::config::{Config, JwtSecret};
use profile_db::{Db, GetDb};

use std::sync::Arc;
use time::OffsetDateTime;

#[derive(Clone)]
pub struct App {
    pub config: Arc<Config>,
    pub jwt_secret: JwtSecret,
    pub db: Db,
}

impl App {
    pub fn new(config: Config, db: Db) -> Self {
        Self {
            jwt_secret: config.jwt_secret_or_fallback(),
            config: Arc::new(config),
            db,
        }
    }
}

impl profile_domain::System for App {
    fn get_current_time(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

impl profile_domain::GetConfig for App {
    fn get_jwt_secret(&self) -> &hmac::Hmac<sha2::Sha256> {
        &self.jwt_secret.0
    }
}

impl GetDb for App {
    fn get_db(&self) -> &Db {
        &self.db
    }
}

impl profile_domain::profile::repo::DelegateProfileRepo<Self> for App {
    type Target = profile_db::profile::PgProfileRepo;
}
