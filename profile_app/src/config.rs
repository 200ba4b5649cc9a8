/// Secret used when `JWT_SECRET` is not configured. Not fit for production.
pub const FALLBACK_JWT_SECRET: &str = "supersecretkey";

#[derive(clap::Parser)]
pub struct Config {
    #[clap(long, env)]
    pub database_url: String,

    #[clap(long, env = "JWT_SECRET")]
    pub jwt_secret: Option<JwtSecret>,

    #[clap(long, env, default_value = "8080")]
    pub port: u16,
}

impl Config {
    /// The configured secret, or the fallback with a warning.
    pub fn jwt_secret_or_fallback(&self) -> JwtSecret {
        match &self.jwt_secret {
            Some(secret) => secret.clone(),
            None => {
                tracing::warn!("JWT_SECRET is not set, verifying tokens with the built-in fallback secret");
                JwtSecret::fallback()
            }
        }
    }
}

#[derive(Clone)]
pub struct JwtSecret(pub hmac::Hmac<sha2::Sha256>);

impl JwtSecret {
    pub fn fallback() -> Self {
        FALLBACK_JWT_SECRET
            .parse()
            .expect("HMAC-SHA-256 can accept any key length")
    }
}

impl std::str::FromStr for JwtSecret {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use hmac::Mac;

        Ok(Self(
            hmac::Hmac::<sha2::Sha256>::new_from_slice(s.as_bytes())
                .map_err(|e| format!("Failed to parse hmac: {e:?}"))?,
        ))
    }
}
