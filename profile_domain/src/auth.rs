use crate::error::{PfError, PfResult};
use crate::{GetConfig, System};

use axum_extra::TypedHeader;
use entrait::entrait_export as entrait;
use headers::authorization::Credentials;
use headers::Authorization;
use http::HeaderValue;
use jwt::VerifyWithKey;
use std::collections::BTreeMap;

/// Decoded token payload, keyed by claim name.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(transparent)]
pub struct Claims(pub BTreeMap<String, serde_json::Value>);

impl Claims {
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.0.get(name)
    }

    /// The `username` claim, if it is a non-empty string.
    pub fn username(&self) -> Option<&str> {
        self.get("username")
            .and_then(serde_json::Value::as_str)
            .filter(|username| !username.is_empty())
    }

    fn numeric_date(&self, name: &str) -> PfResult<Option<f64>> {
        match self.get(name) {
            None => Ok(None),
            Some(value) => value.as_f64().map(Some).ok_or(PfError::Unauthorized),
        }
    }
}

/// Marker/Wrapper type for anything authenticated
#[derive(Clone, Debug)]
pub struct Authenticated<T>(pub T);

#[entrait(pub Authenticate, mock_api=AuthenticateMock)]
pub mod authenticate {
    use super::*;

    pub fn authenticate(
        deps: &(impl System + GetConfig),
        token: Token,
    ) -> PfResult<Authenticated<Claims>> {
        let jwt = jwt::Token::<jwt::Header, Claims, _>::parse_unverified(token.token())
            .map_err(|_| PfError::Unauthorized)?;

        // Also rejects tokens whose header names another algorithm than HS256.
        let jwt = jwt
            .verify_with_key(deps.get_jwt_secret())
            .map_err(|_| PfError::Unauthorized)?;
        let (_header, claims) = jwt.into();

        let now = deps.get_current_time().unix_timestamp() as f64;

        if let Some(exp) = claims.numeric_date("exp")? {
            if now >= exp {
                tracing::debug!("rejecting expired token");
                return Err(PfError::Unauthorized);
            }
        }

        if let Some(nbf) = claims.numeric_date("nbf")? {
            if nbf > now {
                tracing::debug!("rejecting token that is not yet valid");
                return Err(PfError::Unauthorized);
            }
        }

        Ok(Authenticated(claims))
    }
}

///
/// Data for `Bearer` authorization scheme.
///
#[derive(Clone, Debug)]
pub struct Token(String);

impl Token {
    pub fn from_token(token: &str) -> Self {
        Self(token.to_string())
    }

    pub fn token(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        self.token()
    }
}

impl Credentials for Token {
    const SCHEME: &'static str = "Bearer";

    fn decode(value: &HeaderValue) -> Option<Self> {
        // Exactly `Bearer <token>`: case-sensitive scheme, one space, one token.
        let (scheme, token) = value.to_str().ok()?.split_once(' ')?;

        if scheme != Self::SCHEME || token.is_empty() || token.contains(' ') {
            return None;
        }

        Some(Token(token.to_string()))
    }

    fn encode(&self) -> HeaderValue {
        HeaderValue::from_str(&format!("{} {}", Self::SCHEME, self.0))
            .expect("token was decoded from a valid header value")
    }
}

#[async_trait::async_trait]
impl<S> axum::extract::FromRequestParts<S> for Token
where
    S: Send + Sync,
{
    type Rejection = PfError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(token)) =
            TypedHeader::<Authorization<Token>>::from_request_parts(parts, state)
                .await
                .map_err(|_| PfError::Unauthorized)?;

        Ok(token)
    }
}
