use profile_domain::auth::{Authenticate, Authenticated, Claims, Token};
use profile_domain::error::PfError;

use axum::extract::{Extension, FromRequestParts};
use axum::http::request::Parts;

///
/// Extractor guarding a route behind a valid bearer token.
///
/// Runs before any body extractor, so a rejected request never reaches the handler.
///
pub struct Guarded<D> {
    pub deps: D,
    pub claims: Claims,
}

#[async_trait::async_trait]
impl<S, D> FromRequestParts<S> for Guarded<D>
where
    S: Send + Sync,
    D: Authenticate + Clone + Send + Sync + 'static,
{
    type Rejection = PfError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = Token::from_request_parts(parts, state).await?;

        let Extension(deps) = Extension::<D>::from_request_parts(parts, state)
            .await
            .map_err(|e| anyhow::anyhow!("dependencies missing from request: {e}"))?;

        let Authenticated(claims) = deps.authenticate(token)?;

        Ok(Self { deps, claims })
    }
}
