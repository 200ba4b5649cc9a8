use crate::auth::Guarded;
use profile_domain::auth::Authenticate;
use profile_domain::error::PfResult;
use profile_domain::profile::{self, ProfileApi};

use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Json;

pub struct ProfileRoutes<D>(std::marker::PhantomData<D>);

impl<D> ProfileRoutes<D>
where
    D: ProfileApi + Authenticate + Sized + Clone + Send + Sync + 'static,
{
    pub fn router() -> axum::Router {
        axum::Router::new()
            .route("/profile", get(Self::find_all).post(Self::create))
            .route(
                "/profile/:username",
                get(Self::find_one).put(Self::update).delete(Self::remove),
            )
    }

    async fn create(
        Guarded { deps, claims }: Guarded<D>,
        Json(body): Json<profile::ProfileCreate>,
    ) -> PfResult<(StatusCode, Json<profile::Profile>)> {
        Ok((
            StatusCode::CREATED,
            Json(deps.create(body.claimed_by(&claims)).await?),
        ))
    }

    async fn find_all(Guarded { deps, .. }: Guarded<D>) -> PfResult<Json<Vec<profile::Profile>>> {
        Ok(Json(deps.find_all().await?))
    }

    async fn find_one(
        Guarded { deps, .. }: Guarded<D>,
        Path(username): Path<String>,
    ) -> PfResult<Json<profile::Profile>> {
        Ok(Json(deps.find_one(&username).await?))
    }

    async fn update(
        Guarded { deps, .. }: Guarded<D>,
        Path(username): Path<String>,
        Json(body): Json<profile::ProfileUpdate>,
    ) -> PfResult<Json<profile::Profile>> {
        Ok(Json(deps.update(&username, body).await?))
    }

    async fn remove(
        Guarded { deps, .. }: Guarded<D>,
        Path(username): Path<String>,
    ) -> PfResult<()> {
        deps.remove(&username).await
    }
}
