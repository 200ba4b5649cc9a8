mod profile_routes;

use crate::app::App;

use axum::routing::Router;
use entrait::Impl;

/// Axum API router for the real app.
pub fn api_router() -> axum::Router {
    Router::new().merge(profile_routes::ProfileRoutes::<Impl<App>>::router())
}
