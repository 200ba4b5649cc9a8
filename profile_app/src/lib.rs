pub mod app;
pub mod config;

mod auth;
mod routes;

#[cfg(test)]
mod test_util;

use anyhow::Context;
use axum::extract::Extension;
use entrait::Impl;
use std::net::SocketAddr;
use tower::ServiceBuilder;

pub async fn serve(app: app::App) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], app.config.port));

    let router = routes::api_router().layer(
        ServiceBuilder::new()
            .layer(Extension(Impl::new(app)))
            // Enables logging. Use `RUST_LOG=tower_http=debug`
            .layer(tower_http::trace::TraceLayer::new_for_http()),
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("could not bind to {addr}"))?;

    tracing::info!("listening on {}", addr);

    axum::serve(listener, router)
        .await
        .context("error running HTTP server")
}
