/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

pub mod authorization;
pub mod endpoints;
pub mod error;

use anyhow::{Context, Result};
use axum::routing::get;
use axum::{Router, middleware};
use compass_core::types::ServerState;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn create_router(state: Arc<ServerState>) -> Router {
    let api = Router::new()
        .route("/directory", get(endpoints::directory::get))
        .route(
            "/assignments",
            get(endpoints::assignments::get).post(endpoints::assignments::post),
        )
        .route(
            "/assignments/{assignment}",
            axum::routing::put(endpoints::assignments::put)
                .patch(endpoints::assignments::patch)
                .delete(endpoints::assignments::delete),
        )
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            authorization::authorize,
        ))
        .route("/health", get(endpoints::get_health));

    Router::new()
        .nest("/api/v1", api)
        .fallback(endpoints::handle_404)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve_web(state: Arc<ServerState>) -> Result<()> {
    let server_url = format!("{}:{}", state.cli.ip, state.cli.port);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&server_url)
        .await
        .with_context(|| format!("Failed to bind {}", server_url))?;
    tracing::info!("Listening on {}", server_url);

    axum::serve(listener, app)
        .await
        .context("Web server stopped unexpectedly")
}
