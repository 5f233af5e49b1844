/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use compass_core::init_state;
use std::sync::Arc;

#[tokio::main]
pub async fn main() -> anyhow::Result<()> {
    let state = init_state().await?;

    let _guard = match (state.cli.report_errors, state.cli.sentry_dsn.as_deref()) {
        (true, Some(dsn)) => Some(sentry::init(dsn)),
        (true, None) => {
            tracing::warn!("Error reporting enabled but COMPASS_SENTRY_DSN is not set");
            None
        }
        _ => None,
    };

    if let Err(e) = web::serve_web(Arc::clone(&state)).await {
        tracing::error!(error = %e, "Compass server stopped");
        return Err(e);
    }

    Ok(())
}
