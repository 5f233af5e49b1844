/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

pub mod consts;
pub mod database;
pub mod input;
pub mod state;
pub mod types;

use anyhow::{Context, Result};
use clap::Parser;
use database::connect_db;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use types::*;

pub fn init_logging(cli: &Cli) {
    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

pub async fn init_state() -> Result<Arc<ServerState>> {
    let cli = Cli::parse();
    init_logging(&cli);

    tracing::info!("Starting Compass Server on {}:{}", cli.ip, cli.port);

    let jwt_secret =
        input::load_secret(&cli.jwt_secret_file).context("Failed to load JWT secret")?;
    let db = connect_db(&cli).await?;

    if let Some(state_file) = &cli.state_file {
        state::load_and_apply_state(&db, state_file, cli.delete_state)
            .await
            .context("Failed to apply state file")?;
    }

    Ok(Arc::new(ServerState {
        db,
        cli,
        jwt_secret,
    }))
}
