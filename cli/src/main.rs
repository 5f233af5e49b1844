/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

mod commands;
mod config;
mod input;

#[tokio::main]
pub async fn main() {
    commands::base::run_cli().await;
}
