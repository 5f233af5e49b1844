/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use super::*;
use crate::config::*;
use crate::input::*;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use connector::HttpBackend;
use std::io;

#[derive(Parser, Debug)]
#[command(name = "Compass", display_name = "Compass", bin_name = "compass", author = "Wavelens", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Option<MainCommands>,
    #[arg(long, value_enum)]
    generate_completions: Option<Shell>,
}

#[derive(Subcommand, Debug)]
enum MainCommands {
    /// Read or set a configuration value (server, authtoken)
    Config { key: String, value: Option<String> },
    /// Check that the configured server is reachable
    Status,
    /// Summarize the organizational directory
    Directory,
    Assignment {
        #[command(subcommand)]
        cmd: assignment::Commands,
    },
}

pub async fn run_cli() {
    let cli = Cli::parse();

    if let Some(shell) = cli.generate_completions {
        let mut app = Cli::command();
        let bin_name = app.get_name().to_string();
        generate(shell, &mut app, bin_name, &mut io::stdout());
        return;
    }

    let Some(cmd) = cli.cmd else {
        or_exit(Cli::command().print_help());
        return;
    };

    match cmd {
        MainCommands::Config { key, value } => {
            or_exit(set_get_value_from_string(key, value, false));
        }

        MainCommands::Status => {
            let backend = HttpBackend::new(or_exit(get_request_config()));
            or_exit(backend.health().await);
            println!("Server Online.");
        }

        MainCommands::Directory => directory::handle().await,

        MainCommands::Assignment { cmd } => assignment::handle(cmd).await,
    }
}
