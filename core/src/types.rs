/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use super::input::port_in_range;
use clap::Parser;
use entity::*;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};

#[derive(Parser, Debug)]
#[command(name = "Compass", display_name = "Compass", bin_name = "compass-server", author = "Wavelens", version, about, long_about = None)]
pub struct Cli {
    #[arg(long, env = "COMPASS_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
    #[arg(long, env = "COMPASS_IP", default_value = "127.0.0.1")]
    pub ip: String,
    #[arg(long, env = "COMPASS_PORT", value_parser = port_in_range, default_value_t = 3000)]
    pub port: u16,
    #[arg(long, env = "COMPASS_DATABASE_URL")]
    pub database_url: Option<String>,
    #[arg(long, env = "COMPASS_DATABASE_URL_FILE")]
    pub database_url_file: Option<String>,
    #[arg(long, env = "COMPASS_JWT_SECRET_FILE")]
    pub jwt_secret_file: String,
    #[arg(long, env = "COMPASS_REPORT_ERRORS", default_value = "false")]
    pub report_errors: bool,
    #[arg(long, env = "COMPASS_SENTRY_DSN")]
    pub sentry_dsn: Option<String>,
    #[arg(long, env = "COMPASS_STATE_FILE")]
    pub state_file: Option<String>,
    #[arg(long, env = "COMPASS_DELETE_STATE", default_value = "false")]
    pub delete_state: bool,
}

#[derive(Debug)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub cli: Cli,
    /// Loaded from `jwt_secret_file` once at startup.
    pub jwt_secret: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct BaseResponse<T> {
    pub error: bool,
    pub message: T,
}

/// Body of every failed request: `error` is operator-facing, `details` is
/// optional diagnostic context.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

pub type EConsultantAssignment = consultant_assignment::Entity;
pub type EGeneration = generation::Entity;
pub type EGrowthCommunity = growth_community::Entity;
pub type ESchool = school::Entity;
pub type EUser = user::Entity;

pub type MConsultantAssignment = consultant_assignment::Model;
pub type MGeneration = generation::Model;
pub type MGrowthCommunity = growth_community::Model;
pub type MSchool = school::Model;
pub type MUser = user::Model;

pub type AConsultantAssignment = consultant_assignment::ActiveModel;
pub type AGeneration = generation::ActiveModel;
pub type AGrowthCommunity = growth_community::ActiveModel;
pub type ASchool = school::ActiveModel;
pub type AUser = user::ActiveModel;

pub type CConsultantAssignment = consultant_assignment::Column;
pub type CGeneration = generation::Column;
pub type CGrowthCommunity = growth_community::Column;
pub type CSchool = school::Column;
pub type CUser = user::Column;
