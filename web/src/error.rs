/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use anyhow::Error as AnyhowError;
use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use compass_core::types::ErrorResponse;
use sea_orm::DbErr;
use std::fmt;

#[derive(Debug)]
pub enum WebError {
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    Conflict { error: String, details: Option<String> },
    Database(DbErr),
    JsonParsing(JsonRejection),
    QueryParsing(QueryRejection),
    PathParsing(PathRejection),
    Internal(AnyhowError),
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WebError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            WebError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            WebError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            WebError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            WebError::Conflict { error, .. } => write!(f, "Conflict: {}", error),
            WebError::Database(err) => write!(f, "Database error: {}", err),
            WebError::JsonParsing(err) => write!(f, "JSON parsing error: {}", err),
            WebError::QueryParsing(err) => write!(f, "Query parsing error: {}", err),
            WebError::PathParsing(err) => write!(f, "Path parsing error: {}", err),
            WebError::Internal(err) => write!(f, "Internal error: {}", err),
        }
    }
}

impl std::error::Error for WebError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WebError::Database(err) => Some(err),
            WebError::JsonParsing(err) => Some(err),
            WebError::QueryParsing(err) => Some(err),
            WebError::PathParsing(err) => Some(err),
            WebError::Internal(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<DbErr> for WebError {
    fn from(err: DbErr) -> Self {
        WebError::Database(err)
    }
}

impl From<JsonRejection> for WebError {
    fn from(err: JsonRejection) -> Self {
        WebError::JsonParsing(err)
    }
}

impl From<QueryRejection> for WebError {
    fn from(err: QueryRejection) -> Self {
        WebError::QueryParsing(err)
    }
}

impl From<PathRejection> for WebError {
    fn from(err: PathRejection) -> Self {
        WebError::PathParsing(err)
    }
}

impl From<AnyhowError> for WebError {
    fn from(err: AnyhowError) -> Self {
        WebError::Internal(err)
    }
}

impl WebError {
    pub fn status(&self) -> StatusCode {
        match self {
            WebError::BadRequest(_)
            | WebError::JsonParsing(_)
            | WebError::QueryParsing(_)
            | WebError::PathParsing(_) => StatusCode::BAD_REQUEST,
            WebError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            WebError::Forbidden(_) => StatusCode::FORBIDDEN,
            WebError::NotFound(_) => StatusCode::NOT_FOUND,
            WebError::Conflict { .. } => StatusCode::CONFLICT,
            WebError::Database(_) | WebError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (error, details) = match self {
            WebError::BadRequest(msg)
            | WebError::Unauthorized(msg)
            | WebError::Forbidden(msg)
            | WebError::NotFound(msg) => (msg, None),
            WebError::Conflict { error, details } => (error, details),
            WebError::Database(err) => {
                tracing::error!("Database error: {}", err);
                ("Database error".to_string(), None)
            }
            WebError::JsonParsing(err) => ("Invalid JSON".to_string(), Some(err.body_text())),
            WebError::QueryParsing(err) => {
                ("Invalid query".to_string(), Some(err.body_text()))
            }
            WebError::PathParsing(err) => ("Invalid path".to_string(), Some(err.body_text())),
            WebError::Internal(err) => {
                tracing::error!("Internal error: {:#}", err);
                ("Internal server error".to_string(), None)
            }
        };

        (status, Json(ErrorResponse { error, details })).into_response()
    }
}

pub type WebResult<T> = Result<T, WebError>;

impl WebError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        WebError::BadRequest(reason.into())
    }

    pub fn not_found(resource: &str) -> Self {
        WebError::NotFound(format!("{} not found", resource))
    }

    pub fn already_exists(resource: &str, details: impl Into<String>) -> Self {
        WebError::Conflict {
            error: format!("{} already exists", resource),
            details: Some(details.into()),
        }
    }
}
