/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use uuid::Uuid;

/// Client-local failures. These block submission and never reach the
/// network.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Select a consultant")]
    MissingConsultant,
    #[error("Select a student")]
    MissingStudent,
    #[error("A consultant cannot be assigned to themselves")]
    SelfAssignment,
    #[error("Select a school")]
    MissingSchool,
    /// The school only exists as a placeholder for a user's stale membership.
    #[error("The selected school is not in the directory")]
    UnverifiedSchool,
    #[error("Select a generation")]
    MissingGeneration,
    #[error("Select a growth community")]
    MissingCommunity,
    #[error("An end date is required for a time-bounded assignment")]
    MissingEndDate,
    #[error("The end date cannot be in the past")]
    EndDateInPast,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    #[error("Authentication failed: {0}")]
    Authentication(String),
    /// Structured error reported by the server, shown verbatim.
    #[error("{error}{}", .details.as_ref().map(|d| format!(": {}", d)).unwrap_or_default())]
    Server {
        error: String,
        details: Option<String>,
    },
    #[error("The server returned an unexpected response")]
    Malformed,
    #[error("Request failed: {0}")]
    Transport(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Write(#[from] BackendError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConsoleError {
    #[error("User {0} is not in the directory")]
    UnknownUser(Uuid),
    #[error("Assignment {0} not found")]
    UnknownAssignment(Uuid),
    #[error(transparent)]
    Backend(#[from] BackendError),
}
