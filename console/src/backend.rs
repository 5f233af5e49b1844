/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use async_trait::async_trait;
use uuid::Uuid;

use crate::directory::DirectoryResponse;
use crate::error::BackendError;
use crate::types::{Assignment, AssignmentPayload};

/// Remote side of the console: the directory read endpoint and the
/// assignment endpoints.
#[async_trait]
pub trait AssignmentBackend: Send + Sync {
    async fn fetch_directory(&self) -> Result<DirectoryResponse, BackendError>;

    async fn list_assignments(&self, include_inactive: bool)
    -> Result<Vec<Assignment>, BackendError>;

    async fn create_assignment(
        &self,
        payload: &AssignmentPayload,
    ) -> Result<Assignment, BackendError>;

    async fn update_assignment(
        &self,
        id: Uuid,
        payload: &AssignmentPayload,
    ) -> Result<Assignment, BackendError>;

    async fn set_assignment_active(
        &self,
        id: Uuid,
        is_active: bool,
    ) -> Result<Assignment, BackendError>;

    async fn delete_assignment(&self, id: Uuid) -> Result<(), BackendError>;
}

/// An awaited yes/no decision from the operator.
#[async_trait]
pub trait Confirm: Send + Sync {
    async fn confirm(&self, prompt: &str) -> bool;
}
