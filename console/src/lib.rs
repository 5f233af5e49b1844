/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Operator-side engine for scoped consultant assignments.
//!
//! A [`ScopeResolver`] narrows the target of an assignment against a
//! [`Directory`] snapshot, an [`AssignmentForm`] validates and writes it
//! through an [`AssignmentBackend`], and the [`Registry`] lists what is
//! already persisted.

pub mod backend;
pub mod blast_radius;
pub mod directory;
pub mod error;
pub mod form;
pub mod reconcile;
pub mod registry;
pub mod selection;
pub mod types;

pub use backend::{AssignmentBackend, Confirm};
pub use blast_radius::BlastRadius;
pub use directory::Directory;
pub use error::{BackendError, ConsoleError, SubmitError, ValidationError};
pub use form::{AssignmentForm, SaveOutcome, Submitted};
pub use registry::{Registry, RegistryFilter, StatusFilter};
pub use selection::{FieldChange, ScopeResolver, TargetSelection};
pub use types::*;
