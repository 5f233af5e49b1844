/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use chrono::{NaiveDateTime, Utc};
use std::fmt;
use tracing::{debug, info};
use uuid::Uuid;

use crate::backend::{AssignmentBackend, Confirm};
use crate::blast_radius::BlastRadius;
use crate::error::{SubmitError, ValidationError};
use crate::selection::{FieldChange, ScopeResolver};
use crate::types::{
    ASSIGNMENT_TYPE_COMPREHENSIVE, Assignment, AssignmentPayload, Permissions, Scope,
    ValidityRequest,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Created,
    Updated,
    BulkCreated { affected: usize, entity: String },
}

impl fmt::Display for SaveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveOutcome::Created => write!(f, "Assignment created"),
            SaveOutcome::Updated => write!(f, "Assignment updated"),
            SaveOutcome::BulkCreated { affected, entity } => write!(
                f,
                "Assignment created for {} users of {}",
                affected, entity
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Submitted {
    Saved {
        assignment: Box<Assignment>,
        outcome: SaveOutcome,
    },
    /// The operator declined the bulk confirmation. Nothing was sent.
    Declined,
}

/// One open assignment form. Dropping it discards everything entered.
#[derive(Debug, Clone)]
pub struct AssignmentForm {
    resolver: ScopeResolver,
    pub can_assign_courses: bool,
    pub validity: ValidityRequest,
    pub is_active: bool,
    existing: Option<Uuid>,
}

impl AssignmentForm {
    pub fn new(resolver: ScopeResolver) -> Self {
        Self {
            resolver,
            can_assign_courses: false,
            validity: ValidityRequest::Indefinite,
            is_active: true,
            existing: None,
        }
    }

    /// Form bound to an already persisted assignment; submitting updates it.
    pub fn editing(resolver: ScopeResolver, assignment: &Assignment) -> Self {
        Self {
            resolver,
            can_assign_courses: assignment.permissions.can_assign_courses,
            validity: match assignment.ends_at {
                Some(ends_at) => ValidityRequest::Bounded(Some(ends_at)),
                None => ValidityRequest::Indefinite,
            },
            is_active: assignment.is_active,
            existing: Some(assignment.id),
        }
    }

    pub fn resolver(&self) -> &ScopeResolver {
        &self.resolver
    }

    pub fn existing(&self) -> Option<Uuid> {
        self.existing
    }

    pub fn apply_field_change(&mut self, change: FieldChange) {
        self.resolver.apply_field_change(change);
    }

    pub async fn submit<B, C>(&mut self, backend: &B, confirm: &C) -> Result<Submitted, SubmitError>
    where
        B: AssignmentBackend + ?Sized,
        C: Confirm + ?Sized,
    {
        self.submit_at(backend, confirm, Utc::now().naive_utc()).await
    }

    /// Validates, asks for confirmation when the assignment reaches other
    /// users, and then creates or updates the record.
    pub async fn submit_at<B, C>(
        &mut self,
        backend: &B,
        confirm: &C,
        now: NaiveDateTime,
    ) -> Result<Submitted, SubmitError>
    where
        B: AssignmentBackend + ?Sized,
        C: Confirm + ?Sized,
    {
        self.resolver.validate(&self.validity, now)?;
        let payload = self.build_payload(now)?;

        let blast_radius = BlastRadius::estimate(
            self.resolver.directory(),
            payload.scope,
            payload.school_id,
            payload.generation_id,
            payload.community_id,
        );

        if let Some(blast_radius) = blast_radius.as_ref().filter(|b| b.requires_confirmation()) {
            if !confirm.confirm(&blast_radius.prompt()).await {
                debug!(affected = blast_radius.affected, "Bulk assignment declined");
                return Ok(Submitted::Declined);
            }
        }

        let (assignment, outcome) = match self.existing {
            Some(id) => {
                let assignment = backend.update_assignment(id, &payload).await?;
                (assignment, SaveOutcome::Updated)
            }

            None => {
                let assignment = backend.create_assignment(&payload).await?;
                let outcome = match blast_radius.filter(|b| b.affected > 0) {
                    Some(b) => SaveOutcome::BulkCreated {
                        affected: b.affected,
                        entity: b.entity_name,
                    },
                    None => SaveOutcome::Created,
                };
                (assignment, outcome)
            }
        };

        info!(assignment_id = %assignment.id, scope = %assignment.scope, "{}", outcome);
        self.existing = Some(assignment.id);

        Ok(Submitted::Saved {
            assignment: Box::new(assignment),
            outcome,
        })
    }

    /// Payload carrying only the fields that belong to the selected scope.
    pub fn build_payload(&self, now: NaiveDateTime) -> Result<AssignmentPayload, ValidationError> {
        let selection = self.resolver.selection();
        let consultant_id = selection
            .consultant_id
            .ok_or(ValidationError::MissingConsultant)?;

        let generation_id = if self.resolver.should_show_generation_field() {
            selection.generation_id
        } else {
            None
        };

        let (student_id, school_id, generation_id, community_id) = match selection.scope {
            Scope::Individual => (selection.student_id, None, None, None),
            Scope::School => (None, selection.school_id, None, None),
            Scope::Generation => (None, selection.school_id, generation_id, None),
            Scope::Community => (
                selection.student_id,
                selection.school_id,
                generation_id,
                selection.community_id,
            ),
        };

        Ok(AssignmentPayload {
            id: self.existing,
            consultant_id,
            scope: selection.scope,
            student_id,
            school_id,
            generation_id,
            community_id,
            permissions: Permissions::with_course_assignment(self.can_assign_courses),
            starts_at: now,
            ends_at: self.validity.ends_at(),
            is_active: self.is_active,
            assignment_type: ASSIGNMENT_TYPE_COMPREHENSIVE.to_string(),
        })
    }
}
