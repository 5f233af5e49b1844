/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use chrono::NaiveDateTime;
use tracing::debug;
use uuid::Uuid;

use crate::directory::{Directory, Generation, GrowthCommunity, Member};
use crate::error::{ConsoleError, ValidationError};
use crate::reconcile::{reconcile_community, reconcile_school};
use crate::types::{Scope, ValidityRequest};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetSelection {
    pub scope: Scope,
    pub consultant_id: Option<Uuid>,
    pub student_id: Option<Uuid>,
    pub school_id: Option<Uuid>,
    pub generation_id: Option<Uuid>,
    pub community_id: Option<Uuid>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldChange {
    Scope(Scope),
    Consultant(Option<Uuid>),
    Student(Option<Uuid>),
    School(Option<Uuid>),
    Generation(Option<Uuid>),
    Community(Option<Uuid>),
}

/// Holds the target selection of one assignment form together with the
/// directory snapshot it is resolved against.
#[derive(Debug, Clone)]
pub struct ScopeResolver {
    directory: Directory,
    selection: TargetSelection,
    fixed_user: Option<Uuid>,
}

impl ScopeResolver {
    pub fn new(directory: Directory) -> Self {
        Self {
            directory,
            selection: TargetSelection::default(),
            fixed_user: None,
        }
    }

    /// Opens the resolver against a pre-selected user. Their membership is
    /// kept across scope changes.
    pub fn for_user(directory: Directory, user_id: Uuid) -> Result<Self, ConsoleError> {
        let member = directory
            .member(user_id)
            .cloned()
            .ok_or(ConsoleError::UnknownUser(user_id))?;

        let mut resolver = Self {
            directory,
            selection: TargetSelection::default(),
            fixed_user: Some(user_id),
        };

        let mut next = resolver.selection.clone();
        resolver.derive_membership(&mut next, &member);
        resolver.selection = next;

        Ok(resolver)
    }

    /// Pre-populated resolver, used when an existing assignment is edited.
    pub fn with_selection(directory: Directory, selection: TargetSelection) -> Self {
        Self {
            directory,
            selection,
            fixed_user: None,
        }
    }

    pub fn selection(&self) -> &TargetSelection {
        &self.selection
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub fn fixed_user(&self) -> Option<Uuid> {
        self.fixed_user
    }

    /// Applies one field change. Dependent fields are cleared or re-derived
    /// on a copy that replaces the current selection in one step.
    pub fn apply_field_change(&mut self, change: FieldChange) {
        debug!(?change, "Applying field change");
        let mut next = self.selection.clone();

        match change {
            FieldChange::Scope(scope) => {
                next.scope = scope;
                next.student_id = None;
                next.school_id = None;
                next.generation_id = None;
                next.community_id = None;

                if let Some(member) = self
                    .fixed_user
                    .and_then(|id| self.directory.member(id))
                    .cloned()
                {
                    self.derive_membership(&mut next, &member);
                }
            }

            FieldChange::Consultant(consultant_id) => {
                next.consultant_id = consultant_id;
            }

            FieldChange::Student(student_id) => {
                next.student_id = student_id;

                if matches!(next.scope, Scope::Individual | Scope::Community) {
                    if let Some(member) = student_id.and_then(|id| self.directory.member(id)).cloned() {
                        self.derive_membership(&mut next, &member);
                    }
                }
            }

            FieldChange::School(school_id) => {
                next.school_id = school_id;
                next.generation_id = None;
                next.community_id = None;
                self.drop_foreign_student(&mut next, |member| member.school_id == school_id);
            }

            FieldChange::Generation(generation_id) => {
                next.generation_id = generation_id;
                next.community_id = None;
            }

            FieldChange::Community(community_id) => {
                next.community_id = community_id;
                self.drop_foreign_student(&mut next, |member| {
                    community_id.is_none() || member.community_id == community_id
                });
            }
        }

        self.selection = next;
    }

    /// A student picked for a Community scope must stay inside the chosen
    /// target. A fixed user is never dropped.
    fn drop_foreign_student(
        &self,
        next: &mut TargetSelection,
        belongs: impl Fn(&Member) -> bool,
    ) {
        if next.scope != Scope::Community || self.fixed_user.is_some() {
            return;
        }

        let keep = next
            .student_id
            .and_then(|id| self.directory.member(id))
            .is_some_and(|member| belongs(member));

        if !keep && next.student_id.is_some() {
            debug!(student = ?next.student_id, "Student outside the new target cleared");
            next.student_id = None;
        }
    }

    fn derive_membership(&mut self, next: &mut TargetSelection, member: &Member) {
        next.student_id = Some(member.id);
        next.school_id = reconcile_school(
            &mut self.directory,
            member.school_id,
            member.school_name.as_deref(),
        );
        next.community_id = reconcile_community(&self.directory, member.community_id);

        let school_has_generations = next
            .school_id
            .and_then(|id| self.directory.school(id))
            .is_some_and(|school| school.has_generations);

        next.generation_id = member
            .generation_id
            .filter(|id| school_has_generations && self.directory.generation(*id).is_some());
    }

    pub fn available_generations(&self) -> Vec<&Generation> {
        let Some(school_id) = self.selection.school_id else {
            return Vec::new();
        };

        self.directory
            .generations()
            .iter()
            .filter(|g| g.school_id == school_id)
            .collect()
    }

    pub fn available_communities(&self) -> Vec<&GrowthCommunity> {
        // An already resolved community stays listed even if the filters
        // below would hide it.
        if self.selection.student_id.is_some() && self.selection.community_id.is_some() {
            return self.directory.communities().iter().collect();
        }

        let Some(school_id) = self.selection.school_id else {
            return Vec::new();
        };

        if self.should_show_generation_field() {
            let Some(generation_id) = self.selection.generation_id else {
                return Vec::new();
            };

            self.directory
                .communities()
                .iter()
                .filter(|c| c.generation_id == Some(generation_id))
                .collect()
        } else {
            self.directory
                .communities()
                .iter()
                .filter(|c| c.school_id == school_id)
                .collect()
        }
    }

    pub fn should_show_generation_field(&self) -> bool {
        self.selection
            .school_id
            .and_then(|id| self.directory.school(id))
            .is_some_and(|school| school.has_generations)
    }

    pub fn validate(
        &self,
        validity: &ValidityRequest,
        now: NaiveDateTime,
    ) -> Result<(), ValidationError> {
        let selection = &self.selection;
        let consultant_id = selection
            .consultant_id
            .ok_or(ValidationError::MissingConsultant)?;

        match selection.scope {
            Scope::Individual => {
                let student_id = selection.student_id.ok_or(ValidationError::MissingStudent)?;
                if student_id == consultant_id {
                    return Err(ValidationError::SelfAssignment);
                }
            }

            Scope::School => {
                self.verified_school()?;
            }

            Scope::Generation => {
                self.verified_school()?;
                if self.should_show_generation_field() && selection.generation_id.is_none() {
                    return Err(ValidationError::MissingGeneration);
                }
            }

            Scope::Community => {
                self.verified_school()?;
                if self.should_show_generation_field() && selection.generation_id.is_none() {
                    return Err(ValidationError::MissingGeneration);
                }
                selection
                    .community_id
                    .ok_or(ValidationError::MissingCommunity)?;
                if selection.student_id == Some(consultant_id) {
                    return Err(ValidationError::SelfAssignment);
                }
            }
        }

        match validity {
            ValidityRequest::Indefinite => Ok(()),
            ValidityRequest::Bounded(None) => Err(ValidationError::MissingEndDate),
            ValidityRequest::Bounded(Some(ends_at)) if *ends_at < now => {
                Err(ValidationError::EndDateInPast)
            }
            ValidityRequest::Bounded(Some(_)) => Ok(()),
        }
    }
    /// Scope targets must resolve to a school the directory actually lists,
    /// not to one synthesized from a user's membership.
    fn verified_school(&self) -> Result<Uuid, ValidationError> {
        let school_id = self
            .selection
            .school_id
            .ok_or(ValidationError::MissingSchool)?;

        match self.directory.school(school_id) {
            Some(school) if !school.synthesized => Ok(school_id),
            _ => Err(ValidationError::UnverifiedSchool),
        }
    }
}
