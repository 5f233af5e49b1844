/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use tracing::{debug, info};
use uuid::Uuid;

use crate::backend::{AssignmentBackend, Confirm};
use crate::blast_radius::count_affected;
use crate::directory::Directory;
use crate::error::{BackendError, ConsoleError};
use crate::form::AssignmentForm;
use crate::selection::{ScopeResolver, TargetSelection};
use crate::types::{Assignment, Scope};

const UNKNOWN: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl std::str::FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "active" => Ok(StatusFilter::Active),
            "inactive" => Ok(StatusFilter::Inactive),
            _ => Err(format!("Unknown status: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RegistryFilter {
    pub scope: Option<Scope>,
    pub status: StatusFilter,
    pub search: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegistryEntry {
    pub assignment: Assignment,
    pub consultant_name: String,
    pub consultant_email: Option<String>,
    pub student_name: Option<String>,
    pub student_email: Option<String>,
    /// Student name for individual scope, otherwise the targeted entity.
    pub target_name: String,
    /// Users currently covered, computed when the registry is loaded.
    pub affected: Option<usize>,
}

impl RegistryEntry {
    fn matches(&self, filter: &RegistryFilter) -> bool {
        if filter.scope.is_some_and(|scope| scope != self.assignment.scope) {
            return false;
        }

        match filter.status {
            StatusFilter::Active if !self.assignment.is_active => return false,
            StatusFilter::Inactive if self.assignment.is_active => return false,
            _ => {}
        }

        let Some(search) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) else {
            return true;
        };

        let search = search.to_lowercase();
        [
            Some(self.consultant_name.as_str()),
            self.consultant_email.as_deref(),
            self.student_name.as_deref(),
            self.student_email.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&search))
    }
}

/// Scope an existing assignment re-opens with. The stored scope wins when
/// its ids fit it; otherwise the scope is implied by which target ids are
/// populated.
pub fn infer_scope(assignment: &Assignment) -> Scope {
    let student = assignment.student_id.is_some();
    let school = assignment.school_id.is_some();
    let generation = assignment.generation_id.is_some();
    let community = assignment.community_id.is_some();

    let consistent = match assignment.scope {
        Scope::Individual => student && !school && !generation && !community,
        Scope::School => school && !student && !generation && !community,
        Scope::Generation => school && !student && !community,
        Scope::Community => school && community,
    };

    if consistent {
        return assignment.scope;
    }

    if community {
        Scope::Community
    } else if generation {
        Scope::Generation
    } else if school {
        Scope::School
    } else {
        Scope::Individual
    }
}

#[derive(Debug, Clone)]
pub struct Registry {
    directory: Directory,
    entries: Vec<RegistryEntry>,
}

impl Registry {
    pub async fn load<B>(backend: &B, include_inactive: bool) -> Result<Self, BackendError>
    where
        B: AssignmentBackend + ?Sized,
    {
        let assignments = backend.list_assignments(include_inactive).await?;
        let directory = Directory::normalize(backend.fetch_directory().await?);
        debug!(count = assignments.len(), "Loaded assignments");

        Ok(Self::from_parts(directory, assignments))
    }

    pub fn from_parts(directory: Directory, assignments: Vec<Assignment>) -> Self {
        let entries = assignments
            .into_iter()
            .map(|assignment| enrich(&directory, assignment))
            .collect();

        Self { directory, entries }
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    pub fn get(&self, id: Uuid) -> Option<&RegistryEntry> {
        self.entries.iter().find(|e| e.assignment.id == id)
    }

    pub fn filter(&self, filter: &RegistryFilter) -> Vec<&RegistryEntry> {
        self.entries.iter().filter(|e| e.matches(filter)).collect()
    }

    /// Opens a form pre-populated from an existing assignment.
    pub fn edit(&self, id: Uuid) -> Result<AssignmentForm, ConsoleError> {
        let entry = self.get(id).ok_or(ConsoleError::UnknownAssignment(id))?;
        let assignment = &entry.assignment;

        let selection = TargetSelection {
            scope: infer_scope(assignment),
            consultant_id: Some(assignment.consultant_id),
            student_id: assignment.student_id,
            school_id: assignment.school_id,
            generation_id: assignment.generation_id,
            community_id: assignment.community_id,
        };

        let resolver = ScopeResolver::with_selection(self.directory.clone(), selection);
        Ok(AssignmentForm::editing(resolver, assignment))
    }

    /// Deletes after confirmation. Returns `false` when declined.
    pub async fn delete<B, C>(
        &mut self,
        backend: &B,
        confirm: &C,
        id: Uuid,
    ) -> Result<bool, ConsoleError>
    where
        B: AssignmentBackend + ?Sized,
        C: Confirm + ?Sized,
    {
        let entry = self.get(id).ok_or(ConsoleError::UnknownAssignment(id))?;
        let prompt = format!(
            "Delete the assignment of {} to {}?",
            entry.consultant_name, entry.target_name
        );

        if !confirm.confirm(&prompt).await {
            return Ok(false);
        }

        backend.delete_assignment(id).await?;
        self.entries.retain(|e| e.assignment.id != id);
        info!(assignment_id = %id, "Assignment deleted");

        Ok(true)
    }

    pub async fn set_active<B>(
        &mut self,
        backend: &B,
        id: Uuid,
        is_active: bool,
    ) -> Result<&RegistryEntry, ConsoleError>
    where
        B: AssignmentBackend + ?Sized,
    {
        let position = self
            .entries
            .iter()
            .position(|e| e.assignment.id == id)
            .ok_or(ConsoleError::UnknownAssignment(id))?;

        let assignment = backend.set_assignment_active(id, is_active).await?;
        info!(assignment_id = %id, is_active, "Assignment status changed");
        self.entries[position] = enrich(&self.directory, assignment);

        Ok(&self.entries[position])
    }
}

fn enrich(directory: &Directory, assignment: Assignment) -> RegistryEntry {
    let consultant = directory.member(assignment.consultant_id);
    let consultant_name = assignment
        .consultant
        .as_ref()
        .map(|c| c.name.clone())
        .or_else(|| consultant.map(|m| m.name.clone()))
        .unwrap_or_else(|| UNKNOWN.to_string());
    let consultant_email = assignment
        .consultant
        .as_ref()
        .map(|c| c.email.clone())
        .or_else(|| consultant.map(|m| m.email.clone()));

    let student = assignment.student_id.and_then(|id| directory.member(id));
    let student_name = assignment
        .student
        .as_ref()
        .map(|s| s.name.clone())
        .or_else(|| student.map(|m| m.name.clone()));
    let student_email = assignment
        .student
        .as_ref()
        .map(|s| s.email.clone())
        .or_else(|| student.map(|m| m.email.clone()));

    let school_name = assignment
        .school
        .as_ref()
        .map(|s| s.name.clone())
        .or_else(|| assignment.school_id.and_then(|id| directory.school(id)).map(|s| s.name.clone()));
    let generation_name = assignment
        .generation
        .as_ref()
        .map(|g| g.name.clone())
        .or_else(|| {
            assignment
                .generation_id
                .and_then(|id| directory.generation(id))
                .map(|g| g.name.clone())
        });
    let community_name = assignment
        .community
        .as_ref()
        .map(|c| c.name.clone())
        .or_else(|| {
            assignment
                .community_id
                .and_then(|id| directory.community(id))
                .map(|c| c.name.clone())
        });

    let target_name = match assignment.scope {
        Scope::Individual => student_name.clone(),
        Scope::School => school_name,
        Scope::Generation => generation_name.or(school_name),
        Scope::Community => community_name,
    }
    .unwrap_or_else(|| UNKNOWN.to_string());

    let affected = match assignment.scope {
        Scope::Individual => None,
        scope => Some(count_affected(
            directory,
            scope,
            assignment.school_id,
            assignment.generation_id,
            assignment.community_id,
        )),
    };

    RegistryEntry {
        assignment,
        consultant_name,
        consultant_email,
        student_name,
        student_email,
        target_name,
        affected,
    }
}
