/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use tracing::debug;
use uuid::Uuid;

use crate::directory::Directory;
use crate::types::Scope;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlastRadius {
    pub scope: Scope,
    pub affected: usize,
    pub entity_name: String,
}

impl BlastRadius {
    /// Estimates the reach of a non-individual assignment. Returns `None`
    /// for individual scope.
    pub fn estimate(
        directory: &Directory,
        scope: Scope,
        school_id: Option<Uuid>,
        generation_id: Option<Uuid>,
        community_id: Option<Uuid>,
    ) -> Option<Self> {
        if scope == Scope::Individual {
            return None;
        }

        let affected = count_affected(directory, scope, school_id, generation_id, community_id);
        let entity_name = entity_name(directory, scope, school_id, generation_id, community_id);
        debug!(%scope, affected, entity = %entity_name, "Estimated blast radius");

        Some(Self {
            scope,
            affected,
            entity_name,
        })
    }

    /// Nothing to confirm when nobody is covered.
    pub fn requires_confirmation(&self) -> bool {
        self.affected > 0
    }

    pub fn prompt(&self) -> String {
        format!(
            "This will assign the consultant to {} users of {} {}. Continue?",
            self.affected, self.scope, self.entity_name
        )
    }
}

/// Counts directory students covered by the given scope target.
pub fn count_affected(
    directory: &Directory,
    scope: Scope,
    school_id: Option<Uuid>,
    generation_id: Option<Uuid>,
    community_id: Option<Uuid>,
) -> usize {
    let students = directory.students().iter();

    match scope {
        Scope::Individual => 0,
        Scope::School => match school_id {
            Some(school_id) => students.filter(|m| m.school_id == Some(school_id)).count(),
            None => 0,
        },
        // A school without generations is targeted as a whole.
        Scope::Generation => match (school_id, generation_id) {
            (Some(school_id), Some(generation_id)) => students
                .filter(|m| m.school_id == Some(school_id) && m.generation_id == Some(generation_id))
                .count(),
            (Some(school_id), None) => students.filter(|m| m.school_id == Some(school_id)).count(),
            (None, _) => 0,
        },
        Scope::Community => match community_id {
            Some(community_id) => students
                .filter(|m| m.community_id == Some(community_id))
                .count(),
            None => 0,
        },
    }
}

fn entity_name(
    directory: &Directory,
    scope: Scope,
    school_id: Option<Uuid>,
    generation_id: Option<Uuid>,
    community_id: Option<Uuid>,
) -> String {
    let school = school_id.and_then(|id| directory.school(id)).map(|s| s.name.clone());
    let name = match scope {
        Scope::Individual => None,
        Scope::School => school,
        Scope::Generation => generation_id
            .and_then(|id| directory.generation(id))
            .map(|g| g.name.clone())
            .or(school),
        Scope::Community => community_id
            .and_then(|id| directory.community(id))
            .map(|c| c.name.clone()),
    };

    name.unwrap_or_else(|| "Unknown".to_string())
}
