/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Display label of every assignment written by the console.
pub const ASSIGNMENT_TYPE_COMPREHENSIVE: &str = "comprehensive";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    #[default]
    Individual,
    School,
    Generation,
    Community,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Scope::Individual => "individual",
            Scope::School => "school",
            Scope::Generation => "generation",
            Scope::Community => "community",
        };
        f.pad(s)
    }
}

impl std::str::FromStr for Scope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "individual" => Ok(Scope::Individual),
            "school" => Ok(Scope::School),
            "generation" => Ok(Scope::Generation),
            "community" => Ok(Scope::Community),
            _ => Err(format!("Unknown scope: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permissions {
    pub can_view_progress: bool,
    pub can_assign_courses: bool,
    pub can_message_student: bool,
}

impl Permissions {
    /// Only course assignment is operator-controlled. Viewing progress and
    /// messaging are product defaults and always granted.
    pub fn with_course_assignment(can_assign_courses: bool) -> Self {
        Self {
            can_view_progress: true,
            can_assign_courses,
            can_message_student: true,
        }
    }
}

/// Requested validity window. `Bounded(None)` means the operator asked for a
/// time-bounded assignment but has not picked the end yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidityRequest {
    #[default]
    Indefinite,
    Bounded(Option<NaiveDateTime>),
}

impl ValidityRequest {
    pub fn ends_at(&self) -> Option<NaiveDateTime> {
        match self {
            ValidityRequest::Indefinite => None,
            ValidityRequest::Bounded(ends_at) => *ends_at,
        }
    }
}

/// Body sent to the assignment write endpoint. Scope ids outside the scope's
/// footprint are `None` and never serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub consultant_id: Uuid,
    pub scope: Scope,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub community_id: Option<Uuid>,
    #[serde(flatten)]
    pub permissions: Permissions,
    pub starts_at: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<NaiveDateTime>,
    pub is_active: bool,
    pub assignment_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonRef {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: Uuid,
    pub name: String,
}

/// Persisted assignment as returned by the list and write endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: Uuid,
    pub consultant_id: Uuid,
    pub scope: Scope,
    #[serde(default)]
    pub student_id: Option<Uuid>,
    #[serde(default)]
    pub school_id: Option<Uuid>,
    #[serde(default)]
    pub generation_id: Option<Uuid>,
    #[serde(default)]
    pub community_id: Option<Uuid>,
    #[serde(flatten)]
    pub permissions: Permissions,
    pub starts_at: NaiveDateTime,
    #[serde(default)]
    pub ends_at: Option<NaiveDateTime>,
    pub is_active: bool,
    pub assignment_type: String,
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub consultant: Option<PersonRef>,
    #[serde(default)]
    pub student: Option<PersonRef>,
    #[serde(default)]
    pub school: Option<EntityRef>,
    #[serde(default)]
    pub generation: Option<EntityRef>,
    #[serde(default)]
    pub community: Option<EntityRef>,
}
