/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use console::directory::{DirectoryResponse, DirectoryUser, Generation, GrowthCommunity, NestedRef, School};
use console::*;
use std::collections::VecDeque;
use std::sync::Mutex;
use uuid::Uuid;

pub const CONSULTANT_1: Uuid = Uuid::from_u128(0x1);
pub const CONSULTANT_2: Uuid = Uuid::from_u128(0x2);

pub const LINCOLN: Uuid = Uuid::from_u128(0x100);
pub const LINCOLN_NORTH: Uuid = Uuid::from_u128(0x110);
pub const LINCOLN_SOUTH: Uuid = Uuid::from_u128(0x120);

pub const RIVERSIDE: Uuid = Uuid::from_u128(0x200);
pub const RIVERSIDE_2024: Uuid = Uuid::from_u128(0x210);
pub const RIVERSIDE_2025: Uuid = Uuid::from_u128(0x220);
pub const RIVERSIDE_OAK: Uuid = Uuid::from_u128(0x211);
pub const RIVERSIDE_PINE: Uuid = Uuid::from_u128(0x221);

pub const EMPTY_HALL: Uuid = Uuid::from_u128(0x400);

pub const RIVERSIDE_STUDENT: Uuid = Uuid::from_u128(0x300);
pub const NESTED_STUDENT: Uuid = Uuid::from_u128(0x301);
pub const ORPHAN_STUDENT: Uuid = Uuid::from_u128(0x302);

pub const GHOST_SCHOOL: Uuid = Uuid::from_u128(0x900);
pub const GHOST_COMMUNITY: Uuid = Uuid::from_u128(0x901);

pub const LINCOLN_STUDENTS: usize = 42;

pub fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 3, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

pub fn user(id: Uuid, name: &str) -> DirectoryUser {
    DirectoryUser {
        id,
        name: name.to_string(),
        email: format!("{}@compass.example", name.to_lowercase().replace(' ', ".")),
        role: None,
        school_id: None,
        generation_id: None,
        community_id: None,
        school: None,
        generation: None,
        community: None,
    }
}

fn member_of(
    mut user: DirectoryUser,
    school: Uuid,
    generation: Option<Uuid>,
    community: Uuid,
) -> DirectoryUser {
    user.role = Some("student".to_string());
    user.school_id = Some(school);
    user.generation_id = generation;
    user.community_id = Some(community);
    user
}

/// Lincoln has no generations and 42 students split over two communities.
/// Riverside has two generations with one community each and six students,
/// one of which only carries nested membership objects. One more student
/// points at a school and a community the directory does not know. Empty
/// Hall has no members at all.
pub fn directory_response() -> DirectoryResponse {
    let mut students = Vec::new();

    for i in 0..LINCOLN_STUDENTS {
        let community = if i % 2 == 0 { LINCOLN_NORTH } else { LINCOLN_SOUTH };
        students.push(member_of(
            user(Uuid::from_u128(0x1000 + i as u128), &format!("Lincoln Student {}", i)),
            LINCOLN,
            None,
            community,
        ));
    }

    students.push(member_of(
        user(RIVERSIDE_STUDENT, "Rita River"),
        RIVERSIDE,
        Some(RIVERSIDE_2024),
        RIVERSIDE_OAK,
    ));
    for (id, name) in [(0x303, "Otto Oak"), (0x304, "Olga Oak")] {
        students.push(member_of(
            user(Uuid::from_u128(id), name),
            RIVERSIDE,
            Some(RIVERSIDE_2024),
            RIVERSIDE_OAK,
        ));
    }
    for (id, name) in [(0x305, "Paul Pine"), (0x306, "Petra Pine")] {
        students.push(member_of(
            user(Uuid::from_u128(id), name),
            RIVERSIDE,
            Some(RIVERSIDE_2025),
            RIVERSIDE_PINE,
        ));
    }

    let mut nested = user(NESTED_STUDENT, "Nina Nested");
    nested.school = Some(NestedRef {
        id: Some(RIVERSIDE),
        name: Some("Riverside".to_string()),
    });
    nested.generation = Some(NestedRef {
        id: Some(RIVERSIDE_2024),
        name: None,
    });
    nested.community = Some(NestedRef {
        id: Some(RIVERSIDE_OAK),
        name: Some("Oak".to_string()),
    });
    students.push(nested);

    let mut orphan = user(ORPHAN_STUDENT, "Oscar Orphan");
    orphan.school_id = Some(GHOST_SCHOOL);
    orphan.community_id = Some(GHOST_COMMUNITY);
    orphan.school = Some(NestedRef {
        id: Some(GHOST_SCHOOL),
        name: Some("Old Campus".to_string()),
    });
    students.push(orphan);

    DirectoryResponse {
        consultants: vec![user(CONSULTANT_1, "Clara Consultant"), user(CONSULTANT_2, "Carl Coach")],
        students,
        schools: vec![
            School {
                id: LINCOLN,
                name: "Lincoln".to_string(),
                has_generations: false,
                synthesized: false,
            },
            School {
                id: RIVERSIDE,
                name: "Riverside".to_string(),
                has_generations: true,
                synthesized: false,
            },
            School {
                id: EMPTY_HALL,
                name: "Empty Hall".to_string(),
                has_generations: false,
                synthesized: false,
            },
        ],
        generations: vec![
            Generation {
                id: RIVERSIDE_2024,
                school_id: RIVERSIDE,
                name: "Class of 2024".to_string(),
            },
            Generation {
                id: RIVERSIDE_2025,
                school_id: RIVERSIDE,
                name: "Class of 2025".to_string(),
            },
        ],
        communities: vec![
            GrowthCommunity {
                id: LINCOLN_NORTH,
                school_id: LINCOLN,
                generation_id: None,
                name: "North".to_string(),
            },
            GrowthCommunity {
                id: LINCOLN_SOUTH,
                school_id: LINCOLN,
                generation_id: None,
                name: "South".to_string(),
            },
            GrowthCommunity {
                id: RIVERSIDE_OAK,
                school_id: RIVERSIDE,
                generation_id: Some(RIVERSIDE_2024),
                name: "Oak".to_string(),
            },
            GrowthCommunity {
                id: RIVERSIDE_PINE,
                school_id: RIVERSIDE,
                generation_id: Some(RIVERSIDE_2025),
                name: "Pine".to_string(),
            },
        ],
    }
}

pub fn directory() -> Directory {
    Directory::normalize(directory_response())
}

pub fn assignment_from_payload(id: Uuid, payload: &AssignmentPayload) -> Assignment {
    Assignment {
        id,
        consultant_id: payload.consultant_id,
        scope: payload.scope,
        student_id: payload.student_id,
        school_id: payload.school_id,
        generation_id: payload.generation_id,
        community_id: payload.community_id,
        permissions: payload.permissions,
        starts_at: payload.starts_at,
        ends_at: payload.ends_at,
        is_active: payload.is_active,
        assignment_type: payload.assignment_type.clone(),
        created_at: payload.starts_at,
        consultant: None,
        student: None,
        school: None,
        generation: None,
        community: None,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    FetchDirectory,
    List(bool),
    Create(AssignmentPayload),
    Update(Uuid, AssignmentPayload),
    SetActive(Uuid, bool),
    Delete(Uuid),
}

/// In-memory backend that records every call it receives.
pub struct RecordingBackend {
    pub directory: DirectoryResponse,
    pub assignments: Mutex<Vec<Assignment>>,
    pub calls: Mutex<Vec<Call>>,
    pub failure: Mutex<Option<BackendError>>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::with_assignments(Vec::new())
    }

    pub fn with_assignments(assignments: Vec<Assignment>) -> Self {
        Self {
            directory: directory_response(),
            assignments: Mutex::new(assignments),
            calls: Mutex::new(Vec::new()),
            failure: Mutex::new(None),
        }
    }

    pub fn fail_with(&self, error: BackendError) {
        *self.failure.lock().unwrap() = Some(error);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn writes(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| !matches!(c, Call::FetchDirectory | Call::List(_)))
            .collect()
    }

    fn record(&self, call: Call) -> Result<(), BackendError> {
        self.calls.lock().unwrap().push(call);
        match self.failure.lock().unwrap().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn find(&self, id: Uuid) -> Result<Assignment, BackendError> {
        self.assignments
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| BackendError::Server {
                error: "Assignment not found".to_string(),
                details: None,
            })
    }
}

#[async_trait]
impl AssignmentBackend for RecordingBackend {
    async fn fetch_directory(&self) -> Result<DirectoryResponse, BackendError> {
        self.record(Call::FetchDirectory)?;
        Ok(self.directory.clone())
    }

    async fn list_assignments(&self, include_inactive: bool) -> Result<Vec<Assignment>, BackendError> {
        self.record(Call::List(include_inactive))?;
        Ok(self
            .assignments
            .lock()
            .unwrap()
            .iter()
            .filter(|a| include_inactive || a.is_active)
            .cloned()
            .collect())
    }

    async fn create_assignment(&self, payload: &AssignmentPayload) -> Result<Assignment, BackendError> {
        self.record(Call::Create(payload.clone()))?;
        let assignment = assignment_from_payload(Uuid::new_v4(), payload);
        self.assignments.lock().unwrap().push(assignment.clone());
        Ok(assignment)
    }

    async fn update_assignment(
        &self,
        id: Uuid,
        payload: &AssignmentPayload,
    ) -> Result<Assignment, BackendError> {
        self.record(Call::Update(id, payload.clone()))?;
        self.find(id)?;
        let assignment = assignment_from_payload(id, payload);
        let mut assignments = self.assignments.lock().unwrap();
        assignments.retain(|a| a.id != id);
        assignments.push(assignment.clone());
        Ok(assignment)
    }

    async fn set_assignment_active(&self, id: Uuid, is_active: bool) -> Result<Assignment, BackendError> {
        self.record(Call::SetActive(id, is_active))?;
        let mut assignment = self.find(id)?;
        assignment.is_active = is_active;
        let mut assignments = self.assignments.lock().unwrap();
        assignments.retain(|a| a.id != id);
        assignments.push(assignment.clone());
        Ok(assignment)
    }

    async fn delete_assignment(&self, id: Uuid) -> Result<(), BackendError> {
        self.record(Call::Delete(id))?;
        self.find(id)?;
        self.assignments.lock().unwrap().retain(|a| a.id != id);
        Ok(())
    }
}

/// Answers confirmation prompts from a script and keeps the prompts shown.
pub struct ScriptedConfirm {
    answers: Mutex<VecDeque<bool>>,
    pub prompts: Mutex<Vec<String>>,
}

impl ScriptedConfirm {
    pub fn answering(answers: &[bool]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().copied().collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Confirm for ScriptedConfirm {
    async fn confirm(&self, prompt: &str) -> bool {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.answers.lock().unwrap().pop_front().unwrap_or(false)
    }
}
