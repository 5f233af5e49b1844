/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::error::{WebError, WebResult};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use chrono::{NaiveDateTime, Utc};
use compass_core::consts::ASSIGNMENT_TYPE_COMPREHENSIVE;
use compass_core::database::{find_active_duplicate, get_community, get_generation, get_school, get_user};
use compass_core::input::{
    ScopeIds, check_generation_requirement, check_scope_footprint, check_self_assignment,
    check_validity_window,
};
use compass_core::types::*;
use entity::consultant_assignment::AssignmentScope;
use entity::user::UserRole;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use uuid::Uuid;

fn default_true() -> bool {
    true
}

fn default_assignment_type() -> String {
    ASSIGNMENT_TYPE_COMPREHENSIVE.to_string()
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AssignmentRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub consultant_id: Uuid,
    pub scope: AssignmentScope,
    #[serde(default)]
    pub student_id: Option<Uuid>,
    #[serde(default)]
    pub school_id: Option<Uuid>,
    #[serde(default)]
    pub generation_id: Option<Uuid>,
    #[serde(default)]
    pub community_id: Option<Uuid>,
    #[serde(default = "default_true")]
    pub can_view_progress: bool,
    #[serde(default)]
    pub can_assign_courses: bool,
    #[serde(default = "default_true")]
    pub can_message_student: bool,
    pub starts_at: NaiveDateTime,
    #[serde(default)]
    pub ends_at: Option<NaiveDateTime>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default = "default_assignment_type")]
    pub assignment_type: String,
}

impl AssignmentRequest {
    pub fn scope_ids(&self) -> ScopeIds {
        ScopeIds {
            student: self.student_id,
            school: self.school_id,
            generation: self.generation_id,
            community: self.community_id,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PatchAssignmentRequest {
    pub is_active: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ListQuery {
    #[serde(default)]
    pub include_inactive: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PersonRef {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EntityRef {
    pub id: Uuid,
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AssignmentResponse {
    pub id: Uuid,
    pub consultant_id: Uuid,
    pub scope: AssignmentScope,
    pub student_id: Option<Uuid>,
    pub school_id: Option<Uuid>,
    pub generation_id: Option<Uuid>,
    pub community_id: Option<Uuid>,
    pub can_view_progress: bool,
    pub can_assign_courses: bool,
    pub can_message_student: bool,
    pub starts_at: NaiveDateTime,
    pub ends_at: Option<NaiveDateTime>,
    pub is_active: bool,
    pub assignment_type: String,
    pub created_at: NaiveDateTime,
    pub consultant: Option<PersonRef>,
    pub student: Option<PersonRef>,
    pub school: Option<EntityRef>,
    pub generation: Option<EntityRef>,
    pub community: Option<EntityRef>,
}

#[derive(Default)]
struct DisplayRefs {
    users: HashMap<Uuid, MUser>,
    schools: HashMap<Uuid, String>,
    generations: HashMap<Uuid, String>,
    communities: HashMap<Uuid, String>,
}

impl DisplayRefs {
    fn person(&self, id: Option<Uuid>) -> Option<PersonRef> {
        id.and_then(|id| self.users.get(&id)).map(|u| PersonRef {
            id: u.id,
            name: u.name.clone(),
            email: u.email.clone(),
        })
    }

    fn entity(names: &HashMap<Uuid, String>, id: Option<Uuid>) -> Option<EntityRef> {
        id.and_then(|id| {
            names.get(&id).map(|name| EntityRef {
                id,
                name: name.clone(),
            })
        })
    }

    fn respond(&self, a: MConsultantAssignment) -> AssignmentResponse {
        AssignmentResponse {
            consultant: self.person(Some(a.consultant)),
            student: self.person(a.student),
            school: Self::entity(&self.schools, a.school),
            generation: Self::entity(&self.generations, a.generation),
            community: Self::entity(&self.communities, a.community),
            id: a.id,
            consultant_id: a.consultant,
            scope: a.scope,
            student_id: a.student,
            school_id: a.school,
            generation_id: a.generation,
            community_id: a.community,
            can_view_progress: a.can_view_progress,
            can_assign_courses: a.can_assign_courses,
            can_message_student: a.can_message_student,
            starts_at: a.starts_at,
            ends_at: a.ends_at,
            is_active: a.is_active,
            assignment_type: a.assignment_type,
            created_at: a.created_at,
        }
    }
}

fn collect_ids(ids: impl Iterator<Item = Option<Uuid>>) -> Vec<Uuid> {
    ids.flatten()
        .collect::<HashSet<_>>()
        .into_iter()
        .collect()
}

/// Resolves the display objects of a batch of assignments. Lookups with no
/// ids are skipped.
async fn load_display_refs(
    db: &DatabaseConnection,
    assignments: &[MConsultantAssignment],
) -> WebResult<DisplayRefs> {
    let mut refs = DisplayRefs::default();

    let user_ids = collect_ids(
        assignments
            .iter()
            .flat_map(|a| [Some(a.consultant), a.student]),
    );
    if !user_ids.is_empty() {
        refs.users = EUser::find()
            .filter(CUser::Id.is_in(user_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();
    }

    let school_ids = collect_ids(assignments.iter().map(|a| a.school));
    if !school_ids.is_empty() {
        refs.schools = ESchool::find()
            .filter(CSchool::Id.is_in(school_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|s| (s.id, s.name))
            .collect();
    }

    let generation_ids = collect_ids(assignments.iter().map(|a| a.generation));
    if !generation_ids.is_empty() {
        refs.generations = EGeneration::find()
            .filter(CGeneration::Id.is_in(generation_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|g| (g.id, g.name))
            .collect();
    }

    let community_ids = collect_ids(assignments.iter().map(|a| a.community));
    if !community_ids.is_empty() {
        refs.communities = EGrowthCommunity::find()
            .filter(CGrowthCommunity::Id.is_in(community_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();
    }

    Ok(refs)
}

async fn respond_one(
    db: &DatabaseConnection,
    assignment: MConsultantAssignment,
) -> WebResult<Json<BaseResponse<AssignmentResponse>>> {
    let refs = load_display_refs(db, std::slice::from_ref(&assignment)).await?;

    Ok(Json(BaseResponse {
        error: false,
        message: refs.respond(assignment),
    }))
}

/// Checks that need no database access.
pub fn check_request(body: &AssignmentRequest) -> WebResult<ScopeIds> {
    let ids = body.scope_ids();

    check_scope_footprint(body.scope, &ids).map_err(WebError::invalid)?;
    check_self_assignment(body.consultant_id, ids.student).map_err(WebError::invalid)?;
    check_validity_window(body.starts_at, body.ends_at).map_err(WebError::invalid)?;

    if body.assignment_type.trim().is_empty() {
        return Err(WebError::invalid("Assignment type cannot be empty"));
    }

    Ok(ids)
}

/// Every referenced id must exist and sit below the referenced school.
async fn check_references(
    db: &DatabaseConnection,
    body: &AssignmentRequest,
    ids: &ScopeIds,
) -> WebResult<()> {
    let consultant = get_user(db, body.consultant_id)
        .await?
        .ok_or_else(|| WebError::invalid("Consultant not found"))?;
    if consultant.role != UserRole::Consultant {
        return Err(WebError::invalid("User is not a consultant"));
    }

    let student = match ids.student {
        Some(student_id) => {
            let student = get_user(db, student_id)
                .await?
                .ok_or_else(|| WebError::invalid("Student not found"))?;
            if student.role != UserRole::Student {
                return Err(WebError::invalid("User is not a student"));
            }
            Some(student)
        }
        None => None,
    };

    let Some(school_id) = ids.school else {
        return Ok(());
    };

    let school = get_school(db, school_id)
        .await?
        .ok_or_else(|| WebError::invalid("School not found"))?;
    check_generation_requirement(body.scope, ids.generation, school.has_generations)
        .map_err(WebError::invalid)?;

    if let Some(generation_id) = ids.generation {
        let generation = get_generation(db, generation_id)
            .await?
            .ok_or_else(|| WebError::invalid("Generation not found"))?;
        if generation.school != school.id {
            return Err(WebError::invalid("Generation does not belong to the school"));
        }
    }

    if let Some(community_id) = ids.community {
        let community = get_community(db, community_id)
            .await?
            .ok_or_else(|| WebError::invalid("Growth community not found"))?;
        if community.school != school.id {
            return Err(WebError::invalid(
                "Growth community does not belong to the school",
            ));
        }
        if ids.generation.is_some() && community.generation != ids.generation {
            return Err(WebError::invalid(
                "Growth community does not belong to the generation",
            ));
        }
        if student.is_some_and(|s| s.community != Some(community.id)) {
            return Err(WebError::invalid(
                "Student is not a member of the growth community",
            ));
        }
    }

    Ok(())
}

async fn check_duplicate(
    db: &DatabaseConnection,
    consultant: Uuid,
    scope: AssignmentScope,
    ids: &ScopeIds,
    exclude: Option<Uuid>,
) -> WebResult<()> {
    if let Some(existing) = find_active_duplicate(db, consultant, scope, ids, exclude).await? {
        return Err(WebError::already_exists(
            "Assignment",
            format!(
                "Active assignment {} already covers this consultant and target",
                existing.id
            ),
        ));
    }

    Ok(())
}

pub async fn get(
    state: State<Arc<ServerState>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> WebResult<Json<BaseResponse<Vec<AssignmentResponse>>>> {
    let Query(query) = query?;

    let mut select = EConsultantAssignment::find().order_by_desc(CConsultantAssignment::CreatedAt);
    if !query.include_inactive {
        select = select.filter(CConsultantAssignment::IsActive.eq(true));
    }

    let assignments = select.all(&state.db).await?;
    let refs = load_display_refs(&state.db, &assignments).await?;

    let res = BaseResponse {
        error: false,
        message: assignments.into_iter().map(|a| refs.respond(a)).collect(),
    };

    Ok(Json(res))
}

pub async fn post(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    body: Result<Json<AssignmentRequest>, JsonRejection>,
) -> WebResult<Json<BaseResponse<AssignmentResponse>>> {
    let Json(body) = body?;
    let ids = check_request(&body)?;
    check_references(&state.db, &body, &ids).await?;

    if body.is_active {
        check_duplicate(&state.db, body.consultant_id, body.scope, &ids, None).await?;
    }

    let assignment = AConsultantAssignment {
        id: Set(Uuid::new_v4()),
        consultant: Set(body.consultant_id),
        scope: Set(body.scope),
        student: Set(ids.student),
        school: Set(ids.school),
        generation: Set(ids.generation),
        community: Set(ids.community),
        can_view_progress: Set(body.can_view_progress),
        can_assign_courses: Set(body.can_assign_courses),
        can_message_student: Set(body.can_message_student),
        starts_at: Set(body.starts_at),
        ends_at: Set(body.ends_at),
        is_active: Set(body.is_active),
        assignment_type: Set(body.assignment_type),
        created_by: Set(user.id),
        created_at: Set(Utc::now().naive_utc()),
    };

    let assignment = assignment.insert(&state.db).await?;
    tracing::info!(
        assignment = %assignment.id,
        scope = ?assignment.scope,
        created_by = %user.id,
        "Created consultant assignment"
    );

    respond_one(&state.db, assignment).await
}

pub async fn put(
    state: State<Arc<ServerState>>,
    path: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<AssignmentRequest>, JsonRejection>,
) -> WebResult<Json<BaseResponse<AssignmentResponse>>> {
    let Path(assignment_id) = path?;
    let Json(body) = body?;

    if body.id.is_some_and(|id| id != assignment_id) {
        return Err(WebError::invalid("Assignment id does not match the path"));
    }

    let ids = check_request(&body)?;

    let existing = EConsultantAssignment::find_by_id(assignment_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| WebError::not_found("Assignment"))?;

    check_references(&state.db, &body, &ids).await?;

    if body.is_active {
        check_duplicate(
            &state.db,
            body.consultant_id,
            body.scope,
            &ids,
            Some(assignment_id),
        )
        .await?;
    }

    let mut aassignment: AConsultantAssignment = existing.into();
    aassignment.consultant = Set(body.consultant_id);
    aassignment.scope = Set(body.scope);
    aassignment.student = Set(ids.student);
    aassignment.school = Set(ids.school);
    aassignment.generation = Set(ids.generation);
    aassignment.community = Set(ids.community);
    aassignment.can_view_progress = Set(body.can_view_progress);
    aassignment.can_assign_courses = Set(body.can_assign_courses);
    aassignment.can_message_student = Set(body.can_message_student);
    aassignment.starts_at = Set(body.starts_at);
    aassignment.ends_at = Set(body.ends_at);
    aassignment.is_active = Set(body.is_active);
    aassignment.assignment_type = Set(body.assignment_type);

    let assignment = aassignment.update(&state.db).await?;
    tracing::info!(assignment = %assignment.id, "Updated consultant assignment");

    respond_one(&state.db, assignment).await
}

pub async fn patch(
    state: State<Arc<ServerState>>,
    path: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<PatchAssignmentRequest>, JsonRejection>,
) -> WebResult<Json<BaseResponse<AssignmentResponse>>> {
    let Path(assignment_id) = path?;
    let Json(body) = body?;

    let existing = EConsultantAssignment::find_by_id(assignment_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| WebError::not_found("Assignment"))?;

    if body.is_active && !existing.is_active {
        if existing
            .ends_at
            .is_some_and(|ends_at| ends_at < Utc::now().naive_utc())
        {
            return Err(WebError::invalid("Assignment has already expired"));
        }

        let ids = ScopeIds {
            student: existing.student,
            school: existing.school,
            generation: existing.generation,
            community: existing.community,
        };
        check_duplicate(
            &state.db,
            existing.consultant,
            existing.scope,
            &ids,
            Some(assignment_id),
        )
        .await?;
    }

    let mut aassignment: AConsultantAssignment = existing.into();
    aassignment.is_active = Set(body.is_active);
    let assignment = aassignment.update(&state.db).await?;
    tracing::info!(
        assignment = %assignment.id,
        is_active = assignment.is_active,
        "Changed consultant assignment status"
    );

    respond_one(&state.db, assignment).await
}

pub async fn delete(
    state: State<Arc<ServerState>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> WebResult<Json<BaseResponse<String>>> {
    let Path(assignment_id) = path?;

    let result = EConsultantAssignment::delete_by_id(assignment_id)
        .exec(&state.db)
        .await?;

    if result.rows_affected == 0 {
        return Err(WebError::not_found("Assignment"));
    }

    tracing::info!(assignment = %assignment_id, "Deleted consultant assignment");

    Ok(Json(BaseResponse {
        error: false,
        message: "Assignment deleted".to_string(),
    }))
}
