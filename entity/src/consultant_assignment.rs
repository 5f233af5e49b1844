/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, DeriveActiveEnum, EnumIter, Deserialize, Serialize,
)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
#[serde(rename_all = "lowercase")]
pub enum AssignmentScope {
    #[sea_orm(num_value = 0)]
    Individual,
    #[sea_orm(num_value = 1)]
    School,
    #[sea_orm(num_value = 2)]
    Generation,
    #[sea_orm(num_value = 3)]
    Community,
}

impl std::str::FromStr for AssignmentScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "individual" => Ok(AssignmentScope::Individual),
            "school" => Ok(AssignmentScope::School),
            "generation" => Ok(AssignmentScope::Generation),
            "community" => Ok(AssignmentScope::Community),
            _ => Err(format!("Unknown assignment scope: {}", s)),
        }
    }
}

/// A consultant attached to one student or to a whole organizational subtree.
///
/// Which of `student`, `school`, `generation` and `community` are set is
/// fixed by `scope`; the write layer rejects every other combination.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "consultant_assignment")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub consultant: Uuid,
    pub scope: AssignmentScope,
    pub student: Option<Uuid>,
    pub school: Option<Uuid>,
    pub generation: Option<Uuid>,
    pub community: Option<Uuid>,
    pub can_view_progress: bool,
    pub can_assign_courses: bool,
    pub can_message_student: bool,
    pub starts_at: NaiveDateTime,
    pub ends_at: Option<NaiveDateTime>,
    pub is_active: bool,
    pub assignment_type: String,
    pub created_by: Uuid,
    pub created_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Consultant,
    Student,
    School,
    Generation,
    Community,
    CreatedBy,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Consultant => Entity::belongs_to(super::user::Entity)
                .from(Column::Consultant)
                .to(super::user::Column::Id)
                .into(),
            Self::Student => Entity::belongs_to(super::user::Entity)
                .from(Column::Student)
                .to(super::user::Column::Id)
                .into(),
            Self::School => Entity::belongs_to(super::school::Entity)
                .from(Column::School)
                .to(super::school::Column::Id)
                .into(),
            Self::Generation => Entity::belongs_to(super::generation::Entity)
                .from(Column::Generation)
                .to(super::generation::Column::Id)
                .into(),
            Self::Community => Entity::belongs_to(super::growth_community::Entity)
                .from(Column::Community)
                .to(super::growth_community::Column::Id)
                .into(),
            Self::CreatedBy => Entity::belongs_to(super::user::Entity)
                .from(Column::CreatedBy)
                .to(super::user::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}
