/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Smallest organizational unit. `generation` is set iff the owning school
/// uses generations.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "growth_community")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub school: Uuid,
    pub generation: Option<Uuid>,
    pub name: String,
    pub created_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    School,
    Generation,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::School => Entity::belongs_to(super::school::Entity)
                .from(Column::School)
                .to(super::school::Column::Id)
                .into(),
            Self::Generation => Entity::belongs_to(super::generation::Entity)
                .from(Column::Generation)
                .to(super::generation::Column::Id)
                .into(),
        }
    }
}

impl Related<super::school::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::School.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
