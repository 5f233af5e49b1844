/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, DeriveActiveEnum, EnumIter, Deserialize, Serialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[sea_orm(num_value = 0)]
    Admin,
    #[sea_orm(num_value = 1)]
    Consultant,
    #[sea_orm(num_value = 2)]
    Student,
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(UserRole::Admin),
            "consultant" => Ok(UserRole::Consultant),
            "student" => Ok(UserRole::Student),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            UserRole::Admin => "admin",
            UserRole::Consultant => "consultant",
            UserRole::Student => "student",
        };
        write!(f, "{}", s)
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub role: UserRole,
    pub school: Option<Uuid>,
    pub generation: Option<Uuid>,
    pub community: Option<Uuid>,
    pub created_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    School,
    Generation,
    Community,
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
            Self::Community => Entity::belongs_to(super::growth_community::Entity)
                .from(Column::Community)
                .to(super::growth_community::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}
