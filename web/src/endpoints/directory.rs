/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::error::WebResult;
use axum::Json;
use axum::extract::State;
use compass_core::types::*;
use entity::user::UserRole;
use sea_orm::{EntityTrait, QueryOrder};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NestedRef {
    pub id: Uuid,
    pub name: String,
}

/// A user with both the flat membership ids and nested display objects.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DirectoryUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub school_id: Option<Uuid>,
    pub generation_id: Option<Uuid>,
    pub community_id: Option<Uuid>,
    pub school: Option<NestedRef>,
    pub generation: Option<NestedRef>,
    pub community: Option<NestedRef>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DirectorySchool {
    pub id: Uuid,
    pub name: String,
    pub has_generations: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DirectoryGeneration {
    pub id: Uuid,
    pub school_id: Uuid,
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DirectoryCommunity {
    pub id: Uuid,
    pub school_id: Uuid,
    pub generation_id: Option<Uuid>,
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct DirectoryResponse {
    pub consultants: Vec<DirectoryUser>,
    pub students: Vec<DirectoryUser>,
    pub schools: Vec<DirectorySchool>,
    pub generations: Vec<DirectoryGeneration>,
    pub communities: Vec<DirectoryCommunity>,
}

pub async fn get(state: State<Arc<ServerState>>) -> WebResult<Json<BaseResponse<DirectoryResponse>>> {
    let schools = ESchool::find()
        .order_by_asc(CSchool::Name)
        .all(&state.db)
        .await?;
    let generations = EGeneration::find()
        .order_by_asc(CGeneration::Name)
        .all(&state.db)
        .await?;
    let communities = EGrowthCommunity::find()
        .order_by_asc(CGrowthCommunity::Name)
        .all(&state.db)
        .await?;
    let users = EUser::find().order_by_asc(CUser::Name).all(&state.db).await?;

    let directory = build_directory(schools, generations, communities, users);
    tracing::debug!(
        consultants = directory.consultants.len(),
        students = directory.students.len(),
        "Serving directory"
    );

    Ok(Json(BaseResponse {
        error: false,
        message: directory,
    }))
}

pub fn build_directory(
    schools: Vec<MSchool>,
    generations: Vec<MGeneration>,
    communities: Vec<MGrowthCommunity>,
    users: Vec<MUser>,
) -> DirectoryResponse {
    let names = |items: Vec<(Uuid, String)>| items.into_iter().collect::<HashMap<_, _>>();
    let school_names = names(schools.iter().map(|s| (s.id, s.name.clone())).collect());
    let generation_names = names(generations.iter().map(|g| (g.id, g.name.clone())).collect());
    let community_names = names(communities.iter().map(|c| (c.id, c.name.clone())).collect());

    let nested = |names: &HashMap<Uuid, String>, id: Option<Uuid>| {
        id.and_then(|id| {
            names.get(&id).map(|name| NestedRef {
                id,
                name: name.clone(),
            })
        })
    };

    let mut response = DirectoryResponse::default();

    for user in users {
        let entry = DirectoryUser {
            school: nested(&school_names, user.school),
            generation: nested(&generation_names, user.generation),
            community: nested(&community_names, user.community),
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            school_id: user.school,
            generation_id: user.generation,
            community_id: user.community,
        };

        match entry.role {
            UserRole::Consultant => response.consultants.push(entry),
            UserRole::Student => response.students.push(entry),
            UserRole::Admin => {}
        }
    }

    response.schools = schools
        .into_iter()
        .map(|s| DirectorySchool {
            id: s.id,
            name: s.name,
            has_generations: s.has_generations,
        })
        .collect();
    response.generations = generations
        .into_iter()
        .map(|g| DirectoryGeneration {
            id: g.id,
            school_id: g.school,
            name: g.name,
        })
        .collect();
    response.communities = communities
        .into_iter()
        .map(|c| DirectoryCommunity {
            id: c.id,
            school_id: c.school,
            generation_id: c.generation,
            name: c.name,
        })
        .collect();

    response
}
