/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Declarative directory seeding from a JSON state file.

use crate::input::check_email;
use anyhow::{Context, Result, bail};
use chrono::Utc;
use entity::user::UserRole;
use entity::*;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSchool {
    pub name: String,
    #[serde(default)]
    pub has_generations: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateGeneration {
    pub name: String,
    pub school: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateCommunity {
    pub name: String,
    pub school: String,
    #[serde(default)]
    pub generation: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateUser {
    pub name: String,
    pub email: String,
    pub role: UserRole,
    #[serde(default)]
    pub school: Option<String>,
    #[serde(default)]
    pub generation: Option<String>,
    #[serde(default)]
    pub community: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StateConfiguration {
    #[serde(default)]
    pub schools: Vec<StateSchool>,
    #[serde(default)]
    pub generations: Vec<StateGeneration>,
    #[serde(default)]
    pub communities: Vec<StateCommunity>,
    #[serde(default)]
    pub users: Vec<StateUser>,
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("Validation error in field '{field}': {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub is_valid: bool,
}

impl StateConfiguration {
    pub fn from_file(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read state file {}", path))?;
        serde_json::from_str(&content).context("Failed to parse state file")
    }

    pub fn validate(&self) -> ValidationResult {
        let mut errors = Vec::new();
        let mut push = |field: String, message: String| {
            errors.push(ValidationError { field, message });
        };

        let mut schools: HashMap<&str, bool> = HashMap::new();
        for school in &self.schools {
            if schools
                .insert(school.name.as_str(), school.has_generations)
                .is_some()
            {
                push(
                    format!("schools.{}.name", school.name),
                    "Duplicate school name found".to_string(),
                );
            }
        }

        let mut generations: HashSet<(&str, &str)> = HashSet::new();
        for generation in &self.generations {
            let field = format!("generations.{}.school", generation.name);
            match schools.get(generation.school.as_str()) {
                None => push(
                    field,
                    format!("School '{}' does not exist", generation.school),
                ),
                Some(false) => push(
                    field,
                    format!("School '{}' does not use generations", generation.school),
                ),
                Some(true) => {}
            }

            if !generations.insert((generation.school.as_str(), generation.name.as_str())) {
                push(
                    format!("generations.{}.name", generation.name),
                    "Duplicate generation name found".to_string(),
                );
            }
        }

        let mut communities: HashMap<(&str, &str), Option<&str>> = HashMap::new();
        for community in &self.communities {
            let field = format!("communities.{}", community.name);
            match (
                schools.get(community.school.as_str()),
                community.generation.as_deref(),
            ) {
                (None, _) => push(
                    format!("{}.school", field),
                    format!("School '{}' does not exist", community.school),
                ),
                (Some(true), None) => push(
                    format!("{}.generation", field),
                    "Generation is required for schools with generations".to_string(),
                ),
                (Some(false), Some(_)) => push(
                    format!("{}.generation", field),
                    format!("School '{}' does not use generations", community.school),
                ),
                (Some(true), Some(generation)) => {
                    if !generations.contains(&(community.school.as_str(), generation)) {
                        push(
                            format!("{}.generation", field),
                            format!("Generation '{}' does not exist", generation),
                        );
                    }
                }
                (Some(false), None) => {}
            }

            if communities
                .insert(
                    (community.school.as_str(), community.name.as_str()),
                    community.generation.as_deref(),
                )
                .is_some()
            {
                push(
                    format!("{}.name", field),
                    "Duplicate community name found".to_string(),
                );
            }
        }

        let mut emails = HashSet::new();
        for user in &self.users {
            let field = format!("users.{}", user.email);

            if !emails.insert(user.email.as_str()) {
                push(
                    format!("{}.email", field),
                    "Duplicate email found".to_string(),
                );
            }

            if let Err(e) = check_email(&user.email) {
                push(format!("{}.email", field), e);
            }

            let Some(school) = user.school.as_deref() else {
                if user.generation.is_some() || user.community.is_some() {
                    push(
                        format!("{}.school", field),
                        "School is required when a generation or community is set".to_string(),
                    );
                }
                continue;
            };

            if !schools.contains_key(school) {
                push(
                    format!("{}.school", field),
                    format!("School '{}' does not exist", school),
                );
            }

            if let Some(generation) = user.generation.as_deref() {
                if !generations.contains(&(school, generation)) {
                    push(
                        format!("{}.generation", field),
                        format!("Generation '{}' does not exist", generation),
                    );
                }
            }

            if let Some(community) = user.community.as_deref() {
                match communities.get(&(school, community)) {
                    None => push(
                        format!("{}.community", field),
                        format!("Community '{}' does not exist", community),
                    ),
                    Some(community_generation) => {
                        if user.generation.is_some()
                            && *community_generation != user.generation.as_deref()
                        {
                            push(
                                format!("{}.community", field),
                                format!(
                                    "Community '{}' does not belong to the user's generation",
                                    community
                                ),
                            );
                        }
                    }
                }
            }
        }

        ValidationResult {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

pub async fn load_and_apply_state(
    db: &DatabaseConnection,
    path: &str,
    delete_state: bool,
) -> Result<()> {
    tracing::info!("Loading state configuration from: {}", path);

    let config = StateConfiguration::from_file(path)?;

    let validation = config.validate();
    if !validation.is_valid {
        let error_messages: Vec<String> = validation
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();

        bail!(
            "State configuration validation failed:\n{}",
            error_messages.join("\n")
        );
    }

    tracing::info!("State configuration validated successfully");

    let schools = apply_schools(db, &config.schools).await?;
    let generations = apply_generations(db, &config.generations, &schools).await?;
    let communities =
        apply_communities(db, &config.communities, &schools, &generations).await?;
    apply_users(db, &config.users, &schools, &generations, &communities).await?;

    if delete_state {
        fs::remove_file(path).with_context(|| format!("Failed to delete state file {}", path))?;
    }

    tracing::info!("State applied successfully");
    Ok(())
}

type SchoolLookup = HashMap<String, Uuid>;
type ChildLookup = HashMap<(String, String), Uuid>;

async fn apply_schools(
    db: &DatabaseConnection,
    state_schools: &[StateSchool],
) -> Result<SchoolLookup> {
    let mut lookup = HashMap::new();

    for state_school in state_schools {
        let existing = school::Entity::find()
            .filter(school::Column::Name.eq(&state_school.name))
            .one(db)
            .await
            .context("Failed to query school")?;

        let model = if let Some(existing) = existing {
            let mut aschool: school::ActiveModel = existing.into();
            aschool.has_generations = Set(state_school.has_generations);
            aschool.update(db).await.context("Failed to update school")?
        } else {
            let aschool = school::ActiveModel {
                id: Set(Uuid::new_v4()),
                name: Set(state_school.name.clone()),
                has_generations: Set(state_school.has_generations),
                created_at: Set(Utc::now().naive_utc()),
            };
            tracing::info!("Created school: {}", state_school.name);
            aschool.insert(db).await.context("Failed to insert school")?
        };

        lookup.insert(model.name, model.id);
    }

    Ok(lookup)
}

async fn apply_generations(
    db: &DatabaseConnection,
    state_generations: &[StateGeneration],
    schools: &SchoolLookup,
) -> Result<ChildLookup> {
    let mut lookup = HashMap::new();

    for state_generation in state_generations {
        let school_id = *schools
            .get(&state_generation.school)
            .with_context(|| format!("Unknown school {}", state_generation.school))?;

        let existing = generation::Entity::find()
            .filter(generation::Column::School.eq(school_id))
            .filter(generation::Column::Name.eq(&state_generation.name))
            .one(db)
            .await
            .context("Failed to query generation")?;

        let id = if let Some(existing) = existing {
            existing.id
        } else {
            let ageneration = generation::ActiveModel {
                id: Set(Uuid::new_v4()),
                school: Set(school_id),
                name: Set(state_generation.name.clone()),
                created_at: Set(Utc::now().naive_utc()),
            };
            tracing::info!("Created generation: {}", state_generation.name);
            ageneration
                .insert(db)
                .await
                .context("Failed to insert generation")?
                .id
        };

        lookup.insert(
            (state_generation.school.clone(), state_generation.name.clone()),
            id,
        );
    }

    Ok(lookup)
}

async fn apply_communities(
    db: &DatabaseConnection,
    state_communities: &[StateCommunity],
    schools: &SchoolLookup,
    generations: &ChildLookup,
) -> Result<ChildLookup> {
    let mut lookup = HashMap::new();

    for state_community in state_communities {
        let school_id = *schools
            .get(&state_community.school)
            .with_context(|| format!("Unknown school {}", state_community.school))?;

        let generation_id = state_community
            .generation
            .as_ref()
            .and_then(|g| generations.get(&(state_community.school.clone(), g.clone())))
            .copied();

        let existing = growth_community::Entity::find()
            .filter(growth_community::Column::School.eq(school_id))
            .filter(growth_community::Column::Name.eq(&state_community.name))
            .one(db)
            .await
            .context("Failed to query growth community")?;

        let model = if let Some(existing) = existing {
            let mut acommunity: growth_community::ActiveModel = existing.into();
            acommunity.generation = Set(generation_id);
            acommunity
                .update(db)
                .await
                .context("Failed to update growth community")?
        } else {
            let acommunity = growth_community::ActiveModel {
                id: Set(Uuid::new_v4()),
                school: Set(school_id),
                generation: Set(generation_id),
                name: Set(state_community.name.clone()),
                created_at: Set(Utc::now().naive_utc()),
            };
            tracing::info!("Created growth community: {}", state_community.name);
            acommunity
                .insert(db)
                .await
                .context("Failed to insert growth community")?
        };

        lookup.insert(
            (state_community.school.clone(), state_community.name.clone()),
            model.id,
        );
    }

    Ok(lookup)
}

async fn apply_users(
    db: &DatabaseConnection,
    state_users: &[StateUser],
    schools: &SchoolLookup,
    generations: &ChildLookup,
    communities: &ChildLookup,
) -> Result<()> {
    for state_user in state_users {
        let school_id = state_user
            .school
            .as_ref()
            .and_then(|s| schools.get(s))
            .copied();
        let child = |lookup: &ChildLookup, name: &Option<String>| {
            state_user
                .school
                .as_ref()
                .zip(name.as_ref())
                .and_then(|(s, n)| lookup.get(&(s.clone(), n.clone())))
                .copied()
        };
        let generation_id = child(generations, &state_user.generation);
        let community_id = child(communities, &state_user.community);

        let existing = user::Entity::find()
            .filter(user::Column::Email.eq(&state_user.email))
            .one(db)
            .await
            .context("Failed to query user")?;

        if let Some(existing) = existing {
            let mut auser: user::ActiveModel = existing.into();
            auser.name = Set(state_user.name.clone());
            auser.role = Set(state_user.role);
            auser.school = Set(school_id);
            auser.generation = Set(generation_id);
            auser.community = Set(community_id);
            auser.update(db).await.context("Failed to update user")?;
            tracing::info!("Updated user: {}", state_user.email);
        } else {
            let auser = user::ActiveModel {
                id: Set(Uuid::new_v4()),
                name: Set(state_user.name.clone()),
                email: Set(state_user.email.clone()),
                role: Set(state_user.role),
                school: Set(school_id),
                generation: Set(generation_id),
                community: Set(community_id),
                created_at: Set(Utc::now().naive_utc()),
            };
            auser.insert(db).await.context("Failed to insert user")?;
            tracing::info!("Created user: {}", state_user.email);
        }
    }

    Ok(())
}
