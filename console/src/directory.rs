/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Directory snapshot as consumed by the engine.
//!
//! The read endpoint may describe a user's membership either with flat id
//! fields or with nested display objects. [`Directory::normalize`] folds both
//! into one [`Member`] shape so nothing downstream has to care.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectoryResponse {
    #[serde(default)]
    pub consultants: Vec<DirectoryUser>,
    #[serde(default)]
    pub students: Vec<DirectoryUser>,
    #[serde(default)]
    pub schools: Vec<School>,
    #[serde(default)]
    pub generations: Vec<Generation>,
    #[serde(default)]
    pub communities: Vec<GrowthCommunity>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NestedRef {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub school_id: Option<Uuid>,
    #[serde(default)]
    pub generation_id: Option<Uuid>,
    #[serde(default)]
    pub community_id: Option<Uuid>,
    #[serde(default)]
    pub school: Option<NestedRef>,
    #[serde(default)]
    pub generation: Option<NestedRef>,
    #[serde(default)]
    pub community: Option<NestedRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct School {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub has_generations: bool,
    /// Display-only entry added by the reconciler, never sent anywhere.
    #[serde(skip)]
    pub synthesized: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Generation {
    pub id: Uuid,
    pub school_id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthCommunity {
    pub id: Uuid,
    pub school_id: Uuid,
    #[serde(default)]
    pub generation_id: Option<Uuid>,
    pub name: String,
}

/// Canonical user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Option<String>,
    pub school_id: Option<Uuid>,
    pub generation_id: Option<Uuid>,
    pub community_id: Option<Uuid>,
    /// Name carried by the nested school object, if any.
    pub school_name: Option<String>,
}

impl From<DirectoryUser> for Member {
    fn from(user: DirectoryUser) -> Self {
        let nested_id = |nested: &Option<NestedRef>| nested.as_ref().and_then(|n| n.id);

        Member {
            school_id: user.school_id.or_else(|| nested_id(&user.school)),
            generation_id: user.generation_id.or_else(|| nested_id(&user.generation)),
            community_id: user.community_id.or_else(|| nested_id(&user.community)),
            school_name: user.school.and_then(|s| s.name),
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Directory {
    consultants: Vec<Member>,
    students: Vec<Member>,
    schools: Vec<School>,
    generations: Vec<Generation>,
    communities: Vec<GrowthCommunity>,
}

impl Directory {
    pub fn normalize(response: DirectoryResponse) -> Self {
        Directory {
            consultants: response.consultants.into_iter().map(Member::from).collect(),
            students: response.students.into_iter().map(Member::from).collect(),
            schools: response
                .schools
                .into_iter()
                .map(|school| School {
                    synthesized: false,
                    ..school
                })
                .collect(),
            generations: response.generations,
            communities: response.communities,
        }
    }

    pub fn consultants(&self) -> &[Member] {
        &self.consultants
    }

    pub fn students(&self) -> &[Member] {
        &self.students
    }

    pub fn schools(&self) -> &[School] {
        &self.schools
    }

    pub fn generations(&self) -> &[Generation] {
        &self.generations
    }

    pub fn communities(&self) -> &[GrowthCommunity] {
        &self.communities
    }

    pub fn school(&self, id: Uuid) -> Option<&School> {
        self.schools.iter().find(|s| s.id == id)
    }

    pub fn generation(&self, id: Uuid) -> Option<&Generation> {
        self.generations.iter().find(|g| g.id == id)
    }

    pub fn community(&self, id: Uuid) -> Option<&GrowthCommunity> {
        self.communities.iter().find(|c| c.id == id)
    }

    /// Looks a user up among students first, then consultants.
    pub fn member(&self, id: Uuid) -> Option<&Member> {
        self.students
            .iter()
            .chain(self.consultants.iter())
            .find(|m| m.id == id)
    }

    pub(crate) fn push_synthesized_school(&mut self, school: School) {
        self.schools.push(school);
    }
}
