/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use anyhow::{Context, bail};
use chrono::NaiveDateTime;
use entity::consultant_assignment::AssignmentScope;
use uuid::Uuid;

use super::consts::*;

/// Optional foreign keys of an assignment, in hierarchy order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScopeIds {
    pub student: Option<Uuid>,
    pub school: Option<Uuid>,
    pub generation: Option<Uuid>,
    pub community: Option<Uuid>,
}

pub fn port_in_range(s: &str) -> Result<u16, String> {
    let port: usize = s
        .parse()
        .map_err(|_| format!("`{s}` is not a port number"))?;

    if PORT_RANGE.contains(&port) {
        Ok(port as u16)
    } else {
        Err(format!(
            "port not in range {}-{}",
            PORT_RANGE.start(),
            PORT_RANGE.end()
        ))
    }
}

/// Checks the required/forbidden columns of each scope. The generation rule
/// depends on the school and is checked separately by
/// [`check_generation_requirement`].
pub fn check_scope_footprint(scope: AssignmentScope, ids: &ScopeIds) -> Result<(), String> {
    let forbid = |value: Option<Uuid>, field: &str| -> Result<(), String> {
        if value.is_some() {
            Err(format!("{} is not allowed for {:?} scope", field, scope))
        } else {
            Ok(())
        }
    };

    let require = |value: Option<Uuid>, field: &str| -> Result<(), String> {
        if value.is_none() {
            Err(format!("{} is required for {:?} scope", field, scope))
        } else {
            Ok(())
        }
    };

    match scope {
        AssignmentScope::Individual => {
            require(ids.student, "Student")?;
            forbid(ids.school, "School")?;
            forbid(ids.generation, "Generation")?;
            forbid(ids.community, "Community")
        }
        AssignmentScope::School => {
            require(ids.school, "School")?;
            forbid(ids.student, "Student")?;
            forbid(ids.generation, "Generation")?;
            forbid(ids.community, "Community")
        }
        AssignmentScope::Generation => {
            require(ids.school, "School")?;
            forbid(ids.student, "Student")?;
            forbid(ids.community, "Community")
        }
        AssignmentScope::Community => {
            require(ids.school, "School")?;
            require(ids.community, "Community")
        }
    }
}

/// Generation scope needs a generation exactly when the school uses
/// generations. Community scope may carry one only when it does.
pub fn check_generation_requirement(
    scope: AssignmentScope,
    generation: Option<Uuid>,
    school_has_generations: bool,
) -> Result<(), String> {
    match (scope, generation, school_has_generations) {
        (AssignmentScope::Generation, None, true) => {
            Err("Generation is required for schools with generations".to_string())
        }
        (AssignmentScope::Generation | AssignmentScope::Community, Some(_), false) => {
            Err("School does not use generations".to_string())
        }
        _ => Ok(()),
    }
}

pub fn check_self_assignment(consultant: Uuid, student: Option<Uuid>) -> Result<(), String> {
    if student == Some(consultant) {
        return Err("A consultant cannot be assigned to themselves".to_string());
    }

    Ok(())
}

pub fn check_validity_window(
    starts_at: NaiveDateTime,
    ends_at: Option<NaiveDateTime>,
) -> Result<(), String> {
    match ends_at {
        Some(ends_at) if ends_at < starts_at => {
            Err("End date cannot be before the start date".to_string())
        }
        _ => Ok(()),
    }
}

pub fn check_email(s: &str) -> Result<(), String> {
    let (local, domain) = s
        .split_once('@')
        .ok_or_else(|| "Email must contain '@'".to_string())?;

    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

/// Reads a secret from a file. A missing, unreadable or empty file is an
/// error, never an empty key.
pub fn load_secret(f: &str) -> anyhow::Result<String> {
    let s = std::fs::read_to_string(f)
        .with_context(|| format!("Failed to read secret file {}", f))?;
    let secret = s.trim().replace(char::from(25), "");

    if secret.is_empty() {
        bail!("Secret file {} is empty", f);
    }

    Ok(secret)
}
