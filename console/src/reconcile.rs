/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Handling of membership references that do not resolve in the snapshot.
//!
//! Schools and communities are treated differently on purpose. An unknown
//! school only matters for display, so a placeholder is appended and the
//! reference kept. An unknown community would define the target of a bulk
//! assignment, so the reference is dropped. Keep these two policies
//! separate.

use tracing::warn;
use uuid::Uuid;

use crate::directory::{Directory, School};

/// Returns the school id to keep in the selection. When the id is not in
/// the snapshot a display-only school is appended to the working list.
pub fn reconcile_school(
    directory: &mut Directory,
    school_id: Option<Uuid>,
    name_hint: Option<&str>,
) -> Option<Uuid> {
    let id = school_id?;

    if directory.school(id).is_none() {
        warn!(school_id = %id, "School missing from directory, adding display-only entry");
        directory.push_synthesized_school(School {
            id,
            name: name_hint
                .map(str::to_string)
                .unwrap_or_else(|| format!("Unknown school ({})", id)),
            has_generations: false,
            synthesized: true,
        });
    }

    Some(id)
}

/// Returns the community id to keep in the selection, or `None` when the
/// snapshot cannot vouch for it.
pub fn reconcile_community(directory: &Directory, community_id: Option<Uuid>) -> Option<Uuid> {
    let id = community_id?;

    if directory.community(id).is_none() {
        warn!(community_id = %id, "Community missing from directory, dropping reference");
        return None;
    }

    Some(id)
}
