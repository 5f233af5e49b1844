/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

mod common;

use common::*;
use console::blast_radius::count_affected;
use console::*;

#[test]
fn test_individual_scope_has_no_blast_radius() {
    let directory = directory();
    assert!(BlastRadius::estimate(&directory, Scope::Individual, None, None, None).is_none());
}

#[test]
fn test_counts_match_directory_membership() {
    let directory = directory();

    for school in [LINCOLN, RIVERSIDE] {
        let expected = directory
            .students()
            .iter()
            .filter(|m| m.school_id == Some(school))
            .count();
        assert_eq!(
            count_affected(&directory, Scope::School, Some(school), None, None),
            expected
        );
    }

    assert_eq!(count_affected(&directory, Scope::School, Some(LINCOLN), None, None), 42);
    assert_eq!(count_affected(&directory, Scope::School, Some(RIVERSIDE), None, None), 6);
    assert_eq!(
        count_affected(&directory, Scope::Generation, Some(RIVERSIDE), Some(RIVERSIDE_2024), None),
        4
    );
    assert_eq!(
        count_affected(&directory, Scope::Generation, Some(RIVERSIDE), Some(RIVERSIDE_2025), None),
        2
    );
    assert_eq!(
        count_affected(&directory, Scope::Community, Some(LINCOLN), None, Some(LINCOLN_NORTH)),
        21
    );
    assert_eq!(
        count_affected(&directory, Scope::Community, Some(RIVERSIDE), None, Some(RIVERSIDE_OAK)),
        4
    );
}

#[test]
fn test_generation_scope_without_generations_covers_school() {
    let directory = directory();
    assert_eq!(count_affected(&directory, Scope::Generation, Some(LINCOLN), None, None), 42);
}

#[test]
fn test_unknown_target_counts_nobody() {
    let directory = directory();
    let radius =
        BlastRadius::estimate(&directory, Scope::Community, Some(LINCOLN), None, Some(GHOST_COMMUNITY))
            .unwrap();

    assert_eq!(radius.affected, 0);
    assert!(!radius.requires_confirmation());
}

#[test]
fn test_prompt_names_count_and_entity() {
    let directory = directory();
    let radius = BlastRadius::estimate(&directory, Scope::School, Some(LINCOLN), None, None).unwrap();

    assert!(radius.requires_confirmation());
    assert_eq!(radius.entity_name, "Lincoln");
    let prompt = radius.prompt();
    assert!(prompt.contains("42"));
    assert!(prompt.contains("Lincoln"));

    let radius = BlastRadius::estimate(
        &directory,
        Scope::Generation,
        Some(RIVERSIDE),
        Some(RIVERSIDE_2025),
        None,
    )
    .unwrap();
    assert_eq!(radius.entity_name, "Class of 2025");
}
