/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

mod common;

use common::*;
use console::reconcile::{reconcile_community, reconcile_school};
use console::*;

#[test]
fn test_unknown_school_is_synthesized_for_display() {
    let mut directory = directory();
    let before = directory.schools().len();

    let kept = reconcile_school(&mut directory, Some(GHOST_SCHOOL), Some("Old Campus"));

    assert_eq!(kept, Some(GHOST_SCHOOL));
    assert_eq!(directory.schools().len(), before + 1);
    let school = directory.school(GHOST_SCHOOL).unwrap();
    assert_eq!(school.name, "Old Campus");
    assert!(school.synthesized);
    assert!(!school.has_generations);
}

#[test]
fn test_known_school_is_left_alone() {
    let mut directory = directory();
    let before = directory.schools().len();

    assert_eq!(reconcile_school(&mut directory, Some(LINCOLN), None), Some(LINCOLN));
    assert_eq!(directory.schools().len(), before);
    assert_eq!(reconcile_school(&mut directory, None, None), None);
}

#[test]
fn test_unknown_community_is_dropped_never_synthesized() {
    let directory = directory();
    let before = directory.communities().len();

    assert_eq!(reconcile_community(&directory, Some(GHOST_COMMUNITY)), None);
    assert_eq!(directory.communities().len(), before);
    assert_eq!(reconcile_community(&directory, Some(LINCOLN_NORTH)), Some(LINCOLN_NORTH));
}

#[test]
fn test_orphan_student_keeps_school_but_loses_community() {
    let mut resolver = ScopeResolver::new(directory());
    resolver.apply_field_change(FieldChange::Scope(Scope::Community));
    resolver.apply_field_change(FieldChange::Student(Some(ORPHAN_STUDENT)));

    let selection = resolver.selection();
    assert_eq!(selection.school_id, Some(GHOST_SCHOOL));
    assert_eq!(selection.community_id, None);
    assert_eq!(selection.generation_id, None);

    let school = resolver.directory().school(GHOST_SCHOOL).unwrap();
    assert_eq!(school.name, "Old Campus");
    assert!(resolver.directory().community(GHOST_COMMUNITY).is_none());
}

#[test]
fn test_synthesized_school_is_added_once() {
    let mut resolver = ScopeResolver::for_user(directory(), ORPHAN_STUDENT).unwrap();
    resolver.apply_field_change(FieldChange::Scope(Scope::School));
    resolver.apply_field_change(FieldChange::Scope(Scope::Community));

    let ghosts = resolver
        .directory()
        .schools()
        .iter()
        .filter(|s| s.id == GHOST_SCHOOL)
        .count();
    assert_eq!(ghosts, 1);
}
