/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

mod common;

use axum::Json;
use axum::extract::State;
use common::*;
use entity::user::UserRole;
use sea_orm::{DatabaseBackend, MockDatabase};
use web::endpoints::directory::*;

#[test]
fn test_build_directory_splits_roles_and_nests_membership() {
    let directory = build_directory(
        vec![school(true)],
        vec![generation()],
        vec![community()],
        vec![admin(), consultant(), student()],
    );

    assert_eq!(directory.consultants.len(), 1);
    assert_eq!(directory.students.len(), 1);
    assert_eq!(directory.consultants[0].role, UserRole::Consultant);

    let student = &directory.students[0];
    assert_eq!(student.school_id, Some(SCHOOL));
    assert_eq!(student.school.as_ref().unwrap().name, "Lincoln");
    assert_eq!(student.generation.as_ref().unwrap().name, "Class of 2026");
    assert_eq!(student.community.as_ref().unwrap().id, COMMUNITY);

    assert!(directory.schools[0].has_generations);
    assert_eq!(directory.generations[0].school_id, SCHOOL);
    assert_eq!(directory.communities[0].generation_id, Some(GENERATION));
}

#[test]
fn test_dangling_membership_keeps_flat_id_only() {
    let mut orphan = student();
    orphan.community = Some(uuid::Uuid::from_u128(0xdead));

    let directory = build_directory(vec![school(true)], vec![generation()], vec![], vec![orphan]);

    let student = &directory.students[0];
    assert_eq!(student.community_id, Some(uuid::Uuid::from_u128(0xdead)));
    assert!(student.community.is_none());
}

#[test]
fn test_directory_serializes_flat_and_nested_fields() {
    let directory = build_directory(vec![school(false)], vec![], vec![], vec![student()]);
    let json = serde_json::to_value(&directory).unwrap();

    let student = &json["students"][0];
    assert_eq!(student["role"], "student");
    assert_eq!(student["school_id"], SCHOOL.to_string());
    assert_eq!(student["school"]["name"], "Lincoln");
}

#[tokio::test]
async fn test_get_directory() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![school(true)]])
        .append_query_results([vec![generation()]])
        .append_query_results([vec![community()]])
        .append_query_results([vec![consultant(), student()]])
        .into_connection();
    let state = create_mock_state_with(db);

    let Json(response) = get(State(state)).await.unwrap();

    assert!(!response.error);
    assert_eq!(response.message.consultants.len(), 1);
    assert_eq!(response.message.students.len(), 1);
    assert_eq!(response.message.communities.len(), 1);
}
