/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Tests for the consultant assignment entity

use chrono::NaiveDate;
use entity::consultant_assignment::AssignmentScope;
use entity::*;
use sea_orm::{DatabaseBackend, MockDatabase, entity::prelude::*};
use std::str::FromStr;
use uuid::Uuid;

#[tokio::test]
async fn test_school_assignment_entity() -> Result<(), DbErr> {
    let assignment_id = Uuid::new_v4();
    let school_id = Uuid::new_v4();
    let naive_date = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![consultant_assignment::Model {
            id: assignment_id,
            consultant: Uuid::new_v4(),
            scope: AssignmentScope::School,
            student: None,
            school: Some(school_id),
            generation: None,
            community: None,
            can_view_progress: true,
            can_assign_courses: false,
            can_message_student: true,
            starts_at: naive_date,
            ends_at: None,
            is_active: true,
            assignment_type: "comprehensive".to_owned(),
            created_by: Uuid::new_v4(),
            created_at: naive_date,
        }]])
        .into_connection();

    let assignment = consultant_assignment::Entity::find_by_id(assignment_id)
        .one(&db)
        .await?
        .unwrap();

    assert_eq!(assignment.scope, AssignmentScope::School);
    assert_eq!(assignment.school, Some(school_id));
    assert!(assignment.student.is_none());
    assert!(assignment.ends_at.is_none());

    Ok(())
}

#[test]
fn test_assignment_scope_from_str() {
    assert_eq!(
        AssignmentScope::from_str("individual").unwrap(),
        AssignmentScope::Individual
    );
    assert_eq!(
        AssignmentScope::from_str("community").unwrap(),
        AssignmentScope::Community
    );
    assert!(AssignmentScope::from_str("district").is_err());
}

#[test]
fn test_assignment_scope_serialization() {
    let json = serde_json::to_string(&AssignmentScope::Generation).unwrap();
    assert_eq!(json, "\"generation\"");

    let scope: AssignmentScope = serde_json::from_str("\"school\"").unwrap();
    assert_eq!(scope, AssignmentScope::School);
}

#[test]
fn test_user_role_round_trip() {
    let role = user::UserRole::from_str("consultant").unwrap();
    assert_eq!(role, user::UserRole::Consultant);
    assert_eq!(role.to_string(), "consultant");
    assert!(user::UserRole::from_str("teacher").is_err());
}
