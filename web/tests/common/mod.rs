/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use compass_core::types::*;
use entity::consultant_assignment::AssignmentScope;
use entity::user::UserRole;
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
use std::sync::Arc;
use uuid::Uuid;

pub const ADMIN: Uuid = Uuid::from_u128(0xad);
pub const CONSULTANT: Uuid = Uuid::from_u128(0x1);
pub const STUDENT: Uuid = Uuid::from_u128(0x2);
pub const SCHOOL: Uuid = Uuid::from_u128(0x100);
pub const GENERATION: Uuid = Uuid::from_u128(0x110);
pub const COMMUNITY: Uuid = Uuid::from_u128(0x111);

pub fn timestamp() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 3, 1)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

pub const JWT_SECRET: &str = "compass-test-secret";

/// Writes `content` to a fresh temporary file and returns its path.
pub fn secret_file_with(content: &str) -> String {
    let path = std::env::temp_dir().join(format!("compass-jwt-{}", Uuid::new_v4()));
    std::fs::write(&path, content).unwrap();
    path.to_string_lossy().to_string()
}

pub fn secret_file() -> String {
    secret_file_with(&format!("{}\n", JWT_SECRET))
}

pub fn create_mock_cli() -> Cli {
    Cli {
        log_level: "info".to_string(),
        ip: "127.0.0.1".to_string(),
        port: 3000,
        database_url: Some("mock://test".to_string()),
        database_url_file: None,
        jwt_secret_file: secret_file(),
        report_errors: false,
        sentry_dsn: None,
        state_file: None,
        delete_state: false,
    }
}

pub fn create_mock_state_with(db: DatabaseConnection) -> Arc<ServerState> {
    Arc::new(ServerState {
        db,
        cli: create_mock_cli(),
        jwt_secret: JWT_SECRET.to_string(),
    })
}

pub fn create_mock_state() -> Arc<ServerState> {
    create_mock_state_with(MockDatabase::new(DatabaseBackend::Postgres).into_connection())
}

pub fn user(id: Uuid, name: &str, role: UserRole) -> MUser {
    MUser {
        id,
        name: name.to_string(),
        email: format!("{}@compass.example", name.to_lowercase()),
        role,
        school: None,
        generation: None,
        community: None,
        created_at: timestamp(),
    }
}

pub fn admin() -> MUser {
    user(ADMIN, "Ada", UserRole::Admin)
}

pub fn consultant() -> MUser {
    user(CONSULTANT, "Clara", UserRole::Consultant)
}

pub fn student() -> MUser {
    MUser {
        school: Some(SCHOOL),
        generation: Some(GENERATION),
        community: Some(COMMUNITY),
        ..user(STUDENT, "Sam", UserRole::Student)
    }
}

pub fn school(has_generations: bool) -> MSchool {
    MSchool {
        id: SCHOOL,
        name: "Lincoln".to_string(),
        has_generations,
        created_at: timestamp(),
    }
}

pub fn generation() -> MGeneration {
    MGeneration {
        id: GENERATION,
        school: SCHOOL,
        name: "Class of 2026".to_string(),
        created_at: timestamp(),
    }
}

pub fn community() -> MGrowthCommunity {
    MGrowthCommunity {
        id: COMMUNITY,
        school: SCHOOL,
        generation: Some(GENERATION),
        name: "Oak".to_string(),
        created_at: timestamp(),
    }
}

pub fn school_assignment(id: Uuid) -> MConsultantAssignment {
    MConsultantAssignment {
        id,
        consultant: CONSULTANT,
        scope: AssignmentScope::School,
        student: None,
        school: Some(SCHOOL),
        generation: None,
        community: None,
        can_view_progress: true,
        can_assign_courses: false,
        can_message_student: true,
        starts_at: timestamp(),
        ends_at: None,
        is_active: true,
        assignment_type: "comprehensive".to_string(),
        created_by: ADMIN,
        created_at: timestamp(),
    }
}
