/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Tests for state file validation

use compass_core::state::*;

fn parse(json: &str) -> StateConfiguration {
    serde_json::from_str(json).unwrap()
}

#[test]
fn test_valid_configuration() {
    let config = parse(
        r#"{
            "schools": [
                { "name": "Lincoln" },
                { "name": "Roosevelt", "has_generations": true }
            ],
            "generations": [{ "name": "2026", "school": "Roosevelt" }],
            "communities": [
                { "name": "Oak", "school": "Lincoln" },
                { "name": "Pine", "school": "Roosevelt", "generation": "2026" }
            ],
            "users": [
                { "name": "Cora", "email": "cora@compass.test", "role": "consultant" },
                {
                    "name": "Sam",
                    "email": "sam@compass.test",
                    "role": "student",
                    "school": "Roosevelt",
                    "generation": "2026",
                    "community": "Pine"
                }
            ]
        }"#,
    );

    let result = config.validate();
    assert!(result.is_valid, "{:?}", result.errors);
}

#[test]
fn test_generation_under_school_without_generations() {
    let config = parse(
        r#"{
            "schools": [{ "name": "Lincoln" }],
            "generations": [{ "name": "2026", "school": "Lincoln" }]
        }"#,
    );

    let result = config.validate();
    assert!(!result.is_valid);
    assert_eq!(result.errors[0].field, "generations.2026.school");
    assert_eq!(
        result.errors[0].message,
        "School 'Lincoln' does not use generations"
    );
}

#[test]
fn test_community_requires_generation_when_school_uses_them() {
    let config = parse(
        r#"{
            "schools": [{ "name": "Roosevelt", "has_generations": true }],
            "communities": [{ "name": "Pine", "school": "Roosevelt" }]
        }"#,
    );

    let result = config.validate();
    assert!(!result.is_valid);
    assert_eq!(result.errors[0].field, "communities.Pine.generation");
}

#[test]
fn test_user_with_unknown_community() {
    let config = parse(
        r#"{
            "schools": [{ "name": "Lincoln" }],
            "users": [{
                "name": "Sam",
                "email": "sam@compass.test",
                "role": "student",
                "school": "Lincoln",
                "community": "Birch"
            }]
        }"#,
    );

    let result = config.validate();
    assert!(!result.is_valid);
    assert_eq!(result.errors[0].message, "Community 'Birch' does not exist");
}

#[test]
fn test_duplicate_emails_and_bad_format() {
    let config = parse(
        r#"{
            "users": [
                { "name": "A", "email": "a@compass.test", "role": "admin" },
                { "name": "B", "email": "a@compass.test", "role": "student" },
                { "name": "C", "email": "not-an-email", "role": "student" }
            ]
        }"#,
    );

    let result = config.validate();
    assert_eq!(result.errors.len(), 2);
    assert_eq!(result.errors[0].message, "Duplicate email found");
    assert_eq!(result.errors[1].message, "Email must contain '@'");
}

#[test]
fn test_membership_without_school() {
    let config = parse(
        r#"{
            "users": [{
                "name": "Sam",
                "email": "sam@compass.test",
                "role": "student",
                "community": "Oak"
            }]
        }"#,
    );

    let result = config.validate();
    assert!(!result.is_valid);
    assert_eq!(result.errors[0].field, "users.sam@compass.test.school");
}
