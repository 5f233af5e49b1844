/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::input::*;
use connector::HttpBackend;
use console::{AssignmentBackend, Directory};

pub async fn handle() {
    let backend = HttpBackend::new(or_exit(get_request_config()));
    let directory = Directory::normalize(or_exit(backend.fetch_directory().await));

    println!(
        "{} consultants, {} students",
        directory.consultants().len(),
        directory.students().len()
    );

    for school in directory.schools() {
        let members = directory
            .students()
            .iter()
            .filter(|m| m.school_id == Some(school.id))
            .count();
        println!("{} ({}) - {} students", school.name, school.id, members);

        if school.has_generations {
            for generation in directory.generations().iter().filter(|g| g.school_id == school.id) {
                println!("  {} ({})", generation.name, generation.id);

                for community in directory
                    .communities()
                    .iter()
                    .filter(|c| c.generation_id == Some(generation.id))
                {
                    println!("    {} ({})", community.name, community.id);
                }
            }
        } else {
            for community in directory.communities().iter().filter(|c| c.school_id == school.id) {
                println!("  {} ({})", community.name, community.id);
            }
        }
    }
}
