/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::input::*;
use clap::{Args, Subcommand};
use connector::HttpBackend;
use console::*;
use uuid::Uuid;

#[derive(Args, Debug)]
pub struct TargetArgs {
    #[arg(short, long)]
    consultant: Option<Uuid>,
    /// individual, school, generation or community
    #[arg(short, long)]
    scope: Option<Scope>,
    #[arg(long)]
    student: Option<Uuid>,
    #[arg(long)]
    school: Option<Uuid>,
    #[arg(long)]
    generation: Option<Uuid>,
    #[arg(long)]
    community: Option<Uuid>,
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    assign_courses: Option<bool>,
    /// End of the validity window (RFC 3339)
    #[arg(long, conflicts_with = "indefinite")]
    until: Option<String>,
    #[arg(long)]
    indefinite: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    List {
        #[arg(long)]
        inactive: bool,
        #[arg(long)]
        scope: Option<Scope>,
        /// all, active or inactive
        #[arg(long, default_value = "all")]
        status: StatusFilter,
        #[arg(long)]
        search: Option<String>,
    },
    Create {
        /// Open the form for this user and keep their membership
        #[arg(long)]
        for_user: Option<Uuid>,
        #[command(flatten)]
        target: TargetArgs,
    },
    Edit {
        id: Uuid,
        #[command(flatten)]
        target: TargetArgs,
    },
    Deactivate {
        id: Uuid,
    },
    Delete {
        id: Uuid,
    },
}

/// Scope goes first since it resets the dependent fields.
fn apply_target(form: &mut AssignmentForm, target: TargetArgs) {
    if let Some(consultant) = target.consultant {
        form.apply_field_change(FieldChange::Consultant(Some(consultant)));
    }
    if let Some(scope) = target.scope {
        form.apply_field_change(FieldChange::Scope(scope));
    }
    if let Some(student) = target.student {
        form.apply_field_change(FieldChange::Student(Some(student)));
    }
    if let Some(school) = target.school {
        form.apply_field_change(FieldChange::School(Some(school)));
    }
    if let Some(generation) = target.generation {
        form.apply_field_change(FieldChange::Generation(Some(generation)));
    }
    if let Some(community) = target.community {
        form.apply_field_change(FieldChange::Community(Some(community)));
    }
    if let Some(assign_courses) = target.assign_courses {
        form.can_assign_courses = assign_courses;
    }
    if let Some(until) = target.until {
        form.validity = ValidityRequest::Bounded(Some(or_exit(parse_until(&until))));
    } else if target.indefinite {
        form.validity = ValidityRequest::Indefinite;
    }
}

async fn submit(form: &mut AssignmentForm, backend: &HttpBackend) {
    match or_exit(form.submit(backend, &StdinConfirm).await) {
        Submitted::Saved { assignment, outcome } => {
            println!("{} ({})", outcome, assignment.id);
        }
        Submitted::Declined => {
            println!("Aborted.");
        }
    }
}

fn print_entry(entry: &registry::RegistryEntry) {
    let assignment = &entry.assignment;
    let affected = entry
        .affected
        .map(|n| format!(" [{} users]", n))
        .unwrap_or_default();

    println!(
        "{}  {:<10} {:<8} {} -> {}{}",
        assignment.id,
        assignment.scope,
        if assignment.is_active { "active" } else { "inactive" },
        entry.consultant_name,
        entry.target_name,
        affected
    );
}

pub async fn handle(cmd: Commands) {
    let backend = HttpBackend::new(or_exit(get_request_config()));

    match cmd {
        Commands::List {
            inactive,
            scope,
            status,
            search,
        } => {
            let include_inactive = inactive || status == StatusFilter::Inactive;
            let registry = or_exit(Registry::load(&backend, include_inactive).await);
            let entries = registry.filter(&RegistryFilter {
                scope,
                status,
                search,
            });

            if entries.is_empty() {
                println!("No assignments found.");
                return;
            }

            for entry in entries {
                print_entry(entry);
            }
        }

        Commands::Create { for_user, target } => {
            let directory = Directory::normalize(or_exit(backend.fetch_directory().await));
            let resolver = match for_user {
                Some(user) => or_exit(ScopeResolver::for_user(directory, user)),
                None => ScopeResolver::new(directory),
            };

            let mut form = AssignmentForm::new(resolver);
            apply_target(&mut form, target);
            submit(&mut form, &backend).await;
        }

        Commands::Edit { id, target } => {
            let registry = or_exit(Registry::load(&backend, true).await);
            let mut form = or_exit(registry.edit(id));
            apply_target(&mut form, target);
            submit(&mut form, &backend).await;
        }

        Commands::Deactivate { id } => {
            let mut registry = or_exit(Registry::load(&backend, true).await);
            let entry = or_exit(registry.set_active(&backend, id, false).await);
            print_entry(entry);
        }

        Commands::Delete { id } => {
            let mut registry = or_exit(Registry::load(&backend, true).await);
            if or_exit(registry.delete(&backend, &StdinConfirm, id).await) {
                println!("Assignment deleted.");
            } else {
                println!("Aborted.");
            }
        }
    }
}
