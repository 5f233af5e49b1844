/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

pub use sea_orm_migration::prelude::*;

mod m20260301_000000_create_table_school;
mod m20260301_000100_create_table_generation;
mod m20260301_000200_create_table_growth_community;
mod m20260301_000300_create_table_user;
mod m20260301_000400_create_table_consultant_assignment;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000000_create_table_school::Migration),
            Box::new(m20260301_000100_create_table_generation::Migration),
            Box::new(m20260301_000200_create_table_growth_community::Migration),
            Box::new(m20260301_000300_create_table_user::Migration),
            Box::new(m20260301_000400_create_table_consultant_assignment::Migration),
        ]
    }
}
