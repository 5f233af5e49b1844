/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ConsultantAssignment::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ConsultantAssignment::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ConsultantAssignment::Consultant)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ConsultantAssignment::Scope)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ConsultantAssignment::Student).uuid())
                    .col(ColumnDef::new(ConsultantAssignment::School).uuid())
                    .col(ColumnDef::new(ConsultantAssignment::Generation).uuid())
                    .col(ColumnDef::new(ConsultantAssignment::Community).uuid())
                    .col(
                        ColumnDef::new(ConsultantAssignment::CanViewProgress)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(ConsultantAssignment::CanAssignCourses)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(ConsultantAssignment::CanMessageStudent)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(ConsultantAssignment::StartsAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ConsultantAssignment::EndsAt).timestamp())
                    .col(
                        ColumnDef::new(ConsultantAssignment::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(ConsultantAssignment::AssignmentType)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ConsultantAssignment::CreatedBy)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ConsultantAssignment::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-consultant_assignment-consultant")
                            .from(ConsultantAssignment::Table, ConsultantAssignment::Consultant)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-consultant_assignment-student")
                            .from(ConsultantAssignment::Table, ConsultantAssignment::Student)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-consultant_assignment-school")
                            .from(ConsultantAssignment::Table, ConsultantAssignment::School)
                            .to(School::Table, School::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-consultant_assignment-generation")
                            .from(ConsultantAssignment::Table, ConsultantAssignment::Generation)
                            .to(Generation::Table, Generation::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-consultant_assignment-community")
                            .from(ConsultantAssignment::Table, ConsultantAssignment::Community)
                            .to(GrowthCommunity::Table, GrowthCommunity::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-consultant_assignment-created_by")
                            .from(ConsultantAssignment::Table, ConsultantAssignment::CreatedBy)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .index(
                        Index::create()
                            .name("idx-consultant_assignment-consultant")
                            .col(ConsultantAssignment::Consultant),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ConsultantAssignment::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ConsultantAssignment {
    Table,
    Id,
    Consultant,
    Scope,
    Student,
    School,
    Generation,
    Community,
    CanViewProgress,
    CanAssignCourses,
    CanMessageStudent,
    StartsAt,
    EndsAt,
    IsActive,
    AssignmentType,
    CreatedBy,
    CreatedAt,
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum School {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Generation {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum GrowthCommunity {
    Table,
    Id,
}
