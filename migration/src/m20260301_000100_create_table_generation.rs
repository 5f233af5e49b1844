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
                    .table(Generation::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Generation::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Generation::School).uuid().not_null())
                    .col(ColumnDef::new(Generation::Name).string().not_null())
                    .col(ColumnDef::new(Generation::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-generation-school")
                            .from(Generation::Table, Generation::School)
                            .to(School::Table, School::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .index(
                        Index::create()
                            .name("idx-generation-school-name")
                            .col(Generation::School)
                            .col(Generation::Name)
                            .unique(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Generation::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Generation {
    Table,
    Id,
    School,
    Name,
    CreatedAt,
}

#[derive(DeriveIden)]
enum School {
    Table,
    Id,
}
