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
                    .table(GrowthCommunity::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GrowthCommunity::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GrowthCommunity::School).uuid().not_null())
                    .col(ColumnDef::new(GrowthCommunity::Generation).uuid())
                    .col(ColumnDef::new(GrowthCommunity::Name).string().not_null())
                    .col(
                        ColumnDef::new(GrowthCommunity::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-growth_community-school")
                            .from(GrowthCommunity::Table, GrowthCommunity::School)
                            .to(School::Table, School::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-growth_community-generation")
                            .from(GrowthCommunity::Table, GrowthCommunity::Generation)
                            .to(Generation::Table, Generation::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GrowthCommunity::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum GrowthCommunity {
    Table,
    Id,
    School,
    Generation,
    Name,
    CreatedAt,
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
