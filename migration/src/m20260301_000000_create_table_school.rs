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
                    .table(School::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(School::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(School::Name).string().not_null().unique_key())
                    .col(
                        ColumnDef::new(School::HasGenerations)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(School::CreatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(School::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum School {
    Table,
    Id,
    Name,
    HasGenerations,
    CreatedAt,
}
