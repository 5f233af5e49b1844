/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use anyhow::{Context, Result};
use chrono::Utc;
use entity::consultant_assignment::AssignmentScope;
use migration::Migrator;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectOptions, Database, DatabaseConnection,
    DbErr, EntityTrait, QueryFilter,
};
use sea_orm_migration::prelude::*;
use std::time::Duration;
use tracing::log::LevelFilter;
use uuid::Uuid;

use super::input::ScopeIds;
use super::types::*;

pub async fn connect_db(cli: &Cli) -> Result<DatabaseConnection> {
    let db_url = if let Some(file) = &cli.database_url_file {
        std::fs::read_to_string(file)
            .context("Failed to read database url from file")?
            .trim()
            .to_string()
    } else if let Some(url) = &cli.database_url {
        url.clone()
    } else {
        anyhow::bail!("No database url provided")
    };

    let mut opt = ConnectOptions::new(db_url);

    // Only enable SQL logging at debug level
    if cli.log_level == "debug" {
        opt.sqlx_logging(true)
            .sqlx_logging_level(LevelFilter::Debug);
    } else {
        opt.sqlx_logging(false);
    }

    opt.max_connections(20)
        .min_connections(2)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .idle_timeout(Duration::from_secs(8))
        .max_lifetime(Duration::from_secs(8));

    let db = Database::connect(opt)
        .await
        .context("Failed to connect to database")?;
    Migrator::up(&db, None)
        .await
        .context("Failed to run database migrations")?;
    update_db(&db).await.context("Failed to update database")?;
    Ok(db)
}

/// Marks assignments whose validity window already closed as inactive.
pub async fn update_db(db: &DatabaseConnection) -> Result<u64, DbErr> {
    let now = Utc::now().naive_utc();

    let expired = EConsultantAssignment::find()
        .filter(
            Condition::all()
                .add(CConsultantAssignment::IsActive.eq(true))
                .add(CConsultantAssignment::EndsAt.is_not_null())
                .add(CConsultantAssignment::EndsAt.lt(now)),
        )
        .all(db)
        .await?;

    let mut deactivated = 0;
    for assignment in expired {
        let mut aassignment: AConsultantAssignment = assignment.into();
        aassignment.is_active = Set(false);
        aassignment.update(db).await?;
        deactivated += 1;
    }

    if deactivated > 0 {
        tracing::info!(deactivated, "Deactivated expired consultant assignments");
    }

    Ok(deactivated)
}

pub async fn get_user(db: &DatabaseConnection, id: Uuid) -> Result<Option<MUser>> {
    EUser::find_by_id(id)
        .one(db)
        .await
        .context("Failed to query user")
}

pub async fn get_school(db: &DatabaseConnection, id: Uuid) -> Result<Option<MSchool>> {
    ESchool::find_by_id(id)
        .one(db)
        .await
        .context("Failed to query school")
}

pub async fn get_generation(db: &DatabaseConnection, id: Uuid) -> Result<Option<MGeneration>> {
    EGeneration::find_by_id(id)
        .one(db)
        .await
        .context("Failed to query generation")
}

pub async fn get_community(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<MGrowthCommunity>> {
    EGrowthCommunity::find_by_id(id)
        .one(db)
        .await
        .context("Failed to query growth community")
}

fn optional_eq(column: CConsultantAssignment, value: Option<Uuid>) -> SimpleExpr {
    match value {
        Some(id) => column.eq(id),
        None => column.is_null(),
    }
}

/// Finds an active assignment with exactly the same consultant, scope and
/// scope ids, ignoring `exclude` (the row being updated).
pub async fn find_active_duplicate(
    db: &DatabaseConnection,
    consultant: Uuid,
    scope: AssignmentScope,
    ids: &ScopeIds,
    exclude: Option<Uuid>,
) -> Result<Option<MConsultantAssignment>> {
    let mut condition = Condition::all()
        .add(CConsultantAssignment::IsActive.eq(true))
        .add(CConsultantAssignment::Consultant.eq(consultant))
        .add(CConsultantAssignment::Scope.eq(scope))
        .add(optional_eq(CConsultantAssignment::Student, ids.student))
        .add(optional_eq(CConsultantAssignment::School, ids.school))
        .add(optional_eq(CConsultantAssignment::Generation, ids.generation))
        .add(optional_eq(CConsultantAssignment::Community, ids.community));

    if let Some(id) = exclude {
        condition = condition.add(CConsultantAssignment::Id.ne(id));
    }

    EConsultantAssignment::find()
        .filter(condition)
        .one(db)
        .await
        .context("Failed to query consultant assignments")
}
