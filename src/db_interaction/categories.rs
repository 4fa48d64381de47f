use std::{error::Error, fmt::Debug};

use anyhow::Context;
use diesel::{ExpressionMethods, QueryDsl, RunQueryDsl};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::{models::Category, schema::categories, telemetry::spawn_blocking_with_tracing, utils::{write_error_chain, DbConnection}};

#[derive(Serialize)]
pub struct CategoryRecord{
    pub category_id: Uuid,
    pub name: String,
    pub description: Option<String>
}

#[tracing::instrument(
    "Getting categories from db",
    skip_all
)]
pub async fn get_categories(
    mut conn: DbConnection
) -> Result<Vec<CategoryRecord>, anyhow::Error>{
    let rows = spawn_blocking_with_tracing(move || {
        categories::table
            .order(categories::name.asc())
            .load::<Category>(&mut conn)
            .context("Failed to get categories")
    })
    .await
    .context("Failed due to threadpool error")??;

    Ok(rows.into_iter().map(|c| CategoryRecord{
        category_id: c.category_id,
        name: c.name,
        description: c.description
    }).collect())
}

#[derive(Error)]
pub enum CategoryInsertError{
    #[error("Failed due to threadpool error")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("Failed to insert into categories table")]
    InsertError(#[from] diesel::result::Error)
}

impl Debug for CategoryInsertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        write_error_chain(f, &self.source())
    }
}

#[tracing::instrument(
    "Insert a category to db",
    skip_all
)]
pub async fn insert_category(
    mut conn: DbConnection,
    category: Category
) -> Result<(), CategoryInsertError> {
    spawn_blocking_with_tracing(move || {
        diesel::insert_into(categories::table)
            .values(category)
            .execute(&mut conn)
    })
    .await??;

    Ok(())
}
