use std::{error::Error, fmt::Debug};

use anyhow::Context;
use diesel::{ExpressionMethods, QueryDsl, RunQueryDsl};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::{models::Supplier, schema::suppliers, telemetry::spawn_blocking_with_tracing, utils::{write_error_chain, DbConnection}};

#[derive(Serialize)]
pub struct SupplierRecord{
    pub supplier_id: Uuid,
    pub name: String,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>
}

#[tracing::instrument(
    "Getting suppliers from db",
    skip_all
)]
pub async fn get_suppliers(
    mut conn: DbConnection
) -> Result<Vec<SupplierRecord>, anyhow::Error>{
    let rows = spawn_blocking_with_tracing(move || {
        suppliers::table
            .order(suppliers::name.asc())
            .load::<Supplier>(&mut conn)
            .context("Failed to get suppliers")
    })
    .await
    .context("Failed due to threadpool error")??;

    Ok(rows.into_iter().map(|s| SupplierRecord{
        supplier_id: s.supplier_id,
        name: s.name,
        contact_person: s.contact_person,
        email: s.email,
        phone: s.phone,
        address: s.address
    }).collect())
}

// Errors shared by supplier insert / update / delete
#[derive(Error)]
pub enum SupplierWriteError{
    #[error("Failed due to threadpool error")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("Failed to run query on suppliers table")]
    RunQueryError(#[from] diesel::result::Error),
    #[error("supplier_id: {0} doesn't exist")]
    NoSupplierIdError(Uuid)
}

impl Debug for SupplierWriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        write_error_chain(f, &self.source())
    }
}

#[tracing::instrument(
    "Insert a supplier to db",
    skip_all
)]
pub async fn insert_supplier(
    mut conn: DbConnection,
    supplier: Supplier
) -> Result<(), SupplierWriteError> {
    spawn_blocking_with_tracing(move || {
        diesel::insert_into(suppliers::table)
            .values(supplier)
            .execute(&mut conn)
    })
    .await??;

    Ok(())
}

#[derive(Debug)]
pub struct SupplierChanges{
    pub name: String,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>
}

#[tracing::instrument(
    "Updating supplier row",
    skip(conn, changes)
)]
pub async fn update_supplier(
    mut conn: DbConnection,
    supplier_id: Uuid,
    changes: SupplierChanges
) -> Result<(), SupplierWriteError> {
    spawn_blocking_with_tracing(move || {
        let affected_rows = diesel::update(suppliers::table)
            .filter(suppliers::supplier_id.eq(supplier_id))
            .set((
                suppliers::name.eq(changes.name),
                suppliers::contact_person.eq(changes.contact_person),
                suppliers::email.eq(changes.email),
                suppliers::phone.eq(changes.phone),
                suppliers::address.eq(changes.address)
            ))
            .execute(&mut conn)?;

        if affected_rows == 0 {
            return Err(SupplierWriteError::NoSupplierIdError(supplier_id))
        }

        Ok(())
    })
    .await??;

    Ok(())
}

#[tracing::instrument(
    "Deleting supplier by id",
    skip(conn)
)]
pub async fn delete_supplier(
    mut conn: DbConnection,
    supplier_id: Uuid
) -> Result<(), SupplierWriteError> {
    spawn_blocking_with_tracing(move || {
        let affected_rows = diesel::delete(suppliers::table)
            .filter(suppliers::supplier_id.eq(supplier_id))
            .execute(&mut conn)?;

        if affected_rows == 0 {
            return Err(SupplierWriteError::NoSupplierIdError(supplier_id))
        }

        Ok(())
    })
    .await??;

    Ok(())
}
