use actix_web::{error::{ErrorInternalServerError, ErrorNotFound}, web, HttpResponse};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::{auth::extractors::{IsAdmin, IsStaff}, db_interaction::{self, SupplierChanges, SupplierWriteError}, models::Supplier, utils::{get_pooled_connection, DbPool}};

#[tracing::instrument(
    "Get supplier entries",
    skip(pool)
)]
pub async fn get_suppliers(
    pool: web::Data<DbPool>,
    _: IsStaff
) -> Result<HttpResponse, actix_web::Error> {
    let conn = get_pooled_connection(&pool)
        .await
        .map_err(ErrorInternalServerError)?;

    let suppliers = db_interaction::get_suppliers(conn)
        .await
        .map_err(ErrorInternalServerError)?;

    Ok(HttpResponse::Ok().json(suppliers))
}

#[derive(Deserialize, Debug)]
pub struct SupplierForm{
    pub name: String,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>
}

#[tracing::instrument(
    "Adding supplier",
    skip(pool)
)]
pub async fn post_supplier(
    pool: web::Data<DbPool>,
    form: web::Form<SupplierForm>,
    _: IsAdmin
) -> Result<HttpResponse, actix_web::Error>{
    let conn = get_pooled_connection(&pool)
        .await
        .map_err(ErrorInternalServerError)?;

    let form = form.0;
    let supplier = Supplier{
        supplier_id: Uuid::new_v4(),
        name: form.name,
        contact_person: form.contact_person,
        email: form.email,
        phone: form.phone,
        address: form.address,
        created_at: Utc::now()
    };

    let supplier_id = supplier.supplier_id;

    db_interaction::insert_supplier(conn, supplier)
        .await
        .map_err(ErrorInternalServerError)?;

    Ok(HttpResponse::Ok().json(supplier_id))
}

#[derive(Deserialize, Debug)]
pub struct UpdateSupplierForm{
    pub supplier_id: Uuid,
    pub name: String,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>
}

#[tracing::instrument(
    "Updating supplier",
    skip(pool, form)
)]
pub async fn put_supplier(
    pool: web::Data<DbPool>,
    form: web::Form<UpdateSupplierForm>,
    _: IsAdmin
) -> Result<HttpResponse, actix_web::Error>{
    let conn = get_pooled_connection(&pool)
        .await
        .map_err(ErrorInternalServerError)?;

    let form = form.0;
    let changes = SupplierChanges{
        name: form.name,
        contact_person: form.contact_person,
        email: form.email,
        phone: form.phone,
        address: form.address
    };

    db_interaction::update_supplier(conn, form.supplier_id, changes)
        .await
        .map_err(|e| {
            match e {
                SupplierWriteError::NoSupplierIdError(_) => ErrorNotFound(e),
                _ => ErrorInternalServerError(e)
            }
        })?;

    Ok(HttpResponse::Ok().finish())
}

#[derive(Deserialize, Debug)]
pub struct DeleteSupplierJson{
    pub supplier_id: Uuid
}

#[tracing::instrument(
    "Deleting supplier by id",
    skip(pool)
)]
pub async fn delete_supplier_entry(
    pool: web::Data<DbPool>,
    json: web::Json<DeleteSupplierJson>,
    _: IsAdmin
) -> Result<HttpResponse, actix_web::Error>{
    let conn = get_pooled_connection(&pool)
        .await
        .map_err(ErrorInternalServerError)?;

    db_interaction::delete_supplier(conn, json.supplier_id)
        .await
        .map_err(|e| {
            match e {
                SupplierWriteError::NoSupplierIdError(_) => ErrorNotFound(e),
                _ => ErrorInternalServerError(e)
            }
        })?;

    Ok(HttpResponse::Ok().finish())
}
