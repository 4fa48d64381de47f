use std::{error::Error, fmt::Debug};

use actix_web::{web, HttpResponse, ResponseError};
use anyhow::Context;
use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::{auth::extractors::IsStaff, db_interaction::{insert_product, ProductInsertError}, models::Product, utils::{write_error_chain, get_pooled_connection, DbPool}};

#[derive(Deserialize, Debug)]
pub struct ProductForm{
    pub name: String,
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
    pub supplier_id: Option<Uuid>,
    pub price: f64,
    pub quantity: i32,
    pub reorder_level: i32
}

#[derive(Error)]
pub enum PostProductError{
    #[error("Failed to insert product")]
    InsertProductError(#[from] ProductInsertError),
    #[error("Failed due to internal server error")]
    UnexpectedError(#[from] anyhow::Error)
}

impl Debug for PostProductError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        write_error_chain(f, &self.source())
    }
}

impl ResponseError for PostProductError {
    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        HttpResponse::InternalServerError().body(format!("{}", self))
    }
}

#[tracing::instrument(
    "Adding product to catalog",
    skip(pool)
)]
pub async fn post_product(
    pool: web::Data<DbPool>,
    form: web::Form<ProductForm>,
    _: IsStaff
) -> Result<HttpResponse, PostProductError>{

    let form = form.0;
    let product = Product{
        product_id: Uuid::new_v4(),
        name: form.name,
        description: form.description,
        category_id: form.category_id,
        supplier_id: form.supplier_id,
        price: form.price,
        quantity: form.quantity,
        reorder_level: form.reorder_level,
        created_at: Utc::now()
    };

    let product_id = product.product_id;

    let conn = get_pooled_connection(&pool)
                .await
                .context("Failed to get connection from pool from within spawned task")?;

    insert_product(conn, product).await?;

    Ok(HttpResponse::Ok().json(product_id))
}
