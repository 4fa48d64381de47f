use std::{error::Error, fmt::Debug};

use anyhow::Context;
use diesel::{BoolExpressionMethods, ExpressionMethods, NullableExpressionMethods, PgTextExpressionMethods, QueryDsl, RunQueryDsl};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::{models::Product, schema::{categories, products, suppliers}, telemetry::spawn_blocking_with_tracing, utils::{write_error_chain, DbConnection}};

// Product row joined with its category name, as shown on the browse screens
#[derive(Serialize)]
pub struct ProductWithCategory{
    pub product_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
    pub supplier_id: Option<Uuid>,
    pub price: f64,
    pub quantity: i32,
    pub reorder_level: i32,
    pub category_name: Option<String>
}

#[derive(Debug, Default)]
pub struct ProductFilters{
    pub search: Option<String>,
    pub category_id: Option<Uuid>,
    pub in_stock_only: bool,
    pub page: i64,
    pub limit: i64
}

#[tracing::instrument(
    "Getting products from db",
    skip(conn)
)]
pub async fn get_products(
    mut conn: DbConnection,
    filters: ProductFilters
) -> Result<Vec<ProductWithCategory>, anyhow::Error>{
    let offset_value = (filters.page - 1) * filters.limit;

    let rows: Vec<(Product, Option<String>)> = spawn_blocking_with_tracing(move || {
        let mut query = products::table
            .left_join(categories::table)
            .into_boxed();

        // Case-insensitive match over both name and description
        if let Some(term) = filters.search{
            let pattern = format!("%{}%", term);
            query = query.filter(
                products::name.ilike(pattern.clone()).nullable()
                    .or(products::description.ilike(pattern))
            );
        }

        if let Some(category_id) = filters.category_id{
            query = query.filter(products::category_id.eq(category_id));
        }

        if filters.in_stock_only{
            query = query.filter(products::quantity.gt(0));
        }

        query
            .select((products::all_columns, categories::name.nullable()))
            .order(products::name.asc())
            .limit(filters.limit)
            .offset(offset_value)
            .load::<(Product, Option<String>)>(&mut conn)
            .context("Failed to get products")
    })
    .await
    .context("Failed due to threadpool error")??;

    Ok(rows.into_iter().map(into_product_with_category).collect())
}

fn into_product_with_category((product, category_name): (Product, Option<String>)) -> ProductWithCategory{
    ProductWithCategory{
        product_id: product.product_id,
        name: product.name,
        description: product.description,
        category_id: product.category_id,
        supplier_id: product.supplier_id,
        price: product.price,
        quantity: product.quantity,
        reorder_level: product.reorder_level,
        category_name
    }
}

#[derive(Error)]
pub enum ProductInsertError{
    #[error("Failed due to threadpool error")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("Failed to insert into products table")]
    InsertError(#[from] diesel::result::Error)
}

impl Debug for ProductInsertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        write_error_chain(f, &self.source())
    }
}

#[tracing::instrument(
    "Insert a product to db",
    skip_all
)]
pub async fn insert_product(
    mut conn: DbConnection,
    product: Product
) -> Result<(), ProductInsertError> {
    spawn_blocking_with_tracing(move || {
        diesel::insert_into(products::table)
            .values(product)
            .execute(&mut conn)
    })
    .await??;

    Ok(())
}

// Errors shared by product update / delete
#[derive(Error)]
pub enum ProductWriteError{
    #[error("Failed due to threadpool error")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("Failed to run query on products table")]
    RunQueryError(#[from] diesel::result::Error),
    #[error("product_id: {0} doesn't exist")]
    NoProductIdError(Uuid)
}

impl Debug for ProductWriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        write_error_chain(f, &self.source())
    }
}

#[derive(Debug)]
pub struct ProductChanges{
    pub name: String,
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
    pub supplier_id: Option<Uuid>,
    pub price: f64,
    pub quantity: i32,
    pub reorder_level: i32
}

#[tracing::instrument(
    "Updating product row",
    skip(conn, changes)
)]
pub async fn update_product(
    mut conn: DbConnection,
    product_id: Uuid,
    changes: ProductChanges
) -> Result<(), ProductWriteError> {
    spawn_blocking_with_tracing(move || {
        let affected_rows = diesel::update(products::table)
            .filter(products::product_id.eq(product_id))
            .set((
                products::name.eq(changes.name),
                products::description.eq(changes.description),
                products::category_id.eq(changes.category_id),
                products::supplier_id.eq(changes.supplier_id),
                products::price.eq(changes.price),
                products::quantity.eq(changes.quantity),
                products::reorder_level.eq(changes.reorder_level)
            ))
            .execute(&mut conn)?;

        if affected_rows == 0 {
            return Err(ProductWriteError::NoProductIdError(product_id))
        }

        Ok(())
    })
    .await??;

    Ok(())
}

#[tracing::instrument(
    "Deleting product by id",
    skip(conn)
)]
pub async fn delete_product(
    mut conn: DbConnection,
    product_id: Uuid
) -> Result<(), ProductWriteError> {
    spawn_blocking_with_tracing(move || {
        let affected_rows = diesel::delete(products::table)
            .filter(products::product_id.eq(product_id))
            .execute(&mut conn)?;

        if affected_rows == 0 {
            return Err(ProductWriteError::NoProductIdError(product_id))
        }

        Ok(())
    })
    .await??;

    Ok(())
}

// Low-stock row for the staff alerts screen
#[derive(Serialize)]
pub struct LowStockProduct{
    pub product_id: Uuid,
    pub name: String,
    pub quantity: i32,
    pub reorder_level: i32,
    pub category_name: Option<String>,
    pub supplier_name: Option<String>
}

#[tracing::instrument(
    "Getting products at or below their reorder level",
    skip_all
)]
pub async fn get_low_stock_products(
    mut conn: DbConnection
) -> Result<Vec<LowStockProduct>, anyhow::Error>{
    let rows: Vec<(Uuid, String, i32, i32, Option<String>, Option<String>)> = spawn_blocking_with_tracing(move || {
        products::table
            .left_join(categories::table)
            .left_join(suppliers::table)
            .filter(products::quantity.le(products::reorder_level))
            .select((
                products::product_id,
                products::name,
                products::quantity,
                products::reorder_level,
                categories::name.nullable(),
                suppliers::name.nullable()
            ))
            .order(products::quantity.asc())
            .load(&mut conn)
            .context("Failed to get low stock products")
    })
    .await
    .context("Failed due to threadpool error")??;

    Ok(rows.into_iter().map(|(product_id, name, quantity, reorder_level, category_name, supplier_name)| {
        LowStockProduct{
            product_id,
            name,
            quantity,
            reorder_level,
            category_name,
            supplier_name
        }
    }).collect())
}
