use actix_web::{error::ErrorInternalServerError, web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::{auth::extractors::{AuthenticatedUser, IsStaff}, db_interaction::{self, ProductFilters}, utils::{get_pooled_connection, DbPool}};

#[derive(Deserialize, Debug)]
pub struct GetProductsQuery {
    pub page: i64,
    pub limit: i64,
    pub search: Option<String>,
    pub category_id: Option<Uuid>,
    #[serde(default)]
    pub in_stock_only: bool
}

#[tracing::instrument(
    "Get product entries",
    skip(pool, _user)
)]
pub async fn get_products(
    pool: web::Data<DbPool>,
    query: web::Query<GetProductsQuery>,
    _user: AuthenticatedUser
) -> Result<HttpResponse, actix_web::Error> {
    let conn = get_pooled_connection(&pool)
        .await
        .map_err(ErrorInternalServerError)?;

    let filters = ProductFilters{
        search: query.0.search,
        category_id: query.0.category_id,
        in_stock_only: query.0.in_stock_only,
        page: query.0.page,
        limit: query.0.limit
    };

    let products = db_interaction::get_products(conn, filters)
        .await
        .map_err(ErrorInternalServerError)?;

    Ok(HttpResponse::Ok().json(products))
}

#[tracing::instrument(
    "Get low stock products",
    skip(pool)
)]
pub async fn get_low_stock_products(
    pool: web::Data<DbPool>,
    _: IsStaff
) -> Result<HttpResponse, actix_web::Error> {
    let conn = get_pooled_connection(&pool)
        .await
        .map_err(ErrorInternalServerError)?;

    let products = db_interaction::get_low_stock_products(conn)
        .await
        .map_err(ErrorInternalServerError)?;

    Ok(HttpResponse::Ok().json(products))
}
