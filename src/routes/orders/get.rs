use actix_web::{error::ErrorInternalServerError, web, HttpResponse};
use serde::Deserialize;

use crate::auth::extractors::AuthenticatedUser;
use crate::db_interaction::{get_orders_with_items, OrderStatus};
use crate::utils::{get_pooled_connection, DbPool};

#[derive(Deserialize, Debug)]
pub struct GetOrdersQuery{
    pub page: i64,
    pub limit: i64,
    pub status: Option<OrderStatus>
}

#[tracing::instrument(
    "Getting list of orders",
    skip(pool, user)
)]
pub async fn get_orders(
    pool: web::Data<DbPool>,
    query: web::Query<GetOrdersQuery>,
    user: AuthenticatedUser
) -> Result<HttpResponse, actix_web::Error> {
    let conn = get_pooled_connection(&pool)
        .await
        .map_err(ErrorInternalServerError)?;

    let orders = get_orders_with_items(
        conn,
        query.0.page,
        query.0.limit,
        user.0,
        user.1,
        query.0.status
    )
    .await
    .map_err(ErrorInternalServerError)?;

    Ok(HttpResponse::Ok().json(orders))
}
