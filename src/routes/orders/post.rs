use actix_web::{error::{ErrorBadRequest, ErrorConflict, ErrorInternalServerError}, web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::{auth::extractors::AuthenticatedUser, db_interaction::{place_order, PlaceOrderError}, utils::{get_pooled_connection, DbPool}};

#[derive(Deserialize, Debug)]
pub struct CartItem{
    pub product_id: Uuid,
    pub quantity: i32
}

#[derive(Deserialize, Debug)]
pub struct PlaceOrderRequest{
    pub items: Vec<CartItem>,
    pub shipping_address: Option<String>
}

#[tracing::instrument(
    "Placing order from cart",
    skip(pool, user)
)]
pub async fn post_order(
    pool: web::Data<DbPool>,
    request: web::Json<PlaceOrderRequest>,
    user: AuthenticatedUser
) -> Result<HttpResponse, actix_web::Error> {
    let customer_id = user.0;
    let request = request.0;

    if request.items.is_empty(){
        return Err(ErrorBadRequest("Cart is empty"))
    }

    if request.items.iter().any(|item| item.quantity < 1){
        return Err(ErrorBadRequest("Quantity must be at least 1"))
    }

    let cart: Vec<(Uuid, i32)> = request.items.iter()
        .map(|item| (item.product_id, item.quantity))
        .collect();

    let conn = get_pooled_connection(&pool)
        .await
        .map_err(ErrorInternalServerError)?;

    let placed = place_order(conn, customer_id, cart, request.shipping_address)
        .await
        .map_err(|e| {
            match e {
                PlaceOrderError::UnknownProductError(_) => ErrorBadRequest(e),
                PlaceOrderError::InsufficientStockError(_) => ErrorConflict(e),
                _ => ErrorInternalServerError(e)
            }
        })?;

    Ok(HttpResponse::Ok().json(placed))
}
