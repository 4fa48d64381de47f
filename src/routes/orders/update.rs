use actix_web::{error::{ErrorConflict, ErrorInternalServerError, ErrorNotFound}, web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::{auth::extractors::IsStaff, db_interaction::{update_order_status, OrderStatus, UpdateOrderStatusError}, utils::{get_pooled_connection, DbPool}};

#[derive(Deserialize, Debug)]
pub struct UpdateOrderStatusForm{
    pub order_id: Uuid,
    pub status: OrderStatus
}

#[tracing::instrument(
    "Updating order status",
    skip(pool)
)]
pub async fn update_order(
    pool: web::Data<DbPool>,
    form: web::Form<UpdateOrderStatusForm>,
    _: IsStaff
) -> Result<HttpResponse, actix_web::Error>{
    let conn = get_pooled_connection(&pool)
        .await
        .map_err(ErrorInternalServerError)?;

    update_order_status(conn, form.status, form.order_id)
        .await
        .map_err(|e| {
            match e {
                UpdateOrderStatusError::NoOrderIdError(_) => ErrorNotFound(e),
                UpdateOrderStatusError::InvalidTransitionError{..} => ErrorConflict(e),
                _ => ErrorInternalServerError(e)
            }
        })?;

    Ok(HttpResponse::Ok().finish())
}
