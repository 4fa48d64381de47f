use actix_web::{error::{ErrorInternalServerError, ErrorNotFound}, web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::{auth::extractors::IsStaff, db_interaction::{delete_product, ProductWriteError}, utils::{get_pooled_connection, DbPool}};

#[derive(Deserialize, Debug)]
pub struct DeleteProductJson{
    pub product_id: Uuid
}

#[tracing::instrument(
    "Deleting product by id",
    skip(pool)
)]
pub async fn delete_product_entry(
    pool: web::Data<DbPool>,
    json: web::Json<DeleteProductJson>,
    _: IsStaff
) -> Result<HttpResponse, actix_web::Error>{
    let conn = get_pooled_connection(&pool)
        .await
        .map_err(ErrorInternalServerError)?;

    delete_product(conn, json.product_id)
        .await
        .map_err(|e| {
            match e {
                ProductWriteError::NoProductIdError(_) => ErrorNotFound(e),
                _ => ErrorInternalServerError(e)
            }
        })?;

    Ok(HttpResponse::Ok().finish())
}
