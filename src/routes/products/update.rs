use actix_web::{error::{ErrorInternalServerError, ErrorNotFound}, web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::{auth::extractors::IsStaff, db_interaction::{update_product, ProductChanges, ProductWriteError}, utils::{get_pooled_connection, DbPool}};

#[derive(Deserialize, Debug)]
pub struct UpdateProductForm{
    pub product_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
    pub supplier_id: Option<Uuid>,
    pub price: f64,
    pub quantity: i32,
    pub reorder_level: i32
}

#[tracing::instrument(
    "Updating product",
    skip(pool, form)
)]
pub async fn put_product(
    pool: web::Data<DbPool>,
    form: web::Form<UpdateProductForm>,
    _: IsStaff
) -> Result<HttpResponse, actix_web::Error>{
    let conn = get_pooled_connection(&pool)
        .await
        .map_err(ErrorInternalServerError)?;

    let form = form.0;
    let changes = ProductChanges{
        name: form.name,
        description: form.description,
        category_id: form.category_id,
        supplier_id: form.supplier_id,
        price: form.price,
        quantity: form.quantity,
        reorder_level: form.reorder_level
    };

    update_product(conn, form.product_id, changes)
        .await
        .map_err(|e| {
            match e {
                ProductWriteError::NoProductIdError(_) => ErrorNotFound(e),
                _ => ErrorInternalServerError(e)
            }
        })?;

    Ok(HttpResponse::Ok().finish())
}
