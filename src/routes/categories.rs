use actix_web::{error::ErrorInternalServerError, web, HttpResponse};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::{auth::extractors::{AuthenticatedUser, IsAdmin}, db_interaction, models::Category, utils::{get_pooled_connection, DbPool}};

#[tracing::instrument(
    "Get category entries",
    skip(pool, _user)
)]
pub async fn get_categories(
    pool: web::Data<DbPool>,
    _user: AuthenticatedUser
) -> Result<HttpResponse, actix_web::Error> {
    let conn = get_pooled_connection(&pool)
        .await
        .map_err(ErrorInternalServerError)?;

    let categories = db_interaction::get_categories(conn)
        .await
        .map_err(ErrorInternalServerError)?;

    Ok(HttpResponse::Ok().json(categories))
}

#[derive(Deserialize, Debug)]
pub struct CategoryForm{
    pub name: String,
    pub description: Option<String>
}

#[tracing::instrument(
    "Adding category",
    skip(pool)
)]
pub async fn post_category(
    pool: web::Data<DbPool>,
    form: web::Form<CategoryForm>,
    _: IsAdmin
) -> Result<HttpResponse, actix_web::Error>{
    let conn = get_pooled_connection(&pool)
        .await
        .map_err(ErrorInternalServerError)?;

    let category = Category{
        category_id: Uuid::new_v4(),
        name: form.0.name,
        description: form.0.description,
        created_at: Utc::now()
    };

    let category_id = category.category_id;

    db_interaction::insert_category(conn, category)
        .await
        .map_err(ErrorInternalServerError)?;

    Ok(HttpResponse::Ok().json(category_id))
}
