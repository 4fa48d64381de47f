use actix_web::{error::{ErrorBadRequest, ErrorInternalServerError}, web, HttpResponse};
use serde::Deserialize;

use crate::{auth::{extractors::IsAdmin, jwt::UserRole}, db_interaction::list_users, utils::{get_pooled_connection, DbPool}};

#[derive(Deserialize, Debug)]
pub struct GetUsersQuery{
    pub role: Option<String>,
    pub approval: Option<Approval>
}

#[derive(Deserialize, Debug, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum Approval{
    Approved,
    Pending
}

#[tracing::instrument(
    "Listing users for admin",
    skip(pool)
)]
pub async fn get_users(
    pool: web::Data<DbPool>,
    query: web::Query<GetUsersQuery>,
    _: IsAdmin
) -> Result<HttpResponse, actix_web::Error> {
    let role_filter = match &query.role {
        Some(role) => Some(UserRole::parse(role).map_err(ErrorBadRequest)?),
        None => None
    };

    let approval_filter = query.approval.map(|a| matches!(a, Approval::Approved));

    let conn = get_pooled_connection(&pool)
        .await
        .map_err(ErrorInternalServerError)?;

    let users = list_users(conn, role_filter, approval_filter)
        .await
        .map_err(ErrorInternalServerError)?;

    Ok(HttpResponse::Ok().json(users))
}
