use actix_web::{error::{ErrorBadRequest, ErrorInternalServerError, ErrorNotFound}, web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::{auth::extractors::IsAdmin, db_interaction::{delete_user, DeleteUserError}, utils::{get_pooled_connection, DbPool}};

#[derive(Deserialize, Debug)]
pub struct DeleteUserJson{
    pub user_id: Uuid
}

#[tracing::instrument(
    "Deleting user by id",
    skip(pool)
)]
pub async fn delete_user_account(
    pool: web::Data<DbPool>,
    json: web::Json<DeleteUserJson>,
    _: IsAdmin
) -> Result<HttpResponse, actix_web::Error>{
    let conn = get_pooled_connection(&pool)
        .await
        .map_err(ErrorInternalServerError)?;

    delete_user(conn, json.user_id)
        .await
        .map_err(|e| {
            match e {
                DeleteUserError::NoUserIdError(_) => ErrorNotFound(e),
                DeleteUserError::AdminDeleteError => ErrorBadRequest(e),
                _ => ErrorInternalServerError(e)
            }
        })?;

    Ok(HttpResponse::Ok().finish())
}
