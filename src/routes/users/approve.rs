use actix_web::{error::{ErrorBadRequest, ErrorInternalServerError, ErrorNotFound}, web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::{auth::extractors::IsAdmin, db_interaction::{approve_staff, ApproveStaffError}, utils::{get_pooled_connection, DbPool}};

#[derive(Deserialize, Debug)]
pub struct ApproveStaffForm{
    pub user_id: Uuid
}

#[tracing::instrument(
    "Approving staff account",
    skip(pool)
)]
pub async fn approve_staff_account(
    pool: web::Data<DbPool>,
    form: web::Form<ApproveStaffForm>,
    _: IsAdmin
) -> Result<HttpResponse, actix_web::Error>{
    let conn = get_pooled_connection(&pool)
        .await
        .map_err(ErrorInternalServerError)?;

    approve_staff(conn, form.user_id)
        .await
        .map_err(|e| {
            match e {
                ApproveStaffError::NoUserIdError(_) => ErrorNotFound(e),
                ApproveStaffError::NotStaffError(_) => ErrorBadRequest(e),
                _ => ErrorInternalServerError(e)
            }
        })?;

    Ok(HttpResponse::Ok().finish())
}
