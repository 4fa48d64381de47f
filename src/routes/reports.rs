use actix_web::{error::ErrorInternalServerError, web, HttpResponse};

use crate::{auth::extractors::{IsAdmin, IsStaff}, db_interaction, utils::{get_pooled_connection, DbPool}};

#[tracing::instrument(
    "Getting staff overview",
    skip(pool)
)]
pub async fn get_overview(
    pool: web::Data<DbPool>,
    _: IsStaff
) -> Result<HttpResponse, actix_web::Error> {
    let conn = get_pooled_connection(&pool)
        .await
        .map_err(ErrorInternalServerError)?;

    let overview = db_interaction::get_staff_overview(conn)
        .await
        .map_err(ErrorInternalServerError)?;

    Ok(HttpResponse::Ok().json(overview))
}

#[tracing::instrument(
    "Getting admin dashboard stats",
    skip(pool)
)]
pub async fn get_stats(
    pool: web::Data<DbPool>,
    _: IsAdmin
) -> Result<HttpResponse, actix_web::Error> {
    let conn = get_pooled_connection(&pool)
        .await
        .map_err(ErrorInternalServerError)?;

    let stats = db_interaction::get_admin_stats(conn)
        .await
        .map_err(ErrorInternalServerError)?;

    Ok(HttpResponse::Ok().json(stats))
}

#[tracing::instrument(
    "Getting sales report",
    skip(pool)
)]
pub async fn get_sales_report(
    pool: web::Data<DbPool>,
    _: IsAdmin
) -> Result<HttpResponse, actix_web::Error> {
    let conn = get_pooled_connection(&pool)
        .await
        .map_err(ErrorInternalServerError)?;

    let report = db_interaction::get_sales_report(conn)
        .await
        .map_err(ErrorInternalServerError)?;

    Ok(HttpResponse::Ok().json(report))
}

#[tracing::instrument(
    "Getting inventory report",
    skip(pool)
)]
pub async fn get_inventory_report(
    pool: web::Data<DbPool>,
    _: IsAdmin
) -> Result<HttpResponse, actix_web::Error> {
    let conn = get_pooled_connection(&pool)
        .await
        .map_err(ErrorInternalServerError)?;

    let report = db_interaction::get_inventory_report(conn)
        .await
        .map_err(ErrorInternalServerError)?;

    Ok(HttpResponse::Ok().json(report))
}

#[tracing::instrument(
    "Getting customer report",
    skip(pool)
)]
pub async fn get_customer_report(
    pool: web::Data<DbPool>,
    _: IsAdmin
) -> Result<HttpResponse, actix_web::Error> {
    let conn = get_pooled_connection(&pool)
        .await
        .map_err(ErrorInternalServerError)?;

    let report = db_interaction::get_customer_report(conn)
        .await
        .map_err(ErrorInternalServerError)?;

    Ok(HttpResponse::Ok().json(report))
}
