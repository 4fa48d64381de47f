use anyhow::Context;
use diesel::{dsl::{count_star, sum}, ExpressionMethods, QueryDsl, RunQueryDsl};
use diesel::sql_types::{BigInt, Double, Text};
use serde::Serialize;

use crate::{schema::{orders, products, users}, telemetry::spawn_blocking_with_tracing, utils::DbConnection};

// Stat cards on the admin landing screen
#[derive(Serialize)]
pub struct AdminStats{
    pub total_users: i64,
    pub pending_staff: i64,
    pub total_products: i64,
    pub total_orders: i64,
    pub total_revenue: f64
}

#[tracing::instrument(
    "Getting admin dashboard stats",
    skip_all
)]
pub async fn get_admin_stats(
    mut conn: DbConnection
) -> Result<AdminStats, anyhow::Error>{
    let res = spawn_blocking_with_tracing(move || -> Result<AdminStats, anyhow::Error> {
        let total_users: i64 = users::table.count().get_result(&mut conn)?;

        let pending_staff: i64 = users::table
            .filter(users::role.eq("staff"))
            .filter(users::is_approved.eq(false))
            .count()
            .get_result(&mut conn)?;

        let total_products: i64 = products::table.count().get_result(&mut conn)?;
        let total_orders: i64 = orders::table.count().get_result(&mut conn)?;

        let total_revenue: Option<f64> = orders::table
            .filter(orders::status.ne("cancelled"))
            .select(sum(orders::total_amount))
            .get_result(&mut conn)?;

        Ok(AdminStats{
            total_users,
            pending_staff,
            total_products,
            total_orders,
            total_revenue: total_revenue.unwrap_or(0.0)
        })
    })
    .await
    .context("Failed due to threadpool error")??;

    Ok(res)
}

// Stat cards on the staff landing screen
#[derive(Serialize)]
pub struct StaffOverview{
    pub pending_orders: i64,
    pub processing_orders: i64,
    pub total_products: i64,
    pub low_stock_count: i64
}

#[tracing::instrument(
    "Getting staff overview stats",
    skip_all
)]
pub async fn get_staff_overview(
    mut conn: DbConnection
) -> Result<StaffOverview, anyhow::Error>{
    let res = spawn_blocking_with_tracing(move || -> Result<StaffOverview, anyhow::Error> {
        let pending_orders: i64 = orders::table
            .filter(orders::status.eq("pending"))
            .count()
            .get_result(&mut conn)?;

        let processing_orders: i64 = orders::table
            .filter(orders::status.eq("processing"))
            .count()
            .get_result(&mut conn)?;

        let total_products: i64 = products::table.count().get_result(&mut conn)?;

        let low_stock_count: i64 = products::table
            .filter(products::quantity.le(products::reorder_level))
            .count()
            .get_result(&mut conn)?;

        Ok(StaffOverview{
            pending_orders,
            processing_orders,
            total_products,
            low_stock_count
        })
    })
    .await
    .context("Failed due to threadpool error")??;

    Ok(res)
}

#[derive(diesel::QueryableByName, Serialize)]
pub struct TopProduct{
    #[diesel(sql_type = Text)]
    pub name: String,
    #[diesel(sql_type = BigInt)]
    pub total_sold: i64,
    #[diesel(sql_type = Double)]
    pub revenue: f64
}

#[derive(Serialize)]
pub struct SalesReport{
    pub order_count: i64,
    pub total_revenue: f64,
    pub top_products: Vec<TopProduct>
}

#[tracing::instrument(
    "Building sales report",
    skip_all
)]
pub async fn get_sales_report(
    mut conn: DbConnection
) -> Result<SalesReport, anyhow::Error>{
    let res = spawn_blocking_with_tracing(move || -> Result<SalesReport, anyhow::Error> {
        let (order_count, total_revenue): (i64, Option<f64>) = orders::table
            .filter(orders::status.ne("cancelled"))
            .select((count_star(), sum(orders::total_amount)))
            .get_result(&mut conn)?;

        let top_products: Vec<TopProduct> = diesel::sql_query(
            "SELECT p.name, SUM(oi.quantity) AS total_sold, SUM(oi.quantity * oi.price) AS revenue \
             FROM order_items oi \
             JOIN products p ON oi.product_id = p.product_id \
             GROUP BY p.product_id \
             ORDER BY total_sold DESC \
             LIMIT 5"
        )
        .load(&mut conn)
        .context("Failed to load top products")?;

        Ok(SalesReport{
            order_count,
            total_revenue: total_revenue.unwrap_or(0.0),
            top_products
        })
    })
    .await
    .context("Failed due to threadpool error")??;

    Ok(res)
}

#[derive(Serialize)]
pub struct InventoryReport{
    pub total_products: i64,
    pub total_stock_units: i64,
    pub low_stock_count: i64
}

#[tracing::instrument(
    "Building inventory report",
    skip_all
)]
pub async fn get_inventory_report(
    mut conn: DbConnection
) -> Result<InventoryReport, anyhow::Error>{
    let res = spawn_blocking_with_tracing(move || -> Result<InventoryReport, anyhow::Error> {
        let total_products: i64 = products::table.count().get_result(&mut conn)?;

        let total_stock_units: Option<i64> = products::table
            .select(sum(products::quantity))
            .get_result(&mut conn)?;

        let low_stock_count: i64 = products::table
            .filter(products::quantity.le(products::reorder_level))
            .count()
            .get_result(&mut conn)?;

        Ok(InventoryReport{
            total_products,
            total_stock_units: total_stock_units.unwrap_or(0),
            low_stock_count
        })
    })
    .await
    .context("Failed due to threadpool error")??;

    Ok(res)
}

#[derive(diesel::QueryableByName, Serialize)]
pub struct TopCustomer{
    #[diesel(sql_type = Text)]
    pub full_name: String,
    #[diesel(sql_type = Text)]
    pub email: String,
    #[diesel(sql_type = BigInt)]
    pub order_count: i64,
    #[diesel(sql_type = Double)]
    pub total_spent: f64
}

#[derive(Serialize)]
pub struct CustomerReport{
    pub total_customers: i64,
    pub top_customers: Vec<TopCustomer>
}

#[tracing::instrument(
    "Building customer report",
    skip_all
)]
pub async fn get_customer_report(
    mut conn: DbConnection
) -> Result<CustomerReport, anyhow::Error>{
    let res = spawn_blocking_with_tracing(move || -> Result<CustomerReport, anyhow::Error> {
        let total_customers: i64 = users::table
            .filter(users::role.eq("customer"))
            .count()
            .get_result(&mut conn)?;

        let top_customers: Vec<TopCustomer> = diesel::sql_query(
            "SELECT u.full_name, u.email, COUNT(o.order_id) AS order_count, SUM(o.total_amount) AS total_spent \
             FROM users u \
             JOIN orders o ON u.user_id = o.customer_id \
             WHERE u.role = 'customer' AND o.status != 'cancelled' \
             GROUP BY u.user_id \
             ORDER BY total_spent DESC \
             LIMIT 5"
        )
        .load(&mut conn)
        .context("Failed to load top customers")?;

        Ok(CustomerReport{
            total_customers,
            top_customers
        })
    })
    .await
    .context("Failed due to threadpool error")??;

    Ok(res)
}
