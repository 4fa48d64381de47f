use std::{error::Error, fmt::Debug};

use chrono::Utc;
use anyhow::Context;
use diesel::{Connection, ExpressionMethods, JoinOnDsl, OptionalExtension, QueryDsl, RunQueryDsl};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::{auth::jwt::UserRole, models::{Order, OrderItemModel}, schema::{order_items, orders, products}, telemetry::spawn_blocking_with_tracing, utils::{write_error_chain, DbConnection}};

// Single status vocabulary shared by every screen. The processing state is
// what the staff screen calls "approved"; a rejected order is cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus{
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled
}

impl OrderStatus{
    pub fn parse(value: &str) -> Result<OrderStatus, String>{
        match value {
            "pending" => Ok(OrderStatus::Pending),
            "processing" => Ok(OrderStatus::Processing),
            "shipped" => Ok(OrderStatus::Shipped),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(format!("{} is not a valid order status", other))
        }
    }

    pub fn as_str(&self) -> &'static str{
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled"
        }
    }

    // pending -> processing -> shipped -> delivered, with cancellation
    // possible until the order ships
    pub fn can_transition_to(&self, next: OrderStatus) -> bool{
        matches!(
            (self, next),
            (OrderStatus::Pending, OrderStatus::Processing)
                | (OrderStatus::Pending, OrderStatus::Cancelled)
                | (OrderStatus::Processing, OrderStatus::Shipped)
                | (OrderStatus::Processing, OrderStatus::Cancelled)
                | (OrderStatus::Shipped, OrderStatus::Delivered)
        )
    }
}

// Error associated with placing an order and decrementing product stock
#[derive(Error)]
pub enum PlaceOrderError{
    #[error("Tokio threadpool error occured")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("Failed to run query")]
    RunQueryError(#[from] diesel::result::Error),
    #[error("product_id: {0} doesn't exist")]
    UnknownProductError(Uuid),
    #[error("product_id: {0} doesn't have enough stock")]
    InsufficientStockError(Uuid)
}

impl Debug for PlaceOrderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        write_error_chain(f, &self.source())
    }
}

#[derive(Serialize)]
pub struct PlacedOrder{
    pub order_id: Uuid,
    pub total_amount: f64
}

#[tracing::instrument(
    "Creating order and decrementing product stock",
    skip_all
)]
pub async fn place_order(
    mut conn: DbConnection,
    customer_id: Uuid,
    cart: Vec<(Uuid, i32)>,
    shipping_address: Option<String>
) -> Result<PlacedOrder, PlaceOrderError> {

    let placed = spawn_blocking_with_tracing(move || {
        conn.transaction::<PlacedOrder, PlaceOrderError, _>(|conn|{
            let mut total_amount = 0_f64;
            let mut priced_items = Vec::with_capacity(cart.len());

            for (product_id, amount) in cart.iter(){
                let unit_price: f64 = products::table
                    .select(products::price)
                    .filter(products::product_id.eq(*product_id))
                    .first::<f64>(conn)
                    .optional()?
                    .ok_or(PlaceOrderError::UnknownProductError(*product_id))?;

                // Guarded decrement; a miss means someone else got the stock
                // first and the whole order rolls back
                let affected_rows: usize = diesel::update(
                        products::table.filter(products::product_id.eq(*product_id))
                    )
                    .set(products::quantity.eq(products::quantity - *amount))
                    .filter(products::quantity.ge(*amount))
                    .execute(conn)?;

                if affected_rows == 0 {
                    return Err(PlaceOrderError::InsufficientStockError(*product_id))
                }

                total_amount += unit_price * f64::from(*amount);
                priced_items.push((*product_id, *amount, unit_price));
            }

            let order = Order{
                order_id: Uuid::new_v4(),
                customer_id,
                order_date: Utc::now(),
                status: OrderStatus::Pending.as_str().to_string(),
                total_amount,
                shipping_address
            };

            diesel::insert_into(orders::table)
                .values(&order)
                .execute(conn)?;

            for (product_id, amount, unit_price) in priced_items.iter(){
                let order_item = OrderItemModel{
                    order_item_id: Uuid::new_v4(),
                    order_id: order.order_id,
                    product_id: *product_id,
                    quantity: *amount,
                    price: *unit_price
                };

                diesel::insert_into(order_items::table)
                    .values(order_item)
                    .execute(conn)?;
            }

            Ok(PlacedOrder{
                order_id: order.order_id,
                total_amount
            })
        })
    })
    .await??;

    Ok(placed)
}

// Line item within OrderWithItems, with the product name joined in
#[derive(Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: Uuid,
    pub product_name: String,
    pub quantity: i32,
    pub price: f64
}

#[derive(Serialize, Deserialize)]
pub struct OrderWithItems {
    pub order_id: Uuid,
    pub customer_id: Uuid,
    pub order_date: String,
    pub status: OrderStatus,
    pub total_amount: f64,
    pub shipping_address: Option<String>,
    pub items: Vec<OrderLine>,
}

#[tracing::instrument(
    "Getting orders along with associated order_items",
    skip_all
)]
pub async fn get_orders_with_items(
    mut conn: DbConnection,
    page: i64,
    limit: i64,
    viewer_id: Uuid,
    viewer_role: UserRole,
    status_filter: Option<OrderStatus>
) -> Result<Vec<OrderWithItems>, anyhow::Error> {

    let res = spawn_blocking_with_tracing(move || {
        conn.transaction::<Vec<OrderWithItems>, anyhow::Error, _>(|conn|{
            let order_rows = get_order_rows(conn, viewer_id, viewer_role, status_filter, page, limit)?;
            let mut ret: Vec<OrderWithItems> = Vec::new();

            for order in order_rows{
                let items = get_order_lines(conn, order.order_id)?;
                let status = OrderStatus::parse(&order.status)
                    .map_err(|e| anyhow::anyhow!(e))?;

                ret.push(OrderWithItems{
                    order_id: order.order_id,
                    customer_id: order.customer_id,
                    order_date: order.order_date.to_rfc3339(),
                    status,
                    total_amount: order.total_amount,
                    shipping_address: order.shipping_address,
                    items
                });
            }

            Ok(ret)
        })
    })
    .await
    .context("Failed due to threadpool error")??;

    Ok(res)
}

#[tracing::instrument(
    "Getting order rows for viewer",
    skip_all
)]
fn get_order_rows(
    conn: &mut DbConnection,
    viewer_id: Uuid,
    viewer_role: UserRole,
    status_filter: Option<OrderStatus>,
    page: i64,
    limit: i64
) -> Result<Vec<Order>, anyhow::Error>{
    let mut query = orders::table
        .into_boxed();

    // Customers only ever see their own orders
    if viewer_role == UserRole::Customer {
        query = query.filter(orders::customer_id.eq(viewer_id));
    }

    if let Some(status) = status_filter{
        query = query.filter(orders::status.eq(status.as_str()));
    }

    let offset_value = (page - 1) * limit;

    let result = query
        .order(orders::order_date.desc())
        .limit(limit)
        .offset(offset_value)
        .load::<Order>(conn)
        .context("Failed to load orders")?;

    Ok(result)
}

#[tracing::instrument(
    "Getting joined order_items for order",
    skip_all
)]
fn get_order_lines(conn: &mut DbConnection, target_order_id: Uuid) -> Result<Vec<OrderLine>, anyhow::Error> {
    let rows: Vec<(Uuid, String, i32, f64)> = order_items::table
        .inner_join(products::table.on(products::product_id.eq(order_items::product_id)))
        .filter(order_items::order_id.eq(target_order_id))
        .select((
            order_items::product_id,
            products::name,
            order_items::quantity,
            order_items::price,
        ))
        .load(conn)
        .context("Failed to get order items by order_id")?;

    Ok(rows.into_iter().map(|(product_id, product_name, quantity, price)| OrderLine{
        product_id,
        product_name,
        quantity,
        price
    }).collect())
}

// Error associated with updating order status
#[derive(Error)]
pub enum UpdateOrderStatusError{
    #[error("Tokio threadpool error occured")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("Failed to run query")]
    RunQueryError(#[from] diesel::result::Error),
    #[error("order_id: {0} doesn't exist")]
    NoOrderIdError(Uuid),
    #[error("order cannot move from {from} to {to}")]
    InvalidTransitionError{
        from: &'static str,
        to: &'static str
    },
    #[error("stored order status is not recognised: {0}")]
    CorruptStatusError(String)
}

impl Debug for UpdateOrderStatusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        write_error_chain(f, &self.source())
    }
}

#[tracing::instrument(
    "Updating order status with transition check",
    skip_all
)]
pub async fn update_order_status(
    mut conn: DbConnection,
    status: OrderStatus,
    order_id: Uuid
) -> Result<(), UpdateOrderStatusError> {

    let res = spawn_blocking_with_tracing(move || {
        conn.transaction::<(), UpdateOrderStatusError, _>(|conn| {
            let current: Option<String> = orders::table
                .select(orders::status)
                .filter(orders::order_id.eq(order_id))
                .for_update()
                .first::<String>(conn)
                .optional()?;

            let current = match current {
                Some(s) => s,
                None => return Err(UpdateOrderStatusError::NoOrderIdError(order_id))
            };

            let current = OrderStatus::parse(&current)
                .map_err(UpdateOrderStatusError::CorruptStatusError)?;

            if !current.can_transition_to(status){
                return Err(UpdateOrderStatusError::InvalidTransitionError{
                    from: current.as_str(),
                    to: status.as_str()
                })
            }

            diesel::update(orders::table)
                .filter(orders::order_id.eq(order_id))
                .set(orders::status.eq(status.as_str()))
                .execute(conn)?;

            Ok(())
        })
    })
    .await??;

    Ok(res)
}
