use chrono::{DateTime, Utc};
use diesel::prelude::{Insertable, Queryable};
use uuid::Uuid;

use crate::schema::{categories, order_items, orders, products, suppliers, users};

#[derive(Queryable, Insertable, Clone)]
#[diesel(table_name = users)]
pub struct User{
    pub user_id: Uuid,
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub phone_number: Option<String>,
    pub role: String,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>
}

#[derive(Queryable, Insertable, Clone)]
#[diesel(table_name = categories)]
pub struct Category{
    pub category_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>
}

#[derive(Queryable, Insertable, Clone)]
#[diesel(table_name = suppliers)]
pub struct Supplier{
    pub supplier_id: Uuid,
    pub name: String,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>
}

#[derive(Queryable, Insertable, Clone)]
#[diesel(table_name = products)]
pub struct Product{
    pub product_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
    pub supplier_id: Option<Uuid>,
    pub price: f64,
    pub quantity: i32,
    pub reorder_level: i32,
    pub created_at: DateTime<Utc>
}

#[derive(Queryable, Insertable, Clone)]
#[diesel(table_name = orders)]
pub struct Order{
    pub order_id: Uuid,
    pub customer_id: Uuid,
    pub order_date: DateTime<Utc>,
    pub status: String,
    pub total_amount: f64,
    pub shipping_address: Option<String>
}

#[derive(Queryable, Insertable, Clone)]
#[diesel(table_name = order_items)]
pub struct OrderItemModel{
    pub order_item_id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    // Unit price at time of purchase, kept independent of later product edits
    pub price: f64
}
