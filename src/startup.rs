use std::net::TcpListener;

use actix_web::{dev::Server, web, App, HttpServer};
use diesel::{r2d2::ConnectionManager, PgConnection};
use r2d2::Pool;
use tracing_actix_web::TracingLogger;

use crate::{auth::jwt::Tokenizer, configuration::Settings, routes::{authentication, categories, health_check, orders, products, reports, suppliers, users}, utils::DbPool};

pub struct Application{
    pub host: String,
    pub port: u16,
    pub server: Server
}

impl Application {
    pub async fn new(settings: Settings) -> Result<Self, anyhow::Error>{
        let pool = Pool::builder()
            .max_size(settings.database.pool_size)
            .build(ConnectionManager::<PgConnection>::new(
                settings.database.get_database_table_url()
            ))?;

        let tokenizer = Tokenizer::new(&settings.jwt);

        let listener = TcpListener::bind((
            settings.application.host.as_str(),
            settings.application.port
        ))?;
        let port = listener.local_addr()?.port();

        let server = run(listener, pool, tokenizer)?;

        Ok(Application{
            host: settings.application.host,
            port,
            server
        })
    }
}

fn run(
    listener: TcpListener,
    pool: DbPool,
    tokenizer: Tokenizer
) -> Result<Server, anyhow::Error>{
    let pool = web::Data::new(pool);
    let tokenizer = web::Data::new(tokenizer);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .route("/health", web::get().to(health_check))
            .route("/register", web::post().to(authentication::register))
            .route("/login", web::post().to(authentication::login))
            .route("/users", web::get().to(users::get_users))
            .route("/users", web::delete().to(users::delete_user_account))
            .route("/users/approve", web::post().to(users::approve_staff_account))
            .route("/products", web::get().to(products::get_products))
            .route("/products", web::post().to(products::post_product))
            .route("/products", web::put().to(products::put_product))
            .route("/products", web::delete().to(products::delete_product_entry))
            .route("/products/low-stock", web::get().to(products::get_low_stock_products))
            .route("/categories", web::get().to(categories::get_categories))
            .route("/categories", web::post().to(categories::post_category))
            .route("/suppliers", web::get().to(suppliers::get_suppliers))
            .route("/suppliers", web::post().to(suppliers::post_supplier))
            .route("/suppliers", web::put().to(suppliers::put_supplier))
            .route("/suppliers", web::delete().to(suppliers::delete_supplier_entry))
            .route("/orders", web::get().to(orders::get_orders))
            .route("/orders", web::post().to(orders::post_order))
            .route("/orders", web::put().to(orders::update_order))
            .route("/reports/overview", web::get().to(reports::get_overview))
            .route("/reports/stats", web::get().to(reports::get_stats))
            .route("/reports/sales", web::get().to(reports::get_sales_report))
            .route("/reports/inventory", web::get().to(reports::get_inventory_report))
            .route("/reports/customers", web::get().to(reports::get_customer_report))
            .app_data(pool.clone())
            .app_data(tokenizer.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
