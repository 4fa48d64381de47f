use std::error::Error;

use chrono::Utc;
use diesel::{pg::Pg, r2d2::ConnectionManager, Connection, PgConnection, RunQueryDsl};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use once_cell::sync::Lazy;
use r2d2::Pool;
use secrecy::{ExposeSecret, SecretString};
use sims::{configuration::{DatabaseSettings, Settings}, models::{Product, User}, password::compute_password_hash, routes::authentication::LoginResponse, schema::{products, users}, startup::Application, telemetry::{get_subscriber, init_subscriber}, utils::DbPool};
use uuid::Uuid;

static LOGGER_INSTANCE: Lazy<()> = Lazy::new(|| {
    let log_level = "info".to_string();
    let name = "sims-test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(name, log_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(name, log_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

fn run_migrations(connection: &mut impl MigrationHarness<Pg>)
    -> Result<(), Box<dyn Error + Send + Sync + 'static>>
{
    connection.run_pending_migrations(MIGRATIONS)?;
    Ok(())
}

pub struct TestApp{
    pub host: String,
    pub port: u16,
    pub pool: DbPool,
    pub api_client: reqwest::Client
}

impl TestApp {
    fn create_db(settings: &DatabaseSettings) -> DbPool{
        let mut connection = PgConnection::establish(&settings.get_database_url())
                                .expect("Failed to connect to postgres database");

        let query = format!(r#"CREATE DATABASE "{}";"#, settings.name);
        diesel::sql_query(query)
            .execute(&mut connection)
            .expect("Failed to create test database");

        // Small pools keep the whole suite within server connection limits
        let pool = Pool::builder()
            .max_size(2)
            .build(ConnectionManager::<PgConnection>::new(settings.get_database_table_url()))
            .expect("Failed to build connection pool to test database");

        let mut conn = pool.get().expect("Failed to get connection to test database");
        run_migrations(&mut conn).expect("Failed to run migrations");

        pool
    }

    pub fn get_app_url(&self) -> String{
        format!("http://{}:{}", self.host, self.port)
    }

    pub async fn spawn_app() -> TestApp{
        Lazy::force(&LOGGER_INSTANCE);

        let mut settings = Settings::get();
        settings.application.port = 0;
        settings.database.name = Uuid::new_v4().to_string();
        settings.database.pool_size = 2;

        let pool = TestApp::create_db(&settings.database);

        let application = Application::new(settings)
                            .await
                            .expect("Failed to build application");

        let host = application.host.clone();
        let port = application.port;

        tokio::task::spawn(application.server);

        let api_client = reqwest::Client::new();

        TestApp{
            host,
            port,
            pool,
            api_client
        }
    }

    // Inserts a user row directly, bypassing the register endpoint
    pub fn seed_user(&self, role: &str, is_approved: bool, password: &str) -> User{
        let user = User{
            user_id: Uuid::new_v4(),
            full_name: format!("{} user", role),
            email: format!("{}@example.com", Uuid::new_v4()),
            password: compute_password_hash(SecretString::from(password))
                .expect("Failed to hash password")
                .expose_secret()
                .to_string(),
            phone_number: None,
            role: role.to_string(),
            is_approved,
            created_at: Utc::now()
        };

        let mut conn = self.pool.get().unwrap();
        diesel::insert_into(users::table)
            .values(user.clone())
            .execute(&mut conn)
            .expect("Failed to seed user");

        user
    }

    pub fn seed_product(&self, name: &str, price: f64, quantity: i32, reorder_level: i32) -> Product{
        let product = Product{
            product_id: Uuid::new_v4(),
            name: name.to_string(),
            description: None,
            category_id: None,
            supplier_id: None,
            price,
            quantity,
            reorder_level,
            created_at: Utc::now()
        };

        let mut conn = self.pool.get().unwrap();
        diesel::insert_into(products::table)
            .values(product.clone())
            .execute(&mut conn)
            .expect("Failed to seed product");

        product
    }

    pub async fn login(&self, email: &str, password: &str) -> LoginResponse{
        let login_request = serde_json::json!({
            "email": email,
            "password": password
        });

        self.api_client.post(format!("{}/login", self.get_app_url()))
            .form(&login_request)
            .send()
            .await
            .expect("Failed to send request to login endpoint")
            .json::<LoginResponse>()
            .await
            .expect("Failed to deserialize login response")
    }

    pub async fn login_admin(&self) -> String{
        let admin = self.seed_user("admin", true, "admin-password");
        self.login(&admin.email, "admin-password").await.token
    }

    pub async fn login_staff(&self) -> String{
        let staff = self.seed_user("staff", true, "staff-password");
        self.login(&staff.email, "staff-password").await.token
    }

    pub async fn login_customer(&self) -> (Uuid, String){
        let customer = self.seed_user("customer", true, "customer-password");
        let token = self.login(&customer.email, "customer-password").await.token;
        (customer.user_id, token)
    }

    pub async fn get_with_token(&self, path: &str, token: &str) -> reqwest::Response{
        self.api_client.get(format!("{}{}", self.get_app_url(), path))
            .bearer_auth(token)
            .send()
            .await
            .expect("Failed to send request")
    }

    pub async fn post_form_with_token<T: serde::Serialize>(&self, path: &str, form: &T, token: &str) -> reqwest::Response{
        self.api_client.post(format!("{}{}", self.get_app_url(), path))
            .bearer_auth(token)
            .form(form)
            .send()
            .await
            .expect("Failed to send request")
    }

    pub async fn post_json_with_token<T: serde::Serialize>(&self, path: &str, json: &T, token: &str) -> reqwest::Response{
        self.api_client.post(format!("{}{}", self.get_app_url(), path))
            .bearer_auth(token)
            .json(json)
            .send()
            .await
            .expect("Failed to send request")
    }

    pub async fn put_form_with_token<T: serde::Serialize>(&self, path: &str, form: &T, token: &str) -> reqwest::Response{
        self.api_client.put(format!("{}{}", self.get_app_url(), path))
            .bearer_auth(token)
            .form(form)
            .send()
            .await
            .expect("Failed to send request")
    }

    pub async fn delete_json_with_token<T: serde::Serialize>(&self, path: &str, json: &T, token: &str) -> reqwest::Response{
        self.api_client.delete(format!("{}{}", self.get_app_url(), path))
            .bearer_auth(token)
            .json(json)
            .send()
            .await
            .expect("Failed to send request")
    }
}
