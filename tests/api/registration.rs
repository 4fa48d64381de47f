use diesel::{ExpressionMethods, QueryDsl, RunQueryDsl};
use sims::schema::users;

use crate::helpers::TestApp;

fn registration_form(email: &str, role: &str) -> serde_json::Value{
    serde_json::json!({
        "full_name": "Jane Doe",
        "email": email,
        "phone_number": "555-010-0101",
        "password": "testpassword",
        "confirm_password": "testpassword",
        "role": role
    })
}

#[actix_web::test]
async fn register_customer_is_approved_immediately(){
    let app = TestApp::spawn_app().await;

    let response = app.api_client.post(format!("{}/register", app.get_app_url()))
                    .form(&registration_form("jane@example.com", "customer"))
                    .send()
                    .await
                    .expect("Failed to send request to register endpoint");

    assert_eq!(response.status().as_u16(), 200);

    let mut conn = app.pool.get().unwrap();
    let is_approved: bool = users::table
        .select(users::is_approved)
        .filter(users::email.eq("jane@example.com"))
        .get_result(&mut conn)
        .unwrap();

    assert!(is_approved);
}

#[actix_web::test]
async fn register_staff_starts_unapproved(){
    let app = TestApp::spawn_app().await;

    let response = app.api_client.post(format!("{}/register", app.get_app_url()))
                    .form(&registration_form("staff@example.com", "staff"))
                    .send()
                    .await
                    .expect("Failed to send request to register endpoint");

    assert_eq!(response.status().as_u16(), 200);

    let mut conn = app.pool.get().unwrap();
    let is_approved: bool = users::table
        .select(users::is_approved)
        .filter(users::email.eq("staff@example.com"))
        .get_result(&mut conn)
        .unwrap();

    assert!(!is_approved);
}

#[actix_web::test]
async fn register_with_duplicate_email_is_rejected(){
    let app = TestApp::spawn_app().await;
    let url = format!("{}/register", app.get_app_url());

    let first = app.api_client.post(&url)
                    .form(&registration_form("dup@example.com", "customer"))
                    .send()
                    .await
                    .unwrap();
    assert_eq!(first.status().as_u16(), 200);

    let second = app.api_client.post(&url)
                    .form(&registration_form("dup@example.com", "customer"))
                    .send()
                    .await
                    .unwrap();
    assert_eq!(second.status().as_u16(), 400);

    let mut conn = app.pool.get().unwrap();
    let count: i64 = users::table
        .filter(users::email.eq("dup@example.com"))
        .count()
        .get_result(&mut conn)
        .unwrap();

    assert_eq!(count, 1);
}

#[actix_web::test]
async fn register_as_admin_is_rejected(){
    let app = TestApp::spawn_app().await;

    let response = app.api_client.post(format!("{}/register", app.get_app_url()))
                    .form(&registration_form("boss@example.com", "admin"))
                    .send()
                    .await
                    .unwrap();

    assert_eq!(response.status().as_u16(), 400);
}

#[actix_web::test]
async fn register_with_mismatched_passwords_is_rejected(){
    let app = TestApp::spawn_app().await;

    let body = serde_json::json!({
        "full_name": "Jane Doe",
        "email": "jane@example.com",
        "phone_number": "555-010-0101",
        "password": "testpassword",
        "confirm_password": "different",
        "role": "customer"
    });

    let response = app.api_client.post(format!("{}/register", app.get_app_url()))
                    .form(&body)
                    .send()
                    .await
                    .unwrap();

    assert_eq!(response.status().as_u16(), 400);
}

#[actix_web::test]
async fn register_with_short_password_is_rejected(){
    let app = TestApp::spawn_app().await;

    let body = serde_json::json!({
        "full_name": "Jane Doe",
        "email": "jane@example.com",
        "phone_number": "555-010-0101",
        "password": "abc",
        "confirm_password": "abc",
        "role": "customer"
    });

    let response = app.api_client.post(format!("{}/register", app.get_app_url()))
                    .form(&body)
                    .send()
                    .await
                    .unwrap();

    assert_eq!(response.status().as_u16(), 400);
}

#[actix_web::test]
async fn register_with_invalid_email_is_rejected(){
    let app = TestApp::spawn_app().await;

    let response = app.api_client.post(format!("{}/register", app.get_app_url()))
                    .form(&registration_form("not-an-email", "customer"))
                    .send()
                    .await
                    .unwrap();

    assert_eq!(response.status().as_u16(), 400);
}
