use sims::auth::jwt::UserRole;

use crate::helpers::TestApp;

#[actix_web::test]
async fn login_with_correct_credentials_returns_token(){
    let app = TestApp::spawn_app().await;
    let customer = app.seed_user("customer", true, "customer-password");

    let response = app.login(&customer.email, "customer-password").await;

    assert!(!response.token.is_empty());
    assert!(matches!(response.role, UserRole::Customer));
    assert_eq!(response.full_name, customer.full_name);
}

#[actix_web::test]
async fn login_with_wrong_password_is_rejected(){
    let app = TestApp::spawn_app().await;
    let customer = app.seed_user("customer", true, "customer-password");

    let login_request = serde_json::json!({
        "email": customer.email,
        "password": "wrong-password"
    });

    let response = app.api_client.post(format!("{}/login", app.get_app_url()))
        .form(&login_request)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 401);
}

#[actix_web::test]
async fn login_with_unknown_email_is_rejected(){
    let app = TestApp::spawn_app().await;

    let login_request = serde_json::json!({
        "email": "nobody@example.com",
        "password": "whatever-password"
    });

    let response = app.api_client.post(format!("{}/login", app.get_app_url()))
        .form(&login_request)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 401);
}

#[actix_web::test]
async fn unapproved_staff_cannot_login(){
    let app = TestApp::spawn_app().await;
    let staff = app.seed_user("staff", false, "staff-password");

    let login_request = serde_json::json!({
        "email": staff.email,
        "password": "staff-password"
    });

    let response = app.api_client.post(format!("{}/login", app.get_app_url()))
        .form(&login_request)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 403);
}

#[actix_web::test]
async fn approved_staff_can_login(){
    let app = TestApp::spawn_app().await;
    let staff = app.seed_user("staff", true, "staff-password");

    let response = app.login(&staff.email, "staff-password").await;

    assert!(matches!(response.role, UserRole::Staff));
}
