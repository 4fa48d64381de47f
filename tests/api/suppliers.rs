use diesel::{ExpressionMethods, QueryDsl, RunQueryDsl};
use sims::schema::suppliers;
use uuid::Uuid;

use crate::helpers::TestApp;

#[actix_web::test]
async fn admin_can_add_and_list_suppliers(){
    let app = TestApp::spawn_app().await;
    let token = app.login_admin().await;

    let form = serde_json::json!({
        "name": "Tech Supplies Inc.",
        "contact_person": "John Smith",
        "email": "john@techsupplies.com",
        "phone": "555-010-0101",
        "address": "123 Tech Street"
    });

    let response = app.post_form_with_token("/suppliers", &form, &token).await;
    assert_eq!(response.status().as_u16(), 200);

    let response = app.get_with_token("/suppliers", &token).await;
    let body: Vec<serde_json::Value> = response.json().await.unwrap();

    assert_eq!(body.len(), 1);
    assert_eq!(body[0]["name"], "Tech Supplies Inc.");
    assert_eq!(body[0]["contact_person"], "John Smith");
}

#[actix_web::test]
async fn staff_cannot_add_suppliers(){
    let app = TestApp::spawn_app().await;
    let token = app.login_staff().await;

    let form = serde_json::json!({ "name": "Fashion Wholesale" });
    let response = app.post_form_with_token("/suppliers", &form, &token).await;

    assert_eq!(response.status().as_u16(), 401);
}

#[actix_web::test]
async fn admin_can_update_supplier(){
    let app = TestApp::spawn_app().await;
    let token = app.login_admin().await;

    let form = serde_json::json!({ "name": "Fresh Foods Co." });
    let response = app.post_form_with_token("/suppliers", &form, &token).await;
    let supplier_id: Uuid = response.json().await.unwrap();

    let form = serde_json::json!({
        "supplier_id": supplier_id,
        "name": "Fresh Foods Co.",
        "contact_person": "Mike Davis"
    });
    let response = app.put_form_with_token("/suppliers", &form, &token).await;
    assert_eq!(response.status().as_u16(), 200);

    let mut conn = app.pool.get().unwrap();
    let contact: Option<String> = suppliers::table
        .select(suppliers::contact_person)
        .filter(suppliers::supplier_id.eq(supplier_id))
        .get_result(&mut conn)
        .unwrap();

    assert_eq!(contact.as_deref(), Some("Mike Davis"));
}

#[actix_web::test]
async fn deleting_unknown_supplier_returns_not_found(){
    let app = TestApp::spawn_app().await;
    let token = app.login_admin().await;

    let json = serde_json::json!({ "supplier_id": Uuid::new_v4() });
    let response = app.delete_json_with_token("/suppliers", &json, &token).await;

    assert_eq!(response.status().as_u16(), 404);
}
