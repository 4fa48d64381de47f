use diesel::{ExpressionMethods, QueryDsl, RunQueryDsl};
use sims::schema::categories;
use uuid::Uuid;

use crate::helpers::TestApp;

#[actix_web::test]
async fn admin_can_add_category(){
    let app = TestApp::spawn_app().await;
    let token = app.login_admin().await;

    let form = serde_json::json!({
        "name": "Electronics",
        "description": "Gadgets and devices"
    });

    let response = app.post_form_with_token("/categories", &form, &token).await;
    assert_eq!(response.status().as_u16(), 200);

    let category_id: Uuid = response.json().await.unwrap();

    let mut conn = app.pool.get().unwrap();
    let name: String = categories::table
        .select(categories::name)
        .filter(categories::category_id.eq(category_id))
        .get_result(&mut conn)
        .unwrap();

    assert_eq!(name, "Electronics");
}

#[actix_web::test]
async fn category_list_is_ordered_by_name(){
    let app = TestApp::spawn_app().await;
    let admin_token = app.login_admin().await;

    for name in ["Office Supplies", "Clothing", "Groceries"]{
        let form = serde_json::json!({ "name": name });
        let response = app.post_form_with_token("/categories", &form, &admin_token).await;
        assert_eq!(response.status().as_u16(), 200);
    }

    let (_, customer_token) = app.login_customer().await;
    let response = app.get_with_token("/categories", &customer_token).await;
    assert_eq!(response.status().as_u16(), 200);

    let body: Vec<serde_json::Value> = response.json().await.unwrap();
    let names: Vec<&str> = body.iter().map(|c| c["name"].as_str().unwrap()).collect();

    assert_eq!(names, vec!["Clothing", "Groceries", "Office Supplies"]);
}

#[actix_web::test]
async fn staff_cannot_add_categories(){
    let app = TestApp::spawn_app().await;
    let token = app.login_staff().await;

    let form = serde_json::json!({ "name": "Furniture" });
    let response = app.post_form_with_token("/categories", &form, &token).await;

    assert_eq!(response.status().as_u16(), 401);
}

#[actix_web::test]
async fn category_list_requires_login(){
    let app = TestApp::spawn_app().await;

    let response = app.api_client.get(format!("{}/categories", app.get_app_url()))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 401);
}
