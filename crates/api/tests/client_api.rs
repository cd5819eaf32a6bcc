//! HTTP-level tests for signup, login and `/admin/clients`.

mod common;

use axum::http::StatusCode;
use common::{
    admin_delete, admin_get, admin_post_json, admin_put_json, body_json, post_json,
};
use serde_json::json;

fn signup_body(email: &str, password: &str) -> serde_json::Value {
    json!({
        "email": email,
        "password": password,
        "last_name": "Lovelace",
        "first_name": "Ada",
        "phone": "0600000000",
        "address": "12 Analytical Street"
    })
}

#[tokio::test]
async fn signup_returns_profile_without_credentials() {
    let app = common::build_test_app();
    let mut body = signup_body("a@b.com", "engine-1843");
    body["is_admin"] = json!(true);

    let response = post_json(&app.router, "/signup", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;

    assert_eq!(json["email"], "a@b.com");
    assert_eq!(json["is_admin"], false);
    assert!(json.get("password").is_none());
    assert!(json.get("password_hash").is_none());
}

#[tokio::test]
async fn duplicate_signup_is_409_and_first_password_still_works() {
    let app = common::build_test_app();
    let response = post_json(&app.router, "/signup", signup_body("a@b.com", "first-pass")).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json(&app.router, "/signup", signup_body("a@b.com", "second-pass")).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");

    let response = post_json(
        &app.router,
        "/login",
        json!({"email": "a@b.com", "password": "first-pass"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn login_failures_share_one_message() {
    let app = common::build_test_app();
    post_json(&app.router, "/signup", signup_body("a@b.com", "right-pass")).await;

    let unknown = post_json(
        &app.router,
        "/login",
        json!({"email": "nobody@b.com", "password": "right-pass"}),
    )
    .await;
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    let unknown = body_json(unknown).await;

    let wrong = post_json(
        &app.router,
        "/login",
        json!({"email": "a@b.com", "password": "wrong-pass"}),
    )
    .await;
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    let wrong = body_json(wrong).await;

    assert_eq!(unknown, wrong);
}

#[tokio::test]
async fn login_returns_profile() {
    let app = common::build_test_app();
    post_json(&app.router, "/signup", signup_body("a@b.com", "right-pass")).await;

    let response = post_json(
        &app.router,
        "/login",
        json!({"email": "a@b.com", "password": "right-pass"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["first_name"], "Ada");
    assert!(json.get("password_hash").is_none());
}

#[tokio::test]
async fn signup_validation_errors_are_400() {
    let app = common::build_test_app();

    let response = post_json(&app.router, "/signup", signup_body("bad-email", "long-enough")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json(&app.router, "/signup", signup_body("a@b.com", "short")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Admin CRUD
// ---------------------------------------------------------------------------

#[tokio::test]
async fn admin_client_crud() {
    let app = common::build_test_app();

    let mut body = signup_body("staff@b.com", "staff-pass");
    body["is_admin"] = json!(true);
    let response = admin_post_json(&app.router, "/admin/clients", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["is_admin"], true);
    assert!(created.get("password_hash").is_none());
    let uri = format!("/admin/clients/{}", created["id"].as_str().unwrap());

    let response = admin_post_json(
        &app.router,
        "/admin/clients",
        signup_body("staff@b.com", "other-pass"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    post_json(&app.router, "/signup", signup_body("second@b.com", "second-pass")).await;
    let list = body_json(admin_get(&app.router, "/admin/clients").await).await;
    let emails: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["email"].as_str().unwrap())
        .collect();
    assert_eq!(emails, ["staff@b.com", "second@b.com"]);

    let response = admin_get(&app.router, &uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["email"], "staff@b.com");

    let response = admin_delete(&app.router, &uri).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(admin_get(&app.router, &uri).await.status(), StatusCode::NOT_FOUND);
    assert_eq!(admin_delete(&app.router, &uri).await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn admin_update_resets_password_and_keeps_other_fields() {
    let app = common::build_test_app();
    let created =
        body_json(post_json(&app.router, "/signup", signup_body("a@b.com", "old-password")).await)
            .await;
    let uri = format!("/admin/clients/{}", created["id"].as_str().unwrap());

    let response = admin_put_json(
        &app.router,
        &uri,
        json!({"phone": "0799999999", "new_password": "new-password"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["phone"], "0799999999");
    assert_eq!(updated["address"], created["address"]);

    let old = post_json(
        &app.router,
        "/login",
        json!({"email": "a@b.com", "password": "old-password"}),
    )
    .await;
    assert_eq!(old.status(), StatusCode::UNAUTHORIZED);
    let new = post_json(
        &app.router,
        "/login",
        json!({"email": "a@b.com", "password": "new-password"}),
    )
    .await;
    assert_eq!(new.status(), StatusCode::OK);
}

#[tokio::test]
async fn admin_update_email_is_validated_and_unique() {
    let app = common::build_test_app();
    post_json(&app.router, "/signup", signup_body("taken@b.com", "password-1")).await;
    let other =
        body_json(post_json(&app.router, "/signup", signup_body("c@d.com", "password-2")).await)
            .await;
    let uri = format!("/admin/clients/{}", other["id"].as_str().unwrap());

    let response = admin_put_json(&app.router, &uri, json!({"email": "broken"})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = admin_put_json(&app.router, &uri, json!({"email": "taken@b.com"})).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}
