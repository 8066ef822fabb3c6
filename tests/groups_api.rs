#[macro_use]
mod common;

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test};
use serde_json::{Value, json};
use yatube_api::AppServices;
use yatube_api::config::AppConfig;
use yatube_api::database::MemoryStore;

use common::TestContext;

#[actix_web::test]
async fn anonymous_users_see_every_group() {
    let ctx = TestContext::new();
    let app = init_app!(ctx);
    ctx.group("cats").await;
    ctx.group("dogs").await;

    let req = test::TestRequest::get().uri("/api/v1/groups").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["count"], 2);
    assert_eq!(body["data"][0]["slug"], "cats");
    assert_eq!(body["data"][1]["slug"], "dogs");
    assert_eq!(body["data"][0]["description"], "All about cats");
}

#[actix_web::test]
async fn single_group_lookup() {
    let ctx = TestContext::new();
    let app = init_app!(ctx);
    let group = ctx.group("cats").await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/groups/{}", group.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["id"], group.id);
    assert_eq!(body["data"]["title"], "Group cats");

    let req = test::TestRequest::get().uri("/api/v1/groups/77").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Group not found.");

    let req = test::TestRequest::get().uri("/api/v1/groups/cats").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Group not found.");
}

#[actix_web::test]
async fn groups_cannot_be_created_through_the_api() {
    let ctx = TestContext::new();
    let app = init_app!(ctx);
    let (_, alice) = ctx.user("alice").await;

    let req = test::TestRequest::post()
        .uri("/api/v1/groups")
        .insert_header(("Authorization", alice.as_str()))
        .set_json(json!({ "title": "x", "slug": "x", "description": "x" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_client_error());

    let req = test::TestRequest::get().uri("/api/v1/groups").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["count"], 0);
}

#[actix_web::test]
async fn unknown_routes_use_the_json_envelope() {
    let ctx = TestContext::new();
    let app = init_app!(ctx);

    let req = test::TestRequest::get().uri("/api/v1/nowhere").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Route does not exist");
}

#[actix_web::test]
async fn envelopes_report_the_configured_service_name() {
    let config = AppConfig::from_lookup(|name| match name {
        "JWT_SECRET" => Some("test-secret".to_string()),
        "SERVICE_NAME" => Some("yatube-groups".to_string()),
        _ => None,
    })
    .unwrap();
    let services = AppServices::from_config(Arc::new(MemoryStore::new()), &config);
    let app = test::init_service(App::new().configure(move |cfg| services.configure(cfg))).await;

    let req = test::TestRequest::get().uri("/api/v1/groups").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["service"], "yatube-groups");

    let req = test::TestRequest::get().uri("/api/v1/groups/404").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["service"], "yatube-groups");
}
