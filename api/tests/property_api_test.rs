//! HTTP tests for the landlord property management endpoints:
//! authentication, ownership, media limits and the lease delete guard.

mod common;

use actix_web::{http::StatusCode, test};
use base64::Engine;
use chrono::{Days, Utc};
use uuid::Uuid;

use common::{bearer, issue_token, listing, seed_geography, takapuna, test_context};
use rw_api::app::create_app;
use rw_core::domain::entities::lease::Lease;

fn image_part(name: &str) -> serde_json::Value {
    serde_json::json!({
        "file_name": name,
        "content_type": "image/jpeg",
        "data": base64::engine::general_purpose::STANDARD.encode(b"jpeg bytes"),
    })
}

fn create_body() -> serde_json::Value {
    serde_json::json!({
        "name": "Sunny villa",
        "address": "42 Beach Road",
        "suburb_id": 100,
        "rent_amount": "650.00",
        "bedrooms": 3,
        "bathrooms": 2,
        "parking_spaces": 1,
        "property_type": 2,
        "features": 5,
        "pets_allowed": true,
        "available_date": "2025-08-01",
        "images": [image_part("front.jpg"), image_part("back.jpg")],
        "video": {
            "file_name": "tour.mp4",
            "content_type": "video/mp4",
            "data": base64::engine::general_purpose::STANDARD.encode(b"mp4 bytes"),
        },
    })
}

#[actix_web::test]
async fn test_create_requires_authentication() {
    let ctx = test_context().await;
    let app =
        test::init_service(create_app(ctx.state.clone(), ctx.geography.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/properties")
        .set_json(create_body())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_create_requires_landlord_role() {
    let ctx = test_context().await;
    let app =
        test::init_service(create_app(ctx.state.clone(), ctx.geography.clone())).await;

    let token = issue_token(Uuid::new_v4(), "tenant");
    let req = test::TestRequest::post()
        .uri("/api/v1/properties")
        .insert_header(bearer(&token))
        .set_json(create_body())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_create_persists_listing_with_media() {
    let ctx = test_context().await;
    seed_geography(&ctx).await;
    let app =
        test::init_service(create_app(ctx.state.clone(), ctx.geography.clone())).await;

    let token = issue_token(Uuid::new_v4(), "landlord");
    let req = test::TestRequest::post()
        .uri("/api/v1/properties")
        .insert_header(bearer(&token))
        .set_json(create_body())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["name"], "Sunny villa");
    assert_eq!(body["suburb"]["name"], "Takapuna");
    assert_eq!(body["rent_amount"], "650.00");
    assert_eq!(body["features"], 5);
    assert_eq!(body["media"].as_array().unwrap().len(), 3);

    // The new listing is immediately searchable
    let req = test::TestRequest::get()
        .uri("/api/v1/properties/search?keyword=sunny")
        .to_request();
    let found: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(found["total_count"], 1);
}

#[actix_web::test]
async fn test_create_with_unknown_suburb_is_404() {
    let ctx = test_context().await;
    let app =
        test::init_service(create_app(ctx.state.clone(), ctx.geography.clone())).await;

    let token = issue_token(Uuid::new_v4(), "landlord");
    let req = test::TestRequest::post()
        .uri("/api/v1/properties")
        .insert_header(bearer(&token))
        .set_json(create_body())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_create_rejects_negative_rent() {
    let ctx = test_context().await;
    seed_geography(&ctx).await;
    let app =
        test::init_service(create_app(ctx.state.clone(), ctx.geography.clone())).await;

    let mut body = create_body();
    body["rent_amount"] = serde_json::json!("-10.00");

    let token = issue_token(Uuid::new_v4(), "landlord");
    let req = test::TestRequest::post()
        .uri("/api/v1/properties")
        .insert_header(bearer(&token))
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_update_cannot_touch_foreign_listing() {
    let ctx = test_context().await;
    seed_geography(&ctx).await;

    let other_owner = Uuid::new_v4();
    ctx.properties
        .seed(listing(1, other_owner, takapuna(), 500, 2))
        .await;

    let app =
        test::init_service(create_app(ctx.state.clone(), ctx.geography.clone())).await;

    let body = serde_json::json!({
        "name": "Hijacked",
        "address": "42 Beach Road",
        "suburb_id": 100,
        "rent_amount": "650.00",
        "bedrooms": 3,
        "bathrooms": 2,
        "parking_spaces": 1,
        "property_type": 2,
        "pets_allowed": true,
        "available_date": "2025-08-01",
    });

    let token = issue_token(Uuid::new_v4(), "landlord");
    let req = test::TestRequest::put()
        .uri("/api/v1/properties/1")
        .insert_header(bearer(&token))
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;

    // Not-found and not-owned are indistinguishable
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_delete_blocked_by_active_lease() {
    let ctx = test_context().await;
    seed_geography(&ctx).await;

    let owner = Uuid::new_v4();
    ctx.properties.seed(listing(1, owner, takapuna(), 500, 2)).await;

    let today = Utc::now().date_naive();
    ctx.properties
        .insert_lease(Lease {
            id: 1,
            property_id: 1,
            tenant_id: 9,
            start_date: today.checked_sub_days(Days::new(30)).unwrap(),
            end_date: today.checked_add_days(Days::new(60)).unwrap(),
        })
        .await;

    let app =
        test::init_service(create_app(ctx.state.clone(), ctx.geography.clone())).await;

    let token = issue_token(owner, "landlord");
    let req = test::TestRequest::delete()
        .uri("/api/v1/properties/1")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "BUSINESS_RULE_VIOLATION");
}

#[actix_web::test]
async fn test_delete_removes_listing() {
    let ctx = test_context().await;
    seed_geography(&ctx).await;

    let owner = Uuid::new_v4();
    ctx.properties.seed(listing(1, owner, takapuna(), 500, 2)).await;

    let app =
        test::init_service(create_app(ctx.state.clone(), ctx.geography.clone())).await;

    let token = issue_token(owner, "landlord");
    let req = test::TestRequest::delete()
        .uri("/api/v1/properties/1")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri("/api/v1/properties/1")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_list_mine_shows_only_own_listings() {
    let ctx = test_context().await;
    seed_geography(&ctx).await;

    let owner = Uuid::new_v4();
    let other = Uuid::new_v4();
    ctx.properties.seed(listing(1, owner, takapuna(), 500, 2)).await;
    ctx.properties.seed(listing(2, other, takapuna(), 600, 2)).await;
    ctx.properties.seed(listing(3, owner, takapuna(), 700, 3)).await;

    let app =
        test::init_service(create_app(ctx.state.clone(), ctx.geography.clone())).await;

    let token = issue_token(owner, "landlord");
    let req = test::TestRequest::get()
        .uri("/api/v1/properties/mine")
        .insert_header(bearer(&token))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["total_count"], 2);
    let ids: Vec<i64> = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_i64().unwrap())
        .collect();
    assert!(ids.contains(&1) && ids.contains(&3));
}

#[actix_web::test]
async fn test_delete_media_checks_ownership() {
    let ctx = test_context().await;
    seed_geography(&ctx).await;
    let app =
        test::init_service(create_app(ctx.state.clone(), ctx.geography.clone())).await;

    // Create a listing with media through the API so ids are assigned
    let owner = Uuid::new_v4();
    let token = issue_token(owner, "landlord");
    let req = test::TestRequest::post()
        .uri("/api/v1/properties")
        .insert_header(bearer(&token))
        .set_json(create_body())
        .to_request();
    let created: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let media_id = created["media"][0]["id"].as_i64().unwrap();

    // Another landlord cannot delete it
    let foreign = issue_token(Uuid::new_v4(), "landlord");
    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/properties/media/{media_id}"))
        .insert_header(bearer(&foreign))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // The owner can
    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/properties/media/{media_id}"))
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}
