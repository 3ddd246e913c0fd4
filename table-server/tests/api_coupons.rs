//! Coupon administration and validation

mod common;

use common::{TestApp, code};
use http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn validate_quotes_without_consuming() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let (user, _) = app.register("Ana", "ana@example.com").await;
    let created = app
        .coupon(
            &admin,
            json!({ "code": "save20", "discount_type": "percentage", "discount_value": 20, "max_discount": 150 }),
        )
        .await;
    assert_eq!(created["code"], "SAVE20");
    assert_eq!(created["used_count"], 0);

    let (status, body) = app
        .post("/api/coupons/validate", Some(&user), json!({ "code": "Save20", "order_amount": 480 }))
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["valid"], true);
    assert_eq!(body["coupon"]["code"], "SAVE20");
    assert_eq!(body["coupon"]["discount_type"], "percentage");
    assert_eq!(body["discount"], 96.0);
    assert_eq!(body["final_amount"], 384.0);

    // Capped
    let (_, body) = app
        .post("/api/coupons/validate", Some(&user), json!({ "code": "SAVE20", "order_amount": 2000 }))
        .await;
    assert_eq!(body["discount"], 150.0);
    assert_eq!(body["final_amount"], 1850.0);

    let (_, all) = app.get("/api/coupons", Some(&admin)).await;
    assert_eq!(all[0]["used_count"], 0);

    let (status, body) = app
        .post("/api/coupons/validate", Some(&user), json!({ "code": "NOPE", "order_amount": 100 }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(code(&body), 5001);
}

#[tokio::test]
async fn rejections_carry_their_own_codes() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let (user, _) = app.register("Ben", "ben@example.com").await;
    let now = shared::util::now_millis();

    app.coupon(
        &admin,
        json!({
            "code": "OLD",
            "discount_type": "fixed",
            "discount_value": 50,
            "valid_from": now - 2 * 86_400_000_i64,
            "valid_until": now - 86_400_000_i64,
        }),
    )
    .await;
    app.coupon(&admin, json!({ "code": "OFF", "discount_type": "fixed", "discount_value": 50, "active": false }))
        .await;
    let big = app
        .coupon(
            &admin,
            json!({ "code": "BIG", "discount_type": "fixed", "discount_value": 50, "min_order_amount": 500 }),
        )
        .await;

    for (coupon, expected) in [("OLD", 5003), ("OFF", 5002), ("BIG", 5005)] {
        let (status, body) = app
            .post("/api/coupons/validate", Some(&user), json!({ "code": coupon, "order_amount": 300 }))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{coupon}");
        assert_eq!(code(&body), expected, "{coupon}");
    }

    let (_, body) = app
        .post("/api/coupons/validate", Some(&user), json!({ "code": "BIG", "order_amount": 300 }))
        .await;
    assert_eq!(body["details"]["min_order_amount"], 500.0);

    // Exactly the minimum is enough
    let (status, _) = app
        .post("/api/coupons/validate", Some(&user), json!({ "code": "BIG", "order_amount": 500 }))
        .await;
    assert_eq!(status, StatusCode::OK);

    // Only active, in-window coupons are listed
    let (_, active) = app.get("/api/coupons/active", Some(&user)).await;
    let active = active.as_array().unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0]["code"], "BIG");
    assert!(active[0].get("used_count").is_none());

    // Re-activating through update makes OFF usable
    let (_, all) = app.get("/api/coupons", Some(&admin)).await;
    let off_id = all
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["code"] == "OFF")
        .and_then(|c| c["id"].as_i64())
        .unwrap();
    let (status, _) = app
        .request(Method::PUT, &format!("/api/coupons/{off_id}"), Some(&admin), Some(json!({ "active": true })))
        .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app
        .post("/api/coupons/validate", Some(&user), json!({ "code": "OFF", "order_amount": 300 }))
        .await;
    assert_eq!(status, StatusCode::OK);

    let big_id = big["id"].as_i64().unwrap();
    let (status, _) = app
        .request(Method::DELETE, &format!("/api/coupons/{big_id}"), Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app
        .request(Method::DELETE, &format!("/api/coupons/{big_id}"), Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn usage_limit_is_enforced() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let (user, _) = app.register("Cy", "cy@example.com").await;
    let item = app.menu_item(&admin, "Pasta", 300.0).await;
    app.coupon(
        &admin,
        json!({ "code": "ONCE", "discount_type": "fixed", "discount_value": 30, "usage_limit": 1 }),
    )
    .await;

    let (status, order) = app.order(&user, &[(item, 1)], Some("ONCE")).await;
    assert_eq!(status, StatusCode::CREATED, "{order}");
    assert_eq!(order["final_amount"], 270.0);

    let (status, body) = app.order(&user, &[(item, 1)], Some("ONCE")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code(&body), 5004);

    let (_, body) = app
        .post("/api/coupons/validate", Some(&user), json!({ "code": "ONCE", "order_amount": 300 }))
        .await;
    assert_eq!(code(&body), 5004);

    // The rejected order left nothing behind
    let (_, mine) = app.get("/api/orders/my-orders", Some(&user)).await;
    assert_eq!(mine.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn manual_use_respects_the_limit() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let coupon = app
        .coupon(
            &admin,
            json!({ "code": "TWICE", "discount_type": "fixed", "discount_value": 10, "usage_limit": 2 }),
        )
        .await;
    let uri = format!("/api/coupons/{}/use", coupon["id"].as_i64().unwrap());

    let (_, first) = app.post(&uri, Some(&admin), json!({})).await;
    assert_eq!(first["used_count"], 1);
    let (_, second) = app.post(&uri, Some(&admin), json!({})).await;
    assert_eq!(second["used_count"], 2);

    let (status, body) = app.post(&uri, Some(&admin), json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code(&body), 5004);

    let (status, body) = app.post("/api/coupons/42/use", Some(&admin), json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(code(&body), 5001);
}

#[tokio::test]
async fn admin_input_is_checked() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let now = shared::util::now_millis();
    app.coupon(&admin, json!({ "code": "DUP", "discount_type": "fixed", "discount_value": 5 }))
        .await;

    let base = |extra: serde_json::Value| {
        let mut body = json!({
            "code": "NEW",
            "description": "New",
            "discount_type": "percentage",
            "discount_value": 10,
            "valid_from": now,
            "valid_until": now + 86_400_000_i64,
        });
        for (k, v) in extra.as_object().unwrap() {
            body[k] = v.clone();
        }
        body
    };

    let (status, body) = app.post("/api/coupons", Some(&admin), base(json!({ "code": "dup" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(code(&body), 5006);

    let (status, body) = app
        .post("/api/coupons", Some(&admin), base(json!({ "discount_value": 150 })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code(&body), 8);

    let (status, _) = app
        .post("/api/coupons", Some(&admin), base(json!({ "valid_until": now - 1 })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post("/api/coupons", Some(&admin), base(json!({ "discount_value": 0 })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (user, _) = app.register("Dee", "dee@example.com").await;
    let (status, _) = app.post("/api/coupons", Some(&user), base(json!({}))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = app.get("/api/coupons", Some(&user)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
