//! Special offers and their mirror menu items

mod common;

use common::{TestApp, code};
use http::{Method, StatusCode};
use serde_json::{Value, json};
use table_server::Config;

async fn create_offer(app: &TestApp, admin: &str, extra: Value) -> Value {
    let mut body = json!({
        "name": "Weekend Feast",
        "description": "Burger, fries and a drink",
        "offer_type": "combo",
        "items": [
            { "menu_item_id": 1, "name": "Classic Burger", "quantity": 1 },
            { "menu_item_id": 2, "name": "French Fries", "quantity": 1 }
        ],
        "original_price": 500,
        "offer_price": 400
    });
    if let (Some(target), Some(extra)) = (body.as_object_mut(), extra.as_object()) {
        for (k, v) in extra {
            target.insert(k.clone(), v.clone());
        }
    }
    let (status, offer) = app.post("/api/special-offers", Some(admin), body).await;
    assert_eq!(status, StatusCode::CREATED, "{offer}");
    offer
}

async fn find_in_menu(app: &TestApp, admin: &str, id: i64) -> Option<Value> {
    let (_, all) = app.get("/api/menu/all", Some(admin)).await;
    all.as_array()
        .unwrap()
        .iter()
        .find(|item| item["id"].as_i64() == Some(id))
        .cloned()
}

#[tokio::test]
async fn offer_owns_a_synchronized_mirror() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;

    let offer = create_offer(&app, &admin, json!({})).await;
    assert_eq!(offer["discount"], 20);
    assert_eq!(offer["badge_text"], "COMBO DEAL");
    assert_eq!(offer["allow_coupons"], false);
    assert_eq!(offer["active"], true);
    let offer_id = offer["id"].as_i64().unwrap();
    let mirror_id = offer["menu_item_id"].as_i64().unwrap();

    // Exactly one mirror, priced at the offer price
    let (_, menu) = app.get("/api/menu", None).await;
    let mirrors: Vec<&Value> = menu
        .as_array()
        .unwrap()
        .iter()
        .filter(|item| item["special_offer_id"].as_i64() == Some(offer_id))
        .collect();
    assert_eq!(mirrors.len(), 1);
    let mirror = mirrors[0];
    assert_eq!(mirror["id"].as_i64(), Some(mirror_id));
    assert_eq!(mirror["price"], 400.0);
    assert_eq!(mirror["is_special_offer"], true);
    assert_eq!(mirror["category"], "Special");
    assert_eq!(mirror["description"], "Burger, fries and a drink (Special Offer)");

    // Update flows into the mirror
    let (status, updated) = app
        .request(
            Method::PUT,
            &format!("/api/special-offers/{offer_id}"),
            Some(&admin),
            Some(json!({ "offer_price": 350, "name": "Feast" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{updated}");
    assert_eq!(updated["discount"], 30);
    let mirror = find_in_menu(&app, &admin, mirror_id).await.unwrap();
    assert_eq!(mirror["price"], 350.0);
    assert_eq!(mirror["name"], "Feast");

    // Toggle mirrors availability
    let (_, toggled) = app
        .request(Method::PATCH, &format!("/api/special-offers/{offer_id}/toggle"), Some(&admin), None)
        .await;
    assert_eq!(toggled["active"], false);
    let mirror = find_in_menu(&app, &admin, mirror_id).await.unwrap();
    assert_eq!(mirror["available"], false);
    let (status, _) = app.get(&format!("/api/menu/{mirror_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, active) = app.get("/api/special-offers", None).await;
    assert!(active.as_array().unwrap().is_empty());

    // Mirrors are not editable through the menu API
    let (status, body) = app
        .request(Method::PUT, &format!("/api/menu/{mirror_id}"), Some(&admin), Some(json!({ "price": 1 })))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(code(&body), 6003);
    let (status, _) = app
        .request(Method::DELETE, &format!("/api/menu/{mirror_id}"), Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Delete takes the mirror with it
    let (status, _) = app
        .request(Method::DELETE, &format!("/api/special-offers/{offer_id}"), Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(find_in_menu(&app, &admin, mirror_id).await.is_none());
    let (status, body) = app.get(&format!("/api/special-offers/{offer_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(code(&body), 6201);
}

#[tokio::test]
async fn badge_follows_offer_type() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;

    let bogo = create_offer(&app, &admin, json!({ "offer_type": "bogo", "bogo_type": "buy1get1free" })).await;
    assert_eq!(bogo["badge_text"], "BUY 1 GET 1 FREE");

    let pct = create_offer(&app, &admin, json!({ "offer_type": "percentage", "percentage_off": 15 })).await;
    assert_eq!(pct["badge_text"], "15% OFF");

    let custom = create_offer(&app, &admin, json!({ "badge_text": "CHEF PICK" })).await;
    assert_eq!(custom["badge_text"], "CHEF PICK");

    // A derived badge is re-derived when the type changes
    let id = bogo["id"].as_i64().unwrap();
    let (_, changed) = app
        .request(
            Method::PUT,
            &format!("/api/special-offers/{id}"),
            Some(&admin),
            Some(json!({ "offer_type": "weekend" })),
        )
        .await;
    assert_eq!(changed["badge_text"], "WEEKEND SPECIAL");
}

#[tokio::test]
async fn invalid_offers_are_rejected() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;

    let (status, body) = app
        .post(
            "/api/special-offers",
            Some(&admin),
            json!({ "name": "Empty", "description": "Nothing", "items": [], "original_price": 100, "offer_price": 80 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code(&body), 6202);

    let (status, body) = app
        .post(
            "/api/special-offers",
            Some(&admin),
            json!({
                "name": "Too much",
                "description": "Over 100",
                "offer_type": "percentage",
                "percentage_off": 120,
                "items": [{ "menu_item_id": 1, "name": "Burger", "quantity": 1 }],
                "original_price": 100,
                "offer_price": 80
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code(&body), 8);

    // A percentage deal has to say how much it takes off
    let (status, body) = app
        .post(
            "/api/special-offers",
            Some(&admin),
            json!({
                "name": "Vague",
                "description": "Some percent off",
                "offer_type": "percentage",
                "original_price": 100,
                "offer_price": 80
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code(&body), 8);

    // Nothing half-written
    let (_, all) = app.get("/api/menu/all", Some(&admin)).await;
    assert!(all.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn offer_without_items_is_accepted() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;

    let (status, offer) = app
        .post(
            "/api/special-offers",
            Some(&admin),
            json!({
                "name": "Happy Hour",
                "description": "20% off the whole bill",
                "offer_type": "percentage",
                "percentage_off": 20,
                "original_price": 500,
                "offer_price": 400
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{offer}");
    assert_eq!(offer["items"], json!([]));
    assert_eq!(offer["badge_text"], "20% OFF");
    assert_eq!(offer["discount"], 20);

    let offer_id = offer["id"].as_i64().unwrap();
    let mirror_id = offer["menu_item_id"].as_i64().unwrap();
    let mirror = find_in_menu(&app, &admin, mirror_id).await.unwrap();
    assert_eq!(mirror["special_offer_id"].as_i64(), Some(offer_id));
    assert_eq!(mirror["price"], 400.0);

    // Still item-less after an unrelated update, but an explicit empty list is refused
    let (status, updated) = app
        .request(
            Method::PUT,
            &format!("/api/special-offers/{offer_id}"),
            Some(&admin),
            Some(json!({ "name": "Happier Hour" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{updated}");
    assert_eq!(updated["items"], json!([]));
    let (status, body) = app
        .request(
            Method::PUT,
            &format!("/api/special-offers/{offer_id}"),
            Some(&admin),
            Some(json!({ "items": [] })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code(&body), 6202);
}

#[tokio::test]
async fn reconcile_repairs_drift() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let first = create_offer(&app, &admin, json!({})).await;
    let second = create_offer(&app, &admin, json!({ "name": "Lunch Deal" })).await;

    let (_, clean) = app.post("/api/special-offers/reconcile", Some(&admin), json!({})).await;
    assert_eq!(clean, json!({ "created": 0, "relinked": 0, "resynced": 0, "orphans_removed": 0 }));

    // Lose one mirror, corrupt the other, leave an orphan behind
    sqlx::query("DELETE FROM menu_item WHERE special_offer_id = ?")
        .bind(first["id"].as_i64().unwrap())
        .execute(&app.state.pool)
        .await
        .unwrap();
    sqlx::query("UPDATE menu_item SET price = 1 WHERE special_offer_id = ?")
        .bind(second["id"].as_i64().unwrap())
        .execute(&app.state.pool)
        .await
        .unwrap();
    sqlx::query(
        "INSERT INTO menu_item (id, name, description, price, category, available, is_special_offer, special_offer_id, created_at, updated_at) VALUES (77, 'Ghost', 'Ghost (Special Offer)', 10, 'Special', 1, 1, 999, 0, 0)",
    )
    .execute(&app.state.pool)
    .await
    .unwrap();

    let (status, report) = app.post("/api/special-offers/reconcile", Some(&admin), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["created"], 1);
    assert_eq!(report["resynced"], 1);
    assert_eq!(report["orphans_removed"], 1);

    let (_, menu) = app.get("/api/menu", None).await;
    let menu = menu.as_array().unwrap();
    assert_eq!(menu.len(), 2);
    assert!(menu.iter().all(|item| item["price"] == 400.0));

    // User tokens cannot trigger it
    let (user, _) = app.register("Kai", "kai@example.com").await;
    let (status, _) = app.post("/api/special-offers/reconcile", Some(&user), json!({})).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn offer_coupon_gate_is_opt_in() {
    for enforce in [false, true] {
        let mut config = Config::default();
        config.order_policy.enforce_offer_coupon_gate = enforce;
        let app = TestApp::with_config(config).await;
        let admin = app.admin_token().await;
        let (user, _) = app.register("Lea", "lea@example.com").await;

        let offer = create_offer(&app, &admin, json!({})).await;
        let mirror_id = offer["menu_item_id"].as_i64().unwrap();
        app.coupon(&admin, json!({ "code": "TENOFF", "discount_type": "fixed", "discount_value": 10 }))
            .await;

        let (status, body) = app.order(&user, &[(mirror_id, 1)], Some("TENOFF")).await;
        if enforce {
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(code(&body), 5007);
        } else {
            assert_eq!(status, StatusCode::CREATED, "{body}");
            assert_eq!(body["final_amount"], 390.0);
        }
    }
}
