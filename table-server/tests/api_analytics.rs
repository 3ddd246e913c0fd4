//! Analytics summary over placed orders

mod common;

use common::TestApp;
use http::{Method, StatusCode};

const DAY_MILLIS: i64 = 24 * 60 * 60 * 1000;

async fn backdate(app: &TestApp, order_id: i64, days: i64) {
    sqlx::query("UPDATE orders SET created_at = ? WHERE id = ?")
        .bind(shared::util::now_millis() - days * DAY_MILLIS)
        .bind(order_id)
        .execute(&app.state.pool)
        .await
        .unwrap();
}

#[tokio::test]
async fn weekly_window_and_aggregates() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let (user, _) = app.register("Eve", "eve@example.com").await;
    let pasta = app.menu_item(&admin, "Pasta", 300.0).await;
    let salad = app.menu_item(&admin, "Salad", 150.0).await;

    let (_, recent) = app.order(&user, &[(pasta, 2)], None).await;
    let (_, older) = app.order(&user, &[(salad, 1), (pasta, 1)], None).await;
    let (_, stale) = app.order(&user, &[(salad, 4)], None).await;
    backdate(&app, older["id"].as_i64().unwrap(), 5).await;
    backdate(&app, stale["id"].as_i64().unwrap(), 10).await;

    let (status, _) = app
        .request(
            Method::PATCH,
            &format!("/api/orders/{}/cancel", recent["id"].as_i64().unwrap()),
            Some(&user),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, weekly) = app.get("/api/analytics?period=weekly", Some(&admin)).await;
    assert_eq!(status, StatusCode::OK, "{weekly}");
    assert_eq!(weekly["period"], "weekly");
    assert_eq!(weekly["total_orders"], 2);
    assert_eq!(weekly["total_revenue"], 1050.0);
    assert_eq!(weekly["average_order_value"], 525.0);
    assert_eq!(weekly["orders_by_status"]["pending"], 1);
    assert_eq!(weekly["orders_by_status"]["cancelled"], 1);
    assert_eq!(weekly["revenue_by_day"].as_object().unwrap().len(), 2);

    let top = weekly["top_items"].as_array().unwrap();
    assert_eq!(top.len(), 2);
    assert_eq!(top[0]["name"], "Pasta");
    assert_eq!(top[0]["quantity"], 3);
    assert_eq!(top[0]["revenue"], 900.0);
    assert_eq!(top[1]["name"], "Salad");
    assert_eq!(top[1]["quantity"], 1);
}

#[tokio::test]
async fn daily_is_the_default_period() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let (user, _) = app.register("Fay", "fay@example.com").await;
    let pasta = app.menu_item(&admin, "Pasta", 300.0).await;

    app.order(&user, &[(pasta, 1)], None).await;
    let (_, older) = app.order(&user, &[(pasta, 1)], None).await;
    backdate(&app, older["id"].as_i64().unwrap(), 2).await;

    for uri in ["/api/analytics", "/api/analytics?period=hourly"] {
        let (status, daily) = app.get(uri, Some(&admin)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(daily["period"], "daily");
        assert_eq!(daily["total_orders"], 1);
        assert_eq!(daily["total_revenue"], 300.0);
    }

    let (status, _) = app.get("/api/analytics", Some(&user)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn empty_window_reports_zeroes() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;

    let (_, summary) = app.get("/api/analytics?period=monthly", Some(&admin)).await;
    assert_eq!(summary["total_orders"], 0);
    assert_eq!(summary["average_order_value"], 0.0);
    assert!(summary["top_items"].as_array().unwrap().is_empty());
    assert!(summary["start_date"].as_i64().unwrap() <= summary["end_date"].as_i64().unwrap());
}
