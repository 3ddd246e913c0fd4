//! Shared harness: real router over an in-memory database

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use shared::models::Role;
use table_server::auth::hash_password;
use table_server::db::DbService;
use table_server::db::repository::user;
use table_server::media::LocalImageStore;
use table_server::{Config, ServerState, api};
use tempfile::TempDir;
use tower::ServiceExt;

pub struct TestApp {
    pub app: Router,
    pub state: ServerState,
    _image_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(Config::default()).await
    }

    pub async fn with_config(mut config: Config) -> Self {
        let image_dir = tempfile::tempdir().unwrap();
        config.images.local_dir = image_dir.path().to_string_lossy().into_owned();
        config.database_url = ":memory:".into();

        let db = DbService::in_memory().await.unwrap();
        let images = Arc::new(LocalImageStore::new(image_dir.path(), None).unwrap());
        let state = ServerState::new(config, db.pool, images);
        let app = api::build_app(&state);

        Self {
            app,
            state,
            _image_dir: image_dir,
        }
    }

    /// Admin account created directly in the database
    pub async fn admin_token(&self) -> String {
        let hash = hash_password("admin123").unwrap();
        let admin = user::create(&self.state.pool, "Admin", "admin@cafe.com", &hash, Role::Admin, None)
            .await
            .unwrap();
        self.state.jwt_service.generate_token(&admin).unwrap()
    }

    /// Register a customer through the API, returning (token, user id)
    pub async fn register(&self, name: &str, email: &str) -> (String, i64) {
        let (status, body) = self
            .request(
                Method::POST,
                "/api/auth/register",
                None,
                Some(json!({ "name": name, "email": email, "password": "secret123", "table_number": 4 })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        (
            body["token"].as_str().unwrap().to_string(),
            body["user"]["id"].as_i64().unwrap(),
        )
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(http::header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(http::header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    /// Create a menu item as admin, returning its id
    pub async fn menu_item(&self, admin: &str, name: &str, price: f64) -> i64 {
        let (status, body) = self
            .post(
                "/api/menu",
                Some(admin),
                json!({
                    "name": name,
                    "description": format!("{name} description"),
                    "price": price,
                    "category": "Main Course",
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_i64().unwrap()
    }

    /// Create a coupon as admin from a partial JSON body
    pub async fn coupon(&self, admin: &str, fields: Value) -> Value {
        let now = shared::util::now_millis();
        let mut body = json!({
            "description": "Test coupon",
            "valid_from": now - 60_000,
            "valid_until": now + 86_400_000,
        });
        if let (Some(target), Some(extra)) = (body.as_object_mut(), fields.as_object()) {
            for (k, v) in extra {
                target.insert(k.clone(), v.clone());
            }
        }
        let (status, created) = self.post("/api/coupons", Some(admin), body).await;
        assert_eq!(status, StatusCode::CREATED, "{created}");
        created
    }

    /// Place an order, returning the raw response
    pub async fn order(&self, token: &str, lines: &[(i64, i64)], coupon: Option<&str>) -> (StatusCode, Value) {
        let items: Vec<Value> = lines
            .iter()
            .map(|(id, qty)| json!({ "menu_item_id": id, "quantity": qty }))
            .collect();
        self.post(
            "/api/orders",
            Some(token),
            json!({ "table_number": 4, "items": items, "coupon_code": coupon }),
        )
        .await
    }
}

/// Error code from an AppError body
pub fn code(body: &Value) -> u64 {
    body["code"].as_u64().unwrap_or_default()
}
