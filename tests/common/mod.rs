#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use chrono::NaiveDate;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use flashcard_srs::anki_connect::AnkiConnectClient;
use flashcard_srs::clock::{Clock, FixedClock};
use flashcard_srs::config::Settings;
use flashcard_srs::data::db::{DbPool, build_pool, run_migrations};
use flashcard_srs::data::repositories::UserRepository;
use flashcard_srs::utils::auth::hash_api_key;
use flashcard_srs::{AppState, app};

pub const API_KEY: &str = "ak_test_key";
pub const OTHER_API_KEY: &str = "ak_other_key";

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A database file with two users, one per test key.
pub struct TestDb {
    pub pool: DbPool,
    _dir: TempDir,
}

impl TestDb {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let url = dir.path().join("test.db");
        let pool = build_pool(url.to_str().unwrap()).unwrap();

        let mut conn = pool.get().unwrap();
        run_migrations(&mut conn).unwrap();
        let now = FixedClock::on(day(2024, 1, 1)).now();
        for key in [API_KEY, OTHER_API_KEY] {
            UserRepository::create_with_key(&mut conn, &hash_api_key(key), now).unwrap();
        }
        drop(conn);

        Self { pool, _dir: dir }
    }

    /// Router whose clock is pinned to `today`.
    pub fn app_on(&self, today: NaiveDate, anki_url: &str) -> Router {
        let settings = Settings {
            anki_connect_url: anki_url.to_string(),
            ..Settings::default()
        };
        app(AppState {
            pool: self.pool.clone(),
            clock: Arc::new(FixedClock::on(today)),
            anki: AnkiConnectClient::new(anki_url).unwrap(),
            settings: Arc::new(settings),
        })
    }
}

pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    key: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(key) = key {
        builder = builder.header("X-API-Key", key);
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}
