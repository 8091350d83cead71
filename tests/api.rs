mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{API_KEY, OTHER_API_KEY, TestDb, day, send};
use flashcard_srs::data::repositories::CardRepository;

const NO_ANKI: &str = "http://127.0.0.1:9";

async fn create_card(router: &axum::Router, front: &str, back: &str) -> i64 {
    let (status, body) = send(
        router,
        Method::POST,
        "/cards",
        Some(API_KEY),
        Some(json!({ "cards": [{ "card_type": "vocab", "front": front, "back": back }] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["created"][0]["id"].as_i64().unwrap()
}

#[tokio::test]
async fn health_reports_database() {
    let db = TestDb::new();
    let router = db.app_on(day(2024, 5, 20), NO_ANKI);

    let (status, body) = send(&router, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok", "database": "ok" }));
}

#[tokio::test]
async fn card_routes_require_a_known_key() {
    let db = TestDb::new();
    let router = db.app_on(day(2024, 5, 20), NO_ANKI);

    let (status, _) = send(&router, Method::GET, "/cards", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(&router, Method::GET, "/cards", Some("ak_nope"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid API Key");
}

#[tokio::test]
async fn new_cards_are_due_on_creation_day() {
    let db = TestDb::new();
    let router = db.app_on(day(2024, 5, 20), NO_ANKI);
    create_card(&router, "serendipity", "happy accident").await;

    let (status, body) = send(&router, Method::GET, "/review/due", Some(API_KEY), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["cards"][0]["front"], "serendipity");
    assert_eq!(body["cards"][0]["next_review"], "2024-05-20");

    // Other users see nothing.
    let (_, body) = send(&router, Method::GET, "/review/due", Some(OTHER_API_KEY), None).await;
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn reviews_follow_the_schedule() {
    let db = TestDb::new();
    let router = db.app_on(day(2024, 5, 20), NO_ANKI);
    let id = create_card(&router, "ephemeral", "short-lived").await;
    let uri = format!("/review/{}", id);

    let (status, first) =
        send(&router, Method::POST, &uri, Some(API_KEY), Some(json!({ "rating": 2 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["new_interval"], 1);
    assert_eq!(first["next_review"], "2024-05-21");

    let (_, second) =
        send(&router, Method::POST, &uri, Some(API_KEY), Some(json!({ "rating": 2 }))).await;
    assert_eq!(second["rating"], 2);
    assert_eq!(second["new_interval"], 6);
    assert_eq!(second["new_ease_factor"], 2.5);
    assert_eq!(second["next_review"], "2024-05-26");

    let (_, lapse) =
        send(&router, Method::POST, &uri, Some(API_KEY), Some(json!({ "rating": 0 }))).await;
    assert_eq!(lapse["new_interval"], 1);
    assert_eq!(lapse["new_ease_factor"], 2.18);

    let mut conn = db.pool.get().unwrap();
    let logs = CardRepository::review_logs(&mut conn, id as i32).unwrap();
    let ratings: Vec<i32> = logs.iter().map(|l| l.rating).collect();
    assert_eq!(ratings, vec![2, 2, 0]);
}

#[tokio::test]
async fn long_easy_streak_keeps_scheduling() {
    let db = TestDb::new();
    let router = db.app_on(day(2024, 5, 20), NO_ANKI);
    let id = create_card(&router, "perennial", "lasting").await;
    let uri = format!("/review/{}", id);

    let mut last = serde_json::Value::Null;
    for _ in 0..20 {
        let (status, body) =
            send(&router, Method::POST, &uri, Some(API_KEY), Some(json!({ "rating": 3 }))).await;
        assert_eq!(status, StatusCode::OK);
        last = body;
    }
    assert_eq!(last["new_interval"], flashcard_srs::srs::MAX_INTERVAL_DAYS);

    let mut conn = db.pool.get().unwrap();
    assert_eq!(CardRepository::review_logs(&mut conn, id as i32).unwrap().len(), 20);
}

#[tokio::test]
async fn out_of_range_rating_is_rejected_without_writing() {
    let db = TestDb::new();
    let router = db.app_on(day(2024, 5, 20), NO_ANKI);
    let id = create_card(&router, "a", "b").await;

    for rating in [-1_i64, 4, 5, 3_000_000_000] {
        let (status, body) = send(
            &router,
            Method::POST,
            &format!("/review/{}", id),
            Some(API_KEY),
            Some(json!({ "rating": rating })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], 400);
    }

    let mut conn = db.pool.get().unwrap();
    assert!(CardRepository::review_logs(&mut conn, id as i32).unwrap().is_empty());
}

#[tokio::test]
async fn reviewing_someone_elses_card_is_not_found() {
    let db = TestDb::new();
    let router = db.app_on(day(2024, 5, 20), NO_ANKI);
    let id = create_card(&router, "a", "b").await;

    let (status, _) = send(
        &router,
        Method::POST,
        &format!("/review/{}", id),
        Some(OTHER_API_KEY),
        Some(json!({ "rating": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &router,
        Method::POST,
        "/review/9999",
        Some(API_KEY),
        Some(json!({ "rating": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn due_list_follows_the_clock() {
    let db = TestDb::new();
    let monday = db.app_on(day(2024, 5, 20), NO_ANKI);
    let id = create_card(&monday, "a", "b").await;

    send(
        &monday,
        Method::POST,
        &format!("/review/{}", id),
        Some(API_KEY),
        Some(json!({ "rating": 2 })),
    )
    .await;

    let (_, body) = send(&monday, Method::GET, "/review/due", Some(API_KEY), None).await;
    assert_eq!(body["count"], 0);

    let tuesday = db.app_on(day(2024, 5, 21), NO_ANKI);
    let (_, body) = send(&tuesday, Method::GET, "/review/due", Some(API_KEY), None).await;
    assert_eq!(body["count"], 1);
}

#[tokio::test]
async fn quick_cloze_card_blanks_the_word() {
    let db = TestDb::new();
    let router = db.app_on(day(2024, 5, 20), NO_ANKI);

    let (status, body) = send(
        &router,
        Method::POST,
        "/quick",
        Some(API_KEY),
        Some(json!({
            "word": "resilient",
            "meaning": "able to recover",
            "context": "Kids are resilient.",
            "card_type": "cloze"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["card_type"], "cloze");
    assert_eq!(body["front"], "Kids are ___.");
    assert_eq!(body["back"], "resilient");

    let (status, _) = send(
        &router,
        Method::POST,
        "/quick",
        Some(API_KEY),
        Some(json!({ "word": "", "meaning": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn cards_can_be_edited_and_deleted_by_their_owner() {
    let db = TestDb::new();
    let router = db.app_on(day(2024, 5, 20), NO_ANKI);
    let id = create_card(&router, "colour", "color").await;
    let uri = format!("/cards/{}", id);

    let (status, body) = send(
        &router,
        Method::PUT,
        &uri,
        Some(API_KEY),
        Some(json!({ "back": "color (US)", "card_type": "rewrite" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["front"], "colour");
    assert_eq!(body["back"], "color (US)");
    assert_eq!(body["card_type"], "rewrite");

    let (status, _) =
        send(&router, Method::PUT, &uri, Some(OTHER_API_KEY), Some(json!({ "back": "x" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&router, Method::DELETE, &uri, Some(OTHER_API_KEY), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    send(
        &router,
        Method::POST,
        &format!("/review/{}", id),
        Some(API_KEY),
        Some(json!({ "rating": 1 })),
    )
    .await;

    let (status, body) = send(&router, Method::DELETE, &uri, Some(API_KEY), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "deleted" }));

    let (_, body) = send(&router, Method::GET, "/cards", Some(API_KEY), None).await;
    assert_eq!(body, json!([]));
    let mut conn = db.pool.get().unwrap();
    assert!(CardRepository::review_logs(&mut conn, id as i32).unwrap().is_empty());
}

#[tokio::test]
async fn card_list_is_newest_first() {
    let db = TestDb::new();
    let router = db.app_on(day(2024, 5, 20), NO_ANKI);
    create_card(&router, "first", "1").await;
    create_card(&router, "second", "2").await;

    let (_, body) = send(&router, Method::GET, "/cards", Some(API_KEY), None).await;
    let fronts: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["front"].as_str().unwrap())
        .collect();
    assert_eq!(fronts, vec!["second", "first"]);
}
