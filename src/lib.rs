use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::cors::CorsLayer;

pub mod anki_connect;
pub mod clock;
pub mod config;
pub mod data;
pub mod features;
pub mod handlers;
pub mod schema;
pub mod spaced_repetition_system;
pub mod srs;
pub mod utils;

use anki_connect::AnkiConnectClient;
use clock::Clock;
use config::Settings;
use data::db::DbPool;
use handlers::{anki, cards, health, review};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub clock: Arc<dyn Clock>,
    pub anki: AnkiConnectClient,
    pub settings: Arc<Settings>,
}

pub fn app(state: AppState) -> Router {
    // Card CRUD
    let card_router = Router::new()
        .route("/cards", get(cards::list_cards).post(cards::create_cards))
        .route(
            "/cards/{card_id}",
            put(cards::update_card).delete(cards::delete_card),
        )
        .route("/quick", post(cards::quick_create_card));

    // Scheduling
    let review_router = Router::new()
        .route("/review/due", get(review::due_cards))
        .route("/review/{card_id}", post(review::submit_review));

    // Anki export
    let anki_router = Router::new()
        .route("/status", get(anki::status))
        .route("/decks", get(anki::decks))
        .route("/export/{card_id}", post(anki::export_card))
        .route("/export-all", post(anki::export_all));

    Router::new()
        .route("/health", get(health::health_check))
        .merge(card_router)
        .merge(review_router)
        .nest("/anki", anki_router)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
