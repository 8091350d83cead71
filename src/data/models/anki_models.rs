use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Serialize, Deserialize)]
pub struct AnkiStatusResponse {
    pub connected: bool,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeckListResponse {
    pub decks: Vec<String>,
}

/// Target deck for an export; falls back to the configured default deck
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ExportRequest {
    #[validate(length(min = 1, message = "Deck name must not be empty"))]
    pub deck_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExportResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note_id: Option<i64>,
    pub message: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct ExportAllRequest {
    #[validate(length(min = 1, message = "Deck name must not be empty"))]
    pub deck_name: Option<String>,
    pub card_ids: Option<Vec<i32>>, // None exports every card
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExportAllResponse {
    pub success: bool,
    pub exported_count: usize,
    pub failed_count: usize,
    pub message: String,
}
