//! Client for the AnkiConnect add-on.
//!
//! AnkiConnect listens on `localhost:8765` while the Anki desktop app is
//! open and answers every call with `{"result": ..., "error": ...}`.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

pub const DEFAULT_URL: &str = "http://localhost:8765";
const API_VERSION: u8 = 6;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
pub const APP_TAG: &str = "anki-saas";

#[derive(Debug, thiserror::Error)]
pub enum AnkiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Anki(String),

    #[error("Unexpected AnkiConnect response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl AnkiError {
    /// AnkiConnect refuses notes already present in the deck.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, AnkiError::Anki(msg) if msg.to_lowercase().contains("duplicate"))
    }
}

#[derive(Serialize)]
struct AnkiRequest<'a> {
    action: &'a str,
    version: u8,
    params: Value,
}

#[derive(Deserialize)]
struct AnkiResponse {
    #[serde(default)]
    result: Value,
    #[serde(default)]
    error: Option<String>,
}

/// A note of the built-in `Basic` model.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnkiNote {
    pub deck_name: String,
    pub model_name: String,
    pub fields: NoteFields,
    pub options: NoteOptions,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct NoteFields {
    pub front: String,
    pub back: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteOptions {
    pub allow_duplicate: bool,
    pub duplicate_scope: String,
}

impl AnkiNote {
    pub fn basic(deck_name: &str, front: &str, back: &str, tags: Vec<String>) -> Self {
        Self {
            deck_name: deck_name.to_string(),
            model_name: "Basic".to_string(),
            fields: NoteFields {
                front: front.to_string(),
                back: back.to_string(),
            },
            options: NoteOptions {
                allow_duplicate: false,
                duplicate_scope: "deck".to_string(),
            },
            tags,
        }
    }
}

/// Shared AnkiConnect client (connection pooling via `reqwest::Client`).
#[derive(Debug, Clone)]
pub struct AnkiConnectClient {
    url: String,
    client: reqwest::Client,
}

impl AnkiConnectClient {
    pub fn new(url: impl Into<String>) -> Result<Self, AnkiError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .no_proxy()
            .build()?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }

    async fn invoke<T: DeserializeOwned>(&self, action: &str, params: Value) -> Result<T, AnkiError> {
        let request = AnkiRequest {
            action,
            version: API_VERSION,
            params,
        };

        let response: AnkiResponse = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await?
            .json()
            .await?;

        if let Some(error) = response.error {
            log::warn!("AnkiConnect {} failed: {}", action, error);
            return Err(AnkiError::Anki(error));
        }

        Ok(serde_json::from_value(response.result)?)
    }

    /// True when Anki is running with AnkiConnect installed.
    pub async fn check_connection(&self) -> bool {
        match self.invoke::<Option<u32>>("version", json!({})).await {
            Ok(version) => version.is_some(),
            Err(e) => {
                log::debug!("AnkiConnect not reachable at {}: {}", self.url, e);
                false
            }
        }
    }

    pub async fn deck_names(&self) -> Result<Vec<String>, AnkiError> {
        self.invoke("deckNames", json!({})).await
    }

    /// Creates `deck_name` if missing and returns its id.
    pub async fn create_deck(&self, deck_name: &str) -> Result<i64, AnkiError> {
        self.invoke("createDeck", json!({ "deck": deck_name })).await
    }

    pub async fn add_note(&self, note: &AnkiNote) -> Result<i64, AnkiError> {
        self.invoke("addNote", json!({ "note": note })).await
    }

    /// Adds notes in one call; a `None` entry marks a note Anki rejected.
    pub async fn add_notes(&self, notes: &[AnkiNote]) -> Result<Vec<Option<i64>>, AnkiError> {
        self.invoke("addNotes", json!({ "notes": notes })).await
    }
}
