use std::env;

use crate::anki_connect;

/// Runtime settings, read from the environment (and `.env` via dotenv).
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub bind_addr: String,
    pub anki_connect_url: String,
    pub anki_default_deck: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: "flashcards.db".into(),
            bind_addr: "127.0.0.1:8000".into(),
            anki_connect_url: anki_connect::DEFAULT_URL.into(),
            anki_default_deck: "English Learning".into(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            bind_addr: env::var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            anki_connect_url: env::var("ANKI_CONNECT_URL").unwrap_or(defaults.anki_connect_url),
            anki_default_deck: env::var("ANKI_DEFAULT_DECK")
                .unwrap_or(defaults.anki_default_deck),
        }
    }

    /// Deck named in a request, or the configured default.
    pub fn deck_or_default(&self, requested: Option<String>) -> String {
        requested.unwrap_or_else(|| self.anki_default_deck.clone())
    }
}
