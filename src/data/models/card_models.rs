use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::schema::cards;
use crate::srs::CardReviewState;

/// Kind of prompt a card carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    #[default]
    Vocab,   // word -> meaning
    Cloze,   // sentence with ___ -> missing word
    Rewrite, // original -> paraphrase
}

impl CardType {
    pub fn as_str(self) -> &'static str {
        match self {
            CardType::Vocab => "vocab",
            CardType::Cloze => "cloze",
            CardType::Rewrite => "rewrite",
        }
    }
}

/// Card row as stored in the database
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = cards, primary_key(card_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Card {
    pub card_id: i32,
    pub user_id: i32,
    pub card_type: String,
    pub front: String,
    pub back: String,
    pub ease_factor: f64,
    pub interval: i32,
    pub repetitions: i32,
    pub next_review: NaiveDate,
    pub created_at: NaiveDateTime,
}

impl Card {
    /// Scheduling snapshot handed to the scheduler.
    pub fn review_state(&self) -> CardReviewState {
        CardReviewState {
            repetitions: u32::try_from(self.repetitions).unwrap_or_default(),
            ease_factor: self.ease_factor,
            interval_days: u32::try_from(self.interval).unwrap_or_default(),
            next_review_date: self.next_review,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = cards)]
pub struct NewCard<'a> {
    pub user_id: i32,
    pub card_type: &'a str,
    pub front: &'a str,
    pub back: &'a str,
    pub ease_factor: f64,
    pub interval: i32,
    pub repetitions: i32,
    pub next_review: NaiveDate,
    pub created_at: NaiveDateTime,
}

impl<'a> NewCard<'a> {
    /// A fresh card, due on the day it is created.
    pub fn new(
        user_id: i32,
        card_type: CardType,
        front: &'a str,
        back: &'a str,
        created_at: NaiveDateTime,
    ) -> Self {
        let state = CardReviewState::new(created_at.date());
        let fields = ReviewStateFields::from(&state);
        Self {
            user_id,
            card_type: card_type.as_str(),
            front,
            back,
            ease_factor: fields.ease_factor,
            interval: fields.interval,
            repetitions: fields.repetitions,
            next_review: fields.next_review,
            created_at,
        }
    }
}

/// Scheduling columns written back after a review
#[derive(Debug, AsChangeset)]
#[diesel(table_name = cards)]
pub struct ReviewStateFields {
    pub ease_factor: f64,
    pub interval: i32,
    pub repetitions: i32,
    pub next_review: NaiveDate,
}

impl From<&CardReviewState> for ReviewStateFields {
    fn from(state: &CardReviewState) -> Self {
        Self {
            ease_factor: state.ease_factor,
            interval: i32::try_from(state.interval_days).unwrap_or(i32::MAX),
            repetitions: i32::try_from(state.repetitions).unwrap_or(i32::MAX),
            next_review: state.next_review_date,
        }
    }
}

/// Partial edit of a card's content
#[derive(Debug, Default, AsChangeset)]
#[diesel(table_name = cards)]
pub struct CardChanges<'a> {
    pub front: Option<&'a str>,
    pub back: Option<&'a str>,
    pub card_type: Option<&'a str>,
}

impl CardChanges<'_> {
    pub fn is_empty(&self) -> bool {
        self.front.is_none() && self.back.is_none() && self.card_type.is_none()
    }
}

/// Card as returned by the API
#[derive(Debug, Serialize, Deserialize)]
pub struct CardOut {
    pub id: i32,
    pub card_type: String,
    pub front: String,
    pub back: String,
    pub next_review: NaiveDate,
    pub created_at: NaiveDateTime,
}

impl From<Card> for CardOut {
    fn from(card: Card) -> Self {
        Self {
            id: card.card_id,
            card_type: card.card_type,
            front: card.front,
            back: card.back,
            next_review: card.next_review,
            created_at: card.created_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CardCandidate {
    #[serde(default)]
    pub card_type: CardType,
    #[validate(length(min = 1, message = "Front must not be empty"))]
    pub front: String,
    #[validate(length(min = 1, message = "Back must not be empty"))]
    pub back: String,
}

/// Request payload for creating several cards at once
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCardsRequest {
    #[validate(nested)]
    pub cards: Vec<CardCandidate>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateCardsResponse {
    pub created: Vec<CardOut>,
}

/// Request payload for turning a looked-up word into a card
#[derive(Debug, Deserialize, Validate)]
pub struct QuickCardRequest {
    #[validate(length(min = 1, message = "Word must not be empty"))]
    pub word: String,
    #[validate(length(min = 1, message = "Meaning must not be empty"))]
    pub meaning: String,
    pub context: Option<String>,
    #[serde(default)]
    pub card_type: CardType,
}

impl QuickCardRequest {
    /// Front and back text for the card this request describes.
    ///
    /// A cloze card blanks every occurrence of the word in its context.
    /// Without a context it falls back to a plain vocab card.
    pub fn sides(&self) -> (String, String) {
        match (&self.card_type, &self.context) {
            (CardType::Cloze, Some(context)) => {
                (context.replace(&self.word, "___"), self.word.clone())
            }
            _ => (self.word.clone(), self.meaning.clone()),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CardUpdate {
    #[validate(length(min = 1, message = "Front must not be empty"))]
    pub front: Option<String>,
    #[validate(length(min = 1, message = "Back must not be empty"))]
    pub back: Option<String>,
    pub card_type: Option<CardType>,
}

impl CardUpdate {
    pub fn changes(&self) -> CardChanges<'_> {
        CardChanges {
            front: self.front.as_deref(),
            back: self.back.as_deref(),
            card_type: self.card_type.map(CardType::as_str),
        }
    }
}
