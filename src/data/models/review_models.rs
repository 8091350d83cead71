use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::data::models::CardOut;
use crate::schema::review_logs;
use crate::srs::{CardReviewState, Grade};

/// Append-only record of one graded review
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = review_logs)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ReviewLog {
    pub log_id: i32,
    pub card_id: i32,
    pub rating: i32,
    pub reviewed_at: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = review_logs)]
pub struct NewReviewLog {
    pub card_id: i32,
    pub rating: i32,
    pub reviewed_at: NaiveDateTime,
}

/// Result of applying one review to a card
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReviewOutcome {
    pub card_id: i32,
    pub grade: Grade,
    pub state: CardReviewState,
}

#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub rating: i64, // 0=Again, 1=Hard, 2=Good, 3=Easy
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReviewResponse {
    pub card_id: i32,
    pub rating: i32,
    pub new_interval: u32,
    pub new_ease_factor: f64,
    pub next_review: NaiveDate,
}

impl From<ReviewOutcome> for ReviewResponse {
    fn from(outcome: ReviewOutcome) -> Self {
        Self {
            card_id: outcome.card_id,
            rating: outcome.grade.ordinal(),
            new_interval: outcome.state.interval_days,
            new_ease_factor: outcome.state.ease_factor,
            next_review: outcome.state.next_review_date,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DueCardsResponse {
    pub cards: Vec<CardOut>,
    pub count: usize,
}
