// spaced_repetition_system.rs
use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::clock::Clock;
use crate::data::models::{ApiError, NewReviewLog, ReviewOutcome, ReviewStateFields};
use crate::data::repositories::CardRepository;
use crate::schema::{cards, review_logs};
use crate::srs::{CardReviewState, Grade, compute_next_review};

/// Persistence the review flow needs from a card store
pub trait CardStore {
    type Error;

    fn load(&mut self, card_id: i32) -> Result<CardReviewState, Self::Error>;

    fn save(&mut self, card_id: i32, state: &CardReviewState) -> Result<(), Self::Error>;

    fn append_log(
        &mut self,
        card_id: i32,
        grade: Grade,
        reviewed_at: NaiveDateTime,
    ) -> Result<(), Self::Error>;
}

/// Grades one review: load, schedule, save, log.
///
/// Callers must run this inside whatever unit of work makes the four store
/// calls atomic for `card_id`.
pub fn record_review<S: CardStore>(
    store: &mut S,
    card_id: i32,
    grade: Grade,
    clock: &dyn Clock,
) -> Result<ReviewOutcome, S::Error> {
    let now = clock.now();
    let current = store.load(card_id)?;
    let state = compute_next_review(current, grade, now.date());

    store.save(card_id, &state)?;
    store.append_log(card_id, grade, now)?;

    log::debug!(
        "Card {} graded {:?}: interval {} -> {}, ease {} -> {}",
        card_id,
        grade,
        current.interval_days,
        state.interval_days,
        current.ease_factor,
        state.ease_factor
    );

    Ok(ReviewOutcome {
        card_id,
        grade,
        state,
    })
}

/// Card store over SQLite, scoped to the cards of one user
pub struct SqliteCardStore<'a> {
    conn: &'a mut SqliteConnection,
    user_id: i32,
}

impl<'a> SqliteCardStore<'a> {
    pub fn new(conn: &'a mut SqliteConnection, user_id: i32) -> Self {
        SqliteCardStore { conn, user_id }
    }

    /// Records a review of `card_id` under SQLite's write lock.
    ///
    /// `BEGIN IMMEDIATE` takes the lock before the card is read, so two
    /// reviews of the same card run one after the other.
    pub fn review(
        conn: &mut SqliteConnection,
        user_id: i32,
        card_id: i32,
        grade: Grade,
        clock: &dyn Clock,
    ) -> Result<ReviewOutcome, ApiError> {
        conn.immediate_transaction(|conn| {
            let mut store = SqliteCardStore::new(conn, user_id);
            record_review(&mut store, card_id, grade, clock)
        })
    }
}

impl CardStore for SqliteCardStore<'_> {
    type Error = ApiError;

    fn load(&mut self, card_id: i32) -> Result<CardReviewState, ApiError> {
        CardRepository::find_owned(self.conn, self.user_id, card_id)?
            .map(|card| card.review_state())
            .ok_or_else(|| ApiError::NotFound("Card".into()))
    }

    fn save(&mut self, card_id: i32, state: &CardReviewState) -> Result<(), ApiError> {
        diesel::update(
            cards::table
                .filter(cards::card_id.eq(card_id))
                .filter(cards::user_id.eq(self.user_id)),
        )
        .set(&ReviewStateFields::from(state))
        .execute(self.conn)?;
        Ok(())
    }

    fn append_log(
        &mut self,
        card_id: i32,
        grade: Grade,
        reviewed_at: NaiveDateTime,
    ) -> Result<(), ApiError> {
        diesel::insert_into(review_logs::table)
            .values(&NewReviewLog {
                card_id,
                rating: grade.ordinal(),
                reviewed_at,
            })
            .execute(self.conn)?;
        Ok(())
    }
}
