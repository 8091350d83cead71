use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use diesel::sql_types::Integer;

use crate::data::models::{Card, CardChanges, CardType, NewCard, ReviewLog};
use crate::schema::{cards, review_logs};

pub struct CardRepository;

impl CardRepository {
    pub fn create(
        conn: &mut SqliteConnection,
        user_id: i32,
        card_type: CardType,
        front: &str,
        back: &str,
        now: NaiveDateTime,
    ) -> Result<Card, diesel::result::Error> {
        diesel::insert_into(cards::table)
            .values(&NewCard::new(user_id, card_type, front, back, now))
            .execute(conn)?;

        let card_id = diesel::select(diesel::dsl::sql::<Integer>("last_insert_rowid()"))
            .get_result::<i32>(conn)?;

        cards::table
            .find(card_id)
            .select(Card::as_select())
            .first(conn)
    }

    /// Looks up a card only if it belongs to `user_id`.
    pub fn find_owned(
        conn: &mut SqliteConnection,
        user_id: i32,
        card_id: i32,
    ) -> Result<Option<Card>, diesel::result::Error> {
        cards::table
            .filter(cards::card_id.eq(card_id))
            .filter(cards::user_id.eq(user_id))
            .select(Card::as_select())
            .first(conn)
            .optional()
    }

    /// All cards of a user, newest first.
    pub fn list(
        conn: &mut SqliteConnection,
        user_id: i32,
    ) -> Result<Vec<Card>, diesel::result::Error> {
        cards::table
            .filter(cards::user_id.eq(user_id))
            .order((cards::created_at.desc(), cards::card_id.desc()))
            .select(Card::as_select())
            .load(conn)
    }

    /// Cards whose next review falls on or before `today`, most overdue first.
    pub fn due(
        conn: &mut SqliteConnection,
        user_id: i32,
        today: NaiveDate,
    ) -> Result<Vec<Card>, diesel::result::Error> {
        cards::table
            .filter(cards::user_id.eq(user_id))
            .filter(cards::next_review.le(today))
            .order((cards::next_review.asc(), cards::card_id.asc()))
            .select(Card::as_select())
            .load(conn)
    }

    /// Cards of a user restricted to `card_ids`, or every card when `None`.
    pub fn select(
        conn: &mut SqliteConnection,
        user_id: i32,
        card_ids: Option<&[i32]>,
    ) -> Result<Vec<Card>, diesel::result::Error> {
        let mut query = cards::table
            .filter(cards::user_id.eq(user_id))
            .select(Card::as_select())
            .into_boxed();

        if let Some(ids) = card_ids {
            query = query.filter(cards::card_id.eq_any(ids.to_vec()));
        }

        query.order(cards::card_id.asc()).load(conn)
    }

    pub fn update(
        conn: &mut SqliteConnection,
        user_id: i32,
        card_id: i32,
        changes: &CardChanges<'_>,
    ) -> Result<Option<Card>, diesel::result::Error> {
        if changes.is_empty() {
            return Self::find_owned(conn, user_id, card_id);
        }

        let updated = diesel::update(
            cards::table
                .filter(cards::card_id.eq(card_id))
                .filter(cards::user_id.eq(user_id)),
        )
        .set(changes)
        .execute(conn)?;

        if updated == 0 {
            return Ok(None);
        }
        Self::find_owned(conn, user_id, card_id)
    }

    /// Deletes a card and its review history. Returns false when the card
    /// does not exist or belongs to someone else.
    pub fn delete(
        conn: &mut SqliteConnection,
        user_id: i32,
        card_id: i32,
    ) -> Result<bool, diesel::result::Error> {
        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            if Self::find_owned(conn, user_id, card_id)?.is_none() {
                return Ok(false);
            }
            diesel::delete(review_logs::table.filter(review_logs::card_id.eq(card_id)))
                .execute(conn)?;
            diesel::delete(cards::table.filter(cards::card_id.eq(card_id))).execute(conn)?;
            Ok(true)
        })
    }

    /// Review history of a card, oldest first.
    pub fn review_logs(
        conn: &mut SqliteConnection,
        card_id: i32,
    ) -> Result<Vec<ReviewLog>, diesel::result::Error> {
        review_logs::table
            .filter(review_logs::card_id.eq(card_id))
            .order(review_logs::log_id.asc())
            .select(ReviewLog::as_select())
            .load(conn)
    }
}
