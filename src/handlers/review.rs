use axum::extract::{Json, Path, State};

use crate::AppState;
use crate::data::models::{ApiError, CardOut, DueCardsResponse, ReviewRequest, ReviewResponse};
use crate::data::repositories::CardRepository;
use crate::spaced_repetition_system::SqliteCardStore;
use crate::srs::Grade;
use crate::utils::auth::AuthUser;

/// Cards due today or earlier.
pub async fn due_cards(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<DueCardsResponse>, ApiError> {
    let mut conn = state.pool.get()?;
    let cards: Vec<CardOut> = CardRepository::due(&mut conn, user.user_id, state.clock.today())?
        .into_iter()
        .map(CardOut::from)
        .collect();

    Ok(Json(DueCardsResponse {
        count: cards.len(),
        cards,
    }))
}

/// Grades a card and reschedules it.
pub async fn submit_review(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(card_id): Path<i32>,
    Json(payload): Json<ReviewRequest>,
) -> Result<Json<ReviewResponse>, ApiError> {
    let grade = Grade::try_from(payload.rating)?;

    let mut conn = state.pool.get()?;
    let outcome =
        SqliteCardStore::review(&mut conn, user.user_id, card_id, grade, state.clock.as_ref())?;

    log::info!(
        "Card {} reviewed as {:?}, next review {}",
        card_id,
        grade,
        outcome.state.next_review_date
    );
    Ok(Json(outcome.into()))
}
