use axum::extract::{Json, Path, State};
use diesel::prelude::*;
use validator::Validate;

use crate::AppState;
use crate::data::models::{
    ApiError, CardOut, CardUpdate, CreateCardsRequest, CreateCardsResponse, QuickCardRequest,
    StatusResponse,
};
use crate::data::repositories::CardRepository;
use crate::utils::auth::AuthUser;

pub async fn list_cards(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<CardOut>>, ApiError> {
    let mut conn = state.pool.get()?;
    let cards = CardRepository::list(&mut conn, user.user_id)?;
    Ok(Json(cards.into_iter().map(CardOut::from).collect()))
}

pub async fn create_cards(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<CreateCardsRequest>,
) -> Result<Json<CreateCardsResponse>, ApiError> {
    payload.validate()?;

    let now = state.clock.now();
    let mut conn = state.pool.get()?;
    let created = conn.transaction::<_, diesel::result::Error, _>(|conn| {
        payload
            .cards
            .iter()
            .map(|c| CardRepository::create(conn, user.user_id, c.card_type, &c.front, &c.back, now))
            .collect::<Result<Vec<_>, _>>()
    })?;

    log::info!("User {} created {} cards", user.user_id, created.len());
    Ok(Json(CreateCardsResponse {
        created: created.into_iter().map(CardOut::from).collect(),
    }))
}

pub async fn quick_create_card(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<QuickCardRequest>,
) -> Result<Json<CardOut>, ApiError> {
    payload.validate()?;

    let (front, back) = payload.sides();
    let mut conn = state.pool.get()?;
    let card = CardRepository::create(
        &mut conn,
        user.user_id,
        payload.card_type,
        &front,
        &back,
        state.clock.now(),
    )?;

    Ok(Json(card.into()))
}

pub async fn update_card(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(card_id): Path<i32>,
    Json(payload): Json<CardUpdate>,
) -> Result<Json<CardOut>, ApiError> {
    payload.validate()?;

    let mut conn = state.pool.get()?;
    CardRepository::update(&mut conn, user.user_id, card_id, &payload.changes())?
        .map(|card| Json(card.into()))
        .ok_or_else(|| ApiError::NotFound("Card".into()))
}

pub async fn delete_card(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(card_id): Path<i32>,
) -> Result<Json<StatusResponse>, ApiError> {
    let mut conn = state.pool.get()?;
    if !CardRepository::delete(&mut conn, user.user_id, card_id)? {
        return Err(ApiError::NotFound("Card".into()));
    }

    Ok(Json(StatusResponse {
        status: "deleted".into(),
    }))
}
