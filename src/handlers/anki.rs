use axum::extract::{Json, Path, State};
use validator::Validate;

use crate::AppState;
use crate::anki_connect::{APP_TAG, AnkiNote};
use crate::data::models::{
    AnkiStatusResponse, ApiError, Card, DeckListResponse, ExportAllRequest, ExportAllResponse,
    ExportRequest, ExportResponse,
};
use crate::data::repositories::CardRepository;
use crate::utils::auth::AuthUser;

fn note_for(card: &Card, deck_name: &str) -> AnkiNote {
    AnkiNote::basic(
        deck_name,
        &card.front,
        &card.back,
        vec![APP_TAG.to_string(), card.card_type.clone()],
    )
}

pub async fn status(State(state): State<AppState>) -> Json<AnkiStatusResponse> {
    let response = if state.anki.check_connection().await {
        AnkiStatusResponse {
            connected: true,
            message: "Anki is running and AnkiConnect is available".into(),
        }
    } else {
        AnkiStatusResponse {
            connected: false,
            message: "Cannot connect to Anki. Make sure Anki is running with AnkiConnect installed."
                .into(),
        }
    };
    Json(response)
}

pub async fn decks(State(state): State<AppState>) -> Result<Json<DeckListResponse>, ApiError> {
    let decks = state.anki.deck_names().await?;
    Ok(Json(DeckListResponse { decks }))
}

pub async fn export_card(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(card_id): Path<i32>,
    Json(payload): Json<ExportRequest>,
) -> Result<Json<ExportResponse>, ApiError> {
    payload.validate()?;

    let card = {
        let mut conn = state.pool.get()?;
        CardRepository::find_owned(&mut conn, user.user_id, card_id)?
            .ok_or_else(|| ApiError::NotFound("Card".into()))?
    };
    let deck_name = state.settings.deck_or_default(payload.deck_name);

    state.anki.create_deck(&deck_name).await?;
    match state.anki.add_note(&note_for(&card, &deck_name)).await {
        Ok(note_id) => Ok(Json(ExportResponse {
            success: true,
            note_id: Some(note_id),
            message: format!("Card exported to deck '{}'", deck_name),
        })),
        Err(e) if e.is_duplicate() => Ok(Json(ExportResponse {
            success: false,
            note_id: None,
            message: "This card already exists in Anki".into(),
        })),
        Err(e) => Err(e.into()),
    }
}

pub async fn export_all(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<ExportAllRequest>,
) -> Result<Json<ExportAllResponse>, ApiError> {
    payload.validate()?;

    let cards = {
        let mut conn = state.pool.get()?;
        // An empty selection exports everything, same as no selection.
        let selection = payload.card_ids.as_deref().filter(|ids| !ids.is_empty());
        CardRepository::select(&mut conn, user.user_id, selection)?
    };

    if cards.is_empty() {
        return Ok(Json(ExportAllResponse {
            success: true,
            exported_count: 0,
            failed_count: 0,
            message: "No cards to export".into(),
        }));
    }

    let deck_name = state.settings.deck_or_default(payload.deck_name);
    let notes: Vec<AnkiNote> = cards.iter().map(|c| note_for(c, &deck_name)).collect();

    state.anki.create_deck(&deck_name).await?;
    let results = state.anki.add_notes(&notes).await?;

    let exported_count = results.iter().filter(|r| r.is_some()).count();
    let failed_count = results.len() - exported_count;
    log::info!(
        "Exported {} of {} cards to '{}'",
        exported_count,
        results.len(),
        deck_name
    );

    Ok(Json(ExportAllResponse {
        success: true,
        exported_count,
        failed_count,
        message: format!("Exported {} cards to '{}'", exported_count, deck_name),
    }))
}
