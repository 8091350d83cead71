pub mod anki_models;
pub mod auth_models;
pub mod card_models;
pub mod common_models;
pub mod error_models;
pub mod review_models;

pub use anki_models::{
    AnkiStatusResponse, DeckListResponse, ExportAllRequest, ExportAllResponse, ExportRequest,
    ExportResponse,
};
pub use auth_models::{NewApiKey, NewUser, User};
pub use card_models::{
    Card, CardCandidate, CardChanges, CardOut, CardType, CardUpdate, CreateCardsRequest,
    CreateCardsResponse, NewCard, QuickCardRequest, ReviewStateFields,
};
pub use common_models::{HealthResponse, StatusResponse};
pub use error_models::ApiError;
pub use review_models::{
    DueCardsResponse, NewReviewLog, ReviewLog, ReviewOutcome, ReviewRequest, ReviewResponse,
};
