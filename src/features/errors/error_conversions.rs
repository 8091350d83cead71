use validator::ValidationErrors;

use crate::anki_connect::AnkiError;
use crate::data::models::ApiError;
use crate::srs::InvalidGrade;

impl From<r2d2::Error> for ApiError {
    fn from(err: r2d2::Error) -> Self {
        ApiError::PoolError(err.to_string())
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(err: ValidationErrors) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl From<InvalidGrade> for ApiError {
    fn from(err: InvalidGrade) -> Self {
        ApiError::InvalidArgument(err.to_string())
    }
}

impl From<AnkiError> for ApiError {
    fn from(err: AnkiError) -> Self {
        ApiError::AnkiUnavailable(err.to_string())
    }
}
