use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;

use crate::db::document_store::StoreError;
use crate::services::blob_store::BlobError;
use crate::services::kml_parser::ParseError;

/// Failures a console screen reports back to the operator. Nothing here
/// is retried; the operator re-uploads or re-saves.
#[derive(Debug)]
pub enum ConsoleError {
    Parse(ParseError),
    Store(StoreError),
    Blob(BlobError),
    BadRequest(String),
}

impl std::fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConsoleError::Parse(err) => write!(f, "{}", err),
            ConsoleError::Store(err) => write!(f, "{}", err),
            ConsoleError::Blob(err) => write!(f, "{}", err),
            ConsoleError::BadRequest(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ConsoleError {}

impl From<ParseError> for ConsoleError {
    fn from(err: ParseError) -> Self {
        ConsoleError::Parse(err)
    }
}

impl From<StoreError> for ConsoleError {
    fn from(err: StoreError) -> Self {
        ConsoleError::Store(err)
    }
}

impl From<BlobError> for ConsoleError {
    fn from(err: BlobError) -> Self {
        ConsoleError::Blob(err)
    }
}

impl ResponseError for ConsoleError {
    fn status_code(&self) -> StatusCode {
        match self {
            ConsoleError::Parse(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ConsoleError::Store(StoreError::NotFound) => StatusCode::NOT_FOUND,
            ConsoleError::Store(StoreError::InvalidId(_)) => StatusCode::BAD_REQUEST,
            ConsoleError::Store(_) => StatusCode::BAD_GATEWAY,
            ConsoleError::Blob(BlobError::InvalidImageFormat(_))
            | ConsoleError::Blob(BlobError::Base64DecodeError(_)) => StatusCode::BAD_REQUEST,
            ConsoleError::Blob(_) => StatusCode::BAD_GATEWAY,
            ConsoleError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}
