use serde_json::{Map, Value};

pub type Fields = Map<String, Value>;

/// A stored document: its id plus the field map held under it.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Fields,
}

#[derive(Debug, PartialEq)]
pub enum StoreError {
    NotFound,
    InvalidId(String),
    Decode(String),
    Backend(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::NotFound => write!(f, "Document not found"),
            StoreError::InvalidId(id) => write!(f, "Invalid document id: {}", id),
            StoreError::Decode(err) => write!(f, "Failed to decode document: {}", err),
            StoreError::Backend(err) => write!(f, "Document store error: {}", err),
        }
    }
}

impl std::error::Error for StoreError {}

/// Minimal document-database surface the console works against.
///
/// Writes are single best-effort operations: there is no version check, so
/// two editors saving the same document overwrite each other (last write
/// wins).
pub trait DocumentStore {
    async fn list_collection(&self, collection: &str) -> Result<Vec<Document>, StoreError>;

    async fn get_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    async fn create_document(&self, collection: &str, fields: Fields) -> Result<String, StoreError>;

    /// Sets the given fields on an existing document, leaving the others
    /// untouched.
    async fn update_document(
        &self,
        collection: &str,
        id: &str,
        fields: Fields,
    ) -> Result<(), StoreError>;
}
