use log::{error, info, warn};
use serde_json::{json, Map};

use crate::db::document_store::{DocumentStore, StoreError};
use crate::models::category::Category;
use crate::services::category_ordering::CategorySelection;
use crate::services::course_service::decode;

pub const CATEGORY_COLLECTION: &str = "artCategories";

pub struct CategoryRepository<'a, S: DocumentStore> {
    store: &'a S,
}

impl<'a, S: DocumentStore> CategoryRepository<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Category>, StoreError> {
        let documents = self.store.list_collection(CATEGORY_COLLECTION).await?;

        let mut categories = Vec::with_capacity(documents.len());
        for document in documents {
            let id = document.id.clone();
            match decode::<Category>(document) {
                Ok(mut category) => {
                    category.id = Some(id);
                    categories.push(category);
                }
                Err(e) => warn!("Skipping category document: {}", e),
            }
        }
        Ok(categories)
    }

    pub async fn get(&self, id: &str) -> Result<Category, StoreError> {
        let document = self
            .store
            .get_by_id(CATEGORY_COLLECTION, id)
            .await?
            .ok_or(StoreError::NotFound)?;

        let mut category: Category = decode(document)?;
        category.id = Some(id.to_string());
        Ok(category)
    }

    /// Persists the selection's ordered ids as `courseIdList`, plus the
    /// thumbnail URL when one is given. Ordinals are never written; they are
    /// re-derived from list position on the next load.
    pub async fn save(
        &self,
        id: &str,
        selection: &CategorySelection,
        thumbnail_url: Option<String>,
    ) -> Result<(), StoreError> {
        let mut fields = Map::new();
        fields.insert("courseIdList".to_string(), json!(selection.course_ids()));
        if let Some(url) = thumbnail_url {
            fields.insert("thumbnailUrl".to_string(), json!(url));
        }

        self.store
            .update_document(CATEGORY_COLLECTION, id, fields)
            .await
            .inspect_err(|e| error!("Failed to save category {}: {}", id, e))?;

        info!("Saved category {} with {} courses", id, selection.len());
        Ok(())
    }
}
