use log::{error, info, warn};
use serde_json::Value;

use crate::db::document_store::{Document, DocumentStore, Fields, StoreError};
use crate::models::course::Course;

pub const COURSE_COLLECTION: &str = "allGPSArtCourses";

pub(crate) fn decode<T: serde::de::DeserializeOwned>(document: Document) -> Result<T, StoreError> {
    serde_json::from_value(Value::Object(document.fields))
        .map_err(|e| StoreError::Decode(format!("{}: {}", document.id, e)))
}

pub(crate) fn encode<T: serde::Serialize>(value: &T) -> Result<Fields, StoreError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(mut fields)) => {
            // The id lives on the document, never inside it.
            fields.remove("id");
            Ok(fields)
        }
        Ok(_) => Err(StoreError::Decode("expected an object".to_string())),
        Err(e) => Err(StoreError::Decode(e.to_string())),
    }
}

pub struct CourseRepository<'a, S: DocumentStore> {
    store: &'a S,
}

impl<'a, S: DocumentStore> CourseRepository<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Every course that decodes; a malformed document is logged and left
    /// out rather than failing the whole listing.
    pub async fn list(&self) -> Result<Vec<Course>, StoreError> {
        let documents = self.store.list_collection(COURSE_COLLECTION).await?;

        let mut courses = Vec::with_capacity(documents.len());
        for document in documents {
            let id = document.id.clone();
            match decode::<Course>(document) {
                Ok(mut course) => {
                    course.id = Some(id);
                    courses.push(course);
                }
                Err(e) => warn!("Skipping course document: {}", e),
            }
        }
        Ok(courses)
    }

    pub async fn get(&self, id: &str) -> Result<Course, StoreError> {
        let document = self
            .store
            .get_by_id(COURSE_COLLECTION, id)
            .await?
            .ok_or(StoreError::NotFound)?;

        let mut course: Course = decode(document)?;
        course.id = Some(id.to_string());
        Ok(course)
    }

    pub async fn create(&self, course: &Course) -> Result<String, StoreError> {
        let id = self
            .store
            .create_document(COURSE_COLLECTION, encode(course)?)
            .await
            .inspect_err(|e| error!("Failed to create course: {}", e))?;

        info!("Created course {} ({})", id, course.course_name);
        Ok(id)
    }

    /// Writes every editable field of the course. No version check is made;
    /// a concurrent editor's save is overwritten.
    pub async fn update(&self, id: &str, course: &Course) -> Result<(), StoreError> {
        self.store
            .update_document(COURSE_COLLECTION, id, encode(course)?)
            .await
            .inspect_err(|e| error!("Failed to update course {}: {}", id, e))?;

        info!("Updated course {}", id);
        Ok(())
    }
}
