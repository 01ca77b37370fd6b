#![allow(dead_code)]

use actix_web::{web, App};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use outline_admin::console::Console;
use outline_admin::db::document_store::{Document, DocumentStore, Fields, StoreError};
use outline_admin::middleware::password_gate::AdminSecret;
use outline_admin::models::location::{Coordinate, PlaceRecord};
use outline_admin::routes;
use outline_admin::services::blob_store::{BlobError, BlobStore, StorageRef};
use outline_admin::services::geocoding_service::PlaceResolver;

pub const TEST_PASSWORD: &str = "outline-test-secret";

/// Document store kept in memory. Ids are sequential (`doc-1`, `doc-2`, ...).
#[derive(Default)]
pub struct InMemoryDocumentStore {
    collections: Mutex<HashMap<String, Vec<Document>>>,
    next_id: AtomicUsize,
    fail_writes: Mutex<bool>,
    fail_reads_after_write: AtomicBool,
    written: AtomicBool,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, collection: &str, id: &str, fields: Value) {
        let Value::Object(fields) = fields else {
            panic!("test documents must be objects");
        };
        self.collections
            .lock()
            .unwrap()
            .entry(collection.to_string())
            .or_default()
            .push(Document {
                id: id.to_string(),
                fields,
            });
    }

    pub fn raw(&self, collection: &str, id: &str) -> Option<Fields> {
        self.collections
            .lock()
            .unwrap()
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| d.id == id))
            .map(|d| d.fields.clone())
    }

    pub fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.lock().unwrap() = fail;
    }

    /// Once any write lands, every later read is rejected.
    pub fn set_fail_reads_after_write(&self, fail: bool) {
        self.fail_reads_after_write.store(fail, Ordering::SeqCst);
    }

    fn check_readable(&self) -> Result<(), StoreError> {
        if self.fail_reads_after_write.load(Ordering::SeqCst) && self.written.load(Ordering::SeqCst) {
            Err(StoreError::Backend("read rejected".to_string()))
        } else {
            Ok(())
        }
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if *self.fail_writes.lock().unwrap() {
            Err(StoreError::Backend("write rejected".to_string()))
        } else {
            Ok(())
        }
    }
}

impl DocumentStore for InMemoryDocumentStore {
    async fn list_collection(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        self.check_readable()?;
        Ok(self
            .collections
            .lock()
            .unwrap()
            .get(collection)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        self.check_readable()?;
        Ok(self
            .collections
            .lock()
            .unwrap()
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| d.id == id).cloned()))
    }

    async fn create_document(&self, collection: &str, fields: Fields) -> Result<String, StoreError> {
        self.check_writable()?;
        let id = format!("doc-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        self.collections
            .lock()
            .unwrap()
            .entry(collection.to_string())
            .or_default()
            .push(Document {
                id: id.clone(),
                fields,
            });
        self.written.store(true, Ordering::SeqCst);
        Ok(id)
    }

    async fn update_document(
        &self,
        collection: &str,
        id: &str,
        fields: Fields,
    ) -> Result<(), StoreError> {
        self.check_writable()?;
        let mut collections = self.collections.lock().unwrap();
        let document = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| d.id == id))
            .ok_or(StoreError::NotFound)?;
        for (key, value) in fields {
            document.fields.insert(key, value);
        }
        self.written.store(true, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryBlobStore {
    pub objects: Mutex<HashMap<String, (Vec<u8>, String)>>,
}

impl BlobStore for InMemoryBlobStore {
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<StorageRef, BlobError> {
        self.objects
            .lock()
            .unwrap()
            .insert(path.to_string(), (bytes, content_type.to_string()));
        Ok(StorageRef {
            path: path.to_string(),
        })
    }

    fn public_url(&self, storage_ref: &StorageRef) -> String {
        format!("https://blobs.test/{}", storage_ref.path)
    }
}

/// Geocoder that answers every coordinate with the same canned place (or
/// nothing) and records what it was asked.
#[derive(Default)]
pub struct StubGeocoder {
    place: Option<PlaceRecord>,
    pub requests: Mutex<Vec<Coordinate>>,
}

impl StubGeocoder {
    pub fn resolving(place: PlaceRecord) -> Self {
        Self {
            place: Some(place),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl PlaceResolver for StubGeocoder {
    async fn resolve(&self, coordinate: Coordinate) -> Option<PlaceRecord> {
        self.requests.lock().unwrap().push(coordinate);
        self.place.clone()
    }
}

pub type TestConsole = Console<InMemoryDocumentStore, InMemoryBlobStore, StubGeocoder>;

pub fn seoul_place() -> PlaceRecord {
    PlaceRecord {
        name: "Jung-gu, Seoul, South Korea".to_string(),
        iso_country_code: "KR".to_string(),
        administrative_area: "Seoul".to_string(),
        sub_locality: "Jung-gu".to_string(),
        ..Default::default()
    }
}

pub fn kml_with(coordinates: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
  <Document>
    <Placemark>
      <name>Course</name>
      <LineString>
        <coordinates>{}</coordinates>
      </LineString>
    </Placemark>
  </Document>
</kml>"#,
        coordinates
    )
}

pub fn create_app(
    console: web::Data<TestConsole>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(console)
        .app_data(web::Data::new(AdminSecret::new(TEST_PASSWORD)))
        .configure(routes::config::<InMemoryDocumentStore, InMemoryBlobStore, StubGeocoder>)
}
