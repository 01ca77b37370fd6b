use futures::TryStreamExt;
use log::{info, warn};
use mongodb::{
    bson::{doc, oid::ObjectId, Bson, Document as BsonDocument},
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client, Collection,
};
use std::sync::Arc;
use std::time::Duration;

use crate::db::document_store::{Document, DocumentStore, Fields, StoreError};

pub async fn create_mongo_client(uri: &str) -> Result<Arc<Client>, StoreError> {
    info!("Connecting to MongoDB");

    let mut client_options = ClientOptions::parse(uri)
        .await
        .map_err(|e| StoreError::Backend(format!("MongoDB URI may be incorrect: {}", e)))?;

    client_options.connect_timeout = Some(Duration::from_secs(10));
    client_options.server_selection_timeout = Some(Duration::from_secs(10));
    client_options.max_pool_size = Some(10);
    client_options.min_pool_size = Some(1);

    let server_api = ServerApi::builder().version(ServerApiVersion::V1).build();
    client_options.server_api = Some(server_api);

    let client = Client::with_options(client_options)
        .map_err(|e| StoreError::Backend(format!("Failed to create MongoDB client: {}", e)))?;

    // A failed ping is not fatal; reads and writes report their own errors.
    match client
        .database("admin")
        .run_command(doc! {"ping": 1})
        .await
    {
        Ok(_) => info!("Connected to MongoDB and verified with ping"),
        Err(e) => warn!("Connected to MongoDB but ping failed: {}", e),
    }

    Ok(Arc::new(client))
}

/// [`DocumentStore`] over one MongoDB database. Document ids are the hex
/// form of the `_id` ObjectId.
#[derive(Clone)]
pub struct MongoDocumentStore {
    client: Arc<Client>,
    database: String,
}

impl MongoDocumentStore {
    pub fn new(client: Arc<Client>, database: &str) -> Self {
        Self {
            client,
            database: database.to_string(),
        }
    }

    fn collection(&self, name: &str) -> Collection<BsonDocument> {
        self.client.database(&self.database).collection(name)
    }
}

fn parse_id(id: &str) -> Result<ObjectId, StoreError> {
    ObjectId::parse_str(id).map_err(|_| StoreError::InvalidId(id.to_string()))
}

fn to_bson_document(fields: Fields) -> Result<BsonDocument, StoreError> {
    bson::to_document(&fields).map_err(|e| StoreError::Decode(e.to_string()))
}

fn from_bson_document(mut raw: BsonDocument) -> Result<Document, StoreError> {
    let id = match raw.remove("_id") {
        Some(Bson::ObjectId(oid)) => oid.to_hex(),
        Some(Bson::String(id)) => id,
        other => return Err(StoreError::Decode(format!("unexpected _id: {:?}", other))),
    };

    match Bson::Document(raw).into_relaxed_extjson() {
        serde_json::Value::Object(fields) => Ok(Document { id, fields }),
        _ => Err(StoreError::Decode(format!("document {} is not an object", id))),
    }
}

impl DocumentStore for MongoDocumentStore {
    async fn list_collection(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let cursor = self
            .collection(collection)
            .find(doc! {})
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        let raw: Vec<BsonDocument> = cursor
            .try_collect()
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        raw.into_iter().map(from_bson_document).collect()
    }

    async fn get_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let filter = doc! { "_id": parse_id(id)? };

        match self.collection(collection).find_one(filter).await {
            Ok(Some(raw)) => from_bson_document(raw).map(Some),
            Ok(None) => Ok(None),
            Err(e) => Err(StoreError::Backend(e.to_string())),
        }
    }

    async fn create_document(&self, collection: &str, fields: Fields) -> Result<String, StoreError> {
        let document = to_bson_document(fields)?;

        let result = self
            .collection(collection)
            .insert_one(document)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        match result.inserted_id {
            Bson::ObjectId(oid) => Ok(oid.to_hex()),
            Bson::String(id) => Ok(id),
            other => Err(StoreError::Decode(format!("unexpected inserted id: {:?}", other))),
        }
    }

    async fn update_document(
        &self,
        collection: &str,
        id: &str,
        fields: Fields,
    ) -> Result<(), StoreError> {
        let filter = doc! { "_id": parse_id(id)? };
        let update = doc! { "$set": to_bson_document(fields)? };

        let result = self
            .collection(collection)
            .update_one(filter, update)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        if result.matched_count == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
