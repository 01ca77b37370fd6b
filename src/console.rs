use crate::db::document_store::DocumentStore;
use crate::services::blob_store::BlobStore;
use crate::services::geocoding_service::PlaceResolver;

/// Handles to the managed backend, built once at start-up and shared by
/// every screen.
pub struct Console<S, B, R>
where
    S: DocumentStore,
    B: BlobStore,
    R: PlaceResolver,
{
    pub store: S,
    pub blobs: B,
    pub geocoder: R,
}

impl<S, B, R> Console<S, B, R>
where
    S: DocumentStore,
    B: BlobStore,
    R: PlaceResolver,
{
    pub fn new(store: S, blobs: B, geocoder: R) -> Self {
        Self {
            store,
            blobs,
            geocoder,
        }
    }
}
