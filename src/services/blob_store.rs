use google_cloud_storage::client::{Client, ClientConfig};
use google_cloud_storage::http::objects::upload::{Media, UploadObjectRequest, UploadType};
use log::info;

#[derive(Debug)]
pub enum BlobError {
    Base64DecodeError(String),
    InvalidImageFormat(String),
    UploadError(String),
    EnvironmentError(String),
}

impl std::fmt::Display for BlobError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BlobError::Base64DecodeError(err) => write!(f, "Base64 decode error: {}", err),
            BlobError::InvalidImageFormat(err) => write!(f, "Invalid image format: {}", err),
            BlobError::UploadError(err) => write!(f, "Upload error: {}", err),
            BlobError::EnvironmentError(err) => write!(f, "Environment error: {}", err),
        }
    }
}

impl std::error::Error for BlobError {}

/// Location of an uploaded object inside the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageRef {
    pub path: String,
}

pub trait BlobStore {
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<StorageRef, BlobError>;

    fn public_url(&self, storage_ref: &StorageRef) -> String;
}

/// [`BlobStore`] over a Google Cloud Storage bucket.
pub struct GcsBlobStore {
    client: Client,
    bucket_name: String,
    public_base_url: String,
}

impl GcsBlobStore {
    pub async fn new(bucket_name: &str, public_base_url: &str) -> Result<Self, BlobError> {
        let config = ClientConfig::default()
            .with_auth()
            .await
            .map_err(|e| BlobError::EnvironmentError(format!("Failed to create GCS client: {}", e)))?;

        Ok(Self {
            client: Client::new(config),
            bucket_name: bucket_name.to_string(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl BlobStore for GcsBlobStore {
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<StorageRef, BlobError> {
        let mut media = Media::new(path.to_string());
        media.content_type = content_type.to_string().into();

        let upload_type = UploadType::Simple(media);
        let upload_request = UploadObjectRequest {
            bucket: self.bucket_name.clone(),
            ..Default::default()
        };

        self.client
            .upload_object(&upload_request, bytes, &upload_type)
            .await
            .map_err(|e| BlobError::UploadError(format!("Failed to upload to GCS: {}", e)))?;

        info!("Uploaded {} to bucket {}", path, self.bucket_name);
        Ok(StorageRef {
            path: path.to_string(),
        })
    }

    fn public_url(&self, storage_ref: &StorageRef) -> String {
        format!(
            "{}/{}/{}",
            self.public_base_url, self.bucket_name, storage_ref.path
        )
    }
}
