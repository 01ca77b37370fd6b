use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::course::ThumbnailSlot;
use crate::services::blob_store::{BlobError, BlobStore};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ImageData {
    pub data: String,
    #[serde(rename = "fileName")]
    pub file_name: String,
    #[serde(rename = "fileType")]
    pub file_type: String,
}

pub struct DecodedImage {
    pub bytes: Vec<u8>,
    pub extension: &'static str,
    pub content_type: String,
}

/// Decodes a base64 image body, with or without a `data:` URL prefix.
pub fn decode_image(image: &ImageData) -> Result<DecodedImage, BlobError> {
    let base64_data = if image.data.starts_with("data:") {
        image.data.split(',').nth(1).ok_or_else(|| {
            BlobError::InvalidImageFormat("Invalid base64 data format".to_string())
        })?
    } else {
        &image.data
    };

    let bytes = general_purpose::STANDARD
        .decode(base64_data)
        .map_err(|e| BlobError::Base64DecodeError(e.to_string()))?;

    Ok(DecodedImage {
        bytes,
        extension: file_extension(&image.file_type)?,
        content_type: image.file_type.clone(),
    })
}

fn file_extension(file_type: &str) -> Result<&'static str, BlobError> {
    match file_type {
        "image/jpeg" | "image/jpg" => Ok("jpg"),
        "image/png" => Ok("png"),
        "image/gif" => Ok("gif"),
        "image/webp" => Ok("webp"),
        _ => Err(BlobError::InvalidImageFormat(format!(
            "Unsupported file type: {}",
            file_type
        ))),
    }
}

/// Uploads one of a course's three thumbnails and returns its public URL.
/// Drafts without an id yet are filed under `draft`.
pub async fn upload_course_thumbnail<B: BlobStore>(
    blobs: &B,
    course_id: Option<&str>,
    slot: ThumbnailSlot,
    image: &ImageData,
) -> Result<String, BlobError> {
    let decoded = decode_image(image)?;

    let timestamp = chrono::Utc::now().timestamp();
    let object_name = format!(
        "courses/{}/{}-{}-{}.{}",
        course_id.unwrap_or("draft"),
        slot.as_str(),
        timestamp,
        Uuid::new_v4(),
        decoded.extension
    );

    let storage_ref = blobs
        .upload(&object_name, decoded.bytes, &decoded.content_type)
        .await?;
    Ok(blobs.public_url(&storage_ref))
}

/// Category thumbnails keep their original file name.
pub async fn upload_category_thumbnail<B: BlobStore>(
    blobs: &B,
    image: &ImageData,
) -> Result<String, BlobError> {
    let decoded = decode_image(image)?;

    let file_name = image
        .file_name
        .rsplit(['/', '\\'])
        .next()
        .filter(|name| !name.is_empty())
        .ok_or_else(|| BlobError::InvalidImageFormat("Missing file name".to_string()))?;

    let storage_ref = blobs
        .upload(
            &format!("thumbnails/{}", file_name),
            decoded.bytes,
            &decoded.content_type,
        )
        .await?;
    Ok(blobs.public_url(&storage_ref))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(data: &str, file_type: &str) -> ImageData {
        ImageData {
            data: data.to_string(),
            file_name: "cat.png".to_string(),
            file_type: file_type.to_string(),
        }
    }

    #[test]
    fn test_data_url_prefix_stripped() {
        let decoded = decode_image(&image("data:image/png;base64,aGVsbG8=", "image/png")).unwrap();
        assert_eq!(decoded.bytes, b"hello");
        assert_eq!(decoded.extension, "png");
    }

    #[test]
    fn test_unsupported_type_rejected() {
        assert!(matches!(
            decode_image(&image("aGVsbG8=", "image/tiff")),
            Err(BlobError::InvalidImageFormat(_))
        ));
    }

    #[test]
    fn test_bad_base64_rejected() {
        assert!(matches!(
            decode_image(&image("not base64!", "image/jpeg")),
            Err(BlobError::Base64DecodeError(_))
        ));
    }
}
