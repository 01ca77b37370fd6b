use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Responder};
use futures::StreamExt;
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::console::Console;
use crate::db::document_store::DocumentStore;
use crate::errors::ConsoleError;
use crate::models::course::{Course, ThumbnailSlot};
use crate::services::blob_store::BlobStore;
use crate::services::course_service::CourseRepository;
use crate::services::geocoding_service::PlaceResolver;
use crate::services::image_service::{upload_course_thumbnail, ImageData};
use crate::services::ingestion_service::CourseIngestionPipeline;

/// A KML upload as posted by the course forms: the track file plus,
/// optionally, the draft being edited so unsaved edits are kept.
struct KmlUpload {
    contents: String,
    draft: Option<Course>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestResponse {
    pub course: Course,
    pub coordinates: usize,
    pub location_resolved: bool,
}

#[derive(Deserialize)]
pub struct ThumbnailUpload {
    pub slot: ThumbnailSlot,
    pub image: ImageData,
    pub draft: Option<Course>,
}

async fn read_kml_upload(mut payload: Multipart) -> Result<KmlUpload, ConsoleError> {
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut draft: Option<Course> = None;

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| ConsoleError::BadRequest(e.to_string()))?;
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string);

        let mut bytes = web::BytesMut::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| ConsoleError::BadRequest(e.to_string()))?;
            bytes.extend_from_slice(&chunk);
        }

        match name.as_str() {
            "file" => file = Some((file_name.unwrap_or_default(), bytes.to_vec())),
            "draft" => {
                draft = Some(serde_json::from_slice(&bytes).map_err(|e| {
                    ConsoleError::BadRequest(format!("Invalid draft: {}", e))
                })?)
            }
            _ => {}
        }
    }

    let (file_name, bytes) =
        file.ok_or_else(|| ConsoleError::BadRequest("Missing KML file".to_string()))?;
    if !file_name.to_lowercase().ends_with(".kml") {
        return Err(ConsoleError::BadRequest(format!(
            "Expected a .kml file, got {:?}",
            file_name
        )));
    }
    let contents = String::from_utf8(bytes)
        .map_err(|_| ConsoleError::BadRequest("KML file is not UTF-8".to_string()))?;

    info!("Received KML upload {} ({} bytes)", file_name, contents.len());
    Ok(KmlUpload { contents, draft })
}

async fn ingest_into<R: PlaceResolver>(
    geocoder: &R,
    mut course: Course,
    contents: &str,
) -> Result<IngestResponse, ConsoleError> {
    let outcome = CourseIngestionPipeline::new(geocoder)
        .ingest(&mut course, contents)
        .await?;

    Ok(IngestResponse {
        course,
        coordinates: outcome.coordinates,
        location_resolved: outcome.location_resolved,
    })
}

/*
    GET /add
*/
pub async fn new_draft() -> impl Responder {
    HttpResponse::Ok().json(Course::new_draft())
}

/*
    POST /add
*/
pub async fn create<S, B, R>(
    console: web::Data<Console<S, B, R>>,
    input: web::Json<Course>,
) -> Result<HttpResponse, ConsoleError>
where
    S: DocumentStore + 'static,
    B: BlobStore + 'static,
    R: PlaceResolver + 'static,
{
    let id = CourseRepository::new(&console.store)
        .create(&input.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "id": id })))
}

/*
    POST /add/kml (multipart: file, draft?)
*/
pub async fn ingest_draft<S, B, R>(
    console: web::Data<Console<S, B, R>>,
    payload: Multipart,
) -> Result<HttpResponse, ConsoleError>
where
    S: DocumentStore + 'static,
    B: BlobStore + 'static,
    R: PlaceResolver + 'static,
{
    let upload = read_kml_upload(payload).await?;
    let draft = upload.draft.unwrap_or_else(Course::new_draft);

    let response = ingest_into(&console.geocoder, draft, &upload.contents).await?;
    Ok(HttpResponse::Ok().json(response))
}

/*
    POST /add/thumbnail
*/
pub async fn upload_draft_thumbnail<S, B, R>(
    console: web::Data<Console<S, B, R>>,
    input: web::Json<ThumbnailUpload>,
) -> Result<HttpResponse, ConsoleError>
where
    S: DocumentStore + 'static,
    B: BlobStore + 'static,
    R: PlaceResolver + 'static,
{
    let upload = input.into_inner();
    let mut draft = upload.draft.unwrap_or_else(Course::new_draft);

    let url = upload_course_thumbnail(&console.blobs, None, upload.slot, &upload.image).await?;
    draft.set_thumbnail(upload.slot, url);
    Ok(HttpResponse::Ok().json(draft))
}

/*
    GET /details/{id}
*/
pub async fn get_by_id<S, B, R>(
    console: web::Data<Console<S, B, R>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ConsoleError>
where
    S: DocumentStore + 'static,
    B: BlobStore + 'static,
    R: PlaceResolver + 'static,
{
    let course = CourseRepository::new(&console.store)
        .get(&path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(course))
}

/*
    PUT /details/{id}
*/
pub async fn update<S, B, R>(
    console: web::Data<Console<S, B, R>>,
    path: web::Path<String>,
    input: web::Json<Course>,
) -> Result<HttpResponse, ConsoleError>
where
    S: DocumentStore + 'static,
    B: BlobStore + 'static,
    R: PlaceResolver + 'static,
{
    let id = path.into_inner();
    let mut course = input.into_inner();
    course.id = Some(id.clone());

    CourseRepository::new(&console.store)
        .update(&id, &course)
        .await?;
    Ok(HttpResponse::Ok().json(course))
}

/*
    POST /details/{id}/kml (multipart: file, draft?)
    The ingested course is returned for review; it is not saved.
*/
pub async fn ingest_existing<S, B, R>(
    console: web::Data<Console<S, B, R>>,
    path: web::Path<String>,
    payload: Multipart,
) -> Result<HttpResponse, ConsoleError>
where
    S: DocumentStore + 'static,
    B: BlobStore + 'static,
    R: PlaceResolver + 'static,
{
    let id = path.into_inner();
    let upload = read_kml_upload(payload).await?;

    let mut course = match upload.draft {
        Some(draft) => draft,
        None => CourseRepository::new(&console.store).get(&id).await?,
    };
    course.id = Some(id);

    let response = ingest_into(&console.geocoder, course, &upload.contents).await?;
    Ok(HttpResponse::Ok().json(response))
}

/*
    POST /details/{id}/thumbnail
*/
pub async fn upload_thumbnail<S, B, R>(
    console: web::Data<Console<S, B, R>>,
    path: web::Path<String>,
    input: web::Json<ThumbnailUpload>,
) -> Result<HttpResponse, ConsoleError>
where
    S: DocumentStore + 'static,
    B: BlobStore + 'static,
    R: PlaceResolver + 'static,
{
    let id = path.into_inner();
    let upload = input.into_inner();

    let mut course = match upload.draft {
        Some(draft) => draft,
        None => CourseRepository::new(&console.store).get(&id).await?,
    };
    course.id = Some(id.clone());

    let url = upload_course_thumbnail(&console.blobs, Some(id.as_str()), upload.slot, &upload.image)
        .await?;
    course.set_thumbnail(upload.slot, url);
    Ok(HttpResponse::Ok().json(course))
}
