use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::console::Console;
use crate::db::document_store::DocumentStore;
use crate::errors::ConsoleError;
use crate::models::category::Category;
use crate::services::blob_store::BlobStore;
use crate::services::category_ordering::{CategorySelection, SelectionView};
use crate::services::category_service::CategoryRepository;
use crate::services::course_service::CourseRepository;
use crate::services::dashboard::sort_by_name;
use crate::services::geocoding_service::PlaceResolver;
use crate::services::image_service::{upload_category_thumbnail, ImageData};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedCategory {
    pub title: String,
    pub thumbnail_url: Option<String>,
    #[serde(flatten)]
    pub selection: SelectionView,
}

impl From<&Category> for SelectedCategory {
    fn from(category: &Category) -> Self {
        Self {
            title: category.title.clone(),
            thumbnail_url: category.thumbnail_url.clone(),
            selection: SelectionView::from(&CategorySelection::select(category)),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleRequest {
    pub course_id_list: Vec<String>,
    pub course_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveCategoryRequest {
    pub course_id_list: Vec<String>,
    pub thumbnail: Option<ImageData>,
}

/*
    GET /categoryeditor
    The first category starts selected; courses come sorted by name.
*/
pub async fn load<S, B, R>(
    console: web::Data<Console<S, B, R>>,
) -> Result<HttpResponse, ConsoleError>
where
    S: DocumentStore + 'static,
    B: BlobStore + 'static,
    R: PlaceResolver + 'static,
{
    let categories = CategoryRepository::new(&console.store).list().await?;
    let mut courses = CourseRepository::new(&console.store).list().await?;
    sort_by_name(&mut courses);

    let selected = categories.first().map(SelectedCategory::from);

    Ok(HttpResponse::Ok().json(json!({
        "categories": categories,
        "courses": courses,
        "selected": selected,
    })))
}

/*
    GET /categoryeditor/{id}
*/
pub async fn select<S, B, R>(
    console: web::Data<Console<S, B, R>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ConsoleError>
where
    S: DocumentStore + 'static,
    B: BlobStore + 'static,
    R: PlaceResolver + 'static,
{
    let category = CategoryRepository::new(&console.store)
        .get(&path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(SelectedCategory::from(&category)))
}

/*
    POST /categoryeditor/{id}/toggle
    Toggles one course against the editor's current working list.
*/
pub async fn toggle(path: web::Path<String>, input: web::Json<ToggleRequest>) -> HttpResponse {
    let request = input.into_inner();

    let mut selection =
        CategorySelection::from_working_list(Some(path.into_inner()), request.course_id_list);
    selection.toggle(&request.course_id);

    HttpResponse::Ok().json(SelectionView::from(&selection))
}

/*
    PUT /categoryeditor/{id}
    Writes courseIdList (and the thumbnail URL when a new one is uploaded).
    The answer is built from what was written, so it needs no second read.
*/
pub async fn save<S, B, R>(
    console: web::Data<Console<S, B, R>>,
    path: web::Path<String>,
    input: web::Json<SaveCategoryRequest>,
) -> Result<HttpResponse, ConsoleError>
where
    S: DocumentStore + 'static,
    B: BlobStore + 'static,
    R: PlaceResolver + 'static,
{
    let id = path.into_inner();
    let request = input.into_inner();
    let repository = CategoryRepository::new(&console.store);

    let category = repository.get(&id).await?;

    let thumbnail_url = match &request.thumbnail {
        Some(image) => Some(upload_category_thumbnail(&console.blobs, image).await?),
        None => None,
    };

    let selection = CategorySelection::from_working_list(Some(id.clone()), request.course_id_list);
    repository.save(&id, &selection, thumbnail_url.clone()).await?;

    Ok(HttpResponse::Ok().json(SelectedCategory {
        title: category.title,
        thumbnail_url: thumbnail_url.or(category.thumbnail_url),
        selection: SelectionView::from(&selection),
    }))
}
