use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use crate::console::Console;
use crate::db::document_store::DocumentStore;
use crate::errors::ConsoleError;
use crate::services::blob_store::BlobStore;
use crate::services::category_service::CategoryRepository;
use crate::services::course_service::CourseRepository;
use crate::services::dashboard::{filter_courses, ALL_CATEGORIES};
use crate::services::geocoding_service::PlaceResolver;

#[derive(Deserialize)]
pub struct DashboardQuery {
    category: Option<String>,
    search: Option<String>,
}

/*
    GET /dashboard?category=&search=
*/
pub async fn get_dashboard<S, B, R>(
    console: web::Data<Console<S, B, R>>,
    params: web::Query<DashboardQuery>,
) -> Result<HttpResponse, ConsoleError>
where
    S: DocumentStore + 'static,
    B: BlobStore + 'static,
    R: PlaceResolver + 'static,
{
    let courses = CourseRepository::new(&console.store).list().await?;
    let categories = CategoryRepository::new(&console.store).list().await?;

    let selected = params.category.as_deref().unwrap_or(ALL_CATEGORIES);
    let search = params.search.as_deref().unwrap_or_default();
    let filtered = filter_courses(selected, &categories, &courses, search);

    let titles: Vec<&str> = categories.iter().map(|c| c.title.as_str()).collect();

    Ok(HttpResponse::Ok().json(json!({
        "categories": titles,
        "selectedCategory": selected,
        "courses": filtered,
    })))
}
