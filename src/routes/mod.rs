use actix_web::web;

use crate::db::document_store::DocumentStore;
use crate::middleware::password_gate::PasswordGate;
use crate::services::blob_store::BlobStore;
use crate::services::geocoding_service::PlaceResolver;

pub mod category_editor;
pub mod course;
pub mod dashboard;
pub mod login;

/// Console screens. Everything except the health check and the password
/// prompt sits behind the [`PasswordGate`].
pub fn config<S, B, R>(cfg: &mut web::ServiceConfig)
where
    S: DocumentStore + 'static,
    B: BlobStore + 'static,
    R: PlaceResolver + 'static,
{
    // Thumbnails arrive base64 encoded inside JSON bodies.
    cfg.app_data(web::JsonConfig::default().limit(10 * 1024 * 1024))
        .route("/health", web::get().to(|| async { "OK" }))
        .route("/", web::post().to(login::login))
        .service(
            web::scope("")
                .wrap(PasswordGate)
                .route(
                    "/dashboard",
                    web::get().to(dashboard::get_dashboard::<S, B, R>),
                )
                .route("/add", web::get().to(course::new_draft))
                .route("/add", web::post().to(course::create::<S, B, R>))
                .route("/add/kml", web::post().to(course::ingest_draft::<S, B, R>))
                .route(
                    "/add/thumbnail",
                    web::post().to(course::upload_draft_thumbnail::<S, B, R>),
                )
                .route("/details/{id}", web::get().to(course::get_by_id::<S, B, R>))
                .route("/details/{id}", web::put().to(course::update::<S, B, R>))
                .route(
                    "/details/{id}/kml",
                    web::post().to(course::ingest_existing::<S, B, R>),
                )
                .route(
                    "/details/{id}/thumbnail",
                    web::post().to(course::upload_thumbnail::<S, B, R>),
                )
                .route(
                    "/categoryeditor",
                    web::get().to(category_editor::load::<S, B, R>),
                )
                .route(
                    "/categoryeditor/{id}",
                    web::get().to(category_editor::select::<S, B, R>),
                )
                .route(
                    "/categoryeditor/{id}",
                    web::put().to(category_editor::save::<S, B, R>),
                )
                .route(
                    "/categoryeditor/{id}/toggle",
                    web::post().to(category_editor::toggle),
                ),
        );
}
