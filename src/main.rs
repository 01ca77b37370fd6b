use std::io;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;
use log::{error, info};

use outline_admin::config::AppConfig;
use outline_admin::console::Console;
use outline_admin::db::mongo::{create_mongo_client, MongoDocumentStore};
use outline_admin::middleware::password_gate::AdminSecret;
use outline_admin::routes;
use outline_admin::services::blob_store::GcsBlobStore;
use outline_admin::services::geocoding_service::GoogleGeocoder;

fn startup_error(err: impl std::fmt::Display) -> io::Error {
    error!("{}", err);
    io::Error::new(io::ErrorKind::Other, err.to_string())
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(startup_error)?;

    let client = create_mongo_client(&config.mongodb_uri)
        .await
        .map_err(startup_error)?;
    let store = MongoDocumentStore::new(client, &config.database);

    let blobs = GcsBlobStore::new(&config.course_bucket, &config.cloud_storage_url)
        .await
        .map_err(startup_error)?;

    let geocoder = GoogleGeocoder::new(&config.geocode_base_url, &config.google_maps_api_key)
        .map_err(startup_error)?;

    let console = web::Data::new(Console::new(store, blobs, geocoder));
    let secret = web::Data::new(AdminSecret::new(config.admin_password.clone()));

    info!("Starting console on {}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .app_data(console.clone())
            .app_data(secret.clone())
            .configure(routes::config::<MongoDocumentStore, GcsBlobStore, GoogleGeocoder>)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
