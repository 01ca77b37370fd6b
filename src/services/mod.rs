pub mod blob_store;
pub mod category_ordering;
pub mod category_service;
pub mod course_service;
pub mod dashboard;
pub mod geocoding_service;
pub mod image_service;
pub mod ingestion_service;
pub mod kml_parser;
