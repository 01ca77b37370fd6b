//! Admin console for the OUTLINE catalog of GPS-art courses and the
//! categories that group them.
//!
//! The console talks straight to its managed backend: a document store
//! for courses and categories, a blob store for thumbnails, and a reverse
//! geocoder that names where an uploaded track starts.

pub mod config;
pub mod console;
pub mod db;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
