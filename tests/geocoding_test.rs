use actix_web::{web, App, HttpResponse, HttpServer};
use serde::Deserialize;
use serde_json::json;

use outline_admin::models::location::Coordinate;
use outline_admin::services::geocoding_service::{GoogleGeocoder, PlaceResolver};

#[derive(Deserialize)]
struct GeocodeQuery {
    latlng: String,
    key: String,
}

async fn geocode_ok(query: web::Query<GeocodeQuery>) -> HttpResponse {
    if query.key != "test-key" {
        return HttpResponse::Forbidden().finish();
    }
    HttpResponse::Ok().json(json!({
        "results": [{
            "formatted_address": format!("Place at {}", query.latlng),
            "address_components": [
                { "types": ["locality", "political"], "long_name": "Seoul", "short_name": "Seoul" },
                { "types": ["country", "political"], "long_name": "South Korea", "short_name": "KR" }
            ]
        }],
        "status": "OK"
    }))
}

async fn geocode_empty() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "results": [], "status": "ZERO_RESULTS" }))
}

async fn geocode_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("upstream exploded")
}

async fn geocode_garbage() -> HttpResponse {
    HttpResponse::Ok().body("<html>not json</html>")
}

/// Starts a stand-in geocoding provider and returns its base URL.
fn start_provider() -> String {
    let server = HttpServer::new(|| {
        App::new()
            .route("/ok", web::get().to(geocode_ok))
            .route("/empty", web::get().to(geocode_empty))
            .route("/error", web::get().to(geocode_error))
            .route("/garbage", web::get().to(geocode_garbage))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("bind test provider");

    let addr = server.addrs()[0];
    actix_rt::spawn(server.run());
    format!("http://{}", addr)
}

fn seoul() -> Coordinate {
    Coordinate::new(37.5665, 126.978)
}

#[actix_rt::test]
async fn test_resolves_first_result() {
    let base = start_provider();
    let geocoder = GoogleGeocoder::new(&format!("{}/ok", base), "test-key").unwrap();

    let place = geocoder.resolve(seoul()).await.unwrap();

    assert_eq!(place.name, "Place at 37.5665,126.978");
    assert_eq!(place.locality, "Seoul");
    assert_eq!(place.iso_country_code, "KR");
    assert_eq!(place.throughfare, "");
}

#[actix_rt::test]
async fn test_zero_results_is_unresolved() {
    let base = start_provider();
    let geocoder = GoogleGeocoder::new(&format!("{}/empty", base), "test-key").unwrap();

    assert!(geocoder.resolve(seoul()).await.is_none());
}

#[actix_rt::test]
async fn test_server_error_is_unresolved() {
    let base = start_provider();
    let geocoder = GoogleGeocoder::new(&format!("{}/error", base), "test-key").unwrap();

    assert!(geocoder.resolve(seoul()).await.is_none());
}

#[actix_rt::test]
async fn test_rejected_key_is_unresolved() {
    let base = start_provider();
    let geocoder = GoogleGeocoder::new(&format!("{}/ok", base), "wrong-key").unwrap();

    assert!(geocoder.resolve(seoul()).await.is_none());
}

#[actix_rt::test]
async fn test_undecodable_body_is_unresolved() {
    let base = start_provider();
    let geocoder = GoogleGeocoder::new(&format!("{}/garbage", base), "test-key").unwrap();

    assert!(geocoder.resolve(seoul()).await.is_none());
}

#[actix_rt::test]
async fn test_unreachable_provider_is_unresolved() {
    // Nothing listens on the discard port.
    let geocoder = GoogleGeocoder::new("http://127.0.0.1:9/geocode", "test-key").unwrap();

    assert!(geocoder.resolve(seoul()).await.is_none());
}
