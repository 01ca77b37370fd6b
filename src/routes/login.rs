use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;

use crate::middleware::password_gate::AdminSecret;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

/*
    POST /
*/
pub async fn login(secret: web::Data<AdminSecret>, input: web::Json<LoginRequest>) -> impl Responder {
    if secret.matches(&input.password) {
        HttpResponse::Ok().json(json!({ "authorized": true }))
    } else {
        HttpResponse::Unauthorized().json(json!({ "error": "Incorrect password. Please try again." }))
    }
}
