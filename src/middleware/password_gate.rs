use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpResponse,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use log::warn;
use serde_json::json;

pub const PASSWORD_HEADER: &str = "X-Admin-Password";

/// The single shared secret that unlocks the console.
#[derive(Clone)]
pub struct AdminSecret(String);

impl AdminSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn matches(&self, candidate: &str) -> bool {
        !self.0.is_empty() && self.0 == candidate
    }
}

/// Rejects any request whose `X-Admin-Password` header does not match the
/// [`AdminSecret`] registered as app data.
pub struct PasswordGate;

impl<S, B> Transform<S, ServiceRequest> for PasswordGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = PasswordGateService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(PasswordGateService { service }))
    }
}

pub struct PasswordGateService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for PasswordGateService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let authorized = match req.app_data::<web::Data<AdminSecret>>() {
            Some(secret) => req
                .headers()
                .get(PASSWORD_HEADER)
                .and_then(|value| value.to_str().ok())
                .is_some_and(|candidate| secret.matches(candidate)),
            None => {
                warn!("Password gate has no secret configured");
                false
            }
        };

        if authorized {
            let fut = self.service.call(req);
            return Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) });
        }

        let response = HttpResponse::Unauthorized()
            .json(json!({ "error": "Unauthorized" }))
            .map_into_right_body();
        Box::pin(ready(Ok(req.into_response(response))))
    }
}
