use crate::auth::auth::AuthUser;
use crate::auth::jwt::verify_token;
use crate::config::Config;
use crate::error::ApiError;
use actix_web::{
    Error, HttpMessage, ResponseError,
    body::{BoxBody, MessageBody},
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
    web::Data,
};

fn unauthorized(req: ServiceRequest, message: &str) -> Result<ServiceResponse<BoxBody>, Error> {
    let resp = ApiError::Auth(message.to_string()).error_response();
    Ok(req.into_response(resp.map_into_boxed_body()))
}

/// Gate for every route except `/register` and `/login`. On success the
/// verified identity is inserted into request extensions for handlers.
pub async fn auth_middleware(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    let config = req
        .app_data::<Data<Config>>()
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("App config missing"))?;

    let header_value = match req.headers().get("Authorization") {
        Some(h) => match h.to_str() {
            Ok(v) => v,
            Err(_) => return unauthorized(req, "Invalid Authorization header encoding"),
        },
        None => return unauthorized(req, "Missing Authorization header"),
    };

    let token = match header_value.strip_prefix("Bearer ") {
        Some(t) => t,
        None => return unauthorized(req, "Authorization header must start with Bearer"),
    };

    let claims = match verify_token(token, &config.jwt_secret) {
        Ok(c) => c,
        Err(_) => return unauthorized(req, "Invalid or expired token"),
    };

    let auth_user = AuthUser {
        employee_id: claims.employee_id,
        email: claims.sub,
    };

    req.extensions_mut().insert(auth_user);

    next.call(req).await.map(|res| res.map_into_boxed_body())
}
