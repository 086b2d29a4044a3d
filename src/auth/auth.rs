use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload};
use futures::future::{Ready, ready};

use crate::error::ApiError;

/// Identity of the authenticated employee, placed into request extensions by
/// the auth middleware and available to handlers as an extractor.
#[derive(Clone)]
pub struct AuthUser {
    pub employee_id: i64,
    pub email: String,
}

impl FromRequest for AuthUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<AuthUser>()
                .cloned()
                .ok_or_else(|| ApiError::Auth("Missing authentication".to_string()).into()),
        )
    }
}
