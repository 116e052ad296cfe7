use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::error::AppError;

/// The authenticated identity of the current request: the username resolved
/// from a verified bearer token.
///
/// `Authenticator` inserts this into request extensions when a valid token is
/// presented. Handlers that require authentication take `Identity` as an
/// extractor; if no identity was resolved (missing or invalid token, or the
/// middleware was not applied) extraction fails with 401. This is the single
/// point where the 401 classification happens.
#[derive(Debug, Clone)]
pub struct Identity(pub String);

impl FromRequest for Identity {
    type Error = ActixError; // AppError converts into ActixError via ResponseError
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<Identity>().cloned() {
            Some(identity) => ready(Ok(identity)),
            None => {
                let err = AppError::Unauthorized("Authentication required".to_string());
                ready(Err(err.into()))
            }
        }
    }
}
