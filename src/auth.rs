//! Owner identification for request scoping. Authentication proper is an
//! external collaborator; every handler takes the owner from the
//! `X-User-Id` header through this extractor, which is the seam a real
//! auth layer replaces.

use crate::error::ApiError;
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use std::future::{ready, Ready};

pub const USER_ID_HEADER: &str = "X-User-Id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnerId(pub i32);

impl FromRequest for OwnerId {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = req
            .headers()
            .get(USER_ID_HEADER)
            .ok_or_else(|| {
                ApiError::Unauthorized(format!("Missing {} header", USER_ID_HEADER))
            })
            .and_then(|value| {
                value
                    .to_str()
                    .ok()
                    .and_then(|s| s.parse::<i32>().ok())
                    .map(OwnerId)
                    .ok_or_else(|| {
                        ApiError::Unauthorized(format!("Invalid {} header", USER_ID_HEADER))
                    })
            });
        ready(result)
    }
}
