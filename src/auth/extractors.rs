use actix_web::{error::ErrorUnauthorized, web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use uuid::Uuid;

use super::jwt::{Claims, Tokenizer, UserRole};

// Extractor for admin-only routes
pub struct IsAdmin(pub Uuid);

// Extractor for staff routes; admins pass too
pub struct IsStaff(pub Uuid);

// Extractor for any logged-in user, carrying the role for row scoping
pub struct AuthenticatedUser(pub Uuid, pub UserRole);

fn claims_from_request(req: &HttpRequest) -> Result<Claims, actix_web::Error>{
    let tokenizer: &web::Data<Tokenizer> = req.app_data()
        .ok_or_else(|| ErrorUnauthorized("Tokenizer not configured"))?;

    let auth = req.headers()
        .get("Authorization")
        .ok_or_else(|| ErrorUnauthorized("Missing Authorization header"))?;

    let header_value = auth.to_str()
        .map_err(|_| ErrorUnauthorized("Invalid Authorization header"))?;

    let token = header_value
        .strip_prefix("Bearer")
        .ok_or_else(|| ErrorUnauthorized("Expected Bearer token"))?
        .trim();

    tokenizer.decode_key(token.to_string())
        .ok_or_else(|| ErrorUnauthorized("Invalid Token"))
}

impl FromRequest for IsAdmin {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &actix_web::HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        ready(claims_from_request(req).and_then(|claims| {
            match claims.role {
                UserRole::Admin => Ok(IsAdmin(claims.sub)),
                _ => Err(ErrorUnauthorized("Unauthorized Role"))
            }
        }))
    }
}

impl FromRequest for IsStaff {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &actix_web::HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        ready(claims_from_request(req).and_then(|claims| {
            match claims.role {
                UserRole::Staff | UserRole::Admin => Ok(IsStaff(claims.sub)),
                _ => Err(ErrorUnauthorized("Unauthorized Role"))
            }
        }))
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &actix_web::HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        ready(claims_from_request(req).map(|claims| {
            AuthenticatedUser(claims.sub, claims.role)
        }))
    }
}
