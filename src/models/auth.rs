//! JWT bearer authentication for the API surface.
//!
//! Token issuance belongs to the identity provider; this module only
//! validates incoming tokens and exposes the claims as a request extractor.

use std::future::{Ready, ready};

use actix_web::error::ErrorUnauthorized;
use actix_web::http::header;
use actix_web::{Error, FromRequest, HttpRequest, dev::Payload, web};
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use crate::models::config::ServerConfig;

/// Claims carried by an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject, typically the commercial's Cref or a user id.
    pub sub: String,
    #[serde(default)]
    pub roles: Vec<String>,
    /// Expiry as a unix timestamp.
    pub exp: usize,
}

/// The authenticated caller, extracted from the `Authorization` header.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub sub: String,
    pub roles: Vec<String>,
}

impl AuthenticatedUser {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn has_any_role(&self, roles: &[&str]) -> bool {
        roles.iter().any(|role| self.has_role(role))
    }
}

/// Validates a bearer token against the configured secret.
pub fn decode_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = (|| {
            let config = req
                .app_data::<web::Data<ServerConfig>>()
                .ok_or_else(|| ErrorUnauthorized("server configuration missing"))?;
            let header_value = req
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .ok_or_else(|| ErrorUnauthorized("missing bearer token"))?;
            let token = header_value
                .strip_prefix("Bearer ")
                .ok_or_else(|| ErrorUnauthorized("missing bearer token"))?;
            let claims =
                decode_token(token, &config.secret).map_err(|_| ErrorUnauthorized("invalid token"))?;
            Ok(AuthenticatedUser {
                sub: claims.sub,
                roles: claims.roles,
            })
        })();

        ready(result)
    }
}
