use crate::utils::AppError;
use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const TOKEN_COOKIE: &str = "token";

/// Decoded session credential: the identity payload the client signed in
/// with, plus `iat`/`exp`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(transparent)]
pub struct Claims(pub Map<String, Value>);

impl Claims {
    pub fn email(&self) -> Option<&str> {
        self.0.get("email").and_then(Value::as_str)
    }
}

/// Mints and verifies HS256 session credentials and builds the cookie
/// that carries them.
pub struct CredentialIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
    production: bool,
}

impl CredentialIssuer {
    pub fn new(secret: &str, ttl: Duration, production: bool) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
            production,
        }
    }

    /// Signs `identity` as-is; `iat` and `exp` are always set here.
    pub fn issue(&self, identity: Value) -> Result<String, AppError> {
        let Value::Object(mut claims) = identity else {
            return Err(AppError::Validation(
                "Identity payload must be a JSON object".to_string(),
            ));
        };

        let now = Utc::now();
        claims.insert("iat".to_string(), Value::from(now.timestamp()));
        claims.insert("exp".to_string(), Value::from((now + self.ttl).timestamp()));

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("Failed to generate token: {}", e)))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Payload is free-form, it may carry any audience
        validation.validate_aud = false;

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                log::debug!("Token rejected: {}", e);
                AppError::Forbidden("Unauthorized: Invalid token".to_string())
            })
    }

    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        let mut cookie = self.base_cookie(token);
        cookie.set_max_age(CookieDuration::seconds(self.ttl.num_seconds()));
        cookie
    }

    pub fn removal_cookie(&self) -> Cookie<'static> {
        let mut cookie = self.base_cookie(String::new());
        cookie.make_removal();
        cookie
    }

    fn base_cookie(&self, value: String) -> Cookie<'static> {
        let same_site = if self.production {
            SameSite::None
        } else {
            SameSite::Strict
        };

        Cookie::build(TOKEN_COOKIE, value)
            .path("/")
            .http_only(true)
            .secure(self.production)
            .same_site(same_site)
            .finish()
    }
}
