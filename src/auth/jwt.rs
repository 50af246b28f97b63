use crate::types::{AppError, Claims, Result, VerifiedIdentity};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::warn;

/// Longest accepted token lifetime: 100 years, in milliseconds.
pub const MAX_EXPIRATION_MS: i64 = 100 * 365 * 24 * 60 * 60 * 1000;

/// Issues and checks HS256 bearer tokens.
///
/// Holds the signing keys derived from the shared secret and the fixed
/// token lifetime. Both are set once at construction and never change, so a
/// single codec can be shared across request handlers behind an `Arc`.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiration: Duration,
}

impl TokenCodec {
    /// Creates a new TokenCodec.
    ///
    /// # Arguments
    /// * `jwt_secret` - Shared HMAC secret; must not be empty
    /// * `expiration_ms` - Token lifetime in milliseconds
    pub fn new(jwt_secret: &str, expiration_ms: i64) -> Result<Self> {
        if jwt_secret.is_empty() {
            return Err(AppError::Configuration(
                "JWT secret must not be empty".to_string(),
            ));
        }
        if !(0..=MAX_EXPIRATION_MS).contains(&expiration_ms) {
            return Err(AppError::Configuration(format!(
                "JWT expiration must be between 0 and {} ms (got {} ms)",
                MAX_EXPIRATION_MS, expiration_ms
            )));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
            expiration: Duration::milliseconds(expiration_ms),
        })
    }

    /// Configured token lifetime.
    pub fn expiration(&self) -> Duration {
        self.expiration
    }

    /// Issues a signed token for a verified identity, stamped with the current time.
    pub fn issue(&self, identity: &VerifiedIdentity) -> Result<String> {
        self.issue_at(identity, Utc::now())
    }

    /// Issues a signed token as if the current time were `now`.
    pub fn issue_at(&self, identity: &VerifiedIdentity, now: DateTime<Utc>) -> Result<String> {
        let expires_at = now.checked_add_signed(self.expiration).ok_or_else(|| {
            AppError::Configuration(format!(
                "Token lifetime of {} ms overflows the clock at {}",
                self.expiration.num_milliseconds(),
                now
            ))
        })?;

        let claims = Claims {
            sub: identity.username.clone(),
            role: identity.role.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to generate token: {}", e)))
    }

    /// Verifies signature and expiry, returning the trusted claims.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        self.verify_at(token, Utc::now())
    }

    /// Verifies signature and expiry against the supplied clock.
    ///
    /// A token is expired once `now` is strictly past its `exp` claim; no
    /// leeway is granted.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims> {
        let data = decode::<Claims>(token, &self.decoding_key, &signature_validation())
            .map_err(|e| AppError::TokenInvalid(e.to_string()))?;

        if now.timestamp() > data.claims.exp {
            return Err(AppError::TokenInvalid(format!(
                "token for '{}' expired at {}",
                data.claims.sub, data.claims.exp
            )));
        }

        Ok(data.claims)
    }

    /// Returns true only when the token carries a valid signature and has not expired.
    ///
    /// Never fails: malformed, tampered and expired tokens all collapse to
    /// `false`, with the reason logged.
    pub fn validate(&self, token: &str) -> bool {
        match self.verify(token) {
            Ok(_) => true,
            Err(e) => {
                warn!("Token validation failed: {}", e);
                false
            }
        }
    }

    /// Reads the `sub` claim WITHOUT checking the signature or expiry.
    ///
    /// Anyone can mint a token that decodes here. Call [`TokenCodec::validate`]
    /// or [`TokenCodec::verify`] first whenever the subject is going to be
    /// trusted.
    pub fn decode_subject(&self, token: &str) -> Result<String> {
        let claims: serde_json::Map<String, Value> = insecure_decode(token)?;

        claims
            .get("sub")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| AppError::TokenInvalid("token has no subject claim".to_string()))
    }

    /// Returns every payload claim as a string, WITHOUT signature verification.
    ///
    /// String claims are returned verbatim; numbers and booleans as their
    /// JSON text. Meant for diagnostics only.
    pub fn decode_all_claims(&self, token: &str) -> Result<BTreeMap<String, String>> {
        let claims: serde_json::Map<String, Value> = insecure_decode(token)?;

        Ok(claims
            .into_iter()
            .map(|(key, value)| {
                let value = match value {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                (key, value)
            })
            .collect())
    }
}

// Expiry is checked by `verify_at` so tests can move the clock.
fn signature_validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.required_spec_claims = ["exp", "iat", "sub"]
        .into_iter()
        .map(String::from)
        .collect();
    validation
}

fn insecure_decode<T: DeserializeOwned>(token: &str) -> Result<T> {
    jsonwebtoken::dangerous::insecure_decode(token)
        .map(|data| data.claims)
        .map_err(|e| AppError::TokenInvalid(format!("Failed to decode token: {}", e)))
}
