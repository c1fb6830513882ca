//! JWT session tokens.
//!
//! Tokens are HS256-signed and carry the user id and email. Expiry is
//! validated on decode by `jsonwebtoken`, so an expired token fails
//! verification without extra checks.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use clearcart_core::UserId;

use super::AuthError;

/// Session token lifetime.
const TOKEN_TTL_DAYS: i64 = 7;

/// Claims carried in a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// The authenticated user's id.
    pub sub: UserId,
    pub email: String,
    /// Expiry as a unix timestamp (seconds).
    pub exp: i64,
}

/// Encodes and verifies session tokens with a shared HS256 secret.
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenCodec {
    #[must_use]
    pub fn new(secret: &SecretString) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
        }
    }

    /// Issue a token for a user, valid for seven days.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Token` if signing fails.
    pub fn issue(&self, user_id: UserId, email: &str) -> Result<String, AuthError> {
        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            exp: (Utc::now() + Duration::days(TOKEN_TTL_DAYS)).timestamp(),
        };

        Ok(encode(&Header::default(), &claims, &self.encoding)?)
    }

    /// Verify a token and return its claims.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Token` if the signature is invalid, the token
    /// is malformed, or it has expired.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())?;
        Ok(data.claims)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn codec() -> TokenCodec {
        TokenCodec::new(&SecretString::from(
            "correct-horse-battery-staple-but-longer-than-32",
        ))
    }

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let codec = codec();
        let token = codec.issue(UserId::new(42), "a@b.com").unwrap();

        let claims = codec.verify(&token).unwrap();
        assert_eq!(claims.sub, UserId::new(42));
        assert_eq!(claims.email, "a@b.com");
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = codec().issue(UserId::new(1), "a@b.com").unwrap();

        let other = TokenCodec::new(&SecretString::from(
            "a-completely-different-secret-of-decent-length!!",
        ));
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(codec().verify("not.a.token").is_err());
        assert!(codec().verify("").is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let codec = codec();
        let claims = Claims {
            sub: UserId::new(1),
            email: "a@b.com".to_string(),
            exp: (Utc::now() - Duration::hours(1)).timestamp(),
        };
        let token = encode(&Header::default(), &claims, &codec.encoding).unwrap();

        assert!(codec.verify(&token).is_err());
    }
}
