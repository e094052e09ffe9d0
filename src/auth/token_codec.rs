use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::errors::InternalError;
use crate::types::internal::{Claims, RoleName};

/// Encodes and decodes signed, expiring session tokens.
///
/// Tokens are self-contained: verification needs only the shared secret, no
/// storage round-trip. A previously issued token stays valid until natural
/// expiry even if the principal is deleted afterwards; that stateless
/// revocation model is an accepted tradeoff.
pub struct TokenCodec {
    secret: String,
    expire_minutes: i64,
}

impl TokenCodec {
    pub fn new(secret: String, expire_minutes: i64) -> Self {
        Self {
            secret,
            expire_minutes,
        }
    }

    /// Mint a token for the given subject carrying the given roles.
    ///
    /// The payload holds the subject id as a string, the role list, and an
    /// issued-at/expires-at window of the configured duration.
    pub fn encode(&self, subject: i64, roles: &[RoleName]) -> Result<String, InternalError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: subject.to_string(),
            roles: roles.to_vec(),
            iat: now,
            exp: now + self.expire_minutes * 60,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| InternalError::Token {
            message: format!("failed to encode token: {}", e),
        })
    }

    /// Verify a token and return its claims.
    ///
    /// Fails when the signature does not verify, the signing algorithm is
    /// not HS256, the payload does not parse, or the current time falls
    /// outside the validity window. Expiry is strict - no leeway.
    pub fn decode(&self, token: &str) -> Result<Claims, InternalError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|e| InternalError::Token {
            message: format!("token rejected: {}", e),
        })?;

        let claims = token_data.claims;
        if claims.iat > Utc::now().timestamp() {
            return Err(InternalError::Token {
                message: "token issued in the future".to_string(),
            });
        }

        Ok(claims)
    }
}
