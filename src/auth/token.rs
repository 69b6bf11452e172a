//! Signed bearer tokens issued at log-in.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::{Error, User, UserID};

/// How long a token is valid for if no other duration is configured.
pub const DEFAULT_TOKEN_DURATION: Duration = Duration::minutes(60);

/// The keys for signing and verifying tokens, derived from one secret.
#[derive(Clone)]
pub struct JwtKeys {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtKeys {
    /// Create HMAC keys from `secret`.
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

impl std::fmt::Debug for JwtKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtKeys").finish_non_exhaustive()
    }
}

/// The claims carried by a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// The ID of the user the token was issued to.
    pub sub: UserID,
    /// The username of the user the token was issued to.
    pub username: String,
    /// When the token was issued, in seconds since the Unix epoch.
    pub iat: i64,
    /// When the token expires, in seconds since the Unix epoch.
    pub exp: i64,
}

impl Claims {
    /// Claims for `user` that expire `duration` from now.
    pub fn new(user: &User, duration: Duration) -> Self {
        let issued_at = OffsetDateTime::now_utc();

        Self {
            sub: user.id,
            username: user.username.clone(),
            iat: issued_at.unix_timestamp(),
            exp: (issued_at + duration).unix_timestamp(),
        }
    }
}

/// Create a signed token for `user` that is valid for `duration`.
///
/// # Errors
/// Returns [Error::TokenCreationError] if the token could not be signed.
pub fn create_token(user: &User, duration: Duration, keys: &JwtKeys) -> Result<String, Error> {
    encode_claims(&Claims::new(user, duration), keys)
}

fn encode_claims(claims: &Claims, keys: &JwtKeys) -> Result<String, Error> {
    encode(&Header::new(Algorithm::HS256), claims, &keys.encoding_key)
        .map_err(|error| Error::TokenCreationError(error.to_string()))
}

/// Verify the signature and expiry of `token` and return its claims.
///
/// # Errors
/// Returns [Error::InvalidToken] if the token is malformed, was signed with
/// another key or has expired.
pub fn decode_token(token: &str, keys: &JwtKeys) -> Result<Claims, Error> {
    decode::<Claims>(token, &keys.decoding_key, &Validation::new(Algorithm::HS256))
        .map(|token_data| token_data.claims)
        .map_err(|error| Error::InvalidToken(error.to_string()))
}
