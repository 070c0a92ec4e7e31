//! Signed session tokens.

use std::fmt;

use jiff::{SignedDuration, Timestamp};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::domain::users::records::{Role, UserUuid};

/// Default session lifetime: one day.
pub const DEFAULT_TOKEN_TTL: SignedDuration = SignedDuration::from_hours(24);

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token signing secret is empty")]
    EmptySecret,

    #[error("token expiry is out of range")]
    ExpiryOutOfRange(#[source] jiff::Error),

    #[error("failed to sign token")]
    Sign(#[source] jsonwebtoken::errors::Error),

    #[error("token is invalid or expired")]
    Invalid(#[source] jsonwebtoken::errors::Error),
}

/// Claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    #[must_use]
    pub fn user(&self) -> UserUuid {
        UserUuid::from_uuid(self.sub)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: Timestamp,
}

/// HS256 signing and verification keys plus the session lifetime.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: SignedDuration,
}

impl fmt::Debug for TokenKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenKeys")
            .field("secret", &"**redacted**")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl TokenKeys {
    /// Build keys from a shared secret.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::EmptySecret`] when the secret is empty.
    pub fn from_secret(secret: &str, ttl: SignedDuration) -> Result<Self, TokenError> {
        let secret = Zeroizing::new(secret.as_bytes().to_vec());

        if secret.is_empty() {
            return Err(TokenError::EmptySecret);
        }

        Ok(Self {
            encoding: EncodingKey::from_secret(&secret),
            decoding: DecodingKey::from_secret(&secret),
            validation: Validation::new(Algorithm::HS256),
            ttl,
        })
    }

    #[must_use]
    pub const fn ttl(&self) -> SignedDuration {
        self.ttl
    }

    /// Issue a token for the given user, valid from now.
    ///
    /// # Errors
    ///
    /// Returns an error when signing fails.
    pub fn issue(&self, user: UserUuid, role: Role) -> Result<IssuedToken, TokenError> {
        self.issue_at(user, role, Timestamp::now())
    }

    /// Issue a token as if the current time were `now`.
    ///
    /// # Errors
    ///
    /// Returns an error when the expiry overflows or signing fails.
    pub fn issue_at(
        &self,
        user: UserUuid,
        role: Role,
        now: Timestamp,
    ) -> Result<IssuedToken, TokenError> {
        let expires_at = now
            .checked_add(self.ttl)
            .map_err(TokenError::ExpiryOutOfRange)?;

        let claims = Claims {
            sub: user.into_uuid(),
            role,
            iat: now.as_second(),
            exp: expires_at.as_second(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(TokenError::Sign)?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Check the signature and expiry of a token and return its claims.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Invalid`] for malformed, tampered or expired tokens.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(TokenError::Invalid)
    }
}
