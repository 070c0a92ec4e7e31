//! Auth Config

use std::fmt;

use clap::Args;
use jiff::SignedDuration;

/// Session token settings.
#[derive(Args)]
pub struct AuthConfig {
    /// HMAC secret used to sign session tokens
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,

    /// Session token lifetime in seconds
    #[arg(
        long,
        env = "JWT_TTL_SECONDS",
        default_value_t = 86_400_i64,
        value_parser = clap::value_parser!(i64).range(1..)
    )]
    pub jwt_ttl_seconds: i64,
}

impl AuthConfig {
    /// Session token lifetime.
    #[must_use]
    pub fn token_ttl(&self) -> SignedDuration {
        SignedDuration::from_secs(self.jwt_ttl_seconds)
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("jwt_ttl_seconds", &self.jwt_ttl_seconds)
            .finish()
    }
}
