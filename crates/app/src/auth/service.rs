//! Auth service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;
use tracing::debug;

use crate::auth::{AuthServiceError, Identity, TokenKeys, repository::PgAuthRepository};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
    keys: Arc<TokenKeys>,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool, keys: Arc<TokenKeys>) -> Self {
        Self {
            repository: PgAuthRepository::new(pool),
            keys,
        }
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Identity, AuthServiceError> {
        let claims = self.keys.verify(bearer_token).map_err(|error| {
            debug!(%error, "rejected bearer token");

            AuthServiceError::NotFound
        })?;

        let user = claims.user();

        // The role is re-read so that a deleted account cannot keep using a live token.
        let role = self
            .repository
            .find_user_role(user)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        Ok(Identity { user, role })
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve the caller behind a bearer token.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Identity, AuthServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;
    use testresult::TestResult;

    use crate::{
        domain::users::{
            UsersService,
            records::{Role, UserUuid},
        },
        test::{TestContext, helpers::new_user},
    };

    use super::*;

    #[tokio::test]
    async fn token_from_login_authenticates() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.users.register(new_user("seller@example.com", Role::Seller)).await?;
        let issued = ctx.keys.issue(user.uuid, user.role)?;

        let identity = ctx.auth.authenticate_bearer(&issued.token).await?;

        assert_eq!(identity, Identity { user: user.uuid, role: Role::Seller });

        Ok(())
    }

    #[tokio::test]
    async fn token_for_unknown_user_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let issued = ctx.keys.issue(UserUuid::new(), Role::Buyer)?;

        let result = ctx.auth.authenticate_bearer(&issued.token).await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn garbage_token_is_rejected() {
        let ctx = TestContext::new().await;

        let result = ctx.auth.authenticate_bearer("not.a.jwt").await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn token_from_other_keys_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.users.register(new_user("buyer@example.com", Role::Buyer)).await?;
        let other = TokenKeys::from_secret("someone-else", SignedDuration::from_hours(1))?;
        let issued = other.issue(user.uuid, user.role)?;

        let result = ctx.auth.authenticate_bearer(&issued.token).await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }
}
