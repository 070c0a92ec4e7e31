//! Users service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    auth::{TokenKeys, hash_password, verify_password},
    database::Db,
    domain::{
        products::repository::PgProductsRepository,
        users::{
            data::{Credentials, NewUser, ProfileUpdate},
            errors::UsersServiceError,
            records::{Session, UserRecord, UserUuid},
            repository::PgUsersRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    db: Db,
    repository: PgUsersRepository,
    products: PgProductsRepository,
    keys: Arc<TokenKeys>,
}

impl PgUsersService {
    #[must_use]
    pub fn new(db: Db, keys: Arc<TokenKeys>) -> Self {
        Self {
            db,
            repository: PgUsersRepository::new(),
            products: PgProductsRepository::new(),
            keys,
        }
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn register(&self, user: NewUser) -> Result<UserRecord, UsersServiceError> {
        let user = user.normalized();
        let password_hash = hash_password(&user.password).await?;

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_user(&mut tx, UserUuid::new(), &user, &password_hash)
            .await?;

        tx.commit().await?;

        info!(user = %created.uuid, role = %created.role, "registered user");

        Ok(created)
    }

    async fn login(&self, credentials: Credentials) -> Result<Session, UsersServiceError> {
        let credentials = credentials.normalized();

        let mut tx = self.db.begin().await?;

        let stored = self
            .repository
            .find_credentials_by_email(&mut tx, &credentials.email)
            .await?;

        tx.commit().await?;

        let stored = stored.ok_or(UsersServiceError::InvalidCredentials)?;

        if !verify_password(&credentials.password, &stored.password_hash).await? {
            return Err(UsersServiceError::InvalidCredentials);
        }

        let issued = self.keys.issue(stored.user.uuid, stored.user.role)?;

        Ok(Session {
            user: stored.user,
            token: issued.token,
            expires_at: issued.expires_at,
        })
    }

    async fn update_profile(
        &self,
        user: UserUuid,
        update: ProfileUpdate,
    ) -> Result<UserRecord, UsersServiceError> {
        let update = update.normalized();

        let password_hash = match update.password.as_deref() {
            Some(password) => Some(hash_password(password).await?),
            None => None,
        };

        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_user(&mut tx, user, &update, password_hash.as_deref())
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_account(&self, user: UserUuid) -> Result<(), UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let withdrawn = self.products.delete_seller_products(&mut tx, user).await?;
        let rows_affected = self.repository.delete_user(&mut tx, user).await?;

        if rows_affected == 0 {
            return Err(UsersServiceError::NotFound);
        }

        tx.commit().await?;

        info!(%user, withdrawn, "deleted account");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Register a new account.
    async fn register(&self, user: NewUser) -> Result<UserRecord, UsersServiceError>;

    /// Check credentials and issue a session token.
    async fn login(&self, credentials: Credentials) -> Result<Session, UsersServiceError>;

    /// Replace the editable profile fields of an account.
    async fn update_profile(
        &self,
        user: UserUuid,
        update: ProfileUpdate,
    ) -> Result<UserRecord, UsersServiceError>;

    /// Permanently delete an account along with its cart and products.
    ///
    /// Listings are withdrawn in the same transaction as the account row, so a
    /// failed deletion leaves them live.
    async fn delete_account(&self, user: UserUuid) -> Result<(), UsersServiceError>;
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{
        domain::{
            products::{ProductsService, ProductsServiceError},
            users::records::{Gender, Role},
        },
        test::{TestContext, helpers::new_user},
    };

    use super::*;

    fn credentials(email: &str, password: &str) -> Credentials {
        Credentials {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn register_normalizes_email() -> TestResult {
        let ctx = TestContext::new().await;

        let user = ctx
            .users
            .register(new_user("  Shopper@Example.com", Role::Buyer))
            .await?;

        assert_eq!(user.email, "shopper@example.com");
        assert_eq!(user.role, Role::Buyer);

        Ok(())
    }

    #[tokio::test]
    async fn register_duplicate_email_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.users
            .register(new_user("dup@example.com", Role::Buyer))
            .await?;

        let result = ctx
            .users
            .register(new_user("DUP@example.com", Role::Seller))
            .await;

        assert!(
            matches!(result, Err(UsersServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn login_returns_token_for_the_user() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx
            .users
            .register(new_user("login@example.com", Role::Seller))
            .await?;

        let session = ctx
            .users
            .login(credentials("login@example.com", "correct-horse"))
            .await?;

        assert_eq!(session.user, user);

        let claims = ctx.keys.verify(&session.token)?;

        assert_eq!(claims.user(), user.uuid);
        assert_eq!(claims.role, Role::Seller);

        Ok(())
    }

    #[tokio::test]
    async fn login_wrong_password_and_unknown_email_look_the_same() -> TestResult {
        let ctx = TestContext::new().await;
        ctx.users
            .register(new_user("known@example.com", Role::Buyer))
            .await?;

        let wrong_password = ctx
            .users
            .login(credentials("known@example.com", "battery-staple"))
            .await;
        let unknown_email = ctx
            .users
            .login(credentials("unknown@example.com", "correct-horse"))
            .await;

        assert!(
            matches!(wrong_password, Err(UsersServiceError::InvalidCredentials)),
            "expected InvalidCredentials, got {wrong_password:?}"
        );
        assert!(
            matches!(unknown_email, Err(UsersServiceError::InvalidCredentials)),
            "expected InvalidCredentials, got {unknown_email:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_profile_changes_password() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx
            .users
            .register(new_user("edit@example.com", Role::Buyer))
            .await?;

        let updated = ctx
            .users
            .update_profile(
                user.uuid,
                ProfileUpdate {
                    password: Some("new-password".to_string()),
                    first_name: " Grace ".to_string(),
                    last_name: "Hopper".to_string(),
                    gender: Some(Gender::Female),
                    location: Some("Arlington".to_string()),
                },
            )
            .await?;

        assert_eq!(updated.first_name, "Grace");
        assert_eq!(updated.gender, Some(Gender::Female));

        ctx.users
            .login(credentials("edit@example.com", "new-password"))
            .await?;

        Ok(())
    }

    #[tokio::test]
    async fn update_profile_unknown_user_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .users
            .update_profile(
                UserUuid::new(),
                ProfileUpdate {
                    password: None,
                    first_name: "Nobody".to_string(),
                    last_name: "Here".to_string(),
                    gender: None,
                    location: None,
                },
            )
            .await;

        assert!(
            matches!(result, Err(UsersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn delete_account_prevents_login() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx
            .users
            .register(new_user("gone@example.com", Role::Buyer))
            .await?;

        ctx.users.delete_account(user.uuid).await?;

        let result = ctx
            .users
            .login(credentials("gone@example.com", "correct-horse"))
            .await;

        assert!(
            matches!(result, Err(UsersServiceError::InvalidCredentials)),
            "expected InvalidCredentials, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_seller_account_removes_only_their_products() -> TestResult {
        let ctx = TestContext::new().await;
        let seller = ctx.create_user("seller@example.com", Role::Seller).await?;
        let other = ctx.create_user("other@example.com", Role::Seller).await?;
        let mine = ctx.create_product(seller, "Mine", Decimal::ONE, 1).await?;
        let theirs = ctx.create_product(other, "Theirs", Decimal::ONE, 1).await?;

        ctx.users.delete_account(seller).await?;

        assert!(
            matches!(
                ctx.products.get_product(mine.uuid).await,
                Err(ProductsServiceError::NotFound)
            ),
            "the deleted seller's product is gone"
        );
        assert_eq!(ctx.products.get_product(theirs.uuid).await?.name, "Theirs");

        Ok(())
    }

    #[tokio::test]
    async fn failed_account_deletion_keeps_listings_live() -> TestResult {
        let ctx = TestContext::new().await;
        let seller = ctx.create_user("seller@example.com", Role::Seller).await?;
        let kept = ctx.create_product(seller, "Rye", Decimal::ONE, 1).await?;

        let result = ctx.users.delete_account(UserUuid::new()).await;

        assert!(
            matches!(result, Err(UsersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
        assert_eq!(ctx.products.get_product(kept.uuid).await?.name, "Rye");

        Ok(())
    }
}
