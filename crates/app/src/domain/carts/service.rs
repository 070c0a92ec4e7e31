//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{info, warn};

use crate::{
    database::Db,
    domain::{
        carts::{
            data::{CartAddition, QuantityAdjustment},
            errors::CartsServiceError,
            pricing::CartSummary,
            reconciler::adjust_quantity,
            records::CartLineRecord,
            repositories::{PgCartLinesRepository, PgCartsRepository},
        },
        products::records::ProductUuid,
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts_repository: PgCartsRepository,
    lines_repository: PgCartLinesRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts_repository: PgCartsRepository::new(),
            lines_repository: PgCartLinesRepository::new(),
        }
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn add_item(
        &self,
        owner: UserUuid,
        product: ProductUuid,
        addition: CartAddition,
    ) -> Result<CartLineRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let available = self
            .carts_repository
            .get_available_quantity(&mut tx, product)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        let cart = self.carts_repository.upsert_cart(&mut tx, owner).await?;

        let line = self
            .lines_repository
            .merge_line(&mut tx, cart.uuid, product, addition.quantity)
            .await?;

        tx.commit().await?;

        if line.quantity > available {
            warn!(
                %owner,
                %product,
                quantity = line.quantity,
                available,
                "cart line exceeds available stock"
            );
        }

        Ok(line)
    }

    async fn remove_item(
        &self,
        owner: UserUuid,
        product: ProductUuid,
    ) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        self.carts_repository
            .get_available_quantity(&mut tx, product)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        let removed = self
            .lines_repository
            .delete_line(&mut tx, owner, product)
            .await?;

        tx.commit().await?;

        if removed == 0 {
            info!(%owner, %product, "product was not in cart");
        }

        Ok(())
    }

    async fn adjust_quantity(
        &self,
        owner: UserUuid,
        product: ProductUuid,
        adjustment: QuantityAdjustment,
    ) -> Result<CartLineRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let available = self
            .carts_repository
            .get_available_quantity(&mut tx, product)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        let line = self
            .lines_repository
            .lock_line(&mut tx, owner, product)
            .await?
            .ok_or(CartsServiceError::CartLineMissing)?;

        let quantity = adjust_quantity(line.quantity, available, adjustment)?;

        let line = self
            .lines_repository
            .set_quantity(&mut tx, line.uuid, quantity)
            .await?;

        tx.commit().await?;

        Ok(line)
    }

    async fn count_items(&self, owner: UserUuid) -> Result<u64, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let count = self.lines_repository.count_lines(&mut tx, owner).await?;

        tx.commit().await?;

        Ok(count)
    }

    async fn cart_summary(&self, owner: UserUuid) -> Result<CartSummary, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let lines = self.lines_repository.priced_lines(&mut tx, owner).await?;

        tx.commit().await?;

        Ok(CartSummary::from_lines(lines))
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Add a quantity of a product to the owner's cart, merging with an existing line.
    async fn add_item(
        &self,
        owner: UserUuid,
        product: ProductUuid,
        addition: CartAddition,
    ) -> Result<CartLineRecord, CartsServiceError>;

    /// Remove a product's line from the owner's cart. Absent lines are not an error.
    async fn remove_item(
        &self,
        owner: UserUuid,
        product: ProductUuid,
    ) -> Result<(), CartsServiceError>;

    /// Step a line's quantity up or down by one within `1..=stock`.
    async fn adjust_quantity(
        &self,
        owner: UserUuid,
        product: ProductUuid,
        adjustment: QuantityAdjustment,
    ) -> Result<CartLineRecord, CartsServiceError>;

    /// Number of lines in the owner's cart.
    async fn count_items(&self, owner: UserUuid) -> Result<u64, CartsServiceError>;

    /// Price the owner's cart against the live catalogue.
    async fn cart_summary(&self, owner: UserUuid) -> Result<CartSummary, CartsServiceError>;
}
