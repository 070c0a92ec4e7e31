//! Products service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        products::{
            data::{BuyerProductQuery, NewProduct, ProductQuery, ProductUpdate},
            errors::ProductsServiceError,
            records::{Page, ProductRecord, ProductUuid},
            repository::PgProductsRepository,
        },
        users::records::UserUuid,
    },
};

/// Number of products returned by [`ProductsService::latest_products`].
pub const LATEST_PRODUCTS_LIMIT: u32 = 6;

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn create_product(
        &self,
        seller: UserUuid,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let product = product.normalized();

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_product(&mut tx, ProductUuid::new(), seller, &product)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn update_product(
        &self,
        seller: UserUuid,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let update = update.normalized();

        let mut tx = self.db.begin().await?;

        let owner = self
            .repository
            .lock_product_seller(&mut tx, product)
            .await?
            .ok_or(ProductsServiceError::NotFound)?;

        if owner != seller {
            return Err(ProductsServiceError::NotOwner);
        }

        let updated = self
            .repository
            .update_product(&mut tx, product, &update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_product(
        &self,
        seller: UserUuid,
        product: ProductUuid,
    ) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let owner = self
            .repository
            .lock_product_seller(&mut tx, product)
            .await?
            .ok_or(ProductsServiceError::NotFound)?;

        if owner != seller {
            return Err(ProductsServiceError::NotOwner);
        }

        let rows_affected = self.repository.delete_product(&mut tx, product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        info!(%seller, %product, "withdrew product");

        Ok(())
    }

    async fn list_seller_products(
        &self,
        seller: UserUuid,
        query: ProductQuery,
    ) -> Result<Page<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let (products, total) = self
            .repository
            .list_seller_products(&mut tx, seller, &query)
            .await?;

        tx.commit().await?;

        Ok(Page::new(products, total, query.pagination.limit))
    }

    async fn list_buyer_products(
        &self,
        query: BuyerProductQuery,
    ) -> Result<Page<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let (products, total) = self
            .repository
            .list_buyer_products(&mut tx, &query)
            .await?;

        tx.commit().await?;

        Ok(Page::new(products, total, query.pagination.limit))
    }

    async fn latest_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self
            .repository
            .latest_products(&mut tx, LATEST_PRODUCTS_LIMIT)
            .await?;

        tx.commit().await?;

        Ok(products)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Creates a new product owned by the given seller.
    async fn create_product(
        &self,
        seller: UserUuid,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Retrieve a single live product.
    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError>;

    /// Replace a product's details; only its seller may do so.
    async fn update_product(
        &self,
        seller: UserUuid,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Soft-deletes a product; only its seller may do so.
    async fn delete_product(
        &self,
        seller: UserUuid,
        product: ProductUuid,
    ) -> Result<(), ProductsServiceError>;

    /// A page of the seller's own products, newest first.
    async fn list_seller_products(
        &self,
        seller: UserUuid,
        query: ProductQuery,
    ) -> Result<Page<ProductRecord>, ProductsServiceError>;

    /// A page of the catalogue filtered for buyers, newest first.
    async fn list_buyer_products(
        &self,
        query: BuyerProductQuery,
    ) -> Result<Page<ProductRecord>, ProductsServiceError>;

    /// The newest products in the catalogue.
    async fn latest_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{
        domain::{
            products::{
                data::{Pagination, PriceRange},
                records::Category,
            },
            users::records::Role,
        },
        test::{TestContext, helpers::new_product},
    };

    use super::*;

    fn first_page(limit: u32) -> Pagination {
        Pagination { page: 1, limit }
    }

    #[tokio::test]
    async fn create_product_returns_normalized_record() -> TestResult {
        let ctx = TestContext::new().await;
        let seller = ctx.create_user("seller@example.com", Role::Seller).await?;

        let product = ctx
            .products
            .create_product(
                seller,
                NewProduct {
                    name: "  Rye Loaf ".to_string(),
                    colors: vec!["BROWN".to_string()],
                    ..new_product("ignored", Decimal::new(350, 2))
                },
            )
            .await?;

        assert_eq!(product.seller_uuid, seller);
        assert_eq!(product.name, "Rye Loaf");
        assert_eq!(product.colors, vec!["brown".to_string()]);
        assert_eq!(product.price, Decimal::new(350, 2));
        assert!(product.deleted_at.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn get_product_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.products.get_product(ProductUuid::new()).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn update_product_by_other_seller_returns_not_owner() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = ctx.create_user("owner@example.com", Role::Seller).await?;
        let intruder = ctx.create_user("intruder@example.com", Role::Seller).await?;
        let product = ctx.create_product(owner, "Baguette", Decimal::ONE, 5).await?;

        let result = ctx
            .products
            .update_product(intruder, product.uuid, new_product("Stolen", Decimal::ONE))
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotOwner)),
            "expected NotOwner, got {result:?}"
        );

        let unchanged = ctx.products.get_product(product.uuid).await?;

        assert_eq!(unchanged.name, "Baguette");

        Ok(())
    }

    #[tokio::test]
    async fn update_product_replaces_details() -> TestResult {
        let ctx = TestContext::new().await;
        let seller = ctx.create_user("seller@example.com", Role::Seller).await?;
        let product = ctx.create_product(seller, "Baguette", Decimal::ONE, 5).await?;

        let updated = ctx
            .products
            .update_product(
                seller,
                product.uuid,
                NewProduct {
                    quantity: 9,
                    ..new_product("Ficelle", Decimal::new(125, 2))
                },
            )
            .await?;

        assert_eq!(updated.uuid, product.uuid);
        assert_eq!(updated.name, "Ficelle");
        assert_eq!(updated.quantity, 9);
        assert_eq!(updated.price, Decimal::new(125, 2));

        Ok(())
    }

    #[tokio::test]
    async fn delete_product_hides_it() -> TestResult {
        let ctx = TestContext::new().await;
        let seller = ctx.create_user("seller@example.com", Role::Seller).await?;
        let product = ctx.create_product(seller, "Baguette", Decimal::ONE, 5).await?;

        ctx.products.delete_product(seller, product.uuid).await?;

        let result = ctx.products.get_product(product.uuid).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        let again = ctx.products.delete_product(seller, product.uuid).await;

        assert!(
            matches!(again, Err(ProductsServiceError::NotFound)),
            "expected NotFound on second delete, got {again:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn seller_listing_is_scoped_searched_and_paged() -> TestResult {
        let ctx = TestContext::new().await;
        let seller = ctx.create_user("seller@example.com", Role::Seller).await?;
        let other = ctx.create_user("other@example.com", Role::Seller).await?;

        for name in ["Rye Bread", "Corn Bread", "Croissant"] {
            ctx.create_product(seller, name, Decimal::ONE, 3).await?;
        }
        ctx.create_product(other, "Other Bread", Decimal::ONE, 3).await?;

        let page = ctx
            .products
            .list_seller_products(
                seller,
                ProductQuery {
                    pagination: first_page(1),
                    search_text: Some("bread".to_string()),
                },
            )
            .await?;

        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items.len(), 1);
        assert_eq!(
            page.items.first().map(|product| product.name.as_str()),
            Some("Corn Bread"),
            "newest matching product comes first"
        );

        Ok(())
    }

    #[tokio::test]
    async fn buyer_listing_filters_price_and_category() -> TestResult {
        let ctx = TestContext::new().await;
        let seller = ctx.create_user("seller@example.com", Role::Seller).await?;

        ctx.create_product(seller, "Cheap Bread", Decimal::new(2, 0), 3).await?;
        ctx.create_product(seller, "Fancy Bread", Decimal::new(20, 0), 3).await?;
        ctx.products
            .create_product(
                seller,
                NewProduct {
                    category: Category::Kitchen,
                    ..new_product("Bread Knife", Decimal::new(15, 0))
                },
            )
            .await?;

        let page = ctx
            .products
            .list_buyer_products(BuyerProductQuery {
                pagination: first_page(10),
                search_text: None,
                price: PriceRange {
                    min: Some(Decimal::new(10, 0)),
                    max: Some(Decimal::new(30, 0)),
                },
                categories: vec![Category::Bakery],
            })
            .await?;

        let names: Vec<&str> = page.items.iter().map(|p| p.name.as_str()).collect();

        assert_eq!(names, vec!["Fancy Bread"]);
        assert_eq!(page.total_pages, 1);

        Ok(())
    }

    #[tokio::test]
    async fn latest_products_caps_at_six_and_skips_deleted() -> TestResult {
        let ctx = TestContext::new().await;
        let seller = ctx.create_user("seller@example.com", Role::Seller).await?;

        for index in 0..7 {
            ctx.create_product(seller, &format!("Loaf {index}"), Decimal::ONE, 1)
                .await?;
        }
        let doomed = ctx.create_product(seller, "Doomed", Decimal::ONE, 1).await?;
        ctx.products.delete_product(seller, doomed.uuid).await?;

        let latest = ctx.products.latest_products().await?;

        assert_eq!(latest.len(), 6);
        assert!(
            latest.iter().all(|product| product.uuid != doomed.uuid),
            "deleted products must not be listed"
        );
        assert_eq!(
            latest.first().map(|product| product.name.as_str()),
            Some("Loaf 6")
        );

        Ok(())
    }
}
