//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::domain::{
    products::{
        data::{BuyerProductQuery, NewProduct, ProductQuery},
        records::{Category, ProductRecord, ProductUuid},
    },
    users::records::UserUuid,
};

const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const LOCK_PRODUCT_SELLER_SQL: &str = include_str!("sql/lock_product_seller.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");
const DELETE_SELLER_PRODUCTS_SQL: &str = include_str!("sql/delete_seller_products.sql");
const LIST_SELLER_PRODUCTS_SQL: &str = include_str!("sql/list_seller_products.sql");
const COUNT_SELLER_PRODUCTS_SQL: &str = include_str!("sql/count_seller_products.sql");
const LIST_BUYER_PRODUCTS_SQL: &str = include_str!("sql/list_buyer_products.sql");
const COUNT_BUYER_PRODUCTS_SQL: &str = include_str!("sql/count_buyer_products.sql");
const LATEST_PRODUCTS_SQL: &str = include_str!("sql/latest_products.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: ProductUuid,
        seller: UserUuid,
        product: &NewProduct,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(uuid.into_uuid())
            .bind(seller.into_uuid())
            .bind(&product.name)
            .bind(&product.company)
            .bind(product.description.as_deref())
            .bind(product.image.as_deref())
            .bind(product.price)
            .bind(product.category.as_str())
            .bind(product.free_shipping)
            .bind(&product.colors)
            .bind(try_into_quantity(product.quantity)?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Lock a live product row and return its seller.
    pub(crate) async fn lock_product_seller(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Option<UserUuid>, sqlx::Error> {
        let seller = query_scalar::<Postgres, Uuid>(LOCK_PRODUCT_SELLER_SQL)
            .bind(product.into_uuid())
            .fetch_optional(&mut **tx)
            .await?;

        Ok(seller.map(UserUuid::from_uuid))
    }

    pub(crate) async fn update_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        update: &NewProduct,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(UPDATE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(&update.name)
            .bind(&update.company)
            .bind(update.description.as_deref())
            .bind(update.image.as_deref())
            .bind(update.price)
            .bind(update.category.as_str())
            .bind(update.free_shipping)
            .bind(&update.colors)
            .bind(try_into_quantity(update.quantity)?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_seller_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        seller: UserUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_SELLER_PRODUCTS_SQL)
            .bind(seller.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn list_seller_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        seller: UserUuid,
        product_query: &ProductQuery,
    ) -> Result<(Vec<ProductRecord>, u64), sqlx::Error> {
        let pattern = product_query.search_text.as_deref().map(contains_pattern);
        let pagination = product_query.pagination;

        let products = query_as::<Postgres, ProductRecord>(LIST_SELLER_PRODUCTS_SQL)
            .bind(seller.into_uuid())
            .bind(pattern.as_deref())
            .bind(i64::from(pagination.limit))
            .bind(try_into_offset(pagination.offset())?)
            .fetch_all(&mut **tx)
            .await?;

        let total = query_scalar::<Postgres, i64>(COUNT_SELLER_PRODUCTS_SQL)
            .bind(seller.into_uuid())
            .bind(pattern.as_deref())
            .fetch_one(&mut **tx)
            .await?;

        Ok((products, total.unsigned_abs()))
    }

    pub(crate) async fn list_buyer_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product_query: &BuyerProductQuery,
    ) -> Result<(Vec<ProductRecord>, u64), sqlx::Error> {
        let pattern = product_query.search_text.as_deref().map(contains_pattern);
        let categories: Vec<&str> = product_query
            .categories
            .iter()
            .copied()
            .map(Category::as_str)
            .collect();
        let pagination = product_query.pagination;

        let products = query_as::<Postgres, ProductRecord>(LIST_BUYER_PRODUCTS_SQL)
            .bind(pattern.as_deref())
            .bind(product_query.price.min)
            .bind(product_query.price.max)
            .bind(&categories)
            .bind(i64::from(pagination.limit))
            .bind(try_into_offset(pagination.offset())?)
            .fetch_all(&mut **tx)
            .await?;

        let total = query_scalar::<Postgres, i64>(COUNT_BUYER_PRODUCTS_SQL)
            .bind(pattern.as_deref())
            .bind(product_query.price.min)
            .bind(product_query.price.max)
            .bind(&categories)
            .fetch_one(&mut **tx)
            .await?;

        Ok((products, total.unsigned_abs()))
    }

    pub(crate) async fn latest_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        limit: u32,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LATEST_PRODUCTS_SQL)
            .bind(i64::from(limit))
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let category: String = row.try_get("category")?;
        let quantity: i32 = row.try_get("quantity")?;

        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            seller_uuid: UserUuid::from_uuid(row.try_get("seller_uuid")?),
            name: row.try_get("name")?,
            company: row.try_get("company")?,
            description: row.try_get("description")?,
            image: row.try_get("image")?,
            price: row.try_get::<Decimal, _>("price")?,
            category: category
                .parse::<Category>()
                .map_err(|e| sqlx::Error::ColumnDecode {
                    index: "category".to_string(),
                    source: Box::new(e),
                })?,
            free_shipping: row.try_get("free_shipping")?,
            colors: row.try_get("colors")?,
            quantity: u32::try_from(quantity).map_err(|e| sqlx::Error::ColumnDecode {
                index: "quantity".to_string(),
                source: Box::new(e),
            })?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}

fn try_into_quantity(quantity: u32) -> Result<i32, sqlx::Error> {
    i32::try_from(quantity).map_err(|e| sqlx::Error::Encode(Box::new(e)))
}

fn try_into_offset(offset: u64) -> Result<i64, sqlx::Error> {
    i64::try_from(offset).map_err(|e| sqlx::Error::Encode(Box::new(e)))
}

/// `ILIKE` pattern matching `text` anywhere, with wildcards in `text` taken literally.
fn contains_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);

    pattern.push('%');

    for ch in text.trim().chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }

        pattern.push(ch);
    }

    pattern.push('%');

    pattern
}
