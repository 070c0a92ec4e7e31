//! Cart Lines Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::{
    carts::{
        pricing::PricedCartLine,
        records::{CartLineRecord, CartLineUuid, CartUuid},
    },
    products::records::ProductUuid,
    users::records::UserUuid,
};

const MERGE_CART_LINE_SQL: &str = include_str!("../sql/merge_cart_line.sql");
const DELETE_CART_LINE_SQL: &str = include_str!("../sql/delete_cart_line.sql");
const LOCK_CART_LINE_SQL: &str = include_str!("../sql/lock_cart_line.sql");
const SET_CART_LINE_QUANTITY_SQL: &str = include_str!("../sql/set_cart_line_quantity.sql");
const COUNT_CART_LINES_SQL: &str = include_str!("../sql/count_cart_lines.sql");
const GET_PRICED_CART_LINES_SQL: &str = include_str!("../sql/get_priced_cart_lines.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartLinesRepository;

impl PgCartLinesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Append a line, or add `quantity` to the existing line for the product.
    pub(crate) async fn merge_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<CartLineRecord, sqlx::Error> {
        query_as::<Postgres, CartLineRecord>(MERGE_CART_LINE_SQL)
            .bind(CartLineUuid::new().into_uuid())
            .bind(cart.into_uuid())
            .bind(product.into_uuid())
            .bind(try_into_quantity(quantity)?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: UserUuid,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_LINE_SQL)
            .bind(owner.into_uuid())
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Read the owner's line for a product, holding a row lock until commit.
    pub(crate) async fn lock_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: UserUuid,
        product: ProductUuid,
    ) -> Result<Option<CartLineRecord>, sqlx::Error> {
        query_as::<Postgres, CartLineRecord>(LOCK_CART_LINE_SQL)
            .bind(owner.into_uuid())
            .bind(product.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn set_quantity(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        line: CartLineUuid,
        quantity: u32,
    ) -> Result<CartLineRecord, sqlx::Error> {
        query_as::<Postgres, CartLineRecord>(SET_CART_LINE_QUANTITY_SQL)
            .bind(line.into_uuid())
            .bind(try_into_quantity(quantity)?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn count_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: UserUuid,
    ) -> Result<u64, sqlx::Error> {
        let count = query_scalar::<Postgres, i64>(COUNT_CART_LINES_SQL)
            .bind(owner.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        Ok(count.unsigned_abs())
    }

    /// Lines joined against live products, in insertion order.
    pub(crate) async fn priced_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: UserUuid,
    ) -> Result<Vec<PricedCartLine>, sqlx::Error> {
        query_as::<Postgres, PricedCartLine>(GET_PRICED_CART_LINES_SQL)
            .bind(owner.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for CartLineRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CartLineUuid::from_uuid(row.try_get("uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            quantity: try_from_quantity(row.try_get("quantity")?, "quantity")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for PricedCartLine {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self::new(
            ProductUuid::from_uuid(row.try_get("product_uuid")?),
            try_from_quantity(row.try_get("order_quantity")?, "order_quantity")?,
            try_from_quantity(row.try_get("available_quantity")?, "available_quantity")?,
            row.try_get("name")?,
            row.try_get("brand")?,
            row.try_get("image")?,
            row.try_get::<Decimal, _>("price")?,
        ))
    }
}

pub(super) fn try_from_quantity(quantity: i32, col: &str) -> Result<u32, sqlx::Error> {
    u32::try_from(quantity).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

fn try_into_quantity(quantity: u32) -> Result<i32, sqlx::Error> {
    i32::try_from(quantity).map_err(|e| sqlx::Error::Encode(Box::new(e)))
}
