//! Carts Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};

use crate::domain::{
    carts::records::{CartRecord, CartUuid},
    products::records::ProductUuid,
    users::records::UserUuid,
};

use super::lines::try_from_quantity;

const UPSERT_CART_SQL: &str = include_str!("../sql/upsert_cart.sql");
const GET_AVAILABLE_QUANTITY_SQL: &str = include_str!("../sql/get_available_quantity.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartsRepository;

impl PgCartsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Fetch the owner's cart, creating it on first use.
    pub(crate) async fn upsert_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: UserUuid,
    ) -> Result<CartRecord, sqlx::Error> {
        query_as::<Postgres, CartRecord>(UPSERT_CART_SQL)
            .bind(CartUuid::new().into_uuid())
            .bind(owner.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Current stock of a live product, `None` when it does not exist.
    pub(crate) async fn get_available_quantity(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Option<u32>, sqlx::Error> {
        query_scalar::<Postgres, i32>(GET_AVAILABLE_QUANTITY_SQL)
            .bind(product.into_uuid())
            .fetch_optional(&mut **tx)
            .await?
            .map(|quantity| try_from_quantity(quantity, "quantity"))
            .transpose()
    }
}

impl<'r> FromRow<'r, PgRow> for CartRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CartUuid::from_uuid(row.try_get("uuid")?),
            owner_uuid: UserUuid::from_uuid(row.try_get("owner_uuid")?),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
