//! Auth repository.

use sqlx::{PgPool, Postgres, query_scalar};

use crate::domain::users::records::{Role, UserUuid};

const FIND_USER_ROLE_SQL: &str = include_str!("sql/find_user_role.sql");

#[derive(Debug, Clone)]
pub(crate) struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn find_user_role(&self, user: UserUuid) -> Result<Option<Role>, sqlx::Error> {
        let role = query_scalar::<Postgres, String>(FIND_USER_ROLE_SQL)
            .bind(user.into_uuid())
            .fetch_optional(&self.pool)
            .await?;

        role.map(|role| {
            role.parse::<Role>().map_err(|e| sqlx::Error::ColumnDecode {
                index: "role".to_string(),
                source: Box::new(e),
            })
        })
        .transpose()
    }
}
