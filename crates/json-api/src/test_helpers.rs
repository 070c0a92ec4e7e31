//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use shopfront_app::{
    auth::{Identity, MockAuthService},
    context::AppContext,
    domain::{
        carts::MockCartsService,
        products::{
            MockProductsService,
            records::{Category, ProductRecord, ProductUuid},
        },
        users::{
            MockUsersService,
            records::{Role, UserRecord, UserUuid},
        },
    },
};

use crate::state::State;

pub(crate) const TEST_BUYER_UUID: UserUuid = UserUuid::from_uuid(Uuid::from_u128(1));
pub(crate) const TEST_SELLER_UUID: UserUuid = UserUuid::from_uuid(Uuid::from_u128(2));

/// Mocked services behind a handler under test.
///
/// Any service that is not replaced rejects every call.
pub(crate) struct TestServices {
    users: MockUsersService,
    products: MockProductsService,
    carts: MockCartsService,
    auth: MockAuthService,
}

impl TestServices {
    pub(crate) fn new() -> Self {
        Self {
            users: MockUsersService::new(),
            products: MockProductsService::new(),
            carts: MockCartsService::new(),
            auth: MockAuthService::new(),
        }
    }

    pub(crate) fn with_users(self, users: MockUsersService) -> Self {
        Self { users, ..self }
    }

    pub(crate) fn with_products(self, products: MockProductsService) -> Self {
        Self { products, ..self }
    }

    pub(crate) fn with_carts(self, carts: MockCartsService) -> Self {
        Self { carts, ..self }
    }

    pub(crate) fn with_auth(self, auth: MockAuthService) -> Self {
        Self { auth, ..self }
    }

    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            users: Arc::new(self.users),
            products: Arc::new(self.products),
            carts: Arc::new(self.carts),
            auth: Arc::new(self.auth),
        })
    }

    /// Serve `route` without an authenticated caller.
    pub(crate) fn public(self, route: Router) -> Service {
        Service::new(Router::new().hoop(inject(self.into_state())).push(route))
    }

    /// Serve `route` as if the auth middleware had resolved `user`.
    pub(crate) fn signed_in(self, user: UserUuid, role: Role, route: Router) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(self.into_state()))
                .push(with_identity(user, role, route)),
        )
    }
}

pub(crate) fn with_identity(user: UserUuid, role: Role, route: Router) -> Router {
    Router::new()
        .hoop(inject(Identity { user, role }))
        .push(route)
}

pub(crate) fn make_product(uuid: ProductUuid, seller: UserUuid) -> ProductRecord {
    ProductRecord {
        uuid,
        seller_uuid: seller,
        name: "Sourdough".to_string(),
        company: "Bakehouse".to_string(),
        description: None,
        image: None,
        price: Decimal::new(450, 2),
        category: Category::Bakery,
        free_shipping: false,
        colors: Vec::new(),
        quantity: 12,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}

pub(crate) fn make_user(uuid: UserUuid, role: Role) -> UserRecord {
    UserRecord {
        uuid,
        email: "ada@example.com".to_string(),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        role,
        gender: None,
        location: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
