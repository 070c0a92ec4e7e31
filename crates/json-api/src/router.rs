//! Routers

use salvo::Router;

use crate::{
    auth::{guards, middleware},
    carts, products, users,
};

/// Routes reachable without a bearer token.
pub(crate) fn public_router() -> Router {
    Router::with_path("user")
        .push(Router::with_path("register").post(users::register::handler))
        .push(Router::with_path("login").post(users::login::handler))
}

/// Routes behind the bearer token middleware, split by role.
pub(crate) fn app_router() -> Router {
    Router::new()
        .hoop(middleware::handler)
        .push(
            Router::with_path("user")
                .push(Router::with_path("edit").put(users::edit::handler))
                .push(Router::with_path("delete/account").delete(users::delete_account::handler)),
        )
        .push(
            Router::with_path("product")
                .push(Router::with_path("details/{product}").get(products::details::handler))
                .push(Router::with_path("latest").get(products::latest::handler)),
        )
        .push(seller_router())
        .push(buyer_router())
}

fn seller_router() -> Router {
    Router::with_path("product")
        .hoop(guards::require_seller)
        .push(Router::with_path("add").post(products::create::handler))
        .push(Router::with_path("delete/{product}").delete(products::delete::handler))
        .push(Router::with_path("edit/{product}").put(products::update::handler))
        .push(Router::with_path("seller/all").post(products::seller_index::handler))
}

fn buyer_router() -> Router {
    Router::new()
        .hoop(guards::require_buyer)
        .push(Router::with_path("product/buyer/all").post(products::buyer_index::handler))
        .push(
            Router::with_path("cart")
                .push(Router::with_path("add/{product}").post(carts::add::handler))
                .push(Router::with_path("count").get(carts::count::handler))
                .push(Router::with_path("data").get(carts::data::handler))
                .push(Router::with_path("remove-item/{product}").put(carts::remove_item::handler))
                .push(
                    Router::with_path("update/quantity/{product}")
                        .put(carts::update_quantity::handler),
                ),
        )
}

#[cfg(test)]
mod tests {
    use salvo::{
        http::{StatusCode, header::AUTHORIZATION},
        prelude::*,
        test::TestClient,
    };
    use testresult::TestResult;

    use shopfront_app::{
        auth::{Identity, MockAuthService},
        domain::{carts::MockCartsService, products::MockProductsService, users::records::Role},
    };

    use crate::test_helpers::{TEST_BUYER_UUID, TEST_SELLER_UUID, TestServices};

    use super::*;

    fn auth_as(user: Identity) -> MockAuthService {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer()
            .once()
            .return_once(move |_| Ok(user));

        auth
    }

    fn serve(services: TestServices) -> Service {
        services.public(Router::new().push(public_router()).push(app_router()))
    }

    #[tokio::test]
    async fn test_cart_requires_a_token() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_count_items().never();

        let res = TestClient::get("http://example.com/cart/count")
            .send(&serve(TestServices::new().with_carts(carts)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_seller_cannot_use_the_cart() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_count_items().never();

        let services = TestServices::new().with_carts(carts).with_auth(auth_as(Identity {
            user: TEST_SELLER_UUID,
            role: Role::Seller,
        }));

        let res = TestClient::get("http://example.com/cart/count")
            .add_header(AUTHORIZATION, "Bearer token", true)
            .send(&serve(services))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_buyer_reaches_the_cart() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_count_items()
            .once()
            .withf(|owner| *owner == TEST_BUYER_UUID)
            .return_once(|_| Ok(2));

        let services = TestServices::new().with_carts(carts).with_auth(auth_as(Identity {
            user: TEST_BUYER_UUID,
            role: Role::Buyer,
        }));

        let res = TestClient::get("http://example.com/cart/count")
            .add_header(AUTHORIZATION, "Bearer token", true)
            .send(&serve(services))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_buyer_cannot_list_seller_products() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_list_seller_products().never();

        let services = TestServices::new()
            .with_products(products)
            .with_auth(auth_as(Identity {
                user: TEST_BUYER_UUID,
                role: Role::Buyer,
            }));

        let res = TestClient::post("http://example.com/product/seller/all")
            .add_header(AUTHORIZATION, "Bearer token", true)
            .json(&serde_json::json!({ "page": 1, "limit": 10 }))
            .send(&serve(services))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
