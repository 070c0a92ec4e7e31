//! Delete Product Handler

use salvo::{oapi::extract::PathParam, prelude::*};
use tracing::info;
use uuid::Uuid;

use crate::{extensions::*, products::errors::into_status_error, responses::MessageResponse};

/// Delete Product Handler
///
/// Soft-deletes the product; carts referencing it stop pricing it.
#[endpoint(
    tags("products"),
    summary = "Delete Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product deleted"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in as a seller"),
        (status_code = StatusCode::FORBIDDEN, description = "Product belongs to another seller"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<MessageResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let seller = depot.identity_or_401()?.user;
    let product = product.into_inner();

    state
        .app
        .products
        .delete_product(seller, product.into())
        .await
        .map_err(into_status_error)?;

    info!(seller_uuid = %seller, product_uuid = %product, "deleted product");

    Ok(Json(MessageResponse::new("Product is deleted successfully.")))
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use shopfront_app::domain::{
        products::{MockProductsService, ProductsServiceError, records::ProductUuid},
        users::records::Role,
    };

    use crate::test_helpers::{TEST_SELLER_UUID, TestServices};

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        TestServices::new().with_products(products).signed_in(
            TEST_SELLER_UUID,
            Role::Seller,
            Router::with_path("product/delete/{product}").delete(handler),
        )
    }

    #[tokio::test]
    async fn test_delete_product_success() -> TestResult {
        let uuid = ProductUuid::new();

        let mut products = MockProductsService::new();

        products
            .expect_delete_product()
            .once()
            .withf(move |seller, p| *seller == TEST_SELLER_UUID && *p == uuid)
            .return_once(|_, _| Ok(()));

        let res = TestClient::delete(format!("http://example.com/product/delete/{uuid}"))
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_other_sellers_product_returns_403() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_delete_product()
            .once()
            .return_once(|_, _| Err(ProductsServiceError::NotOwner));

        let res = TestClient::delete(format!(
            "http://example.com/product/delete/{}",
            ProductUuid::new()
        ))
        .send(&make_service(products))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_missing_product_returns_404() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_delete_product()
            .once()
            .return_once(|_, _| Err(ProductsServiceError::NotFound));

        let res = TestClient::delete(format!(
            "http://example.com/product/delete/{}",
            ProductUuid::new()
        ))
        .send(&make_service(products))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
