pub mod body;
pub mod brand;
pub mod category;
pub mod checkout;
pub mod order;
pub mod payment;
pub mod product;
pub mod product_order;
pub mod repair;
pub mod shipping;

pub use brand::brand_routes;
pub use category::category_routes;
pub use checkout::checkout_routes;
pub use order::order_routes;
pub use payment::payment_routes;
pub use product::{ProductEndpoints, product_routes};
pub use product_order::product_order_routes;
pub use repair::{repair_routes, repair_status_routes};
pub use shipping::shipping_routes;

use crate::routing::Router;
use crate::services::*;
use crate::storage::SharedStorage;
use sea_orm::DatabaseConnection;

/// One instance of every service, sharing the pool.
#[derive(Clone)]
pub struct ApiServices {
    pub brands: BrandService,
    pub categories: CategoryService,
    pub products: ProductService,
    pub orders: OrderService,
    pub product_orders: ProductOrderService,
    pub payments: PaymentService,
    pub shippings: ShippingService,
    pub repairs: RepairService,
    pub repair_statuses: RepairStatusService,
    pub checkout: CheckoutService,
}

impl ApiServices {
    pub fn new(pool: DatabaseConnection, storage: SharedStorage) -> Self {
        Self {
            brands: BrandService::new(pool.clone()),
            categories: CategoryService::new(pool.clone()),
            products: ProductService::new(pool.clone(), storage),
            orders: OrderService::new(pool.clone()),
            product_orders: ProductOrderService::new(pool.clone()),
            payments: PaymentService::new(pool.clone()),
            shippings: ShippingService::new(pool.clone()),
            repairs: RepairService::new(pool.clone()),
            repair_statuses: RepairStatusService::new(pool.clone()),
            checkout: CheckoutService::new(pool),
        }
    }
}

/// Registers every endpoint on a fresh route table.
pub fn build_router(services: ApiServices, upload_limit: usize) -> Router {
    let mut router = Router::new();
    brand_routes(&mut router, services.brands);
    category_routes(&mut router, services.categories);
    product_routes(
        &mut router,
        ProductEndpoints {
            service: services.products,
            upload_limit,
        },
    );
    order_routes(&mut router, services.orders);
    product_order_routes(&mut router, services.product_orders);
    payment_routes(&mut router, services.payments);
    shipping_routes(&mut router, services.shippings);
    repair_routes(&mut router, services.repairs);
    repair_status_routes(&mut router, services.repair_statuses);
    checkout_routes(&mut router, services.checkout);
    router
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppResult;
    use crate::routing::{BoxedHandler, access_log, chain, request_id, serve};
    use crate::storage::ObjectStorage;
    use actix_web::http::{Method, StatusCode};
    use actix_web::test as actix_test;
    use actix_web::{App, web};
    use futures_util::future::BoxFuture;
    use std::sync::Arc;

    struct NoopStorage;

    impl ObjectStorage for NoopStorage {
        fn put_object(&self, _bytes: Vec<u8>, file_name: &str) -> BoxFuture<'_, AppResult<String>> {
            let url = format!("https://bucket.s3.test.amazonaws.com/{file_name}");
            Box::pin(async move { Ok(url) })
        }

        fn delete_object(&self, _key: &str) -> BoxFuture<'_, AppResult<()>> {
            Box::pin(async { Ok(()) })
        }
    }

    fn router() -> Router {
        let services = ApiServices::new(DatabaseConnection::Disconnected, Arc::new(NoopStorage));
        build_router(services, 1024)
    }

    async fn send(req: actix_test::TestRequest) -> (StatusCode, serde_json::Value) {
        let entry: BoxedHandler = chain(Arc::new(router()), &[&request_id, &access_log]);
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(entry))
                .default_service(web::to(serve)),
        )
        .await;
        let res = actix_test::call_service(&app, req.to_request()).await;
        let status = res.status();
        let body = actix_test::read_body(res).await;
        (status, serde_json::from_slice(&body).unwrap_or_default())
    }

    #[test]
    fn test_every_endpoint_is_registered() {
        let router = router();
        assert_eq!(router.len(), 37);
        let expected = [
            (Method::GET, "/brands"),
            (Method::DELETE, "/categories/3"),
            (Method::GET, "/products/filter"),
            (Method::GET, "/products/9/history"),
            (Method::PUT, "/orders/1"),
            (Method::DELETE, "/product-orders/2"),
            (Method::GET, "/payments/4"),
            (Method::POST, "/shippings"),
            (Method::PUT, "/repair-statuses/5"),
            (Method::POST, "/checkout"),
        ];
        for (method, path) in expected {
            assert!(router.resolve(&method, path).is_some(), "{method} {path}");
        }
        assert!(router.resolve(&Method::GET, "/checkout").is_none());
        assert!(router.resolve(&Method::PATCH, "/brands/1").is_none());
    }

    #[actix_web::test]
    async fn test_unknown_route_is_json_404() {
        let (status, json) = send(actix_test::TestRequest::get().uri("/nope")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], "NOT_FOUND");
    }

    #[actix_web::test]
    async fn test_non_numeric_id_is_bad_request() {
        let (status, json) = send(actix_test::TestRequest::delete().uri("/brands/abc")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["message"], "Invalid ID: abc");
    }

    #[actix_web::test]
    async fn test_malformed_json_is_bad_request() {
        let (status, json) = send(
            actix_test::TestRequest::post()
                .uri("/brands")
                .insert_header(("content-type", "application/json"))
                .set_payload("{\"name\":"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "INVALID_PAYLOAD");
    }

    #[actix_web::test]
    async fn test_empty_checkout_is_rejected_before_db() {
        let body = serde_json::json!({
            "shipping": {
                "firstName": "A", "lastName": "B", "address": "C", "city": "D",
                "state": "E", "zipCode": "F", "country": "G"
            },
            "payment": {"cardholderName": "A B", "cardNumberLast4": "4242", "expiryDate": "01/30"},
            "order": {"items": [], "totalItems": 0, "subtotal": 0, "shippingFee": 0, "total": 0}
        });
        let (status, json) = send(actix_test::TestRequest::post().uri("/checkout").set_json(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    }

    #[actix_web::test]
    async fn test_product_create_requires_multipart() {
        let (status, json) = send(
            actix_test::TestRequest::post()
                .uri("/products")
                .set_json(serde_json::json!({"name": "x"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "INVALID_PAYLOAD");
    }

    #[actix_web::test]
    async fn test_blank_brand_name_is_rejected() {
        let (status, json) = send(
            actix_test::TestRequest::post()
                .uri("/brands")
                .set_json(serde_json::json!({"name": "  "})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["message"], "Brand name is required");
    }

    #[actix_web::test]
    async fn test_multipart_limit_counts_all_parts() {
        // three 600-byte text parts, each under the 1024-byte limit on its own
        let boundary = "zenshopboundary";
        let filler = "x".repeat(600);
        let mut body = String::new();
        for name in ["name", "updateBy", "extra"] {
            body.push_str(&format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{filler}\r\n"
            ));
        }
        body.push_str(&format!("--{boundary}--\r\n"));

        let (status, json) = send(
            actix_test::TestRequest::post()
                .uri("/products")
                .insert_header((
                    "content-type",
                    format!("multipart/form-data; boundary={boundary}"),
                ))
                .set_payload(body),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json["error"]["message"],
            "Form data exceeds the 1024 byte upload limit"
        );
    }
}
