use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models::*;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::brand::list_brands,
        handlers::brand::create_brand,
        handlers::brand::update_brand,
        handlers::brand::delete_brand,
        handlers::category::list_categories,
        handlers::category::create_category,
        handlers::category::update_category,
        handlers::category::delete_category,
        handlers::product::list_products,
        handlers::product::filter_products,
        handlers::product::create_product,
        handlers::product::update_product,
        handlers::product::delete_product,
        handlers::product::product_history,
        handlers::order::list_orders,
        handlers::order::create_order,
        handlers::order::update_order,
        handlers::order::delete_order,
        handlers::product_order::list_product_orders,
        handlers::product_order::create_product_order,
        handlers::product_order::delete_product_order,
        handlers::payment::list_payments,
        handlers::payment::get_payment,
        handlers::shipping::list_shippings,
        handlers::shipping::get_shipping,
        handlers::shipping::create_shipping,
        handlers::shipping::update_shipping,
        handlers::shipping::delete_shipping,
        handlers::repair::list_repairs,
        handlers::repair::create_repair,
        handlers::repair::update_repair,
        handlers::repair::delete_repair,
        handlers::repair::list_repair_statuses,
        handlers::repair::create_repair_status,
        handlers::repair::update_repair_status,
        handlers::repair::delete_repair_status,
        handlers::checkout::checkout,
    ),
    components(
        schemas(
            NameRequest,
            BrandResponse,
            CategorySummary,
            CategoryResponse,
            ProductSummary,
            ProductResponse,
            ProductFilterQuery,
            ProductHistoryResponse,
            PaymentInput,
            ShippingInput,
            OrderRequest,
            ShippingRequest,
            ProductOrderRequest,
            PaymentResponse,
            ShippingResponse,
            ProductOrderResponse,
            OrderResponse,
            RepairRequest,
            RepairResponse,
            RepairStatusRequest,
            RepairStatusResponse,
            CheckoutRequest,
            CheckoutShipping,
            CheckoutPayment,
            CheckoutOrder,
            CheckoutItem,
            ApiError,
        )
    ),
    tags(
        (name = "catalog", description = "Brands, categories and products"),
        (name = "order", description = "Orders, payments, shipping and checkout"),
        (name = "repair", description = "Repair tickets and statuses"),
    ),
    info(
        title = "Zenshop Backend API",
        version = "1.0.0",
        description = "Shop and repair administration REST API"
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_paths_with_braces() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/brands/{id}"));
        assert!(doc.paths.paths.contains_key("/products/{id}/history"));
        assert!(doc.paths.paths.contains_key("/checkout"));
    }
}
