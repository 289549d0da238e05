use super::body::read_json;
use crate::error::AppResult;
use crate::models::*;
use crate::routing::{Router, bind, path_id};
use crate::services::ProductOrderService;
use actix_web::{HttpRequest, HttpResponse, web};

#[utoipa::path(
    get,
    path = "/product-orders",
    tag = "order",
    responses(
        (status = 200, description = "All order lines", body = [ProductOrderResponse])
    )
)]
pub async fn list_product_orders(
    service: ProductOrderService,
    _req: HttpRequest,
    _payload: web::Payload,
) -> AppResult<HttpResponse> {
    let lines = service.list().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::list(lines)))
}

#[utoipa::path(
    post,
    path = "/product-orders",
    tag = "order",
    request_body = ProductOrderRequest,
    responses(
        (status = 200, description = "Line created", body = ProductOrderResponse),
        (status = 404, description = "Order or product not found")
    )
)]
pub async fn create_product_order(
    service: ProductOrderService,
    _req: HttpRequest,
    payload: web::Payload,
) -> AppResult<HttpResponse> {
    let request: ProductOrderRequest = read_json(payload).await?;
    let line = service.create(request).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        line,
        "Product order created successfully",
    )))
}

#[utoipa::path(
    delete,
    path = "/product-orders/{id}",
    tag = "order",
    params(("id" = i64, Path, description = "Line id")),
    responses(
        (status = 200, description = "Line deleted"),
        (status = 404, description = "Line not found")
    )
)]
pub async fn delete_product_order(
    service: ProductOrderService,
    req: HttpRequest,
    _payload: web::Payload,
) -> AppResult<HttpResponse> {
    service.delete(path_id(&req)?).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::message("Product order deleted successfully")))
}

pub fn product_order_routes(router: &mut Router, service: ProductOrderService) {
    router
        .get("/product-orders", bind(service.clone(), list_product_orders))
        .post("/product-orders", bind(service.clone(), create_product_order))
        .delete("/product-orders/:id", bind(service, delete_product_order));
}
