use super::body::read_json;
use crate::error::AppResult;
use crate::models::*;
use crate::routing::{Router, bind, path_id};
use crate::services::OrderService;
use actix_web::{HttpRequest, HttpResponse, web};

#[utoipa::path(
    get,
    path = "/orders",
    tag = "order",
    responses(
        (status = 200, description = "Orders with payment, shipping and items", body = [OrderResponse])
    )
)]
pub async fn list_orders(
    service: OrderService,
    _req: HttpRequest,
    _payload: web::Payload,
) -> AppResult<HttpResponse> {
    let orders = service.list().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::list(orders)))
}

#[utoipa::path(
    post,
    path = "/orders",
    tag = "order",
    request_body = OrderRequest,
    responses(
        (status = 200, description = "Order created", body = OrderResponse),
        (status = 400, description = "Invalid payload")
    )
)]
pub async fn create_order(
    service: OrderService,
    _req: HttpRequest,
    payload: web::Payload,
) -> AppResult<HttpResponse> {
    let request: OrderRequest = read_json(payload).await?;
    let order = service.create(request).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        order,
        "Order created successfully",
    )))
}

#[utoipa::path(
    put,
    path = "/orders/{id}",
    tag = "order",
    params(("id" = i64, Path, description = "Order id")),
    request_body = OrderRequest,
    responses(
        (status = 200, description = "Order updated", body = OrderResponse),
        (status = 404, description = "Order not found")
    )
)]
pub async fn update_order(
    service: OrderService,
    req: HttpRequest,
    payload: web::Payload,
) -> AppResult<HttpResponse> {
    let id = path_id(&req)?;
    let request: OrderRequest = read_json(payload).await?;
    let order = service.update(id, request).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        order,
        "Order updated successfully",
    )))
}

#[utoipa::path(
    delete,
    path = "/orders/{id}",
    tag = "order",
    params(("id" = i64, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order and dependents deleted"),
        (status = 404, description = "Order not found")
    )
)]
pub async fn delete_order(
    service: OrderService,
    req: HttpRequest,
    _payload: web::Payload,
) -> AppResult<HttpResponse> {
    service.delete(path_id(&req)?).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::message("Order deleted successfully")))
}

pub fn order_routes(router: &mut Router, service: OrderService) {
    router
        .get("/orders", bind(service.clone(), list_orders))
        .post("/orders", bind(service.clone(), create_order))
        .put("/orders/:id", bind(service.clone(), update_order))
        .delete("/orders/:id", bind(service, delete_order));
}
