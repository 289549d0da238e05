use super::body::read_json;
use crate::error::AppResult;
use crate::models::*;
use crate::routing::{Router, bind, path_id};
use crate::services::ShippingService;
use actix_web::{HttpRequest, HttpResponse, web};

#[utoipa::path(
    get,
    path = "/shippings",
    tag = "order",
    responses((status = 200, description = "All shipping records", body = [ShippingResponse]))
)]
pub async fn list_shippings(
    service: ShippingService,
    _req: HttpRequest,
    _payload: web::Payload,
) -> AppResult<HttpResponse> {
    let shippings = service.list().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::list(shippings)))
}

#[utoipa::path(
    get,
    path = "/shippings/{id}",
    tag = "order",
    params(("id" = i64, Path, description = "Shipping id")),
    responses(
        (status = 200, description = "One shipping record", body = ShippingResponse),
        (status = 404, description = "Shipping not found")
    )
)]
pub async fn get_shipping(
    service: ShippingService,
    req: HttpRequest,
    _payload: web::Payload,
) -> AppResult<HttpResponse> {
    let shipping = service.get(path_id(&req)?).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(shipping)))
}

#[utoipa::path(
    post,
    path = "/shippings",
    tag = "order",
    request_body = ShippingRequest,
    responses(
        (status = 201, description = "Shipping created", body = ShippingResponse),
        (status = 404, description = "Order not found"),
        (status = 409, description = "Order already has a shipping record")
    )
)]
pub async fn create_shipping(
    service: ShippingService,
    _req: HttpRequest,
    payload: web::Payload,
) -> AppResult<HttpResponse> {
    let request: ShippingRequest = read_json(payload).await?;
    let shipping = service.create(request).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success_with_message(
        shipping,
        "Shipping created successfully",
    )))
}

#[utoipa::path(
    put,
    path = "/shippings/{id}",
    tag = "order",
    params(("id" = i64, Path, description = "Shipping id")),
    request_body = ShippingInput,
    responses(
        (status = 200, description = "Shipping updated", body = ShippingResponse),
        (status = 404, description = "Shipping not found")
    )
)]
pub async fn update_shipping(
    service: ShippingService,
    req: HttpRequest,
    payload: web::Payload,
) -> AppResult<HttpResponse> {
    let id = path_id(&req)?;
    let request: ShippingInput = read_json(payload).await?;
    let shipping = service.update(id, request).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        shipping,
        "Shipping updated successfully",
    )))
}

#[utoipa::path(
    delete,
    path = "/shippings/{id}",
    tag = "order",
    params(("id" = i64, Path, description = "Shipping id")),
    responses(
        (status = 200, description = "Shipping deleted"),
        (status = 404, description = "Shipping not found")
    )
)]
pub async fn delete_shipping(
    service: ShippingService,
    req: HttpRequest,
    _payload: web::Payload,
) -> AppResult<HttpResponse> {
    service.delete(path_id(&req)?).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::message("Shipping deleted successfully")))
}

pub fn shipping_routes(router: &mut Router, service: ShippingService) {
    router
        .get("/shippings", bind(service.clone(), list_shippings))
        .get("/shippings/:id", bind(service.clone(), get_shipping))
        .post("/shippings", bind(service.clone(), create_shipping))
        .put("/shippings/:id", bind(service.clone(), update_shipping))
        .delete("/shippings/:id", bind(service, delete_shipping));
}
