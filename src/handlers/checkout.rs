use super::body::read_json;
use crate::error::AppResult;
use crate::models::*;
use crate::routing::{Router, bind};
use crate::services::CheckoutService;
use actix_web::{HttpRequest, HttpResponse, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/checkout",
    tag = "order",
    request_body = CheckoutRequest,
    responses(
        (status = 200, description = "Order placed; `orderID` holds the new order id", body = OrderResponse),
        (status = 400, description = "Empty cart, bad quantity or insufficient stock"),
        (status = 404, description = "Unknown product")
    )
)]
pub async fn checkout(
    service: CheckoutService,
    _req: HttpRequest,
    payload: web::Payload,
) -> AppResult<HttpResponse> {
    let request: CheckoutRequest = read_json(payload).await?;
    let order = service.checkout(request).await?;
    let order_id = order.id;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Checkout completed successfully",
        "data": order,
        "orderID": order_id,
    })))
}

pub fn checkout_routes(router: &mut Router, service: CheckoutService) {
    router.post("/checkout", bind(service, checkout));
}
