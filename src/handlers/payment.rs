use crate::error::AppResult;
use crate::models::*;
use crate::routing::{Router, bind, path_id};
use crate::services::PaymentService;
use actix_web::{HttpRequest, HttpResponse, web};

#[utoipa::path(
    get,
    path = "/payments",
    tag = "order",
    responses((status = 200, description = "All payments", body = [PaymentResponse]))
)]
pub async fn list_payments(
    service: PaymentService,
    _req: HttpRequest,
    _payload: web::Payload,
) -> AppResult<HttpResponse> {
    let payments = service.list().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::list(payments)))
}

#[utoipa::path(
    get,
    path = "/payments/{id}",
    tag = "order",
    params(("id" = i64, Path, description = "Payment id")),
    responses(
        (status = 200, description = "One payment", body = PaymentResponse),
        (status = 404, description = "Payment not found")
    )
)]
pub async fn get_payment(
    service: PaymentService,
    req: HttpRequest,
    _payload: web::Payload,
) -> AppResult<HttpResponse> {
    let payment = service.get(path_id(&req)?).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(payment)))
}

pub fn payment_routes(router: &mut Router, service: PaymentService) {
    router
        .get("/payments", bind(service.clone(), list_payments))
        .get("/payments/:id", bind(service, get_payment));
}
