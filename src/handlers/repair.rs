use super::body::read_json;
use crate::error::AppResult;
use crate::models::*;
use crate::routing::{Router, bind, path_id};
use crate::services::{RepairService, RepairStatusService};
use actix_web::{HttpRequest, HttpResponse, web};

#[utoipa::path(
    get,
    path = "/repairs",
    tag = "repair",
    responses((status = 200, description = "Repair tickets, newest first", body = [RepairResponse]))
)]
pub async fn list_repairs(
    service: RepairService,
    _req: HttpRequest,
    _payload: web::Payload,
) -> AppResult<HttpResponse> {
    let repairs = service.list().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::list(repairs)))
}

#[utoipa::path(
    post,
    path = "/repairs",
    tag = "repair",
    request_body = RepairRequest,
    responses(
        (status = 200, description = "Repair created", body = RepairResponse),
        (status = 400, description = "Invalid payload or unknown status")
    )
)]
pub async fn create_repair(
    service: RepairService,
    _req: HttpRequest,
    payload: web::Payload,
) -> AppResult<HttpResponse> {
    let request: RepairRequest = read_json(payload).await?;
    let repair = service.create(request).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        repair,
        "Repair created successfully",
    )))
}

#[utoipa::path(
    put,
    path = "/repairs/{id}",
    tag = "repair",
    params(("id" = i64, Path, description = "Repair id")),
    request_body = RepairRequest,
    responses(
        (status = 200, description = "Repair updated", body = RepairResponse),
        (status = 404, description = "Repair not found")
    )
)]
pub async fn update_repair(
    service: RepairService,
    req: HttpRequest,
    payload: web::Payload,
) -> AppResult<HttpResponse> {
    let id = path_id(&req)?;
    let request: RepairRequest = read_json(payload).await?;
    let repair = service.update(id, request).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        repair,
        "Repair updated successfully",
    )))
}

#[utoipa::path(
    delete,
    path = "/repairs/{id}",
    tag = "repair",
    params(("id" = i64, Path, description = "Repair id")),
    responses(
        (status = 200, description = "Repair deleted"),
        (status = 404, description = "Repair not found")
    )
)]
pub async fn delete_repair(
    service: RepairService,
    req: HttpRequest,
    _payload: web::Payload,
) -> AppResult<HttpResponse> {
    service.delete(path_id(&req)?).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::message("Repair deleted successfully")))
}

#[utoipa::path(
    get,
    path = "/repair-statuses",
    tag = "repair",
    responses((status = 200, description = "All repair statuses", body = [RepairStatusResponse]))
)]
pub async fn list_repair_statuses(
    service: RepairStatusService,
    _req: HttpRequest,
    _payload: web::Payload,
) -> AppResult<HttpResponse> {
    let statuses = service.list().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::list(statuses)))
}

#[utoipa::path(
    post,
    path = "/repair-statuses",
    tag = "repair",
    request_body = RepairStatusRequest,
    responses((status = 200, description = "Status created", body = RepairStatusResponse))
)]
pub async fn create_repair_status(
    service: RepairStatusService,
    _req: HttpRequest,
    payload: web::Payload,
) -> AppResult<HttpResponse> {
    let request: RepairStatusRequest = read_json(payload).await?;
    let status = service.create(request).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        status,
        "Repair status created successfully",
    )))
}

#[utoipa::path(
    put,
    path = "/repair-statuses/{id}",
    tag = "repair",
    params(("id" = i64, Path, description = "Repair status id")),
    request_body = RepairStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = RepairStatusResponse),
        (status = 404, description = "Repair status not found")
    )
)]
pub async fn update_repair_status(
    service: RepairStatusService,
    req: HttpRequest,
    payload: web::Payload,
) -> AppResult<HttpResponse> {
    let id = path_id(&req)?;
    let request: RepairStatusRequest = read_json(payload).await?;
    let status = service.update(id, request).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        status,
        "Repair status updated successfully",
    )))
}

#[utoipa::path(
    delete,
    path = "/repair-statuses/{id}",
    tag = "repair",
    params(("id" = i64, Path, description = "Repair status id")),
    responses(
        (status = 200, description = "Status deleted"),
        (status = 400, description = "Status still in use"),
        (status = 404, description = "Repair status not found")
    )
)]
pub async fn delete_repair_status(
    service: RepairStatusService,
    req: HttpRequest,
    _payload: web::Payload,
) -> AppResult<HttpResponse> {
    service.delete(path_id(&req)?).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::message("Repair status deleted successfully")))
}

pub fn repair_routes(router: &mut Router, service: RepairService) {
    router
        .get("/repairs", bind(service.clone(), list_repairs))
        .post("/repairs", bind(service.clone(), create_repair))
        .put("/repairs/:id", bind(service.clone(), update_repair))
        .delete("/repairs/:id", bind(service, delete_repair));
}

pub fn repair_status_routes(router: &mut Router, service: RepairStatusService) {
    router
        .get("/repair-statuses", bind(service.clone(), list_repair_statuses))
        .post("/repair-statuses", bind(service.clone(), create_repair_status))
        .put("/repair-statuses/:id", bind(service.clone(), update_repair_status))
        .delete("/repair-statuses/:id", bind(service, delete_repair_status));
}
