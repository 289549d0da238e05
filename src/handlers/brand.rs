use super::body::read_json;
use crate::error::AppResult;
use crate::models::*;
use crate::routing::{Router, bind, path_id};
use crate::services::BrandService;
use actix_web::{HttpRequest, HttpResponse, web};

#[utoipa::path(
    get,
    path = "/brands",
    tag = "catalog",
    responses(
        (status = 200, description = "All brands", body = [BrandResponse])
    )
)]
pub async fn list_brands(
    service: BrandService,
    _req: HttpRequest,
    _payload: web::Payload,
) -> AppResult<HttpResponse> {
    let brands = service.list().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::list(brands)))
}

#[utoipa::path(
    post,
    path = "/brands",
    tag = "catalog",
    request_body = NameRequest,
    responses(
        (status = 200, description = "Brand created", body = BrandResponse),
        (status = 400, description = "Missing name"),
        (status = 409, description = "Name already taken")
    )
)]
pub async fn create_brand(
    service: BrandService,
    _req: HttpRequest,
    payload: web::Payload,
) -> AppResult<HttpResponse> {
    let request: NameRequest = read_json(payload).await?;
    let brand = service.create(request).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        brand,
        "Brand created successfully",
    )))
}

#[utoipa::path(
    put,
    path = "/brands/{id}",
    tag = "catalog",
    params(("id" = i64, Path, description = "Brand id")),
    request_body = NameRequest,
    responses(
        (status = 200, description = "Brand renamed", body = BrandResponse),
        (status = 404, description = "Brand not found")
    )
)]
pub async fn update_brand(
    service: BrandService,
    req: HttpRequest,
    payload: web::Payload,
) -> AppResult<HttpResponse> {
    let id = path_id(&req)?;
    let request: NameRequest = read_json(payload).await?;
    let brand = service.update(id, request).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        brand,
        "Brand updated successfully",
    )))
}

#[utoipa::path(
    delete,
    path = "/brands/{id}",
    tag = "catalog",
    params(("id" = i64, Path, description = "Brand id")),
    responses(
        (status = 200, description = "Brand deleted"),
        (status = 404, description = "Brand not found")
    )
)]
pub async fn delete_brand(
    service: BrandService,
    req: HttpRequest,
    _payload: web::Payload,
) -> AppResult<HttpResponse> {
    service.delete(path_id(&req)?).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::message("Brand deleted successfully")))
}

pub fn brand_routes(router: &mut Router, service: BrandService) {
    router
        .get("/brands", bind(service.clone(), list_brands))
        .post("/brands", bind(service.clone(), create_brand))
        .put("/brands/:id", bind(service.clone(), update_brand))
        .delete("/brands/:id", bind(service, delete_brand));
}
