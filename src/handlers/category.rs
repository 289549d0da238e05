use super::body::read_json;
use crate::error::AppResult;
use crate::models::*;
use crate::routing::{Router, bind, path_id};
use crate::services::CategoryService;
use actix_web::{HttpRequest, HttpResponse, web};

#[utoipa::path(
    get,
    path = "/categories",
    tag = "catalog",
    responses(
        (status = 200, description = "Categories with their products", body = [CategoryResponse])
    )
)]
pub async fn list_categories(
    service: CategoryService,
    _req: HttpRequest,
    _payload: web::Payload,
) -> AppResult<HttpResponse> {
    let categories = service.list().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::list(categories)))
}

#[utoipa::path(
    post,
    path = "/categories",
    tag = "catalog",
    request_body = NameRequest,
    responses(
        (status = 200, description = "Category created", body = CategorySummary),
        (status = 409, description = "Name already taken")
    )
)]
pub async fn create_category(
    service: CategoryService,
    _req: HttpRequest,
    payload: web::Payload,
) -> AppResult<HttpResponse> {
    let request: NameRequest = read_json(payload).await?;
    let category = service.create(request).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        category,
        "Category created successfully",
    )))
}

#[utoipa::path(
    put,
    path = "/categories/{id}",
    tag = "catalog",
    params(("id" = i64, Path, description = "Category id")),
    request_body = NameRequest,
    responses(
        (status = 200, description = "Category renamed", body = CategorySummary),
        (status = 404, description = "Category not found")
    )
)]
pub async fn update_category(
    service: CategoryService,
    req: HttpRequest,
    payload: web::Payload,
) -> AppResult<HttpResponse> {
    let id = path_id(&req)?;
    let request: NameRequest = read_json(payload).await?;
    let category = service.update(id, request).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        category,
        "Category updated successfully",
    )))
}

#[utoipa::path(
    delete,
    path = "/categories/{id}",
    tag = "catalog",
    params(("id" = i64, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category deleted"),
        (status = 404, description = "Category not found")
    )
)]
pub async fn delete_category(
    service: CategoryService,
    req: HttpRequest,
    _payload: web::Payload,
) -> AppResult<HttpResponse> {
    service.delete(path_id(&req)?).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::message("Category deleted successfully")))
}

pub fn category_routes(router: &mut Router, service: CategoryService) {
    router
        .get("/categories", bind(service.clone(), list_categories))
        .post("/categories", bind(service.clone(), create_category))
        .put("/categories/:id", bind(service.clone(), update_category))
        .delete("/categories/:id", bind(service, delete_category));
}
