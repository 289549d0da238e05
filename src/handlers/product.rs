use super::body::{read_multipart, read_query};
use crate::error::AppResult;
use crate::models::*;
use crate::routing::{Router, bind, path_id, path_segment_id};
use crate::services::ProductService;
use actix_web::{HttpRequest, HttpResponse, web};
use serde_json::json;

/// Product endpoints need the upload limit next to the service.
#[derive(Clone)]
pub struct ProductEndpoints {
    pub service: ProductService,
    pub upload_limit: usize,
}

async fn read_form(
    ep: &ProductEndpoints,
    req: &HttpRequest,
    payload: web::Payload,
) -> AppResult<ProductForm> {
    let form = read_multipart(req, payload, ep.upload_limit).await?;
    ProductForm::from_fields(&form.fields, form.image)
}

#[utoipa::path(
    get,
    path = "/products",
    tag = "catalog",
    responses(
        (status = 200, description = "Products with brand and category", body = [ProductResponse])
    )
)]
pub async fn list_products(
    ep: ProductEndpoints,
    _req: HttpRequest,
    _payload: web::Payload,
) -> AppResult<HttpResponse> {
    let products = ep.service.list().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::list(products)))
}

#[utoipa::path(
    get,
    path = "/products/filter",
    tag = "catalog",
    params(ProductFilterQuery),
    responses(
        (status = 200, description = "Matching products; the applied filters are echoed under `filters`", body = [ProductResponse])
    )
)]
pub async fn filter_products(
    ep: ProductEndpoints,
    req: HttpRequest,
    _payload: web::Payload,
) -> AppResult<HttpResponse> {
    let query: ProductFilterQuery = read_query(&req)?;
    let products = ep.service.filter(&query).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "count": products.len(),
        "data": products,
        "filters": query.echo(),
    })))
}

#[utoipa::path(
    post,
    path = "/products",
    tag = "catalog",
    request_body(content = String, content_type = "multipart/form-data",
        description = "Fields: image (file), brandId, categoryId, name, price, stock, updateBy"),
    responses(
        (status = 200, description = "Product created", body = ProductResponse),
        (status = 400, description = "Missing image, unknown brand or invalid field"),
        (status = 502, description = "Image upload failed")
    )
)]
pub async fn create_product(
    ep: ProductEndpoints,
    req: HttpRequest,
    payload: web::Payload,
) -> AppResult<HttpResponse> {
    let form = read_form(&ep, &req, payload).await?;
    let product = ep.service.create(form).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        product,
        "Product created successfully",
    )))
}

#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = "catalog",
    params(("id" = i64, Path, description = "Product id")),
    request_body(content = String, content_type = "multipart/form-data",
        description = "Same fields as create; an empty image keeps the current one"),
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 404, description = "Product not found")
    )
)]
pub async fn update_product(
    ep: ProductEndpoints,
    req: HttpRequest,
    payload: web::Payload,
) -> AppResult<HttpResponse> {
    let id = path_id(&req)?;
    let form = read_form(&ep, &req, payload).await?;
    let product = ep.service.update(id, form).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        product,
        "Product updated successfully",
    )))
}

#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "catalog",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product and image deleted"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn delete_product(
    ep: ProductEndpoints,
    req: HttpRequest,
    _payload: web::Payload,
) -> AppResult<HttpResponse> {
    ep.service.delete(path_id(&req)?).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::message("Product deleted successfully")))
}

#[utoipa::path(
    get,
    path = "/products/{id}/history",
    tag = "catalog",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Update history, newest first", body = [ProductHistoryResponse]),
        (status = 404, description = "Product not found")
    )
)]
pub async fn product_history(
    ep: ProductEndpoints,
    req: HttpRequest,
    _payload: web::Payload,
) -> AppResult<HttpResponse> {
    let id = path_segment_id(&req, 1)?;
    let history = ep.service.history(id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::list(history)))
}

pub fn product_routes(router: &mut Router, ep: ProductEndpoints) {
    router
        .get("/products", bind(ep.clone(), list_products))
        .get("/products/filter", bind(ep.clone(), filter_products))
        .post("/products", bind(ep.clone(), create_product))
        .put("/products/:id", bind(ep.clone(), update_product))
        .delete("/products/:id", bind(ep.clone(), delete_product))
        .get("/products/:id/history", bind(ep, product_history));
}
