use crate::error::{AppError, AppResult};
use crate::models::ImageUpload;
use actix_multipart::Multipart;
use actix_web::{HttpRequest, web};
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// Largest JSON body accepted by the API.
pub const JSON_LIMIT: usize = 256 * 1024;

/// Buffers the request body and decodes it as JSON.
pub async fn read_json<T: DeserializeOwned>(mut payload: web::Payload) -> AppResult<T> {
    let mut body = web::BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk?;
        if body.len() + chunk.len() > JSON_LIMIT {
            return Err(AppError::ValidationError("Request body too large".into()));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(serde_json::from_slice(&body)?)
}

/// Decodes the query string into `T`.
pub fn read_query<T: DeserializeOwned>(req: &HttpRequest) -> AppResult<T> {
    web::Query::<T>::from_query(req.query_string())
        .map(web::Query::into_inner)
        .map_err(|e| AppError::ValidationError(format!("Invalid query string: {e}")))
}

/// Multipart body split into text fields and the optional `image` file part.
pub struct MultipartForm {
    pub fields: HashMap<String, String>,
    pub image: Option<ImageUpload>,
}

/// Reads a `multipart/form-data` body. All parts together may hold at most
/// `max_bytes`. The part named `image` is the file, the rest are UTF-8 text.
pub async fn read_multipart(
    req: &HttpRequest,
    payload: web::Payload,
    max_bytes: usize,
) -> AppResult<MultipartForm> {
    let mut multipart = Multipart::new(req.headers(), payload);
    let mut fields = HashMap::new();
    let mut image = None;
    let mut total = 0usize;

    while let Some(field) = multipart.next().await {
        let mut field = field?;
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_owned);

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk?;
            total += chunk.len();
            if total > max_bytes {
                return Err(AppError::ValidationError(format!(
                    "Form data exceeds the {max_bytes} byte upload limit"
                )));
            }
            data.extend_from_slice(&chunk);
        }

        if name == "image" {
            image = Some(ImageUpload {
                file_name: file_name.unwrap_or_else(|| "upload".to_string()),
                bytes: data,
            });
        } else {
            let value = String::from_utf8(data)
                .map_err(|_| AppError::ValidationError(format!("Field '{name}' is not UTF-8")))?;
            fields.insert(name, value);
        }
    }

    Ok(MultipartForm { fields, image })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProductFilterQuery;
    use actix_web::test::TestRequest;

    #[test]
    fn test_read_query_keeps_raw_values() {
        let req = TestRequest::get()
            .uri("/products/filter?brand=App&min_price=abc")
            .to_http_request();
        let q: ProductFilterQuery = read_query(&req).unwrap();
        assert_eq!(q.brand.as_deref(), Some("App"));
        assert_eq!(q.min_price.as_deref(), Some("abc"));
        assert!(q.category.is_none());
    }
}
