use crate::entities::{brand_entity, category_entity, product_entity, product_update_history_entity};
use crate::error::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::{IntoParams, ToSchema};

/// Body for creating or renaming a brand or category.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NameRequest {
    pub name: String,
}

impl NameRequest {
    /// Trimmed, non-empty name.
    pub fn validated(&self, what: &str) -> AppResult<String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(AppError::ValidationError(format!("{what} name is required")));
        }
        Ok(name.to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BrandResponse {
    pub id: i64,
    pub name: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<brand_entity::Model> for BrandResponse {
    fn from(m: brand_entity::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategorySummary {
    pub id: i64,
    pub name: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<category_entity::Model> for CategorySummary {
    fn from(m: category_entity::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            created_at: m.created_at,
        }
    }
}

/// Category with the products filed under it.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    pub id: i64,
    pub name: String,
    pub created_at: Option<DateTime<Utc>>,
    pub products: Vec<ProductSummary>,
}

impl CategoryResponse {
    pub fn new(category: category_entity::Model, products: Vec<product_entity::Model>) -> Self {
        Self {
            id: category.id,
            name: category.name,
            created_at: category.created_at,
            products: products.into_iter().map(ProductSummary::from).collect(),
        }
    }
}

/// Product row without its relations.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductSummary {
    pub id: i64,
    pub name: String,
    /// Price in cents
    pub price: i64,
    pub stock: i32,
    pub brand_id: i64,
    pub category_id: i64,
    pub image_url: Option<String>,
    pub update_by: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<product_entity::Model> for ProductSummary {
    fn from(m: product_entity::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            price: m.price,
            stock: m.stock,
            brand_id: m.brand_id,
            category_id: m.category_id,
            image_url: m.image_url,
            update_by: m.update_by,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    #[serde(flatten)]
    pub product: ProductSummary,
    pub brand: Option<BrandResponse>,
    pub category: Option<CategorySummary>,
}

impl ProductResponse {
    /// Attaches brand and category from lookup maps keyed by id.
    pub fn assemble(
        product: product_entity::Model,
        brands: &HashMap<i64, brand_entity::Model>,
        categories: &HashMap<i64, category_entity::Model>,
    ) -> Self {
        let brand = brands.get(&product.brand_id).cloned().map(BrandResponse::from);
        let category = categories
            .get(&product.category_id)
            .cloned()
            .map(CategorySummary::from);
        Self {
            product: product.into(),
            brand,
            category,
        }
    }
}

/// Query string of `GET /products/filter`. Values are kept raw so they can
/// be echoed back; unparseable price bounds are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductFilterQuery {
    /// Brand name substring, case-insensitive
    #[serde(default)]
    pub brand: Option<String>,
    /// Category name substring, case-insensitive
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub min_price: Option<String>,
    #[serde(default)]
    pub max_price: Option<String>,
}

impl ProductFilterQuery {
    pub fn brand_term(&self) -> Option<String> {
        search_term(self.brand.as_deref())
    }

    pub fn category_term(&self) -> Option<String> {
        search_term(self.category.as_deref())
    }

    pub fn min_price_bound(&self) -> Option<i64> {
        price_bound(self.min_price.as_deref())
    }

    pub fn max_price_bound(&self) -> Option<i64> {
        price_bound(self.max_price.as_deref())
    }

    /// Filters as echoed in the response; absent values become "".
    pub fn echo(&self) -> serde_json::Value {
        serde_json::json!({
            "brand": self.brand.clone().unwrap_or_default(),
            "category": self.category.clone().unwrap_or_default(),
            "min_price": self.min_price.clone().unwrap_or_default(),
            "max_price": self.max_price.clone().unwrap_or_default(),
        })
    }
}

fn search_term(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_lowercase())
}

fn price_bound(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
}

/// Image part of a product form.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Parsed multipart body of `POST /products` and `PUT /products/:id`.
#[derive(Debug, Clone)]
pub struct ProductForm {
    pub brand_id: i64,
    pub category_id: i64,
    pub name: String,
    pub price: i64,
    pub stock: i32,
    pub update_by: String,
    pub image: Option<ImageUpload>,
}

impl ProductForm {
    /// Builds the form from its text fields (`brandId`, `categoryId`, `name`,
    /// `price`, `stock`, `updateBy`).
    pub fn from_fields(fields: &HashMap<String, String>, image: Option<ImageUpload>) -> AppResult<Self> {
        let text = |key: &str| fields.get(key).map(|v| v.trim()).unwrap_or("");

        let brand_id = required_id(text("brandId"), "Brand ID")?;
        let category_id = required_id(text("categoryId"), "Category ID")?;

        let name = text("name");
        if name.is_empty() {
            return Err(AppError::ValidationError("Product name is required".into()));
        }

        let price: i64 = text("price")
            .parse()
            .map_err(|_| AppError::ValidationError(format!("Invalid price: {}", text("price"))))?;
        if price < 0 {
            return Err(AppError::ValidationError("Price must not be negative".into()));
        }

        let stock: i32 = text("stock")
            .parse()
            .map_err(|_| AppError::ValidationError(format!("Invalid stock: {}", text("stock"))))?;
        if stock < 0 {
            return Err(AppError::ValidationError("Stock must not be negative".into()));
        }

        Ok(Self {
            brand_id,
            category_id,
            name: name.to_string(),
            price,
            stock,
            update_by: text("updateBy").to_string(),
            image,
        })
    }

    /// Moves the uploaded image out of the form. An empty file counts as no image.
    pub fn take_image(&mut self) -> Option<ImageUpload> {
        self.image.take().filter(|img| !img.bytes.is_empty())
    }
}

fn required_id(raw: &str, what: &str) -> AppResult<i64> {
    if raw.is_empty() {
        return Err(AppError::ValidationError(format!("{what} is required")));
    }
    raw.parse()
        .map_err(|_| AppError::ValidationError(format!("Invalid {what}: {raw}")))
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductHistoryResponse {
    pub id: i64,
    pub product_id: i64,
    pub admin_id: String,
    pub summary: String,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<product_update_history_entity::Model> for ProductHistoryResponse {
    fn from(m: product_update_history_entity::Model) -> Self {
        Self {
            id: m.id,
            product_id: m.product_id,
            admin_id: m.admin_id,
            summary: m.summary,
            updated_at: m.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn full_form() -> HashMap<String, String> {
        fields(&[
            ("brandId", "1"),
            ("categoryId", "2"),
            ("name", " Pixel 9 "),
            ("price", "79900"),
            ("stock", "5"),
            ("updateBy", "admin-7"),
        ])
    }

    #[test]
    fn test_product_form_parses_fields() {
        let mut form = ProductForm::from_fields(&full_form(), None).unwrap();
        assert_eq!(form.brand_id, 1);
        assert_eq!(form.category_id, 2);
        assert_eq!(form.name, "Pixel 9");
        assert_eq!(form.price, 79900);
        assert_eq!(form.stock, 5);
        assert_eq!(form.update_by, "admin-7");
        assert!(form.take_image().is_none());
    }

    #[test]
    fn test_product_form_requires_brand() {
        let mut f = full_form();
        f.remove("brandId");
        let err = ProductForm::from_fields(&f, None).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(msg) if msg == "Brand ID is required"));
    }

    #[test]
    fn test_product_form_rejects_bad_numbers() {
        let mut f = full_form();
        f.insert("price".into(), "abc".into());
        assert!(ProductForm::from_fields(&f, None).is_err());

        let mut f = full_form();
        f.insert("stock".into(), "-1".into());
        assert!(ProductForm::from_fields(&f, None).is_err());
    }

    #[test]
    fn test_empty_image_is_ignored() {
        let image = ImageUpload {
            file_name: "a.png".into(),
            bytes: Vec::new(),
        };
        let mut form = ProductForm::from_fields(&full_form(), Some(image)).unwrap();
        assert!(form.take_image().is_none());
    }

    #[test]
    fn test_take_image_moves_file_out() {
        let image = ImageUpload {
            file_name: "a.png".into(),
            bytes: vec![1, 2, 3],
        };
        let mut form = ProductForm::from_fields(&full_form(), Some(image)).unwrap();
        assert_eq!(form.take_image().map(|img| img.file_name).as_deref(), Some("a.png"));
        assert!(form.image.is_none());
    }

    #[test]
    fn test_filter_bounds_ignore_garbage() {
        let q = ProductFilterQuery {
            brand: Some("  ".into()),
            category: Some("Phones".into()),
            min_price: Some("100".into()),
            max_price: Some("cheap".into()),
        };
        assert_eq!(q.brand_term(), None);
        assert_eq!(q.category_term().as_deref(), Some("phones"));
        assert_eq!(q.min_price_bound(), Some(100));
        assert_eq!(q.max_price_bound(), None);
        assert_eq!(q.echo()["max_price"], "cheap");
    }

    #[test]
    fn test_filter_echo_defaults_to_empty() {
        let echo = ProductFilterQuery::default().echo();
        assert_eq!(echo["brand"], "");
        assert_eq!(echo["min_price"], "");
    }

    #[test]
    fn test_name_request_trims() {
        let req = NameRequest { name: "  Apple ".into() };
        assert_eq!(req.validated("Brand").unwrap(), "Apple");
        let blank = NameRequest { name: " ".into() };
        assert!(blank.validated("Brand").is_err());
    }
}
