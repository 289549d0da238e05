use crate::entities::{brand_entity, category_entity, product_entity, product_update_history_entity};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::storage::{SharedStorage, key_from_url};
use chrono::Utc;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
    TransactionTrait,
};
use std::collections::{BTreeSet, HashMap};

#[derive(Clone)]
pub struct ProductService {
    pool: DatabaseConnection,
    storage: SharedStorage,
}

impl ProductService {
    pub fn new(pool: DatabaseConnection, storage: SharedStorage) -> Self {
        Self { pool, storage }
    }

    pub async fn list(&self) -> AppResult<Vec<ProductResponse>> {
        let products = product_entity::Entity::find()
            .order_by_asc(product_entity::Column::Id)
            .all(&self.pool)
            .await?;
        with_relations(&self.pool, products).await
    }

    /// Products matching every filter present in `query`.
    pub async fn filter(&self, query: &ProductFilterQuery) -> AppResult<Vec<ProductResponse>> {
        let mut select = product_entity::Entity::find();

        if let Some(term) = query.brand_term() {
            select = select
                .join(JoinType::InnerJoin, product_entity::Relation::Brand.def())
                .filter(
                    Expr::expr(Func::lower(Expr::col((
                        brand_entity::Entity,
                        brand_entity::Column::Name,
                    ))))
                    .like(contains_pattern(&term)),
                );
        }
        if let Some(term) = query.category_term() {
            select = select
                .join(JoinType::InnerJoin, product_entity::Relation::Category.def())
                .filter(
                    Expr::expr(Func::lower(Expr::col((
                        category_entity::Entity,
                        category_entity::Column::Name,
                    ))))
                    .like(contains_pattern(&term)),
                );
        }
        if let Some(min) = query.min_price_bound() {
            select = select.filter(product_entity::Column::Price.gte(min));
        }
        if let Some(max) = query.max_price_bound() {
            select = select.filter(product_entity::Column::Price.lte(max));
        }

        let products = select
            .order_by_asc(product_entity::Column::Id)
            .all(&self.pool)
            .await?;
        with_relations(&self.pool, products).await
    }

    /// Uploads the image, then inserts the product. The uploaded object is
    /// removed again if the insert fails.
    pub async fn create(&self, mut form: ProductForm) -> AppResult<ProductResponse> {
        let image = form
            .take_image()
            .ok_or_else(|| AppError::ValidationError("Product image is required".into()))?;
        self.ensure_references(&form).await?;

        let image_url = self
            .storage
            .put_object(image.bytes, &image.file_name)
            .await?;

        let now = Utc::now();
        let inserted = product_entity::ActiveModel {
            name: Set(form.name),
            price: Set(form.price),
            stock: Set(form.stock),
            brand_id: Set(form.brand_id),
            category_id: Set(form.category_id),
            image_url: Set(Some(image_url.clone())),
            update_by: Set(form.update_by),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
            ..Default::default()
        }
        .insert(&self.pool)
        .await;

        let product = match inserted {
            Ok(product) => product,
            Err(e) => {
                self.discard_image(&image_url).await;
                return Err(AppError::from_write(e, "Product"));
            }
        };

        log::info!("Created product {} ({})", product.id, product.name);
        self.one_with_relations(product).await
    }

    /// Applies the form and records a history row in the same transaction.
    /// A non-empty image replaces the stored one; the old object is deleted
    /// once the update is committed.
    pub async fn update(&self, id: i64, mut form: ProductForm) -> AppResult<ProductResponse> {
        let existing = self.find(id).await?;
        self.ensure_references(&form).await?;

        let image = form.take_image();
        let summary = summarize_changes(&existing, &form, image.is_some());
        let old_image = existing.image_url.clone();

        let new_image = match image {
            Some(img) => Some(self.storage.put_object(img.bytes, &img.file_name).await?),
            None => None,
        };

        let now = Utc::now();
        let result = async {
            let txn = self.pool.begin().await?;
            let mut active = existing.into_active_model();
            active.name = Set(form.name);
            active.price = Set(form.price);
            active.stock = Set(form.stock);
            active.brand_id = Set(form.brand_id);
            active.category_id = Set(form.category_id);
            active.update_by = Set(form.update_by.clone());
            active.updated_at = Set(Some(now));
            if let Some(url) = &new_image {
                active.image_url = Set(Some(url.clone()));
            }
            let product = active
                .update(&txn)
                .await
                .map_err(|e| AppError::from_write(e, "Product"))?;

            product_update_history_entity::ActiveModel {
                product_id: Set(product.id),
                admin_id: Set(form.update_by),
                summary: Set(summary),
                updated_at: Set(Some(now)),
                ..Default::default()
            }
            .insert(&txn)
            .await?;

            txn.commit().await?;
            Ok::<_, AppError>(product)
        }
        .await;

        let product = match result {
            Ok(product) => product,
            Err(e) => {
                if let Some(url) = &new_image {
                    self.discard_image(url).await;
                }
                return Err(e);
            }
        };

        if new_image.is_some()
            && let Some(old) = old_image
        {
            self.discard_image(&old).await;
        }

        log::info!("Updated product {}", product.id);
        self.one_with_relations(product).await
    }

    /// Deletes the stored image and the product row. The row delete is only
    /// committed once the image is gone.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let product = self.find(id).await?;

        let txn = self.pool.begin().await?;
        product_entity::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| AppError::from_write(e, "Product"))?;

        if let Some(key) = product.image_url.as_deref().and_then(key_from_url) {
            self.storage.delete_object(key).await?;
        }
        txn.commit().await?;

        log::info!("Deleted product {id}");
        Ok(())
    }

    /// Update history of a product, newest first.
    pub async fn history(&self, id: i64) -> AppResult<Vec<ProductHistoryResponse>> {
        self.find(id).await?;
        let rows = product_update_history_entity::Entity::find()
            .filter(product_update_history_entity::Column::ProductId.eq(id))
            .order_by_desc(product_update_history_entity::Column::UpdatedAt)
            .order_by_desc(product_update_history_entity::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(ProductHistoryResponse::from).collect())
    }

    async fn find(&self, id: i64) -> AppResult<product_entity::Model> {
        product_entity::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Product not found".into()))
    }

    async fn ensure_references(&self, form: &ProductForm) -> AppResult<()> {
        if brand_entity::Entity::find_by_id(form.brand_id)
            .one(&self.pool)
            .await?
            .is_none()
        {
            return Err(AppError::ValidationError("Invalid brand ID".into()));
        }
        if category_entity::Entity::find_by_id(form.category_id)
            .one(&self.pool)
            .await?
            .is_none()
        {
            return Err(AppError::ValidationError("Invalid category ID".into()));
        }
        Ok(())
    }

    async fn one_with_relations(&self, product: product_entity::Model) -> AppResult<ProductResponse> {
        with_relations(&self.pool, vec![product])
            .await?
            .pop()
            .ok_or_else(|| AppError::InternalError("product vanished while loading".into()))
    }

    // best effort; a leftover object is only logged
    async fn discard_image(&self, url: &str) {
        if let Some(key) = key_from_url(url)
            && let Err(e) = self.storage.delete_object(key).await
        {
            log::warn!("Failed to delete image {key}: {e}");
        }
    }
}

/// Loads brands and categories for `products` in two queries.
pub(crate) async fn with_relations<C: ConnectionTrait>(
    db: &C,
    products: Vec<product_entity::Model>,
) -> AppResult<Vec<ProductResponse>> {
    if products.is_empty() {
        return Ok(Vec::new());
    }
    let brand_ids: BTreeSet<i64> = products.iter().map(|p| p.brand_id).collect();
    let category_ids: BTreeSet<i64> = products.iter().map(|p| p.category_id).collect();

    let brands: HashMap<i64, brand_entity::Model> = brand_entity::Entity::find()
        .filter(brand_entity::Column::Id.is_in(brand_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|b| (b.id, b))
        .collect();
    let categories: HashMap<i64, category_entity::Model> = category_entity::Entity::find()
        .filter(category_entity::Column::Id.is_in(category_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();

    Ok(products
        .into_iter()
        .map(|p| ProductResponse::assemble(p, &brands, &categories))
        .collect())
}

/// `%term%` with LIKE metacharacters escaped.
fn contains_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// Human readable list of the fields `form` changes on `old`.
pub fn summarize_changes(
    old: &product_entity::Model,
    form: &ProductForm,
    image_replaced: bool,
) -> String {
    let mut changes = Vec::new();
    if old.name != form.name {
        changes.push(format!("name: '{}' -> '{}'", old.name, form.name));
    }
    if old.price != form.price {
        changes.push(format!("price: {} -> {}", old.price, form.price));
    }
    if old.stock != form.stock {
        changes.push(format!("stock: {} -> {}", old.stock, form.stock));
    }
    if old.brand_id != form.brand_id {
        changes.push(format!("brand_id: {} -> {}", old.brand_id, form.brand_id));
    }
    if old.category_id != form.category_id {
        changes.push(format!(
            "category_id: {} -> {}",
            old.category_id, form.category_id
        ));
    }
    if image_replaced {
        changes.push("image replaced".to_string());
    }

    if changes.is_empty() {
        "No field changes".to_string()
    } else {
        changes.join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::ObjectStorage;
    use futures_util::future::BoxFuture;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct StubStorage {
        fail_delete: bool,
        deleted: Mutex<Vec<String>>,
    }

    impl ObjectStorage for StubStorage {
        fn put_object(&self, _bytes: Vec<u8>, file_name: &str) -> BoxFuture<'_, AppResult<String>> {
            let url = format!("https://b.s3.r.amazonaws.com/{file_name}");
            Box::pin(async move { Ok(url) })
        }

        fn delete_object(&self, key: &str) -> BoxFuture<'_, AppResult<()>> {
            let key = key.to_string();
            Box::pin(async move {
                if self.fail_delete {
                    return Err(AppError::StorageError("Unable to delete image".into()));
                }
                self.deleted.lock().unwrap().push(key);
                Ok(())
            })
        }
    }

    fn brand() -> brand_entity::Model {
        brand_entity::Model {
            id: 1,
            name: "Google".into(),
            created_at: None,
            updated_at: None,
        }
    }

    fn category() -> category_entity::Model {
        category_entity::Model {
            id: 2,
            name: "Phones".into(),
            created_at: None,
        }
    }

    fn product() -> product_entity::Model {
        product_entity::Model {
            id: 1,
            name: "Pixel 9".into(),
            price: 79900,
            stock: 5,
            brand_id: 1,
            category_id: 2,
            image_url: Some("https://b.s3.r.amazonaws.com/pixel_1.png".into()),
            update_by: "admin".into(),
            created_at: None,
            updated_at: None,
        }
    }

    fn form_from(p: &product_entity::Model) -> ProductForm {
        ProductForm {
            brand_id: p.brand_id,
            category_id: p.category_id,
            name: p.name.clone(),
            price: p.price,
            stock: p.stock,
            update_by: "admin-2".into(),
            image: None,
        }
    }

    #[test]
    fn test_summary_without_changes() {
        let p = product();
        assert_eq!(summarize_changes(&p, &form_from(&p), false), "No field changes");
    }

    #[test]
    fn test_summary_lists_changed_fields() {
        let p = product();
        let mut form = form_from(&p);
        form.price = 69900;
        form.stock = 3;
        assert_eq!(
            summarize_changes(&p, &form, true),
            "price: 79900 -> 69900; stock: 5 -> 3; image replaced"
        );
    }

    #[test]
    fn test_summary_quotes_names() {
        let p = product();
        let mut form = form_from(&p);
        form.name = "Pixel 9 Pro".into();
        assert_eq!(
            summarize_changes(&p, &form, false),
            "name: 'Pixel 9' -> 'Pixel 9 Pro'"
        );
    }

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("apple"), "%apple%");
        assert_eq!(contains_pattern("50%_off"), "%50\\%\\_off%");
    }

    #[actix_web::test]
    async fn test_update_writes_history_row() {
        let mut updated = product();
        updated.price = 69900;
        let history = product_update_history_entity::Model {
            id: 1,
            product_id: 1,
            admin_id: "admin-2".into(),
            summary: "price: 79900 -> 69900".into(),
            updated_at: None,
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![product()]])
            .append_query_results([vec![brand()]])
            .append_query_results([vec![category()]])
            .append_query_results([vec![updated]])
            .append_query_results([vec![history]])
            .append_query_results([vec![brand()]])
            .append_query_results([vec![category()]])
            .into_connection();
        let storage = Arc::new(StubStorage::default());

        let mut form = form_from(&product());
        form.price = 69900;
        let response = ProductService::new(db.clone(), storage.clone())
            .update(1, form)
            .await
            .unwrap();
        assert_eq!(response.product.price, 69900);
        assert!(storage.deleted.lock().unwrap().is_empty());

        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains(r#"INSERT INTO \"product_update_histories\""#));
        assert!(log.contains("price: 79900 -> 69900"));
        assert!(log.contains("COMMIT"));
    }

    #[actix_web::test]
    async fn test_update_rejects_unknown_brand() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![product()]])
            .append_query_results([Vec::<brand_entity::Model>::new()])
            .into_connection();

        let err = ProductService::new(db, Arc::new(StubStorage::default()))
            .update(1, form_from(&product()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(msg) if msg == "Invalid brand ID"));
    }

    #[actix_web::test]
    async fn test_delete_keeps_row_when_image_delete_fails() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![product()]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();
        let storage = Arc::new(StubStorage {
            fail_delete: true,
            ..Default::default()
        });

        let err = ProductService::new(db.clone(), storage)
            .delete(1)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::StorageError(_)));

        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains(r#"DELETE FROM \"products\""#));
        assert!(log.contains("ROLLBACK"));
        assert!(!log.contains("COMMIT"));
    }

    #[actix_web::test]
    async fn test_delete_removes_image_then_commits() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![product()]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();
        let storage = Arc::new(StubStorage::default());

        ProductService::new(db.clone(), storage.clone())
            .delete(1)
            .await
            .unwrap();
        assert_eq!(*storage.deleted.lock().unwrap(), vec!["pixel_1.png".to_string()]);
        assert!(format!("{:?}", db.into_transaction_log()).contains("COMMIT"));
    }
}
