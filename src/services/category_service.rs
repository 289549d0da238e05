use crate::entities::{category_entity, product_entity};
use crate::error::{AppError, AppResult};
use crate::models::*;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryOrder, Set,
};

#[derive(Clone)]
pub struct CategoryService {
    pool: DatabaseConnection,
}

impl CategoryService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// Every category together with its products.
    pub async fn list(&self) -> AppResult<Vec<CategoryResponse>> {
        let rows = category_entity::Entity::find()
            .order_by_asc(category_entity::Column::Id)
            .find_with_related(product_entity::Entity)
            .all(&self.pool)
            .await?;
        Ok(rows
            .into_iter()
            .map(|(category, products)| CategoryResponse::new(category, products))
            .collect())
    }

    pub async fn create(&self, request: NameRequest) -> AppResult<CategorySummary> {
        let name = request.validated("Category")?;
        let category = category_entity::ActiveModel {
            name: Set(name),
            created_at: Set(Some(Utc::now())),
            ..Default::default()
        }
        .insert(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, "Category"))?;

        log::info!("Created category {} ({})", category.id, category.name);
        Ok(category.into())
    }

    pub async fn update(&self, id: i64, request: NameRequest) -> AppResult<CategorySummary> {
        let name = request.validated("Category")?;
        let category = category_entity::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Category not found".into()))?;

        let mut active = category.into_active_model();
        active.name = Set(name);
        let category = active
            .update(&self.pool)
            .await
            .map_err(|e| AppError::from_write(e, "Category"))?;
        Ok(category.into())
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = category_entity::Entity::delete_by_id(id)
            .exec(&self.pool)
            .await
            .map_err(|e| AppError::from_write(e, "Category"))?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Category not found".into()));
        }
        log::info!("Deleted category {id}");
        Ok(())
    }
}
