use crate::entities::brand_entity;
use crate::error::{AppError, AppResult};
use crate::models::*;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryOrder, Set,
};

#[derive(Clone)]
pub struct BrandService {
    pool: DatabaseConnection,
}

impl BrandService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<BrandResponse>> {
        let brands = brand_entity::Entity::find()
            .order_by_asc(brand_entity::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(brands.into_iter().map(BrandResponse::from).collect())
    }

    pub async fn create(&self, request: NameRequest) -> AppResult<BrandResponse> {
        let name = request.validated("Brand")?;
        let now = Utc::now();
        let brand = brand_entity::ActiveModel {
            name: Set(name),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
            ..Default::default()
        }
        .insert(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, "Brand"))?;

        log::info!("Created brand {} ({})", brand.id, brand.name);
        Ok(brand.into())
    }

    pub async fn update(&self, id: i64, request: NameRequest) -> AppResult<BrandResponse> {
        let name = request.validated("Brand")?;
        let brand = brand_entity::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Brand not found".into()))?;

        let mut active = brand.into_active_model();
        active.name = Set(name);
        active.updated_at = Set(Some(Utc::now()));
        let brand = active
            .update(&self.pool)
            .await
            .map_err(|e| AppError::from_write(e, "Brand"))?;
        Ok(brand.into())
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = brand_entity::Entity::delete_by_id(id)
            .exec(&self.pool)
            .await
            .map_err(|e| AppError::from_write(e, "Brand"))?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Brand not found".into()));
        }
        log::info!("Deleted brand {id}");
        Ok(())
    }
}
