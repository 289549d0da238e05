use crate::entities::{repair_entity, repair_status_entity};
use crate::error::{AppError, AppResult};
use crate::models::*;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryOrder, Set,
};

#[derive(Clone)]
pub struct RepairService {
    pool: DatabaseConnection,
}

impl RepairService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<RepairResponse>> {
        let repairs = repair_entity::Entity::find()
            .order_by_desc(repair_entity::Column::CreatedAt)
            .order_by_desc(repair_entity::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(repairs.into_iter().map(RepairResponse::from).collect())
    }

    pub async fn create(&self, request: RepairRequest) -> AppResult<RepairResponse> {
        request.validate()?;
        self.ensure_status(request.repair_status_id).await?;

        let now = Utc::now();
        let repair = repair_entity::ActiveModel {
            user_id: Set(request.user_id),
            repair_status_id: Set(request.repair_status_id),
            product: Set(request.product),
            category: Set(request.category),
            description: Set(request.description),
            status: Set(request.status),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
            ..Default::default()
        }
        .insert(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, "Repair"))?;

        log::info!("Created repair {} for user {}", repair.id, repair.user_id);
        Ok(repair.into())
    }

    pub async fn update(&self, id: i64, request: RepairRequest) -> AppResult<RepairResponse> {
        request.validate()?;
        let repair = repair_entity::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Repair not found".into()))?;
        self.ensure_status(request.repair_status_id).await?;

        let mut active = repair.into_active_model();
        active.user_id = Set(request.user_id);
        active.repair_status_id = Set(request.repair_status_id);
        active.product = Set(request.product);
        active.category = Set(request.category);
        active.description = Set(request.description);
        active.status = Set(request.status);
        active.updated_at = Set(Some(Utc::now()));
        let repair = active
            .update(&self.pool)
            .await
            .map_err(|e| AppError::from_write(e, "Repair"))?;
        Ok(repair.into())
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = repair_entity::Entity::delete_by_id(id)
            .exec(&self.pool)
            .await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Repair not found".into()));
        }
        log::info!("Deleted repair {id}");
        Ok(())
    }

    async fn ensure_status(&self, status_id: i64) -> AppResult<()> {
        repair_status_entity::Entity::find_by_id(status_id)
            .one(&self.pool)
            .await?
            .map(|_| ())
            .ok_or_else(|| AppError::ValidationError("Invalid repair status ID".into()))
    }
}
