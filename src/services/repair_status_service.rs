use crate::entities::repair_status_entity;
use crate::error::{AppError, AppResult};
use crate::models::*;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryOrder, Set,
};

#[derive(Clone)]
pub struct RepairStatusService {
    pool: DatabaseConnection,
}

impl RepairStatusService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<RepairStatusResponse>> {
        let statuses = repair_status_entity::Entity::find()
            .order_by_asc(repair_status_entity::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(statuses.into_iter().map(RepairStatusResponse::from).collect())
    }

    pub async fn create(&self, request: RepairStatusRequest) -> AppResult<RepairStatusResponse> {
        request.validate()?;
        let status = repair_status_entity::ActiveModel {
            status: Set(request.status.trim().to_string()),
            updated_by: Set(request.updated_by),
            updated_at: Set(Some(Utc::now())),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;
        Ok(status.into())
    }

    pub async fn update(
        &self,
        id: i64,
        request: RepairStatusRequest,
    ) -> AppResult<RepairStatusResponse> {
        request.validate()?;
        let status = repair_status_entity::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Repair status not found".into()))?;

        let mut active = status.into_active_model();
        active.status = Set(request.status.trim().to_string());
        active.updated_by = Set(request.updated_by);
        active.updated_at = Set(Some(Utc::now()));
        Ok(active.update(&self.pool).await?.into())
    }

    /// Fails with a validation error while repairs still use the status.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = repair_status_entity::Entity::delete_by_id(id)
            .exec(&self.pool)
            .await
            .map_err(|e| AppError::from_write(e, "Repair status"))?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Repair status not found".into()));
        }
        Ok(())
    }
}
