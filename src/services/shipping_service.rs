use super::order_service::{apply_shipping, insert_shipping};
use crate::entities::{order_entity, shipping_entity};
use crate::error::{AppError, AppResult};
use crate::models::*;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryOrder};

#[derive(Clone)]
pub struct ShippingService {
    pool: DatabaseConnection,
}

impl ShippingService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<ShippingResponse>> {
        let rows = shipping_entity::Entity::find()
            .order_by_asc(shipping_entity::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(ShippingResponse::from).collect())
    }

    pub async fn get(&self, id: i64) -> AppResult<ShippingResponse> {
        Ok(self.find(id).await?.into())
    }

    pub async fn create(&self, request: ShippingRequest) -> AppResult<ShippingResponse> {
        request.details.validate()?;
        if order_entity::Entity::find_by_id(request.order_id)
            .one(&self.pool)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound("Order not found".into()));
        }
        let shipping =
            insert_shipping(&self.pool, request.order_id, &request.details, Utc::now()).await?;
        log::info!("Created shipping {} for order {}", shipping.id, shipping.order_id);
        Ok(shipping.into())
    }

    /// Replaces the address fields; the owning order never changes.
    pub async fn update(&self, id: i64, request: ShippingInput) -> AppResult<ShippingResponse> {
        request.validate()?;
        let existing = self.find(id).await?;
        let shipping = apply_shipping(existing.into_active_model(), &request)
            .update(&self.pool)
            .await?;
        Ok(shipping.into())
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = shipping_entity::Entity::delete_by_id(id)
            .exec(&self.pool)
            .await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Shipping not found".into()));
        }
        Ok(())
    }

    async fn find(&self, id: i64) -> AppResult<shipping_entity::Model> {
        shipping_entity::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Shipping not found".into()))
    }
}
