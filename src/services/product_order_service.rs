use crate::entities::{order_entity, product_entity, product_per_order_entity};
use crate::error::{AppError, AppResult};
use crate::models::*;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

/// Order lines managed on their own, outside of checkout.
#[derive(Clone)]
pub struct ProductOrderService {
    pool: DatabaseConnection,
}

impl ProductOrderService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<ProductOrderResponse>> {
        let rows = product_per_order_entity::Entity::find()
            .order_by_asc(product_per_order_entity::Column::Id)
            .find_also_related(product_entity::Entity)
            .all(&self.pool)
            .await?;
        Ok(rows
            .into_iter()
            .map(|(line, product)| {
                let mut item = ProductOrderResponse::from(line);
                item.product = product.map(ProductSummary::from);
                item
            })
            .collect())
    }

    pub async fn create(&self, request: ProductOrderRequest) -> AppResult<ProductOrderResponse> {
        request.validate()?;
        if order_entity::Entity::find_by_id(request.order_id)
            .one(&self.pool)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound("Order not found".into()));
        }
        let product = product_entity::Entity::find_by_id(request.product_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Product not found".into()))?;

        let line = product_per_order_entity::ActiveModel {
            order_id: Set(request.order_id),
            product_id: Set(request.product_id),
            quantity: Set(request.quantity),
            created_at: Set(Some(Utc::now())),
            ..Default::default()
        }
        .insert(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, "Product order"))?;

        let mut item = ProductOrderResponse::from(line);
        item.product = Some(product.into());
        Ok(item)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = product_per_order_entity::Entity::delete_by_id(id)
            .exec(&self.pool)
            .await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Product order not found".into()));
        }
        Ok(())
    }
}
