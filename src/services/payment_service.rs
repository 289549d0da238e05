use crate::entities::payment_entity;
use crate::error::{AppError, AppResult};
use crate::models::*;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

/// Read-only access; payments are written through orders and checkout.
#[derive(Clone)]
pub struct PaymentService {
    pool: DatabaseConnection,
}

impl PaymentService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<PaymentResponse>> {
        let payments = payment_entity::Entity::find()
            .order_by_asc(payment_entity::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(payments.into_iter().map(PaymentResponse::from).collect())
    }

    pub async fn get(&self, id: i64) -> AppResult<PaymentResponse> {
        payment_entity::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .map(PaymentResponse::from)
            .ok_or_else(|| AppError::NotFound("Payment not found".into()))
    }
}
