use crate::entities::{repair_entity, repair_status_entity};
use crate::error::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RepairRequest {
    pub user_id: String,
    pub repair_status_id: i64,
    pub product: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub status: String,
}

impl RepairRequest {
    pub fn validate(&self) -> AppResult<()> {
        if self.user_id.trim().is_empty() {
            return Err(AppError::ValidationError("User ID is required".into()));
        }
        if self.product.trim().is_empty() {
            return Err(AppError::ValidationError("Product is required".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RepairResponse {
    pub id: i64,
    pub user_id: String,
    pub repair_status_id: i64,
    pub product: String,
    pub category: String,
    pub description: String,
    pub status: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<repair_entity::Model> for RepairResponse {
    fn from(m: repair_entity::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            repair_status_id: m.repair_status_id,
            product: m.product,
            category: m.category,
            description: m.description,
            status: m.status,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RepairStatusRequest {
    pub status: String,
    pub updated_by: String,
}

impl RepairStatusRequest {
    pub fn validate(&self) -> AppResult<()> {
        if self.status.trim().is_empty() {
            return Err(AppError::ValidationError("Status is required".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RepairStatusResponse {
    pub id: i64,
    pub status: String,
    pub updated_by: String,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<repair_status_entity::Model> for RepairStatusResponse {
    fn from(m: repair_status_entity::Model) -> Self {
        Self {
            id: m.id,
            status: m.status,
            updated_by: m.updated_by,
            updated_at: m.updated_at,
        }
    }
}
