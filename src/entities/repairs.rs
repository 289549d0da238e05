use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Repair ticket. `product` and `category` are free text from the intake form,
/// not references to the catalog.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "repairs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: String,
    pub repair_status_id: i64,
    pub product: String,
    pub category: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub status: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::repair_statuses::Entity",
        from = "Column::RepairStatusId",
        to = "super::repair_statuses::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    RepairStatus,
}

impl Related<super::repair_statuses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RepairStatus.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
