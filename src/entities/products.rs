use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Catalog product. `price` is in cents; `image_url` points at object storage.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    pub price: i64,
    pub stock: i32,
    pub brand_id: i64,
    pub category_id: i64,
    pub image_url: Option<String>,
    /// Admin who last touched the record
    pub update_by: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::brands::Entity",
        from = "Column::BrandId",
        to = "super::brands::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Brand,
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Category,
    #[sea_orm(has_many = "super::product_per_orders::Entity")]
    ProductPerOrders,
    #[sea_orm(has_many = "super::product_update_histories::Entity")]
    UpdateHistories,
}

impl Related<super::brands::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Brand.def()
    }
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::product_per_orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductPerOrders.def()
    }
}

impl Related<super::product_update_histories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UpdateHistories.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
