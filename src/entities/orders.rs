use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Customer reference; checkout orders use "guest"
    pub user_id: String,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::product_per_orders::Entity")]
    ProductPerOrders,
    #[sea_orm(has_one = "super::payments::Entity")]
    Payment,
    #[sea_orm(has_one = "super::shippings::Entity")]
    Shipping,
}

impl Related<super::product_per_orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductPerOrders.def()
    }
}

impl Related<super::payments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payment.def()
    }
}

impl Related<super::shippings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Shipping.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
