pub mod brands;
pub mod categories;
pub mod orders;
pub mod payments;
pub mod product_per_orders;
pub mod product_update_histories;
pub mod products;
pub mod repair_statuses;
pub mod repairs;
pub mod shippings;

pub use brands as brand_entity;
pub use categories as category_entity;
pub use orders as order_entity;
pub use payments as payment_entity;
pub use product_per_orders as product_per_order_entity;
pub use product_update_histories as product_update_history_entity;
pub use products as product_entity;
pub use repair_statuses as repair_status_entity;
pub use repairs as repair_entity;
pub use shippings as shipping_entity;
