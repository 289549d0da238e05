pub mod brand_service;
pub mod category_service;
pub mod checkout_service;
pub mod order_service;
pub mod payment_service;
pub mod product_order_service;
pub mod product_service;
pub mod repair_service;
pub mod repair_status_service;
pub mod shipping_service;

pub use brand_service::*;
pub use category_service::*;
pub use checkout_service::*;
pub use order_service::OrderService;
pub use payment_service::*;
pub use product_order_service::*;
pub use product_service::*;
pub use repair_service::*;
pub use repair_status_service::*;
pub use shipping_service::*;
