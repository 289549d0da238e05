use super::catalog::ProductSummary;
use crate::entities::{order_entity, payment_entity, product_per_order_entity, shipping_entity};
use crate::error::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaymentInput {
    /// Amount in cents
    pub amount: i64,
    pub payment_type: String,
    pub cardholder_name: String,
    pub card_number_last4: String,
    pub expiry_date: String,
}

/// Shipping address fields; used for order bodies and `PUT /shippings/:id`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ShippingInput {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl ShippingInput {
    pub fn validate(&self) -> AppResult<()> {
        if self.address.trim().is_empty() {
            return Err(AppError::ValidationError("Shipping address is required".into()));
        }
        Ok(())
    }
}

/// Body of `POST /orders` and `PUT /orders/:id`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderRequest {
    pub user_id: String,
    pub payment: PaymentInput,
    pub shipping: ShippingInput,
}

impl OrderRequest {
    pub fn validate(&self) -> AppResult<()> {
        if self.user_id.trim().is_empty() {
            return Err(AppError::ValidationError("User ID is required".into()));
        }
        if self.payment.amount < 0 {
            return Err(AppError::ValidationError("Payment amount must not be negative".into()));
        }
        self.shipping.validate()
    }
}

/// Body of `POST /shippings`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ShippingRequest {
    pub order_id: i64,
    #[serde(flatten)]
    pub details: ShippingInput,
}

/// Body of `POST /product-orders`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductOrderRequest {
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: i32,
}

impl ProductOrderRequest {
    pub fn validate(&self) -> AppResult<()> {
        if self.quantity <= 0 {
            return Err(AppError::ValidationError("Quantity must be positive".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaymentResponse {
    pub id: i64,
    pub order_id: i64,
    pub amount: i64,
    pub payment_type: String,
    pub cardholder_name: String,
    pub card_number_last4: String,
    pub expiry_date: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<payment_entity::Model> for PaymentResponse {
    fn from(m: payment_entity::Model) -> Self {
        Self {
            id: m.id,
            order_id: m.order_id,
            amount: m.amount,
            payment_type: m.payment_type,
            cardholder_name: m.cardholder_name,
            card_number_last4: m.card_number_last4,
            expiry_date: m.expiry_date,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ShippingResponse {
    pub id: i64,
    pub order_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<shipping_entity::Model> for ShippingResponse {
    fn from(m: shipping_entity::Model) -> Self {
        Self {
            id: m.id,
            order_id: m.order_id,
            first_name: m.first_name,
            last_name: m.last_name,
            address: m.address,
            city: m.city,
            state: m.state,
            zip_code: m.zip_code,
            country: m.country,
            email: m.email,
            phone: m.phone,
            created_at: m.created_at,
        }
    }
}

/// One order line, with its product when it still exists.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductOrderResponse {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: i32,
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<ProductSummary>,
}

impl From<product_per_order_entity::Model> for ProductOrderResponse {
    fn from(m: product_per_order_entity::Model) -> Self {
        Self {
            id: m.id,
            order_id: m.order_id,
            product_id: m.product_id,
            quantity: m.quantity,
            created_at: m.created_at,
            product: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderResponse {
    pub id: i64,
    pub user_id: String,
    pub created_at: Option<DateTime<Utc>>,
    pub payment: Option<PaymentResponse>,
    pub shipping: Option<ShippingResponse>,
    pub items: Vec<ProductOrderResponse>,
}

impl From<order_entity::Model> for OrderResponse {
    fn from(m: order_entity::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            created_at: m.created_at,
            payment: None,
            shipping: None,
            items: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_shipping_request_is_flat() {
        let req: ShippingRequest = serde_json::from_value(json!({
            "order_id": 3,
            "first_name": "Ada",
            "last_name": "Lovelace",
            "address": "1 Loop Rd",
            "city": "London",
            "state": "LDN",
            "zip_code": "N1",
            "country": "UK"
        }))
        .unwrap();
        assert_eq!(req.order_id, 3);
        assert_eq!(req.details.city, "London");
        assert!(req.details.email.is_none());
    }

    #[test]
    fn test_product_order_quantity_must_be_positive() {
        let req = ProductOrderRequest {
            order_id: 1,
            product_id: 1,
            quantity: 0,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_order_request_requires_user() {
        let req: OrderRequest = serde_json::from_value(json!({
            "user_id": " ",
            "payment": {
                "amount": 100,
                "payment_type": "Credit Card",
                "cardholder_name": "Ada",
                "card_number_last4": "4242",
                "expiry_date": "12/30"
            },
            "shipping": {
                "first_name": "Ada", "last_name": "L", "address": "x",
                "city": "c", "state": "s", "zip_code": "z", "country": "UK"
            }
        }))
        .unwrap();
        assert!(matches!(req.validate(), Err(AppError::ValidationError(_))));
    }
}
