use super::order::{PaymentInput, ShippingInput};
use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Storefront checkout body. Field names are camelCase as sent by the web client.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CheckoutRequest {
    pub shipping: CheckoutShipping,
    pub payment: CheckoutPayment,
    pub order: CheckoutOrder,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutShipping {
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

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutPayment {
    pub cardholder_name: String,
    pub card_number_last4: String,
    pub expiry_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutOrder {
    pub items: Vec<CheckoutItem>,
    #[serde(default)]
    pub total_items: i64,
    #[serde(default)]
    pub subtotal: i64,
    #[serde(default)]
    pub shipping_fee: i64,
    pub total: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CheckoutItem {
    /// Product id
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: i64,
    pub quantity: i32,
}

pub const CHECKOUT_PAYMENT_TYPE: &str = "Credit Card";
pub const GUEST_USER: &str = "guest";

impl CheckoutRequest {
    pub fn validate(&self) -> AppResult<()> {
        if self.order.items.is_empty() {
            return Err(AppError::ValidationError("Order has no items".into()));
        }
        if let Some(item) = self.order.items.iter().find(|i| i.quantity <= 0) {
            return Err(AppError::ValidationError(format!(
                "Invalid quantity {} for product {}",
                item.quantity, item.id
            )));
        }
        if self.order.total < 0 {
            return Err(AppError::ValidationError("Order total must not be negative".into()));
        }
        Ok(())
    }

    pub fn shipping_input(&self) -> ShippingInput {
        let s = &self.shipping;
        ShippingInput {
            first_name: s.first_name.clone(),
            last_name: s.last_name.clone(),
            address: s.address.clone(),
            city: s.city.clone(),
            state: s.state.clone(),
            zip_code: s.zip_code.clone(),
            country: s.country.clone(),
            email: s.email.clone().filter(|e| !e.is_empty()),
            phone: s.phone.clone().filter(|p| !p.is_empty()),
        }
    }

    /// Payment for the whole order total.
    pub fn payment_input(&self) -> PaymentInput {
        PaymentInput {
            amount: self.order.total,
            payment_type: CHECKOUT_PAYMENT_TYPE.to_string(),
            cardholder_name: self.payment.cardholder_name.clone(),
            card_number_last4: self.payment.card_number_last4.clone(),
            expiry_date: self.payment.expiry_date.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> serde_json::Value {
        json!({
            "shipping": {
                "firstName": "Ada", "lastName": "Lovelace", "address": "1 Loop Rd",
                "city": "London", "state": "LDN", "zipCode": "N1", "country": "UK",
                "email": ""
            },
            "payment": {
                "cardholderName": "Ada Lovelace", "cardNumberLast4": "4242", "expiryDate": "12/30"
            },
            "order": {
                "items": [{"id": 7, "name": "Pixel 9", "price": 79900, "quantity": 2}],
                "totalItems": 2, "subtotal": 159800, "shippingFee": 500, "total": 160300
            }
        })
    }

    #[test]
    fn test_parses_camel_case_body() {
        let req: CheckoutRequest = serde_json::from_value(sample()).unwrap();
        assert_eq!(req.shipping.zip_code, "N1");
        assert_eq!(req.order.shipping_fee, 500);
        assert!(req.validate().is_ok());

        let payment = req.payment_input();
        assert_eq!(payment.amount, 160300);
        assert_eq!(payment.payment_type, "Credit Card");
        assert!(req.shipping_input().email.is_none());
    }

    #[test]
    fn test_empty_items_rejected() {
        let mut body = sample();
        body["order"]["items"] = json!([]);
        let req: CheckoutRequest = serde_json::from_value(body).unwrap();
        assert!(matches!(req.validate(), Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_non_positive_quantity_rejected() {
        let mut body = sample();
        body["order"]["items"][0]["quantity"] = json!(0);
        let req: CheckoutRequest = serde_json::from_value(body).unwrap();
        assert!(req.validate().is_err());
    }
}
