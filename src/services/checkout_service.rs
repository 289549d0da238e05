use super::order_service::{insert_payment, insert_shipping, order_with_details};
use crate::entities::{order_entity, product_entity, product_per_order_entity};
use crate::error::{AppError, AppResult};
use crate::models::*;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Set, TransactionTrait,
};

#[derive(Clone)]
pub struct CheckoutService {
    pool: DatabaseConnection,
}

impl CheckoutService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// Places a guest order: order, shipping, payment, then one line per item
    /// with a stock check and decrement. Any failure rolls the whole checkout back.
    pub async fn checkout(&self, request: CheckoutRequest) -> AppResult<OrderResponse> {
        request.validate()?;
        let now = Utc::now();

        let txn = self.pool.begin().await?;
        let order = order_entity::ActiveModel {
            user_id: Set(GUEST_USER.to_string()),
            created_at: Set(Some(now)),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        insert_shipping(&txn, order.id, &request.shipping_input(), now).await?;
        insert_payment(&txn, order.id, &request.payment_input(), now).await?;

        for item in &request.order.items {
            let product = product_entity::Entity::find_by_id(item.id)
                .one(&txn)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Product not found: {}", item.id)))?;
            if product.stock < item.quantity {
                return Err(AppError::ValidationError(format!(
                    "Insufficient stock for product: {}",
                    product.name
                )));
            }

            product_per_order_entity::ActiveModel {
                order_id: Set(order.id),
                product_id: Set(product.id),
                quantity: Set(item.quantity),
                created_at: Set(Some(now)),
                ..Default::default()
            }
            .insert(&txn)
            .await?;

            let remaining = product.stock - item.quantity;
            let mut active = product.into_active_model();
            active.stock = Set(remaining);
            active.updated_at = Set(Some(now));
            active.update(&txn).await?;
        }

        txn.commit().await?;
        log::info!(
            "Checkout completed: order {} with {} item(s), total {}",
            order.id,
            request.order.items.len(),
            request.order.total
        );
        order_with_details(&self.pool, order).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{payment_entity, shipping_entity};
    use sea_orm::{DatabaseBackend, MockDatabase};
    use serde_json::json;

    fn request(items: serde_json::Value) -> CheckoutRequest {
        serde_json::from_value(json!({
            "shipping": {
                "firstName": "Ada", "lastName": "Lovelace", "address": "1 Loop Rd",
                "city": "London", "state": "LDN", "zipCode": "N1", "country": "UK"
            },
            "payment": {
                "cardholderName": "Ada Lovelace", "cardNumberLast4": "4242", "expiryDate": "12/30"
            },
            "order": {"items": items, "total": 160300}
        }))
        .unwrap()
    }

    fn order() -> order_entity::Model {
        order_entity::Model {
            id: 10,
            user_id: GUEST_USER.into(),
            created_at: None,
        }
    }

    fn shipping() -> shipping_entity::Model {
        shipping_entity::Model {
            id: 20,
            order_id: 10,
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            address: "1 Loop Rd".into(),
            city: "London".into(),
            state: "LDN".into(),
            zip_code: "N1".into(),
            country: "UK".into(),
            email: None,
            phone: None,
            created_at: None,
        }
    }

    fn payment() -> payment_entity::Model {
        payment_entity::Model {
            id: 30,
            order_id: 10,
            amount: 160300,
            payment_type: CHECKOUT_PAYMENT_TYPE.into(),
            cardholder_name: "Ada Lovelace".into(),
            card_number_last4: "4242".into(),
            expiry_date: "12/30".into(),
            created_at: None,
        }
    }

    fn product(stock: i32) -> product_entity::Model {
        product_entity::Model {
            id: 7,
            name: "Pixel 9".into(),
            price: 79900,
            stock,
            brand_id: 1,
            category_id: 2,
            image_url: None,
            update_by: "admin".into(),
            created_at: None,
            updated_at: None,
        }
    }

    fn line(id: i64, quantity: i32) -> product_per_order_entity::Model {
        product_per_order_entity::Model {
            id,
            order_id: 10,
            product_id: 7,
            quantity,
            created_at: None,
        }
    }

    // order, shipping and payment rows returned by the first three inserts
    fn placed() -> MockDatabase {
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![order()]])
            .append_query_results([vec![shipping()]])
            .append_query_results([vec![payment()]])
    }

    #[actix_web::test]
    async fn test_insufficient_stock_rolls_back() {
        let db = placed()
            .append_query_results([vec![product(1)]])
            .into_connection();

        let err = CheckoutService::new(db.clone())
            .checkout(request(json!([{"id": 7, "quantity": 2}])))
            .await
            .unwrap_err();
        assert!(
            matches!(&err, AppError::ValidationError(msg) if msg == "Insufficient stock for product: Pixel 9")
        );

        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains("ROLLBACK"));
        assert!(!log.contains("COMMIT"));
    }

    #[actix_web::test]
    async fn test_missing_product_is_not_found() {
        let db = placed()
            .append_query_results([Vec::<product_entity::Model>::new()])
            .into_connection();

        let err = CheckoutService::new(db.clone())
            .checkout(request(json!([{"id": 7, "quantity": 1}])))
            .await
            .unwrap_err();
        assert!(matches!(&err, AppError::NotFound(msg) if msg == "Product not found: 7"));

        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains("ROLLBACK"));
    }

    #[actix_web::test]
    async fn test_repeated_items_decrement_stock_in_turn() {
        let db = placed()
            .append_query_results([vec![product(5)]])
            .append_query_results([vec![line(1, 2)]])
            .append_query_results([vec![product(3)]])
            .append_query_results([vec![product(3)]])
            .append_query_results([vec![line(2, 2)]])
            .append_query_results([vec![product(1)]])
            // order_with_details after commit
            .append_query_results([vec![payment()]])
            .append_query_results([vec![shipping()]])
            .append_query_results([vec![(line(1, 2), product(1)), (line(2, 2), product(1))]])
            .into_connection();

        let placed_order = CheckoutService::new(db.clone())
            .checkout(request(json!([
                {"id": 7, "quantity": 2},
                {"id": 7, "quantity": 2}
            ])))
            .await
            .unwrap();
        assert_eq!(placed_order.user_id, GUEST_USER);
        assert_eq!(placed_order.items.len(), 2);
        assert_eq!(placed_order.payment.map(|p| p.amount), Some(160300));

        // stock is the first column set by each product update
        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains("Values([Int(Some(3))"));
        assert!(log.contains("Values([Int(Some(1))"));
        assert!(log.contains("COMMIT"));
    }
}
