use crate::entities::{
    order_entity, payment_entity, product_entity, product_per_order_entity, shipping_entity,
};
use crate::error::{AppError, AppResult};
use crate::models::*;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use std::collections::HashMap;

#[derive(Clone)]
pub struct OrderService {
    pool: DatabaseConnection,
}

impl OrderService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// All orders with payment, shipping and product lines.
    pub async fn list(&self) -> AppResult<Vec<OrderResponse>> {
        let orders = order_entity::Entity::find()
            .order_by_asc(order_entity::Column::Id)
            .all(&self.pool)
            .await?;
        with_details(&self.pool, orders).await
    }

    /// Creates the order with its payment and shipping in one transaction.
    pub async fn create(&self, request: OrderRequest) -> AppResult<OrderResponse> {
        request.validate()?;
        let now = Utc::now();

        let txn = self.pool.begin().await?;
        let order = order_entity::ActiveModel {
            user_id: Set(request.user_id.trim().to_string()),
            created_at: Set(Some(now)),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        insert_payment(&txn, order.id, &request.payment, now).await?;
        insert_shipping(&txn, order.id, &request.shipping, now).await?;
        txn.commit().await?;

        log::info!("Created order {} for user {}", order.id, order.user_id);
        order_with_details(&self.pool, order).await
    }

    /// Rewrites user, payment and shipping of an order. Missing payment or
    /// shipping rows are created.
    pub async fn update(&self, id: i64, request: OrderRequest) -> AppResult<OrderResponse> {
        request.validate()?;
        let now = Utc::now();

        let txn = self.pool.begin().await?;
        let order = order_entity::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("Order not found".into()))?;

        let mut active = order.into_active_model();
        active.user_id = Set(request.user_id.trim().to_string());
        let order = active.update(&txn).await?;

        let payment = payment_entity::Entity::find()
            .filter(payment_entity::Column::OrderId.eq(id))
            .one(&txn)
            .await?;
        match payment {
            Some(existing) => {
                let p = &request.payment;
                let mut active = existing.into_active_model();
                active.amount = Set(p.amount);
                active.payment_type = Set(p.payment_type.clone());
                active.cardholder_name = Set(p.cardholder_name.clone());
                active.card_number_last4 = Set(p.card_number_last4.clone());
                active.expiry_date = Set(p.expiry_date.clone());
                active.update(&txn).await?;
            }
            None => {
                insert_payment(&txn, id, &request.payment, now).await?;
            }
        }

        let shipping = shipping_entity::Entity::find()
            .filter(shipping_entity::Column::OrderId.eq(id))
            .one(&txn)
            .await?;
        match shipping {
            Some(existing) => {
                apply_shipping(existing.into_active_model(), &request.shipping)
                    .update(&txn)
                    .await?;
            }
            None => {
                insert_shipping(&txn, id, &request.shipping, now).await?;
            }
        }

        txn.commit().await?;
        log::info!("Updated order {id}");
        order_with_details(&self.pool, order).await
    }

    /// Deletes lines, shipping, payment and the order itself, atomically.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let txn = self.pool.begin().await?;
        if order_entity::Entity::find_by_id(id).one(&txn).await?.is_none() {
            return Err(AppError::NotFound("Order not found".into()));
        }

        product_per_order_entity::Entity::delete_many()
            .filter(product_per_order_entity::Column::OrderId.eq(id))
            .exec(&txn)
            .await?;
        shipping_entity::Entity::delete_many()
            .filter(shipping_entity::Column::OrderId.eq(id))
            .exec(&txn)
            .await?;
        payment_entity::Entity::delete_many()
            .filter(payment_entity::Column::OrderId.eq(id))
            .exec(&txn)
            .await?;
        order_entity::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        log::info!("Deleted order {id}");
        Ok(())
    }
}

pub(crate) async fn insert_payment<C: ConnectionTrait>(
    db: &C,
    order_id: i64,
    payment: &PaymentInput,
    now: DateTime<Utc>,
) -> AppResult<payment_entity::Model> {
    payment_entity::ActiveModel {
        order_id: Set(order_id),
        amount: Set(payment.amount),
        payment_type: Set(payment.payment_type.clone()),
        cardholder_name: Set(payment.cardholder_name.clone()),
        card_number_last4: Set(payment.card_number_last4.clone()),
        expiry_date: Set(payment.expiry_date.clone()),
        created_at: Set(Some(now)),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(|e| AppError::from_write(e, "Payment for this order"))
}

pub(crate) async fn insert_shipping<C: ConnectionTrait>(
    db: &C,
    order_id: i64,
    shipping: &ShippingInput,
    now: DateTime<Utc>,
) -> AppResult<shipping_entity::Model> {
    apply_shipping(
        shipping_entity::ActiveModel {
            order_id: Set(order_id),
            created_at: Set(Some(now)),
            ..Default::default()
        },
        shipping,
    )
    .insert(db)
    .await
    .map_err(|e| AppError::from_write(e, "Shipping for this order"))
}

/// Copies the address fields onto `active`; `order_id` is left alone.
pub(crate) fn apply_shipping(
    mut active: shipping_entity::ActiveModel,
    shipping: &ShippingInput,
) -> shipping_entity::ActiveModel {
    active.first_name = Set(shipping.first_name.clone());
    active.last_name = Set(shipping.last_name.clone());
    active.address = Set(shipping.address.clone());
    active.city = Set(shipping.city.clone());
    active.state = Set(shipping.state.clone());
    active.zip_code = Set(shipping.zip_code.clone());
    active.country = Set(shipping.country.clone());
    active.email = Set(shipping.email.clone());
    active.phone = Set(shipping.phone.clone());
    active
}

pub(crate) async fn order_with_details<C: ConnectionTrait>(
    db: &C,
    order: order_entity::Model,
) -> AppResult<OrderResponse> {
    with_details(db, vec![order])
        .await?
        .pop()
        .ok_or_else(|| AppError::InternalError("order vanished while loading".into()))
}

/// Attaches payment, shipping and lines (with products) to `orders`.
pub(crate) async fn with_details<C: ConnectionTrait>(
    db: &C,
    orders: Vec<order_entity::Model>,
) -> AppResult<Vec<OrderResponse>> {
    if orders.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<i64> = orders.iter().map(|o| o.id).collect();

    let mut payments: HashMap<i64, payment_entity::Model> = payment_entity::Entity::find()
        .filter(payment_entity::Column::OrderId.is_in(ids.clone()))
        .all(db)
        .await?
        .into_iter()
        .map(|p| (p.order_id, p))
        .collect();
    let mut shippings: HashMap<i64, shipping_entity::Model> = shipping_entity::Entity::find()
        .filter(shipping_entity::Column::OrderId.is_in(ids.clone()))
        .all(db)
        .await?
        .into_iter()
        .map(|s| (s.order_id, s))
        .collect();

    let lines = product_per_order_entity::Entity::find()
        .filter(product_per_order_entity::Column::OrderId.is_in(ids))
        .order_by_asc(product_per_order_entity::Column::Id)
        .find_also_related(product_entity::Entity)
        .all(db)
        .await?;
    let mut items: HashMap<i64, Vec<ProductOrderResponse>> = HashMap::new();
    for (line, product) in lines {
        let mut item = ProductOrderResponse::from(line);
        item.product = product.map(ProductSummary::from);
        items.entry(item.order_id).or_default().push(item);
    }

    Ok(orders
        .into_iter()
        .map(|order| {
            let id = order.id;
            let mut response = OrderResponse::from(order);
            response.payment = payments.remove(&id).map(PaymentResponse::from);
            response.shipping = shippings.remove(&id).map(ShippingResponse::from);
            response.items = items.remove(&id).unwrap_or_default();
            response
        })
        .collect())
}
