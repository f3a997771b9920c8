//! Shipping address business logic.
//!
//! Addresses tie a delivery destination to a customer and an order; both
//! links are optional and survive the other record's deletion with the
//! reference cleared (see the deletion hooks in the customer and order
//! modules).

use crate::{
    entities::{ShippingAddress, shipping_address},
    errors::Result,
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{info, instrument};

/// Records a shipping address for an order.
///
/// Field presence is not validated beyond being optional; the surrounding
/// application's input layer owns validation.
///
/// # Errors
/// Returns an error if the insert fails.
#[instrument(skip(db))]
pub async fn create_shipping_address(
    db: &DatabaseConnection,
    customer_id: Option<i64>,
    order_id: Option<i64>,
    address: Option<&str>,
    city: Option<&str>,
    state: Option<&str>,
    zipcode: Option<&str>,
) -> Result<shipping_address::Model> {
    let model = shipping_address::ActiveModel {
        customer_id: Set(customer_id),
        order_id: Set(order_id),
        address: Set(address.map(str::to_string)),
        city: Set(city.map(str::to_string)),
        state: Set(state.map(str::to_string)),
        zipcode: Set(zipcode.map(str::to_string)),
        date_added: Set(chrono::Utc::now()),
        ..Default::default()
    };
    let created = model.insert(db).await?;
    info!(
        "Recorded shipping address ID {} for order {:?}",
        created.id, created.order_id
    );
    Ok(created)
}

/// Lists the shipping addresses attached to an order, oldest first.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_addresses_for_order(
    db: &DatabaseConnection,
    order_id: i64,
) -> Result<Vec<shipping_address::Model>> {
    ShippingAddress::find()
        .filter(shipping_address::Column::OrderId.eq(order_id))
        .order_by_asc(shipping_address::Column::DateAdded)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Lists a customer's shipping addresses, oldest first.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_addresses_for_customer(
    db: &DatabaseConnection,
    customer_id: i64,
) -> Result<Vec<shipping_address::Model>> {
    ShippingAddress::find()
        .filter(shipping_address::Column::CustomerId.eq(customer_id))
        .order_by_asc(shipping_address::Column::DateAdded)
        .all(db)
        .await
        .map_err(Into::into)
}
