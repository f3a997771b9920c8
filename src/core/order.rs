//! Order business logic - cart lifecycle, line items, and derived totals.
//!
//! The item count and monetary total of an order are recomputed from the base
//! rows on every call; nothing is cached or stored. A line item whose product
//! link has been cleared fails total computation with a structured error
//! instead of contributing a misleading zero.

use crate::{
    entities::{
        Order, OrderItem, Product, ShippingAddress, order, order_item, shipping_address,
    },
    errors::{Error, Result},
};
use sea_orm::{Set, TransactionTrait, Value, prelude::*, sea_query::Expr};
use tracing::{info, instrument};

/// Creates a new open order, stamping `date_ordered` once.
///
/// # Errors
/// Returns an error if the insert fails.
#[instrument(skip(db))]
pub async fn create_order(
    db: &DatabaseConnection,
    customer_id: Option<i64>,
) -> Result<order::Model> {
    let model = order::ActiveModel {
        customer_id: Set(customer_id),
        date_ordered: Set(chrono::Utc::now()),
        complete: Set(false),
        transaction_id: Set(None),
        ..Default::default()
    };
    let created = model.insert(db).await?;
    info!(
        "Created order ID {} for customer {:?}",
        created.id, created.customer_id
    );
    Ok(created)
}

/// Retrieves an order by its unique ID.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_order_by_id(
    db: &DatabaseConnection,
    order_id: i64,
) -> Result<Option<order::Model>> {
    Order::find_by_id(order_id).one(db).await.map_err(Into::into)
}

/// Finds the customer's open (incomplete) order, if any.
///
/// The storefront keeps a single open cart per customer; this is the lookup
/// the cart views use before creating a fresh order.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_open_order_for_customer(
    db: &DatabaseConnection,
    customer_id: i64,
) -> Result<Option<order::Model>> {
    Order::find()
        .filter(order::Column::CustomerId.eq(customer_id))
        .filter(order::Column::Complete.eq(false))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Marks an order complete and records the payment transaction ID.
///
/// This is the only state transition an order has; there is no way back to
/// open, and completing twice is rejected. `date_ordered` is left untouched.
///
/// # Errors
///
/// Returns `Error::OrderNotFound` for an unknown ID and
/// `Error::OrderAlreadyComplete` if the order was completed before.
#[instrument(skip(db))]
pub async fn complete_order(
    db: &DatabaseConnection,
    order_id: i64,
    transaction_id: &str,
) -> Result<order::Model> {
    let existing = Order::find_by_id(order_id)
        .one(db)
        .await?
        .ok_or(Error::OrderNotFound { id: order_id })?;
    if existing.complete {
        return Err(Error::OrderAlreadyComplete { id: order_id });
    }

    let mut active: order::ActiveModel = existing.into();
    active.complete = Set(true);
    active.transaction_id = Set(Some(transaction_id.to_string()));
    let completed = active.update(db).await?;
    info!(
        "Completed order ID {} with transaction '{}'",
        completed.id, transaction_id
    );
    Ok(completed)
}

/// Adds a line item for a product to an order.
///
/// Quantity is accepted as-is; bounds checking belongs to the surrounding
/// application's input layer.
///
/// # Errors
///
/// Returns `Error::OrderNotFound` / `Error::ProductNotFound` if either side
/// of the link does not exist.
#[instrument(skip(db))]
pub async fn add_order_item(
    db: &DatabaseConnection,
    order_id: i64,
    product_id: i64,
    quantity: i32,
) -> Result<order_item::Model> {
    if Order::find_by_id(order_id).one(db).await?.is_none() {
        return Err(Error::OrderNotFound { id: order_id });
    }
    if Product::find_by_id(product_id).one(db).await?.is_none() {
        return Err(Error::ProductNotFound { id: product_id });
    }

    let model = order_item::ActiveModel {
        product_id: Set(Some(product_id)),
        order_id: Set(Some(order_id)),
        quantity: Set(quantity),
        date_added: Set(chrono::Utc::now()),
        ..Default::default()
    };
    let created = model.insert(db).await?;
    info!(
        "Added item ID {} (product {}, qty {}) to order {}",
        created.id, product_id, quantity, order_id
    );
    Ok(created)
}

/// Sets the quantity on an existing line item.
///
/// # Errors
///
/// Returns `Error::OrderItemNotFound` if no item has the given ID.
#[instrument(skip(db))]
pub async fn update_order_item_quantity(
    db: &DatabaseConnection,
    item_id: i64,
    quantity: i32,
) -> Result<order_item::Model> {
    let existing = OrderItem::find_by_id(item_id)
        .one(db)
        .await?
        .ok_or(Error::OrderItemNotFound { id: item_id })?;

    let mut active: order_item::ActiveModel = existing.into();
    active.quantity = Set(quantity);
    let updated = active.update(db).await?;
    info!("Set quantity {} on order item {}", quantity, item_id);
    Ok(updated)
}

/// Removes a line item from its order.
///
/// # Errors
///
/// Returns `Error::OrderItemNotFound` if no item has the given ID.
#[instrument(skip(db))]
pub async fn delete_order_item(db: &DatabaseConnection, item_id: i64) -> Result<()> {
    let res = OrderItem::delete_by_id(item_id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(Error::OrderItemNotFound { id: item_id });
    }
    info!("Deleted order item ID {}", item_id);
    Ok(())
}

/// Computes `product.price * quantity` for one line item.
///
/// # Errors
///
/// Returns `Error::MissingProduct` if the item's product link has been
/// cleared (e.g. the product was deleted) or points at a missing row.
pub async fn line_item_total(db: &DatabaseConnection, item: &order_item::Model) -> Result<f64> {
    let product_id = item.product_id.ok_or(Error::MissingProduct {
        order_item_id: item.id,
    })?;
    let product = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or(Error::MissingProduct {
            order_item_id: item.id,
        })?;
    Ok(product.price * f64::from(item.quantity))
}

/// Sums the quantities across all line items of an order (0 if none).
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn cart_item_count(db: &DatabaseConnection, order_id: i64) -> Result<i64> {
    let items = OrderItem::find()
        .filter(order_item::Column::OrderId.eq(order_id))
        .all(db)
        .await?;
    Ok(items.iter().map(|item| i64::from(item.quantity)).sum())
}

/// Sums `price * quantity` across all line items of an order (0.0 if none).
///
/// # Errors
///
/// Returns `Error::MissingProduct` if any line item's product link is
/// cleared or dangling.
pub async fn cart_total(db: &DatabaseConnection, order_id: i64) -> Result<f64> {
    let rows = OrderItem::find()
        .filter(order_item::Column::OrderId.eq(order_id))
        .find_also_related(Product)
        .all(db)
        .await?;

    let mut total = 0.0;
    for (item, product) in rows {
        let product = product.ok_or(Error::MissingProduct {
            order_item_id: item.id,
        })?;
        total += product.price * f64::from(item.quantity);
    }
    Ok(total)
}

/// Deletes an order, clearing the order link on surviving line items and
/// shipping addresses.
///
/// # Errors
///
/// Returns `Error::OrderNotFound` if no order has the given ID.
#[instrument(skip(db))]
pub async fn delete_order(db: &DatabaseConnection, order_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    OrderItem::update_many()
        .col_expr(order_item::Column::OrderId, Expr::value(Value::BigInt(None)))
        .filter(order_item::Column::OrderId.eq(order_id))
        .exec(&txn)
        .await?;
    ShippingAddress::update_many()
        .col_expr(
            shipping_address::Column::OrderId,
            Expr::value(Value::BigInt(None)),
        )
        .filter(shipping_address::Column::OrderId.eq(order_id))
        .exec(&txn)
        .await?;

    let res = Order::delete_by_id(order_id).exec(&txn).await?;
    if res.rows_affected == 0 {
        return Err(Error::OrderNotFound { id: order_id });
    }

    txn.commit().await?;
    info!("Deleted order ID {}", order_id);
    Ok(())
}
