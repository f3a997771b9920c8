//! Customer business logic - CRUD plus explicit deletion semantics.
//!
//! Deleting a customer clears the customer reference on dependent orders and
//! shipping addresses instead of cascading; removing an external account
//! cascades to delete the customer linked to it. Both rules live here in the
//! write path rather than in schema-level cascade configuration.

use crate::{
    entities::{Customer, Order, ShippingAddress, customer, order, shipping_address},
    errors::{Error, Result},
};
use sea_orm::{Set, TransactionTrait, Value, prelude::*, sea_query::Expr};
use tracing::{info, instrument};

/// Creates a new customer record.
///
/// Name and email may both be absent (guest customers); `user_id` links the
/// record to an external authenticated account and must be unique.
///
/// # Errors
/// Returns an error if the insert fails (e.g. duplicate `user_id`).
#[instrument(skip(db))]
pub async fn create_customer(
    db: &DatabaseConnection,
    user_id: Option<&str>,
    name: Option<&str>,
    email: Option<&str>,
) -> Result<customer::Model> {
    let model = customer::ActiveModel {
        user_id: Set(user_id.map(str::to_string)),
        name: Set(name.map(str::to_string)),
        email: Set(email.map(str::to_string)),
        ..Default::default()
    };
    let created = model.insert(db).await?;
    info!(
        "Created customer ID {} (account: {:?})",
        created.id, created.user_id
    );
    Ok(created)
}

/// Retrieves a customer by its unique ID.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_customer_by_id(
    db: &DatabaseConnection,
    customer_id: i64,
) -> Result<Option<customer::Model>> {
    Customer::find_by_id(customer_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds the customer linked to an external account ID.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_customer_by_user(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<Option<customer::Model>> {
    Customer::find()
        .filter(customer::Column::UserId.eq(user_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Updates a customer's name and email.
///
/// # Errors
///
/// Returns `Error::CustomerNotFound` if no customer has the given ID.
#[instrument(skip(db))]
pub async fn update_customer(
    db: &DatabaseConnection,
    customer_id: i64,
    name: Option<&str>,
    email: Option<&str>,
) -> Result<customer::Model> {
    let existing = Customer::find_by_id(customer_id)
        .one(db)
        .await?
        .ok_or(Error::CustomerNotFound { id: customer_id })?;

    let mut active: customer::ActiveModel = existing.into();
    active.name = Set(name.map(str::to_string));
    active.email = Set(email.map(str::to_string));
    let updated = active.update(db).await?;
    info!("Updated customer ID {}", updated.id);
    Ok(updated)
}

/// Deletes a customer, clearing the reference on dependent records.
///
/// Orders and shipping addresses pointing at the customer survive with a
/// null customer reference.
///
/// # Errors
///
/// Returns `Error::CustomerNotFound` if no customer has the given ID.
#[instrument(skip(db))]
pub async fn delete_customer(db: &DatabaseConnection, customer_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    Order::update_many()
        .col_expr(order::Column::CustomerId, Expr::value(Value::BigInt(None)))
        .filter(order::Column::CustomerId.eq(customer_id))
        .exec(&txn)
        .await?;
    ShippingAddress::update_many()
        .col_expr(
            shipping_address::Column::CustomerId,
            Expr::value(Value::BigInt(None)),
        )
        .filter(shipping_address::Column::CustomerId.eq(customer_id))
        .exec(&txn)
        .await?;

    let res = Customer::delete_by_id(customer_id).exec(&txn).await?;
    if res.rows_affected == 0 {
        return Err(Error::CustomerNotFound { id: customer_id });
    }

    txn.commit().await?;
    info!("Deleted customer ID {}", customer_id);
    Ok(())
}

/// Removes an external account, cascading to the customer linked to it.
///
/// Returns `true` if a linked customer existed and was deleted, `false` if
/// the account had no customer record.
///
/// # Errors
/// Returns an error if the lookup or deletion fails.
#[instrument(skip(db))]
pub async fn remove_account(db: &DatabaseConnection, user_id: &str) -> Result<bool> {
    let Some(linked) = get_customer_by_user(db, user_id).await? else {
        return Ok(false);
    };
    delete_customer(db, linked.id).await?;
    info!("Removed account '{}' and its linked customer", user_id);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{order as order_ops, shipping};
    use crate::test_utils::{init_test_tracing, setup_test_db};

    #[tokio::test]
    async fn test_create_and_lookup_customer() -> Result<()> {
        init_test_tracing();
        let db = setup_test_db().await?;

        let created =
            create_customer(&db, Some("acct-1"), Some("Ada"), Some("ada@example.com")).await?;
        assert_eq!(created.name.as_deref(), Some("Ada"));

        let by_user = get_customer_by_user(&db, "acct-1").await?;
        assert_eq!(by_user.map(|c| c.id), Some(created.id));

        let by_id = get_customer_by_id(&db, created.id).await?;
        assert_eq!(by_id.and_then(|c| c.email), Some("ada@example.com".into()));

        Ok(())
    }

    #[tokio::test]
    async fn test_guest_customer_without_name_or_email() -> Result<()> {
        init_test_tracing();
        let db = setup_test_db().await?;

        let guest = create_customer(&db, None, None, None).await?;
        assert_eq!(guest.user_id, None);
        assert_eq!(guest.name, None);
        assert_eq!(guest.email, None);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_customer_clears_dependent_references() -> Result<()> {
        init_test_tracing();
        let db = setup_test_db().await?;

        let customer = create_customer(&db, None, Some("Ada"), None).await?;
        let order = order_ops::create_order(&db, Some(customer.id)).await?;
        let address = shipping::create_shipping_address(
            &db,
            Some(customer.id),
            Some(order.id),
            Some("1 Main St"),
            Some("Springfield"),
            Some("IL"),
            Some("62704"),
        )
        .await?;

        delete_customer(&db, customer.id).await?;

        // Dependent records survive with the customer reference cleared
        let order_after = order_ops::get_order_by_id(&db, order.id).await?.unwrap();
        assert_eq!(order_after.customer_id, None);
        assert_eq!(order_after.date_ordered, order.date_ordered);

        let addresses = shipping::get_addresses_for_order(&db, order.id).await?;
        assert_eq!(addresses.len(), 1);
        assert_eq!(addresses[0].id, address.id);
        assert_eq!(addresses[0].customer_id, None);

        Ok(())
    }

    #[tokio::test]
    async fn test_remove_account_cascades_to_customer() -> Result<()> {
        init_test_tracing();
        let db = setup_test_db().await?;

        let customer = create_customer(&db, Some("acct-2"), Some("Grace"), None).await?;
        let order = order_ops::create_order(&db, Some(customer.id)).await?;

        assert!(remove_account(&db, "acct-2").await?);
        assert!(get_customer_by_id(&db, customer.id).await?.is_none());

        // The customer's orders are kept, reference cleared
        let order_after = order_ops::get_order_by_id(&db, order.id).await?.unwrap();
        assert_eq!(order_after.customer_id, None);

        // Unknown accounts are a no-op
        assert!(!remove_account(&db, "acct-unknown").await?);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_customer_not_found() -> Result<()> {
        init_test_tracing();
        let db = setup_test_db().await?;

        let result = update_customer(&db, 999, Some("Nobody"), None).await;
        assert!(matches!(result, Err(Error::CustomerNotFound { id: 999 })));

        Ok(())
    }
}
