//! Order entity - Represents a cart or completed purchase.
//!
//! An order belongs to at most one customer (nullable foreign key, cleared
//! when the customer is deleted). `date_ordered` is stamped at creation and
//! never updated. The only state transition is open -> complete, which sets
//! `transaction_id`; there is no transition back.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    /// Unique identifier for the order
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning customer, None for anonymous carts or after customer deletion
    pub customer_id: Option<i64>,
    /// When the order was created, set once
    pub date_ordered: DateTimeUtc,
    /// Whether the order has been completed (payment confirmed)
    pub complete: bool,
    /// Payment transaction reference, set when the order completes
    pub transaction_id: Option<String>,
}

/// Defines relationships between Order and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each order belongs to at most one customer
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::CustomerId",
        to = "super::customer::Column::Id"
    )]
    Customer,
    /// One order contains many line items
    #[sea_orm(has_many = "super::order_item::Entity")]
    OrderItems,
    /// One order has shipping addresses attached
    #[sea_orm(has_many = "super::shipping_address::Entity")]
    ShippingAddresses,
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItems.def()
    }
}

impl Related<super::shipping_address::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ShippingAddresses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
