//! Customer entity - Represents a storefront customer.
//!
//! A customer may be linked to an authenticated account via `user_id`, or
//! exist as a guest record with neither name nor email. Orders and shipping
//! addresses reference customers with nullable foreign keys.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Customer database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    /// Unique identifier for the customer
    #[sea_orm(primary_key)]
    pub id: i64,
    /// External authenticated account ID, None for guest customers
    #[sea_orm(unique)]
    pub user_id: Option<String>,
    /// Display name, may be absent
    pub name: Option<String>,
    /// Contact email, may be absent
    pub email: Option<String>,
}

/// Defines relationships between Customer and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One customer places many orders
    #[sea_orm(has_many = "super::order::Entity")]
    Orders,
    /// One customer has many shipping addresses
    #[sea_orm(has_many = "super::shipping_address::Entity")]
    ShippingAddresses,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl Related<super::shipping_address::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ShippingAddresses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
