//! Shipping address entity - A delivery destination for an order.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Shipping address database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "shipping_addresses")]
pub struct Model {
    /// Unique identifier for the address
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning customer, None after customer deletion
    pub customer_id: Option<i64>,
    /// Associated order, None after order deletion
    pub order_id: Option<i64>,
    /// Street address line
    pub address: Option<String>,
    /// City name
    pub city: Option<String>,
    /// State or region
    pub state: Option<String>,
    /// Postal code
    pub zipcode: Option<String>,
    /// When the address was recorded
    pub date_added: DateTimeUtc,
}

/// Defines relationships between ShippingAddress and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each address belongs to at most one customer
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::CustomerId",
        to = "super::customer::Column::Id"
    )]
    Customer,
    /// Each address is attached to at most one order
    #[sea_orm(
        belongs_to = "super::order::Entity",
        from = "Column::OrderId",
        to = "super::order::Column::Id"
    )]
    Order,
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
