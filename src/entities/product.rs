//! Product entity - Represents a sellable catalog item.
//!
//! Each product has a name, unit price, a digital flag marking items that
//! need no physical shipping, and an optional image path relative to the
//! media root. The image path is rewritten by the save path, see
//! [`crate::core::media`].

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Name of the product (e.g., "Red Hat", "Desk Lamp")
    pub name: String,
    /// Unit price in dollars
    pub price: f64,
    /// Whether the product is digital (no physical shipping required)
    pub digital: bool,
    /// Stored image path relative to the media root, None if no image
    pub image: Option<String>,
}

/// Defines relationships between Product and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One product appears in many order line items
    #[sea_orm(has_many = "super::order_item::Entity")]
    OrderItems,
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
