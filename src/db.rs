//! Database connection and table creation.
//!
//! Tables are generated from the entity definitions with SeaORM's
//! `Schema::create_table_from_entity`, so the schema always matches the Rust
//! struct definitions without hand-written SQL.

use crate::entities::{Customer, Order, OrderItem, Product, ShippingAddress};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::{debug, info};

/// Establishes a connection to the database at the given URL.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection> {
    debug!("Connecting to database at: {}", database_url);
    let db = Database::connect(database_url).await?;
    info!("Database connection established.");
    Ok(db)
}

/// Creates all storefront tables from the entity definitions.
///
/// Safe to call on a fresh database only; existing tables are not migrated.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let customer_table = schema.create_table_from_entity(Customer);
    let product_table = schema.create_table_from_entity(Product);
    let order_table = schema.create_table_from_entity(Order);
    let order_item_table = schema.create_table_from_entity(OrderItem);
    let shipping_address_table = schema.create_table_from_entity(ShippingAddress);

    db.execute(builder.build(&customer_table)).await?;
    db.execute(builder.build(&product_table)).await?;
    db.execute(builder.build(&order_table)).await?;
    db.execute(builder.build(&order_item_table)).await?;
    db.execute(builder.build(&shipping_address_table)).await?;

    info!("Database tables ensured.");
    Ok(())
}
