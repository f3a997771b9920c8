use thiserror::Error;

/// Unified error type for the storefront data layer.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Customer not found: {id}")]
    CustomerNotFound { id: i64 },

    #[error("Product not found: {id}")]
    ProductNotFound { id: i64 },

    #[error("Order not found: {id}")]
    OrderNotFound { id: i64 },

    #[error("Order item not found: {id}")]
    OrderItemNotFound { id: i64 },

    #[error("Order item {order_item_id} has no linked product")]
    MissingProduct { order_item_id: i64 },

    #[error("Order {id} is already complete")]
    OrderAlreadyComplete { id: i64 },
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
