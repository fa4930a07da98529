//! Error types for the Order actor.

use crate::framework::FrameworkError;
use crate::model::OrderStatus;
use thiserror::Error;

/// Errors that can occur during order operations.
///
/// Stale order ids are not errors: updates and deletes on a missing id are
/// silent no-ops.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// An order must have at least one line.
    #[error("Order has no lines")]
    EmptyOrder,

    /// A line for the given menu item has quantity zero.
    #[error("Invalid quantity for menu item {0}")]
    InvalidQuantity(String),

    /// Table numbers start at 1.
    #[error("Invalid table number: {0}")]
    InvalidTableNumber(u32),

    /// The string is not one of `new`, `preparing`, `ready`, `completed`.
    #[error("Invalid order status: {0}")]
    InvalidStatus(String),

    /// A line subtotal or the order total does not fit in a `u64`.
    #[error("Order total overflows")]
    TotalOverflow,

    /// The menu item id is not in the catalog.
    #[error("Unknown menu item: {0}")]
    UnknownMenuItem(String),

    /// Rejected by the strict transition policy.
    #[error("Illegal status transition from {from} to {to}")]
    IllegalTransition { from: OrderStatus, to: OrderStatus },

    /// The store has already been seeded.
    #[error("Order store already initialized")]
    AlreadyInitialized,

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for OrderError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::AlreadySeeded => OrderError::AlreadyInitialized,
            FrameworkError::EntityError(inner) => match inner.downcast::<OrderError>() {
                Ok(order_error) => *order_error,
                Err(other) => OrderError::ActorCommunicationError(other.to_string()),
            },
            other => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_framework_errors_map_back_to_order_errors() {
        let boxed = FrameworkError::EntityError(Box::new(OrderError::EmptyOrder));
        assert_eq!(OrderError::from(boxed), OrderError::EmptyOrder);

        assert_eq!(
            OrderError::from(FrameworkError::AlreadySeeded),
            OrderError::AlreadyInitialized
        );
        assert!(matches!(
            OrderError::from(FrameworkError::ActorClosed),
            OrderError::ActorCommunicationError(_)
        ));
    }
}
