//! # Error Types
//!
//! The sale-creation error taxonomy for botica-core.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Error Propagation                                 │
//! │                                                                         │
//! │  Validation / repositories fail with a SaleError variant                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Checkout coordinator recovers it LOCALLY and builds                    │
//! │  CreateSalePayload { success: false, errors: [{ message }] }            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Transport layer renders the message verbatim to the user               │
//! │                                                                         │
//! │  SaleError variants are NEVER thrown past the coordinator.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Display strings ARE the user-facing messages, in Spanish, and they
//!    identify the offending entity by id or name
//! 3. Exactly one error per failed attempt (fail-fast, not collect-all)
//! 4. `Persistence` carries diagnostic detail for operator logs but
//!    displays only a generic message

use thiserror::Error;

// =============================================================================
// Sale Error
// =============================================================================

/// Everything that can go wrong while creating a sale.
#[derive(Debug, Error)]
pub enum SaleError {
    /// The request carried no line items. Checked before any lookup.
    #[error("Debe incluir al menos un producto")]
    EmptyOrder,

    /// A customer id was supplied but does not resolve.
    #[error("Cliente '{0}' no encontrado")]
    CustomerNotFound(String),

    /// A branch id was supplied but does not resolve.
    #[error("Sucursal '{0}' no encontrada")]
    BranchNotFound(String),

    /// A line item references a product id that does not resolve.
    #[error("Producto '{0}' no encontrado")]
    ProductNotFound(String),

    /// Advisory stock check failed during validation.
    ///
    /// Identifies the product by NAME (not id) so the cashier sees what
    /// ran out, together with the available/requested counts.
    #[error(
        "Stock insuficiente para el producto '{name}'. \
         Disponible: {available}, Solicitado: {requested}"
    )]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// A line item quantity is zero or negative.
    #[error("La cantidad del producto '{product_id}' debe ser mayor a cero")]
    InvalidQuantity { product_id: String, quantity: i64 },

    /// A line item carries a negative price, subtotal, or total.
    #[error("Los montos del producto '{product_id}' no pueden ser negativos")]
    NegativeAmount { product_id: String },

    /// The conditional stock decrement lost a race at commit time: a
    /// concurrent sale consumed the stock between validation and commit.
    /// The whole transaction was rolled back; the caller may retry.
    #[error(
        "Stock insuficiente para el producto '{name}'. \
         La venta fue cancelada, intente nuevamente"
    )]
    TransactionConflict { name: String },

    /// Unexpected storage failure. The detail goes to operator logs;
    /// callers only ever see this generic message.
    #[error("No se pudo registrar la venta. Intente nuevamente")]
    Persistence(String),
}

impl SaleError {
    /// The user-facing message for this error (always exactly one).
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Convenience type alias for Results with SaleError.
pub type SaleResult<T> = Result<T, SaleError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_order_message() {
        assert_eq!(
            SaleError::EmptyOrder.message(),
            "Debe incluir al menos un producto"
        );
    }

    #[test]
    fn test_not_found_messages_identify_entity() {
        assert_eq!(
            SaleError::CustomerNotFound("c-99".to_string()).message(),
            "Cliente 'c-99' no encontrado"
        );
        assert_eq!(
            SaleError::BranchNotFound("s-07".to_string()).message(),
            "Sucursal 's-07' no encontrada"
        );
        assert_eq!(
            SaleError::ProductNotFound("p-10".to_string()).message(),
            "Producto 'p-10' no encontrado"
        );
    }

    #[test]
    fn test_insufficient_stock_message() {
        let err = SaleError::InsufficientStock {
            name: "Bismutol".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.message(),
            "Stock insuficiente para el producto 'Bismutol'. Disponible: 3, Solicitado: 5"
        );
    }

    #[test]
    fn test_persistence_message_is_generic() {
        let err = SaleError::Persistence("disk I/O error at offset 4096".to_string());
        assert_eq!(err.message(), "No se pudo registrar la venta. Intente nuevamente");
        // The detail stays available for logs.
        assert!(format!("{:?}", err).contains("disk I/O error"));
    }
}
