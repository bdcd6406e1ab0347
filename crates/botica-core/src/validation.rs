//! # Line Item Validation & Aggregation
//!
//! The pure half of checkout: per-line validation rules and the sale
//! total aggregator. The checkout coordinator in botica-db resolves
//! products (I/O) and calls into this module for every decision.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │               Fail-Fast Validation (request order)                      │
//! │                                                                         │
//! │  for each requested line, IN ORDER:                                     │
//! │       │                                                                 │
//! │       ├── product resolved?      ──no──► ProductNotFound  ── STOP       │
//! │       ├── quantity > 0?          ──no──► InvalidQuantity  ── STOP       │
//! │       ├── amounts >= 0?          ──no──► NegativeAmount   ── STOP       │
//! │       ├── stock covers quantity? ──no──► InsufficientStock ─ STOP       │
//! │       └── accept into the plan                                          │
//! │                                                                         │
//! │  Exactly one error per failed attempt - later problems in the          │
//! │  request are never reported alongside the first one.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The stock check here is ADVISORY: it exists to give the cashier a
//! precise message before any write happens. The authoritative check is
//! the conditional decrement inside the checkout transaction.

use crate::error::{SaleError, SaleResult};
use crate::money::Money;
use crate::request::LineItemRequest;
use crate::types::Product;

// =============================================================================
// Line Plan
// =============================================================================

/// A validated line item paired with its resolved product.
///
/// The in-memory, not-yet-persisted outcome of validation. Plans are
/// kept in request order and committed together as one atomic unit.
#[derive(Debug, Clone)]
pub struct LinePlan {
    pub product: Product,
    pub request: LineItemRequest,
}

impl LinePlan {
    /// The caller-supplied final amount for this line.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.request.total_cents)
    }
}

// =============================================================================
// Validator
// =============================================================================

/// Validates one requested line against its resolved product and, on
/// success, accepts it into the plan.
///
/// ## Rules (in check order)
/// 1. `quantity` must be a positive integer
/// 2. `price`, `subtotal`, and `total` must be non-negative
/// 3. current stock must cover the requested quantity (advisory)
pub fn validate_line(request: &LineItemRequest, product: Product) -> SaleResult<LinePlan> {
    if request.quantity <= 0 {
        return Err(SaleError::InvalidQuantity {
            product_id: request.product_id.clone(),
            quantity: request.quantity,
        });
    }

    if request.price_cents < 0 || request.subtotal_cents < 0 || request.total_cents < 0 {
        return Err(SaleError::NegativeAmount {
            product_id: request.product_id.clone(),
        });
    }

    if !product.covers(request.quantity) {
        return Err(SaleError::InsufficientStock {
            name: product.name.clone(),
            available: product.quantity,
            requested: request.quantity,
        });
    }

    Ok(LinePlan {
        product,
        request: request.clone(),
    })
}

// =============================================================================
// Aggregator
// =============================================================================

/// Sums the validated line totals into the sale total.
///
/// Exact integer-cents addition: no binary floating point, no rounding
/// drift regardless of how many lines the sale carries. The result is
/// always derived here - callers never supply a sale total directly.
pub fn order_total(plans: &[LinePlan]) -> Money {
    plans.iter().map(LinePlan::line_total).sum()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn product(name: &str, stock: i64) -> Product {
        let now = Utc::now();
        Product {
            id: format!("prod-{}", name.to_lowercase()),
            name: name.to_string(),
            quantity: stock,
            price_cents: 3000,
            created_at: now,
            updated_at: now,
        }
    }

    fn line(product_id: &str, quantity: i64, total_cents: i64) -> LineItemRequest {
        LineItemRequest {
            product_id: product_id.to_string(),
            quantity,
            price_cents: 3000,
            subtotal_cents: total_cents,
            total_cents,
            observation: None,
        }
    }

    #[test]
    fn test_valid_line_is_accepted() {
        let plan = validate_line(&line("prod-bismutol", 20, 60_000), product("Bismutol", 20));
        assert!(plan.is_ok());
        assert_eq!(plan.unwrap().line_total().cents(), 60_000);
    }

    #[test]
    fn test_zero_and_negative_quantity_rejected() {
        for qty in [0, -3] {
            let err = validate_line(&line("prod-x", qty, 1000), product("X", 10)).unwrap_err();
            assert!(matches!(err, SaleError::InvalidQuantity { quantity, .. } if quantity == qty));
        }
    }

    #[test]
    fn test_negative_amounts_rejected() {
        let mut bad = line("prod-x", 1, 1000);
        bad.price_cents = -1;
        let err = validate_line(&bad, product("X", 10)).unwrap_err();
        assert!(matches!(err, SaleError::NegativeAmount { .. }));
    }

    #[test]
    fn test_insufficient_stock_reports_name_and_counts() {
        let err = validate_line(&line("prod-bismutol", 5, 1000), product("Bismutol", 3))
            .unwrap_err();
        assert_eq!(
            err.message(),
            "Stock insuficiente para el producto 'Bismutol'. Disponible: 3, Solicitado: 5"
        );
    }

    #[test]
    fn test_quantity_checked_before_amounts() {
        // Several rules broken at once: the first rule in check order wins.
        let mut bad = line("prod-x", 0, 1000);
        bad.total_cents = -50;
        let err = validate_line(&bad, product("X", 10)).unwrap_err();
        assert!(matches!(err, SaleError::InvalidQuantity { .. }));
    }

    #[test]
    fn test_order_total_sums_exactly() {
        // The 640.00 scenario: 600.00 + 40.00.
        let plans = vec![
            validate_line(&line("prod-bismutol", 20, 60_000), product("Bismutol", 50)).unwrap(),
            validate_line(&line("prod-paracetamol", 2, 4_000), product("Paracetamol", 10)).unwrap(),
        ];
        assert_eq!(order_total(&plans), Money::from_cents(64_000));
    }

    #[test]
    fn test_order_total_of_empty_plan_is_zero() {
        assert_eq!(order_total(&[]), Money::zero());
    }
}
