//! # Domain Types
//!
//! Core domain types used throughout Botica POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      Sale       │   │  SaleLineItem   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  name           │   │  receipt_type   │   │  sale_id (FK)   │       │
//! │  │  quantity       │   │  payment_type   │   │  product_id     │       │
//! │  │  price_cents    │   │  total_cents    │   │  total_cents    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌────────────────┐        │
//! │  │    Customer     │   │   ReceiptType   │   │  PaymentType   │        │
//! │  │    Branch       │   │  ─────────────  │   │  ────────────  │        │
//! │  │  (read-only     │   │  Boleta  'B'    │   │  Efectivo 'E'  │        │
//! │  │   references)   │   │  Factura 'F'    │   │  Yape     'Y'  │        │
//! │  │                 │   │  Ticket  'T'    │   │  Tarjeta  'P'  │        │
//! │  └─────────────────┘   └─────────────────┘   └────────────────┘        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership Model
//! - A `Sale` owns its `SaleLineItem`s exclusively (cascade on delete).
//! - A line item references a `Product` without owning it.
//! - `Customer` and `Branch` are optional, read-only references on a sale.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Receipt Type
// =============================================================================

/// The kind of fiscal document issued for a sale.
///
/// Stored and transmitted as its one-letter code: `B`, `F`, or `T`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
pub enum ReceiptType {
    /// Boleta de venta.
    #[serde(rename = "B")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "B"))]
    Boleta,
    /// Factura.
    #[serde(rename = "F")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "F"))]
    Factura,
    /// Ticket interno.
    #[serde(rename = "T")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "T"))]
    Ticket,
}

impl ReceiptType {
    /// Returns the one-letter wire/storage code.
    pub const fn code(&self) -> &'static str {
        match self {
            ReceiptType::Boleta => "B",
            ReceiptType::Factura => "F",
            ReceiptType::Ticket => "T",
        }
    }

    /// Parses a one-letter code. Returns `None` for unknown codes.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "B" => Some(ReceiptType::Boleta),
            "F" => Some(ReceiptType::Factura),
            "T" => Some(ReceiptType::Ticket),
            _ => None,
        }
    }
}

// =============================================================================
// Payment Type
// =============================================================================

/// How the customer paid.
///
/// Stored and transmitted as its one-letter code: `E`, `Y`, or `P`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
pub enum PaymentType {
    /// Efectivo (cash).
    #[serde(rename = "E")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "E"))]
    Efectivo,
    /// Yape / credit transfer.
    #[serde(rename = "Y")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "Y"))]
    Yape,
    /// Tarjeta / other card terminal.
    #[serde(rename = "P")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "P"))]
    Tarjeta,
}

impl PaymentType {
    /// Returns the one-letter wire/storage code.
    pub const fn code(&self) -> &'static str {
        match self {
            PaymentType::Efectivo => "E",
            PaymentType::Yape => "Y",
            PaymentType::Tarjeta => "P",
        }
    }

    /// Parses a one-letter code. Returns `None` for unknown codes.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "E" => Some(PaymentType::Efectivo),
            "Y" => Some(PaymentType::Yape),
            "P" => Some(PaymentType::Tarjeta),
            _ => None,
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
///
/// `quantity` is the authoritative stock counter. Checkout decrements it
/// with a conditional write; it can never be observed below zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown on error messages and receipts.
    pub name: String,

    /// Current stock level (non-negative).
    pub quantity: i64,

    /// Reference unit price in cents. Line prices arrive pre-computed on
    /// the request; this field is catalog metadata, not checkout input.
    pub price_cents: i64,

    /// When the product was created.
    pub created_at: DateTime<Utc>,

    /// When the product was last updated (stock changes included).
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the reference price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Advisory stock check: does current stock cover `requested` units?
    ///
    /// This answers the fail-fast validation question only. The
    /// authoritative answer is the conditional decrement inside the
    /// checkout transaction, which re-checks at commit time.
    #[inline]
    pub fn covers(&self, requested: i64) -> bool {
        self.quantity >= requested
    }
}

// =============================================================================
// Customer / Branch
// =============================================================================

/// A customer (client) that a sale can optionally reference.
/// Read-only to the checkout core.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Customer {
    pub id: String,
    pub name: String,
    /// Fiscal document number (DNI/RUC), if registered.
    pub document: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A branch (sucursal) that a sale can optionally reference.
/// Read-only to the checkout core.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Branch {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Sale
// =============================================================================

/// A persisted sale. Created exactly once by the checkout coordinator,
/// never mutated or deleted by this core afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    pub id: String,
    /// Business date of the sale: caller-supplied, or the commit time.
    pub date: DateTime<Utc>,
    /// The acting employee, resolved by the caller's session layer.
    /// Always explicit: absence is `None`, never ambient state.
    pub employee_id: Option<String>,
    pub receipt_type: ReceiptType,
    pub payment_type: PaymentType,
    /// Derived total in cents: the exact sum of line item totals.
    pub total_cents: i64,
    pub customer_id: Option<String>,
    pub branch_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Sale {
    /// Returns the sale total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Sale Line Item
// =============================================================================

/// One product entry within a sale.
///
/// All monetary fields are caller-supplied ground truth; the core sums
/// them but does not recompute price × quantity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleLineItem {
    pub id: String,
    /// Owning sale. A line item belongs to exactly one sale.
    pub sale_id: String,
    pub product_id: String,
    /// Units sold (always > 0).
    pub quantity: i64,
    /// Unit price in cents at time of sale.
    pub price_cents: i64,
    /// Pre-tax/pre-discount basis in cents, as supplied by the caller.
    pub subtotal_cents: i64,
    /// Final line amount in cents, as supplied by the caller.
    pub total_cents: i64,
    /// Optional free-text note for this line.
    pub observation: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl SaleLineItem {
    /// Returns the unit price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Returns the line subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }

    /// Returns the line total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_type_codes() {
        assert_eq!(ReceiptType::Boleta.code(), "B");
        assert_eq!(ReceiptType::Factura.code(), "F");
        assert_eq!(ReceiptType::Ticket.code(), "T");

        assert_eq!(ReceiptType::from_code("F"), Some(ReceiptType::Factura));
        assert_eq!(ReceiptType::from_code("X"), None);
    }

    #[test]
    fn test_payment_type_codes() {
        assert_eq!(PaymentType::Efectivo.code(), "E");
        assert_eq!(PaymentType::Yape.code(), "Y");
        assert_eq!(PaymentType::Tarjeta.code(), "P");

        assert_eq!(PaymentType::from_code("E"), Some(PaymentType::Efectivo));
        assert_eq!(PaymentType::from_code("Z"), None);
    }

    #[test]
    fn test_enum_serde_uses_codes() {
        assert_eq!(
            serde_json::to_string(&ReceiptType::Boleta).unwrap(),
            "\"B\""
        );
        let parsed: PaymentType = serde_json::from_str("\"Y\"").unwrap();
        assert_eq!(parsed, PaymentType::Yape);
    }

    #[test]
    fn test_product_covers() {
        let now = Utc::now();
        let product = Product {
            id: "p-1".to_string(),
            name: "Paracetamol 500mg".to_string(),
            quantity: 20,
            price_cents: 3000,
            created_at: now,
            updated_at: now,
        };

        assert!(product.covers(20));
        assert!(product.covers(1));
        assert!(!product.covers(21));
    }
}
