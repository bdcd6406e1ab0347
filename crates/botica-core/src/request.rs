//! # Request & Payload Types
//!
//! The typed boundary of the checkout core.
//!
//! The transport layer (GraphQL/REST, out of scope here) deserializes
//! incoming mutations into [`CreateSaleRequest`] and renders
//! [`CreateSalePayload`] back out. Every optional field is declared and
//! defaulted here, at the boundary - nothing downstream probes for
//! maybe-present fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SaleError;
use crate::types::{PaymentType, ReceiptType, Sale};

// =============================================================================
// Request
// =============================================================================

/// One requested line item, exactly as the caller submitted it.
///
/// Prices arrive pre-computed: `price_cents`, `subtotal_cents`, and
/// `total_cents` are caller-supplied ground truth for the line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemRequest {
    pub product_id: String,
    pub quantity: i64,
    pub price_cents: i64,
    pub subtotal_cents: i64,
    pub total_cents: i64,
    #[serde(default)]
    pub observation: Option<String>,
}

/// A sale-creation request.
///
/// The acting employee is NOT part of the request body: the session
/// layer resolves it and passes it to the coordinator as an explicit
/// `Option<&str>` parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSaleRequest {
    /// Optional customer reference. `None` is a valid anonymous sale.
    #[serde(default)]
    pub customer_id: Option<String>,

    /// Optional branch reference.
    #[serde(default)]
    pub branch_id: Option<String>,

    pub receipt_type: ReceiptType,
    pub payment_type: PaymentType,

    /// Business date. Defaults to commit time when omitted.
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,

    /// Requested line items, in the order they must be validated and
    /// persisted.
    pub line_items: Vec<LineItemRequest>,
}

// =============================================================================
// Payload
// =============================================================================

/// A single human-readable error entry in the payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub message: String,
}

/// The result of a sale-creation attempt.
///
/// Mirrors the mutation payload shape: on success `sale` is populated
/// and `errors` is `None`; on failure `sale` is `None` and `errors`
/// holds exactly one message (fail-fast policy).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSalePayload {
    pub sale: Option<Sale>,
    pub success: bool,
    pub errors: Option<Vec<ErrorMessage>>,
}

impl CreateSalePayload {
    /// Builds the success payload around the persisted sale.
    pub fn success(sale: Sale) -> Self {
        CreateSalePayload {
            sale: Some(sale),
            success: true,
            errors: None,
        }
    }

    /// Builds the failure payload from the (single) error encountered.
    pub fn failure(error: &SaleError) -> Self {
        CreateSalePayload {
            sale: None,
            success: false,
            errors: Some(vec![ErrorMessage {
                message: error.message(),
            }]),
        }
    }

    /// Returns the first (and only) error message, if any.
    pub fn first_error(&self) -> Option<&str> {
        self.errors
            .as_deref()
            .and_then(|errs| errs.first())
            .map(|e| e.message.as_str())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_deserializes_with_optional_fields_absent() {
        let json = r#"{
            "receiptType": "B",
            "paymentType": "E",
            "lineItems": [
                {
                    "productId": "p-10",
                    "quantity": 20,
                    "priceCents": 3000,
                    "subtotalCents": 50847,
                    "totalCents": 60000
                }
            ]
        }"#;

        let request: CreateSaleRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.customer_id, None);
        assert_eq!(request.branch_id, None);
        assert_eq!(request.date, None);
        assert_eq!(request.line_items.len(), 1);
        assert_eq!(request.line_items[0].observation, None);
        assert_eq!(request.line_items[0].total_cents, 60_000);
    }

    #[test]
    fn test_failure_payload_carries_one_message() {
        let payload = CreateSalePayload::failure(&SaleError::EmptyOrder);
        assert!(!payload.success);
        assert!(payload.sale.is_none());
        assert_eq!(
            payload.first_error(),
            Some("Debe incluir al menos un producto")
        );
        assert_eq!(payload.errors.as_ref().map(Vec::len), Some(1));
    }
}
