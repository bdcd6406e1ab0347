//! # botica-core: Pure Business Logic for Botica POS
//!
//! This crate is the **heart** of the sale-creation core. It contains
//! all business decisions as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Botica POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │            Transport layer (GraphQL/REST, external)             │   │
//! │  │     deserializes CreateSaleRequest, resolves the session        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ botica-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌────────────┐  │   │
//! │  │   │   types   │  │   money   │  │ validation│  │   error    │  │   │
//! │  │   │  Product  │  │   Money   │  │ LinePlan  │  │ SaleError  │  │   │
//! │  │   │   Sale    │  │  (cents)  │  │ aggregator│  │ (Spanish)  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO AMBIENT STATE • PURE FUNCTIONS      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  botica-db (Database Layer)                     │   │
//! │  │      repositories + the atomic checkout transaction             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Sale, SaleLineItem, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`request`] - Typed request/payload boundary
//! - [`validation`] - Fail-fast line validation and total aggregation
//! - [`error`] - The sale error taxonomy (user-facing Spanish messages)
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64)
//! 4. **Explicit Identity**: The acting employee is a parameter, never
//!    read from ambient session state

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod request;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use botica_core::Money` instead of
// `use botica_core::money::Money`

pub use error::{SaleError, SaleResult};
pub use money::Money;
pub use request::{CreateSalePayload, CreateSaleRequest, ErrorMessage, LineItemRequest};
pub use types::*;
pub use validation::{order_total, validate_line, LinePlan};
