//! # Repository Module
//!
//! Database repository implementations for Botica POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  Checkout coordinator                                                   │
//! │       │                                                                 │
//! │       │  db.products().get_by_id(id)                                    │
//! │       ▼                                                                 │
//! │  ProductRepository                                                      │
//! │  ├── get_by_id(&self, id)          ← pooled reads                       │
//! │  └── reserve_stock(conn, id, qty)  ← transaction-scoped write           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database                                                        │
//! │                                                                         │
//! │  Methods that must participate in the checkout transaction take an      │
//! │  explicit `&mut SqliteConnection` instead of using the pool, so the     │
//! │  coordinator decides what commits together.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`product::ProductRepository`] - Catalog lookup and the conditional
//!   stock decrement
//! - [`customer::CustomerRepository`] / [`branch::BranchRepository`] -
//!   Read-only reference resolution
//! - [`sale::SaleRepository`] - Sale/line-item rows and read accessors

pub mod branch;
pub mod customer;
pub mod product;
pub mod sale;
