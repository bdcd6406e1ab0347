//! # botica-db: Storage Layer for Botica POS
//!
//! This crate provides database access for the Botica POS backend.
//! It uses SQLite for local storage with sqlx for async operations, and
//! hosts the checkout coordinator: the sale-creation transaction.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Botica POS Data Flow                              │
//! │                                                                         │
//! │  Transport layer (CreateSaleRequest from botica-core)                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     botica-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐   ┌────────────────┐   ┌───────────────┐  │   │
//! │  │   │   Database    │   │  Repositories  │   │   Checkout    │  │   │
//! │  │   │   (pool.rs)   │   │ (product.rs,   │   │ (checkout.rs) │  │   │
//! │  │   │               │   │  customer.rs,  │   │               │  │   │
//! │  │   │ SqlitePool    │◄──│  branch.rs,    │◄──│ the one       │  │   │
//! │  │   │ Migrations    │   │  sale.rs)      │   │ atomic unit   │  │   │
//! │  │   └───────────────┘   └────────────────┘   └───────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database (WAL)                       │   │
//! │  │   products / customers / branches / sales / sale_items          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (product, customer, branch, sale)
//! - [`checkout`] - The sale-creation coordinator
//!
//! ## Usage
//!
//! ```rust,ignore
//! use botica_db::{Database, DbConfig};
//!
//! // Create database with default config (migrations run on connect)
//! let db = Database::new(DbConfig::new("path/to/botica.db")).await?;
//!
//! // Lookups
//! let product = db.products().get_by_id("uuid-here").await?;
//!
//! // Create a sale atomically
//! let payload = db.checkout().create_sale(request, Some("emp-01")).await;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use checkout::CheckoutCoordinator;
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::branch::BranchRepository;
pub use repository::customer::CustomerRepository;
pub use repository::product::ProductRepository;
pub use repository::sale::SaleRepository;
