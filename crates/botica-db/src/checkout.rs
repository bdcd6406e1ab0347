//! # Checkout Coordinator
//!
//! The sale-creation transaction: the one atomic unit in the system.
//!
//! ## Control Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    create_sale(request, employee)                       │
//! │                                                                         │
//! │  Phase 1: VALIDATION (reads only, abort = no writes at all)             │
//! │     1. line_items empty?            → EmptyOrder (cheapest check first) │
//! │     2. customer id resolves?        → CustomerNotFound                  │
//! │     3. branch id resolves?          → BranchNotFound                    │
//! │     4. each line, in request order  → ProductNotFound /                 │
//! │        (fail-fast)                    InvalidQuantity /                 │
//! │                                       NegativeAmount /                  │
//! │                                       InsufficientStock                 │
//! │     5. total = Σ line totals (exact integer cents)                      │
//! │                                                                         │
//! │  Phase 2: COMMIT (one sqlx transaction)                                 │
//! │     BEGIN                                                               │
//! │       INSERT sale header (1 row)                                        │
//! │       for each plan, in request order:                                  │
//! │           INSERT sale item                                              │
//! │           UPDATE products SET quantity = quantity - ?                   │
//! │                  WHERE id = ? AND quantity >= ?                         │
//! │           rows_affected = 0? → ROLLBACK → TransactionConflict           │
//! │     COMMIT                                                              │
//! │                                                                         │
//! │  Afterward, always: one sale row + N item rows + decremented stock,     │
//! │  or nothing at all. No other reader ever observes a partial state.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Error Discipline
//! Every failure is recovered HERE and returned as a payload with
//! `success = false` and exactly one message. Storage failures log their
//! full detail for operators but surface only a generic message.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, error, info};

use crate::error::DbError;
use crate::repository::branch::BranchRepository;
use crate::repository::customer::CustomerRepository;
use crate::repository::product::ProductRepository;
use crate::repository::sale::{generate_line_item_id, generate_sale_id, SaleRepository};
use botica_core::{
    order_total, validate_line, CreateSalePayload, CreateSaleRequest, LinePlan, Sale,
    SaleError, SaleLineItem, SaleResult,
};

/// Coordinates the sale-creation transaction.
///
/// This is the only component that creates Sale/SaleLineItem rows and
/// the only one that mutates product stock.
#[derive(Debug, Clone)]
pub struct CheckoutCoordinator {
    pool: SqlitePool,
}

impl CheckoutCoordinator {
    /// Creates a new CheckoutCoordinator.
    pub fn new(pool: SqlitePool) -> Self {
        CheckoutCoordinator { pool }
    }

    /// Creates a sale from a validated request, atomically.
    ///
    /// ## Arguments
    /// * `request` - The typed sale-creation request
    /// * `employee_id` - The acting employee, already resolved by the
    ///   session layer. Explicitly optional: `None` means no employee,
    ///   never a suppressed lookup failure.
    ///
    /// ## Returns
    /// The mutation payload. Never panics, never propagates an error:
    /// every failure becomes `success = false` with one message.
    pub async fn create_sale(
        &self,
        request: CreateSaleRequest,
        employee_id: Option<&str>,
    ) -> CreateSalePayload {
        match self.try_create(request, employee_id).await {
            Ok(sale) => {
                info!(
                    sale_id = %sale.id,
                    total = %sale.total(),
                    "Sale created"
                );
                CreateSalePayload::success(sale)
            }
            Err(err) => {
                match &err {
                    // Operators get the full storage diagnostic; the
                    // caller only sees the generic message.
                    SaleError::Persistence(detail) => {
                        error!(detail = %detail, "Sale creation failed with storage error");
                    }
                    other => {
                        debug!(reason = %other, "Sale creation rejected");
                    }
                }
                CreateSalePayload::failure(&err)
            }
        }
    }

    /// The fallible body of [`create_sale`]. Separated so `?` can be
    /// used freely; the public method turns the result into a payload.
    async fn try_create(
        &self,
        request: CreateSaleRequest,
        employee_id: Option<&str>,
    ) -> SaleResult<Sale> {
        // 1. Cheapest check first: no lookups for an empty order.
        if request.line_items.is_empty() {
            return Err(SaleError::EmptyOrder);
        }

        let customers = CustomerRepository::new(self.pool.clone());
        let branches = BranchRepository::new(self.pool.clone());
        let products = ProductRepository::new(self.pool.clone());

        // 2. Resolve the customer reference, if one was given.
        if let Some(id) = request.customer_id.as_deref() {
            customers
                .get_by_id(id)
                .await
                .map_err(persistence)?
                .ok_or_else(|| SaleError::CustomerNotFound(id.to_string()))?;
        }

        // 3. Resolve the branch reference, if one was given.
        if let Some(id) = request.branch_id.as_deref() {
            branches
                .get_by_id(id)
                .await
                .map_err(persistence)?
                .ok_or_else(|| SaleError::BranchNotFound(id.to_string()))?;
        }

        // 4. Validate every line in request order, stopping at the
        //    first failure. The stock check here is advisory; the
        //    decrement below re-checks authoritatively.
        let mut plans: Vec<LinePlan> = Vec::with_capacity(request.line_items.len());
        for line in &request.line_items {
            let product = products
                .get_by_id(&line.product_id)
                .await
                .map_err(persistence)?
                .ok_or_else(|| SaleError::ProductNotFound(line.product_id.clone()))?;

            plans.push(validate_line(line, product)?);
        }

        // 5. The sale total is derived, never caller-supplied.
        let total = order_total(&plans);

        // 6. The atomic unit: sale header, all line items, all stock
        //    decrements, committed together or not at all.
        let now = Utc::now();
        let sale = Sale {
            id: generate_sale_id(),
            date: request.date.unwrap_or(now),
            employee_id: employee_id.map(str::to_string),
            receipt_type: request.receipt_type,
            payment_type: request.payment_type,
            total_cents: total.cents(),
            customer_id: request.customer_id.clone(),
            branch_id: request.branch_id.clone(),
            created_at: now,
        };

        let mut tx = self.pool.begin().await.map_err(tx_failed)?;

        SaleRepository::insert_sale(&mut tx, &sale)
            .await
            .map_err(persistence)?;

        for plan in &plans {
            let item = SaleLineItem {
                id: generate_line_item_id(),
                sale_id: sale.id.clone(),
                product_id: plan.product.id.clone(),
                quantity: plan.request.quantity,
                price_cents: plan.request.price_cents,
                subtotal_cents: plan.request.subtotal_cents,
                total_cents: plan.request.total_cents,
                observation: plan.request.observation.clone(),
                created_at: now,
            };

            SaleRepository::insert_item(&mut tx, &item)
                .await
                .map_err(persistence)?;

            // Reservation and decrement are the same conditional write.
            // rows_affected = 0 means a concurrent sale consumed the
            // stock after our advisory check.
            let reserved =
                ProductRepository::reserve_stock(&mut tx, &plan.product.id, plan.request.quantity)
                    .await
                    .map_err(persistence)?;

            if !reserved {
                // Dropping the transaction rolls back the sale header,
                // every item, and every decrement of this unit.
                return Err(SaleError::TransactionConflict {
                    name: plan.product.name.clone(),
                });
            }
        }

        tx.commit().await.map_err(tx_failed)?;

        Ok(sale)
    }
}

/// Maps a storage error to the recoverable Persistence variant,
/// preserving the diagnostic detail for the coordinator's log line.
fn persistence(err: DbError) -> SaleError {
    SaleError::Persistence(err.to_string())
}

fn tx_failed(err: sqlx::Error) -> SaleError {
    SaleError::Persistence(DbError::TransactionFailed(err.to_string()).to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::branch::generate_branch_id;
    use crate::repository::customer::generate_customer_id;
    use crate::repository::product::generate_product_id;
    use botica_core::{Customer, LineItemRequest, PaymentType, Product, ReceiptType};
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn seed_product(db: &Database, name: &str, stock: i64) -> String {
        let now = Utc::now();
        let product = Product {
            id: generate_product_id(),
            name: name.to_string(),
            quantity: stock,
            price_cents: 3000,
            created_at: now,
            updated_at: now,
        };
        db.products().insert(&product).await.unwrap();
        product.id
    }

    async fn seed_customer(db: &Database, name: &str) -> String {
        let customer = Customer {
            id: generate_customer_id(),
            name: name.to_string(),
            document: None,
            created_at: Utc::now(),
        };
        db.customers().insert(&customer).await.unwrap();
        customer.id
    }

    async fn seed_branch(db: &Database, name: &str) -> String {
        let branch = botica_core::Branch {
            id: generate_branch_id(),
            name: name.to_string(),
            created_at: Utc::now(),
        };
        db.branches().insert(&branch).await.unwrap();
        branch.id
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

    fn request(line_items: Vec<LineItemRequest>) -> CreateSaleRequest {
        CreateSaleRequest {
            customer_id: None,
            branch_id: None,
            receipt_type: ReceiptType::Boleta,
            payment_type: PaymentType::Efectivo,
            date: None,
            line_items,
        }
    }

    async fn stock_of(db: &Database, product_id: &str) -> i64 {
        db.products()
            .get_by_id(product_id)
            .await
            .unwrap()
            .unwrap()
            .quantity
    }

    async fn assert_no_writes(db: &Database) {
        assert_eq!(db.sales().count().await.unwrap(), 0);
        assert_eq!(db.sales().count_items().await.unwrap(), 0);
    }

    // -------------------------------------------------------------------------
    // Success path
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_two_item_sale_totals_and_stock() {
        // The 640.00 scenario: (qty 20, 600.00) + (qty 2, 40.00).
        let db = test_db().await;
        let bismutol = seed_product(&db, "Bismutol", 50).await;
        let paracetamol = seed_product(&db, "Paracetamol", 10).await;

        let payload = db
            .checkout()
            .create_sale(
                request(vec![
                    line(&bismutol, 20, 60_000),
                    line(&paracetamol, 2, 4_000),
                ]),
                Some("emp-01"),
            )
            .await;

        assert!(payload.success, "{:?}", payload.errors);
        let sale = payload.sale.unwrap();
        assert_eq!(sale.total_cents, 64_000);
        assert_eq!(sale.employee_id.as_deref(), Some("emp-01"));

        // One sale row, two item rows, all owned by the same sale.
        assert_eq!(db.sales().count().await.unwrap(), 1);
        let items = db.sales().get_items(&sale.id).await.unwrap();
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|i| i.sale_id == sale.id));

        // Items persisted in request order.
        assert_eq!(items[0].product_id, bismutol);
        assert_eq!(items[1].product_id, paracetamol);

        // Sale total equals the exact sum of line totals.
        let sum: i64 = items.iter().map(|i| i.total_cents).sum();
        assert_eq!(sale.total_cents, sum);

        // Stock decreased by exactly the requested quantities.
        assert_eq!(stock_of(&db, &bismutol).await, 30);
        assert_eq!(stock_of(&db, &paracetamol).await, 8);
    }

    #[tokio::test]
    async fn test_resolved_references_are_recorded() {
        let db = test_db().await;
        let product = seed_product(&db, "Ibuprofeno", 5).await;
        let customer = seed_customer(&db, "María Quispe").await;
        let branch = seed_branch(&db, "Sucursal Centro").await;

        let mut req = request(vec![line(&product, 1, 1_500)]);
        req.customer_id = Some(customer.clone());
        req.branch_id = Some(branch.clone());
        req.receipt_type = ReceiptType::Factura;
        req.payment_type = PaymentType::Yape;

        let payload = db.checkout().create_sale(req, None).await;
        assert!(payload.success, "{:?}", payload.errors);

        let sale = db
            .sales()
            .get_by_id(&payload.sale.unwrap().id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(sale.customer_id.as_deref(), Some(customer.as_str()));
        assert_eq!(sale.branch_id.as_deref(), Some(branch.as_str()));
        assert_eq!(sale.receipt_type, ReceiptType::Factura);
        assert_eq!(sale.payment_type, PaymentType::Yape);
        assert_eq!(sale.employee_id, None);
    }

    #[tokio::test]
    async fn test_caller_supplied_date_is_kept() {
        let db = test_db().await;
        let product = seed_product(&db, "Amoxicilina", 3).await;

        let date = Utc.with_ymd_and_hms(2024, 12, 15, 10, 30, 0).unwrap();
        let mut req = request(vec![line(&product, 1, 2_000)]);
        req.date = Some(date);

        let payload = db.checkout().create_sale(req, None).await;
        assert!(payload.success);

        let sale = db
            .sales()
            .get_by_id(&payload.sale.unwrap().id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(sale.date, date);
    }

    #[tokio::test]
    async fn test_observation_is_persisted() {
        let db = test_db().await;
        let product = seed_product(&db, "Jarabe", 4).await;

        let mut item = line(&product, 1, 900);
        item.observation = Some("sin azúcar".to_string());

        let payload = db.checkout().create_sale(request(vec![item]), None).await;
        assert!(payload.success);

        let items = db
            .sales()
            .get_items(&payload.sale.unwrap().id)
            .await
            .unwrap();
        assert_eq!(items[0].observation.as_deref(), Some("sin azúcar"));
    }

    // -------------------------------------------------------------------------
    // Validation failures (always: exactly one message, zero writes)
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_empty_order_rejected_before_any_lookup() {
        let db = test_db().await;

        // Even a bogus customer id is never looked up for an empty order.
        let mut req = request(vec![]);
        req.customer_id = Some("no-such-customer".to_string());

        let payload = db.checkout().create_sale(req, None).await;
        assert!(!payload.success);
        assert_eq!(
            payload.first_error(),
            Some("Debe incluir al menos un producto")
        );
        assert_no_writes(&db).await;
    }

    #[tokio::test]
    async fn test_unknown_customer_aborts_with_no_writes() {
        let db = test_db().await;
        let product = seed_product(&db, "Bismutol", 50).await;

        let mut req = request(vec![line(&product, 1, 3_000)]);
        req.customer_id = Some("c-999".to_string());

        let payload = db.checkout().create_sale(req, None).await;
        assert!(!payload.success);
        assert_eq!(payload.first_error(), Some("Cliente 'c-999' no encontrado"));
        assert_no_writes(&db).await;
        assert_eq!(stock_of(&db, &product).await, 50);
    }

    #[tokio::test]
    async fn test_unknown_branch_aborts_with_no_writes() {
        let db = test_db().await;
        let product = seed_product(&db, "Bismutol", 50).await;

        let mut req = request(vec![line(&product, 1, 3_000)]);
        req.branch_id = Some("s-07".to_string());

        let payload = db.checkout().create_sale(req, None).await;
        assert!(!payload.success);
        assert_eq!(payload.first_error(), Some("Sucursal 's-07' no encontrada"));
        assert_no_writes(&db).await;
    }

    #[tokio::test]
    async fn test_unknown_product_aborts_with_no_writes() {
        let db = test_db().await;

        let payload = db
            .checkout()
            .create_sale(request(vec![line("p-ghost", 1, 1_000)]), None)
            .await;

        assert!(!payload.success);
        assert_eq!(
            payload.first_error(),
            Some("Producto 'p-ghost' no encontrado")
        );
        assert_no_writes(&db).await;
    }

    #[tokio::test]
    async fn test_insufficient_stock_message_names_the_product() {
        let db = test_db().await;
        let product = seed_product(&db, "Paracetamol", 3).await;

        let payload = db
            .checkout()
            .create_sale(request(vec![line(&product, 5, 10_000)]), None)
            .await;

        assert!(!payload.success);
        assert_eq!(
            payload.first_error(),
            Some("Stock insuficiente para el producto 'Paracetamol'. Disponible: 3, Solicitado: 5")
        );
        assert_no_writes(&db).await;
        assert_eq!(stock_of(&db, &product).await, 3);
    }

    #[tokio::test]
    async fn test_failing_second_item_leaves_first_product_untouched() {
        // Atomicity: a two-item request whose second item fails must not
        // decrement stock for the first item.
        let db = test_db().await;
        let ok_product = seed_product(&db, "Bismutol", 50).await;
        let scarce = seed_product(&db, "Paracetamol", 1).await;

        let payload = db
            .checkout()
            .create_sale(
                request(vec![line(&ok_product, 20, 60_000), line(&scarce, 5, 10_000)]),
                None,
            )
            .await;

        assert!(!payload.success);
        assert_no_writes(&db).await;
        assert_eq!(stock_of(&db, &ok_product).await, 50);
        assert_eq!(stock_of(&db, &scarce).await, 1);
    }

    #[tokio::test]
    async fn test_fail_fast_reports_only_the_first_problem() {
        // Both items are invalid; only the first one is reported.
        let db = test_db().await;
        let scarce = seed_product(&db, "Paracetamol", 1).await;

        let payload = db
            .checkout()
            .create_sale(
                request(vec![line("p-ghost", 1, 1_000), line(&scarce, 5, 10_000)]),
                None,
            )
            .await;

        assert!(!payload.success);
        assert_eq!(payload.errors.as_ref().map(Vec::len), Some(1));
        assert_eq!(
            payload.first_error(),
            Some("Producto 'p-ghost' no encontrado")
        );
    }

    #[tokio::test]
    async fn test_invalid_quantity_rejected() {
        let db = test_db().await;
        let product = seed_product(&db, "Bismutol", 50).await;

        let payload = db
            .checkout()
            .create_sale(request(vec![line(&product, 0, 0)]), None)
            .await;

        assert!(!payload.success);
        assert_eq!(
            payload.first_error(),
            Some(format!("La cantidad del producto '{}' debe ser mayor a cero", product).as_str())
        );
        assert_no_writes(&db).await;
    }

    // -------------------------------------------------------------------------
    // Stock reservation semantics
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_reserve_stock_is_conditional() {
        let db = test_db().await;
        let product = seed_product(&db, "Bismutol", 5).await;

        let mut conn = db.pool().acquire().await.unwrap();

        // First reservation covers: 5 - 3 = 2.
        assert!(ProductRepository::reserve_stock(&mut conn, &product, 3)
            .await
            .unwrap());
        // Second reservation of 3 cannot: stock stays at 2.
        assert!(!ProductRepository::reserve_stock(&mut conn, &product, 3)
            .await
            .unwrap());

        drop(conn);
        assert_eq!(stock_of(&db, &product).await, 2);
    }

    #[tokio::test]
    async fn test_concurrent_sales_for_last_unit_yield_one_success() {
        // Two checkouts race for the single remaining unit. Exactly one
        // may win; the loser fails with no partial writes.
        let path = std::env::temp_dir().join(format!("botica-test-{}.db", Uuid::new_v4()));
        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        let product = seed_product(&db, "Bismutol", 1).await;

        let db_a = db.clone();
        let db_b = db.clone();
        let product_a = product.clone();
        let product_b = product.clone();

        let a = tokio::spawn(async move {
            db_a.checkout()
                .create_sale(
                    CreateSaleRequest {
                        customer_id: None,
                        branch_id: None,
                        receipt_type: ReceiptType::Boleta,
                        payment_type: PaymentType::Efectivo,
                        date: None,
                        line_items: vec![LineItemRequest {
                            product_id: product_a,
                            quantity: 1,
                            price_cents: 3000,
                            subtotal_cents: 3000,
                            total_cents: 3000,
                            observation: None,
                        }],
                    },
                    None,
                )
                .await
        });
        let b = tokio::spawn(async move {
            db_b.checkout()
                .create_sale(
                    CreateSaleRequest {
                        customer_id: None,
                        branch_id: None,
                        receipt_type: ReceiptType::Boleta,
                        payment_type: PaymentType::Efectivo,
                        date: None,
                        line_items: vec![LineItemRequest {
                            product_id: product_b,
                            quantity: 1,
                            price_cents: 3000,
                            subtotal_cents: 3000,
                            total_cents: 3000,
                            observation: None,
                        }],
                    },
                    None,
                )
                .await
        });

        let (pa, pb) = (a.await.unwrap(), b.await.unwrap());
        let successes = [&pa, &pb].iter().filter(|p| p.success).count();
        assert_eq!(successes, 1, "exactly one sale may consume the last unit");

        // The winner's writes are all present; the loser left nothing.
        assert_eq!(db.sales().count().await.unwrap(), 1);
        assert_eq!(db.sales().count_items().await.unwrap(), 1);
        assert_eq!(stock_of(&db, &product).await, 0);

        db.close().await;
        for suffix in ["", "-wal", "-shm"] {
            let mut f = path.clone().into_os_string();
            f.push(suffix);
            std::fs::remove_file(f).ok();
        }
    }
}
