//! # Sales View
//!
//! The sales screen: the sales table plus the composer used to create and
//! edit a sale. It needs the customer list (to pick the buyer) and the
//! product catalog (to price the line items), so it loads three collections.
//!
//! ## Loading
//! ```text
//! load_dependencies()
//!     ├── GET /clientes  ──┐
//!     ├── GET /productos ──┼── tokio::join! (each result applied on its own;
//!     └── GET /ventas    ──┘    one failure never blocks the others)
//! ```
//!
//! An open draft is repriced against the new catalog, except a sale opened
//! for editing whose lines are untouched: it keeps its stored total.
//!
//! ## Submitting
//! ```text
//! submit()
//!   composer.begin_submit() ──► CustomerRequired? notify, no call, stay Open
//!          │
//!          ▼ Submitting
//!   POST /ventas/crear  or  PUT /ventas/editar/{id}
//!          │
//!          ├── ok  ──► complete_submit(true)  ──► Closed, notify, reload sales
//!          └── err ──► complete_submit(false) ──► Open (draft intact), notify
//! ```

use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, info, warn};
use ventas_core::search;
use ventas_core::{
    CoreResult, Customer, EditMode, EntityId, Product, Sale, SaleComposer, SaleDraft,
    MAX_ITEM_QUANTITY,
};
use ventas_gateway::Repository;

use crate::confirm::Confirm;
use crate::error::{CliError, ErrorCode};
use crate::notify::Notifier;

/// Which collections the last `load_dependencies` managed to refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadStatus {
    pub customers: bool,
    pub products: bool,
    pub sales: bool,
}

impl LoadStatus {
    pub fn all_loaded(&self) -> bool {
        self.customers && self.products && self.sales
    }
}

/// Sales screen state.
pub struct SalesView<C, P, S> {
    customer_repo: C,
    product_repo: P,
    sale_repo: S,
    notifier: Arc<dyn Notifier>,
    customers: Vec<Customer>,
    products: Vec<Product>,
    sales: Vec<Sale>,
    composer: SaleComposer,
}

impl<C, P, S> SalesView<C, P, S>
where
    C: Repository<Customer>,
    P: Repository<Product>,
    S: Repository<Sale>,
{
    pub fn new(customer_repo: C, product_repo: P, sale_repo: S, notifier: Arc<dyn Notifier>) -> Self {
        SalesView {
            customer_repo,
            product_repo,
            sale_repo,
            notifier,
            customers: Vec::new(),
            products: Vec::new(),
            sales: Vec::new(),
            composer: SaleComposer::new(),
        }
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn sales(&self) -> &[Sale] {
        &self.sales
    }

    pub fn composer(&self) -> &SaleComposer {
        &self.composer
    }

    pub fn draft(&self) -> Option<&SaleDraft> {
        self.composer.draft()
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Fetches customers, products and sales concurrently.
    pub async fn load_dependencies(&mut self) -> LoadStatus {
        debug!("load_dependencies");
        let (customers, products, sales) = tokio::join!(
            self.customer_repo.list(),
            self.product_repo.list(),
            self.sale_repo.list()
        );

        let status = LoadStatus {
            customers: apply(&mut self.customers, customers, "customers", &*self.notifier),
            products: apply(&mut self.products, products, "products", &*self.notifier),
            sales: apply(&mut self.sales, sales, "sales", &*self.notifier),
        };

        if self.draft().is_some_and(|d| !d.keeps_stored_total()) {
            if let Ok(total) = self.composer.recompute_total(&self.products) {
                debug!(total = %total, "Draft total refreshed against new catalog");
            }
        }

        status
    }

    /// Fetches the sales list only.
    pub async fn load_sales(&mut self) -> bool {
        let result = self.sale_repo.list().await;
        apply(&mut self.sales, result, "sales", &*self.notifier)
    }

    /// Sales whose customer name, date or total contains `term`.
    pub fn search(&self, term: &str) -> Vec<&Sale> {
        search::filter(&self.sales, term)
    }

    // =========================================================================
    // Composer
    // =========================================================================

    /// Opens an empty draft dated `today`.
    pub fn begin_new(&mut self, today: NaiveDate) -> bool {
        debug!(%today, "begin_new");
        let result = self.composer.begin_new(today);
        self.report("Could not start a sale", result)
    }

    /// Opens a loaded sale in the composer.
    ///
    /// Lines stored above the quantity limit are capped; the capped draft is
    /// repriced against the catalog and the products are reported.
    pub fn begin_edit(&mut self, id: EntityId) -> bool {
        debug!(id, "begin_edit");
        let result = match self.sales.iter().find(|s| s.id == Some(id)) {
            Some(sale) => self.composer.begin_edit(sale).map_err(CliError::from),
            None => Err(CliError::not_found("Sale", id)),
        };
        if !self.report_cli("Could not edit sale", result) {
            return false;
        }

        let capped = self
            .draft()
            .map(|d| d.capped_lines().to_vec())
            .unwrap_or_default();
        if !capped.is_empty() {
            if let Ok(total) = self.composer.recompute_total(&self.products) {
                warn!(id, ?capped, total = %total, "Stored quantities capped");
            }
            let products = capped
                .iter()
                .map(|p| p.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            self.notifier.failure(
                &format!("Sale {} opened with capped quantities", id),
                &CliError::new(
                    ErrorCode::ValidationError,
                    format!(
                        "products {} reduced to {} units",
                        products, MAX_ITEM_QUANTITY
                    ),
                ),
            );
        }
        true
    }

    pub fn cancel(&mut self) -> bool {
        let result = self.composer.cancel();
        self.report("Could not close the sale", result)
    }

    pub fn add_line_item(&mut self, product_id: EntityId) -> bool {
        debug!(product_id, "add_line_item");
        if !self.products.iter().any(|p| p.id == Some(product_id)) {
            debug!(product_id, "Product not in catalog, it will count as zero");
        }
        let result = self.composer.add_line_item(product_id, &self.products);
        self.report("Could not add product", result)
    }

    pub fn remove_line_item(&mut self, product_id: EntityId) -> bool {
        debug!(product_id, "remove_line_item");
        match self.composer.remove_line_item(product_id, &self.products) {
            Ok(removed) => removed,
            Err(e) => {
                self.notifier.failure("Could not remove product", &CliError::from(e));
                false
            }
        }
    }

    pub fn set_quantity(&mut self, product_id: EntityId, quantity: u32) -> bool {
        debug!(product_id, quantity, "set_quantity");
        let result = self
            .composer
            .set_quantity(product_id, quantity, &self.products);
        self.report("Could not change quantity", result)
    }

    /// Picks the buyer. An id that is not in the loaded list leaves the
    /// draft unchanged.
    pub fn select_customer(&mut self, customer_id: EntityId) -> bool {
        debug!(customer_id, "select_customer");
        match self.composer.select_customer(customer_id, &self.customers) {
            Ok(true) => true,
            Ok(false) => {
                self.notifier.failure(
                    "Could not select customer",
                    &CliError::not_found("Customer", customer_id),
                );
                false
            }
            Err(e) => {
                self.notifier.failure("Could not select customer", &CliError::from(e));
                false
            }
        }
    }

    pub fn set_date(&mut self, date: NaiveDate) -> bool {
        let result = self.composer.set_date(date);
        self.report("Could not change date", result)
    }

    /// Sends the draft to the gateway.
    pub async fn submit(&mut self) -> bool {
        let context = "Could not save sale";
        let request = match self.composer.begin_submit() {
            Ok(request) => request,
            Err(e) => {
                self.notifier.failure(context, &CliError::from(e));
                return false;
            }
        };

        debug!(mode = ?request.mode, total = request.sale.total, "submit");
        let result = match request.mode {
            EditMode::Create => self.sale_repo.create(&request.sale).await,
            EditMode::Edit(id) => self.sale_repo.update(id, &request.sale).await,
        };
        let success = result.is_ok();

        // begin_submit succeeded, so the composer is Submitting
        let _ = self.composer.complete_submit(success);

        match result {
            Ok(()) => {
                info!(mode = ?request.mode, "Sale saved");
                let verb = if request.mode.is_edit() { "updated" } else { "created" };
                self.notifier.success(format!("Sale {}", verb));
                self.load_sales().await;
                true
            }
            Err(e) => {
                self.notifier.failure(context, &CliError::from(e));
                false
            }
        }
    }

    /// Deletes a sale after confirmation. Declining makes no call.
    pub async fn delete(&mut self, id: EntityId, confirm: &dyn Confirm) -> bool {
        if !confirm.confirm(&format!("Delete sale {}?", id)) {
            debug!(id, "delete declined");
            return false;
        }

        match self.sale_repo.delete(id).await {
            Ok(()) => {
                self.notifier.success("Sale deleted".to_string());
                self.load_sales().await;
                true
            }
            Err(e) => {
                self.notifier.failure("Could not delete sale", &CliError::from(e));
                false
            }
        }
    }

    fn report(&self, context: &str, result: CoreResult<()>) -> bool {
        self.report_cli(context, result.map_err(CliError::from))
    }

    fn report_cli(&self, context: &str, result: Result<(), CliError>) -> bool {
        match result {
            Ok(()) => true,
            Err(e) => {
                self.notifier.failure(context, &e);
                false
            }
        }
    }
}

/// Replaces `target` on success; on failure notifies and keeps it.
fn apply<T>(
    target: &mut Vec<T>,
    result: ventas_gateway::GatewayResult<Vec<T>>,
    what: &str,
    notifier: &dyn Notifier,
) -> bool {
    match result {
        Ok(items) => {
            *target = items;
            true
        }
        Err(e) => {
            notifier.failure(&format!("Could not load {}", what), &CliError::from(e));
            false
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
