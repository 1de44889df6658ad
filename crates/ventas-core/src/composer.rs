//! # Sale Composer
//!
//! Assembles a draft sale from the product catalog and the customer list and
//! keeps its total consistent with the catalog.
//!
//! ## Composer States
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │            begin_new(today)                                             │
//! │  ┌────────┐ ─────────────────► ┌──────────────┐  begin_submit()         │
//! │  │ Closed │   begin_edit(sale)  │ Open(mode)   │ ──────────────┐        │
//! │  └────────┘ ─────────────────► └──────────────┘               ▼        │
//! │    ▲   ▲          cancel()       │    ▲           ┌──────────────────┐  │
//! │    │   └─────────────────────────┘    │           │ Submitting(mode) │  │
//! │    │                                  └───────────│  (no re-entry)   │  │
//! │    │         complete_submit(false)               └────────┬─────────┘  │
//! │    └────────────────────────────────────────────────────────┘           │
//! │                      complete_submit(true)                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Line Items
//! A line is a product plus a quantity. Adding a product that is already in
//! the draft bumps its quantity; removing a product drops the whole line.
//! The gateway has no quantity field, so a line with quantity `n` is sent as
//! `n` repeated references and repeated references are folded back into one
//! line when a stored sale is opened.
//!
//! An opened sale remembers its stored references and total. Until a line is
//! added, removed or re-quantified they are sent back exactly as received, so
//! an unchanged edit does not regroup `[1, 2, 1]` or round `0.30000000000000004`.
//! Recomputing the total against the catalog replaces the stored total but
//! keeps the reference order.
//!
//! ## Total
//! ```text
//! total = Σ cost(item.product_id) × item.quantity
//!         cost = 0 when the product is not in the catalog
//!                or its cost is not a finite number
//!         a line whose cost × quantity leaves the cent range counts as 0
//!         the sum saturates at the ends of the cent range
//! ```
//! Recomputing from the same items and catalog always yields the same total.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::editor::EditMode;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Customer, EntityId, Product, ProductRef, Sale};
use crate::validation::validate_quantity;
use crate::MAX_ITEM_QUANTITY;

// =============================================================================
// Line Items
// =============================================================================

/// One product in the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    pub product_id: EntityId,

    /// Units of the product. Always > 0 while the line exists.
    pub quantity: u32,
}

impl LineItem {
    pub const fn new(product_id: EntityId, quantity: u32) -> Self {
        LineItem {
            product_id,
            quantity,
        }
    }
}

/// Looks a product up in the loaded catalog.
pub fn find_product(catalog: &[Product], product_id: EntityId) -> Option<&Product> {
    catalog.iter().find(|p| p.id == Some(product_id))
}

/// Sums the line costs against `catalog`.
///
/// ## Example
/// ```rust
/// use ventas_core::composer::{compute_total, LineItem};
/// use ventas_core::Product;
///
/// let catalog = vec![
///     Product { id: Some(1), ..Product::new("Yerba", "Playadito", 10.0, 5) },
///     Product { id: Some(2), ..Product::new("Mate", "Artesanal", 5.5, 5) },
/// ];
/// let items = [LineItem::new(1, 1), LineItem::new(2, 1), LineItem::new(3, 1)];
///
/// // Product 3 is not in the catalog and counts as zero
/// assert_eq!(compute_total(&items, &catalog).to_decimal(), 15.5);
/// ```
pub fn compute_total(items: &[LineItem], catalog: &[Product]) -> Money {
    items
        .iter()
        .map(|item| line_subtotal(find_product(catalog, item.product_id), item.quantity))
        .sum()
}

fn line_subtotal(product: Option<&Product>, quantity: u32) -> Money {
    product
        .and_then(|p| p.cost().checked_mul(quantity))
        .unwrap_or_default()
}

/// A line as displayed next to the catalog: what the product is called and
/// what it adds to the total.
#[derive(Debug, Clone, PartialEq)]
pub struct PricedLine {
    pub product_id: EntityId,

    /// Product name, `None` when the product is not in the catalog.
    pub name: Option<String>,

    pub quantity: u32,
    pub unit_cost: Money,
    pub subtotal: Money,
}

// =============================================================================
// Sale Draft
// =============================================================================

/// The in-progress sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaleDraft {
    /// Identifier of the stored sale when editing.
    pub id: Option<EntityId>,

    #[ts(as = "String")]
    pub date: NaiveDate,

    pub customer: Option<Customer>,

    pub items: Vec<LineItem>,

    pub total: Money,

    #[serde(skip)]
    #[ts(skip)]
    stored: Option<StoredLines>,

    /// Products whose stored quantity was above MAX_ITEM_QUANTITY when the
    /// sale was opened.
    #[serde(skip)]
    #[ts(skip)]
    capped: Vec<EntityId>,
}

/// What the gateway sent for the sale being edited.
#[derive(Debug, Clone, PartialEq)]
struct StoredLines {
    items: Vec<ProductRef>,

    /// Cleared once the total is recomputed.
    total: Option<f64>,
}

impl SaleDraft {
    /// An empty draft: no items, no customer, zero total.
    pub fn new(date: NaiveDate) -> Self {
        SaleDraft {
            id: None,
            date,
            customer: None,
            items: Vec::new(),
            total: Money::zero(),
            stored: None,
            capped: Vec::new(),
        }
    }

    /// Loads a stored sale, folding repeated product references into
    /// quantities in first-occurrence order.
    ///
    /// `total` shows the stored total rounded to cents; the exact value and
    /// the reference order are re-sent by [`SaleDraft::to_sale`] while the
    /// lines are untouched.
    ///
    /// A product referenced more than MAX_ITEM_QUANTITY times is capped at
    /// that quantity and listed by [`SaleDraft::capped_lines`]. Such a draft
    /// already differs from the stored sale, so nothing stored is re-sent and
    /// the total should be recomputed against the catalog.
    pub fn from_sale(sale: &Sale) -> Self {
        let mut items: Vec<LineItem> = Vec::new();
        let mut capped = Vec::new();
        for product_ref in &sale.items {
            let id = product_ref.product_id;
            match items.iter_mut().find(|i| i.product_id == id) {
                Some(item) if item.quantity < MAX_ITEM_QUANTITY => item.quantity += 1,
                Some(_) => {
                    if !capped.contains(&id) {
                        capped.push(id);
                    }
                }
                None => items.push(LineItem::new(id, 1)),
            }
        }

        let stored = capped.is_empty().then(|| StoredLines {
            items: sale.items.clone(),
            total: Some(sale.total),
        });

        SaleDraft {
            id: sale.id,
            date: sale.date,
            customer: sale.customer.clone(),
            items,
            total: Money::from_decimal(sale.total).unwrap_or_default(),
            stored,
            capped,
        }
    }

    /// The body sent to the gateway.
    pub fn to_sale(&self) -> Sale {
        let (items, total) = match &self.stored {
            Some(stored) => (
                stored.items.clone(),
                stored.total.unwrap_or_else(|| self.total.to_decimal()),
            ),
            None => (self.expanded_refs(), self.total.to_decimal()),
        };

        Sale {
            id: self.id,
            date: self.date,
            total,
            items,
            customer: self.customer.clone(),
        }
    }

    fn expanded_refs(&self) -> Vec<ProductRef> {
        self.items
            .iter()
            .flat_map(|item| {
                std::iter::repeat(ProductRef::new(item.product_id)).take(item.quantity as usize)
            })
            .collect()
    }

    /// True while the draft still carries the total the gateway sent.
    pub fn keeps_stored_total(&self) -> bool {
        matches!(self.stored, Some(StoredLines { total: Some(_), .. }))
    }

    pub fn capped_lines(&self) -> &[EntityId] {
        &self.capped
    }

    fn lines_changed(&mut self) {
        self.stored = None;
    }

    /// Adds one unit of the product.
    ///
    /// ## Returns
    /// - `Ok(())` on success
    /// - `Err(Validation)` if the line would exceed MAX_ITEM_QUANTITY
    pub fn add_item(&mut self, product_id: EntityId) -> CoreResult<()> {
        match self.items.iter().position(|i| i.product_id == product_id) {
            Some(index) => {
                let item = &mut self.items[index];
                let new_qty = item.quantity.saturating_add(1);
                validate_quantity(new_qty)?;
                item.quantity = new_qty;
            }
            None => self.items.push(LineItem::new(product_id, 1)),
        }

        self.lines_changed();
        Ok(())
    }

    /// Removes every unit of the product. Returns false if it was absent.
    pub fn remove_item(&mut self, product_id: EntityId) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.product_id != product_id);
        let removed = self.items.len() != before;
        if removed {
            self.lines_changed();
        }
        removed
    }

    /// Sets the quantity of an existing line. Zero removes the line.
    pub fn set_quantity(&mut self, product_id: EntityId, quantity: u32) -> CoreResult<()> {
        if quantity == 0 {
            return if self.remove_item(product_id) {
                Ok(())
            } else {
                Err(CoreError::LineItemNotFound(product_id))
            };
        }

        validate_quantity(quantity)?;

        let item = self
            .items
            .iter_mut()
            .find(|i| i.product_id == product_id)
            .ok_or(CoreError::LineItemNotFound(product_id))?;
        item.quantity = quantity;
        self.lines_changed();
        Ok(())
    }

    /// Recomputes the total from the items and `catalog`. The stored total,
    /// if any, is dropped.
    pub fn recompute_total(&mut self, catalog: &[Product]) -> Money {
        if let Some(stored) = self.stored.as_mut() {
            stored.total = None;
        }
        self.total = compute_total(&self.items, catalog);
        self.total
    }

    /// Prices each line against `catalog`, in draft order.
    pub fn priced_lines(&self, catalog: &[Product]) -> Vec<PricedLine> {
        self.items
            .iter()
            .map(|item| {
                let product = find_product(catalog, item.product_id);
                let unit_cost = product.map(Product::cost).unwrap_or_default();
                PricedLine {
                    product_id: item.product_id,
                    name: product.map(|p| p.name.clone()),
                    quantity: item.quantity,
                    unit_cost,
                    subtotal: line_subtotal(product, item.quantity),
                }
            })
            .collect()
    }

    /// Number of distinct products.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Number of units across all lines.
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Composer State Machine
// =============================================================================

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ComposerState {
    #[default]
    Closed,
    Open {
        mode: EditMode,
        draft: SaleDraft,
    },
    Submitting {
        mode: EditMode,
        draft: SaleDraft,
    },
}

/// What to send once a submission has started.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitRequest {
    pub mode: EditMode,
    pub sale: Sale,
}

/// Drives the draft through its states.
///
/// Every mutation of the item list recomputes the total against the catalog
/// passed in, which is whatever the view loaded last.
#[derive(Debug, Clone, Default)]
pub struct SaleComposer {
    state: ComposerState,
}

impl SaleComposer {
    pub fn new() -> Self {
        SaleComposer::default()
    }

    pub fn state(&self) -> &ComposerState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ComposerState::Open { .. })
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, ComposerState::Submitting { .. })
    }

    pub fn mode(&self) -> Option<EditMode> {
        match &self.state {
            ComposerState::Open { mode, .. } | ComposerState::Submitting { mode, .. } => {
                Some(*mode)
            }
            ComposerState::Closed => None,
        }
    }

    pub fn draft(&self) -> Option<&SaleDraft> {
        match &self.state {
            ComposerState::Open { draft, .. } | ComposerState::Submitting { draft, .. } => {
                Some(draft)
            }
            ComposerState::Closed => None,
        }
    }

    /// Opens an empty draft dated `today` in create mode.
    pub fn begin_new(&mut self, today: NaiveDate) -> CoreResult<()> {
        self.ensure_not_submitting()?;
        self.state = ComposerState::Open {
            mode: EditMode::Create,
            draft: SaleDraft::new(today),
        };
        Ok(())
    }

    /// Opens a stored sale in edit mode. The stored total is not recomputed
    /// and is re-sent unchanged until the lines change.
    pub fn begin_edit(&mut self, sale: &Sale) -> CoreResult<()> {
        self.ensure_not_submitting()?;
        let id = sale
            .id
            .ok_or(CoreError::MissingIdentifier { entity: "Sale" })?;

        self.state = ComposerState::Open {
            mode: EditMode::Edit(id),
            draft: SaleDraft::from_sale(sale),
        };
        Ok(())
    }

    /// Discards the draft.
    pub fn cancel(&mut self) -> CoreResult<()> {
        self.ensure_not_submitting()?;
        self.state = ComposerState::Closed;
        Ok(())
    }

    pub fn add_line_item(&mut self, product_id: EntityId, catalog: &[Product]) -> CoreResult<()> {
        let draft = self.open_draft_mut()?;
        draft.add_item(product_id)?;
        draft.recompute_total(catalog);
        Ok(())
    }

    /// Removes every unit of the product. Returns false if it was absent.
    pub fn remove_line_item(
        &mut self,
        product_id: EntityId,
        catalog: &[Product],
    ) -> CoreResult<bool> {
        let draft = self.open_draft_mut()?;
        let removed = draft.remove_item(product_id);
        if removed {
            draft.recompute_total(catalog);
        }
        Ok(removed)
    }

    pub fn set_quantity(
        &mut self,
        product_id: EntityId,
        quantity: u32,
        catalog: &[Product],
    ) -> CoreResult<()> {
        let draft = self.open_draft_mut()?;
        draft.set_quantity(product_id, quantity)?;
        draft.recompute_total(catalog);
        Ok(())
    }

    /// Recomputes the draft total against `catalog`.
    pub fn recompute_total(&mut self, catalog: &[Product]) -> CoreResult<Money> {
        Ok(self.open_draft_mut()?.recompute_total(catalog))
    }

    /// Picks the customer from the loaded list.
    ///
    /// An id that is not in `customers` leaves the draft as it was and
    /// returns false.
    pub fn select_customer(
        &mut self,
        customer_id: EntityId,
        customers: &[Customer],
    ) -> CoreResult<bool> {
        let draft = self.open_draft_mut()?;
        match customers.iter().find(|c| c.id == Some(customer_id)) {
            Some(customer) => {
                draft.customer = Some(customer.clone());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn set_date(&mut self, date: NaiveDate) -> CoreResult<()> {
        self.open_draft_mut()?.date = date;
        Ok(())
    }

    /// Starts a submission.
    ///
    /// ## Errors
    /// - `NotEditing` when closed
    /// - `SubmissionInFlight` when a submission has not resolved yet
    /// - `CustomerRequired` when no customer is set; the composer stays open
    pub fn begin_submit(&mut self) -> CoreResult<SubmitRequest> {
        let (mode, draft) = match &self.state {
            ComposerState::Closed => return Err(CoreError::NotEditing),
            ComposerState::Submitting { .. } => return Err(CoreError::SubmissionInFlight),
            ComposerState::Open { mode, draft } => (*mode, draft),
        };

        if draft.customer.is_none() {
            return Err(CoreError::CustomerRequired);
        }

        let sale = draft.to_sale();
        if let ComposerState::Open { mode, draft } = std::mem::take(&mut self.state) {
            self.state = ComposerState::Submitting { mode, draft };
        }

        Ok(SubmitRequest { mode, sale })
    }

    /// Resolves the in-flight submission: closes on success, reopens the
    /// draft unchanged on failure.
    pub fn complete_submit(&mut self, success: bool) -> CoreResult<()> {
        match std::mem::take(&mut self.state) {
            ComposerState::Submitting { mode, draft } => {
                if !success {
                    self.state = ComposerState::Open { mode, draft };
                }
                Ok(())
            }
            other => {
                self.state = other;
                Err(CoreError::NotEditing)
            }
        }
    }

    fn ensure_not_submitting(&self) -> CoreResult<()> {
        if self.is_submitting() {
            return Err(CoreError::SubmissionInFlight);
        }
        Ok(())
    }

    fn open_draft_mut(&mut self) -> CoreResult<&mut SaleDraft> {
        match &mut self.state {
            ComposerState::Open { draft, .. } => Ok(draft),
            ComposerState::Submitting { .. } => Err(CoreError::SubmissionInFlight),
            ComposerState::Closed => Err(CoreError::NotEditing),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
