//! # Product Commands
//!
//! `ventas productos list|add|edit|delete`. Costs are always shown as
//! `$x.xx`, whatever the display settings say.

use clap::{Args, Subcommand};
use tracing::debug;
use ventas_core::{EntityId, Product};

use super::table::TableRow;
use super::{list_entities, Context};
use crate::state::DisplayConfig;

#[derive(Debug, Subcommand)]
pub enum ProductAction {
    /// List the catalog, optionally filtered
    List {
        /// Case-insensitive text matched against every column
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Create a product
    Add(ProductFields),

    /// Change an existing product; omitted fields keep their value
    Edit {
        id: EntityId,
        #[command(flatten)]
        fields: ProductFields,
    },

    /// Delete a product after confirmation
    Delete { id: EntityId },
}

#[derive(Debug, Clone, Default, Args)]
pub struct ProductFields {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub brand: Option<String>,

    /// Unit cost, e.g. 10.5
    #[arg(long)]
    pub cost: Option<f64>,

    /// Units in stock
    #[arg(long)]
    pub quantity: Option<i64>,
}

impl ProductFields {
    fn apply(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(brand) = self.brand {
            product.brand = brand;
        }
        if let Some(cost) = self.cost {
            product.unit_cost = cost;
        }
        if let Some(quantity) = self.quantity {
            product.available_quantity = quantity;
        }
    }
}

impl TableRow for Product {
    fn headers() -> &'static [&'static str] {
        &["Code", "Name", "Brand", "Cost", "Available"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.map(|id| id.to_string()).unwrap_or_default(),
            self.name.clone(),
            self.brand.clone(),
            DisplayConfig::default().format_money(self.cost()),
            self.available_quantity.to_string(),
        ]
    }
}

pub async fn run(ctx: &Context, action: ProductAction) -> bool {
    debug!(?action, "products command");
    let mut view = ctx.products();

    match action {
        ProductAction::List { search } => list_entities(view, search.as_deref()).await,
        ProductAction::Add(fields) => {
            view.begin_create();
            if let Some(draft) = view.draft_mut() {
                fields.apply(draft);
            }
            view.save().await
        }
        ProductAction::Edit { id, fields } => {
            if !view.load().await || !view.begin_edit(id) {
                return false;
            }
            if let Some(draft) = view.draft_mut() {
                fields.apply(draft);
            }
            view.save().await
        }
        ProductAction::Delete { id } => view.delete(id, ctx.confirm.as_ref()).await,
    }
}
