//! # Sale Commands
//!
//! `ventas ventas list|new|edit|delete`, driving the sale composer.
//!
//! ## Compose Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  $ ventas ventas new --customer 3 --product 7 --product 7 --product 2  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  load_dependencies()    customers, products, sales in parallel         │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  begin_new(today) ─► set_date? ─► select_customer ─► add_line_item...  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  print draft summary ─► submit() ─► POST /ventas/crear                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Any step that fails is notified and stops the command before submitting.

use chrono::{NaiveDate, Utc};
use clap::{Args, Subcommand};
use tracing::debug;
use ventas_core::validation::parse_sale_date;
use ventas_core::{EntityId, Product, Sale, SaleDraft};
use ventas_gateway::Repository;

use super::table::Table;
use super::{print_table, Context};
use crate::state::{DisplayConfig, SalesView};

#[derive(Debug, Subcommand)]
pub enum SaleAction {
    /// List sales, optionally filtered by customer, date or total
    List {
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Compose and save a new sale
    New {
        /// Buyer's customer id
        #[arg(long)]
        customer: Option<EntityId>,

        /// Sale date as YYYY-MM-DD (defaults to today, UTC)
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,

        /// Product code; repeat to sell more than one unit
        #[arg(long = "product", value_name = "CODE")]
        products: Vec<EntityId>,
    },

    /// Change an existing sale
    Edit {
        id: EntityId,

        #[command(flatten)]
        changes: SaleChanges,
    },

    /// Delete a sale after confirmation
    Delete { id: EntityId },
}

#[derive(Debug, Clone, Default, Args)]
pub struct SaleChanges {
    /// New buyer's customer id
    #[arg(long)]
    pub customer: Option<EntityId>,

    /// New sale date as YYYY-MM-DD
    #[arg(long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    /// Product code to add one unit of; repeatable
    #[arg(long = "add", value_name = "CODE")]
    pub add: Vec<EntityId>,

    /// Product code whose line is removed; repeatable
    #[arg(long = "remove", value_name = "CODE")]
    pub remove: Vec<EntityId>,

    /// Sets a line's quantity as CODE=N; 0 removes the line
    #[arg(long = "quantity", value_name = "CODE=N", value_parser = parse_quantity)]
    pub quantities: Vec<(EntityId, u32)>,
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    parse_sale_date(value).map_err(|e| e.to_string())
}

fn parse_quantity(value: &str) -> Result<(EntityId, u32), String> {
    let (code, qty) = value
        .split_once('=')
        .ok_or_else(|| format!("expected CODE=N, got '{}'", value))?;
    let code = code
        .trim()
        .parse::<EntityId>()
        .map_err(|e| format!("invalid product code '{}': {}", code, e))?;
    let qty = qty
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("invalid quantity '{}': {}", qty, e))?;
    Ok((code, qty))
}

pub async fn run(ctx: &Context, action: SaleAction) -> bool {
    debug!(?action, "sales command");
    let mut view = ctx.sales();

    match action {
        SaleAction::List { search } => {
            if !view.load_sales().await {
                return false;
            }
            let table = sales_table(view.search(search.as_deref().unwrap_or("")), &ctx.display);
            print_table(&table, "sales");
            true
        }
        SaleAction::New {
            customer,
            date,
            products,
        } => {
            view.load_dependencies().await;
            let changes = SaleChanges {
                customer,
                date,
                add: products,
                ..Default::default()
            };
            view.begin_new(Utc::now().date_naive())
                && apply_changes(&mut view, changes)
                && submit(&mut view, &ctx.display).await
        }
        SaleAction::Edit { id, changes } => {
            let status = view.load_dependencies().await;
            if !status.sales {
                return false;
            }
            view.begin_edit(id)
                && apply_changes(&mut view, changes)
                && submit(&mut view, &ctx.display).await
        }
        SaleAction::Delete { id } => view.delete(id, ctx.confirm.as_ref()).await,
    }
}

/// Applies every requested change, stopping at the first one that fails.
fn apply_changes<C, P, S>(view: &mut SalesView<C, P, S>, changes: SaleChanges) -> bool
where
    C: Repository<ventas_core::Customer>,
    P: Repository<Product>,
    S: Repository<Sale>,
{
    if let Some(date) = changes.date {
        if !view.set_date(date) {
            return false;
        }
    }
    if let Some(customer) = changes.customer {
        if !view.select_customer(customer) {
            return false;
        }
    }
    for product_id in changes.add {
        if !view.add_line_item(product_id) {
            return false;
        }
    }
    for product_id in changes.remove {
        if !view.remove_line_item(product_id) {
            debug!(product_id, "Product was not part of the sale");
        }
    }
    changes
        .quantities
        .into_iter()
        .all(|(product_id, qty)| view.set_quantity(product_id, qty))
}

async fn submit<C, P, S>(view: &mut SalesView<C, P, S>, display: &DisplayConfig) -> bool
where
    C: Repository<ventas_core::Customer>,
    P: Repository<Product>,
    S: Repository<Sale>,
{
    if let Some(draft) = view.draft() {
        print!("{}", draft_summary(draft, view.products(), display));
    }
    view.submit().await
}

fn sales_table<'a>(sales: impl IntoIterator<Item = &'a Sale>, display: &DisplayConfig) -> Table {
    let mut table = Table::new(&["Code", "Date", "Customer", "Items", "Total"]);
    for sale in sales {
        table.push(vec![
            sale.id.map(|id| id.to_string()).unwrap_or_default(),
            sale.date.to_string(),
            sale.customer_name(),
            sale.items.len().to_string(),
            display.format_amount(sale.total),
        ]);
    }
    table
}

/// The draft as it is about to be sent: header, one row per line and the
/// total.
fn draft_summary(draft: &SaleDraft, catalog: &[Product], display: &DisplayConfig) -> String {
    let customer = draft
        .customer
        .as_ref()
        .map(|c| c.full_name())
        .unwrap_or_else(|| "(none)".to_string());

    let mut table = Table::new(&["Code", "Product", "Qty", "Unit", "Subtotal"]);
    for line in draft.priced_lines(catalog) {
        table.push(vec![
            line.product_id.to_string(),
            line.name.unwrap_or_else(|| "(unknown)".to_string()),
            line.quantity.to_string(),
            display.format_money(line.unit_cost),
            display.format_money(line.subtotal),
        ]);
    }

    let mut out = format!("Date: {}\nCustomer: {}\n", draft.date, customer);
    if !table.is_empty() {
        out.push_str(&table.render());
    }
    out.push_str(&format!("Total: {}\n", display.format_money(draft.total)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confirm::AutoConfirm;
    use crate::notify::testing::RecordingNotifier;
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;
    use ventas_core::{Customer, LineItem, Money};
    use ventas_gateway::Gateway;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn context(server: &MockServer, notifier: Arc<RecordingNotifier>) -> Context {
        Context {
            gateway: Gateway::new(server.uri().parse().unwrap(), Duration::from_secs(5)).unwrap(),
            display: DisplayConfig::default(),
            notifier,
            confirm: Box::new(AutoConfirm(true)),
        }
    }

    async fn mount_lists(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/clientes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id_cliente": 3, "nombre": "Ana", "apellido": "Gómez", "dni": "30444555"}
            ])))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/productos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"codigo_producto": 2, "cantidad_disponible": 5, "costo": 5.5,
                 "nombre": "Azúcar", "marca": "Ledesma"},
                {"codigo_producto": 7, "cantidad_disponible": 9, "costo": 20.0,
                 "nombre": "Yerba", "marca": "Playadito"}
            ])))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/ventas"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"codigo_venta": 12, "fecha_venta": "2024-01-01", "total": 25.5,
                 "listaProductos": [{"codigo_producto": 7}, {"codigo_producto": 2}],
                 "unCliente": {"id_cliente": 3, "nombre": "Ana", "apellido": "Gómez",
                               "dni": "30444555"}}
            ])))
            .mount(server)
            .await;
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("7=3"), Ok((7, 3)));
        assert_eq!(parse_quantity(" 7 = 0 "), Ok((7, 0)));
        assert!(parse_quantity("7").is_err());
        assert!(parse_quantity("x=1").is_err());
        assert!(parse_quantity("7=-1").is_err());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-03-05"), Ok(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()));
        assert!(parse_date("05/03/2024").is_err());
    }

    #[test]
    fn test_draft_summary() {
        let catalog = vec![Product {
            id: Some(7),
            ..Product::new("Yerba", "Playadito", 20.0, 9)
        }];
        let mut draft = SaleDraft::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        draft.items = vec![LineItem::new(7, 2), LineItem::new(99, 1)];
        draft.customer = Some(Customer::new("Ana", "Gómez", "30444555"));
        draft.recompute_total(&catalog);

        let summary = draft_summary(&draft, &catalog, &DisplayConfig::default());
        assert!(summary.starts_with("Date: 2024-01-01\nCustomer: Ana Gómez\n"));
        assert!(summary.contains("7     Yerba      2    $20.00  $40.00"));
        assert!(summary.contains("99    (unknown)  1    $0.00   $0.00"));
        assert!(summary.ends_with("Total: $40.00\n"));
        assert_eq!(draft.total, Money::from_cents(4000));
    }

    #[tokio::test]
    async fn test_new_sale_posts_repeated_refs() {
        let server = MockServer::start().await;
        mount_lists(&server).await;
        Mock::given(method("POST"))
            .and(path("/ventas/crear"))
            .and(body_json(json!({
                "fecha_venta": "2024-03-05",
                "total": 45.5,
                "listaProductos": [
                    {"codigo_producto": 7}, {"codigo_producto": 7}, {"codigo_producto": 2}
                ],
                "unCliente": {"id_cliente": 3, "nombre": "Ana", "apellido": "Gómez",
                              "dni": "30444555"}
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let notifier = Arc::new(RecordingNotifier::default());
        let ctx = context(&server, notifier.clone());
        let action = SaleAction::New {
            customer: Some(3),
            date: NaiveDate::from_ymd_opt(2024, 3, 5),
            products: vec![7, 7, 2],
        };

        assert!(run(&ctx, action).await);
        assert_eq!(notifier.successes(), vec!["Sale created".to_string()]);
    }

    #[tokio::test]
    async fn test_new_sale_without_customer_is_rejected_locally() {
        let server = MockServer::start().await;
        mount_lists(&server).await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let notifier = Arc::new(RecordingNotifier::default());
        let ctx = context(&server, notifier.clone());
        let action = SaleAction::New {
            customer: None,
            date: None,
            products: vec![7],
        };

        assert!(!run(&ctx, action).await);
        assert_eq!(
            notifier.errors(),
            vec!["Could not save sale: A customer must be selected before saving the sale"
                .to_string()]
        );
    }

    #[tokio::test]
    async fn test_edit_sale_changes_quantity() {
        let server = MockServer::start().await;
        mount_lists(&server).await;
        Mock::given(method("PUT"))
            .and(path("/ventas/editar/12"))
            .and(body_json(json!({
                "codigo_venta": 12,
                "fecha_venta": "2024-01-01",
                "total": 60.0,
                "listaProductos": [
                    {"codigo_producto": 7}, {"codigo_producto": 7}, {"codigo_producto": 7}
                ],
                "unCliente": {"id_cliente": 3, "nombre": "Ana", "apellido": "Gómez",
                              "dni": "30444555"}
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let notifier = Arc::new(RecordingNotifier::default());
        let ctx = context(&server, notifier.clone());
        let changes = SaleChanges {
            remove: vec![2],
            quantities: vec![(7, 3)],
            ..Default::default()
        };

        assert!(run(&ctx, SaleAction::Edit { id: 12, changes }).await);
        assert_eq!(notifier.successes(), vec!["Sale updated".to_string()]);
    }

    #[tokio::test]
    async fn test_edit_unknown_sale() {
        let server = MockServer::start().await;
        mount_lists(&server).await;

        let notifier = Arc::new(RecordingNotifier::default());
        let ctx = context(&server, notifier.clone());

        let changes = SaleChanges::default();
        assert!(!run(&ctx, SaleAction::Edit { id: 40, changes }).await);
        assert_eq!(
            notifier.errors(),
            vec!["Could not edit sale: Sale 40 not found".to_string()]
        );
    }
}
