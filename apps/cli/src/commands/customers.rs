//! # Customer Commands
//!
//! `ventas clientes list|add|edit|delete`.

use clap::{Args, Subcommand};
use tracing::debug;
use ventas_core::{Customer, EntityId};

use super::table::TableRow;
use super::{list_entities, Context};

#[derive(Debug, Subcommand)]
pub enum CustomerAction {
    /// List customers, optionally filtered
    List {
        /// Case-insensitive text matched against every column
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Create a customer
    Add(CustomerFields),

    /// Change an existing customer; omitted fields keep their value
    Edit {
        id: EntityId,
        #[command(flatten)]
        fields: CustomerFields,
    },

    /// Delete a customer after confirmation
    Delete { id: EntityId },
}

/// Form fields. Empty required fields are reported when saving.
#[derive(Debug, Clone, Default, Args)]
pub struct CustomerFields {
    #[arg(long)]
    pub first_name: Option<String>,

    #[arg(long)]
    pub last_name: Option<String>,

    /// National identity document number
    #[arg(long)]
    pub dni: Option<String>,
}

impl CustomerFields {
    fn apply(self, customer: &mut Customer) {
        if let Some(first_name) = self.first_name {
            customer.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            customer.last_name = last_name;
        }
        if let Some(dni) = self.dni {
            customer.national_id = dni;
        }
    }
}

impl TableRow for Customer {
    fn headers() -> &'static [&'static str] {
        &["ID", "First name", "Last name", "DNI"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.map(|id| id.to_string()).unwrap_or_default(),
            self.first_name.clone(),
            self.last_name.clone(),
            self.national_id.clone(),
        ]
    }
}

pub async fn run(ctx: &Context, action: CustomerAction) -> bool {
    debug!(?action, "customers command");
    let mut view = ctx.customers();

    match action {
        CustomerAction::List { search } => list_entities(view, search.as_deref()).await,
        CustomerAction::Add(fields) => {
            view.begin_create();
            if let Some(draft) = view.draft_mut() {
                fields.apply(draft);
            }
            view.save().await
        }
        CustomerAction::Edit { id, fields } => {
            if !view.load().await || !view.begin_edit(id) {
                return false;
            }
            if let Some(draft) = view.draft_mut() {
                fields.apply(draft);
            }
            view.save().await
        }
        CustomerAction::Delete { id } => view.delete(id, ctx.confirm.as_ref()).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confirm::AutoConfirm;
    use crate::notify::testing::RecordingNotifier;
    use crate::state::DisplayConfig;
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;
    use ventas_gateway::Gateway;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn context(server: &MockServer, notifier: Arc<RecordingNotifier>) -> Context {
        let base = server.uri().parse().unwrap();
        Context {
            gateway: Gateway::new(base, Duration::from_secs(5)).unwrap(),
            display: DisplayConfig::default(),
            notifier,
            confirm: Box::new(AutoConfirm(true)),
        }
    }

    #[tokio::test]
    async fn test_edit_sends_merged_customer() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/clientes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id_cliente": 4, "nombre": "Ana", "apellido": "Gómez", "dni": "30111000"}
            ])))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/clientes/editar/4"))
            .and(body_json(json!({
                "id_cliente": 4, "nombre": "Ana", "apellido": "Gómez", "dni": "30444555"
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let notifier = Arc::new(RecordingNotifier::default());
        let ctx = context(&server, notifier.clone());
        let fields = CustomerFields {
            dni: Some("30444555".into()),
            ..Default::default()
        };

        assert!(run(&ctx, CustomerAction::Edit { id: 4, fields }).await);
        assert_eq!(notifier.successes(), vec!["Customer updated".to_string()]);
    }

    #[tokio::test]
    async fn test_add_with_missing_fields_makes_no_call() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let notifier = Arc::new(RecordingNotifier::default());
        let ctx = context(&server, notifier.clone());
        let fields = CustomerFields {
            first_name: Some("Ana".into()),
            ..Default::default()
        };

        assert!(!run(&ctx, CustomerAction::Add(fields)).await);
        assert_eq!(
            notifier.errors(),
            vec!["Could not save customer: apellido is required".to_string()]
        );
    }
}
