//! # HTTP Repositories
//!
//! `Repository` implementation over the gateway's REST API.
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Operation   Verb     Path                          Body               │
//! │  ─────────   ──────   ───────────────────────────   ────────────────   │
//! │  list        GET      {base}/{group}                (response: [E])    │
//! │  create      POST     {base}/{group}/crear          E                  │
//! │  update      PUT      {base}/{group}/editar/{id}    E                  │
//! │  delete      DELETE   {base}/{group}/eliminar/{id}  -                  │
//! │                                                                         │
//! │  group ∈ { clientes, productos, ventas }                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Outcome Mapping
//! ```text
//! send() fails ─────────────► GatewayError::Transport
//! status ∉ 2xx ─────────────► GatewayError::Status
//! list body not [E] ────────► GatewayError::Decode
//! otherwise ────────────────► Ok (mutation bodies are ignored)
//! ```

use async_trait::async_trait;
use std::fmt;
use std::marker::PhantomData;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;
use ventas_core::{Customer, EntityId, Product, Sale};

use crate::config::AppConfig;
use crate::error::{DecodeError, GatewayError, GatewayResult};
use crate::repository::Repository;
use crate::resource::Resource;

// =============================================================================
// Gateway
// =============================================================================

/// Shared HTTP client plus base address; hands out one repository per
/// entity kind.
#[derive(Debug, Clone)]
pub struct Gateway {
    client: reqwest::Client,
    base: Url,
}

impl Gateway {
    /// Creates a gateway client with a per-request timeout.
    pub fn new(base: Url, timeout: Duration) -> GatewayResult<Self> {
        if base.cannot_be_a_base() {
            return Err(GatewayError::InvalidUrl(format!(
                "{} cannot be used as a base address",
                base
            )));
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!("ventas-cli/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Gateway { client, base })
    }

    /// Creates a gateway client from validated configuration.
    pub fn from_config(config: &AppConfig) -> GatewayResult<Self> {
        Self::new(config.base_url()?, config.timeout())
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    pub fn repository<E: Resource>(&self) -> HttpRepository<E> {
        HttpRepository {
            client: self.client.clone(),
            base: self.base.clone(),
            _entity: PhantomData,
        }
    }

    pub fn customers(&self) -> HttpRepository<Customer> {
        self.repository()
    }

    pub fn products(&self) -> HttpRepository<Product> {
        self.repository()
    }

    pub fn sales(&self) -> HttpRepository<Sale> {
        self.repository()
    }
}

// =============================================================================
// HttpRepository
// =============================================================================

/// Repository for one resource group.
pub struct HttpRepository<E> {
    client: reqwest::Client,
    base: Url,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for HttpRepository<E> {
    fn clone(&self) -> Self {
        HttpRepository {
            client: self.client.clone(),
            base: self.base.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: Resource> fmt::Debug for HttpRepository<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpRepository")
            .field("collection", &E::COLLECTION)
            .field("base", &self.base.as_str())
            .finish()
    }
}

impl<E: Resource> HttpRepository<E> {
    /// Builds `{base}/{group}/{segments...}`, keeping any path prefix on
    /// the base address.
    fn endpoint(&self, segments: &[&str]) -> GatewayResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| GatewayError::InvalidUrl(format!("{} cannot be a base", self.base)))?
            .pop_if_empty()
            .push(E::COLLECTION)
            .extend(segments);
        Ok(url)
    }

    fn encode(&self, entity: &E) -> GatewayResult<serde_json::Value> {
        entity
            .write_body()
            .map_err(|e| GatewayError::Encode(e.to_string()))
    }
}

/// Turns a non-2xx response into `GatewayError::Status`.
fn check_status(
    method: &'static str,
    url: &Url,
    response: reqwest::Response,
) -> GatewayResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    warn!(method, path = url.path(), status = status.as_u16(), "Gateway rejected request");
    Err(GatewayError::Status {
        method,
        path: url.path().to_string(),
        status: status.as_u16(),
    })
}

#[async_trait]
impl<E: Resource> Repository<E> for HttpRepository<E> {
    async fn list(&self) -> GatewayResult<Vec<E>> {
        let url = self.endpoint(&[])?;
        debug!(entity = E::KIND, %url, "Listing");

        let response = self.client.get(url.clone()).send().await?;
        let body = check_status("GET", &url, response)?.bytes().await?;

        let items: Vec<E> =
            serde_json::from_slice(&body).map_err(|e| DecodeError::new(E::KIND, e))?;

        debug!(entity = E::KIND, count = items.len(), "Listed");
        Ok(items)
    }

    async fn create(&self, entity: &E) -> GatewayResult<()> {
        let url = self.endpoint(&["crear"])?;
        let body = self.encode(entity)?;
        debug!(entity = E::KIND, %url, "Creating");

        let response = self.client.post(url.clone()).json(&body).send().await?;
        check_status("POST", &url, response)?;

        info!(entity = E::KIND, "Created");
        Ok(())
    }

    async fn update(&self, id: EntityId, entity: &E) -> GatewayResult<()> {
        let id_segment = id.to_string();
        let url = self.endpoint(&["editar", &id_segment])?;
        let body = self.encode(entity)?;
        debug!(entity = E::KIND, id, %url, "Updating");

        let response = self.client.put(url.clone()).json(&body).send().await?;
        check_status("PUT", &url, response)?;

        info!(entity = E::KIND, id, "Updated");
        Ok(())
    }

    async fn delete(&self, id: EntityId) -> GatewayResult<()> {
        let id_segment = id.to_string();
        let url = self.endpoint(&["eliminar", &id_segment])?;
        debug!(entity = E::KIND, id, %url, "Deleting");

        let response = self.client.delete(url.clone()).send().await?;
        check_status("DELETE", &url, response)?;

        info!(entity = E::KIND, id, "Deleted");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;
    use ventas_core::ProductRef;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn gateway_for(server: &MockServer) -> Gateway {
        let base = Url::parse(&server.uri()).unwrap();
        Gateway::new(base, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_list_customers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/clientes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id_cliente": 1, "nombre": "Ana", "apellido": "Gómez", "dni": "30444555" },
                { "id_cliente": 2, "nombre": "Bruno", "apellido": "Díaz", "dni": "28999000" }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let customers = gateway_for(&server).customers().list().await.unwrap();
        assert_eq!(customers.len(), 2);
        assert_eq!(customers[1].full_name(), "Bruno Díaz");
    }

    #[tokio::test]
    async fn test_list_sales_decodes_nested_values() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ventas"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "codigo_venta": 5,
                "fecha_venta": "2024-01-01",
                "total": 15.5,
                "listaProductos": [{ "codigo_producto": 1 }, { "codigo_producto": 2 }],
                "unCliente": { "id_cliente": 1, "nombre": "Ana", "apellido": "Gómez", "dni": "1" }
            }])))
            .mount(&server)
            .await;

        let sales = gateway_for(&server).sales().list().await.unwrap();
        assert_eq!(sales[0].items, vec![ProductRef::new(1), ProductRef::new(2)]);
        assert_eq!(sales[0].customer_name(), "Ana Gómez");
    }

    #[tokio::test]
    async fn test_malformed_list_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/productos"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{ "nombre": "Yerba", "costo": "caro" }])),
            )
            .mount(&server)
            .await;

        let err = gateway_for(&server).products().list().await.unwrap_err();
        match err {
            GatewayError::Decode(decode) => assert_eq!(decode.entity, "Product"),
            other => panic!("expected decode error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_json_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/clientes"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = gateway_for(&server).customers().list().await.unwrap_err();
        assert!(err.is_decode());
    }

    #[tokio::test]
    async fn test_create_posts_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/clientes/crear"))
            .and(body_json(json!({ "nombre": "Ana", "apellido": "Gómez", "dni": "30444555" })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        gateway_for(&server)
            .customers()
            .create(&Customer::new("Ana", "Gómez", "30444555"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_product_update_omits_identifier() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/productos/editar/7"))
            .and(body_json(json!({
                "cantidad_disponible": 14,
                "costo": 20.0,
                "nombre": "Yerba",
                "marca": "Playadito"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(1)
            .mount(&server)
            .await;

        let product = Product {
            id: Some(7),
            ..Product::new("Yerba", "Playadito", 20.0, 14)
        };
        gateway_for(&server)
            .products()
            .update(7, &product)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_sale_update_sends_full_body() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/ventas/editar/12"))
            .and(body_json(json!({
                "codigo_venta": 12,
                "fecha_venta": "2024-01-01",
                "total": 20.0,
                "listaProductos": [{ "codigo_producto": 7 }],
                "unCliente": { "id_cliente": 3, "nombre": "Ana", "apellido": "Gómez", "dni": "1" }
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let sale = Sale {
            id: Some(12),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            total: 20.0,
            items: vec![ProductRef::new(7)],
            customer: Some(Customer {
                id: Some(3),
                ..Customer::new("Ana", "Gómez", "1")
            }),
        };
        gateway_for(&server).sales().update(12, &sale).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_and_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/ventas/eliminar/9"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let err = gateway_for(&server).sales().delete(9).await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert!(!err.is_transport());
    }

    #[tokio::test]
    async fn test_base_path_prefix_is_kept() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/clientes/eliminar/4"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let base = Url::parse(&format!("{}/api", server.uri())).unwrap();
        let gateway = Gateway::new(base, Duration::from_secs(5)).unwrap();
        gateway.customers().delete(4).await.unwrap();
    }

    #[tokio::test]
    async fn test_unreachable_gateway_is_transport_error() {
        // Grab a free port, then close it so nothing is listening
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let base = Url::parse(&format!("http://127.0.0.1:{}", port)).unwrap();
        let gateway = Gateway::new(base, Duration::from_secs(5)).unwrap();

        let err = gateway.customers().list().await.unwrap_err();
        assert!(err.is_transport());
    }

    #[test]
    fn test_from_config_rejects_bad_scheme() {
        let mut config = AppConfig::default();
        config.gateway.base_url = "ftp://localhost".to_string();
        assert!(matches!(
            Gateway::from_config(&config),
            Err(GatewayError::InvalidUrl(_))
        ));
    }
}
