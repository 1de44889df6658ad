//! # Repository
//!
//! The capability each view holds for its entity kind.
//!
//! ```text
//!   EntityListView<Customer, R> ──► R: Repository<Customer>
//!   SalesView                   ──► Repository<Customer>
//!                                   Repository<Product>
//!                                   Repository<Sale>
//!
//!   impls: HttpRepository<E> (reqwest) ─ tests: in-memory doubles
//! ```
//!
//! Mutations report success or failure only. Views reload the collection
//! afterwards instead of patching their cached copy.

use async_trait::async_trait;
use std::sync::Arc;
use ventas_core::EntityId;

use crate::error::GatewayResult;

/// List / create / update / delete for one entity kind.
#[async_trait]
pub trait Repository<E>: Send + Sync
where
    E: Send + Sync + 'static,
{
    /// Fetches the whole collection.
    async fn list(&self) -> GatewayResult<Vec<E>>;

    /// Inserts a new entity. The gateway assigns the identifier.
    async fn create(&self, entity: &E) -> GatewayResult<()>;

    /// Replaces the entity stored under `id`.
    async fn update(&self, id: EntityId, entity: &E) -> GatewayResult<()>;

    /// Deletes the entity stored under `id`.
    async fn delete(&self, id: EntityId) -> GatewayResult<()>;
}

/// Shared repositories delegate to the inner one.
#[async_trait]
impl<E, R> Repository<E> for Arc<R>
where
    E: Send + Sync + 'static,
    R: Repository<E> + ?Sized,
{
    async fn list(&self) -> GatewayResult<Vec<E>> {
        (**self).list().await
    }

    async fn create(&self, entity: &E) -> GatewayResult<()> {
        (**self).create(entity).await
    }

    async fn update(&self, id: EntityId, entity: &E) -> GatewayResult<()> {
        (**self).update(id, entity).await
    }

    async fn delete(&self, id: EntityId) -> GatewayResult<()> {
        (**self).delete(id).await
    }
}
