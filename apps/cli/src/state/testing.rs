//! In-memory repository for view tests.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use ventas_core::{Entity, EntityId};
use ventas_gateway::{GatewayError, GatewayResult, Repository};

/// A call the view made, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Call<E> {
    List,
    Create(E),
    Update(EntityId, E),
    Delete(EntityId),
}

/// Holds the collection in memory and records every call.
///
/// `fail_list` and `fail_mutations` make the matching calls return a
/// transport or status error without touching the collection.
pub struct InMemoryRepository<E> {
    items: Mutex<Vec<E>>,
    calls: Mutex<Vec<Call<E>>>,
    fail_list: AtomicBool,
    fail_mutations: AtomicBool,
}

impl<E: Entity> InMemoryRepository<E> {
    pub fn new(items: Vec<E>) -> Self {
        InMemoryRepository {
            items: Mutex::new(items),
            calls: Mutex::new(Vec::new()),
            fail_list: AtomicBool::new(false),
            fail_mutations: AtomicBool::new(false),
        }
    }

    pub fn items(&self) -> Vec<E> {
        self.items.lock().unwrap().clone()
    }

    pub fn calls(&self) -> Vec<Call<E>> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls other than `List`.
    pub fn mutations(&self) -> Vec<Call<E>> {
        self.calls()
            .into_iter()
            .filter(|c| !matches!(c, Call::List))
            .collect()
    }

    pub fn fail_list(&self, fail: bool) {
        self.fail_list.store(fail, Ordering::SeqCst);
    }

    pub fn fail_mutations(&self, fail: bool) {
        self.fail_mutations.store(fail, Ordering::SeqCst);
    }

    fn record(&self, call: Call<E>) {
        self.calls.lock().unwrap().push(call);
    }

    fn check_mutation(&self, method: &'static str, path: String) -> GatewayResult<()> {
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(GatewayError::Status {
                method,
                path,
                status: 500,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl<E> Repository<E> for InMemoryRepository<E>
where
    E: Entity + Send + Sync + 'static,
{
    async fn list(&self) -> GatewayResult<Vec<E>> {
        self.record(Call::List);
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(GatewayError::Transport("connection refused".into()));
        }
        Ok(self.items())
    }

    async fn create(&self, entity: &E) -> GatewayResult<()> {
        self.record(Call::Create(entity.clone()));
        self.check_mutation("POST", "/crear".into())?;
        self.items.lock().unwrap().push(entity.clone());
        Ok(())
    }

    async fn update(&self, id: EntityId, entity: &E) -> GatewayResult<()> {
        self.record(Call::Update(id, entity.clone()));
        self.check_mutation("PUT", format!("/editar/{}", id))?;
        let mut items = self.items.lock().unwrap();
        if let Some(slot) = items.iter_mut().find(|e| e.id() == Some(id)) {
            *slot = entity.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: EntityId) -> GatewayResult<()> {
        self.record(Call::Delete(id));
        self.check_mutation("DELETE", format!("/eliminar/{}", id))?;
        self.items.lock().unwrap().retain(|e| e.id() != Some(id));
        Ok(())
    }
}
