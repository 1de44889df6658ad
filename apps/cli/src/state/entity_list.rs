//! # Entity List View
//!
//! The customer and product screens: a cached copy of the last successful
//! load, a client-side filter and a create/edit form.
//!
//! ## View Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Entity List View Operations                          │
//! │                                                                         │
//! │  User Action            View Method           Gateway / State          │
//! │  ───────────            ───────────           ───────────────          │
//! │                                                                         │
//! │  Open screen ──────────► load() ─────────────► GET /{group}            │
//! │                                                ok: items = response    │
//! │                                                err: items unchanged    │
//! │                                                                         │
//! │  Type in search ───────► filter(term) ───────► (no call)               │
//! │                                                                         │
//! │  Click Add / Edit ─────► begin_create() ─────► editor = Open(Create)   │
//! │                          begin_edit(id)        editor = Open(Edit(id)) │
//! │                                                                         │
//! │  Click Save ───────────► save() ─────────────► POST crear / PUT editar │
//! │                                                ok: close, load()       │
//! │                                                err: editor stays open  │
//! │                                                                         │
//! │  Click Delete ─────────► delete(id) ─────────► confirm? DELETE         │
//! │                                                ok: load()              │
//! │                                                                         │
//! │  NOTE: Every outcome is reported through the Notifier.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;
use tracing::debug;
use ventas_core::search::{self, Searchable};
use ventas_core::{EditMode, Editor, EntityId, Validate};
use ventas_gateway::{Repository, Resource};

use crate::confirm::Confirm;
use crate::error::CliError;
use crate::notify::Notifier;

/// Entities that have a list screen.
pub trait Listable: Resource + Searchable + Validate + Default {
    /// Lower-case singular noun used in messages.
    const NOUN: &'static str;

    /// Lower-case plural noun used in messages.
    const PLURAL: &'static str;
}

impl Listable for ventas_core::Customer {
    const NOUN: &'static str = "customer";
    const PLURAL: &'static str = "customers";
}

impl Listable for ventas_core::Product {
    const NOUN: &'static str = "product";
    const PLURAL: &'static str = "products";
}

/// List screen for one entity kind.
pub struct EntityListView<E, R> {
    repo: R,
    notifier: Arc<dyn Notifier>,
    items: Vec<E>,
    editor: Editor<E>,
}

impl<E, R> EntityListView<E, R>
where
    E: Listable,
    R: Repository<E>,
{
    pub fn new(repo: R, notifier: Arc<dyn Notifier>) -> Self {
        EntityListView {
            repo,
            notifier,
            items: Vec::new(),
            editor: Editor::new(),
        }
    }

    /// Last successfully loaded collection.
    pub fn items(&self) -> &[E] {
        &self.items
    }

    pub fn editor(&self) -> &Editor<E> {
        &self.editor
    }

    /// Fetches the collection. On failure the previous one is kept.
    pub async fn load(&mut self) -> bool {
        debug!(entity = E::KIND, "load");
        match self.repo.list().await {
            Ok(items) => {
                self.items = items;
                true
            }
            Err(e) => {
                let context = format!("Could not load {}", E::PLURAL);
                self.notifier.failure(&context, &CliError::from(e));
                false
            }
        }
    }

    /// Items matching `term`, in load order.
    pub fn filter(&self, term: &str) -> Vec<&E> {
        search::filter(&self.items, term)
    }

    pub fn find(&self, id: EntityId) -> Option<&E> {
        self.items.iter().find(|e| e.id() == Some(id))
    }

    pub fn begin_create(&mut self) {
        debug!(entity = E::KIND, "begin_create");
        self.editor.begin_create();
    }

    /// Opens the editor on a loaded entity.
    pub fn begin_edit(&mut self, id: EntityId) -> bool {
        debug!(entity = E::KIND, id, "begin_edit");
        let result = match self.items.iter().find(|e| e.id() == Some(id)) {
            Some(entity) => self.editor.begin_edit(entity).map_err(CliError::from),
            None => Err(CliError::not_found(E::KIND, id)),
        };

        match result {
            Ok(()) => true,
            Err(e) => {
                self.notifier.failure(&format!("Could not edit {}", E::NOUN), &e);
                false
            }
        }
    }

    /// The form being edited, if any.
    pub fn draft_mut(&mut self) -> Option<&mut E> {
        self.editor.draft_mut().ok()
    }

    pub fn cancel(&mut self) {
        self.editor.cancel();
    }

    /// Creates or updates the draft depending on the editor mode.
    ///
    /// On success the editor closes and the collection is reloaded. On
    /// failure the editor stays open with the draft.
    pub async fn save(&mut self) -> bool {
        let context = format!("Could not save {}", E::NOUN);
        let request = match self.editor.prepare_save() {
            Ok(request) => request,
            Err(e) => {
                self.notifier.failure(&context, &CliError::from(e));
                return false;
            }
        };

        debug!(entity = E::KIND, mode = ?request.mode, "save");
        let result = match request.mode {
            EditMode::Create => self.repo.create(&request.entity).await,
            EditMode::Edit(id) => self.repo.update(id, &request.entity).await,
        };

        match result {
            Ok(()) => {
                self.editor.close();
                let verb = if request.mode.is_edit() { "updated" } else { "created" };
                self.notifier.success(format!("{} {}", capitalize(E::NOUN), verb));
                self.load().await;
                true
            }
            Err(e) => {
                self.notifier.failure(&context, &CliError::from(e));
                false
            }
        }
    }

    /// Deletes after confirmation. Declining makes no call.
    pub async fn delete(&mut self, id: EntityId, confirm: &dyn Confirm) -> bool {
        let prompt = format!("Delete {} {}?", E::NOUN, id);
        if !confirm.confirm(&prompt) {
            debug!(entity = E::KIND, id, "delete declined");
            return false;
        }

        match self.repo.delete(id).await {
            Ok(()) => {
                self.notifier.success(format!("{} deleted", capitalize(E::NOUN)));
                self.load().await;
                true
            }
            Err(e) => {
                let context = format!("Could not delete {}", E::NOUN);
                self.notifier.failure(&context, &CliError::from(e));
                false
            }
        }
    }
}

pub(crate) fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
