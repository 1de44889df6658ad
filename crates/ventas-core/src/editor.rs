//! # Editor
//!
//! The create/edit form behind the customer and product views.
//!
//! ```text
//!            begin_create()                 prepare_save() ──► SaveRequest
//!   Closed ─────────────────► Open(Create) ───────┐           (validated copy)
//!     ▲       begin_edit(e)                       │
//!     ├─────────────────────► Open(Edit(id)) ─────┤
//!     │                                           │
//!     └──────────── close() / cancel() ◄──────────┘  (after a successful save)
//! ```
//!
//! A failed save leaves the editor open with the draft untouched, so
//! `prepare_save` only borrows it.

use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::types::{Entity, EntityId};
use crate::validation::Validate;

/// Whether the next save inserts or updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EditMode {
    Create,
    Edit(EntityId),
}

impl EditMode {
    pub fn is_edit(&self) -> bool {
        matches!(self, EditMode::Edit(_))
    }
}

/// Editing surface for a single entity.
#[derive(Debug, Clone, PartialEq)]
pub enum Editor<T> {
    Closed,
    Open { mode: EditMode, draft: T },
}

/// A validated draft ready to be sent to the gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveRequest<T> {
    pub mode: EditMode,
    pub entity: T,
}

impl<T> Default for Editor<T> {
    fn default() -> Self {
        Editor::Closed
    }
}

impl<T> Editor<T> {
    pub fn new() -> Self {
        Editor::Closed
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Editor::Open { .. })
    }

    pub fn mode(&self) -> Option<EditMode> {
        match self {
            Editor::Open { mode, .. } => Some(*mode),
            Editor::Closed => None,
        }
    }

    pub fn draft(&self) -> Option<&T> {
        match self {
            Editor::Open { draft, .. } => Some(draft),
            Editor::Closed => None,
        }
    }

    /// Mutable access to the draft for the form fields.
    pub fn draft_mut(&mut self) -> CoreResult<&mut T> {
        match self {
            Editor::Open { draft, .. } => Ok(draft),
            Editor::Closed => Err(CoreError::NotEditing),
        }
    }

    /// Closes the editor and resets the mode.
    pub fn close(&mut self) {
        *self = Editor::Closed;
    }

    /// Discards the draft.
    pub fn cancel(&mut self) {
        self.close();
    }
}

impl<T: Entity + Default> Editor<T> {
    /// Opens the editor on a blank entity in create mode.
    pub fn begin_create(&mut self) {
        *self = Editor::Open {
            mode: EditMode::Create,
            draft: T::default(),
        };
    }

    /// Opens the editor on a copy of `entity` in edit mode.
    ///
    /// Fails if the entity was never persisted, since updates are addressed
    /// by identifier.
    pub fn begin_edit(&mut self, entity: &T) -> CoreResult<()> {
        let id = entity
            .id()
            .ok_or(CoreError::MissingIdentifier { entity: T::KIND })?;

        *self = Editor::Open {
            mode: EditMode::Edit(id),
            draft: entity.clone(),
        };
        Ok(())
    }
}

impl<T: Clone + Validate> Editor<T> {
    /// Checks the required fields and returns what to send.
    ///
    /// The editor stays open; call [`Editor::close`] once the gateway
    /// accepted the save.
    pub fn prepare_save(&self) -> CoreResult<SaveRequest<T>> {
        match self {
            Editor::Open { mode, draft } => {
                draft.validate()?;
                Ok(SaveRequest {
                    mode: *mode,
                    entity: draft.clone(),
                })
            }
            Editor::Closed => Err(CoreError::NotEditing),
        }
    }
}
