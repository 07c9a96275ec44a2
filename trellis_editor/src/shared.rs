// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A shared editor handle for asynchronous drops.
//!
//! ## Overview
//!
//! Drops await schema resolution, and several may be in flight at once on a
//! single-threaded executor while the user keeps clicking, pasting, and
//! deleting. [`SharedEditor`] keeps the [`Editor`] behind `Rc<RefCell<_>>` and
//! borrows it only in the synchronous stretches between awaits, so other
//! commands run freely while a drop is suspended. The final insert is one
//! synchronous commit that re-checks everything the suspension could have
//! invalidated.
//!
//! ## Example
//!
//! ```
//! use trellis_editor::document::PageRecord;
//! use trellis_editor::drop::{DragItem, DropEvent, DropOutcome};
//! use trellis_editor::schema::{SchemaPayload, SchemaRegistry};
//! use trellis_editor::shared::SharedEditor;
//! use trellis_editor::Editor;
//!
//! let registry = SchemaRegistry::new().with("Button", SchemaPayload::default());
//! let shared = SharedEditor::new(Editor::default(), registry);
//! let _ = shared.with(|ed| ed.load(PageRecord::default()));
//!
//! let drop = DropEvent::new(DragItem::new("Button", "Submit"), None);
//! let outcome = pollster::block_on(shared.drop_item(drop)).unwrap();
//! assert!(matches!(outcome, DropOutcome::Inserted(_)));
//! ```

use core::cell::{Ref, RefCell};
use std::rc::Rc;

use tracing::Instrument;

use crate::drop::{self, DropEvent, DropOutcome, PreparedDrop};
use crate::editor::Editor;
use crate::error::EditorError;
use crate::schema::SchemaResolver;

/// Cloneable handle to an [`Editor`] and the resolver its drops use.
pub struct SharedEditor<R> {
    editor: Rc<RefCell<Editor>>,
    resolver: Rc<R>,
}

impl<R> Clone for SharedEditor<R> {
    fn clone(&self) -> Self {
        Self {
            editor: Rc::clone(&self.editor),
            resolver: Rc::clone(&self.resolver),
        }
    }
}

impl<R> core::fmt::Debug for SharedEditor<R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SharedEditor")
            .field("editor", &self.editor)
            .finish_non_exhaustive()
    }
}

impl<R: SchemaResolver> SharedEditor<R> {
    /// Share `editor`, resolving drops through `resolver`.
    pub fn new(editor: Editor, resolver: R) -> Self {
        Self {
            editor: Rc::new(RefCell::new(editor)),
            resolver: Rc::new(resolver),
        }
    }

    /// Run a synchronous command against the editor.
    ///
    /// Must not be called from inside another `with`.
    pub fn with<T>(&self, f: impl FnOnce(&mut Editor) -> T) -> T {
        f(&mut *self.editor.borrow_mut())
    }

    /// Read-only access to the editor. Do not hold the guard across an await.
    pub fn borrow(&self) -> Ref<'_, Editor> {
        self.editor.borrow()
    }

    /// The schema resolver.
    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Handle a drop delivered to one surface.
    ///
    /// Returns [`DropOutcome::NotOwned`] when another surface already claimed
    /// the drop. Any error leaves the page untouched.
    pub async fn drop_item(&self, event: DropEvent) -> Result<DropOutcome, EditorError> {
        let span = tracing::debug_span!(
            "drop_item",
            kind = %event.item.kind,
            target = ?event.target,
        );
        let result = self.run_drop(event).instrument(span.clone()).await;
        if let Err(err) = &result {
            span.in_scope(|| tracing::warn!(error = %err, "drop aborted"));
        }
        result
    }

    async fn run_drop(&self, event: DropEvent) -> Result<DropOutcome, EditorError> {
        if !event.claim.try_claim() {
            tracing::trace!("claimed by a nested surface");
            return Ok(DropOutcome::NotOwned);
        }
        let (epoch, max_depth) = self.editor.borrow().begin_drop()?;
        let kind = event.item.kind.clone();
        let schema = self
            .resolver
            .resolve(&kind)
            .await
            .map_err(|source| EditorError::ResolutionFailed {
                kind: kind.clone(),
                source,
            })?;
        self.editor.borrow().check_placement(&event, epoch)?;
        let children = drop::materialize(&*self.resolver, &kind, &schema, max_depth).await?;
        let node = drop::Blueprint {
            payload: schema.payload(),
            name: event.item.name.clone(),
            kind,
            children,
        };
        self.editor
            .borrow_mut()
            .commit_drop(PreparedDrop { event, node, epoch })
    }
}
