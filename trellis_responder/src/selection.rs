// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single selection plus hover, reconciled on every pointer event and tree mutation.
//!
//! ## Rules
//!
//! - Clicking a node selects it and clears any hover.
//! - Clicking the already-selected node changes nothing.
//! - Clicking outside every node clears the selection.
//! - Pointing at the selected node, or at the node already hovered, changes nothing.
//! - Pointing outside every node clears the hover.
//! - Removing nodes drops the selection and hover if they pointed at any of them.
//! - Unloading the page clears both.

use crate::hover::{HoverEvent, HoverState};
use crate::types::{InteractionEvent, Selection};

/// Selection and hover for one page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InteractionState<K> {
    selected: Option<Selection<K>>,
    hover: HoverState<K>,
}

impl<K> Default for InteractionState<K> {
    fn default() -> Self {
        Self {
            selected: None,
            hover: HoverState::default(),
        }
    }
}

impl<K: Clone + Eq> InteractionState<K> {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// The selected node, if any.
    pub fn selected(&self) -> Option<&Selection<K>> {
        self.selected.as_ref()
    }

    /// The hovered node, if any.
    pub fn hovered(&self) -> Option<&K> {
        self.hover.current()
    }

    /// Handle a click resolved to `hit` (`None` when outside every node).
    pub fn click(&mut self, hit: Option<Selection<K>>) -> Vec<InteractionEvent<K>> {
        let mut out = Vec::new();
        match hit {
            Some(sel) => {
                if self.selected.as_ref().is_some_and(|s| s.id == sel.id) {
                    return out;
                }
                if let Some(old) = self.selected.take() {
                    out.push(InteractionEvent::Deselected(old.id));
                }
                out.push(InteractionEvent::Selected(sel.id.clone()));
                self.selected = Some(sel);
                out.extend(self.hover.clear().into_iter().map(InteractionEvent::Hover));
            }
            None => {
                if let Some(old) = self.selected.take() {
                    out.push(InteractionEvent::Deselected(old.id));
                }
            }
        }
        out
    }

    /// Select `sel` directly, as if it had been clicked.
    pub fn select(&mut self, sel: Selection<K>) -> Vec<InteractionEvent<K>> {
        self.click(Some(sel))
    }

    /// Handle a pointer move resolved to `hit` (`None` when outside every node).
    pub fn pointer_over(&mut self, hit: Option<K>) -> Vec<InteractionEvent<K>> {
        if let Some(id) = &hit
            && self.selected.as_ref().is_some_and(|s| &s.id == id)
        {
            return Vec::new();
        }
        self.hover
            .update(hit)
            .into_iter()
            .map(InteractionEvent::Hover)
            .collect()
    }

    /// Drop selection and hover that point at any of `removed`.
    ///
    /// No leave events are emitted for removed nodes; the returned
    /// `Deselected` tells the host to hide selection chrome.
    pub fn forget(&mut self, removed: &[K]) -> Vec<InteractionEvent<K>> {
        let mut out = Vec::new();
        if self.selected.as_ref().is_some_and(|s| removed.contains(&s.id))
            && let Some(old) = self.selected.take()
        {
            out.push(InteractionEvent::Deselected(old.id));
        }
        if let Some(hovered) = self.hover.current().cloned()
            && self.hover.forget(removed)
        {
            out.push(InteractionEvent::Hover(HoverEvent::Leave(hovered)));
        }
        out
    }

    /// Clear both selection and hover.
    pub fn clear(&mut self) -> Vec<InteractionEvent<K>> {
        let mut out: Vec<_> = self.hover.clear().into_iter().map(InteractionEvent::Hover).collect();
        if let Some(old) = self.selected.take() {
            out.push(InteractionEvent::Deselected(old.id));
        }
        out
    }
}
