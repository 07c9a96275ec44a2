// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapter helpers for Trellis Tree.
//!
//! ## Feature
//!
//! Enable with `element_tree_adapter`.
//!
//! ## Notes
//!
//! An [`ElementTree`] is its own parent source and identity source: every
//! node carries an identity, so resolving against the tree alone is the
//! identity function for live ids. Its use is resolving selection targets
//! into [`Selection`] values and walking element ancestry.

use trellis_tree::{ElementId, ElementTree};

use crate::types::{IdentityLookup, ParentLookup, Selection};

impl ParentLookup<ElementId> for ElementTree {
    fn parent_of(&self, node: &ElementId) -> Option<ElementId> {
        Self::parent_of(self, node.as_str()).map(|p| p.id().clone())
    }
}

impl IdentityLookup<ElementId> for ElementTree {
    type Identity = ElementId;

    fn identity_of(&self, node: &ElementId) -> Option<ElementId> {
        self.contains(node.as_str()).then(|| node.clone())
    }
}

/// Build the [`Selection`] for a live element, carrying its component type.
///
/// Returns `None` if `id` is not in the tree.
pub fn selection_for(tree: &ElementTree, id: &str) -> Option<Selection<ElementId>> {
    let el = tree.get(id)?;
    Some(Selection::new(el.id().clone(), el.kind()))
}
