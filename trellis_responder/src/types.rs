// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for the responder: lookups, selections, and interaction events.
//!
//! ## Overview
//!
//! These types describe the inputs and outputs of pointer handling.
//! They are used by [`resolve`](crate::resolve), [`hover`](crate::hover), and
//! [`selection`](crate::selection), and by the editor that wires them together.

use crate::hover::HoverEvent;

/// Map render nodes to engine identities.
///
/// A rendered component is usually made of many host nodes, and only its outer
/// node carries the element's identity. Implement this for your host node type
/// so the resolver can tell the two apart.
pub trait IdentityLookup<K> {
    /// Identity type associated with a render node (for the editor, an element id).
    type Identity: Clone + core::fmt::Debug;
    /// Returns the identity carried by `node`, or `None` for anonymous nodes.
    fn identity_of(&self, node: &K) -> Option<Self::Identity>;
}

/// Look up the parent of a node so the resolver can walk towards the root.
pub trait ParentLookup<K> {
    /// Returns the parent of `node`, or `None` if `node` is a root.
    fn parent_of(&self, node: &K) -> Option<K>;
}

/// The selected node, with its component type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection<K> {
    /// Selected node.
    pub id: K,
    /// Component type of the selected node.
    pub kind: String,
}

impl<K> Selection<K> {
    /// Build a selection.
    pub fn new(id: K, kind: impl Into<String>) -> Self {
        Self {
            id,
            kind: kind.into(),
        }
    }
}

/// A transition of the selection or hover state.
///
/// Returned by every [`InteractionState`](crate::selection::InteractionState)
/// update so the host can repaint outlines and toolbars.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InteractionEvent<K> {
    /// The node became selected.
    Selected(K),
    /// The node stopped being selected.
    Deselected(K),
    /// Hover changed.
    Hover(HoverEvent<K>),
}
