// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the element tree: identifiers, payloads, and detached elements.

use core::borrow::Borrow;
use core::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier for an element in the tree.
///
/// Identifiers have the form `<type>_<suffix>`, are unique across the whole tree
/// (roots and nested nodes alike), and never change once assigned.
/// New identifiers come from [`IdGenerator`](crate::IdGenerator); identifiers
/// read back from a stored page document are taken as-is.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// Wrap an existing identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The component type encoded in the identifier (the part before the first `_`).
    ///
    /// Identifiers without a separator are returned whole.
    pub fn kind_prefix(&self) -> &str {
        self.0.split_once('_').map_or(self.0.as_str(), |(kind, _)| kind)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ElementId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ElementId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for ElementId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl PartialEq<str> for ElementId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ElementId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Per-type payload carried by every element.
///
/// The tree never looks inside these values; they are produced by a schema
/// resolver and handed back unchanged to whoever renders or saves the page.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    /// Component configuration (props, style, ...).
    #[serde(default)]
    pub config: Value,
    /// Event bindings.
    #[serde(default)]
    pub events: Value,
    /// Method bindings.
    #[serde(default)]
    pub methods: Value,
}

/// A detached element subtree.
///
/// This is the owned, serializable form of a node and its descendants. It is
/// what gets inserted into an [`ElementTree`](crate::ElementTree), what
/// [`ElementTree::snapshot`](crate::ElementTree::snapshot) returns, and what a
/// page document stores.
///
/// `parent_id` is informational: on insertion it must either be absent or match
/// the node the element actually lands under.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    /// Unique identifier.
    pub id: ElementId,
    /// Component type name.
    #[serde(rename = "type")]
    pub kind: String,
    /// Display label.
    #[serde(default)]
    pub name: String,
    /// Owning element, absent for roots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<ElementId>,
    /// Opaque per-type payload.
    #[serde(flatten)]
    pub payload: Payload,
    /// Ordered children.
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl Element {
    /// Create a childless element with an empty payload.
    pub fn new(id: impl Into<ElementId>, kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            name: name.into(),
            parent_id: None,
            payload: Payload::default(),
            elements: Vec::new(),
        }
    }

    /// Replace the payload.
    #[must_use]
    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = payload;
        self
    }

    /// Append a child, recording `self` as its parent.
    #[must_use]
    pub fn with_child(mut self, mut child: Self) -> Self {
        child.parent_id = Some(self.id.clone());
        self.elements.push(child);
        self
    }

    /// Number of elements in this subtree, including `self`.
    pub fn count(&self) -> usize {
        1 + self.elements.iter().map(Self::count).sum::<usize>()
    }

    /// Identifiers of this subtree in pre-order.
    pub fn ids(&self) -> Vec<ElementId> {
        let mut out = Vec::with_capacity(self.count());
        let mut stack = vec![self];
        while let Some(el) = stack.pop() {
            out.push(el.id.clone());
            stack.extend(el.elements.iter().rev());
        }
        out
    }
}

/// Handle of an arena slot.
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing key that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub(crate) struct NodeKey(u32, u32);

impl NodeKey {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    pub(crate) const fn generation(self) -> u32 {
        self.1
    }
}
