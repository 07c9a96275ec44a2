// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag-and-drop insertion.
//!
//! ## Protocol
//!
//! 1) Claim: drop surfaces are nested, and a drop released over an inner
//!    surface bubbles to every surface around it. The innermost surface calls
//!    [`DropClaim::try_claim`] first; the others find the claim taken and
//!    report [`DropOutcome::NotOwned`].
//! 2) Resolve: the dragged type's schema is awaited.
//! 3) Validate: placement rules are checked against the target.
//! 4) Materialize: default children are resolved, every level concurrently,
//!    into a [`Blueprint`] tree.
//! 5) Commit: ids are assigned and the subtree is inserted in one synchronous
//!    step, unless the claim was cancelled, the page changed, or the target
//!    disappeared meanwhile.
//!
//! [`SharedEditor::drop_item`](crate::shared::SharedEditor::drop_item) runs all
//! five steps.

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use trellis_tree::{Element, ElementId, ElementTree, IdGenerator, Payload};

use crate::error::EditorError;
use crate::schema::{ChildDescriptor, SchemaPayload, SchemaResolver};

/// The component being dragged.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragItem {
    /// Identifier to give the new node. A fresh one is minted when absent or already taken.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ElementId>,
    /// Component type.
    #[serde(rename = "type")]
    pub kind: String,
    /// Display label of the new node.
    #[serde(default)]
    pub name: String,
}

impl DragItem {
    /// Drag a new component of type `kind`.
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: None,
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Request a specific id for the new node.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<ElementId>) -> Self {
        self.id = Some(id.into());
        self
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
enum ClaimState {
    #[default]
    Open,
    Claimed,
    Cancelled,
}

/// Ownership token shared by every surface a single drop is delivered to.
///
/// Clones refer to the same claim.
#[derive(Clone, Debug, Default)]
pub struct DropClaim(Rc<Cell<ClaimState>>);

impl DropClaim {
    /// A fresh, unclaimed token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of the drop. Returns false if another surface already
    /// owns it or the drop was cancelled.
    pub fn try_claim(&self) -> bool {
        if self.0.get() == ClaimState::Open {
            self.0.set(ClaimState::Claimed);
            return true;
        }
        false
    }

    /// Abandon the drop. An in-flight insert stops before it commits.
    pub fn cancel(&self) {
        self.0.set(ClaimState::Cancelled);
    }

    /// Whether the drop was cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.0.get() == ClaimState::Cancelled
    }

    /// Whether some surface owns the drop.
    pub fn is_claimed(&self) -> bool {
        self.0.get() == ClaimState::Claimed
    }
}

/// A drop delivered to one surface.
#[derive(Clone, Debug)]
pub struct DropEvent {
    /// What is being dropped.
    pub item: DragItem,
    /// The container the surface belongs to; `None` for the page itself.
    pub target: Option<ElementId>,
    /// Ownership token shared with the other surfaces receiving this drop.
    pub claim: DropClaim,
}

impl DropEvent {
    /// A new drop with its own claim.
    pub fn new(item: DragItem, target: Option<ElementId>) -> Self {
        Self {
            item,
            target,
            claim: DropClaim::new(),
        }
    }

    /// The same drop, delivered to the surface of `target`.
    pub fn bubble_to(&self, target: Option<ElementId>) -> Self {
        Self {
            item: self.item.clone(),
            target,
            claim: self.claim.clone(),
        }
    }
}

/// What a surface did with a drop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DropOutcome {
    /// The component was inserted under this id.
    Inserted(ElementId),
    /// Another surface owns the drop.
    NotOwned,
}

/// A resolved node waiting for an id.
#[derive(Clone, Debug, PartialEq)]
pub struct Blueprint {
    /// Component type.
    pub kind: String,
    /// Display label.
    pub name: String,
    /// Resolved payload.
    pub payload: Payload,
    /// Resolved children in order.
    pub children: Vec<Blueprint>,
}

impl Blueprint {
    /// Assign ids top-down and produce the detached element.
    ///
    /// `id` is used for the root; descendants get fresh ids absent from `tree`.
    pub fn realize(self, id: ElementId, tree: &ElementTree, ids: &IdGenerator) -> Element {
        let mut element = Element::new(id, self.kind, self.name).with_payload(self.payload);
        for child in self.children {
            let child_id = tree.mint_id(ids, &child.kind);
            element = element.with_child(child.realize(child_id, tree, ids));
        }
        element
    }

    /// Number of nodes, including `self`.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Self::count).sum::<usize>()
    }

    /// Levels in this subtree; 1 for a leaf.
    pub fn height(&self) -> usize {
        1 + self.children.iter().map(Self::height).max().unwrap_or(0)
    }
}

/// A drop that has been resolved and validated, waiting to commit.
#[derive(Debug)]
pub struct PreparedDrop {
    pub(crate) event: DropEvent,
    pub(crate) node: Blueprint,
    pub(crate) epoch: u64,
}

impl PreparedDrop {
    /// The drop being committed.
    pub fn event(&self) -> &DropEvent {
        &self.event
    }

    /// The resolved subtree.
    pub fn blueprint(&self) -> &Blueprint {
        &self.node
    }
}

struct Resolved {
    parent: Option<usize>,
    child: ChildDescriptor,
    schema: SchemaPayload,
}

/// Resolve the default children declared by `schema`, and theirs, up to `max_depth` levels.
///
/// Each level is resolved concurrently. The first failure aborts the rest.
pub async fn materialize<R: SchemaResolver>(
    resolver: &R,
    kind: &str,
    schema: &SchemaPayload,
    max_depth: usize,
) -> Result<Vec<Blueprint>, EditorError> {
    let mut levels: Vec<Vec<Resolved>> = Vec::new();
    let mut frontier: Vec<(Option<usize>, ChildDescriptor)> =
        schema.elements.iter().map(|c| (None, c.clone())).collect();
    while !frontier.is_empty() {
        if levels.len() == max_depth {
            return Err(EditorError::DefaultsTooDeep {
                kind: kind.into(),
                limit: max_depth,
            });
        }
        let schemas = try_join_all(frontier.iter().map(|(_, child)| async move {
            resolver
                .resolve(&child.kind)
                .await
                .map_err(|source| EditorError::ResolutionFailed {
                    kind: child.kind.clone(),
                    source,
                })
        }))
        .await?;
        let level: Vec<Resolved> = frontier
            .into_iter()
            .zip(schemas)
            .map(|((parent, child), schema)| Resolved {
                parent,
                child,
                schema,
            })
            .collect();
        frontier = level
            .iter()
            .enumerate()
            .flat_map(|(i, r)| r.schema.elements.iter().map(move |c| (Some(i), c.clone())))
            .collect();
        levels.push(level);
    }

    // Assemble bottom-up; children of one parent are contiguous and in order.
    let mut top = Vec::new();
    let mut pending: HashMap<usize, Vec<Blueprint>> = HashMap::new();
    for level in levels.into_iter().rev() {
        let mut parents: HashMap<usize, Vec<Blueprint>> = HashMap::new();
        for (i, node) in level.into_iter().enumerate() {
            let blueprint = Blueprint {
                payload: node.schema.payload(),
                kind: node.child.kind,
                name: node.child.name,
                children: pending.remove(&i).unwrap_or_default(),
            };
            match node.parent {
                Some(p) => parents.entry(p).or_default().push(blueprint),
                None => top.push(blueprint),
            }
        }
        pending = parents;
    }
    Ok(top)
}
