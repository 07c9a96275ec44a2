// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, index, updates, queries.

use std::collections::{HashMap, HashSet};

use crate::error::TreeError;
use crate::id::IdGenerator;
use crate::types::{Element, ElementId, NodeKey, Payload};

impl Default for ElementTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Ordered forest of elements together with its id index.
///
/// Nodes live in a slot arena; roots and children are ordered lists of slot
/// keys, and the index maps each [`ElementId`] to the slot holding that node.
/// Every public mutation updates structure and index in the same call, so the
/// two never disagree once the call returns.
#[derive(Clone)]
pub struct ElementTree {
    nodes: Vec<Option<Node>>, // slots
    generations: Vec<u32>,    // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    roots: Vec<NodeKey>,
    index: HashMap<ElementId, NodeKey>,
}

impl core::fmt::Debug for ElementTree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ElementTree")
            .field("nodes_total", &self.nodes.len())
            .field("nodes_alive", &self.index.len())
            .field("roots", &self.roots.len())
            .field("free_list", &self.free_list.len())
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    id: ElementId,
    kind: String,
    name: String,
    parent: Option<NodeKey>,
    children: Vec<NodeKey>,
    payload: Payload,
}

/// Borrowed view of a node stored in an [`ElementTree`].
///
/// Two views compare equal only when they refer to the same stored node of the
/// same tree, which is how lookups through the index are checked against
/// traversal of the structure.
#[derive(Clone, Copy)]
pub struct ElementRef<'a> {
    tree: &'a ElementTree,
    key: NodeKey,
    node: &'a Node,
}

impl core::fmt::Debug for ElementRef<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ElementRef")
            .field("id", &self.node.id)
            .field("kind", &self.node.kind)
            .field("children", &self.node.children.len())
            .finish_non_exhaustive()
    }
}

impl PartialEq for ElementRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.tree, other.tree) && self.key == other.key
    }
}

impl Eq for ElementRef<'_> {}

impl<'a> ElementRef<'a> {
    /// Identifier of the node.
    pub fn id(self) -> &'a ElementId {
        &self.node.id
    }

    /// Component type of the node.
    pub fn kind(self) -> &'a str {
        &self.node.kind
    }

    /// Display label of the node.
    pub fn name(self) -> &'a str {
        &self.node.name
    }

    /// Opaque payload of the node.
    pub fn payload(self) -> &'a Payload {
        &self.node.payload
    }

    /// The owning node, or `None` for a root.
    pub fn parent(self) -> Option<Self> {
        self.tree.element_ref(self.node.parent?)
    }

    /// Identifier of the owning node, or `None` for a root.
    pub fn parent_id(self) -> Option<&'a ElementId> {
        self.parent().map(Self::id)
    }

    /// True if the node sits at the root level.
    pub fn is_root(self) -> bool {
        self.node.parent.is_none()
    }

    /// Children in order.
    pub fn children(self) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        let tree = self.tree;
        self.node
            .children
            .iter()
            .filter_map(move |&key| tree.element_ref(key))
    }

    /// Number of direct children.
    pub fn child_count(self) -> usize {
        self.node.children.len()
    }

    /// Detached deep copy of this node and its subtree.
    pub fn to_element(self) -> Element {
        Element {
            id: self.node.id.clone(),
            kind: self.node.kind.clone(),
            name: self.node.name.clone(),
            parent_id: self.parent_id().cloned(),
            payload: self.node.payload.clone(),
            elements: self.children().map(Self::to_element).collect(),
        }
    }
}

/// Ancestors of a node, nearest first. See [`ElementTree::ancestors`].
#[derive(Clone, Debug)]
pub struct Ancestors<'a> {
    next: Option<ElementRef<'a>>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = ElementRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = current.parent();
        Some(current)
    }
}

/// Pre-order traversal. See [`ElementTree::iter`].
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    tree: &'a ElementTree,
    stack: Vec<NodeKey>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = ElementRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(key) = self.stack.pop() {
            let Some(el) = self.tree.element_ref(key) else {
                continue;
            };
            self.stack.extend(el.node.children.iter().rev());
            return Some(el);
        }
        None
    }
}

impl ElementTree {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            roots: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Build a tree from a list of detached root elements, in order.
    ///
    /// Fails if the elements repeat an identifier or carry parent ids that do
    /// not match their position.
    pub fn from_elements(elements: Vec<Element>) -> Result<Self, TreeError> {
        let mut tree = Self::new();
        for el in elements {
            tree.insert(None, el)?;
        }
        Ok(tree)
    }

    /// Number of nodes, roots and nested alike.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// True if the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// True if `id` names a node in the tree.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Look up a node by identifier.
    pub fn get(&self, id: &str) -> Option<ElementRef<'_>> {
        let key = *self.index.get(id)?;
        self.element_ref(key)
    }

    /// Root-level nodes in order.
    pub fn roots(&self) -> impl Iterator<Item = ElementRef<'_>> + '_ {
        self.roots.iter().filter_map(|&key| self.element_ref(key))
    }

    /// The owning node of `id`, or `None` if `id` is a root or unknown.
    pub fn parent_of(&self, id: &str) -> Option<ElementRef<'_>> {
        self.get(id)?.parent()
    }

    /// Ancestors of `id`, nearest first, not including `id` itself.
    pub fn ancestors(&self, id: &str) -> Ancestors<'_> {
        Ancestors {
            next: self.get(id).and_then(ElementRef::parent),
        }
    }

    /// Identifiers from the root down to `id` (inclusive). Empty if `id` is unknown.
    pub fn path_to_root(&self, id: &str) -> Vec<ElementId> {
        let Some(el) = self.get(id) else {
            return Vec::new();
        };
        let mut out = vec![el.id().clone()];
        out.extend(self.ancestors(id).map(|a| a.id().clone()));
        out.reverse();
        out
    }

    /// Nesting level of `id`: 1 for a root, 0 if `id` is unknown.
    pub fn depth(&self, id: &str) -> usize {
        if self.contains(id) {
            self.ancestors(id).count() + 1
        } else {
            0
        }
    }

    /// Levels in the subtree rooted at `id`: 1 for a leaf, 0 if `id` is unknown.
    pub fn height(&self, id: &str) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<_> = self.get(id).map(|el| (el, 1_usize)).into_iter().collect();
        while let Some((el, level)) = stack.pop() {
            deepest = deepest.max(level);
            stack.extend(el.children().map(|c| (c, level + 1)));
        }
        deepest
    }

    /// All nodes in pre-order (each root followed by its subtree, children in order).
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            tree: self,
            stack: self.roots.iter().rev().copied().collect(),
        }
    }

    /// All identifiers in pre-order.
    pub fn ids(&self) -> Vec<ElementId> {
        self.iter().map(|el| el.id().clone()).collect()
    }

    /// Insert a detached subtree as the last child of `parent` (or as the last root if `None`).
    ///
    /// The whole subtree is checked before anything is written: every identifier
    /// must be new to the tree and distinct within the subtree, and every
    /// declared `parent_id` must match where the element lands. On success all
    /// nodes are linked and indexed together.
    pub fn insert(&mut self, parent: Option<&str>, element: Element) -> Result<ElementId, TreeError> {
        let parent_key = match parent {
            Some(p) => Some(
                *self
                    .index
                    .get(p)
                    .ok_or_else(|| TreeError::ParentNotFound { id: p.into() })?,
            ),
            None => None,
        };
        self.check_insertable(parent, &element)?;
        let id = element.id.clone();
        let count = element.count();
        self.attach(parent_key, element);
        tracing::trace!(%id, parent = ?parent, count, "inserted subtree");
        Ok(id)
    }

    /// Remove `id` and its entire subtree.
    ///
    /// Returns the removed identifiers in pre-order; empty if `id` is unknown.
    pub fn remove(&mut self, id: &str) -> Vec<ElementId> {
        let Some(&key) = self.index.get(id) else {
            return Vec::new();
        };
        match self.node(key).and_then(|n| n.parent) {
            Some(parent) => {
                if let Some(p) = self.node_mut(parent) {
                    p.children.retain(|c| *c != key);
                }
            }
            None => self.roots.retain(|r| *r != key),
        }
        let mut removed = Vec::new();
        let mut stack = vec![key];
        while let Some(k) = stack.pop() {
            if self.node(k).is_none() {
                continue;
            }
            let Some(node) = self.nodes[k.idx()].take() else {
                continue;
            };
            self.index.remove(&node.id);
            self.free_list.push(k.idx());
            stack.extend(node.children.iter().rev());
            removed.push(node.id);
        }
        tracing::trace!(id, count = removed.len(), "removed subtree");
        removed
    }

    /// Change the display label of `id`. Returns false if `id` is unknown.
    pub fn rename(&mut self, id: &str, name: impl Into<String>) -> bool {
        let Some(&key) = self.index.get(id) else {
            return false;
        };
        match self.node_mut(key) {
            Some(node) => {
                node.name = name.into();
                true
            }
            None => false,
        }
    }

    /// Detached deep copy of `id` and its subtree.
    pub fn snapshot(&self, id: &str) -> Option<Element> {
        self.get(id).map(ElementRef::to_element)
    }

    /// Detached deep copy of the whole forest.
    pub fn to_elements(&self) -> Vec<Element> {
        self.roots().map(ElementRef::to_element).collect()
    }

    /// Copy the subtree rooted at `source` under `parent` (or to the root level).
    ///
    /// The copy has the same shape, order, names, types, and payloads as the
    /// source, and every node in it gets a fresh identifier from `ids`, assigned
    /// in pre-order. The copy is inserted in one step and appended after any
    /// existing children of `parent`.
    pub fn clone_subtree(
        &mut self,
        source: &str,
        parent: Option<&str>,
        ids: &IdGenerator,
    ) -> Result<ElementId, TreeError> {
        let original = self
            .snapshot(source)
            .ok_or_else(|| TreeError::NotFound { id: source.into() })?;
        if let Some(p) = parent
            && !self.contains(p)
        {
            return Err(TreeError::ParentNotFound { id: p.into() });
        }
        let mut minted = HashSet::new();
        let copy = self.reidentify(original, parent.map(ElementId::from), ids, &mut minted);
        self.insert(parent, copy)
    }

    /// Issue an identifier for a node of type `kind` that is not present in the tree.
    pub fn mint_id(&self, ids: &IdGenerator, kind: &str) -> ElementId {
        loop {
            let id = ids.create_id(kind);
            if !self.contains(id.as_str()) {
                return id;
            }
        }
    }

    /// Drop every node.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.generations.clear();
        self.free_list.clear();
        self.roots.clear();
        self.index.clear();
    }

    /// Check the structural invariants.
    ///
    /// - Every node reachable from the roots is indexed under its own id, at its own slot.
    /// - Every child's parent link names the node whose child list holds it.
    /// - The index holds nothing that is not reachable.
    pub fn validate(&self) -> Result<(), TreeError> {
        let mut reachable = 0_usize;
        let mut stack: Vec<(NodeKey, Option<NodeKey>)> =
            self.roots.iter().rev().map(|&k| (k, None)).collect();
        while let Some((key, expected_parent)) = stack.pop() {
            let Some(node) = self.node(key) else {
                return Err(TreeError::Inconsistent {
                    id: ElementId::new(format!("#{}", key.idx())),
                    reason: "child list points at a free slot",
                });
            };
            if node.parent != expected_parent {
                return Err(TreeError::Inconsistent {
                    id: node.id.clone(),
                    reason: "parent link does not match the containing node",
                });
            }
            if self.index.get(&node.id) != Some(&key) {
                return Err(TreeError::Inconsistent {
                    id: node.id.clone(),
                    reason: "index entry is missing or points at another slot",
                });
            }
            reachable += 1;
            if reachable > self.nodes.len() {
                return Err(TreeError::Inconsistent {
                    id: node.id.clone(),
                    reason: "cycle in child links",
                });
            }
            stack.extend(node.children.iter().rev().map(|&c| (c, Some(key))));
        }
        if reachable != self.index.len() {
            return Err(TreeError::Inconsistent {
                id: ElementId::new("<index>"),
                reason: "index holds entries that are not reachable from the roots",
            });
        }
        Ok(())
    }

    // --- internals ---

    fn element_ref(&self, key: NodeKey) -> Option<ElementRef<'_>> {
        let node = self.node(key)?;
        Some(ElementRef {
            tree: self,
            key,
            node,
        })
    }

    fn node(&self, key: NodeKey) -> Option<&Node> {
        let n = self.nodes.get(key.idx())?.as_ref()?;
        (n.generation == key.generation()).then_some(n)
    }

    fn node_mut(&mut self, key: NodeKey) -> Option<&mut Node> {
        let n = self.nodes.get_mut(key.idx())?.as_mut()?;
        if n.generation != key.generation() {
            return None;
        }
        Some(n)
    }

    fn check_insertable(&self, parent: Option<&str>, element: &Element) -> Result<(), TreeError> {
        let mut seen = HashSet::new();
        let mut stack = vec![(parent, element)];
        while let Some((actual, el)) = stack.pop() {
            if self.contains(el.id.as_str()) || !seen.insert(el.id.as_str()) {
                return Err(TreeError::DuplicateId { id: el.id.clone() });
            }
            if let Some(declared) = &el.parent_id
                && Some(declared.as_str()) != actual
            {
                return Err(TreeError::ParentMismatch {
                    id: el.id.clone(),
                    declared: declared.clone(),
                    actual: actual.map(ElementId::from),
                });
            }
            stack.extend(el.elements.iter().map(|c| (Some(el.id.as_str()), c)));
        }
        Ok(())
    }

    fn attach(&mut self, parent: Option<NodeKey>, element: Element) -> NodeKey {
        let Element {
            id,
            kind,
            name,
            payload,
            elements,
            ..
        } = element;
        let key = self.alloc(id.clone(), kind, name, payload, parent);
        self.index.insert(id, key);
        match parent {
            Some(p) => {
                if let Some(parent_node) = self.node_mut(p) {
                    parent_node.children.push(key);
                }
            }
            None => self.roots.push(key),
        }
        for child in elements {
            self.attach(Some(key), child);
        }
        key
    }

    fn alloc(
        &mut self,
        id: ElementId,
        kind: String,
        name: String,
        payload: Payload,
        parent: Option<NodeKey>,
    ) -> NodeKey {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            (idx, generation)
        } else {
            self.nodes.push(None);
            self.generations.push(1);
            (self.nodes.len() - 1, 1)
        };
        self.nodes[idx] = Some(Node {
            generation,
            id,
            kind,
            name,
            parent,
            children: Vec::new(),
            payload,
        });
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Slot keys use 32-bit indices by design."
        )]
        NodeKey::new(idx as u32, generation)
    }

    fn reidentify(
        &self,
        source: Element,
        parent: Option<ElementId>,
        ids: &IdGenerator,
        minted: &mut HashSet<ElementId>,
    ) -> Element {
        let id = loop {
            let candidate = ids.create_id(&source.kind);
            if !self.contains(candidate.as_str()) && minted.insert(candidate.clone()) {
                break candidate;
            }
        };
        let Element {
            kind,
            name,
            payload,
            elements,
            ..
        } = source;
        let elements = elements
            .into_iter()
            .map(|child| self.reidentify(child, Some(id.clone()), ids, minted))
            .collect();
        Element {
            id,
            kind,
            name,
            parent_id: parent,
            payload,
            elements,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ids() -> IdGenerator {
        IdGenerator::with_seed("test")
    }

    fn form_with_fields() -> Element {
        Element::new("Form_1", "Form", "Form")
            .with_payload(Payload {
                config: json!({ "props": { "layout": "horizontal" } }),
                ..Default::default()
            })
            .with_child(Element::new("Input_1", "Input", "Name"))
            .with_child(
                Element::new("Row_1", "Row", "Row").with_child(Element::new("Select_1", "Select", "City")),
            )
            .with_child(Element::new("Button_1", "Button", "Submit"))
    }

    fn strs(ids: &[ElementId]) -> Vec<&str> {
        ids.iter().map(ElementId::as_str).collect()
    }

    #[test]
    fn insert_root_and_children() {
        let mut tree = ElementTree::new();
        tree.insert(None, form_with_fields()).unwrap();
        tree.insert(None, Element::new("Text_1", "Text", "Title")).unwrap();

        assert_eq!(tree.len(), 6);
        let roots: Vec<_> = tree.roots().map(|r| r.id().as_str()).collect();
        assert_eq!(roots, ["Form_1", "Text_1"]);
        assert_eq!(
            strs(&tree.ids()),
            ["Form_1", "Input_1", "Row_1", "Select_1", "Button_1", "Text_1"]
        );
        assert_eq!(tree.parent_of("Select_1").unwrap().id(), &"Row_1");
        assert!(tree.get("Form_1").unwrap().is_root());
        tree.validate().unwrap();
    }

    #[test]
    fn insert_under_parent_appends_last() {
        let mut tree = ElementTree::new();
        tree.insert(None, form_with_fields()).unwrap();
        tree.insert(Some("Form_1"), Element::new("Switch_1", "Switch", "On"))
            .unwrap();
        let kids: Vec<_> = tree
            .get("Form_1")
            .unwrap()
            .children()
            .map(|c| c.id().as_str())
            .collect();
        assert_eq!(kids, ["Input_1", "Row_1", "Button_1", "Switch_1"]);
        assert_eq!(tree.get("Switch_1").unwrap().parent_id().unwrap(), &"Form_1");
        tree.validate().unwrap();
    }

    #[test]
    fn index_and_traversal_see_the_same_nodes() {
        let mut tree = ElementTree::new();
        tree.insert(None, form_with_fields()).unwrap();
        for el in tree.iter() {
            assert_eq!(tree.get(el.id().as_str()), Some(el), "index must resolve {}", el.id());
        }
        assert_eq!(tree.iter().count(), tree.len());
    }

    #[test]
    fn depth_and_height() {
        let mut tree = ElementTree::new();
        tree.insert(None, form_with_fields()).unwrap();
        assert_eq!(tree.depth("Form_1"), 1);
        assert_eq!(tree.depth("Select_1"), 3);
        assert_eq!(tree.depth("nope"), 0);
        assert_eq!(tree.height("Form_1"), 3);
        assert_eq!(tree.height("Row_1"), 2);
        assert_eq!(tree.height("Button_1"), 1);
        assert_eq!(tree.height("nope"), 0);
    }

    #[test]
    fn duplicate_id_is_rejected_without_partial_insert() {
        let mut tree = ElementTree::new();
        tree.insert(None, form_with_fields()).unwrap();
        let clash = Element::new("Card_1", "Card", "Card")
            .with_child(Element::new("Text_9", "Text", ""))
            .with_child(Element::new("Input_1", "Input", "dup"));
        let err = tree.insert(None, clash).unwrap_err();
        assert_eq!(err, TreeError::DuplicateId { id: "Input_1".into() });
        assert!(!tree.contains("Card_1"), "nothing from the rejected subtree may land");
        assert!(!tree.contains("Text_9"));
        assert_eq!(tree.len(), 5);
        tree.validate().unwrap();
    }

    #[test]
    fn duplicate_within_subtree_is_rejected() {
        let mut tree = ElementTree::new();
        let twice = Element::new("A_1", "A", "")
            .with_child(Element::new("B_1", "B", ""))
            .with_child(Element::new("B_1", "B", ""));
        assert!(matches!(tree.insert(None, twice), Err(TreeError::DuplicateId { .. })));
        assert!(tree.is_empty());
    }

    #[test]
    fn missing_parent_is_rejected() {
        let mut tree = ElementTree::new();
        let err = tree
            .insert(Some("Nope_1"), Element::new("A_1", "A", ""))
            .unwrap_err();
        assert_eq!(err, TreeError::ParentNotFound { id: "Nope_1".into() });
        assert!(tree.is_empty());
    }

    #[test]
    fn declared_parent_must_match_placement() {
        let mut tree = ElementTree::new();
        tree.insert(None, Element::new("Form_1", "Form", "")).unwrap();
        let mut stray = Element::new("Input_1", "Input", "");
        stray.parent_id = Some("Elsewhere_1".into());
        assert!(matches!(
            tree.insert(Some("Form_1"), stray.clone()),
            Err(TreeError::ParentMismatch { .. })
        ));
        stray.parent_id = Some("Form_1".into());
        tree.insert(Some("Form_1"), stray).unwrap();
        tree.validate().unwrap();
    }

    #[test]
    fn remove_takes_whole_subtree() {
        let mut tree = ElementTree::new();
        tree.insert(None, form_with_fields()).unwrap();
        tree.insert(None, Element::new("Text_1", "Text", "")).unwrap();

        let removed = tree.remove("Row_1");
        assert_eq!(strs(&removed), ["Row_1", "Select_1"]);
        assert!(!tree.contains("Select_1"));
        assert_eq!(tree.len(), 4);
        tree.validate().unwrap();

        let removed = tree.remove("Form_1");
        assert_eq!(strs(&removed), ["Form_1", "Input_1", "Button_1"]);
        assert_eq!(strs(&tree.ids()), ["Text_1"]);
        tree.validate().unwrap();
    }

    #[test]
    fn remove_unknown_is_a_no_op() {
        let mut tree = ElementTree::new();
        tree.insert(None, form_with_fields()).unwrap();
        assert!(tree.remove("Ghost_1").is_empty());
        assert!(tree.remove("Row_1").len() == 2);
        assert!(tree.remove("Row_1").is_empty(), "second removal resolves nothing");
        tree.validate().unwrap();
    }

    #[test]
    fn slots_are_reused_after_removal() {
        let mut tree = ElementTree::new();
        tree.insert(None, Element::new("A_1", "A", "")).unwrap();
        tree.remove("A_1");
        tree.insert(None, Element::new("B_1", "B", "")).unwrap();
        assert_eq!(tree.nodes.len(), 1, "freed slot should be reused");
        assert_eq!(tree.generations[0], 2, "generation must increase on reuse");
        tree.validate().unwrap();
    }

    #[test]
    fn ancestors_and_path() {
        let mut tree = ElementTree::new();
        tree.insert(None, form_with_fields()).unwrap();
        let up: Vec<_> = tree.ancestors("Select_1").map(|a| a.id().as_str()).collect();
        assert_eq!(up, ["Row_1", "Form_1"]);
        assert_eq!(strs(&tree.path_to_root("Select_1")), ["Form_1", "Row_1", "Select_1"]);
        assert!(tree.path_to_root("Ghost_1").is_empty());
        assert_eq!(tree.ancestors("Form_1").count(), 0);
    }

    #[test]
    fn snapshot_round_trips_through_from_elements() {
        let mut tree = ElementTree::new();
        tree.insert(None, form_with_fields()).unwrap();
        tree.insert(None, Element::new("Text_1", "Text", "Title")).unwrap();
        let elements = tree.to_elements();
        let rebuilt = ElementTree::from_elements(elements.clone()).unwrap();
        assert_eq!(rebuilt.to_elements(), elements);
        assert_eq!(rebuilt.ids(), tree.ids());
        rebuilt.validate().unwrap();
    }

    #[test]
    fn clone_subtree_is_isomorphic_and_disjoint() {
        let mut tree = ElementTree::new();
        tree.insert(None, form_with_fields()).unwrap();
        let before: HashSet<_> = tree.ids().into_iter().collect();

        let copy_id = tree.clone_subtree("Form_1", None, &ids()).unwrap();
        let original = tree.snapshot("Form_1").unwrap();
        let copy = tree.snapshot(copy_id.as_str()).unwrap();

        fn shape(el: &Element) -> Vec<(String, String, serde_json::Value)> {
            let mut out = vec![(el.kind.clone(), el.name.clone(), el.payload.config.clone())];
            for c in &el.elements {
                out.extend(shape(c));
            }
            out
        }
        assert_eq!(shape(&original), shape(&copy));
        for id in copy.ids() {
            assert!(!before.contains(&id), "clone reused id {id}");
            assert_eq!(id.kind_prefix(), tree.get(id.as_str()).unwrap().kind());
        }
        assert_eq!(tree.len(), 10);
        tree.validate().unwrap();
    }

    #[test]
    fn clone_preserves_child_order() {
        let mut tree = ElementTree::new();
        tree.insert(
            None,
            Element::new("Row_1", "Row", "")
                .with_child(Element::new("A_1", "A", "a"))
                .with_child(Element::new("B_1", "B", "b"))
                .with_child(Element::new("C_1", "C", "c")),
        )
        .unwrap();
        let copy = tree.clone_subtree("Row_1", None, &ids()).unwrap();
        let names: Vec<_> = tree
            .get(copy.as_str())
            .unwrap()
            .children()
            .map(|c| c.name())
            .collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn clone_under_parent_nests_one_level_deeper() {
        let mut tree = ElementTree::new();
        tree.insert(None, form_with_fields()).unwrap();
        let copy = tree
            .clone_subtree("Input_1", Some("Row_1"), &ids())
            .unwrap();
        assert_eq!(tree.parent_of(copy.as_str()).unwrap().id(), &"Row_1");
        assert_eq!(tree.get("Row_1").unwrap().child_count(), 2);
        tree.validate().unwrap();
    }

    #[test]
    fn clone_of_missing_source_fails_cleanly() {
        let mut tree = ElementTree::new();
        tree.insert(None, form_with_fields()).unwrap();
        assert_eq!(
            tree.clone_subtree("Ghost_1", None, &ids()),
            Err(TreeError::NotFound { id: "Ghost_1".into() })
        );
        assert_eq!(
            tree.clone_subtree("Input_1", Some("Ghost_1"), &ids()),
            Err(TreeError::ParentNotFound { id: "Ghost_1".into() })
        );
        assert_eq!(tree.len(), 5);
    }

    #[test]
    fn rename_changes_only_the_label() {
        let mut tree = ElementTree::new();
        tree.insert(None, form_with_fields()).unwrap();
        assert!(tree.rename("Input_1", "Email"));
        assert_eq!(tree.get("Input_1").unwrap().name(), "Email");
        assert!(!tree.rename("Ghost_1", "x"));
    }

    #[test]
    fn mint_id_avoids_existing_ids() {
        let tree = ElementTree::new();
        let id = tree.mint_id(&ids(), "Card");
        assert!(id.as_str().starts_with("Card_"));
        assert!(!tree.contains(id.as_str()));
    }

    #[test]
    fn clear_empties_everything() {
        let mut tree = ElementTree::new();
        tree.insert(None, form_with_fields()).unwrap();
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.roots().count(), 0);
        tree.validate().unwrap();
    }
}
