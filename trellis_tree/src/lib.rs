// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Tree: the element tree behind a visual page builder.
//!
//! A page is an ordered forest of component descriptors ("elements"). Each
//! element has a unique, type-prefixed identifier, a component type, a display
//! name, an opaque payload (`config`, `events`, `methods`), and an ordered list
//! of children.
//!
//! - [`ElementTree`] stores the forest together with an id → node index and keeps
//!   the two in lockstep: every mutation either applies to both or to neither.
//! - [`Element`] is the detached, serializable form of a subtree. It is what you
//!   insert, what snapshots return, and what page documents store.
//! - [`IdGenerator`] issues fresh `<type>_<suffix>` identifiers.
//!
//! ## Where this fits
//!
//! - Element tree: structure and identity (this crate).
//! - Responder: pointer resolution, selection and hover (`trellis_responder`).
//! - Editor: drop, paste, delete, and page persistence (`trellis_editor`).
//!
//! This crate performs no rendering and knows nothing about component types;
//! rules about which types may nest inside which live in the editor.
//!
//! ## Invariants
//!
//! - Identifiers are unique across the whole tree, roots and nested nodes alike.
//! - A node's parent is the node whose child list holds it.
//! - The index contains exactly the nodes reachable from the roots.
//!
//! [`ElementTree::validate`] checks all three and is cheap enough to call from tests
//! after every step.
//!
//! ## Minimal usage
//!
//! ```
//! use trellis_tree::{Element, ElementTree, IdGenerator};
//!
//! let mut tree = ElementTree::new();
//! tree.insert(
//!     None,
//!     Element::new("Form_1", "Form", "Form")
//!         .with_child(Element::new("Input_1", "Input", "Name")),
//! )
//! .unwrap();
//!
//! // Copy the form; every node in the copy gets a fresh id.
//! let ids = IdGenerator::new();
//! let copy = tree.clone_subtree("Form_1", None, &ids).unwrap();
//! assert_eq!(tree.len(), 4);
//! assert_eq!(tree.get(copy.as_str()).unwrap().child_count(), 1);
//!
//! // Removing a node removes its subtree from the structure and the index.
//! let removed = tree.remove("Form_1");
//! assert_eq!(removed.len(), 2);
//! assert!(!tree.contains("Input_1"));
//! tree.validate().unwrap();
//! ```

mod error;
mod id;
mod tree;
mod types;

pub use error::TreeError;
pub use id::IdGenerator;
pub use tree::{Ancestors, ElementRef, ElementTree, Iter};
pub use types::{Element, ElementId, Payload};
