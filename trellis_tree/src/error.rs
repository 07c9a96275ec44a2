// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural errors reported by the tree.

use thiserror::Error;

use crate::types::ElementId;

/// A structural mutation the tree refused to apply.
///
/// Every failing operation leaves the tree and its index exactly as they were.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    /// The identifier is already present in the tree, or appears twice in the inserted subtree.
    #[error("element id `{id}` is already in use")]
    DuplicateId {
        /// The conflicting identifier.
        id: ElementId,
    },
    /// The requested parent does not exist.
    #[error("parent element `{id}` does not exist")]
    ParentNotFound {
        /// The missing parent.
        id: ElementId,
    },
    /// A detached element declares a parent other than the one it is inserted under.
    #[error("element `{id}` declares parent {declared:?} but is placed under {actual:?}")]
    ParentMismatch {
        /// The offending element.
        id: ElementId,
        /// The parent recorded on the element.
        declared: ElementId,
        /// Where the element was actually being placed.
        actual: Option<ElementId>,
    },
    /// The source element of a copy does not exist.
    #[error("element `{id}` does not exist")]
    NotFound {
        /// The missing element.
        id: ElementId,
    },
    /// An internal invariant does not hold; reported by [`ElementTree::validate`](crate::ElementTree::validate).
    #[error("inconsistent tree at `{id}`: {reason}")]
    Inconsistent {
        /// Where the inconsistency was found.
        id: ElementId,
        /// What is wrong.
        reason: &'static str,
    },
}
