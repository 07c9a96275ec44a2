// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The copy buffer.

use trellis_tree::ElementId;

/// Remembers the last copied element by reference.
///
/// Only the identifier is stored. Pasting re-reads the element from the live
/// tree, so a paste after the element was deleted is reported as stale rather
/// than resurrecting old content.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Clipboard {
    copied: Option<ElementId>,
}

impl Clipboard {
    /// An empty clipboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember `id`, replacing whatever was copied before.
    pub fn copy(&mut self, id: ElementId) {
        self.copied = Some(id);
    }

    /// The copied identifier, if any.
    pub fn get(&self) -> Option<&ElementId> {
        self.copied.as_ref()
    }

    /// Forget the copied identifier.
    pub fn clear(&mut self) {
        self.copied = None;
    }
}
