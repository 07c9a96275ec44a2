// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover state helper: compute enter/leave transitions as the pointed-at node changes.
//!
//! ## Minimal example
//!
//! ```
//! use trellis_responder::hover::{HoverEvent, HoverState};
//! let mut h: HoverState<u32> = HoverState::new();
//! assert_eq!(h.update(Some(1)), vec![HoverEvent::Enter(1)]);
//! assert_eq!(h.update(Some(3)), vec![HoverEvent::Leave(1), HoverEvent::Enter(3)]);
//! assert_eq!(h.update(None), vec![HoverEvent::Leave(3)]);
//! ```

/// Tracks at most one hovered node.
///
/// Updating with a new node emits the leave for the previous node (if any)
/// followed by the enter for the new one. Updating with the current node emits
/// nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HoverState<K> {
    current: Option<K>,
}

impl<K> Default for HoverState<K> {
    fn default() -> Self {
        Self { current: None }
    }
}

/// A hover transition event.
///
/// Returned by [`HoverState::update`] and [`HoverState::clear`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HoverEvent<K> {
    /// Pointer enters the given node.
    Enter(K),
    /// Pointer leaves the given node.
    Leave(K),
}

impl<K: Clone + Eq> HoverState<K> {
    /// Create an empty hover state.
    pub fn new() -> Self {
        Self::default()
    }

    /// The hovered node, if any.
    pub fn current(&self) -> Option<&K> {
        self.current.as_ref()
    }

    /// Clear the hover, returning the leave event for the previous node.
    pub fn clear(&mut self) -> Vec<HoverEvent<K>> {
        self.current.take().map(HoverEvent::Leave).into_iter().collect()
    }

    /// Move the hover to `next` and return the transitions.
    pub fn update(&mut self, next: Option<K>) -> Vec<HoverEvent<K>> {
        if self.current == next {
            return Vec::new();
        }
        let mut out = self.clear();
        if let Some(k) = next {
            out.push(HoverEvent::Enter(k.clone()));
            self.current = Some(k);
        }
        out
    }

    /// Clear the hover without events if it points at one of `gone`.
    ///
    /// Used after a deletion, when the node no longer exists to receive a leave.
    pub fn forget(&mut self, gone: &[K]) -> bool {
        if self.current.as_ref().is_some_and(|k| gone.contains(k)) {
            self.current = None;
            return true;
        }
        false
    }
}
