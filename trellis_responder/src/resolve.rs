// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nearest-identified-ancestor resolution.
//!
//! ## Overview
//!
//! Pointer events land on whatever host node is under the pointer, which is
//! often an inner part of a component's rendering (a label, an icon, a cell).
//! The resolver walks from that node towards the root through a
//! [`ParentLookup`] and returns the first identity reported by an
//! [`IdentityLookup`].
//!
//! ## Example
//!
//! ```
//! use trellis_responder::resolve::PointerResolver;
//! use trellis_responder::types::{IdentityLookup, ParentLookup};
//!
//! // Host nodes 1 → 2 → 3, where only node 1 carries an identity.
//! struct Ids;
//! impl IdentityLookup<u32> for Ids {
//!     type Identity = &'static str;
//!     fn identity_of(&self, n: &u32) -> Option<&'static str> {
//!         (*n == 1).then_some("Card_1")
//!     }
//! }
//! struct Parents;
//! impl ParentLookup<u32> for Parents {
//!     fn parent_of(&self, n: &u32) -> Option<u32> {
//!         (*n > 1).then(|| n - 1)
//!     }
//! }
//!
//! let resolver = PointerResolver::new(Ids, Parents);
//! assert_eq!(resolver.resolve(&3), Some("Card_1"));
//! ```

use crate::types::{IdentityLookup, ParentLookup};

/// Upper bound on the ancestor walk. Host hierarchies deeper than this are treated as unidentified.
pub const MAX_WALK_DEPTH: usize = 4096;

/// Resolves host nodes to the nearest node carrying engine identity.
pub struct PointerResolver<K, L: IdentityLookup<K>, P: ParentLookup<K>> {
    lookup: L,
    parent: P,
    _phantom: core::marker::PhantomData<fn() -> K>,
}

impl<K, L: IdentityLookup<K>, P: ParentLookup<K>> core::fmt::Debug for PointerResolver<K, L, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PointerResolver").finish_non_exhaustive()
    }
}

impl<K: Clone, L: IdentityLookup<K>, P: ParentLookup<K>> PointerResolver<K, L, P> {
    /// Create a resolver from an identity source and a parent source.
    pub fn new(lookup: L, parent: P) -> Self {
        Self {
            lookup,
            parent,
            _phantom: core::marker::PhantomData,
        }
    }

    /// The identity of `target` or of its nearest identified ancestor.
    ///
    /// Returns `None` when no node on the way to the root carries an identity,
    /// which the caller treats as "pointer is outside every element".
    pub fn resolve(&self, target: &K) -> Option<L::Identity> {
        let mut cur = target.clone();
        for _ in 0..MAX_WALK_DEPTH {
            if let Some(identity) = self.lookup.identity_of(&cur) {
                return Some(identity);
            }
            cur = self.parent.parent_of(&cur)?;
        }
        None
    }

    /// Host nodes from `target` up to the root, target first.
    pub fn ancestry(&self, target: &K) -> Vec<K> {
        let mut out = vec![target.clone()];
        while out.len() < MAX_WALK_DEPTH {
            let Some(next) = out.last().and_then(|n| self.parent.parent_of(n)) else {
                break;
            };
            out.push(next);
        }
        out
    }
}
