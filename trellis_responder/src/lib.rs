// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Responder: pointer resolution, selection, and hover for the page editor.
//!
//! ## Overview
//!
//! This crate turns raw pointer events into editor state. It does not perform
//! hit testing; the host reports which of its render nodes is under the
//! pointer, and the responder takes it from there.
//!
//! ## Workflow
//!
//! 1) Resolve: [`PointerResolver`](crate::resolve::PointerResolver) walks from
//!    the host node to the nearest ancestor carrying an element identity, through
//!    an [`IdentityLookup`](crate::types::IdentityLookup) and a
//!    [`ParentLookup`](crate::types::ParentLookup) supplied by the host.
//! 2) Update: feed the resolved identity to
//!    [`InteractionState`](crate::selection::InteractionState): `click` for
//!    selection, `pointer_over` for hover. Each call returns the
//!    [`InteractionEvent`](crate::types::InteractionEvent)s the host should paint.
//! 3) Reconcile: after the tree removes nodes, call
//!    [`InteractionState::forget`](crate::selection::InteractionState::forget)
//!    with the removed ids so neither selection nor hover outlives its node.
//!
//! ## Example
//!
//! ```
//! use trellis_responder::selection::InteractionState;
//! use trellis_responder::types::{InteractionEvent, Selection};
//!
//! let mut state = InteractionState::new();
//! state.pointer_over(Some("Input_1"));
//! let events = state.click(Some(Selection::new("Input_1", "Input")));
//! assert_eq!(events[0], InteractionEvent::Selected("Input_1"));
//! assert_eq!(state.hovered(), None);
//!
//! // The selected node was deleted elsewhere.
//! state.forget(&["Input_1"]);
//! assert!(state.selected().is_none());
//! ```

pub mod adapters;
pub mod hover;
pub mod resolve;
pub mod selection;
pub mod types;
