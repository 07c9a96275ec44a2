// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Editor: the editing protocols of a page builder.
//!
//! ## Overview
//!
//! A page is a forest of components stored in a
//! [`trellis_tree::ElementTree`]. This crate is everything that changes it:
//!
//! - Drops insert a new component, with its schema and default children
//!   resolved asynchronously by a [`SchemaResolver`](schema::SchemaResolver)
//!   and checked against [`PlacementRules`](placement::PlacementRules).
//! - Copy and paste deep-clone a subtree with fresh ids.
//! - Delete removes a subtree and reconciles selection and hover.
//! - Load and save move pages to and from [`PageRecord`](document::PageRecord)s,
//!   recovering from malformed stored data.
//!
//! Selection and hover come from [`trellis_responder`].
//!
//! ## Concurrency
//!
//! [`Editor`] is a plain single-owner value; every command is a synchronous
//! `&mut self` call that applies atomically. Drops, which await the resolver,
//! run through [`SharedEditor`](shared::SharedEditor), which borrows the
//! editor only between awaits and re-checks the page when it commits.
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events and never installs a subscriber.
//! Page loads are logged at `info`, commits at `debug`, and recovered
//! failures at `warn`.
//!
//! ## Example
//!
//! ```
//! use trellis_editor::Editor;
//! use trellis_editor::document::{PageDocument, PageRecord};
//! use trellis_tree::Element;
//!
//! let doc = PageDocument {
//!     elements: vec![Element::new("Text_1", "Text", "Title")],
//!     ..PageDocument::default()
//! };
//! let record = PageRecord { page_data: Some(doc.to_json().unwrap()), ..PageRecord::default() };
//!
//! let mut editor = Editor::default();
//! assert!(editor.load(record).is_none());
//! editor.click(Some("Text_1"));
//! assert!(editor.copy());
//! let copy = editor.paste().unwrap();
//! assert_eq!(editor.page().unwrap().tree().get(copy.as_str()).unwrap().name(), "Title");
//! ```

pub mod clipboard;
pub mod config;
pub mod document;
pub mod drop;
pub mod editor;
pub mod error;
pub mod placement;
pub mod schema;
pub mod shared;

pub use config::EditorConfig;
pub use editor::{Changes, Editor, Mode, Page};
pub use error::{Advisory, EditorError, ResolveError, Severity};
pub use shared::SharedEditor;
