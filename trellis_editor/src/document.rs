// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page records as stored by the backend, and the document inside them.
//!
//! ## Format
//!
//! A [`PageRecord`] carries page metadata plus `pageData`, a JSON string
//! holding the [`PageDocument`]:
//!
//! ```json
//! { "config": { ... }, "events": [ ... ], "elements": [ { "id": "Form_1", "type": "Form", ... } ] }
//! ```
//!
//! Loading never fails. A document that does not parse, or whose elements
//! break tree invariants, opens as an empty page and the failure is returned
//! alongside so the host can tell the user.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use trellis_tree::{Element, ElementTree};

use crate::config::PageDefaults;
use crate::error::EditorError;

/// Deepest element nesting a saved page may hold.
///
/// Each element level costs the JSON parser two levels of its recursion
/// budget (the element object and its `elements` array), and payloads need
/// room of their own, so deeper pages would save but not load.
pub const MAX_NESTING: usize = 48;

/// Page metadata. The editor carries it through a session without interpreting it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageMeta {
    /// Backend page id.
    pub id: i64,
    /// Page title.
    pub name: String,
    /// Free-form description.
    pub remark: Option<String>,
    /// Visibility flag as stored by the backend.
    pub is_public: i64,
    /// Edit permission flag as stored by the backend.
    pub is_edit: i64,
    /// Thumbnail URL.
    pub preview_img: Option<String>,
    /// Owner.
    pub user_id: Option<i64>,
    /// Last publish in staging.
    pub stg_publish_id: Option<i64>,
    /// Last publish in pre-production.
    pub pre_publish_id: Option<i64>,
    /// Last publish in production.
    pub prd_publish_id: Option<i64>,
    /// Publish state in staging.
    pub stg_state: i64,
    /// Publish state in pre-production.
    pub pre_state: i64,
    /// Publish state in production.
    pub prd_state: i64,
}

/// A page as exchanged with the persistence backend.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    /// Metadata fields, flattened into the record.
    #[serde(flatten)]
    pub meta: PageMeta,
    /// The serialized [`PageDocument`].
    #[serde(default, rename = "pageData", alias = "elementsJSON")]
    pub page_data: Option<String>,
}

/// The editable content of a page.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PageDocument {
    /// Page-level configuration; `null` when the document has none.
    #[serde(default)]
    pub config: Value,
    /// Page-level events; `null` when the document has none.
    #[serde(default)]
    pub events: Value,
    /// Root elements in order.
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl PageDocument {
    /// Parse stored page data. Absent or blank data is an empty document.
    pub fn parse(data: Option<&str>) -> Result<Self, serde_json::Error> {
        match data.map(str::trim) {
            None | Some("") => Ok(Self::default()),
            Some(json) => serde_json::from_str(json),
        }
    }

    /// Serialize for storage; [`parse`](Self::parse) reads it back.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// A page decoded from a record, ready to become an editing session.
#[derive(Debug)]
pub struct DecodedPage {
    /// Metadata from the record.
    pub meta: PageMeta,
    /// Page configuration, from the document or the defaults.
    pub config: Value,
    /// Page events, from the document or the defaults.
    pub events: Value,
    /// The element tree; empty if the document was unusable.
    pub tree: ElementTree,
    /// Why the stored document was discarded, if it was.
    pub recovered: Option<EditorError>,
}

/// Decode `record`, falling back to an empty page when its document is unusable.
pub fn decode(record: PageRecord, defaults: &PageDefaults) -> DecodedPage {
    let PageRecord { meta, page_data } = record;
    let mut recovered = None;
    let document = match PageDocument::parse(page_data.as_deref()) {
        Ok(doc) => doc,
        Err(source) => {
            tracing::warn!(page = meta.id, error = %source, "page data does not parse");
            recovered = Some(EditorError::MalformedDocument { source });
            PageDocument::default()
        }
    };
    let PageDocument {
        config,
        events,
        elements,
    } = document;
    let tree = match ElementTree::from_elements(elements) {
        Ok(tree) => tree,
        Err(source) => {
            tracing::warn!(page = meta.id, error = %source, "page elements are inconsistent");
            recovered = Some(EditorError::InconsistentDocument { source });
            ElementTree::new()
        }
    };
    DecodedPage {
        meta,
        config: or_default(config, &defaults.config),
        events: or_default(events, &defaults.events),
        tree,
        recovered,
    }
}

fn or_default(value: Value, default: &Value) -> Value {
    if value.is_null() {
        default.clone()
    } else {
        value
    }
}

/// The saveable state of a page.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PageSnapshot {
    /// Metadata the page was loaded with.
    pub meta: PageMeta,
    /// Current content.
    pub document: PageDocument,
}

impl PageSnapshot {
    /// Package the snapshot as a record for the backend.
    pub fn to_record(&self) -> Result<PageRecord, serde_json::Error> {
        Ok(PageRecord {
            meta: self.meta.clone(),
            page_data: Some(self.document.to_json()?),
        })
    }
}
