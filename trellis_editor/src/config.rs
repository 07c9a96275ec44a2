// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Editor configuration.
//!
//! Every field has a default, so an empty JSON object is a valid
//! configuration:
//!
//! ```
//! use trellis_editor::config::EditorConfig;
//!
//! let config = EditorConfig::from_json_str(r#"{"selectOnDrop": true}"#).unwrap();
//! assert!(config.select_on_drop);
//! assert_eq!(config.max_default_depth, 8);
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::EditorError;
use crate::placement::PlacementRules;

/// Settings shared by every page the editor opens.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Structural rules checked before a drop commits.
    pub placement: PlacementRules,
    /// How many levels of default children a single drop may create.
    pub max_default_depth: usize,
    /// Select the new node after a successful drop.
    pub select_on_drop: bool,
    /// Page-level settings used when a stored document has none.
    pub page_defaults: PageDefaults,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            placement: PlacementRules::default(),
            max_default_depth: 8,
            select_on_drop: false,
            page_defaults: PageDefaults::default(),
        }
    }
}

impl EditorConfig {
    /// Parse a configuration from JSON; absent fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, EditorError> {
        serde_json::from_str(json).map_err(EditorError::Config)
    }
}

/// Page-level configuration and events for documents that do not carry their own.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageDefaults {
    /// Page configuration (theme, page style, ...).
    pub config: Value,
    /// Page-level event bindings.
    pub events: Value,
}

impl Default for PageDefaults {
    fn default() -> Self {
        Self {
            config: json!({
                "props": { "theme": "#1677ff" },
                "style": {},
                "scopeCss": "",
                "scopeStyle": {},
            }),
            events: json!([]),
        }
    }
}
