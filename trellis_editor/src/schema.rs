// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Component schemas and the resolver that supplies them.
//!
//! ## Overview
//!
//! When a component is dropped the editor knows only its type. The
//! [`SchemaResolver`] turns the type into the initial payload of the new node
//! and the list of default children it should be created with. Resolvers are
//! asynchronous; the editor awaits them before it touches the tree.
//!
//! [`SchemaRegistry`] is an in-memory resolver, enough for tests, demos, and
//! hosts that ship their component catalogue with the binary.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use trellis_tree::Payload;

use crate::error::ResolveError;

/// A default child declared by a component schema.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildDescriptor {
    /// Component type of the child.
    #[serde(rename = "type")]
    pub kind: String,
    /// Display label of the child.
    #[serde(default)]
    pub name: String,
}

impl ChildDescriptor {
    /// Describe a default child.
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
        }
    }
}

/// The schema of one component type.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaPayload {
    /// Initial configuration of new nodes.
    #[serde(default)]
    pub config: Value,
    /// Initial event bindings.
    #[serde(default)]
    pub events: Value,
    /// Initial method bindings; an empty list when absent.
    #[serde(default)]
    pub methods: Value,
    /// Children created together with every new node of this type.
    #[serde(default)]
    pub elements: Vec<ChildDescriptor>,
}

impl SchemaPayload {
    /// A schema with the given configuration and no children.
    pub fn with_config(config: Value) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Add a default child.
    pub fn with_child(mut self, child: ChildDescriptor) -> Self {
        self.elements.push(child);
        self
    }

    /// The payload a new node of this type starts with.
    pub fn payload(&self) -> Payload {
        Payload {
            config: self.config.clone(),
            events: self.events.clone(),
            methods: match &self.methods {
                Value::Null => Value::Array(Vec::new()),
                other => other.clone(),
            },
        }
    }
}

/// Resolves component types to their schemas.
///
/// Implementations may do I/O. A failed resolution aborts the drop that asked
/// for it; nothing is inserted.
pub trait SchemaResolver {
    /// Look up the schema of `kind`.
    fn resolve(&self, kind: &str) -> impl Future<Output = Result<SchemaPayload, ResolveError>>;
}

/// In-memory schema catalogue.
#[derive(Clone, Debug, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<String, SchemaPayload>,
}

impl SchemaRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalogue from a JSON object mapping type names to schemas.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self {
            schemas: serde_json::from_str(json)?,
        })
    }

    /// Register (or replace) the schema of `kind`.
    pub fn register(&mut self, kind: impl Into<String>, schema: SchemaPayload) -> &mut Self {
        self.schemas.insert(kind.into(), schema);
        self
    }

    /// Builder form of [`register`](Self::register).
    pub fn with(mut self, kind: impl Into<String>, schema: SchemaPayload) -> Self {
        self.register(kind, schema);
        self
    }

    /// Whether `kind` has a schema.
    pub fn contains(&self, kind: &str) -> bool {
        self.schemas.contains_key(kind)
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

impl SchemaResolver for SchemaRegistry {
    async fn resolve(&self, kind: &str) -> Result<SchemaPayload, ResolveError> {
        self.schemas
            .get(kind)
            .cloned()
            .ok_or_else(|| ResolveError::UnknownType { kind: kind.into() })
    }
}
