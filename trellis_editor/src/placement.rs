// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural placement rules for dropped components.
//!
//! A [`Restriction`] says that a set of component types may only live inside
//! a container of a given type. The target itself or any of its ancestors may
//! be that container. Types that no restriction names are legal anywhere.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use trellis_tree::ElementTree;

/// Form field types that must be placed inside a `Form`.
pub const FORM_FIELD_KINDS: &[&str] = &[
    "Input",
    "InputNumber",
    "InputPassword",
    "TextArea",
    "Select",
    "Radio",
    "Checkbox",
    "Switch",
    "Slider",
    "Rate",
    "DatePicker",
    "DateRangePicker",
    "TimePicker",
    "Upload",
    "FormItem",
];

/// One placement rule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restriction {
    /// Restricted component types.
    pub kinds: BTreeSet<String>,
    /// Container type the restricted types must live in.
    pub container: String,
}

impl Restriction {
    /// Restrict `kinds` to descendants of `container`.
    pub fn new<I, S>(kinds: I, container: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kinds: kinds.into_iter().map(Into::into).collect(),
            container: container.into(),
        }
    }

    /// The form rule: form fields only inside a `Form`.
    pub fn form_fields() -> Self {
        Self::new(FORM_FIELD_KINDS.iter().copied(), "Form")
    }

    fn applies_to(&self, kind: &str) -> bool {
        self.kinds.contains(kind)
    }
}

/// The closed list of placement rules the editor enforces.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlacementRules {
    restrictions: Vec<Restriction>,
}

impl Default for PlacementRules {
    fn default() -> Self {
        Self::new(vec![Restriction::form_fields()])
    }
}

impl PlacementRules {
    /// Rules from an explicit list.
    pub fn new(restrictions: Vec<Restriction>) -> Self {
        Self { restrictions }
    }

    /// No rules; every placement is legal.
    pub fn permissive() -> Self {
        Self::new(Vec::new())
    }

    /// The configured restrictions.
    pub fn restrictions(&self) -> &[Restriction] {
        &self.restrictions
    }

    /// Whether a `dragged` component may land on the given target.
    ///
    /// `target_id` is the explicit drop target or, failing that, the current
    /// selection; `None` means the page root. `target_kind` may be passed when
    /// the caller already knows it; otherwise it is read from the tree.
    pub fn is_placement_legal(
        &self,
        dragged: &str,
        target_id: Option<&str>,
        target_kind: Option<&str>,
        tree: &ElementTree,
    ) -> bool {
        self.violation(dragged, target_id, target_kind, tree).is_none()
    }

    /// The first restriction `dragged` would break on the given target, if any.
    pub fn violation(
        &self,
        dragged: &str,
        target_id: Option<&str>,
        target_kind: Option<&str>,
        tree: &ElementTree,
    ) -> Option<&Restriction> {
        let target_kind =
            target_kind.or_else(|| target_id.and_then(|id| tree.get(id)).map(|el| el.kind()));
        self.restrictions
            .iter()
            .filter(|r| r.applies_to(dragged))
            .find(|r| !Self::inside(&r.container, target_id, target_kind, tree))
    }

    fn inside(
        container: &str,
        target_id: Option<&str>,
        target_kind: Option<&str>,
        tree: &ElementTree,
    ) -> bool {
        if target_kind == Some(container) {
            return true;
        }
        match target_id {
            Some(id) => tree.ancestors(id).any(|a| a.kind() == container),
            None => false,
        }
    }
}
