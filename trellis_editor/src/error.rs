// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Editor errors and the user-facing advisories they map to.
//!
//! Nothing here is fatal: every error is either recovered locally (the editor
//! stays usable and unchanged) or absorbed as a no-op. Hosts show
//! [`EditorError::advisory`] to the user and carry on.

use core::fmt;

use thiserror::Error;
use trellis_tree::{ElementId, TreeError};

/// Result alias for editor operations.
pub type Result<T, E = EditorError> = core::result::Result<T, E>;

/// Failure reported by a [`SchemaResolver`](crate::schema::SchemaResolver).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// No schema is known for the component type.
    #[error("no schema registered for component type `{kind}`")]
    UnknownType {
        /// The requested type.
        kind: String,
    },
    /// The lookup itself failed (network, storage, decoding, ...).
    #[error("schema lookup for `{kind}` failed: {message}")]
    Backend {
        /// The requested type.
        kind: String,
        /// Backend-specific description.
        message: String,
    },
}

/// Everything that can go wrong in an editor operation.
#[derive(Debug, Error)]
pub enum EditorError {
    /// The drop target does not structurally accept the dragged type.
    #[error("`{kind}` must be placed inside a `{container}` container")]
    PlacementRejected {
        /// Dragged component type.
        kind: String,
        /// Container type the rule requires.
        container: String,
        /// The target the drop was checked against.
        target: Option<ElementId>,
    },
    /// The schema of the dragged type, or of one of its default children, could not be resolved.
    #[error("could not resolve the schema of `{kind}`")]
    ResolutionFailed {
        /// The type whose schema failed.
        kind: String,
        /// Resolver failure.
        #[source]
        source: ResolveError,
    },
    /// Default children nest deeper than the configured limit.
    #[error("default children of `{kind}` nest deeper than {limit} levels")]
    DefaultsTooDeep {
        /// The dropped type.
        kind: String,
        /// Configured limit.
        limit: usize,
    },
    /// The edit would nest elements deeper than a saved page can hold.
    #[error("elements cannot be nested more than {limit} levels deep")]
    TooDeep {
        /// Deepest nesting allowed.
        limit: usize,
    },
    /// The container the item was dropped on was removed while its schema was resolving.
    #[error("drop target `{id}` no longer exists")]
    TargetMissing {
        /// The vanished target.
        id: ElementId,
    },
    /// The host cancelled the drop before it committed.
    #[error("the drop was cancelled")]
    Cancelled,
    /// The page was unloaded or replaced while the drop was resolving.
    #[error("the page changed while the drop was resolving")]
    Superseded,
    /// The operation needs a loaded page.
    #[error("no page is loaded")]
    NoPage,
    /// The operation edits the page, which preview mode does not allow.
    #[error("editing is disabled in preview mode")]
    Preview,
    /// Paste with nothing copied.
    #[error("nothing has been copied")]
    ClipboardEmpty,
    /// Paste of an element that no longer exists.
    #[error("the copied element `{id}` no longer exists")]
    ClipboardStale {
        /// The stale identifier.
        id: ElementId,
    },
    /// The stored page data is not valid JSON for a page document.
    #[error("page data is malformed")]
    MalformedDocument {
        /// Parse failure.
        #[source]
        source: serde_json::Error,
    },
    /// The stored page data parses but its elements break tree invariants.
    #[error("page data is inconsistent")]
    InconsistentDocument {
        /// Structural failure.
        #[source]
        source: TreeError,
    },
    /// Editor configuration could not be parsed.
    #[error("invalid editor configuration")]
    Config(#[source] serde_json::Error),
    /// The tree refused a mutation.
    #[error(transparent)]
    Tree(#[from] TreeError),
}

/// How loudly an advisory should be shown.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Informational hint; the user asked for something that does not apply.
    Info,
    /// Something was discarded or replaced.
    Warning,
    /// An operation failed.
    Error,
}

/// A message for the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Advisory {
    /// How loudly to show it.
    pub severity: Severity,
    /// What to show.
    pub message: String,
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.severity, self.message)
    }
}

impl EditorError {
    /// The advisory to show for this error.
    pub fn advisory(&self) -> Advisory {
        let severity = match self {
            Self::PlacementRejected { .. }
            | Self::Preview
            | Self::ClipboardEmpty
            | Self::ClipboardStale { .. }
            | Self::TooDeep { .. } => Severity::Info,
            Self::TargetMissing { .. }
            | Self::Cancelled
            | Self::Superseded
            | Self::MalformedDocument { .. }
            | Self::InconsistentDocument { .. } => Severity::Warning,
            Self::ResolutionFailed { .. }
            | Self::DefaultsTooDeep { .. }
            | Self::NoPage
            | Self::Config(_)
            | Self::Tree(_) => Severity::Error,
        };
        let message = match self {
            Self::MalformedDocument { .. } | Self::InconsistentDocument { .. } => {
                "The page data is malformed; an empty page was opened instead.".to_owned()
            }
            other => capitalize(&other.to_string()),
        };
        Advisory { severity, message }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placement_advisory_names_the_container() {
        let err = EditorError::PlacementRejected {
            kind: "Input".into(),
            container: "Form".into(),
            target: None,
        };
        let adv = err.advisory();
        assert_eq!(adv.severity, Severity::Info);
        assert_eq!(adv.message, "`Input` must be placed inside a `Form` container");
    }

    #[test]
    fn malformed_document_is_a_warning() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let adv = EditorError::MalformedDocument { source }.advisory();
        assert_eq!(adv.severity, Severity::Warning);
        assert!(adv.message.contains("empty page"));
    }

    #[test]
    fn resolution_failure_keeps_its_source() {
        let err = EditorError::ResolutionFailed {
            kind: "Chart".into(),
            source: ResolveError::UnknownType { kind: "Chart".into() },
        };
        assert_eq!(err.advisory().severity, Severity::Error);
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(
            source.as_deref(),
            Some("no schema registered for component type `Chart`")
        );
    }

    #[test]
    fn stale_clipboard_message() {
        let adv = EditorError::ClipboardStale { id: "Text_1".into() }.advisory();
        assert_eq!(adv.message, "The copied element `Text_1` no longer exists");
    }
}
