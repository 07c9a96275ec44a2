// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapters to integrate with other Trellis crates.
//!
//! Enabled via feature flags to keep the core free of dependencies.

#[cfg(feature = "element_tree_adapter")]
pub mod element_tree;
