// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Type-prefixed identifier generation.

use core::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::ElementId;

// Shared by every generator so two generators never hand out the same suffix.
static NEXT: AtomicU64 = AtomicU64::new(0);

/// Width of the time-derived seed. 36^9 comfortably covers epoch milliseconds.
const SEED_WIDTH: usize = 9;

/// Produces identifiers of the form `<type>_<suffix>`.
///
/// The suffix is a fixed-width seed followed by a process-wide counter, both in
/// base 36. The counter guarantees uniqueness within the process, including
/// many calls in one synchronous pass and calls from concurrent inserts. The
/// seed is taken from the wall clock when the generator is created, which
/// keeps fresh identifiers apart from identifiers stored by earlier sessions.
#[derive(Clone, Debug)]
pub struct IdGenerator {
    seed: String,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator {
    /// Create a generator seeded from the current time.
    pub fn new() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Epoch milliseconds fit in 64 bits for the foreseeable future."
        )]
        let seed = format!("{:0>SEED_WIDTH$}", base36(millis as u64));
        Self { seed }
    }

    /// Create a generator with an explicit seed.
    ///
    /// Uniqueness within the process still holds; the seed only affects how
    /// identifiers look, which keeps test output readable.
    pub fn with_seed(seed: impl Into<String>) -> Self {
        Self { seed: seed.into() }
    }

    /// Issue a new identifier for a node of type `kind`.
    pub fn create_id(&self, kind: &str) -> ElementId {
        debug_assert!(!kind.is_empty(), "element type must not be empty");
        let kind = if kind.is_empty() { "node" } else { kind };
        let n = NEXT.fetch_add(1, Ordering::Relaxed);
        ElementId::new(format!("{kind}_{}{}", self.seed, base36(n)))
    }
}

fn base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_owned();
    }
    let mut out = Vec::new();
    while n > 0 {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "The remainder is always below 36."
        )]
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    out.into_iter().map(char::from).collect()
}
