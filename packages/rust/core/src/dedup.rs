//! Per-run duplicate suppression.

use std::collections::HashSet;

use sha2::{Digest, Sha256};

/// Set of content digests seen during a run.
///
/// Keys are SHA-256 hex digests of the lowercased text, computed before
/// translation so that a record and its translated twin collapse to one.
#[derive(Debug, Default)]
pub struct DedupSet {
    seen: HashSet<String>,
}

impl DedupSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `text`. Returns `true` the first time a text is seen.
    pub fn insert(&mut self, text: &str) -> bool {
        self.seen.insert(digest(text))
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

fn digest(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.to_lowercase().as_bytes());
    format!("{:x}", hasher.finalize())
}
