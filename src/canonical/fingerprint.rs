use std::collections::HashSet;
use std::fmt;

use sha1::{Digest, Sha1};
use tracing::warn;

use crate::canonical::canonicalizer::canonical_bytes;
use crate::tree::parser::parse_markup;
use crate::tree::tree_model::Snapshot;

/// SHA-1 digest identifying the stable content of a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint([u8; 20]);

impl Fingerprint {
    pub fn of_bytes(bytes: &[u8]) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(bytes);
        Fingerprint(hasher.finalize().into())
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

/// What a fingerprint was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FingerprintBasis {
    /// Canonical serialization with volatile attributes removed
    Canonical,
    /// Raw markup text, used when the markup does not parse
    RawText,
}

pub fn fingerprint(snapshot: &Snapshot) -> Fingerprint {
    Fingerprint::of_bytes(&canonical_bytes(&snapshot.root))
}

/// Fingerprint raw markup, degrading to a raw-text digest when it is not a
/// well-formed tree. Both forms are valid store keys.
pub fn fingerprint_markup(markup: &str) -> (Fingerprint, FingerprintBasis) {
    match parse_markup(markup) {
        Ok(root) => (
            Fingerprint::of_bytes(&canonical_bytes(&root)),
            FingerprintBasis::Canonical,
        ),
        Err(e) => {
            warn!("Falling back to raw-text fingerprint: {}", e);
            (
                Fingerprint::of_bytes(markup.as_bytes()),
                FingerprintBasis::RawText,
            )
        }
    }
}

/// Fingerprints seen so far in one capture run. Insert-only.
#[derive(Debug, Default)]
pub struct FingerprintStore {
    seen: HashSet<Fingerprint>,
}

impl FingerprintStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `fp`. Returns `true` the first time a value is observed and
    /// `false` for every repeat.
    pub fn observe(&mut self, fp: Fingerprint) -> bool {
        self.seen.insert(fp)
    }

    pub fn contains(&self, fp: &Fingerprint) -> bool {
        self.seen.contains(fp)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
