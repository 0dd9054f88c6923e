//! Content fingerprints for cache keys

use std::fmt;

use sha2::{Digest, Sha256};

/// Namespaced SHA-256 digest, rendered as `<prefix>:<hex>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Namespace tag the fingerprint was computed under
    pub fn prefix(&self) -> &str {
        self.0.split_once(':').map(|(prefix, _)| prefix).unwrap_or("")
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Compute a fingerprint over `parts` under the `prefix` namespace.
///
/// Every part is framed by its byte length (u64, little-endian) before its
/// UTF-8 bytes go into the digest, so moving bytes across a part boundary
/// changes the key: `["1", "23"]` and `["12", "3"]` never collide.
pub fn fingerprint(prefix: &str, parts: &[&str]) -> Fingerprint {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update((part.len() as u64).to_le_bytes());
        hasher.update(part.as_bytes());
    }
    Fingerprint(format!("{}:{}", prefix, hex::encode(hasher.finalize())))
}
