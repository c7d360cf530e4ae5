//! Stable identifiers for callbacks and generated node ids.

use std::fmt;

use rand::{Rng, distributions::Alphanumeric};
use sha2::{Digest, Sha256};

const GENERATED_ID_LEN: usize = 16;

/// Identifier of a registered action or cleanup callback.
///
/// Nodes reference callbacks by id; the executable callback lives in the
/// flow's [`Registry`](crate::core::registry::Registry).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CallbackId(String);

pub type ActionId = CallbackId;
pub type CleanupId = CallbackId;

impl CallbackId {
    /// Id from a caller-supplied stable name.
    pub fn named(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Content-addressed id: identical source text always yields the same id.
    pub fn from_source(source: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(source.as_bytes());
        let digest = hasher.finalize();
        Self(format!("sha256:{}", hex::encode(&digest[..8])))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CallbackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Generate a node id for configs that do not name their node.
pub fn generate_node_id() -> String {
    let mut rng = rand::thread_rng();
    let suffix = std::iter::repeat_with(|| rng.sample(Alphanumeric))
        .map(char::from)
        .take(GENERATED_ID_LEN)
        .collect::<String>()
        .to_lowercase();
    format!("node-{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_source_yields_identical_id() {
        let a = CallbackId::from_source("|ctx| ctx.next()");
        let b = CallbackId::from_source("|ctx| ctx.next()");
        let c = CallbackId::from_source("|ctx| ctx.game_over()");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.as_str().starts_with("sha256:"));
        assert_eq!(a.as_str().len(), "sha256:".len() + 16);
    }

    #[test]
    fn generated_node_ids_are_prefixed_and_distinct() {
        let first = generate_node_id();
        let second = generate_node_id();
        assert!(first.starts_with("node-"));
        assert_eq!(first.len(), "node-".len() + GENERATED_ID_LEN);
        assert_ne!(first, second);
    }
}
