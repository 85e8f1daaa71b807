//! Trusted mapping from node identity to shared secret key.

use crate::node::NodeId;
use bytes::Bytes;
use std::collections::HashMap;
use tracing::debug;

/// Registry of per-node secret keys
#[derive(Debug, Clone, Default)]
pub struct KeyRegistry {
    keys: HashMap<NodeId, Bytes>,
}

impl KeyRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the key for a node
    pub fn register(&mut self, id: NodeId, key: impl Into<Bytes>) {
        let key = key.into();
        debug!("Registering key for node {} ({} bytes)", id, key.len());
        self.keys.insert(id, key);
    }

    /// Key for a node, or an empty key if none is registered.
    ///
    /// An empty key never reproduces a tag made with a real key, so callers
    /// see a miss as an authentication failure.
    pub fn lookup(&self, id: NodeId) -> Bytes {
        self.keys.get(&id).cloned().unwrap_or_default()
    }

    /// Whether a key is registered for the node
    pub fn contains(&self, id: NodeId) -> bool {
        self.keys.contains_key(&id)
    }

    /// Number of registered keys
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_lookup() {
        let mut registry = KeyRegistry::new();
        registry.register(0, &b"alpha"[..]);
        registry.register(1, b"beta".to_vec());

        assert_eq!(registry.lookup(0), Bytes::from_static(b"alpha"));
        assert_eq!(registry.lookup(1), Bytes::from_static(b"beta"));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_register_is_upsert() {
        let mut registry = KeyRegistry::new();
        registry.register(7, &b"old"[..]);
        registry.register(7, &b"new"[..]);
        registry.register(7, &b"new"[..]);

        assert_eq!(registry.lookup(7), Bytes::from_static(b"new"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_missing_key_is_empty() {
        let registry = KeyRegistry::new();
        assert!(registry.lookup(42).is_empty());
        assert!(!registry.contains(42));
        assert!(registry.is_empty());
    }
}
