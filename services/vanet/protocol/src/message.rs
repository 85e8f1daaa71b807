//! Message type and canonical encoding

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use vanet_crypto::Tag;
use vanet_topology::NodeId;

/// Default hop budget for new messages
pub const DEFAULT_TTL: u8 = 8;

/// Field delimiter in the canonical representation
const DELIMITER: u8 = b'|';

/// An authenticated message. Nonce and tag are fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Originating node
    pub source: NodeId,
    /// Target node
    pub destination: NodeId,
    /// Hop budget
    pub ttl: u8,
    /// Application payload
    pub payload: Bytes,
    /// Random per-message value
    pub nonce: u64,
    /// Authentication tag over the canonical representation
    pub tag: Tag,
}

impl Message {
    /// Canonical bytes this message's tag is computed over
    pub fn canonical_bytes(&self) -> Vec<u8> {
        canonical_repr(
            self.source,
            self.destination,
            self.ttl,
            &self.payload,
            self.nonce,
        )
    }
}

/// `source|destination|ttl|payload|nonce`, numbers in decimal, payload verbatim
pub fn canonical_repr(
    source: NodeId,
    destination: NodeId,
    ttl: u8,
    payload: &[u8],
    nonce: u64,
) -> Vec<u8> {
    let mut out = Vec::with_capacity(payload.len() + 48);
    out.extend_from_slice(source.to_string().as_bytes());
    out.push(DELIMITER);
    out.extend_from_slice(destination.to_string().as_bytes());
    out.push(DELIMITER);
    out.extend_from_slice(ttl.to_string().as_bytes());
    out.push(DELIMITER);
    out.extend_from_slice(payload);
    out.push(DELIMITER);
    out.extend_from_slice(nonce.to_string().as_bytes());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_layout() {
        assert_eq!(
            canonical_repr(0, 3, 8, b"hello", 42),
            b"0|3|8|hello|42".to_vec()
        );
        assert_eq!(canonical_repr(1, 2, 0, b"", 0), b"1|2|0||0".to_vec());
    }

    #[test]
    fn test_message_canonical_bytes() {
        let message = Message {
            source: 5,
            destination: 7,
            ttl: 3,
            payload: Bytes::from_static(b"brake"),
            nonce: 99,
            tag: Tag::new(""),
        };
        assert_eq!(message.canonical_bytes(), b"5|7|3|brake|99".to_vec());
    }

    #[test]
    fn test_fields_change_representation() {
        let base = canonical_repr(1, 2, 8, b"x", 10);
        assert_ne!(base, canonical_repr(2, 2, 8, b"x", 10));
        assert_ne!(base, canonical_repr(1, 3, 8, b"x", 10));
        assert_ne!(base, canonical_repr(1, 2, 9, b"x", 10));
        assert_ne!(base, canonical_repr(1, 2, 8, b"y", 10));
        assert_ne!(base, canonical_repr(1, 2, 8, b"x", 11));
    }
}
