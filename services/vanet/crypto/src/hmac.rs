//! Nested-hash message authentication (HMAC) over [`Sha1`].

use crate::sha1::{hash, Sha1};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Block size of the underlying hash in bytes
pub const BLOCK_SIZE: usize = 64;

const INNER_PAD: u8 = 0x36;
const OUTER_PAD: u8 = 0x5c;

/// Authentication tag: lowercase hex of the outer digest.
///
/// Tags are compared as opaque strings; there is no decoding step.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag(String);

impl Tag {
    /// Wrap an existing tag string, e.g. one received alongside a message
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Tag text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Tag text as bytes
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Consume the tag and return its text
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Tag {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Normalize a key to exactly one block: hash it if too long, zero-pad it if short
fn block_key(key: &[u8]) -> [u8; BLOCK_SIZE] {
    let mut block = [0u8; BLOCK_SIZE];
    if key.len() > BLOCK_SIZE {
        let digest = hash(key);
        block[..digest.as_bytes().len()].copy_from_slice(digest.as_bytes());
    } else {
        block[..key.len()].copy_from_slice(key);
    }
    block
}

fn xor_pad(key: &[u8; BLOCK_SIZE], pad: u8) -> [u8; BLOCK_SIZE] {
    let mut out = *key;
    for byte in out.iter_mut() {
        *byte ^= pad;
    }
    out
}

/// Compute the authentication tag of `message` under `key`.
///
/// Empty keys and empty messages are valid inputs.
pub fn mac(key: &[u8], message: &[u8]) -> Tag {
    let key = block_key(key);

    let mut inner = Sha1::new();
    inner.update(&xor_pad(&key, INNER_PAD)).update(message);
    let inner_digest = inner.finalize();

    let mut outer = Sha1::new();
    outer
        .update(&xor_pad(&key, OUTER_PAD))
        .update(inner_digest.as_bytes());

    Tag(outer.finalize().to_hex())
}
