//! Streaming digest and keyed authentication primitives for vanet.
//!
//! This crate provides the two cryptographic building blocks used by the
//! message protocol: a from-scratch streaming implementation of the legacy
//! SHA-1 compression function, and the nested inner/outer HMAC construction
//! layered on top of it.
//!
//! ## Example
//!
//! ```
//! use vanet_crypto::{hash, mac};
//!
//! let digest = hash(b"abc");
//! assert_eq!(digest.to_hex(), "a9993e364706816aba3e25717850c26c9cd0d89d");
//!
//! let tag = mac(b"key", b"The quick brown fox jumps over the lazy dog");
//! assert_eq!(tag.as_str(), "de7c9b85b8b78aa6bc8a7a36f70a90701c9db4d9");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod hmac;
pub mod sha1;

pub use hmac::{mac, Tag, BLOCK_SIZE};
pub use sha1::{hash, Digest, Sha1, DIGEST_LEN};
