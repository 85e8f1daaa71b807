//! Authenticated message construction and multi-hop delivery for vanet.
//!
//! A message carries a tag computed over its canonical representation with
//! the source's registered key. Delivery finds a path through the current
//! proximity graph and re-verifies the tag at every node on it; the first
//! failure drops the message.
//!
//! The tag authenticates origin only. Both the key and the canonical bytes
//! are fixed when the message is made, so every hop computes the same check.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod message;
pub mod outcome;
pub mod protocol;
pub mod stats;

pub use message::{canonical_repr, Message, DEFAULT_TTL};
pub use outcome::{DeliveryMode, DeliveryOutcome};
pub use protocol::MessageProtocol;
pub use stats::DeliveryStats;
