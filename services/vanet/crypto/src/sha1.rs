//! Streaming SHA-1 digest.
//!
//! The compression function follows the legacy SHA-1 definition bit for bit,
//! so the published test vectors apply. Input may be fed in chunks of any
//! length; the digest only depends on the concatenated byte sequence.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Digest length in bytes (160 bits)
pub const DIGEST_LEN: usize = 20;

/// Compression block size in bytes
const CHUNK_LEN: usize = 64;

/// Offset within the final block where the bit length starts
const LENGTH_OFFSET: usize = 56;

/// Initial accumulator values
const INITIAL_STATE: [u32; 5] = [
    0x6745_2301,
    0xEFCD_AB89,
    0x98BA_DCFE,
    0x1032_5476,
    0xC3D2_E1F0,
];

/// Round constants, one per group of twenty rounds
const ROUND_CONSTANTS: [u32; 4] = [0x5A82_7999, 0x6ED9_EBA1, 0x8F1B_BCDC, 0xCA62_C1D6];

/// A 160-bit digest value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Digest(pub [u8; DIGEST_LEN]);

impl Digest {
    /// Raw digest bytes
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Lowercase hexadecimal encoding (40 characters)
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Streaming SHA-1 hasher
#[derive(Debug, Clone)]
pub struct Sha1 {
    /// Five 32-bit accumulators
    state: [u32; 5],
    /// Unprocessed input, always fewer than 64 bytes between calls
    buffer: [u8; CHUNK_LEN],
    /// Number of valid bytes in `buffer`
    buffered: usize,
    /// Total bytes consumed so far
    total_len: u64,
}

impl Sha1 {
    /// Create a new hasher
    pub fn new() -> Self {
        Self {
            state: INITIAL_STATE,
            buffer: [0u8; CHUNK_LEN],
            buffered: 0,
            total_len: 0,
        }
    }

    /// Feed more input. Chunks may be empty or straddle block boundaries.
    pub fn update(&mut self, data: &[u8]) -> &mut Self {
        self.total_len = self.total_len.wrapping_add(data.len() as u64);
        self.absorb(data);
        self
    }

    /// Pad the buffered input and return the digest.
    ///
    /// Consumes the hasher, so no further input can be fed to it.
    pub fn finalize(mut self) -> Digest {
        let bit_len = self.total_len.wrapping_mul(8);

        self.absorb(&[0x80]);
        while self.buffered != LENGTH_OFFSET {
            self.absorb(&[0x00]);
        }
        self.absorb(&bit_len.to_be_bytes());
        debug_assert_eq!(self.buffered, 0);

        let mut out = [0u8; DIGEST_LEN];
        for (chunk, word) in out.chunks_exact_mut(4).zip(self.state.iter()) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }
        Digest(out)
    }

    /// Buffer input and compress every completed block.
    /// Does not touch `total_len`; padding bytes go through here too.
    fn absorb(&mut self, mut data: &[u8]) {
        if self.buffered > 0 {
            let take = (CHUNK_LEN - self.buffered).min(data.len());
            self.buffer[self.buffered..self.buffered + take].copy_from_slice(&data[..take]);
            self.buffered += take;
            data = &data[take..];

            if self.buffered < CHUNK_LEN {
                return;
            }
            let block = self.buffer;
            self.compress(&block);
            self.buffered = 0;
        }

        let mut blocks = data.chunks_exact(CHUNK_LEN);
        for block in &mut blocks {
            let mut owned = [0u8; CHUNK_LEN];
            owned.copy_from_slice(block);
            self.compress(&owned);
        }

        let rest = blocks.remainder();
        self.buffer[..rest.len()].copy_from_slice(rest);
        self.buffered = rest.len();
    }

    /// Mix one 64-byte block into the accumulators
    fn compress(&mut self, block: &[u8; CHUNK_LEN]) {
        let mut w = [0u32; 80];
        for (i, word) in block.chunks_exact(4).enumerate() {
            w[i] = u32::from_be_bytes([word[0], word[1], word[2], word[3]]);
        }
        for i in 16..80 {
            w[i] = (w[i - 3] ^ w[i - 8] ^ w[i - 14] ^ w[i - 16]).rotate_left(1);
        }

        let [mut a, mut b, mut c, mut d, mut e] = self.state;

        for (i, &word) in w.iter().enumerate() {
            let (f, k) = match i {
                0..=19 => ((b & c) | (!b & d), ROUND_CONSTANTS[0]),
                20..=39 => (b ^ c ^ d, ROUND_CONSTANTS[1]),
                40..=59 => ((b & c) | (b & d) | (c & d), ROUND_CONSTANTS[2]),
                _ => (b ^ c ^ d, ROUND_CONSTANTS[3]),
            };

            let temp = a
                .rotate_left(5)
                .wrapping_add(f)
                .wrapping_add(e)
                .wrapping_add(k)
                .wrapping_add(word);
            e = d;
            d = c;
            c = b.rotate_left(30);
            b = a;
            a = temp;
        }

        self.state[0] = self.state[0].wrapping_add(a);
        self.state[1] = self.state[1].wrapping_add(b);
        self.state[2] = self.state[2].wrapping_add(c);
        self.state[3] = self.state[3].wrapping_add(d);
        self.state[4] = self.state[4].wrapping_add(e);
    }
}

impl Default for Sha1 {
    fn default() -> Self {
        Self::new()
    }
}

/// Hash a byte sequence in one shot
pub fn hash(data: &[u8]) -> Digest {
    let mut hasher = Sha1::new();
    hasher.update(data);
    hasher.finalize()
}
