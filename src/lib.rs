//! Bloom filter backed by MurmurHash3 x64/128.
//!
//! This crate provides a fixed-size probabilistic set: it answers "has this
//! key possibly been inserted?" with no false negatives and a false positive
//! rate bounded by the one it was sized for.
//!
//! HowTo:
//!    * Sizing: `bits_per_entry = -log2(fpr) / ln 2`, `num_hashes =
//!      ceil(bits_per_entry * ln 2)`, `bit_length = ceil(bits_per_entry * n)`.
//!    * Storage: `ceil(bit_length / 8)` bytes, most significant bit first.
//!
//! Insertion:
//!     * Hash the key's canonical bytes once with MurmurHash3 (seed 42 by
//!       default) to get `(h1, h2)`.
//!     * For `i in 0..num_hashes` set bit `(h1 + i * h2) mod bit_length`.
//! Query:
//!     * Recompute the same positions; the key is possibly present only if
//!       every one of them is set.
//!
//! Limits:
//!     * No deletion and no resizing: parameters are fixed at construction.
//!     * Not synchronized. `insert` takes `&mut self`, so sharing a filter
//!       across threads needs the caller's own lock.

pub mod bloom;
pub mod common;
pub mod hash;

pub use bloom::{
    BloomError, BloomFilter, BloomFilterConfig, BloomFilterConfigBuilder,
    BloomFilterOps, BloomFilterStats, BloomKey, BloomParams, BloomResult,
    BulkBloomFilterOps,
};
pub use hash::{
    DEFAULT_SEED, HashFunction, bits_per_entry, murmur3_x64_128,
    optimal_bit_length, optimal_num_hashes,
};
