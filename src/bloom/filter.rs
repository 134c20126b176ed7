use super::bits::{self, Bits, get_bit, set_bit};
use super::{
    BloomFilterConfig, BloomFilterOps, BloomFilterStats, BloomKey, BloomParams,
    BloomResult, BulkBloomFilterOps,
};
use crate::hash::{DEFAULT_SEED, murmur3_x64_128};
use bitvec::{order::Msb0, slice::BitSlice};
use tracing::debug;

/// A fixed-size Bloom filter.
///
/// Sizing happens once, at construction; the bit array never grows, shrinks
/// or clears. Every insert and query hashes the key exactly once and derives
/// all `num_hashes` bit positions from the two 64-bit halves.
///
/// ```
/// use murmur_bloom::{BloomFilter, BloomFilterOps};
///
/// let mut filter = BloomFilter::new(1_000, 0.01).unwrap();
/// filter.insert(&42i32);
/// assert!(filter.contains(&42i32));
/// ```
#[derive(Debug, Clone)]
pub struct BloomFilter {
    config: BloomFilterConfig,
    params: BloomParams,
    bits: Bits,
    insert_count: u64,
}

impl BloomFilter {
    /// Creates a filter for `expected_entries` keys at `target_fpr`, using
    /// the default seed and MurmurHash3.
    pub fn new(expected_entries: u64, target_fpr: f64) -> BloomResult<Self> {
        Self::with_config(BloomFilterConfig {
            expected_entries,
            false_positive_rate: target_fpr,
            seed: DEFAULT_SEED,
            hash_function: murmur3_x64_128,
        })
    }

    pub fn with_config(config: BloomFilterConfig) -> BloomResult<Self> {
        let params = BloomParams::try_from(&config)?;
        let bits = bits::allocate(params.bit_length as usize)?;

        debug!(
            expected_entries = config.expected_entries,
            false_positive_rate = config.false_positive_rate,
            bits_per_entry = params.bits_per_entry,
            num_hashes = params.num_hashes,
            bit_length = params.bit_length,
            "created bloom filter"
        );

        Ok(Self::from_parts(config, params, bits))
    }

    pub(super) fn from_parts(
        config: BloomFilterConfig,
        params: BloomParams,
        bits: Bits,
    ) -> Self {
        Self {
            config,
            params,
            bits,
            insert_count: 0,
        }
    }

    pub fn config(&self) -> &BloomFilterConfig {
        &self.config
    }

    pub fn params(&self) -> &BloomParams {
        &self.params
    }

    /// The packed bit array, most significant bit first within each byte.
    pub fn as_bytes(&self) -> &[u8] {
        self.bits.as_raw_slice()
    }

    pub fn as_bits(&self) -> &BitSlice<u8, Msb0> {
        &self.bits
    }

    pub fn size_in_bytes(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn count_ones(&self) -> usize {
        self.bits.count_ones()
    }

    /// Fraction of addressable bits that are set.
    pub fn fill_ratio(&self) -> f64 {
        self.count_ones() as f64 / self.params.bit_length as f64
    }

    /// False positive probability implied by the bits set so far.
    pub fn estimated_false_positive_rate(&self) -> f64 {
        self.fill_ratio().powi(self.params.num_hashes as i32)
    }

    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    fn hash_key<K: BloomKey + ?Sized>(&self, key: &K) -> (u64, u64) {
        key.with_key_bytes(|bytes| {
            (self.config.hash_function)(bytes, self.config.seed)
        })
    }
}

/// `(h1 + i * h2) mod bit_length` for each round, computed in 128 bits so
/// the sum cannot wrap before the modulus.
fn bit_positions(
    (h1, h2): (u64, u64),
    num_hashes: u32,
    bit_length: u64,
) -> impl Iterator<Item = usize> {
    (0..num_hashes).map(move |i| {
        let position = (h1 as u128 + i as u128 * h2 as u128) % bit_length as u128;
        position as usize
    })
}

impl BloomFilterOps for BloomFilter {
    fn insert<K: BloomKey + ?Sized>(&mut self, key: &K) {
        let hash = self.hash_key(key);
        for index in
            bit_positions(hash, self.params.num_hashes, self.params.bit_length)
        {
            set_bit(&mut self.bits, index);
        }
        self.insert_count += 1;
    }

    fn contains<K: BloomKey + ?Sized>(&self, key: &K) -> bool {
        let hash = self.hash_key(key);
        bit_positions(hash, self.params.num_hashes, self.params.bit_length)
            .all(|index| get_bit(&self.bits, index))
    }
}

impl BulkBloomFilterOps for BloomFilter {
    fn insert_bulk<K: BloomKey>(&mut self, keys: &[K]) {
        for key in keys {
            self.insert(key);
        }
    }

    fn contains_bulk<K: BloomKey>(&self, keys: &[K]) -> Vec<bool> {
        keys.iter().map(|key| self.contains(key)).collect()
    }
}

impl BloomFilterStats for BloomFilter {
    fn expected_entries(&self) -> u64 {
        self.config.expected_entries
    }

    fn false_positive_rate(&self) -> f64 {
        self.config.false_positive_rate
    }

    fn bits_per_entry(&self) -> f64 {
        self.params.bits_per_entry
    }

    fn num_hashes(&self) -> u32 {
        self.params.num_hashes
    }

    fn bit_length(&self) -> u64 {
        self.params.bit_length
    }

    /// Insert calls so far, duplicates included.
    fn insert_count(&self) -> u64 {
        self.insert_count
    }
}
