use super::BloomKey;

/// Core membership operations.
///
/// Both are total: a constructed filter can always hash and address any key.
pub trait BloomFilterOps {
    fn insert<K: BloomKey + ?Sized>(&mut self, key: &K);
    fn contains<K: BloomKey + ?Sized>(&self, key: &K) -> bool;
}

pub trait BulkBloomFilterOps {
    fn insert_bulk<K: BloomKey>(&mut self, keys: &[K]);
    fn contains_bulk<K: BloomKey>(&self, keys: &[K]) -> Vec<bool>;
}

pub trait BloomFilterStats {
    fn expected_entries(&self) -> u64;
    fn false_positive_rate(&self) -> f64;
    fn bits_per_entry(&self) -> f64;
    fn num_hashes(&self) -> u32;
    fn bit_length(&self) -> u64;
    fn insert_count(&self) -> u64;
}
