#![allow(dead_code)]

use murmur_bloom::{BloomFilter, BloomFilterConfigBuilder};
use rand::{Rng, SeedableRng, rngs::StdRng};

// Helper function to create a default-seeded filter for testing
pub fn create_test_filter(expected_entries: u64, fpr: f64) -> BloomFilter {
    let config = BloomFilterConfigBuilder::default()
        .expected_entries(expected_entries)
        .false_positive_rate(fpr)
        .build()
        .expect("Failed to build test config");

    BloomFilter::with_config(config).expect("Failed to create test filter")
}

// Helper function to generate consistent test data
pub fn generate_test_items(count: usize) -> Vec<Vec<u8>> {
    (0..count)
        .map(|i| format!("test_item_{:06}", i).into_bytes())
        .collect()
}

/// Random keys from a fixed seed so failures reproduce.
pub fn generate_random_keys(count: usize, seed: u64) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count).map(|_| rng.random::<u64>()).collect()
}
