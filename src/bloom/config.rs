use crate::hash::{
    DEFAULT_SEED, HashFunction, bits_per_entry, murmur3_x64_128,
    optimal_bit_length, optimal_num_hashes,
};
use bitvec::{order::Msb0, slice::BitSlice};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use super::{BloomError, BloomResult};

#[derive(Clone, Debug, Builder)]
#[builder(pattern = "owned")]
pub struct BloomFilterConfig {
    /// Number of entries the filter is sized for
    #[builder(default = "1_000_000")]
    pub expected_entries: u64,

    /// Target false positive rate (0.0 to 1.0, exclusive)
    #[builder(default = "0.01")]
    pub false_positive_rate: f64,

    /// Seed handed to the hash function on every insert and query
    #[builder(default = "DEFAULT_SEED")]
    pub seed: u32,

    /// Hash function to use
    #[builder(default = "murmur3_x64_128")]
    pub hash_function: HashFunction,
}

impl BloomFilterConfig {
    pub fn validate(&self) -> BloomResult<()> {
        if self.expected_entries == 0 {
            return Err(BloomError::ZeroCapacity);
        }
        // Written as a negated range check so NaN is rejected too.
        let rate = self.false_positive_rate;
        if !(rate > 0.0 && rate < 1.0) {
            return Err(BloomError::InvalidFalsePositiveRate { rate });
        }
        Ok(())
    }
}

/// Derived parameters calculated from BloomFilterConfig
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BloomParams {
    pub bits_per_entry: f64,
    pub num_hashes: u32,
    pub bit_length: u64,
}

impl BloomParams {
    /// Bytes needed to hold `bit_length` bits, padding included.
    pub fn size_in_bytes(&self) -> u64 {
        self.bit_length.div_ceil(8)
    }
}

impl TryFrom<&BloomFilterConfig> for BloomParams {
    type Error = BloomError;

    fn try_from(config: &BloomFilterConfig) -> BloomResult<Self> {
        config.validate()?;

        let bits_per_entry = bits_per_entry(config.false_positive_rate);
        let num_hashes = optimal_num_hashes(bits_per_entry);
        let bit_length =
            optimal_bit_length(config.expected_entries, bits_per_entry);

        let max_bits = BitSlice::<u8, Msb0>::MAX_BITS as u64;
        if bit_length > max_bits {
            return Err(BloomError::InvalidConfig(format!(
                "Bit length {bit_length} exceeds addressable maximum {max_bits}"
            )));
        }

        Ok(Self {
            bits_per_entry,
            num_hashes,
            bit_length,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = BloomFilterConfigBuilder::default()
            .build()
            .expect("defaults should build");

        assert_eq!(config.expected_entries, 1_000_000);
        assert_eq!(config.false_positive_rate, 0.01);
        assert_eq!(config.seed, DEFAULT_SEED);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_params_from_config() {
        let config = BloomFilterConfigBuilder::default()
            .expected_entries(100)
            .false_positive_rate(0.1)
            .build()
            .unwrap();

        let params = BloomParams::try_from(&config).unwrap();
        assert_eq!(params.num_hashes, 4);
        assert_eq!(params.bit_length, 480);
        assert_eq!(params.size_in_bytes(), 60);
    }

    #[test]
    fn test_padding_rounds_up() {
        let config = BloomFilterConfigBuilder::default()
            .expected_entries(1)
            .false_positive_rate(0.01)
            .build()
            .unwrap();

        let params = BloomParams::try_from(&config).unwrap();
        assert_eq!(params.bit_length, 10);
        assert_eq!(params.size_in_bytes(), 2);
    }

    #[test]
    fn test_nan_rate_rejected() {
        let config = BloomFilterConfigBuilder::default()
            .false_positive_rate(f64::NAN)
            .build()
            .unwrap();

        assert!(matches!(
            config.validate(),
            Err(BloomError::InvalidFalsePositiveRate { .. })
        ));
    }

    #[test]
    fn test_unaddressable_bit_length_rejected() {
        let config = BloomFilterConfigBuilder::default()
            .expected_entries(u64::MAX)
            .false_positive_rate(1e-12)
            .build()
            .unwrap();

        assert!(matches!(
            BloomParams::try_from(&config),
            Err(BloomError::InvalidConfig(_))
        ));
    }
}
