//! Byte encoding of a filter for embedders that persist it themselves.
//!
//! Layout, all integers little-endian and fixed width:
//!
//! | offset | field            | type |
//! |--------|------------------|------|
//! | 0      | `bits_per_entry` | f64  |
//! | 8      | `num_hashes`     | u32  |
//! | 12     | `bit_length`     | u32  |
//! | 16     | packed bits      | `ceil(bit_length / 8)` bytes, MSB first |
//!
//! Seed and hash function are not part of the encoding; a reader must use
//! the same ones the writer did.

use bincode::{Decode, Encode, config};
use tracing::debug;

use super::bits;
use super::{
    BloomError, BloomFilter, BloomFilterConfig, BloomParams, BloomResult,
};
use crate::hash::{
    DEFAULT_SEED, HashFunction, murmur3_x64_128, optimal_num_hashes,
};

pub const HEADER_LEN: usize = 16;

#[derive(Debug, Encode, Decode)]
struct SnapshotHeader {
    bits_per_entry: f64,
    num_hashes: u32,
    bit_length: u32,
}

impl BloomFilter {
    pub fn to_bytes(&self) -> BloomResult<Vec<u8>> {
        let params = self.params();
        let bit_length = u32::try_from(params.bit_length).map_err(|_| {
            BloomError::SerializationError(format!(
                "Bit length {} does not fit the 32-bit header field",
                params.bit_length
            ))
        })?;
        let header = SnapshotHeader {
            bits_per_entry: params.bits_per_entry,
            num_hashes: params.num_hashes,
            bit_length,
        };

        let mut out = bincode::encode_to_vec(&header, config::legacy())?;
        out.extend_from_slice(self.as_bytes());
        Ok(out)
    }

    /// Decodes a filter written by [`BloomFilter::to_bytes`] that used the
    /// default seed and MurmurHash3.
    pub fn from_bytes(bytes: &[u8]) -> BloomResult<Self> {
        Self::from_bytes_with(bytes, DEFAULT_SEED, murmur3_x64_128)
    }

    /// Decodes a filter written with a custom seed or hash function.
    ///
    /// `expected_entries` and `false_positive_rate` are not stored, so the
    /// returned config carries values recovered from `bits_per_entry` and
    /// `bit_length`. Insert counts start from zero.
    pub fn from_bytes_with(
        bytes: &[u8],
        seed: u32,
        hash_function: HashFunction,
    ) -> BloomResult<Self> {
        let (header, read): (SnapshotHeader, usize) =
            bincode::decode_from_slice(bytes, config::legacy())?;
        debug_assert_eq!(read, HEADER_LEN);

        let params = checked_params(&header)?;
        let payload = &bytes[read..];
        let expected_len = params.size_in_bytes() as usize;
        if payload.len() != expected_len {
            return Err(BloomError::SerializationError(format!(
                "Expected {expected_len} bytes of bits, found {}",
                payload.len()
            )));
        }
        let bits = bits::from_raw(payload.to_vec(), params.bit_length as usize)?;
        if bits.as_raw_slice().last().is_some_and(|last| {
            let used = params.bit_length % 8;
            used != 0 && last & (0xffu8 >> used) != 0
        }) {
            return Err(BloomError::SerializationError(
                "Padding bits past bit_length are set".into(),
            ));
        }

        let config = BloomFilterConfig {
            expected_entries: ((params.bit_length as f64
                / params.bits_per_entry) as u64)
                .max(1),
            false_positive_rate: (-params.bits_per_entry
                * std::f64::consts::LN_2)
                .exp2(),
            seed,
            hash_function,
        };
        config.validate().map_err(|e| {
            BloomError::SerializationError(format!(
                "Header does not describe a valid filter: {e}"
            ))
        })?;

        debug!(
            bit_length = params.bit_length,
            num_hashes = params.num_hashes,
            ones = bits.count_ones(),
            "decoded bloom filter"
        );

        Ok(Self::from_parts(config, params, bits))
    }
}

fn checked_params(header: &SnapshotHeader) -> BloomResult<BloomParams> {
    if !(header.bits_per_entry.is_finite() && header.bits_per_entry > 0.0) {
        return Err(BloomError::SerializationError(format!(
            "Invalid bits_per_entry {}",
            header.bits_per_entry
        )));
    }
    if header.num_hashes == 0 {
        return Err(BloomError::SerializationError(
            "num_hashes must be at least 1".into(),
        ));
    }
    let expected_hashes = optimal_num_hashes(header.bits_per_entry);
    if header.num_hashes != expected_hashes {
        return Err(BloomError::SerializationError(format!(
            "num_hashes {} does not match {expected_hashes} implied by \
             bits_per_entry {}",
            header.num_hashes, header.bits_per_entry
        )));
    }
    if header.bit_length == 0 {
        return Err(BloomError::SerializationError(
            "bit_length must be at least 1".into(),
        ));
    }
    Ok(BloomParams {
        bits_per_entry: header.bits_per_entry,
        num_hashes: header.num_hashes,
        bit_length: header.bit_length as u64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bloom::BloomFilterOps;

    #[test]
    fn test_header_layout() {
        let mut filter = BloomFilter::new(100, 0.1).unwrap();
        filter.insert(&1i32);

        let bytes = filter.to_bytes().unwrap();
        assert_eq!(bytes.len(), HEADER_LEN + 60);
        assert_eq!(
            &bytes[0..8],
            &filter.params().bits_per_entry.to_le_bytes()
        );
        assert_eq!(&bytes[8..12], &4u32.to_le_bytes());
        assert_eq!(&bytes[12..16], &480u32.to_le_bytes());
        assert_eq!(&bytes[HEADER_LEN..], filter.as_bytes());
        assert_eq!(bytes[HEADER_LEN], 0x20);
    }

    #[test]
    fn test_truncated_header() {
        let err = BloomFilter::from_bytes(&[0u8; 10]).unwrap_err();
        assert!(matches!(err, BloomError::SerializationError(_)));
    }

    #[test]
    fn test_payload_length_mismatch() {
        let filter = BloomFilter::new(100, 0.1).unwrap();
        let mut bytes = filter.to_bytes().unwrap();
        bytes.pop();

        assert!(matches!(
            BloomFilter::from_bytes(&bytes),
            Err(BloomError::SerializationError(_))
        ));
    }

    #[test]
    fn test_zero_hashes_rejected() {
        let filter = BloomFilter::new(100, 0.1).unwrap();
        let mut bytes = filter.to_bytes().unwrap();
        bytes[8..12].copy_from_slice(&0u32.to_le_bytes());

        assert!(BloomFilter::from_bytes(&bytes).is_err());
    }

    #[test]
    fn test_num_hashes_must_match_bits_per_entry() {
        let filter = BloomFilter::new(10, 0.01).unwrap();
        let mut bytes = filter.to_bytes().unwrap();
        bytes[0..8].copy_from_slice(&5000.0f64.to_le_bytes());

        let err = BloomFilter::from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, BloomError::SerializationError(_)));

        let mut bytes = filter.to_bytes().unwrap();
        bytes[8..12].copy_from_slice(&8u32.to_le_bytes());
        assert!(matches!(
            BloomFilter::from_bytes(&bytes),
            Err(BloomError::SerializationError(_))
        ));
    }

    #[test]
    fn test_unrecoverable_rate_rejected() {
        // 2000 bits per entry is consistent with its hash count, but the
        // implied false positive rate underflows to zero.
        let bits_per_entry = 2000.0f64;
        let filter = BloomFilter::new(10, 0.01).unwrap();
        let mut bytes = filter.to_bytes().unwrap();
        bytes[0..8].copy_from_slice(&bits_per_entry.to_le_bytes());
        bytes[8..12].copy_from_slice(
            &optimal_num_hashes(bits_per_entry).to_le_bytes(),
        );

        let err = BloomFilter::from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, BloomError::SerializationError(_)));
        assert!(err.to_string().contains("rate"), "{err}");
    }

    #[test]
    fn test_decoded_config_validates() {
        let filter = BloomFilter::new(1_000, 0.001).unwrap();
        let decoded = BloomFilter::from_bytes(&filter.to_bytes().unwrap())
            .unwrap();

        assert!(decoded.config().validate().is_ok());
        assert_eq!(decoded.params(), filter.params());
    }

    #[test]
    fn test_padding_bits_rejected() {
        // 1 entry at 1% is 10 bits: the second byte only uses its top two.
        let filter = BloomFilter::new(1, 0.01).unwrap();
        let mut bytes = filter.to_bytes().unwrap();
        *bytes.last_mut().unwrap() = 0x01;

        assert!(matches!(
            BloomFilter::from_bytes(&bytes),
            Err(BloomError::SerializationError(_))
        ));
    }
}
