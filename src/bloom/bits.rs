//! Bit storage for the filter.
//!
//! Bits are packed most-significant-bit first: bit `i` lives in byte
//! `i / 8` at mask `0x80 >> (i % 8)`. `BitVec<u8, Msb0>` has exactly this
//! layout, so the raw bytes can be handed out and read back as-is.

use bitvec::{order::Msb0, slice::BitSlice, vec::BitVec};
use tracing::warn;

use super::{BloomError, BloomResult};

pub type Bits = BitVec<u8, Msb0>;

/// Allocates a zeroed bit array of exactly `bit_length` addressable bits.
///
/// Reservation goes through `try_reserve_exact`, so an oversized request
/// comes back as `AllocationFailure` rather than aborting the process.
pub fn allocate(bit_length: usize) -> BloomResult<Bits> {
    let bytes = bit_length.div_ceil(8);
    let mut raw: Vec<u8> = Vec::new();
    if raw.try_reserve_exact(bytes).is_err() {
        warn!(bytes, "bit array allocation failed");
        return Err(BloomError::AllocationFailure { bytes });
    }
    raw.resize(bytes, 0);
    from_raw(raw, bit_length)
}

/// Wraps packed bytes as a bit array of `bit_length` bits.
pub fn from_raw(raw: Vec<u8>, bit_length: usize) -> BloomResult<Bits> {
    if raw.len() != bit_length.div_ceil(8) {
        return Err(BloomError::InvalidConfig(format!(
            "{} bytes cannot hold exactly {bit_length} bits",
            raw.len()
        )));
    }
    let mut bits = Bits::from_vec(raw);
    bits.truncate(bit_length);
    Ok(bits)
}

#[inline]
pub fn get_bit(bits: &BitSlice<u8, Msb0>, index: usize) -> bool {
    bits[index]
}

#[inline]
pub fn set_bit(bits: &mut BitSlice<u8, Msb0>, index: usize) {
    bits.set(index, true);
}
