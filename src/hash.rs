//! MurmurHash3 x64/128 and the sizing math built on top of it.

/// Seed the filter hands to the mixer unless configured otherwise.
pub const DEFAULT_SEED: u32 = 42;

const C1: u64 = 0x87c37b91114253d5;
const C2: u64 = 0x4cf5ad432745937f;

/// A type alias for the 128-bit hash function used by the Bloom filter.
///
/// **Parameters:**
///
/// - `key: &[u8]`
///   - Canonical byte representation of the key.
/// - `seed: u32`
///   - Seed both 64-bit accumulators start from.
///
/// **Returns:**
///
/// - `(u64, u64)`
///   - The two hash halves `(h1, h2)`. The filter derives every bit
///     position from this single pair via `h1 + i * h2`.
pub type HashFunction = fn(&[u8], u32) -> (u64, u64);

/// MurmurHash3, x64 128-bit variant.
///
/// Total over every input (including the empty slice) and bit-compatible
/// with the reference `MurmurHash3_x64_128`, so bitsets produced elsewhere
/// can be queried here.
pub fn murmur3_x64_128(key: &[u8], seed: u32) -> (u64, u64) {
    let mut h1 = seed as u64;
    let mut h2 = seed as u64;

    let mut blocks = key.chunks_exact(16);
    for block in &mut blocks {
        let (lo, hi) = block.split_at(8);
        let k1 = read_u64_le(lo);
        let k2 = read_u64_le(hi);

        h1 ^= mix_k1(k1);
        h1 = h1.rotate_left(27);
        h1 = h1.wrapping_add(h2);
        h1 = h1.wrapping_mul(5).wrapping_add(0x52dce729);

        h2 ^= mix_k2(k2);
        h2 = h2.rotate_left(31);
        h2 = h2.wrapping_add(h1);
        h2 = h2.wrapping_mul(5).wrapping_add(0x38495ab5);
    }

    let tail = blocks.remainder();
    let mut k1 = 0u64;
    let mut k2 = 0u64;

    // Tail bytes 8..15 land in k2, bytes 0..7 in k1.
    for (j, &byte) in tail.iter().enumerate().rev() {
        let shifted = (byte as u64) << (8 * (j % 8));
        if j >= 8 {
            k2 ^= shifted;
        } else {
            k1 ^= shifted;
        }
    }
    if tail.len() > 8 {
        h2 ^= mix_k2(k2);
    }
    if !tail.is_empty() {
        h1 ^= mix_k1(k1);
    }

    let len = key.len() as u64;
    h1 ^= len;
    h2 ^= len;

    h1 = h1.wrapping_add(h2);
    h2 = h2.wrapping_add(h1);

    h1 = fmix64(h1);
    h2 = fmix64(h2);

    h1 = h1.wrapping_add(h2);
    h2 = h2.wrapping_add(h1);

    (h1, h2)
}

#[inline]
fn mix_k1(k1: u64) -> u64 {
    k1.wrapping_mul(C1).rotate_left(31).wrapping_mul(C2)
}

#[inline]
fn mix_k2(k2: u64) -> u64 {
    k2.wrapping_mul(C2).rotate_left(33).wrapping_mul(C1)
}

#[inline]
fn read_u64_le(bytes: &[u8]) -> u64 {
    let mut word = [0u8; 8];
    word.copy_from_slice(bytes);
    u64::from_le_bytes(word)
}

/// Finalization mix: force all bits of a hash block to avalanche.
#[inline]
fn fmix64(mut k: u64) -> u64 {
    k ^= k >> 33;
    k = k.wrapping_mul(0xff51afd7ed558ccd);
    k ^= k >> 33;
    k = k.wrapping_mul(0xc4ceb9fe1a85ec53);
    k ^ (k >> 33)
}

/// Bits of storage per expected entry for a target false positive rate.
pub fn bits_per_entry(fpr: f64) -> f64 {
    -fpr.log2() / std::f64::consts::LN_2
}

/// Hash rounds needed for a given bits-per-entry, never less than one.
pub fn optimal_num_hashes(bits_per_entry: f64) -> u32 {
    ((bits_per_entry * std::f64::consts::LN_2).ceil() as u32).max(1)
}

/// Total bit length for `n` entries, never less than one.
pub fn optimal_bit_length(n: u64, bits_per_entry: f64) -> u64 {
    ((bits_per_entry * n as f64).ceil() as u64).max(1)
}
