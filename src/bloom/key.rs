//! Canonical byte encodings for filter keys.
//!
//! Equal keys must hash identically across runs and platforms, so every
//! key type maps to one fixed byte representation:
//!
//! * fixed-width integers: little-endian at their own width (`42i32` is
//!   four bytes, `42u64` eight), so the same value in different widths is a
//!   *different* key
//! * `usize` / `isize`: widened to eight bytes so 32- and 64-bit targets
//!   agree
//! * `bool`: a single `0` or `1` byte
//! * `str`, `String`, `[u8]`, `[u8; N]`, `Vec<u8>`: their raw bytes

/// Anything that can be inserted into or queried against a Bloom filter.
pub trait BloomKey {
    /// Calls `f` with the canonical bytes of this key.
    fn with_key_bytes<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R;
}

macro_rules! impl_bloom_key_le {
    ($($ty:ty),* $(,)?) => {
        $(
            impl BloomKey for $ty {
                #[inline]
                fn with_key_bytes<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R {
                    f(&self.to_le_bytes())
                }
            }
        )*
    };
}

impl_bloom_key_le!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128);

impl BloomKey for usize {
    #[inline]
    fn with_key_bytes<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R {
        f(&(*self as u64).to_le_bytes())
    }
}

impl BloomKey for isize {
    #[inline]
    fn with_key_bytes<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R {
        f(&(*self as i64).to_le_bytes())
    }
}

impl BloomKey for bool {
    #[inline]
    fn with_key_bytes<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R {
        f(&[*self as u8])
    }
}

impl BloomKey for [u8] {
    #[inline]
    fn with_key_bytes<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R {
        f(self)
    }
}

impl<const N: usize> BloomKey for [u8; N] {
    #[inline]
    fn with_key_bytes<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R {
        f(self)
    }
}

impl BloomKey for Vec<u8> {
    #[inline]
    fn with_key_bytes<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R {
        f(self)
    }
}

impl BloomKey for str {
    #[inline]
    fn with_key_bytes<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R {
        f(self.as_bytes())
    }
}

impl BloomKey for String {
    #[inline]
    fn with_key_bytes<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R {
        f(self.as_bytes())
    }
}

impl<K: BloomKey + ?Sized> BloomKey for &K {
    #[inline]
    fn with_key_bytes<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R {
        (**self).with_key_bytes(f)
    }
}
