use crate::{Error, Result};

/// Number of low-order key bits stored inside a container.
pub const CHUNK_BITS: u32 = 16;

/// Number of distinct remainders a single chunk can hold.
pub const CHUNK_SIZE: usize = 1 << CHUNK_BITS;

/// Bits per bitset word.
pub const WORD_BITS: usize = u64::BITS as usize;

/// Upper bound on the number of words in a bitset container.
pub const MAX_WORDS: usize = CHUNK_SIZE / WORD_BITS;

/// Split `key` into `(chunk, remainder)`.
#[inline]
pub fn split(key: u32) -> (u16, u16) {
    ((key >> CHUNK_BITS) as u16, key as u16)
}

/// Inverse of [`split`].
#[inline]
pub fn join(chunk: u16, remainder: u16) -> u32 {
    ((chunk as u32) << CHUNK_BITS) | remainder as u32
}

/// Narrow a signed or wide integer to a `u32` key.
///
/// Negative values and values above `u32::MAX` are rejected.
pub fn checked_key<K: Into<i128>>(key: K) -> Result<u32> {
    let key = key.into();
    u32::try_from(key).map_err(|_| Error::KeyOutOfRange { key })
}

/// Word index and bit position of `remainder` in a bitset container.
#[inline]
pub(crate) fn word_position(remainder: u16) -> (usize, u32) {
    let remainder = remainder as usize;
    (remainder / WORD_BITS, (remainder % WORD_BITS) as u32)
}
