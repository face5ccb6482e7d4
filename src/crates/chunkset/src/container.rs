use std::fmt;
use std::mem;

use crate::key::{CHUNK_SIZE, word_position};

/// Default array/bitset crossover.
///
/// An array of `n` 16-bit remainders costs `16 * n` bits, a bitset covering
/// the whole chunk costs `CHUNK_SIZE` bits. They break even at
/// `n = CHUNK_SIZE / 16`.
pub const DEFAULT_THRESHOLD: usize = CHUNK_SIZE / 16;

/// The physical form of a [`Container`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "allocative", derive(allocative::Allocative))]
pub enum ContainerKind {
    /// Sorted, deduplicated array of remainders.
    Array,
    /// Dense bitset, one bit per remainder.
    Bitset,
}

/// The remainders of all keys that share one chunk.
///
/// A container is immutable once built. Both forms answer [`contains`]
/// identically for the same set of remainders; only the memory footprint
/// and the lookup cost differ.
///
/// [`contains`]: Container::contains
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "allocative", derive(allocative::Allocative))]
pub struct Container {
    repr: Repr,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "allocative", derive(allocative::Allocative))]
enum Repr {
    Array(Vec<u16>),
    Bitset(Vec<u64>),
}

impl Container {
    /// Build an array container from raw remainders (any order, duplicates
    /// allowed).
    ///
    /// Cost: O(n log n) for the sort.
    pub fn array(mut remainders: Vec<u16>) -> Self {
        remainders.sort_unstable();
        remainders.dedup();
        Self::from_sorted_distinct(remainders)
    }

    /// Build a bitset container from raw remainders (any order, duplicates
    /// allowed).
    ///
    /// The word vector is sized once to cover the largest remainder, so it
    /// never exceeds [`MAX_WORDS`](crate::MAX_WORDS) words.
    pub fn bitset(remainders: &[u16]) -> Self {
        let Some(&max) = remainders.iter().max() else {
            return Self {
                repr: Repr::Bitset(Vec::new()),
            };
        };

        let (last_field, _) = word_position(max);
        let mut words = vec![0u64; last_field + 1];
        for &remainder in remainders {
            let (field, bit) = word_position(remainder);
            words[field] |= 1u64 << bit;
        }

        Self {
            repr: Repr::Bitset(words),
        }
    }

    /// Build the container best suited to the number of distinct remainders.
    ///
    /// Fewer than `threshold` distinct remainders produce the array form,
    /// anything at or above it produces the bitset form. Duplicates are
    /// dropped before counting.
    pub fn from_remainders(mut remainders: Vec<u16>, threshold: usize) -> Self {
        remainders.sort_unstable();
        remainders.dedup();

        if remainders.len() < threshold {
            Self::from_sorted_distinct(remainders)
        } else {
            Self::bitset(&remainders)
        }
    }

    fn from_sorted_distinct(mut remainders: Vec<u16>) -> Self {
        debug_assert!(remainders.windows(2).all(|w| w[0] < w[1]));
        remainders.shrink_to_fit();

        Self {
            repr: Repr::Array(remainders),
        }
    }

    /// Test whether `remainder` is stored in this container.
    ///
    /// O(log n) for arrays, O(1) for bitsets.
    pub fn contains(&self, remainder: u16) -> bool {
        match &self.repr {
            Repr::Array(values) => values.binary_search(&remainder).is_ok(),
            Repr::Bitset(words) => {
                let (field, bit) = word_position(remainder);
                words.get(field).is_some_and(|word| (word >> bit) & 1 == 1)
            }
        }
    }

    /// The physical form chosen for this container.
    pub fn kind(&self) -> ContainerKind {
        match self.repr {
            Repr::Array(_) => ContainerKind::Array,
            Repr::Bitset(_) => ContainerKind::Bitset,
        }
    }

    /// The number of heap-allocated bytes used by this container.
    pub fn heap_bytes(&self) -> usize {
        match &self.repr {
            Repr::Array(values) => mem::size_of_val(values.as_slice()),
            Repr::Bitset(words) => mem::size_of_val(words.as_slice()),
        }
    }

    /// Render the bitset words in binary, one word per line.
    ///
    /// Returns `None` for array containers.
    pub fn words_display(&self) -> Option<WordsDisplay<'_>> {
        match &self.repr {
            Repr::Array(_) => None,
            Repr::Bitset(words) => Some(WordsDisplay { words }),
        }
    }
}

/// Binary rendering of a bitset container, see [`Container::words_display`].
pub struct WordsDisplay<'a> {
    words: &'a [u64],
}

impl fmt::Display for WordsDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for word in self.words {
            writeln!(f, "{word:#b}")?;
        }
        Ok(())
    }
}
