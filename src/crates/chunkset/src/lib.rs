//! Two-level compressed bitmap for sets of `u32` keys.
//!
//! Keys are split into a 16-bit chunk identifier (`key >> 16`) and a 16-bit
//! remainder (`key & 0xFFFF`). Each chunk stores its remainders in a
//! [`Container`], either as a sorted array (sparse chunks) or as a dense
//! bitset of 64-bit words (dense chunks). The form is picked once per chunk
//! when a [`Builder`] is finalized into an immutable [`ChunkIndex`].
//!
//! ```
//! use chunkset::Builder;
//!
//! let mut builder = Builder::new();
//! builder.insert(7);
//! builder.insert(70_000);
//!
//! let index = builder.finalize();
//! assert!(index.contains(7));
//! assert!(index.contains(70_000));
//! assert!(!index.contains(8));
//! ```

mod builder;
mod container;
mod error;
mod index;
mod key;

#[cfg(test)]
mod tests_index;

pub use builder::{Builder, BuilderConfig};
pub use container::{Container, ContainerKind, DEFAULT_THRESHOLD, WordsDisplay};
pub use error::{Error, Result};
pub use index::{ChunkIndex, IndexStats};
pub use key::{CHUNK_BITS, CHUNK_SIZE, MAX_WORDS, WORD_BITS, checked_key, join, split};
