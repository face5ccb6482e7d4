use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::container::{Container, DEFAULT_THRESHOLD};
use crate::index::ChunkIndex;
use crate::key::{checked_key, split};
use crate::{Error, Result};

/// Settings applied by [`Builder::finalize`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuilderConfig {
    threshold: usize,
}

impl BuilderConfig {
    /// Chunks with fewer than `threshold` distinct remainders become arrays,
    /// the rest become bitsets.
    ///
    /// A threshold above [`CHUNK_SIZE`](crate::CHUNK_SIZE) never selects the
    /// bitset form. Zero is rejected.
    pub fn new(threshold: usize) -> Result<Self> {
        if threshold == 0 {
            return Err(Error::InvalidThreshold(threshold));
        }
        Ok(Self { threshold })
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// Accumulates keys and turns them into a [`ChunkIndex`].
///
/// Remainders are buffered per chunk in insertion order, duplicates
/// included. Sorting, deduplication and the choice of container form all
/// happen in [`finalize`](Self::finalize), which consumes the builder.
#[derive(Clone, Debug, Default)]
pub struct Builder {
    config: BuilderConfig,
    chunks: FxHashMap<u16, Vec<u16>>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: BuilderConfig) -> Self {
        Self {
            config,
            chunks: FxHashMap::default(),
        }
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Add `key` to the set. O(1) amortized.
    pub fn insert(&mut self, key: u32) {
        let (chunk, remainder) = split(key);
        self.chunks.entry(chunk).or_default().push(remainder);
    }

    /// Like [`insert`](Self::insert), for keys of a wider or signed type.
    ///
    /// Keys outside `0..=u32::MAX` are rejected and leave the builder
    /// untouched.
    pub fn try_insert<K: Into<i128>>(&mut self, key: K) -> Result<()> {
        self.insert(checked_key(key)?);
        Ok(())
    }

    /// Move every buffered key of `other` into `self`.
    ///
    /// Lets independent producers fill their own builders and combine them
    /// before finalizing. The configuration of `self` is kept.
    pub fn merge(&mut self, other: Builder) {
        for (chunk, mut remainders) in other.chunks {
            self.chunks.entry(chunk).or_default().append(&mut remainders);
        }
    }

    /// Returns `true` if nothing has been inserted.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// The number of chunks that received at least one key.
    pub fn pending_chunks(&self) -> usize {
        self.chunks.len()
    }

    /// Build the immutable index, choosing a container form per chunk.
    pub fn finalize(self) -> ChunkIndex {
        let threshold = self.config.threshold;

        let mut chunks: Vec<(u16, Vec<u16>)> = self.chunks.into_iter().collect();
        chunks.sort_unstable_by_key(|(chunk, _)| *chunk);

        let containers = chunks
            .into_iter()
            .map(|(chunk, remainders)| {
                let buffered = remainders.len();
                let container = Container::from_remainders(remainders, threshold);
                trace!(chunk, buffered, kind = ?container.kind(), "finalized chunk");
                (chunk, container)
            })
            .collect();

        let index = ChunkIndex::from_sorted_containers(containers);

        let stats = index.stats();
        debug!(
            chunks = index.chunk_count(),
            arrays = stats.array_containers,
            bitsets = stats.bitset_containers,
            heap_bytes = stats.heap_bytes,
            threshold,
            "built chunk index"
        );

        index
    }
}

impl Extend<u32> for Builder {
    fn extend<I: IntoIterator<Item = u32>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl FromIterator<u32> for Builder {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        let mut builder = Builder::new();
        builder.extend(iter);
        builder
    }
}
