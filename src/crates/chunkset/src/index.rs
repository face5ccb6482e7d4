use crate::container::{Container, ContainerKind};
use crate::key::{checked_key, split};
use crate::Result;

/// Immutable chunk → container mapping produced by [`Builder::finalize`].
///
/// Containers are kept sorted by chunk identifier and located by binary
/// search. Nothing here mutates after construction, so a `ChunkIndex` can be
/// shared freely between threads.
///
/// [`Builder::finalize`]: crate::Builder::finalize
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "allocative", derive(allocative::Allocative))]
pub struct ChunkIndex {
    containers: Vec<(u16, Container)>,
}

/// Container breakdown of a [`ChunkIndex`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IndexStats {
    pub array_containers: usize,
    pub bitset_containers: usize,
    pub heap_bytes: usize,
}

impl ChunkIndex {
    /// An index with no chunks; every query returns `false`.
    pub fn empty() -> Self {
        Self::default()
    }

    /// `containers` must be sorted by strictly ascending chunk.
    pub(crate) fn from_sorted_containers(containers: Vec<(u16, Container)>) -> Self {
        debug_assert!(containers.windows(2).all(|w| w[0].0 < w[1].0));
        Self { containers }
    }

    /// Test whether `key` is a member.
    pub fn contains(&self, key: u32) -> bool {
        let (chunk, remainder) = split(key);
        self.container(chunk)
            .is_some_and(|container| container.contains(remainder))
    }

    /// Like [`contains`](Self::contains), for keys of a wider or signed type.
    ///
    /// Fails with [`Error::KeyOutOfRange`](crate::Error::KeyOutOfRange) when
    /// `key` is negative or larger than `u32::MAX`.
    pub fn try_contains<K: Into<i128>>(&self, key: K) -> Result<bool> {
        Ok(self.contains(checked_key(key)?))
    }

    /// The container holding `chunk`, if any key of that chunk was inserted.
    pub fn container(&self, chunk: u16) -> Option<&Container> {
        self.containers
            .binary_search_by_key(&chunk, |(c, _)| *c)
            .ok()
            .map(|pos| &self.containers[pos].1)
    }

    /// Iterate over `(chunk, container)` pairs in ascending chunk order.
    pub fn chunks(&self) -> impl ExactSizeIterator<Item = (u16, &Container)> + '_ {
        self.containers
            .iter()
            .map(|(chunk, container)| (*chunk, container))
    }

    /// The number of non-empty chunks.
    pub fn chunk_count(&self) -> usize {
        self.containers.len()
    }

    /// Returns `true` if no key was inserted before finalization.
    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    /// The number of heap-allocated bytes used by all containers.
    pub fn heap_bytes(&self) -> usize {
        self.containers.iter().map(|(_, c)| c.heap_bytes()).sum()
    }

    pub fn stats(&self) -> IndexStats {
        let mut stats = IndexStats::default();
        for (_, container) in &self.containers {
            match container.kind() {
                ContainerKind::Array => stats.array_containers += 1,
                ContainerKind::Bitset => stats.bitset_containers += 1,
            }
            stats.heap_bytes += container.heap_bytes();
        }
        stats
    }
}
