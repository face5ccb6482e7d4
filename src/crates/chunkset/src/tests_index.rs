use crate::*;

const SAMPLE: [u32; 12] = [4, 8, 23, 35, 2, 128, 200, 31, 32, 33, 1, 0];

fn sample_index() -> ChunkIndex {
    let mut builder = Builder::new();
    for x in (0..10_000).step_by(2) {
        builder.insert(x);
    }
    for x in SAMPLE {
        builder.insert(x * 10_000);
    }
    builder.finalize()
}

#[test]
fn test_empty_builder() {
    let builder = Builder::new();
    assert!(builder.is_empty());

    let index = builder.finalize();
    assert!(index.is_empty());
    assert_eq!(index.chunk_count(), 0);
    for key in [0, 1, 65_535, 65_536, u32::MAX] {
        assert!(!index.contains(key));
    }
    assert_eq!(index, ChunkIndex::empty());
}

#[test]
fn test_chunk_boundary() {
    let index = Builder::from_iter([65_535]).finalize();
    assert!(index.contains(65_535));
    assert!(!index.contains(65_536));
    assert!(index.container(1).is_none());

    let index = Builder::from_iter([65_536]).finalize();
    assert!(!index.contains(65_535));
    assert!(index.contains(65_536));
    assert!(index.container(0).is_none());

    let index = Builder::from_iter([65_535, 65_536]).finalize();
    assert!(index.contains(65_535));
    assert!(index.contains(65_536));
    assert_eq!(index.chunk_count(), 2);
}

#[test]
fn test_end_to_end_scenario() {
    let index = sample_index();

    assert!(index.contains(4));
    assert!(!index.contains(5));
    assert!(index.contains(0));
    assert!(index.contains(230_000));
    assert!(index.contains(2_000_000));
    assert!(!index.contains(230_001));
    assert!(!index.contains(10_002));

    // Chunk 0 holds the 5000 even keys plus 10000, 20000 and 40000.
    let chunk0 = index.container(0).unwrap();
    assert_eq!(chunk0.kind(), ContainerKind::Bitset);

    // 230000 is alone in chunk 3.
    let chunk3 = index.container(3).unwrap();
    assert_eq!(chunk3.kind(), ContainerKind::Array);

    for x in SAMPLE {
        let even_below_limit = x % 2 == 0 && x < 10_000;
        assert_eq!(index.contains(x), even_below_limit, "key {x}");
        assert!(index.contains(x * 10_000), "key {}", x * 10_000);
    }
}

#[test]
fn test_threshold_boundary_across_chunks() {
    let mut builder = Builder::new();
    // Chunk 0: 4095 distinct remainders, chunk 1: 4096.
    builder.extend(0..4095);
    builder.extend((0..4096).map(|r| join(1, r)));
    let index = builder.finalize();

    assert_eq!(index.container(0).unwrap().kind(), ContainerKind::Array);
    assert_eq!(index.container(1).unwrap().kind(), ContainerKind::Bitset);

    for r in 0..4095u16 {
        assert!(index.contains(join(0, r)));
        assert!(index.contains(join(1, r)));
    }
    assert!(!index.contains(join(0, 4095)));
    assert!(index.contains(join(1, 4095)));
    assert!(!index.contains(join(1, 4096)));

    let stats = index.stats();
    assert_eq!(stats.array_containers, 1);
    assert_eq!(stats.bitset_containers, 1);
    assert_eq!(stats.heap_bytes, 4095 * 2 + 64 * 8);
    assert_eq!(stats.heap_bytes, index.heap_bytes());
}

#[test]
fn test_duplicate_inserts() {
    let mut builder = Builder::new();
    for _ in 0..3 {
        builder.extend(0..4095);
    }
    let index = builder.finalize();
    assert_eq!(index.container(0).unwrap().kind(), ContainerKind::Array);
    assert_eq!(index.heap_bytes(), 4095 * 2);
}

#[test]
fn test_idempotent_queries() {
    let index = sample_index();
    let before = index.clone();
    for _ in 0..3 {
        assert!(index.contains(4));
        assert!(!index.contains(5));
        assert!(index.contains(80_000));
    }
    assert_eq!(index, before);
}

#[test]
fn test_chunks_ascending() {
    let index = Builder::from_iter([u32::MAX, 0, 300_000, 70_000]).finalize();
    let chunks: Vec<u16> = index.chunks().map(|(chunk, _)| chunk).collect();
    assert_eq!(chunks, vec![0, 1, 4, u16::MAX]);
    assert_eq!(index.chunks().len(), 4);
}

#[test]
fn test_checked_entry_points() {
    let mut builder = Builder::new();
    assert_eq!(builder.try_insert(42u64), Ok(()));
    assert_eq!(
        builder.try_insert(-1i64),
        Err(Error::KeyOutOfRange { key: -1 })
    );
    assert_eq!(
        builder.try_insert(1u64 << 32),
        Err(Error::KeyOutOfRange { key: 1 << 32 })
    );
    assert_eq!(builder.pending_chunks(), 1);

    let index = builder.finalize();
    assert_eq!(index.try_contains(42i32), Ok(true));
    assert_eq!(index.try_contains(43u8), Ok(false));
    assert!(index.try_contains(-42i64).is_err());
    assert!(index.try_contains(u64::MAX).is_err());
}

#[test]
fn test_config() {
    assert_eq!(BuilderConfig::default().threshold(), DEFAULT_THRESHOLD);
    assert_eq!(DEFAULT_THRESHOLD, 4096);
    assert_eq!(BuilderConfig::new(0), Err(Error::InvalidThreshold(0)));

    // Threshold 1: every non-empty chunk is a bitset.
    let config = BuilderConfig::new(1).unwrap();
    let mut builder = Builder::with_config(config);
    builder.extend([5, 70_000]);
    assert_eq!(builder.config().threshold(), 1);
    let index = builder.finalize();
    assert_eq!(index.stats().bitset_containers, 2);
    assert!(index.contains(5));
    assert!(index.contains(70_000));
    assert!(!index.contains(6));

    // Above the chunk size: never a bitset.
    let config = BuilderConfig::new(CHUNK_SIZE + 1).unwrap();
    let mut builder = Builder::with_config(config);
    builder.extend(0..CHUNK_SIZE as u32);
    let index = builder.finalize();
    assert_eq!(index.container(0).unwrap().kind(), ContainerKind::Array);
    assert!(index.contains(65_535));
    assert!(!index.contains(65_536));
}

#[test]
fn test_merge() {
    let mut left = Builder::new();
    left.extend((0..6000).step_by(3));
    left.insert(1_000_000);

    let mut right = Builder::new();
    right.extend((0..6000).step_by(5));
    right.insert(2_000_000);

    let combined = Builder::from_iter(
        (0..6000)
            .step_by(3)
            .chain((0..6000).step_by(5))
            .chain([1_000_000, 2_000_000]),
    );

    left.merge(right);
    assert_eq!(left.finalize(), combined.finalize());
}

#[test]
fn test_index_is_shareable() {
    static_assertions::assert_impl_all!(ChunkIndex: Send, Sync);

    let index = std::sync::Arc::new(sample_index());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let index = index.clone();
            std::thread::spawn(move || index.contains(4) && !index.contains(5))
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
