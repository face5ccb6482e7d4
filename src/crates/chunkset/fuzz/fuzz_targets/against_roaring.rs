#![no_main]

use libfuzzer_sys::arbitrary::{self, Arbitrary, Unstructured};
use libfuzzer_sys::fuzz_target;

// Thresholds around the interesting crossovers.
const THRESHOLDS: [usize; 8] = [
    1,      // always bitset
    2,
    64,     // one bitset word
    65,
    4_095,
    4_096,  // default
    65_536, // full chunk
    65_537, // always array
];

/// A key biased towards a few chunks so dense containers appear.
#[derive(Debug, Copy, Clone)]
struct Key(u32);

impl<'a> Arbitrary<'a> for Key {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        if u.arbitrary::<bool>()? {
            let chunk = u.int_in_range(0u16..=3)?;
            Ok(Self(chunkset::join(chunk, u.arbitrary()?)))
        } else {
            Ok(Self(u.arbitrary()?))
        }
    }
}

#[derive(Arbitrary, Debug)]
enum Operation {
    Insert(Key),
    InsertRange(Key, u16),
    Merge(Vec<Key>),
}

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    threshold_idx: u8,
    ops: Vec<Operation>,
    probes: Vec<Key>,
}

fuzz_target!(|input: FuzzInput| {
    let threshold = THRESHOLDS[input.threshold_idx as usize % THRESHOLDS.len()];
    let config = chunkset::BuilderConfig::new(threshold).unwrap();

    let mut builder = chunkset::Builder::with_config(config);
    let mut oracle = roaring::RoaringBitmap::new();

    for op in &input.ops {
        match *op {
            Operation::Insert(Key(k)) => {
                builder.insert(k);
                oracle.insert(k);
            }
            Operation::InsertRange(Key(start), len) => {
                let end = start.saturating_add(len as u32);
                builder.extend(start..end);
                oracle.insert_range(start..end);
            }
            Operation::Merge(ref keys) => {
                let mut other = chunkset::Builder::with_config(config);
                for &Key(k) in keys {
                    other.insert(k);
                    oracle.insert(k);
                }
                builder.merge(other);
            }
        }
    }

    let index = builder.finalize();

    for k in oracle.iter() {
        assert!(index.contains(k), "missing {k}");
    }
    for &Key(k) in &input.probes {
        assert_eq!(index.contains(k), oracle.contains(k), "contains({k}) mismatch");
    }

    for (chunk, container) in index.chunks() {
        let distinct = oracle
            .iter()
            .filter(|&k| chunkset::split(k).0 == chunk)
            .count();
        let expected = if distinct < threshold {
            chunkset::ContainerKind::Array
        } else {
            chunkset::ContainerKind::Bitset
        };
        assert_eq!(container.kind(), expected, "chunk {chunk}");
    }
});
