//! Traversal benchmark: fail-fast iteration vs split cursors, and the cost of
//! propagating edits through nested views.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use seqview::{Capabilities, Generation, RandomAccess, SeqError, Sequence, SequenceExt, Shared};

/// Plain growable array for benchmarking.
struct Array {
    items: Vec<u64>,
    generation: Generation,
}

impl Sequence for Array {
    type Item = u64;

    fn get(&self, index: usize) -> Result<u64, SeqError> {
        return self.items.get(index).copied().ok_or(SeqError::OutOfRange { index, len: self.items.len() });
    }

    fn len(&self) -> usize {
        return self.items.len();
    }

    fn generation(&self) -> Generation {
        return self.generation;
    }

    fn capabilities(&self) -> Capabilities {
        return Capabilities::INSERT | Capabilities::REMOVE;
    }

    fn insert(&mut self, index: usize, value: u64) -> Result<(), SeqError> {
        if index > self.items.len() {
            return Err(SeqError::OutOfRange { index, len: self.items.len() });
        }
        self.items.insert(index, value);
        self.generation.bump();
        return Ok(());
    }

    fn remove_at(&mut self, index: usize) -> Result<u64, SeqError> {
        if index >= self.items.len() {
            return Err(SeqError::OutOfRange { index, len: self.items.len() });
        }
        self.generation.bump();
        return Ok(self.items.remove(index));
    }
}

impl RandomAccess for Array {}

fn array(len: usize) -> Array {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let items = (0..len).map(|_| rng.gen_range(0..1_000)).collect();
    return Array { items, generation: Generation::new() };
}

fn bench_traversal(c: &mut Criterion) {
    let mut group = c.benchmark_group("traversal");
    for len in [1_000usize, 100_000] {
        let seq = array(len);

        group.bench_with_input(BenchmarkId::new("iter", len), &seq, |b, seq| {
            b.iter(|| {
                let mut sum = 0u64;
                for item in seq.iter() {
                    sum += item.unwrap();
                }
                black_box(sum)
            })
        });

        group.bench_with_input(BenchmarkId::new("split_cursor", len), &seq, |b, seq| {
            b.iter(|| {
                let mut sum = 0u64;
                let mut pending = vec![seq.split_cursor()];
                while let Some(mut cursor) = pending.pop() {
                    if cursor.estimate_size() > 256 {
                        if let Some(lower) = cursor.try_split() {
                            pending.push(cursor);
                            pending.push(lower);
                            continue;
                        }
                    }
                    cursor.for_each_remaining(|x| sum += x).unwrap();
                }
                black_box(sum)
            })
        });
    }
    group.finish();
}

fn bench_nested_views(c: &mut Criterion) {
    let mut group = c.benchmark_group("nested_views");
    for depth in [1usize, 4, 16] {
        group.bench_with_input(BenchmarkId::new("insert_remove", depth), &depth, |b, &depth| {
            let root = Shared::new(array(4_096));
            let mut view = root.view(0, 4_096).unwrap();
            for _ in 1..depth {
                let size = view.size().unwrap();
                view = view.view(1, size - 1).unwrap();
            }
            let mut rng = StdRng::seed_from_u64(depth as u64);
            b.iter(|| {
                let size = view.size().unwrap();
                let pos = rng.gen_range(0..size);
                view.insert(pos, 7).unwrap();
                black_box(view.remove_at(pos).unwrap())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_traversal, bench_nested_views);
criterion_main!(benches);
