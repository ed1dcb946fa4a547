use std::hint::black_box;
use std::io;

use bytes::{Buf, Bytes};
use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use micro_client::body::{BodyCopier, NoProgress, TruncationPolicy};

const BODY_SIZES: [usize; 3] = [4 * 1024, 256 * 1024, 4 * 1024 * 1024];
const BUFFER_SIZES: [usize; 3] = [1024, 8 * 1024, 64 * 1024];

fn benchmark_copy(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("body_copier");

    for body_size in BODY_SIZES {
        let body = Bytes::from(vec![b'x'; body_size]);
        group.throughput(Throughput::Bytes(body_size as u64));

        for buffer_size in BUFFER_SIZES {
            let id = BenchmarkId::new(format!("{body_size}B"), format!("buffer_{buffer_size}"));
            group.bench_with_input(id, &body, |b, body| {
                b.iter_batched(
                    || body.clone().reader(),
                    |source| {
                        let outcome = BodyCopier::new(source, Some(body_size as u64))
                            .buffer_size(buffer_size)
                            .truncation(TruncationPolicy::Fail)
                            .copy(io::sink(), NoProgress)
                            .expect("in-memory body should copy");
                        black_box(outcome)
                    },
                    BatchSize::SmallInput,
                );
            });
        }
    }

    group.finish();
}

criterion_group!(copier, benchmark_copy);
criterion_main!(copier);
