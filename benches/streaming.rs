//! Benchmarks for streaming performance.
//!
//! Measures range header parsing and chunked file throughput.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use futures::StreamExt;
use vidstream::streaming::{parse_range_header, resolve_range, ChunkStream};

fn bench_range_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("range_parse");

    for header in ["bytes=0-1023", "bytes=1048576-", "bytes=0-9,20-29", "bytes=abc-def"] {
        group.bench_function(header, |b| {
            b.iter(|| black_box(parse_range_header(black_box(header))))
        });
    }

    group.bench_function("resolve_against_size", |b| {
        b.iter(|| black_box(resolve_range(black_box("bytes=500-999"), black_box(4096))))
    });

    group.finish();
}

/// Throughput of draining a file through `ChunkStream` at several chunk sizes.
fn bench_chunk_stream(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bench.mp4");
    let file_size = 8 * 1024 * 1024;
    std::fs::write(&path, vec![7u8; file_size]).unwrap();

    let mut group = c.benchmark_group("chunk_stream");
    group.throughput(Throughput::Bytes(file_size as u64));
    group.sample_size(20);

    for chunk_size in [8 * 1024, 64 * 1024, 256 * 1024] {
        group.bench_function(format!("drain_{}", chunk_size), |b| {
            b.iter(|| {
                rt.block_on(async {
                    let stream = ChunkStream::open(&path, 0, file_size as u64, chunk_size)
                        .await
                        .unwrap();
                    let total = stream
                        .fold(0usize, |acc, chunk| async move { acc + chunk.unwrap().len() })
                        .await;
                    black_box(total)
                })
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_range_parsing, bench_chunk_stream);
criterion_main!(benches);
