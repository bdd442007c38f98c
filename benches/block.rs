//! Criterion benchmarks for the block codec pairs.
//!
//! Run with:
//!   cargo bench --bench block
//!
//! Chunk sizes stay modest because the LZ match search is exhaustive over
//! its window and therefore quadratic-ish; the point of these numbers is
//! tracking regressions, not competing with real LZ codecs.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use bpack::{compress_bound, compress_lz, compress_rle, decompress_lz, decompress_rle};

mod corpus {
    include!("corpus.rs");
}

fn bench_lz(c: &mut Criterion) {
    let mut group = c.benchmark_group("lz");

    for &chunk_size in &[4_096usize, 65_536] {
        let chunk = corpus::text_chunk(chunk_size, 0x5EED);
        let mut dst = vec![0u8; compress_bound(chunk_size)];

        group.throughput(Throughput::Bytes(chunk_size as u64));
        group.bench_with_input(
            BenchmarkId::new("compress_text", chunk_size),
            &chunk,
            |b, chunk| b.iter(|| compress_lz(chunk, &mut dst)),
        );

        // Pre-compress once, then benchmark decode throughput in
        // decompressed bytes (the meaningful quantity).
        let n = compress_lz(&chunk, &mut dst);
        let compressed = dst[..n].to_vec();
        let mut decomp = vec![0u8; chunk_size];
        group.throughput(Throughput::Bytes(chunk_size as u64));
        group.bench_with_input(
            BenchmarkId::new("decompress_text", chunk_size),
            &compressed,
            |b, compressed| b.iter(|| decompress_lz(compressed, &mut decomp).unwrap()),
        );
    }

    // Stored-raw worst case: incompressible input pays for the full match
    // search and then copies verbatim.
    {
        let chunk_size = 4_096usize;
        let chunk = corpus::noise_chunk(chunk_size, 0xBAD5EED);
        let mut dst = vec![0u8; chunk_size];
        group.throughput(Throughput::Bytes(chunk_size as u64));
        group.bench_with_input(
            BenchmarkId::new("compress_noise", chunk_size),
            &chunk,
            |b, chunk| b.iter(|| compress_lz(chunk, &mut dst)),
        );
    }

    group.finish();
}

fn bench_rle(c: &mut Criterion) {
    let mut group = c.benchmark_group("rle");

    for &chunk_size in &[65_536usize, 262_144] {
        let chunk = corpus::runs_chunk(chunk_size, 0x5EED);
        let mut dst = vec![0u8; compress_bound(chunk_size)];

        group.throughput(Throughput::Bytes(chunk_size as u64));
        group.bench_with_input(
            BenchmarkId::new("compress_runs", chunk_size),
            &chunk,
            |b, chunk| b.iter(|| compress_rle(chunk, &mut dst)),
        );

        let n = compress_rle(&chunk, &mut dst);
        let compressed = dst[..n].to_vec();
        let mut decomp = vec![0u8; chunk_size];
        group.throughput(Throughput::Bytes(chunk_size as u64));
        group.bench_with_input(
            BenchmarkId::new("decompress_runs", chunk_size),
            &compressed,
            |b, compressed| b.iter(|| decompress_rle(compressed, &mut decomp).unwrap()),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_lz, bench_rle);
criterion_main!(benches);
