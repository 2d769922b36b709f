use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use zedscan::luma::to_luma;
use zedscan::{BufferPool, DefaultScanner, Discard};

const DIMS: [(u32, u32); 4] = [(320, 240), (640, 480), (1280, 720), (1920, 1080)];

pub fn benchmark_to_luma(c: &mut Criterion) {
    let mut group = c.benchmark_group("to_luma");
    for (w, h) in DIMS {
        let pixels = (w * h) as usize;
        let source: Vec<u8> = (0..pixels * 4).map(|i| (i * 31 % 251) as u8).collect();
        let mut buffer = source.clone();
        group.throughput(Throughput::Elements(pixels as u64));
        group.bench_with_input(BenchmarkId::from_parameter(format!("{w}x{h}")), &pixels, |b, &n| {
            b.iter(|| {
                buffer.copy_from_slice(&source);
                black_box(to_luma(&mut buffer, n).ok());
            })
        });
    }
    group.finish();
}

pub fn benchmark_pool_reuse(c: &mut Criterion) {
    let mut pool = BufferPool::new();
    pool.acquire(1920, 1080).ok();
    c.bench_function("pool/reuse", |b| {
        b.iter(|| {
            for (w, h) in DIMS {
                black_box(pool.acquire(w, h).map(|r| r.len()).ok());
            }
        })
    });
}

pub fn benchmark_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");
    for (w, h) in DIMS {
        let mut scanner = DefaultScanner::default();
        let frame: Vec<u8> = vec![0xC0; (w * h * 4) as usize];
        group.bench_function(BenchmarkId::from_parameter(format!("{w}x{h}")), |b| {
            b.iter(|| {
                if let Ok(region) = scanner.create_buffer(w, h) {
                    region.copy_from_slice(&frame);
                }
                black_box(scanner.scan_buffer_rgba(w, h, &mut Discard))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_to_luma, benchmark_pool_reuse, benchmark_tick);
criterion_main!(benches);
