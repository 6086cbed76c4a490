//! Benchmark for the normalization layer and the rate limiter
//!
//! Target: normalization stays negligible next to the network round trip

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use hostbridge::domain::status::{ServerStatus, SiteStatus};
use hostbridge::pipeline::{RateLimiter, RollingWindowLimiter};
use hostbridge::Site;
use serde_json::json;

fn bench_status_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    group.throughput(Throughput::Elements(1));

    let inputs = [
        "running", "ONLINE ", "building", "suspended", "definitely-not-a-status", "",
    ];

    group.bench_function("status_parse", |b| {
        let mut counter = 0usize;
        b.iter(|| {
            counter += 1;
            let raw = inputs[counter % inputs.len()];
            let _ = black_box(ServerStatus::parse(black_box(raw)));
            let _ = black_box(SiteStatus::parse(black_box(raw)));
        });
    });

    group.finish();
}

fn bench_site_from_map(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    group.throughput(Throughput::Elements(1));

    let payload = json!({
        "site_id": 4021,
        "server": "88",
        "name": "shop.example.com",
        "php": "8.3",
        "ssl": "true",
        "certificate_status": "installed",
        "alias_domains": ["www.shop.example.com", "m.shop.example.com"],
        "state": "live",
        "created_at": "2024-11-02T08:15:30Z"
    });
    let map = payload.as_object().cloned().unwrap();

    group.bench_function("site_from_map", |b| {
        b.iter(|| {
            let site = Site::from_map(black_box(&map));
            black_box(site)
        });
    });

    group.bench_function("site_round_trip", |b| {
        let site = Site::from_map(&map);
        b.iter(|| {
            let flat = site.to_map();
            black_box(Site::from_map(black_box(&flat)))
        });
    });

    group.finish();
}

fn bench_rate_limiter(c: &mut Criterion) {
    let mut group = c.benchmark_group("rate_limit");
    group.throughput(Throughput::Elements(1));

    let rt = tokio::runtime::Runtime::new().unwrap();
    let limiter = RollingWindowLimiter::new();

    group.bench_function("acquire_under_ceiling", |b| {
        let mut counter = 0u64;
        b.iter(|| {
            counter += 1;
            // Rotate backends so the ceiling is never reached
            let backend = format!("panel-{}", counter % 64);
            rt.block_on(async {
                let _ = black_box(limiter.acquire(&backend, u32::MAX).await);
            });
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_status_parse,
    bench_site_from_map,
    bench_rate_limiter
);
criterion_main!(benches);
