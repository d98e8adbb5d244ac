//! Performance benchmarks for paged collection traversal
//!
//! Run with: `cargo bench -p assetgraph-core`
//!
//! These benchmarks measure the client-side cost of walking a collection
//! against an in-memory catalog, so transport latency is excluded:
//! - Forward scans at several window sizes (decode + window replacement)
//! - Worst-case random access (every access misses the window)

use assetgraph_core::client::{InMemoryCatalog, TransportClient};
use assetgraph_core::config::RetrievalConfig;
use assetgraph_core::models::{AssetHandle, Category, License, ScopeContext};
use assetgraph_core::services::{CollectionContext, PagedCollection};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::json;
use std::sync::Arc;
use tokio::runtime::Runtime;

const LICENSE_COUNT: usize = 10_000;

/// Setup a catalog holding `count` licenses on one asset
fn setup_catalog(count: usize) -> Arc<dyn TransportClient> {
    let mut catalog = InMemoryCatalog::new();
    catalog.add_asset("bench-asset", "bench.table").push_elements(
        "bench-asset",
        Category::Licenses,
        None,
        (0..count).map(|i| {
            json!({
                "guid": format!("license-{}", i),
                "name": "Apache-2.0",
                "licensee": format!("team-{}", i % 17),
                "startDate": "2024-01-01T00:00:00Z"
            })
        }),
    )
    .unwrap();
    Arc::new(catalog)
}

fn license_collection(
    transport: &Arc<dyn TransportClient>,
    page_size: usize,
) -> PagedCollection<License> {
    let scope = Arc::new(ScopeContext::new(
        "bench-server",
        "https://localhost:9443",
        "bench-user",
    ));
    let context = CollectionContext::new(
        AssetHandle::new("bench-asset", scope),
        transport.clone(),
        RetrievalConfig::with_page_size(page_size),
    );
    PagedCollection::new(context, Category::Licenses, None, LICENSE_COUNT)
}

/// Benchmark a full forward scan
///
/// Fetch count is ceil(N / W); larger windows trade memory for fewer round trips.
fn bench_forward_scan(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let transport = setup_catalog(LICENSE_COUNT);

    let mut group = c.benchmark_group("forward_scan");
    group.sample_size(20);

    for page_size in [10, 100, 1000] {
        group.bench_with_input(
            BenchmarkId::from_parameter(page_size),
            &page_size,
            |b, &page_size| {
                b.iter(|| {
                    rt.block_on(async {
                        let mut licenses = license_collection(&transport, page_size);
                        let mut visited = 0;
                        while let Some(license) = licenses.next_element().await.unwrap() {
                            black_box(license.guid());
                            visited += 1;
                        }
                        visited
                    })
                })
            },
        );
    }

    group.finish();
}

/// Benchmark strided random access
///
/// Each index lands outside the previous window, so every access is a fetch.
fn bench_random_access(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let transport = setup_catalog(LICENSE_COUNT);

    c.bench_function("random_access_miss", |b| {
        b.iter(|| {
            rt.block_on(async {
                let mut licenses = license_collection(&transport, 100);
                for step in 0..100 {
                    let index = (step * 7_919) % LICENSE_COUNT;
                    black_box(licenses.get(index).await.unwrap());
                }
            })
        })
    });
}

criterion_group!(benches, bench_forward_scan, bench_random_access);
criterion_main!(benches);
