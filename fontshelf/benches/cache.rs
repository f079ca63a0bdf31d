use std::{hint::black_box, path::Path, sync::Arc};

use criterion::{Criterion, criterion_group, criterion_main};
use fontshelf::{FnLoader, FontCache, LoadError};

fn stub_loader() -> FnLoader<impl Fn(&Path, u16) -> Result<Arc<u16>, LoadError>> {
    FnLoader(|_: &Path, size: u16| Ok(Arc::new(size)))
}

fn cache_benchmark(c: &mut Criterion) {
    let cache = FontCache::new(stub_loader());
    cache.get("bench.ttf", 12).expect("Failed to warm cache");

    c.bench_function("hit", |b| {
        b.iter(|| {
            let font = cache.get(black_box("bench.ttf"), 12).expect("Failed to get font");
            black_box(font);
        })
    });

    c.bench_function("miss", |b| {
        let mut size = 0u16;
        b.iter(|| {
            size = size.wrapping_add(1).max(1);
            cache.remove("bench.ttf", size);
            let font = cache.get("bench.ttf", black_box(size)).expect("Failed to load font");
            black_box(font);
        })
    });
}

criterion_group!(benches, cache_benchmark);
criterion_main!(benches);
