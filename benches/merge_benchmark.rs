//! Accumulator merge benchmarks.
//!
//! Measures appending load-more pages onto a long result list, with and
//! without overlap between consecutive pages.
//!
//! Run with: cargo bench

#![allow(missing_docs)] // criterion macros generate undocumented items

use catbrowse::engine::{RequestTicket, ResultAccumulator};
use catbrowse::model::{Product, ProductId, QueryState, ResultPage};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

const PAGE_SIZE: usize = 50;
const PAGES: u32 = 200;

fn product(index: usize) -> Product {
    Product {
        id: ProductId::new(format!("product-{index:06}")).expect("valid product id"),
        name: format!("Product {index}"),
        description: "Lightweight trail running shoe".to_string(),
        price: 49.99,
        category: Some("Footwear".to_string()),
        subcategory: Some("Running".to_string()),
        images: vec![],
        brand: None,
        tags: vec![],
    }
}

/// Pages of `PAGE_SIZE` products; each page repeats `overlap` items of the
/// previous one, the way offset pagination does when the catalog shifts.
fn pages(overlap: usize) -> Vec<ResultPage> {
    (0..PAGES)
        .map(|p| {
            let start = (p as usize * PAGE_SIZE).saturating_sub(overlap);
            let end = (p as usize + 1) * PAGE_SIZE;
            ResultPage {
                items: (start..end).map(product).collect(),
                current_page: p + 1,
                total_pages: PAGES,
                total_count: u64::from(PAGES) * PAGE_SIZE as u64,
            }
        })
        .collect()
}

fn merge_all(pages: Vec<ResultPage>) -> usize {
    let base = QueryState::default().with_term("shoe");
    let mut accumulator: ResultAccumulator = ResultAccumulator::new(base.clone());
    for (i, page) in pages.into_iter().enumerate() {
        let number = i as u32 + 1;
        let ticket = RequestTicket {
            sequence: u64::from(number),
            query: base.at_page(number),
        };
        accumulator.apply(&ticket, Ok(page));
    }
    accumulator.display().items.len()
}

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("accumulator_merge");

    for overlap in [0, 5] {
        group.bench_function(format!("{PAGES}_pages_overlap_{overlap}"), |b| {
            b.iter_batched(
                || pages(overlap),
                |pages| black_box(merge_all(pages)),
                BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_merge);
criterion_main!(benches);
