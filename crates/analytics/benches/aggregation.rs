use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use rust_decimal::Decimal;
use shelfscan_analytics::{CatalogView, ReportOptions, combined_report};
use shelfscan_core::{ArticleId, ProductId};
use shelfscan_products::{Article, Product};

/// Synthetic feed: a few articles per product, every tenth price text malformed.
fn synthetic_catalog(products: usize) -> Vec<Product> {
    (0..products)
        .map(|i| {
            let articles = (0..3)
                .map(|j| {
                    let n = i * 3 + j;
                    let per_unit = if n % 10 == 0 {
                        "(Preis auf Anfrage)".to_string()
                    } else {
                        format!("({},{:02} €/Liter)", n % 7, n % 100)
                    };
                    Article {
                        id: Some(ArticleId(n as i64)),
                        short_description: Some(format!("{} x 0,5l Flasche", n % 24 + 1)),
                        price: Some(Decimal::new((n % 3000) as i64, 2)),
                        unit: Some("Liter".to_string()),
                        price_per_unit_text: Some(per_unit),
                        image: None,
                    }
                })
                .collect();

            Product {
                id: Some(ProductId(i as i64)),
                name: Some(format!("product-{i}")),
                articles: Some(articles),
                ..Product::default()
            }
        })
        .collect()
}

fn bench_combined_report(c: &mut Criterion) {
    let mut group = c.benchmark_group("combined_report");

    for size in [100usize, 1_000, 10_000] {
        let catalog = synthetic_catalog(size);
        group.throughput(Throughput::Elements((size * 3) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &catalog, |b, catalog| {
            b.iter(|| {
                let view = CatalogView::flatten(black_box(catalog));
                combined_report(view.entries(), &ReportOptions::default())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_combined_report);
criterion_main!(benches);
