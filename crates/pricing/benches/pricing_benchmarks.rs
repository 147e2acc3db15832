use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use pressdesk_core::LineItemId;
use pressdesk_pricing::{calculator, LineItem};

fn build_items(count: usize) -> Vec<LineItem> {
    (0..count)
        .map(|n| {
            LineItem::new(
                LineItemId::new(),
                format!("line {n}"),
                (n % 9 + 1) as f64,
                12.75 + n as f64 * 0.25,
            )
        })
        .collect()
}

/// Per-line recomputation baseline, for comparison against summing the
/// stored totals.
fn subtotal_recomputed(items: &[LineItem]) -> f64 {
    items
        .iter()
        .map(|i| calculator::line_total(i.quantity, i.unit_price))
        .sum()
}

fn bench_subtotal(c: &mut Criterion) {
    let mut group = c.benchmark_group("subtotal");

    for &count in &[10usize, 100, 1_000] {
        let items = build_items(count);
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("stored_totals", count), &items, |b, items| {
            b.iter(|| calculator::subtotal(black_box(items)))
        });

        group.bench_with_input(BenchmarkId::new("recomputed", count), &items, |b, items| {
            b.iter(|| subtotal_recomputed(black_box(items)))
        });
    }

    group.finish();
}

fn bench_document_totals(c: &mut Criterion) {
    let items = build_items(100);

    c.bench_function("document_totals_100_lines", |b| {
        b.iter(|| {
            let sub = calculator::subtotal(black_box(&items));
            let tax = calculator::tax_amount(sub, black_box(6.0));
            calculator::total(sub, tax)
        })
    });
}

criterion_group!(benches, bench_subtotal, bench_document_totals);
criterion_main!(benches);
