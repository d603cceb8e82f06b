use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use id3tree::ml::id3::{
    Attribute, DEFAULT_NUMERIC_STRIDE, DepthPolicy, Row, SplitBudget, TreeBuilder,
    gain_ratio_numeric, row_from_f64,
};

const ROW_COUNT: usize = 20_000;

fn attributes() -> Vec<Attribute> {
    vec![
        Attribute::nominal("label"),
        Attribute::nominal("color"),
        Attribute::numeric("size"),
        Attribute::numeric("weight"),
        Attribute::nominal("shape"),
    ]
}

// Deterministic pseudo-random rows; the label depends on size and color.
fn synthetic_rows(count: usize) -> Vec<Row> {
    let mut state = 0x2545_f491_4f6c_dd1du64;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        (state % 10_000) as f64 / 10_000.0
    };
    (0..count)
        .map(|_| {
            let color = (next() * 4.0).floor();
            let size = next();
            let weight = next();
            let shape = (next() * 3.0).floor();
            let label = if size > 0.5 || color == 2.0 { 1.0 } else { 0.0 };
            row_from_f64(&[label, color, size, weight, shape])
        })
        .collect()
}

fn bench_build_tree(c: &mut Criterion) {
    let rows = synthetic_rows(ROW_COUNT);
    let attributes = attributes();
    let builder = TreeBuilder::new(DEFAULT_NUMERIC_STRIDE, DepthPolicy::PerNode).expect("stride");
    c.bench_with_input(BenchmarkId::new("build_tree", ROW_COUNT), &rows, |b, rows| {
        b.iter(|| {
            let mut budget = SplitBudget::uniform(&attributes, 4);
            builder
                .build(black_box(rows.as_slice()), &attributes, &mut budget, 6)
                .expect("build")
        });
    });
}

fn bench_numeric_search(c: &mut Criterion) {
    let rows = synthetic_rows(ROW_COUNT);
    for stride in [100usize, DEFAULT_NUMERIC_STRIDE] {
        c.bench_with_input(BenchmarkId::new("gain_ratio_numeric", stride), &rows, |b, rows| {
            b.iter(|| gain_ratio_numeric(black_box(rows.as_slice()), 2, stride));
        });
    }
}

criterion_group!(benches, bench_build_tree, bench_numeric_search);
criterion_main!(benches);
