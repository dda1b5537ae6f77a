use harvest_core::{render_svg, ChartBuilder, DataRow, Dataset, Theme, UiState, YieldAggregation};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, black_box};

const CROPS: [&str; 8] = ["Wheat", "Barley", "Corn", "Millet", "Oats", "Rye", "Rice, Milled", "Sorghum"];

fn gen_rows(n: usize, scale: f64) -> Vec<DataRow> {
    let mut v = Vec::with_capacity(n);
    for i in 0..n {
        let year = 2010 + (i % 20) as i32;
        let crop = CROPS[i % CROPS.len()];
        // simple waveform so totals differ per year
        let value = ((i as f64 * 0.01).sin() + 1.5) * scale;
        v.push(DataRow::new(crop, year.to_string(), value));
    }
    v
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("scene_build");
    for &n in &[10_000usize, 100_000usize] {
        let exports = Dataset::new("exports", gen_rows(n, 1_000.0));
        let yields = Dataset::new("yield", gen_rows(n, 0.02));
        for agg in [YieldAggregation::Sum, YieldAggregation::Mean] {
            group.bench_with_input(BenchmarkId::from_parameter(format!("n{n}_{agg}")), &agg, |b, &a| {
                b.iter(|| black_box(ChartBuilder::new(&exports, &yields).aggregation(a).build()));
            });
        }
    }
    group.finish();
}

fn bench_svg(c: &mut Criterion) {
    let exports = Dataset::new("exports", gen_rows(50_000, 1_000.0));
    let yields = Dataset::new("yield", gen_rows(50_000, 0.02));
    let scene = ChartBuilder::new(&exports, &yields).build();
    let theme = Theme::field();
    let ui = UiState::new();
    c.bench_function("render_svg", |b| b.iter(|| black_box(render_svg(&scene, &theme, &ui))));
}

criterion_group!(benches, bench_build, bench_svg);
criterion_main!(benches);
