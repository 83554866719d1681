use angle_diagram::config::{DeclutterConfig, LayoutConfig, LayoutStrategy};
use angle_diagram::document::parse_diagram;
use angle_diagram::ir::{Canvas, Diagram, Point};
use angle_diagram::layout::{compute_layout, declutter, normalize_grid, route_path};
use angle_diagram::render::render_svg;
use angle_diagram::theme::Theme;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::collections::BTreeMap;
use std::hint::black_box;

/// Scattered places on a jittered lattice, linked by one route per row and column.
fn lattice_diagram(side: usize) -> Diagram {
    let mut places = BTreeMap::new();
    for row in 0..side {
        for col in 0..side {
            let jitter = ((row * 31 + col * 17) % 13) as f64 * 0.013;
            places.insert(
                format!("P{row}_{col}"),
                Point::new(col as f64 * 0.25 + jitter, row as f64 * 0.25 - jitter),
            );
        }
    }
    let mut routes = BTreeMap::new();
    for row in 0..side {
        let stops = (0..side).map(|col| format!("P{row}_{col}")).collect();
        routes.insert(format!("Row {row}"), stops);
    }
    for col in 0..side {
        let stops = (0..side).map(|row| format!("P{row}_{col}")).collect();
        routes.insert(format!("Column {col}"), stops);
    }
    Diagram::new(places, routes, Canvas::default(), 40.0)
}

fn fixture(name: &str) -> &'static str {
    match name {
        "a_roads" => include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/tests/fixtures/a_roads.json"
        )),
        "colombo_roads" => include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/tests/fixtures/colombo_roads.json"
        )),
        _ => panic!("unknown fixture: {name}"),
    }
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for name in ["a_roads", "colombo_roads"] {
        let input = fixture(name);
        group.bench_with_input(BenchmarkId::from_parameter(name), input, |b, data| {
            b.iter(|| {
                let diagram = parse_diagram(black_box(data)).expect("parse failed");
                black_box(diagram.places().len());
            });
        });
    }
    group.finish();
}

fn bench_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid");
    for side in [4usize, 16, 48] {
        let diagram = lattice_diagram(side);
        group.bench_with_input(BenchmarkId::from_parameter(side), &diagram, |b, data| {
            b.iter(|| {
                let normalized = normalize_grid(black_box(data.places()));
                black_box(normalized.len());
            });
        });
    }
    group.finish();
}

fn bench_declutter(c: &mut Criterion) {
    let mut group = c.benchmark_group("declutter");
    group.sample_size(20);
    let config = DeclutterConfig::default();
    for side in [4usize, 8, 16] {
        let diagram = lattice_diagram(side);
        group.bench_with_input(BenchmarkId::from_parameter(side), &diagram, |b, data| {
            b.iter(|| {
                let mut places = data.places().clone();
                let report = declutter(black_box(&mut places), &config);
                black_box(report.max_displacement);
            });
        });
    }
    group.finish();
}

fn bench_routing(c: &mut Criterion) {
    let mut group = c.benchmark_group("routing");
    for hops in [8usize, 64, 512] {
        let points: Vec<Point> = (0..=hops)
            .map(|i| Point::new(i as f64 * 10.0, ((i * 7) % 5) as f64 * 6.0))
            .collect();
        group.bench_with_input(BenchmarkId::from_parameter(hops), &points, |b, data| {
            b.iter(|| {
                let path = route_path(black_box(data));
                black_box(path.segments.len());
            });
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let theme = Theme::transit();
    for side in [4usize, 16] {
        let layout = compute_layout(&lattice_diagram(side), &theme).expect("layout failed");
        group.bench_with_input(BenchmarkId::from_parameter(side), &layout, |b, data| {
            b.iter(|| {
                let svg = render_svg(black_box(data), &theme);
                black_box(svg.len());
            });
        });
    }
    group.finish();
}

fn bench_end_to_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("end_to_end");
    let theme = Theme::transit();
    for strategy in [LayoutStrategy::Grid, LayoutStrategy::Declutter] {
        let config = LayoutConfig {
            strategy,
            ..LayoutConfig::default()
        };
        let id = format!("a_roads/{strategy:?}");
        group.bench_with_input(BenchmarkId::from_parameter(id), fixture("a_roads"), |b, data| {
            b.iter(|| {
                let mut diagram = parse_diagram(black_box(data)).expect("parse failed");
                diagram.apply_layout(&config);
                let layout = compute_layout(&diagram, &theme).expect("layout failed");
                let svg = render_svg(&layout, &theme);
                black_box(svg.len());
            });
        });
    }
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_parse, bench_grid, bench_declutter, bench_routing, bench_render, bench_end_to_end
);
criterion_main!(benches);
