use RustedCalc::plotting::contour::contour_segments;
use RustedCalc::plotting::plot_planner::{PlotKind, SamplingDomain, plan_plot_text};
use RustedCalc::symbolic::parse_expr::parse;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse", |b| {
        b.iter(|| parse(black_box("sin(x)**2 + cos(x)/(1+x**2) - pow(abs(x), 0.5)")))
    });
}

fn bench_curve(c: &mut Criterion) {
    let domain = SamplingDomain::default();
    c.bench_function("curve 1000 points", |b| {
        b.iter(|| plan_plot_text(black_box("sin(x)*x - sqrt(x)"), &domain))
    });
}

fn bench_mesh(c: &mut Criterion) {
    let mut group = c.benchmark_group("implicit curve");
    group.sample_size(10);
    for samples in [200, 1000] {
        let domain = SamplingDomain::new(-10.0, 10.0, samples);
        group.bench_function(format!("mesh {}x{}", samples, samples), |b| {
            b.iter(|| plan_plot_text(black_box("x**2+y**2-4"), &domain))
        });
    }
    let plot = plan_plot_text("x**2+y**2-4", &SamplingDomain::default());
    if let PlotKind::ImplicitContour {
        xs,
        ys,
        values,
        level,
    } = &plot.kind
    {
        group.bench_function("marching squares 1000x1000", |b| {
            b.iter(|| contour_segments(xs, ys, values, *level))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parse, bench_curve, bench_mesh);
criterion_main!(benches);
