use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hdgraph::jplephem::chebyshev::ChebyshevPolynomial;
use hdgraph::{hexagram, planetlib, ChartBuilder, EphemerisFile, Loader};

fn load_ephemeris() -> Option<EphemerisFile> {
    let loader = Loader::new();
    if !loader.kernel_path().exists() {
        eprintln!("Skipping kernel benchmarks: {} not found", loader.kernel_path().display());
        return None;
    }
    loader.load_ephemeris().ok()
}

fn chebyshev_bench(c: &mut Criterion) {
    // de440s Moon records carry 13 coefficients per axis
    let coefficients: Vec<f64> = (0..13).map(|i| 1.0 / (i as f64 + 1.0)).collect();
    let poly = ChebyshevPolynomial::new(&coefficients);

    let mut group = c.benchmark_group("chebyshev");
    group.bench_function("evaluate", |b| b.iter(|| poly.evaluate(black_box(0.37))));
    group.bench_function("derivative", |b| b.iter(|| poly.derivative(black_box(0.37))));
    group.finish();
}

fn hexagram_bench(c: &mut Criterion) {
    c.bench_function("hexagram_map", |b| {
        b.iter(|| hexagram::map(black_box(123.456_789)).unwrap())
    });
}

fn kernel_bench(c: &mut Criterion) {
    let eph = match load_ephemeris() {
        Some(v) => v,
        None => return,
    };
    let ts = Loader::new().timescale();
    let birth = ts.ephemeris(-462_000_000).unwrap();

    let mut group = c.benchmark_group("kernel");
    group.sample_size(20);
    group.bench_function("state_from_ssb_moon", |b| {
        b.iter(|| eph.state_from_ssb(black_box(301), black_box(-462_000_000.0)).unwrap())
    });
    group.bench_function("positions", |b| {
        b.iter(|| planetlib::positions(&eph, black_box(-462_000_000)).unwrap())
    });
    group.bench_function("assemble", |b| {
        let builder = ChartBuilder::new(&eph, &ts);
        b.iter(|| builder.assemble(black_box(&birth)).unwrap())
    });
    group.finish();
}

criterion_group!(benches, chebyshev_bench, hexagram_bench, kernel_bench);
criterion_main!(benches);
