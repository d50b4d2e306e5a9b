use criterion::{black_box, criterion_group, criterion_main, Criterion};
use swmb_core::{LabelScheme, ParamValue, ParameterSet};
use swmb_exp::{cross_product, expand, render_case_file, GridParameter};

fn build_params() -> ParameterSet {
    let zipped = ParameterSet::new()
        .scalar("tmax", "300")
        .scalar("rho", 2700_i64)
        .sequence("delta1", (0..32).map(|i| 10.0 + i as f64 * 0.5));
    let grid = vec![GridParameter {
        name: "ksi".to_string(),
        values: (0..16).map(|i| ParamValue::Float(100.0 + i as f64 * 50.0)).collect(),
    }];
    cross_product(&zipped, &grid).expect("grid")
}

fn bench_expand(c: &mut Criterion) {
    let params = build_params();
    let scheme = LabelScheme::default();
    c.bench_function("expand_512_runs", |b| {
        b.iter(|| {
            let records = expand(black_box(&params), &scheme, "voellmy").expect("expand");
            black_box(records.len());
        })
    });
    let records = expand(&params, &scheme, "voellmy").expect("expand");
    c.bench_function("render_case_files", |b| {
        b.iter(|| {
            for record in &records {
                black_box(render_case_file(&record.case_parameters()));
            }
        })
    });
}

criterion_group!(benches, bench_expand);
criterion_main!(benches);
