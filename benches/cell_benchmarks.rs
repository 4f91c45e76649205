use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use unl_core::cell::{self, Direction};
use unl_core::polyhash::{compress, decompress, deflate};
use unl_core::{Cluster, GeoGeometry};

fn benchmark_cell_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("cell_codec");

    for precision in [5, 9, 12, 16] {
        group.bench_with_input(
            BenchmarkId::new("encode", precision),
            &precision,
            |b, &precision| {
                b.iter(|| cell::encode(black_box(57.648), black_box(10.41), precision).unwrap())
            },
        );
    }

    group.bench_function("decode", |b| {
        b.iter(|| cell::decode(black_box("u4pruydqqvj8@3")).unwrap())
    });

    group.bench_function("encode_auto", |b| {
        b.iter(|| cell::encode_auto(black_box(57.648), black_box(10.41)).unwrap())
    });

    group.bench_function("adjacent", |b| {
        b.iter(|| cell::adjacent(black_box("ezzzzzzz"), Direction::North).unwrap())
    });

    group.bench_function("neighbours", |b| {
        b.iter(|| cell::neighbours(black_box("u4pruydq")).unwrap())
    });

    group.finish();
}

fn benchmark_cluster(c: &mut Criterion) {
    let mut group = c.benchmark_group("cluster");
    group.sample_size(20);

    let ring = vec![
        [-72.2794631, 42.9252986],
        [-72.2794363, 42.9251827],
        [-72.2790635, 42.9252043],
        [-72.2789964, 42.9248076],
        [-72.2788462, 42.9248272],
        [-72.2788945, 42.9251297],
        [-72.2784975, 42.9251572],
        [-72.2785324, 42.9252691],
        [-72.2788891, 42.9252416],
        [-72.278924, 42.9253595],
        [-72.2790098, 42.9253575],
        [-72.2790071, 42.9253261],
    ];

    for precision in [8, 10, 12] {
        group.bench_with_input(
            BenchmarkId::new("planar", precision),
            &precision,
            |b, &precision| {
                let cluster = Cluster::new();
                b.iter(|| cluster.cluster_cells(black_box(ring.clone()), precision).unwrap())
            },
        );
        group.bench_with_input(
            BenchmarkId::new("geo", precision),
            &precision,
            |b, &precision| {
                let cluster = Cluster::new().with_backend(GeoGeometry);
                b.iter(|| cluster.cluster_cells(black_box(ring.clone()), precision).unwrap())
            },
        );
    }

    group.finish();
}

fn benchmark_polyhash(c: &mut Criterion) {
    let mut group = c.benchmark_group("polyhash");

    let area = vec![[-10.0, 35.0], [30.0, 35.0], [30.0, 60.0], [-10.0, 60.0]];
    let cells = Cluster::new().cluster_cells(area, 5).unwrap();
    let blocks = deflate(&cells);
    let compressed = compress(&blocks).unwrap();

    group.bench_function("deflate", |b| b.iter(|| deflate(black_box(&cells))));
    group.bench_function("compress", |b| {
        b.iter(|| compress(black_box(&blocks)).unwrap())
    });
    group.bench_function("decompress", |b| {
        b.iter(|| decompress(black_box(&compressed)).unwrap())
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_cell_codec,
    benchmark_cluster,
    benchmark_polyhash
);
criterion_main!(benches);
