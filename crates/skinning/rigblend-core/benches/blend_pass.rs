use criterion::{black_box, criterion_group, criterion_main, Criterion};

use rigblend_core::{
    blend_weights, compute_extreme_pair, BlendFalloff, BlendSpace, Config, VertexId, VertexSample,
    WeightBuffer,
};

const VERTS: usize = 512;
const INFLUENCES: usize = 4;

fn build_set() -> (Vec<VertexSample>, WeightBuffer) {
    let mut set = Vec::with_capacity(VERTS);
    let mut flat = Vec::with_capacity(VERTS * INFLUENCES);
    for i in 0..VERTS {
        let t = i as f64 / (VERTS - 1) as f64;
        set.push(VertexSample {
            id: VertexId(i as u32),
            position: [t * 10.0, (t * 6.0).sin(), (t * 3.0).cos()],
            uv: [t, 0.5],
        });
        // Any normalized row works; spread mass around the influence ring.
        for j in 0..INFLUENCES {
            flat.push(if j == i % INFLUENCES { 0.7 } else { 0.1 });
        }
    }
    let weights = WeightBuffer::from_flat(flat, INFLUENCES, VERTS).unwrap();
    (set, weights)
}

fn bench_blend_pass(c: &mut Criterion) {
    let (set, weights) = build_set();
    let cfg = Config::default();
    let pair = compute_extreme_pair(&set, BlendSpace::Object).unwrap();

    c.bench_function("extreme_pair_512", |b| {
        b.iter(|| compute_extreme_pair(black_box(&set), BlendSpace::Object))
    });
    c.bench_function("blend_512x4_linear", |b| {
        b.iter(|| {
            blend_weights(
                black_box(&set),
                black_box(&weights),
                &pair,
                BlendFalloff::Linear,
                BlendSpace::Object,
                &cfg,
            )
        })
    });
    c.bench_function("blend_512x4_quadratic", |b| {
        b.iter(|| {
            blend_weights(
                black_box(&set),
                black_box(&weights),
                &pair,
                BlendFalloff::Quadratic,
                BlendSpace::Object,
                &cfg,
            )
        })
    });
}

criterion_group!(benches, bench_blend_pass);
criterion_main!(benches);
