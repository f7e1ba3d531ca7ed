use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use hypercut_core::{Hypergraph, RandomWalkConfig, SpectralConfig};
use hypercut_spectral::{Incidence, min_cut, stationary_distribution, transition_matrix};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Ring of pairwise hyperedges plus random 3-node hyperedges.
fn ring_hypergraph(n: usize, seed: u64) -> Hypergraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut g = Hypergraph::new();
    for i in 0..n {
        g.add_hyperedge([format!("v{i}"), format!("v{}", (i + 1) % n)], 1.0)
            .expect("valid weight");
    }
    for _ in 0..n / 2 {
        let members: Vec<String> = (0..3).map(|_| format!("v{}", rng.gen_range(0..n))).collect();
        g.add_hyperedge(members, rng.gen_range(0.5..2.0))
            .expect("valid weight");
    }
    g
}

fn bench_min_cut(c: &mut Criterion) {
    let mut group = c.benchmark_group("min_cut");
    let config = SpectralConfig::default();
    for n in [16, 64, 128] {
        let g = ring_hypergraph(n, 42);
        group.bench_with_input(BenchmarkId::from_parameter(n), &g, |b, g| {
            b.iter(|| {
                let inc = Incidence::build(black_box(g));
                min_cut(&inc, &config).expect("connected ring")
            });
        });
    }
    group.finish();
}

fn bench_stationary(c: &mut Criterion) {
    let mut group = c.benchmark_group("stationary_distribution");
    let config = RandomWalkConfig::default();
    for n in [16, 64] {
        let g = ring_hypergraph(n, 7);
        let p = transition_matrix(&Incidence::build(&g)).expect("connected ring");
        group.bench_with_input(BenchmarkId::from_parameter(n), &p, |b, p| {
            let mut rng = StdRng::seed_from_u64(1);
            b.iter(|| stationary_distribution(black_box(p), &mut rng, &config).expect("converges"));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_min_cut, bench_stationary);
criterion_main!(benches);
