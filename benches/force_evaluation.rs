use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rs_force_layout::particles::{clear_accumulators, initialize_particles, Force, LennardJones, Particle, QuadTree, Simulation};
use rs_force_layout::utils::Lcg;


fn scattered_particles(count: usize) -> Vec<Particle> {
    let mut rng = StdRng::seed_from_u64(42);
    let side = (count as f64).sqrt() * 1.2;
    let mut particles: Vec<Particle> = (0..count)
        .map(|_| Particle::new(rng.random_range(0.0..side), rng.random_range(0.0..side)))
        .collect();
    initialize_particles(&mut particles).expect("Failed to initialize particles");
    particles
}

pub fn bench_quadtree_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_build");
    group.measurement_time(std::time::Duration::from_secs(5));
    group.sample_size(100);

    for count in [100, 1_000, 10_000] {
        let particles = scattered_particles(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &particles, |b, particles| b.iter(|| {
            QuadTree::build(particles.as_slice(), |p: &Particle| p.x, |p: &Particle| p.y)
        }));
    }
}

pub fn bench_lennard_jones(c: &mut Criterion) {
    let mut group = c.benchmark_group("lennard_jones");
    group.measurement_time(std::time::Duration::from_secs(5));
    group.sample_size(50);

    for count in [100, 1_000, 5_000] {
        let mut particles = scattered_particles(count);
        let mut random = Lcg::default();

        let mut barnes_hut = LennardJones::new();
        barnes_hut.initialize(&particles);
        group.bench_function(BenchmarkId::new("theta_0.25", count), |b| b.iter(|| {
            clear_accumulators(&mut particles);
            barnes_hut.apply(&mut particles, 1.0, &mut random);
        }));

        if count <= 1_000 {
            // Opening every node gives the exact pairwise sum.
            let mut exact = LennardJones::new();
            exact.set_theta(0.0).expect("valid theta");
            exact.initialize(&particles);
            group.bench_function(BenchmarkId::new("theta_0", count), |b| b.iter(|| {
                clear_accumulators(&mut particles);
                exact.apply(&mut particles, 1.0, &mut random);
            }));
        }
    }
}

pub fn bench_simulation_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulation_tick");
    group.measurement_time(std::time::Duration::from_secs(5));
    group.sample_size(50);

    for count in [100, 1_000] {
        let mut sim = Simulation::new(scattered_particles(count)).expect("Failed to create simulation");
        sim.add_force("lj", LennardJones::new());
        group.bench_function(BenchmarkId::from_parameter(count), |b| b.iter(|| sim.tick(1)));
    }
}

criterion_group!(benches, bench_quadtree_build, bench_lennard_jones, bench_simulation_tick);
criterion_main!(benches);
