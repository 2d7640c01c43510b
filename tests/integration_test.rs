//! End-to-end simulation tests: stability of the reference two-particle
//! run, energy conservation of the velocity-Verlet integrator, and
//! reproducibility under a fixed seed.

use nalgebra::Vector3;
use rand::rngs::StdRng;
use rand::SeedableRng;

use ljfluid::run_md::Integrator;
use ljfluid::{
    diagnostics, DiagnosticWriter, LennardJones, ParticleSystem, RunConfig, SimBox,
    TabulatedLennardJones, VelocityVerlet,
};

/// Shortest pairwise distance under minimum imaging.
fn min_separation(positions: &[Vector3<f64>], sim_box: &SimBox) -> f64 {
    let mut shortest = f64::INFINITY;
    for i in 0..positions.len() {
        for j in (i + 1)..positions.len() {
            let d = sim_box.minimum_image(positions[i] - positions[j]).norm();
            shortest = shortest.min(d);
        }
    }
    shortest
}

#[test]
fn test_two_particle_reference_run_stays_stable() {
    // N = 2, rho = 0.8442, h = 0.001, niter = 100, T = 0.728
    let config = RunConfig::two_particle();
    let sim_box = SimBox::from_density(config.n, config.rho);
    let mut system = ParticleSystem::on_lattice(config.n, &sim_box);
    let mut rng = StdRng::seed_from_u64(2024);
    system.thermalize(config.temperature, &mut rng);
    let cells = system.lattice_cells;

    let provider = TabulatedLennardJones::new(sim_box, config.lut_resolution);
    let mut integrator = VelocityVerlet::new(system, sim_box, provider);

    for _ in 0..config.n_steps {
        integrator.step(config.time_step);

        let lambda = diagnostics::order_parameter(
            &integrator.system.positions,
            sim_box.length,
            cells,
        );
        assert!(lambda.is_finite());
        assert!((-1.0..=1.0).contains(&lambda));
        assert!(integrator.temperature().is_finite());

        for p in &integrator.system.positions {
            for k in 0..3 {
                assert!(p[k] >= 0.0 && p[k] < sim_box.length);
            }
        }
        assert!(
            min_separation(&integrator.system.positions, &sim_box) > 0.05,
            "particles collapsed onto each other"
        );
    }
}

#[test]
fn test_energy_conservation_without_cutoff_crossings() {
    // Eight particles on a small cube deep inside a large box, so no pair
    // ever crosses the truncation radius and total energy is smooth
    let sim_box = SimBox {
        length: 20.0,
        cutoff: 10.0,
    };
    let spacing = 1.5;
    let mut positions = Vec::new();
    for i in 0..2 {
        for j in 0..2 {
            for k in 0..2 {
                positions.push(Vector3::new(
                    9.0 + i as f64 * spacing,
                    9.0 + j as f64 * spacing,
                    9.0 + k as f64 * spacing,
                ));
            }
        }
    }
    let mut system = ParticleSystem {
        positions,
        velocities: vec![Vector3::zeros(); 8],
        lattice_cells: 2,
    };
    let mut rng = StdRng::seed_from_u64(99);
    system.thermalize(0.5, &mut rng);

    let mut integrator = VelocityVerlet::new(system, sim_box, LennardJones::new(sim_box));
    let kinetic0 = integrator.kinetic_energy();
    let e0 = integrator.total_energy();

    for _ in 0..500 {
        integrator.step(0.001);
    }

    let drift = (integrator.total_energy() - e0).abs();
    let scale = kinetic0 + (e0 - kinetic0).abs();
    assert!(
        drift < 0.01 * scale,
        "energy drifted by {} (scale {})",
        drift,
        scale
    );
}

#[test]
fn test_bulk_run_preserves_invariants() {
    let mut config = RunConfig::bulk_512();
    config.n = 27;
    config.n_steps = 50;
    config.seed = Some(7);

    let mut sink = DiagnosticWriter::new(Vec::new());
    let outcome = ljfluid::run(&config, &mut sink).unwrap();

    assert_eq!(outcome.lambda.len(), 50);
    for (l, t) in outcome.lambda.iter().zip(&outcome.temperature) {
        assert!(l.is_finite() && (-1.0..=1.0).contains(l));
        assert!(t.is_finite() && *t >= 0.0);
    }

    let sim_box = SimBox::from_density(config.n, config.rho);
    for p in &outcome.system.positions {
        for k in 0..3 {
            assert!(p[k] >= 0.0 && p[k] < sim_box.length);
        }
    }
}

#[test]
fn test_identical_seeds_give_identical_series() {
    let mut config = RunConfig::bulk_512();
    config.n = 27;
    config.n_steps = 20;
    config.seed = Some(31415);

    let mut sink_a = DiagnosticWriter::new(Vec::new());
    let a = ljfluid::run(&config, &mut sink_a).unwrap();
    let mut sink_b = DiagnosticWriter::new(Vec::new());
    let b = ljfluid::run(&config, &mut sink_b).unwrap();

    // Bit-identical, not merely close
    assert_eq!(a.lambda, b.lambda);
    assert_eq!(a.temperature, b.temperature);
    assert_eq!(a.system.positions, b.system.positions);
    assert_eq!(a.system.velocities, b.system.velocities);
}

#[test]
fn test_exact_and_tabulated_paths_agree() {
    // A bound pair well inside the cutoff, where table quantization is the
    // only difference between the two force paths. Near the truncation
    // radius the force gradient is steep enough that quantization noise
    // separates the trajectories, so the comparison is made away from it.
    let sim_box = SimBox {
        length: 20.0,
        cutoff: 10.0,
    };
    let make_system = || ParticleSystem {
        positions: vec![
            Vector3::new(9.45, 10.0, 10.0),
            Vector3::new(10.55, 10.0, 10.0),
        ],
        velocities: vec![
            Vector3::new(0.0, 0.1, 0.0),
            Vector3::new(0.0, -0.1, 0.0),
        ],
        lattice_cells: 1,
    };

    let mut exact = VelocityVerlet::new(make_system(), sim_box, LennardJones::new(sim_box));
    let mut tabulated = VelocityVerlet::new(
        make_system(),
        sim_box,
        TabulatedLennardJones::new(sim_box, 1_000_000.0),
    );

    for _ in 0..100 {
        exact.step(0.001);
        tabulated.step(0.001);
    }

    for (a, b) in exact
        .system
        .positions
        .iter()
        .zip(&tabulated.system.positions)
    {
        assert!(
            (a - b).norm() < 1e-3,
            "trajectories diverged: {:?} vs {:?}",
            a,
            b
        );
    }
}
