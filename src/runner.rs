// file: `src/runner.rs`
use std::io::Write;

use color_eyre::eyre::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::config::RunConfig;
use crate::diagnostics;
use crate::lj_pot::{LennardJones, TabulatedLennardJones};
use crate::output::DiagnosticWriter;
use crate::run_md::{ForceProvider, Integrator, VelocityVerlet};
use crate::system::{ParticleSystem, SimBox};

/// Scalar series collected over a completed run.
pub struct RunOutcome {
    /// Order parameter, one entry per step
    pub lambda: Vec<f64>,
    /// Instantaneous temperature, one entry per step
    pub temperature: Vec<f64>,
    /// Final particle state
    pub system: ParticleSystem,
}

/// Execute a full simulation run, streaming diagnostics into `sink`.
///
/// Validates the configuration, builds the box, lattice and lookup table,
/// then integrates `n_steps` velocity-Verlet steps. Runs to completion or
/// fails before the first step; there is no partial-result recovery.
pub fn run<W: Write>(config: &RunConfig, sink: &mut DiagnosticWriter<W>) -> Result<RunOutcome> {
    config.validate()?;

    let sim_box = SimBox::from_density(config.n, config.rho);
    info!(
        "box edge {:.4}, cutoff {:.4}, {} particles at rho = {}",
        sim_box.length, sim_box.cutoff, config.n, config.rho
    );

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut system = ParticleSystem::on_lattice(config.n, &sim_box);
    system.thermalize(config.temperature, &mut rng);

    if config.exact_forces {
        let provider = LennardJones::new(sim_box);
        integrate(config, sim_box, system, provider, sink)
    } else {
        let provider = TabulatedLennardJones::new(sim_box, config.lut_resolution);
        info!("lookup table with {} samples", provider.table.len());
        integrate(config, sim_box, system, provider, sink)
    }
}

fn integrate<F: ForceProvider, W: Write>(
    config: &RunConfig,
    sim_box: SimBox,
    system: ParticleSystem,
    provider: F,
    sink: &mut DiagnosticWriter<W>,
) -> Result<RunOutcome> {
    let cells = system.lattice_cells;
    let mut integrator = VelocityVerlet::new(system, sim_box, provider);
    let mut lambda = Vec::with_capacity(config.n_steps);
    let mut temperature = Vec::with_capacity(config.n_steps);

    for step in 0..config.n_steps {
        integrator.step(config.time_step);

        let l = diagnostics::order_parameter(
            &integrator.system.positions,
            sim_box.length,
            cells,
        );
        let t = integrator.temperature();
        lambda.push(l);
        temperature.push(t);
        sink.record(step, l, t)?;

        if let Some(interval) = config.snapshot_interval {
            if (step + 1) % interval == 0 {
                sink.snapshot(&integrator.system.positions)?;
            }
        }
    }

    sink.finish()?;
    let virial = integrator.provider().virial(&integrator.system.positions);
    let pressure =
        diagnostics::pressure(virial, config.n, config.rho, integrator.temperature());
    info!(
        "completed {} steps, final temperature {:.4}, virial pressure {:.4}",
        config.n_steps,
        integrator.temperature(),
        pressure
    );

    Ok(RunOutcome {
        lambda,
        temperature,
        system: integrator.system,
    })
}
