// file: `src/run_md.rs`
use itertools::izip;
use nalgebra::Vector3;

use crate::system::{ParticleSystem, SimBox};

pub trait ForceProvider {
    fn compute_forces(&self, positions: &[Vector3<f64>]) -> Vec<Vector3<f64>>;

    /// Pairwise potential energy of the configuration, with the same
    /// cutoff and imaging rules as the forces.
    fn potential_energy(&self, positions: &[Vector3<f64>]) -> f64;

    /// Pair virial `sum_ij r_ij . f_ij`, the interaction term of the
    /// pressure equation of state.
    fn virial(&self, positions: &[Vector3<f64>]) -> f64;
}

pub trait Integrator {
    /// Advance the system by dt
    fn step(&mut self, dt: f64);

    /// Compute the instantaneous temperature
    fn temperature(&self) -> f64;
}

/// Velocity-Verlet integrator for unit-mass particles in a periodic box.
///
/// Each step is half-kick, drift, force recompute, half-kick, then a wrap
/// of every coordinate back into `[0, L)`. The only state carried between
/// steps is the particle system itself plus the current forces, so the
/// scheme is self-starting.
pub struct VelocityVerlet<F: ForceProvider> {
    pub system: ParticleSystem,
    pub forces: Vec<Vector3<f64>>,
    pub(crate) provider: F,
    sim_box: SimBox,
    dof: usize,
}

impl<F: ForceProvider> VelocityVerlet<F> {
    pub fn new(system: ParticleSystem, sim_box: SimBox, provider: F) -> Self {
        let forces = provider.compute_forces(&system.positions);
        // Three degrees of freedom are frozen by the zero-momentum
        // constraint
        let dof = 3 * system.len().saturating_sub(1);
        VelocityVerlet {
            system,
            forces,
            provider,
            sim_box,
            dof,
        }
    }

    #[inline]
    pub fn kinetic_energy(&self) -> f64 {
        crate::diagnostics::kinetic_energy(&self.system.velocities)
    }

    /// Kinetic plus pairwise potential energy; conserved by a correct
    /// velocity-Verlet run at sufficiently small dt.
    pub fn total_energy(&self) -> f64 {
        self.kinetic_energy() + self.provider.potential_energy(&self.system.positions)
    }

    pub fn sim_box(&self) -> &SimBox {
        &self.sim_box
    }

    pub fn provider(&self) -> &F {
        &self.provider
    }
}

impl<F: ForceProvider> Integrator for VelocityVerlet<F> {
    fn step(&mut self, dt: f64) {
        let half_dt = 0.5 * dt;

        // Half-kick and drift
        for (pos, v, &f) in izip!(
            &mut self.system.positions,
            &mut self.system.velocities,
            &self.forces
        ) {
            *v += f * half_dt;
            *pos += *v * dt;
        }

        // Forces at the new positions
        self.forces = self.provider.compute_forces(&self.system.positions);

        // Second half-kick
        for (v, &f) in izip!(&mut self.system.velocities, &self.forces) {
            *v += f * half_dt;
        }

        // Re-enter the box
        for pos in &mut self.system.positions {
            self.sim_box.wrap(pos);
        }
    }

    fn temperature(&self) -> f64 {
        if self.dof == 0 {
            return 0.0;
        }
        2.0 * self.kinetic_energy() / self.dof as f64
    }
}
