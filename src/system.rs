// file: `src/system.rs`
use nalgebra::Vector3;
use rand::rngs::StdRng;
use rand_distr::{Distribution, StandardNormal};

/// Cubic periodic simulation box.
///
/// The edge length follows from the particle count and number density,
/// `L = (N/rho)^(1/3)`. The interaction cutoff is fixed at `L/2`, the
/// largest value for which the minimum-image convention is unambiguous.
#[derive(Debug, Clone, Copy)]
pub struct SimBox {
    pub length: f64,
    pub cutoff: f64,
}

impl SimBox {
    pub fn from_density(n: usize, rho: f64) -> Self {
        let length = (n as f64 / rho).cbrt();
        SimBox {
            length,
            cutoff: 0.5 * length,
        }
    }

    /// Apply minimum-image convention
    pub fn minimum_image(&self, mut d: Vector3<f64>) -> Vector3<f64> {
        for k in 0..3 {
            d[k] -= self.length * (d[k] / self.length).round();
        }
        d
    }

    /// Map every coordinate back into `[0, L)`.
    ///
    /// A true modulo, so it stays correct even for displacements larger
    /// than one box length.
    pub fn wrap(&self, p: &mut Vector3<f64>) {
        for k in 0..3 {
            p[k] -= self.length * (p[k] / self.length).floor();
        }
    }
}

/// Positions and velocities of N identical unit-mass particles.
///
/// The two sequences are parallel and index identity is stable for the
/// whole run. `lattice_cells` records the cell count per box edge used at
/// initialization; the order parameter is defined relative to it.
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    pub positions: Vec<Vector3<f64>>,
    pub velocities: Vec<Vector3<f64>>,
    pub lattice_cells: usize,
}

impl ParticleSystem {
    /// Place `n` particles on a simple cubic lattice spanning the box.
    ///
    /// The lattice has the smallest `side` with `side^3 >= n`; sites sit at
    /// `(i + 1/2) * L/side` per axis so no particle touches a box face and
    /// no two particles overlap. Velocities start at zero.
    pub fn on_lattice(n: usize, sim_box: &SimBox) -> Self {
        let mut side = (n as f64).cbrt() as usize;
        if side * side * side < n {
            side += 1;
        }
        let spacing = sim_box.length / side as f64;

        let mut positions = Vec::with_capacity(n);
        'fill: for i in 0..side {
            for j in 0..side {
                for k in 0..side {
                    if positions.len() == n {
                        break 'fill;
                    }
                    positions.push(Vector3::new(
                        (i as f64 + 0.5) * spacing,
                        (j as f64 + 0.5) * spacing,
                        (k as f64 + 0.5) * spacing,
                    ));
                }
            }
        }

        ParticleSystem {
            positions,
            velocities: vec![Vector3::zeros(); n],
            lattice_cells: side,
        }
    }

    /// Draw Maxwell-Boltzmann velocities at `temperature`.
    ///
    /// Components are sampled from a normal distribution with variance T,
    /// the center-of-mass velocity is removed, and the result is rescaled
    /// so the instantaneous temperature (3N - 3 degrees of freedom) matches
    /// the target exactly.
    pub fn thermalize(&mut self, temperature: f64, rng: &mut StdRng) {
        let n = self.positions.len();
        let normal = StandardNormal;

        for v in &mut self.velocities {
            *v = Vector3::new(
                normal.sample(rng),
                normal.sample(rng),
                normal.sample(rng),
            ) * temperature.sqrt();
        }

        // Remove center-of-mass motion
        let v_cm: Vector3<f64> = self.velocities.iter().sum::<Vector3<f64>>() / n as f64;
        for v in &mut self.velocities {
            *v -= v_cm;
        }

        // Rescale to the exact target temperature
        if n > 1 {
            self.rescale_to(temperature);
        }
    }

    /// Rescale all velocities so the instantaneous temperature equals
    /// `temperature`. A no-op for a system at rest.
    pub fn rescale_to(&mut self, temperature: f64) {
        let current = crate::diagnostics::temperature(&self.velocities);
        if current > 0.0 {
            let scale = (temperature / current).sqrt();
            for v in &mut self.velocities {
                *v *= scale;
            }
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
