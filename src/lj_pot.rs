// file: `src/lj_pot.rs`
use nalgebra::Vector3;

use crate::lut::{lj_force, lj_potential, LookupTable};
use crate::run_md::ForceProvider;
use crate::system::SimBox;

/// Closed-form Lennard-Jones evaluator with periodic minimum imaging.
///
/// This is the validation path; the production loop uses
/// [`TabulatedLennardJones`]. Both truncate the interaction at the box
/// cutoff and visit every unordered pair exactly once.
#[derive(Debug, Clone)]
pub struct LennardJones {
    pub sim_box: SimBox,
}

impl LennardJones {
    pub fn new(sim_box: SimBox) -> Self {
        LennardJones { sim_box }
    }
}

impl ForceProvider for LennardJones {
    fn compute_forces(&self, positions: &[Vector3<f64>]) -> Vec<Vector3<f64>> {
        let n = positions.len();
        let mut forces = vec![Vector3::zeros(); n];
        let rc2 = self.sim_box.cutoff * self.sim_box.cutoff;

        for i in 0..n {
            for j in (i + 1)..n {
                let rij = self.sim_box.minimum_image(positions[i] - positions[j]);
                let r2 = rij.norm_squared();
                if r2 >= rc2 {
                    continue;
                }

                let r = r2.sqrt();
                let fij = rij * (lj_force(r) / r);
                forces[i] += fij;
                forces[j] -= fij;
            }
        }

        forces
    }

    fn potential_energy(&self, positions: &[Vector3<f64>]) -> f64 {
        let n = positions.len();
        let rc2 = self.sim_box.cutoff * self.sim_box.cutoff;
        let mut energy = 0.0;

        for i in 0..n {
            for j in (i + 1)..n {
                let rij = self.sim_box.minimum_image(positions[i] - positions[j]);
                let r2 = rij.norm_squared();
                if r2 >= rc2 {
                    continue;
                }
                energy += lj_potential(r2.sqrt());
            }
        }

        energy
    }

    fn virial(&self, positions: &[Vector3<f64>]) -> f64 {
        let n = positions.len();
        let rc2 = self.sim_box.cutoff * self.sim_box.cutoff;
        let mut virial = 0.0;

        for i in 0..n {
            for j in (i + 1)..n {
                let rij = self.sim_box.minimum_image(positions[i] - positions[j]);
                let r2 = rij.norm_squared();
                if r2 >= rc2 {
                    continue;
                }
                // r_ij . f_ij reduces to r F(r) for a central force
                let r = r2.sqrt();
                virial += r * lj_force(r);
            }
        }

        virial
    }
}

/// Lookup-table-backed Lennard-Jones evaluator, the hot path.
///
/// Distances inside the cutoff are mapped to the nearest table sample; the
/// table treats out-of-range indices as zero contribution, so the cutoff
/// check here only saves the square root and lookup.
#[derive(Debug, Clone)]
pub struct TabulatedLennardJones {
    pub sim_box: SimBox,
    pub table: LookupTable,
}

impl TabulatedLennardJones {
    pub fn new(sim_box: SimBox, resolution: f64) -> Self {
        let table = LookupTable::new(sim_box.cutoff, resolution);
        TabulatedLennardJones { sim_box, table }
    }
}

impl ForceProvider for TabulatedLennardJones {
    fn compute_forces(&self, positions: &[Vector3<f64>]) -> Vec<Vector3<f64>> {
        let n = positions.len();
        let mut forces = vec![Vector3::zeros(); n];
        let rc2 = self.sim_box.cutoff * self.sim_box.cutoff;

        for i in 0..n {
            for j in (i + 1)..n {
                let rij = self.sim_box.minimum_image(positions[i] - positions[j]);
                let r2 = rij.norm_squared();
                if r2 >= rc2 {
                    continue;
                }

                let r = r2.sqrt();
                let fij = rij * (self.table.force_at(r) / r);
                forces[i] += fij;
                forces[j] -= fij;
            }
        }

        forces
    }

    fn potential_energy(&self, positions: &[Vector3<f64>]) -> f64 {
        let n = positions.len();
        let rc2 = self.sim_box.cutoff * self.sim_box.cutoff;
        let mut energy = 0.0;

        for i in 0..n {
            for j in (i + 1)..n {
                let rij = self.sim_box.minimum_image(positions[i] - positions[j]);
                let r2 = rij.norm_squared();
                if r2 >= rc2 {
                    continue;
                }
                energy += self.table.potential_at(r2.sqrt());
            }
        }

        energy
    }

    fn virial(&self, positions: &[Vector3<f64>]) -> f64 {
        let n = positions.len();
        let rc2 = self.sim_box.cutoff * self.sim_box.cutoff;
        let mut virial = 0.0;

        for i in 0..n {
            for j in (i + 1)..n {
                let rij = self.sim_box.minimum_image(positions[i] - positions[j]);
                let r2 = rij.norm_squared();
                if r2 >= rc2 {
                    continue;
                }
                let r = r2.sqrt();
                virial += r * self.table.force_at(r);
            }
        }

        virial
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn open_box(length: f64) -> SimBox {
        SimBox {
            length,
            cutoff: 0.5 * length,
        }
    }

    #[test]
    fn test_newton_third_law() {
        let lj = LennardJones::new(open_box(10.0));
        let positions = vec![
            Vector3::new(2.0, 2.0, 2.0),
            Vector3::new(3.1, 2.0, 2.0),
            Vector3::new(2.0, 3.4, 2.6),
        ];
        let forces = lj.compute_forces(&positions);
        let total: Vector3<f64> = forces.iter().sum();
        assert!(total.norm() < 1e-12);
    }

    #[test]
    fn test_minimum_image_force() {
        let sim_box = open_box(10.0);
        let lj = LennardJones::new(sim_box);

        // Pair straddling opposite faces, true separation 1.1 across the
        // boundary
        let wrapped = vec![Vector3::new(0.3, 5.0, 5.0), Vector3::new(9.2, 5.0, 5.0)];
        // Same geometry without wrapping
        let near = vec![Vector3::new(5.0, 5.0, 5.0), Vector3::new(3.9, 5.0, 5.0)];

        let f_wrapped = lj.compute_forces(&wrapped);
        let f_near = lj.compute_forces(&near);
        assert_relative_eq!(f_wrapped[0].x, f_near[0].x, epsilon = 1e-10);
        assert_relative_eq!(f_wrapped[0].norm(), f_near[0].norm(), epsilon = 1e-10);
    }

    #[test]
    fn test_cutoff_truncation() {
        let sim_box = open_box(10.0); // rc = 5
        let lj = LennardJones::new(sim_box);

        // Exactly at the cutoff: zero
        let at_rc = vec![Vector3::new(1.0, 1.0, 1.0), Vector3::new(6.0, 1.0, 1.0)];
        let f = lj.compute_forces(&at_rc);
        assert_eq!(f[0], Vector3::zeros());
        assert_eq!(lj.potential_energy(&at_rc), 0.0);

        // Just inside: nonzero and attractive
        let inside = vec![Vector3::new(1.0, 1.0, 1.0), Vector3::new(5.99, 1.0, 1.0)];
        let f = lj.compute_forces(&inside);
        assert!(f[0].x > 0.0, "force should pull the pair together");
    }

    #[test]
    fn test_table_matches_closed_form_inside_cutoff() {
        let sim_box = open_box(10.0);
        let exact = LennardJones::new(sim_box);
        let tabulated = TabulatedLennardJones::new(sim_box, 100_000.0);

        let positions = vec![
            Vector3::new(1.0, 1.0, 1.0),
            Vector3::new(2.13, 1.4, 1.0),
            Vector3::new(1.0, 2.71, 2.2),
        ];
        let f_exact = exact.compute_forces(&positions);
        let f_table = tabulated.compute_forces(&positions);
        for (a, b) in f_exact.iter().zip(&f_table) {
            assert!((a - b).norm() < 1e-2);
        }
        assert!(
            (exact.potential_energy(&positions) - tabulated.potential_energy(&positions)).abs()
                < 1e-2
        );
    }

    #[test]
    fn test_virial_two_body() {
        let sim_box = open_box(10.0);
        let lj = LennardJones::new(sim_box);

        // Repulsive separation: positive virial, r F(r)
        let r = 1.05;
        let positions = vec![Vector3::new(2.0, 2.0, 2.0), Vector3::new(2.0 + r, 2.0, 2.0)];
        assert_relative_eq!(lj.virial(&positions), r * lj_force(r), epsilon = 1e-12);
        assert!(lj.virial(&positions) > 0.0);

        // Attractive separation: negative virial
        let r = 1.5;
        let positions = vec![Vector3::new(2.0, 2.0, 2.0), Vector3::new(2.0 + r, 2.0, 2.0)];
        assert!(lj.virial(&positions) < 0.0);

        // Beyond the cutoff: zero
        let positions = vec![Vector3::new(1.0, 1.0, 1.0), Vector3::new(7.0, 1.0, 1.0)];
        assert_eq!(lj.virial(&positions), 0.0);
    }

    #[test]
    fn test_tabulated_virial_matches_closed_form() {
        let sim_box = open_box(10.0);
        let exact = LennardJones::new(sim_box);
        let tabulated = TabulatedLennardJones::new(sim_box, 100_000.0);
        let positions = vec![
            Vector3::new(1.0, 1.0, 1.0),
            Vector3::new(2.2, 1.0, 1.0),
            Vector3::new(1.0, 2.4, 1.8),
        ];
        assert!((exact.virial(&positions) - tabulated.virial(&positions)).abs() < 1e-2);
    }

    #[test]
    fn test_tabulated_force_just_inside_cutoff() {
        let sim_box = open_box(10.0); // rc = 5
        let tabulated = TabulatedLennardJones::new(sim_box, 10_000.0);
        let r = 4.999;
        let positions = vec![
            Vector3::new(1.0, 1.0, 1.0),
            Vector3::new(1.0 + r, 1.0, 1.0),
        ];
        let f = tabulated.compute_forces(&positions);
        assert!(f[0].norm() > 0.0);
        // rij points from particle 1 to particle 0, so the x component
        // carries the negated magnitude
        assert_relative_eq!(f[0].x, -lj_force(r), epsilon = 1e-6);
    }
}
