// file: `src/lut.rs`

/// Lennard-Jones potential in reduced units (epsilon = sigma = 1),
/// `V(r) = 4 (r^-12 - r^-6)`.
pub fn lj_potential(r: f64) -> f64 {
    let inv_r2 = 1.0 / (r * r);
    let inv_r6 = inv_r2 * inv_r2 * inv_r2;
    4.0 * (inv_r6 * inv_r6 - inv_r6)
}

/// Magnitude of the Lennard-Jones force, `F(r) = -dV/dr`.
///
/// Positive for r below the potential minimum (repulsion), negative
/// beyond it (attraction).
pub fn lj_force(r: f64) -> f64 {
    let inv_r2 = 1.0 / (r * r);
    let inv_r6 = inv_r2 * inv_r2 * inv_r2;
    24.0 / r * (2.0 * inv_r6 * inv_r6 - inv_r6)
}

/// Tabulated Lennard-Jones potential and force magnitude.
///
/// Index `i` corresponds to the true distance `r = i / resolution`; the
/// table holds `floor(resolution * cutoff)` samples and is built once per
/// run, before the first integration step. Lookups take the nearest sample
/// below `r` (no interpolation), so the quantization error shrinks linearly
/// as the resolution grows.
#[derive(Debug, Clone)]
pub struct LookupTable {
    potential: Vec<f64>,
    force: Vec<f64>,
    pub resolution: f64,
    pub cutoff: f64,
}

impl LookupTable {
    pub fn new(cutoff: f64, resolution: f64) -> Self {
        let len = (resolution * cutoff).floor() as usize;
        let mut potential = Vec::with_capacity(len);
        let mut force = Vec::with_capacity(len);

        if len > 0 {
            // Index 0 is r = 0; the interaction diverges there and no
            // physical configuration ever queries it.
            potential.push(f64::INFINITY);
            force.push(f64::INFINITY);
        }
        for i in 1..len {
            let r = i as f64 / resolution;
            potential.push(lj_potential(r));
            force.push(lj_force(r));
        }

        LookupTable {
            potential,
            force,
            resolution,
            cutoff,
        }
    }

    pub fn len(&self) -> usize {
        self.force.len()
    }

    pub fn is_empty(&self) -> bool {
        self.force.is_empty()
    }

    fn index(&self, r: f64) -> Option<usize> {
        let i = (r * self.resolution) as usize;
        if i < self.force.len() {
            Some(i)
        } else {
            // Past the last sample means past the cutoff
            None
        }
    }

    /// Force magnitude at distance `r`, zero beyond the tabulated range.
    pub fn force_at(&self, r: f64) -> f64 {
        self.index(r).map_or(0.0, |i| self.force[i])
    }

    /// Potential energy at distance `r`, zero beyond the tabulated range.
    pub fn potential_at(&self, r: f64) -> f64 {
        self.index(r).map_or(0.0, |i| self.potential[i])
    }
}
