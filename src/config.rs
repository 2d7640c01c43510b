// file: `src/config.rs`
use std::fs;
use std::path::Path;

use color_eyre::eyre::{bail, Result, WrapErr};
use serde::{Deserialize, Serialize};

/// Configuration for one molecular dynamics run.
///
/// All quantities are in reduced Lennard-Jones units (epsilon = sigma =
/// mass = k_B = 1). The box edge and cutoff are derived, not configured:
/// `L = (n/rho)^(1/3)` and `rc = L/2`.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RunConfig {
    /// Number of particles
    pub n: usize,
    /// Number density
    pub rho: f64,
    /// Target temperature for the initial velocity draw
    pub temperature: f64,
    /// Integration time step
    pub time_step: f64,
    /// Number of integration steps
    pub n_steps: usize,
    /// Lookup-table resolution in samples per unit length
    #[serde(default = "default_lut_resolution")]
    pub lut_resolution: f64,
    /// Emit a full position snapshot every this many steps (never, if absent)
    #[serde(default)]
    pub snapshot_interval: Option<usize>,
    /// Random seed; drawn from entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
    /// Use the closed-form force path instead of the lookup table
    #[serde(default)]
    pub exact_forces: bool,
}

fn default_lut_resolution() -> f64 {
    10_000.0
}

impl RunConfig {
    /// The reference two-particle run: a short sanity trajectory.
    ///
    /// At this density the box edge is only 1.33 sigma and the lattice
    /// places the pair right at the truncation radius, so the run opens
    /// with a strong repulsive kick and the temperature series overshoots
    /// the target. The diagnostics stay finite and bounded; treat this as
    /// a stress scenario, not an equilibrium one.
    pub fn two_particle() -> Self {
        RunConfig {
            n: 2,
            rho: 0.8442,
            temperature: 0.728,
            time_step: 0.001,
            n_steps: 100,
            lut_resolution: 10_000.0,
            snapshot_interval: Some(1),
            seed: None,
            exact_forces: false,
        }
    }

    /// The reference bulk run: 512 particles near the triple point.
    pub fn bulk_512() -> Self {
        RunConfig {
            n: 512,
            rho: 0.8442,
            temperature: 0.728,
            time_step: 0.001,
            n_steps: 1000,
            lut_resolution: 10_000.0,
            snapshot_interval: None,
            seed: None,
            exact_forces: false,
        }
    }

    /// Look up a named preset.
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "two-particle" => Some(Self::two_particle()),
            "bulk-512" => Some(Self::bulk_512()),
            _ => None,
        }
    }

    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .wrap_err_with(|| format!("unable to read {}", path.as_ref().display()))?;
        let config: RunConfig =
            serde_yml::from_str(&content).wrap_err("failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yml::to_string(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Reject invalid parameters before anything is allocated.
    pub fn validate(&self) -> Result<()> {
        if self.n < 2 {
            bail!("at least two particles are required for pairwise interactions");
        }
        if self.rho <= 0.0 {
            bail!("density must be positive");
        }
        if self.temperature < 0.0 {
            bail!("temperature must be non-negative");
        }
        if self.time_step <= 0.0 {
            bail!("time step must be positive");
        }
        if self.n_steps == 0 {
            bail!("number of steps must be positive");
        }
        if self.lut_resolution <= 0.0 {
            bail!("lookup-table resolution must be positive");
        }
        if let Some(0) = self.snapshot_interval {
            bail!("snapshot interval must be positive");
        }
        Ok(())
    }
}
