pub mod config;
pub mod diagnostics;
pub mod lj_pot;
pub mod lut;
pub mod output;
pub mod run_md;
pub mod runner;
pub mod system;

pub use config::RunConfig;
pub use diagnostics::{LindemannMonitor, RadialDistribution};
pub use lj_pot::{LennardJones, TabulatedLennardJones};
pub use lut::LookupTable;
pub use output::DiagnosticWriter;
pub use run_md::{ForceProvider, Integrator, VelocityVerlet};
pub use runner::{run, RunOutcome};
pub use system::{ParticleSystem, SimBox};
