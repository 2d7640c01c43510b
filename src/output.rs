// file: `src/output.rs`
use std::io::{BufWriter, Write};

use color_eyre::eyre::Result;
use nalgebra::Vector3;
use tracing_subscriber::{fmt::layer, layer::SubscriberExt, util::SubscriberInitExt, Registry};

/// Route log lines to stderr so the diagnostic stream on stdout stays
/// machine-readable.
pub fn setup_logging() {
    let stderr_layer = layer().with_writer(std::io::stderr).with_target(false);
    Registry::default().with(stderr_layer).init();
}

/// Buffered sink for the per-step diagnostic stream.
///
/// One tab-separated line per step (`step lambda temperature`), plus
/// position snapshots on a configurable cadence: one `x y z` line per
/// particle, terminated by a blank line. Buffering keeps output latency
/// out of the integration loop.
pub struct DiagnosticWriter<W: Write> {
    out: BufWriter<W>,
}

impl<W: Write> DiagnosticWriter<W> {
    pub fn new(sink: W) -> Self {
        DiagnosticWriter {
            out: BufWriter::new(sink),
        }
    }

    /// Record the per-step scalars.
    pub fn record(&mut self, step: usize, lambda: f64, temperature: f64) -> Result<()> {
        writeln!(self.out, "{}\t{:.6}\t{:.6}", step, lambda, temperature)?;
        Ok(())
    }

    /// Record a full position snapshot.
    pub fn snapshot(&mut self, positions: &[Vector3<f64>]) -> Result<()> {
        for p in positions {
            writeln!(self.out, "{:.6}\t{:.6}\t{:.6}", p.x, p.y, p.z)?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    /// Flush everything to the underlying sink.
    pub fn finish(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}
