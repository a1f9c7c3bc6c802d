//! Simulation harness: the per-cycle host loop around the core.

/// Program image loading and SRAM dumps.
pub mod loader;

/// Per-cycle trace sink.
pub mod trace;

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use crate::common::SimError;
use crate::config::Config;
use crate::core::Cpu;
use trace::TraceSink;

/// Why a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// HLT retired; both SRAM dumps were written.
    Halted,
    /// The configured cycle limit was reached before HLT.
    CycleLimit,
}

/// Owns the core, the trace sink and the output paths for one run.
pub struct Simulator {
    /// The simulated core.
    pub cpu: Cpu,
    tracer: Option<(PathBuf, TraceSink<BufWriter<File>>)>,
    max_cycles: u64,
    srami_dump: PathBuf,
    sramd_dump: PathBuf,
}

impl Simulator {
    /// Builds a simulator from a configuration and a loaded image.
    pub fn new(config: &Config, image: &[u32]) -> Result<Self, SimError> {
        let mut cpu = Cpu::new();
        cpu.load_image(image);

        let tracer = if config.trace_enabled() {
            let path = PathBuf::from(&config.files.cycle_trace);
            let file = File::create(&path).map_err(|source| SimError::Io {
                path: path.clone(),
                source,
            })?;
            Some((path, TraceSink::new(BufWriter::new(file))))
        } else {
            None
        };

        Ok(Self {
            cpu,
            tracer,
            max_cycles: config.general.max_cycles,
            srami_dump: PathBuf::from(&config.files.srami_dump),
            sramd_dump: PathBuf::from(&config.files.sramd_dump),
        })
    }

    /// Runs the clock until HLT retires or the cycle limit trips.
    ///
    /// The trace block for a cycle is emitted from the current snapshot
    /// before the tick is evaluated, so the trace starts with the reset
    /// state at cycle 0 and ends with the cycle in which HLT retires.
    pub fn run(&mut self) -> Result<RunOutcome, SimError> {
        let outcome = loop {
            if let Some((path, sink)) = &mut self.tracer {
                sink.write_cycle(&self.cpu.current)
                    .map_err(|source| SimError::Io {
                        path: path.clone(),
                        source,
                    })?;
            }

            self.cpu.tick();

            if self.cpu.halted {
                break RunOutcome::Halted;
            }
            if self.max_cycles > 0 && self.cpu.stats.cycles >= self.max_cycles {
                break RunOutcome::CycleLimit;
            }
        };

        if let Some((path, sink)) = &mut self.tracer {
            sink.flush().map_err(|source| SimError::Io {
                path: path.clone(),
                source,
            })?;
        }

        if outcome == RunOutcome::Halted {
            loader::dump_sram(&self.srami_dump, &self.cpu.srami)?;
            loader::dump_sram(&self.sramd_dump, &self.cpu.sramd)?;
        }

        Ok(outcome)
    }
}
