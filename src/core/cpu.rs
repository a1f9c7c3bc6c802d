//! The SP processor core.

use crate::core::bp::BranchPredictor;
use crate::core::dma;
use crate::core::pipeline::latches::Snapshot;
use crate::core::stages;
use crate::mem::{Sram, SRAM_WORDS};
use crate::stats::SimStats;

/// The six-stage SP core with its SRAMs, predictor and DMA engine.
///
/// All architectural and microarchitectural registers live in the two
/// [`Snapshot`] values: `current` is frozen for the duration of a tick
/// and `next` collects every write; the core swaps them at the tick
/// boundary. `dma_start` and `mem_busy` are level signals outside the
/// snapshot pair, exactly as wide wires would be.
pub struct Cpu {
    /// State at the last clock edge; read-only within a tick.
    pub current: Snapshot,
    /// State being assembled for the next clock edge.
    pub next: Snapshot,
    /// Instruction memory.
    pub srami: Sram,
    /// Data memory, shared with the DMA engine.
    pub sramd: Sram,
    /// Global 2-bit branch predictor.
    pub bp: BranchPredictor,
    /// Execution counters.
    pub stats: SimStats,
    /// Raised by a retiring CPY, cleared when the DMA transfer drains.
    pub dma_start: bool,
    /// Pipeline's claim on the data-memory port, recomputed each tick
    /// from the next snapshot.
    pub mem_busy: bool,
    /// Set when HLT retires; the host stops ticking.
    pub halted: bool,
    start: bool,
}

impl Cpu {
    /// Creates a core in the reset state with zeroed SRAMs.
    pub fn new() -> Self {
        Self {
            current: Snapshot::default(),
            next: Snapshot::default(),
            srami: Sram::new(),
            sramd: Sram::new(),
            bp: BranchPredictor::new(),
            stats: SimStats::default(),
            dma_start: false,
            mem_busy: false,
            halted: false,
            start: true,
        }
    }

    /// Populates both SRAMs identically from a program image.
    pub fn load_image(&mut self, image: &[u32]) {
        for (addr, word) in image.iter().enumerate().take(SRAM_WORDS) {
            self.srami.inject(addr as u16, *word);
            self.sramd.inject(addr as u16, *word);
        }
    }

    /// Zeroes all core state. Memory contents are left alone.
    pub fn reset(&mut self) {
        self.current = Snapshot::default();
        self.next = Snapshot::default();
        self.bp.reset();
        self.dma_start = false;
        self.mem_busy = false;
        self.halted = false;
    }

    /// Advances the machine by one clock cycle.
    ///
    /// The next snapshot starts as a copy of the current one, the six
    /// stages run in pipeline order, the memory-busy signal is derived
    /// from the next snapshot's Decode1/Execute0/Execute1 opcodes, the
    /// DMA engine steps, and the SRAM read latches capture. Note the
    /// busy computation looks at opcode fields without their active
    /// bits: a stale LD/ST opcode held in a drained stage keeps the
    /// port reserved, which is part of the machine's visible timing.
    pub fn tick(&mut self) {
        self.next = self.current.clone();
        self.next.cycle = self.current.cycle.wrapping_add(1);

        if self.start {
            self.next.fetch0.active = true;
        }

        stages::fetch::fetch0_stage(self);
        stages::fetch::fetch1_stage(self);
        stages::decode::decode0_stage(self);
        stages::decode::decode1_stage(self);
        stages::execute::execute0_stage(self);
        stages::execute::execute1_stage(self);

        self.mem_busy = self.next.dec1.opcode.is_mem()
            || self.next.exec0.opcode.is_mem()
            || self.next.exec1.opcode.is_mem();

        dma::dma_stage(self);

        self.srami.tick();
        self.sramd.tick();

        std::mem::swap(&mut self.current, &mut self.next);
        self.stats.cycles += 1;
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}
