//! Block-copy DMA engine.
//!
//! A four-state machine copies one word per cycle from `src` to `dst`
//! over the data-memory port, yielding to the pipeline whenever the
//! port is reserved. The length register counts down through zero, so a
//! transfer of length `n` moves `n + 1` words; the trailing transition
//! to idle happens exactly when the pre-decrement length was zero.

use crate::core::cpu::Cpu;

/// DMA controller state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DmaState {
    /// No transfer in progress; waiting for a start pulse.
    #[default]
    Idle,
    /// Issue the source read if the port is free.
    Fetch,
    /// Port contended; retry the fetch when it frees up.
    Wait,
    /// Move one word and advance the pointers.
    Copy,
}

/// Architectural registers of the DMA engine, part of the snapshot.
#[derive(Clone, Copy, Debug, Default)]
pub struct DmaRegs {
    /// Current controller state.
    pub state: DmaState,
    /// Next source address.
    pub src: u32,
    /// Next destination address.
    pub dst: u32,
    /// Remaining length; counts down through zero.
    pub len: u32,
    /// High from start pulse until the transfer completes.
    pub busy: bool,
}

/// One tick of the DMA state machine.
///
/// Runs after the six pipeline stages, so it observes the memory-busy
/// signal computed from the next snapshot: whether the pipeline will
/// own the data-memory port on the cycle the engine would use it.
pub fn dma_stage(cpu: &mut Cpu) {
    let cur = &cpu.current;
    let next = &mut cpu.next;

    match cur.dma.state {
        DmaState::Idle => {
            next.dma.busy = false;
            if cpu.dma_start {
                next.dma.state = DmaState::Fetch;
                next.dma.busy = true;
            }
        }
        DmaState::Fetch => {
            if cpu.mem_busy {
                next.dma.state = DmaState::Wait;
                cpu.stats.dma_wait_cycles += 1;
            } else {
                cpu.sramd.read((cur.dma.src & 0xffff) as u16);
                next.dma.state = DmaState::Copy;
            }
        }
        DmaState::Wait => {
            if cpu.mem_busy {
                next.dma.state = DmaState::Wait;
                cpu.stats.dma_wait_cycles += 1;
            } else {
                next.dma.state = DmaState::Fetch;
            }
        }
        DmaState::Copy => {
            let word = cpu.sramd.extract((cur.dma.src & 0xffff) as u16);
            cpu.sramd.set_datain(word);
            cpu.sramd.write((cur.dma.dst & 0xffff) as u16);

            next.dma.src = cur.dma.src.wrapping_add(1);
            next.dma.dst = cur.dma.dst.wrapping_add(1);
            next.dma.len = cur.dma.len.wrapping_sub(1);
            cpu.stats.dma_words_copied += 1;

            if cur.dma.len == 0 {
                cpu.dma_start = false;
                next.dma.state = DmaState::Idle;
            } else {
                next.dma.state = DmaState::Fetch;
            }
        }
    }
}
