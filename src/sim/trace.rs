//! Per-cycle trace sink.
//!
//! Emits one block per cycle from the current snapshot: the cycle
//! number, registers r2..r7, and the latched fields of all six stages
//! as 8-digit hex, terminated by a blank line. Stage fields are dumped
//! whether or not the stage is active; held values are part of the
//! machine's visible state.

use std::io::{self, Write};

use crate::core::pipeline::latches::Snapshot;

/// Writes cycle-by-cycle machine state to any byte sink.
pub struct TraceSink<W: Write> {
    out: W,
}

impl<W: Write> TraceSink<W> {
    /// Wraps a writer.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Dumps one cycle's snapshot.
    pub fn write_cycle(&mut self, snap: &Snapshot) -> io::Result<()> {
        let out = &mut self.out;

        writeln!(out, "cycle {}", snap.cycle)?;
        writeln!(out, "cycle_counter {:08x}", snap.cycle)?;
        for i in 2..=7 {
            writeln!(out, "r{} {:08x}", i, snap.r[i] as u32)?;
        }

        writeln!(out, "fetch0_active {:08x}", u32::from(snap.fetch0.active))?;
        writeln!(out, "fetch0_pc {:08x}", snap.fetch0.pc)?;

        writeln!(out, "fetch1_active {:08x}", u32::from(snap.fetch1.active))?;
        writeln!(out, "fetch1_pc {:08x}", snap.fetch1.pc)?;

        writeln!(out, "dec0_active {:08x}", u32::from(snap.dec0.active))?;
        writeln!(out, "dec0_pc {:08x}", snap.dec0.pc)?;
        writeln!(out, "dec0_inst {:08x}", snap.dec0.inst)?;

        writeln!(out, "dec1_active {:08x}", u32::from(snap.dec1.active))?;
        writeln!(out, "dec1_pc {:08x}", snap.dec1.pc)?;
        writeln!(out, "dec1_inst {:08x}", snap.dec1.inst)?;
        writeln!(out, "dec1_opcode {:08x}", snap.dec1.opcode.code())?;
        writeln!(out, "dec1_src0 {:08x}", snap.dec1.src0)?;
        writeln!(out, "dec1_src1 {:08x}", snap.dec1.src1)?;
        writeln!(out, "dec1_dst {:08x}", snap.dec1.dst)?;
        writeln!(out, "dec1_immediate {:08x}", snap.dec1.imm as u32)?;

        writeln!(out, "exec0_active {:08x}", u32::from(snap.exec0.active))?;
        writeln!(out, "exec0_pc {:08x}", snap.exec0.pc)?;
        writeln!(out, "exec0_inst {:08x}", snap.exec0.inst)?;
        writeln!(out, "exec0_opcode {:08x}", snap.exec0.opcode.code())?;
        writeln!(out, "exec0_src0 {:08x}", snap.exec0.src0)?;
        writeln!(out, "exec0_src1 {:08x}", snap.exec0.src1)?;
        writeln!(out, "exec0_dst {:08x}", snap.exec0.dst)?;
        writeln!(out, "exec0_immediate {:08x}", snap.exec0.imm as u32)?;
        writeln!(out, "exec0_alu0 {:08x}", snap.exec0.alu0 as u32)?;
        writeln!(out, "exec0_alu1 {:08x}", snap.exec0.alu1 as u32)?;

        writeln!(out, "exec1_active {:08x}", u32::from(snap.exec1.active))?;
        writeln!(out, "exec1_pc {:08x}", snap.exec1.pc)?;
        writeln!(out, "exec1_inst {:08x}", snap.exec1.inst)?;
        writeln!(out, "exec1_opcode {:08x}", snap.exec1.opcode.code())?;
        writeln!(out, "exec1_src0 {:08x}", snap.exec1.src0)?;
        writeln!(out, "exec1_src1 {:08x}", snap.exec1.src1)?;
        writeln!(out, "exec1_dst {:08x}", snap.exec1.dst)?;
        writeln!(out, "exec1_immediate {:08x}", snap.exec1.imm as u32)?;
        writeln!(out, "exec1_alu0 {:08x}", snap.exec1.alu0 as u32)?;
        writeln!(out, "exec1_alu1 {:08x}", snap.exec1.alu1 as u32)?;
        writeln!(out, "exec1_aluout {:08x}", snap.exec1.aluout as u32)?;

        writeln!(out)
    }

    /// Flushes the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    /// Unwraps the sink, handing the writer back.
    pub fn into_inner(self) -> W {
        self.out
    }
}
