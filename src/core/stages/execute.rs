//! Execute stages: compute, write-back and branch retirement.

use crate::core::alu::Alu;
use crate::core::cpu::Cpu;
use crate::core::pipeline::control;
use crate::core::pipeline::hazards::{self, Hazard};
use crate::isa::Opcode;

/// Execute0: applies the late bypass to the operands resolved at
/// Decode1, then computes.
///
/// A NOP bubble holds the Execute1 latch contents and retires nothing.
/// LD issues its data-memory read here; ST defers its write to
/// Execute1; CPY latches the DMA inputs from its resolved operands.
pub fn execute0_stage(cpu: &mut Cpu) {
    if !cpu.current.exec0.active {
        cpu.next.exec1.active = false;
        return;
    }

    let e = cpu.current.exec0;

    if e.opcode == Opcode::Nop {
        cpu.next.exec1 = cpu.current.exec1;
        cpu.next.exec1.active = false;
        return;
    }

    let mut alu0 = e.alu0;
    let mut alu1 = e.alu1;

    match hazards::execute_operand_hazard(&cpu.current, e.src0) {
        Hazard::LinkBypass => alu0 = i32::from(cpu.current.exec1.pc),
        Hazard::AluBypass => alu0 = cpu.current.exec1.aluout,
        _ => {}
    }
    match hazards::execute_operand_hazard(&cpu.current, e.src1) {
        Hazard::LinkBypass => alu1 = i32::from(cpu.current.exec1.pc),
        Hazard::AluBypass => alu1 = cpu.current.exec1.aluout,
        _ => {}
    }

    match e.opcode {
        Opcode::Add
        | Opcode::Sub
        | Opcode::Lsf
        | Opcode::Rsf
        | Opcode::And
        | Opcode::Or
        | Opcode::Xor
        | Opcode::Lhi
        | Opcode::Jlt
        | Opcode::Jle
        | Opcode::Jeq
        | Opcode::Jne
        | Opcode::Jin => cpu.next.exec1.aluout = Alu::execute(e.opcode, alu0, alu1),
        Opcode::Pol => {
            // a CPY sitting at Execute1 has not reached the engine yet
            // but the transfer it starts is already unavoidable
            let cpy_in_flight =
                cpu.current.exec1.active && cpu.current.exec1.opcode == Opcode::Cpy;
            cpu.next.exec1.aluout = i32::from(cpy_in_flight || cpu.current.dma.busy);
        }
        Opcode::Ld => cpu.sramd.read((alu1 as u32 & 0xffff) as u16),
        Opcode::Cpy => {
            cpu.next.dma.src = alu0 as u32;
            cpu.next.dma.dst = cpu.current.r[e.dst] as u32;
            cpu.next.dma.len = alu1 as u32;
        }
        Opcode::St | Opcode::Hlt | Opcode::Nop | Opcode::Undefined(_) => {}
    }

    let n = &mut cpu.next.exec1;
    n.pc = e.pc;
    n.inst = e.inst;
    n.opcode = e.opcode;
    n.dst = e.dst;
    n.src0 = e.src0;
    n.src1 = e.src1;
    n.imm = e.imm;
    n.alu0 = alu0;
    n.alu1 = alu1;
    n.active = true;
}

/// Execute1: retires the instruction.
///
/// ALU-class results and loaded words commit to the register file under
/// the dst > 1 guard, stores drive the data-memory port, CPY starts the
/// DMA engine, branches resolve through [`retire_branch`], and HLT
/// signals the host to stop.
pub fn execute1_stage(cpu: &mut Cpu) {
    if !cpu.current.exec1.active {
        return;
    }

    let e = cpu.current.exec1;
    cpu.stats.instructions_retired += 1;

    match e.opcode {
        Opcode::Hlt => {
            cpu.halted = true;
        }
        Opcode::Add
        | Opcode::Sub
        | Opcode::Lsf
        | Opcode::Rsf
        | Opcode::And
        | Opcode::Or
        | Opcode::Xor
        | Opcode::Lhi
        | Opcode::Pol => {
            if e.dst > 1 {
                cpu.next.r[e.dst] = e.aluout;
            }
            cpu.stats.inst_alu += 1;
        }
        Opcode::Ld => {
            if e.dst > 1 {
                cpu.next.r[e.dst] = cpu.sramd.dataout() as i32;
            }
            cpu.stats.inst_load += 1;
        }
        Opcode::St => {
            cpu.sramd.set_datain(e.alu0 as u32);
            cpu.sramd.write((e.alu1 as u32 & 0xffff) as u16);
            cpu.stats.inst_store += 1;
        }
        Opcode::Cpy => {
            if !cpu.dma_start {
                cpu.dma_start = true;
            }
            cpu.next.dma.dst = cpu.current.r[e.dst] as u32;
            cpu.next.dma.src = e.alu0 as u32;
            cpu.next.dma.len = e.alu1 as u32;
            cpu.stats.inst_dma += 1;
        }
        Opcode::Jlt | Opcode::Jle | Opcode::Jeq | Opcode::Jne | Opcode::Jin => {
            retire_branch(cpu);
            cpu.stats.inst_branch += 1;
        }
        Opcode::Nop | Opcode::Undefined(_) => {}
    }
}

/// Resolves a branch at Execute1.
///
/// Computes the architectural next PC, writes the link register on a
/// taken direction, trains the predictor for conditional branches, and
/// flushes every younger stage whose pc diverges from the resolved
/// target. JIN redirects and links unconditionally; the grouping
/// matters: a conditional branch counts as taken only when its
/// condition held.
fn retire_branch(cpu: &mut Cpu) {
    let e = cpu.current.exec1;

    let target: u16 = if e.opcode.is_cond_branch() {
        let taken = e.aluout != 0;
        cpu.bp.update(taken);
        if taken {
            cpu.next.r[7] = i32::from(e.pc);
            cpu.stats.branches_taken += 1;
            (e.imm as u32 & 0xffff) as u16
        } else {
            cpu.stats.branches_not_taken += 1;
            e.pc.wrapping_add(1)
        }
    } else {
        cpu.next.r[7] = i32::from(e.pc);
        cpu.stats.branches_taken += 1;
        (e.alu0 as u32 & 0xffff) as u16
    };

    let cur = &cpu.current;
    let divergent = (cur.fetch0.active && cur.fetch0.pc != target)
        || (cur.fetch1.active && cur.fetch1.pc != target)
        || (cur.dec0.active && cur.dec0.pc != target)
        || (cur.dec1.active && cur.dec1.pc != target)
        || (cur.exec0.active && cur.exec0.pc != target);

    if divergent {
        control::flush_pipeline(&mut cpu.next, target);
        cpu.stats.branch_flushes += 1;
    }
}
