//! Instruction decode stages.

use crate::core::cpu::Cpu;
use crate::core::pipeline::control;
use crate::core::pipeline::hazards::{self, Hazard};
use crate::isa::{self, Opcode};

/// Decode0: speculative branch redirect, store-then-load freeze, and
/// field extraction into Decode1.
///
/// The speculative redirect drops only the two words behind the branch;
/// the branch itself continues to decode this cycle. A store/load
/// conflict instead freezes this stage and leaves Decode1 to drain.
pub fn decode0_stage(cpu: &mut Cpu) {
    if !cpu.current.dec0.active {
        cpu.next.dec1.active = false;
        return;
    }

    let inst = cpu.current.dec0.inst;

    if Opcode::from_word(inst).is_cond_branch() && cpu.bp.predict_taken() {
        control::flush_speculative_fetch(&mut cpu.next, (inst & 0xffff) as u16);
        cpu.stats.speculative_redirects += 1;
    }

    if hazards::store_load_conflict(&cpu.current) {
        control::freeze_fetch(&cpu.current, &mut cpu.next);
        cpu.stats.stalls_store_load += 1;
    } else {
        let d = &mut cpu.next.dec1;
        d.opcode = Opcode::from_word(inst);
        d.dst = isa::dst_field(inst);
        d.src0 = isa::src0_field(inst);
        d.src1 = isa::src1_field(inst);
        d.imm = isa::sign_extend_imm(inst);
        d.inst = inst;
        d.active = true;
        d.pc = cpu.current.dec0.pc;
    }
}

/// Decode1: resolves both operands, bypassing from Execute1 where the
/// hazard analyzer says to, and latches the instruction into Execute0.
///
/// A load-use hazard on either source freezes the front of the pipe
/// and pushes a bubble instead; the producer load still advances out of
/// Execute0 because that stage is evaluated after this one.
pub fn decode1_stage(cpu: &mut Cpu) {
    if !cpu.current.dec1.active {
        cpu.next.exec0.active = false;
        return;
    }

    let d = cpu.current.dec1;

    if hazards::decode_operand_hazard(&cpu.current, d.src0) == Hazard::LoadUseStall
        || hazards::decode_operand_hazard(&cpu.current, d.src1) == Hazard::LoadUseStall
    {
        control::inject_bubble(&cpu.current, &mut cpu.next);
        cpu.stats.stalls_data += 1;
        return;
    }

    let alu0 = select_operand(cpu, d.src0);
    let alu1 = select_operand(cpu, d.src1);

    let e = &mut cpu.next.exec0;
    e.pc = d.pc;
    e.inst = d.inst;
    e.opcode = d.opcode;
    e.dst = d.dst;
    e.src0 = d.src0;
    e.src1 = d.src1;
    e.imm = d.imm;
    e.alu0 = alu0;
    e.alu1 = alu1;
    e.active = true;
}

/// Resolves one source operand.
///
/// Index 0 reads the hardwired zero and index 1 selects the immediate,
/// materialising it into r1 on the way. Everything else consults the
/// hazard analyzer and either bypasses from Execute1 or reads the
/// register file.
fn select_operand(cpu: &mut Cpu, idx: usize) -> i32 {
    match idx {
        0 => 0,
        1 => {
            let imm = cpu.current.dec1.imm;
            cpu.next.r[1] = imm;
            imm
        }
        _ => match hazards::decode_operand_hazard(&cpu.current, idx) {
            Hazard::LinkBypass => i32::from(cpu.current.exec1.pc),
            Hazard::LoadBypass => cpu.sramd.dataout() as i32,
            Hazard::AluBypass => cpu.current.exec1.aluout,
            // a load-use hazard never reaches operand selection; the
            // stage freezes on it first
            Hazard::None | Hazard::LoadUseStall => cpu.current.r[idx],
        },
    }
}
