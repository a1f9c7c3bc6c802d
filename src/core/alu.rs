//! Arithmetic Logic Unit for the Execute0 stage.
//!
//! All arithmetic wraps; shifts take their amount modulo 32 as a real
//! 32-bit barrel shifter would. Conditional branches produce their
//! condition as 0/1 in aluout, and JIN produces a constant 1 so the
//! taken-branch predicates downstream hold for it unconditionally.

use crate::isa::Opcode;

/// The integer ALU.
pub struct Alu;

impl Alu {
    /// Computes the result for an ALU-class or branch operation.
    ///
    /// Memory, DMA and control operations have no combinational result
    /// here: LD/ST resolve through the memory port, POL is computed in
    /// the execute stage from the DMA engine state, and CPY/HLT/NOP
    /// carry no value.
    pub fn execute(op: Opcode, alu0: i32, alu1: i32) -> i32 {
        match op {
            Opcode::Add => alu0.wrapping_add(alu1),
            Opcode::Sub => alu0.wrapping_sub(alu1),
            Opcode::Lsf => alu0.wrapping_shl(alu1 as u32),
            Opcode::Rsf => alu0.wrapping_shr(alu1 as u32),
            Opcode::And => alu0 & alu1,
            Opcode::Or => alu0 | alu1,
            Opcode::Xor => alu0 ^ alu1,
            Opcode::Lhi => (alu0 & 0xffff) | alu1.wrapping_shl(16),
            Opcode::Jlt => i32::from(alu0 < alu1),
            Opcode::Jle => i32::from(alu0 <= alu1),
            Opcode::Jeq => i32::from(alu0 == alu1),
            Opcode::Jne => i32::from(alu0 != alu1),
            Opcode::Jin => 1,
            Opcode::Ld
            | Opcode::St
            | Opcode::Cpy
            | Opcode::Pol
            | Opcode::Nop
            | Opcode::Hlt
            | Opcode::Undefined(_) => 0,
        }
    }
}
