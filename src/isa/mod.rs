//! SP Instruction Set Architecture definitions.
//!
//! An SP instruction is one 32-bit word: opcode in bits 31:25 (five bits
//! used, the top two are zero), dst in 24:22, src0 in 21:19, src1 in
//! 18:16 and a 16-bit immediate in 15:0 that is sign-extended to 32 bits
//! at decode. Opcode slots not listed below are reserved; a reserved word
//! flows through the pipeline with no register or memory effect.

/// Architectural opcodes of the SP processor.
///
/// `Nop` is never fetched from memory; it is synthesised into Execute0
/// when the pipeline inserts a bubble. Reserved encodings decode to
/// `Undefined` and retire without side effects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Opcode {
    /// r[dst] = alu0 + alu1.
    #[default]
    Add,
    /// r[dst] = alu0 - alu1.
    Sub,
    /// r[dst] = alu0 << alu1.
    Lsf,
    /// r[dst] = alu0 >> alu1 (arithmetic).
    Rsf,
    /// Bitwise AND.
    And,
    /// Bitwise OR.
    Or,
    /// Bitwise XOR.
    Xor,
    /// r[dst] = (alu0 & 0xffff) | (alu1 << 16).
    Lhi,
    /// r[dst] = sramd[alu1].
    Ld,
    /// sramd[alu1] = alu0.
    St,
    /// Start a DMA block copy: src = alu0, dst = r[dst], len = alu1.
    Cpy,
    /// r[dst] = 1 while the DMA engine is busy, else 0.
    Pol,
    /// Pipeline bubble marker.
    Nop,
    /// Jump to imm[15:0] if alu0 < alu1.
    Jlt,
    /// Jump to imm[15:0] if alu0 <= alu1.
    Jle,
    /// Jump to imm[15:0] if alu0 == alu1.
    Jeq,
    /// Jump to imm[15:0] if alu0 != alu1.
    Jne,
    /// Jump to alu0[15:0] unconditionally.
    Jin,
    /// Stop the simulation.
    Hlt,
    /// Reserved encoding; no architectural effect.
    Undefined(u8),
}

impl Opcode {
    /// Decodes the opcode field of a raw instruction word.
    pub fn from_word(inst: u32) -> Self {
        Self::from_code(((inst >> 25) & 0x1f) as u8)
    }

    /// Maps a 5-bit opcode value to its operation.
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => Opcode::Add,
            1 => Opcode::Sub,
            2 => Opcode::Lsf,
            3 => Opcode::Rsf,
            4 => Opcode::And,
            5 => Opcode::Or,
            6 => Opcode::Xor,
            7 => Opcode::Lhi,
            8 => Opcode::Ld,
            9 => Opcode::St,
            10 => Opcode::Cpy,
            11 => Opcode::Pol,
            12 => Opcode::Nop,
            16 => Opcode::Jlt,
            17 => Opcode::Jle,
            18 => Opcode::Jeq,
            19 => Opcode::Jne,
            20 => Opcode::Jin,
            24 => Opcode::Hlt,
            other => Opcode::Undefined(other),
        }
    }

    /// The 5-bit encoding of this operation, as it appears in the trace.
    pub fn code(self) -> u32 {
        match self {
            Opcode::Add => 0,
            Opcode::Sub => 1,
            Opcode::Lsf => 2,
            Opcode::Rsf => 3,
            Opcode::And => 4,
            Opcode::Or => 5,
            Opcode::Xor => 6,
            Opcode::Lhi => 7,
            Opcode::Ld => 8,
            Opcode::St => 9,
            Opcode::Cpy => 10,
            Opcode::Pol => 11,
            Opcode::Nop => 12,
            Opcode::Jlt => 16,
            Opcode::Jle => 17,
            Opcode::Jeq => 18,
            Opcode::Jne => 19,
            Opcode::Jin => 20,
            Opcode::Hlt => 24,
            Opcode::Undefined(code) => u32::from(code),
        }
    }

    /// Operations whose result is produced by the ALU and written back
    /// at Execute1. POL belongs here: its DMA-busy flag is a register
    /// result like any other and is bypassed the same way.
    pub fn is_alu(self) -> bool {
        matches!(
            self,
            Opcode::Add
                | Opcode::Sub
                | Opcode::Lsf
                | Opcode::Rsf
                | Opcode::And
                | Opcode::Or
                | Opcode::Xor
                | Opcode::Lhi
                | Opcode::Pol
        )
    }

    /// Conditional branches (JLT/JLE/JEQ/JNE).
    pub fn is_cond_branch(self) -> bool {
        matches!(self, Opcode::Jlt | Opcode::Jle | Opcode::Jeq | Opcode::Jne)
    }

    /// Operations that occupy the data-memory port.
    pub fn is_mem(self) -> bool {
        matches!(self, Opcode::Ld | Opcode::St)
    }
}

/// Destination register field of an instruction word.
pub fn dst_field(inst: u32) -> usize {
    ((inst >> 22) & 0x7) as usize
}

/// First source register field of an instruction word.
pub fn src0_field(inst: u32) -> usize {
    ((inst >> 19) & 0x7) as usize
}

/// Second source register field of an instruction word.
pub fn src1_field(inst: u32) -> usize {
    ((inst >> 16) & 0x7) as usize
}

/// The 16-bit immediate field, sign-extended to 32 bits.
pub fn sign_extend_imm(inst: u32) -> i32 {
    i32::from(inst as u16 as i16)
}

/// Assembles an instruction word from its fields.
pub fn encode(op: Opcode, dst: u8, src0: u8, src1: u8, imm: u16) -> u32 {
    (op.code() << 25)
        | (u32::from(dst & 0x7) << 22)
        | (u32::from(src0 & 0x7) << 19)
        | (u32::from(src1 & 0x7) << 16)
        | u32::from(imm)
}
